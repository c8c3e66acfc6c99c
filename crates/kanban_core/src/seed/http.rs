//! HTTP seed source.

use super::{parse_seed_payload, SeedError, SeedResult, SeedSource};
use crate::model::task::TaskRecord;
use log::{info, warn};
use std::time::{Duration, Instant};

/// Public list endpoint used on first run.
pub const DEFAULT_SEED_URL: &str = "https://jsl-kanban-api.vercel.app/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches seed tasks with a blocking GET request.
pub struct HttpSeedSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SeedSource for HttpSeedSource {
    fn fetch_seed(&self) -> SeedResult<Vec<TaskRecord>> {
        let started_at = Instant::now();

        let response = self.agent.get(&self.url).call().map_err(|err| {
            let seed_err = match err {
                ureq::Error::Status(code, _) => SeedError::Status(code),
                ureq::Error::Transport(transport) => SeedError::Transport(transport.to_string()),
            };
            warn!(
                "event=seed_fetch module=seed status=error url={} duration_ms={} error={}",
                self.url,
                started_at.elapsed().as_millis(),
                seed_err
            );
            seed_err
        })?;

        let payload: serde_json::Value = response
            .into_json()
            .map_err(|err| SeedError::InvalidPayload(err.to_string()))?;
        let records = parse_seed_payload(payload)?;

        info!(
            "event=seed_fetch module=seed status=ok url={} duration_ms={} count={}",
            self.url,
            started_at.elapsed().as_millis(),
            records.len()
        );
        Ok(records)
    }
}
