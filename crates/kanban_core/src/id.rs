//! Task id generation.
//!
//! # Responsibility
//! - Provide an injectable id capability so the board stays deterministic
//!   under test.
//!
//! # Invariants
//! - Generated ids are non-empty.
//! - Uniqueness is probabilistic for `TimeRandomIdGenerator`, not guaranteed.

use crate::model::task::TaskId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh task ids.
pub trait IdGenerator {
    fn next_id(&self) -> TaskId;
}

/// `task-<unix millis>-<9 base36 chars>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRandomIdGenerator;

impl IdGenerator for TimeRandomIdGenerator {
    fn next_id(&self) -> TaskId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        format!("task-{millis}-{}", random_suffix())
    }
}

/// `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TaskId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }
}

fn random_suffix() -> String {
    base36_digits(Uuid::new_v4().as_u128())
}

/// Lowest `RANDOM_SUFFIX_LEN` base-36 digits of `value`, least significant first.
fn base36_digits(mut value: u128) -> String {
    let radix = BASE36.len() as u128;
    let mut suffix = String::with_capacity(RANDOM_SUFFIX_LEN);
    for _ in 0..RANDOM_SUFFIX_LEN {
        suffix.push(char::from(BASE36[(value % radix) as usize]));
        value /= radix;
    }
    suffix
}
