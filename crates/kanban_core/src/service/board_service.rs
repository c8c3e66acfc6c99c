//! Task board use-case service.
//!
//! # Responsibility
//! - Own the in-memory task sequence and expose the board operations.
//! - After every mutation: persist the whole sequence, then re-render.
//!
//! # Invariants
//! - The sequence is only mutated through `initialize/create/update/remove`.
//! - Seeded ids are unique; a repeated seed id is replaced by a fresh one.
//! - Update/remove of an unknown id is a silent no-op; the board still
//!   re-renders so the view stays consistent.
//! - No operation here returns a storage or seed error; those degrade to an
//!   empty/unchanged state plus a log line.

use crate::config::{BoardConfig, DEFAULT_LOADING_DELAY};
use crate::id::{IdGenerator, TimeRandomIdGenerator};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch, TaskValidationError};
use crate::repo::task_storage::TaskStorage;
use crate::seed::SeedSource;
use crate::view::board::{project, BoardRenderer, BoardView, ViewMode};
use log::{error, info, warn};
use std::collections::HashSet;
use std::time::Duration;

/// Where `initialize` found its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    Storage,
    Seed,
}

impl InitSource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Seed => "seed",
        }
    }
}

/// Board store wiring a task sequence to storage and a renderer.
pub struct TaskBoard<S: TaskStorage, R: BoardRenderer> {
    tasks: Vec<Task>,
    storage: S,
    renderer: R,
    seed: Box<dyn SeedSource>,
    ids: Box<dyn IdGenerator>,
    loading_delay: Duration,
}

impl<S: TaskStorage, R: BoardRenderer> TaskBoard<S, R> {
    /// Creates an empty board. Call `initialize` before use.
    pub fn new(storage: S, renderer: R, seed: impl SeedSource + 'static) -> Self {
        Self {
            tasks: Vec::new(),
            storage,
            renderer,
            seed: Box::new(seed),
            ids: Box::new(TimeRandomIdGenerator),
            loading_delay: DEFAULT_LOADING_DELAY,
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_loading_delay(mut self, delay: Duration) -> Self {
        self.loading_delay = delay;
        self
    }

    /// Applies the board-level tunables from `config`.
    pub fn with_config(self, config: &BoardConfig) -> Self {
        self.with_loading_delay(config.loading_delay)
    }

    /// Loads the sequence from storage, or from the seed source when storage
    /// is empty, then persists and renders it.
    ///
    /// # Side effects
    /// - Switches the renderer to `Loading` and blocks for the configured
    ///   loading delay.
    /// - Exactly one storage write and one render.
    /// - A second call is not guarded; it replaces the sequence again.
    pub fn initialize(&mut self) -> InitSource {
        self.renderer.set_view_mode(ViewMode::Loading);
        if !self.loading_delay.is_zero() {
            std::thread::sleep(self.loading_delay);
        }

        let mut source = InitSource::Storage;
        let mut tasks = self.storage.load();
        if tasks.is_empty() {
            source = InitSource::Seed;
            tasks = self.fetch_seed();
        }

        self.tasks = tasks;
        self.storage.save(&self.tasks);
        self.render();

        info!(
            "event=board_init module=board status=ok source={} count={}",
            source.as_str(),
            self.tasks.len()
        );
        source
    }

    /// Appends a new task with a fresh id.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when the title is blank; nothing
    ///   is persisted or rendered in that case.
    pub fn create(&mut self, input: NewTask) -> Result<TaskId, TaskValidationError> {
        input.validate()?;

        let id = self.ids.next_id();
        self.tasks.push(Task::from_new(id.clone(), input));
        self.storage.save(&self.tasks);
        self.render();

        info!(
            "event=task_create module=board status=ok task_id={} count={}",
            id,
            self.tasks.len()
        );
        Ok(id)
    }

    /// Shallow-merges `patch` into the task with `id`.
    ///
    /// Returns `Ok(false)` when no such task exists; the board is still
    /// re-rendered.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<bool, TaskValidationError> {
        patch.validate()?;

        let found = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.apply(patch);
                true
            }
            None => false,
        };

        if found {
            self.storage.save(&self.tasks);
            info!("event=task_update module=board status=ok task_id={id}");
        } else {
            info!("event=task_update module=board status=not_found task_id={id}");
        }
        self.render();
        Ok(found)
    }

    /// Removes the task with `id`. Returns whether a task was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;

        self.storage.save(&self.tasks);
        self.render();

        info!(
            "event=task_remove module=board status={} task_id={} count={}",
            if removed { "ok" } else { "not_found" },
            id,
            self.tasks.len()
        );
        removed
    }

    /// Current sequence in append order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Projection of the current sequence, as last rendered.
    pub fn view(&self) -> BoardView {
        project(&self.tasks)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn render(&mut self) {
        let view = project(&self.tasks);
        self.renderer.render(&view);
    }

    fn fetch_seed(&self) -> Vec<Task> {
        let records = match self.seed.fetch_seed() {
            Ok(records) => records,
            Err(err) => {
                error!("event=seed_load module=board status=error error={err}");
                return Vec::new();
            }
        };

        let total = records.len();
        let mut seen = HashSet::new();
        let mut reassigned = 0usize;
        let mut tasks = Vec::with_capacity(total);
        for record in records {
            let Some(mut task) = record.normalize(|| self.ids.next_id()) else {
                continue;
            };
            if !seen.insert(task.id.clone()) {
                let fresh = self.unused_id(&seen);
                warn!(
                    "event=seed_load module=board status=duplicate task_id={} reassigned_to={}",
                    task.id, fresh
                );
                task.id = fresh;
                seen.insert(task.id.clone());
                reassigned += 1;
            }
            tasks.push(task);
        }
        if tasks.len() != total || reassigned > 0 {
            warn!(
                "event=seed_load module=board status=partial skipped={} reassigned={} kept={}",
                total - tasks.len(),
                reassigned,
                tasks.len()
            );
        }
        tasks
    }

    fn unused_id(&self, taken: &HashSet<TaskId>) -> TaskId {
        loop {
            let id = self.ids.next_id();
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}
