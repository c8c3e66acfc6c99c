//! Board projection: task sequence -> three sorted columns + view mode.
//!
//! # Invariants
//! - Tasks with an unrecognized status appear in no column but still count
//!   toward the board being non-empty.
//! - Column order is priority descending; equal weights keep sequence order.
//! - `project` only yields `Empty` or `Content`; `Loading` is set by the
//!   board's initialization path, `Error` by nothing.

use crate::model::task::{Task, TaskStatus};

/// Which top-level state the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Loading,
    Error,
    Empty,
    Content,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Empty => "empty",
            Self::Content => "content",
        }
    }
}

/// One status column, already sorted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
    pub count: usize,
}

impl Column {
    fn from_tasks(status: TaskStatus, mut tasks: Vec<Task>) -> Self {
        // `sort_by` is stable, which keeps append order for ties.
        tasks.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
        Self {
            status,
            count: tasks.len(),
            tasks,
        }
    }
}

/// Full render state handed to a `BoardRenderer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub todo: Column,
    pub doing: Column,
    pub done: Column,
    pub mode: ViewMode,
}

impl BoardView {
    /// Columns in board order.
    pub fn columns(&self) -> [&Column; 3] {
        [&self.todo, &self.doing, &self.done]
    }

    pub fn column(&self, status: &TaskStatus) -> Option<&Column> {
        match status {
            TaskStatus::Todo => Some(&self.todo),
            TaskStatus::Doing => Some(&self.doing),
            TaskStatus::Done => Some(&self.done),
            TaskStatus::Unrecognized(_) => None,
        }
    }

    /// Number of tasks visible across all columns.
    pub fn visible_count(&self) -> usize {
        self.columns().iter().map(|column| column.count).sum()
    }
}

/// Presentation layer fed by the board after every state change.
pub trait BoardRenderer {
    fn set_view_mode(&mut self, mode: ViewMode);
    fn render(&mut self, view: &BoardView);
}

/// Renderer that discards everything; for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl BoardRenderer for NullRenderer {
    fn set_view_mode(&mut self, _mode: ViewMode) {}

    fn render(&mut self, _view: &BoardView) {}
}

/// Groups tasks into status columns and picks the view mode.
pub fn project(tasks: &[Task]) -> BoardView {
    let mut todo = Vec::new();
    let mut doing = Vec::new();
    let mut done = Vec::new();

    for task in tasks {
        match task.status {
            TaskStatus::Todo => todo.push(task.clone()),
            TaskStatus::Doing => doing.push(task.clone()),
            TaskStatus::Done => done.push(task.clone()),
            TaskStatus::Unrecognized(_) => {}
        }
    }

    BoardView {
        todo: Column::from_tasks(TaskStatus::Todo, todo),
        doing: Column::from_tasks(TaskStatus::Doing, doing),
        done: Column::from_tasks(TaskStatus::Done, done),
        mode: if tasks.is_empty() {
            ViewMode::Empty
        } else {
            ViewMode::Content
        },
    }
}
