//! Plain-text board renderer.

use kanban_core::{BoardRenderer, BoardView, Column, ViewMode};
use std::io::{self, Write};

/// Keeps the latest board state; `draw` writes it out once the command is
/// done so intermediate renders do not spam the terminal.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    mode: Option<ViewMode>,
    last: Option<BoardView>,
}

impl TerminalRenderer {
    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        match (self.mode, &self.last) {
            (Some(ViewMode::Loading), _) | (None, _) => writeln!(out, "Loading board..."),
            (Some(ViewMode::Error), _) => writeln!(out, "Could not load the board."),
            (Some(ViewMode::Empty), _) => {
                writeln!(out, "No tasks yet. Add one with `kanban add <title>`.")
            }
            (Some(ViewMode::Content), Some(view)) => {
                for (index, column) in view.columns().into_iter().enumerate() {
                    if index > 0 {
                        writeln!(out)?;
                    }
                    draw_column(out, column)?;
                }
                Ok(())
            }
            (Some(ViewMode::Content), None) => Ok(()),
        }
    }
}

impl BoardRenderer for TerminalRenderer {
    fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = Some(mode);
    }

    fn render(&mut self, view: &BoardView) {
        self.mode = Some(view.mode);
        self.last = Some(view.clone());
    }
}

fn draw_column(out: &mut impl Write, column: &Column) -> io::Result<()> {
    writeln!(
        out,
        "{} ({})",
        column.status.as_str().to_uppercase(),
        column.count
    )?;
    for task in &column.tasks {
        writeln!(out, "  [{:<6}] {}  ({})", task.priority, task.title, task.id)?;
        if !task.description.is_empty() {
            writeln!(out, "           {}", task.description)?;
        }
    }
    Ok(())
}
