//! `kanban` command-line front end.
//!
//! Every command initializes the board first (saved slot, or the remote seed
//! on first run), applies its change, then prints the resulting board.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kanban_core::config::ENV_LOADING_DELAY_MS;
use kanban_core::db::open_db;
use kanban_core::{
    default_log_level, init_logging, BoardConfig, ConfigError, HttpSeedSource, NewTask, Priority,
    SqliteTaskStorage, TaskBoard, TaskPatch, TaskStatus,
};
use log::warn;
use render::TerminalRenderer;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE_NAME: &str = "board.db";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "A three-column task board in your terminal")]
#[command(version)]
struct Cli {
    /// Directory holding the board database and logs
    #[arg(long, env = "KANBAN_HOME", default_value = ".kanban", global = true)]
    data_dir: PathBuf,

    /// trace | debug | info | warn | error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the board
    List,
    /// Create a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, value_enum, default_value_t = ColumnArg::Todo)]
        status: ColumnArg,
        #[arg(short, long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
    },
    /// Change fields of an existing task
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, value_enum)]
        status: Option<ColumnArg>,
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,
    },
    /// Move a task to another column
    Move {
        id: String,
        #[arg(value_enum)]
        status: ColumnArg,
    },
    /// Delete a task
    Rm { id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColumnArg {
    Todo,
    Doing,
    Done,
}

impl From<ColumnArg> for TaskStatus {
    fn from(value: ColumnArg) -> Self {
        match value {
            ColumnArg::Todo => TaskStatus::Todo,
            ColumnArg::Doing => TaskStatus::Doing,
            ColumnArg::Done => TaskStatus::Done,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = absolute(&cli.data_dir)?;

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, data_dir.join(LOG_DIR_NAME)).context("failed to initialize logging")?;

    let config = cli_config(|name| std::env::var(name).ok())?;
    let conn = open_db(data_dir.join(DB_FILE_NAME))
        .with_context(|| format!("failed to open board in `{}`", data_dir.display()))?;

    let storage = SqliteTaskStorage::with_key(&conn, config.storage_key.clone());
    let seed = HttpSeedSource::with_timeout(config.seed_url.clone(), config.seed_timeout);
    let mut board =
        TaskBoard::new(storage, TerminalRenderer::default(), seed).with_config(&config);
    board.initialize();

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {}
        Commands::Add {
            title,
            description,
            status,
            priority,
        } => {
            let input = NewTask::new(title)
                .with_description(description)
                .with_status(status.into())
                .with_priority(priority.into());
            let id = board.create(input)?;
            println!("created {id}\n");
        }
        Commands::Edit {
            id,
            title,
            description,
            status,
            priority,
        } => {
            let patch = TaskPatch {
                title,
                description,
                status: status.map(TaskStatus::from),
                priority: priority.map(Priority::from),
            };
            if patch.is_empty() {
                bail!("nothing to change; pass at least one of --title, --description, --status, --priority");
            }
            report_missing(&id, board.update(&id, patch)?);
        }
        Commands::Move { id, status } => {
            report_missing(&id, board.update(&id, TaskPatch::status(status.into()))?);
        }
        Commands::Rm { id } => {
            report_missing(&id, board.remove(&id));
        }
    }

    board
        .renderer()
        .draw(&mut std::io::stdout().lock())
        .context("failed to write board")?;
    Ok(())
}

/// Board config for one-shot commands: no loading pause unless
/// `KANBAN_LOADING_DELAY_MS` asks for one.
fn cli_config(lookup: impl Fn(&str) -> Option<String>) -> Result<BoardConfig, ConfigError> {
    let delay_requested = lookup(ENV_LOADING_DELAY_MS).is_some_and(|v| !v.trim().is_empty());
    let mut config = BoardConfig::from_lookup(lookup)?;
    if !delay_requested {
        config.loading_delay = Duration::ZERO;
    }
    Ok(config)
}

fn report_missing(id: &str, found: bool) {
    if !found {
        warn!("event=cli_command module=cli status=not_found task_id={id}");
        eprintln!("no task with id `{id}`\n");
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}
