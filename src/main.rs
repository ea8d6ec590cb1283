use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context, Result};
use std::path::PathBuf;
use todostore::TodoStore;

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "Todo list over an embedded SQLite image synced to durable storage")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the store directory (default: per-user data directory)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database (restore or create + persist) without listing
    Init,

    /// List all tasks, newest first
    List {
        /// Emit tasks as JSON instead of a checklist
        #[arg(long)]
        json: bool,
    },

    /// Add a new task
    Add {
        /// Task title
        title: String,
    },

    /// Change a task's title
    Update {
        /// Task id
        id: i64,
        /// New title
        title: String,
    },

    /// Set a task's completion flag
    Toggle {
        /// Task id
        id: i64,
        /// true to mark complete, false to reopen
        completed: bool,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: i64,
    },
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("todostore"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store_path = cli.store_path.unwrap_or_else(default_store_path);

    let store = TodoStore::open(&store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;

    match cli.command {
        Commands::Init => {
            store.init()?;
            println!("Store initialized at {}", store_path.display());
        }
        Commands::List { json } => {
            let tasks = store.list_tasks()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks");
            } else {
                for task in tasks {
                    let marker = if task.completed { "[x]".green() } else { "[ ]".normal() };
                    let when = task
                        .created_at
                        .and_then(DateTime::from_timestamp_millis)
                        .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    let title = if task.completed {
                        task.title.dimmed()
                    } else {
                        task.title.normal()
                    };
                    println!("{marker} {:>4}  {title}  {}", task.id, when.dimmed());
                }
            }
        }
        Commands::Add { title } => {
            let task = store.add_task(title.trim())?;
            println!("Added task {} - {}", task.id, task.title);
        }
        Commands::Update { id, title } => {
            store.update_task(id, title.trim())?;
            println!("Updated task {id}");
        }
        Commands::Toggle { id, completed } => {
            store.toggle_complete(id, completed)?;
            println!("Task {id} marked {}", if completed { "complete" } else { "open" });
        }
        Commands::Delete { id } => {
            store.delete_task(id)?;
            println!("Deleted task {id}");
        }
    }

    Ok(())
}
