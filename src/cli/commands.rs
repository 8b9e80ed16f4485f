use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::task::{Locale, SortMode};

#[derive(Parser)]
#[command(name = "tn", about = concat!("tasknest v", env!("CARGO_PKG_VERSION"), " - tasks in categories, kept in one JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to use (default: from config, else ./tasks.json)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Language of priority labels written for new tasks
    #[arg(long, value_enum, global = true)]
    pub locale: Option<Locale>,

    /// Config file (default: $XDG_CONFIG_HOME/tasknest/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or remove a category
    Category(CategoryCmd),
    /// List categories with their completion rate
    Categories,
    /// Add a task to a category
    Add(AddArgs),
    /// Mark a task done (in every category that has it)
    Done(DoneArgs),
    /// Delete a task from a category
    Rm(RmArgs),
    /// List the tasks of a category
    List(ListArgs),
    /// Reorder the tasks of a category
    Sort(SortArgs),
    /// Find the first task whose description contains the text
    Search(SearchArgs),
    /// Show uncompleted tasks across all categories
    Pending,
    /// Show completed tasks across all categories
    Completed,
    /// Show a category's completion rate
    Rate(RateArgs),
    /// Delete all categories and tasks
    Reset(ResetArgs),
}

// ---------------------------------------------------------------------------
// Category args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CategoryCmd {
    #[command(subcommand)]
    pub action: CategoryAction,
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create an empty category
    Add(CategoryNameArg),
    /// Remove a category and all of its tasks
    Rm(CategoryNameArg),
}

#[derive(Args)]
pub struct CategoryNameArg {
    /// Category name
    pub name: String,
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Category to add the task to
    pub category: String,
    /// Task description
    pub description: String,
    /// Priority: high, medium, low (or a label in any supported language)
    #[arg(short, long, default_value = "medium")]
    pub priority: String,
    /// Date as YYYY-MM-DD (default: today)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Add the task already completed
    #[arg(long)]
    pub done: bool,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Exact task description
    pub description: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Category holding the task
    pub category: String,
    /// Exact task description
    pub description: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Category to list
    pub category: String,
}

#[derive(Args)]
pub struct SortArgs {
    /// Category to sort
    pub category: String,
    /// Sort order
    #[arg(value_enum)]
    pub mode: SortMode,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    pub text: String,
}

#[derive(Args)]
pub struct RateArgs {
    /// Category to report on
    pub category: String,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Confirm deleting everything
    #[arg(long)]
    pub yes: bool,
}
