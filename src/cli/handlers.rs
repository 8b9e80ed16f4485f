use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store_io::TaskFile;
use crate::model::task::{DATE_FORMAT, Locale, TaskRecord};
use crate::session::Session;
use crate::util::unicode::display_width;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Where the task file lives and which locale new tasks use, after
/// combining the config file with command-line overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file: PathBuf,
    pub locale: Locale,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let settings = resolve_settings(&cli)?;
    tracing::debug!(file = %settings.file.display(), locale = ?settings.locale, "settings resolved");
    let json = cli.json;

    match cli.command {
        // Write commands
        Commands::Category(cmd) => match cmd.action {
            CategoryAction::Add(arg) => cmd_category_add(&settings, arg),
            CategoryAction::Rm(arg) => cmd_category_rm(&settings, arg),
        },
        Commands::Add(args) => cmd_add(&settings, args, json),
        Commands::Done(args) => cmd_done(&settings, args),
        Commands::Rm(args) => cmd_rm(&settings, args),
        Commands::Sort(args) => cmd_sort(&settings, args, json),
        Commands::Reset(args) => cmd_reset(&settings, args),

        // Read commands
        Commands::Categories => cmd_categories(&settings, json),
        Commands::List(args) => cmd_list(&settings, args, json),
        Commands::Search(args) => cmd_search(&settings, args, json),
        Commands::Pending => cmd_view(&settings, json, Session::uncompleted_tasks),
        Commands::Completed => cmd_view(&settings, json, Session::completed_tasks),
        Commands::Rate(args) => cmd_rate(&settings, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Command-line flags win over the config file.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, config_io::ConfigError> {
    let config = match &cli.config {
        Some(path) => config_io::read_config_from(path)?,
        None => config_io::read_config()?,
    };
    Ok(Settings {
        file: cli.file.clone().unwrap_or(config.storage.file),
        locale: cli.locale.unwrap_or(config.display.locale),
    })
}

fn open_read(settings: &Settings) -> Result<Session, Box<dyn std::error::Error>> {
    Ok(Session::open(
        TaskFile::new(&settings.file),
        settings.locale,
    )?)
}

fn open_write(settings: &Settings) -> Result<Session, Box<dyn std::error::Error>> {
    Ok(Session::open_locked(
        TaskFile::new(&settings.file),
        settings.locale,
    )?)
}

fn print_tasks(tasks: &[TaskRecord], json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else {
        for line in format_task_lines(tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn today_str() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_category_add(settings: &Settings, arg: CategoryNameArg) -> CmdResult {
    let mut session = open_write(settings)?;
    let name = session.create_category(&arg.name)?;
    println!("created category {}", name);
    Ok(())
}

fn cmd_category_rm(settings: &Settings, arg: CategoryNameArg) -> CmdResult {
    let mut session = open_write(settings)?;
    let removed = session.remove_category(&arg.name)?;
    println!("removed category {} ({} tasks)", arg.name, removed);
    Ok(())
}

fn cmd_add(settings: &Settings, args: AddArgs, json: bool) -> CmdResult {
    let mut session = open_write(settings)?;
    let date = args.date.unwrap_or_else(today_str);
    let task = session.add_task(
        &args.category,
        &args.description,
        &args.priority,
        &date,
        args.done,
    )?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("{}", format_task_line(&task));
    }
    Ok(())
}

fn cmd_done(settings: &Settings, args: DoneArgs) -> CmdResult {
    let mut session = open_write(settings)?;
    let marked = session.mark_done(&args.description)?;
    if marked == 0 {
        println!("no task named {:?}", args.description);
    } else {
        println!("{} → done ({} marked)", args.description, marked);
    }
    Ok(())
}

fn cmd_rm(settings: &Settings, args: RmArgs) -> CmdResult {
    let mut session = open_write(settings)?;
    match session.delete_task(&args.category, &args.description)? {
        Some(task) => println!("deleted {:?} from {}", task.description, args.category),
        None => println!("no task named {:?} in {}", args.description, args.category),
    }
    Ok(())
}

fn cmd_sort(settings: &Settings, args: SortArgs, json: bool) -> CmdResult {
    let mut session = open_write(settings)?;
    session.sort_category(&args.category, args.mode)?;
    print_tasks(&session.list_category(&args.category), json)
}

fn cmd_reset(settings: &Settings, args: ResetArgs) -> CmdResult {
    if !args.yes {
        return Err("refusing to delete all tasks without --yes".into());
    }
    let mut session = open_write(settings)?;
    session.reset()?;
    println!("all categories and tasks deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_categories(settings: &Settings, json: bool) -> CmdResult {
    let session = open_read(settings)?;
    let stats = session.category_stats();
    if json {
        let out: Vec<CategoryStatsJson> = stats.iter().map(stats_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    let name_width = stats
        .iter()
        .map(|s| display_width(&s.name))
        .max()
        .unwrap_or(0);
    for s in &stats {
        println!("{}", format_stats_line(s, name_width));
    }
    Ok(())
}

fn cmd_list(settings: &Settings, args: ListArgs, json: bool) -> CmdResult {
    let session = open_read(settings)?;
    if !session.store().contains(&args.category) {
        tracing::warn!(category = %args.category, "listing unknown category");
    }
    print_tasks(&session.list_category(&args.category), json)
}

fn cmd_search(settings: &Settings, args: SearchArgs, json: bool) -> CmdResult {
    let session = open_read(settings)?;
    let hit = session.search(&args.text)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&hit_to_json(&hit))?);
    } else {
        println!("[{}] {}", hit.category, format_task_line(&hit.task));
    }
    Ok(())
}

fn cmd_view(settings: &Settings, json: bool, view: fn(&Session) -> Vec<TaskRecord>) -> CmdResult {
    let session = open_read(settings)?;
    print_tasks(&view(&session), json)
}

fn cmd_rate(settings: &Settings, args: RateArgs, json: bool) -> CmdResult {
    let session = open_read(settings)?;
    let rate = session.completion_rate(&args.category)?;
    if json {
        let out = RateJson {
            category: &args.category,
            completion_rate: rate,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}: {}", args.category, format_rate(rate));
    }
    Ok(())
}
