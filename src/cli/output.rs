use serde::Serialize;

use crate::model::task::TaskRecord;
use crate::ops::category_ops::CategoryStats;
use crate::ops::search::SearchHit;
use crate::util::unicode::fit_to_width;

/// Width of the description column in text listings
const DESCRIPTION_WIDTH: usize = 32;
/// Width of the priority column in text listings
const PRIORITY_WIDTH: usize = 8;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CategoryStatsJson {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

#[derive(Serialize)]
pub struct SearchHitJson<'a> {
    pub category: &'a str,
    #[serde(flatten)]
    pub task: &'a TaskRecord,
}

#[derive(Serialize)]
pub struct RateJson<'a> {
    pub category: &'a str,
    pub completion_rate: f64,
}

pub fn stats_to_json(stats: &CategoryStats) -> CategoryStatsJson {
    CategoryStatsJson {
        name: stats.name.clone(),
        total: stats.total,
        completed: stats.completed,
        completion_rate: stats.completion_rate,
    }
}

pub fn hit_to_json(hit: &SearchHit) -> SearchHitJson<'_> {
    SearchHitJson {
        category: &hit.category,
        task: &hit.task,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `[x] Description…  Priority  2024-01-01`
pub fn format_task_line(task: &TaskRecord) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    format!(
        "[{}] {}  {}  {}",
        check,
        fit_to_width(&task.description, DESCRIPTION_WIDTH),
        fit_to_width(&task.priority, PRIORITY_WIDTH),
        task.date
    )
}

pub fn format_task_lines(tasks: &[TaskRecord]) -> Vec<String> {
    tasks.iter().map(format_task_line).collect()
}

/// Percentage with two decimals, e.g. `66.67%`
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// `Work  2/3  66.67%`
pub fn format_stats_line(stats: &CategoryStats, name_width: usize) -> String {
    format!(
        "{}  {}/{}  {}",
        fit_to_width(&stats.name, name_width),
        stats.completed,
        stats.total,
        format_rate(stats.completion_rate)
    )
}
