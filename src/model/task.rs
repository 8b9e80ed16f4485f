use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for task dates on disk and on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Language used for priority labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Arabic,
}

/// Task priority, independent of the language it is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank: High=3, Medium=2, Low=1
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// The label written for this priority in the given locale
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, Priority::High) => "High",
            (Locale::English, Priority::Medium) => "Medium",
            (Locale::English, Priority::Low) => "Low",
            (Locale::Arabic, Priority::High) => "عالي",
            (Locale::Arabic, Priority::Medium) => "متوسط",
            (Locale::Arabic, Priority::Low) => "منخفض",
        }
    }

    /// Parse a label written in any supported locale. Matching is exact.
    pub fn from_label(label: &str) -> Option<Priority> {
        Priority::ALL.into_iter().find(|p| {
            p.label(Locale::English) == label || p.label(Locale::Arabic) == label
        })
    }

    /// Parse a label in any locale, or a lowercase English keyword (`high`, `medium`, `low`).
    pub fn parse_input(input: &str) -> Option<Priority> {
        Priority::from_label(input).or_else(|| match input.to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        })
    }
}

/// One task. Priority and date keep their on-disk text so a load/save
/// cycle reproduces the file exactly; typed views are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    pub priority: String,
    pub date: String,
    pub completed: bool,
}

impl TaskRecord {
    pub fn new(
        description: impl Into<String>,
        priority: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        TaskRecord {
            description: description.into(),
            priority: priority.into(),
            date: date.into(),
            completed: false,
        }
    }

    /// Typed priority, if the stored label is one of the known ones
    pub fn priority_level(&self) -> Option<Priority> {
        Priority::from_label(&self.priority)
    }

    /// Parsed calendar date, if the stored text is `YYYY-MM-DD`
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a `YYYY-MM-DD` date. Only the canonical form is accepted: no sign,
/// no surrounding whitespace, two-digit month and day.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == s).then_some(date)
}

/// Ordering applied by a category sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortMode {
    /// Ascending by date
    Date,
    /// Descending by priority rank
    Priority,
    /// Ascending by description, byte-wise
    #[value(alias = "alpha")]
    Alphabetical,
}
