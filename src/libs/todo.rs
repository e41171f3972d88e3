//! Record types for categories, todos and subtasks, plus the listing filter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CATEGORY_COLOR: &str = "#667eea";

/// Color used for a priority token that is not one of the known levels.
pub const UNKNOWN_PRIORITY_COLOR: &str = "#95a5a6";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Priority::High => "#e74c3c",
            Priority::Medium => "#f39c12",
            Priority::Low => "#3498db",
        }
    }
}

/// Display color for a raw priority token; unknown tokens get the neutral color.
pub fn priority_color(token: &str) -> &'static str {
    token.parse::<Priority>().map(|p| p.color()).unwrap_or(UNKNOWN_PRIORITY_COLOR)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token '{}'", self.0)
    }
}

impl std::error::Error for UnknownToken {}

impl FromStr for Priority {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Completion state selected in the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Completed,
}

impl StatusFilter {
    pub fn completed(&self) -> bool {
        matches!(self, StatusFilter::Completed)
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A category about to be inserted.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: &str, color: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            color: color.unwrap_or(DEFAULT_CATEGORY_COLOR).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub category_id: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    /// Incomplete and past its due date as of `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) if !self.completed => now > due,
            _ => false,
        }
    }

    /// Color for this todo's priority token.
    pub fn priority_color(&self) -> &'static str {
        priority_color(self.priority.as_str())
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A todo about to be inserted, together with its initial subtask titles.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category_id: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: String,
    /// Raw titles in submission order; blank entries keep their position.
    pub subtask_titles: Vec<String>,
}

impl NewTodo {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: i64,
    pub todo_id: i64,
    pub title: String,
    pub completed: bool,
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

/// Submitted state of one existing subtask on the edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtaskEdit {
    pub id: i64,
    pub title: Option<String>,
    pub completed: bool,
}

/// Field values to write back onto an existing todo.
#[derive(Debug, Clone)]
pub struct TodoEdit {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub notes: String,
    pub category_id: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
    pub subtasks: Vec<SubtaskEdit>,
    /// Raw new titles; blank entries keep their position.
    pub new_subtask_titles: Vec<String>,
    /// Order assigned to the first new subtask.
    pub new_subtask_offset: i64,
}

/// Listing filter. Category and priority are matched literally against the
/// stored values, so a value that names nothing matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoFilter {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<StatusFilter>,
}

impl TodoFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }
}

/// Parses a submitted due date. Values without an offset are taken as UTC.
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    const FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];
    if let Some(naive) = FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok()) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
