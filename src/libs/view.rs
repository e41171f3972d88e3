//! View models handed to the rendering layer.
//!
//! Derived display fields (`is_overdue`, `priority_color`) are computed here
//! on every read and never stored.

use super::todo::{Category, Priority, Subtask, Todo};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    #[serde(flatten)]
    pub todo: Todo,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub is_overdue: bool,
    pub priority_color: &'static str,
    pub subtasks: Vec<Subtask>,
    pub subtasks_done: usize,
    pub subtasks_total: usize,
}

impl TodoView {
    pub fn new(todo: Todo, subtasks: Vec<Subtask>, categories: &[Category]) -> Self {
        Self::at(todo, subtasks, categories, Utc::now())
    }

    /// Builds the view as of `now`.
    pub fn at(todo: Todo, subtasks: Vec<Subtask>, categories: &[Category], now: DateTime<Utc>) -> Self {
        let category = todo.category_id.and_then(|id| categories.iter().find(|c| c.id == id));
        let subtasks_done = subtasks.iter().filter(|s| s.completed).count();

        Self {
            category_name: category.map(|c| c.name.clone()),
            category_color: category.map(|c| c.color.clone()),
            is_overdue: todo.is_overdue_at(now),
            priority_color: todo.priority_color(),
            subtasks_total: subtasks.len(),
            subtasks_done,
            subtasks,
            todo,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityChoice {
    pub value: Priority,
    pub label: &'static str,
}

impl PriorityChoice {
    pub fn all() -> Vec<Self> {
        Priority::ALL
            .iter()
            .map(|p| Self { value: *p, label: p.label() })
            .collect()
    }
}

/// Filtered list of todos with the categories and the filter values echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct TodoListPage {
    pub todos: Vec<TodoView>,
    pub categories: Vec<Category>,
    pub selected_category: Option<String>,
    pub selected_priority: Option<String>,
    pub selected_status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoFormPage {
    pub categories: Vec<Category>,
    pub priorities: Vec<PriorityChoice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditTodoPage {
    pub todo: TodoView,
    pub categories: Vec<Category>,
    pub priorities: Vec<PriorityChoice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesPage {
    pub categories: Vec<Category>,
}
