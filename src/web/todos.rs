//! Todo pages and mutations.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::Method,
    response::{Json, Redirect},
};
use chrono::{DateTime, Utc};

use super::form::FormData;
use super::AppState;
use crate::db::categories::Categories;
use crate::db::db::Db;
use crate::db::subtasks::Subtasks;
use crate::db::todos::Todos;
use crate::libs::error::{AppError, AppResult};
use crate::libs::messages::Message;
use crate::libs::todo::{parse_due_date, Category, NewTodo, SubtaskEdit, Todo, TodoEdit, TodoFilter};
use crate::libs::view::{EditTodoPage, PriorityChoice, TodoFormPage, TodoListPage, TodoView};
use crate::{msg_debug, msg_info, msg_warning};

pub const LIST_PATH: &str = "/";

/// Raw listing parameters, echoed back unchanged for sticky filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl ListParams {
    /// Reads the filters from a query string. A repeated key takes its last
    /// value, as form fields do.
    pub fn from_query(query: Option<&str>) -> Self {
        let form = FormData::parse(query.unwrap_or_default().as_bytes());
        Self {
            category: form.get("category").map(str::to_string),
            priority: form.get("priority").map(str::to_string),
            status: form.get("status").map(str::to_string),
        }
    }

    /// Empty values impose no constraint; an unrecognized status is ignored.
    pub fn to_filter(&self) -> TodoFilter {
        TodoFilter {
            category: self.category.clone().filter(|v| !v.is_empty()),
            priority: self.priority.clone().filter(|v| !v.is_empty()),
            status: self.status.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

/// Lists todos matching the `category`, `priority` and `status` query values.
/// Values that match nothing give an empty list, never an error.
pub async fn todo_list(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> AppResult<Json<TodoListPage>> {
    let params = ListParams::from_query(query.as_deref());
    let filter = params.to_filter();
    let (todos, categories) = state
        .with_db(move |db| {
            let categories = Categories::new(&db.conn).list()?;
            let todos = Todos::new(&db.conn).list(&filter)?;
            let views = todo_views(db, todos, &categories)?;
            Ok((views, categories))
        })
        .await?;

    Ok(Json(TodoListPage {
        todos,
        categories,
        selected_category: params.category,
        selected_priority: params.priority,
        selected_status: params.status,
    }))
}

/// Data for the add form: every category and the priority choices.
pub async fn add_todo_form(State(state): State<Arc<AppState>>) -> AppResult<Json<TodoFormPage>> {
    let categories = state.with_db(|db| Categories::new(&db.conn).list()).await?;
    Ok(Json(TodoFormPage {
        categories,
        priorities: PriorityChoice::all(),
    }))
}

/// Creates a todo with its subtasks. A missing title creates nothing but
/// still redirects to the list.
pub async fn add_todo(State(state): State<Arc<AppState>>, body: Bytes) -> AppResult<Redirect> {
    let form = FormData::parse(&body);
    let title = form.get("title").unwrap_or_default();
    if title.is_empty() {
        msg_debug!(Message::TodoTitleMissing);
        return Ok(Redirect::to(LIST_PATH));
    }

    let todo = NewTodo {
        title: title.to_string(),
        description: form.get("description").unwrap_or_default().to_string(),
        priority: form.get("priority").and_then(|p| p.parse().ok()).unwrap_or_default(),
        category_id: parse_category_id(form.get("category"))?,
        due_date: parse_due(form.get("due_date"))?,
        notes: form.get("notes").unwrap_or_default().to_string(),
        subtask_titles: form.get_owned_list("subtask_title[]"),
    };

    let id = state
        .with_db(move |db| {
            let tx = db.conn.transaction()?;
            let id = Todos::new(&tx).insert(&todo)?;
            tx.commit()?;
            Ok(id)
        })
        .await?;
    msg_info!(Message::TodoCreated(id));

    Ok(Redirect::to(LIST_PATH))
}

/// Flips completion on any method. A missing todo is a 404.
pub async fn toggle_todo(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> AppResult<Redirect> {
    let completed = state.with_db(move |db| Todos::new(&db.conn).toggle(id)).await?;
    msg_info!(Message::TodoToggled { id, completed });
    Ok(Redirect::to(LIST_PATH))
}

/// Deletes on POST only; other methods leave the todo in place. A missing
/// todo is reported whatever the method.
pub async fn delete_todo(State(state): State<Arc<AppState>>, method: Method, Path(id): Path<i64>) -> AppResult<Redirect> {
    let deleted = state
        .with_db(move |db| {
            let todos = Todos::new(&db.conn);
            todos.get(id)?;
            if method != Method::POST {
                msg_warning!(Message::MutationIgnoredForMethod(method.to_string()));
                return Ok(false);
            }
            todos.delete(id)?;
            Ok(true)
        })
        .await?;
    if deleted {
        msg_info!(Message::TodoDeleted(id));
    }
    Ok(Redirect::to(LIST_PATH))
}

/// Data for the edit form: the todo with its subtasks, plus the choices.
pub async fn edit_todo_form(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> AppResult<Json<EditTodoPage>> {
    let page = state
        .with_db(move |db| {
            let todo = Todos::new(&db.conn).get(id)?;
            let categories = Categories::new(&db.conn).list()?;
            let mut views = todo_views(db, vec![todo], &categories)?;
            let todo = views.remove(0);
            Ok(EditTodoPage {
                todo,
                categories,
                priorities: PriorityChoice::all(),
            })
        })
        .await?;
    Ok(Json(page))
}

/// Applies a submitted edit form in one transaction.
///
/// See [`edit_from_form`] for how absent and empty fields are treated.
pub async fn edit_todo(State(state): State<Arc<AppState>>, Path(id): Path<i64>, body: Bytes) -> AppResult<Redirect> {
    let form = FormData::parse(&body);
    state
        .with_db(move |db| {
            let tx = db.conn.transaction()?;
            let todos = Todos::new(&tx);
            let current = todos.get(id)?;
            let edit = edit_from_form(&form, &current)?;
            todos.apply_edit(id, &edit)?;
            tx.commit()?;
            Ok(())
        })
        .await?;
    Ok(Redirect::to(LIST_PATH))
}

/// Builds the edit for `current` from a submitted form.
///
/// Title, description, priority and notes keep their current value when the
/// field is absent. Category and due date are always replaced, so an absent
/// or empty field clears them. An existing subtask is completed exactly when
/// its id is listed in `existing_subtask_completed[]`.
pub fn edit_from_form(form: &FormData, current: &Todo) -> AppResult<TodoEdit> {
    let ids = form.get_list("subtask_id[]");
    let titles = form.get_list("existing_subtask_title[]");
    let completed = form.get_list("existing_subtask_completed[]");

    let subtasks = ids
        .iter()
        .enumerate()
        .filter(|(_, raw)| !raw.is_empty())
        .filter_map(|(idx, raw)| {
            let id = raw.parse::<i64>().ok()?;
            Some(SubtaskEdit {
                id,
                title: titles.get(idx).map(|t| t.to_string()),
                completed: completed.contains(raw),
            })
        })
        .collect();

    Ok(TodoEdit {
        title: form.get("title").map_or_else(|| current.title.clone(), str::to_string),
        description: form.get("description").map_or_else(|| current.description.clone(), str::to_string),
        priority: form.get("priority").and_then(|p| p.parse().ok()).unwrap_or(current.priority),
        notes: form.get("notes").map_or_else(|| current.notes.clone(), str::to_string),
        category_id: parse_category_id(form.get("category"))?,
        due_date: parse_due(form.get("due_date"))?,
        subtasks,
        new_subtask_titles: form.get_owned_list("new_subtask_title[]"),
        new_subtask_offset: ids.len() as i64,
    })
}

fn parse_category_id(value: Option<&str>) -> AppResult<Option<i64>> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::InvalidInput(Message::InvalidCategoryId(raw.to_string()))),
    }
}

fn parse_due(value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_due_date(raw)
            .map(Some)
            .ok_or_else(|| AppError::InvalidInput(Message::InvalidDueDate(raw.to_string()))),
    }
}

fn todo_views(db: &Db, todos: Vec<Todo>, categories: &[Category]) -> AppResult<Vec<TodoView>> {
    let subtasks = Subtasks::new(&db.conn);
    todos
        .into_iter()
        .map(|todo| {
            let items = subtasks.list_for_todo(todo.id)?;
            Ok(TodoView::new(todo, items, categories))
        })
        .collect()
}
