use super::subtasks::Subtasks;
use crate::libs::error::{AppError, AppResult};
use crate::libs::messages::Message;
use crate::libs::todo::{NewTodo, Todo, TodoEdit, TodoFilter};
use crate::{msg_debug, msg_info};
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const TODO_COLUMNS: &str = "id, title, description, completed, priority, category_id, due_date, notes, created_at, updated_at";
const INSERT_TODO: &str = "INSERT INTO todos (title, description, completed, priority, category_id, due_date, notes, created_at, updated_at)
    VALUES (?1, ?2, FALSE, ?3, ?4, ?5, ?6, ?7, ?7)";
const UPDATE_TODO: &str = "UPDATE todos SET title = ?2, description = ?3, priority = ?4, notes = ?5, category_id = ?6, due_date = ?7, updated_at = ?8
    WHERE id = ?1";
const TOGGLE_TODO: &str = "UPDATE todos SET completed = NOT completed, updated_at = ?2 WHERE id = ?1";
const DELETE_TODO: &str = "DELETE FROM todos WHERE id = ?1";
const ORDER_TODOS: &str = "ORDER BY created_at DESC, id DESC";

/// Store for to-do items, borrowing a connection or transaction.
pub struct Todos<'a> {
    conn: &'a Connection,
}

impl<'a> Todos<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts the todo followed by its non-blank subtasks. Run it inside a
    /// transaction to make the whole creation atomic.
    ///
    /// Subtask titles are trimmed; blank ones are skipped but still count
    /// toward the `order` of the titles after them.
    ///
    /// # Returns
    ///
    /// The id of the new todo.
    pub fn insert(&self, todo: &NewTodo) -> AppResult<i64> {
        let now = Utc::now();
        self.conn.execute(
            INSERT_TODO,
            params![todo.title, todo.description, todo.priority, todo.category_id, todo.due_date, todo.notes, now],
        )?;
        let id = self.conn.last_insert_rowid();

        let count = Subtasks::new(self.conn).insert_titles(id, &todo.subtask_titles, 0)?;
        if count > 0 {
            msg_debug!(Message::SubtasksCreated { todo_id: id, count });
        }
        Ok(id)
    }

    /// Fetches a todo, `None` when it does not exist.
    pub fn get_by_id(&self, id: i64) -> AppResult<Option<Todo>> {
        let sql = format!("SELECT {} FROM todos WHERE id = ?1", TODO_COLUMNS);
        self.conn.query_row(&sql, params![id], Self::from_row).optional().map_err(Into::into)
    }

    /// Like [`get_by_id`](Self::get_by_id) but a missing todo is an error.
    pub fn get(&self, id: i64) -> AppResult<Todo> {
        self.get_by_id(id)?.ok_or(AppError::NotFound(Message::TodoNotFound(id)))
    }

    /// Todos matching every supplied filter, newest first.
    ///
    /// Category and priority values are bound as text and compared with the
    /// stored columns, so a value that names nothing yields an empty list.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use tickoff::db::{db::Db, todos::Todos};
    /// use tickoff::libs::todo::{StatusFilter, TodoFilter};
    ///
    /// let db = Db::open("tickoff.db")?;
    /// let urgent = Todos::new(&db.conn).list(&TodoFilter::all().priority("high").status(StatusFilter::Active))?;
    /// # Ok::<(), tickoff::libs::error::AppError>(())
    /// ```
    pub fn list(&self, filter: &TodoFilter) -> AppResult<Vec<Todo>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(category) = &filter.category {
            conditions.push("category_id = ?");
            values.push(Value::Text(category.clone()));
        }
        if let Some(priority) = &filter.priority {
            conditions.push("priority = ?");
            values.push(Value::Text(priority.clone()));
        }
        if let Some(status) = filter.status {
            conditions.push("completed = ?");
            values.push(Value::Integer(status.completed() as i64));
        }

        let mut sql = format!("SELECT {} FROM todos", TODO_COLUMNS);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push(' ');
        sql.push_str(ORDER_TODOS);

        let mut stmt = self.conn.prepare(&sql)?;
        let todos = stmt.query_map(params_from_iter(values.iter()), Self::from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    /// Writes the edited fields, reconciles existing subtasks and appends new
    /// ones. Submitted subtask ids that do not belong to this todo are skipped.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when the todo does not exist.
    pub fn apply_edit(&self, id: i64, edit: &TodoEdit) -> AppResult<()> {
        let affected = self.conn.execute(
            UPDATE_TODO,
            params![id, edit.title, edit.description, edit.priority, edit.notes, edit.category_id, edit.due_date, Utc::now()],
        )?;
        if affected == 0 {
            return Err(AppError::NotFound(Message::TodoNotFound(id)));
        }

        let subtasks = Subtasks::new(self.conn);
        for change in &edit.subtasks {
            let Some(existing) = subtasks.get_for_todo(id, change.id)? else {
                msg_debug!("Skipping subtask {} not owned by todo {}", change.id, id);
                continue;
            };
            let title = change.title.as_deref().unwrap_or(&existing.title);
            subtasks.update(existing.id, title, change.completed)?;
        }

        let count = subtasks.insert_titles(id, &edit.new_subtask_titles, edit.new_subtask_offset)?;
        if count > 0 {
            msg_debug!(Message::SubtasksCreated { todo_id: id, count });
        }
        msg_info!(Message::TodoUpdated(id));
        Ok(())
    }

    /// Flips `completed` and returns the new state.
    pub fn toggle(&self, id: i64) -> AppResult<bool> {
        let affected = self.conn.execute(TOGGLE_TODO, params![id, Utc::now()])?;
        if affected == 0 {
            return Err(AppError::NotFound(Message::TodoNotFound(id)));
        }
        let completed = self.conn.query_row("SELECT completed FROM todos WHERE id = ?1", params![id], |row| row.get(0))?;
        Ok(completed)
    }

    /// Deletes a todo together with its subtasks.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let affected = self.conn.execute(DELETE_TODO, params![id])?;
        if affected == 0 {
            return Err(AppError::NotFound(Message::TodoNotFound(id)));
        }
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            completed: row.get(3)?,
            priority: row.get(4)?,
            category_id: row.get(5)?,
            due_date: row.get(6)?,
            notes: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}
