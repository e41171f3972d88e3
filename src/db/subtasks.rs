use crate::libs::error::{AppError, AppResult};
use crate::libs::messages::Message;
use crate::libs::todo::Subtask;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SUBTASK_COLUMNS: &str = "id, todo_id, title, completed, \"order\", created_at";
const INSERT_SUBTASK: &str = "INSERT INTO subtasks (todo_id, title, completed, \"order\", created_at) VALUES (?1, ?2, FALSE, ?3, ?4)";
const UPDATE_SUBTASK: &str = "UPDATE subtasks SET title = ?2, completed = ?3 WHERE id = ?1";
const TOGGLE_SUBTASK: &str = "UPDATE subtasks SET completed = NOT completed WHERE id = ?1";
const DELETE_SUBTASK: &str = "DELETE FROM subtasks WHERE id = ?1";
const ORDER_SUBTASKS: &str = "ORDER BY \"order\", created_at, id";

/// Store for checklist items. Subtasks are addressed by their own id.
pub struct Subtasks<'a> {
    conn: &'a Connection,
}

impl<'a> Subtasks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts one incomplete subtask and returns its id.
    pub fn insert(&self, todo_id: i64, title: &str, order: i64) -> AppResult<i64> {
        self.conn.execute(INSERT_SUBTASK, params![todo_id, title, order, Utc::now()])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Inserts every non-blank title, trimmed, with `order` = `first_order` plus
    /// its position in `titles`. Returns how many were created.
    pub fn insert_titles(&self, todo_id: i64, titles: &[String], first_order: i64) -> AppResult<usize> {
        let mut created = 0;
        for (idx, title) in titles.iter().enumerate() {
            let title = title.trim();
            if title.is_empty() {
                continue;
            }
            self.insert(todo_id, title, first_order + idx as i64)?;
            created += 1;
        }
        Ok(created)
    }

    /// Subtasks of one todo in display order.
    pub fn list_for_todo(&self, todo_id: i64) -> AppResult<Vec<Subtask>> {
        let sql = format!("SELECT {} FROM subtasks WHERE todo_id = ?1 {}", SUBTASK_COLUMNS, ORDER_SUBTASKS);
        let mut stmt = self.conn.prepare(&sql)?;
        let subtasks = stmt.query_map(params![todo_id], Self::from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(subtasks)
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<Option<Subtask>> {
        let sql = format!("SELECT {} FROM subtasks WHERE id = ?1", SUBTASK_COLUMNS);
        self.conn.query_row(&sql, params![id], Self::from_row).optional().map_err(Into::into)
    }

    /// The subtask `id` if it belongs to `todo_id`.
    pub fn get_for_todo(&self, todo_id: i64, id: i64) -> AppResult<Option<Subtask>> {
        let sql = format!("SELECT {} FROM subtasks WHERE id = ?1 AND todo_id = ?2", SUBTASK_COLUMNS);
        self.conn
            .query_row(&sql, params![id, todo_id], Self::from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Overwrites title and completion of an existing subtask.
    pub fn update(&self, id: i64, title: &str, completed: bool) -> AppResult<()> {
        let affected = self.conn.execute(UPDATE_SUBTASK, params![id, title, completed])?;
        if affected == 0 {
            return Err(AppError::NotFound(Message::SubtaskNotFound(id)));
        }
        Ok(())
    }

    /// Flips `completed` and returns the new state.
    pub fn toggle(&self, id: i64) -> AppResult<bool> {
        let affected = self.conn.execute(TOGGLE_SUBTASK, params![id])?;
        if affected == 0 {
            return Err(AppError::NotFound(Message::SubtaskNotFound(id)));
        }
        let completed = self.conn.query_row("SELECT completed FROM subtasks WHERE id = ?1", params![id], |row| row.get(0))?;
        Ok(completed)
    }

    /// Removes a single subtask; [`AppError::NotFound`] when it does not exist.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let affected = self.conn.execute(DELETE_SUBTASK, params![id])?;
        if affected == 0 {
            return Err(AppError::NotFound(Message::SubtaskNotFound(id)));
        }
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Subtask> {
        Ok(Subtask {
            id: row.get(0)?,
            todo_id: row.get(1)?,
            title: row.get(2)?,
            completed: row.get(3)?,
            order: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}
