use crate::libs::error::{AppError, AppResult};
use crate::libs::messages::Message;
use crate::libs::todo::{Category, NewCategory};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_CATEGORY: &str = "INSERT INTO categories (name, color) VALUES (?1, ?2)";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const SELECT_ALL_CATEGORIES: &str = "SELECT id, name, color FROM categories ORDER BY name";
const SELECT_CATEGORY_BY_ID: &str = "SELECT id, name, color FROM categories WHERE id = ?1";
const SELECT_CATEGORY_BY_NAME: &str = "SELECT id, name, color FROM categories WHERE name = ?1";

/// Store for categories.
pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a category. A duplicate name fails with a constraint violation.
    pub fn create(&self, category: &NewCategory) -> AppResult<i64> {
        self.conn.execute(INSERT_CATEGORY, params![category.name, category.color])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All categories ordered by name.
    pub fn list(&self) -> AppResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_CATEGORIES)?;
        let categories = stmt.query_map([], Self::from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        self.conn
            .query_row(SELECT_CATEGORY_BY_ID, params![id], Self::from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Looks a category up by its unique name.
    pub fn get_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        self.conn
            .query_row(SELECT_CATEGORY_BY_NAME, params![name], Self::from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Deletes a category. Todos in it lose their category but are kept.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let affected = self.conn.execute(DELETE_CATEGORY, params![id])?;
        if affected == 0 {
            return Err(AppError::NotFound(Message::CategoryNotFound(id)));
        }
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            color: row.get(2)?,
        })
    }
}
