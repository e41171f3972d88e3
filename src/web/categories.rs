use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::Method,
    response::{Json, Redirect},
};

use super::form::FormData;
use super::AppState;
use crate::db::categories::Categories;
use crate::libs::error::AppResult;
use crate::libs::messages::Message;
use crate::libs::todo::NewCategory;
use crate::libs::view::CategoriesPage;
use crate::{msg_debug, msg_info, msg_warning};

pub const CATEGORIES_PATH: &str = "/categories";

/// Every category, ordered by name.
pub async fn manage_categories(State(state): State<Arc<AppState>>) -> AppResult<Json<CategoriesPage>> {
    let categories = state.with_db(|db| Categories::new(&db.conn).list()).await?;
    Ok(Json(CategoriesPage { categories }))
}

/// Creates a category from `name` and optional `color`. A missing name is
/// ignored; a duplicate name surfaces as a store error.
pub async fn create_category(State(state): State<Arc<AppState>>, body: Bytes) -> AppResult<Redirect> {
    let form = FormData::parse(&body);
    let Some(name) = form.get_non_empty("name") else {
        msg_debug!(Message::CategoryNameMissing);
        return Ok(Redirect::to(CATEGORIES_PATH));
    };

    let category = NewCategory::new(name, form.get("color"));
    state.with_db(move |db| Categories::new(&db.conn).create(&category)).await?;
    msg_info!(Message::CategoryCreated(name.to_string()));

    Ok(Redirect::to(CATEGORIES_PATH))
}

/// Deletes on POST only. Todos in the category are kept, uncategorized.
pub async fn delete_category(State(state): State<Arc<AppState>>, method: Method, Path(id): Path<i64>) -> AppResult<Redirect> {
    if method != Method::POST {
        msg_warning!(Message::MutationIgnoredForMethod(method.to_string()));
        return Ok(Redirect::to(CATEGORIES_PATH));
    }

    state.with_db(move |db| Categories::new(&db.conn).delete(id)).await?;
    msg_info!(Message::CategoryDeleted(id));

    Ok(Redirect::to(CATEGORIES_PATH))
}
