#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use tickoff::db::categories::Categories;
    use tickoff::db::db::Db;
    use tickoff::db::subtasks::Subtasks;
    use tickoff::db::todos::Todos;
    use tickoff::libs::todo::{NewCategory, NewTodo, Priority, TodoFilter};
    use tickoff::web::{router, AppState};
    use tower::ServiceExt;

    const FORM: &str = "application/x-www-form-urlencoded";

    struct HandlerTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl AsyncTestContext for HandlerTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("tickoff.db");
            Db::init(&db_path).unwrap();
            HandlerTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    impl HandlerTestContext {
        async fn send(&self, method: Method, uri: &str, body: &str) -> Response {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, FORM)
                .body(Body::from(body.to_string()))
                .unwrap();
            router(AppState::new(&self.db_path)).oneshot(request).await.unwrap()
        }

        async fn json(&self, uri: &str) -> Value {
            let response = self.send(Method::GET, uri, "").await;
            assert_eq!(response.status(), StatusCode::OK);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }

        fn db(&self) -> Db {
            Db::open(&self.db_path).unwrap()
        }
    }

    fn assert_redirect(response: &Response, location: &str) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], location);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_create_todo_with_subtasks(ctx: &mut HandlerTestContext) {
        let category_id = Categories::new(&ctx.db().conn)
            .create(&NewCategory::new("Work", Some("#3498db")))
            .unwrap();

        let body = format!(
            "title=Test+Todo&priority=high&category={}&due_date=2020-01-01T09:30&subtask_title[]=a&subtask_title[]=&subtask_title[]=b",
            category_id
        );
        let response = ctx.send(Method::POST, "/add", &body).await;
        assert_redirect(&response, "/");

        let page = ctx.json("/").await;
        let todo = &page["todos"][0];
        assert_eq!(todo["title"], "Test Todo");
        assert_eq!(todo["priority"], "high");
        assert_eq!(todo["priority_color"], "#e74c3c");
        assert_eq!(todo["category_name"], "Work");
        assert_eq!(todo["category_color"], "#3498db");
        assert_eq!(todo["is_overdue"], true);
        assert_eq!(todo["subtasks_total"], 2);
        assert_eq!(todo["subtasks"][0]["title"], "a");
        assert_eq!(todo["subtasks"][0]["order"], 0);
        assert_eq!(todo["subtasks"][1]["title"], "b");
        assert_eq!(todo["subtasks"][1]["order"], 2);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_create_without_title_is_silent(ctx: &mut HandlerTestContext) {
        let response = ctx.send(Method::POST, "/add", "title=&description=nothing").await;
        assert_redirect(&response, "/");

        let response = ctx.send(Method::POST, "/add", "description=nothing").await;
        assert_redirect(&response, "/");

        assert!(Todos::new(&ctx.db().conn).list(&TodoFilter::all()).unwrap().is_empty());
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_create_defaults_and_rejections(ctx: &mut HandlerTestContext) {
        let response = ctx.send(Method::POST, "/add", "title=Plain&priority=urgent").await;
        assert_redirect(&response, "/");
        let todos = Todos::new(&ctx.db().conn).list(&TodoFilter::all()).unwrap();
        assert_eq!(todos[0].priority, Priority::Medium);

        let response = ctx.send(Method::POST, "/add", "title=Bad&due_date=tomorrow").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ctx.send(Method::POST, "/add", "title=Bad&category=work").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(Todos::new(&ctx.db().conn).list(&TodoFilter::all()).unwrap().len(), 1);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_toggle_and_delete_todo(ctx: &mut HandlerTestContext) {
        let id = Todos::new(&ctx.db().conn).insert(&NewTodo::new("Flip")).unwrap();

        let response = ctx.send(Method::GET, &format!("/toggle/{}", id), "").await;
        assert_redirect(&response, "/");
        assert!(Todos::new(&ctx.db().conn).get(id).unwrap().completed);

        let response = ctx.send(Method::POST, &format!("/toggle/{}", id), "").await;
        assert_redirect(&response, "/");
        assert!(!Todos::new(&ctx.db().conn).get(id).unwrap().completed);

        let response = ctx.send(Method::GET, &format!("/delete/{}", id), "").await;
        assert_redirect(&response, "/");
        assert!(Todos::new(&ctx.db().conn).get_by_id(id).unwrap().is_some());

        let response = ctx.send(Method::POST, &format!("/delete/{}", id), "").await;
        assert_redirect(&response, "/");
        assert!(Todos::new(&ctx.db().conn).get_by_id(id).unwrap().is_none());

        let response = ctx.send(Method::GET, &format!("/delete/{}", id), "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = ctx.send(Method::POST, &format!("/toggle/{}", id), "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_edit_form_and_submission(ctx: &mut HandlerTestContext) {
        let db = ctx.db();
        let category_id = Categories::new(&db.conn).create(&NewCategory::new("Home", None)).unwrap();
        let id = Todos::new(&db.conn)
            .insert(&NewTodo {
                category_id: Some(category_id),
                notes: "keep".to_string(),
                subtask_titles: vec!["a".to_string(), "b".to_string()],
                ..NewTodo::new("Original")
            })
            .unwrap();
        let subtasks = Subtasks::new(&db.conn).list_for_todo(id).unwrap();
        let (first, second) = (subtasks[0].id, subtasks[1].id);

        let page = ctx.json(&format!("/edit/{}", id)).await;
        assert_eq!(page["todo"]["title"], "Original");
        assert_eq!(page["priorities"].as_array().unwrap().len(), 3);
        assert_eq!(page["categories"][0]["name"], "Home");

        let body = format!(
            "title=Renamed&priority=low&subtask_id[]={first}&subtask_id[]={second}\
             &existing_subtask_title[]=x&existing_subtask_title[]=y\
             &existing_subtask_completed[]={second}&new_subtask_title[]=z"
        );
        let response = ctx.send(Method::POST, &format!("/edit/{}", id), &body).await;
        assert_redirect(&response, "/");

        let todo = Todos::new(&db.conn).get(id).unwrap();
        assert_eq!(todo.title, "Renamed");
        assert_eq!(todo.priority, Priority::Low);
        assert_eq!(todo.notes, "keep");
        assert_eq!(todo.category_id, None);

        let state: Vec<(i64, String, bool)> = Subtasks::new(&db.conn)
            .list_for_todo(id)
            .unwrap()
            .into_iter()
            .map(|s| (s.order, s.title, s.completed))
            .collect();
        assert_eq!(
            state,
            vec![
                (0, "x".to_string(), false),
                (1, "y".to_string(), true),
                (2, "z".to_string(), false),
            ]
        );

        let response = ctx.send(Method::GET, "/edit/999", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = ctx.send(Method::POST, "/edit/999", "title=Ghost").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_subtask_endpoints(ctx: &mut HandlerTestContext) {
        let db = ctx.db();
        let id = Todos::new(&db.conn)
            .insert(&NewTodo {
                subtask_titles: vec!["step".to_string()],
                ..NewTodo::new("Parent")
            })
            .unwrap();
        let subtask_id = Subtasks::new(&db.conn).list_for_todo(id).unwrap()[0].id;
        let toggle = format!("/subtask/toggle/{}", subtask_id);
        let delete = format!("/subtask/delete/{}", subtask_id);

        let response = ctx.send(Method::GET, &toggle, "").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), serde_json::json!({"success": false}));
        assert!(!Subtasks::new(&db.conn).get_by_id(subtask_id).unwrap().unwrap().completed);

        let response = ctx.send(Method::POST, &toggle, "").await;
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<Value>(&bytes).unwrap(),
            serde_json::json!({"success": true, "completed": true})
        );

        let response = ctx.send(Method::POST, &delete, "").await;
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), serde_json::json!({"success": true}));
        assert!(Subtasks::new(&db.conn).get_by_id(subtask_id).unwrap().is_none());

        let response = ctx.send(Method::POST, &delete, "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = ctx.send(Method::GET, &delete, "").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_category_management(ctx: &mut HandlerTestContext) {
        let response = ctx.send(Method::POST, "/categories", "name=Work&color=%233498db").await;
        assert_redirect(&response, "/categories");
        let response = ctx.send(Method::POST, "/categories", "name=Home").await;
        assert_redirect(&response, "/categories");
        let response = ctx.send(Method::POST, "/categories", "name=&color=%23000000").await;
        assert_redirect(&response, "/categories");

        let page = ctx.json("/categories").await;
        assert_eq!(page["categories"].as_array().unwrap().len(), 2);
        assert_eq!(page["categories"][0]["name"], "Home");
        assert_eq!(page["categories"][0]["color"], "#667eea");
        assert_eq!(page["categories"][1]["color"], "#3498db");

        let response = ctx.send(Method::POST, "/categories", "name=Work").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let work = Categories::new(&ctx.db().conn).get_by_name("Work").unwrap().unwrap();
        let uri = format!("/categories/delete/{}", work.id);

        let response = ctx.send(Method::GET, &uri, "").await;
        assert_redirect(&response, "/categories");
        assert!(Categories::new(&ctx.db().conn).get_by_id(work.id).unwrap().is_some());

        let response = ctx.send(Method::POST, &uri, "").await;
        assert_redirect(&response, "/categories");
        assert!(Categories::new(&ctx.db().conn).get_by_id(work.id).unwrap().is_none());

        let response = ctx.send(Method::POST, &uri, "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_list_filters_echo_raw_values(ctx: &mut HandlerTestContext) {
        let db = ctx.db();
        let category_id = Categories::new(&db.conn).create(&NewCategory::new("Work", None)).unwrap();
        let todos = Todos::new(&db.conn);
        todos
            .insert(&NewTodo {
                category_id: Some(category_id),
                priority: Priority::High,
                ..NewTodo::new("Ship it")
            })
            .unwrap();
        let done = todos.insert(&NewTodo::new("Done already")).unwrap();
        todos.toggle(done).unwrap();

        let page = ctx.json(&format!("/?category={}&priority=high&status=active", category_id)).await;
        assert_eq!(page["todos"].as_array().unwrap().len(), 1);
        assert_eq!(page["todos"][0]["title"], "Ship it");
        assert_eq!(page["selected_category"], category_id.to_string());
        assert_eq!(page["selected_priority"], "high");
        assert_eq!(page["selected_status"], "active");

        let page = ctx.json("/?status=completed").await;
        assert_eq!(page["todos"][0]["title"], "Done already");

        let page = ctx.json("/?category=&priority=&status=whatever").await;
        assert_eq!(page["todos"].as_array().unwrap().len(), 2);

        let page = ctx.json("/?category=abc").await;
        assert!(page["todos"].as_array().unwrap().is_empty());
        assert_eq!(page["selected_category"], "abc");
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_repeated_filter_key_uses_last_value(ctx: &mut HandlerTestContext) {
        let db = ctx.db();
        let todos = Todos::new(&db.conn);
        todos
            .insert(&NewTodo {
                priority: Priority::Low,
                ..NewTodo::new("Someday")
            })
            .unwrap();
        todos
            .insert(&NewTodo {
                priority: Priority::High,
                ..NewTodo::new("Today")
            })
            .unwrap();

        let page = ctx.json("/?priority=low&priority=high").await;
        assert_eq!(page["todos"].as_array().unwrap().len(), 1);
        assert_eq!(page["todos"][0]["title"], "Today");
        assert_eq!(page["selected_priority"], "high");
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_toggle_accepts_any_method(ctx: &mut HandlerTestContext) {
        let id = Todos::new(&ctx.db().conn).insert(&NewTodo::new("Flip")).unwrap();

        let response = ctx.send(Method::PUT, &format!("/toggle/{}", id), "").await;
        assert_redirect(&response, "/");
        assert!(Todos::new(&ctx.db().conn).get(id).unwrap().completed);

        let response = ctx.send(Method::DELETE, &format!("/toggle/{}", id), "").await;
        assert_redirect(&response, "/");
        assert!(!Todos::new(&ctx.db().conn).get(id).unwrap().completed);
    }

    #[test_context(HandlerTestContext)]
    #[tokio::test]
    async fn test_add_form_and_health(ctx: &mut HandlerTestContext) {
        let page = ctx.json("/add").await;
        let values: Vec<&str> = page["priorities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["value"].as_str().unwrap())
            .collect();
        assert_eq!(values, vec!["low", "medium", "high"]);

        let health = ctx.json("/health").await;
        assert_eq!(health["status"], "ok");
    }
}
