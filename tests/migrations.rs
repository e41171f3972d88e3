#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tickoff::db::db::Db;
    use tickoff::db::migrations::{get_db_version, init_with_migrations, needs_migration, MigrationManager};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("tickoff.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), 0);
        assert!(needs_migration(&db.conn).unwrap());
        assert!(MigrationManager::new().get_migration_history(&db.conn).unwrap().is_empty());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_init_applies_every_migration(ctx: &mut MigrationTestContext) {
        let db = Db::init(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        assert_eq!(get_db_version(&db.conn).unwrap(), manager.latest_version());
        assert!(!needs_migration(&db.conn).unwrap());
        for version in 1..=manager.latest_version() {
            assert!(manager.is_migration_applied(&db.conn, version).unwrap());
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let db = Db::init(&ctx.db_path).unwrap();
        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();

        let names: Vec<(u32, &str)> = history.iter().map(|m| (m.version, m.name.as_str())).collect();
        assert_eq!(
            names,
            vec![
                (1, "create_categories"),
                (2, "create_todos"),
                (3, "create_subtasks"),
                (4, "add_listing_indices"),
            ]
        );
        assert!(history.iter().all(|m| !m.applied_at.is_empty()));
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut db = Db::init(&ctx.db_path).unwrap();
        init_with_migrations(&mut db.conn).unwrap();
        drop(db);

        let db = Db::init(&ctx.db_path).unwrap();
        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        assert_eq!(history.len() as u32, MigrationManager::new().latest_version());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_schema_enforces_foreign_keys(ctx: &mut MigrationTestContext) {
        let db = Db::init(&ctx.db_path).unwrap();
        let result = db.conn.execute(
            "INSERT INTO subtasks (todo_id, title, completed, \"order\", created_at) VALUES (404, 'orphan', 0, 0, '2024-01-01')",
            [],
        );
        assert!(result.is_err());
    }
}
