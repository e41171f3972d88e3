#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === SERVER MESSAGES ===
    ServerStarting(String), // address
    ServerStopped,
    RequestFailed(String), // error

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigLoaded(String), // path
    ConfigInvalidValue {
        key: String,
        value: String,
    },

    // === DATABASE MESSAGES ===
    DatabaseOpened(String), // path
    DatabaseVersion(u32),
    DatabaseNeedsUpdate,
    DatabaseUpToDate,
    MigrationHistory,
    NoMigrationsApplied,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === TODO MESSAGES ===
    TodoCreated(i64),
    TodoUpdated(i64),
    TodoToggled {
        id: i64,
        completed: bool,
    },
    TodoDeleted(i64),
    TodoNotFound(i64),
    TodoTitleMissing,

    // === SUBTASK MESSAGES ===
    SubtasksCreated {
        todo_id: i64,
        count: usize,
    },
    SubtaskToggled {
        id: i64,
        completed: bool,
    },
    SubtaskDeleted(i64),
    SubtaskNotFound(i64),

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryDeleted(i64),
    CategoryNotFound(i64),
    CategoryNameMissing,

    // === INPUT MESSAGES ===
    InvalidDueDate(String),
    InvalidCategoryId(String),
    MutationIgnoredForMethod(String), // HTTP method
}
