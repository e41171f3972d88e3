//! Convenience macros for logging application messages.
//!
//! Every macro takes a [`Message`](super::Message) (or anything implementing
//! `Display`) and forwards it to the matching `tracing` level, so request
//! handlers, migrations and the CLI share one vocabulary of log lines.
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: Plain CLI output on stdout, not logged
//! - **`msg_success!`** / **`msg_info!`**: `tracing::info!`
//! - **`msg_warning!`**: `tracing::warn!`
//! - **`msg_error!`**: `tracing::error!`
//! - **`msg_debug!`**: `tracing::debug!`
//! - **`msg_error_anyhow!`** / **`msg_bail_anyhow!`**: build or return an `anyhow::Error`
//!
//! ## Usage
//!
//! ```rust
//! use tickoff::{msg_info, msg_error_anyhow};
//! use tickoff::libs::messages::Message;
//!
//! msg_info!(Message::TodoCreated(1));
//! let error = msg_error_anyhow!(Message::TodoNotFound(7));
//! assert_eq!(error.to_string(), "Todo 7 not found");
//! ```

/// Prints a message for the CLI user, optionally surrounded by blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        println!("{}", $msg)
    };
    ($msg:expr, true) => {
        println!("\n{}\n", $msg)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        tracing::info!("{}", $msg)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        tracing::info!("{}", $msg)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        tracing::warn!("{}", $msg)
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        tracing::error!("{}", $msg)
    };
}

/// Debug-level message; accepts either a message value or format arguments.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        tracing::debug!("{}", $msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        tracing::debug!($fmt, $($arg)*)
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
