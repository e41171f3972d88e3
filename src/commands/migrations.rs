use super::ConfigOverrides;
use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{config::Config, messages::Message},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let config = args.overrides.apply(Config::load()?);
    let db = Db::open(config.database_path()?)?;

    match args.command {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&db.conn)?));
            if needs_migration(&db.conn)? {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            let history = MigrationManager::new().get_migration_history(&db.conn)?;
            if history.is_empty() {
                msg_print!(Message::NoMigrationsApplied);
                return Ok(());
            }

            msg_print!(Message::MigrationHistory, true);
            for migration in history {
                println!("  v{}: {} (applied: {})", migration.version, migration.name, migration.applied_at);
            }
        }
    }

    Ok(())
}
