//! Writes `config.json` to the data directory.
//!
//! The file starts from the currently effective configuration (file,
//! environment), with any flags given on the command line applied on top.

use super::ConfigOverrides;
use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let config = init_args.overrides.apply(Config::load()?);
    let path = config.save()?;

    msg_success!(Message::ConfigSaved(path.display().to_string()));
    Ok(())
}
