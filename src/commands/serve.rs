use super::ConfigOverrides;
use crate::libs::config::Config;
use crate::web;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    let config = args.overrides.apply(Config::load()?);
    web::serve(config).await
}
