//! Per-invocation context shared by every command.

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;

pub struct AppContext {
    pub config: Config,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub engine: Engine,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var("JOBSTATS_CONFIG").ok().map(PathBuf::from))
            .or_else(Config::global_path)
            .filter(|path| path.exists());
        let output_format = cli.output_format(&config.output.format);
        // plain and json never carry ANSI escapes, even under CLICOLOR_FORCE
        if !output_format.use_colors() {
            colored::control::set_override(false);
        }
        let engine = Engine::new(&config);

        Ok(Self {
            config,
            config_path,
            output_format,
            engine,
        })
    }
}
