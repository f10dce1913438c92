//! jobstats config - Show effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::OutputFormat;
use crate::cli::output;
use crate::config::Config;
use crate::error::{JobError, Result};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective exclusion table instead of the whole config
    #[arg(long)]
    pub exclusions: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    if args.exclusions {
        let table = ctx.config.filter.exclusion_table();
        if ctx.output_format == OutputFormat::Json {
            return output::emit_json(&table);
        }
        for (keyword, terms) in table.iter() {
            println!("{keyword}\t{}", terms.join(", "));
        }
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Json {
        return output::emit_json(&ctx.config);
    }

    match &ctx.config_path {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# built-in defaults"),
    }
    println!("{}", render_toml(&ctx.config)?);
    Ok(())
}

fn render_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|err| JobError::Serialization(format!("render config: {err}")))
}
