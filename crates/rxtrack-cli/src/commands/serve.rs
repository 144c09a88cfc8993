//! Serve command
//!
//! Usage: rxtrack serve [--bind ADDR] [--json-logs]

use clap::Args;
use rxtrack_api::Config;
use rxtrack_core::logging_facility::{init, Profile};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding BIND_ADDR
    #[arg(long)]
    pub bind: Option<String>,

    /// Emit JSON logs at info level instead of human-readable debug output
    #[arg(long)]
    pub json_logs: bool,
}

/// Execute serve command
pub fn execute(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let profile = if args.json_logs {
        Profile::Production
    } else {
        Profile::Development
    };
    init(profile);

    let mut config = Config::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(rxtrack_api::serve(config))?;

    Ok(())
}
