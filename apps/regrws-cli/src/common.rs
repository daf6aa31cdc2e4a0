use anyhow::Context;
use clap::Args;
use regrws::models::ErrorPayload;
use regrws::{Outcome, RegrwsClient, RegrwsConfig, XmlModel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Args)]
pub struct GlobalArgs {
    /// YAML configuration file, layered under `REGRWS_*` environment variables
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Registry root URL (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn client(&self) -> anyhow::Result<RegrwsClient> {
        if let Some(path) = &self.config
            && !path.is_file()
        {
            anyhow::bail!("config file does not exist: {}", path.display());
        }

        let mut config =
            RegrwsConfig::load(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url
                .parse()
                .with_context(|| format!("invalid --base-url '{base_url}'"))?;
        }
        RegrwsClient::new(config).context("failed to build registry client")
    }
}

/// Install a fmt subscriber; `RUST_LOG` takes precedence over `-v`
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn describe_rejection(error: &ErrorPayload) -> String {
    let mut out = format!("{}: {}", error.code, error.message);
    for component in &error.components {
        out.push_str("\n  ");
        out.push_str(&component.name);
        out.push_str(": ");
        out.push_str(&component.message);
    }
    out
}

/// Print a successful record as XML, or the registry's error to stderr
pub fn print_outcome<T: XmlModel>(outcome: Outcome<T>) -> anyhow::Result<()> {
    match outcome {
        Outcome::Success(resource) => {
            println!("{}", resource.to_xml()?);
            Ok(())
        }
        Outcome::Rejected { status, error } => {
            anyhow::bail!("registry returned {status}: {}", describe_rejection(&error))
        }
    }
}
