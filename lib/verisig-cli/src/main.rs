use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::{env, io};
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    Layer, Registry,
};
use verisig_cli::ToolArgs;

fn initialise_logging() -> Result<()> {
    let targets = env::var("RUST_LOG")
        .ok()
        .and_then(|targets| targets.parse().ok())
        .unwrap_or_else(|| Targets::default().with_default(LevelFilter::WARN));

    let subscriber = Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_filter(targets),
    );

    tracing::subscriber::set_global_default(subscriber).into_diagnostic()
}

fn main() -> Result<()> {
    initialise_logging()?;

    let args = ToolArgs::parse();
    verisig_cli::handle(&mut io::stdout().lock(), args)
}
