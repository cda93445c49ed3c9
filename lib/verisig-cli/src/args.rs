use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// The header to parse
    pub header: String,
}

#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method of the request
    #[arg(default_value = "POST", long, short = 'X')]
    pub method: String,

    /// Absolute URL of the request
    #[arg(long, short)]
    pub url: String,

    /// Request header in `Name: value` form. Can be repeated
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Path to a file holding the request body
    #[arg(long, short)]
    pub body: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct SignArgs {
    /// Path to the PEM-encoded RSA private key
    #[arg(long, short)]
    pub key: PathBuf,

    /// Key ID to put into the signature, usually `<actor URL>#main-key`
    #[arg(long)]
    pub key_id: String,

    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Path to the PEM-encoded RSA public key
    #[arg(long, short)]
    pub public_key: PathBuf,

    /// Maximum age of the request in hours. Overrides the configuration file
    #[arg(long)]
    pub max_age_hours: Option<u64>,

    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Parse the HTTP Signature header and report any format errors
    ParseHeader(ParseHeaderArgs),

    /// Sign a request and print the headers to send along with it
    Sign(SignArgs),

    /// Verify the signature of a request
    Verify(VerifyArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub command: ToolSubcommand,
}
