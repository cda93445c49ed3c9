//!
//! Command line tool for creating and checking HTTP signatures
//!

use self::{
    args::{ParseHeaderArgs, RequestArgs, SignArgs, VerifyArgs},
    util::{failure, field, success},
};
use http::{Method, Request};
use miette::{bail, IntoDiagnostic, Result};
use std::{fs, io::Write, path::Path};
use tracing::debug;
use verisig::{cavage, config::Configuration, digest, Context, Signer, Verifier};

pub use self::args::{ToolArgs, ToolSubcommand};

mod args;
mod util;

fn load_config(path: Option<&Path>) -> Result<Configuration> {
    let Some(path) = path else {
        return Ok(Configuration::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let raw = fs::read_to_string(path).into_diagnostic()?;
    toml::from_str(&raw).into_diagnostic()
}

fn build_request(args: &RequestArgs) -> Result<Request<Vec<u8>>> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes()).into_diagnostic()?;
    let mut builder = Request::builder().method(method).uri(&args.url);

    for header in &args.headers {
        let Some((name, value)) = header.split_once(':') else {
            bail!("Header `{header}` isn't in `Name: value` form");
        };
        builder = builder.header(name.trim(), value.trim());
    }

    let body = match args.body {
        Some(ref path) => fs::read(path).into_diagnostic()?,
        None => Vec::new(),
    };

    builder.body(body).into_diagnostic()
}

fn parse_header<W>(sink: &mut W, args: &ParseHeaderArgs) -> Result<()>
where
    W: Write,
{
    let header = match cavage::parse(&args.header) {
        Ok(header) => header,
        Err(err) => return Err(miette::Error::new(err).with_source_code(args.header.clone())),
    };

    writeln!(sink, "{}: {}", field("keyId"), header.key_id).into_diagnostic()?;
    writeln!(sink, "{}: {}", field("algorithm"), header.algorithm).into_diagnostic()?;
    writeln!(sink, "{}: {}", field("headers"), header.headers).into_diagnostic()?;
    writeln!(sink, "{}: {}", field("signature"), header.signature).into_diagnostic()?;
    writeln!(sink, "{}", success("Header is valid!")).into_diagnostic()?;

    Ok(())
}

fn sign<W>(sink: &mut W, args: &SignArgs) -> Result<()>
where
    W: Write,
{
    let config = load_config(args.request.config.as_deref())?;
    let signer = Signer::try_from(&config.signing)?;
    let private_key = fs::read_to_string(&args.key).into_diagnostic()?;

    let mut req = build_request(&args.request)?;
    if !req.body().is_empty() && !req.headers().contains_key(&digest::DIGEST_HEADER) {
        digest::add_digest(&mut req);
    }

    let req = signer.sign_pem(&Context::background(), req, &args.key_id, &private_key)?;
    for (name, value) in req.headers() {
        let value = value.to_str().into_diagnostic()?;
        writeln!(sink, "{name}: {value}").into_diagnostic()?;
    }

    Ok(())
}

fn verify<W>(sink: &mut W, args: &VerifyArgs) -> Result<()>
where
    W: Write,
{
    let mut config = load_config(args.request.config.as_deref())?;
    if let Some(max_age_hours) = args.max_age_hours {
        config.verification.max_age_hours = max_age_hours;
    }

    let verifier = Verifier::try_from(&config.verification)?;
    let public_key = fs::read_to_string(&args.public_key).into_diagnostic()?;
    let req = build_request(&args.request)?;

    if let Err(err) = verifier.verify_with_body(&Context::background(), &req, &public_key) {
        writeln!(sink, "{}", failure("Signature is invalid!")).into_diagnostic()?;
        return Err(err.into());
    }

    writeln!(sink, "{}", success("Signature is valid!")).into_diagnostic()?;

    Ok(())
}

/// Run the tool with already parsed arguments, writing its output into `sink`
pub fn handle<W>(sink: &mut W, args: ToolArgs) -> Result<()>
where
    W: Write,
{
    match args.command {
        ToolSubcommand::ParseHeader(ref args) => parse_header(sink, args),
        ToolSubcommand::Sign(ref args) => sign(sink, args),
        ToolSubcommand::Verify(ref args) => verify(sink, args),
    }
}
