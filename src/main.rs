//! provider-router - dispatch one completion across the configured providers
//!
//! Settings come from the environment (and `.env`), optionally layered under
//! a YAML file passed with `--config`.

use anyhow::{Context, bail};
use clap::Parser;
use provider_router::utils::config::{EnvSource, LayeredSource, YamlFileSource};
use provider_router::utils::logging::{LogFormat, init_logging};
use provider_router::{CallRequest, Router, RouterConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "provider-router", version, about)]
struct Args {
    /// Prompt to send
    prompt: String,

    /// Model override passed to whichever provider answers
    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    temperature: Option<f64>,

    #[arg(long)]
    max_tokens: Option<u32>,

    /// Ask the provider for a JSON reply
    #[arg(long)]
    json_mode: bool,

    /// Caller metadata entry, repeatable
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    meta: Vec<String>,

    /// YAML file whose keys take precedence over the environment
    #[arg(long, env = "AI_PROVIDER_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format: plain or json
    #[arg(long, default_value = "plain")]
    log_format: LogFormat,
}

fn parse_meta(entries: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    entries
        .iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => bail!("invalid --meta '{}', expected KEY=VALUE", entry),
        })
        .collect()
}

fn build_request(args: &Args) -> anyhow::Result<CallRequest> {
    let mut request = CallRequest::new(args.prompt.clone()).with_json_mode(args.json_mode);
    if let Some(model) = &args.model {
        request = request.with_model(model.clone());
    }
    if let Some(temperature) = args.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(max_tokens) = args.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    for (key, value) in parse_meta(&args.meta)? {
        request = request.with_meta(key, value);
    }
    Ok(request)
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<RouterConfig> {
    let config = match path {
        Some(path) => {
            let file = YamlFileSource::load(path)?;
            RouterConfig::from_source(&LayeredSource::new().with_layer(file).with_layer(EnvSource))
        }
        None => RouterConfig::from_env(),
    };
    config.context("failed to resolve router configuration")
}

async fn run(args: Args) -> anyhow::Result<()> {
    let request = build_request(&args)?;
    let router = Router::new(load_config(args.config.as_ref())?)?;

    let response = router.dispatch(request).await?;
    println!("{}", response.to_json()?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_logging(args.log_format);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
