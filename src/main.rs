use aws_sdk_cloudformation::config::Region;
use eyre::{eyre, Result, WrapErr};
use std::time::Duration;
use structopt::StructOpt;
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

mod aws;
mod config;
mod deploy;
mod error;
mod poll;
mod stack_status;
mod waiter;
mod writer;

use crate::config::DeployConfig;
use crate::poll::PollSettings;
use crate::writer::Writer;

fn parse_stack_name(src: &str) -> Result<String> {
    let name = src.trim();
    if name.is_empty() {
        return Err(eyre!("stack name must not be empty"));
    }
    Ok(name.to_string())
}

/// Wait for a CloudFormation stack to finish any create, update or delete before deploying
#[derive(StructOpt)]
struct Opts {
    #[structopt(parse(try_from_str = parse_stack_name))]
    stack_name: String,

    #[structopt(short, long)]
    region: Option<String>,

    /// Give up waiting after this long, e.g. "10m" [default: 30m]
    #[structopt(long, parse(try_from_str = humantime::parse_duration))]
    max_wait: Option<Duration>,

    /// Initial delay between status polls; backs off from here [default: 5s]
    #[structopt(long, parse(try_from_str = humantime::parse_duration))]
    poll_interval: Option<Duration>,

    /// Do not require the deployment environment variables
    #[structopt(long)]
    skip_config_check: bool,

    /// Deploy command to run once the stack is idle
    #[structopt(last = true)]
    command: Vec<String>,
}

async fn build_client(region: Option<String>) -> aws_sdk_cloudformation::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    let config = loader.load().await;
    tracing::debug!(region = ?config.region(), "chosen region");
    aws_sdk_cloudformation::Client::new(&config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::from_args();

    let config = if opts.skip_config_check {
        None
    } else {
        let config = DeployConfig::from_env().wrap_err("validating deployment configuration")?;
        tracing::debug!(config = ?config, "loaded deployment configuration");
        Some(config)
    };

    let client = build_client(opts.region.clone()).await;
    let settings = PollSettings::with_overrides(opts.poll_interval, opts.max_wait);

    tracing::info!(stack_name = %opts.stack_name, max_wait = ?settings.max_wait, "checking stack");
    let outcome = waiter::wait_for_idle(&client, &opts.stack_name, &settings).await;

    {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut handle = Writer::new(stdout.lock());
        writer::write_outcome(&mut handle, &opts.stack_name, &outcome)
            .wrap_err("printing outcome")?;
    }

    if opts.command.is_empty() {
        return Ok(());
    }

    let code = deploy::run_deploy_command(&opts.command, config.as_ref()).await?;
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_name_is_trimmed() {
        assert_eq!(parse_stack_name(" wiki ").unwrap(), "wiki");
    }

    #[test]
    fn blank_stack_name_is_rejected() {
        assert!(parse_stack_name("   ").is_err());
    }

    #[test]
    fn options_parse_durations_and_command() {
        let opts = Opts::from_iter_safe(&[
            "stackidle",
            "wiki",
            "--max-wait",
            "10m",
            "--",
            "cdk",
            "deploy",
        ])
        .unwrap();

        assert_eq!(opts.stack_name, "wiki");
        assert_eq!(opts.max_wait, Some(Duration::from_secs(600)));
        assert_eq!(opts.poll_interval, None);
        assert_eq!(opts.command, vec!["cdk", "deploy"]);
        assert!(!opts.skip_config_check);
    }

    #[test]
    fn omitted_durations_use_poll_defaults() {
        let opts = Opts::from_iter_safe(&["stackidle", "wiki"]).unwrap();
        let settings = PollSettings::with_overrides(opts.poll_interval, opts.max_wait);

        assert_eq!(settings.max_wait, poll::DEFAULT_MAX_WAIT);
        assert_eq!(settings.initial_interval, poll::DEFAULT_POLL_INTERVAL);
        assert!(opts.command.is_empty());
    }
}
