use crate::config::DeployConfig;
use eyre::{eyre, Result, WrapErr};
use tokio::process::Command;

/// Launch the deployment once the stack is idle, returning its exit code.
///
/// The deployment configuration is exported into the command's environment.
pub(crate) async fn run_deploy_command(
    command: &[String],
    config: Option<&DeployConfig>,
) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| eyre!("no deploy command given"))?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(config) = config {
        for (name, value) in config.env_vars().iter() {
            cmd.env(name, value);
        }
    }

    tracing::info!(%program, nargs = args.len(), "launching deploy command");
    let status = cmd
        .status()
        .await
        .wrap_err_with(|| format!("running deploy command {}", program))?;

    // killed by a signal
    let code = status.code().unwrap_or(1);
    if !status.success() {
        tracing::warn!(code, "deploy command failed");
    }
    Ok(code)
}
