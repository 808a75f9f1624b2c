use crate::error::ConfigError;
use std::fmt::{self, Debug};

pub(crate) const ACCOUNT_ID_VAR: &str = "STACK_ACCOUNT_ID";
pub(crate) const CERTIFICATE_ARN_VAR: &str = "STACK_CERTIFICATE_ARN";
pub(crate) const OAUTH_CLIENT_ID_VAR: &str = "STACK_OAUTH_CLIENT_ID";
pub(crate) const OAUTH_CLIENT_SECRET_VAR: &str = "STACK_OAUTH_CLIENT_SECRET";

/// Settings the deployment needs. These are opaque to this tool and are only checked for
/// presence, then handed to the deploy command unchanged.
#[derive(Clone, PartialEq)]
pub(crate) struct DeployConfig {
    pub(crate) account_id: String,
    pub(crate) certificate_arn: String,
    pub(crate) oauth_client_id: String,
    pub(crate) oauth_client_secret: String,
}

impl DeployConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::Missing(name)),
        };

        Ok(Self {
            account_id: required(ACCOUNT_ID_VAR)?,
            certificate_arn: required(CERTIFICATE_ARN_VAR)?,
            oauth_client_id: required(OAUTH_CLIENT_ID_VAR)?,
            oauth_client_secret: required(OAUTH_CLIENT_SECRET_VAR)?,
        })
    }

    pub(crate) fn env_vars(&self) -> [(&'static str, &str); 4] {
        [
            (ACCOUNT_ID_VAR, self.account_id.as_str()),
            (CERTIFICATE_ARN_VAR, self.certificate_arn.as_str()),
            (OAUTH_CLIENT_ID_VAR, self.oauth_client_id.as_str()),
            (OAUTH_CLIENT_SECRET_VAR, self.oauth_client_secret.as_str()),
        ]
    }
}

impl Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("account_id", &self.account_id)
            .field("certificate_arn", &self.certificate_arn)
            .field("oauth_client_id", &self.oauth_client_id)
            .field("oauth_client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        let mut env = HashMap::new();
        env.insert(ACCOUNT_ID_VAR, "123456789012".to_string());
        env.insert(
            CERTIFICATE_ARN_VAR,
            "arn:aws:acm:us-east-1:123456789012:certificate/abc".to_string(),
        );
        env.insert(OAUTH_CLIENT_ID_VAR, "client".to_string());
        env.insert(OAUTH_CLIENT_SECRET_VAR, "hunter2".to_string());
        env
    }

    #[test]
    fn reads_all_values() {
        let env = full_env();
        let config = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.account_id, "123456789012");
        assert_eq!(config.oauth_client_secret, "hunter2");
        assert_eq!(config.env_vars()[1].0, CERTIFICATE_ARN_VAR);
    }

    #[test]
    fn missing_value_is_named() {
        let mut env = full_env();
        env.remove(OAUTH_CLIENT_ID_VAR);

        let err = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();

        assert_eq!(err, ConfigError::Missing(OAUTH_CLIENT_ID_VAR));
        assert!(err.to_string().contains("STACK_OAUTH_CLIENT_ID"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let mut env = full_env();
        env.insert(ACCOUNT_ID_VAR, "  ".to_string());

        let err = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();

        assert_eq!(err, ConfigError::Missing(ACCOUNT_ID_VAR));
    }

    #[test]
    fn secret_is_not_printed() {
        let env = full_env();
        let config = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap();

        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("client"));
    }
}
