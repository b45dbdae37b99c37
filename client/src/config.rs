use crate::constants::{AWS_ACCESS_KEY_ID, AWS_REGION, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
use crate::Credential;
use cloud9_ssh_core::{Context, Error, Result};

/// Config carries the values needed to build a client.
///
/// Values left unset can be filled from the environment with
/// [`Config::from_env`]; anything still missing when the client is
/// constructed is a configuration error, reported before any call is made.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from `AWS_ACCESS_KEY_ID` if not set.
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from `AWS_SECRET_ACCESS_KEY` if not set.
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from `AWS_SESSION_TOKEN` if not set.
    pub session_token: Option<String>,
    /// `region` will be loaded from `AWS_REGION` if not set.
    pub region: Option<String>,
}

impl Config {
    /// Fill unset fields from environment variables.
    ///
    /// Environment access goes through the [`Context`] so nothing in this
    /// layer reads ambient process state directly.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.access_key_id.is_none() {
            self.access_key_id = ctx.env_var(AWS_ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = ctx.env_var(AWS_SECRET_ACCESS_KEY);
        }
        if self.session_token.is_none() {
            self.session_token = ctx.env_var(AWS_SESSION_TOKEN);
        }
        if self.region.is_none() {
            self.region = ctx.env_var(AWS_REGION);
        }
        self
    }

    /// Build the credential from this config.
    pub fn credential(&self) -> Result<Credential> {
        let access_key_id = self
            .access_key_id
            .clone()
            .ok_or_else(|| Error::config_invalid("missing AWS access key id"))?;
        let secret_access_key = self
            .secret_access_key
            .clone()
            .ok_or_else(|| Error::config_invalid("missing AWS secret access key"))?;

        let mut cred = Credential::new(access_key_id, secret_access_key);
        if let Some(token) = &self.session_token {
            cred = cred.with_session_token(token.clone());
        }
        Ok(cred)
    }

    /// The configured region.
    pub fn region(&self) -> Result<&str> {
        self.region
            .as_deref()
            .ok_or_else(|| Error::config_invalid("missing AWS region"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud9_ssh_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    #[test]
    fn test_from_env_fills_unset_fields_only() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (AWS_ACCESS_KEY_ID.to_string(), "env-key".to_string()),
                (AWS_SECRET_ACCESS_KEY.to_string(), "env-secret".to_string()),
                (AWS_REGION.to_string(), "eu-west-3".to_string()),
            ]),
        });

        let config = Config {
            access_key_id: Some("explicit-key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(config.access_key_id.as_deref(), Some("explicit-key"));
        assert_eq!(config.secret_access_key.as_deref(), Some("env-secret"));
        assert_eq!(config.region().unwrap(), "eu-west-3");
    }

    #[test]
    fn test_missing_values_are_config_errors() {
        let config = Config::default();
        assert_eq!(
            config.credential().unwrap_err().kind(),
            ErrorKind::ConfigInvalid
        );
        assert_eq!(config.region().unwrap_err().kind(), ErrorKind::ConfigInvalid);
    }
}
