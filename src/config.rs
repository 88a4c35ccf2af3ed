use std::env;

use crate::error::BumpError;

pub const ENV_TARGET_HOSTNAME: &str = "BUMP_TARGET_HOSTNAME";
pub const ENV_TARGET_USER: &str = "BUMP_TARGET_USER";

/// Parameters every provisioning run must receive from the environment.
/// Checked pre-flight, before any state-mutating action.
#[derive(Debug, Clone)]
pub struct Provision {
    pub target_hostname: String,
    pub target_user: String,
}

impl Provision {
    /// Reads the required variables; a missing or empty one is a
    /// missing-input error carrying the variable's name.
    pub fn from_env() -> Result<Self, BumpError> {
        Ok(Provision {
            target_hostname: required(ENV_TARGET_HOSTNAME)?,
            target_user: required(ENV_TARGET_USER)?,
        })
    }
}

fn required(name: &str) -> Result<String, BumpError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BumpError::MissingInput(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::ExitCategory;

    // One test owns both variables so parallel tests never race on them.
    #[test]
    fn from_env_requires_both_variables() {
        env::remove_var(ENV_TARGET_HOSTNAME);
        env::remove_var(ENV_TARGET_USER);
        let err = Provision::from_env().unwrap_err();
        assert_eq!(err.category(), ExitCategory::MissingInput);
        assert!(err.to_string().contains(ENV_TARGET_HOSTNAME));

        env::set_var(ENV_TARGET_HOSTNAME, "archbox");
        env::set_var(ENV_TARGET_USER, "  ");
        let err = Provision::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_TARGET_USER));

        env::set_var(ENV_TARGET_USER, "operator");
        let p = Provision::from_env().unwrap();
        assert_eq!(p.target_hostname, "archbox");
        assert_eq!(p.target_user, "operator");

        env::remove_var(ENV_TARGET_HOSTNAME);
        env::remove_var(ENV_TARGET_USER);
    }
}
