//! Environment access
//!
//! Every environment read in the config layer goes through [`EnvSource`] so
//! tests can supply their own variables.

/// Source of environment variables
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
