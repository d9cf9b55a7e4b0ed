//! Key/value sources the configuration is read from.

use std::collections::{BTreeMap, HashMap};
use std::env::VarError;

use super::settings::ConfigError;

/// A read-only mapping from environment variable name to value.
pub trait EnvSource {
    /// Returns the raw value of `key`, or `None` if it is not set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotUnicode`] if the variable is set but its
    /// value cannot be read as a string.
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        from_var_result(key, std::env::var(key))
    }
}

fn from_var_result(
    key: &str,
    result: Result<String, VarError>,
) -> Result<Option<String>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key.to_owned())),
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(HashMap::get(self, key).cloned())
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(BTreeMap::get(self, key).cloned())
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        (**self).get(key)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn test_map_source() {
        let map = HashMap::from([("A".to_owned(), "1".to_owned())]);
        assert_eq!(EnvSource::get(&map, "A"), Ok(Some("1".to_owned())));
        assert_eq!(EnvSource::get(&map, "B"), Ok(None));
    }

    #[test]
    fn test_process_env_missing_var() {
        assert_eq!(ProcessEnv.get("MTPROXY_ADMIN_BOT_SURELY_UNSET_VAR"), Ok(None));
    }

    #[test]
    fn test_non_unicode_value_names_variable() {
        let result = from_var_result("DB_PATH", Err(VarError::NotUnicode(OsString::from("x"))));
        let err = result.unwrap_err();
        assert_eq!(err, ConfigError::NotUnicode("DB_PATH".to_owned()));
        assert!(err.to_string().contains("DB_PATH"));
    }

    #[test]
    fn test_var_result_mapping() {
        assert_eq!(
            from_var_result("A", Ok("v".to_owned())),
            Ok(Some("v".to_owned()))
        );
        assert_eq!(from_var_result("A", Err(VarError::NotPresent)), Ok(None));
    }
}
