use std::env;
use std::str::FromStr;
use crate::core::library::{LibraryError, LibraryResult};

pub const DEFAULT_LOAN_DAYS: i64 = 14;
pub const DEFAULT_FINE_PER_DAY: f64 = 1.0;
pub const DEFAULT_DATA_FILE: &str = "library_state.json";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

// Configuration abstracts config options for the lending service
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub fine_per_day: f64,
    pub loan_days: i64,
    pub data_file: String,
    pub bind_address: String,
}

impl Configuration {
    pub fn new(data_file: &str) -> Self {
        Configuration {
            fine_per_day: DEFAULT_FINE_PER_DAY,
            loan_days: DEFAULT_LOAN_DAYS,
            data_file: data_file.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }

    /// Builds the configuration from `LMS_*` environment variables, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new(
            lookup("LMS_DATA_FILE").as_deref().unwrap_or(DEFAULT_DATA_FILE));
        if let Some(fine) = lookup("LMS_FINE_PER_DAY") {
            config.fine_per_day = parse_var("LMS_FINE_PER_DAY", &fine)?;
        }
        if let Some(days) = lookup("LMS_LOAN_DAYS") {
            config.loan_days = parse_var("LMS_LOAN_DAYS", &days)?;
        }
        if let Some(addr) = lookup("LMS_BIND_ADDR") {
            config.bind_address = addr;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if !self.fine_per_day.is_finite() || self.fine_per_day < 0.0 {
            return Err(LibraryError::invalid_argument(
                format!("fine_per_day must be a non-negative amount, got {}", self.fine_per_day).as_str(), None));
        }
        if self.loan_days < 0 {
            return Err(LibraryError::invalid_argument(
                format!("loan_days must not be negative, got {}", self.loan_days).as_str(), None));
        }
        if self.data_file.trim().is_empty() {
            return Err(LibraryError::invalid_argument("data_file must not be empty", None));
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_DATA_FILE)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> LibraryResult<T> {
    value.trim().parse::<T>().map_err(|_| LibraryError::invalid_argument(
        format!("cannot parse {} from {:?}", key, value).as_str(), Some(key.to_string())))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test.json");
        assert_eq!(1.0, config.fine_per_day);
        assert_eq!(14, config.loan_days);
        assert_eq!("test.json", config.data_file.as_str());
    }

    #[tokio::test]
    async fn test_should_override_config_from_lookup() {
        let vars = HashMap::from([
            ("LMS_FINE_PER_DAY", "2.5"),
            ("LMS_LOAN_DAYS", "7"),
            ("LMS_DATA_FILE", "/tmp/state.json"),
            ("LMS_BIND_ADDR", "0.0.0.0:8080"),
        ]);
        let config = Configuration::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
            .expect("should build config");
        assert_eq!(2.5, config.fine_per_day);
        assert_eq!(7, config.loan_days);
        assert_eq!("/tmp/state.json", config.data_file.as_str());
        assert_eq!("0.0.0.0:8080", config.bind_address.as_str());
    }

    #[tokio::test]
    async fn test_should_default_config_from_empty_lookup() {
        let config = Configuration::from_lookup(|_| None).expect("should build config");
        assert_eq!(Configuration::default(), config);
    }

    #[tokio::test]
    async fn test_should_reject_bad_config_values() {
        let res = Configuration::from_lookup(|k| if k == "LMS_LOAN_DAYS" { Some("two weeks".to_string()) } else { None });
        assert!(matches!(res, Err(LibraryError::InvalidArgument { .. })));
        let res = Configuration::from_lookup(|k| if k == "LMS_FINE_PER_DAY" { Some("-1".to_string()) } else { None });
        assert!(matches!(res, Err(LibraryError::InvalidArgument { .. })));
    }
}
