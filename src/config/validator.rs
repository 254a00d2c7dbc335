//! Config validation: values that parse but cannot be used.

use crate::config::ApiConfig;
use crate::error::ConfigLoadError;
use crate::time::TimeFormatPolicy;

pub fn validate(config: &ApiConfig) -> Result<(), ConfigLoadError> {
    if config.server.bind.trim().is_empty() {
        return Err(ConfigLoadError::Invalid("server.bind must not be empty".into()));
    }
    TimeFormatPolicy::init(&config.time.zone, config.time.format.clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::ApiConfig;
    use crate::error::ConfigLoadError;

    #[test]
    fn unknown_zone_is_invalid() {
        let err = ApiConfig::from_json_str(r#"{ "time": { "zone": "Mars/Olympus_Mons" } }"#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
    }

    #[test]
    fn empty_bind_is_invalid() {
        let err = ApiConfig::from_json_str(r#"{ "server": { "bind": " " } }"#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(_)));
    }

    #[test]
    fn custom_format_is_accepted() {
        let config = ApiConfig::from_json_str(r#"{ "time": { "zone": "UTC", "format": "%Y-%m-%d %H:%M" } }"#).unwrap();
        assert_eq!(config.time.zone, "UTC");
    }
}
