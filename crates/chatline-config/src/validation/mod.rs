//! Configuration validation.
//!
//! Range checks mirror the documented API limits. Results are advisory:
//! the loader logs them and keeps the values, since the API is the final
//! judge of what it accepts.

mod helpers;


use crate::schema::ChatlineConfig;
use chatline_common::ConfigError;

use helpers::check_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChatlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_defaults(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &ChatlineConfig) {
    let api = &config.api;
    if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
        errors.push(format!("api.base_url = {:?} is not an http(s) URL", api.base_url));
    }
    if api.key_env.trim().is_empty() {
        errors.push("api.key_env is empty".into());
    }
}

fn validate_defaults(errors: &mut Vec<String>, config: &ChatlineConfig) {
    let d = &config.defaults;
    if d.model.trim().is_empty() {
        errors.push("defaults.model is empty".into());
    }
    check_range(errors, "defaults.max_tokens", d.max_tokens, 0, 4096);
    check_range(errors, "defaults.count", d.count, 1, 128);
    check_range(errors, "defaults.temperature", d.temperature, 0.0, 2.0);
    check_range(errors, "defaults.top_p", d.top_p, 0.0, 1.0);
    check_range(errors, "defaults.presence_penalty", d.presence_penalty, -2.0, 2.0);
    check_range(errors, "defaults.frequency_penalty", d.frequency_penalty, -2.0, 2.0);
}
