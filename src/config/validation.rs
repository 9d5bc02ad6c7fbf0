use crate::config::types::{Config, CrawlerConfig, OutputConfig, ScopeConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_scope_config(&config.scope)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the seed URLs given on the command line
///
/// Seeds are not required to be well-formed URLs, but a blank seed would
/// escape to an allow pattern matching every URL.
pub fn validate_seeds<S: AsRef<str>>(seeds: &[S]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    if let Some(position) = seeds.iter().position(|seed| seed.as_ref().trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "seed URL #{} is blank",
            position + 1
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_secs must be >= 1, got {}",
            config.page_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates scope patterns
///
/// Patterns are compiled later, when the scope is built. An empty pattern
/// would match every URL, which is never what a config author means.
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    for (list, patterns) in [("allowed", &config.allowed), ("forbidden", &config.forbidden)] {
        if patterns.iter().any(|pattern| pattern.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} patterns cannot be empty strings",
                list
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.folder.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output folder cannot be empty".to_string(),
        ));
    }

    Ok(())
}
