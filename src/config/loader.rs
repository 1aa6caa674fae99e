//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PrivChatConfig;
use crate::domain::errors::PrivChatError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PrivChatConfig
/// 4. Applies environment variable overrides (PRIVCHAT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use privchat::config::loader::load_config;
///
/// let config = load_config("privchat.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PrivChatConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PrivChatError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PrivChatError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PrivChatConfig = toml::from_str(&contents)
        .map_err(|e| PrivChatError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PrivChatError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist
///
/// The gateway is designed to run with no configuration file at all: every
/// section carries working defaults, and `PRIVCHAT_*` environment overrides
/// are still applied on top of them.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PrivChatConfig> {
    let path = path.as_ref();

    if path.exists() {
        return load_config(path);
    }

    tracing::info!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );

    let mut config = PrivChatConfig::default();
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PrivChatError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PrivChatError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PRIVCHAT_* prefix
///
/// Environment variables follow the pattern: PRIVCHAT_<SECTION>_<KEY>
/// For example: PRIVCHAT_SERVER_PORT, PRIVCHAT_OLLAMA_BASE_URL
fn apply_env_overrides(config: &mut PrivChatConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("PRIVCHAT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("PRIVCHAT_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("PRIVCHAT_SERVER_PORT") {
        if let Ok(port) = val.parse() {
            config.server.port = port;
        }
    }

    // NER overrides
    if let Ok(val) = std::env::var("PRIVCHAT_NER_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.ner.enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("PRIVCHAT_NER_BASE_URL") {
        config.ner.base_url = val;
    }
    if let Ok(val) = std::env::var("PRIVCHAT_NER_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.ner.timeout_seconds = timeout;
        }
    }

    // Ollama overrides
    if let Ok(val) = std::env::var("PRIVCHAT_OLLAMA_BASE_URL") {
        config.ollama.base_url = val;
    }
    if let Ok(val) = std::env::var("PRIVCHAT_OLLAMA_MODEL_PREFERENCES") {
        let preferences: Vec<String> = val
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        if !preferences.is_empty() {
            config.ollama.model_preferences = preferences;
        }
    }
    if let Ok(val) = std::env::var("PRIVCHAT_OLLAMA_CHAT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.ollama.chat_timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("PRIVCHAT_OLLAMA_PULL_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.ollama.pull_timeout_seconds = timeout;
        }
    }

    // Detection overrides
    if let Ok(val) = std::env::var("PRIVCHAT_DETECTION_PATTERN_BANK") {
        config.detection.pattern_bank = Some(val.into());
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PRIVCHAT_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("PRIVCHAT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PRIVCHAT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_substitute_env_vars() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("PRIVCHAT_TEST_SUBST_VAR", "http://ollama:11434");
        let input = "base_url = \"${PRIVCHAT_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "base_url = \"http://ollama:11434\"\n");
        std::env::remove_var("PRIVCHAT_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# base_url = \"${PRIVCHAT_TEST_NOT_SET}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "# base_url = \"${PRIVCHAT_TEST_NOT_SET}\"\n");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("PRIVCHAT_TEST_MISSING_VAR");
        let input = "base_url = \"${PRIVCHAT_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let toml_content = r#"
[application]
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9000

[ollama]
base_url = "http://ollama.internal:11434"
model_preferences = ["phi3:mini"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.ollama.base_url, "http://ollama.internal:11434");
        assert_eq!(config.ollama.model_preferences, vec!["phi3:mini"]);
        // Untouched sections keep their defaults
        assert_eq!(config.ner.base_url, "http://127.0.0.1:8001");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let toml_content = r#"
[application]
log_level = "verbose"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let config = load_config_or_default("definitely-not-here.toml").unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_env_override_applied() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("PRIVCHAT_OLLAMA_CHAT_TIMEOUT_SECONDS", "42");

        let mut config = PrivChatConfig::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.ollama.chat_timeout_seconds, 42);
        std::env::remove_var("PRIVCHAT_OLLAMA_CHAT_TIMEOUT_SECONDS");
    }

    #[test]
    fn test_env_override_enables_ner() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("PRIVCHAT_NER_ENABLED", "true");

        let mut config = PrivChatConfig::default();
        assert!(!config.ner.enabled);
        apply_env_overrides(&mut config);

        assert!(config.ner.enabled);
        std::env::remove_var("PRIVCHAT_NER_ENABLED");
    }

    #[test]
    fn test_env_override_ignores_unparseable_bool() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("PRIVCHAT_NER_ENABLED", "yes please");

        let mut config = PrivChatConfig::default();
        apply_env_overrides(&mut config);

        assert!(!config.ner.enabled);
        std::env::remove_var("PRIVCHAT_NER_ENABLED");
    }

    #[test]
    fn test_env_override_model_preferences_splits_on_commas() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(
            "PRIVCHAT_OLLAMA_MODEL_PREFERENCES",
            "llama3.2:1b, phi3:mini",
        );

        let mut config = PrivChatConfig::default();
        apply_env_overrides(&mut config);

        assert_eq!(
            config.ollama.model_preferences,
            vec!["llama3.2:1b", "phi3:mini"]
        );
        std::env::remove_var("PRIVCHAT_OLLAMA_MODEL_PREFERENCES");
    }
}
