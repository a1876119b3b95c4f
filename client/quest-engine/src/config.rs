use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub questions_api_url: String,
    pub scoring_api_url: String,
    pub data_dir: Option<PathBuf>,
    /// Optional request timeout for the scoring call. When absent the
    /// transport's default timeout applies.
    pub scoring_timeout_seconds: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        // Extract values with fallbacks to ENV or the dev API gateways
        let questions_api_url = settings
            .get_string("api.questions_url")
            .or_else(|_| env::var("QUESTIONS_API_URL"))
            .unwrap_or_else(|_| {
                "https://fmrdkboi63.execute-api.us-east-1.amazonaws.com/dev".to_string()
            });

        let scoring_api_url = settings
            .get_string("api.scoring_url")
            .or_else(|_| env::var("SCORING_API_URL"))
            .unwrap_or_else(|_| {
                "https://6axx5kevpc.execute-api.us-east-1.amazonaws.com/dev".to_string()
            });

        let data_dir = settings
            .get_string("storage.data_dir")
            .or_else(|_| env::var("QUEST_DATA_DIR"))
            .ok()
            .map(PathBuf::from);

        let scoring_timeout_seconds = settings
            .get_string("api.scoring_timeout_seconds")
            .or_else(|_| env::var("SCORING_TIMEOUT_SECONDS"))
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0);

        Ok(Config {
            questions_api_url,
            scoring_api_url,
            data_dir,
            scoring_timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn env_overrides_take_precedence() {
        env::set_var("QUESTIONS_API_URL", "http://localhost:9000");
        env::set_var("SCORING_API_URL", "http://localhost:9001");
        env::set_var("SCORING_TIMEOUT_SECONDS", "3");

        let config = Config::load().expect("config should load");
        assert_eq!(config.questions_api_url, "http://localhost:9000");
        assert_eq!(config.scoring_api_url, "http://localhost:9001");
        assert_eq!(config.scoring_timeout_seconds, Some(3));

        env::remove_var("QUESTIONS_API_URL");
        env::remove_var("SCORING_API_URL");
        env::remove_var("SCORING_TIMEOUT_SECONDS");
    }

    #[test]
    #[serial]
    fn defaults_point_at_the_dev_gateways() {
        env::remove_var("QUESTIONS_API_URL");
        env::remove_var("SCORING_API_URL");
        env::remove_var("SCORING_TIMEOUT_SECONDS");

        let config = Config::load().expect("config should load");
        assert!(config.questions_api_url.contains("execute-api"));
        assert!(config.scoring_api_url.contains("execute-api"));
        assert_eq!(config.scoring_timeout_seconds, None);
    }
}
