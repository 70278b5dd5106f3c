use std::env;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub users_collection: String,
    pub quiz_attempts_collection: String,
    pub exam_results_collection: String,
    pub feedback_collection: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "learn-smart-local".to_string()),
            users_collection: env::var("USERS_COLLECTION").unwrap_or_else(|_| "users".to_string()),
            quiz_attempts_collection: env::var("QUIZ_ATTEMPTS_COLLECTION")
                .unwrap_or_else(|_| "quizAttempts".to_string()),
            exam_results_collection: env::var("EXAM_RESULTS_COLLECTION")
                .unwrap_or_else(|_| "examResults".to_string()),
            feedback_collection: env::var("FEEDBACK_COLLECTION")
                .unwrap_or_else(|_| "feedback".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Rejects configurations that would make every read fail, such as an
    /// empty database or collection name.
    pub fn validate(&self) -> AppResult<()> {
        if !self.mongo_conn_string.starts_with("mongodb://")
            && !self.mongo_conn_string.starts_with("mongodb+srv://")
        {
            return Err(AppError::ConfigError(format!(
                "MONGO_CONN_STRING must be a mongodb:// or mongodb+srv:// URI, got '{}'",
                self.mongo_conn_string
            )));
        }

        let names = [
            ("MONGO_DB_NAME", &self.mongo_db_name),
            ("USERS_COLLECTION", &self.users_collection),
            ("QUIZ_ATTEMPTS_COLLECTION", &self.quiz_attempts_collection),
            ("EXAM_RESULTS_COLLECTION", &self.exam_results_collection),
            ("FEEDBACK_COLLECTION", &self.feedback_collection),
        ];
        for (var, value) in names {
            if value.trim().is_empty() {
                return Err(AppError::ConfigError(format!("{} must not be empty", var)));
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "learn-smart-test".to_string(),
            users_collection: "users".to_string(),
            quiz_attempts_collection: "quizAttempts".to_string(),
            exam_results_collection: "examResults".to_string(),
            feedback_collection: "feedback".to_string(),
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(!config.rust_log.is_empty());
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "learn-smart-test");
        assert_eq!(config.exam_results_collection, "examResults");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_uri() {
        let mut config = Config::test_config();
        config.mongo_conn_string = "localhost:27017".to_string();

        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_validate_rejects_empty_collection() {
        let mut config = Config::test_config();
        config.feedback_collection = "  ".to_string();

        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));
    }
}
