use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::QuizAttempt};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    /// Every attempt the user has made, newest first. Both practice and
    /// exam answers are returned.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.collection(&config.quiz_attempts_collection);
        Self { collection }
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts: Vec<QuizAttempt> = self
            .collection
            .find(doc! { "userId": user_id })
            .sort(doc! { "timestamp": -1 })
            .await?
            .try_collect()
            .await?;
        log::debug!("Loaded {} quiz attempts for user '{}'", attempts.len(), user_id);
        Ok(attempts)
    }
}
