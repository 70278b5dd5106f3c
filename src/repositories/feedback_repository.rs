use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::Feedback};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Feedback>>;
}

pub struct MongoFeedbackRepository {
    collection: Collection<Feedback>,
}

impl MongoFeedbackRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.collection(&config.feedback_collection);
        Self { collection }
    }
}

#[async_trait]
impl FeedbackRepository for MongoFeedbackRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Feedback>> {
        let feedback: Vec<Feedback> = self
            .collection
            .find(doc! { "userId": user_id })
            .await?
            .try_collect()
            .await?;
        log::debug!("Loaded {} feedback entries for user '{}'", feedback.len(), user_id);
        Ok(feedback)
    }
}
