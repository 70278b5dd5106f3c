use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection,
};

use crate::{config::Config, db::Database, errors::AppResult, models::domain::UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Every profile whose role is `student`.
    async fn find_students(&self) -> AppResult<Vec<UserProfile>>;
    async fn find_student_by_id(&self, id: &str) -> AppResult<Option<UserProfile>>;
}

pub struct MongoStudentRepository {
    collection: Collection<UserProfile>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database, config: &Config) -> Self {
        let collection = db.collection(&config.users_collection);
        Self { collection }
    }

    /// Profiles may be keyed by an ObjectId or by the auth provider's uid.
    fn id_filter(id: &str) -> Document {
        match ObjectId::parse_str(id) {
            Ok(oid) => doc! { "role": "student", "$or": [ { "_id": oid }, { "_id": id } ] },
            Err(_) => doc! { "role": "student", "_id": id },
        }
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn find_students(&self) -> AppResult<Vec<UserProfile>> {
        let students: Vec<UserProfile> = self
            .collection
            .find(doc! { "role": "student" })
            .await?
            .try_collect()
            .await?;
        log::debug!("Loaded {} student profiles", students.len());
        Ok(students)
    }

    async fn find_student_by_id(&self, id: &str) -> AppResult<Option<UserProfile>> {
        let student = self.collection.find_one(Self::id_filter(id)).await?;
        log::debug!("Looked up student '{}': found={}", id, student.is_some());
        Ok(student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_lookup_matches_string_id_only() {
        let filter = MongoStudentRepository::id_filter("firebase-uid-42");

        assert_eq!(filter.get_str("_id").unwrap(), "firebase-uid-42");
        assert_eq!(filter.get_str("role").unwrap(), "student");
    }

    #[test]
    fn object_id_lookup_tries_both_forms() {
        let filter = MongoStudentRepository::id_filter("65f1c0ffee0000000000abcd");

        let alternatives = filter.get_array("$or").unwrap();
        assert_eq!(alternatives.len(), 2);
        assert!(filter.get("_id").is_none());
    }
}
