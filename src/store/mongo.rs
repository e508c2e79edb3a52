use async_trait::async_trait;
use error_stack::Report;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use super::UserStore;
use crate::database::{self, Error, ErrorExt, Pool};
use crate::models::User;

/// [`UserStore`] backed by a live users collection.
#[derive(Debug, Clone)]
pub struct MongoStore {
    users: Collection<User>,
}

impl MongoStore {
    pub(crate) fn new(pool: &Pool) -> Self {
        Self {
            users: pool.users(),
        }
    }

    fn documents(&self) -> Collection<Document> {
        self.users.clone_with_type()
    }
}

#[async_trait]
impl UserStore for MongoStore {
    #[tracing::instrument(name = "store.list", skip(self))]
    async fn list(&self) -> database::Result<Vec<User>> {
        let mut cursor = self.users.find(None, None).await.into_db_error()?;

        let mut users = Vec::new();
        while let Some(user) = cursor.try_next().await.into_db_error()? {
            users.push(user);
        }

        Ok(users)
    }

    #[tracing::instrument(name = "store.find", skip(self))]
    async fn find(&self, id: ObjectId) -> database::Result<Option<User>> {
        self.users
            .find_one(doc! { "_id": id }, None)
            .await
            .into_db_error()
    }

    #[tracing::instrument(name = "store.insert", skip(self, document))]
    async fn insert(&self, mut document: Document) -> database::Result<ObjectId> {
        document.remove("_id");

        let result = self
            .documents()
            .insert_one(document, None)
            .await
            .into_db_error()?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            Report::new(Error::Internal(mongodb::error::Error::custom(
                "store assigned a non-ObjectId identifier",
            )))
        })
    }

    #[tracing::instrument(name = "store.replace", skip(self, document))]
    async fn replace(&self, id: ObjectId, mut document: Document) -> database::Result<bool> {
        document.remove("_id");

        let result = self
            .documents()
            .replace_one(doc! { "_id": id }, document, None)
            .await
            .into_db_error()?;

        Ok(result.matched_count > 0)
    }

    #[tracing::instrument(name = "store.remove", skip(self))]
    async fn remove(&self, id: ObjectId) -> database::Result<bool> {
        let result = self
            .users
            .delete_one(doc! { "_id": id }, None)
            .await
            .into_db_error()?;

        Ok(result.deleted_count > 0)
    }
}
