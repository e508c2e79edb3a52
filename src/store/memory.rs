use async_trait::async_trait;
use error_stack::Report;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{from_document, Document};
use tokio::sync::RwLock;

use super::UserStore;
use crate::database::{self, Error};
use crate::models::User;

/// In-process [`UserStore`] double.
///
/// Records live in a Vec so that `list` observes insertion order, the
/// same order a live collection scan would return.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<(ObjectId, Document)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn hydrate(id: ObjectId, document: &Document) -> database::Result<User> {
    let mut document = document.clone();
    document.insert("_id", id);
    from_document(document).map_err(|e| Report::new(Error::Internal(e.into())))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> database::Result<Vec<User>> {
        let users = self.users.read().await;
        users.iter().map(|(id, doc)| hydrate(*id, doc)).collect()
    }

    async fn find(&self, id: ObjectId) -> database::Result<Option<User>> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(id, doc)| hydrate(*id, doc))
            .transpose()
    }

    async fn insert(&self, mut document: Document) -> database::Result<ObjectId> {
        document.remove("_id");

        let id = ObjectId::new();
        self.users.write().await.push((id, document));
        Ok(id)
    }

    async fn replace(&self, id: ObjectId, mut document: Document) -> database::Result<bool> {
        document.remove("_id");

        let mut users = self.users.write().await;
        match users.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, existing)) => {
                *existing = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: ObjectId) -> database::Result<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|(existing, _)| *existing != id);
        Ok(users.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn ann() -> Document {
        doc! { "name": "Ann", "email": "a@b.com", "password": "pw" }
    }

    #[tokio::test]
    async fn assigns_fresh_identifiers() {
        let store = MemoryStore::new();
        let first = store.insert(ann()).await.unwrap();
        let second = store.insert(ann()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn ignores_client_supplied_ids() {
        let store = MemoryStore::new();
        let wanted = ObjectId::new();

        let mut document = ann();
        document.insert("_id", wanted);

        let assigned = store.insert(document).await.unwrap();
        assert_ne!(assigned, wanted);
        assert!(store.find(wanted).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for n in 0..5 {
            let mut document = ann();
            document.insert("name", format!("user-{n}"));
            ids.push(store.insert(document).await.unwrap());
        }

        let listed = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.id)
            .collect::<Vec<_>>();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn replace_is_a_full_replacement() {
        let store = MemoryStore::new();

        let mut document = ann();
        document.insert("nickname", "annie");
        let id = store.insert(document).await.unwrap();

        let mut replacement = ann();
        replacement.insert("name", "Anne");
        assert!(store.replace(id, replacement).await.unwrap());

        let user = store.find(id).await.unwrap().unwrap();
        assert_eq!(user.name, "Anne");
        assert!(user.extra.get("nickname").is_none());
    }

    #[tokio::test]
    async fn remove_then_find_misses() {
        let store = MemoryStore::new();
        let id = store.insert(ann()).await.unwrap();

        assert!(store.remove(id).await.unwrap());
        assert!(store.find(id).await.unwrap().is_none());

        assert!(!store.remove(id).await.unwrap());
        assert!(!store.replace(id, ann()).await.unwrap());
    }
}
