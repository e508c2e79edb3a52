use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use crate::database;
use crate::models::User;

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Persistence seam for the users collection.
///
/// The service talks to the store only through this trait so that a
/// test double can stand in for a live deployment. Identifiers are
/// assigned by the store on insert; any `_id` already present in a
/// document is discarded.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns every record in insertion order.
    async fn list(&self) -> database::Result<Vec<User>>;

    /// Looks a record up by its identifier.
    async fn find(&self, id: ObjectId) -> database::Result<Option<User>>;

    /// Inserts a new record and returns its freshly assigned identifier.
    async fn insert(&self, document: Document) -> database::Result<ObjectId>;

    /// Replaces the whole record atomically. Returns whether a record
    /// matched the identifier.
    async fn replace(&self, id: ObjectId, document: Document) -> database::Result<bool>;

    /// Removes a record. Returns whether a record matched the identifier.
    async fn remove(&self, id: ObjectId) -> database::Result<bool>;
}
