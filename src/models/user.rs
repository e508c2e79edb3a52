use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// A single user record as stored in the users collection.
///
/// The identifier is stored as `_id` and rendered to callers as `id`
/// in its canonical 24-hex-char form. Payload fields beyond the
/// required three are carried through opaquely in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(
        rename(deserialize = "_id"),
        serialize_with = "serialize_object_id_as_hex_string"
    )]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub extra: Document,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document};
    use serde_json::json;

    #[test]
    fn renders_id_as_hex_string() {
        let id = ObjectId::new();
        let user: User = from_document(doc! {
            "_id": id,
            "name": "Ann",
            "email": "a@b.com",
            "password": "pw",
            "nickname": "annie",
        })
        .unwrap();

        assert_eq!(user.extra, doc! { "nickname": "annie" });

        let rendered = serde_json::to_value(&user).unwrap();
        assert_eq!(
            rendered,
            json!({
                "id": id.to_hex(),
                "name": "Ann",
                "email": "a@b.com",
                "password": "pw",
                "nickname": "annie",
            })
        );
    }
}
