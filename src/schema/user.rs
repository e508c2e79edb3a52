use mongodb::bson::{doc, Document};
use mongodb::options::CreateCollectionOptions;

use crate::database::{ErrorExt, Result, USERS_COLLECTION};

/// Builds the `$jsonSchema` validator applied to the users collection.
///
/// The store rejects any document missing `name`, `email` or
/// `password`, or whose `email` does not match the loose `.+@.+`
/// shape. The same rules are checked in-process before any write, so
/// this validator is a second line of defense rather than the only one.
pub fn validator() -> Document {
    doc! {
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["name", "email", "password"],
            "properties": {
                "name": {
                    "bsonType": "string",
                    "description": "Name of the user, must be a string and is required.",
                },
                "email": {
                    "bsonType": "string",
                    "pattern": "^.+@.+$",
                    "description": "Email of the user, must be a string in a valid email format, and is required.",
                },
                "password": {
                    "bsonType": "string",
                    "description": "Password of the user, must be a string and is required.",
                },
            },
        }
    }
}

/// Installs the users collection validator on the given database,
/// creating the collection when it does not exist yet.
#[tracing::instrument(skip_all)]
pub async fn ensure(db: &mongodb::Database) -> Result<()> {
    let validator = validator();
    let command = doc! { "collMod": USERS_COLLECTION, "validator": validator.clone() };

    // collMod fails when the collection has not been created yet
    if db.run_command(command, None).await.is_ok() {
        return Ok(());
    }

    tracing::info!("creating the {USERS_COLLECTION} collection with its validator");
    let options = CreateCollectionOptions::builder()
        .validator(validator)
        .build();

    db.create_collection(USERS_COLLECTION, options)
        .await
        .into_db_error()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validator;
    use mongodb::bson::Bson;

    #[test]
    fn requires_all_three_fields() {
        let schema = validator();
        let schema = schema.get_document("$jsonSchema").unwrap();

        let required = schema.get_array("required").unwrap();
        let required = required
            .iter()
            .filter_map(Bson::as_str)
            .collect::<Vec<_>>();
        assert_eq!(required, ["name", "email", "password"]);

        let properties = schema.get_document("properties").unwrap();
        for field in required {
            let spec = properties.get_document(field).unwrap();
            assert_eq!(spec.get_str("bsonType").unwrap(), "string");
        }
    }

    #[test]
    fn email_pattern_is_loose() {
        let schema = validator();
        let pattern = schema
            .get_document("$jsonSchema")
            .unwrap()
            .get_document("properties")
            .unwrap()
            .get_document("email")
            .unwrap()
            .get_str("pattern")
            .unwrap();

        assert_eq!(pattern, "^.+@.+$");
    }
}
