use actix_web::{web, HttpResponse};
use error_stack::Report;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{to_document, Document};
use serde_json::{json, Value};

use crate::database;
use crate::http::error::{Error, Result};
use crate::util::{password, validation};
use crate::App;

fn parse_object_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| Error::InvalidId)
}

/// Validates a create/update payload and prepares it for persistence:
/// the password is swapped for its one-way hash and any extra fields
/// are carried through untouched.
fn to_record(mut payload: Value) -> Result<Document> {
    validation::validate_user(&payload)?;

    if let Some(fields) = payload.as_object_mut() {
        if let Some(Value::String(plain)) = fields.get("password") {
            let hashed = password::hash(plain);
            fields.insert("password".into(), Value::String(hashed));
        }
    }

    to_document(&payload).map_err(|e| Report::new(database::Error::Internal(e.into())).into())
}

#[tracing::instrument(skip_all, name = "users.list")]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse> {
    let users = app.users().list().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(skip(app), name = "users.get")]
pub async fn get(app: web::Data<App>, id: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_object_id(&id)?;
    match app.users().find(id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(Error::NotFound),
    }
}

#[tracing::instrument(skip_all, name = "users.create")]
pub async fn create(app: web::Data<App>, payload: web::Json<Value>) -> Result<HttpResponse> {
    let record = to_record(payload.into_inner())?;
    let id = app.users().insert(record).await?;

    Ok(HttpResponse::Created().json(json!({ "id": id.to_hex() })))
}

#[tracing::instrument(skip(app, payload), name = "users.update")]
pub async fn update(
    app: web::Data<App>,
    id: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse> {
    let id = parse_object_id(&id)?;
    let record = to_record(payload.into_inner())?;

    if app.users().replace(id, record).await? {
        Ok(HttpResponse::Ok().json(json!({ "message": "User updated" })))
    } else {
        Err(Error::NotFound)
    }
}

#[tracing::instrument(skip(app), name = "users.delete")]
pub async fn delete(app: web::Data<App>, id: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_object_id(&id)?;

    if app.users().remove(id).await? {
        Ok(HttpResponse::Ok().json(json!({ "message": "User deleted" })))
    } else {
        Err(Error::NotFound)
    }
}
