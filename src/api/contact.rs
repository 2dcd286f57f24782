use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::domain::{Contact, ContactProjection, DomainError};
use crate::infrastructure::AppState;
use crate::services::contact_service::{self, ContactPayload, Created};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    /// One of `asc`, `desc`, `age-asc`, `age-des`
    pub order: String,
}

/// `POST /contacts` response: an object for an object body, an array for an array body
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreatedContacts {
    Single(Contact),
    Batch(Vec<Contact>),
}

impl From<Created> for CreatedContacts {
    fn from(created: Created) -> Self {
        match created {
            Created::Single(contact) => CreatedContacts::Single(contact),
            Created::Batch(contacts) => CreatedContacts::Batch(contacts),
        }
    }
}

#[utoipa::path(
    get,
    path = "/contacts",
    tag = "contacts",
    responses(
        (status = 200, description = "All stored contacts", body = [Contact])
    )
)]
pub async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = contact_service::list_contacts(state.contact_repo.as_ref()).await?;
    Ok(Json(contacts))
}

#[utoipa::path(
    get,
    path = "/contacts/order",
    tag = "contacts",
    params(OrderQuery),
    responses(
        (status = 200, description = "Contacts sorted with computed age", body = [ContactProjection]),
        (status = 400, description = "Unknown order or malformed birthdate")
    )
)]
pub async fn order_contacts(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<ContactProjection>>, ApiError> {
    let today = chrono::Local::now().date_naive();
    let projected =
        contact_service::ordered_contacts(state.contact_repo.as_ref(), &query.order, today).await?;
    Ok(Json(projected))
}

#[utoipa::path(
    get,
    path = "/contacts/{id}",
    tag = "contacts",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact found", body = Contact),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, ApiError> {
    let contact = contact_service::get_contact(state.contact_repo.as_ref(), id).await?;
    Ok(Json(contact))
}

// Body may be a single contact object or an array of them
#[utoipa::path(
    post,
    path = "/contacts",
    tag = "contacts",
    request_body = crate::domain::NewContact,
    responses(
        (status = 201, description = "Saved contact, or saved contacts for an array body", body = CreatedContacts),
        (status = 400, description = "Formato no soportado"),
        (status = 409, description = "E-mail already registered")
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CreatedContacts>), ApiError> {
    let payload = ContactPayload::from_value(body)?;
    let created = contact_service::create_contacts(state.contact_repo.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/contacts/{id}",
    tag = "contacts",
    params(("id" = i64, Path, description = "Contact id")),
    request_body = crate::domain::NewContact,
    responses(
        (status = 200, description = "Contact updated", body = Contact),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Contact>, ApiError> {
    let contact = match ContactPayload::from_value(body)? {
        ContactPayload::Single(contact) => contact,
        ContactPayload::Batch(_) => return Err(DomainError::UnsupportedPayloadShape.into()),
    };

    let updated = contact_service::update_contact(state.contact_repo.as_ref(), id, contact).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/contacts/{id}",
    tag = "contacts",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 404, description = "Contact not found")
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    contact_service::delete_contact(state.contact_repo.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
