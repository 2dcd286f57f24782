//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::DomainError;

/// Stored contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub document: i32,
    pub email: String,
    /// Calendar date as `YYYY-MM-DD`; only validated when ages are computed
    pub birthdate: String,
}

/// Input for creating or replacing a contact
///
/// Unknown fields (including any client-supplied `id`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewContact {
    pub name: String,
    pub document: i32,
    pub email: String,
    pub birthdate: String,
}

/// Display view of a contact with its computed age, e.g. `"34 años"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ContactProjection {
    pub id: i64,
    pub name: String,
    pub document: i32,
    pub email: String,
    pub age: String,
}

/// Repository trait for Contact entity
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Find all contacts in storage order
    async fn find_all(&self) -> Result<Vec<Contact>, DomainError>;

    /// Find a contact by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Contact>, DomainError>;

    /// Insert a contact, returning it with its assigned ID
    async fn save(&self, contact: NewContact) -> Result<Contact, DomainError>;

    /// Insert several contacts atomically
    async fn save_all(&self, contacts: Vec<NewContact>) -> Result<Vec<Contact>, DomainError>;

    /// Replace every field of an existing contact
    async fn update(&self, id: i64, contact: NewContact) -> Result<Contact, DomainError>;

    /// Delete a contact by ID
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}
