pub mod contact_service;

pub use contact_service::{ContactPayload, OrderKey, age_on, project};
