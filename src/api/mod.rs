pub mod contact;
pub mod error;
pub mod health;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Contacts
        .route(
            "/contacts",
            get(contact::list_contacts).post(contact::create_contact),
        )
        .route("/contacts/order", get(contact::order_contacts))
        .route(
            "/contacts/:id",
            get(contact::get_contact)
                .put(contact::update_contact)
                .delete(contact::delete_contact),
        )
        .with_state(state)
}
