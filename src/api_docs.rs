use crate::api;
use crate::api::contact::CreatedContacts;
use crate::domain::{Contact, ContactProjection, NewContact};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::contact::list_contacts,
        api::contact::order_contacts,
        api::contact::get_contact,
        api::contact::create_contact,
        api::contact::update_contact,
        api::contact::delete_contact,
    ),
    components(schemas(Contact, NewContact, ContactProjection, CreatedContacts)),
    tags(
        (name = "contacts", description = "Contact management API")
    )
)]
pub struct ApiDoc;
