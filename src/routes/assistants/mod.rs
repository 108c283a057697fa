pub mod add;
pub mod delete;
pub mod edit;
pub mod get;

use actix_web::{http::header, HttpResponse};

pub const ASSISTANTS_MANAGEMENT_PATH: &str = "/chat/assistants-management";

/// Form actions answer like a browser form post: 303 back to the listing.
pub(crate) fn see_other() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, ASSISTANTS_MANAGEMENT_PATH))
        .finish()
}
