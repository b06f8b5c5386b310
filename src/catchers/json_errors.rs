use crate::routes::ErrorResponse;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::Request;

#[catch(404)]
pub fn not_found(_req: &Request) -> Custom<Json<ErrorResponse>> {
    Custom(Status::NotFound, Json(ErrorResponse::new("Not found")))
}

/// Keeps error bodies JSON for whatever Rocket rejects before a route runs.
/// Server errors get the same generic message as the contact route.
#[catch(default)]
pub fn json_fallback(status: Status, _req: &Request) -> Custom<Json<ErrorResponse>> {
    let message = if status.code >= 500 {
        "Er ging iets mis."
    } else {
        status.reason().unwrap_or("Request failed")
    };
    Custom(status, Json(ErrorResponse::new(message)))
}
