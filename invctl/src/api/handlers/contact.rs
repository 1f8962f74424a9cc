use axum::{Json, http::StatusCode};
use tracing::info;

use crate::{
    api::json::AppJson,
    api::models::contact::{ContactAccepted, ContactRequest},
    errors::Result,
};

/// Submit the contact form
///
/// Messages are logged; there is no mail delivery.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactRequest,
    tag = "contact",
    responses(
        (status = 202, description = "Message accepted", body = ContactAccepted),
        (status = 400, description = "Per-field validation errors"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn submit_contact(AppJson(request): AppJson<ContactRequest>) -> Result<(StatusCode, Json<ContactAccepted>)> {
    request.validate()?;

    info!(
        from = %request.email.trim(),
        subject = %request.subject.trim(),
        length = request.message.trim().len(),
        "Contact message received"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactAccepted {
            success: true,
            message: "Thanks! We'll get back to you soon.".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_valid_message_accepted() {
        let (server, _state, _dir) = create_test_app().await;

        let response = server
            .post("/api/contact")
            .json(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "subject": "Wholesale",
                "message": "Do you offer bulk pricing?"
            }))
            .await;
        response.assert_status(StatusCode::ACCEPTED);
    }

    #[test_log::test(tokio::test)]
    async fn test_field_errors_reported() {
        let (server, _state, _dir) = create_test_app().await;

        let response = server
            .post("/api/contact")
            .json(&json!({ "name": "Ada", "email": "ada@", "subject": "", "message": "short" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert_eq!(body["fields"]["email"], "Enter a valid email address.");
        assert_eq!(body["fields"]["subject"], "Subject is required.");
        assert_eq!(body["fields"]["message"], "Message must be at least 10 characters.");
        assert!(body["fields"].get("name").is_none());
    }
}
