use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{ContactForm, Submission};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

// POST /api/contact
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let data = match payload {
        Ok(Json(data)) => data,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "contact form body rejected");
            return Err(AppError::NoData);
        }
    };

    if !data.as_object().is_some_and(|o| !o.is_empty()) {
        return Err(AppError::NoData);
    }

    let form: ContactForm = serde_json::from_value(data).map_err(|e| {
        tracing::warn!(error = %e, "malformed contact form fields");
        AppError::Validation("Invalid submission data".to_string())
    })?;

    let submission = Submission::from_form(form).inspect_err(|_| {
        tracing::info!("contact form missing name or email");
    })?;

    let missing = state.config.missing_credentials();
    if !missing.is_empty() {
        tracing::error!(
            provider = state.config.email_provider.as_str(),
            missing = ?missing,
            "email transport is not configured"
        );
        return Err(AppError::Config(missing.join(", ")));
    }

    tracing::info!(
        submission_id = %submission.id,
        has_message = submission.has_message(),
        has_booking = submission.booking.is_some(),
        "contact form accepted"
    );

    // Delivery happens after the response; its outcome is only logged.
    drop(state.dispatcher.spawn(submission));

    Ok(Json(ContactResponse {
        success: true,
        message: "Your message has been received! We'll get back to you soon.",
    }))
}

/// Turns a handler panic into the generic 500 body.
pub fn panic_response(
    development: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |err: Box<dyn Any + Send + 'static>| {
        let detail = err
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| err.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        tracing::error!(panic = %detail, "request handler panicked");
        AppError::Internal(anyhow::anyhow!("handler panicked: {detail}"))
            .into_response_with_detail(development)
    }
}
