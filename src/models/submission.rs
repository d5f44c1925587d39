use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::BookingInfo;
use crate::services::booking::format_booking;

pub const DEFAULT_PHONE: &str = "Not provided";
pub const DEFAULT_MESSAGE: &str = "No message provided";

/// Contact form body as posted by the website.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub selected_date: Option<String>,
    pub selected_time_slot: Option<String>,
}

/// Validated, normalized submission. Owned by the dispatch task once accepted.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub selected_date: Option<String>,
    pub selected_time_slot: Option<String>,
    pub booking: Option<BookingInfo>,
}

impl Submission {
    pub fn from_form(form: ContactForm) -> Result<Self, AppError> {
        let (Some(name), Some(email)) = (present(form.name), present(form.email)) else {
            return Err(AppError::Validation(
                "Name and email are required".to_string(),
            ));
        };

        let selected_date = present(form.selected_date);
        let selected_time_slot = present(form.selected_time_slot);
        let booking = format_booking(selected_date.as_deref(), selected_time_slot.as_deref());

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone: present(form.phone).unwrap_or_else(|| DEFAULT_PHONE.to_string()),
            message: present(form.message).unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            selected_date,
            selected_time_slot,
            booking,
        })
    }

    pub fn has_message(&self) -> bool {
        self.message != DEFAULT_MESSAGE
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
