pub mod booking;
pub mod email;
pub mod submission;

pub use booking::BookingInfo;
pub use email::OutgoingEmail;
pub use submission::{ContactForm, Submission};
