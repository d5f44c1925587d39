pub mod booking;
pub mod dispatcher;
pub mod email;
pub mod templates;
