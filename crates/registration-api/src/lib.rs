//! Registration API - HTTP surface for badminton night sign-ups.
//!
//! Translates requests into registration store operations:
//! - Submit a registration (name, phone, guests, slot)
//! - List active registrations for the sign-up sheet
//! - Look up, edit or cancel a registration by phone number and id

pub mod api;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::ApiError;
pub use registration_store::{Registration, RegistrationId, RegistrationPatch, Store};
