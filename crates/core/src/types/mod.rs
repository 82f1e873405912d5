//! Core types for Souq.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod label;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use label::{Locale, LocaleError, LocalizedText};
pub use price::{CurrencyCode, Price};
pub use status::*;
