//! Souq Core - Shared types and the table engine.
//!
//! This crate provides the pieces shared by every Souq component:
//! - `admin` - Store administration server
//! - `cli` - Command-line tools for inspecting datasets
//!
//! # Architecture
//!
//! The core crate contains only types, traits, and pure logic - no I/O, no
//! HTTP, no global state. Everything here can be driven from a server
//! handler, a terminal, or a test.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, statuses, and bilingual text
//! - [`table`] - Search, filter, sort, and popup state for admin data tables

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod table;
pub mod types;

pub use types::*;
