//! Souq Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! Admin accounts come from the environment and sessions live in memory.
//! Bind to a private interface; the panel can delete catalog rows.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
