//! Core types for the SDR voice agent
//!
//! This crate provides foundational types used across all other crates:
//! - Error types
//! - The lead record captured at the end of a qualification call

pub mod error;
pub mod lead;

pub use error::{Error, Result};
pub use lead::LeadRecord;
