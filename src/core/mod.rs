//! Core types for ccmeta
//!
//! Holds the error system shared by the metadata pipeline and the CLI:
//! - [`MetadataError`] - Enumerated error types covering every failure mode
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format

pub mod error;

pub use error::{ErrorContext, MetadataError, user_friendly_error};
