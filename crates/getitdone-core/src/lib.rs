//! Shared configuration, constants, validation and error types for the
//! get-it-done workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod validate;
