//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI commands.

mod bookmark_service;
pub mod id_generator;
mod redirect;
pub mod resource_validator;

pub use bookmark_service::*;
pub use id_generator::IdGenerator;
pub use redirect::*;
