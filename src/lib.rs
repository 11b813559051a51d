//! aka - a local short-route bookmark service
//!
//! Maps short, human-chosen routes to URLs or local files and resolves
//! incoming requests against that mapping.
//!
//! # Architecture
//! - `storage`: record store and route index over one SeaORM database
//! - `services`: id generation, resource validation, bookmark management, route resolution
//! - `api`: HTTP admin API, health probe, catch-all redirect
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
