//! gourls - a go-links directory service
//!
//! Maps short aliases ("go links") to long target URLs, lets users create,
//! search, update and delete mappings under a convention-based identity, and
//! 307-redirects visitors who hit a short alias.
//!
//! # Architecture
//! - `api`: HTTP handlers
//! - `config`: static configuration (TOML + env)
//! - `repository`: persistence trait and backends (sea-orm, in-memory)
//! - `services`: identity resolution, reserved-word gate, ownership rules,
//!   the URL directory, redirect resolution, seeding, health
//! - `system`: logging initialization

pub mod api;
pub mod config;
pub mod errors;
pub mod repository;
pub mod services;
pub mod system;
