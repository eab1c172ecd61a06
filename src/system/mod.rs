//! System-level modules
//!
//! Logging initialization lives here; configuration management is in
//! `crate::config`.

pub mod logging;
