//! Core application modules
//!
//! This module contains configuration, constants, logging, and the model
//! provider layer.

pub mod config;
pub mod constants;
pub mod logging;
pub mod provider;
pub mod providers;
