//! API data models
//!
//! This module contains data structures for the OpenAI API and for the
//! backend's own JSON routes.

pub mod openai;
pub mod query;
