//! HTTP backend exposing the translation and reply wrappers

pub mod endpoints;
