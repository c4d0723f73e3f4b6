//! HTTP API surface

pub mod api;
