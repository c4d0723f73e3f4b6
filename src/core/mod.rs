//! Core translation engine module

pub mod catalog;
pub mod config;
pub mod dictionary;
pub mod errors;
pub mod models;
pub mod once;
pub mod resolver;
