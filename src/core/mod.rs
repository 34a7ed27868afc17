//! Configuration and the plain data types shared across the crate

pub mod config;
pub mod models;
