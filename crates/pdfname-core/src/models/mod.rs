//! Data models for the rename pipeline.

pub mod config;
pub mod document;
