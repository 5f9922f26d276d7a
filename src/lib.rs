//! carbontrack: carbon footprint and personal finance dashboard metrics

pub mod config;
pub mod loaders;
pub mod services;
pub mod types;
