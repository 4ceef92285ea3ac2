//! Pipeline module - assembly and query alignment drivers

pub mod align;
pub mod assemble;
pub mod config;
