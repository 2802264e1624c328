// workbench-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod fs;
