// workbench-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts the application needs from the outside world (dataset sources).
pub mod ports;

// 2. Domain (business rules)
// Datasets, rule sets, validation, quality metrics, review workflow.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// CSV import/export, YAML configuration, filesystem helpers.
pub mod infrastructure;

// 4. Application (Use Cases)
// Validate, profile, export, sync.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::WorkbenchError;
