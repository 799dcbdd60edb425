//! Test modules for the buffer component
//!
//! Tests are organized by functional area for better maintainability.

mod edge_cases;
mod fairness;
