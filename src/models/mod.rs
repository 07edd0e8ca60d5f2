//! Model layer
//!
//! Rust types for the Solution catalog and the Environment custom resource.
//!
//! Structure:
//! - `solution.rs` - Solution/version descriptors decoded from the catalog ConfigMap
//! - `environment.rs` - Environment CRD definition

pub mod environment;
pub mod solution;

pub use environment::{Environment, EnvironmentSolution, EnvironmentSpec, creation_request};
pub use solution::{Solution, SolutionVersion};
