//! Resume variant resolution: derive targeted resumes from one master record.

pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
pub mod variants;

pub use models::resume::Resume;
pub use models::variant::{Override, Rule, VariantSpec};
pub use variants::{generate_diff, resolve_variant, DiffReport, ResolveError};
