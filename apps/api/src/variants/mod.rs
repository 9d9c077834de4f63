// Variant Resolution Engine
// Derives targeted resumes from the master: section projection → rules → overrides,
// plus a diff summary of what changed. Pure and synchronous; handlers own all I/O.

pub mod diff;
pub mod errors;
pub mod handlers;
pub mod overrides;
pub mod path;
pub mod pipeline;
pub mod rules;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use diff::{generate_diff, DiffChange, DiffReport};
pub use errors::{OverrideError, ResolveError, SpecError, SpecErrorKind, SpecErrors};
pub use pipeline::{resolve_batch, resolve_raw_variant, resolve_variant};
pub use validation::validate_variant;
