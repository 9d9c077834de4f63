pub mod resume;
pub mod variant;
