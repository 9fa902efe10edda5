// ============================================================================
// DOM MODULE - browser document seam
// ============================================================================

pub mod document;

pub use document::*;
