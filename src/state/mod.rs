// ============================================================================
// STATE MODULE - observable state containers and their reducers
// ============================================================================

pub mod catalog_state;
pub mod reactivity;
pub mod session_state;

pub use catalog_state::*;
pub use reactivity::*;
pub use session_state::*;
