pub mod angle;
pub mod view;

// Foundation crate: small, well-tested primitives only.
pub use angle::*;
pub use view::*;
