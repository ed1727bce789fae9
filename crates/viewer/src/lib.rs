pub mod controller;
pub mod events;
pub mod renderer;
pub mod switch;

pub use controller::*;
pub use events::*;
pub use renderer::*;
pub use switch::*;
