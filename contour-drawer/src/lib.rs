mod binding;
mod controller;
mod error;
mod geometry;
mod overlay;
mod tool;
mod transform;
mod viewport;

pub use binding::*;
pub use controller::*;
pub use error::*;
pub use geometry::*;
pub use hit_test::*;
pub use overlay::*;
pub use tool::*;
pub use transform::*;
pub use viewport::*;
