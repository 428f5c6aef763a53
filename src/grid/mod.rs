pub mod gradient;
pub mod stagger;

pub use gradient::{gradient_axis, GridSpacing};
pub use stagger::{unstagger, StaggerAxis};
