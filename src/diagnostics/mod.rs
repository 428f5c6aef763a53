pub mod kinematic;
pub mod thermo;


pub use kinematic::*;
pub use thermo::*;
