pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod remap;

pub use error::DiagnosticError;
