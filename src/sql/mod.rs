//! Safe SQL builder: identifiers are quoted, values travel as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
