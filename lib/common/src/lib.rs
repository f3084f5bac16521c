//! Small helpers shared between the joistframe crates.

pub mod macros;
