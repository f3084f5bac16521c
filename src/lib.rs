//! Evenly spaced joist frames for box volumes.
//!
//! The core of this crate is [compute_even_spacing], which distributes a number of members
//! across a span and pulls the end members inward, and [layout_joist_centroids], which turns
//! that spacing into member centroids within a box. The [settings] and [viewport] modules wrap
//! those in the state a live viewer needs.
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

mod bounds;
pub mod camera;
mod error;
mod float;
pub mod frame;
pub mod settings;
mod spacing;
pub mod viewport;

pub use bounds::*;
pub use error::*;
pub use float::*;
pub use frame::{layout_joist_centroids, JoistLayout, JoistParams};
pub use spacing::*;
