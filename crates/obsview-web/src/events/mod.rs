pub mod pointer;

pub use pointer::{wire_orbit_controls, OrbitWiring};
