pub mod rng;
pub mod rotation;
pub mod surface;
