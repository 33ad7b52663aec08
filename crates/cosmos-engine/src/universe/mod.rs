pub mod generator;
pub mod model;
pub mod tables;
