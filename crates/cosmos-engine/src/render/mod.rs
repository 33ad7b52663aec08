pub mod features;
pub mod label;
pub mod map;
pub mod planet;
pub mod starfield;
