pub mod types;
pub mod view;
