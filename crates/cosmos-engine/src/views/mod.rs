pub mod map_view;
pub mod planet_viewer;
