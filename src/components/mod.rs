pub mod app;
pub mod controls_hint;
pub mod subway_map;
pub mod toast;
