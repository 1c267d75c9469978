pub mod base_map;
pub mod canvas;
pub mod controller;
pub mod hotkeys;
pub mod painter;
pub mod river;
pub mod view_state;

pub use canvas::{Canvas, Element, ElementId, Scene};
pub use controller::{Control, InputEvent, MapController};
pub use view_state::ViewState;
