pub mod utils;
pub mod viewer;
pub mod nav_buttons;
pub mod debug_panel;
