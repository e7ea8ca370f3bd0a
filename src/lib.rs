pub mod config;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod render;
pub mod scheduler;
pub mod transparency;

pub use config::OverlayConfig;
pub use overlay::create_overlay;
