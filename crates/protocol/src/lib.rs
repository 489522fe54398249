pub mod color;
pub mod commands;
pub mod config;
pub mod control;
pub mod scene;
pub mod types;

pub use color::Color;
pub use commands::{RenderCommand, StrokeStyle};
pub use config::ViewConfig;
pub use control::ControlIntent;
pub use scene::{Scene, Shape, Style};
pub use types::{PixelPos, Point, ScreenSize, TextAlign};
