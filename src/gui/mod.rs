pub mod app;
pub mod progress;
pub mod render;
pub mod theme;

pub use progress::CircleProgress;
