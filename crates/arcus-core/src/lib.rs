pub mod animation;
pub mod cache;
pub mod color;
pub mod geometry;
pub mod macros;
pub mod state;

pub use cache::{CacheKey, PixmapCache};
pub use color::RingColor;
pub use state::{Mode, ProgressState, StateChange};
