//! Goban Engine
//!
//! A tiled, layered Go board view rendered on the CPU.
//!
//! # Goals
//! - Repaint only the pixels a board change touches
//! - Bounded memory: only visible tiles hold surfaces, and artwork is
//!   rendered once per type and scale
//! - No global state
//!
//! # Example
//! ```rust,ignore
//! use goban_engine::{BoardView, Config};
//!
//! let mut view = BoardView::new(Config::default())?;
//! view.set_viewport(Rect::new(0.0, 0.0, 640.0, 480.0))?;
//! view.play("D4".parse()?)?;
//! let image = view.snapshot()?;
//! ```

mod config;
mod logging;
mod view;

pub use config::{Config, ConfigError};
pub use logging::init_logging;
pub use view::{BoardView, ViewError};

// Re-export sub-crates for advanced usage
pub use goban_board as board;
pub use goban_geometry as geometry;
pub use goban_render as render;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
