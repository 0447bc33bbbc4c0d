#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod figures;
pub mod render;
pub mod scene;
pub mod scene_dump;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use error::RenderError;
pub use figures::Figure;
pub use render::{OutputFormat, render_svg, write_scene};
pub use scene::{Instruction, Scene};
pub use theme::Theme;
