//! Easel Editor
//!
//! A small facade over an Easel canvas: add shapes with the current colors,
//! recolor or delete the selection, zoom. [`EditorState`] holds the colors and
//! the selection snapshot and hands out a fresh [`Editor`] on demand.

mod config;
mod editor;
mod presets;
mod state;

pub use config::{ConfigError, DEFAULT_SCALE_STEP, EditorConfig};
pub use editor::{ColorCallback, Editor};
pub use presets::{CirclePreset, FILL, LinePreset, RectanglePreset, STROKE, ShapePresets, TextPreset};
pub use state::EditorState;
