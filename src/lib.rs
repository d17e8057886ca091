//! Game UI
//!
//! A console-style game menu skin over Dear ImGui.
//!
//! # Architecture
//!
//! - `skin`: [`GameUi`], the menu skin (backdrop window, title bar, items, sounds)
//! - `host`: the [`GuiHost`] boundary and [`ImguiHost`], its `imgui` implementation
//! - `render`: [`GlRenderer`], draws imgui output with `imgui-glow-renderer`
//! - `sound`: [`Sound`] events, the [`SoundPlayer`] callback and a rodio player
//! - `config`: JSON configuration for fonts, menu size and palette
//! - `error`: [`UiError`]

pub mod config;
pub mod error;
pub mod host;
pub mod render;
pub mod skin;
pub mod sound;

pub use config::{Config, FontConfig, StyleConfig};
pub use error::UiError;
pub use host::{GuiHost, ImguiHost};
pub use render::GlRenderer;
pub use skin::{GameUi, ItemFlags};
pub use sound::{RodioSoundPlayer, Sound, SoundPlayer};
