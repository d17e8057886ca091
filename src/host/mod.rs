//! Immediate-Mode GUI Host
//!
//! The skin never draws anything itself. It forwards every call to a host
//! implementing [`GuiHost`], the same set of primitives Dear ImGui exposes:
//! windows, a layout cursor, a handful of widgets, hover queries and raw draw
//! calls. [`ImguiHost`] implements it over the `imgui` crate.
//!
//! # Architecture
//!
//! - `types`: vectors, colors and handles
//! - `input`: SDL2 events translated into imgui input events
//! - `imgui_host`: [`ImguiHost`], the `imgui::Context` behind the trait
//!
//! # Labels
//!
//! Widget labels follow the `visible##id` convention. Everything after `##`
//! only contributes to the widget's identity and is never drawn, so
//! `"##Volume"` is an unlabeled widget with a stable id.

pub mod imgui_host;
pub mod input;
pub mod types;

pub use imgui::{Style, StyleColor, TextureId, WindowFlags};
pub use imgui_host::ImguiHost;
pub use types::{ColorF, FontId, Vec2, WidgetId};

use crate::error::UiError;
use std::path::Path;

/// Primitives of an immediate-mode GUI library
///
/// Cursor positions taken or given as plain `f32`/`Vec2` without a `screen`
/// qualifier are relative to the current window's origin.
pub trait GuiHost {
    // === Fonts & style ===
    /// Registers a font; `None` uses the library's built-in face
    fn add_font(&mut self, path: Option<&Path>, size: f32) -> Result<FontId, UiError>;
    fn set_font_scale(&mut self, font: FontId, scale: f32);
    fn style(&self) -> &Style;
    fn style_mut(&mut self) -> &mut Style;

    // === Frame ===
    fn set_display_size(&mut self, size: Vec2);
    fn new_frame(&mut self);
    fn end_frame(&mut self);

    // === Windows ===
    fn set_next_window_pos(&mut self, pos: Vec2);
    fn set_next_window_size(&mut self, size: Vec2);
    fn begin_window(&mut self, name: &str, flags: WindowFlags) -> bool;
    fn end_window(&mut self);
    fn begin_child(&mut self, name: &str, size: Vec2) -> bool;
    fn end_child(&mut self);
    fn window_pos(&self) -> Vec2;
    fn window_width(&self) -> f32;

    // === Stacks ===
    fn push_font(&mut self, font: FontId);
    fn pop_font(&mut self);
    fn push_style_color(&mut self, slot: StyleColor, color: ColorF);
    fn pop_style_color(&mut self);
    fn push_item_width(&mut self, width: f32);
    fn pop_item_width(&mut self);

    // === Layout ===
    fn cursor_pos(&self) -> Vec2;
    fn set_cursor_pos_x(&mut self, x: f32);
    fn set_cursor_pos_y(&mut self, y: f32);
    fn cursor_screen_pos(&self) -> Vec2;
    fn content_region_avail(&self) -> Vec2;
    fn calc_text_size(&self, text: &str) -> Vec2;
    fn same_line(&mut self);

    // === Widgets ===
    fn text(&mut self, text: &str);
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;
    /// Slider over `min..=max`, values shown with `decimals` places
    fn slider_float(&mut self, label: &str, value: &mut f32, min: f32, max: f32, decimals: usize) -> bool;
    fn begin_combo(&mut self, label: &str, preview: &str) -> bool;
    fn selectable(&mut self, label: &str, selected: bool) -> bool;
    fn end_combo(&mut self);
    /// Zero width or height means "fit the label"
    fn button(&mut self, label: &str, size: Vec2) -> bool;

    // === Queries ===
    fn is_item_hovered(&self) -> bool;
    fn is_any_item_hovered(&self) -> bool;
    fn get_id(&self, label: &str) -> WidgetId;

    // === Draw list ===
    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: ColorF);
    fn add_image(&mut self, texture: TextureId, min: Vec2, max: Vec2, uv_min: Vec2, uv_max: Vec2, tint: ColorF);
}
