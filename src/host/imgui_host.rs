//! Dear ImGui host
//!
//! [`ImguiHost`] owns an `imgui::Context` and maps each [`GuiHost`] primitive
//! onto the matching Dear ImGui call. The skin opens and closes windows,
//! combos and style stacks in separate calls, which the scoped token API of
//! `imgui::Ui` cannot express, so widget calls go through `imgui::sys`.
//! Context lifetime, fonts, style and input use the safe `imgui` API.
//!
//! Every sys call assumes the owned context is the current one. `imgui`
//! allows a single live context per process, so that always holds.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! let mut host = ImguiHost::new();
//! let font = host.add_font(Some(Path::new("assets/fonts/menu.ttf")), 64.0)?;
//!
//! // Register fonts before the renderer uploads the atlas
//! let renderer = GlRenderer::new(gl, host.context_mut())?;
//! ```

use super::types::{ColorF, FontId, Vec2, WidgetId};
use super::{input, GuiHost, Style, StyleColor, TextureId, WindowFlags};
use crate::error::UiError;
use imgui::{sys, FontConfig, FontSource};
use sdl2::event::Event;
use std::ffi::{c_char, CString};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Leading bytes of the font files the atlas can rasterize
const FONT_MAGICS: [[u8; 4]; 4] = [[0, 1, 0, 0], *b"OTTO", *b"true", *b"ttcf"];

/// Converts a label to a C string, dropping interior NULs
fn c_string(text: &str) -> CString {
    CString::new(text).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    })
}

/// Begin/end pointers of `text` for the ranged imgui text calls
fn text_range(text: &str) -> (*const c_char, *const c_char) {
    let range = text.as_bytes().as_ptr_range();
    (range.start.cast(), range.end.cast())
}

fn is_font_file(data: &[u8]) -> bool {
    data.len() >= 4 && FONT_MAGICS.iter().any(|magic| data[..4] == magic[..])
}

/// [`GuiHost`] backed by Dear ImGui
pub struct ImguiHost {
    context: imgui::Context,
    last_frame: Instant,
}

impl ImguiHost {
    /// Creates the imgui context with `.ini` and log files disabled
    ///
    /// # Panics
    ///
    /// If another `imgui::Context` is alive.
    pub fn new() -> Self {
        let mut context = imgui::Context::create();
        context.set_ini_filename(None);
        context.set_log_filename(None);
        context.set_platform_name(Some(format!("game_ui-sdl2 {}", env!("CARGO_PKG_VERSION"))));

        ImguiHost {
            context,
            last_frame: Instant::now(),
        }
    }

    /// The raw context, e.g. for initializing a renderer
    pub fn context_mut(&mut self) -> &mut imgui::Context {
        &mut self.context
    }

    /// Queues an SDL2 mouse event for the next frame
    pub fn handle_event(&mut self, event: &Event) -> bool {
        input::handle_event(self.context.io_mut(), event)
    }

    /// Ratio of drawable pixels to window coordinates, for high-DPI windows
    pub fn set_framebuffer_scale(&mut self, scale: [f32; 2]) {
        self.context.io_mut().display_framebuffer_scale = scale;
    }

    /// Draw data of the last finished frame, `None` before the first one ends
    pub fn draw_data(&self) -> Option<&imgui::DrawData> {
        unsafe { sys::igGetDrawData().cast::<imgui::DrawData>().as_ref() }
    }

    /// Number of fonts in the atlas
    pub fn font_count(&self) -> usize {
        unsafe {
            let atlas = (*sys::igGetIO()).Fonts;
            (*atlas).Fonts.Size.max(0) as usize
        }
    }

    /// Atlas font behind `font`, in registration order
    fn atlas_font(&self, font: FontId) -> Option<*mut sys::ImFont> {
        if font.0 >= self.font_count() {
            return None;
        }
        unsafe {
            let atlas = (*sys::igGetIO()).Fonts;
            Some(*(*atlas).Fonts.Data.add(font.0))
        }
    }

    /// Pixel size a font was registered with, before scaling
    #[cfg(test)]
    pub(crate) fn font_size(&self, font: FontId) -> Option<f32> {
        self.atlas_font(font).map(|raw| unsafe { (*raw).FontSize })
    }

    #[cfg(test)]
    pub(crate) fn font_scale(&self, font: FontId) -> Option<f32> {
        self.atlas_font(font).map(|raw| unsafe { (*raw).Scale })
    }

    fn check_font_size(size: f32) -> Result<(), UiError> {
        if size > 0.0 && size.is_finite() {
            Ok(())
        } else {
            Err(UiError::InvalidFontSize(size))
        }
    }

    fn read_font_file(path: &Path) -> Result<Vec<u8>, UiError> {
        let data = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => UiError::FontNotFound(path.to_path_buf()),
            _ => UiError::Io(e),
        })?;
        if !is_font_file(&data) {
            return Err(UiError::FontFormat(path.to_path_buf()));
        }
        Ok(data)
    }
}

impl Default for ImguiHost {
    fn default() -> Self {
        Self::new()
    }
}

impl GuiHost for ImguiHost {
    fn add_font(&mut self, path: Option<&Path>, size: f32) -> Result<FontId, UiError> {
        Self::check_font_size(size)?;
        let id = FontId(self.font_count());

        match path {
            Some(path) => {
                let data = Self::read_font_file(path)?;
                let name = path.file_name().map(|n| format!("{}, {}px", n.to_string_lossy(), size));
                self.context.fonts().add_font(&[FontSource::TtfData {
                    data: &data,
                    size_pixels: size,
                    config: Some(FontConfig {
                        name,
                        ..FontConfig::default()
                    }),
                }]);
                log::info!("Loaded font {} at {}px", path.display(), size);
            }
            None => {
                self.context.fonts().add_font(&[FontSource::DefaultFontData {
                    config: Some(FontConfig {
                        size_pixels: size,
                        ..FontConfig::default()
                    }),
                }]);
                log::debug!("Using the built-in imgui font at {}px", size);
            }
        }

        Ok(id)
    }

    fn set_font_scale(&mut self, font: FontId, scale: f32) {
        match self.atlas_font(font) {
            Some(raw) => unsafe { (*raw).Scale = scale },
            None => log::warn!("set_font_scale on unknown font {:?}", font),
        }
    }

    fn style(&self) -> &Style {
        self.context.style()
    }

    fn style_mut(&mut self) -> &mut Style {
        self.context.style_mut()
    }

    fn set_display_size(&mut self, size: Vec2) {
        self.context.io_mut().display_size = size.into();
    }

    fn new_frame(&mut self) {
        let now = Instant::now();
        self.context.io_mut().update_delta_time(now - self.last_frame);
        self.last_frame = now;

        // Without a renderer nobody else builds the atlas
        if !self.context.fonts().is_built() {
            self.context.fonts().build_rgba32_texture();
        }
        self.context.new_frame();
    }

    fn end_frame(&mut self) {
        self.context.render();
    }

    fn set_next_window_pos(&mut self, pos: Vec2) {
        unsafe { sys::igSetNextWindowPos(pos.into(), sys::ImGuiCond_Always as i32, sys::ImVec2::zero()) }
    }

    fn set_next_window_size(&mut self, size: Vec2) {
        unsafe { sys::igSetNextWindowSize(size.into(), sys::ImGuiCond_Always as i32) }
    }

    fn begin_window(&mut self, name: &str, flags: WindowFlags) -> bool {
        let name = c_string(name);
        unsafe { sys::igBegin(name.as_ptr(), std::ptr::null_mut(), flags.bits() as i32) }
    }

    fn end_window(&mut self) {
        unsafe { sys::igEnd() }
    }

    fn begin_child(&mut self, name: &str, size: Vec2) -> bool {
        let name = c_string(name);
        unsafe { sys::igBeginChild_Str(name.as_ptr(), size.into(), false, 0) }
    }

    fn end_child(&mut self) {
        unsafe { sys::igEndChild() }
    }

    fn window_pos(&self) -> Vec2 {
        let mut out = sys::ImVec2::zero();
        unsafe { sys::igGetWindowPos(&mut out) };
        out.into()
    }

    fn window_width(&self) -> f32 {
        unsafe { sys::igGetWindowWidth() }
    }

    fn push_font(&mut self, font: FontId) {
        // An unknown font still pushes so the matching pop stays balanced
        let raw = self.atlas_font(font).unwrap_or_else(|| {
            log::warn!("push_font on unknown font {:?}", font);
            unsafe { sys::igGetFont() }
        });
        unsafe { sys::igPushFont(raw) }
    }

    fn pop_font(&mut self) {
        unsafe { sys::igPopFont() }
    }

    fn push_style_color(&mut self, slot: StyleColor, color: ColorF) {
        unsafe { sys::igPushStyleColor_Vec4(slot as i32, color.into()) }
    }

    fn pop_style_color(&mut self) {
        unsafe { sys::igPopStyleColor(1) }
    }

    fn push_item_width(&mut self, width: f32) {
        unsafe { sys::igPushItemWidth(width) }
    }

    fn pop_item_width(&mut self) {
        unsafe { sys::igPopItemWidth() }
    }

    fn cursor_pos(&self) -> Vec2 {
        let mut out = sys::ImVec2::zero();
        unsafe { sys::igGetCursorPos(&mut out) };
        out.into()
    }

    fn set_cursor_pos_x(&mut self, x: f32) {
        unsafe { sys::igSetCursorPosX(x) }
    }

    fn set_cursor_pos_y(&mut self, y: f32) {
        unsafe { sys::igSetCursorPosY(y) }
    }

    fn cursor_screen_pos(&self) -> Vec2 {
        let mut out = sys::ImVec2::zero();
        unsafe { sys::igGetCursorScreenPos(&mut out) };
        out.into()
    }

    fn content_region_avail(&self) -> Vec2 {
        let mut out = sys::ImVec2::zero();
        unsafe { sys::igGetContentRegionAvail(&mut out) };
        out.into()
    }

    fn calc_text_size(&self, text: &str) -> Vec2 {
        let (start, end) = text_range(text);
        let mut out = sys::ImVec2::zero();
        unsafe { sys::igCalcTextSize(&mut out, start, end, true, -1.0) };
        out.into()
    }

    fn same_line(&mut self) {
        unsafe { sys::igSameLine(0.0, -1.0) }
    }

    fn text(&mut self, text: &str) {
        let (start, end) = text_range(text);
        unsafe { sys::igTextUnformatted(start, end) }
    }

    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        let label = c_string(label);
        unsafe { sys::igCheckbox(label.as_ptr(), value) }
    }

    fn slider_float(&mut self, label: &str, value: &mut f32, min: f32, max: f32, decimals: usize) -> bool {
        let label = c_string(label);
        let format = c_string(&format!("%.{}f", decimals));
        unsafe {
            sys::igSliderFloat(
                label.as_ptr(),
                value,
                min,
                max,
                format.as_ptr(),
                sys::ImGuiSliderFlags_AlwaysClamp as i32,
            )
        }
    }

    fn begin_combo(&mut self, label: &str, preview: &str) -> bool {
        let label = c_string(label);
        let preview = c_string(preview);
        unsafe { sys::igBeginCombo(label.as_ptr(), preview.as_ptr(), sys::ImGuiComboFlags_None as i32) }
    }

    fn selectable(&mut self, label: &str, selected: bool) -> bool {
        let label = c_string(label);
        unsafe {
            sys::igSelectable_Bool(
                label.as_ptr(),
                selected,
                sys::ImGuiSelectableFlags_None as i32,
                sys::ImVec2::zero(),
            )
        }
    }

    fn end_combo(&mut self) {
        unsafe { sys::igEndCombo() }
    }

    fn button(&mut self, label: &str, size: Vec2) -> bool {
        let label = c_string(label);
        unsafe { sys::igButton(label.as_ptr(), size.into()) }
    }

    fn is_item_hovered(&self) -> bool {
        unsafe { sys::igIsItemHovered(sys::ImGuiHoveredFlags_None as i32) }
    }

    fn is_any_item_hovered(&self) -> bool {
        unsafe { sys::igIsAnyItemHovered() }
    }

    fn get_id(&self, label: &str) -> WidgetId {
        let label = c_string(label);
        WidgetId(unsafe { sys::igGetID_Str(label.as_ptr()) })
    }

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: ColorF) {
        unsafe {
            let draw_list = sys::igGetWindowDrawList();
            let color = sys::igGetColorU32_Vec4(color.into());
            sys::ImDrawList_AddRectFilled(draw_list, min.into(), max.into(), color, 0.0, sys::ImDrawFlags_None as i32);
        }
    }

    fn add_image(&mut self, texture: TextureId, min: Vec2, max: Vec2, uv_min: Vec2, uv_max: Vec2, tint: ColorF) {
        unsafe {
            let draw_list = sys::igGetWindowDrawList();
            let tint = sys::igGetColorU32_Vec4(tint.into());
            sys::ImDrawList_AddImage(
                draw_list,
                texture.id() as sys::ImTextureID,
                min.into(),
                max.into(),
                uv_min.into(),
                uv_max.into(),
                tint,
            );
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    static IMGUI_LOCK: Mutex<()> = Mutex::new(());

    /// A fresh host; only one imgui context may exist at a time, so the
    /// guard must outlive it
    pub(crate) fn test_host() -> (MutexGuard<'static, ()>, ImguiHost) {
        let guard = IMGUI_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        (guard, ImguiHost::new())
    }

    /// The stock imgui style, for hosts that do not own a context
    pub(crate) fn default_style() -> Style {
        let (_guard, host) = test_host();
        *host.style()
    }

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("game_ui_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    pub(crate) fn item_rect() -> (Vec2, Vec2) {
        let mut min = sys::ImVec2::zero();
        let mut max = sys::ImVec2::zero();
        unsafe {
            sys::igGetItemRectMin(&mut min);
            sys::igGetItemRectMax(&mut max);
        }
        (min.into(), max.into())
    }

    pub(crate) fn center(rect: (Vec2, Vec2)) -> [f32; 2] {
        [(rect.0.x + rect.1.x) * 0.5, (rect.0.y + rect.1.y) * 0.5]
    }

    /// Runs one frame with a full-screen window around `build`
    fn frame<R>(host: &mut ImguiHost, build: impl FnOnce(&mut ImguiHost) -> R) -> R {
        host.set_display_size(Vec2::new(1280.0, 720.0));
        host.new_frame();
        host.set_next_window_pos(Vec2::ZERO);
        host.set_next_window_size(Vec2::new(1280.0, 720.0));
        host.begin_window("##test", WindowFlags::NO_TITLE_BAR | WindowFlags::NO_MOVE);
        let result = build(host);
        host.end_window();
        host.end_frame();
        result
    }

    #[test]
    fn test_builtin_fonts_registered_in_order() {
        let (_guard, mut host) = test_host();
        let title = host.add_font(None, 96.0).unwrap();
        let item = host.add_font(None, 64.0).unwrap();

        assert_eq!((title, item), (FontId(0), FontId(1)));
        assert_eq!(host.font_count(), 2);

        // Metrics are filled in when the atlas is built
        host.context_mut().fonts().build_rgba32_texture();
        assert_eq!(host.font_size(title), Some(96.0));
        assert_eq!(host.font_size(item), Some(64.0));
    }

    #[test]
    fn test_bad_font_size_rejected() {
        let (_guard, mut host) = test_host();
        assert!(matches!(host.add_font(None, 0.0), Err(UiError::InvalidFontSize(_))));
        assert!(matches!(host.add_font(None, f32::NAN), Err(UiError::InvalidFontSize(_))));
        assert_eq!(host.font_count(), 0);
    }

    #[test]
    fn test_missing_font_file() {
        let (_guard, mut host) = test_host();
        let result = host.add_font(Some(Path::new("/definitely/not/here/menu.ttf")), 64.0);
        assert!(matches!(result, Err(UiError::FontNotFound(p)) if p.ends_with("menu.ttf")));
        assert_eq!(host.font_count(), 0);
    }

    #[test]
    fn test_font_file_is_read_and_checked() {
        let (_guard, mut host) = test_host();
        let path = temp_file("not_a_font.ttf", b"GIF89a not a font");
        let result = host.add_font(Some(&path), 64.0);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(UiError::FontFormat(p)) if p == path));
        assert!(is_font_file(b"OTTO\0\0"));
        assert!(is_font_file(&[0, 1, 0, 0, 0, 12]));
        assert!(!is_font_file(b"tru"));
    }

    #[test]
    fn test_font_scale_written_to_atlas_font() {
        let (_guard, mut host) = test_host();
        let font = host.add_font(None, 48.0).unwrap();
        host.set_font_scale(font, 0.25);
        assert_eq!(host.font_scale(font), Some(0.25));

        // Unknown handles are ignored
        host.set_font_scale(FontId(9), 2.0);
        assert_eq!(host.font_scale(FontId(9)), None);
    }

    #[test]
    fn test_labels_with_nul_are_cleaned() {
        assert_eq!(c_string("PLAY\0##x").as_bytes(), b"PLAY##x");
        assert_eq!(c_string("").as_bytes(), b"");
    }

    #[test]
    fn test_frame_produces_draw_data() {
        let (_guard, mut host) = test_host();
        host.add_font(None, 32.0).unwrap();
        assert!(host.draw_data().is_none());

        frame(&mut host, |host| {
            host.add_rect_filled(Vec2::new(10.0, 10.0), Vec2::new(50.0, 50.0), ColorF::WHITE);
            host.add_image(
                TextureId::new(5),
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::ZERO,
                Vec2::new(1.0, 1.0),
                ColorF::WHITE,
            );
            host.text("HELLO");
        });

        let data = host.draw_data().unwrap();
        assert!(data.total_vtx_count > 0);
        let textures: Vec<TextureId> = data
            .draw_lists()
            .flat_map(|list| list.commands())
            .filter_map(|cmd| match cmd {
                imgui::DrawCmd::Elements { cmd_params, .. } => Some(cmd_params.texture_id),
                _ => None,
            })
            .collect();
        assert!(textures.contains(&TextureId::new(5)));
    }

    #[test]
    fn test_text_size_follows_font_scale() {
        let (_guard, mut host) = test_host();
        let font = host.add_font(None, 32.0).unwrap();

        host.set_font_scale(font, 1.0);
        let full = frame(&mut host, |host| host.calc_text_size("OPTIONS"));
        host.set_font_scale(font, 0.5);
        let half = frame(&mut host, |host| host.calc_text_size("OPTIONS"));

        assert!(full.x > 0.0);
        assert!((half.y - full.y * 0.5).abs() < 1.0);
    }

    #[test]
    fn test_sdl_events_reach_imgui() {
        let (_guard, mut host) = test_host();
        assert!(host.handle_event(&Event::MouseButtonDown {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mouse_btn: sdl2::mouse::MouseButton::Left,
            clicks: 1,
            x: 12,
            y: 34,
        }));
        assert!(!host.handle_event(&Event::Quit { timestamp: 0 }));

        frame(&mut host, |host| {
            let io = host.context_mut().io();
            assert_eq!(io.mouse_pos, [12.0, 34.0]);
            assert!(io.mouse_down[0]);
        });
    }

    #[test]
    fn test_button_click_takes_press_and_release() {
        let (_guard, mut host) = test_host();
        let click = |host: &mut ImguiHost| {
            frame(host, |host| {
                let pressed = host.button("PLAY", Vec2::new(200.0, 0.0));
                (pressed, host.is_item_hovered(), item_rect())
            })
        };

        let (_, _, rect) = click(&mut host);
        host.context_mut().io_mut().add_mouse_pos_event(center(rect));
        let (pressed, hovered, _) = click(&mut host);
        assert!(!pressed && hovered);

        host.context_mut().io_mut().add_mouse_button_event(imgui::MouseButton::Left, true);
        assert!(!click(&mut host).0);
        host.context_mut().io_mut().add_mouse_button_event(imgui::MouseButton::Left, false);
        assert!(click(&mut host).0);
    }

    #[test]
    fn test_combo_near_bottom_opens_upward() {
        let (_guard, mut host) = test_host();
        let options = ["LOW", "MEDIUM", "HIGH", "ULTRA", "EXTREME", "INSANE"];
        let combo = |host: &mut ImguiHost| {
            frame(host, |host| {
                host.set_cursor_pos_y(690.0);
                let open = host.begin_combo("##quality", "LOW");
                let combo_rect = item_rect();
                let mut popup_pos = None;
                if open {
                    popup_pos = Some(host.window_pos());
                    for (i, option) in options.iter().enumerate() {
                        host.selectable(option, i == 0);
                    }
                    host.end_combo();
                }
                (combo_rect, popup_pos)
            })
        };

        let (rect, popup) = combo(&mut host);
        assert!(popup.is_none());
        host.context_mut().io_mut().add_mouse_pos_event(center(rect));
        combo(&mut host);
        host.context_mut().io_mut().add_mouse_button_event(imgui::MouseButton::Left, true);
        combo(&mut host);
        host.context_mut().io_mut().add_mouse_button_event(imgui::MouseButton::Left, false);

        // The popup sizes itself over its first frames, then settles
        let mut last = None;
        for _ in 0..4 {
            last = combo(&mut host).1;
        }
        let popup = last.expect("combo should be open");
        assert!(popup.y < rect.0.y, "popup at {:?}, combo at {:?}", popup, rect);
    }
}
