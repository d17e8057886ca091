//! Game Menu Skin
//!
//! [`GameUi`] turns a plain immediate-mode host into a console-style game
//! menu: one centered backdrop window laid out on a fixed 1920x1080 virtual
//! canvas, a colored title bar, large widgets with the label on the left and
//! the control on the right, and sound effects on interaction.
//!
//! # Coordinate spaces
//!
//! Layout constants are written in virtual units. `screen_y` maps the virtual
//! height onto the real screen height; `screen_x` does the same for width and
//! then corrects for aspect ratio, so the menu keeps its 16:9 proportions on
//! any screen shape.
//!
//! # Example Usage
//!
//! ```ignore
//! let mut ui = GameUi::init(ImguiHost::new(), &Config::default())?;
//! ui.set_sound_player(Some(Box::new(|sound| mixer.play(sound))));
//!
//! // Every frame
//! ui.begin(width, height, Some(backdrop));
//! ui.draw_title_bar("OPTIONS");
//! ui.begin_items(ItemFlags::NONE);
//! ui.check_box("FULLSCREEN", &mut settings.fullscreen);
//! ui.slider("VOLUME", &mut settings.volume);
//! if ui.button("BACK") { menu = Menu::Main; }
//! ui.end_items();
//! ui.end();
//! ```

pub mod theme;

use crate::config::{Config, StyleConfig};
use crate::error::UiError;
use crate::host::{ColorF, FontId, GuiHost, StyleColor, TextureId, Vec2, WidgetId, WindowFlags};
use crate::sound::{Sound, SoundPlayer};
use std::ops::{BitOr, BitOrAssign};

/// Width of the virtual canvas
pub const UNITS_X: f32 = 1920.0;

/// Height of the virtual canvas
pub const UNITS_Y: f32 = 1080.0;

/// Virtual-unit margin between the menu edge and item labels
const LABEL_INDENT: i32 = 20;

/// Options for a group of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags(u32);

impl ItemFlags {
    pub const NONE: ItemFlags = ItemFlags(0);
    /// Use the small font
    pub const SMALL_ITEMS: ItemFlags = ItemFlags(1 << 0);
    /// Put the items in a scrollable region below the title bar
    pub const SCROLL_WINDOW: ItemFlags = ItemFlags(1 << 1);

    pub const fn contains(self, other: ItemFlags) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl BitOr for ItemFlags {
    type Output = ItemFlags;

    fn bitor(self, rhs: ItemFlags) -> ItemFlags {
        ItemFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ItemFlags {
    fn bitor_assign(&mut self, rhs: ItemFlags) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontSlot {
    Title = 0,
    Item = 1,
    ItemSmall = 2,
}

/// The game menu skin, owning its host
pub struct GameUi<H: GuiHost> {
    host: H,
    fonts: [FontId; 3],
    style: StyleConfig,
    sound_player: Option<Box<dyn SoundPlayer>>,

    aspect_correction: f32,
    screen_width: f32,
    screen_height: f32,
    current_flags: ItemFlags,

    current_hovered_id: Option<WidgetId>,
    current_menu_id: Option<WidgetId>,
    new_menu_this_frame: bool,
}

impl<H: GuiHost> GameUi<H> {
    /// Registers the three fonts with `host` and binds the style
    pub fn init(mut host: H, config: &Config) -> Result<Self, UiError> {
        let title = host.add_font(config.title_font.path.as_deref(), config.title_font.size)?;
        let item = host.add_font(config.item_font.path.as_deref(), config.item_font.size)?;
        let item_small = host.add_font(config.small_item_font.path.as_deref(), config.small_item_font.size)?;
        log::info!(
            "Game UI ready: menu {}x{}, fonts {}/{}/{}px",
            config.style.menu_width,
            config.style.menu_height,
            config.title_font.size,
            config.item_font.size,
            config.small_item_font.size
        );

        Ok(GameUi {
            host,
            fonts: [title, item, item_small],
            style: config.style.clone(),
            sound_player: None,
            aspect_correction: 1.0,
            screen_width: 0.0,
            screen_height: 0.0,
            current_flags: ItemFlags::NONE,
            current_hovered_id: None,
            current_menu_id: None,
            new_menu_this_frame: false,
        })
    }

    pub fn set_sound_player(&mut self, player: Option<Box<dyn SoundPlayer>>) {
        self.sound_player = player;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn style_config(&self) -> &StyleConfig {
        &self.style
    }

    pub fn aspect_correction(&self) -> f32 {
        self.aspect_correction
    }

    /// True on the frame a new title was first drawn
    pub fn is_new_menu_this_frame(&self) -> bool {
        self.new_menu_this_frame
    }

    /// Virtual x units to screen pixels, aspect corrected
    pub fn screen_x(&self, x: i32) -> f32 {
        self.aspect_correction * self.screen_width * (x as f32 / UNITS_X)
    }

    /// Virtual y units to screen pixels
    pub fn screen_y(&self, y: i32) -> f32 {
        self.screen_height * (y as f32 / UNITS_Y)
    }

    pub fn screen_xy(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(self.screen_x(x), self.screen_y(y))
    }

    fn font(&self, slot: FontSlot) -> FontId {
        self.fonts[slot as usize]
    }

    fn play_sound(&mut self, sound: Sound) {
        if let Some(player) = self.sound_player.as_mut() {
            player.play(sound);
        }
    }

    fn apply_style(&mut self, scale: f32) {
        theme::apply_game_ui_style(self.host.style_mut(), &self.style, scale);
        for font in self.fonts {
            self.host.set_font_scale(font, scale * theme::FONT_SCALE);
        }
    }

    /// Starts a frame and draws the menu backdrop
    ///
    /// Zero dimensions (a minimized window) are treated as one pixel.
    pub fn begin(&mut self, screen_width: u32, screen_height: u32, texture: Option<TextureId>) {
        self.screen_width = screen_width.max(1) as f32;
        self.screen_height = screen_height.max(1) as f32;
        self.aspect_correction = (UNITS_X / UNITS_Y) / (self.screen_width / self.screen_height);
        let scale = self.screen_height / UNITS_Y;

        self.new_menu_this_frame = false;

        self.apply_style(scale);

        self.host.set_display_size(Vec2::new(self.screen_width, self.screen_height));
        self.host.new_frame();

        let window_flags = WindowFlags::NO_TITLE_BAR
            | WindowFlags::NO_COLLAPSE
            | WindowFlags::NO_RESIZE
            | WindowFlags::NO_MOVE
            | WindowFlags::NO_SCROLLBAR
            | WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS
            | WindowFlags::NO_NAV_FOCUS;

        let pos = Vec2::new(
            0.5 * (self.screen_width - self.screen_x(self.style.menu_width)),
            0.5 * (self.screen_height - self.screen_y(self.style.menu_height)),
        );
        let window_size = self.screen_xy(self.style.menu_width, self.style.menu_height);

        self.host.set_next_window_pos(pos);
        self.host.set_next_window_size(window_size);
        self.host.begin_window("##main_window", window_flags);

        if let Some(texture) = texture {
            if self.style.colour_textured_window.a > 0.0 {
                let min = self.host.cursor_screen_pos();
                self.host.add_image(
                    texture,
                    min,
                    min + window_size,
                    Vec2::ZERO,
                    Vec2::new(1.0, 1.0),
                    self.style.colour_textured_window,
                );
            }
        }
    }

    /// Finishes the frame; the host's draw output is ready afterwards
    pub fn end(&mut self) {
        if !self.host.is_any_item_hovered() {
            self.current_hovered_id = None;
        }

        self.host.end_window();
        self.host.end_frame();
    }

    /// Starts a group of items below the title bar
    pub fn begin_items(&mut self, flags: ItemFlags) {
        self.current_flags = flags;
        let font = if flags.contains(ItemFlags::SMALL_ITEMS) {
            self.font(FontSlot::ItemSmall)
        } else {
            self.font(FontSlot::Item)
        };
        self.host.push_font(font);

        if flags.contains(ItemFlags::SCROLL_WINDOW) {
            let x = self.screen_x(LABEL_INDENT);
            let size = self.screen_xy(self.style.menu_width - 40, self.style.menu_height - 240);
            self.host.set_cursor_pos_x(x);
            self.host.push_style_color(StyleColor::ChildBg, ColorF::new(0.0, 0.0, 0.0, 0.1));
            self.host.begin_child("##ContentRegion", size);
        }
    }

    pub fn end_items(&mut self) {
        if self.current_flags.contains(ItemFlags::SCROLL_WINDOW) {
            self.host.end_child();
            self.host.pop_style_color();
        }
        self.host.pop_font();
        self.current_flags = ItemFlags::NONE;
    }

    /// Label on the left, checkbox near the right edge
    pub fn check_box(&mut self, name: &str, value: &mut bool) -> bool {
        let item_name = format!("##{}", name);
        let content_region_width = self.host.content_region_avail().x;

        let x = self.screen_x(LABEL_INDENT);
        self.host.set_cursor_pos_x(x);
        self.host.text(name);
        self.host.same_line();

        let x = content_region_width - self.screen_x(140);
        self.host.set_cursor_pos_x(x);
        let changed = self.host.checkbox(&item_name, value);
        if changed {
            self.play_sound(Sound::CheckboxTicked);
        }
        changed
    }

    /// Label on the left, 0..1 slider from a third of the menu width
    pub fn slider(&mut self, name: &str, value: &mut f32) -> bool {
        let item_name = format!("##{}", name);

        let x = self.screen_x(LABEL_INDENT);
        self.host.set_cursor_pos_x(x);
        self.host.text(name);
        self.host.same_line();

        let x = self.screen_x((self.style.menu_width as f32 / 3.0) as i32);
        self.host.set_cursor_pos_x(x);
        let changed = self.host.slider_float(&item_name, value, 0.0, 1.0, 1);
        if changed {
            self.play_sound(Sound::SliderChanged);
        }
        changed
    }

    /// Label on the left, drop-down near the right edge
    ///
    /// # Panics
    ///
    /// If `index` is not a valid index into `options`.
    pub fn combo_box(&mut self, name: &str, options: &[&str], index: &mut usize) -> bool {
        let item_name = format!("##{}", name);
        let content_region_width = self.host.content_region_avail().x;

        let x = self.screen_x(LABEL_INDENT);
        self.host.set_cursor_pos_x(x);
        self.host.text(name);
        self.host.same_line();

        let x = content_region_width - self.screen_x(520);
        let width = self.screen_x(500);
        self.host.set_cursor_pos_x(x);
        self.host.push_item_width(width);
        assert!(
            *index < options.len(),
            "combo box '{}' index {} out of range ({} options)",
            name,
            index,
            options.len()
        );

        let mut changed = false;
        if self.host.begin_combo(&item_name, options[*index]) {
            for (i, option) in options.iter().enumerate() {
                if self.host.selectable(option, i == *index) {
                    *index = i;
                    changed = true;
                }
            }
            self.host.end_combo();
        }
        self.host.pop_item_width();

        if changed {
            self.play_sound(Sound::ComboboxSelected);
        }
        changed
    }

    /// Draws the title bar and tracks menu changes by title
    pub fn draw_title_bar(&mut self, text: &str) {
        let frame_padding = self.host.style().frame_padding[1];

        self.host.push_font(self.font(FontSlot::Title));

        let text_size = self.host.calc_text_size(text);
        let item_size = Vec2::new(
            self.screen_x(self.style.menu_width),
            text_size.y + frame_padding * 2.0,
        );

        let pos = self.host.window_pos();
        if self.style.colour_title_bar.a > 0.0 {
            self.host.add_rect_filled(pos, pos + item_size, self.style.colour_title_bar);
        }

        let x = (self.host.window_width() - text_size.x) / 2.0;
        self.host.set_cursor_pos_x(x);
        let y = self.host.cursor_pos().y + frame_padding;
        self.host.set_cursor_pos_y(y);
        self.host.text(text);

        let id = self.host.get_id(text);
        if self.current_menu_id != Some(id) {
            log::debug!("Entered menu '{}'", text);
            self.current_menu_id = Some(id);
            self.new_menu_this_frame = true;
        }

        self.host.pop_font();

        let y = self.host.cursor_pos().y + frame_padding;
        self.host.set_cursor_pos_y(y);
    }

    /// Full-width centered button
    pub fn button(&mut self, label: &str) -> bool {
        let avail = self.host.content_region_avail().x;
        let item_width = self.screen_x(self.style.menu_width - 100);

        let offset = (avail - item_width) * 0.5;
        if offset > 0.0 {
            let x = self.host.cursor_pos().x + offset;
            self.host.set_cursor_pos_x(x);
        }

        let pressed = self.host.button(label, Vec2::new(item_width, 0.0));
        if pressed {
            self.play_sound(Sound::ButtonClicked);
        }

        let id = self.host.get_id(label);
        if self.host.is_item_hovered() && self.current_hovered_id != Some(id) {
            self.current_hovered_id = Some(id);
            if !pressed && !self.new_menu_this_frame {
                self.play_sound(Sound::ItemEntered);
            }
        }

        pressed
    }
}
