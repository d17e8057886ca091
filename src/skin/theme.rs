//! Game menu theme
//!
//! Writes the full size table and palette into the imgui style. The base sizes
//! are authored for a tiny canvas and blown up by `scale * 5`, so the table is
//! rewritten from scratch every frame rather than scaled in place.

use crate::config::StyleConfig;
use crate::host::{ColorF, Style, StyleColor};
use imgui::Direction;

/// Size multiplier on top of the resolution scale
pub const SIZE_SCALE: f32 = 5.0;

/// Font scale on top of the resolution scale
pub const FONT_SCALE: f32 = 0.5;

const ORANGE: ColorF = ColorF::new(1.0, 0.388_235_3, 0.0, 1.0);

/// Fixed palette; text and window colors come from the config instead
const PALETTE: &[(StyleColor, ColorF)] = &[
    (StyleColor::ChildBg, ColorF::grey(0.278_431_4, 1.0)),
    (StyleColor::PopupBg, ColorF::grey(0.309_803_9, 1.0)),
    (StyleColor::Border, ColorF::grey(0.262_745_1, 1.0)),
    (StyleColor::BorderShadow, ColorF::TRANSPARENT),
    (StyleColor::FrameBg, ColorF::grey(0.156_862_8, 1.0)),
    (StyleColor::FrameBgHovered, ColorF::grey(0.2, 1.0)),
    (StyleColor::FrameBgActive, ColorF::grey(0.278_431_4, 1.0)),
    (StyleColor::TitleBg, ColorF::grey(0.145_098_0, 1.0)),
    (StyleColor::TitleBgActive, ColorF::grey(0.145_098_0, 1.0)),
    (StyleColor::TitleBgCollapsed, ColorF::grey(0.145_098_0, 1.0)),
    (StyleColor::MenuBarBg, ColorF::grey(0.192_156_9, 1.0)),
    (StyleColor::ScrollbarBg, ColorF::grey(0.156_862_8, 1.0)),
    (StyleColor::ScrollbarGrab, ColorF::grey(0.274_509_8, 1.0)),
    (StyleColor::ScrollbarGrabHovered, ColorF::grey(0.298_039_2, 1.0)),
    (StyleColor::ScrollbarGrabActive, ORANGE),
    (StyleColor::CheckMark, ColorF::WHITE),
    (StyleColor::SliderGrab, ColorF::grey(0.388_235_3, 1.0)),
    (StyleColor::SliderGrabActive, ORANGE),
    (StyleColor::Button, ColorF::new(1.0, 1.0, 1.0, 0.0)),
    (StyleColor::ButtonHovered, ColorF::new(1.0, 1.0, 1.0, 0.156)),
    (StyleColor::ButtonActive, ColorF::new(1.0, 1.0, 1.0, 0.391)),
    (StyleColor::Header, ColorF::grey(0.309_803_9, 1.0)),
    (StyleColor::HeaderHovered, ColorF::grey(0.466_666_7, 1.0)),
    (StyleColor::HeaderActive, ColorF::grey(0.466_666_7, 1.0)),
    (StyleColor::Separator, ColorF::grey(0.262_745_1, 1.0)),
    (StyleColor::SeparatorHovered, ColorF::grey(0.388_235_3, 1.0)),
    (StyleColor::SeparatorActive, ORANGE),
    (StyleColor::ResizeGrip, ColorF::new(1.0, 1.0, 1.0, 0.25)),
    (StyleColor::ResizeGripHovered, ColorF::new(1.0, 1.0, 1.0, 0.67)),
    (StyleColor::ResizeGripActive, ORANGE),
    (StyleColor::Tab, ColorF::grey(0.094_117_6, 1.0)),
    (StyleColor::TabHovered, ColorF::grey(0.349_019_6, 1.0)),
    (StyleColor::TabActive, ColorF::grey(0.192_156_9, 1.0)),
    (StyleColor::TabUnfocused, ColorF::grey(0.094_117_6, 1.0)),
    (StyleColor::TabUnfocusedActive, ColorF::grey(0.192_156_9, 1.0)),
    (StyleColor::PlotLines, ColorF::grey(0.466_666_7, 1.0)),
    (StyleColor::PlotLinesHovered, ORANGE),
    (StyleColor::PlotHistogram, ColorF::grey(0.584_313_8, 1.0)),
    (StyleColor::PlotHistogramHovered, ORANGE),
    (StyleColor::TableHeaderBg, ColorF::new(0.188_235_3, 0.188_235_3, 0.2, 1.0)),
    (StyleColor::TableBorderStrong, ColorF::new(0.309_803_9, 0.309_803_9, 0.349_019_6, 1.0)),
    (StyleColor::TableBorderLight, ColorF::new(0.227_451, 0.227_451, 0.247_058_8, 1.0)),
    (StyleColor::TableRowBg, ColorF::TRANSPARENT),
    (StyleColor::TableRowBgAlt, ColorF::new(1.0, 1.0, 1.0, 0.06)),
    (StyleColor::TextSelectedBg, ColorF::new(1.0, 1.0, 1.0, 0.156)),
    (StyleColor::DragDropTarget, ORANGE),
    (StyleColor::NavHighlight, ORANGE),
    (StyleColor::NavWindowingHighlight, ORANGE),
    (StyleColor::NavWindowingDimBg, ColorF::new(0.0, 0.0, 0.0, 0.586)),
    (StyleColor::ModalWindowDimBg, ColorF::new(0.0, 0.0, 0.0, 0.586)),
];

/// Rewrites `style` with the menu theme for the given resolution scale
pub fn apply_game_ui_style(style: &mut Style, config: &StyleConfig, scale: f32) {
    style.alpha = 1.0;
    style.disabled_alpha = 0.6;
    style.window_padding = [0.0, 0.0];
    style.window_rounding = 0.0;
    style.window_border_size = 0.0;
    style.window_min_size = [32.0, 32.0];
    style.window_title_align = [0.0, 0.0];
    style.window_menu_button_position = Direction::Right;
    style.child_rounding = 0.0;
    style.child_border_size = 0.0;
    style.popup_rounding = 0.0;
    style.popup_border_size = 0.0;
    style.frame_padding = [4.0, 4.0];
    style.frame_rounding = 0.0;
    style.frame_border_size = 0.0;
    style.item_spacing = [8.0, 4.0];
    style.item_inner_spacing = [4.0, 4.0];
    style.cell_padding = [4.0, 2.0];
    style.touch_extra_padding = [0.0, 0.0];
    style.indent_spacing = 21.0;
    style.columns_min_spacing = 6.0;
    style.scrollbar_size = 10.0;
    style.scrollbar_rounding = 1.0;
    style.grab_min_size = 7.0;
    style.grab_rounding = 0.0;
    style.log_slider_deadzone = 4.0;
    style.tab_rounding = 0.0;
    style.tab_border_size = 1.0;
    style.tab_min_width_for_close_button = 0.0;
    style.color_button_position = Direction::Right;
    style.button_text_align = [0.5, 0.5];
    style.selectable_text_align = [0.0, 0.0];
    style.display_window_padding = [19.0, 19.0];
    style.display_safe_area_padding = [3.0, 3.0];
    style.mouse_cursor_scale = 1.0;

    style[StyleColor::Text] = config.colour_text.into();
    style[StyleColor::TextDisabled] = config.colour_disabled_text.into();
    style[StyleColor::WindowBg] = config.colour_untextured_window.into();
    for &(slot, color) in PALETTE {
        style[slot] = color.into();
    }

    style.scale_all_sizes(scale * SIZE_SCALE);

    // imgui rejects windows narrower than a pixel, which tiny screens round to
    style.window_min_size = [style.window_min_size[0].max(1.0), style.window_min_size[1].max(1.0)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::imgui_host::tests::default_style;

    #[test]
    fn test_every_color_slot_is_themed() {
        // Three slots come from the config, the rest from the palette
        assert_eq!(PALETTE.len() + 3, StyleColor::COUNT);
        for slot in StyleColor::VARIANTS {
            let from_palette = PALETTE.iter().filter(|(s, _)| *s == slot).count();
            let from_config = [StyleColor::Text, StyleColor::TextDisabled, StyleColor::WindowBg].contains(&slot);
            assert_eq!(from_palette + from_config as usize, 1, "{:?}", slot);
        }
    }

    #[test]
    fn test_config_colors_applied() {
        let mut style = default_style();
        let config = StyleConfig {
            colour_text: ColorF::new(0.9, 0.8, 0.7, 1.0),
            ..Default::default()
        };
        apply_game_ui_style(&mut style, &config, 1.0);

        assert_eq!(style[StyleColor::Text], [0.9, 0.8, 0.7, 1.0]);
        assert_eq!(ColorF::from(style[StyleColor::WindowBg]), config.colour_untextured_window);
        assert_eq!(ColorF::from(style[StyleColor::SliderGrabActive]), ORANGE);
    }

    #[test]
    fn test_sizes_scaled_for_1080p() {
        let mut style = default_style();
        apply_game_ui_style(&mut style, &StyleConfig::default(), 1.0);
        assert_eq!(style.frame_padding, [20.0, 20.0]);
        assert_eq!(style.item_spacing, [40.0, 20.0]);
        assert_eq!(style.window_padding, [0.0, 0.0]);
        assert_eq!(style.window_min_size, [160.0, 160.0]);
    }

    #[test]
    fn test_repeated_application_does_not_accumulate() {
        let mut style = default_style();
        let config = StyleConfig::default();
        apply_game_ui_style(&mut style, &config, 0.5);
        let first = style;
        apply_game_ui_style(&mut style, &config, 0.5);
        assert_eq!(style.frame_padding, first.frame_padding);
        assert_eq!(style.scrollbar_size, first.scrollbar_size);
        assert_eq!(style.colors, first.colors);
        assert_eq!(style.frame_padding, [10.0, 10.0]);
    }

    #[test]
    fn test_tiny_screen_keeps_one_pixel_windows() {
        let mut style = default_style();
        apply_game_ui_style(&mut style, &StyleConfig::default(), 1.0 / 1080.0);
        assert_eq!(style.window_min_size, [1.0, 1.0]);
    }
}
