//! OpenGL Renderer
//!
//! Draws imgui's [`DrawData`] into the current OpenGL context through
//! `imgui-glow-renderer`, and owns the textures the skin draws as backdrops.
//! The font atlas is uploaded when the renderer is created, so every font
//! must be registered with the host first.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! let gl = unsafe { glow::Context::from_loader_function(|s| video.gl_get_proc_address(s) as _) };
//! let mut renderer = GlRenderer::new(gl, ui.host_mut().context_mut())?;
//! let backdrop = renderer.load_texture("assets/textures/menu_backdrop.png")?;
//!
//! // Every frame, after GameUi::end()
//! renderer.clear(clear_color, window.drawable_size());
//! if let Some(draw_data) = ui.host().draw_data() {
//!     renderer.render(draw_data)?;
//! }
//! window.gl_swap_window();
//! ```

use crate::host::{ColorF, TextureId};
use imgui::DrawData;
use glow::HasContext;
use imgui_glow_renderer::{Renderer, SimpleTextureMap, TextureMap};
use sdl2::image::LoadSurface;
use sdl2::pixels::PixelFormatEnum;
use sdl2::surface::Surface;
use std::path::Path;

pub use imgui_glow_renderer::glow;

type GlTexture = <glow::Context as HasContext>::Texture;

/// Copies `height` rows of `width` RGBA pixels out of a buffer with row stride `pitch`
fn pack_rows(pixels: &[u8], width: usize, height: usize, pitch: usize) -> Option<Vec<u8>> {
    let row = width * 4;
    if pitch < row || (height > 0 && pixels.len() < pitch * (height - 1) + row) {
        return None;
    }
    let mut packed = Vec::with_capacity(row * height);
    for y in 0..height {
        packed.extend_from_slice(&pixels[y * pitch..y * pitch + row]);
    }
    Some(packed)
}

/// imgui renderer plus the textures it can sample
pub struct GlRenderer {
    gl: glow::Context,
    renderer: Renderer,
    texture_map: SimpleTextureMap,
    textures: Vec<GlTexture>,
}

impl GlRenderer {
    /// Compiles the shaders and uploads `context`'s font atlas
    pub fn new(gl: glow::Context, context: &mut imgui::Context) -> Result<Self, String> {
        let mut texture_map = SimpleTextureMap::default();
        let renderer = Renderer::initialize(&gl, context, &mut texture_map, true)
            .map_err(|e| format!("Could not initialize imgui renderer: {:?}", e))?;
        log::info!("imgui renderer ready");

        Ok(GlRenderer {
            gl,
            renderer,
            texture_map,
            textures: Vec::new(),
        })
    }

    /// Loads an image file into a texture the skin can draw
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<TextureId, String> {
        let path = path.as_ref();
        let surface = Surface::from_file(path)?.convert_format(PixelFormatEnum::RGBA32)?;
        let (width, height) = (surface.width(), surface.height());
        let pitch = surface.pitch() as usize;

        let pixels = surface
            .with_lock(|pixels| pack_rows(pixels, width as usize, height as usize, pitch))
            .ok_or_else(|| format!("Unexpected pixel layout in {}", path.display()))?;

        let id = self.upload_rgba(width, height, &pixels)?;
        log::debug!("Loaded texture {} ({}x{}) as {:?}", path.display(), width, height, id);
        Ok(id)
    }

    /// Uploads tightly packed RGBA8 pixels
    fn upload_rgba(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<TextureId, String> {
        let texture = unsafe {
            let texture = self.gl.create_texture()?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            texture
        };
        self.textures.push(texture);

        self.texture_map
            .register(texture)
            .ok_or_else(|| "Texture could not be registered with the renderer".to_string())
    }

    /// Clears the framebuffer and sets the viewport to `size` pixels
    pub fn clear(&self, color: ColorF, size: (u32, u32)) {
        unsafe {
            self.gl.viewport(0, 0, size.0 as i32, size.1 as i32);
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    pub fn render(&mut self, draw_data: &DrawData) -> Result<(), String> {
        self.renderer
            .render(&self.gl, &self.texture_map, draw_data)
            .map_err(|e| format!("imgui render failed: {:?}", e))
    }
}

impl Drop for GlRenderer {
    fn drop(&mut self) {
        for texture in self.textures.drain(..) {
            unsafe { self.gl.delete_texture(texture) };
        }
        self.renderer.destroy(&self.gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rows_drops_padding() {
        // 2x2 image, rows padded to 12 bytes
        let mut pixels = vec![0u8; 24];
        pixels[..8].copy_from_slice(&[1, 1, 1, 1, 2, 2, 2, 2]);
        pixels[12..20].copy_from_slice(&[3, 3, 3, 3, 4, 4, 4, 4]);

        let packed = pack_rows(&pixels, 2, 2, 12).unwrap();
        assert_eq!(packed, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn test_pack_rows_allows_short_last_row() {
        let pixels = vec![7u8; 12 + 8];
        assert_eq!(pack_rows(&pixels, 2, 2, 12).map(|p| p.len()), Some(16));
    }

    #[test]
    fn test_pack_rows_rejects_bad_layout() {
        assert!(pack_rows(&[0u8; 16], 2, 2, 4).is_none());
        assert!(pack_rows(&[0u8; 10], 2, 2, 8).is_none());
        assert_eq!(pack_rows(&[], 0, 0, 0), Some(Vec::new()));
    }
}
