//! softbuffer surface rendering
//!
//! Owns the window surface and the code font and paints the code area into
//! the surface buffer through the render pipeline.

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::Result;
use softbuffer::{Context, Surface};
use winit::window::Window;

use codearea::commands::Damage;
use codearea::model::CodeArea;
use codearea::theme::ColorProfile;
use codearea::view::frame::{CodeFont, Frame, FramePainter};
use codearea::view::CodeAreaPainter;

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    font: CodeFont,
    painter: CodeAreaPainter,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &Context<Rc<Window>>,
        font: CodeFont,
        colors: ColorProfile,
    ) -> Result<Self> {
        let (width, height) = {
            let size = window.inner_size();
            (size.width, size.height)
        };

        let surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        Ok(Self {
            surface,
            font,
            painter: CodeAreaPainter::new(colors),
            width,
            height,
        })
    }

    pub fn font(&self) -> &CodeFont {
        &self.font
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Paint `damage` of `area`; everything when the buffer lost its content
    pub fn render(&mut self, area: &CodeArea, damage: &Damage) -> Result<()> {
        let (Some(width), Some(height)) = (NonZeroU32::new(self.width), NonZeroU32::new(self.height))
        else {
            return Ok(());
        };

        self.surface
            .resize(width, height)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get buffer: {}", e))?;
        let full = damage.is_full() || buffer.age() == 0;

        {
            let frame = Frame::new(&mut buffer, self.width as usize, self.height as usize);
            let mut painter = FramePainter::new(frame, &self.font);
            if full {
                self.painter.paint(area, &self.font, &mut painter)?;
            } else {
                self.painter
                    .paint_damage(area, &self.font, &mut painter, damage)?;
            }
        }

        tracing::trace!(full, glyphs = self.font.glyph_cache_size(), "frame rendered");
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;
        Ok(())
    }
}
