//! ---
//! pw_section: "08-instrument-rendering"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "RGBA pixel surface abstraction."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
}

impl From<(u8, u8, u8)> for Rgba {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgba::opaque(r, g, b)
    }
}

/// A drawing target the gauge renderer paints onto.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Reset every pixel to transparent.
    fn clear(&mut self);
    /// Composite `color` over the pixel at `(x, y)`; out-of-bounds
    /// coordinates are ignored.
    fn put(&mut self, x: u32, y: u32, color: Rgba);
}

/// Owned RGBA8 framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    /// Read back the pixel at `(x, y)`; transparent outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        Rgba::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        )
    }

    /// Raw RGBA byte view, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }

    fn put(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let src_a = color.a as u32;
        if src_a == 255 {
            self.data[offset] = color.r;
            self.data[offset + 1] = color.g;
            self.data[offset + 2] = color.b;
            self.data[offset + 3] = 255;
            return;
        }
        // source-over compositing on premultiplied-free u8 channels
        let dst_a = self.data[offset + 3] as u32;
        let out_a = src_a + dst_a * (255 - src_a) / 255;
        let blend = |src: u8, dst: u8| -> u8 {
            if out_a == 0 {
                return 0;
            }
            let src_part = src as u32 * src_a;
            let dst_part = dst as u32 * dst_a * (255 - src_a) / 255;
            ((src_part + dst_part) / out_a) as u8
        };
        self.data[offset] = blend(color.r, self.data[offset]);
        self.data[offset + 1] = blend(color.g, self.data[offset + 1]);
        self.data[offset + 2] = blend(color.b, self.data[offset + 2]);
        self.data[offset + 3] = out_a as u8;
    }
}
