use std::path::Path;

use crate::{
    foundation::error::{StarfieldError, StarfieldResult},
    render::svg::{SvgOpts, frame_to_svg},
    surface::SurfaceFrame,
};

/// Largest raster side we are willing to allocate.
pub const MAX_DIM: u32 = 16_384;

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, not premultiplied.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Write the frame as a PNG, creating parent directories as needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> StarfieldResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StarfieldError::render(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| StarfieldError::render(format!("write png '{}': {e}", path.display())))
    }

    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Rasterize one resolved frame at its canvas size.
pub fn rasterize_frame(frame: &SurfaceFrame, opts: &SvgOpts) -> StarfieldResult<FrameRGBA> {
    let svg = frame_to_svg(frame, opts);
    rasterize_svg(&svg, frame.canvas.width, frame.canvas.height)
}

/// Parse `svg` and render it into a `width x height` straight-alpha buffer.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> StarfieldResult<FrameRGBA> {
    if width == 0 || height == 0 {
        return Err(StarfieldError::render("raster size must be non-zero"));
    }
    if width > MAX_DIM || height > MAX_DIM {
        return Err(StarfieldError::render(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| StarfieldError::render(format!("parse svg tree: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| StarfieldError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.data().to_vec();
    unpremultiply_in_place(&mut data);
    Ok(FrameRGBA {
        width,
        height,
        data,
    })
}

fn unpremultiply_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
