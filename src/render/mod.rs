//! Output backends for a mounted surface.

pub mod html;
pub mod raster;
pub mod sequence;
pub mod svg;
