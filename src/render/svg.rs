use std::fmt::Write as _;

use crate::{
    foundation::core::{Rect, Rgba8, fmt_num},
    surface::{BubbleLayer, GlowLayer, Layer, MoonLayer, StarLayer, SurfaceFrame},
};

/// Moon crater `(left, top, diameter)` relative to a 112px disc.
pub(crate) const MOON_CRATERS: [(f64, f64, f64); 3] = [
    (20.0, 24.0, 24.0),
    (56.0, 64.0, 12.0),
    (48.0, 32.0, 16.0),
];
pub(crate) const MOON_REFERENCE_DIAMETER: f64 = 112.0;

/// SVG output options.
#[derive(Clone, Copy, Debug)]
pub struct SvgOpts {
    /// Paint the page background beneath the overlay. Disable for a transparent overlay.
    pub background: bool,
}

impl Default for SvgOpts {
    fn default() -> Self {
        Self { background: true }
    }
}

/// Serialize one resolved frame as a standalone SVG document.
pub fn frame_to_svg(frame: &SurfaceFrame, opts: &SvgOpts) -> String {
    let w = frame.canvas.width;
    let h = frame.canvas.height;
    let mut out = String::with_capacity(256 + frame.layers.len() * 96);

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    write_defs(&mut out, frame);

    if opts.background {
        let _ = writeln!(
            out,
            r#"<rect width="{w}" height="{h}" fill="{}" fill-opacity="{}"/>"#,
            frame.background.hex_rgb(),
            fmt_num(frame.background.alpha_f64())
        );
    }

    let mut glow_idx = 0usize;
    for layer in &frame.layers {
        match layer {
            Layer::Glow(g) => {
                write_glow(&mut out, g, glow_idx);
                glow_idx += 1;
            }
            Layer::Moon(m) => write_moon(&mut out, m),
            Layer::Star(s) => write_star(&mut out, s),
            Layer::Bubble(b) => write_bubble(&mut out, b),
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_defs(out: &mut String, frame: &SurfaceFrame) {
    out.push_str("<defs>\n");
    let glows = frame.layers.iter().filter_map(|l| match l {
        Layer::Glow(g) => Some(g),
        _ => None,
    });
    for (i, g) in glows.enumerate() {
        let _ = writeln!(
            out,
            r#"<filter id="glow-{i}" x="-100%" y="-100%" width="300%" height="300%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
            fmt_num(g.blur)
        );
    }
    if frame.layers.iter().any(|l| matches!(l, Layer::Moon(_))) {
        out.push_str(concat!(
            r#"<linearGradient id="moon-sheen" x1="0" y1="0" x2="1" y2="1">"#,
            r##"<stop offset="0" stop-color="#ffffff" stop-opacity="0.25"/>"##,
            r##"<stop offset="0.5" stop-color="#ffffff" stop-opacity="0.05"/>"##,
            r##"<stop offset="1" stop-color="#ffffff" stop-opacity="0"/>"##,
            "</linearGradient>\n"
        ));
    }
    out.push_str("</defs>\n");
}

fn circle_in(rect: &Rect) -> (String, String, String) {
    let c = rect.center();
    (
        fmt_num(c.x),
        fmt_num(c.y),
        fmt_num(rect.width().min(rect.height()) / 2.0),
    )
}

fn write_glow(out: &mut String, g: &GlowLayer, idx: usize) {
    let (cx, cy, r) = circle_in(&g.rect);
    let _ = writeln!(
        out,
        r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}" fill-opacity="{}" filter="url(#glow-{idx})"/>"#,
        g.color.hex_rgb(),
        fmt_num(g.color.alpha_f64())
    );
}

fn write_moon(out: &mut String, m: &MoonLayer) {
    let (cx, cy, r) = circle_in(&m.rect);
    let white = Rgba8::WHITE.hex_rgb();
    let _ = writeln!(out, r#"<g opacity="{}">"#, fmt_num(m.opacity));
    let _ = writeln!(
        out,
        r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{white}" fill-opacity="0.1"/>"#
    );
    let _ = writeln!(
        out,
        r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="url(#moon-sheen)"/>"#
    );

    let k = m.rect.width() / MOON_REFERENCE_DIAMETER;
    for (left, top, d) in MOON_CRATERS {
        let cr = d * k / 2.0;
        let _ = writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{white}" fill-opacity="0.1"/>"#,
            fmt_num(m.rect.x0 + left * k + cr),
            fmt_num(m.rect.y0 + top * k + cr),
            fmt_num(cr)
        );
    }

    // 1px ring drawn just inside the disc edge.
    let ring_r = (m.rect.width() / 2.0 - 0.5).max(0.0);
    let _ = writeln!(
        out,
        r#"<circle cx="{cx}" cy="{cy}" r="{}" fill="none" stroke="{white}" stroke-opacity="0.2" stroke-width="1"/>"#,
        fmt_num(ring_r)
    );
    out.push_str("</g>\n");
}

fn write_star(out: &mut String, s: &StarLayer) {
    let _ = writeln!(
        out,
        r##"<circle cx="{}" cy="{}" r="{}" fill="#ffffff" opacity="{}"/>"##,
        fmt_num(s.center.x),
        fmt_num(s.center.y),
        fmt_num(s.radius),
        fmt_num(s.opacity)
    );
}

fn write_bubble(out: &mut String, b: &BubbleLayer) {
    let (cx, cy, _) = circle_in(&b.rect);
    // Stroke stays inside the box, like a CSS border.
    let _ = writeln!(
        out,
        r##"<circle cx="{cx}" cy="{cy}" r="{}" fill="#ffffff" fill-opacity="0.05" stroke="#ffffff" stroke-opacity="0.15" stroke-width="1" opacity="{}"/>"##,
        fmt_num((b.rect.width() / 2.0 - 0.5).max(0.0)),
        fmt_num(b.opacity)
    );
}
