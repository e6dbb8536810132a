//! Lower a mounted surface to a self-contained HTML/CSS overlay.
//!
//! The browser then runs the perpetual loops itself: each element carries its own
//! `animation-delay` and `animation-duration`, and the keyframes are emitted from the same
//! transitions the in-process sampler uses.

use std::fmt::Write as _;

use crate::{
    animation::anim::Transition,
    config::{HAnchor, VAnchor},
    driver::ElementMotion,
    foundation::core::fmt_num,
    render::svg::{MOON_CRATERS, MOON_REFERENCE_DIAMETER},
    surface::RenderSurface,
};

const TWINKLE: &str = "sf-twinkle";
const RISE: &str = "sf-rise";
const BOB: &str = "sf-bob";

/// Render the overlay as an HTML fragment (`<style>` plus one root `<div>`).
pub fn overlay_html(surface: &RenderSurface) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<style>\n");
    let _ = writeln!(
        out,
        ".sf-overlay{{position:fixed;inset:0;overflow:hidden;pointer-events:{};z-index:{}}}",
        RenderSurface::POINTER_EVENTS,
        RenderSurface::Z_INDEX
    );
    out.push_str(".sf-overlay>*,.sf-moon>*{position:absolute;border-radius:9999px}\n");
    out.push_str(".sf-star{background:#ffffff}\n");
    out.push_str(
        ".sf-bubble{border:1px solid rgba(255, 255, 255, 0.15);background:rgba(255, 255, 255, 0.05);backdrop-filter:blur(8px);box-sizing:border-box}\n",
    );

    if let Some(m) = surface.star_motion().first()
        && let Some(op) = &m.opacity
    {
        write_keyframes(&mut out, TWINKLE, &offsets(&[op]), |p| {
            format!("opacity:{}", fmt_num(op.keyframes.sample(p)))
        });
    }
    if let Some(m) = surface.bubble_motion().first()
        && let (Some(x), Some(y)) = (&m.offset_x, &m.offset_y)
    {
        write_keyframes(&mut out, RISE, &offsets(&[x, y]), |p| {
            translate(x.keyframes.sample(p), y.keyframes.sample(p))
        });
    }
    if let Some(moon) = surface.moon_motion() {
        let (op, y) = (&moon.opacity, &moon.offset_y);
        write_keyframes(&mut out, BOB, &offsets(&[op, y]), |p| {
            format!(
                "opacity:{};{}",
                fmt_num(op.keyframes.sample(p)),
                translate(0.0, y.keyframes.sample(p))
            )
        });
    }
    out.push_str("</style>\n");

    out.push_str("<div class=\"sf-overlay\" aria-hidden=\"true\">\n");
    write_glows(&mut out, surface);
    write_moon(&mut out, surface);
    for (el, m) in surface.stars().iter().zip(surface.star_motion()) {
        let _ = writeln!(
            out,
            r#"<span class="sf-star" style="left:{}%;top:{}%;width:{}px;height:{}px;opacity:{};{}"></span>"#,
            fmt_num(el.position.left),
            fmt_num(el.position.top.unwrap_or(0.0)),
            fmt_num(el.size),
            fmt_num(el.size),
            fmt_num(m.rest.opacity),
            animation_decl(TWINKLE, m)
        );
    }
    let below = surface.config().bubble_start_below;
    for (el, m) in surface.bubbles().iter().zip(surface.bubble_motion()) {
        let _ = writeln!(
            out,
            r#"<div class="sf-bubble" style="left:{}%;bottom:{}px;width:{}px;height:{}px;opacity:{};{}"></div>"#,
            fmt_num(el.position.left),
            fmt_num(-below),
            fmt_num(el.size),
            fmt_num(el.size),
            fmt_num(m.rest.opacity),
            animation_decl(RISE, m)
        );
    }
    out.push_str("</div>\n");
    out
}

/// Sorted union of the keyframe offsets of `tracks`.
fn offsets(tracks: &[&Transition<f64>]) -> Vec<f64> {
    let mut all: Vec<f64> = tracks
        .iter()
        .flat_map(|t| t.keyframes.keys.iter().map(|k| k.offset))
        .collect();
    all.sort_by(f64::total_cmp);
    all.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    all
}

fn write_keyframes(out: &mut String, name: &str, offsets: &[f64], decl: impl Fn(f64) -> String) {
    let _ = write!(out, "@keyframes {name}{{");
    for &p in offsets {
        let _ = write!(out, "{}%{{{}}}", fmt_num(p * 100.0), decl(p));
    }
    out.push_str("}\n");
}

fn translate(x: f64, y: f64) -> String {
    format!("transform:translate({}px, {}px)", fmt_num(x), fmt_num(y))
}

fn animation_decl(name: &str, m: &ElementMotion) -> String {
    let track = m.opacity.as_ref().or(m.offset_y.as_ref());
    match track {
        Some(t) => format!(
            "animation:{name} {}s {} {}s infinite",
            fmt_num(t.timing.duration),
            t.keyframes.keys[0].ease.css(),
            fmt_num(t.timing.delay)
        ),
        None => String::new(),
    }
}

fn write_glows(out: &mut String, surface: &RenderSurface) {
    for g in &surface.config().glows {
        let (h, shift) = match g.horizontal {
            HAnchor::Left(p) => (format!("left:{}%", fmt_num(p)), ""),
            HAnchor::Right(p) => (format!("right:{}%", fmt_num(p)), ""),
            HAnchor::Center => ("left:50%".to_string(), "transform:translateX(-50%);"),
        };
        let v = match g.vertical {
            VAnchor::Top(px) => format!("top:{}px", fmt_num(px)),
            VAnchor::Bottom(px) => format!("bottom:{}px", fmt_num(px)),
        };
        let _ = writeln!(
            out,
            r#"<div style="{h};{v};{shift}width:{d}px;height:{d}px;background:{};filter:blur({}px)"></div>"#,
            g.color.css(),
            fmt_num(g.blur),
            d = fmt_num(g.diameter),
        );
    }
}

fn write_moon(out: &mut String, surface: &RenderSurface) {
    let (Some(moon), Some(motion)) = (surface.config().moon, surface.moon_motion()) else {
        return;
    };
    let d = fmt_num(moon.diameter);
    let t = &motion.opacity.timing;
    let _ = writeln!(
        out,
        r#"<div class="sf-moon" style="right:{}%;top:{}%;width:{d}px;height:{d}px;background:rgba(255, 255, 255, 0.1);box-shadow:0 0 0 1px rgba(255, 255, 255, 0.2);animation:{BOB} {}s {} {}s infinite">"#,
        fmt_num(moon.right_pct),
        fmt_num(moon.top_pct),
        fmt_num(t.duration),
        motion.opacity.keyframes.keys[0].ease.css(),
        fmt_num(t.delay),
    );
    out.push_str(
        r#"<div style="inset:0;background-image:linear-gradient(to bottom right, rgba(255, 255, 255, 0.25), rgba(255, 255, 255, 0.05), transparent)"></div>"#,
    );
    out.push('\n');

    let k = moon.diameter / MOON_REFERENCE_DIAMETER;
    for (left, top, size) in MOON_CRATERS {
        let _ = writeln!(
            out,
            r#"<div class="sf-crater" style="left:{}px;top:{}px;width:{s}px;height:{s}px;background:rgba(255, 255, 255, 0.1)"></div>"#,
            fmt_num(left * k),
            fmt_num(top * k),
            s = fmt_num(size * k),
        );
    }
    out.push_str("</div>\n");
}
