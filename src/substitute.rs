//! Color substitution for template content
//!
//! Pure text transformation: `{name}` tokens become bare hex values and
//! `{name.r}`-style tokens become derived color components. Replacement is
//! literal substring replacement, never regex, and there are no failure
//! modes: tokens without a matching palette entry stay in the output as-is.

use crate::palette::Palette;

/// Resolve every color token in `content` against `colors`.
///
/// Component tokens: `.r`/`.g`/`.b` are decimal 0-255, `.h` is hue in
/// degrees without a unit, `.l` and `.s` are percentages with a trailing `%`.
pub fn substitute(content: &str, colors: &Palette) -> String {
    let mut result = content.to_string();

    for (name, hex) in colors.iter() {
        let bare = hex.strip_prefix('#').unwrap_or(hex);

        result = result.replace(&format!("{{{}}}", name), bare);

        // Component tokens are rare; only derive the breakdown when the
        // content actually mentions one for this name.
        if !result.contains(&format!("{{{}.", name)) {
            continue;
        }
        let Some((r, g, b)) = hex_to_rgb(bare) else {
            // Not a decodable RRGGBB value: leave the component tokens
            // unresolved rather than failing the whole substitution.
            continue;
        };
        let (h, l, s) = rgb_to_hls(r, g, b);

        result = result.replace(&format!("{{{}.r}}", name), &r.to_string());
        result = result.replace(&format!("{{{}.g}}", name), &g.to_string());
        result = result.replace(&format!("{{{}.b}}", name), &b.to_string());
        result = result.replace(&format!("{{{}.h}}", name), &format!("{}", h * 360.0));
        result = result.replace(&format!("{{{}.l}}", name), &format!("{}%", l * 100.0));
        result = result.replace(&format!("{{{}.s}}", name), &format!("{}%", s * 100.0));
    }

    result
}

/// Decode a bare `RRGGBB` string into its three channels.
fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// RGB to HLS, all inputs and outputs in [0, 1] (hue as a fraction of a
/// full turn; callers scale to degrees and percentages).
fn rgb_to_hls(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let l = (minc + maxc) / 2.0;
    if maxc == minc {
        return (0.0, l, 0.0);
    }
    let delta = maxc - minc;
    let s = if l <= 0.5 {
        delta / (maxc + minc)
    } else {
        delta / (2.0 - maxc - minc)
    };
    let rc = (maxc - r) / delta;
    let gc = (maxc - g) / delta;
    let bc = (maxc - b) / delta;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (((h / 6.0).rem_euclid(1.0)), l, s)
}
