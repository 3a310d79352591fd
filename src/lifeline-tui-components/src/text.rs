//! Display-width helpers shared by the components.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` terminal columns, ending with `…` when
/// anything was cut.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Terminal width of `s`, saturated to `u16`.
pub fn width_u16(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}
