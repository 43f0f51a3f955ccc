/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Marker shown next to entries the acting user may still change.
pub fn editable_marker(editable: bool) -> String {
    if editable {
        format!("{GREEN}yes{RESET}")
    } else {
        format!("{GREY}no{RESET}")
    }
}

/// Terminal swatch for a `#RRGGBB` colour (24-bit escape).
pub fn swatch(hex: &str) -> String {
    let h = hex.trim_start_matches('#');
    let channel = |i: usize| h.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => format!("\x1b[38;2;{r};{g};{b}m■{RESET}"),
        _ => " ".to_string(),
    }
}
