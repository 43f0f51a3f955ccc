//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `12345` → `12,345`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234` → `1,234 ft`
pub fn feet(n: u64) -> String {
    format!("{} ft", thousands(n))
}

/// Horizontal bar proportional to `value / max`, used for quick charts.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(len.max(usize::from(value > 0)))
}
