//! Formatting utilities used for CLI outputs.

use crate::models::Macros;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `1 250 kcal` style with a thin grouping space.
pub fn kcal(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out.push_str(" kcal");
    out
}

/// `P 18g · C 52g · F 17g`, or `--` when unknown.
pub fn macros(m: Option<&Macros>) -> String {
    match m {
        Some(m) => format!("P {}g · C {}g · F {}g", m.protein, m.carbs, m.fat),
        None => "--".to_string(),
    }
}

/// Horizontal bar of `width` cells filled to `percent` (0..=100).
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
