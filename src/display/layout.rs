//! Text layout helpers shared by the dashboard page and charts

/// Horizontal rule weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Single,
    Double,
}

/// A full-width horizontal rule
pub fn rule(weight: Rule, width: usize) -> String {
    let ch = match weight {
        Rule::Single => '─',
        Rule::Double => '═',
    };
    std::iter::repeat(ch).take(width).collect()
}

/// `title` centered in `width` columns (left padding only)
pub fn centered(title: &str, width: usize) -> String {
    let pad = width.saturating_sub(title.chars().count()) / 2;
    format!("{:pad$}{}", "", title, pad = pad)
}

/// `part` as a percentage of `total`, one decimal place
pub fn share(part: f64, total: f64) -> String {
    if total <= 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part / total * 100.0)
}

/// A bar of `width` cells filled in proportion to `value / max`
///
/// Non-positive values draw an empty track.
pub fn meter(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 && value > 0.0 {
        ((value / max).min(1.0) * width as f64).round() as usize
    } else {
        0
    };
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat('█').take(filled));
    out.extend(std::iter::repeat('░').take(width - filled));
    out
}

/// `text` cut or padded to exactly `width` characters
///
/// Cut text ends in `…`.
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{:<width$}", text, width = width);
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}
