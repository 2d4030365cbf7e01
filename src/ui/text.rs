use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "…";

/// Shorten `text` to at most `max_width` terminal columns, marking the cut
/// with an ellipsis.
pub(crate) fn truncate_right(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let ellipsis_width = ELLIPSIS.width();
    if max_width <= ellipsis_width {
        return ELLIPSIS.chars().take(max_width).collect();
    }

    let available = max_width - ellipsis_width;
    let mut used = 0;
    let mut truncated = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > available {
            break;
        }
        used += width;
        truncated.push(ch);
    }
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Format a star count compactly (`1234` → `1.2k`).
pub(crate) fn compact_count(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}k", count as f64 / 1_000.0),
        _ => format!("{:.1}m", count as f64 / 1_000_000.0),
    }
}
