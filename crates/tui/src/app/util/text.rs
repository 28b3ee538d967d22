use unicode_width::UnicodeWidthChar;

pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0).max(1)
}

pub fn visual_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for ch in line.chars() {
        let ch_width = char_width(ch);
        if current_width + ch_width > width && !current.is_empty() {
            lines.push(current);
            current = String::new();
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    lines.push(current);
    lines
}

pub fn truncate_to_width(text: &str, width: usize) -> String {
    if visual_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let target = width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > target {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Normalizes pasted text for a form field. Single-line fields fold newlines into spaces.
pub fn sanitize_paste(value: &str, multiline: bool) -> String {
    let mut out = String::new();
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek().copied() != Some('\n') {
                    out.push(if multiline { '\n' } else { ' ' });
                }
            }
            '\n' => out.push(if multiline { '\n' } else { ' ' }),
            '\t' => out.push_str("    "),
            c if c.is_control() => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{sanitize_paste, truncate_to_width, wrap_line};

    #[test]
    fn sanitize_paste_keeps_newlines_for_multiline_fields() {
        assert_eq!(sanitize_paste("a\r\n\r\nb\tc\x07\r\n", true), "a\n\nb    c \n");
        assert_eq!(sanitize_paste("line1\rline2", true), "line1\nline2");
    }

    #[test]
    fn sanitize_paste_folds_newlines_for_single_line_fields() {
        assert_eq!(sanitize_paste("120\r\n", false), "120 ");
        assert_eq!(sanitize_paste("Road\nbike", false), "Road bike");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Used bike", 20), "Used bike");
        assert_eq!(truncate_to_width("Used mountain bike", 10), "Used mo...");
        assert_eq!(truncate_to_width("abcdef", 2), "..");
    }

    #[test]
    fn wrap_line_splits_on_width() {
        assert_eq!(wrap_line("abcdef", 4), vec!["abcd", "ef"]);
        assert!(wrap_line("abc", 0).is_empty());
    }
}
