use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

/// Fit `title` into `available_width` display columns, cutting on grapheme
/// boundaries and ending with an ellipsis when anything was dropped.
pub fn fit_title(title: &str, available_width: u16) -> String {
    let available_width = available_width as usize;
    if UnicodeWidthStr::width(title) <= available_width {
        return title.to_string();
    }
    if available_width == 0 {
        return String::new();
    }

    let budget = available_width - UnicodeWidthStr::width(ELLIPSIS);
    let mut out = String::new();
    let mut used = 0;
    for grapheme in UnicodeSegmentation::graphemes(title, true) {
        let width = UnicodeWidthStr::width(grapheme);
        if used + width > budget {
            break;
        }
        out.push_str(grapheme);
        used += width;
    }
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push_str(ELLIPSIS);
    out
}

/// Title bar caption: an icon glyph, the window title, and a status suffix
/// while a request is pending.
pub fn build_window_title(title: &str, pending: bool, available_width: u16) -> String {
    let base = if pending {
        format!("◆ {title} · waiting for reply")
    } else {
        format!("◆ {title}")
    };
    if pending && UnicodeWidthStr::width(base.as_str()) > available_width as usize {
        return fit_title(&format!("◆ {title}"), available_width);
    }
    fit_title(&base, available_width)
}
