#![forbid(unsafe_code)]

//! Grapheme-aware width measurement and cell fitting.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Fit `text` into exactly `width` cells.
///
/// Short text is padded with spaces. Long text is cut on a grapheme boundary
/// and terminated with `ellipsis` (dropped when it alone would not fit). A
/// wide grapheme that straddles the cut is replaced by padding.
#[must_use]
pub fn fit(text: &str, width: usize, ellipsis: &str) -> String {
    let mut out = String::with_capacity(width.max(text.len()));
    let total = display_width(text);
    if total <= width {
        out.push_str(text);
        pad(&mut out, width - total);
        return out;
    }

    let ellipsis_width = display_width(ellipsis);
    let (ellipsis, budget) = if ellipsis_width > width {
        ("", width)
    } else {
        (ellipsis, width - ellipsis_width)
    };

    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ellipsis);
    used += display_width(ellipsis);
    pad(&mut out, width.saturating_sub(used));
    out
}

/// Replace control characters (newlines, tabs) with spaces.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn pad(out: &mut String, n: usize) {
    out.extend(std::iter::repeat_n(' ', n));
}
