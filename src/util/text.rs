use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Terminal column width of a string. Hangul and other wide glyphs count as 2.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Truncate a string so it fits in `max_width` terminal columns.
///
/// When text is cut, "..." is appended and counted against the budget.
/// Widths of 3 or less have no room for the ellipsis, so the result is the
/// longest prefix that fits. Borrows when nothing needs to be cut.
///
/// ```
/// use econfeed::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Rate decision", 8), "Rate ...");
/// assert_eq!(truncate_to_width("금리 동결", 7), "금리...");
/// assert_eq!(truncate_to_width("Fits", 10), "Fits");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if max_width <= ELLIPSIS_WIDTH {
        let end = prefix_end(s, max_width);
        if end == s.len() {
            return Cow::Borrowed(s);
        }
        return Cow::Owned(s[..end].to_string());
    }

    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let end = prefix_end(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
}

/// Byte index of the end of the longest prefix that fits in `width` columns.
fn prefix_end(s: &str, width: usize) -> usize {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > width {
            return idx;
        }
        used += w;
    }
    s.len()
}

/// Word-wrap `s` into at most `max_lines` lines of `width` columns.
///
/// Whitespace runs collapse to a single space. Words wider than a line are
/// split by character. If the text does not fit, the last line ends in "...".
pub fn clamp_lines(s: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut overflowed = false;

    'words: for word in s.split_whitespace() {
        let word_width = display_width(word);
        let sep = usize::from(!current.is_empty());

        if current_width + sep + word_width <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
            if lines.len() == max_lines {
                overflowed = true;
                break;
            }
        }

        for c in word.chars() {
            let w = char_width(c);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                if lines.len() == max_lines {
                    overflowed = true;
                    break 'words;
                }
            }
            current.push(c);
            current_width += w;
        }
    }

    if !overflowed && !current.is_empty() {
        lines.push(current);
    }

    if overflowed {
        if let Some(last) = lines.last_mut() {
            let budget = width.saturating_sub(ELLIPSIS_WIDTH);
            let end = prefix_end(last, budget);
            last.truncate(end);
            last.push_str(ELLIPSIS);
        }
    }

    lines
}

fn is_stripped_byte(b: u8) -> bool {
    b == 0x1b || b == 0x7f || (b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Feed text is painted straight into the terminal, so CSI (`ESC [`) and
/// OSC (`ESC ]`, terminated by BEL or `ESC \`) sequences, bare ESC, DEL and
/// C0 controls other than tab/newline/CR are dropped. Borrows when the
/// input is already clean.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if !bytes.iter().any(|&b| is_stripped_byte(b)) {
        return Cow::Borrowed(s);
    }

    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut i = 0;

    while i < len {
        let b = bytes[i];
        if b == 0x1b {
            match bytes.get(i + 1) {
                Some(b'[') => {
                    i += 2;
                    while i < len {
                        let c = bytes[i];
                        i += 1;
                        if (0x40..=0x7e).contains(&c) {
                            break;
                        }
                    }
                }
                Some(b']') => {
                    i += 2;
                    while i < len {
                        if bytes[i] == 0x07 {
                            i += 1;
                            break;
                        }
                        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                            i += 2;
                            break;
                        }
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        } else if is_stripped_byte(b) {
            i += 1;
        } else {
            let start = i;
            while i < len && !is_stripped_byte(bytes[i]) {
                i += 1;
            }
            // Only ASCII bytes end a run, so the slice stays on char boundaries.
            out.push_str(&s[start..i]);
        }
    }

    Cow::Owned(out)
}
