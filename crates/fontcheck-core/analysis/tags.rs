//! Override tag scanning for font state tracking
//!
//! Walks event text and tracks the subset of override tags that change which
//! font face is needed: `\fn` (family), `\b` (weight), `\i` (slant), `\r`
//! (style reset) and `\p` (drawing mode). Everything else — colors, positions,
//! animations — is skipped, but tags nested inside `\t(...)` blocks still
//! apply because splitting on `\` surfaces them as ordinary tokens.
//!
//! The scanner emits one [`Segment`] per run of renderable content, carrying
//! the font state that was active while that content was written. libass
//! quirks are preserved: an unclosed `{` renders as literal text, and the
//! escapes `\N`, `\n`, `\h` count as whitespace rather than content.

/// Font-relevant state at a point in event text
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FontState<'a> {
    /// Requested font family name, as written
    pub family: &'a str,
    /// Requested weight (400 regular, 700 bold, or explicit)
    pub weight: u16,
    /// Whether an italic face is requested
    pub italic: bool,
}

/// Kind of content a segment holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentKind {
    /// Plain dialogue text
    Text,
    /// Vector drawing commands (`\p` mode)
    Drawing,
}

/// A run of renderable content and the font state it was rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub kind: SegmentKind,
    pub state: FontState<'a>,
}

/// Scan event text and collect the font states of its renderable segments
///
/// `base` is the event's resolved base style; `lookup` resolves style names
/// for `\rStyleName` resets (unknown names fall back to `base`, as libass
/// does). Whitespace-only runs are not emitted: they never pull in a font
/// that some visible glyph would not already require.
pub(crate) fn scan_segments<'a>(
    text: &'a str,
    base: &FontState<'a>,
    lookup: impl Fn(&str) -> Option<FontState<'a>>,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut state = base.clone();
    let mut drawing = false;
    let mut has_content = false;

    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                let Some(close) = text[i + 1..].find('}') else {
                    // Unclosed block renders as literal text in libass
                    has_content |= has_visible_chars(&text[i..]);
                    i = bytes.len();
                    continue;
                };
                flush(&mut segments, &state, drawing, &mut has_content);
                let block = &text[i + 1..i + 1 + close];
                for token in block.split('\\').skip(1) {
                    apply_tag(token, base, &lookup, &mut state, &mut drawing);
                }
                i += close + 2;
            }
            b'\\' if matches!(bytes.get(i + 1), Some(b'N' | b'n' | b'h')) => {
                // Line break / hard space escapes are not visible glyphs
                i += 2;
            }
            _ => {
                let ch_len = utf8_len(bytes[i]);
                if !text[i..i + ch_len].chars().all(char::is_whitespace) {
                    has_content = true;
                }
                i += ch_len;
            }
        }
    }
    flush(&mut segments, &state, drawing, &mut has_content);

    segments
}

fn flush<'a>(
    segments: &mut Vec<Segment<'a>>,
    state: &FontState<'a>,
    drawing: bool,
    has_content: &mut bool,
) {
    if *has_content {
        segments.push(Segment {
            kind: if drawing {
                SegmentKind::Drawing
            } else {
                SegmentKind::Text
            },
            state: state.clone(),
        });
        *has_content = false;
    }
}

/// Apply one override token to the running font state
///
/// Prefix collisions matter here: `\blur`, `\bord` and `\be` are not `\b`,
/// and `\iclip` is not `\i`, so the argument must parse as a number before
/// the short tags are accepted.
fn apply_tag<'a>(
    token: &'a str,
    base: &FontState<'a>,
    lookup: &impl Fn(&str) -> Option<FontState<'a>>,
    state: &mut FontState<'a>,
    drawing: &mut bool,
) {
    if let Some(rest) = token.strip_prefix("fn") {
        let family = rest.trim();
        state.family = if family.is_empty() {
            base.family
        } else {
            family
        };
    } else if let Some(rest) = token.strip_prefix('r') {
        let name = rest.trim();
        if name.is_empty() {
            *state = base.clone();
        } else {
            *state = lookup(name).unwrap_or_else(|| base.clone());
        }
    } else if let Some(rest) = token.strip_prefix('b') {
        // A trailing ')' appears when the tag sat inside a \t(...) block
        let arg = rest.trim().trim_end_matches(')');
        if arg.is_empty() {
            state.weight = base.weight;
        } else if let Ok(value) = arg.parse::<i32>() {
            state.weight = match value {
                0 => 400,
                1 | -1 => 700,
                100..=1000 => u16::try_from(value).unwrap_or(400),
                _ => base.weight,
            };
        }
    } else if let Some(rest) = token.strip_prefix('i') {
        let arg = rest.trim().trim_end_matches(')');
        if arg.is_empty() {
            state.italic = base.italic;
        } else if let Ok(value) = arg.parse::<i32>() {
            state.italic = value != 0;
        }
    } else if let Some(rest) = token.strip_prefix('p') {
        let arg = rest.trim().trim_end_matches(')');
        if !arg.is_empty() {
            if let Ok(scale) = arg.parse::<i32>() {
                *drawing = scale > 0;
            }
        }
    }
}

fn has_visible_chars(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace())
}

/// Byte length of the UTF-8 sequence starting with `first`
const fn utf8_len(first: u8) -> usize {
    match first {
        0xF0..=0xF7 => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}
