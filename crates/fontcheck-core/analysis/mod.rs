//! Font usage analysis for parsed scripts
//!
//! Reduces a script's dialogue (and drawing) content to the distinct set of
//! [`UsedStyle`]s it needs rendered. Each dialogue event starts from its
//! resolved base style and is re-examined segment by segment so inline
//! `\fn`/`\b`/`\i`/`\r` overrides and `\p` drawing runs are all counted.
//!
//! Drawing-only styles are included deliberately: a sign typeset entirely
//! with vector commands still selects a font in libass, and a missing font
//! there shifts the drawing's scaling baseline.

mod tags;

use crate::parser::{Event, Script};
use ahash::AHashSet;
use log::debug;
use tags::{scan_segments, FontState, SegmentKind};

/// Built-in fallback when a script defines no usable style at all.
/// Mirrors the libass default style.
const FALLBACK_STATE: FontState<'static> = FontState {
    family: "Arial",
    weight: 400,
    italic: false,
};

/// One distinct style reference extracted from a script
///
/// Identity is value equality over all three attributes; a script that uses
/// "Gandhi Sans" at both regular and bold weights needs two faces and yields
/// two `UsedStyle`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsedStyle {
    /// Font family name as written in the script, with any leading `@`
    /// (vertical layout marker) removed
    pub family: String,
    /// Requested weight (400 regular, 700 bold, or explicit)
    pub weight: u16,
    /// Whether an italic face is requested
    pub italic: bool,
}

impl UsedStyle {
    /// Build a style reference from raw script values
    ///
    /// Trims surrounding whitespace and strips the `@` vertical-layout
    /// prefix, which names the same family.
    #[must_use]
    pub fn new(family: &str, weight: u16, italic: bool) -> Self {
        let family = family.trim();
        let family = family.strip_prefix('@').unwrap_or(family).trim();
        Self {
            family: family.to_owned(),
            weight,
            italic,
        }
    }
}

/// Extract the distinct set of styles a script uses
///
/// Only `Dialogue:` events contribute. The result is deduplicated and kept
/// in first-seen order; callers needing a canonical order sort downstream.
#[must_use]
pub fn used_styles(script: &Script<'_>) -> Vec<UsedStyle> {
    let resolver = StyleResolver::new(script);
    let mut seen = AHashSet::new();
    let mut result = Vec::new();

    for event in script.events().filter(|e| e.is_dialogue()) {
        let base = resolver.base_for(event);
        for segment in scan_segments(event.text, &base, |name| resolver.by_name(name)) {
            let style = UsedStyle::new(
                segment.state.family,
                segment.state.weight,
                segment.state.italic,
            );
            if seen.insert(style.clone()) {
                if segment.kind == SegmentKind::Drawing {
                    debug!("style '{}' first used by a drawing segment", style.family);
                }
                result.push(style);
            }
        }
    }

    debug!("script uses {} distinct style(s)", result.len());
    result
}

/// Resolves event style names to font states
struct StyleResolver<'s, 'a> {
    script: &'s Script<'a>,
}

impl<'s, 'a> StyleResolver<'s, 'a> {
    fn new(script: &'s Script<'a>) -> Self {
        Self { script }
    }

    /// Look up a style definition by name
    ///
    /// Exact match first; ASCII case-insensitive as a fallback, since
    /// VSFilter-era scripts are sloppy about casing. When a name is defined
    /// twice the later definition wins, matching libass.
    fn by_name(&self, name: &str) -> Option<FontState<'a>> {
        let name = name.trim_start_matches('*');
        let mut exact = None;
        let mut relaxed = None;
        for style in self.script.styles() {
            if style.name == name {
                exact = Some(style);
            } else if style.name.eq_ignore_ascii_case(name) {
                relaxed = Some(style);
            }
        }
        exact.or(relaxed).map(|style| FontState {
            family: style.fontname,
            weight: style.weight(),
            italic: style.italic(),
        })
    }

    /// Base font state for an event
    ///
    /// Falls back to the `Default` style and then to the built-in default
    /// when the referenced style does not exist.
    fn base_for(&self, event: &Event<'a>) -> FontState<'a> {
        self.by_name(event.style)
            .or_else(|| self.by_name("Default"))
            .unwrap_or(FALLBACK_STATE)
    }
}
