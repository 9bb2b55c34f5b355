//! ASS script parser
//!
//! Line-oriented, zero-copy parser for the sections a font check needs:
//! `[Script Info]`, the style sections (`[V4 Styles]`, `[V4+ Styles]`,
//! `[V4++ Styles]`) and `[Events]`. Field order is driven by `Format:` lines
//! with the standard V4+ layouts as fallback, so reordered or truncated
//! scripts from different authoring tools still parse.
//!
//! Unknown sections (including `[Fonts]` and `[Graphics]` binary payloads)
//! are skipped without error. Malformed data lines are recorded as
//! [`ParseIssue`]s and skipped; only an input with no recognizable section
//! at all is rejected.

pub mod ast;
pub mod errors;

pub use ast::{Event, EventType, Style};
pub use errors::{ParseError, ParseIssue};

use log::debug;

/// Standard V4+ style format used when no `Format:` line is present
const DEFAULT_STYLE_FORMAT: &[&str] = &[
    "Name",
    "Fontname",
    "Fontsize",
    "PrimaryColour",
    "SecondaryColour",
    "OutlineColour",
    "BackColour",
    "Bold",
    "Italic",
    "Underline",
    "StrikeOut",
    "ScaleX",
    "ScaleY",
    "Spacing",
    "Angle",
    "BorderStyle",
    "Outline",
    "Shadow",
    "Alignment",
    "MarginL",
    "MarginR",
    "MarginV",
    "Encoding",
];

/// Standard event format used when no `Format:` line is present
const DEFAULT_EVENT_FORMAT: &[&str] = &[
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

/// Section of an ASS script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<'a> {
    /// `[Script Info]` key/value pairs
    ScriptInfo(Vec<(&'a str, &'a str)>),
    /// Style definitions from a styles section
    Styles(Vec<Style<'a>>),
    /// Timeline events from `[Events]`
    Events(Vec<Event<'a>>),
}

/// Parsed ASS script
///
/// Borrows from the source text for the lifetime of the script. Construct
/// with [`Script::parse`].
#[derive(Debug, Clone)]
pub struct Script<'a> {
    sections: Vec<Section<'a>>,
    issues: Vec<ParseIssue>,
}

impl<'a> Script<'a> {
    /// Parse an ASS script from source text
    ///
    /// A UTF-8 BOM and CRLF line endings are tolerated. Comment lines
    /// (`;` and `!:` prefixes) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyInput`] for blank input and
    /// [`ParseError::NotAssDocument`] when no recognized section header is
    /// found, which is how non-ASS files surface.
    pub fn parse(source: &'a str) -> Result<Self, ParseError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        if source.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut parser = ScriptParser {
            sections: Vec::new(),
            issues: Vec::new(),
            current: CurrentSection::None,
        };

        for (idx, raw) in source.lines().enumerate() {
            parser.parse_line(idx + 1, raw.trim());
        }
        parser.flush();

        if parser.sections.is_empty() {
            return Err(ParseError::NotAssDocument);
        }

        debug!(
            "parsed script: {} section(s), {} issue(s)",
            parser.sections.len(),
            parser.issues.len()
        );

        Ok(Self {
            sections: parser.sections,
            issues: parser.issues,
        })
    }

    /// All parsed sections in source order
    #[must_use]
    pub fn sections(&self) -> &[Section<'a>] {
        &self.sections
    }

    /// Recoverable problems encountered during parsing
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// All style definitions, flattened across style sections
    pub fn styles(&self) -> impl Iterator<Item = &Style<'a>> {
        self.sections.iter().filter_map(|s| match s {
            Section::Styles(styles) => Some(styles.iter()),
            _ => None,
        })
        .flatten()
    }

    /// All events, flattened across `[Events]` sections
    pub fn events(&self) -> impl Iterator<Item = &Event<'a>> {
        self.sections.iter().filter_map(|s| match s {
            Section::Events(events) => Some(events.iter()),
            _ => None,
        })
        .flatten()
    }
}

/// Accumulator for the section currently being parsed
enum CurrentSection<'a> {
    None,
    Skip,
    ScriptInfo(Vec<(&'a str, &'a str)>),
    Styles {
        format: Option<Vec<&'a str>>,
        styles: Vec<Style<'a>>,
    },
    Events {
        format: Option<Vec<&'a str>>,
        events: Vec<Event<'a>>,
    },
}

struct ScriptParser<'a> {
    sections: Vec<Section<'a>>,
    issues: Vec<ParseIssue>,
    current: CurrentSection<'a>,
}

impl<'a> ScriptParser<'a> {
    fn parse_line(&mut self, line_number: usize, line: &'a str) {
        if line.is_empty() || line.starts_with(';') || line.starts_with("!:") {
            return;
        }

        if line.starts_with('[') {
            self.parse_section_header(line_number, line);
            return;
        }

        match &mut self.current {
            CurrentSection::None | CurrentSection::Skip => {}
            CurrentSection::ScriptInfo(fields) => {
                if let Some((key, value)) = line.split_once(':') {
                    fields.push((key.trim(), value.trim()));
                } else {
                    self.issues.push(ParseIssue::new(
                        line_number,
                        "expected 'Key: Value' in [Script Info]",
                    ));
                }
            }
            CurrentSection::Styles { format, styles } => {
                if let Some(fields) = line.strip_prefix("Format:") {
                    *format = Some(fields.split(',').map(str::trim).collect());
                } else if let Some(data) = line.strip_prefix("Style:") {
                    let fields = format.as_deref().unwrap_or(DEFAULT_STYLE_FORMAT);
                    match parse_style_line(data.trim(), fields) {
                        Some(style) => styles.push(style),
                        None => self.issues.push(ParseIssue::new(
                            line_number,
                            "style line has no usable Name field",
                        )),
                    }
                }
            }
            CurrentSection::Events { format, events } => {
                if let Some(fields) = line.strip_prefix("Format:") {
                    *format = Some(fields.split(',').map(str::trim).collect());
                } else if let Some((event_type, data)) = EventType::split_line(line) {
                    let fields = format.as_deref().unwrap_or(DEFAULT_EVENT_FORMAT);
                    match parse_event_line(event_type, data.trim(), fields) {
                        Some(event) => events.push(event),
                        None => self.issues.push(ParseIssue::new(
                            line_number,
                            format!(
                                "{} line has fewer fields than the format declares",
                                event_type.as_str()
                            ),
                        )),
                    }
                }
            }
        }
    }

    fn parse_section_header(&mut self, line_number: usize, line: &'a str) {
        let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) else {
            self.issues
                .push(ParseIssue::new(line_number, "unclosed section header"));
            return;
        };

        self.flush();
        self.current = match name.trim().to_ascii_lowercase().as_str() {
            "script info" => CurrentSection::ScriptInfo(Vec::new()),
            "v4 styles" | "v4+ styles" | "v4++ styles" => CurrentSection::Styles {
                format: None,
                styles: Vec::new(),
            },
            "events" => CurrentSection::Events {
                format: None,
                events: Vec::new(),
            },
            other => {
                debug!("skipping unknown section [{other}]");
                CurrentSection::Skip
            }
        };
    }

    /// Push the accumulated section, if any, onto the section list
    fn flush(&mut self) {
        match core::mem::replace(&mut self.current, CurrentSection::None) {
            CurrentSection::None | CurrentSection::Skip => {}
            CurrentSection::ScriptInfo(fields) => {
                self.sections.push(Section::ScriptInfo(fields));
            }
            CurrentSection::Styles { styles, .. } => {
                self.sections.push(Section::Styles(styles));
            }
            CurrentSection::Events { events, .. } => {
                self.sections.push(Section::Events(events));
            }
        }
    }
}

/// Parse one style definition according to the active format
///
/// Missing trailing fields map to empty spans so truncated lines still
/// yield a usable style. Returns `None` when even the name is absent.
fn parse_style_line<'a>(data: &'a str, format: &[&str]) -> Option<Style<'a>> {
    let parts: Vec<&str> = data.splitn(format.len(), ',').collect();

    let get_field = |name: &str| -> &'a str {
        format
            .iter()
            .position(|field| field.eq_ignore_ascii_case(name))
            .and_then(|idx| parts.get(idx))
            .map_or("", |s| s.trim())
    };

    let name = get_field("Name");
    if name.is_empty() {
        return None;
    }

    Some(Style {
        name,
        fontname: get_field("Fontname"),
        fontsize: get_field("Fontsize"),
        primary_colour: get_field("PrimaryColour"),
        secondary_colour: get_field("SecondaryColour"),
        outline_colour: get_field("OutlineColour"),
        back_colour: get_field("BackColour"),
        bold: get_field("Bold"),
        italic: get_field("Italic"),
        underline: get_field("Underline"),
        strikeout: get_field("StrikeOut"),
        scale_x: get_field("ScaleX"),
        scale_y: get_field("ScaleY"),
        spacing: get_field("Spacing"),
        angle: get_field("Angle"),
        border_style: get_field("BorderStyle"),
        outline: get_field("Outline"),
        shadow: get_field("Shadow"),
        alignment: get_field("Alignment"),
        margin_l: get_field("MarginL"),
        margin_r: get_field("MarginR"),
        margin_v: get_field("MarginV"),
        encoding: get_field("Encoding"),
    })
}

/// Parse one event line according to the active format
///
/// The `Text` field is the greedy last field so commas inside dialogue
/// text survive. Returns `None` when the line has fewer fields than the
/// format declares.
fn parse_event_line<'a>(
    event_type: EventType,
    data: &'a str,
    format: &[&str],
) -> Option<Event<'a>> {
    let has_text_field = format.iter().any(|f| f.eq_ignore_ascii_case("Text"));
    let parts: Vec<&str> = if has_text_field {
        data.splitn(format.len(), ',').collect()
    } else {
        data.split(',').collect()
    };

    if parts.len() < format.len() {
        return None;
    }

    let get_field = |name: &str| -> &'a str {
        format
            .iter()
            .position(|field| field.eq_ignore_ascii_case(name))
            .and_then(|idx| parts.get(idx))
            .map_or("", |s| s.trim())
    };

    Some(Event {
        event_type,
        layer: get_field("Layer"),
        start: get_field("Start"),
        end: get_field("End"),
        style: get_field("Style"),
        name: get_field("Name"),
        margin_l: get_field("MarginL"),
        margin_r: get_field("MarginR"),
        margin_v: get_field("MarginV"),
        effect: get_field("Effect"),
        text: get_field("Text"),
    })
}
