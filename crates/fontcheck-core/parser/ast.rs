//! AST nodes for ASS script content
//!
//! Contains the `Style` and `Event` structs representing entries from the
//! `[V4+ Styles]` and `[Events]` sections with zero-copy design. All fields
//! are stored as string references into the original source text.

/// Style definition from `[V4+ Styles]` section
///
/// Represents a single style definition that can be referenced by events.
/// Fields are kept as raw spans; typed accessors are provided for the
/// attributes font resolution cares about.
///
/// # Examples
///
/// ```rust
/// use fontcheck_core::parser::ast::Style;
///
/// let style = Style {
///     name: "Default",
///     fontname: "Arial",
///     bold: "-1",
///     ..Style::default()
/// };
///
/// assert_eq!(style.weight(), 700);
/// assert!(!style.italic());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style<'a> {
    /// Style name (must be unique within script)
    pub name: &'a str,

    /// Font family name for text rendering
    pub fontname: &'a str,

    /// Font size in points
    pub fontsize: &'a str,

    /// Primary color in BGR format (&HBBGGRR)
    pub primary_colour: &'a str,

    /// Secondary color for collision effects
    pub secondary_colour: &'a str,

    /// Outline color
    pub outline_colour: &'a str,

    /// Shadow/background color
    pub back_colour: &'a str,

    /// Bold flag (-1/0) or explicit weight
    pub bold: &'a str,

    /// Italic flag (0/1)
    pub italic: &'a str,

    /// Underline flag (0/1)
    pub underline: &'a str,

    /// Strikeout flag (0/1)
    pub strikeout: &'a str,

    /// Horizontal scale percentage
    pub scale_x: &'a str,

    /// Vertical scale percentage
    pub scale_y: &'a str,

    /// Character spacing in pixels
    pub spacing: &'a str,

    /// Rotation angle in degrees
    pub angle: &'a str,

    /// Border style (1=outline+shadow, 3=opaque box)
    pub border_style: &'a str,

    /// Outline width in pixels
    pub outline: &'a str,

    /// Shadow depth in pixels
    pub shadow: &'a str,

    /// Alignment (numpad layout)
    pub alignment: &'a str,

    /// Left margin in pixels
    pub margin_l: &'a str,

    /// Right margin in pixels
    pub margin_r: &'a str,

    /// Vertical margin in pixels
    pub margin_v: &'a str,

    /// Font encoding identifier
    pub encoding: &'a str,
}

impl Style<'_> {
    /// Effective font weight for this style
    ///
    /// The ASS `Bold` field is conventionally `-1` (bold) or `0` (regular),
    /// but explicit OpenType weights also occur in the wild and are passed
    /// through unchanged.
    #[must_use]
    pub fn weight(&self) -> u16 {
        match self.bold.trim() {
            "-1" | "1" => 700,
            other => match other.parse::<u16>() {
                Ok(w) if (100..=1000).contains(&w) => w,
                _ => 400,
            },
        }
    }

    /// Whether this style requests an italic face
    #[must_use]
    pub fn italic(&self) -> bool {
        matches!(self.italic.trim(), "-1" | "1")
    }
}

/// Event from `[Events]` section (dialogue, comments, etc.)
///
/// Represents a single event in the subtitle timeline. Only dialogue events
/// contribute to font usage, but all event types are parsed so callers can
/// reason about the full timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<'a> {
    /// Event type (Dialogue, Comment, etc.)
    pub event_type: EventType,

    /// Layer for drawing order (higher layers drawn on top)
    pub layer: &'a str,

    /// Start time in ASS time format (H:MM:SS.CS)
    pub start: &'a str,

    /// End time in ASS time format (H:MM:SS.CS)
    pub end: &'a str,

    /// Style name reference
    pub style: &'a str,

    /// Character name or speaker
    pub name: &'a str,

    /// Left margin override (pixels)
    pub margin_l: &'a str,

    /// Right margin override (pixels)
    pub margin_r: &'a str,

    /// Vertical margin override (pixels)
    pub margin_v: &'a str,

    /// Effect specification for special rendering
    pub effect: &'a str,

    /// Text content with possible style overrides
    pub text: &'a str,
}

impl Default for Event<'_> {
    fn default() -> Self {
        Self {
            event_type: EventType::Dialogue,
            layer: "",
            start: "",
            end: "",
            style: "",
            name: "",
            margin_l: "",
            margin_r: "",
            margin_v: "",
            effect: "",
            text: "",
        }
    }
}

impl Event<'_> {
    /// Check if this is a dialogue event
    ///
    /// Returns `true` for events that are displayed during playback and
    /// therefore exercise fonts.
    #[must_use]
    pub const fn is_dialogue(&self) -> bool {
        matches!(self.event_type, EventType::Dialogue)
    }
}

/// Event type discriminant for different kinds of timeline events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Dialogue line (displayed during playback)
    Dialogue,

    /// Comment (ignored during playback)
    Comment,

    /// Picture display event
    Picture,

    /// Sound playback event
    Sound,

    /// Movie playback event
    Movie,

    /// Command execution event
    Command,
}

impl EventType {
    /// Split an event line into its type and data portion
    ///
    /// Returns `None` for unrecognized line prefixes.
    #[must_use]
    pub fn split_line(line: &str) -> Option<(Self, &str)> {
        let (prefix, data) = line.split_once(':')?;
        let event_type = match prefix.trim() {
            "Dialogue" => Self::Dialogue,
            "Comment" => Self::Comment,
            "Picture" => Self::Picture,
            "Sound" => Self::Sound,
            "Movie" => Self::Movie,
            "Command" => Self::Command,
            _ => return None,
        };
        Some((event_type, data))
    }

    /// Canonical ASS event type name for this variant
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dialogue => "Dialogue",
            Self::Comment => "Comment",
            Self::Picture => "Picture",
            Self::Sound => "Sound",
            Self::Movie => "Movie",
            Self::Command => "Command",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_weight_from_bold_flag() {
        let style = Style {
            bold: "-1",
            ..Style::default()
        };
        assert_eq!(style.weight(), 700);

        let style = Style {
            bold: "0",
            ..Style::default()
        };
        assert_eq!(style.weight(), 400);
    }

    #[test]
    fn style_weight_explicit_value() {
        let style = Style {
            bold: "300",
            ..Style::default()
        };
        assert_eq!(style.weight(), 300);
    }

    #[test]
    fn style_weight_out_of_range_falls_back() {
        let style = Style {
            bold: "9001",
            ..Style::default()
        };
        assert_eq!(style.weight(), 400);
    }

    #[test]
    fn style_italic_flag_variants() {
        let style = Style {
            italic: "1",
            ..Style::default()
        };
        assert!(style.italic());

        let style = Style {
            italic: "0",
            ..Style::default()
        };
        assert!(!style.italic());
    }

    #[test]
    fn event_type_split_line() {
        let (ty, data) = EventType::split_line("Dialogue: 0,0:00:00.00,x").unwrap();
        assert_eq!(ty, EventType::Dialogue);
        assert_eq!(data, " 0,0:00:00.00,x");

        assert!(EventType::split_line("Style: Default,Arial").is_none());
        assert!(EventType::split_line("no colon here").is_none());
    }

    #[test]
    fn event_type_round_trip_names() {
        for ty in [
            EventType::Dialogue,
            EventType::Comment,
            EventType::Picture,
            EventType::Sound,
            EventType::Movie,
            EventType::Command,
        ] {
            let line = format!("{}: data", ty.as_str());
            assert_eq!(EventType::split_line(&line).map(|(t, _)| t), Some(ty));
        }
    }
}
