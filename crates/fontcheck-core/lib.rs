//! # fontcheck-core
//!
//! Font-usage analysis for ASS (Advanced `SubStation` Alpha) subtitle scripts.
//! Parses a script, extracts the distinct set of text styles it actually uses
//! (dialogue text and drawing commands alike), resolves each style against a
//! pool of system and attached fonts using libass-compatible matching rules,
//! and reports which font files cover the script and which family names are
//! missing.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: styles and events borrow `&str` spans from the
//!   source text
//! - **Override-tag aware**: `\fn`, `\b`, `\i`, `\r` and `\p` are tracked per
//!   text segment, so inline font switches and draw-only styles are counted
//! - **libass-compatible selection**: family-name matching with weight and
//!   slant attenuation, attached fonts taking precedence over system fonts
//! - **Structured results**: serializable report with per-file deduplication
//!   and deterministic ordering
//!
//! ## Quick Start
//!
//! ```rust
//! use fontcheck_core::{analysis::used_styles, parser::Script};
//!
//! let script_text = r#"[Script Info]
//! Title: Example
//!
//! [V4+ Styles]
//! Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
//! Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1
//!
//! [Events]
//! Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
//! Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,Hello {\fnTimes New Roman}world!
//! "#;
//!
//! let script = Script::parse(script_text)?;
//! let styles = used_styles(&script);
//! assert_eq!(styles.len(), 2);
//! # Ok::<(), fontcheck_core::FontCheckError>(())
//! ```
//!
//! The one-shot [`check_subtitle`] entry point runs the whole pipeline for a
//! script on disk, including `attached_fonts` directory discovery.

pub mod analysis;
pub mod check;
pub mod error;
pub mod fonts;
pub mod parser;
pub mod report;

pub use check::{check_subtitle, CheckOptions};
pub use error::FontCheckError;
pub use fonts::{FontCollection, FontCollectionConfig, LibassStrategy};
pub use parser::{ParseError, Script};
pub use report::{FontReport, FoundFont};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
