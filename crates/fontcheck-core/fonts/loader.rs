//! Attached-fonts discovery
//!
//! Subtitle releases that ship their own fonts place them in an
//! `attached_fonts` directory next to the script. Discovery is silent: a
//! missing directory is the common case, not an error.

use log::debug;
use std::path::{Path, PathBuf};

/// Conventional name of the font directory shipped beside a subtitle file
pub const ATTACHED_FONTS_DIR_NAME: &str = "attached_fonts";

/// Locate the attached-fonts directory for a subtitle file
///
/// Returns `<parent>/attached_fonts` when it exists and is a directory,
/// `None` otherwise.
#[must_use]
pub fn attached_fonts_dir(subtitle_path: &Path) -> Option<PathBuf> {
    let candidate = subtitle_path.parent()?.join(ATTACHED_FONTS_DIR_NAME);
    if candidate.is_dir() {
        debug!("using attached fonts from {}", candidate.display());
        Some(candidate)
    } else {
        None
    }
}
