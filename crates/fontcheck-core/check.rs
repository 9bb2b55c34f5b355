//! One-shot check pipeline
//!
//! Ties the crate together for the common case: read a script from disk,
//! discover attached fonts, build the pool, resolve every used style and
//! assemble the report. One deterministic forward pass, read-only
//! filesystem access, nothing cached between calls.

use crate::analysis::used_styles;
use crate::error::FontCheckError;
use crate::fonts::{attached_fonts_dir, FontCollection, FontCollectionConfig, LibassStrategy};
use crate::parser::Script;
use crate::report::{build_report, FontReport};
use log::debug;
use std::path::Path;

/// Options for [`check_subtitle`]
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Include the host's installed fonts in the pool
    pub use_system_fonts: bool,
    /// Emit font-pool diagnostics at warn level
    pub verbose_diagnostics: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            use_system_fonts: true,
            verbose_diagnostics: false,
        }
    }
}

/// Check which fonts a subtitle file needs and which are available
///
/// Fonts found in an `attached_fonts` directory next to `path` join the
/// pool with priority over system fonts; a missing directory is skipped
/// silently.
///
/// # Errors
///
/// - [`FontCheckError::Io`] when the file cannot be read
/// - [`FontCheckError::Parse`] when it is not a valid ASS document
/// - [`FontCheckError::FontPool`] when the font pool cannot be built
pub fn check_subtitle(path: &Path, options: &CheckOptions) -> Result<FontReport, FontCheckError> {
    let source = std::fs::read_to_string(path).map_err(|source| FontCheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let script = Script::parse(&source)?;

    let styles = used_styles(&script);
    debug!(
        "{}: {} distinct style reference(s)",
        path.display(),
        styles.len()
    );

    let config = FontCollectionConfig {
        use_system_fonts: options.use_system_fonts,
        attached_dirs: attached_fonts_dir(path).into_iter().collect(),
        verbose_diagnostics: options.verbose_diagnostics,
    };
    let collection = FontCollection::build(&config)?;

    Ok(build_report(&styles, &collection, &LibassStrategy))
}
