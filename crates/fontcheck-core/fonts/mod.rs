//! Font pool construction and face selection
//!
//! A [`FontCollection`] is the queryable pool the checker resolves styles
//! against: attached fonts loaded first (they take precedence), then the
//! host's installed fonts, both enumerated through `fontdb`. The collection
//! is built once per run and immutable afterwards.
//!
//! Selection is delegated to a [`FontSelectionStrategy`] so the matching
//! rules stay a swappable seam; [`LibassStrategy`] is the one strategy this
//! crate ships.

pub mod face;
pub mod loader;
pub mod selection;

pub use face::{normalize_family, FaceOrigin, FaceRecord};
pub use loader::{attached_fonts_dir, ATTACHED_FONTS_DIR_NAME};
pub use selection::{FontSelectionStrategy, LibassStrategy};

use crate::analysis::UsedStyle;
use crate::error::FontCheckError;
use ahash::AHashMap;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Construction parameters for a [`FontCollection`]
///
/// Diagnostics are a construction parameter rather than global state: the
/// pool only emits warn-level logs about unusable font files when
/// `verbose_diagnostics` is set.
#[derive(Debug, Clone)]
pub struct FontCollectionConfig {
    /// Enumerate the host's installed fonts into the pool
    pub use_system_fonts: bool,
    /// Directories of additional fonts, loaded before (and preferred over)
    /// system fonts
    pub attached_dirs: Vec<PathBuf>,
    /// Emit warnings for faces that could not be indexed
    pub verbose_diagnostics: bool,
}

impl Default for FontCollectionConfig {
    fn default() -> Self {
        Self {
            use_system_fonts: true,
            attached_dirs: Vec::new(),
            verbose_diagnostics: false,
        }
    }
}

/// Immutable pool of font faces, indexed by normalized family name
#[derive(Debug, Clone, Default)]
pub struct FontCollection {
    faces: Vec<FaceRecord>,
    by_key: AHashMap<String, Vec<usize>>,
}

impl FontCollection {
    /// Build the pool from the configured sources
    ///
    /// Attached directories are loaded first so their faces win score ties
    /// against system fonts. Unreadable or unparsable font files inside a
    /// directory are skipped by `fontdb`; only a configured directory that
    /// is not a directory at all is an error.
    ///
    /// # Errors
    ///
    /// Returns [`FontCheckError::FontPool`] when an entry of
    /// `attached_dirs` does not exist or is not a directory.
    pub fn build(config: &FontCollectionConfig) -> Result<Self, FontCheckError> {
        let mut db = fontdb::Database::new();

        for dir in &config.attached_dirs {
            if !dir.is_dir() {
                return Err(FontCheckError::FontPool(format!(
                    "additional font directory '{}' is not a directory",
                    dir.display()
                )));
            }
            db.load_fonts_dir(dir);
        }
        let attached_len = db.faces().count();

        if config.use_system_fonts {
            db.load_system_fonts();
        }

        let mut faces = Vec::with_capacity(db.faces().count());
        for (position, info) in db.faces().enumerate() {
            let origin = if position < attached_len {
                FaceOrigin::Attached
            } else {
                FaceOrigin::System
            };
            match FaceRecord::from_face_info(info, origin) {
                Some(record) => faces.push(record),
                None if config.verbose_diagnostics => {
                    warn!(
                        "skipping face without usable name or file path: {:?}",
                        info.post_script_name
                    );
                }
                None => {}
            }
        }

        debug!(
            "font pool ready: {} face(s), {} attached",
            faces.len(),
            attached_len
        );
        Ok(Self::from_faces(faces))
    }

    /// Build a pool directly from face records
    ///
    /// Intended for embedders and tests that already know their faces;
    /// [`FontCollection::build`] is the filesystem-backed path.
    #[must_use]
    pub fn from_faces(faces: Vec<FaceRecord>) -> Self {
        let mut by_key: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (idx, record) in faces.iter().enumerate() {
            for key in &record.keys {
                by_key.entry(key.clone()).or_default().push(idx);
            }
        }
        Self { faces, by_key }
    }

    /// All faces in load order
    #[must_use]
    pub fn faces(&self) -> &[FaceRecord] {
        &self.faces
    }

    /// Number of faces in the pool
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the pool holds no faces
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Resolve a style to the best matching face
    ///
    /// Candidates are narrowed by family key, then ranked by the strategy.
    /// Ties go to the earliest loaded face, which is what gives attached
    /// fonts their precedence.
    #[must_use]
    pub fn select(
        &self,
        style: &UsedStyle,
        strategy: &impl FontSelectionStrategy,
    ) -> Option<&FaceRecord> {
        let key = normalize_family(&style.family);
        let candidates = self.by_key.get(&key)?;

        let mut best: Option<usize> = None;
        let mut best_score = u32::MAX;
        for &idx in candidates {
            let Some(score) = strategy.score(style, &self.faces[idx]) else {
                continue;
            };
            if best.is_none() || score < best_score {
                best = Some(idx);
                best_score = score;
            }
        }
        best.map(|idx| &self.faces[idx])
    }

    /// First face (lowest face index) of a given font file
    ///
    /// The report names a matched file after its first face, mirroring how
    /// font tooling titles a collection file.
    #[must_use]
    pub fn first_face_of(&self, path: &Path) -> Option<&FaceRecord> {
        self.faces
            .iter()
            .filter(|record| record.path == path)
            .min_by_key(|record| record.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn record(family: &str, weight: u16, italic: bool, path: &str, origin: FaceOrigin) -> FaceRecord {
        FaceRecord {
            family_name: family.to_owned(),
            keys: smallvec![normalize_family(family)],
            post_script_name: family.replace(' ', ""),
            weight,
            italic,
            path: PathBuf::from(path),
            index: 0,
            origin,
        }
    }

    #[test]
    fn select_prefers_closest_weight() {
        let pool = FontCollection::from_faces(vec![
            record("Arial", 400, false, "/sys/arial.ttf", FaceOrigin::System),
            record("Arial", 700, false, "/sys/arialbd.ttf", FaceOrigin::System),
        ]);
        let face = pool
            .select(&UsedStyle::new("Arial", 700, false), &LibassStrategy)
            .unwrap();
        assert_eq!(face.path, PathBuf::from("/sys/arialbd.ttf"));
    }

    #[test]
    fn select_falls_back_across_slant() {
        let pool = FontCollection::from_faces(vec![record(
            "Arial",
            400,
            false,
            "/sys/arial.ttf",
            FaceOrigin::System,
        )]);
        // No italic face available: the regular one is still a match
        let face = pool
            .select(&UsedStyle::new("Arial", 400, true), &LibassStrategy)
            .unwrap();
        assert!(!face.italic);
    }

    #[test]
    fn attached_face_wins_score_tie() {
        let pool = FontCollection::from_faces(vec![
            record(
                "CustomFont",
                400,
                false,
                "/subs/attached_fonts/custom.ttf",
                FaceOrigin::Attached,
            ),
            record("CustomFont", 400, false, "/sys/custom.ttf", FaceOrigin::System),
        ]);
        let face = pool
            .select(&UsedStyle::new("CustomFont", 400, false), &LibassStrategy)
            .unwrap();
        assert_eq!(face.origin, FaceOrigin::Attached);
    }

    #[test]
    fn unknown_family_selects_nothing() {
        let pool = FontCollection::from_faces(vec![record(
            "Arial",
            400,
            false,
            "/sys/arial.ttf",
            FaceOrigin::System,
        )]);
        assert!(pool
            .select(&UsedStyle::new("ZzzUnknownFont123", 400, false), &LibassStrategy)
            .is_none());
    }

    #[test]
    fn first_face_of_picks_lowest_index() {
        let mut second = record("Arial", 700, false, "/sys/arial.ttc", FaceOrigin::System);
        second.index = 1;
        let mut first = record("Arial Narrow", 400, false, "/sys/arial.ttc", FaceOrigin::System);
        first.index = 0;
        let pool = FontCollection::from_faces(vec![second, first]);

        let face = pool.first_face_of(Path::new("/sys/arial.ttc")).unwrap();
        assert_eq!(face.family_name, "Arial Narrow");
    }

    #[test]
    fn build_rejects_missing_attached_dir() {
        let config = FontCollectionConfig {
            use_system_fonts: false,
            attached_dirs: vec![PathBuf::from("/definitely/not/here")],
            verbose_diagnostics: false,
        };
        let err = FontCollection::build(&config).unwrap_err();
        assert!(matches!(err, FontCheckError::FontPool(_)));
    }

    #[test]
    fn build_with_empty_dir_yields_empty_pool() {
        let tmp = tempfile::tempdir().unwrap();
        let config = FontCollectionConfig {
            use_system_fonts: false,
            attached_dirs: vec![tmp.path().to_path_buf()],
            verbose_diagnostics: false,
        };
        let pool = FontCollection::build(&config).unwrap();
        assert!(pool.is_empty());
    }
}
