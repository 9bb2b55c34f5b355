//! Font face records
//!
//! A [`FaceRecord`] is the collection's view of one renderable face inside a
//! font file: its display name, normalized match keys, weight/slant
//! attributes, and the file it came from. Records are built from `fontdb`
//! face metadata but carry no handle back into the database, which keeps
//! matching (and its tests) independent of real font files.

use fontdb::{FaceInfo, Language, Source};
use smallvec::SmallVec;
use std::path::PathBuf;

/// Where a face was loaded from, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FaceOrigin {
    /// Loaded from an `attached_fonts` directory next to the subtitle
    Attached,
    /// Enumerated from the host's installed fonts
    System,
}

/// One font face known to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceRecord {
    /// Best human-readable family name (English record preferred)
    pub family_name: String,

    /// Normalized match keys: every family name plus the PostScript name
    pub keys: SmallVec<[String; 4]>,

    /// PostScript name, as stored in the font
    pub post_script_name: String,

    /// OpenType weight (400 regular, 700 bold, ...)
    pub weight: u16,

    /// Whether the face is italic or oblique
    pub italic: bool,

    /// Path of the font file providing this face
    pub path: PathBuf,

    /// Face index within the file (collections hold several)
    pub index: u32,

    /// Load source, used for match tie-breaking
    pub origin: FaceOrigin,
}

impl FaceRecord {
    /// Build a record from `fontdb` face metadata
    ///
    /// Returns `None` for faces without a backing file (in-memory sources
    /// cannot be reported as a resolvable path) and for faces that expose
    /// no name at all.
    #[must_use]
    pub fn from_face_info(info: &FaceInfo, origin: FaceOrigin) -> Option<Self> {
        let path = match &info.source {
            Source::File(path) | Source::SharedFile(path, _) => path.clone(),
            Source::Binary(_) => return None,
        };

        let family_name = info
            .families
            .iter()
            .find(|(_, lang)| *lang == Language::English_UnitedStates)
            .or_else(|| info.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| info.post_script_name.clone());
        if family_name.is_empty() {
            return None;
        }

        let mut keys: SmallVec<[String; 4]> = info
            .families
            .iter()
            .map(|(name, _)| normalize_family(name))
            .collect();
        let ps_key = normalize_family(&info.post_script_name);
        if !ps_key.is_empty() && !keys.contains(&ps_key) {
            keys.push(ps_key);
        }
        keys.retain(|key| !key.is_empty());
        keys.dedup();

        Some(Self {
            family_name,
            keys,
            post_script_name: info.post_script_name.clone(),
            weight: info.weight.0,
            italic: info.style != fontdb::Style::Normal,
            path,
            index: info.index,
            origin,
        })
    }
}

/// Normalize a family name into a match key
///
/// Mirrors the comparisons libass applies before matching: surrounding
/// whitespace trimmed, the `@` vertical-layout prefix dropped, interior
/// whitespace collapsed, Unicode lowercase.
#[must_use]
pub fn normalize_family(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_prefix('@').unwrap_or(name);
    let mut key = String::with_capacity(name.len());
    let mut last_was_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !last_was_space && !key.is_empty() {
                key.push(' ');
            }
            last_was_space = true;
        } else {
            for lower in ch.to_lowercase() {
                key.push(lower);
            }
            last_was_space = false;
        }
    }
    key.truncate(key.trim_end().len());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_family("  Gandhi Sans "), "gandhi sans");
        assert_eq!(normalize_family("ARIAL"), "arial");
    }

    #[test]
    fn normalize_collapses_interior_whitespace() {
        assert_eq!(normalize_family("Times   New\tRoman"), "times new roman");
    }

    #[test]
    fn normalize_strips_vertical_prefix() {
        assert_eq!(normalize_family("@MS Gothic"), "ms gothic");
    }

    #[test]
    fn normalize_handles_non_ascii() {
        assert_eq!(normalize_family("Ötzi"), "ötzi");
        assert_eq!(normalize_family("源ノ角ゴシック"), "源ノ角ゴシック");
    }

    #[test]
    fn normalize_empty_stays_empty() {
        assert_eq!(normalize_family("   "), "");
    }
}
