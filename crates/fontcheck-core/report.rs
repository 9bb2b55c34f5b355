//! Result document assembly
//!
//! Partitions resolved styles into the two output buckets. Every distinct
//! used style lands in exactly one: matched faces contribute their owning
//! file to `found_fonts` (deduplicated by file identity, since several
//! styles often resolve into one file), unmatched styles contribute their
//! family name to `not_found_font_names`.
//!
//! Both lists are sorted so repeated runs over an unchanged filesystem
//! produce byte-identical output.

use crate::analysis::UsedStyle;
use crate::fonts::{FontCollection, FontSelectionStrategy};
use ahash::AHashMap;
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One matched font file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundFont {
    /// Resolved absolute path of the font file
    pub path: String,
    /// Best family name of the file's first face
    pub family_name: String,
}

/// Outcome of a font check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontReport {
    /// Matched font files, unique per file, sorted by path
    pub found_fonts: Vec<FoundFont>,
    /// Family names that resolved to no face, sorted and unique
    pub not_found_font_names: Vec<String>,
}

/// Resolve every used style against the pool and assemble the report
#[must_use]
pub fn build_report(
    styles: &[UsedStyle],
    collection: &FontCollection,
    strategy: &impl FontSelectionStrategy,
) -> FontReport {
    let mut found: AHashMap<PathBuf, FoundFont> = AHashMap::new();
    let mut not_found: BTreeSet<String> = BTreeSet::new();

    for style in styles {
        match collection.select(style, strategy) {
            Some(face) => {
                let resolved = std::fs::canonicalize(&face.path)
                    .unwrap_or_else(|_| face.path.clone());
                found.entry(resolved.clone()).or_insert_with(|| {
                    let family_name = collection
                        .first_face_of(&face.path)
                        .map_or_else(|| face.family_name.clone(), |f| f.family_name.clone());
                    FoundFont {
                        path: resolved.to_string_lossy().into_owned(),
                        family_name,
                    }
                });
            }
            None => {
                not_found.insert(style.family.clone());
            }
        }
    }

    let mut found_fonts: Vec<FoundFont> = found.into_values().collect();
    found_fonts.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        "report: {} file(s) found, {} name(s) missing",
        found_fonts.len(),
        not_found.len()
    );

    FontReport {
        found_fonts,
        not_found_font_names: not_found.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{normalize_family, FaceOrigin, FaceRecord, LibassStrategy};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn record(family: &str, weight: u16, italic: bool, path: &str) -> FaceRecord {
        FaceRecord {
            family_name: family.to_owned(),
            keys: smallvec![normalize_family(family)],
            post_script_name: family.replace(' ', ""),
            weight,
            italic,
            path: PathBuf::from(path),
            index: 0,
            origin: FaceOrigin::System,
        }
    }

    #[test]
    fn styles_matching_one_file_deduplicate() {
        let pool = FontCollection::from_faces(vec![record("Arial", 400, false, "/f/arial.ttf")]);
        let styles = vec![
            UsedStyle::new("Arial", 400, false),
            UsedStyle::new("Arial", 700, false),
            UsedStyle::new("Arial", 400, true),
        ];
        let report = build_report(&styles, &pool, &LibassStrategy);
        assert_eq!(report.found_fonts.len(), 1);
        assert_eq!(report.found_fonts[0].family_name, "Arial");
        assert!(report.not_found_font_names.is_empty());
    }

    #[test]
    fn unmatched_names_sorted_and_unique() {
        let pool = FontCollection::from_faces(Vec::new());
        let styles = vec![
            UsedStyle::new("Zeta", 400, false),
            UsedStyle::new("Alpha", 400, false),
            UsedStyle::new("Zeta", 700, false),
        ];
        let report = build_report(&styles, &pool, &LibassStrategy);
        assert!(report.found_fonts.is_empty());
        assert_eq!(report.not_found_font_names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn every_style_lands_in_exactly_one_bucket() {
        let pool = FontCollection::from_faces(vec![record("Arial", 400, false, "/f/arial.ttf")]);
        let styles = vec![
            UsedStyle::new("Arial", 400, false),
            UsedStyle::new("ZzzUnknownFont123", 400, false),
        ];
        let report = build_report(&styles, &pool, &LibassStrategy);
        assert_eq!(report.found_fonts.len(), 1);
        assert_eq!(report.not_found_font_names, vec!["ZzzUnknownFont123"]);
    }

    #[test]
    fn found_fonts_sorted_by_path() {
        let pool = FontCollection::from_faces(vec![
            record("Zed", 400, false, "/f/zed.ttf"),
            record("Abc", 400, false, "/f/abc.ttf"),
        ]);
        let styles = vec![
            UsedStyle::new("Zed", 400, false),
            UsedStyle::new("Abc", 400, false),
        ];
        let report = build_report(&styles, &pool, &LibassStrategy);
        let paths: Vec<&str> = report.found_fonts.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["/f/abc.ttf", "/f/zed.ttf"]);
    }

    #[test]
    fn family_name_comes_from_first_face_of_file() {
        let mut narrow = record("Arial Narrow", 400, false, "/f/arial.ttc");
        narrow.index = 0;
        let mut bold = record("Arial", 700, false, "/f/arial.ttc");
        bold.index = 1;
        let pool = FontCollection::from_faces(vec![narrow, bold]);

        let styles = vec![UsedStyle::new("Arial", 700, false)];
        let report = build_report(&styles, &pool, &LibassStrategy);
        assert_eq!(report.found_fonts[0].family_name, "Arial Narrow");
    }

    #[test]
    fn report_serializes_with_expected_shape() {
        let report = FontReport {
            found_fonts: vec![FoundFont {
                path: "/f/arial.ttf".into(),
                family_name: "Arial".into(),
            }],
            not_found_font_names: vec!["Ghost".into()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["found_fonts"][0]["path"], "/f/arial.ttf");
        assert_eq!(json["found_fonts"][0]["family_name"], "Arial");
        assert_eq!(json["not_found_font_names"][0], "Ghost");
    }
}
