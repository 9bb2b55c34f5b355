//! End-to-end pipeline tests
//!
//! Exercise [`fontcheck_core::check_subtitle`] against real files on disk.
//! Pools are built with `use_system_fonts = false` so results do not depend
//! on whatever fonts the host happens to have installed.

use fontcheck_core::{
    analysis::{used_styles, UsedStyle},
    check_subtitle,
    fonts::{normalize_family, FaceOrigin, FaceRecord, FontCollection, LibassStrategy},
    parser::Script,
    report::build_report,
    CheckOptions, FontCheckError,
};
use smallvec::smallvec;
use std::fs;
use std::path::{Path, PathBuf};

const SCRIPT: &str = "[Script Info]\n\
Title: Pipeline test\n\
\n\
[V4+ Styles]\n\
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
Style: Default,ZzzUnknownFont123,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1\n\
\n\
[Events]\n\
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,Hello world\n";

fn hermetic() -> CheckOptions {
    CheckOptions {
        use_system_fonts: false,
        verbose_diagnostics: false,
    }
}

fn write_script(dir: &Path) -> PathBuf {
    let path = dir.join("episode01.ass");
    fs::write(&path, SCRIPT).unwrap();
    path
}

#[test]
fn missing_input_is_io_error() {
    let err = check_subtitle(Path::new("/no/such/file.ass"), &hermetic()).unwrap_err();
    assert!(matches!(err, FontCheckError::Io { .. }));
    assert_eq!(err.kind(), "io");
}

#[test]
fn non_ass_input_is_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("not_subs.txt");
    fs::write(&path, "just some prose, no sections\n").unwrap();

    let err = check_subtitle(&path, &hermetic()).unwrap_err();
    assert!(matches!(err, FontCheckError::Parse(_)));
    assert_eq!(err.kind(), "parse");
}

#[test]
fn unknown_font_lands_in_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_script(tmp.path());

    let report = check_subtitle(&path, &hermetic()).unwrap();
    assert!(report.found_fonts.is_empty());
    assert_eq!(report.not_found_font_names, vec!["ZzzUnknownFont123"]);
}

#[test]
fn empty_attached_fonts_dir_is_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_script(tmp.path());
    fs::create_dir(tmp.path().join("attached_fonts")).unwrap();

    let report = check_subtitle(&path, &hermetic()).unwrap();
    assert_eq!(report.not_found_font_names, vec!["ZzzUnknownFont123"]);
}

#[test]
fn junk_in_attached_fonts_dir_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_script(tmp.path());
    let fonts = tmp.path().join("attached_fonts");
    fs::create_dir(&fonts).unwrap();
    fs::write(fonts.join("readme.txt"), "not a font").unwrap();

    let report = check_subtitle(&path, &hermetic()).unwrap();
    assert!(report.found_fonts.is_empty());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_script(tmp.path());

    let first = serde_json::to_string_pretty(&check_subtitle(&path, &hermetic()).unwrap()).unwrap();
    let second =
        serde_json::to_string_pretty(&check_subtitle(&path, &hermetic()).unwrap()).unwrap();
    assert_eq!(first, second);
}

fn face(family: &str, weight: u16, italic: bool, path: &str, origin: FaceOrigin) -> FaceRecord {
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
fn script_to_report_with_prebuilt_pool() {
    let src = "[V4+ Styles]\n\
               Format: Name, Fontname, Bold, Italic\n\
               Style: Default,Gandhi Sans,0,0\n\
               \n\
               [Events]\n\
               Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
               Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,plain {\\b1}bold{\\b0} {\\fnGhost}missing\n";
    let script = Script::parse(src).unwrap();
    let styles = used_styles(&script);
    assert_eq!(
        styles,
        vec![
            UsedStyle::new("Gandhi Sans", 400, false),
            UsedStyle::new("Gandhi Sans", 700, false),
            UsedStyle::new("Ghost", 400, false),
        ]
    );

    let pool = FontCollection::from_faces(vec![
        face("Gandhi Sans", 400, false, "/f/gandhi.ttf", FaceOrigin::System),
        face("Gandhi Sans", 700, false, "/f/gandhi-bold.ttf", FaceOrigin::System),
    ]);
    let report = build_report(&styles, &pool, &LibassStrategy);

    let paths: Vec<&str> = report.found_fonts.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["/f/gandhi-bold.ttf", "/f/gandhi.ttf"]);
    assert_eq!(report.not_found_font_names, vec!["Ghost"]);
}
