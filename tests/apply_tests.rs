//! End-to-end tests: parse a template and apply it to real target files

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use prismo_template::{apply, Palette, TemplateError};

fn palette(pairs: &[(&str, &str)]) -> Palette {
    pairs.iter().copied().collect()
}

fn apply_to(source: &str, colors: &Palette, path: &Path) {
    apply(source, colors, path.to_str().expect("utf-8 path")).expect("apply should succeed");
}

#[test]
fn test_set_line_pads_short_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "Line 1\nLine 2\nLine 3").unwrap();

    let colors = palette(&[("color0", "#ff0000")]);
    apply_to("@line 5\nX={color0}", &colors, &target);

    let result = fs::read_to_string(&target).unwrap();
    assert_eq!(result, "Line 1\nLine 2\nLine 3\n\nX=ff0000");
}

#[test]
fn test_match_rewrites_whole_line() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "old theme line").unwrap();

    let colors = palette(&[("color2", "#0000ff")]);
    apply_to("@match \"theme\"\ntheme = {color2}", &colors, &target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "theme = 0000ff");
}

#[test]
fn test_full_overwrites_regardless_of_prior_contents() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "anything\nat all\nhere").unwrap();

    let colors = palette(&[("bg", "#112233")]);
    apply_to("@full\nbackground {bg}", &colors, &target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "background 112233");
}

#[test]
fn test_range_replacement_shifts_length() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "1\n2\n3\n4\n5").unwrap();

    // One replacement line over a three-line range: net -2.
    let colors = Palette::default();
    apply_to("@lines 2-4\nmerged", &colors, &target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "1\nmerged\n5");
}

#[test]
fn test_append_twice_appends_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "base").unwrap();

    let colors = Palette::default();
    apply_to("@append\nmore", &colors, &target);
    apply_to("@append\nmore", &colors, &target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "base\nmore\nmore");
}

#[test]
fn test_match_is_idempotent_when_replacement_does_not_match() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "pointer_color = old\nother = 1").unwrap();

    let colors = palette(&[("c", "#abcdef")]);
    let source = "@match \"pointer\"\ncursor = {c}";
    apply_to(source, &colors, &target);
    let first = fs::read_to_string(&target).unwrap();
    apply_to(source, &colors, &target);
    let second = fs::read_to_string(&target).unwrap();

    assert_eq!(first, "cursor = abcdef\nother = 1");
    assert_eq!(first, second);
}

#[test]
fn test_missing_target_starts_empty_and_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/deeper/out.conf");

    let colors = palette(&[("fg", "#ffffff")]);
    apply_to("@prepend\nforeground {fg}", &colors, &target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "foreground ffffff");
}

#[test]
fn test_set_line_with_multiline_content_keeps_single_slot() {
    // The multi-line block lands in one nominal slot; the embedded break
    // only expands at write time, so the line after the slot survives.
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "a\nb\nc").unwrap();

    let colors = Palette::default();
    apply_to("@line 2\nfirst\nsecond", &colors, &target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "a\nfirst\nsecond\nc");
}

#[test]
fn test_legacy_encoded_target_does_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("legacy.conf");
    // "caf\xe9" is Windows-1252, not valid UTF-8.
    fs::write(&target, [b'c', b'a', b'f', 0xE9]).unwrap();

    let colors = Palette::default();
    apply_to("@append\nnext", &colors, &target);

    assert_eq!(fs::read_to_string(&target).unwrap(), "café\nnext");
}

#[test]
fn test_env_var_in_target_path() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("PRISMO_APPLY_TEST_DIR", dir.path());

    let colors = Palette::default();
    apply(
        "@append\nhello",
        &colors,
        "$PRISMO_APPLY_TEST_DIR/env.conf",
    )
    .expect("apply should succeed");

    assert_eq!(
        fs::read_to_string(dir.path().join("env.conf")).unwrap(),
        "hello"
    );
}

#[test]
fn test_failed_operation_leaves_target_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "precious").unwrap();

    // First operation succeeds in memory, second fails: nothing may be
    // written back.
    let colors = Palette::default();
    let err = apply(
        "@append\nchanged\n@match \"[bad\"\nx",
        &colors,
        target.to_str().unwrap(),
    )
    .expect_err("invalid pattern must fail");
    assert!(matches!(err, TemplateError::Apply(_)));

    assert_eq!(fs::read_to_string(&target).unwrap(), "precious");
}

#[test]
fn test_operations_compose_on_one_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.conf");
    fs::write(&target, "keep\naccent = none\nkeep too").unwrap();

    let colors = palette(&[("color1", "#00ff00"), ("color4", "#123456")]);
    let source = "\
@prepend
# generated header

@match \"accent\"
accent = {color1}

@append
extra = {color4}";
    apply_to(source, &colors, &target);

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "# generated header\nkeep\naccent = 00ff00\nkeep too\nextra = 123456"
    );
}
