use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tempfile::tempdir;
use xmark::{absolutize, locate_library, preload_value};

#[test]
fn absolutize_keeps_absolute_paths() {
    let result = absolutize("/opt/xmark/libxmark_preload.so").expect("absolutize");
    assert_eq!(result, Path::new("/opt/xmark/libxmark_preload.so"));
}

#[test]
fn absolutize_resolves_existing_file() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("lib.so");
    fs::write(&file, b"").expect("write");
    let result = absolutize(file.to_str().unwrap()).expect("absolutize");
    assert_eq!(result, file.canonicalize().unwrap());
}

#[test]
fn absolutize_joins_relative_missing_path_onto_cwd() {
    let result = absolutize("does-not-exist/lib.so").expect("absolutize");
    assert!(result.is_absolute());
    assert!(result.ends_with("does-not-exist/lib.so"));
}

#[test]
fn explicit_library_wins() {
    let path = locate_library(Some("/usr/lib/xmark/libxmark_preload.so")).expect("locate");
    assert_eq!(path, Path::new("/usr/lib/xmark/libxmark_preload.so"));
}

#[test]
fn default_library_has_module_file_name() {
    let path = locate_library(None).expect("locate");
    assert!(path.is_absolute());
    assert_eq!(path.file_name(), Some(OsStr::new(xmark::LIBRARY_FILE)));
}

#[test]
fn preload_value_without_existing_entries() {
    let value = preload_value(Path::new("/x/libxmark_preload.so"), None);
    assert_eq!(value, OsString::from("/x/libxmark_preload.so"));
    let value = preload_value(Path::new("/x/libxmark_preload.so"), Some(OsStr::new("")));
    assert_eq!(value, OsString::from("/x/libxmark_preload.so"));
}

#[test]
fn preload_value_puts_module_first_and_keeps_others() {
    let value = preload_value(
        Path::new("/x/libxmark_preload.so"),
        Some(OsStr::new("/a/liba.so /b/libb.so")),
    );
    assert_eq!(value, OsString::from("/x/libxmark_preload.so:/a/liba.so:/b/libb.so"));
}

#[test]
fn preload_value_does_not_duplicate_module() {
    let value = preload_value(
        Path::new("/x/libxmark_preload.so"),
        Some(OsStr::new("/x/libxmark_preload.so:/a/liba.so")),
    );
    assert_eq!(value, OsString::from("/x/libxmark_preload.so:/a/liba.so"));
}

#[test]
fn preload_value_keeps_non_utf8_entries_byte_for_byte() {
    let existing = OsStr::from_bytes(b"/opt/caf\xe9/libc.so:/a/liba.so");
    let value = preload_value(Path::new("/x/libxmark_preload.so"), Some(existing));
    assert_eq!(value.as_bytes(), b"/x/libxmark_preload.so:/opt/caf\xe9/libc.so:/a/liba.so");
}
