use xmark_core::{version, Hook};

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn hook_set_is_the_five_intercepted_entry_points() {
    let names: Vec<&str> = Hook::ALL.iter().map(|hook| hook.name()).collect();
    assert_eq!(
        names,
        vec!["XCopyArea", "cairo_xlib_surface_create", "cairo_paint", "XMapWindow", "XUnmapWindow"]
    );
}
