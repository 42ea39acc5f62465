use predicates::prelude::*;

/// Without a program the launcher prints its usage and exits successfully.
#[test]
fn no_program_prints_usage_and_succeeds() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .assert()
        .success()
        .stderr(predicate::str::contains("PROGRAM"));
}

#[test]
fn print_env_lists_assignments() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .env_remove("LD_PRELOAD")
        .args(["--print-env", "--library", "/opt/xmark/libxmark_preload.so", "--text", "HELLO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GDK_BACKEND=x11"))
        .stdout(predicate::str::contains("LD_PRELOAD=/opt/xmark/libxmark_preload.so\n"))
        .stdout(predicate::str::contains("XMARK_TEXT=HELLO"));
}

#[test]
fn print_env_keeps_existing_preload_after_module() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .env("LD_PRELOAD", "/opt/other/libother.so")
        .args(["--print-env", "--library", "/opt/xmark/libxmark_preload.so"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "LD_PRELOAD=/opt/xmark/libxmark_preload.so:/opt/other/libother.so",
        ));
}

#[test]
fn backend_can_be_overridden() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .args(["--print-env", "--backend", "wayland", "--library", "/tmp/lib.so"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GDK_BACKEND=wayland"));
}

/// The target inherits the launcher's variables. A preload module that does
/// not exist is skipped by the loader with a warning, so `env` still runs.
#[test]
fn launched_program_sees_the_environment() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .env_remove("LD_PRELOAD")
        .args(["--library", "/nonexistent/libxmark_preload.so", "--text", "SEEN", "env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GDK_BACKEND=x11"))
        .stdout(predicate::str::contains("LD_PRELOAD=/nonexistent/libxmark_preload.so"))
        .stdout(predicate::str::contains("XMARK_TEXT=SEEN"));
}

#[test]
fn program_arguments_are_passed_through() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .env_remove("LD_PRELOAD")
        .args(["--library", "/nonexistent/libxmark_preload.so", "echo", "--flag", "value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--flag value"));
}

#[test]
fn unknown_program_fails() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .args(["--library", "/tmp/lib.so", "xmark-definitely-not-a-program"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to execute xmark-definitely-not-a-program"));
}

#[test]
fn missing_config_fails_before_exec() {
    assert_cmd::cargo::cargo_bin_cmd!("xmark")
        .args(["--library", "/tmp/lib.so", "--config", "/nonexistent/mark.json", "env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file does not exist"));
}
