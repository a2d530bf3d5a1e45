use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use snapbox::cmd::cargo_bin;
use snapbox::cmd::Command;

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn snapshot(case: &Path, content: &str) {
    std::fs::write(snapshot_path(case), content).unwrap();
}

fn snapshot_path(case: &Path) -> PathBuf {
    let mut path = case.as_os_str().to_owned();
    path.push(".snapshot");
    path.into()
}

fn snaprun() -> Command {
    Command::new(cargo_bin!("snaprun"))
        .env_remove("SNAPRUN")
        .arg("--color")
        .arg("never")
}

/// `a` passes, `b` has a changed line, `c` has never been recorded
fn scenario() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let a = script(dir.path(), "a", "echo hello");
    snapshot(&a, "hello\n");
    let b = script(dir.path(), "b", "echo goodbye");
    snapshot(&b, "hello\n");
    script(dir.path(), "c", "echo new");
    dir
}

#[test]
fn mixed_suite() {
    let dir = scenario();
    let root = dir.path();

    snaprun()
        .arg(root.join("a"))
        .arg(root.join("b"))
        .arg(root.join("c"))
        .assert()
        .code(1)
        .stdout_eq(
            "\
a        PASSED\t[..]
b        FAILED\t[..]
c        SKIPPED\t0s
1 passed, 1 failed, 1 skipped
",
        )
        .stderr_eq(
            "
--- [..]/b.snapshot (expected)
+++ [..]/b (actual)
   1      - hello
        1 + goodbye
",
        );

    assert_eq!(std::fs::read(root.join("b.snapshot")).unwrap(), b"hello\n");
    assert!(!root.join("c.snapshot").exists());
}

#[test]
fn quiet_hides_diff() {
    let dir = scenario();

    snaprun()
        .arg("-q")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr_eq("");
}

#[test]
fn update_then_pass() {
    let dir = scenario();

    snaprun()
        .arg("-u")
        .arg(dir.path())
        .assert()
        .success()
        .stderr_eq("");
    assert_eq!(
        std::fs::read(dir.path().join("b.snapshot")).unwrap(),
        b"goodbye\n"
    );
    assert_eq!(
        std::fs::read(dir.path().join("c.snapshot")).unwrap(),
        b"new\n"
    );

    let output = snaprun().arg(dir.path()).assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    assert!(stdout.ends_with("3 passed\n"), "{stdout}");
}

#[test]
fn update_from_env() {
    let dir = scenario();

    let output = snaprun()
        .env("SNAPRUN", "overwrite")
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    assert!(stdout.ends_with("3 updated\n"), "{stdout}");
}

#[test]
fn process_failure_is_reported_even_when_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let case = script(dir.path(), "broken", "echo oops; exit 2");
    snapshot(&case, "oops\n");

    snaprun()
        .arg("-q")
        .arg(&case)
        .assert()
        .code(1)
        .stdout_eq(
            "\
broken        FAILED\t[..]
1 failed
",
        )
        .stderr_eq(
            "\
Exit: 2
",
        );
}

#[test]
fn skipped_only_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    script(dir.path(), "fresh", "echo hi");

    snaprun()
        .arg(dir.path())
        .assert()
        .success()
        .stdout_eq(
            "\
fresh        SKIPPED\t0s
1 skipped
",
        );
}

#[test]
fn no_cases_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a case").unwrap();

    snaprun()
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout_eq("")
        .stderr_eq(
            "\
No test cases found
",
        );
}

#[test]
fn no_paths() {
    snaprun()
        .assert()
        .code(1)
        .stderr_eq(
            "\
No test cases found
",
        );
}

#[test]
fn missing_path_aborts() {
    let dir = scenario();

    snaprun()
        .arg(dir.path())
        .arg(dir.path().join("missing"))
        .assert()
        .code(1)
        .stdout_eq("")
        .stderr_eq(
            "\
Error parsing paths: Failed to read [..]/missing: [..]
",
        );
}

#[test]
fn timeout() {
    let dir = tempfile::tempdir().unwrap();
    // The shell is killed, its `sleep` child lives on
    let case = script(dir.path(), "slow", "sleep 5\necho done");
    snapshot(&case, "done\n");

    let start = std::time::Instant::now();
    snaprun()
        .arg("--timeout")
        .arg("200ms")
        .arg(&case)
        .assert()
        .code(1)
        .stderr_eq(
            "\
timed out after 200ms
",
        );
    assert!(start.elapsed() < std::time::Duration::from_secs(4));
}

#[test]
fn directory_cases_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["zeta", "alpha", "mid"] {
        let case = script(dir.path(), name, &format!("echo {name}"));
        snapshot(&case, &format!("{name}\n"));
    }

    snaprun()
        .arg(dir.path())
        .assert()
        .success()
        .stdout_eq(
            "\
alpha        PASSED\t[..]
mid          PASSED\t[..]
zeta         PASSED\t[..]
3 passed
",
        );
}

#[test]
fn parallel_jobs_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut cases = Vec::new();
    for i in 0..6 {
        let case = script(dir.path(), &format!("case{i}"), &format!("echo {i}"));
        snapshot(&case, &format!("{i}\n"));
        cases.push(case);
    }

    snaprun()
        .arg("-j")
        .arg("3")
        .args(&cases)
        .assert()
        .success()
        .stdout_eq(
            "\
case0        PASSED\t[..]
case1        PASSED\t[..]
case2        PASSED\t[..]
case3        PASSED\t[..]
case4        PASSED\t[..]
case5        PASSED\t[..]
6 passed
",
        );
}
