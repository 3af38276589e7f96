//! Edge case and error handling tests for grove

#![cfg(unix)]


use harness::{TestTree, run_grove};
use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
fn test_symlink_to_directory_is_followed() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.rs", "fn file() {}");
    tree.add_dir("view");
    symlink(tree.path().join("realdir"), tree.path().join("view/linkdir"))
        .expect("Failed to create dir symlink");

    let (stdout, _stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "view"]);
    assert!(success);
    assert_eq!(stdout, "VIEW(FOLDER)\n└── linkdir(FOLDER)\n    └── file.rs\n");
}

#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.rs", "fn file() {}");
    symlink("..", tree.path().join("subdir/parent")).expect("Failed to create parent symlink");

    let (stdout, stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "subdir"]);
    assert!(success, "grove should not hang on parent symlink");
    assert!(stdout.contains("file.rs"));
    assert!(stderr.contains("warning:"));
    assert!(stderr.contains("cycle"));
}

#[test]
fn test_symlink_cycle_in_size_is_silent() {
    let tree = TestTree::new();
    tree.add_sized("loop/data.bin", 100);
    symlink(".", tree.path().join("loop/self")).expect("Failed to create self symlink");

    let (stdout, stderr, success) = run_grove(tree.path(), &["size", "loop"]);
    assert!(success);
    assert_eq!(stdout, "100 B (0.00 MB)\n");
    assert!(stderr.is_empty());
}

#[test]
fn test_cyclic_folder_does_not_stop_siblings() {
    let tree = TestTree::new();
    tree.add_file("d/a_before/x/one.txt", "1");
    tree.add_file("d/z_after/deep/deeper/two.txt", "2");
    symlink(".", tree.path().join("d/m_loop")).expect("Failed to create self symlink");

    let (stdout, stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "d"]);
    assert!(success);
    assert!(stdout.contains("m_loop(FOLDER)\n"));
    assert!(stdout.contains("one.txt"));
    assert!(stdout.contains("deeper(FOLDER)\n"));
    assert!(stdout.contains("└── two.txt"));
    assert_eq!(stderr.matches("warning:").count(), 1);
    assert!(stderr.contains("m_loop"));
}

#[test]
fn test_broken_symlink_is_skipped() {
    let tree = TestTree::new();
    tree.add_file("d/real.txt", "real");
    symlink(tree.path().join("missing"), tree.path().join("d/broken"))
        .expect("Failed to create broken symlink");

    let (stdout, _stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "d"]);
    assert!(success);
    assert!(stdout.contains("real.txt"));
    assert!(!stdout.contains("broken"));
}

// ============================================================================
// Permission Edge Cases
// ============================================================================

/// Running as root bypasses permission bits; those tests have nothing to show.
fn permissions_enforced(path: &std::path::Path) -> bool {
    let enforced = fs::read_dir(path).is_err();
    if !enforced {
        eprintln!("skipped: directory permissions are not enforced for this user");
    }
    enforced
}

#[test]
fn test_unreadable_directory_is_contained() {
    let tree = TestTree::new();
    tree.add_file("d/a_before/one.txt", "1");
    tree.add_file("d/locked/secret.txt", "s");
    tree.add_file("d/z_after/two.txt", "2");

    let locked = tree.path().join("d/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if permissions_enforced(&locked) {
        let (stdout, stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "d"]);
        assert!(success, "scan should complete despite an unreadable folder");
        assert!(stdout.contains("locked(FOLDER)"));
        assert!(!stdout.contains("secret.txt"));
        assert!(stdout.contains("one.txt"));
        assert!(stdout.contains("two.txt"));
        assert!(stderr.contains("access denied"));
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_unreadable_directory_adds_zero_size() {
    let tree = TestTree::new();
    tree.add_sized("d/open.bin", 10);
    tree.add_sized("d/locked/hidden.bin", 1000);

    let locked = tree.path().join("d/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if permissions_enforced(&locked) {
        let (stdout, stderr, success) = run_grove(tree.path(), &["size", "d"]);
        assert!(success);
        assert_eq!(stdout, "10 B (0.00 MB)\n");
        assert!(stderr.is_empty());
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

// ============================================================================
// Naming Edge Cases
// ============================================================================

#[test]
fn test_filename_with_spaces() {
    let tree = TestTree::new();
    tree.add_file("d/my file.txt", "");

    let (stdout, _stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "d"]);
    assert!(success);
    assert!(stdout.contains("└── my file.txt"));
}

#[test]
fn test_filename_with_unicode() {
    let tree = TestTree::new();
    tree.add_file("données/résumé.txt", "");
    tree.add_file("données/日本語.md", "");

    let (stdout, _stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "données"]);
    assert!(success);
    assert!(stdout.starts_with("DONNÉES(FOLDER)\n"));
    assert!(stdout.contains("résumé.txt"));
    assert!(stdout.contains("日本語.md"));
}

#[test]
fn test_find_is_case_insensitive_for_unicode() {
    let tree = TestTree::new();
    tree.add_dir("root/Ünïcode");

    let (stdout, _stderr, success) = run_grove(tree.path(), &["find", "root", "üNÏCODE"]);
    assert!(success);
    assert!(stdout.trim_end().ends_with("Ünïcode"));
}

#[test]
fn test_dotfiles_are_listed() {
    let tree = TestTree::new();
    tree.add_file("d/.hidden", "");
    tree.add_file("d/.config/settings", "");

    let (stdout, _stderr, success) = run_grove(tree.path(), &["--no-size", "tree", "d"]);
    assert!(success);
    assert!(stdout.contains(".hidden"));
    assert!(stdout.contains(".config(FOLDER)"));

    let (listing, _stderr, success) = run_grove(tree.path(), &["files", "d", "-r"]);
    assert!(success);
    assert_eq!(listing.lines().count(), 4);
}

#[test]
fn test_zero_byte_and_empty_nested_dirs() {
    let tree = TestTree::new();
    tree.add_file("d/empty.txt", "");
    tree.add_dir("d/a/b/c");

    let (stdout, _stderr, success) = run_grove(tree.path(), &["tree", "d"]);
    assert!(success);
    let expected = "\
D(FOLDER)
├── empty.txt (0 B) (0.00 MB)
└── a(FOLDER)
    └── b(FOLDER)
        └── c(FOLDER)
";
    assert_eq!(stdout, expected);
}
