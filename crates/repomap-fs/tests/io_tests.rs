use pretty_assertions::assert_eq;
use repomap_fs::{Error, io};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    io::write_atomic(&file_path, b"updated").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a/b/c.txt");

    io::write_atomic(&path, b"nested").unwrap();

    assert_eq!(fs::read_to_string(temp.path().join("a/b/c.txt")).unwrap(), "nested");
}

#[cfg(unix)]
#[test]
fn test_write_atomic_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("run.sh");
    fs::write(&file_path, "echo hi\n").unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o755)).unwrap();

    io::write_atomic(&file_path, b"# map\necho hi\n").unwrap();

    let mode = fs::metadata(&file_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[cfg(unix)]
#[test]
fn test_write_atomic_writes_through_symlink() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("real.py");
    let link = temp.path().join("link.py");
    fs::write(&target, "old\n").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    io::write_atomic(&link, b"new\n").unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
}

#[cfg(unix)]
#[test]
fn test_backslash_names_are_distinct_files() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("a")).unwrap();
    let nested = temp.path().join("a/b.py");
    let flat = temp.path().join("a\\b.py");
    fs::write(&nested, "nested").unwrap();
    fs::write(&flat, "flat").unwrap();

    assert_eq!(io::read_text(&flat).unwrap(), "flat");
    io::write_text(&flat, "rewritten").unwrap();

    assert_eq!(fs::read_to_string(&flat).unwrap(), "rewritten");
    assert_eq!(fs::read_to_string(&nested).unwrap(), "nested");
}

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "hello").unwrap();

    let content = io::read_text(&file_path).unwrap();
    assert_eq!(content, "hello");
}

#[test]
fn test_read_text_nonexistent_file() {
    let result = io::read_text(Path::new("/nonexistent/file.txt"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_is_binary_detects_undecodable_content() {
    let temp = TempDir::new().unwrap();
    let binary = temp.path().join("blob.bin");
    let text = temp.path().join("notes.txt");
    fs::write(&binary, [0x89, b'P', b'N', b'G', 0xff, 0x00]).unwrap();
    fs::write(&text, "plain text").unwrap();

    assert!(io::is_binary(&binary));
    assert!(!io::is_binary(&text));
}

#[test]
fn test_copy_preserving_times_keeps_mtime() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("src.py");
    fs::write(&source, "print('x')\n").unwrap();

    let old = SystemTime::now() - Duration::from_secs(3600 * 24);
    filetime::set_file_mtime(&source, filetime::FileTime::from_system_time(old)).unwrap();

    let destination = temp.path().join("backup/nested/src.py");
    let bytes = io::copy_preserving_times(&source, &destination).unwrap();

    assert_eq!(bytes, 11);
    let src_mtime = fs::metadata(&source).unwrap().modified().unwrap();
    let dst_mtime = fs::metadata(&destination).unwrap().modified().unwrap();
    assert_eq!(src_mtime, dst_mtime);
}

#[test]
fn test_copy_preserving_times_missing_source_fails() {
    let temp = TempDir::new().unwrap();
    let result = io::copy_preserving_times(
        &temp.path().join("missing.txt"),
        &temp.path().join("out.txt"),
    );
    assert!(result.is_err());
}
