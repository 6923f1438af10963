//! Runtime navigation contracts: normalization, errors, handle isolation.

use embedfs::error::FsError;
use embedfs::runtime::{EmbeddedFs, DIR_MODE, FILE_MODE};
use std::io::SeekFrom;

fn sample_fs() -> EmbeddedFs {
    let mut b = EmbeddedFs::builder();
    b.dir("/", "/", (0, 0));
    b.dir("/folderA", "folderA", (0, 0));
    b.dir("/folderB", "folderB", (0, 0));
    b.file(
        "/folderA/file1.txt",
        "file1.txt",
        (0, 0),
        b"Stuff in /folderA/file1.txt.".as_slice(),
    );
    b.entries("/", &["/folderA", "/folderB"]);
    b.entries("/folderA", &["/folderA/file1.txt"]);
    b.build()
}

#[test]
fn paths_normalize_before_lookup() {
    let fs = sample_fs();
    let direct = fs.open("/folderA/file1.txt").unwrap().stat().unwrap();
    let messy = fs
        .open("//folderB/../folderA/file1.txt")
        .unwrap()
        .stat()
        .unwrap();
    assert_eq!(messy.name, direct.name);
    assert_eq!(messy.size, direct.size);
}

#[test]
fn nonexistent_path_is_not_found() {
    let fs = sample_fs();
    let err = fs.open("/does-not-exist").unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("/does-not-exist"));
}

#[test]
fn parent_of_root_is_root() {
    let fs = sample_fs();
    let meta = fs.open("/../..").unwrap().stat().unwrap();
    assert!(meta.is_dir);
    assert_eq!(meta.name, "/");
}

#[test]
fn wrong_kind_operations_are_invalid_not_fatal() {
    let fs = sample_fs();

    let mut dir = fs.open("/folderA").unwrap();
    let mut buf = [0u8; 4];
    assert!(matches!(
        dir.read(&mut buf),
        Err(FsError::InvalidOperation { .. })
    ));
    assert!(matches!(
        dir.seek(SeekFrom::Start(7)),
        Err(FsError::InvalidOperation { .. })
    ));

    let mut file = fs.open("/folderA/file1.txt").unwrap();
    assert!(matches!(
        file.read_dir(1),
        Err(FsError::InvalidOperation { .. })
    ));

    // The handle stays usable after a rejected operation.
    assert_eq!(file.read(&mut buf).unwrap(), 4);
}

#[test]
fn stat_reports_fixed_modes() {
    let fs = sample_fs();
    let file = fs.open("/folderA/file1.txt").unwrap().stat().unwrap();
    assert_eq!(file.mode, FILE_MODE);
    assert!(!file.is_dir);
    assert_eq!(file.size, 28);

    let dir = fs.open("/folderA").unwrap().stat().unwrap();
    assert_eq!(dir.mode, DIR_MODE);
    assert!(dir.is_dir);
    assert_eq!(dir.size, 0);
}

#[test]
fn handles_do_not_share_cursors() {
    let fs = sample_fs();
    let mut a = fs.open("/folderA/file1.txt").unwrap();
    let mut b = fs.open("/folderA/file1.txt").unwrap();

    let mut buf = [0u8; 10];
    assert_eq!(a.read(&mut buf).unwrap(), 10);
    // Handle B still starts at the beginning.
    let mut head = [0u8; 5];
    assert_eq!(b.read(&mut head).unwrap(), 5);
    assert_eq!(&head, b"Stuff");

    let mut dir_a = fs.open("/").unwrap();
    let mut dir_b = fs.open("/").unwrap();
    dir_a.read_dir(1).unwrap().unwrap();
    let fresh = dir_b.read_dir(0).unwrap().unwrap();
    assert_eq!(fresh.len(), 2);
}

#[test]
fn registry_is_shareable_across_threads() {
    let fs = std::sync::Arc::new(sample_fs());
    let mut joins = Vec::new();
    for _ in 0..4 {
        let fs = fs.clone();
        joins.push(std::thread::spawn(move || {
            let mut handle = fs.open("/folderA/file1.txt").unwrap();
            let mut buf = [0u8; 28];
            assert_eq!(handle.read(&mut buf).unwrap(), 28);
            buf.to_vec()
        }));
    }
    for join in joins {
        assert_eq!(join.join().unwrap(), b"Stuff in /folderA/file1.txt.");
    }
}

#[test]
fn empty_directory_lists_cleanly() {
    let fs = sample_fs();
    let mut dir = fs.open("/folderB").unwrap();
    assert_eq!(dir.read_dir(0).unwrap().unwrap().len(), 0);
    assert!(dir.read_dir(1).unwrap().is_none());
}

#[test]
fn corrupt_wiring_reports_unexpected_state() {
    let mut b = EmbeddedFs::builder();
    b.dir("/", "/", (0, 0));
    b.entries("/", &["/phantom"]);
    let fs = b.build();

    let mut root = fs.open("/").unwrap();
    let err = root.read_dir(0).unwrap_err();
    assert!(matches!(err, FsError::UnexpectedState(_)));
    assert!(err.to_string().contains("/phantom"));
}

#[test]
fn close_is_always_safe() {
    let fs = sample_fs();
    let mut file = fs.open("/folderA/file1.txt").unwrap();
    let mut dir = fs.open("/").unwrap();
    file.close().unwrap();
    file.close().unwrap();
    dir.close().unwrap();
}
