//! Directory pagination: any chunking concatenates to the full listing.

use embedfs::runtime::{EmbeddedFs, Metadata};
use proptest::prelude::*;
use std::io::SeekFrom;

fn fs_with_entries(n: usize) -> EmbeddedFs {
    let mut builder = EmbeddedFs::builder();
    builder.dir("/", "/", (0, 0));
    let paths: Vec<String> = (0..n).map(|i| format!("/entry{:03}", i)).collect();
    for path in &paths {
        builder.file(path, path.trim_start_matches('/'), (0, 0), Vec::<u8>::new());
    }
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    builder.entries("/", &refs);
    builder.build()
}

fn names(entries: &[Metadata]) -> Vec<String> {
    entries.iter().map(|m| m.name.clone()).collect()
}

fn full_listing(fs: &EmbeddedFs) -> Vec<String> {
    let mut root = fs.open("/").unwrap();
    names(&root.read_dir(0).unwrap().unwrap())
}

#[test]
fn fixed_chunkings_agree_over_three_entries() {
    let fs = fs_with_entries(3);
    let expected = full_listing(&fs);

    for chunking in [vec![2, 1], vec![1, 1, 1], vec![0]] {
        let mut root = fs.open("/").unwrap();
        let mut collected = Vec::new();
        for count in chunking {
            if let Some(entries) = root.read_dir(count).unwrap() {
                collected.extend(names(&entries));
            }
        }
        assert_eq!(collected, expected);
    }
}

#[test]
fn listing_is_sorted_by_path() {
    let mut builder = EmbeddedFs::builder();
    builder.dir("/", "/", (0, 0));
    for name in ["zeta", "alpha", "mid"] {
        let path = format!("/{}", name);
        builder.file(&path, name, (0, 0), Vec::<u8>::new());
    }
    // Wiring order is what the generator produced: already sorted.
    builder.entries("/", &["/alpha", "/mid", "/zeta"]);
    let fs = builder.build();

    assert_eq!(full_listing(&fs), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn exhaustion_signals_depend_on_count_sign() {
    let fs = fs_with_entries(2);
    let mut root = fs.open("/").unwrap();
    root.read_dir(5).unwrap().unwrap();

    // Positive count at exhaustion: end of stream.
    assert!(root.read_dir(1).unwrap().is_none());
    // Non-positive count at exhaustion: empty result, no end-of-stream.
    assert_eq!(root.read_dir(0).unwrap().unwrap().len(), 0);
    assert_eq!(root.read_dir(-3).unwrap().unwrap().len(), 0);
}

proptest! {
    #[test]
    fn any_chunking_concatenates_to_the_full_listing(
        n in 0usize..12,
        chunks in proptest::collection::vec(1isize..5, 0..10),
    ) {
        let fs = fs_with_entries(n);
        let expected = full_listing(&fs);

        let mut root = fs.open("/").unwrap();
        let mut collected = Vec::new();
        for count in chunks {
            match root.read_dir(count).unwrap() {
                Some(entries) => collected.extend(names(&entries)),
                None => break,
            }
        }
        // Drain whatever the random chunking left over.
        if let Some(rest) = root.read_dir(0).unwrap() {
            collected.extend(names(&rest));
        }
        prop_assert_eq!(collected, expected);
    }

    #[test]
    fn seek_to_start_always_resets(
        n in 1usize..10,
        consumed in 0isize..12,
    ) {
        let fs = fs_with_entries(n);
        let expected = full_listing(&fs);

        let mut root = fs.open("/").unwrap();
        let _ = root.read_dir(consumed.max(1)).unwrap();
        root.seek(SeekFrom::Start(0)).unwrap();
        prop_assert_eq!(names(&root.read_dir(0).unwrap().unwrap()), expected);
    }
}
