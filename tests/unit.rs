use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tamefiles::{
    IdentityKey, Strategy, TamefilesError, find_duplicates, find_duplicates_by_content,
    find_duplicates_by_name, find_duplicates_by_size, hash_file, minimal_cover, top_n_largest,
    total_size,
};
use tempfile::tempdir;

const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

fn write_sized(dir: &Path, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![b'x'; size]).unwrap();
    path
}

/// root/
///   file1.txt "A"
///   file2.txt "B"
///   sub1/file1.txt "A"
///   sub1/file3.txt "C"
///   sub2/file4.txt "A"
///   sub2/unique.txt "Unique"
fn workspace(base: &Path) -> PathBuf {
    let root = base.join("workspace");
    fs::create_dir_all(root.join("sub1")).unwrap();
    fs::create_dir_all(root.join("sub2")).unwrap();
    fs::write(root.join("file1.txt"), "A").unwrap();
    fs::write(root.join("file2.txt"), "B").unwrap();
    fs::write(root.join("sub1/file1.txt"), "A").unwrap();
    fs::write(root.join("sub1/file3.txt"), "C").unwrap();
    fs::write(root.join("sub2/file4.txt"), "A").unwrap();
    fs::write(root.join("sub2/unique.txt"), "Unique").unwrap();
    root
}

#[test]
fn test_largest_files_basic() {
    let dir = tempdir().unwrap();
    for (name, size) in [
        ("small.txt", 100),
        ("medium.txt", 500),
        ("large.txt", 1000),
        ("tiny.txt", 50),
        ("huge.txt", 2000),
    ] {
        write_sized(dir.path(), name, size);
    }
    let result = top_n_largest(dir.path(), 3);
    let sizes: Vec<u64> = result.iter().map(|f| f.size_bytes).collect();
    assert_eq!(sizes, vec![2000, 1000, 500]);
    assert!(result.iter().all(|f| f.path.is_absolute()));
    assert_eq!(
        result[0].path,
        fs::canonicalize(dir.path().join("huge.txt")).unwrap()
    );
}

#[test]
fn test_largest_files_n_greater_than_count() {
    let dir = tempdir().unwrap();
    for (i, size) in [100, 200, 300].into_iter().enumerate() {
        write_sized(dir.path(), &format!("file_{}.txt", i), size);
    }
    let result = top_n_largest(dir.path(), 10);
    let sizes: Vec<u64> = result.iter().map(|f| f.size_bytes).collect();
    assert_eq!(sizes, vec![300, 200, 100]);
}

#[test]
fn test_largest_files_ties_break_by_path() {
    let dir = tempdir().unwrap();
    write_sized(dir.path(), "b.txt", 100);
    write_sized(dir.path(), "c.txt", 200);
    write_sized(dir.path(), "a.txt", 100);
    write_sized(dir.path(), "d.txt", 100);
    let result = top_n_largest(dir.path(), 3);
    let names: Vec<_> = result
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["c.txt", "a.txt", "b.txt"]);
}

#[test]
fn test_largest_files_walks_subdirectories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
    write_sized(dir.path(), "top.bin", 10);
    write_sized(&dir.path().join("a/b/c"), "deep.bin", 900);
    let result = top_n_largest(dir.path(), 1);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].size_bytes, 900);
    assert!(result[0].path.ends_with("a/b/c/deep.bin"));
}

#[test]
fn test_largest_files_zero_n() {
    let dir = tempdir().unwrap();
    write_sized(dir.path(), "a", 1);
    assert!(top_n_largest(dir.path(), 0).is_empty());
}

#[test]
fn test_size_queries_treat_bad_root_as_empty() {
    let dir = tempdir().unwrap();
    let file = write_sized(dir.path(), "plain.txt", 10);
    let missing = dir.path().join("missing");
    assert!(top_n_largest(&missing, 5).is_empty());
    assert!(top_n_largest(&file, 5).is_empty());
    assert!(minimal_cover(&missing, 5).is_empty());
    assert!(minimal_cover(&file, 5).is_empty());
    assert_eq!(total_size(&missing), 0);
}

#[test]
fn test_files_to_free_space_exact_threshold() {
    let dir = tempdir().unwrap();
    for (name, size) in [
        ("file1.txt", 100),
        ("file2.txt", 200),
        ("file3.txt", 300),
        ("file4.txt", 400),
    ] {
        write_sized(dir.path(), name, size);
    }
    let result = minimal_cover(dir.path(), 500);
    let sizes: Vec<u64> = result.iter().map(|f| f.size_bytes).collect();
    assert_eq!(sizes, vec![400, 300]);
    assert_eq!(sizes.iter().sum::<u64>(), 700);
}

#[test]
fn test_files_to_free_space_exceeding_total() {
    let dir = tempdir().unwrap();
    write_sized(dir.path(), "file1.txt", 100);
    write_sized(dir.path(), "file2.txt", 200);
    let result = minimal_cover(dir.path(), 1000);
    assert_eq!(result.len(), 2);
    assert_eq!(result.iter().map(|f| f.size_bytes).sum::<u64>(), 300);
    assert_eq!(total_size(dir.path()), 300);
}

#[test]
fn test_files_to_free_space_zero_or_negative_target() {
    let dir = tempdir().unwrap();
    write_sized(dir.path(), "file1.txt", 100);
    assert!(minimal_cover(dir.path(), 0).is_empty());
    assert!(minimal_cover(dir.path(), -100).is_empty());
}

#[test]
fn test_files_to_free_space_prefix_is_minimal() {
    let dir = tempdir().unwrap();
    for (i, size) in [7, 13, 1, 42, 42, 5, 99, 3].into_iter().enumerate() {
        write_sized(dir.path(), &format!("f{}", i), size);
    }
    let total = total_size(dir.path()) as i64;
    for target in [1, 50, 99, 100, 141, 183, 200, total] {
        let result = minimal_cover(dir.path(), target);
        let sizes: Vec<u64> = result.iter().map(|f| f.size_bytes).collect();
        let sum: u64 = sizes.iter().sum();
        assert!(sum >= target as u64, "target {} not met", target);
        let without_last = sum - sizes.last().copied().unwrap();
        assert!(without_last < target as u64, "target {} overshot", target);
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_skipped() {
    let dir = tempdir().unwrap();
    write_sized(dir.path(), "real.txt", 20);
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();
    let result = top_n_largest(dir.path(), 10);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].size_bytes, 20);
    let by_content = find_duplicates(dir.path(), "content").unwrap();
    assert!(by_content.is_empty());
}

#[cfg(unix)]
#[test]
fn test_file_symlink_counts_once_in_size_queries() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    let real = write_sized(&root, "real.bin", 100);
    write_sized(&root, "small.bin", 10);
    std::os::unix::fs::symlink(&real, root.join("sub/real.bin")).unwrap();

    let largest = top_n_largest(&root, 10);
    let sizes: Vec<u64> = largest.iter().map(|f| f.size_bytes).collect();
    assert_eq!(sizes, vec![100, 10]);
    assert_eq!(largest[0].path, fs::canonicalize(&real).unwrap());

    let cover: Vec<u64> = minimal_cover(&root, 150)
        .iter()
        .map(|f| f.size_bytes)
        .collect();
    assert_eq!(cover, vec![100, 10]);
    let everything: u64 = minimal_cover(&root, 1000).iter().map(|f| f.size_bytes).sum();
    assert_eq!(everything, 110);
    assert_eq!(total_size(&root), 110);

    let expected = vec![real.clone(), root.join("sub/real.bin")];
    assert_eq!(
        find_duplicates_by_name(&root).unwrap().get("real.bin"),
        Some(&expected)
    );
    assert_eq!(
        find_duplicates_by_size(&root).unwrap().get(&100),
        Some(&expected)
    );
}

#[test]
fn test_find_duplicates_by_name() {
    let dir = tempdir().unwrap();
    let root = workspace(dir.path());
    let result = find_duplicates_by_name(&root).unwrap();
    assert_eq!(
        result.get("file1.txt"),
        Some(&vec![root.join("file1.txt"), root.join("sub1/file1.txt")])
    );
    assert!(!result.contains_key("file2.txt"));
    assert!(!result.contains_key("unique.txt"));
    assert_eq!(result.len(), 1);
}

#[test]
fn test_find_duplicates_by_size() {
    let dir = tempdir().unwrap();
    let root = workspace(dir.path());
    let result = find_duplicates_by_size(&root).unwrap();
    assert_eq!(result.get(&1).map(Vec::len), Some(5));
    assert!(!result.contains_key(&6));
}

#[test]
fn test_find_duplicates_by_content() {
    let dir = tempdir().unwrap();
    let root = workspace(dir.path());
    let result = find_duplicates_by_content(&root).unwrap();
    assert_eq!(result.len(), 1);
    let paths = result.values().next().unwrap();
    assert_eq!(
        paths,
        &vec![
            root.join("file1.txt"),
            root.join("sub1/file1.txt"),
            root.join("sub2/file4.txt"),
        ]
    );
    assert!(result.values().all(|paths| paths.len() > 1));
}

#[test]
fn test_find_duplicates_main_function() {
    let dir = tempdir().unwrap();
    let root = workspace(dir.path());

    let by_name = find_duplicates(&root, "name").unwrap();
    assert_eq!(
        by_name
            .get(&IdentityKey::Name("file1.txt".into()))
            .map(Vec::len),
        Some(2)
    );

    let by_size = find_duplicates(&root, "size").unwrap();
    assert_eq!(by_size.get(&IdentityKey::Size(1)).map(Vec::len), Some(5));

    let by_content = find_duplicates(&root, Strategy::default().as_str()).unwrap();
    assert!(by_content.values().any(|paths| paths.len() == 3));
    assert!(
        by_content
            .keys()
            .all(|key| matches!(key, IdentityKey::Digest(d) if d.len() == 32))
    );
}

#[test]
fn test_find_duplicates_invalid_method() {
    let dir = tempdir().unwrap();
    let root = workspace(dir.path());
    match find_duplicates(&root, "invalid_method") {
        Err(TamefilesError::InvalidArgument(msg)) => assert!(msg.contains("invalid_method")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
    assert!(matches!(
        find_duplicates(&root, "Content"),
        Err(TamefilesError::InvalidArgument(_))
    ));
}

#[test]
fn test_find_duplicates_invalid_directory() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("non_existent_directory_12345");
    assert!(matches!(
        find_duplicates(&missing, "content"),
        Err(TamefilesError::NotFound(_))
    ));
    let file = write_sized(dir.path(), "plain.txt", 3);
    assert!(matches!(
        find_duplicates(&file, "content"),
        Err(TamefilesError::NotFound(_))
    ));
    assert!(matches!(
        find_duplicates_by_name(&file),
        Err(TamefilesError::NotFound(_))
    ));
    assert!(matches!(
        find_duplicates_by_size(&missing),
        Err(TamefilesError::NotFound(_))
    ));
}

#[test]
fn test_find_duplicates_zero_byte_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "").unwrap();
    fs::write(dir.path().join("b"), "").unwrap();
    fs::write(dir.path().join("c"), "x").unwrap();

    let by_size = find_duplicates(dir.path(), "size").unwrap();
    assert_eq!(
        by_size.get(&IdentityKey::Size(0)),
        Some(&vec![dir.path().join("a"), dir.path().join("b")])
    );

    let by_content = find_duplicates(dir.path(), "content").unwrap();
    let mut expected = BTreeMap::new();
    expected.insert(
        IdentityKey::Digest(EMPTY_MD5.to_string()),
        vec![dir.path().join("a"), dir.path().join("b")],
    );
    assert_eq!(by_content, expected);
}

#[test]
fn test_find_duplicates_content_needs_identical_bytes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), "Hello, World !").unwrap();
    fs::write(dir.path().join("two"), "Hello, World ?").unwrap();
    assert!(find_duplicates_by_content(dir.path()).unwrap().is_empty());
    assert_eq!(find_duplicates_by_size(dir.path()).unwrap().len(), 1);
}

#[test]
fn test_find_duplicates_no_duplicates() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("f1"), "a").unwrap();
    fs::write(dir.path().join("f2"), "bb").unwrap();
    fs::write(dir.path().join("f3"), "ccc").unwrap();
    for strategy in ["name", "size", "content"] {
        assert!(find_duplicates(dir.path(), strategy).unwrap().is_empty());
    }
}

#[test]
fn test_empty_directory() {
    let dir = tempdir().unwrap();
    assert!(find_duplicates_by_name(dir.path()).unwrap().is_empty());
    assert!(find_duplicates_by_size(dir.path()).unwrap().is_empty());
    assert!(find_duplicates_by_content(dir.path()).unwrap().is_empty());
    for strategy in ["name", "size", "content"] {
        assert!(find_duplicates(dir.path(), strategy).unwrap().is_empty());
    }
    assert!(top_n_largest(dir.path(), 10).is_empty());
    assert!(minimal_cover(dir.path(), 100).is_empty());
}

#[test]
fn test_hash_file_is_chunk_size_independent() {
    let dir = tempdir().unwrap();
    let abc = dir.path().join("abc");
    fs::write(&abc, "abc").unwrap();
    assert_eq!(
        hash_file(&abc, 8192).unwrap(),
        "900150983cd24fb0d6963f7d28e17f72"
    );

    let big = dir.path().join("big");
    let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(&big, content).unwrap();
    let reference = hash_file(&big, 8192).unwrap();
    for chunk in [0, 1, 7, 4096, 1 << 20] {
        assert_eq!(hash_file(&big, chunk).unwrap(), reference);
    }

    let empty = dir.path().join("empty");
    fs::write(&empty, "").unwrap();
    assert_eq!(hash_file(&empty, 8192).unwrap(), EMPTY_MD5);
}

#[test]
fn test_hash_file_missing_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        hash_file(&dir.path().join("nope"), 8192),
        Err(TamefilesError::Io { .. })
    ));
}

#[test]
fn test_strategy_parsing() {
    assert_eq!("name".parse::<Strategy>().unwrap(), Strategy::Name);
    assert_eq!("size".parse::<Strategy>().unwrap(), Strategy::Size);
    assert_eq!("content".parse::<Strategy>().unwrap(), Strategy::Content);
    assert_eq!(Strategy::default(), Strategy::Content);
    assert_eq!(Strategy::Size.to_string(), "size");
    assert!("".parse::<Strategy>().is_err());
}
