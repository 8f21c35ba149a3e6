use photoadmin::tree::{navigator, PhotoTree, Resolved, TreeBuilder};

use super::support::{mounted_records, sample_records, SESSION_BASE};

fn sample_tree() -> PhotoTree {
    PhotoTree::build(&TreeBuilder::new(""), &sample_records())
}

#[test]
fn resolve_distinguishes_directories_files_and_misses() {
    let tree = sample_tree();
    assert!(matches!(tree.resolve("A"), Resolved::Directory(_)));
    assert!(matches!(tree.resolve("A/C"), Resolved::Directory(_)));
    match tree.resolve("A/C/d.jpg") {
        Resolved::File(entry) => assert_eq!(entry.path, "A/C/d.jpg"),
        other => panic!("expected file, got {:?}", other),
    }
    assert!(matches!(tree.resolve(""), Resolved::Directory(_)));
}

#[test]
fn unknown_components_yield_not_found() {
    let tree = sample_tree();
    assert_eq!(tree.resolve("Z"), Resolved::NotFound);
    assert_eq!(tree.resolve("A/Z/d.jpg"), Resolved::NotFound);
    assert_eq!(tree.resolve("A/C/missing.jpg"), Resolved::NotFound);
    assert!(tree.directory_contents("A/C/d.jpg").is_none());
}

#[test]
fn directory_contents_are_direct_only() {
    let tree = sample_tree();
    let root = tree.directory_contents("").unwrap();
    assert!(root.files.is_empty());
    assert_eq!(root.directories, vec!["A", "E"]);

    let a = tree.directory_contents("A/").unwrap();
    assert_eq!(a.files.len(), 1);
    assert_eq!(a.directories, vec!["C"]);
}

#[test]
fn file_info_requires_a_leaf() {
    let tree = sample_tree();
    assert!(tree.file_info("").is_none());
    assert!(tree.file_info("A").is_none());
    assert_eq!(tree.file_info("E/f.jpg").unwrap().path, "E/f.jpg");
}

#[test]
fn absolute_and_relative_lookups_agree_under_a_base() {
    let tree = PhotoTree::build(&TreeBuilder::new(SESSION_BASE), &mounted_records());
    let absolute = format!("{}/2023/Anna/002.jpg", SESSION_BASE);

    let by_absolute = tree.file_info(&absolute).unwrap();
    let by_relative = tree.file_info("2023/Anna/002.jpg").unwrap();
    assert_eq!(by_absolute, by_relative);
    assert_eq!(by_absolute.path, absolute);
}

#[test]
fn every_record_round_trips_through_navigation() {
    let records = mounted_records();
    let builder = TreeBuilder::new(SESSION_BASE);
    let (root, _) = builder.build(&records);

    for record in records.iter().filter(|r| r.path != SESSION_BASE) {
        let entry = navigator::file_info(&root, &record.path, builder.base())
            .unwrap_or_else(|| panic!("{} not found", record.path));
        assert_eq!(entry.path, record.path);
    }
}
