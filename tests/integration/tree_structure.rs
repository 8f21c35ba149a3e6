use photoadmin::store::PhotoRecord;
use photoadmin::tree::{PhotoTree, TreeBuilder};
use photoadmin::types::Status;
use serde_json::json;

use super::support::{mounted_records, record, sample_records, SESSION_BASE};

#[test]
fn sample_records_fold_into_expected_shape() {
    let (root, report) = TreeBuilder::new("").build(&sample_records());

    assert_eq!(root.directory_names(), vec!["A", "E"]);
    assert!(root.files().is_empty());

    let a = root.child("A").unwrap();
    assert_eq!(a.files().len(), 1);
    assert_eq!(a.files()[0].name(), "b.jpg");
    assert_eq!(a.directory_names(), vec!["C"]);

    let c = a.child("C").unwrap();
    assert_eq!(c.files()[0].path, "A/C/d.jpg");
    assert_eq!(c.files()[0].status, Some(Status::Approved));
    assert_eq!(c.child_count(), 0);

    assert_eq!(report.records_seen, 3);
    assert_eq!(report.files_inserted, 3);
    assert_eq!(report.skipped(), 0);
}

#[test]
fn base_path_is_stripped_and_base_record_skipped() {
    let (root, report) = TreeBuilder::new(SESSION_BASE).build(&mounted_records());

    assert_eq!(root.directory_names(), vec!["2023", "2024"]);
    let y2023 = root.child("2023").unwrap();
    assert_eq!(y2023.directory_names(), vec!["Anna", "Boris"]);
    assert_eq!(y2023.child("Anna").unwrap().files().len(), 2);
    assert_eq!(root.child("2024").unwrap().files()[0].name(), "cover.jpg");

    assert_eq!(report.records_seen, 5);
    assert_eq!(report.files_inserted, 4);
    assert_eq!(report.skipped_empty, 1);
}

#[test]
fn duplicate_paths_are_kept() {
    let records = vec![
        record("A/b.jpg", Some("review"), None, None),
        record("A//./b.jpg", Some("approved"), None, None),
    ];
    let (root, _) = TreeBuilder::new("").build(&records);
    let files = root.child("A").unwrap().files();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, "A/b.jpg");
    assert_eq!(files[1].path, "A//./b.jpg");
}

#[test]
fn file_and_directory_may_share_a_name() {
    let records = vec![PhotoRecord::new("A/x"), PhotoRecord::new("A/x/y.jpg")];
    let (root, _) = TreeBuilder::new("").build(&records);
    let a = root.child("A").unwrap();
    assert!(a.file("x").is_some());
    assert!(a.child("x").is_some());
}

#[test]
fn records_deeper_than_limit_are_skipped() {
    let deep = format!("{}/leaf.jpg", vec!["d"; 10].join("/"));
    let records = vec![PhotoRecord::new(deep.as_str()), PhotoRecord::new("top.jpg")];
    let (root, report) = TreeBuilder::new("").with_max_depth(4).build(&records);

    assert_eq!(report.skipped_too_deep, 1);
    assert_eq!(report.files_inserted, 1);
    assert!(root.child("d").is_none());
    assert!(root.file("top.jpg").is_some());
}

#[test]
fn serialized_tree_uses_files_and_dirs_keys() {
    let tree = PhotoTree::build(&TreeBuilder::new(""), &sample_records());
    let value = serde_json::to_value(tree.root()).unwrap();

    assert_eq!(value["files"], json!([]));
    let c = &value["dirs"]["A"]["dirs"]["C"];
    assert_eq!(c["files"][0]["path"], "A/C/d.jpg");
    assert_eq!(c["files"][0]["status"], "approved");
    assert_eq!(c["files"][0]["has_face"], true);
    assert_eq!(c["dirs"], json!({}));
    assert!(value["dirs"]["E"]["files"][0]["is_nude"].is_null());
}
