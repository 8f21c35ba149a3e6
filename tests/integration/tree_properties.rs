use photoadmin::store::PhotoRecord;
use photoadmin::tree::{hasher, navigator, path, stats, BasePath, TreeBuilder};
use photoadmin::types::Status;
use proptest::prelude::*;

fn component() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ -]{1,8}".prop_filter("not a dot segment", |s| {
        let trimmed = s.trim();
        !trimmed.is_empty() && trimmed != "." && trimmed != ".."
    })
}

fn status() -> impl Strategy<Value = Option<Status>> {
    prop_oneof![
        Just(None),
        Just(Some(Status::Review)),
        Just(Some(Status::Approved)),
        Just(Some(Status::Rejected)),
        "[a-z]{3,6}".prop_map(|s| Some(Status::from(s))),
    ]
}

fn record() -> impl Strategy<Value = PhotoRecord> {
    (
        prop::collection::vec(component(), 1..6),
        status(),
        any::<Option<bool>>(),
        any::<Option<bool>>(),
    )
        .prop_map(|(parts, status, nude, face)| {
            let mut record = PhotoRecord::new(format!("/base/{}", parts.join("/")));
            record.status = status;
            record.is_nude = nude;
            record.has_face = face;
            record
        })
}

proptest! {
    #[test]
    fn split_never_keeps_empty_or_dot_components(raw in ".{0,40}", base in ".{0,12}") {
        for component in path::split(&raw, &base) {
            prop_assert!(!component.is_empty());
            prop_assert!(component != "." && component != "..");
        }
    }

    #[test]
    fn every_record_resolves_to_its_own_entry(records in prop::collection::vec(record(), 0..40)) {
        let builder = TreeBuilder::new("/base");
        let (root, report) = builder.build(&records);
        prop_assert_eq!(report.files_inserted, records.len());

        for record in &records {
            let key = builder.base().split(&record.path);
            let dir = navigator::walk(&root, key.parent()).expect("parent directory exists");
            prop_assert!(dir.files().iter().any(|f| f.path == record.path));
        }
    }

    #[test]
    fn totals_match_record_counts(records in prop::collection::vec(record(), 0..40)) {
        let (root, _) = TreeBuilder::new("/base").build(&records);
        let total = stats::aggregate(&root);

        prop_assert_eq!(total.total_files as usize, records.len());
        prop_assert_eq!(total.by_status.total(), total.total_files);
        let nude = records.iter().filter(|r| r.is_nude == Some(true)).count();
        prop_assert_eq!(total.nude_files as usize, nude);
    }

    #[test]
    fn rebuild_is_idempotent(records in prop::collection::vec(record(), 0..30)) {
        let builder = TreeBuilder::new("/base");
        let (first, _) = builder.build(&records);
        let (second, _) = builder.build(&records);
        prop_assert_eq!(hasher::fingerprint(&first), hasher::fingerprint(&second));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn base_stripping_agrees_with_relative_paths(parts in prop::collection::vec(component(), 1..5)) {
        let relative = parts.join("/");
        let absolute = format!("/base/{}", relative);
        let base = BasePath::new("/base");
        prop_assert_eq!(base.split(&absolute), base.split(&relative));
    }
}
