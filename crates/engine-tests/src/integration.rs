#[cfg(test)]
mod tests {
    use crate::{
        pager_for, settings,
        utils::{HOME_ZONE, MockCatalog},
    };
    use engine_core::error::PagerError;
    use model::{
        listing::entry::{ListingEntry, ListingKind},
        pagination::descriptor::{PagerState, PagingDescriptor},
    };
    use tracing_test::traced_test;

    const HOME: &str = "/tempZone/home/rods";

    fn names(entries: &[ListingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    // Scenario: 2 collections and 1 data object with a page size of 5.
    // Expected Outcome: one page holding both collections then the data
    // object, and the descriptor is done.
    #[traced_test]
    #[tokio::test]
    async fn merges_collections_then_data_objects() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 2)
            .with_data_object(HOME, "notes.txt", 42);
        let pager = pager_for(&catalog, &settings(5));

        let listing = pager.retrieve_first_page(HOME).await.unwrap();

        assert_eq!(
            names(&listing.entries),
            vec!["coll000", "coll001", "notes.txt"]
        );
        assert_eq!(
            listing.entries.iter().map(|e| e.kind).collect::<Vec<_>>(),
            vec![
                ListingKind::Collection,
                ListingKind::Collection,
                ListingKind::DataObject
            ]
        );
        assert_eq!(listing.len(), 3);
        assert_eq!(listing.collections().count(), 2);
        assert_eq!(listing.data_objects().count(), 1);
        assert_eq!(listing.entries[2].data_size, 42);
        assert_eq!(
            listing.entries[2].absolute_path(),
            "/tempZone/home/rods/notes.txt"
        );
        assert_eq!(listing.descriptor.state(), PagerState::Done);
        assert_eq!(listing.descriptor.total_records(), 3);
        assert!(!listing.has_more());
    }

    // Scenario: 3 collections (two pages at size 2) and 1 data object.
    // Expected Outcome: page 1 has collections only, page 2 the last
    // collection plus the data object, and a third call fails with
    // NoMorePaging.
    #[traced_test]
    #[tokio::test]
    async fn pages_through_both_streams_in_order() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 3)
            .with_data_object(HOME, "only.dat", 1);
        let pager = pager_for(&catalog, &settings(2));

        let first = pager.retrieve_first_page(HOME).await.unwrap();
        assert_eq!(names(&first.entries), vec!["coll000", "coll001"]);
        assert_eq!(first.descriptor.state(), PagerState::ListingCollections);
        assert_eq!(first.descriptor.collections.offset, 2);
        assert_eq!(first.descriptor.collections.count, 2);
        assert_eq!(first.descriptor.collections.total_records, Some(3));
        assert_eq!(catalog.page_queries(ListingKind::DataObject), 0);

        let mut descriptor = first.descriptor;
        let second = pager.retrieve_next_page(&mut descriptor).await.unwrap();
        assert_eq!(names(&second.entries), vec!["coll002", "only.dat"]);
        assert_eq!(descriptor.state(), PagerState::Done);
        assert_eq!(second.descriptor, descriptor);

        assert!(matches!(
            pager.retrieve_next_page(&mut descriptor).await,
            Err(PagerError::NoMorePaging)
        ));
        assert!(logs_contain("Collections complete, peeking at data objects"));
    }

    // Scenario: the page that finishes the collections fails while peeking
    // at the data objects.
    // Expected Outcome: the call errors, the descriptor is left where it was,
    // and retrying once the server recovers returns the withheld collection.
    #[traced_test]
    #[tokio::test]
    async fn failed_page_is_retried_without_skipping() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 3)
            .with_data_object(HOME, "only.dat", 1);
        let pager = pager_for(&catalog, &settings(2));

        let first = pager.retrieve_first_page(HOME).await.unwrap();
        let mut descriptor = first.descriptor;
        let before = descriptor.clone();

        catalog.fail_queries_for(ListingKind::DataObject);
        assert!(matches!(
            pager.retrieve_next_page(&mut descriptor).await,
            Err(PagerError::Query(_))
        ));
        assert_eq!(descriptor, before);
        assert_eq!(descriptor.collections.offset, 2);
        assert!(!descriptor.collections.complete);

        catalog.recover();
        let retry = pager.retrieve_next_page(&mut descriptor).await.unwrap();
        assert_eq!(names(&retry.entries), vec!["coll002", "only.dat"]);
        assert_eq!(descriptor.state(), PagerState::Done);
    }

    // Scenario: 7 collections and 5 data objects paged 3 at a time.
    // Expected Outcome: stream offsets never decrease and every child is
    // returned exactly once, collections first.
    #[traced_test]
    #[tokio::test]
    async fn offsets_are_monotonic() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 7)
            .with_data_objects(HOME, "obj", 5);
        let pager = pager_for(&catalog, &settings(3));

        let first = pager.retrieve_first_page(HOME).await.unwrap();
        let mut seen: Vec<String> = first.entries.iter().map(|e| e.name.clone()).collect();
        let mut descriptor = first.descriptor;
        let mut last_offsets = (descriptor.collections.offset, descriptor.data_objects.offset);

        while descriptor.has_more() {
            let page = pager.retrieve_next_page(&mut descriptor).await.unwrap();
            let offsets = (descriptor.collections.offset, descriptor.data_objects.offset);
            assert!(offsets.0 >= last_offsets.0, "collections offset went back");
            assert!(offsets.1 >= last_offsets.1, "data objects offset went back");
            last_offsets = offsets;
            seen.extend(page.entries.iter().map(|e| e.name.clone()));
        }

        let mut expected: Vec<String> = (0..7).map(|i| format!("coll{i:03}")).collect();
        expected.extend((0..5).map(|i| format!("obj{i:03}.dat")));
        assert_eq!(seen, expected);
        assert_eq!(last_offsets, (7, 5));
        assert_eq!(descriptor.collections.total_records, Some(7));
        assert_eq!(descriptor.data_objects.total_records, Some(5));
    }

    // Scenario: the server omits terminal-row flags and the collection has
    // exactly one page size worth of sub-collections.
    // Expected Outcome: the full page does not complete the stream, the
    // empty follow-up page does, and only then are data objects listed.
    #[traced_test]
    #[tokio::test]
    async fn page_without_terminal_flag_is_not_complete() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 2)
            .with_data_object(HOME, "a.dat", 1)
            .without_terminal_flags();
        let pager = pager_for(&catalog, &settings(2));

        let first = pager.retrieve_first_page(HOME).await.unwrap();
        assert_eq!(first.entries.len(), 2);
        assert!(!first.descriptor.collections.complete);
        assert_eq!(first.descriptor.state(), PagerState::ListingCollections);

        let mut descriptor = first.descriptor;
        let second = pager.retrieve_next_page(&mut descriptor).await.unwrap();
        assert!(descriptor.collections.complete);
        assert_eq!(descriptor.collections.count, 0);
        assert_eq!(descriptor.collections.offset, 2);
        assert_eq!(names(&second.entries), vec!["a.dat"]);

        // The short data-objects page carries no flag either.
        assert_eq!(descriptor.state(), PagerState::ListingDataObjects);
        let third = pager.retrieve_next_page(&mut descriptor).await.unwrap();
        assert!(third.entries.is_empty());
        assert_eq!(descriptor.state(), PagerState::Done);
    }

    // Scenario: the client does not ask for totals, so batches report 0.
    // Expected Outcome: one count query per stream for the whole session,
    // and the counted totals are cached on the descriptor.
    #[traced_test]
    #[tokio::test]
    async fn count_fallback_runs_once_per_stream() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 5)
            .with_data_objects(HOME, "obj", 4);
        let mut settings = settings(2);
        settings.compute_total_row_count = false;
        let pager = pager_for(&catalog, &settings);

        let first = pager.retrieve_first_page(HOME).await.unwrap();
        assert_eq!(first.descriptor.collections.total_records, Some(5));

        let mut descriptor = first.descriptor;
        while descriptor.has_more() {
            pager.retrieve_next_page(&mut descriptor).await.unwrap();
        }

        assert_eq!(catalog.count_queries(ListingKind::Collection), 1);
        assert_eq!(catalog.count_queries(ListingKind::DataObject), 1);
        assert_eq!(descriptor.data_objects.total_records, Some(4));
        assert_eq!(descriptor.total_records(), 9);
    }

    #[traced_test]
    #[tokio::test]
    async fn reported_totals_skip_count_queries() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 3)
            .with_data_objects(HOME, "obj", 3);
        let pager = pager_for(&catalog, &settings(2));

        let mut descriptor = pager.retrieve_first_page(HOME).await.unwrap().descriptor;
        while descriptor.has_more() {
            pager.retrieve_next_page(&mut descriptor).await.unwrap();
        }

        assert_eq!(catalog.count_queries(ListingKind::Collection), 0);
        assert_eq!(catalog.count_queries(ListingKind::DataObject), 0);
        assert_eq!(descriptor.total_records(), 6);
    }

    // Scenario: an empty collection.
    // Expected Outcome: one empty page that completes both streams with zero
    // totals and no count queries.
    #[traced_test]
    #[tokio::test]
    async fn empty_collection_is_done_after_first_page() {
        let catalog = MockCatalog::new().with_collection(HOME);
        let pager = pager_for(&catalog, &settings(10));

        let listing = pager.retrieve_first_page(HOME).await.unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.descriptor.state(), PagerState::Done);
        assert_eq!(listing.descriptor.collections.total_records, Some(0));
        assert_eq!(listing.descriptor.data_objects.total_records, Some(0));
        assert_eq!(catalog.request_count(), 2);
    }

    #[traced_test]
    #[tokio::test]
    async fn root_is_not_its_own_child() {
        let catalog = MockCatalog::new();
        let pager = pager_for(&catalog, &settings(10));

        let listing = pager.retrieve_first_page("/").await.unwrap();
        assert_eq!(names(&listing.entries), vec![HOME_ZONE]);
        assert_eq!(listing.entries[0].absolute_path(), "/tempZone");
    }

    #[traced_test]
    #[tokio::test]
    async fn rejects_data_objects_and_missing_paths() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_data_object(HOME, "file.txt", 3);
        let pager = pager_for(&catalog, &settings(10));

        assert!(matches!(
            pager
                .retrieve_first_page("/tempZone/home/rods/file.txt")
                .await,
            Err(PagerError::NotACollection(_))
        ));
        assert!(matches!(
            pager.retrieve_first_page("/tempZone/home/nobody").await,
            Err(PagerError::NotFound(_))
        ));
        assert_eq!(catalog.request_count(), 0);
    }

    // Scenario: a linked collection pointing at another collection.
    // Expected Outcome: children come from the link target but are shown
    // under the link path.
    #[traced_test]
    #[tokio::test]
    async fn linked_collection_lists_its_target() {
        let target = "/tempZone/home/shared";
        let link = "/tempZone/home/rods/shared-link";
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collection(target)
            .with_data_object(target, "report.pdf", 900)
            .with_link(link, target);
        let pager = pager_for(&catalog, &settings(10));

        let listing = pager.retrieve_first_page(link).await.unwrap();
        assert_eq!(names(&listing.entries), vec!["report.pdf"]);
        assert_eq!(
            listing.entries[0].absolute_path(),
            "/tempZone/home/rods/shared-link/report.pdf"
        );
        assert_eq!(listing.descriptor.parent_absolute_path, link);
    }

    #[traced_test]
    #[tokio::test]
    async fn remote_zone_paths_are_routed() {
        let remote = "/otherZone/home/rods";
        let catalog = MockCatalog::new()
            .with_collection(remote)
            .with_data_object(remote, "far.dat", 5);
        let pager = pager_for(&catalog, &settings(10));

        pager.retrieve_first_page(remote).await.unwrap();
        pager.retrieve_first_page("/tempZone/home").await.unwrap();

        let zones: Vec<Option<String>> = catalog.requests().into_iter().map(|r| r.zone).collect();
        assert_eq!(zones[0].as_deref(), Some("otherZone"));
        assert_eq!(zones[1].as_deref(), Some("otherZone"));
        assert!(zones[2..].iter().all(Option::is_none));
    }

    // Scenario: the caller stores the descriptor as JSON between requests.
    // Expected Outcome: paging resumes from the restored descriptor.
    #[traced_test]
    #[tokio::test]
    async fn descriptor_survives_serialization() {
        let catalog = MockCatalog::new()
            .with_collection(HOME)
            .with_collections(HOME, "coll", 3)
            .with_data_objects(HOME, "obj", 2);
        let pager = pager_for(&catalog, &settings(2));

        let first = pager.retrieve_first_page(HOME).await.unwrap();
        let stored = serde_json::to_string(&first.descriptor).unwrap();

        let mut restored: PagingDescriptor = serde_json::from_str(&stored).unwrap();
        let next = pager.retrieve_next_page(&mut restored).await.unwrap();
        assert_eq!(
            names(&next.entries),
            vec!["coll002", "obj000.dat", "obj001.dat"]
        );
        assert!(!restored.has_more());
    }
}
