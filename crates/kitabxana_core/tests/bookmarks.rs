use kitabxana_core::{BookmarkStore, Catalog, ContentKind, StateChange};

const SAMPLE_IDS: [&str; 4] = ["sahih-muslim", "h-1", "", "not-in-catalog"];

#[test]
fn toggling_twice_restores_membership() {
    for kind in ContentKind::ALL {
        for id in SAMPLE_IDS {
            let mut store = BookmarkStore::new();
            store.toggle(ContentKind::Book, "sahih-muslim");
            let before = store.is_bookmarked(kind, id);

            store.toggle(kind, id);
            assert_ne!(store.is_bookmarked(kind, id), before);
            store.toggle(kind, id);
            assert_eq!(store.is_bookmarked(kind, id), before, "kind={kind:?} id={id}");
        }
    }
}

#[test]
fn removing_an_absent_id_changes_nothing() {
    let mut store = BookmarkStore::new();
    store.toggle(ContentKind::Hadith, "h-1");
    let events = store.subscribe();
    let before = store.all(ContentKind::Hadith);

    for kind in ContentKind::ALL {
        assert!(!store.remove(kind, "h-2"));
    }

    assert_eq!(store.all(ContentKind::Hadith), before);
    assert!(events.try_recv().is_err());
}

#[test]
fn repeated_toggles_notify_every_time() {
    let mut store = BookmarkStore::new();
    let events = store.subscribe();

    store.toggle(ContentKind::Ayah, "a-1");
    store.toggle(ContentKind::Ayah, "a-1");

    let bookmarked = events
        .try_iter()
        .map(|change| match change {
            StateChange::BookmarkToggled { bookmarked, .. } => bookmarked,
            other => panic!("unexpected change: {other:?}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(bookmarked, vec![true, false]);
}

#[test]
fn stale_ids_are_skipped_when_resolving() {
    let catalog = Catalog::builtin().unwrap();
    let mut store = BookmarkStore::new();
    store.toggle(ContentKind::Book, "the-sealed-nectar");
    store.toggle(ContentKind::Book, "removed-long-ago");
    store.toggle(ContentKind::Book, "sahih-muslim");

    let resolved = catalog.resolve_books(&store.all(ContentKind::Book));
    let titles = resolved.iter().map(|book| book.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, vec!["Sahih Muslim", "The Sealed Nectar"]);
    assert_eq!(store.count(ContentKind::Book), 3);
}
