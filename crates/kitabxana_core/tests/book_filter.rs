use kitabxana_core::{
    filter_books, search_ayahs, search_hadiths, Book, BookQuery, Catalog, Category, DisplayColor,
    SortMode,
};
use std::collections::BTreeSet;

fn book(id: &str, title: &str, author: &str, rating: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        rating: rating.to_string(),
        thumbnail: format!("{id}.png"),
        color: DisplayColor::rgb(0, 128, 0),
        description: String::new(),
    }
}

fn ids(items: &[&Book]) -> Vec<String> {
    items.iter().map(|book| book.id.clone()).collect()
}

fn rated_catalog() -> Catalog {
    let books = vec![
        book("a", "Book A", "Author A", "4.8"),
        book("b", "Book B", "Author B", "4.7"),
        book("c", "Book C", "Author C", "bad"),
    ];
    Catalog::new(books, Vec::new(), Vec::new(), Vec::new()).unwrap()
}

#[test]
fn empty_query_returns_the_whole_working_set() {
    let catalog = Catalog::builtin().unwrap();

    for sort in SortMode::ALL {
        let all = filter_books(&catalog, &BookQuery::new("").with_sort(sort));
        let returned = ids(&all.items).into_iter().collect::<BTreeSet<_>>();
        let expected = catalog
            .books()
            .iter()
            .map(|book| book.id.clone())
            .collect::<BTreeSet<_>>();
        assert_eq!(returned, expected);
    }

    for name in catalog.category_names() {
        let category = catalog.category(name).unwrap();
        let result = filter_books(&catalog, &BookQuery::new("").with_category(name));
        assert_eq!(result.applied_category.as_deref(), Some(name));
        assert_eq!(result.items.len(), category.books.len());
    }
}

#[test]
fn every_title_substring_matches_its_book() {
    let catalog = Catalog::builtin().unwrap();

    for book in catalog.books() {
        let chars = book.title.chars().collect::<Vec<_>>();
        for start in 0..chars.len() {
            for end in start + 1..=chars.len() {
                let needle = chars[start..end].iter().collect::<String>();
                let result = filter_books(&catalog, &BookQuery::new(needle.as_str()));
                assert!(
                    result.items.iter().any(|hit| hit.id == book.id),
                    "`{needle}` should match {}",
                    book.id
                );
            }
        }
    }
}

#[test]
fn equal_ratings_keep_catalog_order() {
    let books = vec![
        book("first", "First", "X", "4.5"),
        book("top", "Top", "X", "4.9"),
        book("second", "Second", "X", "4.5"),
        book("third", "Third", "X", "4.5"),
    ];
    let catalog = Catalog::new(books, Vec::new(), Vec::new(), Vec::new()).unwrap();

    for sort in [SortMode::Popular, SortMode::TopRated] {
        let query = BookQuery::new("").with_sort(sort);
        let first_run = ids(&filter_books(&catalog, &query).items);
        let second_run = ids(&filter_books(&catalog, &query).items);
        assert_eq!(first_run, vec!["top", "first", "second", "third"]);
        assert_eq!(first_run, second_run);
    }
}

#[test]
fn top_rated_puts_unparseable_rating_last() {
    let catalog = rated_catalog();
    let result = filter_books(&catalog, &BookQuery::new("").with_sort(SortMode::TopRated));
    assert_eq!(ids(&result.items), vec!["a", "b", "c"]);
}

#[test]
fn newest_reverses_and_alphabetical_orders_by_title() {
    let catalog = rated_catalog();

    let newest = filter_books(&catalog, &BookQuery::new("").with_sort(SortMode::Newest));
    assert_eq!(ids(&newest.items), vec!["c", "b", "a"]);

    let books = vec![
        book("z", "Zad al-Maad", "Ibn Qayyim", "4.6"),
        book("r", "Riyad as-Salihin", "An-Nawawi", "4.9"),
        book("a", "Al-Adab al-Mufrad", "Bukhari", "4.4"),
    ];
    let catalog = Catalog::new(books, Vec::new(), Vec::new(), Vec::new()).unwrap();
    let alphabetical =
        filter_books(&catalog, &BookQuery::new("").with_sort(SortMode::Alphabetical));
    assert_eq!(ids(&alphabetical.items), vec!["a", "r", "z"]);
}

#[test]
fn query_case_does_not_matter() {
    let catalog = Catalog::builtin().unwrap();

    for query in ["muslim", "MUSLIM", "Muslim", "mUsLiM"] {
        let result = filter_books(&catalog, &BookQuery::new(query));
        assert!(
            result.items.iter().any(|book| book.title == "Sahih Muslim"),
            "`{query}` should find Sahih Muslim"
        );
    }
}

#[test]
fn author_matches_count_as_hits() {
    let catalog = Catalog::builtin().unwrap();
    let result = filter_books(&catalog, &BookQuery::new("mubarakpuri"));
    assert_eq!(ids(&result.items), vec!["the-sealed-nectar"]);
}

#[test]
fn unknown_category_falls_back_to_full_catalog() {
    let catalog = Catalog::builtin().unwrap();
    let result = filter_books(&catalog, &BookQuery::new("").with_category("Fiqh"));

    assert_eq!(result.applied_category, None);
    assert_eq!(result.items.len(), catalog.books().len());
}

#[test]
fn category_narrows_before_text_filter() {
    let tafsir = book("t", "Tafsir Ibn Kathir", "Ibn Kathir", "4.9");
    let nectar = book("n", "The Sealed Nectar", "Mubarakpuri", "4.7");
    let catalog = Catalog::new(
        vec![tafsir.clone(), nectar],
        Vec::new(),
        Vec::new(),
        vec![Category::new("Tafsir", vec![tafsir])],
    )
    .unwrap();

    let inside = filter_books(&catalog, &BookQuery::new("kathir").with_category("Tafsir"));
    assert_eq!(ids(&inside.items), vec!["t"]);

    let outside = filter_books(&catalog, &BookQuery::new("nectar").with_category("Tafsir"));
    assert!(outside.items.is_empty());
}

#[test]
fn empty_catalog_yields_empty_results() {
    let catalog = Catalog::empty();
    assert!(filter_books(&catalog, &BookQuery::new("")).items.is_empty());
    assert!(search_hadiths(&catalog, "").is_empty());
    assert!(search_ayahs(&catalog, "").is_empty());
}

#[test]
fn hadith_and_ayah_search_cover_secondary_fields() {
    let catalog = Catalog::builtin().unwrap();

    let by_source = search_hadiths(&catalog, "buxari");
    assert!(!by_source.is_empty());
    assert!(by_source
        .iter()
        .all(|hadith| hadith.source.to_lowercase().contains("buxari")
            || hadith.text.to_lowercase().contains("buxari")
            || hadith.narrator.to_lowercase().contains("buxari")));

    let by_surah = search_ayahs(&catalog, "baqarah");
    assert_eq!(by_surah.len(), 1);
    assert_eq!(by_surah[0].verse, 185);
}

#[test]
fn non_ascii_title_substrings_all_match() {
    let books = vec![
        book("greek", "ΑΣΑ", "Ανώνυμος", "4.0"),
        book("azeri", "İman və Əxlaq", "Şeyx", "4.1"),
    ];
    let catalog = Catalog::new(books, Vec::new(), Vec::new(), Vec::new()).unwrap();

    for needle in ["Α", "Σ", "ΑΣ", "ΣΑ", "ΑΣΑ", "σα", "ασα"] {
        let result = filter_books(&catalog, &BookQuery::new(needle));
        assert_eq!(ids(&result.items), vec!["greek"], "`{needle}` should match ΑΣΑ");
    }

    for needle in ["İman", "ƏXLAQ", "əxlaq", "şeyx"] {
        let result = filter_books(&catalog, &BookQuery::new(needle));
        assert_eq!(ids(&result.items), vec!["azeri"], "`{needle}` should match");
    }
}
