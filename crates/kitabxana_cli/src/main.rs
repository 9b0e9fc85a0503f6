//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `kitabxana_core` linkage without the Flutter runtime.
//! - Offer a quick book search over the built-in catalog.
//!
//! Usage: `kitabxana [search <query> [sort] [category]]`

use kitabxana_core::{filter_books, BookQuery, Catalog, SortMode};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("kitabxana_core ping={}", kitabxana_core::ping());
    println!("kitabxana_core version={}", kitabxana_core::core_version());

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match args.first().map(String::as_str) {
        None => ExitCode::SUCCESS,
        Some("search") => run_search(&args[1..]),
        Some(other) => {
            eprintln!("unknown command `{other}`; expected `search`");
            ExitCode::FAILURE
        }
    }
}

fn run_search(args: &[String]) -> ExitCode {
    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("catalog load failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let text = args.first().cloned().unwrap_or_default();
    let sort = match args.get(1) {
        Some(raw) => match SortMode::parse(raw) {
            Some(sort) => sort,
            None => {
                eprintln!("unknown sort `{raw}`; expected popular|newest|alphabetical|top_rated");
                return ExitCode::FAILURE;
            }
        },
        None => SortMode::default(),
    };

    let mut query = BookQuery::new(text).with_sort(sort);
    if let Some(category) = args.get(2) {
        query = query.with_category(category.as_str());
    }

    let result = filter_books(&catalog, &query);
    if let Some(category) = &result.applied_category {
        println!("category={category}");
    }
    for book in &result.items {
        println!("{}\t{}\t{}\t{}", book.id, book.rating, book.title, book.author);
    }
    ExitCode::SUCCESS
}
