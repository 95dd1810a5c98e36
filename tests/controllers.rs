//! Controller behaviour against an in-memory catalog

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bookfinder::api::google::{parse_search_response, parse_volume_response};
use bookfinder::{
    Autocomplete, BookDetail, BookFinderError, BooksApi, DetailController, DetailState,
    SearchController, SearchResultItem, WidgetEffect, WidgetEvent,
};
use parking_lot::Mutex;

#[derive(Default)]
struct FakeCatalog {
    searches: HashMap<String, Vec<SearchResultItem>>,
    volumes: HashMap<String, String>,
    fail_searches: bool,
    search_calls: Mutex<Vec<(String, usize)>>,
    volume_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn with_search(mut self, query: &str, items: &[(&str, &str)]) -> Self {
        let items = items
            .iter()
            .map(|(title, id)| SearchResultItem::new(*title, *id))
            .collect();
        self.searches.insert(query.to_string(), items);
        self
    }

    fn with_volume(mut self, id: &str, body: &str) -> Self {
        self.volumes.insert(id.to_string(), body.to_string());
        self
    }

    fn failing(mut self) -> Self {
        self.fail_searches = true;
        self
    }
}

#[async_trait]
impl BooksApi for FakeCatalog {
    async fn search(&self, query: &str, max_results: usize) -> bookfinder::Result<Vec<SearchResultItem>> {
        self.search_calls.lock().push((query.to_string(), max_results));
        if self.fail_searches {
            return Err(BookFinderError::MalformedResponse("connection reset".into()));
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn volume(&self, id: &str) -> bookfinder::Result<Option<BookDetail>> {
        self.volume_calls.lock().push(id.to_string());
        match self.volumes.get(id) {
            Some(body) => parse_volume_response(body),
            None => Err(BookFinderError::Status {
                status: 404,
                url: format!("https://example.test/volumes/{id}"),
            }),
        }
    }
}

#[tokio::test]
async fn whitespace_query_issues_no_request() {
    let catalog = Arc::new(FakeCatalog::default().with_search("dune", &[("Dune", "A")]));
    let mut search = SearchController::new(catalog.clone(), 10);

    search.search("dune").await;
    let before = search.results().to_vec();

    let after = search.search("   ").await.to_vec();
    assert_eq!(after, before);
    assert_eq!(catalog.search_calls.lock().len(), 1);
}

#[tokio::test]
async fn search_sends_cap_and_replaces_results() {
    let catalog = Arc::new(
        FakeCatalog::default()
            .with_search("du", &[("Dune", "A"), ("Duna", "B")])
            .with_search("mars", &[("Red Mars", "M")]),
    );
    let mut search = SearchController::new(catalog.clone(), 10);

    assert_eq!(search.search("du").await.len(), 2);
    let results = search.search("mars").await;
    assert_eq!(results, [SearchResultItem::new("Red Mars", "M")].as_slice());

    let calls = catalog.search_calls.lock().clone();
    assert_eq!(calls, vec![("du".to_string(), 10), ("mars".to_string(), 10)]);
    assert!(!search.is_loading());
}

#[tokio::test]
async fn failed_search_keeps_previous_results() {
    let good = Arc::new(FakeCatalog::default().with_search("du", &[("Dune", "A")]));
    let mut search = SearchController::new(good, 10);
    search.search("du").await;

    let ticket = search.begin("dun").unwrap();
    let failing = FakeCatalog::default().failing();
    let result = failing.search(&ticket.query, ticket.max_results).await;
    search.complete(&ticket, result);

    assert_eq!(search.results(), [SearchResultItem::new("Dune", "A")].as_slice());
    assert!(!search.is_loading());
}

#[tokio::test]
async fn non_json_search_body_empties_the_list() {
    let catalog = Arc::new(FakeCatalog::default().with_search("du", &[("Dune", "A")]));
    let mut search = SearchController::new(catalog, 10);
    search.search("du").await;
    assert_eq!(search.results().len(), 1);

    let ticket = search.begin("dun").unwrap();
    search.complete(&ticket, parse_search_response("<html>not json</html>"));

    assert!(search.results().is_empty());
    assert!(!search.is_loading());
}

#[tokio::test]
async fn detail_with_mistyped_fields_still_renders() {
    let catalog = Arc::new(FakeCatalog::default().with_volume(
        "X2",
        r#"{"volumeInfo": {"title": "Dune", "authors": "Frank Herbert", "imageLinks": {"thumbnail": 7}}}"#,
    ));
    let mut detail = DetailController::new(catalog);

    match detail.load(Some("X2")).await {
        DetailState::Loaded(book) => {
            assert_eq!(book.title, "Dune");
            assert!(book.authors.is_empty());
            assert_eq!(book.image_url, "");
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[tokio::test]
async fn detail_defaults_missing_fields() {
    let catalog = Arc::new(FakeCatalog::default().with_volume(
        "X1",
        r#"{"id": "X1", "volumeInfo": {"title": "T", "authors": null, "description": null, "imageLinks": null}}"#,
    ));
    let mut detail = DetailController::new(catalog);

    let state = detail.load(Some("X1")).await;
    assert_eq!(
        state,
        &DetailState::Loaded(BookDetail {
            title: "T".to_string(),
            authors: vec![],
            description: "No description available.".to_string(),
            image_url: String::new(),
        })
    );
}

#[tokio::test]
async fn detail_without_identifier_never_fetches() {
    let catalog = Arc::new(FakeCatalog::default());
    let mut detail = DetailController::new(catalog.clone());

    assert_eq!(detail.load(None).await, &DetailState::Loading);
    assert!(catalog.volume_calls.lock().is_empty());
}

#[tokio::test]
async fn detail_distinguishes_not_found_from_failure() {
    let catalog = Arc::new(FakeCatalog::default().with_volume("EMPTY", r#"{"id": "EMPTY"}"#));
    let mut detail = DetailController::new(catalog.clone());

    assert_eq!(detail.load(Some("EMPTY")).await, &DetailState::NotFound);
    assert_eq!(
        detail.load(Some("MISSING")).await,
        &DetailState::Error("Failed to fetch book details.".to_string())
    );
    assert_eq!(catalog.volume_calls.lock().clone(), vec!["EMPTY", "MISSING"]);
}

#[tokio::test]
async fn typing_then_selecting_reaches_the_detail_record() {
    let catalog = Arc::new(
        FakeCatalog::default()
            .with_search("du", &[("Dune", "A"), ("Duna", "B"), ("Mars", "C")])
            .with_volume("B", r#"{"id": "B", "volumeInfo": {"title": "Duna", "authors": ["Anon"]}}"#),
    );
    let mut search = SearchController::new(catalog.clone(), 10);
    let mut widget = Autocomplete::new();

    let effects = widget.update(WidgetEvent::TextChanged("du".into()), search.results());
    for effect in effects {
        if let WidgetEffect::Search(text) = effect {
            search.search(&text).await;
            widget.on_options_replaced();
        }
    }

    let visible: Vec<&str> = widget
        .filtered(search.results())
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(visible, vec!["A", "B"]);

    let effects = widget.update(WidgetEvent::RowClicked(1), search.results());
    assert_eq!(effects, vec![WidgetEffect::Select("B".into())]);
    assert_eq!(widget.query(), "Duna");
    assert!(!widget.is_open());

    let mut detail = DetailController::new(catalog);
    match detail.load(Some("B")).await {
        DetailState::Loaded(book) => assert_eq!(book.authors, vec!["Anon".to_string()]),
        other => panic!("unexpected state {other:?}"),
    }
}
