//! End-to-end catalog flows driven through `handle_event`, the way the plugin
//! shim drives them.

use zbooks::search::{PageKind, PageTicket, SourceKind};
use zbooks::storage::{FavoriteKey, JsonSettingsStore, MemorySettingsStore, SettingsStore};
use zbooks::ui::ViewBody;
use zbooks::{handle_event, Action, AppState, Config, Event, FetchOutcome, Screen, Theme};

const FIRST_PAGE: &str = r#"[
    {"id":"b1","title":"Book 1","authors":["Author 1"],"description":"Description 1",
     "thumbnailURL":null,"buyLinkURL":"https://example.com/buy/1","isFavorite":true},
    {"id":"b2","title":"Book 2","authors":["Author 2"],"description":"Description 2",
     "thumbnailURL":null,"buyLinkURL":null,"isFavorite":false}
]"#;

const SECOND_PAGE: &str = r#"[
    {"id":"b3","title":"Book 3","authors":[],"description":"",
     "thumbnailURL":null,"buyLinkURL":null,"isFavorite":false}
]"#;

const GOOGLE_PAGE: &str = r#"{
    "items": [
        {"id":"g1","volumeInfo":{"title":"Programming iOS","authors":["Matt Neuburg"]},
         "saleInfo":{"buyLink":"https://play.google.com/store/books/details?id=g1"}}
    ]
}"#;

fn json_config(page_size: usize) -> Config {
    Config {
        source: SourceKind::Json,
        api_url: Some("http://localhost:9000/books".to_string()),
        page_size,
        ..Config::default()
    }
}

fn state_with(config: &Config, store: Box<dyn SettingsStore>) -> AppState {
    AppState::new(config, Theme::default(), store)
}

fn fetch_of(actions: &[Action]) -> (String, PageTicket) {
    match actions {
        [Action::FetchPage { url, ticket }] => (url.clone(), *ticket),
        other => panic!("expected one fetch, got {other:?}"),
    }
}

fn deliver(state: &mut AppState, ticket: PageTicket, body: &str) -> bool {
    let event = Event::PageFetched {
        ticket,
        outcome: FetchOutcome {
            status: 200,
            body: body.as_bytes().to_vec(),
        },
    };
    handle_event(state, &event).unwrap().0
}

fn start(state: &mut AppState, body: &str) {
    let (_, actions) = handle_event(state, &Event::Start).unwrap();
    let (_, ticket) = fetch_of(&actions);
    assert!(deliver(state, ticket, body));
}

fn titles(state: &AppState) -> Vec<String> {
    state
        .catalog
        .filtered_view()
        .iter()
        .map(|b| b.title.clone())
        .collect()
}

#[test]
fn paginates_until_an_empty_page() {
    let mut state = state_with(&json_config(2), Box::new(MemorySettingsStore::default()));
    start(&mut state, FIRST_PAGE);

    let (_, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
    let (url, ticket) = fetch_of(&actions);
    assert_eq!(url, "http://localhost:9000/books?query=iOS&maxResults=2&startIndex=2");
    assert_eq!(ticket.kind, PageKind::More);

    deliver(&mut state, ticket, SECOND_PAGE);
    assert_eq!(titles(&state), vec!["Book 1", "Book 2", "Book 3"]);
    assert_eq!(state.catalog.current_page(), 2);

    let (_, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
    let (url, ticket) = fetch_of(&actions);
    assert!(url.ends_with("startIndex=4"));

    deliver(&mut state, ticket, "[]");
    assert!(state.catalog.is_exhausted());
    let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
    assert!(actions.is_empty());
    assert_eq!(titles(&state).len(), 3);
}

#[test]
fn favorites_survive_a_restart_through_the_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let config = json_config(20);

    {
        let store = JsonSettingsStore::open(&path).unwrap();
        let mut state = state_with(&config, Box::new(store));
        start(&mut state, FIRST_PAGE);

        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_eq!(state.screen, Screen::Detail);
        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        handle_event(&mut state, &Event::Back).unwrap();

        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::OpenSelected).unwrap();
        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        handle_event(&mut state, &Event::Back).unwrap();
    }

    let store = JsonSettingsStore::open(&path).unwrap();
    assert_eq!(store.lookup("Book 1").unwrap(), Some(false));
    assert_eq!(store.lookup("Book 2").unwrap(), Some(true));

    let mut state = state_with(&config, Box::new(store));
    start(&mut state, FIRST_PAGE);
    handle_event(&mut state, &Event::ToggleFavoritesFilter).unwrap();
    assert_eq!(titles(&state), vec!["Book 2"]);
}

#[test]
fn id_keyed_favorites_do_not_collide_on_titles() {
    let page = r#"[
        {"id":"a","title":"Same","authors":[],"description":"","thumbnailURL":null,"buyLinkURL":null,"isFavorite":false},
        {"id":"b","title":"Same","authors":[],"description":"","thumbnailURL":null,"buyLinkURL":null,"isFavorite":false}
    ]"#;
    let config = Config {
        favorite_key: FavoriteKey::Id,
        ..json_config(20)
    };
    let mut state = state_with(&config, Box::new(MemorySettingsStore::default()));
    start(&mut state, page);

    handle_event(&mut state, &Event::OpenSelected).unwrap();
    handle_event(&mut state, &Event::ToggleFavorite).unwrap();
    handle_event(&mut state, &Event::Back).unwrap();

    handle_event(&mut state, &Event::ToggleFavoritesFilter).unwrap();
    let ids: Vec<&str> = state
        .catalog
        .filtered_view()
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn edited_query_starts_a_new_search() {
    let mut state = state_with(&json_config(20), Box::new(MemorySettingsStore::default()));
    start(&mut state, FIRST_PAGE);

    handle_event(&mut state, &Event::EditQuery).unwrap();
    for _ in 0..3 {
        handle_event(&mut state, &Event::Backspace).unwrap();
    }
    for c in "rust".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    let (_, actions) = handle_event(&mut state, &Event::SubmitQuery).unwrap();
    let (url, ticket) = fetch_of(&actions);

    assert_eq!(url, "http://localhost:9000/books?query=rust&maxResults=20&startIndex=0");
    assert!(state.catalog.books().is_empty());
    deliver(&mut state, ticket, SECOND_PAGE);
    assert_eq!(titles(&state), vec!["Book 3"]);
}

#[test]
fn google_source_renders_detail_with_buy_link() {
    let mut state = state_with(&Config::default(), Box::new(MemorySettingsStore::default()));
    let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
    let (url, ticket) = fetch_of(&actions);
    assert!(url.starts_with("https://www.googleapis.com/books/v1/volumes?q=iOS"));

    deliver(&mut state, ticket, GOOGLE_PAGE);
    handle_event(&mut state, &Event::OpenSelected).unwrap();

    let vm = state.compute_viewmodel(30, 80);
    match vm.body {
        ViewBody::Detail(detail) => {
            assert_eq!(detail.title, "Programming iOS");
            assert_eq!(detail.authors, "By Matt Neuburg");
            assert_eq!(
                detail.buy_link.as_deref(),
                Some("https://play.google.com/store/books/details?id=g1")
            );
        }
        other => panic!("expected detail view, got {other:?}"),
    }

    let (_, actions) = handle_event(&mut state, &Event::OpenBuyLink).unwrap();
    assert_eq!(
        actions,
        vec![Action::OpenUrl {
            url: "https://play.google.com/store/books/details?id=g1".to_string()
        }]
    );
}
