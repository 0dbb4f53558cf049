#[path = "../src/test_utils.rs"]
mod test_utils;

use std::sync::Arc;

use abi::{AvailabilityRecord, Config, RoomType};
use booking::{FileTokenStorage, MemoryTokenStorage, Store, TokenStorage};
use booking_front::{
    App, AuthForm, HotelApi, HttpHotelApi, NavItem, ResultsView, Route, SearchDraft, SearchForm,
};
use serde_json::json;
use test_utils::{ana, FakeHotelApi, Reply};

fn memory_store() -> (Store, Arc<MemoryTokenStorage>) {
    let storage = Arc::new(MemoryTokenStorage::default());
    (Store::new(storage.clone()).unwrap(), storage)
}

#[tokio::test]
async fn search_should_group_doble_and_suite() {
    let records: Vec<AvailabilityRecord> = serde_json::from_value(json!([
        {"room_type_id": 5, "room_type": {"id": 5, "name": "Doble", "base_price": 80}},
        {"room_type_id": 5, "room_type": {"id": 5, "name": "Doble", "base_price": 80}},
        {"room_type_id": 9, "room_type": {"id": 9, "name": "Suite", "base_price": 150}}
    ]))
    .unwrap();
    let api = FakeHotelApi::default().with_search(Reply::Ok(records));
    let mut form = SearchForm::new(SearchDraft::new("2024-01-01", "2024-01-03"));

    assert!(form.submit(&api).await);

    let query = api.calls().search[0];
    assert_eq!(
        query.to_query_pairs(),
        [
            ("checkin", "2024-01-01".to_string()),
            ("checkout", "2024-01-03".to_string())
        ]
    );
    let got: Vec<_> = form
        .summaries()
        .into_iter()
        .map(|s| (s.room_type.name.unwrap(), s.available_count))
        .collect();
    assert_eq!(got, vec![("Doble".to_string(), 2), ("Suite".to_string(), 1)]);
    assert!(!form.is_loading());
    assert_eq!(form.error(), None);
}

#[tokio::test]
async fn search_failure_should_show_empty_state() {
    let api = FakeHotelApi::default().with_search(Reply::Rejected(500, None));
    let mut form = SearchForm::new(SearchDraft::new("2024-01-01", "2024-01-03"));
    assert!(form.view() == ResultsView::Blank);

    form.submit(&api).await;

    assert!(form.results().is_empty());
    assert!(form.error().is_some());
    assert!(!form.is_loading());
    assert!(form.has_searched());
    assert_eq!(form.view(), ResultsView::NoAvailability);
}

#[tokio::test]
async fn search_failure_should_clear_previous_results() {
    let mut form = SearchForm::new(SearchDraft::new("2024-01-01", "2024-01-03"));
    let ok = FakeHotelApi::default().with_search(Reply::Ok(vec![
        AvailabilityRecord::for_room_type(RoomType::new(5, "Doble", 80.0)),
    ]));
    form.submit(&ok).await;
    assert_eq!(form.results().len(), 1);

    let down = FakeHotelApi::default().with_search(Reply::Unreachable);
    form.submit(&down).await;
    assert!(form.results().is_empty());
    assert!(form.error().is_some());
}

#[tokio::test]
async fn missing_backend_url_should_abort_search_before_request() {
    let api = HttpHotelApi::new(Config::default().api).unwrap();
    let mut form = SearchForm::new(SearchDraft::new("2024-01-01", "2024-01-03"));
    form.submit(&api).await;
    let err = form.error().unwrap();
    assert!(err.contains("backend url is not configured"));
    assert!(!form.is_loading());
}

#[tokio::test]
async fn register_with_taken_email_should_show_server_text() {
    let api = FakeHotelApi::default()
        .with_register(Reply::Rejected(400, Some("email already exists".into())));
    let (store, storage) = memory_store();
    let before = store.state();
    let mut form = AuthForm::register("ana@hotel.es", "secret", "Ana", "García");

    assert_eq!(form.submit(&api, &store).await, None);

    assert_eq!(form.error(), Some("email already exists"));
    assert!(api.calls().login.is_empty());
    assert_eq!(store.state(), before);
    assert_eq!(storage.load().unwrap(), None);
}

#[tokio::test]
async fn successful_login_should_update_store_storage_and_navbar() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileTokenStorage::new(dir.path().join("token")));
    let store = Store::new(storage.clone()).unwrap();
    let api: Arc<dyn HotelApi> = Arc::new(FakeHotelApi::default());
    let mut app = App::new(store, api);
    app.navigate(Route::Login);
    app.auth = AuthForm::login("ana@hotel.es", "secret");

    assert!(app.submit_auth().await);

    let state = app.state();
    assert_eq!(state.user(), Some(&ana()));
    assert_eq!(state.token(), Some("jwt-ana"));
    assert_eq!(storage.load().unwrap().as_deref(), Some("jwt-ana"));
    assert_eq!(app.route(), Route::Home);

    let nav = app.layout.nav.view(&state);
    assert_eq!(
        nav.items,
        vec![NavItem::UserName("Ana".into()), NavItem::Logout]
    );

    // a restart only restores the token
    let restarted = Store::new(storage.clone()).unwrap();
    assert_eq!(restarted.state().token(), Some("jwt-ana"));
    assert!(restarted.state().user().is_none());

    app.logout().unwrap();
    assert_eq!(storage.load().unwrap(), None);
    assert!(!app.layout.nav.view(&app.state()).is_logged_in());
}

#[tokio::test]
async fn store_subscribers_should_follow_auth() {
    let (store, _) = memory_store();
    let mut rx = store.subscribe();
    let api = FakeHotelApi::default();
    let mut form = AuthForm::login("ana@hotel.es", "secret");

    form.submit(&api, &store).await;
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_authenticated());
}

#[tokio::test]
async fn app_should_start_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::load("fixtures/config.yml").unwrap();
    assert_eq!(config.api.backend_url().unwrap(), "http://localhost:3001");
    config.storage.token_path = dir.path().join("token").display().to_string();

    let app = App::from_config(&config).unwrap();
    assert_eq!(app.route(), Route::Home);
    assert!(app.state().token().is_none());
    assert!(app.render().contains("Booking System Hotel | Login"));
    assert!(app.render().contains("Todos los derechos reservados."));
}
