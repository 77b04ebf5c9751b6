//! Integration tests for the admin page handlers
//!
//! Each test starts an axum stub of the database server on an ephemeral
//! port, drives a `Page` against it and checks both what was sent and how
//! the document and feedback modal changed.

use amdb_admin::document::SelectOption;
use amdb_admin::families::{EntityFamily, RenderedRow, ARTIST_NAMES, LINE_UP_MEMBERS, SONG_ARTISTS};
use amdb_admin::page::{
    artist_dropdown_id, artist_input_id, hidden_artist_input_id, line_up_dropdown_id,
    line_up_input_id, role_type_select_id, NEW_NAME_INPUT, NEW_ORIGINAL_NAME_INPUT,
};
use amdb_admin::sync::ListSynchronizer;
use amdb_admin::{Page, Severity};
use amdb_common::config::ClientConfig;
use amdb_common::models::{ArtistCandidate, CandidateName, LineupMembership};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// =============================================================================
// Test helpers
// =============================================================================

/// Requests received by the stub server
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<(String, Value)>>>);

impl Recorder {
    fn push(&self, call: &str, body: Value) {
        self.0.lock().unwrap().push((call.to_string(), body));
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.0.lock().unwrap().clone()
    }
}

/// Serve `router` on 127.0.0.1 and return its origin
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn open_page(server_url: &str, page_path: &str) -> Page {
    let config = ClientConfig {
        server_url: server_url.to_string(),
        ..Default::default()
    };
    Page::open(&config, page_path).expect("Should open page")
}

fn seed_name(page: &mut Page, id: i64, name: &str) {
    page.document.add_list(ARTIST_NAMES.list_id(""));
    let row = RenderedRow::Name {
        id,
        name: name.to_string(),
        original_name: String::new(),
    };
    ListSynchronizer::new(&ARTIST_NAMES)
        .insert(&mut page.document, "", &row)
        .unwrap();
}

fn seed_member(page: &mut Page, scope: &str, link_id: i64) {
    seed_membership(page, &LINE_UP_MEMBERS, scope, link_id);
}

fn seed_membership(page: &mut Page, family: &EntityFamily, scope: &str, link_id: i64) {
    page.document.add_list(family.list_id(scope));
    let row = RenderedRow::Membership {
        membership: LineupMembership {
            link_id,
            artist_id: 9,
            lineup_id: None,
            role_type_id: 1,
        },
        artist_name: "Aimer".to_string(),
        role_label: "Performer".to_string(),
    };
    ListSynchronizer::new(family)
        .insert(&mut page.document, scope, &row)
        .unwrap();
}

fn fill_member_form(page: &mut Page, element: &str, artist_id: &str, line_up: &str) {
    page.document.set_input(artist_input_id(element), "Aimer");
    page.document.set_input(hidden_artist_input_id(element), artist_id);
    page.document.set_input(line_up_input_id(element), line_up);
    page.document.add_select(
        role_type_select_id(element),
        vec![
            SelectOption { value: "1".into(), text: "Performer".into() },
            SelectOption { value: "2".into(), text: "Composer".into() },
        ],
    );
}

fn artist(id: i64, name: &str, original: &str) -> ArtistCandidate {
    ArtistCandidate {
        id,
        names: vec![CandidateName {
            artist_name: Some(name.to_string()),
            original_artist_name: Some(original.to_string()),
        }],
    }
}

/// Origin with nothing listening
async fn closed_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// =============================================================================
// Artist names
// =============================================================================

#[tokio::test]
async fn test_add_artist_name_appends_row_without_reload() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/artists/3/names/",
        post(move |Json(body): Json<Value>| async move {
            rec.push("POST /artists/3/names/", body);
            Json(json!({
                "id": 7,
                "id_artist": 3,
                "artist_name": "Foo",
                "original_artist_name": "Bar",
                "order": 2
            }))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    page.document.add_list("nameList");
    page.document.set_input(NEW_NAME_INPUT, "Foo");
    page.document.set_input(NEW_ORIGINAL_NAME_INPUT, "Bar");

    assert_eq!(page.add_artist_name().await, Some(7));

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, json!({"artist_name": "Foo", "original_artist_name": "Bar"}));

    let items = page.document.list("nameList").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].dom_id, "item_7");
    assert_eq!(items[0].field_value(0), Some("Foo"));
    assert_eq!(items[0].field_value(1), Some("Bar"));

    assert_eq!(page.document.input(NEW_NAME_INPUT).unwrap(), "");
    assert_eq!(page.document.input(NEW_ORIGINAL_NAME_INPUT).unwrap(), "");
    assert!(!page.feedback.is_active());
    assert_eq!(page.reloads(), 0);
}

#[tokio::test]
async fn test_blank_name_is_rejected_before_dispatch() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/artists/3/names/",
        post(move |Json(body): Json<Value>| async move {
            rec.push("POST", body);
            Json(json!({"id": 1}))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    page.document.add_list("nameList");
    page.document.set_input(NEW_NAME_INPUT, "   ");
    page.document.set_input(NEW_ORIGINAL_NAME_INPUT, "Bar");

    assert_eq!(page.add_artist_name().await, None);

    assert!(recorder.calls().is_empty());
    let report = page.feedback.current().unwrap();
    assert_eq!(report.title(), "ERROR");
    assert_eq!(report.body, "Name cannot be empty");
    assert_eq!(report.severity, Some(Severity::Validation));
    assert_eq!(page.document.list_len("nameList"), 0);
}

#[tokio::test]
async fn test_edit_artist_name_sends_row_inputs() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/artists/3/names/5",
        put(move |Json(body): Json<Value>| async move {
            rec.push("PUT /artists/3/names/5", body);
            Json(json!({"id": 5}))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    seed_name(&mut page, 5, "Old");
    page.document.set_field("nameInput_5", "New").unwrap();
    page.document.set_field("originalNameInput_5", "ニュー").unwrap();

    assert!(page.edit_artist_name(5).await);
    assert_eq!(
        recorder.calls()[0].1,
        json!({"artist_name": "New", "original_artist_name": "ニュー"})
    );
    assert!(!page.feedback.is_active());
}

#[tokio::test]
async fn test_remove_artist_name_detaches_row() {
    let app = Router::new().route(
        "/artists/3/names/5",
        delete(|| async { Json(json!({"id": 5})) }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    seed_name(&mut page, 4, "Keep");
    seed_name(&mut page, 5, "Drop");

    assert!(page.remove_artist_name(5).await);

    let items = page.document.list("nameList").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].data_id, 4);
}

#[tokio::test]
async fn test_remove_confirmed_but_element_missing_reports_consistency() {
    let app = Router::new().route(
        "/artists/3/names/5",
        delete(|| async { Json(json!({"id": 5})) }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    seed_name(&mut page, 4, "Other");

    assert!(!page.remove_artist_name(5).await);

    let report = page.feedback.current().unwrap();
    assert_eq!(report.severity, Some(Severity::Consistency));
    assert!(report.body.contains("Element not found"));
    assert_eq!(page.document.list_len("nameList"), 1);
}

#[tokio::test]
async fn test_edit_anime_name() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/anime/8/names/2",
        put(move |Json(body): Json<Value>| async move {
            rec.push("PUT", body);
            Json(json!({"id": 2}))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/anime/8/");
    page.document.set_input("original-name-2", "進撃の巨人");

    assert!(page.edit_anime_name(2).await);
    assert_eq!(recorder.calls()[0].1, json!({"original_anime_name": "進撃の巨人"}));
}

#[tokio::test]
async fn test_drop_name_submits_dense_ranking() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/artists/3/names/reorder/",
        put(move |Json(body): Json<Value>| async move {
            rec.push("PUT reorder", body.clone());
            Json(body["order"].clone())
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    for (id, name) in [(11, "a"), (12, "b"), (13, "c")] {
        seed_name(&mut page, id, name);
    }

    assert!(page.drop_name(2, 0).await);

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].1,
        json!({"order": [
            {"id": 13, "order": 1},
            {"id": 11, "order": 2},
            {"id": 12, "order": 3}
        ]})
    );
}

#[tokio::test]
async fn test_drop_out_of_range_sends_nothing() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/artists/3/names/reorder/",
        put(move |Json(body): Json<Value>| async move {
            rec.push("PUT reorder", body);
            StatusCode::OK
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    seed_name(&mut page, 11, "a");

    assert!(!page.drop_name(0, 4).await);
    assert!(recorder.calls().is_empty());
    assert_eq!(
        page.feedback.current().unwrap().severity,
        Some(Severity::Consistency)
    );
}

// =============================================================================
// Lineups
// =============================================================================

#[tokio::test]
async fn test_add_line_up_shows_server_feedback() {
    let app = Router::new().route(
        "/artists/3/line_ups/",
        post(|| async {
            Json(json!({
                "new_line_up": {"id": 4, "id_artist": 3},
                "feedback": "Moved 2 songs"
            }))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    assert!(page.add_line_up(3).await);

    let report = page.feedback.current().unwrap();
    assert_eq!(report.title(), "SUCCESS");
    assert_eq!(report.body, "Moved 2 songs");
    assert_eq!(page.reloads(), 0);

    page.dismiss_feedback();
    assert!(!page.feedback.is_active());
    assert_eq!(page.reloads(), 1);
}

#[tokio::test]
async fn test_add_line_up_without_feedback_reloads() {
    let app = Router::new().route(
        "/artists/3/line_ups/",
        post(|| async { Json(json!({"new_line_up": {"id": 4, "id_artist": 3}})) }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    assert!(page.add_line_up(3).await);
    assert!(!page.feedback.is_active());
    assert_eq!(page.reloads(), 1);
}

#[tokio::test]
async fn test_remove_line_up_refused() {
    let app = Router::new().route(
        "/line_ups/4",
        delete(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Line up 4 still has members, can't delete it"})),
            )
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    assert!(!page.remove_line_up(4).await);

    let report = page.feedback.current().unwrap();
    assert_eq!(report.title(), "ERROR");
    assert_eq!(report.severity, Some(Severity::Network));
    assert!(report.body.starts_with("400 Bad Request. "));
    assert!(report.body.contains("still has members"));
}

#[tokio::test]
async fn test_remove_line_up_shows_server_feedback() {
    let app = Router::new().route(
        "/line_ups/4",
        delete(|| async { Json(json!({"feedback": "Moved 3 songs back to artist 3"})) }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    assert!(page.remove_line_up(4).await);

    let report = page.feedback.current().unwrap();
    assert_eq!(report.title(), "SUCCESS");
    assert_eq!(report.severity, None);
    assert_eq!(report.body, "Moved 3 songs back to artist 3");
    assert_eq!(page.reloads(), 0);
}

#[tokio::test]
async fn test_add_line_up_member_appends_row() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/line_ups/4",
        post(move |Json(body): Json<Value>| async move {
            rec.push("POST /line_ups/4", body);
            Json(json!({"id": 31, "id_member": 9, "id_member_line_up": null, "id_role_type": 2}))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    page.document.add_list("member-list-4");
    fill_member_form(&mut page, "4", "9", "");
    page.document.choose(&role_type_select_id("4"), 1).unwrap();

    assert_eq!(page.add_line_up_member(4).await, Some(31));
    assert_eq!(
        recorder.calls()[0].1,
        json!({"id_member": 9, "id_member_line_up": null, "id_role_type": 2})
    );

    let items = page.document.list("member-list-4").unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.dom_id, "artist-item-31");
    assert_eq!(item.field("name-31-9").unwrap().value, "Aimer");
    assert_eq!(item.field("line-up-31-9").unwrap().value, "None");
    assert_eq!(item.field("role-type-31-9").unwrap().value, "Composer");
}

#[tokio::test]
async fn test_add_line_up_member_requires_artist() {
    let origin = closed_origin().await;

    let mut page = open_page(&origin, "/artists/3/");
    page.document.add_list("member-list-4");
    fill_member_form(&mut page, "4", " ", "");

    assert_eq!(page.add_line_up_member(4).await, None);
    let report = page.feedback.current().unwrap();
    assert_eq!(report.body, "Artist must be specified");
    assert_eq!(report.severity, Some(Severity::Validation));
}

#[tokio::test]
async fn test_remove_line_up_member_not_found_keeps_row() {
    let app = Router::new().route(
        "/line_ups/members/42",
        delete(|| async { (StatusCode::NOT_FOUND, "not found") }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    seed_member(&mut page, "4", 42);

    assert!(!page.remove_line_up_member(42).await);

    let report = page.feedback.current().unwrap();
    assert_eq!(report.title(), "ERROR");
    assert_eq!(report.body, "404 Not Found. not found");
    assert!(page.document.find_item("artist-item-42").is_some());
}

#[tokio::test]
async fn test_remove_line_up_member_detaches_row() {
    let app = Router::new().route(
        "/line_ups/members/42",
        delete(|| async { Json(json!({"id": 42})) }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/artists/3/");
    seed_member(&mut page, "4", 41);
    seed_member(&mut page, "4", 42);

    assert!(page.remove_line_up_member(42).await);
    assert!(page.document.find_item("artist-item-42").is_none());
    assert!(page.document.find_item("artist-item-41").is_some());
}

#[tokio::test]
async fn test_unreachable_server_reports_network_error() {
    let origin = closed_origin().await;

    let mut page = open_page(&origin, "/artists/3/");
    seed_member(&mut page, "4", 42);

    assert!(!page.remove_line_up_member(42).await);
    assert_eq!(
        page.feedback.current().unwrap().severity,
        Some(Severity::Network)
    );
    assert!(page.document.find_item("artist-item-42").is_some());
}

// =============================================================================
// Song artists
// =============================================================================

#[tokio::test]
async fn test_add_song_artist_uses_song_from_page_url() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/songs/artist/add/",
        post(move |Json(body): Json<Value>| async move {
            rec.push("POST /songs/artist/add/", body);
            Json(json!({"id": 77, "id_song": 12, "id_artist": 9, "id_artist_line_up": 5}))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/songs/12/");
    assert_eq!(page.song_id(), Some(12));
    page.document.add_list(SONG_ARTISTS.list_id("song"));
    fill_member_form(&mut page, "song", "9", "5");

    assert_eq!(page.add_song_artist("song").await, Some(77));
    assert_eq!(
        recorder.calls()[0].1,
        json!({"id_song": 12, "id_artist": 9, "id_artist_line_up": 5, "id_role_type": 1})
    );

    let item = &page.document.list("song-artist-list-song").unwrap()[0];
    assert_eq!(item.field("line-up-77-9").unwrap().value, "5");
}

#[tokio::test]
async fn test_remove_song_artist_detaches_row() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new().route(
        "/songs/artists/77",
        delete(move || async move {
            rec.push("DELETE song artist", Value::Null);
            Json(json!({"id": 77}))
        }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/songs/12/");
    seed_membership(&mut page, &SONG_ARTISTS, "song", 76);
    seed_membership(&mut page, &SONG_ARTISTS, "song", 77);

    assert!(page.remove_song_artist(77).await);

    assert_eq!(recorder.calls().len(), 1);
    assert!(page.document.find_item("artist-item-77").is_none());
    assert!(page.document.find_item("artist-item-76").is_some());
    assert!(!page.feedback.is_active());
    assert_eq!(page.reloads(), 0);
}

#[tokio::test]
async fn test_remove_song_artist_missing_row_reports_consistency() {
    let app = Router::new().route(
        "/songs/artists/77",
        delete(|| async { Json(json!({"id": 77})) }),
    );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/songs/12/");
    page.document.add_list(SONG_ARTISTS.list_id("song"));

    assert!(!page.remove_song_artist(77).await);
    assert_eq!(
        page.feedback.current().unwrap().severity,
        Some(Severity::Consistency)
    );
}

// =============================================================================
// Autocomplete
// =============================================================================

#[tokio::test]
async fn test_artist_search_select_and_line_up() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let app = Router::new()
        .route(
            "/autocomplete/artists",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                rec.push("GET artists", json!(params));
                Json(json!([
                    {"id": 1, "names": [{"artist_name": "Yo-yo", "original_artist_name": null}]},
                    {"id": 2, "names": [
                        {"artist_name": "Hitomi", "original_artist_name": "ヨーヨー"}
                    ]},
                    {"id": 3, "names": [
                        {"artist_name": "YOASOBI", "original_artist_name": "ヨアソビ"}
                    ]}
                ]))
            }),
        )
        .route(
            "/autocomplete/line_ups",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("id_artist").map(String::as_str), Some("3"));
                Json(json!([
                    {"id": 12, "members": [
                        {"names": [{"artist_name": "Ayase"}]},
                        {"names": [{"artist_name": "ikura"}]}
                    ]}
                ]))
            }),
        );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/songs/12/");
    page.document.set_input(artist_input_id("song"), "Yo");
    page.document.set_input(line_up_input_id("song"), "");

    page.handle_artist_search("song").await;

    let calls = recorder.calls();
    assert_eq!(calls[0].1, json!({"limit": "100", "search": "yo"}));

    let dropdown = page.document.dropdown(&artist_dropdown_id("song")).unwrap();
    assert!(dropdown.is_visible());
    let labels: Vec<&str> = dropdown.options().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Yo-yo", "YOASOBI"]);

    // Pointer over the dropdown: blur must not hide it before the click
    page.document
        .dropdown_mut(&artist_dropdown_id("song"))
        .pointer_enter();
    assert!(!page.blur_artist_search("song"));

    assert!(page.select_artist("song", 1).await);
    assert_eq!(page.document.input(&artist_input_id("song")).unwrap(), "YOASOBI");
    assert_eq!(page.document.input(&hidden_artist_input_id("song")).unwrap(), "3");
    assert!(!page
        .document
        .dropdown(&artist_dropdown_id("song"))
        .unwrap()
        .is_visible());

    page.handle_line_up_search("song");
    let dropdown = page.document.dropdown(&line_up_dropdown_id("song")).unwrap();
    assert_eq!(dropdown.options()[0].label, "12 (Ayase, ikura)");

    assert!(page.select_line_up("song", 0));
    assert_eq!(page.document.input(&line_up_input_id("song")).unwrap(), "12");
    assert!(!page.feedback.is_active());
}

#[tokio::test]
async fn test_clearing_artist_forgets_previous_line_ups() {
    let app = Router::new()
        .route(
            "/autocomplete/artists",
            get(|| async {
                Json(json!([
                    {"id": 3, "names": [
                        {"artist_name": "YOASOBI", "original_artist_name": "ヨアソビ"}
                    ]}
                ]))
            }),
        )
        .route(
            "/autocomplete/line_ups",
            get(|| async {
                Json(json!([
                    {"id": 12, "members": [{"names": [{"artist_name": "Ayase"}]}]}
                ]))
            }),
        );
    let origin = spawn_server(app).await;

    let mut page = open_page(&origin, "/songs/12/");
    page.document.set_input(artist_input_id("song"), "yo");
    page.handle_artist_search("song").await;
    assert!(page.select_artist("song", 0).await);
    assert_eq!(page.line_up_cache().entries().len(), 1);
    page.handle_line_up_search("song");
    assert!(page.select_line_up("song", 0));

    page.document.set_input(artist_input_id("song"), "");
    page.handle_artist_search("song").await;
    assert!(page.line_up_cache().entries().is_empty());
    assert_eq!(page.document.input(&line_up_input_id("song")).unwrap(), "");
    assert_eq!(page.document.input(&hidden_artist_input_id("song")).unwrap(), "");

    // Typed but no option picked: nothing to offer
    page.document.set_input(artist_input_id("song"), "b");
    page.handle_line_up_search("song");
    let dropdown = page.document.dropdown(&line_up_dropdown_id("song")).unwrap();
    assert!(dropdown.options().is_empty());
    assert!(!dropdown.is_visible());
    assert!(!page.feedback.is_active());
}

#[tokio::test]
async fn test_slow_search_cannot_overwrite_newer_results() {
    let origin = closed_origin().await;
    let mut page = open_page(&origin, "/songs/12/");

    page.document.set_input(artist_input_id("song"), "a");
    let first = page.begin_artist_search("song").unwrap();
    page.document.set_input(artist_input_id("song"), "ai");
    let second = page.begin_artist_search("song").unwrap();

    assert!(page.finish_artist_search(&second, Ok(vec![artist(2, "Aimer", "エメ")])));
    assert!(!page.finish_artist_search(&first, Ok(vec![artist(1, "Ado", "アド")])));

    let ids: Vec<i64> = page.artist_cache().entries().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2]);
    let options = page
        .document
        .dropdown(&artist_dropdown_id("song"))
        .unwrap()
        .options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, 2);
}

#[tokio::test]
async fn test_clearing_search_discards_in_flight_results() {
    let origin = closed_origin().await;
    let mut page = open_page(&origin, "/songs/12/");

    page.document.set_input(artist_input_id("song"), "ai");
    let pending = page.begin_artist_search("song").unwrap();

    page.document.set_input(artist_input_id("song"), "");
    assert!(page.begin_artist_search("song").is_none());

    assert!(!page.finish_artist_search(&pending, Ok(vec![artist(2, "Aimer", "エメ")])));
    assert!(page.artist_cache().entries().is_empty());
    assert!(!page
        .document
        .dropdown(&artist_dropdown_id("song"))
        .unwrap()
        .is_visible());
}

#[tokio::test]
async fn test_dismissing_feedback_resets_caches() {
    let origin = closed_origin().await;
    let mut page = open_page(&origin, "/songs/12/");

    page.document.set_input(artist_input_id("song"), "ai");
    let search = page.begin_artist_search("song").unwrap();
    assert!(page.finish_artist_search(&search, Ok(vec![artist(2, "Aimer", "エメ")])));

    // Network failure on a mutation brings up the modal
    assert!(!page.remove_song_artist(5).await);
    assert!(page.feedback.is_active());

    page.dismiss_feedback();
    assert_eq!(page.reloads(), 1);
    assert!(page.artist_cache().entries().is_empty());
    assert!(page
        .document
        .dropdown(&artist_dropdown_id("song"))
        .unwrap()
        .options()
        .is_empty());
}
