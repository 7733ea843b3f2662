
use crate::data_store::store_mock::StoreMock;
use crate::data_store::models::NewEvent;
use crate::data_store::{EventmiStore, StoreError};
use crate::web::ui::configure_app;
use crate::web::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use sample_data::{date_time, fill_sample_data};
use std::sync::Arc;

fn app_data(store: Arc<StoreMock>) -> web::Data<AppState> {
    web::Data::new(AppState { store })
}

fn sample_store() -> Arc<StoreMock> {
    let store = Arc::new(StoreMock::default());
    fill_sample_data(store.as_ref());
    store
}

fn assert_redirects_to_events_list<B>(resp: &ServiceResponse<B>) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get(LOCATION)
        .expect("Redirect should have a Location header")
        .to_str()
        .unwrap();
    assert!(
        location.ends_with("/Event/All"),
        "Unexpected redirect location {}",
        location
    );
}

fn has_flash_cookie<B>(resp: &ServiceResponse<B>) -> bool {
    resp.response().cookies().any(|c| c.name() == "flash")
}

async fn body_string(resp: ServiceResponse<impl MessageBody>) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8(body.to_vec()).unwrap()
}

fn valid_form(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Name", name.to_owned()),
        ("Start", "06/01/2024 10:00 AM".to_owned()),
        ("End", "06/01/2024 04:30 PM".to_owned()),
        ("Place", "Town hall".to_owned()),
    ]
}

#[actix_web::test]
async fn test_index_redirects_to_events_list() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_redirects_to_events_list(&resp);
}

#[actix_web::test]
async fn test_events_list() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/All").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;

    let rust_meetup = body.find("Rust Meetup").expect("Rust Meetup should be listed");
    let game_night = body
        .find("Board Game Night")
        .expect("Board Game Night should be listed");
    let summer_party = body
        .find("Summer Party")
        .expect("Summer Party should be listed");
    assert!(rust_meetup < game_night);
    assert!(game_night < summer_party);
    assert!(body.contains("06:00 PM"));
}

#[actix_web::test]
async fn test_events_list_empty() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(Arc::new(StoreMock::default()))),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/All").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("No events found."));
}

#[actix_web::test]
async fn test_events_list_search() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get()
        .uri("/Event/All?search=party")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Summer Party"));
    assert!(!body.contains("Rust Meetup"));
    assert!(!body.contains("Board Game Night"));
}

#[actix_web::test]
async fn test_events_list_upcoming() {
    let store = sample_store();
    let start = chrono::Local::now().naive_local() + chrono::Duration::days(30);
    store
        .get_facade()
        .unwrap()
        .create_event(NewEvent {
            name: "Autumn Hackathon".to_owned(),
            start,
            end: start + chrono::Duration::hours(8),
            place: "Co-working space".to_owned(),
        })
        .unwrap();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/Event/All?upcoming=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Autumn Hackathon"));
    assert!(!body.contains("Rust Meetup"));
    assert!(!body.contains("Summer Party"));

    let req = test::TestRequest::get().uri("/Event/All").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Autumn Hackathon"));
    assert!(body.contains("Rust Meetup"));
    assert!(body.contains("Summer Party"));
}

#[actix_web::test]
async fn test_events_list_database_error() {
    let store = sample_store();
    store.data.lock().unwrap().next_error =
        Some(StoreError::ConnectionError("Connection refused".to_owned()));
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store)),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/All").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_add_event_form() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/Add").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("name=\"Name\""));
    assert!(body.contains("name=\"Start\""));
    assert!(body.contains("name=\"End\""));
    assert!(body.contains("name=\"Place\""));
    assert!(!body.contains("name=\"Id\""));
}

#[actix_web::test]
async fn test_add_event() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/Event/Add")
        .set_form(valid_form("Spring Hackathon"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_redirects_to_events_list(&resp);
    assert!(has_flash_cookie(&resp));

    let data = store.data.lock().unwrap();
    assert_eq!(data.events.len(), 4);
    let event = data
        .events
        .iter()
        .find(|e| e.name == "Spring Hackathon")
        .expect("Event should have been created");
    assert_eq!(event.id, 4);
    assert_eq!(event.start, date_time(6, 1, 10, 0));
    assert_eq!(event.end, date_time(6, 1, 16, 30));
    assert_eq!(event.place, "Town hall");
}

#[actix_web::test]
async fn test_add_event_invalid_data() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/Event/Add")
        .set_form([
            ("Name", "  "),
            ("Start", "06/01/2024 10:00 AM"),
            ("End", "tomorrow"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Must not be empty"));
    assert!(body.contains("Not a valid date and time"));
    assert!(body.contains("Value missing in form data"));
    // The user's input is kept in the re-rendered form
    assert!(body.contains("value=\"tomorrow\""));

    assert_eq!(store.data.lock().unwrap().events.len(), 3);
}

#[actix_web::test]
async fn test_add_event_end_before_start() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let mut form = valid_form("Time Travel");
    form[2].1 = "05/31/2024 10:00 AM".to_owned();
    let req = test::TestRequest::post()
        .uri("/Event/Add")
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp)
        .await
        .contains("The end must not be before the start of the event"));
    assert_eq!(store.data.lock().unwrap().events.len(), 3);
}

#[actix_web::test]
async fn test_event_details() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/Details/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Summer Party"));
    assert!(body.contains("City park"));
    assert!(body.contains("10:00h"));
}

#[actix_web::test]
async fn test_event_details_unknown_event() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/Details/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_string(resp).await.contains("Event not found"));
}

#[actix_web::test]
async fn test_edit_event_form() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/Edit/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("name=\"Id\" value=\"1\""));
    assert!(body.contains("value=\"Rust Meetup\""));
    assert!(body.contains("06:00 PM"));
    assert!(body.contains("09:30 PM"));

    let req = test::TestRequest::get().uri("/Event/Edit/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_edit_event() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let mut form = valid_form("Rust Meetup (moved)");
    form.push(("Id", "1".to_owned()));
    let req = test::TestRequest::post()
        .uri("/Event/Edit/1")
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_redirects_to_events_list(&resp);
    assert!(has_flash_cookie(&resp));

    let data = store.data.lock().unwrap();
    assert_eq!(data.events.len(), 3);
    let event = data.events.iter().find(|e| e.id == 1).unwrap();
    assert_eq!(event.name, "Rust Meetup (moved)");
    assert_eq!(event.start, date_time(6, 1, 10, 0));
    assert_eq!(event.place, "Town hall");
}

#[actix_web::test]
async fn test_edit_event_id_mismatch() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;

    let mut form = valid_form("Hijacked");
    form.push(("Id", "2".to_owned()));
    let req = test::TestRequest::post()
        .uri("/Event/Edit/1")
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Missing id and a mismatching id with otherwise invalid data are rejected the same way
    let req = test::TestRequest::post()
        .uri("/Event/Edit/1")
        .set_form(valid_form("Hijacked"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let req = test::TestRequest::post()
        .uri("/Event/Edit/1")
        .set_form([("Id", "2"), ("Name", "Hijacked")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let data = store.data.lock().unwrap();
    assert!(data.events.iter().all(|e| e.name != "Hijacked"));
}

#[actix_web::test]
async fn test_edit_event_invalid_data() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let before = store.data.lock().unwrap().events.clone();

    let req = test::TestRequest::post()
        .uri("/Event/Edit/1")
        .set_form([("Id", "1"), ("Name", "Changed")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("value=\"Changed\""));
    assert!(body.contains("Value missing in form data"));

    assert_eq!(store.data.lock().unwrap().events, before);
}

#[actix_web::test]
async fn test_edit_unknown_event() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let mut form = valid_form("Ghost");
    form.push(("Id", "42".to_owned()));
    let req = test::TestRequest::post()
        .uri("/Event/Edit/42")
        .set_form(form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.data.lock().unwrap().events.len(), 3);
}

#[actix_web::test]
async fn test_add_event_transaction_conflict() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    store.data.lock().unwrap().next_error = Some(StoreError::TransactionConflict);
    let req = test::TestRequest::post()
        .uri("/Event/Add")
        .set_form(valid_form("Retry me"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_string(resp).await.contains("value=\"Retry me\""));
    assert_eq!(store.data.lock().unwrap().events.len(), 3);
}

#[actix_web::test]
async fn test_delete_event() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/Event/Delete/3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_redirects_to_events_list(&resp);
    assert!(has_flash_cookie(&resp));

    {
        let data = store.data.lock().unwrap();
        assert_eq!(data.events.len(), 2);
        assert!(data.events.iter().all(|e| e.id != 3));
    }

    let req = test::TestRequest::post()
        .uri("/Event/Delete/3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_event_requires_post() {
    let store = sample_store();
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(store.clone())),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/Delete/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.data.lock().unwrap().events.len(), 3);
}

#[actix_web::test]
async fn test_unknown_page() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/Event/Unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_string(resp).await.contains("Page not found"));
}

#[actix_web::test]
async fn test_static_stylesheet() {
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(app_data(sample_store())),
    )
    .await;
    let req = test::TestRequest::get().uri("/static/style.css").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .unwrap(),
        "text/css"
    );
}
