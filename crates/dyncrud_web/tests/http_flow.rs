use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use dyncrud_core::CustomerDraft;
use dyncrud_web::{router, CustomerStore};
use tower::ServiceExt;

fn setup() -> (Router, CustomerStore) {
    let store = CustomerStore::in_memory().unwrap();
    (router(store.clone()), store)
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

fn row_count(page: &str) -> usize {
    page.matches("<tr data-id=").count()
}

#[tokio::test]
async fn empty_listing_renders_header_without_banner() {
    let (app, _) = setup();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("<th>Id</th>"));
    assert_eq!(row_count(&page), 0);
    assert!(!page.contains("alert-dismissible"));
}

#[tokio::test]
async fn create_list_delete_end_to_end() {
    let (app, store) = setup();

    let response = post_form(&app, "/add", "name=Alice&email=alice%40x.com&salary=5000").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?msg1=insert");

    let page = body_text(get(&app, "/?msg1=insert").await).await;
    assert!(page.contains("Customer added successfully"));
    assert_eq!(row_count(&page), 1);
    assert!(page.contains("<td>1</td>"));
    assert!(page.contains("<td>Alice</td>"));
    assert!(page.contains("<td>alice@x.com</td>"));
    assert!(page.contains("<td>5000</td>"));
    assert!(page.contains("href=\"/?deleteId=1\""));

    let response = get(&app, "/?deleteId=1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?msg3=delete");

    let page = body_text(get(&app, "/?msg3=delete").await).await;
    assert_eq!(row_count(&page), 0);
    assert!(page.contains("Customer deleted successfully"));
    assert!(!page.contains("Customer added successfully"));

    let remaining = store.run(|service| service.list_all()).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn edit_prefills_and_updates_record() {
    let (app, store) = setup();
    let id = store
        .run(|service| service.create(&CustomerDraft::new("Alice", "alice@x.com", 5000.0)))
        .await
        .unwrap();

    let response = get(&app, &format!("/edit?editId={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("value=\"Alice\""));
    assert!(page.contains(&format!("action=\"/edit?editId={id}\"")));

    let response = post_form(
        &app,
        &format!("/edit?editId={id}"),
        "name=Alicia&email=alicia%40y.org&salary=6100.5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?msg2=update");

    let updated = store
        .run(move |service| service.get_by_id(id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, "alicia@y.org");
    assert_eq!(updated.salary, 6100.5);

    let page = body_text(get(&app, "/?msg2=update").await).await;
    assert!(page.contains("Customer updated successfully"));
}

#[tokio::test]
async fn edit_of_unknown_or_malformed_id_renders_not_found() {
    let (app, _) = setup();

    for uri in ["/edit?editId=42", "/edit?editId=abc", "/edit"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(body_text(response).await.contains("Record not found"));
    }
}

#[tokio::test]
async fn update_of_vanished_id_still_redirects() {
    let (app, store) = setup();

    let response = post_form(&app, "/edit?editId=77", "name=Ghost&email=&salary=1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?msg2=update");

    let all = store.run(|service| service.list_all()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn delete_without_usable_id_renders_listing() {
    let (app, store) = setup();
    store
        .run(|service| service.create(&CustomerDraft::new("Keep", "k@x.com", 1.0)))
        .await
        .unwrap();

    for uri in ["/?deleteId=", "/?deleteId=abc"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(row_count(&body_text(response).await), 1);
    }
}

#[tokio::test]
async fn delete_of_missing_id_redirects_and_keeps_rows() {
    let (app, store) = setup();
    store
        .run(|service| service.create(&CustomerDraft::new("Keep", "k@x.com", 1.0)))
        .await
        .unwrap();

    let response = get(&app, "/?deleteId=999").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let all = store.run(|service| service.list_all()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn non_numeric_salary_is_rejected_without_writing() {
    let (app, store) = setup();

    let response = post_form(&app, "/add", "name=Bob&email=bob%40x.com&salary=plenty").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let page = body_text(response).await;
    assert!(page.contains("Salary must be a number."));
    assert!(page.contains("value=\"Bob\""));

    let all = store.run(|service| service.list_all()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn add_form_renders_empty_fields() {
    let (app, _) = setup();

    let response = get(&app, "/add").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("action=\"/add\""));
    assert_eq!(page.matches("<input").count(), 3);
    assert!(!page.contains("value=\"Alice\""));
}

#[tokio::test]
async fn every_flag_present_renders_every_banner() {
    let (app, _) = setup();

    let page = body_text(get(&app, "/?msg1&msg2=x&msg3=").await).await;
    assert!(page.contains("Customer added successfully"));
    assert!(page.contains("Customer updated successfully"));
    assert!(page.contains("Customer deleted successfully"));
}

#[tokio::test]
async fn repeated_query_keys_use_the_last_value() {
    let (app, store) = setup();
    let id = store
        .run(|service| service.create(&CustomerDraft::new("Alice", "alice@x.com", 5000.0)))
        .await
        .unwrap();
    assert_eq!(id, 1);

    let response = get(&app, "/?msg1=a&msg1=b").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Customer added successfully"));
    assert_eq!(row_count(&page), 1);

    let response = get(&app, "/edit?editId=1&editId=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("value=\"Alice\""));
    assert!(page.contains("action=\"/edit?editId=1\""));

    let response = get(&app, "/?deleteId=1&deleteId=1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?msg3=delete");

    let all = store.run(|service| service.list_all()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn store_failure_renders_generic_error_page() {
    let unmigrated = rusqlite::Connection::open_in_memory().unwrap();
    let app = router(CustomerStore::from_connection(unmigrated));

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let page = body_text(response).await;
    assert!(page.contains("500 Internal Server Error"));
    assert!(!page.contains("customers"));
}
