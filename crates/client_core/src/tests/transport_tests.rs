use super::*;
use std::sync::Arc;

use server::{build_router, AppState};
use server_api::ApiContext;
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let app = build_router(Arc::new(AppState {
        api: ApiContext::default(),
    }));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn task(title: &str) -> Task {
    Task {
        title: title.to_string(),
        description: String::new(),
        status: TaskStatus::Todo,
    }
}

#[test]
fn rejects_invalid_server_urls() {
    assert!(HttpBackendClient::new("not a url").is_err());
    assert!(HttpBackendClient::new("ftp://example.com").is_err());
}

#[test]
fn normalizes_trailing_slash() {
    let client = HttpBackendClient::new("http://127.0.0.1:8443/").expect("client");
    assert_eq!(client.server_url(), "http://127.0.0.1:8443");
    assert_eq!(client.endpoint("/greet"), "http://127.0.0.1:8443/greet");
}

#[tokio::test]
async fn greet_round_trips_over_http() {
    let client = HttpBackendClient::new(&spawn_server().await).expect("client");
    let greeting = client.greet("Zoë").await.expect("greet");
    assert_eq!(greeting, "Hello, Zoë!");
}

#[tokio::test]
async fn task_methods_follow_server_ids() {
    let client = HttpBackendClient::new(&spawn_server().await).expect("client");

    assert_eq!(client.add_task(&task("a")).await.expect("add"), TaskId(1));
    assert_eq!(client.add_task(&task("b")).await.expect("add"), TaskId(2));

    client
        .change_task_status(TaskId(2), TaskStatus::Backlog)
        .await
        .expect("status");
    client
        .update_task_description(TaskId(1), "first")
        .await
        .expect("description");

    let tasks = client.list_tasks().await.expect("list");
    assert_eq!(tasks[0].description, "first");
    assert_eq!(tasks[1].status, TaskStatus::Backlog);

    let page = client.list_tasks_page(2, 1).await.expect("page");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "b");

    client.delete_task(TaskId(1)).await.expect("delete");
    assert_eq!(client.list_tasks().await.expect("list").len(), 1);
}

#[tokio::test]
async fn api_errors_carry_server_message() {
    let client = HttpBackendClient::new(&spawn_server().await).expect("client");
    let err = client
        .delete_task(TaskId(9))
        .await
        .expect_err("should fail");
    let message = err.to_string();
    assert!(
        message.starts_with("404 Not Found: NotFound: task 9 not found"),
        "{message}"
    );
}

#[tokio::test]
async fn page_errors_map_to_client_errors() {
    let client = HttpBackendClient::new(&spawn_server().await).expect("client");
    client.add_task(&task("a")).await.expect("add");

    let err = client
        .list_tasks_page(1, 0)
        .await
        .expect_err("zero page size");
    let message = err.to_string();
    assert!(message.starts_with("400 Bad Request: Validation:"), "{message}");

    let err = client
        .list_tasks_page(3, 1)
        .await
        .expect_err("past the end");
    let message = err.to_string();
    assert!(message.starts_with("404 Not Found: NotFound:"), "{message}");

    assert_eq!(client.list_tasks_page(1, 1).await.expect("page").len(), 1);
}

#[tokio::test]
async fn non_json_error_bodies_are_kept() {
    let client = HttpBackendClient::new(&spawn_server().await).expect("client");
    client.add_task(&task("a")).await.expect("add");

    let res = client
        .http
        .put(client.endpoint("/tasks/1/status"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(r#"{"status":"blocked"}"#)
        .send()
        .await
        .expect("send");
    let err = check(res).await.expect_err("unknown status");
    let message = err.to_string();
    assert!(message.starts_with("422 Unprocessable Entity: "), "{message}");
    assert!(message.contains("blocked"), "{message}");
}

#[tokio::test]
async fn empty_error_bodies_keep_the_status() {
    let client = HttpBackendClient::new(&spawn_server().await).expect("client");
    let res = client
        .http
        .get(client.endpoint("/no-such-route"))
        .send()
        .await
        .expect("send");
    let err = check(res).await.expect_err("unknown route");
    assert_eq!(err.to_string(), "404 Not Found");
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpBackendClient::new(&format!("http://{addr}")).expect("client");
    assert!(client.greet("Alice").await.is_err());
}
