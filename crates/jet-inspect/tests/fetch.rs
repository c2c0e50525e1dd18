//! Inspect-endpoint tests against a scripted backend.

use jet_inspect::{FetchError, InspectClient};
use jet_session::SessionStore;
use jet_tree::TreeModel;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn logged_in_store(server: &MockServer) -> SessionStore {
    Mock::given(method("POST"))
        .and(path("/appjet/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "T"})))
        .mount(server)
        .await;
    let store = SessionStore::new(server.uri());
    store.login("ada", "secret").await.expect("login");
    store
}

#[tokio::test]
async fn fetch_sends_the_bearer_token_and_classifies_the_body() {
    let server = MockServer::start().await;
    let store = logged_in_store(&server).await;

    Mock::given(method("GET"))
        .and(path("/appjet/inspect"))
        .and(header("authorization", "T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daemon-responses": [
                {"c1": {"g1": {"h1": {"docker": {"app": true, "database": false}}}}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = InspectClient::new(server.uri());
    let document = client.fetch(&store).await.expect("fetch");

    let responses = document.get("daemon-responses").expect("spine");
    assert!(matches!(responses, TreeModel::Sequence(items) if items.len() == 1));
}

#[tokio::test]
async fn fetch_preserves_document_field_order() {
    let server = MockServer::start().await;
    let store = logged_in_store(&server).await;

    Mock::given(method("GET"))
        .and(path("/appjet/inspect"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"zulu": 1, "alpha": 2, "daemon-responses": []}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let client = InspectClient::new(server.uri());
    let document = client.fetch(&store).await.expect("fetch");
    let keys: Vec<&str> = document
        .entries()
        .expect("mapping")
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    assert_eq!(keys, vec!["zulu", "alpha", "daemon-responses"]);
}

#[tokio::test]
async fn unauthorized_fetch_surfaces_the_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appjet/inspect"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // Never logged in: no Authorization header is stamped.
    let store = SessionStore::new(server.uri());
    let client = InspectClient::new(server.uri());
    let err = client.fetch(&store).await.expect_err("unauthorized");
    assert!(matches!(err, FetchError::Status(401)));
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let server = MockServer::start().await;
    let store = logged_in_store(&server).await;

    Mock::given(method("GET"))
        .and(path("/appjet/inspect"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = InspectClient::new(server.uri());
    let err = client.fetch(&store).await.expect_err("bad body");
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let store = SessionStore::new(format!("http://{addr}"));
    let client = InspectClient::new(format!("http://{addr}"));
    let err = client.fetch(&store).await.expect_err("unreachable");
    assert!(matches!(err, FetchError::Transport(_)));
}
