use super::*;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

fn local_client() -> ApiClient {
    let http = Client::builder().no_proxy().build().expect("http client");
    ApiClient::with_http(http)
}

const LEANNE: &str = r#"[{"id":1,"name":"Leanne Graham","email":"Sincere@april.biz"}]"#;

async fn spawn_directory_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/users", get(|| async { LEANNE }))
        .route(
            "/comments",
            get(|| async {
                r#"[{"postId":1,"id":1,"name":"id labore ex et quam laborum","email":"Eliseo@gardner.biz","body":"laudantium"}]"#
            }),
        )
        .route(
            "/broken/users",
            get(|| async { r#"[{"id":1,"name":"Leanne Graham"}]"# }),
        )
        .route(
            "/failing/users",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, LEANNE) }),
        )
        .route("/empty/users", get(|| async { "" }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_users_decodes_directory_payload() {
    let base_url = spawn_directory_server().await;
    let api = local_client();

    let users = fetch_users(&api, Endpoint::UsersFetch, &base_url)
        .await
        .expect("fetch");

    assert_eq!(users, vec![User::new(1, "Leanne Graham", "Sincere@april.biz")]);
}

#[tokio::test]
async fn comments_endpoint_decodes_with_extra_fields_ignored() {
    let base_url = spawn_directory_server().await;
    let api = local_client();

    let rows = fetch_users(&api, Endpoint::CommentsFetch, &base_url)
        .await
        .expect("fetch");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, "Eliseo@gardner.biz");
}

#[tokio::test]
async fn missing_field_is_a_decode_failure() {
    let base_url = spawn_directory_server().await;
    let api = local_client();

    let err = fetch_users(&api, Endpoint::UsersFetch, &format!("{base_url}/broken"))
        .await
        .expect_err("must fail");

    assert!(err.is_decode(), "unexpected error: {err}");
    assert!(err.to_string().contains("email"), "unexpected error: {err}");
}

#[tokio::test]
async fn non_success_status_is_a_transport_failure_even_with_json_body() {
    let base_url = spawn_directory_server().await;
    let api = local_client();

    let err = fetch_users(&api, Endpoint::UsersFetch, &format!("{base_url}/failing"))
        .await
        .expect_err("must fail");

    assert_eq!(err, FetchError::Status { status: 500 });
    assert!(err.is_transport());
}

#[tokio::test]
async fn empty_body_is_reported_instead_of_aborting() {
    let base_url = spawn_directory_server().await;
    let api = local_client();

    let err = fetch_users(&api, Endpoint::UsersFetch, &format!("{base_url}/empty"))
        .await
        .expect_err("must fail");

    assert_eq!(err, FetchError::EmptyResponse);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let base_url = unreachable_base_url().await;
    let api = local_client();

    let err = fetch_users(&api, Endpoint::UsersFetch, &base_url)
        .await
        .expect_err("must fail");

    assert!(matches!(err, FetchError::Transport(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn invalid_base_url_fails_before_any_request() {
    let api = local_client();

    let err = fetch_users(&api, Endpoint::UsersFetch, "")
        .await
        .expect_err("must fail");

    assert!(matches!(err, FetchError::InvalidUrl(_)));
}
