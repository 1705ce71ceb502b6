use mockito::Matcher;
use peshkariki::{
    CheckPhone, CheckStatus, Credentials, ErrorCode, OrderId, PeshkarikiClient, PeshkarikiError,
    RawPhoneNumber,
};
use serde_json::json;

fn credentials() -> Credentials {
    Credentials::new("a", "b").unwrap()
}

async fn mock_login(server: &mut mockito::Server, token: &str, hits: usize) -> mockito::Mock {
    server
        .mock("POST", "/commonApi/login")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_header("user-agent", Matcher::Regex("^peshkariki-rust/".to_owned()))
        .match_body(Matcher::Json(json!({"login": "a", "password": "b"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"success": true, "response": {"token": token}}).to_string())
        .expect(hits)
        .create_async()
        .await
}

async fn connect(server: &mockito::Server) -> PeshkarikiClient {
    PeshkarikiClient::builder(credentials())
        .base_url(format!("{}/commonApi/", server.url()))
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn posts_json_with_token_to_operation_path() {
    let mut server = mockito::Server::new_async().await;
    let login = mock_login(&mut server, "T1", 1).await;
    let status = server
        .mock("POST", "/commonApi/checkStatus")
        .match_body(Matcher::Json(json!({"order_id": 42, "token": "T1"})))
        .with_status(200)
        .with_body(json!({"success": true, "response": {"status": 1}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = connect(&server).await;
    let payload = client
        .check_status(CheckStatus::one(OrderId::new(42)))
        .await
        .unwrap();

    assert_eq!(payload, json!({"status": 1}));
    login.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn batch_phone_check_sends_an_array() {
    let mut server = mockito::Server::new_async().await;
    let _login = mock_login(&mut server, "T1", 1).await;
    let phones = server
        .mock("POST", "/commonApi/checkPhone")
        .match_body(Matcher::PartialJson(
            json!({"phone": ["+79251234567", "+79160000000"]}),
        ))
        .with_body(json!({"success": true, "response": [true, false]}).to_string())
        .create_async()
        .await;

    let client = connect(&server).await;
    let request = CheckPhone::many(vec![
        RawPhoneNumber::new("+79251234567").unwrap(),
        RawPhoneNumber::new("+79160000000").unwrap(),
    ])
    .unwrap();
    let payload = client.check_phone(request).await.unwrap();

    assert_eq!(payload, json!([true, false]));
    phones.assert_async().await;
}

#[tokio::test]
async fn persistent_invalid_token_refreshes_once_then_fails() {
    let mut server = mockito::Server::new_async().await;
    let login = mock_login(&mut server, "T1", 2).await;
    let balance = server
        .mock("POST", "/commonApi/checkBalance")
        .with_body(json!({"success": false, "code": 12, "additional": "expired"}).to_string())
        .expect(2)
        .create_async()
        .await;

    let client = connect(&server).await;
    let err = client.check_balance().await.unwrap_err();

    assert_eq!(err.service_error().map(|it| it.code().as_i32()), Some(12));
    login.assert_async().await;
    balance.assert_async().await;
}

#[tokio::test]
async fn html_error_page_is_reported_as_http_status() {
    let mut server = mockito::Server::new_async().await;
    let _login = mock_login(&mut server, "T1", 1).await;
    let _services = server
        .mock("POST", "/commonApi/getServicesList")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = connect(&server).await;
    let err = client.get_services_list().await.unwrap_err();

    match err {
        PeshkarikiError::HttpStatus { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body.as_deref(), Some("<html>Bad Gateway</html>"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_login_fails_construction() {
    let mut server = mockito::Server::new_async().await;
    let _login = server
        .mock("POST", "/commonApi/login")
        .with_body(json!({"success": false, "code": 4, "additional": null}).to_string())
        .create_async()
        .await;

    let err = PeshkarikiClient::builder(credentials())
        .base_url(format!("{}/commonApi", server.url()))
        .build()
        .await
        .err()
        .unwrap();

    let service = err.service_error().unwrap();
    assert_eq!(service.code().as_i32(), 4);
    assert_eq!(service.message(), ErrorCode::UNKNOWN_MESSAGE);
    assert_eq!(service.additional(), None);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let err = PeshkarikiClient::builder(credentials())
        .base_url("http://127.0.0.1:1/commonApi/")
        .build()
        .await
        .err()
        .unwrap();

    assert!(matches!(err, PeshkarikiError::Transport(_)));
    assert!(err.is_transport());
}
