//! Passcode endpoints over the in-memory stack

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use sn_api::create_app;
use sn_core::repositories::UserDirectory;
use sn_shared::config::{CorsConfig, Environment};

use common::TestContext;

macro_rules! app {
    ($ctx:expr) => {
        test::init_service(create_app($ctx.state.clone(), &CorsConfig::development())).await
    };
}

#[actix_rt::test]
async fn test_send_phone_otp() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "identifier": "0912 345 678",
            "channel": "phone",
            "purpose": "verify"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["key"], "otp:+84912345678:verify");
    assert_eq!(body["data"]["channel"], "phone");
    assert!(body["data"]["expires_in"].as_i64().unwrap() > 290);

    let sent = ctx.sms.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "+84912345678");
}

#[actix_rt::test]
async fn test_send_rejects_unknown_channel() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({"identifier": "a@example.com", "channel": "fax", "purpose": "verify"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CHANNEL");
}

#[actix_rt::test]
async fn test_send_rejects_bad_identifier() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({"identifier": "not-an-email", "channel": "email", "purpose": "verify"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_IDENTIFIER");
    assert!(ctx.email.outbox().is_empty());
}

#[actix_rt::test]
async fn test_send_validation_error_lists_fields() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({"identifier": "", "channel": "email", "purpose": "verify"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["identifier"].is_array());
}

#[actix_rt::test]
async fn test_malformed_json() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"identifier\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_rt::test]
async fn test_verify_marks_account_and_consumes_code() {
    let ctx = TestContext::new();
    let user = ctx.add_user(Some("jo@example.com"), None).await;
    let app = app!(ctx);

    let send = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({"identifier": "Jo@Example.com", "channel": "email", "purpose": "verify"}))
        .to_request();
    assert_eq!(test::call_service(&app, send).await.status(), StatusCode::OK);
    let code = ctx.email_code("Jo@Example.com");

    let verify_body = json!({
        "identifier": "jo@example.com",
        "channel": "email",
        "purpose": "verify",
        "otp": code
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(&verify_body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verified"], true);
    assert_eq!(body["data"]["user_id"], user.id.to_string());

    let stored = ctx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.email_verified);

    let replay = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(&verify_body)
        .to_request();
    let resp = test::call_service(&app, replay).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_OR_EXPIRED_CODE");
}

#[actix_rt::test]
async fn test_wrong_code_and_missing_challenge_look_alike() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let send = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({"identifier": "+84912345678", "channel": "sms", "purpose": "login"}))
        .to_request();
    assert_eq!(test::call_service(&app, send).await.status(), StatusCode::OK);
    let code = ctx.sms_code();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let mut messages = Vec::new();
    for (identifier, otp) in [("+84912345678", wrong), ("+84999999999", code.as_str())] {
        let req = test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({
                "identifier": identifier,
                "channel": "phone",
                "purpose": "login",
                "otp": otp
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        messages.push((body["error"].clone(), body["message"].clone()));
    }
    assert_eq!(messages[0], messages[1]);
}

#[actix_rt::test]
async fn test_custom_key_and_peek() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let send = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "identifier": "friend@example.com",
            "channel": "email",
            "purpose": "invite",
            "custom_key": "invite:abc"
        }))
        .to_request();
    let resp = test::call_service(&app, send).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["key"], "invite:abc");

    let peek = test::TestRequest::get()
        .uri("/api/v1/otp/peek?key=invite:abc")
        .to_request();
    let resp = test::call_service(&app, peek).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["identifier"], "friend@example.com");
}

#[actix_rt::test]
async fn test_custom_key_in_reserved_namespace_rejected() {
    let ctx = TestContext::new();
    let victim = ctx.add_user(Some("victim@example.com"), None).await;
    let app = app!(ctx);

    for key in [format!("change_email:{}", victim.id), "otp:victim@example.com:verify".to_string()] {
        let send = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({
                "identifier": "attacker@evil.com",
                "channel": "email",
                "purpose": "verify",
                "custom_key": key
            }))
            .to_request();
        let resp = test::call_service(&app, send).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
    assert!(ctx.email.outbox().is_empty());
}

#[actix_rt::test]
async fn test_peek_missing_key() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/otp/peek?key=nope").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/otp/peek").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_forgot_password_requires_account() {
    let ctx = TestContext::new();
    ctx.add_user(Some("known@example.com"), None).await;
    let app = app!(ctx);

    let unknown = test::TestRequest::post()
        .uri("/api/v1/otp/forgot-password")
        .set_json(json!({"email": "ghost@example.com"}))
        .to_request();
    let resp = test::call_service(&app, unknown).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "USER_NOT_FOUND");

    let known = test::TestRequest::post()
        .uri("/api/v1/otp/forgot-password")
        .set_json(json!({"email": "known@example.com"}))
        .to_request();
    let resp = test::call_service(&app, known).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["key"], "otp:known@example.com:forgot_password");

    let code = ctx.email_code("known@example.com");
    let verify = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({
            "identifier": "known@example.com",
            "channel": "email",
            "purpose": "forgot_password",
            "otp": code
        }))
        .to_request();
    assert_eq!(test::call_service(&app, verify).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_dispatch_failure_is_unavailable() {
    let ctx = TestContext::new();
    ctx.sms.set_simulate_failure(true);
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({"identifier": "+84912345678", "channel": "phone", "purpose": "verify"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DISPATCH_FAILED");
}

#[actix_rt::test]
async fn test_debug_route_only_in_development() {
    let dev = TestContext::new();
    let app = app!(dev);

    let send = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({"identifier": "+84912345678", "channel": "phone", "purpose": "verify"}))
        .to_request();
    test::call_service(&app, send).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/otp/debug?key=otp:%2B84912345678:verify")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["value"], dev.sms_code());

    let prod = TestContext::for_environment(Environment::Production);
    let app = app!(prod);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/otp/debug?key=anything")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
