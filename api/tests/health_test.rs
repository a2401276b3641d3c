mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use sn_api::{create_app, AppState};
use sn_core::domain::entities::user::{User, UserFieldUpdate};
use sn_core::errors::DomainError;
use sn_core::repositories::UserDirectory;
use sn_infra::cache::MemoryCredentialStore;
use sn_infra::email::MockEmailSender;
use sn_infra::sms::MockSmsSender;
use sn_shared::config::{CorsConfig, Environment, OtpConfig};

use common::TestContext;

/// Directory whose backend never answers
struct UnreachableDirectory;

#[async_trait]
impl UserDirectory for UnreachableDirectory {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }

    async fn find_by_phone(&self, _phone: &str) -> Result<Option<User>, DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }

    async fn update_fields(&self, _id: Uuid, _update: &UserFieldUpdate) -> Result<(), DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }
}

#[actix_rt::test]
async fn test_health_reports_cache() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::development())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["cache"], "up");
    assert_eq!(body["checks"]["database"], "up");
}

#[actix_rt::test]
async fn test_health_degraded_when_directory_down() {
    let state = AppState::new(
        Arc::new(MemoryCredentialStore::new()),
        Arc::new(UnreachableDirectory),
        Arc::new(MockEmailSender::new()),
        Arc::new(MockSmsSender::new()),
        &OtpConfig::default(),
        Environment::Development,
    )
    .unwrap();
    let app = test::init_service(create_app(web::Data::new(state), &CorsConfig::development())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["cache"], "up");
    assert_eq!(body["checks"]["database"], "down");
}

#[actix_rt::test]
async fn test_unknown_route_is_404() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &CorsConfig::development())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
