//! Application state and factory

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use sn_core::repositories::UserDirectory;
use sn_core::services::account::{EmailChangeService, PasswordResetService};
use sn_core::services::otp::{
    CredentialStore, DispatchGateway, EmailSender, OtpService, OtpServiceConfig, SmsSender,
};
use sn_core::errors::DomainResult;
use sn_infra::cache::create_credential_store;
use sn_infra::database::create_user_directory;
use sn_infra::email::create_email_sender;
use sn_infra::sms::create_sms_sender;
use sn_shared::config::{AppConfig, CorsConfig, Environment, OtpConfig};

use crate::handlers::error::{json_error_handler, query_error_handler};
use crate::middleware::cors::create_cors;
use crate::routes::{health, otp, users};

/// Shared services handed to every handler
pub struct AppState {
    pub otp: Arc<OtpService>,
    pub email_change: Arc<EmailChangeService>,
    pub password_reset: Arc<PasswordResetService>,
    pub store: Arc<dyn CredentialStore>,
    pub users: Arc<dyn UserDirectory>,
    pub environment: Environment,
}

impl AppState {
    /// Wire services from already-built adapters
    pub fn new(
        store: Arc<dyn CredentialStore>,
        users: Arc<dyn UserDirectory>,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        otp_config: &OtpConfig,
        environment: Environment,
    ) -> DomainResult<Self> {
        let otp = Arc::new(OtpService::new(
            store.clone(),
            DispatchGateway::new(email, sms),
            users.clone(),
            OtpServiceConfig::from(otp_config),
        )?);

        Ok(Self {
            email_change: Arc::new(EmailChangeService::new(otp.clone(), users.clone())),
            password_reset: Arc::new(PasswordResetService::new(otp.clone(), users.clone())),
            otp,
            store,
            users,
            environment,
        })
    }

    /// Build adapters from configuration, connecting to Redis and MySQL
    /// when configured
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store = create_credential_store(&config.cache).await?;
        let users = create_user_directory(&config.database).await?;
        let email = create_email_sender(&config.email)?;
        let sms = create_sms_sender(&config.sms)?;

        Ok(Self::new(
            store,
            users,
            email,
            sms,
            &config.otp,
            config.environment,
        )?)
    }
}

/// Register every route; the debug peek only outside staging and production
pub fn configure_routes(cfg: &mut web::ServiceConfig, environment: Environment) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api/v1")
            .service(otp::scope(environment))
            .service(users::scope()),
    );
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let environment = state.environment;

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .configure(|cfg| configure_routes(cfg, environment))
}
