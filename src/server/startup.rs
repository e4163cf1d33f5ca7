use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    config::Config,
    error::AppError,
    service::{email::EmailService, storage::StorageClient},
};

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG` when set. Otherwise debug builds of the configuration log this
/// crate at debug level along with HTTP traces, and production logs at info.
///
/// # Arguments
/// - `config` - Application configuration providing the debug flag
pub fn init_tracing(config: &Config) {
    let fallback = if config.debug {
        "libris=debug,tower_http=info"
    } else {
        "libris=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// automatically runs all pending SeaORM migrations to ensure the database schema is
/// up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for object storage calls.
///
/// Redirects are disabled so a misconfigured storage URL cannot bounce service-key
/// bearing requests to another host.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend failed to initialize
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    Ok(client)
}

/// Creates the object storage client, disabled when credentials are missing.
pub fn setup_storage(config: &Config, http_client: reqwest::Client) -> StorageClient {
    if config.storage.is_none() {
        tracing::warn!("Object storage is not configured, uploads will be rejected");
    }

    StorageClient::new(http_client, config.storage.clone())
}

/// Creates the email service, disabled when SMTP credentials are missing.
///
/// # Returns
/// - `Ok(EmailService)` - Service ready to send, or a disabled service
/// - `Err(AppError::InternalError)` - SMTP relay host could not be resolved into a transport
pub fn setup_email(config: &Config) -> Result<EmailService, AppError> {
    match &config.smtp {
        Some(smtp) => EmailService::smtp(smtp, config.frontend_url.clone()),
        None => {
            tracing::info!("SMTP is not configured, outgoing email is disabled");
            Ok(EmailService::disabled(config.frontend_url.clone()))
        }
    }
}

/// Builds the CORS layer from the configured origin list.
///
/// An empty list denies cross-origin requests. The wildcard origin `*` allows any.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins = if config.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
