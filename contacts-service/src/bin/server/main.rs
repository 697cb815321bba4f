use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use auth::Authenticator;
use auth::Clock;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::SystemClock;
use chrono::Duration;
use contacts_service::config::Config;
use contacts_service::contact::service::ContactService;
use contacts_service::domain::auth::cache::CurrentUserCache;
use contacts_service::domain::auth::notifications::NotificationQueue;
use contacts_service::domain::auth::service::AuthService;
use contacts_service::inbound::http::router::create_router;
use contacts_service::outbound::email::SmtpMailer;
use contacts_service::outbound::repositories::PostgresContactRepository;
use contacts_service::outbound::repositories::PostgresUserRepository;
use contacts_service::outbound::storage::LocalAvatarStorage;
use contacts_service::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contacts_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "contacts-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        mail_server = %config.mail.server,
        avatar_dir = %config.storage.avatar_dir,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let authenticator = Arc::new(
        Authenticator::from_parts(
            JwtHandler::with_algorithm(config.jwt.secret.as_bytes(), &config.jwt.algorithm)?,
            PasswordHasher::with_cost(config.password.bcrypt_cost)?,
        )
        .with_session_ttl(Duration::seconds(config.jwt.expiration_seconds))
        .with_clock(Arc::clone(&clock)),
    );
    let cache = Arc::new(CurrentUserCache::new(
        Duration::seconds(config.cache.current_user_ttl_seconds),
        Arc::clone(&clock),
    ));

    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    let notifications = NotificationQueue::start(mailer);
    tracing::info!(server = %config.mail.server, port = config.mail.port, "Notification worker started");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let contact_repository = Arc::new(PostgresContactRepository::new(pg_pool));
    let avatar_storage = Arc::new(LocalAvatarStorage::new(
        &config.storage.avatar_dir,
        &config.storage.public_base_url,
        Arc::clone(&clock),
    ));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        authenticator,
        Arc::clone(&cache),
        notifications,
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        avatar_storage,
        cache,
    ));
    let contact_service = Arc::new(ContactService::new(contact_repository, clock));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        user_service,
        contact_service,
        user_repository,
        Path::new(&config.storage.avatar_dir),
    );

    if let Err(e) = axum::serve(
        http_listener,
        http_application.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!(error = %e, "Server error");
    }

    Ok(())
}
