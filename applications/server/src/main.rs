/// Lyrics Server - HTTP API for the lyrics catalog
use clap::{Parser, Subcommand};
use lyrics_core::{CreateUser, UserRepository};
use lyrics_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use lyrics_storage::SqliteCatalog;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lyrics-server")]
#[command(about = "Lyrics catalog HTTP API", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml if present)
    #[arg(short, long, global = true, env = "LYRICS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lyrics_server=info,lyrics_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve => {
            serve(config_path).await?;
        }
        Commands::AddUser { username, password } => {
            add_user(config_path, &username, &password).await?;
        }
        Commands::ListUsers => {
            list_users(config_path).await?;
        }
    }

    Ok(())
}

async fn open_catalog(config: &ServerConfig) -> anyhow::Result<SqliteCatalog> {
    let pool = lyrics_storage::create_pool(&config.storage.database_url).await?;
    lyrics_storage::run_migrations(&pool).await?;
    Ok(SqliteCatalog::new(pool).with_downvote_scoring(config.votes.downvote_scoring()))
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    tracing::info!("Starting Lyrics Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = Arc::new(open_catalog(&config).await?);
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));

    let app_state = AppState::new(db, auth_service, config.pagination);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config_path: Option<&Path>, username: &str, password: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path)?;
    let db = open_catalog(&config).await?;

    let password_hash = auth_service(&config).hash_password(password)?;
    let user = db
        .create_user(CreateUser {
            username: username.to_string(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User created");
    println!("Created user {} ({})", user.username, user.id);

    Ok(())
}

async fn list_users(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path)?;
    let db = open_catalog(&config).await?;

    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} (created {})", user.id, user.username, user.created_at);
    }

    Ok(())
}
