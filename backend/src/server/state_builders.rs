//! Builders choosing the adapter family and producing the HTTP state.
//!
//! With a database URL the Diesel repositories are used after migrations
//! run; without one the registry lives in memory and is lost on exit.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::{info, warn};
use zeroize::Zeroizing;

use org_registry::composition::{RegistryAdapters, diesel_repositories, in_memory_repositories};
use org_registry::domain::Error as DomainError;
use org_registry::domain::ports::{
    ArtifactStoreError, DepartmentRepository, DirectorateRepository, ProgramRepository,
    TokenIssuer, UserRepository,
};
use org_registry::inbound::http::state::HttpState;
use org_registry::outbound::artifacts::CapStdArtifactStore;
use org_registry::outbound::memory::InMemoryStore;
use org_registry::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_migrations,
};
use org_registry::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};
use org_registry::settings::AppSettings;

const EPHEMERAL_SECRET_BYTES: usize = 32;

/// Failures while assembling the application state.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database pool: {0}")]
    Pool(#[from] PoolError),
    #[error("database migrations: {0}")]
    Migrations(#[from] MigrationError),
    #[error("artifact directory: {0}")]
    Artifacts(#[from] ArtifactStoreError),
    #[error("JWT_SECRET must be set when a database is configured")]
    MissingJwtSecret,
    #[error("admin seeding: {0}")]
    Seeding(DomainError),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err.to_string())
    }
}

/// Adapters shared by both repository families.
struct SharedAdapters {
    hasher: Arc<Argon2PasswordHasher>,
    artifacts: Arc<CapStdArtifactStore>,
    tokens: Arc<dyn TokenIssuer>,
}

fn token_secret(
    settings: &AppSettings,
    persistent: bool,
) -> Result<Zeroizing<Vec<u8>>, StartupError> {
    if let Some(secret) = settings.jwt.secret() {
        return Ok(Zeroizing::new(secret.as_bytes().to_vec()));
    }
    if persistent {
        return Err(StartupError::MissingJwtSecret);
    }
    warn!("JWT_SECRET unset; signing tokens with an ephemeral secret (development only)");
    let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_BYTES]);
    OsRng.fill_bytes(secret.as_mut_slice());
    Ok(secret)
}

fn shared_adapters(
    settings: &AppSettings,
    persistent: bool,
) -> Result<SharedAdapters, StartupError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let public_dir = settings.server.public_dir();
    let artifacts = CapStdArtifactStore::open(&public_dir, Arc::clone(&clock))?;
    info!(path = %public_dir.display(), "artifact directory ready");

    let secret = token_secret(settings, persistent)?;
    let tokens = JwtTokenIssuer::new(&secret, settings.jwt.expires_in_secs(), clock);
    Ok(SharedAdapters {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        artifacts: Arc::new(artifacts),
        tokens: Arc::new(tokens),
    })
}

async fn assemble<U, D, R, P>(
    repositories: (U, D, R, P),
    shared: SharedAdapters,
    settings: &AppSettings,
) -> Result<HttpState, StartupError>
where
    U: UserRepository + 'static,
    D: DepartmentRepository + 'static,
    R: DirectorateRepository + 'static,
    P: ProgramRepository + 'static,
{
    let adapters = RegistryAdapters::new(
        repositories,
        shared.hasher,
        shared.artifacts,
        shared.tokens,
    );
    adapters
        .seed_admin(&settings.admin)
        .await
        .map_err(StartupError::Seeding)?;
    Ok(HttpState::new(adapters.ports()).with_max_upload_bytes(settings.server.max_upload_bytes()))
}

/// Build the HTTP state for the configured storage backend.
///
/// # Errors
/// Returns [`StartupError`] when the pool, migrations, artifact directory,
/// token secret or admin seeding fail.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    match settings.database.url() {
        Some(url) => {
            let shared = shared_adapters(settings, true)?;
            run_migrations(url.as_str()).await?;
            let config = PoolConfig::new(url.as_str())
                .with_max_size(settings.database.max_connections())
                .with_connection_timeout(settings.database.connect_timeout());
            let pool = DbPool::new(&config).await?;
            assemble(diesel_repositories(&pool), shared, settings).await
        }
        None => {
            warn!("DATABASE_URL unset; registry data is held in memory and lost on exit");
            let store = InMemoryStore::new();
            let shared = shared_adapters(settings, false)?;
            assemble(in_memory_repositories(&store), shared, settings).await
        }
    }
}
