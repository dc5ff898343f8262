//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests in a binary for
//! dramatically improved performance. The container and migrations are
//! initialized once on first use, then reused; tests isolate themselves
//! by creating their own users and data.

use anyhow::{Context, Result};
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::domains::auth::JwtService;
use server_core::domains::profiles::models::User;
use server_core::server::build_app;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    /// Initialize shared infrastructure (container + migrations).
    async fn init() -> Result<Self> {
        // Respect RUST_LOG; try_init() avoids panicking if already set up.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Each test gets a fresh pool and router, but reuses the same database
/// container.
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    /// JWT service configured with the same secret as the app under test.
    pub jwt_service: JwtService,
}

impl TestHarness {
    /// Creates a new test harness using the shared container.
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;
        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to shared test database")?;

        Ok(Self {
            db_pool,
            jwt_service: JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string()),
        })
    }

    /// Build the application router against the test database.
    pub fn app(&self) -> axum::Router {
        build_app(
            self.db_pool.clone(),
            JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string()),
        )
    }

    /// Issue a token for a user, as login would.
    pub fn token_for(&self, user: &User) -> String {
        self.jwt_service
            .create_token(user.id, user.username.clone(), user.is_staff)
            .expect("Failed to create test token")
    }
}
