/**
 * Server Configuration
 *
 * This module handles loading of server configuration from environment
 * variables and the optional PostgreSQL database connection.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible defaults
 * for local development when possible. `.env` files are honored because the
 * entrypoint calls `dotenv` before anything reads the environment.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * If the database fails to initialize, `load_database` returns `None` and
 * database-backed handlers answer 503.
 */

use sqlx::PgPool;

/// All environment-driven settings, materialized once at startup
///
/// # Fields
///
/// * `secret_key` - JWT signing secret (`SECRET_KEY`)
/// * `access_token_expire_minutes` - token lifetime (`ACCESS_TOKEN_EXPIRE_MINUTES`)
/// * `cors_origins` - `*` or a comma-separated origin list (`CORS_ORIGINS`)
/// * `cookie_domain` - shared cookie domain, e.g. `.alerttrail.com` (`COOKIE_DOMAIN`)
/// * `admin_setup_secret` - guards the admin reset endpoint; falls back to
///   `secret_key` when unset (`ADMIN_SETUP_SECRET`)
/// * `admin_email` / `admin_pass` / `admin_name` - admin bootstrap identity
/// * `fact_api_key` / `fact_cuit` / `fact_pto_vta` - Facturante credentials
#[derive(Debug, Clone)]
pub struct Settings {
    pub secret_key: String,
    pub access_token_expire_minutes: u64,
    pub cors_origins: String,
    pub cookie_domain: Option<String>,
    pub admin_setup_secret: Option<String>,
    pub admin_email: Option<String>,
    pub admin_pass: Option<String>,
    pub admin_name: String,
    pub fact_api_key: Option<String>,
    pub fact_cuit: Option<String>,
    pub fact_pto_vta: u32,
}

impl Settings {
    /// Load settings from the environment
    ///
    /// Missing variables fall back to development defaults; none of them
    /// aborts startup. The default `SECRET_KEY` is logged loudly because
    /// running with it in production would make every token forgeable.
    pub fn from_env() -> Self {
        let secret_key = std::env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not set, using development default");
            "changeme".to_string()
        });

        let access_token_expire_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let fact_pto_vta = std::env::var("FACT_PTO_VTA")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        Self {
            secret_key,
            access_token_expire_minutes,
            cors_origins: std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            cookie_domain: std::env::var("COOKIE_DOMAIN").ok(),
            admin_setup_secret: std::env::var("ADMIN_SETUP_SECRET").ok(),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_pass: std::env::var("ADMIN_PASS").ok(),
            admin_name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".to_string()),
            fact_api_key: std::env::var("FACT_API_KEY").ok(),
            fact_cuit: std::env::var("FACT_CUIT").ok(),
            fact_pto_vta,
        }
    }

    /// Secret guarding `POST /auth/_force_admin_reset`
    ///
    /// `ADMIN_SETUP_SECRET` when set, otherwise the JWT secret.
    pub fn admin_reset_secret(&self) -> &str {
        self.admin_setup_secret.as_deref().unwrap_or(&self.secret_key)
    }
}

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from the environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs the embedded migrations (users and analyses tables)
///
/// # Returns
///
/// - `Some(PgPool)` if the database is successfully configured
/// - `None` if `DATABASE_URL` is not set or the connection fails
///
/// # Errors
///
/// Errors are logged but do not prevent server startup. The function
/// returns `None` on any error, allowing the server to run without
/// database features (handlers answer 503).
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "SECRET_KEY",
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            "CORS_ORIGINS",
            "COOKIE_DOMAIN",
            "ADMIN_SETUP_SECRET",
            "ADMIN_EMAIL",
            "ADMIN_PASS",
            "ADMIN_NAME",
            "FACT_API_KEY",
            "FACT_CUIT",
            "FACT_PTO_VTA",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_with_empty_environment() {
        clear_env();
        let settings = Settings::from_env();

        assert_eq!(settings.secret_key, "changeme");
        assert_eq!(settings.access_token_expire_minutes, 60);
        assert_eq!(settings.cors_origins, "*");
        assert_eq!(settings.cookie_domain, None);
        assert_eq!(settings.admin_name, "Admin");
        assert_eq!(settings.fact_pto_vta, 1);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("SECRET_KEY", "s3cret");
        std::env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "15");
        std::env::set_var("COOKIE_DOMAIN", ".alerttrail.com");

        let settings = Settings::from_env();
        assert_eq!(settings.secret_key, "s3cret");
        assert_eq!(settings.access_token_expire_minutes, 15);
        assert_eq!(settings.cookie_domain.as_deref(), Some(".alerttrail.com"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_admin_reset_secret_falls_back_to_secret_key() {
        clear_env();
        std::env::set_var("SECRET_KEY", "s3cret");

        let settings = Settings::from_env();
        assert_eq!(settings.admin_reset_secret(), "s3cret");

        std::env::set_var("ADMIN_SETUP_SECRET", "setup");
        let settings = Settings::from_env();
        assert_eq!(settings.admin_reset_secret(), "setup");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparseable_expiry_falls_back() {
        clear_env();
        std::env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "soon");

        let settings = Settings::from_env();
        assert_eq!(settings.access_token_expire_minutes, 60);

        clear_env();
    }
}
