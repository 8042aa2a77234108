// Framework bootstrap for the time-off service.

use crate::domain::entities::ManagerAccount;
use crate::domain::ports::{ManagerDirectory, RequestRepository, SessionStore};
use crate::frameworks::config::Settings;
use crate::frameworks::db;
use crate::interface_adapters::cookies::CookieSettings;
use crate::interface_adapters::memory::{InMemoryManagerDirectory, InMemoryRequestRepository};
use crate::interface_adapters::postgres::{PostgresManagerDirectory, PostgresRequestRepository};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::session_store::InMemorySessionStore;
use crate::interface_adapters::state::{AppState, StorageBackend, SystemClock};
use crate::use_cases::sweeper::SessionSweeper;

use std::io::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

pub fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Wire adapters for the configured backend.
pub async fn build_state(settings: &Settings) -> Result<AppState> {
    let clock = Arc::new(SystemClock);
    let sessions: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(clock.clone(), settings.session_ttl()));

    let (managers, requests, storage) = match settings.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::connect_pool(database_url).await.map_err(|e| {
                tracing::error!(error = %e, "failed to connect to database");
                Error::other(e)
            })?;
            db::run_migrations(&pool).await.map_err(|e| {
                tracing::error!(error = %e, "failed to run migrations");
                Error::other(e)
            })?;
            let directory = PostgresManagerDirectory { db: pool.clone() };
            for seed in &settings.managers {
                let account = ManagerAccount::from(seed.clone());
                directory.upsert_account(&account).await.map_err(|e| {
                    tracing::error!(manager_id = seed.id, error = %e, "failed to seed manager");
                    Error::other(e)
                })?;
            }
            let managers: Arc<dyn ManagerDirectory> = Arc::new(directory);
            let requests: Arc<dyn RequestRepository> =
                Arc::new(PostgresRequestRepository { db: pool });
            (managers, requests, StorageBackend::Postgres)
        }
        None => {
            if settings.managers.is_empty() {
                tracing::warn!("no managers configured; manager login will always fail");
            }
            let accounts = settings
                .managers
                .iter()
                .cloned()
                .map(ManagerAccount::from)
                .collect();
            let managers: Arc<dyn ManagerDirectory> =
                Arc::new(InMemoryManagerDirectory::new(accounts));
            let requests: Arc<dyn RequestRepository> = Arc::new(InMemoryRequestRepository::new());
            (managers, requests, StorageBackend::InMemory)
        }
    };
    tracing::debug!(
        ?storage,
        session_ttl_seconds = settings.session_ttl().as_secs(),
        "adapters configured"
    );

    Ok(AppState {
        sessions,
        managers,
        requests,
        clock,
        cookies: CookieSettings {
            max_age_seconds: settings.session_ttl().as_secs(),
            secure: settings.session_cookie_secure,
        },
        storage,
    })
}

// Serve until a shutdown signal arrives, then stop the sweeper and the store.
pub async fn run(
    listener: tokio::net::TcpListener,
    state: AppState,
    sweep_every: Duration,
) -> Result<()> {
    let address = listener.local_addr()?;
    let sessions = state.sessions.clone();

    sessions.start().await.map_err(|e| {
        tracing::error!(error = %e, "session store failed to start");
        Error::other(e)
    })?;
    let sweeper = SessionSweeper::spawn(sessions.clone(), sweep_every);

    tracing::info!(%address, "listening");
    let served = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        });

    sweeper.stop().await;
    if let Err(e) = sessions.shutdown().await {
        tracing::warn!(error = %e, "session store shutdown failed");
    }
    tracing::info!("server stopped");

    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = Settings::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        Error::other(e)
    })?;
    let state = build_state(&settings).await?;

    let address = (settings.host.as_str(), settings.port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(host = %settings.host, port = settings.port, error = %e, "failed to bind");
        })?;

    run(listener, state, settings.sweep_interval()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
