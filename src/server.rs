//! Process lifecycle
//!
//! [`open_store`] connects, migrates and wraps the database in a
//! repository provider. [`ServerHandle::start`] builds on it: default
//! admin, demo data, then the HTTP listener that also serves `/ws`.
//! Shutdown drains in-flight requests for `server.shutdown_timeout`
//! seconds before the connection is closed.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::events::{create_event_bus, SharedEventBus};
use crate::application::AuthService;
use crate::config::AppConfig;
use crate::domain::drone::{Drone, GeoPoint};
use crate::domain::product::Product;
use crate::domain::restaurant::{Restaurant, ThemeColors};
use crate::domain::{DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_api_router, ApiContext};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::shared::time::now_millis;

pub type StartError = Box<dyn std::error::Error>;

/// Switches for [`ServerHandle::start`]. Both default to on.
pub struct ServerOptions {
    pub config: AppConfig,
    pub auto_migrate: bool,
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

/// Open the configured database, optionally migrate it, and return the
/// connection with a SeaORM-backed repository provider.
pub async fn open_store(
    config: &AppConfig,
    migrate: bool,
) -> Result<(DatabaseConnection, Arc<dyn RepositoryProvider>), sea_orm::DbErr> {
    let db = init_database(&DatabaseConfig {
        url: config.database.connection_url(),
    })
    .await?;

    if migrate {
        Migrator::up(&db, None).await?;
        info!("Schema up to date");
    }

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    Ok((db, repos))
}

/// A running backend.
///
/// ```rust,no_run
/// use foodfast::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), foodfast::server::StartError> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub event_bus: SharedEventBus,
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Port actually bound; differs from the config when it asked for 0.
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, StartError> {
        let config = opts.config;
        info!(version = env!("CARGO_PKG_VERSION"), "Starting FoodFast backend");

        let (db, repos) = open_store(&config, opts.auto_migrate).await?;

        if opts.create_default_admin {
            create_default_admin(repos.clone(), &config).await;
        }
        if config.seed.demo_data {
            match seed_demo_data(repos.as_ref()).await {
                Ok(true) => info!("🌱 Demo data inserted"),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "Failed to insert demo data"),
            }
        }
        if config.vnpay.has_placeholder_credentials() {
            warn!("VNPay credentials are placeholders; payment URLs will not be accepted by the gateway");
        }

        let event_bus = create_event_bus();
        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);

        let router = create_api_router(ApiContext::new(
            db.clone(),
            repos.clone(),
            event_bus.clone(),
            &config,
        ));

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let bound = listener.local_addr()?;
        info!(%bound, "HTTP listening (Swagger at /docs/, realtime at /ws)");

        let stop = shutdown.signal();
        let api_task = tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async move { stop.wait().await })
                .await;
            if let Err(e) = served {
                error!(error = %e, "HTTP server failed");
            }
        });

        Ok(Self {
            event_bus,
            repos,
            config,
            api_port: bound.port(),
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGTERM or SIGINT.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Block until shutdown is triggered and the listener has drained,
    /// then close the database.
    pub async fn wait(self) {
        let api_task = self.api_task;
        let drained = self
            .shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!(error = %e, "HTTP server task panicked");
                }
            })
            .await;
        if !drained {
            warn!("Dropping connections still open after the grace period");
        }

        match self.db.close().await {
            Ok(()) => info!("Database closed"),
            Err(e) => warn!(error = %e, "Error closing database"),
        }
        info!("👋 FoodFast stopped");
    }

    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

async fn create_default_admin(repos: Arc<dyn RepositoryProvider>, config: &AppConfig) {
    let jwt = JwtConfig::new(
        config.security.jwt_secret.clone(),
        config.security.jwt_expiration_hours,
    );
    let admin = &config.admin;
    match AuthService::new(repos, jwt)
        .ensure_admin(&admin.username, &admin.password)
        .await
    {
        Ok(true) => warn!(username = %admin.username, "Default admin created; change its password"),
        Ok(false) => {}
        Err(e) => error!(error = %e, "Failed to create default admin"),
    }
}

fn demo_product(id: &str, name: &str, price: i64, category: &str, restaurant: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        price,
        category: Some(category.to_string()),
        image_url: None,
        restaurant: restaurant.to_string(),
        available: true,
    }
}

fn demo_restaurant(id: &str, name: &str, category: &str, theme: [&str; 3], now: i64) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        category: Some(category.to_string()),
        location: Some("Ho Chi Minh City".to_string()),
        rating: 4.5,
        theme: ThemeColors {
            primary: Some(theme[0].to_string()),
            secondary: Some(theme[1].to_string()),
            accent: Some(theme[2].to_string()),
        },
        owner_id: None,
        is_active: true,
        created_at: Some(now),
    }
}

fn demo_drone(id: &str, restaurant_id: &str, restaurant_name: &str, at: GeoPoint) -> Drone {
    let mut drone = Drone::new(id, restaurant_id);
    drone.drone_code = Some(id.to_string());
    drone.restaurant_name = Some(restaurant_name.to_string());
    drone.position = Some(at);
    drone
}

/// Insert the demo catalog, restaurants and drones. Each kind is only
/// seeded when its table is empty. Returns whether anything was written.
pub async fn seed_demo_data(repos: &dyn RepositoryProvider) -> DomainResult<bool> {
    let mut seeded = false;
    let now = now_millis();

    if repos.products().count().await? == 0 {
        for product in [
            demo_product("1", "Bánh Donut", 25_000, "Bánh ngọt", "SweetDreams"),
            demo_product("2", "Bánh Tiramisu", 55_000, "Bánh ngọt", "SweetDreams"),
            demo_product("3", "Hamburger", 79_000, "Đồ ăn nhanh", "Aloha"),
            demo_product("4", "Pizza Hawaii", 89_000, "Đồ ăn nhanh", "Aloha"),
        ] {
            repos.products().save(&product).await?;
        }
        seeded = true;
    }

    if repos.restaurants().count().await? == 0 {
        for restaurant in [
            demo_restaurant(
                "SweetDreams",
                "Sweet Dreams Bakery",
                "Dessert",
                ["#F9A8D4", "#FDF2F8", "#DB2777"],
                now,
            ),
            demo_restaurant(
                "Aloha",
                "Aloha Kitchen",
                "Fast Food",
                ["#F97316", "#FFF7ED", "#EA580C"],
                now,
            ),
        ] {
            repos.restaurants().save(&restaurant).await?;
        }
        seeded = true;
    }

    if repos.drones().count().await? == 0 {
        for drone in [
            demo_drone(
                "DRONE-SD-001",
                "SweetDreams",
                "Sweet Dreams Bakery",
                GeoPoint { lat: 10.7769, lng: 106.7009 },
            ),
            demo_drone(
                "DRONE-AK-001",
                "Aloha",
                "Aloha Kitchen",
                GeoPoint { lat: 10.7626, lng: 106.6602 },
            ),
        ] {
            repos.drones().save(&drone).await?;
        }
        seeded = true;
    }

    Ok(seeded)
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup,
/// before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drone::DroneStatus;
    use crate::infrastructure::InMemoryRepositoryProvider;

    #[tokio::test]
    async fn seed_fills_an_empty_store_once() {
        let repos = InMemoryRepositoryProvider::new();
        assert!(seed_demo_data(&repos).await.unwrap());
        assert!(!seed_demo_data(&repos).await.unwrap());

        let sweet = repos.products().find_by_restaurant("SweetDreams").await.unwrap();
        assert_eq!(sweet.len(), 2);
        assert_eq!(repos.restaurants().count().await.unwrap(), 2);

        let drone = repos.drones().find_by_id("DRONE-SD-001").await.unwrap().unwrap();
        assert_eq!(drone.status, DroneStatus::Idle);
        assert_eq!(drone.battery(), 100);
    }

    #[tokio::test]
    async fn start_and_shutdown_on_memory_database() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config.server.api_host = "127.0.0.1".to_string();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 5;

        let handle = ServerHandle::start(ServerOptions {
            config,
            ..ServerOptions::default()
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_ne!(handle.api_port, 0);
        assert!(handle
            .repos
            .users()
            .find_by_username("admin")
            .await
            .unwrap()
            .is_some());
        handle.shutdown().await;
    }
}
