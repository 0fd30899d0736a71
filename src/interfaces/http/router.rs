//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::events::SharedEventBus;
use crate::application::{
    AdminService, AnalyticsService, AuthService, CartService, CatalogService, DroneService,
    NotificationService, OrderService, VnpayService,
};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, MessageResponse};
use crate::interfaces::http::middleware::{admin_middleware, AuthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::ws::{ws_events_handler, RealtimeSocketState};

use super::modules::{
    admin, analytics, auth, cart, drones, health, notifications, orders, payments, products,
    realtime, restaurants,
};

/// Everything the routers need, built once at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub event_bus: SharedEventBus,
    pub catalog: CatalogService,
    pub drones: DroneService,
    pub orders: OrderService,
    pub cart: CartService,
    pub notifications: NotificationService,
    pub analytics: AnalyticsService,
    pub admin: AdminService,
    pub auth: AuthService,
    pub vnpay: VnpayService,
    pub auth_state: AuthState,
    pub started_at: Arc<Instant>,
}

impl ApiContext {
    pub fn new(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        event_bus: SharedEventBus,
        config: &AppConfig,
    ) -> Self {
        let jwt_config = JwtConfig::new(
            config.security.jwt_secret.clone(),
            config.security.jwt_expiration_hours,
        );
        let notifications = NotificationService::new(repos.clone());

        Self {
            db,
            catalog: CatalogService::new(repos.clone()),
            drones: DroneService::new(repos.clone(), event_bus.clone()),
            orders: OrderService::new(
                repos.clone(),
                event_bus.clone(),
                notifications.clone(),
                config.orders.renotify_on_status_change,
            ),
            cart: CartService::new(repos.clone(), event_bus.clone()),
            notifications,
            analytics: AnalyticsService::new(repos.clone()),
            admin: AdminService::new(repos.clone()),
            auth: AuthService::new(repos, jwt_config.clone()),
            vnpay: VnpayService::new(config.vnpay.clone()),
            auth_state: AuthState {
                jwt_config,
                require_admin_token: config.security.require_admin_token,
            },
            event_bus,
            started_at: Arc::new(Instant::now()),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::list_users,
        // Catalog
        products::list_products,
        products::get_product,
        products::create_product,
        products::patch_product,
        products::delete_product,
        restaurants::list_restaurants,
        restaurants::get_restaurant,
        restaurants::get_restaurant_by_owner,
        // Orders
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::patch_order,
        // Cart
        cart::get_cart,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::clear_cart,
        // Drones
        drones::list_drones,
        drones::get_drone,
        drones::patch_drone,
        drones::claim_drone,
        drones::release_drone,
        // Notifications
        notifications::get_inbox,
        notifications::get_restaurant_inbox,
        notifications::get_unread,
        notifications::get_unread_count,
        notifications::mark_read,
        // Analytics
        analytics::get_restaurant_analytics,
        analytics::get_restaurant_overview,
        // Payments
        payments::create_order_payment,
        payments::create_checkout_payment,
        // Admin
        admin::get_stats,
        admin::list_restaurants,
        admin::list_customers,
        admin::list_drones,
        admin::set_restaurant_status,
        admin::suspend_user,
        admin::reactivate_user,
        realtime::get_realtime_stats,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            health::RealtimeHealth,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::UserDto,
            // Catalog
            products::ProductDto,
            products::SaveProductRequest,
            restaurants::RestaurantDto,
            restaurants::ThemeDto,
            // Orders
            orders::OrderDto,
            orders::OrderItemDto,
            orders::CreateOrderRequest,
            orders::CreateOrderItemRequest,
            orders::OrderPatchRequest,
            // Cart
            cart::CartItemDto,
            cart::AddCartItemRequest,
            // Drones
            drones::DroneDto,
            drones::PositionDto,
            drones::ClaimDroneRequest,
            // Notifications
            notifications::NotificationDto,
            notifications::NotificationInbox,
            notifications::UnreadCount,
            // Analytics
            analytics::AnalyticsDto,
            analytics::OverviewDto,
            analytics::TopItemDto,
            // Payments
            payments::OrderPaymentRequest,
            payments::PaymentUrlResponse,
            payments::CheckoutPaymentRequest,
            payments::CheckoutPaymentResponse,
            // Admin
            admin::RestaurantStatusRequest,
            crate::application::admin::AdminStats,
            crate::application::admin::AdminRestaurant,
            crate::application::admin::AdminCustomer,
            crate::application::admin::AdminDrone,
            crate::application::admin::RealtimeStats,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Login, customer registration and the account list"),
        (name = "Products", description = "Product catalog"),
        (name = "Restaurants", description = "Restaurant lookups"),
        (name = "Orders", description = "Order placement and status updates"),
        (name = "Cart", description = "Server-side shopping cart"),
        (name = "Drones", description = "Delivery drone fleet"),
        (name = "Notifications", description = "Restaurant order inbox"),
        (name = "Analytics", description = "Restaurant KPIs"),
        (name = "Payments", description = "VNPay redirect URLs"),
        (name = "Admin", description = "Back-office reporting and moderation"),
    ),
    info(
        title = "FoodFast Delivery API",
        version = "1.0.0",
        description = "REST API for the FoodFast drone food-delivery platform",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn order_routes(ctx: &ApiContext) -> Router {
    Router::new()
        .route("/", get(orders::list_orders).post(orders::create_order))
        .route("/{id}", get(orders::get_order).patch(orders::patch_order))
        .with_state(orders::OrderHandlerState {
            orders: ctx.orders.clone(),
        })
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let admin_guard = middleware::from_fn_with_state(ctx.auth_state.clone(), admin_middleware);

    let product_routes = Router::new()
        .route("/", get(products::list_products).post(products::create_product))
        .route(
            "/{id}",
            get(products::get_product)
                .patch(products::patch_product)
                .delete(products::delete_product),
        )
        .with_state(products::ProductHandlerState {
            catalog: ctx.catalog.clone(),
        });

    let restaurant_routes = Router::new()
        .route("/", get(restaurants::list_restaurants))
        .route("/owner/{owner_id}", get(restaurants::get_restaurant_by_owner))
        .route("/{id}", get(restaurants::get_restaurant))
        .with_state(restaurants::RestaurantHandlerState {
            catalog: ctx.catalog.clone(),
        });

    let cart_routes = Router::new()
        .route("/", get(cart::get_cart))
        .route("/add", post(cart::add_to_cart))
        .route("/clear", delete(cart::clear_cart))
        .route("/{id}", delete(cart::remove_from_cart))
        .with_state(cart::CartHandlerState {
            cart: ctx.cart.clone(),
        });

    let drone_routes = Router::new()
        .route("/", get(drones::list_drones))
        .route("/{id}", get(drones::get_drone).patch(drones::patch_drone))
        .route("/{id}/claim", post(drones::claim_drone))
        .route("/{id}/release", post(drones::release_drone))
        .with_state(drones::DroneHandlerState {
            drones: ctx.drones.clone(),
        });

    let notification_routes = Router::new()
        .route("/{restaurant_id}", get(notifications::get_inbox))
        .route("/{id}/read", post(notifications::mark_read))
        .route(
            "/restaurant/{restaurant_id}",
            get(notifications::get_restaurant_inbox),
        )
        .route(
            "/restaurant/{restaurant_id}/unread",
            get(notifications::get_unread),
        )
        .route(
            "/restaurant/{restaurant_id}/count",
            get(notifications::get_unread_count),
        )
        .with_state(notifications::NotificationHandlerState {
            notifications: ctx.notifications.clone(),
        });

    let analytics_routes = Router::new()
        .route(
            "/restaurant/{restaurant_id}",
            get(analytics::get_restaurant_analytics),
        )
        .route(
            "/restaurant/{restaurant_id}/overview",
            get(analytics::get_restaurant_overview),
        )
        .with_state(analytics::AnalyticsState {
            analytics: ctx.analytics.clone(),
        });

    let payment_state = payments::PaymentHandlerState {
        vnpay: ctx.vnpay.clone(),
    };
    let payment_routes = Router::new()
        .route("/api/payment/vnpay/create", post(payments::create_order_payment))
        .route("/api/vnpay/create-payment", post(payments::create_checkout_payment))
        .with_state(payment_state);

    let auth_state = auth::AuthHandlerState {
        auth: ctx.auth.clone(),
    };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Account list (admin)
    let auth_admin_routes = Router::new()
        .route("/users", get(auth::list_users))
        .layer(admin_guard.clone())
        .with_state(auth_state);

    let admin_routes = Router::new()
        .route("/stats", get(admin::get_stats))
        .route("/restaurants", get(admin::list_restaurants))
        .route("/customers", get(admin::list_customers))
        .route("/drones", get(admin::list_drones))
        .route(
            "/restaurants/{id}/status",
            patch(admin::set_restaurant_status),
        )
        .route("/users/{id}/suspend", patch(admin::suspend_user))
        .route(
            "/users/{id}/reactivate",
            patch(admin::reactivate_user),
        )
        .layer(admin_guard)
        .with_state(admin::AdminHandlerState {
            admin: ctx.admin.clone(),
        });

    let realtime_routes = Router::new()
        .route("/api/realtimeStats", get(realtime::get_realtime_stats))
        .with_state(realtime::RealtimeState {
            admin: ctx.admin.clone(),
        });

    let health_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .with_state(health::HealthState {
            db: ctx.db.clone(),
            event_bus: ctx.event_bus.clone(),
            started_at: ctx.started_at.clone(),
        });

    // Realtime WebSocket (no auth on upgrade)
    let ws_routes = Router::new()
        .route("/ws", get(ws_events_handler))
        .with_state(RealtimeSocketState {
            event_bus: ctx.event_bus.clone(),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        .merge(health_routes)
        // Auth
        .nest("/api/auth", auth_routes)
        .nest("/api/auth", auth_admin_routes)
        // Catalog
        .nest("/api/products", product_routes)
        .nest("/api/restaurants", restaurant_routes)
        // Orders, also served without the /api prefix for older clients
        .nest("/api/orders", order_routes(&ctx))
        .nest("/orders", order_routes(&ctx))
        .nest("/api/cart", cart_routes)
        .nest("/api/drones", drone_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/analytics", analytics_routes)
        .merge(payment_routes)
        .nest("/api/admin", admin_routes)
        .merge(realtime_routes)
        .merge(ws_routes)
        // Middleware
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
