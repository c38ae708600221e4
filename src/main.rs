mod analytics;
mod bookings;
mod db;
mod error;
mod imports;
mod models;
mod validation;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;
use validator::Validate;

use analytics::AnalyticsService;
use bookings::{BookingService, BookingsRepository, CustomersRepository, ServicesRepository};
use error::ApiError;
use imports::ImportService;
use models::{CreateCustomer, CreateService, Customer, Service};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        create_customer,
        get_customers,
        get_customer_by_id,
        create_service,
        get_services,
        get_service_by_id,
        bookings::handlers::create_booking_handler,
        bookings::handlers::get_bookings_handler,
        bookings::handlers::get_booking_by_id_handler,
        bookings::handlers::update_booking_handler,
        imports::handlers::upload_bookings_handler,
        analytics::handlers::get_delivery_performance,
        analytics::handlers::get_analytics_overview,
    ),
    components(
        schemas(
            Customer,
            CreateCustomer,
            Service,
            CreateService,
            models::ServiceType,
            bookings::Booking,
            bookings::BookingStatus,
            bookings::CreateBookingRequest,
            bookings::UpdateBookingRequest,
            imports::FileUploadResult,
            analytics::DeliveryPerformance,
            analytics::AnalyticsOverview,
        )
    ),
    tags(
        (name = "customers", description = "Customer reference data endpoints"),
        (name = "services", description = "Service catalogue endpoints"),
        (name = "bookings", description = "Booking lifecycle endpoints"),
        (name = "imports", description = "Bulk booking import endpoints"),
        (name = "analytics", description = "Summary statistics endpoints")
    ),
    info(
        title = "Supply Chain Booking API",
        version = "1.0.0",
        description = "RESTful API for supply-chain service bookings and delivery analytics"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub booking_service: BookingService,
    pub import_service: ImportService,
    pub analytics_service: AnalyticsService,
}

/// Handler for POST /api/customers
/// Creates a new customer record
#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created successfully", body = Customer),
        (status = 400, description = "Invalid input data"),
        (status = 409, description = "Customer email already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "customers"
)]
async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    tracing::debug!("Creating new customer: {}", payload.name);

    payload.validate()?;

    // Email is the bulk-import natural key; duplicates are rejected here as
    // well as by the unique index
    if db::check_duplicate_customer_email(&state.db, &payload.email).await? {
        tracing::warn!("Attempt to create duplicate customer email: {}", payload.email);
        return Err(ApiError::Conflict {
            message: format!("Customer with email '{}' already exists", payload.email),
        });
    }

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (name, email, phone, address)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, phone, address, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Successfully created customer with id: {}", customer.id);
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Handler for GET /api/customers
/// Retrieves all customers
#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "List of all customers", body = Vec<Customer>),
        (status = 500, description = "Internal server error")
    ),
    tag = "customers"
)]
async fn get_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = sqlx::query_as::<_, Customer>(
        r#"
        SELECT id, name, email, phone, address, created_at
        FROM customers
        ORDER BY created_at
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Retrieved {} customers", customers.len());
    Ok(Json(customers))
}

/// Handler for GET /api/customers/:id
/// Retrieves a specific customer by ID
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "customers"
)]
async fn get_customer_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, phone, address, created_at FROM customers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        tracing::debug!("Customer with id {} not found", id);
        ApiError::NotFound {
            resource: "Customer".to_string(),
            id: id.to_string(),
        }
    })?;

    Ok(Json(customer))
}

/// Handler for POST /api/services
/// Creates a new service in the catalogue
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateService,
    responses(
        (status = 201, description = "Service created successfully", body = Service),
        (status = 400, description = "Invalid input data"),
        (status = 409, description = "Service name already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "services"
)]
async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateService>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    tracing::debug!("Creating new service: {}", payload.name);

    payload.validate()?;

    // Name is the bulk-import lookup key, so it must stay unique
    if db::check_duplicate_service_name(&state.db, &payload.name).await? {
        tracing::warn!("Attempt to create duplicate service: {}", payload.name);
        return Err(ApiError::Conflict {
            message: format!("Service with name '{}' already exists", payload.name),
        });
    }

    let service = sqlx::query_as::<_, Service>(
        r#"
        INSERT INTO services (name, service_type, description, base_price, estimated_delivery_days)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, service_type, description, base_price, estimated_delivery_days, created_at
        "#,
    )
    .bind(&payload.name)
    .bind(payload.service_type)
    .bind(&payload.description)
    .bind(payload.base_price)
    .bind(payload.estimated_delivery_days)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Successfully created service with id: {}", service.id);
    Ok((StatusCode::CREATED, Json(service)))
}

/// Handler for GET /api/services
/// Retrieves the full service catalogue
#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "List of all services", body = Vec<Service>),
        (status = 500, description = "Internal server error")
    ),
    tag = "services"
)]
async fn get_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, service_type, description, base_price, estimated_delivery_days, created_at
        FROM services
        ORDER BY created_at
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Retrieved {} services", services.len());
    Ok(Json(services))
}

/// Handler for GET /api/services/:id
/// Retrieves a specific service by ID
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service found", body = Service),
        (status = 404, description = "Service not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "services"
)]
async fn get_service_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, ApiError> {
    let service = sqlx::query_as::<_, Service>(
        "SELECT id, name, service_type, description, base_price, estimated_delivery_days, \
         created_at FROM services WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        tracing::debug!("Service with id {} not found", id);
        ApiError::NotFound {
            resource: "Service".to_string(),
            id: id.to_string(),
        }
    })?;

    Ok(Json(service))
}

/// Creates and configures the application router
/// Wires repositories and services onto the shared state and adds CORS
fn create_router(db: PgPool) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let customers_repo = CustomersRepository::new(db.clone());
    let services_repo = ServicesRepository::new(db.clone());
    let bookings_repo = BookingsRepository::new(db.clone());

    let booking_service = BookingService::new(
        customers_repo.clone(),
        services_repo.clone(),
        bookings_repo,
    );
    let import_service = ImportService::new(
        customers_repo,
        services_repo,
        booking_service.clone(),
    );
    let analytics_service = AnalyticsService::new(db.clone());

    let state = AppState {
        db,
        booking_service,
        import_service,
        analytics_service,
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Customer and service reference data
        .route("/api/customers", post(create_customer))
        .route("/api/customers", get(get_customers))
        .route("/api/customers/:id", get(get_customer_by_id))
        .route("/api/services", post(create_service))
        .route("/api/services", get(get_services))
        .route("/api/services/:id", get(get_service_by_id))
        // Booking lifecycle
        .route("/api/bookings", post(bookings::create_booking_handler))
        .route("/api/bookings", get(bookings::get_bookings_handler))
        .route("/api/bookings/:id", get(bookings::get_booking_by_id_handler))
        .route("/api/bookings/:id", put(bookings::update_booking_handler))
        // Bulk import
        .route("/api/upload/bookings", post(imports::upload_bookings_handler))
        // Analytics
        .route(
            "/api/analytics/delivery-performance",
            get(analytics::get_delivery_performance),
        )
        .route("/api/analytics/overview", get(analytics::get_analytics_overview))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Supply Chain Booking API - Starting...");

    // Get configuration from environment variables
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Supply Chain Booking API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
