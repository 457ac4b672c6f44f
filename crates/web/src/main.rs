use anyhow::Context;
use axum::Router;
use storage::Database;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod password;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::uploads::handlers::upload_workout_csv,
        features::workouts::handlers::list_workouts,
        features::workouts::handlers::update_workout,
        features::workouts::handlers::delete_workout,
    ),
    components(
        schemas(
            storage::dto::user::RegisterRequest,
            storage::dto::user::LoginRequest,
            storage::dto::user::UserResponse,
            storage::dto::workout::UpdateWorkoutRequest,
            storage::dto::workout::WorkoutRecordResponse,
            storage::models::WorkoutRecord,
            features::uploads::handlers::UploadRequest,
            features::uploads::handlers::UploadResponse,
        )
    ),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "workouts", description = "Workout history endpoints"),
        (name = "uploads", description = "Workout CSV upload"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting RepBook API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    let openapi = ApiDoc::openapi();

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .nest("/auth", features::auth::routes())
        .nest("/upload", features::uploads::routes())
        .nest("/api/users/:user_id/workouts", features::workouts::routes())
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app).await?;

    Ok(())
}
