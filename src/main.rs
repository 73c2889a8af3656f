use std::net::SocketAddr;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use admissions::application::use_cases::auth::register::RegisterRequest;
use admissions::application::use_cases::auth::seed_admin::SeedAdmin;
use admissions::bootstrap::app_context::{AppContext, AppServices};
use admissions::bootstrap::config::{Config, PersistenceBackend};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            admissions::presentation::http::auth::register,
            admissions::presentation::http::auth::login,
            admissions::presentation::http::auth::logout,
            admissions::presentation::http::auth::me,
            admissions::presentation::http::applications::submit_application,
            admissions::presentation::http::applications::get_user_application,
            admissions::presentation::http::applications::get_application,
            admissions::presentation::http::applications::list_applications,
            admissions::presentation::http::applications::update_status,
            admissions::presentation::http::health::health,
        ),
        components(schemas(
            admissions::presentation::http::auth::RegisterRequest,
            admissions::presentation::http::auth::LoginRequest,
            admissions::presentation::http::auth::LoginResponse,
            admissions::presentation::http::auth::UserResponse,
            admissions::presentation::http::applications::EducationRecord,
            admissions::presentation::http::applications::DocumentRef,
            admissions::presentation::http::applications::ApplicationResponse,
            admissions::presentation::http::applications::ApplicationListResponse,
            admissions::presentation::http::applications::SubmitApplicationRequest,
            admissions::presentation::http::error::ErrorBody,
            admissions::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration and sessions"),
            (name = "Applications", description = "Admission applications and review"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "admissions=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting admissions backend");

    let services = match cfg.persistence {
        PersistenceBackend::Postgres => {
            let pool = admissions::infrastructure::db::connect_pool(&cfg.database_url).await?;
            admissions::infrastructure::db::migrate(&pool).await?;
            AppServices::postgres(pool)
        }
        PersistenceBackend::Memory => {
            warn!("persistence_backend_memory_data_is_not_durable");
            AppServices::in_memory()
        }
    };
    let ctx = AppContext::new(cfg.clone(), services);

    if let Some(seed) = &cfg.admin_seed {
        let repo = ctx.user_repo();
        let uc = SeedAdmin {
            repo: repo.as_ref(),
        };
        let req = RegisterRequest {
            email: seed.email.clone(),
            name: seed.name.clone(),
            phone: None,
            password: seed.password.clone(),
        };
        if uc.execute(&req).await?.is_none() {
            info!(email = %seed.email, "admin_account_already_present");
        }
    }

    let app = admissions::presentation::http::api_router(ctx)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(build_cors(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

fn build_cors(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        // In production FRONTEND_URL is validated at startup; an unparseable value denies all.
        Some(Err(_)) | None if cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        // Development convenience
        _ => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = ?e, "failed_to_listen_for_shutdown_signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown_signal_received");
}
