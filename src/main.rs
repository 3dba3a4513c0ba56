use actix_cors::Cors;
use actix_web::{middleware::{Compress, DefaultHeaders}, web, App, HttpServer};
use anyhow::Context;
use utoipa::OpenApi; // bring trait into scope for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

use ovacare::openapi::ApiDoc;
use ovacare::predict::HttpPredictor;
use ovacare::repo::inmem::InMemRepo;
use ovacare::repo::ForumRepo;
use ovacare::settings::Settings;
use ovacare::{config, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env automatically only in debug builds to reduce manual setup overhead.
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Bootstrapping health-education backend");

    let settings = Settings::from_env()?;

    let repo = if settings.seed_forum { InMemRepo::seeded() } else { InMemRepo::new() };
    info!("Forum store ready with {} topic(s)", repo.list_topics().await?.len());

    let predictor = HttpPredictor::new(settings.predict_url.clone(), settings.predict_timeout)
        .context("failed to build prediction client")?;
    info!("Forwarding predictions to {}", predictor.url());

    let state = web::Data::new(AppState { repo: Arc::new(repo), predictor: Arc::new(predictor) });
    let openapi = ApiDoc::openapi();
    let frontend_url = settings.frontend_url.clone();

    let server = HttpServer::new(move || {
        let cors = {
            let mut c = Cors::default()
                // local dev frontends (Vite, CRA, nginx container)
                .allowed_origin("http://localhost:5173")
                .allowed_origin("http://127.0.0.1:5173")
                .allowed_origin("http://localhost:8080")
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allow_any_header()
                .allowed_methods(["GET", "POST", "OPTIONS"])
                .max_age(3600);
            if let Some(front) = &frontend_url {
                c = c.allowed_origin(front);
            }
            c
        };

        App::new()
            .wrap(TracingLogger::default())
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(state.clone())
            .configure(config)
            .service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", openapi.clone()))
    })
    .bind((settings.host.as_str(), settings.port))?;

    info!("Listening on http://{}:{}", settings.host, settings.port);

    server.run().await?;
    Ok(())
}
