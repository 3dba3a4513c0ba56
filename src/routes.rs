use std::sync::Arc;
use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::*;
use crate::predict::Predictor;
use crate::repo::Repo;
use crate::tips;

pub fn config(cfg: &mut web::ServiceConfig) {
    // malformed JSON bodies get the same `{message}` shape as other 400s
    let json_cfg = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    cfg.service(
        web::scope("/api")
            .app_data(json_cfg)
            .service(web::resource(["/predict", "/predict-proxy"]).route(web::post().to(predict)))
            .service(
                web::resource("/education/track-module")
                    .route(web::post().to(track_module)),
            )
            .service(
                web::resource("/education/opened-count/{user_id}")
                    .route(web::get().to(opened_count)),
            )
            .service(
                web::resource("/risk-assessment")
                    .route(web::post().to(submit_risk_assessment)),
            )
            .service(
                web::resource("/risk-assessment/{user_id}")
                    .route(web::get().to(get_risk_assessment)),
            )
            .service(
                web::resource("/forum/topics")
                    .route(web::get().to(list_topics))
                    .route(web::post().to(create_topic)),
            )
            .service(web::resource("/forum/topics/{id}").route(web::get().to(get_topic)))
            .service(web::resource("/forum/topics/{id}/posts").route(web::post().to(create_post)))
            .service(
                web::resource(["/health-tip-of-the-day", "/health-tip"])
                    .route(web::get().to(health_tip)),
            ),
    );
}

#[derive(Clone)]
pub struct AppState { pub repo: Arc<dyn Repo>, pub predictor: Arc<dyn Predictor> }

// ---------------- Prediction proxy ---------------------------------

#[utoipa::path(
    post,
    path = "/api/predict",
    tag = "prediction",
    request_body(
        content = std::collections::HashMap<String, f64>,
        description = "Numeric features forwarded verbatim: `Usia` (age) and answers `Q1`..`Q20`"
    ),
    responses(
        (status = 200, description = "Model output relayed verbatim", body = PredictionResult),
        (status = 500, description = "Model service unreachable or unreadable")
    )
)]
pub async fn predict(data: web::Data<AppState>, payload: web::Json<Value>) -> Result<HttpResponse, ApiError> {
    let result = data.predictor.predict(&payload).await?;
    Ok(HttpResponse::Ok().json(result))
}

// ---------------- Education modules --------------------------------

#[utoipa::path(
    post,
    path = "/api/education/track-module",
    tag = "education",
    request_body = TrackModuleRequest,
    responses(
        (status = 200, description = "Module tracked", body = MessageResponse),
        (status = 400, description = "Missing userId or moduleId")
    )
)]
pub async fn track_module(data: web::Data<AppState>, payload: web::Json<TrackModuleRequest>) -> Result<HttpResponse, ApiError> {
    let (user_id, module_id) = payload
        .into_inner()
        .validate()
        .ok_or_else(|| ApiError::BadRequest("UserId and ModuleId are required.".into()))?;
    data.repo.track_module(&user_id, &module_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse { message: "Module tracked successfully.".into() }))
}

#[utoipa::path(
    get,
    path = "/api/education/opened-count/{user_id}",
    tag = "education",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Modules opened by the user (empty for unknown users)", body = OpenedModules)
    )
)]
pub async fn opened_count(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let opened = data.repo.opened_modules(&user_id).await?;
    Ok(HttpResponse::Ok().json(opened))
}

// ---------------- Risk assessment ----------------------------------

#[utoipa::path(
    post,
    path = "/api/risk-assessment",
    tag = "risk",
    request_body = SubmitRiskRequest,
    responses(
        (status = 200, description = "Assessment stored", body = RiskSubmitted),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn submit_risk_assessment(data: web::Data<AppState>, payload: web::Json<SubmitRiskRequest>) -> Result<HttpResponse, ApiError> {
    let (user_id, new) = payload
        .into_inner()
        .validate()
        .ok_or_else(|| ApiError::BadRequest("Missing required fields for risk assessment.".into()))?;
    let new_quiz_count = data.repo.submit_assessment(&user_id, new).await?;
    Ok(HttpResponse::Ok().json(RiskSubmitted {
        message: "Risk assessment saved successfully.".into(),
        new_quiz_count,
    }))
}

#[utoipa::path(
    get,
    path = "/api/risk-assessment/{user_id}",
    tag = "risk",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Latest assessment, or the `unknown` record", body = RiskAssessment)
    )
)]
pub async fn get_risk_assessment(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let assessment = data.repo.get_assessment(&user_id).await?;
    Ok(HttpResponse::Ok().json(assessment))
}

// ---------------- Forum --------------------------------------------

#[utoipa::path(
    get,
    path = "/api/forum/topics",
    tag = "forum",
    responses(
        (status = 200, description = "All topics in creation order", body = [TopicSummary])
    )
)]
pub async fn list_topics(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let topics = data.repo.list_topics().await?;
    Ok(HttpResponse::Ok().json(topics))
}

#[utoipa::path(
    get,
    path = "/api/forum/topics/{id}",
    tag = "forum",
    params(("id" = String, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Topic with its posts", body = Topic),
        (status = 404, description = "Topic not found")
    )
)]
pub async fn get_topic(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let topic = data.repo.get_topic(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(topic))
}

#[utoipa::path(
    post,
    path = "/api/forum/topics",
    tag = "forum",
    request_body = CreateTopicRequest,
    responses(
        (status = 201, description = "Topic created", body = Topic),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn create_topic(data: web::Data<AppState>, payload: web::Json<CreateTopicRequest>) -> Result<HttpResponse, ApiError> {
    let new = payload.into_inner().validate().ok_or_else(|| {
        ApiError::BadRequest("Title, description, category, and creator are required.".into())
    })?;
    let topic = data.repo.create_topic(new).await?;
    Ok(HttpResponse::Created().json(topic))
}

#[utoipa::path(
    post,
    path = "/api/forum/topics/{id}/posts",
    tag = "forum",
    params(("id" = String, Path, description = "Topic id")),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post added", body = Post),
        (status = 400, description = "Missing author or content"),
        (status = 404, description = "Topic not found")
    )
)]
pub async fn create_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, ApiError> {
    let new = payload
        .into_inner()
        .validate()
        .ok_or_else(|| ApiError::BadRequest("Author and content are required.".into()))?;
    let post = data.repo.create_post(&path.into_inner(), new).await?;
    Ok(HttpResponse::Created().json(post))
}

// ---------------- Health tips --------------------------------------

#[utoipa::path(
    get,
    path = "/api/health-tip-of-the-day",
    tag = "tips",
    responses(
        (status = 200, description = "One tip drawn at random", body = HealthTip)
    )
)]
pub async fn health_tip() -> HttpResponse {
    let tip = tips::random_tip(&mut rand::thread_rng());
    HttpResponse::Ok().json(HealthTip { tip: tip.to_string() })
}
