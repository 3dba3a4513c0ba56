use crate::models::{
    CreatePostRequest, CreateTopicRequest, HealthTip, MessageResponse, OpenedModules, Post,
    PredictionResult, RiskAssessment, RiskSubmitted, SubmitRiskRequest, Topic, TopicSummary,
    TrackModuleRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::predict,
        crate::routes::track_module,
        crate::routes::opened_count,
        crate::routes::submit_risk_assessment,
        crate::routes::get_risk_assessment,
        crate::routes::list_topics,
        crate::routes::get_topic,
        crate::routes::create_topic,
        crate::routes::create_post,
        crate::routes::health_tip,
    ),
    components(schemas(
        Topic, TopicSummary, Post, CreateTopicRequest, CreatePostRequest,
        TrackModuleRequest, OpenedModules, MessageResponse,
        SubmitRiskRequest, RiskAssessment, RiskSubmitted,
        HealthTip, PredictionResult
    )),
    tags(
        (name = "prediction", description = "Proxy to the risk model service"),
        (name = "education", description = "Education module tracking"),
        (name = "risk", description = "Risk self-assessment results"),
        (name = "forum", description = "Forum topics and posts"),
        (name = "tips", description = "Health tips"),
    )
)]
pub struct ApiDoc;
