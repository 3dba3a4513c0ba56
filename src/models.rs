use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Forum topic as stored. Ids are strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub creator: String,
    pub posts: Vec<Post>,
    pub last_activity: DateTime<Utc>,
}

/// Listing entry: the topic plus its derived post count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    #[serde(flatten)]
    pub topic: Topic,
    pub posts_count: usize,
}

impl From<Topic> for TopicSummary {
    fn from(topic: Topic) -> Self {
        let posts_count = topic.posts.len();
        Self { topic, posts_count }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    pub category: String,
    pub creator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: String, // "{topic_id}-{seq}"
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewPost {
    pub author: String,
    pub content: String,
}

/// Latest self-assessment outcome for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub quiz_count: u32,
    pub risk_status: String,
    pub last_quiz_date: Option<String>,
    pub risk_level: Option<String>,
}

impl RiskAssessment {
    pub const UNKNOWN_STATUS: &'static str = "unknown";

    /// Returned for users that never submitted; not an error.
    pub fn unknown() -> Self {
        Self {
            quiz_count: 0,
            risk_status: Self::UNKNOWN_STATUS.to_string(),
            last_quiz_date: None,
            risk_level: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRiskAssessment {
    pub risk_status: String,
    pub last_quiz_date: String,
    pub risk_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenedModules {
    pub opened_count: usize,
    pub opened_module_ids: Vec<String>,
}

// ---------------- request bodies -----------------------------------
// Fields stay optional so a missing one surfaces as a 400 with a readable
// message instead of a deserialisation failure.

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackModuleRequest {
    pub user_id: Option<String>,
    pub module_id: Option<String>,
}

impl TrackModuleRequest {
    /// `(user_id, module_id)` when both are present.
    pub fn validate(self) -> Option<(String, String)> {
        Some((present(self.user_id)?, present(self.module_id)?))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitRiskRequest {
    pub user_id: Option<String>,
    pub risk_status: Option<String>,
    pub last_quiz_date: Option<String>,
    pub risk_level: Option<String>,
}

impl SubmitRiskRequest {
    pub fn validate(self) -> Option<(String, NewRiskAssessment)> {
        let user_id = present(self.user_id)?;
        let new = NewRiskAssessment {
            risk_status: present(self.risk_status)?,
            last_quiz_date: present(self.last_quiz_date)?,
            risk_level: present(self.risk_level)?,
        };
        Some((user_id, new))
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateTopicRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub creator: Option<String>,
}

impl CreateTopicRequest {
    pub fn validate(self) -> Option<NewTopic> {
        Some(NewTopic {
            title: present(self.title)?,
            description: present(self.description)?,
            category: present(self.category)?,
            creator: present(self.creator)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreatePostRequest {
    pub author: Option<String>,
    pub content: Option<String>,
}

impl CreatePostRequest {
    pub fn validate(self) -> Option<NewPost> {
        Some(NewPost { author: present(self.author)?, content: present(self.content)? })
    }
}

/// Absent, null and "" all count as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ---------------- response bodies ----------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskSubmitted {
    pub message: String,
    pub new_quiz_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthTip {
    pub tip: String,
}

/// Shape returned by the model service. Only used for documentation; the
/// proxy relays whatever the service sends.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionResult {
    pub prediction: i64,
    pub risk_level: String,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_counts_as_missing() {
        let req = CreatePostRequest { author: Some("Bob".into()), content: Some(String::new()) };
        assert!(req.validate().is_none());
    }

    #[test]
    fn whitespace_is_accepted() {
        let req = CreatePostRequest { author: Some("Bob".into()), content: Some("  ".into()) };
        assert_eq!(req.validate().unwrap().content, "  ");
    }

    #[test]
    fn risk_request_requires_all_fields() {
        let req: SubmitRiskRequest = serde_json::from_value(serde_json::json!({
            "userId": "u1", "riskStatus": "Rendah", "lastQuizDate": "2024-01-01"
        }))
        .unwrap();
        assert!(req.validate().is_none());
    }

    #[test]
    fn summary_flattens_topic() {
        let topic = Topic {
            id: "7".into(),
            title: "T".into(),
            description: "D".into(),
            category: "C".into(),
            creator: "Alice".into(),
            posts: vec![],
            last_activity: Utc::now(),
        };
        let v = serde_json::to_value(TopicSummary::from(topic)).unwrap();
        assert_eq!(v["id"], "7");
        assert_eq!(v["postsCount"], 0);
        assert!(v.get("lastActivity").is_some());
    }
}
