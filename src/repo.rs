use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::models::*;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("{0} not found")] NotFound(&'static str),
    #[error("internal: {0}")] Internal(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

use async_trait::async_trait;

#[async_trait]
pub trait ForumRepo: Send + Sync {
    async fn list_topics(&self) -> RepoResult<Vec<TopicSummary>>;
    async fn get_topic(&self, id: &str) -> RepoResult<Topic>;
    async fn create_topic(&self, new: NewTopic) -> RepoResult<Topic>;
    async fn create_post(&self, topic_id: &str, new: NewPost) -> RepoResult<Post>;
}

#[async_trait]
pub trait ModuleRepo: Send + Sync {
    /// Returns true when the module was not tracked before.
    async fn track_module(&self, user_id: &str, module_id: &str) -> RepoResult<bool>;
    async fn opened_modules(&self, user_id: &str) -> RepoResult<OpenedModules>;
}

#[async_trait]
pub trait RiskRepo: Send + Sync {
    /// Overwrites the user's record and returns the new quiz count.
    async fn submit_assessment(&self, user_id: &str, new: NewRiskAssessment) -> RepoResult<u32>;
    async fn get_assessment(&self, user_id: &str) -> RepoResult<RiskAssessment>;
}

pub trait Repo: ForumRepo + ModuleRepo + RiskRepo {}

impl<T> Repo for T where T: ForumRepo + ModuleRepo + RiskRepo {}

pub mod inmem {
    use super::*;

    /// Topics present on a fresh server: (title, description, category).
    const SEED_TOPICS: [(&str, &str, &str); 3] = [
        (
            "Berbagi Pengalaman Kista Ovarium",
            "Forum untuk berbagi pengalaman dan saling mendukung",
            "Pengalaman",
        ),
        (
            "Pertanyaan Seputar Gejala",
            "Diskusi tentang gejala dan tanda-tanda kista ovarium",
            "Tanya Jawab",
        ),
        (
            "Tips Pencegahan dan Pola Hidup Sehat",
            "Berbagi tips untuk menjaga kesehatan reproduksi",
            "Tips",
        ),
    ];
    const SEED_CREATOR: &str = "Admin";

    struct TopicEntry {
        topic: Topic,
        next_post_seq: u64,
    }

    #[derive(Default)]
    struct State {
        topics: Vec<TopicEntry>, // insertion order is the listing order
        opened_modules: HashMap<String, Vec<String>>,
        assessments: HashMap<String, RiskAssessment>,
        next_topic_id: u64,
    }

    /// Process-lifetime store. Clones share the same state.
    #[derive(Clone, Default)]
    pub struct InMemRepo {
        state: Arc<RwLock<State>>,
    }

    impl InMemRepo {
        pub fn new() -> Self {
            Self::default()
        }

        /// Store pre-populated with the default forum topics (ids 1..=3).
        pub fn seeded() -> Self {
            let repo = Self::new();
            if let Ok(mut s) = repo.state.write() {
                for (title, description, category) in SEED_TOPICS {
                    Self::insert_topic(
                        &mut s,
                        NewTopic {
                            title: title.into(),
                            description: description.into(),
                            category: category.into(),
                            creator: SEED_CREATOR.into(),
                        },
                    );
                }
            }
            repo
        }

        fn read(&self) -> RepoResult<RwLockReadGuard<'_, State>> {
            self.state.read().map_err(|e| RepoError::Internal(e.to_string()))
        }

        fn write(&self) -> RepoResult<RwLockWriteGuard<'_, State>> {
            self.state.write().map_err(|e| RepoError::Internal(e.to_string()))
        }

        fn insert_topic(state: &mut State, new: NewTopic) -> Topic {
            state.next_topic_id += 1;
            let topic = Topic {
                id: state.next_topic_id.to_string(),
                title: new.title,
                description: new.description,
                category: new.category,
                creator: new.creator,
                posts: Vec::new(),
                last_activity: Utc::now(),
            };
            state.topics.push(TopicEntry { topic: topic.clone(), next_post_seq: 0 });
            topic
        }
    }

    #[async_trait]
    impl ForumRepo for InMemRepo {
        async fn list_topics(&self) -> RepoResult<Vec<TopicSummary>> {
            let s = self.read()?;
            Ok(s.topics.iter().map(|e| TopicSummary::from(e.topic.clone())).collect())
        }
        async fn get_topic(&self, id: &str) -> RepoResult<Topic> {
            let s = self.read()?;
            s.topics
                .iter()
                .find(|e| e.topic.id == id)
                .map(|e| e.topic.clone())
                .ok_or(RepoError::NotFound("Topic"))
        }
        async fn create_topic(&self, new: NewTopic) -> RepoResult<Topic> {
            let mut s = self.write()?;
            let topic = Self::insert_topic(&mut s, new);
            tracing::debug!(topic_id = %topic.id, "topic created");
            Ok(topic)
        }
        async fn create_post(&self, topic_id: &str, new: NewPost) -> RepoResult<Post> {
            let mut s = self.write()?;
            let entry = s
                .topics
                .iter_mut()
                .find(|e| e.topic.id == topic_id)
                .ok_or(RepoError::NotFound("Topic"))?;
            entry.next_post_seq += 1;
            let post = Post {
                id: format!("{}-{}", entry.topic.id, entry.next_post_seq),
                author: new.author,
                content: new.content,
                timestamp: Utc::now(),
            };
            // bump topic
            entry.topic.last_activity = post.timestamp;
            entry.topic.posts.push(post.clone());
            tracing::debug!(topic_id, post_id = %post.id, "post added");
            Ok(post)
        }
    }

    #[async_trait]
    impl ModuleRepo for InMemRepo {
        async fn track_module(&self, user_id: &str, module_id: &str) -> RepoResult<bool> {
            let mut s = self.write()?;
            let opened = s.opened_modules.entry(user_id.to_string()).or_default();
            if opened.iter().any(|m| m == module_id) {
                return Ok(false);
            }
            opened.push(module_id.to_string());
            tracing::debug!(user_id, module_id, opened = opened.len(), "module tracked");
            Ok(true)
        }
        async fn opened_modules(&self, user_id: &str) -> RepoResult<OpenedModules> {
            let s = self.read()?;
            let ids = s.opened_modules.get(user_id).cloned().unwrap_or_default();
            Ok(OpenedModules { opened_count: ids.len(), opened_module_ids: ids })
        }
    }

    #[async_trait]
    impl RiskRepo for InMemRepo {
        async fn submit_assessment(&self, user_id: &str, new: NewRiskAssessment) -> RepoResult<u32> {
            let mut s = self.write()?;
            let quiz_count = s.assessments.get(user_id).map_or(0, |a| a.quiz_count) + 1;
            s.assessments.insert(
                user_id.to_string(),
                RiskAssessment {
                    quiz_count,
                    risk_status: new.risk_status,
                    last_quiz_date: Some(new.last_quiz_date),
                    risk_level: Some(new.risk_level),
                },
            );
            tracing::debug!(user_id, quiz_count, "risk assessment stored");
            Ok(quiz_count)
        }
        async fn get_assessment(&self, user_id: &str) -> RepoResult<RiskAssessment> {
            let s = self.read()?;
            Ok(s.assessments.get(user_id).cloned().unwrap_or_else(RiskAssessment::unknown))
        }
    }
}
