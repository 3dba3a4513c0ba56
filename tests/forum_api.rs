use actix_web::{test, web, App};
use ovacare::predict::HttpPredictor;
use ovacare::repo::inmem::InMemRepo;
use ovacare::{config, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

fn state(repo: InMemRepo) -> web::Data<AppState> {
    // forum routes never reach the model service
    let predictor = HttpPredictor::new("http://127.0.0.1:9/predict", None).unwrap();
    web::Data::new(AppState { repo: Arc::new(repo), predictor: Arc::new(predictor) })
}

#[actix_web::test]
async fn create_topic_then_posts_end_to_end() {
    let app = test::init_service(App::new().app_data(state(InMemRepo::new())).configure(config)).await;

    // create topic
    let req = test::TestRequest::post()
        .uri("/api/forum/topics")
        .set_json(json!({"title":"T","description":"D","category":"C","creator":"Alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let topic: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(topic["posts"], json!([]));
    assert!(topic.get("postsCount").is_none());
    assert!(topic["lastActivity"].as_str().is_some());
    let topic_id = topic["id"].as_str().unwrap().to_string();

    // listed with a derived count
    let req = test::TestRequest::get().uri("/api/forum/topics").to_request();
    let topics: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(topics[0]["postsCount"], 0);

    // first post
    let req = test::TestRequest::post()
        .uri(&format!("/api/forum/topics/{topic_id}/posts"))
        .set_json(json!({"author":"Bob","content":"Hello"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let post: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(post["id"], format!("{topic_id}-1"));
    assert_eq!(post["author"], "Bob");

    // second post
    let req = test::TestRequest::post()
        .uri(&format!("/api/forum/topics/{topic_id}/posts"))
        .set_json(json!({"author":"Carol","content":"Hi Bob"}))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["id"], format!("{topic_id}-2"));

    // list reports both posts
    let req = test::TestRequest::get().uri("/api/forum/topics").to_request();
    let topics: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(topics[0]["postsCount"], 2);

    // detail carries the posts in order and the bumped activity
    let req = test::TestRequest::get().uri(&format!("/api/forum/topics/{topic_id}")).to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    let posts = detail["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["author"], "Bob");
    assert_eq!(posts[1]["author"], "Carol");
    assert_eq!(detail["lastActivity"], posts[1]["timestamp"]);
}

#[actix_web::test]
async fn create_topic_missing_field_is_rejected() {
    let app = test::init_service(App::new().app_data(state(InMemRepo::seeded())).configure(config)).await;

    let full = json!({"title":"T","description":"D","category":"C","creator":"Alice"});
    for field in ["title", "description", "category", "creator"] {
        let mut body = full.clone();
        body.as_object_mut().unwrap().remove(field);
        let req = test::TestRequest::post().uri("/api/forum/topics").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "missing {field} should be rejected");
        let err: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(err["message"], "Title, description, category, and creator are required.");
    }

    // empty string counts as missing too
    let req = test::TestRequest::post()
        .uri("/api/forum/topics")
        .set_json(json!({"title":"","description":"D","category":"C","creator":"Alice"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // collection unchanged (only the three seeds)
    let req = test::TestRequest::get().uri("/api/forum/topics").to_request();
    let topics: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(topics.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn post_to_unknown_topic_is_not_found() {
    let app = test::init_service(App::new().app_data(state(InMemRepo::seeded())).configure(config)).await;

    let req = test::TestRequest::post()
        .uri("/api/forum/topics/42/posts")
        .set_json(json!({"author":"Bob","content":"Hello"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let err: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(err["message"], "Topic not found.");

    let req = test::TestRequest::get().uri("/api/forum/topics").to_request();
    let topics: Value = test::call_and_read_body_json(&app, req).await;
    assert!(topics.as_array().unwrap().iter().all(|t| t["postsCount"] == 0));
}

#[actix_web::test]
async fn post_without_content_is_rejected() {
    let app = test::init_service(App::new().app_data(state(InMemRepo::seeded())).configure(config)).await;

    let req = test::TestRequest::post()
        .uri("/api/forum/topics/1/posts")
        .set_json(json!({"author":"Bob","content":""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let err: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(err["message"], "Author and content are required.");
}

#[actix_web::test]
async fn invalid_post_to_unknown_topic_is_bad_request() {
    let app = test::init_service(App::new().app_data(state(InMemRepo::seeded())).configure(config)).await;

    // body is checked before the topic lookup
    let req = test::TestRequest::post()
        .uri("/api/forum/topics/42/posts")
        .set_json(json!({"author":"Bob"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let err: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(err["message"], "Author and content are required.");
}

#[actix_web::test]
async fn unknown_topic_detail_is_not_found() {
    let app = test::init_service(App::new().app_data(state(InMemRepo::new())).configure(config)).await;
    let req = test::TestRequest::get().uri("/api/forum/topics/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn malformed_json_uses_message_shape() {
    let app = test::init_service(App::new().app_data(state(InMemRepo::new())).configure(config)).await;
    let req = test::TestRequest::post()
        .uri("/api/forum/topics")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let err: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert!(err["message"].as_str().is_some());
}
