use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use agora_core::domain::{Profile, Role};
use agora_core::ports::TokenService;
use agora_infra::{InMemoryStore, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

struct Harness {
    state: AppState,
    tokens: Arc<JwtTokenService>,
    admin: Profile,
    member: Profile,
    other: Profile,
}

impl Harness {
    async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());

        let mut admin = Profile::new(
            Uuid::new_v4(),
            Some("principal".to_string()),
            Some("principal@school.test".to_string()),
        );
        admin.role = Role::Admin;
        let member = Profile::new(
            Uuid::new_v4(),
            Some("ada".to_string()),
            Some("ada@school.test".to_string()),
        );
        let other = Profile::new(Uuid::new_v4(), Some("grace".to_string()), None);

        for profile in [&admin, &member, &other] {
            store.put_profile(profile.clone()).await;
        }

        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "handler-test-secret".to_string(),
            ..JwtConfig::default()
        }));

        Self {
            state: AppState::in_memory(store),
            tokens,
            admin,
            member,
            other,
        }
    }

    fn bearer(&self, profile: &Profile) -> (&'static str, String) {
        let token = self
            .tokens
            .generate_token(profile.id, profile.email.as_deref())
            .unwrap();
        ("Authorization", format!("Bearer {}", token))
    }
}

macro_rules! app {
    ($h:expr) => {{
        let token_service: Arc<dyn TokenService> = $h.tokens.clone();
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($h.state.clone()))
                .app_data(web::Data::new(token_service))
                .configure(configure_routes),
        )
        .await
    }};
}

macro_rules! create_post {
    ($app:expr, $auth:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header($auth)
            .set_json($body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["data"].clone()
    }};
}

#[actix_web::test]
async fn test_health_reports_storage_and_request_id() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["request_id"], "req-42");
}

#[actix_web::test]
async fn test_missing_token_is_rejected() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Authentication Required");
}

#[actix_web::test]
async fn test_session_reflects_profile() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::get()
        .uri("/api/session")
        .insert_header(h.bearer(&h.admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["user_id"], h.admin.id.to_string());
    assert_eq!(body["data"]["display_name"], "principal");
    assert_eq!(body["data"]["is_admin"], true);
    assert_eq!(body["data"]["profile"]["role"], "admin");
}

#[actix_web::test]
async fn test_create_post_applies_form_defaults() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(h.bearer(&h.member))
        .set_json(json!({ "title": "Study group", "content": "Thursdays after class" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Post created successfully");
    assert_eq!(body["data"]["category"], "General");
    assert_eq!(body["data"]["status"], "draft");
    assert_eq!(body["data"]["user_id"], h.member.id.to_string());
    assert_eq!(body["data"]["author"]["username"], "ada");
    assert_eq!(body["data"]["can_manage"], true);
}

#[actix_web::test]
async fn test_create_post_validates_form() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(h.bearer(&h.member))
        .set_json(json!({ "title": "Hi", "content": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("Title must be at least 3 characters"));
    assert!(detail.contains("Content must be at least 10 characters"));

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(h.bearer(&h.member))
        .set_json(json!({
            "title": "Valid title",
            "content": "Valid content here",
            "status": "archived"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_listing_tabs_and_category_all() {
    let h = Harness::new().await;
    let app = app!(h);

    create_post!(
        app,
        h.bearer(&h.member),
        json!({ "title": "Mine drafted", "content": "A draft by the member", "category": "Tutorial" })
    );
    create_post!(
        app,
        h.bearer(&h.other),
        json!({ "title": "Theirs live", "content": "Published by someone else", "status": "published" })
    );

    let list = |query: &str| {
        test::TestRequest::get()
            .uri(&format!("/api/posts{}", query))
            .insert_header(h.bearer(&h.member))
            .to_request()
    };

    let all: Value = test::call_and_read_body_json(&app, list("?category=All")).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let mine: Value = test::call_and_read_body_json(&app, list("?tab=mine")).await;
    let mine = mine["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["title"], "Mine drafted");
    assert_eq!(mine[0]["can_manage"], true);

    let published: Value = test::call_and_read_body_json(&app, list("?tab=published")).await;
    let published = published["data"].as_array().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0]["title"], "Theirs live");
    assert_eq!(published[0]["can_manage"], false);

    let tutorials: Value = test::call_and_read_body_json(&app, list("?category=Tutorial")).await;
    assert_eq!(tutorials["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_only_owner_or_admin_can_modify_post() {
    let h = Harness::new().await;
    let app = app!(h);

    let created = create_post!(
        app,
        h.bearer(&h.member),
        json!({ "title": "Lab safety", "content": "Goggles on at all times" })
    );
    let uri = format!("/api/posts/{}", created["id"].as_str().unwrap());

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(h.bearer(&h.other))
        .set_json(json!({ "title": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(h.bearer(&h.other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(h.bearer(&h.admin))
        .set_json(json!({ "status": "published", "category": "Announcement" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Post updated successfully");
    assert_eq!(body["data"]["status"], "published");
    assert_eq!(body["data"]["title"], "Lab safety");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(h.bearer(&h.member))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(h.bearer(&h.member))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_profile_update_only_touches_name_and_bio() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::put()
        .uri("/api/profile")
        .insert_header(h.bearer(&h.member))
        .set_json(json!({ "full_name": "Ada Lovelace", "bio": "" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["data"]["full_name"], "Ada Lovelace");
    assert_eq!(body["data"]["bio"], Value::Null);
    assert_eq!(body["data"]["username"], "ada");
    assert_eq!(body["data"]["role"], "user");
}

#[actix_web::test]
async fn test_admin_pages_require_admin() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::get()
        .uri("/api/admin/profiles")
        .insert_header(h.bearer(&h.member))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/admin/profiles")
        .insert_header(h.bearer(&h.admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_admin_cannot_change_own_role() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/profiles/{}/role", h.admin.id))
        .insert_header(h.bearer(&h.admin))
        .set_json(json!({ "role": "user" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "You cannot change your own role");

    // The repository itself performs no such check.
    h.state
        .content
        .update_user_role(h.admin.id, Role::User)
        .await
        .unwrap();
    let profile = h.state.content.get_profile(h.admin.id).await.unwrap();
    assert_eq!(profile.role, Role::User);
}

#[actix_web::test]
async fn test_admin_promotes_member() {
    let h = Harness::new().await;
    let app = app!(h);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/profiles/{}/role", h.member.id))
        .insert_header(h.bearer(&h.admin))
        .set_json(json!({ "role": "admin" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Role updated successfully");
    assert_eq!(body["data"]["role"], "admin");

    let req = test::TestRequest::get()
        .uri("/api/session")
        .insert_header(h.bearer(&h.member))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["is_admin"], true);
}
