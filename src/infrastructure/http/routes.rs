//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                                     GET    健康检查
//! - /api/projects                                 POST   创建项目
//! - /api/projects                                 GET    列出项目
//! - /api/projects/:project_id                     GET    项目详情（含章节概要）
//! - /api/projects/:project_id                     PUT    修改标题
//! - /api/projects/:project_id                     DELETE 删除项目
//! - /api/projects/:project_id/chapters            GET    章节列表
//! - /api/projects/:project_id/chapters/:number    GET    单个章节
//! - /api/projects/:project_id/export              GET    导出文稿（JSON）
//! - /api/projects/:project_id/export/download     GET    下载文稿（Markdown）
//! - /api/chapters/prepare                         POST   生成计划
//! - /api/chapters/save                            POST   保存章节

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/projects", project_routes())
        .nest("/chapters", chapter_routes())
}

/// Project 路由
fn project_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            post(handlers::create_project).get(handlers::list_projects),
        )
        .route(
            "/:project_id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route("/:project_id/chapters", get(handlers::list_chapters))
        .route("/:project_id/chapters/:number", get(handlers::get_chapter))
        .route("/:project_id/export", get(handlers::export_manuscript))
        .route(
            "/:project_id/export/download",
            get(handlers::download_manuscript),
        )
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prepare", post(handlers::prepare_chapter))
        .route("/save", post(handlers::save_chapter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::domain::WordCountRules;
    use crate::infrastructure::memory::InMemoryProjectRepository;

    fn app() -> Router {
        let state = AppState::new(
            Arc::new(InMemoryProjectRepository::new()),
            WordCountRules::default(),
        );
        create_routes().with_state(Arc::new(state))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Value {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    async fn create_dual_project(app: &Router) -> String {
        let created = send(
            app,
            Method::POST,
            "/api/projects",
            Some(json!({
                "title": "Moon Pact",
                "outline": "Ava is rejected.\n\nRowan regrets it.\n\nThey unite the pack.",
                "chapter_count": 3,
                "pov_mode": "dual",
                "genre": "werewolf"
            })),
        )
        .await;
        assert_eq!(created["errno"], 0);
        assert_eq!(created["data"]["chapters"].as_array().unwrap().len(), 3);
        created["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = app();
        let body = send(&app, Method::GET, "/api/ping", None).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_end_to_end_dual_project() {
        let app = app();
        let project_id = create_dual_project(&app).await;

        let plan1 = send(
            &app,
            Method::POST,
            "/api/chapters/prepare",
            Some(json!({ "project_id": project_id, "number": 1 })),
        )
        .await;
        assert_eq!(plan1["data"]["resolved_pov"], "female");

        let plan2 = send(
            &app,
            Method::POST,
            "/api/chapters/prepare",
            Some(json!({ "project_id": project_id, "number": 2 })),
        )
        .await;
        assert_eq!(plan2["data"]["resolved_pov"], "male");

        let saved = send(
            &app,
            Method::POST,
            "/api/chapters/save",
            Some(json!({
                "project_id": project_id,
                "number": 1,
                "title": "Rejected",
                "content": words(1600),
                "pov_used": "female"
            })),
        )
        .await;
        assert_eq!(saved["errno"], 0);
        assert_eq!(saved["data"]["word_count"], 1600);
        assert_eq!(saved["data"]["in_range"], true);

        let export = send(
            &app,
            Method::GET,
            &format!("/api/projects/{}/export", project_id),
            None,
        )
        .await;
        let content = export["data"]["content"].as_str().unwrap();
        assert!(content.starts_with("Chapter 1: Rejected\n\n"));
        assert!(!content.contains("Chapter 2"));
        assert_eq!(export["data"]["filename"], "Moon_Pact.md");
        assert_eq!(export["data"]["included_chapters"], json!([1]));
    }

    #[tokio::test]
    async fn test_chapter_listing_and_resave() {
        let app = app();
        let project_id = create_dual_project(&app).await;

        for content in ["first draft text", "second draft"] {
            send(
                &app,
                Method::POST,
                "/api/chapters/save",
                Some(json!({
                    "project_id": project_id,
                    "number": 2,
                    "content": content
                })),
            )
            .await;
        }

        let chapters = send(
            &app,
            Method::GET,
            &format!("/api/projects/{}/chapters", project_id),
            None,
        )
        .await;
        let second = &chapters["data"][1];
        assert_eq!(second["number"], 2);
        assert_eq!(second["status"], "saved");
        assert_eq!(second["word_count"], 2);
        assert_eq!(second["pov_used"], "male");
        assert_eq!(second["title"], "Rowan regrets it");
        assert_eq!(second["revision"], 2);

        let chapter = send(
            &app,
            Method::GET,
            &format!("/api/projects/{}/chapters/2", project_id),
            None,
        )
        .await;
        assert_eq!(chapter["data"]["content"], "second draft");
    }

    #[tokio::test]
    async fn test_validation_errors_use_envelope() {
        let app = app();
        let project_id = create_dual_project(&app).await;

        let out_of_range = send(
            &app,
            Method::POST,
            "/api/chapters/prepare",
            Some(json!({ "project_id": project_id, "number": 4 })),
        )
        .await;
        assert_eq!(out_of_range["errno"], 400);
        assert_eq!(out_of_range["field"], "number");

        let zero = send(
            &app,
            Method::GET,
            &format!("/api/projects/{}/chapters/0", project_id),
            None,
        )
        .await;
        assert_eq!(zero["errno"], 400);

        let bad_mode = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(json!({ "outline": "x", "chapter_count": 3, "pov_mode": "both" })),
        )
        .await;
        assert_eq!(bad_mode["errno"], 400);
        assert_eq!(bad_mode["field"], "pov_mode");

        let malformed = send(&app, Method::POST, "/api/chapters/save", Some(json!({}))).await;
        assert_eq!(malformed["errno"], 400);

        let empty = send(
            &app,
            Method::POST,
            "/api/chapters/save",
            Some(json!({ "project_id": project_id, "number": 1, "content": "  " })),
        )
        .await;
        assert_eq!(empty["errno"], 400);
        assert_eq!(empty["field"], "content");
    }

    #[tokio::test]
    async fn test_stale_revision_is_conflict() {
        let app = app();
        let project_id = create_dual_project(&app).await;
        let save = |expected: u32| {
            json!({
                "project_id": project_id,
                "number": 3,
                "content": "text",
                "expected_revision": expected
            })
        };

        let first = send(&app, Method::POST, "/api/chapters/save", Some(save(0))).await;
        assert_eq!(first["data"]["revision"], 1);

        let stale = send(&app, Method::POST, "/api/chapters/save", Some(save(0))).await;
        assert_eq!(stale["errno"], 409);
    }

    #[tokio::test]
    async fn test_update_and_delete_project() {
        let app = app();
        let project_id = create_dual_project(&app).await;
        let uri = format!("/api/projects/{}", project_id);

        let renamed = send(&app, Method::PUT, &uri, Some(json!({ "title": "Silver" }))).await;
        assert_eq!(renamed["data"]["title"], "Silver");

        let listed = send(&app, Method::GET, "/api/projects", None).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        let deleted = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(deleted["errno"], 0);

        let chapters = send(&app, Method::GET, &format!("{}/chapters", uri), None).await;
        assert_eq!(chapters["errno"], 404);

        let missing = send(&app, Method::GET, &uri, None).await;
        assert_eq!(missing["errno"], 404);
    }

    #[tokio::test]
    async fn test_download_manuscript() {
        let app = app();
        let project_id = create_dual_project(&app).await;
        send(
            &app,
            Method::POST,
            "/api/chapters/save",
            Some(json!({ "project_id": project_id, "number": 1, "title": "One", "content": "Hello there." })),
        )
        .await;

        let request = Request::builder()
            .uri(format!("/api/projects/{}/export/download", project_id))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Moon_Pact.md\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Chapter 1: One\n\nHello there.\n");
    }

    #[tokio::test]
    async fn test_download_with_unicode_title() {
        let app = app();
        let created = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(json!({ "title": "月光 契约", "outline": "Ava is rejected.", "chapter_count": 1 })),
        )
        .await;
        let project_id = created["data"]["id"].as_str().unwrap().to_string();
        send(
            &app,
            Method::POST,
            "/api/chapters/save",
            Some(json!({ "project_id": project_id, "number": 1, "content": "Hello there." })),
        )
        .await;

        let request = Request::builder()
            .uri(format!("/api/projects/{}/export/download", project_id))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert_eq!(
            disposition,
            "attachment; filename=\"manuscript.md\"; \
             filename*=UTF-8''%E6%9C%88%E5%85%89_%E5%A5%91%E7%BA%A6.md"
        );
    }
}
