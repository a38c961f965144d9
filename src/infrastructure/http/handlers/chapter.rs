//! Chapter HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    ChapterDetailResponse, ChapterSummary, GetChapter, ListChapters, PrepareChapter, SaveChapter,
    SaveChapterResponse,
};
use crate::domain::project::Pov;
use crate::domain::GenerationPlan;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PrepareChapterRequest {
    pub project_id: Uuid,
    pub number: i64,
    #[serde(default)]
    pub override_pov: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveChapterRequest {
    pub project_id: Uuid,
    pub number: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub pov_used: Option<String>,
    #[serde(default)]
    pub expected_revision: Option<u32>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出项目章节（按章节号升序）
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<ChapterSummary>>>, ApiError> {
    let Path(project_id) = path?;
    let chapters = state
        .list_chapters_handler
        .handle(ListChapters { project_id })
        .await?;
    Ok(Json(ApiResponse::success(chapters)))
}

/// 获取单个章节（含正文）
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(Uuid, i64)>, PathRejection>,
) -> Result<Json<ApiResponse<ChapterDetailResponse>>, ApiError> {
    let Path((project_id, number)) = path?;
    let chapter = state
        .get_chapter_handler
        .handle(GetChapter { project_id, number })
        .await?;
    Ok(Json(ApiResponse::success(chapter)))
}

/// 准备章节生成计划（不写入任何状态）
pub async fn prepare_chapter(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PrepareChapterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<GenerationPlan>>, ApiError> {
    let Json(req) = payload?;

    let query = PrepareChapter {
        project_id: req.project_id,
        number: req.number,
        override_pov: Pov::parse_optional(req.override_pov.as_deref())?,
    };

    let plan = state.prepare_chapter_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(plan)))
}

/// 保存（覆盖）章节
pub async fn save_chapter(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveChapterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SaveChapterResponse>>, ApiError> {
    let Json(req) = payload?;

    let cmd = SaveChapter {
        project_id: req.project_id,
        number: req.number,
        title: req.title,
        content: req.content,
        pov_used: Pov::parse_optional(req.pov_used.as_deref())?,
        expected_revision: req.expected_revision,
    };

    let saved = state.save_chapter_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(saved)))
}
