//! Project HTTP Handlers

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
    CreateProject, DeleteProject, GetProject, ListProjects, ProjectDetailResponse,
    ProjectResponse, UpdateProject,
};
use crate::domain::project::{Genre, PovMode};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub outline: String,
    pub chapter_count: i64,
    /// 缺省为 female
    #[serde(default)]
    pub pov_mode: Option<String>,
    /// 缺省为 general
    #[serde(default)]
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    /// 缺省表示不修改，空白字符串表示清除
    #[serde(default)]
    pub title: Option<String>,
}

/// 解析可选枚举字段，空白视为缺省
fn parse_or_default<T>(value: Option<&str>) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = crate::domain::project::ProjectError> + Default,
{
    match value.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(s) => Ok(s.parse()?),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建项目
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProjectDetailResponse>>, ApiError> {
    let Json(req) = payload?;

    let cmd = CreateProject {
        title: req.title,
        outline: req.outline,
        chapter_count: req.chapter_count,
        pov_mode: parse_or_default::<PovMode>(req.pov_mode.as_deref())?,
        genre: parse_or_default::<Genre>(req.genre.as_deref())?,
    };

    let project = state.create_project_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(project)))
}

/// 列出所有项目
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, ApiError> {
    let projects = state.list_projects_handler.handle(ListProjects).await?;
    Ok(Json(ApiResponse::success(projects)))
}

/// 获取项目详情（含章节概要）
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<ProjectDetailResponse>>, ApiError> {
    let Path(project_id) = path?;
    let project = state
        .get_project_handler
        .handle(GetProject { project_id })
        .await?;
    Ok(Json(ApiResponse::success(project)))
}

/// 修改项目标题
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProjectDetailResponse>>, ApiError> {
    let Path(project_id) = path?;
    let Json(req) = payload?;

    let project = state
        .update_project_handler
        .handle(UpdateProject {
            project_id,
            title: req.title,
        })
        .await?;
    Ok(Json(ApiResponse::success(project)))
}

/// 删除项目及其全部章节
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(project_id) = path?;
    state
        .delete_project_handler
        .handle(DeleteProject { project_id })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
