//! Manuscript HTTP Handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ExportManuscript;
use crate::domain::{export_filename, ManuscriptExport};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 导出文稿（JSON 信封）
pub async fn export_manuscript(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<ManuscriptExport>>, ApiError> {
    let Path(project_id) = path?;
    let export = state
        .export_manuscript_handler
        .handle(ExportManuscript { project_id })
        .await?;
    Ok(Json(ApiResponse::success(export)))
}

/// 下载文稿（text/markdown 附件）
pub async fn download_manuscript(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(project_id) = path?;
    let export = state
        .export_manuscript_handler
        .handle(ExportManuscript { project_id })
        .await?;

    let disposition = content_disposition(&export.filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

/// RFC 6266 附件头：ASCII `filename` 兜底，原始文件名放在 `filename*`
///
/// 导出文件名可能含非 ASCII 字母（如中文标题），不能直接写进头部
fn content_disposition(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let ascii_stem: String = stem
        .chars()
        .map(|c| if c.is_ascii() { c } else { ' ' })
        .collect();
    let fallback = export_filename(Some(&ascii_stem));

    if fallback == filename {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            percent_encode(filename)
        )
    }
}

/// RFC 5987 attr-char 之外的字节一律 %XX
fn percent_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|'
            | b'~' => encoded.push(byte as char),
            other => encoded.push_str(&format!("%{:02X}", other)),
        }
    }
    encoded
}
