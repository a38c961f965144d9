//! Manuscript Queries

use uuid::Uuid;

/// 导出文稿查询
#[derive(Debug, Clone)]
pub struct ExportManuscript {
    pub project_id: Uuid,
}
