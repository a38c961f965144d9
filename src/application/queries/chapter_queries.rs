//! Chapter Queries

use uuid::Uuid;

use crate::domain::project::Pov;

/// 列出项目章节查询
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub project_id: Uuid,
}

/// 获取单个章节查询
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub project_id: Uuid,
    pub number: i64,
}

/// 准备章节生成计划查询
#[derive(Debug, Clone)]
pub struct PrepareChapter {
    pub project_id: Uuid,
    pub number: i64,
    pub override_pov: Option<Pov>,
}
