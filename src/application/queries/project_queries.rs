//! Project Queries

use uuid::Uuid;

/// 获取项目详情查询（含章节概要）
#[derive(Debug, Clone)]
pub struct GetProject {
    pub project_id: Uuid,
}

/// 列出所有项目查询
#[derive(Debug, Clone)]
pub struct ListProjects;
