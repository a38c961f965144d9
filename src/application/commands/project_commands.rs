//! Project Commands

use uuid::Uuid;

use crate::domain::project::{Genre, PovMode};

/// 创建项目命令
///
/// `chapter_count` 保留原始有符号值，由领域层做区间校验
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: Option<String>,
    pub outline: String,
    pub chapter_count: i64,
    pub pov_mode: PovMode,
    pub genre: Genre,
}

/// 修改项目标题命令
///
/// `None` 表示不修改；空白字符串表示清除标题
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub project_id: Uuid,
    pub title: Option<String>,
}

/// 删除项目命令
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: Uuid,
}
