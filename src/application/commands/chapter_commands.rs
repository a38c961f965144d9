//! Chapter Commands

use uuid::Uuid;

use crate::domain::project::Pov;

/// 保存（覆盖）章节命令
#[derive(Debug, Clone)]
pub struct SaveChapter {
    pub project_id: Uuid,
    pub number: i64,
    /// 缺省时使用大纲推导的建议标题
    pub title: Option<String>,
    pub content: String,
    /// 缺省时使用项目视角策略解析的结果
    pub pov_used: Option<Pov>,
    /// 调用方读取到的版本号，缺省为 last-write-wins
    pub expected_revision: Option<u32>,
}
