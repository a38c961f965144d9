//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作。
//! PrepareChapter 也属于查询：生成计划是纯计算结果，不写入任何状态。

mod chapter_queries;
mod manuscript_queries;
mod project_queries;

pub mod handlers;

pub use chapter_queries::*;
pub use manuscript_queries::*;
pub use project_queries::*;
