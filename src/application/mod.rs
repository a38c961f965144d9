//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ProjectRepository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Project commands
    CreateProject,
    DeleteProject,
    UpdateProject,
    // Chapter commands
    SaveChapter,
    // Handlers
    handlers::{
        CreateProjectHandler, DeleteProjectHandler, SaveChapterHandler, SaveChapterResponse,
        UpdateProjectHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{ChapterRecord, ProjectRecord, ProjectRepositoryPort, RepositoryError};

pub use queries::{
    // Project queries
    GetProject,
    ListProjects,
    // Chapter queries
    GetChapter,
    ListChapters,
    PrepareChapter,
    // Manuscript queries
    ExportManuscript,
    // Handlers
    handlers::{
        ChapterDetailResponse, ChapterSummary, ExportManuscriptHandler, GetChapterHandler,
        GetProjectHandler, ListChaptersHandler, ListProjectsHandler, PrepareChapterHandler,
        ProjectDetailResponse, ProjectResponse,
    },
};
