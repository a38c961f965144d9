//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateProjectHandler, DeleteProjectHandler, SaveChapterHandler, UpdateProjectHandler,
    // Query handlers
    ExportManuscriptHandler, GetChapterHandler, GetProjectHandler, ListChaptersHandler,
    ListProjectsHandler, PrepareChapterHandler,
    // Ports
    ProjectRepositoryPort,
};
use crate::domain::WordCountRules;

/// 应用状态
///
/// 存储后端由启动配置选择（SQLite 或内存），处理器只依赖端口
pub struct AppState {
    // ========== Ports ==========
    pub project_repo: Arc<dyn ProjectRepositoryPort>,

    // ========== Command Handlers ==========
    pub create_project_handler: CreateProjectHandler,
    pub update_project_handler: UpdateProjectHandler,
    pub delete_project_handler: DeleteProjectHandler,
    pub save_chapter_handler: SaveChapterHandler,

    // ========== Query Handlers ==========
    pub get_project_handler: GetProjectHandler,
    pub list_projects_handler: ListProjectsHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub get_chapter_handler: GetChapterHandler,
    pub prepare_chapter_handler: PrepareChapterHandler,
    pub export_manuscript_handler: ExportManuscriptHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>, rules: WordCountRules) -> Self {
        Self {
            // Ports
            project_repo: project_repo.clone(),

            // Command handlers
            create_project_handler: CreateProjectHandler::new(project_repo.clone()),
            update_project_handler: UpdateProjectHandler::new(project_repo.clone()),
            delete_project_handler: DeleteProjectHandler::new(project_repo.clone()),
            save_chapter_handler: SaveChapterHandler::new(project_repo.clone(), rules),

            // Query handlers
            get_project_handler: GetProjectHandler::new(project_repo.clone()),
            list_projects_handler: ListProjectsHandler::new(project_repo.clone()),
            list_chapters_handler: ListChaptersHandler::new(project_repo.clone()),
            get_chapter_handler: GetChapterHandler::new(project_repo.clone()),
            prepare_chapter_handler: PrepareChapterHandler::new(project_repo.clone(), rules.range),
            export_manuscript_handler: ExportManuscriptHandler::new(project_repo),
        }
    }
}
