//! Project Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateProject, DeleteProject, UpdateProject};
use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRecord, ProjectRecord, ProjectRepositoryPort};
use crate::application::queries::handlers::ProjectDetailResponse;
use crate::domain::project::Project;

// ============================================================================
// CreateProject
// ============================================================================

/// CreateProject Handler - 创建项目并初始化全部空章节
pub struct CreateProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl CreateProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, command: CreateProject) -> Result<ProjectDetailResponse, ApplicationError> {
        let project = Project::create(
            command.title.as_deref(),
            &command.outline,
            command.chapter_count,
            command.pov_mode,
            command.genre,
        )?;

        let project_id = *project.id().as_uuid();
        let record = ProjectRecord::from(&project);
        let chapters: Vec<ChapterRecord> = project
            .empty_chapters()
            .iter()
            .map(|chapter| ChapterRecord::from_chapter(project_id, chapter, project.created_at()))
            .collect();

        self.project_repo.create(&record, &chapters).await?;

        tracing::info!(
            project_id = %project_id,
            chapter_count = project.chapter_count(),
            pov_mode = %project.pov_mode(),
            genre = %project.genre(),
            "Project created"
        );

        Ok(ProjectDetailResponse::new(record, &chapters))
    }
}

// ============================================================================
// UpdateProject
// ============================================================================

/// UpdateProject Handler - 只允许修改标题
pub struct UpdateProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl UpdateProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, command: UpdateProject) -> Result<ProjectDetailResponse, ApplicationError> {
        let record = self
            .project_repo
            .find_by_id(command.project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", command.project_id))?;

        let record = match command.title {
            Some(title) => {
                let mut project = Project::from(record);
                project.rename(Some(&title))?;

                let updated = ProjectRecord::from(&project);
                self.project_repo.update(&updated).await?;

                tracing::info!(
                    project_id = %command.project_id,
                    title = ?updated.title,
                    "Project renamed"
                );
                updated
            }
            None => record,
        };

        let chapters = self.project_repo.find_chapters(command.project_id).await?;
        Ok(ProjectDetailResponse::new(record, &chapters))
    }
}

// ============================================================================
// DeleteProject
// ============================================================================

/// DeleteProject Handler - 删除项目及其全部章节
pub struct DeleteProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl DeleteProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, command: DeleteProject) -> Result<(), ApplicationError> {
        let project_id = command.project_id;

        if self.project_repo.find_by_id(project_id).await?.is_none() {
            return Err(ApplicationError::not_found("Project", project_id));
        }

        self.project_repo.delete(project_id).await?;

        tracing::info!(project_id = %project_id, "Project deleted");

        Ok(())
    }
}
