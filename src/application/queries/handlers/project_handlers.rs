//! Project Query Handlers

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRecord, ProjectRecord, ProjectRepositoryPort};
use crate::application::queries::{GetProject, ListProjects};
use crate::domain::project::{ChapterStatus, Genre, Pov, PovMode};

// ============================================================================
// Response DTOs
// ============================================================================

/// 项目概要响应
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: Option<String>,
    pub outline: String,
    pub chapter_count: u32,
    pub pov_mode: PovMode,
    pub genre: Genre,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProjectRecord> for ProjectResponse {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            outline: record.outline,
            chapter_count: record.chapter_count,
            pov_mode: record.pov_mode,
            genre: record.genre,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// 章节概要
#[derive(Debug, Clone, Serialize)]
pub struct ChapterSummary {
    pub number: u32,
    pub title: String,
    pub status: ChapterStatus,
    pub pov_used: Option<Pov>,
    pub word_count: usize,
    pub revision: u32,
}

impl From<&ChapterRecord> for ChapterSummary {
    fn from(record: &ChapterRecord) -> Self {
        Self {
            number: record.number,
            title: record.title.clone(),
            status: record.status,
            pov_used: record.pov_used,
            word_count: record.word_count,
            revision: record.revision,
        }
    }
}

/// 项目详情响应（项目 + 全部章节概要）
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub chapters: Vec<ChapterSummary>,
}

impl ProjectDetailResponse {
    pub fn new(project: ProjectRecord, chapters: &[ChapterRecord]) -> Self {
        Self {
            project: ProjectResponse::from(project),
            chapters: chapters.iter().map(ChapterSummary::from).collect(),
        }
    }
}

/// 加载项目，不存在时返回 NotFound
pub(crate) async fn require_project(
    repo: &dyn ProjectRepositoryPort,
    project_id: Uuid,
) -> Result<ProjectRecord, ApplicationError> {
    repo.find_by_id(project_id)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Project", project_id))
}

// ============================================================================
// Handlers
// ============================================================================

/// GetProject Handler
pub struct GetProjectHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl GetProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, query: GetProject) -> Result<ProjectDetailResponse, ApplicationError> {
        let project = require_project(self.project_repo.as_ref(), query.project_id).await?;
        let chapters = self.project_repo.find_chapters(query.project_id).await?;

        Ok(ProjectDetailResponse::new(project, &chapters))
    }
}

/// ListProjects Handler
pub struct ListProjectsHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl ListProjectsHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, _query: ListProjects) -> Result<Vec<ProjectResponse>, ApplicationError> {
        let projects = self.project_repo.find_all().await?;
        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::CreateProjectHandler;
    use crate::application::commands::CreateProject;
    use crate::infrastructure::memory::InMemoryProjectRepository;

    fn create_command(title: &str) -> CreateProject {
        CreateProject {
            title: Some(title.to_string()),
            outline: "Beginning\nMiddle\nEnd".to_string(),
            chapter_count: 3,
            pov_mode: PovMode::Female,
            genre: Genre::General,
        }
    }

    #[tokio::test]
    async fn test_get_project_includes_empty_chapters() {
        let repo: Arc<dyn ProjectRepositoryPort> = Arc::new(InMemoryProjectRepository::new());
        let created = CreateProjectHandler::new(repo.clone())
            .handle(create_command("Draft"))
            .await
            .unwrap();

        let detail = GetProjectHandler::new(repo)
            .handle(GetProject {
                project_id: created.project.id,
            })
            .await
            .unwrap();

        assert_eq!(detail.project.title.as_deref(), Some("Draft"));
        let numbers: Vec<u32> = detail.chapters.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(detail
            .chapters
            .iter()
            .all(|c| c.status == ChapterStatus::Empty && c.word_count == 0));
    }

    #[tokio::test]
    async fn test_get_unknown_project_is_not_found() {
        let repo: Arc<dyn ProjectRepositoryPort> = Arc::new(InMemoryProjectRepository::new());
        let err = GetProjectHandler::new(repo)
            .handle(GetProject {
                project_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_projects() {
        let repo: Arc<dyn ProjectRepositoryPort> = Arc::new(InMemoryProjectRepository::new());
        let create = CreateProjectHandler::new(repo.clone());
        create.handle(create_command("One")).await.unwrap();
        create.handle(create_command("Two")).await.unwrap();

        let projects = ListProjectsHandler::new(repo).handle(ListProjects).await.unwrap();
        assert_eq!(projects.len(), 2);
    }
}
