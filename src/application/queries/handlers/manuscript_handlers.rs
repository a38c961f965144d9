//! Manuscript Query Handlers

use std::sync::Arc;

use super::project_handlers::require_project;
use crate::application::error::ApplicationError;
use crate::application::ports::ProjectRepositoryPort;
use crate::application::queries::ExportManuscript;
use crate::domain::project::Chapter;
use crate::domain::{assemble_manuscript, ManuscriptExport};

/// ExportManuscript Handler
///
/// 未保存的章节被跳过；需要完整性的调用方应先检查章节状态
pub struct ExportManuscriptHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl ExportManuscriptHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, query: ExportManuscript) -> Result<ManuscriptExport, ApplicationError> {
        let project = require_project(self.project_repo.as_ref(), query.project_id).await?;

        let chapters: Vec<Chapter> = self
            .project_repo
            .find_chapters(query.project_id)
            .await?
            .into_iter()
            .map(Chapter::from)
            .collect();

        let export = assemble_manuscript(project.title.as_deref(), &chapters);

        tracing::info!(
            project_id = %query.project_id,
            filename = %export.filename,
            chapters = export.included_chapters.len(),
            "Manuscript exported"
        );

        Ok(export)
    }
}
