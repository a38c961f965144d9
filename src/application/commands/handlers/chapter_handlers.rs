//! Chapter Command Handlers

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::SaveChapter;
use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRecord, ProjectRepositoryPort};
use crate::domain::project::{Chapter, Pov, Project};
use crate::domain::WordCountRules;

/// 保存章节响应
#[derive(Debug, Clone, Serialize)]
pub struct SaveChapterResponse {
    pub project_id: Uuid,
    pub number: u32,
    pub title: String,
    pub pov_used: Pov,
    pub word_count: usize,
    pub in_range: bool,
    /// 字数超出推荐区间时的提示（宽松策略下不阻止保存）
    pub warning: Option<String>,
    pub revision: u32,
}

/// SaveChapter Handler - 覆盖保存章节正文
pub struct SaveChapterHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
    rules: WordCountRules,
}

impl SaveChapterHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>, rules: WordCountRules) -> Self {
        Self {
            project_repo,
            rules,
        }
    }

    pub async fn handle(&self, command: SaveChapter) -> Result<SaveChapterResponse, ApplicationError> {
        let project_id = command.project_id;

        let project: Project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Project", project_id))?
            .into();

        let draft = project.draft_chapter(
            command.number,
            command.title.as_deref(),
            command.content,
            command.pov_used,
        )?;
        let number = draft.number;
        let pov_used = draft.pov_used;

        let mut chapter = self
            .project_repo
            .find_chapter(project_id, number)
            .await?
            .map(Chapter::from)
            .unwrap_or_else(|| Chapter::empty(number));

        let assessment = chapter.save(draft, &self.rules)?;

        let record = ChapterRecord::from_chapter(project_id, &chapter, Utc::now());
        let revision = self
            .project_repo
            .save_chapter(&record, command.expected_revision)
            .await?;

        if let Some(warning) = &assessment.warning {
            tracing::warn!(
                project_id = %project_id,
                number = number,
                word_count = assessment.word_count,
                "{}",
                warning
            );
        }

        tracing::info!(
            project_id = %project_id,
            number = number,
            pov_used = %pov_used,
            word_count = assessment.word_count,
            revision = revision,
            "Chapter saved"
        );

        Ok(SaveChapterResponse {
            project_id,
            number,
            title: record.title,
            pov_used,
            word_count: assessment.word_count,
            in_range: assessment.in_range,
            warning: assessment.warning,
            revision,
        })
    }
}
