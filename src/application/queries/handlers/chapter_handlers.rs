//! Chapter Query Handlers

use serde::Serialize;
use std::sync::Arc;

use super::project_handlers::{require_project, ChapterSummary};
use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRecord, ProjectRepositoryPort};
use crate::application::queries::{GetChapter, ListChapters, PrepareChapter};
use crate::domain::project::{Chapter, Project};
use crate::domain::{GenerationPlan, WordRange};

/// 章节详情响应（含正文）
#[derive(Debug, Clone, Serialize)]
pub struct ChapterDetailResponse {
    #[serde(flatten)]
    pub summary: ChapterSummary,
    pub content: Option<String>,
    pub updated_at: String,
}

impl From<ChapterRecord> for ChapterDetailResponse {
    fn from(record: ChapterRecord) -> Self {
        Self {
            summary: ChapterSummary::from(&record),
            updated_at: record.updated_at.to_rfc3339(),
            content: record.content,
        }
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl ListChaptersHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, query: ListChapters) -> Result<Vec<ChapterSummary>, ApplicationError> {
        // 项目已删除时返回 NotFound，而不是空列表
        require_project(self.project_repo.as_ref(), query.project_id).await?;

        let chapters = self.project_repo.find_chapters(query.project_id).await?;
        Ok(chapters.iter().map(ChapterSummary::from).collect())
    }
}

/// GetChapter Handler
pub struct GetChapterHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
}

impl GetChapterHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>) -> Self {
        Self { project_repo }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<ChapterDetailResponse, ApplicationError> {
        let project: Project = require_project(self.project_repo.as_ref(), query.project_id)
            .await?
            .into();
        let number = project.chapter_number(query.number)?;

        let record = match self
            .project_repo
            .find_chapter(query.project_id, number)
            .await?
        {
            Some(record) => record,
            // 章节行缺失时按空章节处理
            None => ChapterRecord::from_chapter(
                query.project_id,
                &Chapter::empty(number),
                project.created_at(),
            ),
        };

        Ok(ChapterDetailResponse::from(record))
    }
}

/// PrepareChapter Handler
///
/// 只计算生成计划，不调用生成后端也不写入存储
pub struct PrepareChapterHandler {
    project_repo: Arc<dyn ProjectRepositoryPort>,
    word_range: WordRange,
}

impl PrepareChapterHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepositoryPort>, word_range: WordRange) -> Self {
        Self {
            project_repo,
            word_range,
        }
    }

    pub async fn handle(&self, query: PrepareChapter) -> Result<GenerationPlan, ApplicationError> {
        let project: Project = require_project(self.project_repo.as_ref(), query.project_id)
            .await?
            .into();

        let plan = project.plan_chapter(query.number, query.override_pov, self.word_range)?;

        tracing::debug!(
            project_id = %query.project_id,
            number = plan.chapter_number,
            pov = %plan.resolved_pov,
            "Chapter plan prepared"
        );

        Ok(plan)
    }
}
