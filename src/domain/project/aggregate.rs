//! Project Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Chapter, ChapterDraft, Genre, Pov, PovMode, ProjectError, ProjectId};
use crate::domain::outline_segmenter::{outline_excerpt, suggest_title};
use crate::domain::pov_resolver::resolve_pov;
use crate::domain::prompt_assembler::{assemble, GenerationPlan, PromptContext};
use crate::domain::word_count::WordRange;

/// 章节数下限
pub const MIN_CHAPTERS: u32 = 3;

/// 章节数上限
pub const MAX_CHAPTERS: u32 = 6;

/// 项目标题最大长度
pub const MAX_TITLE_CHARS: usize = 200;

/// Project 聚合根
///
/// 不变量:
/// - outline、chapter_count、pov_mode、genre 创建后不可修改
/// - 创建时 chapter_count ∈ [3, 6]
/// - 有效章节号范围为 [1, chapter_count]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    title: Option<String>,
    outline: String,
    chapter_count: u32,
    pov_mode: PovMode,
    genre: Genre,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// 规范化标题：去空白，空串视为无标题
fn normalize_title(title: Option<&str>) -> Result<Option<String>, ProjectError> {
    match title.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) if t.chars().count() > MAX_TITLE_CHARS => {
            Err(ProjectError::InvalidTitle(MAX_TITLE_CHARS))
        }
        Some(t) => Ok(Some(t.to_string())),
    }
}

impl Project {
    /// 创建新项目
    pub fn create(
        title: Option<&str>,
        outline: &str,
        chapter_count: i64,
        pov_mode: PovMode,
        genre: Genre,
    ) -> Result<Self, ProjectError> {
        let title = normalize_title(title)?;

        if outline.trim().is_empty() {
            return Err(ProjectError::EmptyOutline);
        }

        let chapter_count = u32::try_from(chapter_count)
            .ok()
            .filter(|c| (MIN_CHAPTERS..=MAX_CHAPTERS).contains(c))
            .ok_or(ProjectError::InvalidChapterCount {
                count: chapter_count,
                min: MIN_CHAPTERS,
                max: MAX_CHAPTERS,
            })?;

        let now = Utc::now();
        Ok(Self {
            id: ProjectId::new(),
            title,
            outline: outline.to_string(),
            chapter_count,
            pov_mode,
            genre,
            created_at: now,
            updated_at: now,
        })
    }

    /// 从持久化数据恢复
    ///
    /// 章节数区间只在创建时校验
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ProjectId,
        title: Option<String>,
        outline: String,
        chapter_count: u32,
        pov_mode: PovMode,
        genre: Genre,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            outline,
            chapter_count,
            pov_mode,
            genre,
            created_at,
            updated_at,
        }
    }

    /// 修改标题（唯一可变字段）
    pub fn rename(&mut self, title: Option<&str>) -> Result<(), ProjectError> {
        self.title = normalize_title(title)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 校验章节号
    pub fn chapter_number(&self, number: i64) -> Result<u32, ProjectError> {
        if number <= 0 {
            return Err(ProjectError::InvalidChapterNumber(number));
        }
        match u32::try_from(number) {
            Ok(n) if n <= self.chapter_count => Ok(n),
            _ => Err(ProjectError::ChapterNumberOutOfRange {
                number: u32::try_from(number).unwrap_or(u32::MAX),
                chapter_count: self.chapter_count,
            }),
        }
    }

    /// 按项目策略解析章节视角
    pub fn resolve_pov(&self, number: u32, override_pov: Option<Pov>) -> Result<Pov, ProjectError> {
        resolve_pov(self.pov_mode, number, override_pov)
    }

    /// 章节的建议标题
    pub fn suggested_title(&self, number: u32) -> String {
        suggest_title(&outline_excerpt(&self.outline, number, self.chapter_count))
    }

    /// 为章节生成计划
    pub fn plan_chapter(
        &self,
        number: i64,
        override_pov: Option<Pov>,
        word_range: WordRange,
    ) -> Result<GenerationPlan, ProjectError> {
        let number = self.chapter_number(number)?;
        let resolved_pov = self.resolve_pov(number, override_pov)?;

        Ok(assemble(&PromptContext {
            outline: &self.outline,
            genre: self.genre,
            chapter_number: number,
            chapter_count: self.chapter_count,
            resolved_pov,
            word_range,
        }))
    }

    /// 构建待保存章节，补齐缺省的标题和视角
    pub fn draft_chapter(
        &self,
        number: i64,
        title: Option<&str>,
        content: String,
        pov_used: Option<Pov>,
    ) -> Result<ChapterDraft, ProjectError> {
        let number = self.chapter_number(number)?;
        let pov_used = self.resolve_pov(number, pov_used)?;
        let title = match title.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => self.suggested_title(number),
        };

        Ok(ChapterDraft {
            number,
            title,
            content,
            pov_used,
        })
    }

    /// 项目创建时的全部空章节
    pub fn empty_chapters(&self) -> Vec<Chapter> {
        (1..=self.chapter_count).map(Chapter::empty).collect()
    }

    // Getters
    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn outline(&self) -> &str {
        &self.outline
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    pub fn pov_mode(&self) -> PovMode {
        self.pov_mode
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(mode: PovMode) -> Project {
        Project::create(
            Some("Broken Vows"),
            "Ava returns home.\n\nRowan waits.\n\nThey marry.",
            3,
            mode,
            Genre::Billionaire,
        )
        .unwrap()
    }

    #[test]
    fn test_project_creation() {
        let project = project(PovMode::Dual);
        assert_eq!(project.title(), Some("Broken Vows"));
        assert_eq!(project.chapter_count(), 3);
        assert_eq!(project.empty_chapters().len(), 3);
        assert!(project.empty_chapters().iter().all(|c| !c.is_saved()));
    }

    #[test]
    fn test_chapter_count_must_be_three_to_six() {
        for count in [0, 2, 7, -1] {
            let err = Project::create(None, "outline", count, PovMode::Female, Genre::General)
                .unwrap_err();
            assert!(matches!(err, ProjectError::InvalidChapterCount { .. }));
        }
        for count in 3..=6 {
            assert!(Project::create(None, "outline", count, PovMode::Female, Genre::General).is_ok());
        }
    }

    #[test]
    fn test_outline_required() {
        let err = Project::create(None, "  \n ", 3, PovMode::Female, Genre::General).unwrap_err();
        assert_eq!(err, ProjectError::EmptyOutline);
    }

    #[test]
    fn test_blank_title_becomes_none() {
        let mut project = project(PovMode::Female);
        project.rename(Some("   ")).unwrap();
        assert_eq!(project.title(), None);
        project.rename(Some(" New ")).unwrap();
        assert_eq!(project.title(), Some("New"));
        assert!(project.rename(Some(&"x".repeat(201))).is_err());
    }

    #[test]
    fn test_chapter_number_validation() {
        let project = project(PovMode::Female);
        assert_eq!(project.chapter_number(3), Ok(3));
        assert_eq!(
            project.chapter_number(0),
            Err(ProjectError::InvalidChapterNumber(0))
        );
        assert_eq!(
            project.chapter_number(4),
            Err(ProjectError::ChapterNumberOutOfRange {
                number: 4,
                chapter_count: 3
            })
        );
    }

    #[test]
    fn test_plan_chapter_alternates_under_dual() {
        let project = project(PovMode::Dual);
        let first = project.plan_chapter(1, None, WordRange::default()).unwrap();
        let second = project.plan_chapter(2, None, WordRange::default()).unwrap();
        assert_eq!(first.resolved_pov, Pov::Female);
        assert_eq!(second.resolved_pov, Pov::Male);
        assert_eq!(second.chapter_title, "Rowan waits");
        assert!(project.plan_chapter(4, None, WordRange::default()).is_err());
    }

    #[test]
    fn test_draft_fills_defaults() {
        let project = project(PovMode::Dual);
        let draft = project
            .draft_chapter(2, Some("  "), "text".to_string(), None)
            .unwrap();
        assert_eq!(draft.title, "Rowan waits");
        assert_eq!(draft.pov_used, Pov::Male);

        let draft = project
            .draft_chapter(2, Some("Mine"), "text".to_string(), Some(Pov::Female))
            .unwrap();
        assert_eq!(draft.title, "Mine");
        assert_eq!(draft.pov_used, Pov::Female);
    }
}
