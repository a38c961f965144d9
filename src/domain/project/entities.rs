//! Project Context - Entities

use serde::{Deserialize, Serialize};

use super::{ChapterStatus, Pov, ProjectError};
use crate::domain::word_count::{WordCountAssessment, WordCountRules};

/// 待保存的章节内容（默认值已由 Project 补齐）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterDraft {
    pub number: u32,
    pub title: String,
    pub content: String,
    pub pov_used: Pov,
}

/// 章节实体
///
/// 不变量:
/// - (project, number) 唯一，number 在 [1, chapter_count] 内
/// - status = Saved 当且仅当 content 存在
/// - word_count 总是由 content 计算得到
/// - pov_used 在保存时记录，之后不重新计算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    number: u32,
    title: String,
    content: Option<String>,
    pov_used: Option<Pov>,
    word_count: usize,
    status: ChapterStatus,
    /// 每次保存 +1，用于乐观并发检查
    revision: u32,
}

impl Chapter {
    /// 项目创建时隐式存在的空章节
    pub fn empty(number: u32) -> Self {
        Self {
            number,
            title: String::new(),
            content: None,
            pov_used: None,
            word_count: 0,
            status: ChapterStatus::Empty,
            revision: 0,
        }
    }

    /// 从持久化数据恢复
    pub fn restore(
        number: u32,
        title: String,
        content: Option<String>,
        pov_used: Option<Pov>,
        word_count: usize,
        revision: u32,
    ) -> Self {
        let status = if content.is_some() {
            ChapterStatus::Saved
        } else {
            ChapterStatus::Empty
        };
        Self {
            number,
            title,
            content,
            pov_used,
            word_count,
            status,
            revision,
        }
    }

    /// 保存（或覆盖）章节内容
    ///
    /// 校验失败时不修改任何状态
    pub fn save(
        &mut self,
        draft: ChapterDraft,
        rules: &WordCountRules,
    ) -> Result<WordCountAssessment, ProjectError> {
        if draft.number != self.number {
            return Err(ProjectError::InvalidChapterNumber(i64::from(draft.number)));
        }

        let assessment = rules.assess(&draft.content)?;

        self.title = draft.title;
        self.content = Some(draft.content);
        self.pov_used = Some(draft.pov_used);
        self.word_count = assessment.word_count;
        self.status = ChapterStatus::Saved;
        self.revision += 1;

        Ok(assessment)
    }

    // Getters
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn pov_used(&self) -> Option<Pov> {
        self.pov_used
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn status(&self) -> ChapterStatus {
        self.status
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn is_saved(&self) -> bool {
        self.status == ChapterStatus::Saved
    }
}
