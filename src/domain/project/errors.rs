//! Project Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("invalid pov mode: {0} (expected female, male or dual)")]
    InvalidPovMode(String),

    #[error("invalid pov: {0} (expected female or male)")]
    InvalidPov(String),

    #[error("invalid genre: {0} (expected general, billionaire, werewolf or mafia)")]
    InvalidGenre(String),

    #[error("invalid chapter status: {0}")]
    InvalidStatus(String),

    #[error("invalid chapter number: {0} (must be a positive integer)")]
    InvalidChapterNumber(i64),

    #[error("chapter number {number} out of range [1, {chapter_count}]")]
    ChapterNumberOutOfRange { number: u32, chapter_count: u32 },

    #[error("invalid chapter count: {count} (must be between {min} and {max})")]
    InvalidChapterCount { count: i64, min: u32, max: u32 },

    #[error("title too long (max {0} characters)")]
    InvalidTitle(usize),

    #[error("outline cannot be empty")]
    EmptyOutline,

    #[error("chapter content cannot be empty")]
    EmptyContent,

    #[error("word count {word_count} outside required range [{min}, {max}]")]
    WordCountOutOfRange { word_count: usize, min: usize, max: usize },
}

impl ProjectError {
    /// 出错的字段名，供调用方重新渲染表单
    pub fn field(&self) -> &'static str {
        match self {
            ProjectError::InvalidPovMode(_) => "pov_mode",
            ProjectError::InvalidPov(_) => "pov",
            ProjectError::InvalidGenre(_) => "genre",
            ProjectError::InvalidStatus(_) => "status",
            ProjectError::InvalidChapterNumber(_) | ProjectError::ChapterNumberOutOfRange { .. } => {
                "number"
            }
            ProjectError::InvalidChapterCount { .. } => "chapter_count",
            ProjectError::InvalidTitle(_) => "title",
            ProjectError::EmptyOutline => "outline",
            ProjectError::EmptyContent | ProjectError::WordCountOutOfRange { .. } => "content",
        }
    }
}
