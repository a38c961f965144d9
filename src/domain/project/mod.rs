//! Project Context - 写作项目限界上下文
//!
//! 职责:
//! - Project 聚合（大纲、章节数、视角策略、题材）
//! - Chapter 实体生命周期（empty -> saved）

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::{Project, MAX_CHAPTERS, MAX_TITLE_CHARS, MIN_CHAPTERS};
pub use entities::{Chapter, ChapterDraft};
pub use errors::ProjectError;
pub use value_objects::{ChapterStatus, Genre, Pov, PovMode, ProjectId};
