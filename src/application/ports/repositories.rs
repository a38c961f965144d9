//! Repository Ports - 出站端口
//!
//! 定义项目/章节持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite、内存）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::project::{Chapter, ChapterStatus, Genre, Pov, PovMode, Project, ProjectId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 项目不存在（章节也以项目 id 定位）
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    /// 并发写冲突（乐观版本检查失败）
    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Records
// ============================================================================

/// 项目实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub title: Option<String>,
    pub outline: String,
    pub chapter_count: u32,
    pub pov_mode: PovMode,
    pub genre: Genre,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id().as_uuid(),
            title: project.title().map(str::to_string),
            outline: project.outline().to_string(),
            chapter_count: project.chapter_count(),
            pov_mode: project.pov_mode(),
            genre: project.genre(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Project::restore(
            ProjectId::from_uuid(record.id),
            record.title,
            record.outline,
            record.chapter_count,
            record.pov_mode,
            record.genre,
            record.created_at,
            record.updated_at,
        )
    }
}

/// 章节实体（用于持久化），主键 (project_id, number)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRecord {
    pub project_id: Uuid,
    pub number: u32,
    pub title: String,
    pub content: Option<String>,
    pub pov_used: Option<Pov>,
    pub status: ChapterStatus,
    pub word_count: usize,
    pub revision: u32,
    pub updated_at: DateTime<Utc>,
}

impl ChapterRecord {
    pub fn from_chapter(project_id: Uuid, chapter: &Chapter, updated_at: DateTime<Utc>) -> Self {
        Self {
            project_id,
            number: chapter.number(),
            title: chapter.title().to_string(),
            content: chapter.content().map(str::to_string),
            pov_used: chapter.pov_used(),
            status: chapter.status(),
            word_count: chapter.word_count(),
            revision: chapter.revision(),
            updated_at,
        }
    }
}

impl From<ChapterRecord> for Chapter {
    fn from(record: ChapterRecord) -> Self {
        Chapter::restore(
            record.number,
            record.title,
            record.content,
            record.pov_used,
            record.word_count,
            record.revision,
        )
    }
}

// ============================================================================
// Project Repository
// ============================================================================

/// Project Repository Port
///
/// 存储协作方负责串行化同一 (project_id, number) 的并发写入
#[async_trait]
pub trait ProjectRepositoryPort: Send + Sync {
    /// 创建项目及其全部空章节（原子操作）
    async fn create(
        &self,
        project: &ProjectRecord,
        chapters: &[ChapterRecord],
    ) -> Result<(), RepositoryError>;

    /// 根据 ID 查找项目
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepositoryError>;

    /// 获取所有项目（按创建时间倒序）
    async fn find_all(&self) -> Result<Vec<ProjectRecord>, RepositoryError>;

    /// 更新项目可变字段（标题）
    async fn update(&self, project: &ProjectRecord) -> Result<(), RepositoryError>;

    /// 删除项目并级联删除章节
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// 获取项目的所有章节（按章节号升序）
    async fn find_chapters(&self, project_id: Uuid) -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 获取指定章节
    async fn find_chapter(
        &self,
        project_id: Uuid,
        number: u32,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 覆盖保存章节，返回写入后的版本号（存储中的版本 + 1）
    ///
    /// `expected_revision` 存在且与当前版本不一致时返回 `Conflict`，
    /// 不存在时为 last-write-wins
    async fn save_chapter(
        &self,
        chapter: &ChapterRecord,
        expected_revision: Option<u32>,
    ) -> Result<u32, RepositoryError>;
}
