//! SQLite Project Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{ChapterRecord, ProjectRecord, ProjectRepositoryPort, RepositoryError};
use crate::domain::project::{ChapterStatus, Genre, Pov, PovMode};

const PROJECT_COLUMNS: &str =
    "id, title, outline, chapter_count, pov_mode, genre, created_at, updated_at";

const CHAPTER_COLUMNS: &str =
    "project_id, number, title, content, pov_used, status, word_count, revision, updated_at";

/// SQLite Project Repository
pub struct SqliteProjectRepository {
    pool: DbPool,
}

impl SqliteProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn project_exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let found: Option<(String,)> = sqlx::query_as("SELECT id FROM projects WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(found.is_some())
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

fn serialization_error(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::SerializationError(e.to_string())
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(serialization_error)
}

#[derive(FromRow)]
struct ProjectRow {
    id: String,
    title: Option<String>,
    outline: String,
    chapter_count: i64,
    pov_mode: String,
    genre: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ProjectRow> for ProjectRecord {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(ProjectRecord {
            id: Uuid::parse_str(&row.id).map_err(serialization_error)?,
            title: row.title,
            outline: row.outline,
            chapter_count: u32::try_from(row.chapter_count).map_err(serialization_error)?,
            pov_mode: row.pov_mode.parse::<PovMode>().map_err(serialization_error)?,
            genre: row.genre.parse::<Genre>().map_err(serialization_error)?,
            created_at: parse_time(&row.created_at)?,
            updated_at: parse_time(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct ChapterRow {
    project_id: String,
    number: i64,
    title: String,
    content: Option<String>,
    pov_used: Option<String>,
    status: String,
    word_count: i64,
    revision: i64,
    updated_at: String,
}

impl TryFrom<ChapterRow> for ChapterRecord {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(ChapterRecord {
            project_id: Uuid::parse_str(&row.project_id).map_err(serialization_error)?,
            number: u32::try_from(row.number).map_err(serialization_error)?,
            title: row.title,
            content: row.content,
            pov_used: Pov::parse_optional(row.pov_used.as_deref()).map_err(serialization_error)?,
            status: row.status.parse::<ChapterStatus>().map_err(serialization_error)?,
            word_count: usize::try_from(row.word_count).map_err(serialization_error)?,
            revision: u32::try_from(row.revision).map_err(serialization_error)?,
            updated_at: parse_time(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl ProjectRepositoryPort for SqliteProjectRepository {
    async fn create(
        &self,
        project: &ProjectRecord,
        chapters: &[ChapterRecord],
    ) -> Result<(), RepositoryError> {
        // 项目和空章节在同一事务中写入
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(&format!(
            "INSERT INTO projects ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            PROJECT_COLUMNS
        ))
        .bind(project.id.to_string())
        .bind(project.title.as_deref())
        .bind(&project.outline)
        .bind(i64::from(project.chapter_count))
        .bind(project.pov_mode.as_str())
        .bind(project.genre.as_str())
        .bind(project.created_at.to_rfc3339())
        .bind(project.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(project.id.to_string())
            }
            other => db_error(other),
        })?;

        for chapter in chapters {
            sqlx::query(&format!(
                "INSERT INTO chapters ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                CHAPTER_COLUMNS
            ))
            .bind(chapter.project_id.to_string())
            .bind(i64::from(chapter.number))
            .bind(&chapter.title)
            .bind(chapter.content.as_deref())
            .bind(chapter.pov_used.map(|p| p.as_str()))
            .bind(chapter.status.as_str())
            .bind(chapter.word_count as i64)
            .bind(i64::from(chapter.revision))
            .bind(chapter.updated_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepositoryError> {
        let row: Option<ProjectRow> = sqlx::query_as(&format!(
            "SELECT {} FROM projects WHERE id = ?",
            PROJECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ProjectRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<ProjectRecord>, RepositoryError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(&format!(
            "SELECT {} FROM projects ORDER BY created_at DESC",
            PROJECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(ProjectRecord::try_from).collect()
    }

    async fn update(&self, project: &ProjectRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE projects SET title = ?, updated_at = ? WHERE id = ?")
            .bind(project.title.as_deref())
            .bind(project.updated_at.to_rfc3339())
            .bind(project.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(project.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // 连接池上不保证开启 foreign_keys，显式删除章节
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM chapters WHERE project_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn find_chapters(&self, project_id: Uuid) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {} FROM chapters WHERE project_id = ? ORDER BY number",
            CHAPTER_COLUMNS
        ))
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(ChapterRecord::try_from).collect()
    }

    async fn find_chapter(
        &self,
        project_id: Uuid,
        number: u32,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        let row: Option<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {} FROM chapters WHERE project_id = ? AND number = ?",
            CHAPTER_COLUMNS
        ))
        .bind(project_id.to_string())
        .bind(i64::from(number))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ChapterRecord::try_from).transpose()
    }

    async fn save_chapter(
        &self,
        chapter: &ChapterRecord,
        expected_revision: Option<u32>,
    ) -> Result<u32, RepositoryError> {
        let expected = expected_revision.map(i64::from);

        // 版本检查和递增在同一条语句内完成，单行写入天然串行
        let updated: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE chapters SET
                title = ?,
                content = ?,
                pov_used = ?,
                status = ?,
                word_count = ?,
                updated_at = ?,
                revision = revision + 1
            WHERE project_id = ? AND number = ? AND (? IS NULL OR revision = ?)
            RETURNING revision
            "#,
        )
        .bind(&chapter.title)
        .bind(chapter.content.as_deref())
        .bind(chapter.pov_used.map(|p| p.as_str()))
        .bind(chapter.status.as_str())
        .bind(chapter.word_count as i64)
        .bind(chapter.updated_at.to_rfc3339())
        .bind(chapter.project_id.to_string())
        .bind(i64::from(chapter.number))
        .bind(expected)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        if let Some((revision,)) = updated {
            return u32::try_from(revision).map_err(serialization_error);
        }

        match self.find_chapter(chapter.project_id, chapter.number).await? {
            Some(current) => Err(RepositoryError::Conflict(format!(
                "chapter {} is at revision {}, expected {}",
                chapter.number,
                current.revision,
                expected_revision.unwrap_or_default()
            ))),
            None if matches!(expected_revision, None | Some(0)) => {
                // 章节行缺失时视为版本 0；项目检查与插入在同一条语句内，避免孤儿章节
                let inserted = sqlx::query(&format!(
                    r#"
                    INSERT INTO chapters ({})
                    SELECT ?, ?, ?, ?, ?, ?, ?, 1, ?
                    WHERE EXISTS (SELECT 1 FROM projects WHERE id = ?)
                    "#,
                    CHAPTER_COLUMNS
                ))
                .bind(chapter.project_id.to_string())
                .bind(i64::from(chapter.number))
                .bind(&chapter.title)
                .bind(chapter.content.as_deref())
                .bind(chapter.pov_used.map(|p| p.as_str()))
                .bind(chapter.status.as_str())
                .bind(chapter.word_count as i64)
                .bind(chapter.updated_at.to_rfc3339())
                .bind(chapter.project_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| match e {
                    sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                        RepositoryError::Conflict(format!(
                            "chapter {} was written concurrently",
                            chapter.number
                        ))
                    }
                    other => db_error(other),
                })?;

                if inserted.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound(chapter.project_id));
                }
                Ok(1)
            }
            None => {
                if !self.project_exists(chapter.project_id).await? {
                    return Err(RepositoryError::NotFound(chapter.project_id));
                }
                Err(RepositoryError::Conflict(format!(
                    "chapter {} is at revision 0, expected {}",
                    chapter.number,
                    expected_revision.unwrap_or_default()
                )))
            }
        }
    }
}
