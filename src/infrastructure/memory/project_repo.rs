//! In-Memory Project Repository Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{ChapterRecord, ProjectRecord, ProjectRepositoryPort, RepositoryError};

/// 项目及其章节，整体存放在同一分片锁下
#[derive(Debug, Clone)]
struct ProjectEntry {
    project: ProjectRecord,
    chapters: BTreeMap<u32, ChapterRecord>,
}

/// 内存项目仓储
///
/// 用于测试和 `storage.backend = "memory"`，进程退出后数据丢失
pub struct InMemoryProjectRepository {
    projects: DashMap<Uuid, ProjectEntry>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self {
            projects: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectRepositoryPort for InMemoryProjectRepository {
    async fn create(
        &self,
        project: &ProjectRecord,
        chapters: &[ChapterRecord],
    ) -> Result<(), RepositoryError> {
        use dashmap::mapref::entry::Entry;

        match self.projects.entry(project.id) {
            Entry::Occupied(_) => Err(RepositoryError::Duplicate(project.id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(ProjectEntry {
                    project: project.clone(),
                    chapters: chapters.iter().map(|c| (c.number, c.clone())).collect(),
                });
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepositoryError> {
        Ok(self.projects.get(&id).map(|entry| entry.project.clone()))
    }

    async fn find_all(&self) -> Result<Vec<ProjectRecord>, RepositoryError> {
        let mut projects: Vec<ProjectRecord> = self
            .projects
            .iter()
            .map(|entry| entry.project.clone())
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn update(&self, project: &ProjectRecord) -> Result<(), RepositoryError> {
        let mut entry = self
            .projects
            .get_mut(&project.id)
            .ok_or_else(|| RepositoryError::NotFound(project.id))?;
        entry.project.title = project.title.clone();
        entry.project.updated_at = project.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.projects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id))
    }

    async fn find_chapters(&self, project_id: Uuid) -> Result<Vec<ChapterRecord>, RepositoryError> {
        Ok(self
            .projects
            .get(&project_id)
            .map(|entry| entry.chapters.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_chapter(
        &self,
        project_id: Uuid,
        number: u32,
    ) -> Result<Option<ChapterRecord>, RepositoryError> {
        Ok(self
            .projects
            .get(&project_id)
            .and_then(|entry| entry.chapters.get(&number).cloned()))
    }

    async fn save_chapter(
        &self,
        chapter: &ChapterRecord,
        expected_revision: Option<u32>,
    ) -> Result<u32, RepositoryError> {
        let mut entry = self
            .projects
            .get_mut(&chapter.project_id)
            .ok_or_else(|| RepositoryError::NotFound(chapter.project_id))?;

        let current = entry
            .chapters
            .get(&chapter.number)
            .map(|c| c.revision)
            .unwrap_or(0);

        if let Some(expected) = expected_revision {
            if expected != current {
                return Err(RepositoryError::Conflict(format!(
                    "chapter {} is at revision {}, expected {}",
                    chapter.number, current, expected
                )));
            }
        }

        let revision = current + 1;
        let mut stored = chapter.clone();
        stored.revision = revision;
        entry.chapters.insert(chapter.number, stored);

        tracing::debug!(
            project_id = %chapter.project_id,
            number = chapter.number,
            revision = revision,
            "Chapter stored in memory"
        );

        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{Chapter, Genre, PovMode};
    use chrono::Utc;

    fn project_record() -> ProjectRecord {
        let now = Utc::now();
        ProjectRecord {
            id: Uuid::new_v4(),
            title: None,
            outline: "outline".to_string(),
            chapter_count: 3,
            pov_mode: PovMode::Female,
            genre: Genre::General,
            created_at: now,
            updated_at: now,
        }
    }

    fn chapters(project_id: Uuid) -> Vec<ChapterRecord> {
        (1..=3)
            .map(|n| ChapterRecord::from_chapter(project_id, &Chapter::empty(n), Utc::now()))
            .collect()
    }

    #[tokio::test]
    async fn test_project_lifecycle() {
        let repo = InMemoryProjectRepository::new();
        let project = project_record();

        // Create
        repo.create(&project, &chapters(project.id)).await.unwrap();
        let duplicate = repo.create(&project, &[]).await;
        assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

        // Read
        assert_eq!(repo.find_by_id(project.id).await.unwrap(), Some(project.clone()));
        let numbers: Vec<u32> = repo
            .find_chapters(project.id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        // Delete
        repo.delete(project.id).await.unwrap();
        assert!(repo.find_by_id(project.id).await.unwrap().is_none());
        assert!(repo.find_chapter(project.id, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_chapter_revisions() {
        let repo = InMemoryProjectRepository::new();
        let project = project_record();
        let mut records = chapters(project.id);
        repo.create(&project, &records).await.unwrap();

        let chapter = &mut records[0];
        chapter.content = Some("text".to_string());

        assert_eq!(repo.save_chapter(chapter, None).await.unwrap(), 1);
        assert_eq!(repo.save_chapter(chapter, Some(1)).await.unwrap(), 2);

        let conflict = repo.save_chapter(chapter, Some(1)).await;
        assert!(matches!(conflict, Err(RepositoryError::Conflict(_))));

        let stored = repo.find_chapter(project.id, 1).await.unwrap().unwrap();
        assert_eq!(stored.revision, 2);
    }

    #[tokio::test]
    async fn test_save_chapter_unknown_project() {
        let repo = InMemoryProjectRepository::new();
        let record = ChapterRecord::from_chapter(Uuid::new_v4(), &Chapter::empty(1), Utc::now());
        let result = repo.save_chapter(&record, None).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }
}
