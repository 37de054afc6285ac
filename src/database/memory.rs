use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::Study;
use crate::database::repository::StudyRepository;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Study>,
    last_id: i64,
}

/// In-process stand-in for the `study` table. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStudyRepository {
    table: RwLock<Table>,
}

impl MemoryStudyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudyRepository for MemoryStudyRepository {
    async fn save(&self, mut study: Study) -> Result<Study, DatabaseError> {
        let mut table = self.table.write().await;
        match study.id {
            None => {
                table.last_id += 1;
                let id = table.last_id;
                study.id = Some(id);
                table.rows.insert(id, study.clone());
            }
            Some(id) => match table.rows.get_mut(&id) {
                Some(row) => *row = study.clone(),
                None => return Err(DatabaseError::NotFound(format!("study {}", id))),
            },
        }
        Ok(study)
    }

    async fn find_all(&self) -> Result<Vec<Study>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = MemoryStudyRepository::new();
        let a = repo.save(Study::new("Trial A", None)).await.unwrap();
        let b = repo.save(Study::new("Trial B", Some("second".to_string()))).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(a.name, "Trial A");
        assert_eq!(b.description.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn save_with_id_updates_row() {
        let repo = MemoryStudyRepository::new();
        let mut saved = repo.save(Study::new("Draft", None)).await.unwrap();
        saved.name = "Final".to_string();
        saved.description = Some("renamed".to_string());

        let updated = repo.save(saved.clone()).await.unwrap();
        assert_eq!(updated, saved);
        assert_eq!(repo.find_all().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn save_with_unknown_id_is_not_found() {
        let repo = MemoryStudyRepository::new();
        let mut study = Study::new("Ghost", None);
        study.id = Some(42);

        let err = repo.save(study).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_row_and_ignores_unknown_ids() {
        let repo = MemoryStudyRepository::new();
        let a = repo.save(Study::new("A", None)).await.unwrap();
        let b = repo.save(Study::new("B", None)).await.unwrap();

        repo.delete_by_id(999).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 2);

        repo.delete_by_id(a.id.unwrap()).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryStudyRepository::new();
        let a = repo.save(Study::new("A", None)).await.unwrap();
        repo.delete_by_id(a.id.unwrap()).await.unwrap();

        let b = repo.save(Study::new("B", None)).await.unwrap();
        assert!(b.id > a.id);
    }
}
