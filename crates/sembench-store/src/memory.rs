// crates/sembench-store/src/memory.rs
//
// In-memory sentence store. Rows live in a Vec and the id is the vector
// index, which keeps insertion order and ascending-id scans trivial.
// State does not survive the process; the `run` subcommand drives the
// whole pipeline in one invocation when this backend is selected.

use std::sync::RwLock;

use async_trait::async_trait;

use sembench_core::error::BenchError;
use sembench_core::record::SentenceRecord;
use sembench_core::traits::SentenceStore;

/// Vec-backed `SentenceStore` guarded by a `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<SentenceRecord>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SentenceStore for MemoryStore {
    async fn create_schema(&self) -> Result<(), BenchError> {
        // Nothing to create; the Vec is the schema.
        Ok(())
    }

    async fn insert_batch(&self, texts: &[String]) -> Result<Vec<i64>, BenchError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| BenchError::Storage(format!("RwLock poisoned: {}", e)))?;

        let mut ids = Vec::with_capacity(texts.len());
        for text in texts {
            let id = rows.len() as i64;
            rows.push(SentenceRecord::new(id, text.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn fetch_missing_embedding(
        &self,
        after_id: Option<i64>,
        page_size: usize,
    ) -> Result<Vec<SentenceRecord>, BenchError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| BenchError::Storage(format!("RwLock poisoned: {}", e)))?;

        let floor = after_id.unwrap_or(-1);
        Ok(rows
            .iter()
            .filter(|r| r.id > floor && !r.has_embedding())
            .take(page_size)
            .cloned()
            .collect())
    }

    async fn update_embeddings(&self, pairs: &[(i64, Vec<f32>)]) -> Result<(), BenchError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| BenchError::Storage(format!("RwLock poisoned: {}", e)))?;

        for (id, vector) in pairs {
            let index = usize::try_from(*id)
                .ok()
                .filter(|i| *i < rows.len())
                .ok_or_else(|| {
                    BenchError::Storage(format!("Embedding update for unknown id {}", id))
                })?;
            rows[index].embedding = Some(vector.clone());
        }
        Ok(())
    }

    async fn fetch_embedded(&self) -> Result<Vec<SentenceRecord>, BenchError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| BenchError::Storage(format!("RwLock poisoned: {}", e)))?;

        Ok(rows.iter().filter(|r| r.has_embedding()).cloned().collect())
    }

    async fn count(&self) -> Result<usize, BenchError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| BenchError::Storage(format!("RwLock poisoned: {}", e)))?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_sequential_ids_from_zero() {
        let store = MemoryStore::new();
        let ids = store
            .insert_batch(&["one".to_string(), "two".to_string()])
            .await
            .unwrap();
        assert_eq!(ids, vec![0, 1]);

        let ids = store.insert_batch(&["three".to_string()]).await.unwrap();
        assert_eq!(ids, vec![2]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn missing_embedding_pages_respect_after_id() {
        let store = MemoryStore::new();
        let texts: Vec<String> = (0..5).map(|i| format!("sentence {}", i)).collect();
        store.insert_batch(&texts).await.unwrap();

        let page = store.fetch_missing_embedding(None, 2).await.unwrap();
        assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1]);

        let page = store.fetch_missing_embedding(Some(1), 2).await.unwrap();
        assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);

        let page = store.fetch_missing_embedding(Some(4), 2).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn updated_rows_leave_the_pending_scan() {
        let store = MemoryStore::new();
        store
            .insert_batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        store
            .update_embeddings(&[(0, vec![1.0, 0.0])])
            .await
            .unwrap();

        let pending = store.fetch_missing_embedding(None, 10).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 1);

        let embedded = store.fetch_embedded().await.unwrap();
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0].id, 0);
        assert_eq!(embedded[0].embedding, Some(vec![1.0, 0.0]));
    }

    #[tokio::test]
    async fn unknown_id_update_is_a_storage_error() {
        let store = MemoryStore::new();
        store.insert_batch(&["a".to_string()]).await.unwrap();

        let err = store
            .update_embeddings(&[(42, vec![1.0])])
            .await
            .unwrap_err();
        assert!(matches!(err, BenchError::Storage(_)));
    }
}
