// crates/sembench-store/src/rocks.rs
//
// RocksDB-backed persistent sentence store.
//
// Key format:
//   - Primary:   `sentence:{id:020}` -> JSON-serialized SentenceRecord
//   - Secondary: `pending:{id:020}`  -> empty value (index only)
//   - Counter:   `meta:next_id`      -> big-endian i64
//
// The secondary index marks rows that still need an embedding, so the
// paged missing-embedding scan never touches embedded rows. Ids are
// zero-padded so lexicographic key order equals ascending id order, which
// is what makes keyset pagination a plain forward iteration.

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, Direction, IteratorMode, MultiThreaded, Options};

use sembench_core::error::BenchError;
use sembench_core::record::SentenceRecord;
use sembench_core::traits::SentenceStore;

const SENTENCE_PREFIX: &str = "sentence:";
const PENDING_PREFIX: &str = "pending:";
const NEXT_ID_KEY: &[u8] = b"meta:next_id";

/// RocksDB wrapper implementing the `SentenceStore` trait.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, BenchError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path).map_err(|e| {
            BenchError::Storage(format!("Failed to open RocksDB at {}: {}", path, e))
        })?;

        Ok(Self { db })
    }

    /// Build the primary key for a row: `sentence:{id:020}`.
    fn sentence_key(id: i64) -> Vec<u8> {
        format!("{}{:020}", SENTENCE_PREFIX, id).into_bytes()
    }

    /// Build the secondary index key: `pending:{id:020}`.
    fn pending_key(id: i64) -> Vec<u8> {
        format!("{}{:020}", PENDING_PREFIX, id).into_bytes()
    }

    /// Extract the id from a prefixed key, if the prefix matches.
    fn parse_id(key: &[u8], prefix: &str) -> Option<i64> {
        let rest = key.strip_prefix(prefix.as_bytes())?;
        std::str::from_utf8(rest).ok()?.parse().ok()
    }

    /// Put raw bytes into RocksDB, mapping errors to BenchError::Storage.
    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), BenchError> {
        self.db
            .put(key, value)
            .map_err(|e| BenchError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Get raw bytes from RocksDB, mapping errors to BenchError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BenchError> {
        self.db
            .get(key)
            .map_err(|e| BenchError::Storage(format!("RocksDB get failed: {}", e)))
    }

    /// Delete a key from RocksDB, mapping errors to BenchError::Storage.
    fn delete_raw(&self, key: &[u8]) -> Result<(), BenchError> {
        self.db
            .delete(key)
            .map_err(|e| BenchError::Storage(format!("RocksDB delete failed: {}", e)))
    }

    /// Read the persisted id counter, defaulting to 0 on first use.
    fn next_id(&self) -> Result<i64, BenchError> {
        match self.get_raw(NEXT_ID_KEY)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    BenchError::Storage("Corrupt id counter: wrong byte length".to_string())
                })?;
                Ok(i64::from_be_bytes(arr))
            }
            None => Ok(0),
        }
    }

    fn set_next_id(&self, next: i64) -> Result<(), BenchError> {
        self.put_raw(NEXT_ID_KEY, &next.to_be_bytes())
    }

    fn get_record(&self, id: i64) -> Result<Option<SentenceRecord>, BenchError> {
        match self.get_raw(&Self::sentence_key(id))? {
            Some(bytes) => {
                let record: SentenceRecord = serde_json::from_slice(&bytes)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_record(&self, record: &SentenceRecord) -> Result<(), BenchError> {
        let json = serde_json::to_vec(record)?;
        self.put_raw(&Self::sentence_key(record.id), &json)
    }
}

#[async_trait]
impl SentenceStore for RocksStore {
    async fn create_schema(&self) -> Result<(), BenchError> {
        // Initialize the id counter on first open; later opens keep it.
        if self.get_raw(NEXT_ID_KEY)?.is_none() {
            self.set_next_id(0)?;
        }
        Ok(())
    }

    async fn insert_batch(&self, texts: &[String]) -> Result<Vec<i64>, BenchError> {
        let mut id = self.next_id()?;
        let mut ids = Vec::with_capacity(texts.len());

        for text in texts {
            let record = SentenceRecord::new(id, text.clone());
            self.put_record(&record)?;
            // Pending index entry: empty value, existence is the signal.
            self.put_raw(&Self::pending_key(id), &[])?;
            ids.push(id);
            id += 1;
        }

        self.set_next_id(id)?;
        Ok(ids)
    }

    async fn fetch_missing_embedding(
        &self,
        after_id: Option<i64>,
        page_size: usize,
    ) -> Result<Vec<SentenceRecord>, BenchError> {
        // Seek past the last id of the previous page; padded keys keep
        // the iteration in ascending id order.
        let start = match after_id {
            Some(id) => Self::pending_key(id + 1),
            None => PENDING_PREFIX.as_bytes().to_vec(),
        };

        let mut page = Vec::new();
        let iter = self
            .db
            .iterator(IteratorMode::From(&start, Direction::Forward));
        for item in iter {
            let (key, _value) =
                item.map_err(|e| BenchError::Storage(format!("RocksDB iteration error: {}", e)))?;

            // Keys are `pending:{id}`. Stop when the prefix no longer matches.
            let Some(id) = Self::parse_id(&key, PENDING_PREFIX) else {
                break;
            };

            let record = self.get_record(id)?.ok_or_else(|| {
                BenchError::Storage(format!("Pending index points at missing row {}", id))
            })?;
            page.push(record);

            if page.len() == page_size {
                break;
            }
        }

        Ok(page)
    }

    async fn update_embeddings(&self, pairs: &[(i64, Vec<f32>)]) -> Result<(), BenchError> {
        for (id, vector) in pairs {
            let mut record = self.get_record(*id)?.ok_or_else(|| {
                BenchError::Storage(format!("Embedding update for unknown id {}", id))
            })?;
            record.embedding = Some(vector.clone());
            self.put_record(&record)?;
            self.delete_raw(&Self::pending_key(*id))?;
        }
        Ok(())
    }

    async fn fetch_embedded(&self) -> Result<Vec<SentenceRecord>, BenchError> {
        let mut records = Vec::new();
        let start = SENTENCE_PREFIX.as_bytes().to_vec();
        let iter = self
            .db
            .iterator(IteratorMode::From(&start, Direction::Forward));
        for item in iter {
            let (key, value) =
                item.map_err(|e| BenchError::Storage(format!("RocksDB iteration error: {}", e)))?;

            if Self::parse_id(&key, SENTENCE_PREFIX).is_none() {
                break;
            }

            let record: SentenceRecord = serde_json::from_slice(&value)?;
            if record.has_embedding() {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn count(&self) -> Result<usize, BenchError> {
        let mut count = 0usize;
        let start = SENTENCE_PREFIX.as_bytes().to_vec();
        let iter = self
            .db
            .iterator(IteratorMode::From(&start, Direction::Forward));
        for item in iter {
            let (key, _value) =
                item.map_err(|e| BenchError::Storage(format!("RocksDB iteration error: {}", e)))?;
            if Self::parse_id(&key, SENTENCE_PREFIX).is_none() {
                break;
            }
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_keys_sort_in_id_order() {
        let low = RocksStore::sentence_key(9);
        let high = RocksStore::sentence_key(10);
        assert!(low < high, "zero padding must preserve numeric order");

        let low = RocksStore::pending_key(999);
        let high = RocksStore::pending_key(1000);
        assert!(low < high);
    }

    #[test]
    fn parse_id_round_trips() {
        let key = RocksStore::pending_key(42);
        assert_eq!(RocksStore::parse_id(&key, PENDING_PREFIX), Some(42));
        // Wrong prefix does not parse.
        assert_eq!(RocksStore::parse_id(&key, SENTENCE_PREFIX), None);
    }

    #[test]
    fn parse_id_rejects_foreign_keys() {
        assert_eq!(RocksStore::parse_id(NEXT_ID_KEY, PENDING_PREFIX), None);
        assert_eq!(
            RocksStore::parse_id(b"sentence:not-a-number", SENTENCE_PREFIX),
            None
        );
    }
}
