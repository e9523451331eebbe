use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::AppResult;
use crate::models::Flat;

/// Storage seam for the flat aggregate.
///
/// `find_by_id` hands out an owned copy; changes only become visible to other
/// callers once they are written back with `save`.
#[async_trait]
pub trait FlatRepository: Send + Sync {
    /// Finds a flat by its identifier.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Flat>>;

    /// Inserts the flat, or replaces the stored flat with the same id.
    async fn save(&self, flat: Flat) -> AppResult<()>;

    /// Number of flats currently stored.
    async fn count(&self) -> AppResult<usize>;
}

/// Process-local flat store.
#[derive(Debug, Default)]
pub struct InMemoryFlatRepository {
    data: DashMap<String, Flat>,
}

impl InMemoryFlatRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlatRepository for InMemoryFlatRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Flat>> {
        Ok(self.data.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, flat: Flat) -> AppResult<()> {
        self.data.insert(flat.id().to_string(), flat);
        Ok(())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.data.len())
    }
}
