// Datasets loaded during the lifetime of the process.

use std::collections::HashMap;
use std::rc::Rc;

use crate::bench::{io_common::load_dataset, *};

/// Keeps every dataset that was successfully loaded, keyed by its source.
///
/// The cache is owned by the caller and never expires on its own: entries go
/// away with `invalidate`, `clear` or when the cache is dropped. Failed loads
/// are not remembered, so the next request tries again.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<DataSource, Rc<Dataset>>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> DatasetCache {
        DatasetCache::default()
    }

    pub fn get_or_load(&mut self, source: &DataSource) -> BenchResult<Rc<Dataset>> {
        self.get_or_load_with(source, load_dataset)
    }

    /// Same as `get_or_load`, with an explicit loading function.
    pub fn get_or_load_with<F>(&mut self, source: &DataSource, load: F) -> BenchResult<Rc<Dataset>>
    where
        F: FnOnce(&DataSource) -> BenchResult<Dataset>,
    {
        if let Some(ds) = self.entries.get(source) {
            debug!("DatasetCache: hit for {:?}", source.path);
            return Ok(Rc::clone(ds));
        }
        let ds = Rc::new(load(source)?);
        self.loads += 1;
        self.entries.insert(source.clone(), Rc::clone(&ds));
        Ok(ds)
    }

    /// Forgets one source. Returns true if it was cached.
    pub fn invalidate(&mut self, source: &DataSource) -> bool {
        self.entries.remove(source).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of loads that went to the source.
    pub fn loads(&self) -> usize {
        self.loads
    }
}
