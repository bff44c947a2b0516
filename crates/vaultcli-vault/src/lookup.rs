//! Idempotent "find by name or create" for vaults and cards.
//!
//! Bulk operations refer to containers by name. Instead of caching results globally, callers build
//! a [NameIndex] from a listing they fetched themselves and pass a creation callback, the index
//! then remembers what it created for the rest of the run.

use std::collections::HashMap;

use tracing::debug;

/// Anything that can be found by its name.
pub trait Named {
    /// Server side identifier.
    fn id(&self) -> u64;
    /// Display name, unique within its parent.
    fn name(&self) -> &str;
}

/// Name to id map of the entries of one container. Names are compared exactly.
#[derive(Clone, Debug, Default)]
pub struct NameIndex {
    ids: HashMap<String, u64>,
}

impl NameIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an existing listing. When names repeat the first entry wins, like a linear search.
    pub fn from_items<'a, T: Named + 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        let mut index = Self::new();
        for item in items {
            index.ids.entry(item.name().to_owned()).or_insert(item.id());
        }
        index
    }

    /// Id known for `name`, without creating anything.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.ids.get(name).copied()
    }

    /// Number of known names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no name is known yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Return the id for `name`, calling `create` only when it is not known yet.
    ///
    /// A failed creation leaves the index untouched so the next call retries.
    pub fn lookup_or_create<E>(
        &mut self,
        name: &str,
        create: impl FnOnce(&str) -> Result<u64, E>,
    ) -> Result<u64, E> {
        if let Some(id) = self.get(name) {
            debug!(name, id, "Entry already exists");
            return Ok(id);
        }

        let id = create(name)?;
        debug!(name, id, "Created entry");
        self.ids.insert(name.to_owned(), id);
        Ok(id)
    }
}

impl FromIterator<(String, u64)> for NameIndex {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (name, id) in iter {
            index.ids.entry(name).or_insert(id);
        }
        index
    }
}

/// One shot lookup: query the current listing, create the entry if `name` is not in it.
pub fn find_or_create<T: Named, E>(
    name: &str,
    list: impl FnOnce() -> Result<Vec<T>, E>,
    create: impl FnOnce(&str) -> Result<u64, E>,
) -> Result<u64, E> {
    let items = list()?;
    NameIndex::from_items(&items).lookup_or_create(name, create)
}
