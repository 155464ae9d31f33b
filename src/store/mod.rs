//! Per-connection key/value store.
//!
//! Processing stages of one connection pass values forward through
//! the store: an earlier stage `set`s, a later stage `get`s. The store
//! lives and dies with its connection and is never shared across
//! connections.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared value handle. The Rust spelling of an "anything" value:
/// readers get the whole value back or nothing, never a torn one.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Connection-scoped key/value bag behind a reader/writer lock.
///
/// `get`s may run concurrently with each other but exclude any
/// concurrent `set`. The backing map allocates lazily on the first
/// insert. No eviction.
#[derive(Default)]
pub struct Store {
    map: RwLock<HashMap<String, Value>>,
}

impl Store {
    pub fn new() -> Self { Self::default() }

    /// Take the exclusive lock and write.
    pub fn set<V: Any + Send + Sync>(&self, key: &str, value: V) {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_owned(), Arc::new(value));
    }

    /// Take the shared lock and read; `None` is the not-found indicator.
    pub fn get(&self, key: &str) -> Option<Value> {
        let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    /// Typed read; `None` when the key is absent or holds another type.
    pub fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key).and_then(|value| value.downcast::<T>().ok())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Store").field("len", &map.len()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    #[test]
    fn set_then_get() {
        let store = Store::new();

        assert!(store.get("name").is_none());

        store.set("name", "World".to_owned());
        assert_eq!(*store.get_as::<String>("name").unwrap(), "World");

        // last write wins
        store.set("name", "Rust".to_owned());
        assert_eq!(*store.get_as::<String>("name").unwrap(), "Rust");
    }

    #[test]
    fn typed_read_rejects_other_types() {
        let store = Store::new();
        store.set("n", 42_u64);

        assert!(store.get_as::<String>("n").is_none());
        assert_eq!(*store.get_as::<u64>("n").unwrap(), 42);
    }

    #[test]
    fn concurrent_writers_lose_nothing() {
        let store = Arc::new(Store::new());
        let mut handles = Vec::new();

        for t in 0..8_u64 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..100_u64 {
                    store.set(&format!("k{}-{}", t, i), t * 1000 + i);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        for t in 0..8_u64 {
            for i in 0..100_u64 {
                let got = store.get_as::<u64>(&format!("k{}-{}", t, i)).unwrap();
                assert_eq!(*got, t * 1000 + i);
            }
        }
    }

    #[test]
    fn concurrent_readers_see_whole_values() {
        let store = Arc::new(Store::new());
        store.set("k", (1_u64, 1_u64));

        let mut handles = Vec::new();

        for n in 2..6_u64 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    store.set("k", (n, n));
                }
            }));
        }

        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    let (a, b) = *store.get_as::<(u64, u64)>("k").unwrap();
                    // a torn value would break the pairing
                    assert_eq!(a, b);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
