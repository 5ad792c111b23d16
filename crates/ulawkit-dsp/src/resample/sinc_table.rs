//! Precomputed sinc tables, cached per window size.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

use parking_lot::RwLock;

/// Number of entries in every table.
pub const TABLE_SIZE: usize = 1024;

/// `sin(x) / x` sampled uniformly over `[0, window_size * pi]`.
///
/// Immutable once built; shared between conversions through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct SincTable {
    window_size: usize,
    values: Vec<f64>,
}

impl SincTable {
    /// Builds the table for a window half-width.
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        let span = window_size as f64 * PI;
        let values = (0..TABLE_SIZE)
            .map(|i| {
                let x = i as f64 / (TABLE_SIZE - 1) as f64 * span;
                if x == 0.0 {
                    1.0
                } else {
                    x.sin() / x
                }
            })
            .collect();

        Self {
            window_size,
            values,
        }
    }

    /// Window half-width the table was built for.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Raw table entries.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Looks up `sinc(x)` by linear interpolation between neighbouring entries.
    ///
    /// The function is even, so only `|x|` matters. Values at or beyond
    /// `window_size * pi` are 0.
    pub fn value(&self, x: f64) -> f64 {
        let x = x.abs();
        let span = self.window_size as f64 * PI;
        if x >= span {
            return 0.0;
        }

        let pos = x * (TABLE_SIZE - 1) as f64 / span;
        let i = pos as usize;
        if i >= TABLE_SIZE - 1 {
            return self.values[TABLE_SIZE - 1];
        }

        let frac = pos - i as f64;
        self.values[i] * (1.0 - frac) + self.values[i + 1] * frac
    }
}

/// Lazily populated map from window size to [`SincTable`].
///
/// Lookups of cached sizes take a recursive read lock, so they do not queue
/// behind a writer that is waiting to build another size. A miss takes the
/// write lock and checks again before building, so each size is built once.
/// Entries are never evicted.
#[derive(Debug, Default)]
pub struct SincTableCache {
    tables: RwLock<HashMap<usize, Arc<SincTable>>>,
}

impl SincTableCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table for `window_size`, building it on first use.
    pub fn get(&self, window_size: usize) -> Arc<SincTable> {
        if let Some(table) = self.tables.read_recursive().get(&window_size) {
            return Arc::clone(table);
        }

        let mut tables = self.tables.write();
        if let Some(table) = tables.get(&window_size) {
            return Arc::clone(table);
        }

        log::trace!("building sinc table for window size {}", window_size);
        let table = Arc::new(SincTable::new(window_size));
        tables.insert(window_size, Arc::clone(&table));
        table
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.read_recursive().len()
    }

    /// True when no table has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_table_shape() {
        let table = SincTable::new(8);
        assert_eq!(table.window_size(), 8);
        assert_eq!(table.values().len(), TABLE_SIZE);
        assert_eq!(table.values()[0], 1.0);
    }

    #[test]
    fn test_lookup_matches_sinc() {
        let table = SincTable::new(16);
        for &x in &[0.0, 0.3, 1.0, 2.5, PI, 7.7, 20.0, 40.0] {
            let expected = if x == 0.0 { 1.0 } else { f64::sin(x) / x };
            let got = table.value(x);
            assert!(
                (got - expected).abs() < 1e-3,
                "sinc({}) = {} expected {}",
                x,
                got,
                expected
            );
            assert_eq!(table.value(-x), got);
        }
    }

    #[test]
    fn test_lookup_outside_window_is_zero() {
        let table = SincTable::new(4);
        assert_eq!(table.value(4.0 * PI), 0.0);
        assert_eq!(table.value(100.0), 0.0);
        assert_eq!(table.value(-100.0), 0.0);
    }

    #[test]
    fn test_cache_reuses_tables() {
        let cache = SincTableCache::new();
        assert!(cache.is_empty());

        let a = cache.get(12);
        let b = cache.get(12);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let c = cache.get(64);
        assert_eq!(c.window_size(), 64);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_independent_caches_do_not_share() {
        let first = SincTableCache::new();
        let second = SincTableCache::new();
        first.get(8);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_concurrent_access_builds_each_size_once() {
        let cache = Arc::new(SincTableCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let sizes = [12, 16, 32, 64];
                    (0..50)
                        .map(|j| cache.get(sizes[(i + j) % sizes.len()]))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<Arc<SincTable>>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 4);
        for tables in &results {
            for table in tables {
                assert!(Arc::ptr_eq(table, &cache.get(table.window_size())));
            }
        }
    }

    #[test]
    fn test_cached_lookup_not_blocked_by_pending_build() {
        let cache = Arc::new(SincTableCache::new());
        let warm = cache.get(8);

        // Hold a reader so the builder below parks on the write lock.
        let reader = cache.tables.read();
        let builder = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.get(32))
        };
        thread::sleep(Duration::from_millis(50));

        let (tx, rx) = mpsc::channel();
        let lookup = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let table = cache.get(8);
                tx.send(()).unwrap();
                table
            })
        };
        let served = rx.recv_timeout(Duration::from_secs(5));
        drop(reader);

        assert!(served.is_ok(), "cached lookup waited behind the writer");
        assert!(Arc::ptr_eq(&lookup.join().unwrap(), &warm));
        assert_eq!(builder.join().unwrap().window_size(), 32);
        assert_eq!(cache.len(), 2);
    }
}
