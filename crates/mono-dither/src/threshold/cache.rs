//! Process-wide memo of generated threshold matrices.
//!
//! Matrices are pure functions of their key, so entries are never
//! invalidated. The lock is held only for lookup and insertion; a matrix is
//! built outside it, and if two threads race on the same key the first
//! insertion wins and both receive the same `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::ThresholdMatrix;

/// Identifies one generated matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKey {
    /// Bayer matrix at a clamped level.
    Bayer(u8),
    /// Blue-noise tile of a supported side length.
    BlueNoise(usize),
}

type MatrixMap = HashMap<MatrixKey, Arc<ThresholdMatrix>>;

static MATRIX_CACHE: OnceLock<Mutex<MatrixMap>> = OnceLock::new();

fn get_cache() -> &'static Mutex<MatrixMap> {
    MATRIX_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Return the cached matrix for `key`, building it with `build` on first use.
pub fn cached_matrix<F>(key: MatrixKey, build: F) -> Arc<ThresholdMatrix>
where
    F: FnOnce() -> ThresholdMatrix,
{
    // A panic while holding the lock cannot leave a half-written entry,
    // so a poisoned map is still usable.
    if let Some(hit) = get_cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Arc::clone(hit);
    }

    let built = Arc::new(build());
    let mut cache = get_cache().lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(key).or_insert(built))
}

/// Whether a matrix for `key` has been generated in this process.
pub fn is_cached(key: MatrixKey) -> bool {
    get_cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&key)
}
