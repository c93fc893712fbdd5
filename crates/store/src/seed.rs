use crate::config::StoreConfig;
use crate::entries::Entries;
use crate::error::Result;
use crate::store::Store;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Created { rows: u32 },
    /// The store file already existed; nothing was touched.
    Skipped,
}

/// Create and fill the store unless its file already exists.
///
/// `progress` is called with each inserted row id. The first failed insert
/// aborts seeding with [`crate::Error::Insert`]; rows inserted before it stay.
pub fn seed_if_absent<R, F>(
    config: &StoreConfig,
    rng: &mut R,
    progress: F,
) -> Result<SeedOutcome>
where
    R: Rng + ?Sized,
    F: FnMut(i64),
{
    if config.store_exists() {
        info!(path = %config.db_path.display(), "store exists, skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    let store = Store::open(config)?;
    store.create_schema()?;
    let rows = fill(&store, config.rows, rng, progress)?;
    info!(rows, table = store.table(), "seeded store");
    Ok(SeedOutcome::Created { rows })
}

/// Insert `rows` random rows into an existing table, stopping at the first
/// failed insert. Returns the number of rows inserted.
pub fn fill<R, F>(store: &Store, rows: u32, rng: &mut R, mut progress: F) -> Result<u32>
where
    R: Rng + ?Sized,
    F: FnMut(i64),
{
    for _ in 0..rows {
        let entries = Entries::random(rng);
        let id = store.insert_entries(&entries)?;
        debug!(id, %entries, "seeded row");
        progress(id);
    }
    Ok(rows)
}

/// A seeded RNG when the config pins one, OS entropy otherwise.
pub fn rng_for(config: &StoreConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
