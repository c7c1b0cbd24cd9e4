//! MapConfig: construction-time sizing for `ChainedHashMap`.

use crate::error::InvalidArgument;

/// Bucket count of a map built with `ChainedHashMap::new`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Fill ratio at which a map built with `ChainedHashMap::new` doubles.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Smallest accepted load factor.
pub const MIN_LOAD_FACTOR: f64 = 0.5;

/// Smallest bucket count a validated config starts with.
pub const MIN_INITIAL_CAPACITY: usize = 2;

/// Initial bucket count and resize threshold.
///
/// Setters do no checking; `validate` (called by `ChainedHashMap::with_config`)
/// rounds the capacity up to a power of two and rejects unusable values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub initial_capacity: usize,
    pub load_factor: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Normalize into a config the map can run with.
    ///
    /// The capacity becomes the next power of two at or above the request,
    /// and never less than `MIN_INITIAL_CAPACITY`. The load factor must lie
    /// in `[MIN_LOAD_FACTOR, 1]`. Above 1 (such as a percentage written as
    /// `75`) `len / capacity` never reaches it and growth is disabled. Below
    /// the minimum, one doubling can leave the map still over its threshold.
    ///
    /// With both bounds, `capacity * load_factor >= 1`, so an insert that
    /// reaches the threshold is always brought back under it by a single
    /// doubling.
    pub fn validate(self) -> Result<Self, InvalidArgument> {
        if self.initial_capacity == 0 {
            return Err(InvalidArgument::Capacity(0));
        }
        let initial_capacity = self
            .initial_capacity
            .max(MIN_INITIAL_CAPACITY)
            .checked_next_power_of_two()
            .ok_or(InvalidArgument::Capacity(self.initial_capacity))?;

        let lf = self.load_factor;
        if !(MIN_LOAD_FACTOR..=1.0).contains(&lf) {
            return Err(InvalidArgument::LoadFactor(lf));
        }

        Ok(Self {
            initial_capacity,
            load_factor: lf,
        })
    }
}
