//! # Decode Registry
//!
//! Maps the three letter sentence code of an address field to the [`SentenceId`] that
//! selects its decoder.
//!
//! The registry is an open-addressed table with linear probing. It is sized from the number
//! of entries it holds and refuses to be built over its load factor, so a probe always
//! reaches an empty slot and a miss terminates. It is never modified after construction.

use std::sync::{Arc, OnceLock};

use log::debug;

use crate::{error::RegistryError, nmea_content::SentenceId};

/// Smallest table built by [`Registry::new`].
const MIN_CAPACITY: usize = 8;

/// One registered sentence code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    code: &'static str,
    id: SentenceId,
}

/// Open-addressed lookup table from sentence code to [`SentenceId`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_ingest::{Registry, SentenceId};
///
/// let registry = Registry::from_ids(&[SentenceId::GGA, SentenceId::RMC]).unwrap();
///
/// assert_eq!(registry.lookup("GGA"), Some(SentenceId::GGA));
/// assert_eq!(registry.lookup("VTG"), None);
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    slots: Box<[Option<Entry>]>,
    len: usize,
}

impl Registry {
    /// Builds a registry sized for `entries`.
    ///
    /// The capacity is the smallest power of two holding twice the entries, and at
    /// least 8 slots.
    pub fn new(entries: &[(&'static str, SentenceId)]) -> Result<Self, RegistryError> {
        Self::with_capacity(entries, capacity_for(entries.len()))
    }

    /// Builds a registry over an explicit number of slots.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::Overloaded`] if the entries would fill more than three quarters
    ///   of the slots, or leave no slot free
    /// * [`RegistryError::Duplicate`] if a code is registered twice
    pub fn with_capacity(
        entries: &[(&'static str, SentenceId)],
        capacity: usize,
    ) -> Result<Self, RegistryError> {
        if entries.len() >= capacity || entries.len() * 4 > capacity * 3 {
            return Err(RegistryError::Overloaded {
                entries: entries.len(),
                capacity,
            });
        }

        let mut slots = vec![None; capacity].into_boxed_slice();

        for &(code, id) in entries {
            let mut index = slot(code, capacity);

            loop {
                match slots[index] {
                    None => {
                        slots[index] = Some(Entry { code, id });
                        break;
                    }
                    Some(entry) if entry.code == code => {
                        return Err(RegistryError::Duplicate(code));
                    }
                    Some(_) => index = (index + 1) % capacity,
                }
            }
        }

        debug!(
            "built decode registry with {} entries in {capacity} slots",
            entries.len()
        );

        Ok(Self {
            slots,
            len: entries.len(),
        })
    }

    /// Builds a registry over the codes of `ids`.
    pub fn from_ids(ids: &[SentenceId]) -> Result<Self, RegistryError> {
        let entries: Vec<_> = ids.iter().map(|&id| (id.as_str(), id)).collect();
        Self::new(&entries)
    }

    /// Returns the registry over every supported sentence type.
    ///
    /// It is built on first use and shared afterwards.
    pub fn standard() -> Result<Arc<Self>, RegistryError> {
        static STANDARD: OnceLock<Result<Arc<Registry>, RegistryError>> = OnceLock::new();

        STANDARD
            .get_or_init(|| Self::from_ids(SentenceId::ALL).map(Arc::new))
            .clone()
    }

    /// Finds the sentence type registered under `code`.
    pub fn lookup(&self, code: &str) -> Option<SentenceId> {
        let capacity = self.slots.len();
        let start = slot(code, capacity);

        for probe in 0..capacity {
            match self.slots[(start + probe) % capacity] {
                None => return None,
                Some(entry) if entry.code == code => return Some(entry.id),
                Some(_) => {}
            }
        }

        None
    }

    /// Whether a sentence type is registered.
    pub fn contains(&self, id: SentenceId) -> bool {
        self.lookup(id.as_str()) == Some(id)
    }

    /// Number of registered sentence types.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no sentence type is registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over the registered sentence types, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = SentenceId> + '_ {
        self.slots.iter().flatten().map(|entry| entry.id)
    }
}

/// The djb2 string hash.
fn hash(code: &str) -> u32 {
    code.bytes().fold(5381u32, |hash, byte| {
        hash.wrapping_mul(33).wrapping_add(u32::from(byte))
    })
}

fn slot(code: &str, capacity: usize) -> usize {
    hash(code) as usize % capacity
}

fn capacity_for(entries: usize) -> usize {
    (entries * 2).next_power_of_two().max(MIN_CAPACITY)
}
