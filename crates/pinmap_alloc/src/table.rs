//! The resolved name-to-number table.
//!
//! Uses persistent collections so snapshots clone in O(1) and can be handed
//! to any number of readers.

use im::{HashMap, OrdSet, Vector};
use pinmap_address::ResolvedAddress;
use pinmap_foundation::Section;

/// How an item is realized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Driven by a hardware driver group (or read from a switch input).
    Hardware(u16),
    /// Driven in software; the number is stable but has no hardware group.
    Emulated(u16),
    /// The code did not resolve; the item has no number.
    Unresolved,
}

impl Resolution {
    /// The physical number, if any.
    #[must_use]
    pub const fn number(self) -> Option<u16> {
        match self {
            Self::Hardware(n) | Self::Emulated(n) => Some(n),
            Self::Unresolved => None,
        }
    }

    /// Returns true if the item must be driven in software.
    #[must_use]
    pub const fn is_emulated(self) -> bool {
        matches!(self, Self::Emulated(_))
    }
}

/// One declared item and where it ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEntity {
    /// Item name.
    pub name: String,
    /// Section the item was declared in.
    pub section: Section,
    /// Position code, as declared.
    pub code: String,
    /// The address the code resolved to.
    pub address: ResolvedAddress,
    /// The physical number and how it is driven.
    pub resolution: Resolution,
}

/// Every declared item, in declaration order, indexed by section and name.
#[derive(Clone, Debug, Default)]
pub struct ResolvedTable {
    entries: Vector<ResolvedEntity>,
    index: HashMap<(Section, String), usize>,
}

impl ResolvedTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item. A later item with the same section and name shadows an
    /// earlier one in lookups; both stay listed.
    pub(crate) fn insert(&mut self, entity: ResolvedEntity) {
        let key = (entity.section, entity.name.clone());
        self.index.insert(key, self.entries.len());
        self.entries.push_back(entity);
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no items were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an item by section and name.
    #[must_use]
    pub fn get(&self, section: Section, name: &str) -> Option<&ResolvedEntity> {
        self.index
            .get(&(section, name.to_string()))
            .and_then(|&i| self.entries.get(i))
    }

    /// The physical number of an item, if it resolved.
    #[must_use]
    pub fn number(&self, section: Section, name: &str) -> Option<u16> {
        self.get(section, name).and_then(|e| e.resolution.number())
    }

    /// All items, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedEntity> {
        self.entries.iter()
    }

    /// Items of one section, in declaration order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &ResolvedEntity> {
        self.entries.iter().filter(move |e| e.section == section)
    }

    /// Items whose code did not resolve.
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedEntity> {
        self.entries
            .iter()
            .filter(|e| e.resolution == Resolution::Unresolved)
    }

    /// Driver numbers that must be realized as software-emulated drivers.
    #[must_use]
    pub fn emulated_numbers(&self) -> OrdSet<u16> {
        self.entries
            .iter()
            .filter_map(|e| match e.resolution {
                Resolution::Emulated(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}
