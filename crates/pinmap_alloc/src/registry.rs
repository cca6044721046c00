//! Registry of the bus driver boards a machine uses.
//!
//! Built by the allocator and owned by the resulting [`Allocation`], so every
//! allocation pass starts from an empty registry.
//!
//! [`Allocation`]: crate::Allocation

use std::collections::BTreeSet;

use im::OrdMap;
use pinmap_address::BusAddress;

/// What one driver board is used for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardUsage {
    /// Banks (0 or 1) carrying coils.
    pub coil_banks: BTreeSet<u8>,
    /// Banks carrying lamp matrix sources.
    pub lamp_source_banks: BTreeSet<u8>,
    /// Banks carrying lamp matrix sinks.
    pub lamp_sink_banks: BTreeSet<u8>,
}

impl BoardUsage {
    /// Returns true if the board drives any lamp matrix line.
    #[must_use]
    pub fn drives_lamps(&self) -> bool {
        !self.lamp_source_banks.is_empty() || !self.lamp_sink_banks.is_empty()
    }
}

/// Board number to usage, in ascending board order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardRegistry {
    boards: OrdMap<u8, BoardUsage>,
}

impl BoardRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_coil(&mut self, address: BusAddress) {
        self.boards
            .entry(address.board)
            .or_default()
            .coil_banks
            .insert(address.bank);
    }

    pub(crate) fn record_lamp(&mut self, source: BusAddress, sink: BusAddress) {
        self.boards
            .entry(source.board)
            .or_default()
            .lamp_source_banks
            .insert(source.bank);
        self.boards
            .entry(sink.board)
            .or_default()
            .lamp_sink_banks
            .insert(sink.bank);
    }

    /// Usage of one board.
    #[must_use]
    pub fn board(&self, board: u8) -> Option<&BoardUsage> {
        self.boards.get(&board)
    }

    /// All boards, in ascending order.
    pub fn boards(&self) -> impl Iterator<Item = (&u8, &BoardUsage)> {
        self.boards.iter()
    }

    /// Number of boards in use.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Returns true if no bus board is used.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}
