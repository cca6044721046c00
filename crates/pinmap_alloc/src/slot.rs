//! The driver-group slot table.
//!
//! Positions `0..capacity` are hardware driver groups. Banks that could not
//! be given a group are appended after them as emulated-bank markers, so a
//! physical number is always `position * 8 + output` whether or not the
//! bank is driven by hardware.

use std::fmt;

use pinmap_foundation::hardware::OUTPUTS_PER_BANK;

/// A lamp matrix driver group: one sink bank strobed by one source line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LampBank {
    /// Flat source bank (`board * 2 + bank`).
    pub source_bank: u8,
    /// Position of `source_bank` among the machine's lamp source banks.
    pub source_index: u8,
    /// Source output that activates this row.
    pub source_output: u8,
    /// Flat sink bank (`board * 2 + bank`).
    pub sink_bank: u8,
}

impl LampBank {
    /// Returns true if this group serves the given source/sink pairing.
    #[must_use]
    pub fn serves(&self, source_bank: u8, sink_bank: u8, source_output: u8) -> bool {
        self.source_bank == source_bank
            && self.sink_bank == sink_bank
            && self.source_output == source_output
    }
}

/// The content of one hardware driver group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Not yet assigned; never present once allocation completes.
    Unassigned,
    /// One of the fixed groups wired to the dedicated driver pins.
    Dedicated {
        /// Whether any coil uses this group.
        enabled: bool,
    },
    /// A lamp matrix group.
    Lamp(LampBank),
    /// A coil bank.
    Coil {
        /// Flat coil bank (`board * 2 + bank`).
        bank: u8,
    },
    /// Explicitly unused.
    Disabled,
}

/// A bank that has no hardware group and must be driven in software.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EmulatedBank {
    /// A lamp matrix group that did not fit.
    Lamp(LampBank),
    /// A coil bank that did not fit.
    Coil {
        /// Flat coil bank (`board * 2 + bank`).
        bank: u8,
    },
}

/// Hardware slots followed by emulated-bank markers.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SlotTable {
    slots: Vec<Slot>,
    emulated: Vec<EmulatedBank>,
}

impl SlotTable {
    /// Creates a table of `capacity` unassigned slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Unassigned; capacity],
            emulated: Vec::new(),
        }
    }

    /// Number of hardware slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The hardware slots, in ascending order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The emulated-bank markers, in the order they were appended.
    #[must_use]
    pub fn emulated(&self) -> &[EmulatedBank] {
        &self.emulated
    }

    /// The slot at `index`, if it is a hardware slot.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub(crate) fn set(&mut self, index: usize, slot: Slot) {
        self.slots[index] = slot;
    }

    /// Appends an emulated-bank marker and returns its position.
    pub(crate) fn push_emulated(&mut self, bank: EmulatedBank) -> usize {
        self.emulated.push(bank);
        self.capacity() + self.emulated.len() - 1
    }

    pub(crate) fn disable_unassigned(&mut self) {
        for slot in &mut self.slots {
            if *slot == Slot::Unassigned {
                *slot = Slot::Disabled;
            }
        }
    }

    /// Returns true if `position` is past the hardware slots.
    #[must_use]
    pub fn is_emulated(&self, position: usize) -> bool {
        position >= self.capacity()
    }

    /// Position of a coil bank, hardware or emulated.
    #[must_use]
    pub fn coil_position(&self, bank: u8) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| *s == Slot::Coil { bank })
            .or_else(|| {
                self.emulated
                    .iter()
                    .position(|e| *e == EmulatedBank::Coil { bank })
                    .map(|i| self.capacity() + i)
            })
    }

    /// Position of the lamp group serving a source/sink pairing.
    #[must_use]
    pub fn lamp_position(&self, source_bank: u8, sink_bank: u8, source_output: u8) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| matches!(s, Slot::Lamp(l) if l.serves(source_bank, sink_bank, source_output)))
            .or_else(|| {
                self.emulated
                    .iter()
                    .position(|e| {
                        matches!(e, EmulatedBank::Lamp(l) if l.serves(source_bank, sink_bank, source_output))
                    })
                    .map(|i| self.capacity() + i)
            })
    }

    /// Physical number of `output` within the bank at `position`.
    #[must_use]
    pub fn physical_number(position: usize, output: u8) -> Option<u16> {
        u16::try_from(position)
            .ok()?
            .checked_mul(OUTPUTS_PER_BANK)?
            .checked_add(u16::from(output))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => write!(f, "unassigned"),
            Self::Dedicated { enabled: true } => write!(f, "dedicated"),
            Self::Dedicated { enabled: false } => write!(f, "dedicated (disabled)"),
            Self::Lamp(l) => write!(
                f,
                "lamp sink bank {} source output {} source index {}",
                l.sink_bank, l.source_output, l.source_index
            ),
            Self::Coil { bank } => write!(f, "coil bank {bank}"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}
