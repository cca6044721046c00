//! Bank allocation.
//!
//! One pass turns a [`MachineDescription`] into an [`Allocation`]:
//!
//! ```text
//! coils, lamps, switches
//!          │  resolve every position code
//!          ▼
//! ┌─────────────────┐
//! │ COLLECT BANKS   │  distinct coil banks, lamp groups, ≤ 2 lamp source banks
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ PACK SLOTS      │  0-3 dedicated │ lamp groups │ coil banks │ disabled
//! └─────────────────┘  banks that do not fit become emulated markers
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ NUMBER ITEMS    │  position * 8 + output
//! └─────────────────┘
//!          │
//!          ▼
//!   Allocation (table, group records, two global records, driver states)
//! ```
//!
//! Lamp groups are packed before coil banks: a lamp matrix must be strobed by
//! hardware, while an overflowing coil bank can still be driven in software.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info, warn};
use pinmap_address::{
    AliasRule, BusAddress, CoilAddress, LampAddress, ResolvedAddress, SwitchAddress,
};
use pinmap_foundation::hardware::{DRIVER_COUNT, OUTPUTS_PER_BANK};
use pinmap_foundation::{AllocationError, MachineGeneration, Section};

use crate::config::{AllocatorConfig, DriverGlobals, EntityDecl, MachineDescription};
use crate::records::{DriverState, GlobalConfig, GroupConfig};
use crate::registry::BoardRegistry;
use crate::slot::{EmulatedBank, LampBank, Slot, SlotTable};
use crate::table::{Resolution, ResolvedEntity, ResolvedTable};
use crate::transport::DriverTransport;

/// Why an item received no physical number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The code fit no grammar.
    UnknownCode,
    /// A dedicated coil pin beyond the dedicated driver groups.
    DedicatedOutOfRange(u16),
    /// A bus output beyond the eight outputs of a bank.
    OutputOutOfRange(u8),
    /// The computed number does not fit a driver number.
    NumberOverflow,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCode => write!(f, "unrecognized position code"),
            Self::DedicatedOutOfRange(pin) => {
                write!(f, "dedicated pin {pin} is outside the dedicated driver groups")
            }
            Self::OutputOutOfRange(output) => write!(f, "output {output} is not within a bank"),
            Self::NumberOverflow => write!(f, "driver number overflow"),
        }
    }
}

/// Something the caller should know about, but which did not stop allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocationNotice {
    /// An item kept its name but received no number.
    Unresolved {
        /// Section of the item.
        section: Section,
        /// Item name.
        name: String,
        /// Declared position code.
        code: String,
        /// Why it did not resolve.
        reason: UnresolvedReason,
    },
    /// A coil bank had no hardware group and will be driven in software.
    DowngradedCoilBank {
        /// Flat coil bank.
        bank: u8,
        /// Position of its emulated-bank marker.
        position: usize,
    },
    /// A lamp group had no hardware group and will be driven in software.
    UnmappedLampBank {
        /// Flat sink bank of the group.
        sink_bank: u8,
        /// Position of its emulated-bank marker.
        position: usize,
    },
}

impl fmt::Display for AllocationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved {
                section,
                name,
                code,
                reason,
            } => write!(f, "{section} {name} ({code}) cannot be driven: {reason}"),
            Self::DowngradedCoilBank { bank, position } => write!(
                f,
                "coil bank {bank} mapped to index {position} outside hardware control; its drivers are emulated"
            ),
            Self::UnmappedLampBank {
                sink_bank,
                position,
            } => write!(
                f,
                "lamp sink bank {sink_bank} cannot be mapped to a driver group; emulated at index {position}"
            ),
        }
    }
}

/// Packs machine items onto hardware driver groups.
#[derive(Clone, Debug, Default)]
pub struct BankAllocator {
    config: AllocatorConfig,
}

/// Banks gathered from the resolved coils and lamps.
#[derive(Default)]
struct CollectedBanks {
    /// Every coil bank, dedicated or bus; enables dedicated groups.
    all_coil_banks: BTreeSet<u8>,
    /// Distinct bus coil banks, first-seen order.
    coil_banks: Vec<u8>,
    /// Distinct lamp source banks, first-seen order.
    source_banks: Vec<u8>,
    /// Distinct lamp groups, first-seen order.
    lamp_banks: Vec<LampBank>,
}

impl BankAllocator {
    /// Creates an allocator for the given hardware capacities.
    #[must_use]
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// The hardware capacities in use.
    #[must_use]
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Runs one complete allocation pass.
    ///
    /// Codes that do not resolve are reported as notices and kept in the
    /// table without a number; banks that do not fit are emulated.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::TooManySourceBanks`] when lamps use more
    /// source banks than the matrix supports, and
    /// [`AllocationError::InvalidSwitch`] or
    /// [`AllocationError::SwitchOutOfRange`] for a switch that cannot be read.
    pub fn allocate(&self, description: &MachineDescription) -> Result<Allocation, AllocationError> {
        let generation = description.generation;
        let aliases = description.alias_rules();
        let globals = description.globals_or_default();
        let mut notices = Vec::new();

        let switches = self.resolve_switches(generation, &description.switches)?;
        let coils: Vec<(&EntityDecl, CoilAddress)> = description
            .coils
            .iter()
            .map(|decl| (decl, CoilAddress::resolve(generation, &decl.number, &aliases)))
            .collect();
        let lamps: Vec<(&EntityDecl, LampAddress)> = description
            .lamps
            .iter()
            .map(|decl| (decl, LampAddress::resolve(generation, &decl.number, &aliases)))
            .collect();

        let mut registry = BoardRegistry::new();
        let mut slots = SlotTable::default();
        let mut source_banks = Vec::new();

        if generation.uses_driver_banks() {
            let banks = collect_banks(&coils, &lamps, &mut registry);
            if banks.source_banks.len() > self.config.max_lamp_source_banks {
                return Err(AllocationError::TooManySourceBanks {
                    banks: banks.source_banks,
                });
            }
            slots = self.pack(&banks, &mut notices);
            source_banks = banks.source_banks;
        }

        let mut table = ResolvedTable::new();
        for (decl, coil) in &coils {
            let resolution = self.number_coil(&slots, coil);
            table.insert(entity(Section::Coil, decl, coil.address(), resolution, &mut notices));
        }
        for (decl, lamp) in &lamps {
            let resolution = self.number_lamp(&slots, lamp);
            table.insert(entity(Section::Lamp, decl, lamp.address(), resolution, &mut notices));
        }
        for (decl, switch) in switches {
            let resolution = Ok(Resolution::Hardware(switch.index));
            table.insert(entity(Section::Switch, decl, switch.address(), resolution, &mut notices));
        }

        let (group_configs, global_configs, driver_states) = if generation.uses_driver_banks() {
            self.bring_up_records(&slots, &source_banks, &globals)
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };

        Ok(Allocation {
            config: self.config.clone(),
            generation,
            globals,
            aliases,
            slots,
            table,
            group_configs,
            global_configs,
            driver_states,
            registry,
            notices,
        })
    }

    fn resolve_switches<'a>(
        &self,
        generation: MachineGeneration,
        switches: &'a [EntityDecl],
    ) -> Result<Vec<(&'a EntityDecl, SwitchAddress)>, AllocationError> {
        switches
            .iter()
            .map(|decl| {
                let switch = SwitchAddress::resolve(generation, &decl.number).map_err(|source| {
                    AllocationError::InvalidSwitch {
                        name: decl.name.clone(),
                        source,
                    }
                })?;
                if switch.index >= self.config.switch_count {
                    return Err(AllocationError::SwitchOutOfRange {
                        name: decl.name.clone(),
                        code: decl.number.clone(),
                        index: switch.index,
                        limit: self.config.switch_count,
                    });
                }
                Ok((decl, switch))
            })
            .collect()
    }

    fn pack(&self, banks: &CollectedBanks, notices: &mut Vec<AllocationNotice>) -> SlotTable {
        let capacity = self.config.driver_group_count;
        let mut slots = SlotTable::new(capacity);
        let dedicated = self.config.dedicated_group_count.min(capacity);

        for group in 0..dedicated {
            let enabled = u8::try_from(group).is_ok_and(|g| banks.all_coil_banks.contains(&g));
            slots.set(group, Slot::Dedicated { enabled });
        }

        let mut next = dedicated;
        for lamp in &banks.lamp_banks {
            if next >= capacity || lamp.sink_bank >= self.config.max_bank_index {
                let position = slots.push_emulated(EmulatedBank::Lamp(*lamp));
                info!(
                    "lamp matrix sink bank {} can't be mapped to a driver group; emulated at index {position}",
                    lamp.sink_bank
                );
                notices.push(AllocationNotice::UnmappedLampBank {
                    sink_bank: lamp.sink_bank,
                    position,
                });
            } else {
                slots.set(next, Slot::Lamp(*lamp));
                next += 1;
            }
        }

        for &bank in &banks.coil_banks {
            if next >= capacity || bank >= self.config.max_bank_index {
                let position = slots.push_emulated(EmulatedBank::Coil { bank });
                info!(
                    "coil bank {bank} mapped to index {position} outside hardware control; drivers will be emulated"
                );
                notices.push(AllocationNotice::DowngradedCoilBank { bank, position });
            } else {
                slots.set(next, Slot::Coil { bank });
                next += 1;
            }
        }

        slots.disable_unassigned();
        slots
    }

    fn number_coil(&self, slots: &SlotTable, coil: &CoilAddress) -> Result<Resolution, UnresolvedReason> {
        match coil.address() {
            ResolvedAddress::Dedicated { output } => {
                if coil.generation().uses_driver_banks() {
                    let in_range = coil
                        .bank()
                        .is_some_and(|bank| usize::from(bank) < self.config.dedicated_group_count);
                    if !in_range {
                        return Err(UnresolvedReason::DedicatedOutOfRange(output));
                    }
                }
                let driver = coil
                    .dedicated_driver()
                    .ok_or(UnresolvedReason::DedicatedOutOfRange(output))?;
                Ok(flat(driver))
            }
            ResolvedAddress::Bus { output, .. } => {
                let bank = coil.bank().ok_or(UnresolvedReason::UnknownCode)?;
                let position = slots
                    .coil_position(bank)
                    .ok_or(UnresolvedReason::UnknownCode)?;
                banked(slots, position, output)
            }
            _ => Err(UnresolvedReason::UnknownCode),
        }
    }

    fn number_lamp(&self, slots: &SlotTable, lamp: &LampAddress) -> Result<Resolution, UnresolvedReason> {
        match lamp.address() {
            ResolvedAddress::Dedicated { output } => Ok(flat(output)),
            ResolvedAddress::BusLamp { source, sink } => {
                let position = slots
                    .lamp_position(source.bank_id(), sink.bank_id(), source.output)
                    .ok_or(UnresolvedReason::UnknownCode)?;
                banked(slots, position, sink.output)
            }
            _ => Err(UnresolvedReason::UnknownCode),
        }
    }

    fn bring_up_records(
        &self,
        slots: &SlotTable,
        source_banks: &[u8],
        globals: &DriverGlobals,
    ) -> (Vec<GroupConfig>, Vec<GlobalConfig>, Vec<DriverState>) {
        let group_configs: Vec<GroupConfig> = slots
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let index = u8::try_from(index).ok()?;
                let record = GroupConfig::for_slot(index, *slot, globals);
                debug!("{record}");
                Some(record)
            })
            .collect();

        let pair = [
            source_banks.first().copied().unwrap_or(0),
            source_banks.get(1).copied().unwrap_or(0),
        ];
        debug!(
            "driver globals: polarity=true matrix column index 0={} matrix column index 1={}",
            pair[0], pair[1]
        );
        let global_configs = vec![
            GlobalConfig::bus_driver(false, pair, globals),
            GlobalConfig::bus_driver(true, pair, globals),
        ];

        let driver_states = (0..self.config.initialised_driver_count)
            .map(DriverState::idle)
            .collect();

        (group_configs, global_configs, driver_states)
    }
}

fn collect_banks(
    coils: &[(&EntityDecl, CoilAddress)],
    lamps: &[(&EntityDecl, LampAddress)],
    registry: &mut BoardRegistry,
) -> CollectedBanks {
    let mut banks = CollectedBanks::default();

    for (_, coil) in coils {
        let Some(bank) = coil.bank() else { continue };
        banks.all_coil_banks.insert(bank);
        if let ResolvedAddress::Bus {
            board,
            bank: within,
            output,
        } = coil.address()
        {
            registry.record_coil(BusAddress::new(board, within, output));
            if !banks.coil_banks.contains(&bank) {
                banks.coil_banks.push(bank);
            }
        }
    }

    for (_, lamp) in lamps {
        let ResolvedAddress::BusLamp { source, sink } = lamp.address() else {
            continue;
        };
        registry.record_lamp(source, sink);

        let source_bank = source.bank_id();
        let source_index = match banks.source_banks.iter().position(|b| *b == source_bank) {
            Some(index) => index,
            None => {
                banks.source_banks.push(source_bank);
                banks.source_banks.len() - 1
            }
        };
        let group = LampBank {
            source_bank,
            // Only 0 or 1 survive the source-bank check.
            source_index: u8::try_from(source_index).unwrap_or(u8::MAX),
            source_output: source.output,
            sink_bank: sink.bank_id(),
        };
        if !banks.lamp_banks.contains(&group) {
            banks.lamp_banks.push(group);
        }
    }

    banks
}

/// A flat number from a dedicated pin or a generation decoder.
fn flat(number: u16) -> Resolution {
    if number < DRIVER_COUNT {
        Resolution::Hardware(number)
    } else {
        Resolution::Emulated(number)
    }
}

/// `position * 8 + output`, emulated when the position is past the hardware slots.
fn banked(slots: &SlotTable, position: usize, output: u8) -> Result<Resolution, UnresolvedReason> {
    if u16::from(output) >= OUTPUTS_PER_BANK {
        return Err(UnresolvedReason::OutputOutOfRange(output));
    }
    let number =
        SlotTable::physical_number(position, output).ok_or(UnresolvedReason::NumberOverflow)?;
    Ok(if slots.is_emulated(position) {
        Resolution::Emulated(number)
    } else {
        Resolution::Hardware(number)
    })
}

/// Builds a table entry, turning a failed resolution into a notice.
fn entity(
    section: Section,
    decl: &EntityDecl,
    address: ResolvedAddress,
    resolution: Result<Resolution, UnresolvedReason>,
    notices: &mut Vec<AllocationNotice>,
) -> ResolvedEntity {
    let resolution = resolution.unwrap_or_else(|reason| {
        warn!("{section} {} ({}) cannot be driven: {reason}", decl.name, decl.number);
        notices.push(AllocationNotice::Unresolved {
            section,
            name: decl.name.clone(),
            code: decl.number.clone(),
            reason,
        });
        Resolution::Unresolved
    });
    ResolvedEntity {
        name: decl.name.clone(),
        section,
        code: decl.number.clone(),
        address,
        resolution,
    }
}

/// The immutable result of one allocation pass.
///
/// Nothing in an `Allocation` changes after it is built. Reconfiguring a
/// running machine means allocating again and swapping the whole value (see
/// [`SharedAllocation`](crate::SharedAllocation)).
#[derive(Clone, Debug)]
pub struct Allocation {
    config: AllocatorConfig,
    generation: MachineGeneration,
    globals: DriverGlobals,
    aliases: Vec<AliasRule>,
    slots: SlotTable,
    table: ResolvedTable,
    group_configs: Vec<GroupConfig>,
    global_configs: Vec<GlobalConfig>,
    driver_states: Vec<DriverState>,
    registry: BoardRegistry,
    notices: Vec<AllocationNotice>,
}

impl Allocation {
    /// The generation this allocation was made for.
    #[must_use]
    pub fn generation(&self) -> MachineGeneration {
        self.generation
    }

    /// The driver globals in effect.
    #[must_use]
    pub fn globals(&self) -> &DriverGlobals {
        &self.globals
    }

    /// The slot table, including emulated-bank markers.
    #[must_use]
    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// Item name to physical number.
    #[must_use]
    pub fn table(&self) -> &ResolvedTable {
        &self.table
    }

    /// One record per hardware slot, ascending. Empty for generations
    /// without driver banks.
    #[must_use]
    pub fn group_configs(&self) -> &[GroupConfig] {
        &self.group_configs
    }

    /// The global records: outputs disabled first, then enabled.
    #[must_use]
    pub fn global_configs(&self) -> &[GlobalConfig] {
        &self.global_configs
    }

    /// Initial driver states.
    #[must_use]
    pub fn driver_states(&self) -> &[DriverState] {
        &self.driver_states
    }

    /// Bus boards in use.
    #[must_use]
    pub fn registry(&self) -> &BoardRegistry {
        &self.registry
    }

    /// Non-fatal events from the pass, in the order they occurred.
    #[must_use]
    pub fn notices(&self) -> &[AllocationNotice] {
        &self.notices
    }

    /// Resolves a position code against this allocation without changing it.
    ///
    /// Returns `None` when the code does not resolve to a number here.
    #[must_use]
    pub fn lookup(&self, section: Section, code: &str) -> Option<u16> {
        let allocator = BankAllocator::new(self.config.clone());
        let resolution = match section {
            Section::Coil => allocator.number_coil(
                &self.slots,
                &CoilAddress::resolve(self.generation, code, &self.aliases),
            ),
            Section::Lamp => allocator.number_lamp(
                &self.slots,
                &LampAddress::resolve(self.generation, code, &self.aliases),
            ),
            Section::Switch => {
                return SwitchAddress::resolve(self.generation, code)
                    .ok()
                    .map(|s| s.index);
            }
        };
        resolution.ok().and_then(Resolution::number)
    }

    /// Writes the bring-up sequence: driver states (skipped on simulated
    /// devices), group records in ascending slot order, then the global
    /// record with outputs disabled followed by the one with outputs enabled.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first transport error.
    pub fn apply<T: DriverTransport>(&self, transport: &mut T) -> Result<(), T::Error> {
        if !transport.is_simulated() {
            for state in &self.driver_states {
                transport.update_driver_state(state)?;
            }
        }
        for group in &self.group_configs {
            transport.update_group_config(group)?;
        }
        for global in &self.global_configs {
            transport.update_global_config(global)?;
        }
        Ok(())
    }
}
