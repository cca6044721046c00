//! Allocation inputs: the machine description and hardware parameters.

use pinmap_address::AliasRule;
use pinmap_foundation::MachineGeneration;
use pinmap_foundation::hardware::{
    DEDICATED_GROUP_COUNT, DEFAULT_LAMP_STROBE_TIME, DEFAULT_WATCHDOG_TIME, DRIVER_GROUP_COUNT,
    INITIALISED_DRIVER_COUNT, MAX_BANK_INDEX, MAX_LAMP_SOURCE_BANKS, SWITCH_COUNT,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Machine-wide driver parameters supplied by the machine description.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverGlobals {
    /// Strobe time for lamp matrix driver groups.
    pub lamp_matrix_strobe_time: u16,
    /// Watchdog reset time.
    pub watchdog_time: u16,
    /// Whether the board watchdog is enabled.
    pub use_watchdog: bool,
}

impl Default for DriverGlobals {
    fn default() -> Self {
        Self {
            lamp_matrix_strobe_time: DEFAULT_LAMP_STROBE_TIME,
            watchdog_time: DEFAULT_WATCHDOG_TIME,
            use_watchdog: true,
        }
    }
}

impl DriverGlobals {
    /// Builder method to set the lamp matrix strobe time.
    #[must_use]
    pub fn with_lamp_matrix_strobe_time(mut self, time: u16) -> Self {
        self.lamp_matrix_strobe_time = time;
        self
    }

    /// Builder method to set the watchdog reset time.
    #[must_use]
    pub fn with_watchdog_time(mut self, time: u16) -> Self {
        self.watchdog_time = time;
        self
    }

    /// Builder method to enable/disable the watchdog.
    #[must_use]
    pub fn with_watchdog(mut self, enabled: bool) -> Self {
        self.use_watchdog = enabled;
        self
    }
}

/// Hardware capacities the allocator packs against.
///
/// The defaults describe the real controller; tests shrink them to exercise
/// overflow with small inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Number of hardware driver groups (slots).
    pub driver_group_count: usize,
    /// Leading groups reserved for the dedicated driver pins.
    pub dedicated_group_count: usize,
    /// Bank indices at or above this cannot be driven by a group.
    pub max_bank_index: u8,
    /// Maximum distinct lamp source banks.
    pub max_lamp_source_banks: usize,
    /// Number of switch inputs.
    pub switch_count: u16,
    /// Number of drivers initialised at bring-up.
    pub initialised_driver_count: u16,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            driver_group_count: DRIVER_GROUP_COUNT,
            dedicated_group_count: DEDICATED_GROUP_COUNT,
            max_bank_index: MAX_BANK_INDEX,
            max_lamp_source_banks: MAX_LAMP_SOURCE_BANKS,
            switch_count: SWITCH_COUNT,
            initialised_driver_count: INITIALISED_DRIVER_COUNT,
        }
    }
}

impl AllocatorConfig {
    /// Builder method to set the driver group count.
    #[must_use]
    pub fn with_driver_group_count(mut self, count: usize) -> Self {
        self.driver_group_count = count;
        self
    }

    /// Builder method to set the dedicated group count.
    #[must_use]
    pub fn with_dedicated_group_count(mut self, count: usize) -> Self {
        self.dedicated_group_count = count;
        self
    }

    /// Builder method to set the bank index bound.
    #[must_use]
    pub fn with_max_bank_index(mut self, bound: u8) -> Self {
        self.max_bank_index = bound;
        self
    }
}

/// One declared machine item: a name and its position code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityDecl {
    /// Item name.
    pub name: String,
    /// Position code, as written by the machine author.
    pub number: String,
}

impl EntityDecl {
    /// Creates a declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// How an alias entry's expression is matched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AliasKind {
    /// Replace every occurrence of the expression.
    #[default]
    Substring,
    /// Replace the code only when it equals the expression.
    Exact,
    /// Replace a leading expression, keeping the rest.
    Prefix,
}

/// A declarative alias rule, as found in a machine description.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AliasEntry {
    /// What to look for.
    pub expr: String,
    /// What to put in its place.
    pub repl: String,
    /// How `expr` is matched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: AliasKind,
}

impl AliasEntry {
    /// Creates a substring alias entry.
    #[must_use]
    pub fn new(expr: impl Into<String>, repl: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            repl: repl.into(),
            kind: AliasKind::Substring,
        }
    }

    /// Builder method to set the match kind.
    #[must_use]
    pub fn with_kind(mut self, kind: AliasKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builds the executable rule.
    #[must_use]
    pub fn to_rule(&self) -> AliasRule {
        match self.kind {
            AliasKind::Substring => AliasRule::substring(&self.expr, &self.repl),
            AliasKind::Exact => AliasRule::exact(&self.expr, &self.repl),
            AliasKind::Prefix => AliasRule::prefix(&self.expr, &self.repl),
        }
    }
}

/// Everything the allocator needs to know about one machine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineDescription {
    /// Hardware generation of the machine.
    pub generation: MachineGeneration,
    /// Coils, in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub coils: Vec<EntityDecl>,
    /// Lamps, in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lamps: Vec<EntityDecl>,
    /// Switches, in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub switches: Vec<EntityDecl>,
    /// Alias rules, applied in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<AliasEntry>,
    /// Driver globals; defaults apply when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub globals: Option<DriverGlobals>,
}

impl MachineDescription {
    /// Creates an empty description for a generation.
    #[must_use]
    pub fn new(generation: MachineGeneration) -> Self {
        Self {
            generation,
            coils: Vec::new(),
            lamps: Vec::new(),
            switches: Vec::new(),
            aliases: Vec::new(),
            globals: None,
        }
    }

    /// Builder method to declare a coil.
    #[must_use]
    pub fn with_coil(mut self, name: impl Into<String>, number: impl Into<String>) -> Self {
        self.coils.push(EntityDecl::new(name, number));
        self
    }

    /// Builder method to declare a lamp.
    #[must_use]
    pub fn with_lamp(mut self, name: impl Into<String>, number: impl Into<String>) -> Self {
        self.lamps.push(EntityDecl::new(name, number));
        self
    }

    /// Builder method to declare a switch.
    #[must_use]
    pub fn with_switch(mut self, name: impl Into<String>, number: impl Into<String>) -> Self {
        self.switches.push(EntityDecl::new(name, number));
        self
    }

    /// Builder method to append an alias rule.
    #[must_use]
    pub fn with_alias(mut self, alias: AliasEntry) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Builder method to set driver globals.
    #[must_use]
    pub fn with_globals(mut self, globals: DriverGlobals) -> Self {
        self.globals = Some(globals);
        self
    }

    /// The driver globals, or the defaults when none were given.
    #[must_use]
    pub fn globals_or_default(&self) -> DriverGlobals {
        self.globals.clone().unwrap_or_default()
    }

    /// The executable alias rules, in order.
    #[must_use]
    pub fn alias_rules(&self) -> Vec<AliasRule> {
        self.aliases.iter().map(AliasEntry::to_rule).collect()
    }
}
