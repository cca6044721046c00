//! Fixed capacities of the driver board.

/// Total number of driver lines the controller exposes.
pub const DRIVER_COUNT: u16 = 256;

/// Total number of switch inputs the controller exposes.
pub const SWITCH_COUNT: u16 = 256;

/// Number of outputs co-driven by one bank.
pub const OUTPUTS_PER_BANK: u16 = 8;

/// Number of driver banks on one board.
pub const BANKS_PER_BOARD: u8 = 2;

/// Highest board number whose flat bank (`board * 2 + bank`) fits in a `u8`.
pub const MAX_BOARD: u8 = 127;

/// Number of hardware driver groups (slots) the controller can drive directly.
pub const DRIVER_GROUP_COUNT: usize = 26;

/// Groups 0-3 are wired to the dedicated driver pins.
pub const DEDICATED_GROUP_COUNT: usize = 4;

/// Bank indices at or above this value cannot be addressed by a driver group.
pub const MAX_BANK_INDEX: u8 = 16;

/// Lamp matrices support at most this many distinct source (column) banks.
pub const MAX_LAMP_SOURCE_BANKS: usize = 2;

/// Number of drivers whose state is initialised at bring-up.
pub const INITIALISED_DRIVER_COUNT: u16 = 208;

/// First switch number used by matrix switches.
pub const MATRIX_SWITCH_BASE: u16 = 32;

/// First switch number used by dedicated switches.
pub const DEDICATED_SWITCH_BASE: u16 = 8;

/// Width of one row in the switch matrix numbering.
pub const MATRIX_SWITCH_ROW_WIDTH: u16 = 16;

/// Default lamp matrix strobe time.
pub const DEFAULT_LAMP_STROBE_TIME: u16 = 200;

/// Default watchdog reset time.
pub const DEFAULT_WATCHDOG_TIME: u16 = 1000;
