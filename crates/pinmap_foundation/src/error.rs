//! Error types for position-code resolution and bank allocation.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::{MachineGeneration, Section};

/// Convenience result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for pinmap operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about which machine item caused the error.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }
}

impl From<GrammarError> for Error {
    fn from(err: GrammarError) -> Self {
        Self::new(ErrorKind::Grammar(err))
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::new(ErrorKind::Decode(err))
    }
}

impl From<AllocationError> for Error {
    /// Lifts an allocation error, attaching the item it concerns.
    fn from(err: AllocationError) -> Self {
        let context = err.context();
        let error = Self::new(ErrorKind::Allocation(err));
        match context {
            Some(context) => error.with_context(context),
            None => error,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A position code did not fit the address grammar.
    #[error(transparent)]
    Grammar(GrammarError),

    /// A position code could not be decoded to a number.
    #[error(transparent)]
    Decode(DecodeError),

    /// The machine description cannot be wired onto the hardware.
    #[error(transparent)]
    Allocation(AllocationError),
}

/// Errors from the bus/matrix address grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A matrix address did not split into exactly two halves.
    #[error("not a matrix address: {code} ({parts} part(s), expected 2)")]
    NotMatrix {
        /// The offending code (after alias rewriting).
        code: String,
        /// Number of parts found.
        parts: usize,
    },

    /// The code has no recognizable bus address delimiter or shape.
    #[error("not a bus address: {code}")]
    NotBusAddress {
        /// The offending code (after alias rewriting).
        code: String,
    },

    /// One component of a bus address was not a valid number.
    #[error("bad component {component:?} in bus address {code}")]
    BadComponent {
        /// The offending code (after alias rewriting).
        code: String,
        /// The component that failed to parse.
        component: String,
    },

    /// A bus address component is larger than the driver bus allows.
    #[error("{component} {value} out of range in bus address {code} (at most {max})")]
    OutOfRange {
        /// The offending code (after alias rewriting).
        code: String,
        /// Which component: `board` or `bank`.
        component: &'static str,
        /// The parsed value.
        value: u8,
        /// The largest accepted value.
        max: u8,
    },
}

/// Errors from the per-generation position-code decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No formula matched and the code is not a plain number either.
    #[error("invalid {generation} position code: {code:?}")]
    InvalidCode {
        /// The generation the code was decoded under.
        generation: MachineGeneration,
        /// The code that failed.
        code: String,
    },
}

/// Structural errors that abort a whole allocation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// More distinct lamp source banks than the lamp matrix supports.
    #[error("too many lamp source banks: {banks:?} (at most 2 supported)")]
    TooManySourceBanks {
        /// Every distinct source bank, in first-seen order.
        banks: Vec<u8>,
    },

    /// A switch resolved to a number the controller cannot read.
    #[error("switch {name} resolves to {index}, beyond the switch count {limit}")]
    SwitchOutOfRange {
        /// The switch name.
        name: String,
        /// The declared position code.
        code: String,
        /// The resolved switch number.
        index: u16,
        /// The number of switch inputs.
        limit: u16,
    },

    /// A switch position code could not be decoded.
    #[error("switch {name}: {source}")]
    InvalidSwitch {
        /// The switch name.
        name: String,
        /// Why decoding failed.
        source: DecodeError,
    },
}

impl AllocationError {
    /// The machine item this error concerns.
    ///
    /// Switch errors name the switch; a source bank overflow points at the
    /// lamp section as a whole.
    #[must_use]
    pub fn context(&self) -> Option<ErrorContext> {
        match self {
            Self::TooManySourceBanks { .. } => Some(ErrorContext::new().with_section(Section::Lamp)),
            Self::SwitchOutOfRange { name, code, .. } => Some(
                ErrorContext::new()
                    .with_section(Section::Switch)
                    .with_name(name.clone())
                    .with_code(code.clone()),
            ),
            Self::InvalidSwitch { name, source } => {
                let DecodeError::InvalidCode { code, .. } = source;
                Some(
                    ErrorContext::new()
                        .with_section(Section::Switch)
                        .with_name(name.clone())
                        .with_code(code.clone()),
                )
            }
        }
    }
}

/// Context about which machine item an error concerns.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The section the item was declared in.
    pub section: Option<Section>,
    /// The item name.
    pub name: Option<String>,
    /// The raw position code, as declared.
    pub code: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the section.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    /// Sets the item name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the raw position code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(section) = self.section {
            write!(f, "in {section}")?;
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if let Some(code) = &self.code {
            write!(f, " ({code})")?;
        }
        Ok(())
    }
}
