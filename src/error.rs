use crate::ptype::TypeTag;

use core::fmt;

/// Signal a contract violation
///
/// Contract violations indicate a bug in the calling code, not a
/// recoverable condition. They carry their source location so the
/// offending call site can be found.
///
#[macro_export]
macro_rules! contract_violation {
    () => {
        $crate::error::Error::ContractViolation(None, std::file!(), std::line!())
    };
    ( $x:expr ) => {
        $crate::error::Error::ContractViolation(Some($x.to_string()), std::file!(), std::line!())
    };
}

/// The coarse taxonomy of failures
///
/// Every [Error] variant maps onto one of these kinds. The first three
/// are recoverable at the caller's discretion; `ContractViolation` is a
/// programmer error and should not be caught and suppressed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IncompatibleType,
    IncompatibleSize,
    InvalidLocation,
    ContractViolation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    // type resolution
    IncompatibleType {
        lhs: TypeTag,
        rhs: TypeTag,
    },
    IncompatibleRecordFields {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    // size resolution
    IncompatibleSize {
        // (operand index, operand size) for each offender
        sizes: Vec<(usize, usize)>,
        size: usize,
    },
    AssignmentSize {
        needed: usize,
        given: usize,
    },

    // location normalization
    MixedSignLocation,
    OutOfBounds {
        index: i32,
        size: usize,
    },
    MaskLength {
        mask: usize,
        size: usize,
    },
    UnknownName(String),
    InvalidName,
    MissingLocation,
    Unnamed,

    // programmer errors
    ContractViolation(Option<String>, &'static str, u32),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IncompatibleType { .. } => ErrorKind::IncompatibleType,
            Error::IncompatibleRecordFields { .. } => ErrorKind::IncompatibleType,
            Error::IncompatibleSize { .. } => ErrorKind::IncompatibleSize,
            Error::AssignmentSize { .. } => ErrorKind::IncompatibleSize,
            Error::MixedSignLocation => ErrorKind::InvalidLocation,
            Error::OutOfBounds { .. } => ErrorKind::InvalidLocation,
            Error::MaskLength { .. } => ErrorKind::InvalidLocation,
            Error::UnknownName(_) => ErrorKind::InvalidLocation,
            Error::InvalidName => ErrorKind::InvalidLocation,
            Error::MissingLocation => ErrorKind::InvalidLocation,
            Error::Unnamed => ErrorKind::InvalidLocation,
            Error::ContractViolation(..) => ErrorKind::ContractViolation,
        }
    }

    fn as_str(&self) -> String {
        match self {
            Error::IncompatibleType { lhs, rhs } => {
                format!("no common type for <{lhs}> and <{rhs}>")
            }
            Error::IncompatibleRecordFields { missing, extra } => {
                let mut parts = vec![];
                if !missing.is_empty() {
                    parts.push(format!("missing fields {}", quote_join(missing)))
                }
                if !extra.is_empty() {
                    parts.push(format!("extra fields {}", quote_join(extra)))
                }
                format!("record fields do not match: {}", parts.join(", "))
            }
            Error::IncompatibleSize { sizes, size } => {
                let offenders = sizes
                    .iter()
                    .map(|(i, n)| format!("size {n} (operand {i})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("cannot recycle {offenders} to common size {size}")
            }
            Error::AssignmentSize { needed, given } => {
                format!("cannot assign {given} values to {needed} locations")
            }
            Error::MixedSignLocation => "cannot mix positive and negative locations".to_string(),
            Error::OutOfBounds { index, size } => {
                format!("location {index} does not exist for a vector of size {size}")
            }
            Error::MaskLength { mask, size } => {
                format!("mask of length {mask} cannot select from a vector of size {size}")
            }
            Error::UnknownName(name) => format!("unknown name '{name}'"),
            Error::InvalidName => "names must be non-missing and non-empty".to_string(),
            Error::MissingLocation => "missing locations are not permitted".to_string(),
            Error::Unnamed => "cannot select by name from an unnamed vector".to_string(),
            Error::ContractViolation(None, file, line) => {
                format!("Contract Violation ({file}:{line})")
            }
            Error::ContractViolation(Some(msg), file, line) => {
                format!("Contract Violation ({file}:{line})\n{msg}")
            }
        }
    }
}

fn quote_join(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {}", self.as_str())
    }
}

impl std::error::Error for Error {}

impl<T> From<Error> for Result<T, Error> {
    fn from(val: Error) -> Self {
        Err(val)
    }
}
