//! Crate-wide error type
use std::fmt;

use crate::dispatch::Op;

/// Result of a dispatched query
pub type Result<T> = std::result::Result<T, DistError>;

/// Errors raised while answering a distribution query
#[derive(Clone, Debug, PartialEq)]
pub enum DistError {
    /// The requested name is not part of the supported vocabulary
    NotImplemented {
        /// The name as requested
        name: String,
    },
    /// The operation exists but the distribution does not define it, e.g.
    /// `pmf` on a continuous distribution
    Undefined {
        /// The rejected operation
        op: Op,
    },
    /// Wrong number of arguments on the name-keyed boundary
    Arity {
        /// The operation or property being called
        name: &'static str,
        /// Smallest accepted number of arguments
        min: usize,
        /// Largest accepted number of arguments
        max: usize,
        /// Number of arguments supplied
        got: usize,
    },
    /// An argument is outside the domain the operation accepts
    InvalidArgument {
        /// The operation being called
        op: Op,
        /// The offending value
        value: f64,
    },
    /// A source answered with a value of the wrong shape for the operation
    UnexpectedValue {
        /// The operation being called
        op: Op,
        /// The shape that came back
        found: &'static str,
    },
}

impl std::error::Error for DistError {}

impl fmt::Display for DistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented { name } => {
                write!(f, "{name} is not implemented")
            }
            Self::Undefined { op } => {
                write!(f, "{op} is not defined for this distribution")
            }
            Self::Arity {
                name,
                min,
                max,
                got,
            } if min == max => {
                write!(f, "{name} takes {min} argument(s) but {got} were given")
            }
            Self::Arity {
                name,
                min,
                max,
                got,
            } => write!(
                f,
                "{name} takes {min} to {max} arguments but {got} were given"
            ),
            Self::InvalidArgument { op, value } => {
                write!(f, "invalid argument to {op}: {value}")
            }
            Self::UnexpectedValue { op, found } => {
                write!(f, "{op} returned an unexpected {found}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_implemented_names_the_operation() {
        let err = DistError::NotImplemented {
            name: String::from("foobar"),
        };
        assert_eq!(err.to_string(), "foobar is not implemented");
    }

    #[test]
    fn arity_message_with_fixed_count() {
        let err = DistError::Arity {
            name: "pdf",
            min: 1,
            max: 1,
            got: 0,
        };
        assert_eq!(err.to_string(), "pdf takes 1 argument(s) but 0 were given");
    }

    #[test]
    fn arity_message_with_range() {
        let err = DistError::Arity {
            name: "rvs",
            min: 0,
            max: 1,
            got: 3,
        };
        assert_eq!(err.to_string(), "rvs takes 0 to 1 arguments but 3 were given");
    }
}
