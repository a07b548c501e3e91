use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Coarse error taxonomy, as reported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UndefinedFunction,
    Arity,
    TypeMismatch,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunctionError",
            ErrorImpl::TooManyArguments { .. } => "ArityError",
            ErrorImpl::ArrayAsScalar { .. } => "TypeMismatchError",
            ErrorImpl::ScalarAsArray { .. } => "TypeMismatchError",
            ErrorImpl::ArrayAsScalarParam { .. } => "TypeMismatchError",
            ErrorImpl::ScalarAsArrayParam { .. } => "TypeMismatchError",
            ErrorImpl::ArrayToNative { .. } => "TypeMismatchError",
            ErrorImpl::GlobalNameConflict { .. } => "TypeMismatchError",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UndefinedFunction { .. } => ErrorKind::UndefinedFunction,
            ErrorImpl::TooManyArguments { .. } => ErrorKind::Arity,
            _ => ErrorKind::TypeMismatch,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UndefinedFunction { function } => ErrorTip::Suggestion(format!(
                "Function `{}` is neither defined nor provided natively",
                function
            )),
            ErrorImpl::TooManyArguments { function, declared, received } => {
                ErrorTip::Suggestion(format!(
                    "`{}` declares {} parameter(s) but is called with {}",
                    function, declared, received
                ))
            }
            ErrorImpl::ArrayAsScalar { variable } => ErrorTip::Suggestion(format!(
                "`{}` is an array elsewhere; subscript it or pass it whole",
                variable
            )),
            ErrorImpl::ScalarAsArray { variable } => ErrorTip::Suggestion(format!(
                "`{}` is used as a scalar elsewhere and cannot be subscripted",
                variable
            )),
            ErrorImpl::ArrayAsScalarParam { .. } => ErrorTip::None,
            ErrorImpl::ScalarAsArrayParam { .. } => ErrorTip::None,
            ErrorImpl::ArrayToNative { function, .. } => ErrorTip::Suggestion(format!(
                "Native function `{}` accepts scalar arguments only",
                function
            )),
            ErrorImpl::GlobalNameConflict { name } => ErrorTip::Suggestion(format!(
                "Rename either the global variable or the function `{}`",
                name
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("undefined function {function:?}")]
    UndefinedFunction { function: String },
    #[error("{function:?} called with more arguments than declared")]
    TooManyArguments {
        function: String,
        declared: usize,
        received: usize,
    },
    #[error("can't use array {variable:?} as scalar")]
    ArrayAsScalar { variable: String },
    #[error("can't use scalar {variable:?} as array")]
    ScalarAsArray { variable: String },
    #[error("can't pass array {variable:?} as scalar param")]
    ArrayAsScalarParam { variable: String },
    #[error("can't pass scalar {argument:?} as array param")]
    ScalarAsArrayParam { argument: String },
    #[error("can't pass array {variable:?} to native function {function:?}")]
    ArrayToNative { variable: String, function: String },
    #[error("global var {name:?} can't also be a function")]
    GlobalNameConflict { name: String },
}
