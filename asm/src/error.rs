use arch::op::Op;
use color_print::cprintln;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Error kinds

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("Unknown instruction: `{0}`")]
    UnknownInstruction(String),

    #[error("Too many operands for `{0}`")]
    ExtraOperands(String),

    #[error("Instruction {0} expects an operand")]
    MissingOperand(Op),

    #[error("Cannot parse `{1}` as a value for constant `{0}`")]
    BadConstValue(String, String),

    #[error("`db` expects at least one argument")]
    EmptyData,

    #[error("Cannot parse `{0}` as a byte or string literal")]
    BadDataArg(String),

    #[error("Invalid escape `\\{0}` in string literal")]
    BadEscape(String),

    #[error("Byte value {0} out of range 0..=255")]
    ByteOutOfRange(i128),

    #[error("Character `{0}` does not fit in a byte")]
    CharOutOfRange(char),

    #[error("Negative repeat count {0} for `times`")]
    NegativeRepeat(i64),

    #[error("Value {value} does not fit in a {width}-byte immediate")]
    ImmOutOfRange { value: i128, width: usize },

    #[error("Re-defined label: `{name}` (first defined on line {first})")]
    RedefinedLabel { name: String, first: usize },

    #[error("Re-defined constant: `{name}` (first defined on line {first})")]
    RedefinedConst { name: String, first: usize },

    #[error("Undefined symbol: `{0}`")]
    UndefinedSymbol(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// The four coarse classes the assembler reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Syntax,
    Range,
    Redefinition,
    UnresolvedSymbol,
}

impl ErrorKind {
    pub fn class(&self) -> ErrorClass {
        use ErrorKind::*;
        match self {
            UnknownInstruction(_) | ExtraOperands(_) | MissingOperand(_) | BadConstValue(..)
            | EmptyData | BadDataArg(_) | BadEscape(_) | Internal(_) => ErrorClass::Syntax,
            ByteOutOfRange(_) | CharOutOfRange(_) | NegativeRepeat(_) | ImmOutOfRange { .. } => {
                ErrorClass::Range
            }
            RedefinedLabel { .. } | RedefinedConst { .. } => ErrorClass::Redefinition,
            UndefinedSymbol(_) => ErrorClass::UnresolvedSymbol,
        }
    }

    pub fn at(self, line: usize, raw: &str) -> Error {
        Error {
            kind: self,
            line: Some(line),
            raw: Some(raw.to_string()),
        }
    }
}

// ----------------------------------------------------------------------------
// Error with source context

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub line: Option<usize>,
    pub raw: Option<String>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind,
            line: None,
            raw: None,
        }
    }
}

impl Error {
    /// Print the error with its source location and the offending line.
    pub fn diag(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self.kind);
        if let Some(line) = self.line {
            cprintln!("     <blue>--></> <underline>{}:{}</>", file, line);
            cprintln!("      <blue>|</>");
            cprintln!(" <blue>{:>4} |</> {}", line, self.raw.as_deref().unwrap_or(""));
            cprintln!("      <blue>|</>");
        }
    }
}
