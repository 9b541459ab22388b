//! Wrapped errors carrying a code and the source location that raised them.

use std::fmt;

use thiserror::Error;

use super::DomainError;

/// Numeric error class attached to every [`DetailedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    /// Class used for every failure the processor currently detects.
    pub const DEFAULT: ErrorCode = ErrorCode(1000);
}

impl Default for ErrorCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// File and line where a failure was detected.
///
/// Build one with [`source_location!`](crate::source_location) at the
/// detection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A domain failure augmented with an error code and its source location.
///
/// The wrapped [`DomainError`] stays reachable through `source()` and its
/// message is repeated verbatim in the `Display` output.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "Error Code: [{code}] Error occurred in script: [{}] at line number: [{}] error message: [{source}]",
    .location.file,
    .location.line
)]
pub struct DetailedError {
    #[source]
    source: DomainError,
    code: ErrorCode,
    location: SourceLocation,
}

impl DetailedError {
    /// Wrap `source` with the default error code.
    pub fn new(source: DomainError, location: SourceLocation) -> Self {
        Self::with_code(source, ErrorCode::DEFAULT, location)
    }

    pub fn with_code(source: DomainError, code: ErrorCode, location: SourceLocation) -> Self {
        Self {
            source,
            code,
            location,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The underlying domain failure.
    pub fn domain_error(&self) -> &DomainError {
        &self.source
    }
}
