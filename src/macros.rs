/// Capture the file and line of the macro invocation as a
/// [`SourceLocation`](crate::domain::SourceLocation).
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::domain::SourceLocation::new(file!(), line!())
    };
}

/// Wrap a [`DomainError`](crate::domain::DomainError) into a
/// [`DetailedError`](crate::domain::DetailedError) located at the call site.
#[macro_export]
macro_rules! detailed_error {
    ($err:expr) => {
        $crate::domain::DetailedError::new($err, $crate::source_location!())
    };
}
