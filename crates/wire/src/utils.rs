//! Utility macros shared by the wire crate.

/// Returns early with the given error when the predicate does not hold.
///
/// Works like `assert!` but yields an `Err` instead of panicking, so
/// validation code can stay flat.
///
/// # Example
///
/// ```ignore
/// ensure!(!host.is_empty(), UrlError::invalid_hostname(host));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
