use thiserror::Error;

/// Errors that can occur when registering timers or selecting a report format.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A timer was requested with an empty name. Every timer needs a name because the
    /// name is both its identity and its label in reports.
    #[error("cannot create a timer without a name")]
    NameRequired,

    /// A timer with the same name is already registered.
    #[error("timer {name:?} is already defined")]
    DuplicateName {
        /// The name that was already taken.
        name: String,
    },

    /// The parent timer was registered by a different [`Registry`][crate::Registry].
    ///
    /// A display tree never spans registries, so a parent can only be used with the
    /// registry that created it.
    #[error("parent timer {parent:?} belongs to a different registry")]
    ForeignParent {
        /// Name of the parent timer that was rejected.
        parent: String,
    },

    /// A report format name did not match any known format.
    #[error("unknown report format {value:?}, expected one of: table, plain, csv")]
    UnknownFormat {
        /// The value that could not be parsed.
        value: String,
    },
}

/// A specialized `Result` type for timer operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn duplicate_name_message_mentions_name() {
        let error = Error::DuplicateName {
            name: "outer".to_string(),
        };

        assert_eq!(error.to_string(), "timer \"outer\" is already defined");
    }

    #[test]
    fn name_required_is_error() {
        let result: Result<()> = Err(Error::NameRequired);
        assert!(matches!(result, Err(Error::NameRequired)));
    }
}
