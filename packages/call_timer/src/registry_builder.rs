use crate::{Registry, ReportFormat};

/// Creates instances of [`Registry`] with a non-default configuration.
///
/// Use [`Registry::builder()`] to create a new instance of this builder.
///
/// Every setting is optional and can still be changed on the registry after it is built.
#[derive(Debug)]
#[must_use]
pub struct RegistryBuilder {
    active: bool,
    format: ReportFormat,
}

impl RegistryBuilder {
    pub(crate) fn new() -> Self {
        Self {
            active: true,
            format: ReportFormat::default(),
        }
    }

    /// Sets whether the registry starts out recording and reporting. Defaults to `true`.
    ///
    /// An inactive registry hands out inert timers. See [`Registry::set_active()`].
    pub fn active(self, active: bool) -> Self {
        Self { active, ..self }
    }

    /// Sets the initial report format. Defaults to [`ReportFormat::PlainText`].
    ///
    /// # Example
    ///
    /// ```
    /// use call_timer::{Registry, ReportFormat};
    ///
    /// let registry = Registry::builder().format(ReportFormat::Table).build();
    ///
    /// assert_eq!(registry.format(), ReportFormat::Table);
    /// ```
    pub fn format(self, format: ReportFormat) -> Self {
        Self { format, ..self }
    }

    /// Creates the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry::with_settings(self.active, self.format)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(RegistryBuilder: Send, Sync);

    #[test]
    fn defaults_match_registry_new() {
        let built = RegistryBuilder::new().build();
        let new = Registry::new();

        assert_eq!(built.is_active(), new.is_active());
        assert_eq!(built.format(), new.format());
    }

    #[test]
    fn applies_settings() {
        let registry = RegistryBuilder::new()
            .active(false)
            .format(ReportFormat::Csv)
            .build();

        assert!(!registry.is_active());
        assert_eq!(registry.format(), ReportFormat::Csv);
    }
}
