//! Options controlling a conversion run.

use crate::{builder::PluralPairing, locale::DEFAULT_SOURCE_LOCALE, types::LocaleCode};

/// Conversion behavior for [`crate::converter::Conversion`] and
/// [`crate::converter::convert_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Locale whose mode supplies `<source>` text.
    pub source_locale: LocaleCode,
    /// How plural records are paired with their base record.
    pub plural_pairing: PluralPairing,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source_locale: LocaleCode::from(DEFAULT_SOURCE_LOCALE),
            plural_pairing: PluralPairing::default(),
        }
    }
}

impl ConvertOptions {
    /// Creates default convert options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source locale.
    pub fn with_source_locale(mut self, source_locale: impl Into<LocaleCode>) -> Self {
        self.source_locale = source_locale.into();
        self
    }

    /// Sets the plural pairing mode.
    pub fn with_plural_pairing(mut self, plural_pairing: PluralPairing) -> Self {
        self.plural_pairing = plural_pairing;
        self
    }
}
