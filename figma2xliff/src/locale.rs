//! Mode ↔ locale resolution.
//!
//! The export names its language variants by opaque mode IDs; everything
//! downstream speaks locale codes. [`LocaleIndex`] holds both directions plus
//! the mode ID of the configured source locale.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::types::{LocaleCode, ModeId};

/// Locale code the export is authored in unless configured otherwise.
pub const DEFAULT_SOURCE_LOCALE: &str = "en";

/// What a mode ID means for the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRole<'a> {
    /// The mode carrying source-language text.
    Source,
    /// A translation into the given locale.
    Target(&'a LocaleCode),
    /// Not declared in `modes`; values under it are ignored.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleIndex {
    locale_to_mode: IndexMap<LocaleCode, ModeId>,
    mode_to_locale: HashMap<ModeId, LocaleCode>,
    source_locale: LocaleCode,
    source_mode: Option<ModeId>,
}

impl LocaleIndex {
    /// Builds the index from the document's `modes` table.
    ///
    /// Two locales sharing a mode ID leave the later one in the inverse
    /// mapping. A source locale missing from `modes` leaves the index without a
    /// source mode, so every declared locale becomes a target.
    pub fn new(modes: &IndexMap<LocaleCode, ModeId>, source_locale: LocaleCode) -> Self {
        let locale_to_mode = modes.clone();
        let mode_to_locale = modes
            .iter()
            .map(|(locale, mode)| (mode.clone(), locale.clone()))
            .collect();
        let source_mode = locale_to_mode.get(&source_locale).cloned();

        Self {
            locale_to_mode,
            mode_to_locale,
            source_locale,
            source_mode,
        }
    }

    pub fn source_locale(&self) -> &LocaleCode {
        &self.source_locale
    }

    pub fn source_mode(&self) -> Option<&ModeId> {
        self.source_mode.as_ref()
    }

    pub fn mode_for(&self, locale: &LocaleCode) -> Option<&ModeId> {
        self.locale_to_mode.get(locale)
    }

    pub fn locale_for(&self, mode: &ModeId) -> Option<&LocaleCode> {
        self.mode_to_locale.get(mode)
    }

    /// Classifies a mode ID. The source check wins over the inverse mapping.
    pub fn resolve(&self, mode: &ModeId) -> ModeRole<'_> {
        if self.source_mode.as_ref() == Some(mode) {
            return ModeRole::Source;
        }
        match self.mode_to_locale.get(mode) {
            Some(locale) => ModeRole::Target(locale),
            None => ModeRole::Unknown,
        }
    }

    /// Every declared locale except the source locale, in document order.
    pub fn target_locales(&self) -> impl Iterator<Item = &LocaleCode> {
        self.locale_to_mode
            .keys()
            .filter(move |locale| **locale != self.source_locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes(pairs: &[(&str, &str)]) -> IndexMap<LocaleCode, ModeId> {
        pairs
            .iter()
            .map(|(locale, mode)| (LocaleCode::from(*locale), ModeId::from(*mode)))
            .collect()
    }

    #[test]
    fn test_bidirectional_mapping() {
        let index = LocaleIndex::new(
            &modes(&[("en", "m_en"), ("pt_br", "m_pt")]),
            LocaleCode::from("en"),
        );
        assert_eq!(
            index.mode_for(&LocaleCode::from("pt_br")),
            Some(&ModeId::from("m_pt"))
        );
        assert_eq!(
            index.locale_for(&ModeId::from("m_pt")),
            Some(&LocaleCode::from("pt_br"))
        );
        assert_eq!(index.source_mode(), Some(&ModeId::from("m_en")));
        assert_eq!(index.mode_for(&LocaleCode::from("fr")), None);
    }

    #[test]
    fn test_resolve_roles() {
        let index = LocaleIndex::new(
            &modes(&[("en", "m_en"), ("pt_br", "m_pt")]),
            LocaleCode::from("en"),
        );
        let pt = LocaleCode::from("pt_br");
        assert_eq!(index.resolve(&ModeId::from("m_en")), ModeRole::Source);
        assert_eq!(index.resolve(&ModeId::from("m_pt")), ModeRole::Target(&pt));
        assert_eq!(index.resolve(&ModeId::from("m_xx")), ModeRole::Unknown);
    }

    #[test]
    fn test_target_locales_skip_source_in_order() {
        let index = LocaleIndex::new(
            &modes(&[("fr", "m_fr"), ("en", "m_en"), ("pt_br", "m_pt")]),
            LocaleCode::from("en"),
        );
        let targets: Vec<_> = index.target_locales().map(LocaleCode::as_str).collect();
        assert_eq!(targets, ["fr", "pt_br"]);
    }

    #[test]
    fn test_missing_source_locale_makes_everything_a_target() {
        let index = LocaleIndex::new(
            &modes(&[("de", "m_de"), ("pt_br", "m_pt")]),
            LocaleCode::from(DEFAULT_SOURCE_LOCALE),
        );
        assert_eq!(index.source_mode(), None);
        assert_eq!(index.target_locales().count(), 2);
        assert!(matches!(
            index.resolve(&ModeId::from("m_de")),
            ModeRole::Target(_)
        ));
    }

    #[test]
    fn test_duplicate_mode_ids_last_write_wins() {
        let index = LocaleIndex::new(
            &modes(&[("en", "m_en"), ("pt", "m_shared"), ("pt_br", "m_shared")]),
            LocaleCode::from("en"),
        );
        assert_eq!(
            index.locale_for(&ModeId::from("m_shared")),
            Some(&LocaleCode::from("pt_br"))
        );
        assert_eq!(index.target_locales().count(), 2);
    }
}
