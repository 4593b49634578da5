//! Reshapes the flat variable list into a keyed translation model.
//!
//! Each base record becomes one [`TranslationEntry`] under its derived
//! identifier; a record named `... (plural)` supplies the plural forms of the
//! entry with the same base identifier. The model is produced by a fold over
//! the records and is immutable afterwards.

use indexmap::{IndexMap, map::Entry};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    locale::{LocaleIndex, ModeRole},
    name_id::{format_name_id, is_plural_name, strip_plural_marker},
    types::{LocaleCode, RecordSlot, VariableRecord},
};

/// How plural records find their base entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluralPairing {
    /// Records are processed in document order; a plural record seen before
    /// its base is dropped.
    #[default]
    InputOrder,
    /// All base records are processed first, so plural records attach no
    /// matter where they appear.
    AnyOrder,
}

/// The values of one record, split into source text and per-locale targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocalizedValues {
    pub source: Option<Value>,
    #[serde(flatten)]
    pub targets: IndexMap<LocaleCode, Value>,
}

impl LocalizedValues {
    pub fn target(&self, locale: &LocaleCode) -> Option<&Value> {
        self.targets.get(locale)
    }

    fn collect(record: &VariableRecord, index: &LocaleIndex, report: &mut BuildReport) -> Self {
        let mut values = LocalizedValues::default();
        for (mode, value) in &record.values_by_mode {
            match index.resolve(mode) {
                ModeRole::Source => values.source = Some(value.clone()),
                ModeRole::Target(locale) => {
                    values.targets.insert(locale.clone(), value.clone());
                }
                ModeRole::Unknown => {
                    debug!(name = %record.name, mode = %mode, "ignoring value for undeclared mode");
                    report.unknown_mode_values += 1;
                }
            }
        }
        values
    }
}

/// One translation unit: base values plus optional plural forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslationEntry {
    #[serde(flatten)]
    pub values: LocalizedValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<LocalizedValues>,
}

impl TranslationEntry {
    pub fn source(&self) -> Option<&Value> {
        self.values.source.as_ref()
    }

    pub fn target(&self, locale: &LocaleCode) -> Option<&Value> {
        self.values.target(locale)
    }
}

/// Entries keyed by derived identifier, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TranslationModel {
    entries: IndexMap<String, TranslationEntry>,
}

impl TranslationModel {
    /// Folds the records into a model, following `pairing` for plural records.
    pub fn build(
        slots: &[RecordSlot],
        index: &LocaleIndex,
        pairing: PluralPairing,
    ) -> (Self, BuildReport) {
        let ordered: Vec<&RecordSlot> = match pairing {
            PluralPairing::InputOrder => slots.iter().collect(),
            PluralPairing::AnyOrder => {
                let (plurals, bases): (Vec<&RecordSlot>, Vec<&RecordSlot>) = slots
                    .iter()
                    .partition(|slot| slot.record().is_some_and(|r| is_plural_name(&r.name)));
                bases.into_iter().chain(plurals).collect()
            }
        };

        ordered
            .into_iter()
            .fold(Accumulator::default(), |acc, slot| acc.fold_slot(slot, index))
            .finish()
    }

    pub fn get(&self, id: &str) -> Option<&TranslationEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counts of the anomalies absorbed while building a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Well-formed records processed.
    pub records: usize,
    /// Elements of `variables` without a string `name` and object `valuesByMode`.
    pub malformed_records: usize,
    pub plurals_attached: usize,
    /// Plural records whose base entry did not exist when they were processed.
    pub orphan_plurals: usize,
    /// Base records whose identifier replaced an existing entry.
    pub overwritten_ids: usize,
    pub unknown_mode_values: usize,
}

impl BuildReport {
    pub fn has_anomalies(&self) -> bool {
        self.malformed_records > 0
            || self.orphan_plurals > 0
            || self.overwritten_ids > 0
            || self.unknown_mode_values > 0
    }
}

#[derive(Default)]
struct Accumulator {
    entries: IndexMap<String, TranslationEntry>,
    report: BuildReport,
}

impl Accumulator {
    fn fold_slot(mut self, slot: &RecordSlot, index: &LocaleIndex) -> Self {
        match slot {
            RecordSlot::Record(record) if is_plural_name(&record.name) => {
                self.report.records += 1;
                self.attach_plural(record, index);
            }
            RecordSlot::Record(record) => {
                self.report.records += 1;
                self.insert_base(record, index);
            }
            RecordSlot::Malformed(raw) => {
                warn!(record = %raw, "skipping malformed variable record");
                self.report.malformed_records += 1;
            }
        }
        self
    }

    fn insert_base(&mut self, record: &VariableRecord, index: &LocaleIndex) {
        let id = format_name_id(&record.name);
        let entry = TranslationEntry {
            values: LocalizedValues::collect(record, index, &mut self.report),
            plural: None,
        };
        if self.entries.insert(id.clone(), entry).is_some() {
            debug!(id = %id, name = %record.name, "identifier collision, replacing entry");
            self.report.overwritten_ids += 1;
        }
    }

    fn attach_plural(&mut self, record: &VariableRecord, index: &LocaleIndex) {
        let id = format_name_id(strip_plural_marker(&record.name));
        match self.entries.entry(id) {
            Entry::Occupied(mut occupied) => {
                let plural = LocalizedValues::collect(record, index, &mut self.report);
                occupied.get_mut().plural = Some(plural);
                self.report.plurals_attached += 1;
            }
            Entry::Vacant(vacant) => {
                debug!(id = %vacant.key(), name = %record.name, "dropping plural without base entry");
                self.report.orphan_plurals += 1;
            }
        }
    }

    fn finish(self) -> (TranslationModel, BuildReport) {
        (
            TranslationModel {
                entries: self.entries,
            },
            self.report,
        )
    }
}
