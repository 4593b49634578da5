//! Input-side types: the variable export document and the typed identifiers
//! used throughout the pipeline.

use std::{
    borrow::Cow,
    fmt::Display,
    fs::File,
    io::{BufRead, Read},
    path::Path,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Error, traits::Parser};

/// The export's internal identifier for one language variant (e.g. `"1:0"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ModeId(String);

/// A human-readable locale code such as `en` or `pt_br`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

macro_rules! string_identifier {
    ($ty:ident) => {
        impl $ty {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_identifier!(ModeId);
string_identifier!(LocaleCode);

/// The whole variable export, as produced by the "Export/Import Variables"
/// Figma plugin.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Locale code → mode ID, in document order.
    pub modes: IndexMap<LocaleCode, ModeId>,

    /// Every exported variable, in document order.
    pub variables: Vec<RecordSlot>,
}

impl Document {
    /// Iterates over the well-formed records only.
    pub fn records(&self) -> impl Iterator<Item = &VariableRecord> {
        self.variables.iter().filter_map(RecordSlot::record)
    }
}

impl Parser for Document {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Override default file reading so exports saved with a BOM still parse.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .strip_bom(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

/// One element of the `variables` array.
///
/// Elements that do not have the expected shape are kept as raw JSON so the
/// rest of the document still converts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordSlot {
    Record(VariableRecord),
    Malformed(Value),
}

impl RecordSlot {
    pub fn record(&self) -> Option<&VariableRecord> {
        match self {
            RecordSlot::Record(record) => Some(record),
            RecordSlot::Malformed(_) => None,
        }
    }
}

impl From<VariableRecord> for RecordSlot {
    fn from(value: VariableRecord) -> Self {
        RecordSlot::Record(value)
    }
}

/// A single named variable with one value per mode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VariableRecord {
    /// Slash-delimited hierarchical name, e.g. `Onboarding/Welcome Title`.
    pub name: String,

    #[serde(rename = "valuesByMode")]
    pub values_by_mode: IndexMap<ModeId, Value>,
}

impl VariableRecord {
    pub fn new<I, M, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (M, V)>,
        M: Into<ModeId>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            values_by_mode: values
                .into_iter()
                .map(|(mode, value)| (mode.into(), value.into()))
                .collect(),
        }
    }
}

/// Largest magnitude at which every integral `f64` is exact.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Textual form of an exported value. Missing and `null` values are empty.
///
/// Integral floats such as `10.0` are written without a fractional part, the
/// way the design tool displays them.
pub fn value_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(number_text(n)),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Whether a value counts as present for plural selection: empty strings,
/// `false`, zero and `null` do not.
pub fn value_is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
