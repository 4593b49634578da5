//! All error types for the figma2xliff crate.
//!
//! Only failures that abort a whole conversion live here. Per-record anomalies
//! (unknown modes, orphan plurals, malformed records) are tolerated and show up
//! in [`crate::builder::BuildReport`] instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendered output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
