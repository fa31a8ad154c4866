//! AFTN telegram parsing.
//!
//! A telegram is split into its preamble and body by the header parser.
//! The body's bracketed three-letter category selects a list of grammars
//! from a [`PatternTable`](crate::patterns::PatternTable); the first grammar
//! that matches yields a field map, which is built into one of eight typed
//! records.
//!
//! Parsing fails fast: each stage returns its own [`ParseError`] variant
//! carrying the offending text. Required-field checks are separate and only
//! run when [`TelegramRecord::validate`] is called.

mod body;
mod build;
mod error;
mod header;
mod parser;
mod record;


pub use body::{FieldMap, detect_category, extract_body};
pub use build::{OtherInformation, build_record};
pub use error::{ParseError, ParseStage};
pub use header::{
    END_OF_MESSAGE, HeaderValidationError, ParsedHeader, START_INDICATOR, parse_header,
};
pub use parser::{ParsedTelegram, RawTelegram, TelegramEnvelope, TelegramParser};
pub use record::{
    AlnRecord, ArrRecord, ChgRecord, CnlRecord, CplRecord, DepRecord, DlaRecord, FplRecord,
    TelegramRecord,
};
