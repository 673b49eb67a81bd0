//! Period-shaped cron expressions: parse, classify, assemble, and edit.
//!
//! The parsing and assembling core lives in [`cron_period_parser`] and is
//! re-exported here; [`CronPeriodEditor`] layers the state of a period
//! picker on top of it.

pub use cron_period_parser::{
    assemble_cron_period, extract_repeat, inspect_cron_period, is_valid_cron_period,
    parse_cron_period, Category, CronPeriod, CronPeriodError, CronPeriodErrorKind,
    CronPeriodReport, Field, FieldShape, FieldValue, MalformedExpression, RawRepeat,
    RepeatExtraction, RepeatSpec, UnknownCategoryError, UnknownFieldError, CATEGORY_PATTERNS,
};

pub use crate::editor::{Block, CronPeriodEditor, CustomValue, OnChange, SaveRequest, Selection};
pub use crate::errors::EditorError;
pub use crate::options::{EditorOptions, DEFAULT_INITIAL};

pub mod editor;
pub mod errors;
pub mod options;
