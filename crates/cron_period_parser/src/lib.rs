use classify::classify;
use nom_field_token::{nom_field_token, FieldToken};
use range::validate_ranges;
use serde::Serialize;
use thiserror::Error;

pub use assemble::assemble_cron_period;
pub use cron_period_types::{
    Category, CronPeriod, Field, FieldShape, FieldValue, RepeatSpec, UnknownCategoryError,
    UnknownFieldError, CATEGORY_PATTERNS,
};
pub use repeat::{extract_repeat, RawRepeat, RepeatExtraction};
pub use report::{inspect_cron_period, is_valid_cron_period, CronPeriodReport};

mod assemble;
mod classify;
mod nom_field_token;
mod range;
mod repeat;
mod report;

/// Why an expression could not be read at all
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MalformedExpression {
    #[error("expected 5 space separated fields, found {found}")]
    FieldCount { found: usize },
    #[error("unsupported syntax `{token}` for the {field} field")]
    InvalidToken { field: Field, token: String },
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CronPeriodError {
    /// Wrong number of fields, or a field outside the supported grammar
    #[error("Malformed cron expression: {0}")]
    MalformedExpression(#[from] MalformedExpression),

    /// A concrete value (or step) outside the bounds of its field
    #[error("Invalid value `{value}` found (col {}) in {expression}", .field.column())]
    OutOfRange {
        field: Field,
        value: String,
        expression: String,
    },

    /// Well formed values that match none of the six periods
    #[error("Valid but unsupported cron format: {expression}")]
    UnsupportedCombination { expression: String },

    /// Assembler values contradicting the pattern of the requested period
    #[error("Inconsistent values for a {category} period: {reason}")]
    InconsistentAssembly { category: Category, reason: String },
}

/// Discriminant of [`CronPeriodError`], for callers that only branch on the kind
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CronPeriodErrorKind {
    MalformedExpression,
    OutOfRange,
    UnsupportedCombination,
    InconsistentAssembly,
}

impl CronPeriodError {
    pub fn kind(&self) -> CronPeriodErrorKind {
        match self {
            CronPeriodError::MalformedExpression(_) => CronPeriodErrorKind::MalformedExpression,
            CronPeriodError::OutOfRange { .. } => CronPeriodErrorKind::OutOfRange,
            CronPeriodError::UnsupportedCombination { .. } => {
                CronPeriodErrorKind::UnsupportedCombination
            }
            CronPeriodError::InconsistentAssembly { .. } => {
                CronPeriodErrorKind::InconsistentAssembly
            }
        }
    }

    /// Zero based index of the offending field, if the error points at one
    pub fn field_index(&self) -> Option<u8> {
        match self {
            CronPeriodError::MalformedExpression(MalformedExpression::InvalidToken {
                field, ..
            })
            | CronPeriodError::OutOfRange { field, .. } => Some(field.index()),
            _ => None,
        }
    }
}

fn validate_syntax<'a>(tokens: &[&'a str]) -> Result<Vec<FieldToken<'a>>, MalformedExpression> {
    Field::ALL
        .into_iter()
        .zip(tokens)
        .map(|(field, &token)| {
            nom_field_token(token)
                .map(|(_, field_token)| field_token)
                .map_err(|_| MalformedExpression::InvalidToken {
                    field,
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Parse and classify a five field cron expression
///
/// Only a subset of cron is understood, enough to describe "every minute",
/// "every hour at minute m", up to "every year on a date":
///
/// ```crontab
/// ┌───────────── minute (0 - 59)
/// │ ┌───────────── hour (0 - 23)
/// │ │ ┌───────────── day of the month (1 - 31)
/// │ │ │ ┌───────────── month (1 - 12)
/// │ │ │ │ ┌───────────── day of the week (0 - 6) (Sunday to Saturday)
/// │ │ │ │ │
/// * * * * *
/// ```
///
/// Each field is `*`, `*/n`, a number, `d/n`, or a comma separated list of
/// numbers. Ranges, names and nicknames are not supported, and a list cannot
/// carry a step.
///
/// The supported periods, where `x` is a concrete value:
///
/// - `minute` - `* * * * *`
/// - `hour` - `x * * * *`
/// - `day` - `x x * * *`
/// - `week` - `x x * * x`
/// - `month` - `x x x * *`
/// - `year` - `x x x x *`
///
/// A `/n` step overrides this table: the field carrying it decides the
/// period (minute, hour, day of month → day, month, day of week → week).
/// Only the first stepped field counts; steps on later fields are dropped
/// once checked.
///
/// Checks run in order (field count, syntax, ranges, period) and the first
/// failure is returned.
///
/// ```rust
/// use cron_period_parser::{parse_cron_period, Category, Field, RepeatSpec};
///
/// let period = parse_cron_period("0 10 * * 6").unwrap();
/// assert_eq!(Category::Week, period.category);
///
/// let period = parse_cron_period("* * * */3 *").unwrap();
/// assert_eq!(Category::Month, period.category);
/// assert_eq!(Some(RepeatSpec::new(3, Field::Month)), period.repeat);
/// ```
pub fn parse_cron_period(expression: &str) -> Result<CronPeriod, CronPeriodError> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    if tokens.len() != Field::ALL.len() {
        return Err(MalformedExpression::FieldCount {
            found: tokens.len(),
        }
        .into());
    }

    let extraction = extract_repeat(expression);
    let field_tokens = validate_syntax(&tokens)?;
    let (values, repeat) = validate_ranges(&field_tokens, &extraction)?;
    let category = classify(&values, repeat, &extraction.cleaned())?;

    let [minutes, hours, days, months, dows] = values;
    Ok(CronPeriod {
        category,
        minutes,
        hours,
        days,
        months,
        dows,
        repeat,
    })
}
