use std::collections::BTreeMap;

use cron_period_types::{Category, Field, FieldValue, RepeatSpec};
use serde::Serialize;

use crate::{parse_cron_period, CronPeriodErrorKind};

/// Flat, serializable outcome of validating an expression
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CronPeriodReport {
    pub expression: String,
    pub valid: bool,
    pub category: Option<Category>,
    pub fields: Option<BTreeMap<Field, FieldValue>>,
    pub repeat: Option<RepeatSpec>,
    pub error: Option<CronPeriodErrorKind>,
    /// Field the error points at, when there is one
    pub error_field_index: Option<u8>,
    pub message: Option<String>,
}

/// Validate and classify an expression without failing
///
/// ```rust
/// use cron_period_parser::{inspect_cron_period, Category, CronPeriodErrorKind};
///
/// let report = inspect_cron_period("0 10 * * 6");
/// assert!(report.valid);
/// assert_eq!(Some(Category::Week), report.category);
///
/// let report = inspect_cron_period("60 * * * *");
/// assert!(!report.valid);
/// assert_eq!(Some(CronPeriodErrorKind::OutOfRange), report.error);
/// assert_eq!(Some(0), report.error_field_index);
/// ```
pub fn inspect_cron_period(expression: &str) -> CronPeriodReport {
    match parse_cron_period(expression) {
        Ok(period) => CronPeriodReport {
            expression: expression.to_string(),
            valid: true,
            category: Some(period.category),
            fields: Some(
                Field::ALL
                    .into_iter()
                    .map(|field| (field, period.field(field).clone()))
                    .collect(),
            ),
            repeat: period.repeat,
            error: None,
            error_field_index: None,
            message: None,
        },
        Err(error) => CronPeriodReport {
            expression: expression.to_string(),
            valid: false,
            category: None,
            fields: None,
            repeat: None,
            error: Some(error.kind()),
            error_field_index: error.field_index(),
            message: Some(error.to_string()),
        },
    }
}

/// Shortcut: whether the expression belongs to one of the six periods
pub fn is_valid_cron_period(expression: &str) -> bool {
    parse_cron_period(expression).is_ok()
}
