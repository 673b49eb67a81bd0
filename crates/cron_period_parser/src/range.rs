use cron_period_types::{Field, FieldValue, RepeatSpec};

use crate::nom_field_token::{FieldToken, TokenBase};
use crate::repeat::RepeatExtraction;
use crate::CronPeriodError;

fn out_of_range(field: Field, value: &str, expression: &str) -> CronPeriodError {
    CronPeriodError::OutOfRange {
        field,
        value: value.to_string(),
        expression: expression.to_string(),
    }
}

/// Attempts to read a number within the field boundaries
fn field_number(field: Field, digits: &str, expression: &str) -> Result<u32, CronPeriodError> {
    digits
        .parse::<u32>()
        .ok()
        .filter(|v| field.contains(*v))
        .ok_or_else(|| out_of_range(field, digits, expression))
}

/// Converts a syntactically valid token base into a field value
pub(crate) fn field_value(
    field: Field,
    base: &TokenBase<'_>,
    expression: &str,
) -> Result<FieldValue, CronPeriodError> {
    match base {
        TokenBase::Wildcard => Ok(FieldValue::Any),
        TokenBase::Numbers(numbers) => numbers
            .iter()
            .map(|digits| field_number(field, digits, expression))
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::Values),
    }
}

/// A step must be a positive integer
pub(crate) fn repeat_step(
    field: Field,
    step: &str,
    expression: &str,
) -> Result<u32, CronPeriodError> {
    step.parse::<u32>()
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| out_of_range(field, step, expression))
}

/// Check every field of an expression against its boundaries, left to right
///
/// Every step must be a positive integer, but only the one kept by the
/// extraction becomes the repeat.
pub(crate) fn validate_ranges(
    tokens: &[FieldToken<'_>],
    extraction: &RepeatExtraction<'_>,
) -> Result<([FieldValue; 5], Option<RepeatSpec>), CronPeriodError> {
    let cleaned = extraction.cleaned();
    let mut values: [FieldValue; 5] = Default::default();
    let mut repeat = None;

    for ((field, token), value) in Field::ALL.into_iter().zip(tokens).zip(values.iter_mut()) {
        *value = field_value(field, &token.base, &cleaned)?;

        if let Some(step) = token.step {
            let step = repeat_step(field, step, &cleaned)?;
            if extraction.repeat.is_some_and(|r| r.field() == Some(field)) {
                repeat = Some(RepeatSpec::new(step, field));
            }
        }
    }

    Ok((values, repeat))
}
