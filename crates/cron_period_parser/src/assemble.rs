use std::collections::BTreeMap;

use cron_period_types::{Category, CronPeriod, Field, FieldShape, FieldValue, RepeatSpec};

use crate::nom_field_token::nom_field_token;
use crate::range::{field_value, repeat_step};
use crate::{CronPeriodError, MalformedExpression};

fn inconsistent(category: Category, reason: impl Into<String>) -> CronPeriodError {
    CronPeriodError::InconsistentAssembly {
        category,
        reason: reason.into(),
    }
}

/// Read a caller supplied field value: a wildcard, a number or a list
fn assembly_value(
    category: Category,
    field: Field,
    raw: &str,
) -> Result<FieldValue, CronPeriodError> {
    let raw = raw.trim();
    let (_, token) = nom_field_token(raw).map_err(|_| MalformedExpression::InvalidToken {
        field,
        token: raw.to_string(),
    })?;

    if token.step.is_some() {
        return Err(inconsistent(
            category,
            format!("the {field} value `{raw}` carries a step, pass it as the repeat step instead"),
        ));
    }

    field_value(field, &token.base, raw)
}

/// Without a repeat step, every field must follow the category pattern
fn check_pattern(category: Category, values: &[FieldValue; 5]) -> Result<(), CronPeriodError> {
    for ((field, value), shape) in Field::ALL.into_iter().zip(values).zip(category.pattern()) {
        match (shape, value.shape()) {
            (FieldShape::Wildcard, FieldShape::Concrete) => {
                return Err(inconsistent(
                    category,
                    format!("the {field} field must be a wildcard, got `{value}`"),
                ));
            }
            (FieldShape::Concrete, FieldShape::Wildcard) => {
                return Err(inconsistent(
                    category,
                    format!("the {field} field needs a concrete value"),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

/// With a repeat step, only the step position has to agree with the category
fn check_repeat(
    category: Category,
    values: &[FieldValue; 5],
    repeat: RepeatSpec,
) -> Result<(), CronPeriodError> {
    let field = repeat.field().ok_or_else(|| {
        inconsistent(category, format!("no field at index {}", repeat.field_index))
    })?;

    match category.repeat_field() {
        Some(expected) if expected == field => {}
        Some(expected) => {
            return Err(inconsistent(
                category,
                format!("the repeat step belongs on the {expected} field, not {field}"),
            ));
        }
        None => return Err(inconsistent(category, "this period cannot repeat")),
    }

    let base = &values[usize::from(field.index())];
    if !base.is_any() && base.as_single().is_none() {
        return Err(inconsistent(
            category,
            format!("a repeated {field} field cannot hold a list, got `{base}`"),
        ));
    }

    let step = repeat.step.to_string();
    repeat_step(field, &step, &format!("{base}/{step}"))?;
    Ok(())
}

/// Build the expression for a category from per-field values
///
/// Fields missing from `values` are wildcards. When `repeat` is given, its
/// field becomes `base/step` and must be the repeat field of `category`;
/// the other fields are then free. Without a repeat step the values must
/// follow the category pattern exactly.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use cron_period_parser::{assemble_cron_period, Category, Field, RepeatSpec};
///
/// let values = BTreeMap::from([
///     (Field::Minute, String::from("0")),
///     (Field::Hour, String::from("10")),
///     (Field::DayOfWeek, String::from("6")),
/// ]);
/// assert_eq!(
///     Ok(String::from("0 10 * * 6")),
///     assemble_cron_period(Category::Week, &values, None),
/// );
/// assert_eq!(
///     Ok(String::from("0 10 * * 6/2")),
///     assemble_cron_period(Category::Week, &values, Some(RepeatSpec::new(2, Field::DayOfWeek))),
/// );
/// ```
pub fn assemble_cron_period(
    category: Category,
    values: &BTreeMap<Field, String>,
    repeat: Option<RepeatSpec>,
) -> Result<String, CronPeriodError> {
    let mut fields: [FieldValue; 5] = Default::default();
    for (field, raw) in values {
        fields[usize::from(field.index())] = assembly_value(category, *field, raw)?;
    }

    match repeat {
        Some(repeat) => check_repeat(category, &fields, repeat)?,
        None => check_pattern(category, &fields)?,
    }

    let [minutes, hours, days, months, dows] = fields;
    let period = CronPeriod {
        category,
        minutes,
        hours,
        days,
        months,
        dows,
        repeat,
    };
    Ok(period.to_string())
}
