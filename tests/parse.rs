use cron_period::{
    extract_repeat, parse_cron_period, Category, CronPeriodError, CronPeriodErrorKind, Field,
    FieldShape, FieldValue, MalformedExpression, RepeatSpec, CATEGORY_PATTERNS,
};

use crate::helpers::concrete_samples;

mod helpers;

#[test]
fn literal_scenarios() -> anyhow::Result<()> {
    let cases = [
        ("* * * * *", Category::Minute),
        ("0 10 * * *", Category::Day),
        ("0 10 * * 6", Category::Week),
        ("0 10 1 * *", Category::Month),
        ("15 1 1 1 *", Category::Year),
        ("5 * * * *", Category::Hour),
    ];

    for (expression, category) in cases {
        let period = parse_cron_period(expression)?;
        assert_eq!(category, period.category, "{expression}");
        assert_eq!(None, period.repeat, "{expression}");
    }
    Ok(())
}

#[test]
fn literal_field_values() -> anyhow::Result<()> {
    let period = parse_cron_period("0 10 * * 6")?;
    assert_eq!(FieldValue::single(0), period.minutes);
    assert_eq!(FieldValue::single(10), period.hours);
    assert_eq!(FieldValue::Any, period.days);
    assert_eq!(FieldValue::Any, period.months);
    assert_eq!(FieldValue::single(6), period.dows);

    let period = parse_cron_period("0 10 1 * *")?;
    assert_eq!(FieldValue::single(1), period.days);
    Ok(())
}

#[test]
fn repeat_on_month() -> anyhow::Result<()> {
    let period = parse_cron_period("* * * */3 *")?;
    assert_eq!(Category::Month, period.category);
    assert_eq!(
        Some(RepeatSpec {
            step: 3,
            field_index: 3,
        }),
        period.repeat
    );
    Ok(())
}

#[test]
fn repeat_precedence() -> anyhow::Result<()> {
    let period = parse_cron_period("*/5 * * * *")?;
    assert_eq!(Category::Minute, period.category);
    assert_eq!(Some(RepeatSpec::new(5, Field::Minute)), period.repeat);

    // The repeat field wins over whatever the other fields look like
    let cases = [
        ("*/5 10 1 1 *", Category::Minute),
        ("0 */2 * * *", Category::Hour),
        ("0 10 */2 * 3", Category::Day),
        ("0 10 1 */6 *", Category::Month),
        ("0 10 * * */2", Category::Week),
        ("30 8 * * 1/2", Category::Week),
        ("5/15 * 1 * 1", Category::Minute),
    ];
    for (expression, category) in cases {
        assert_eq!(
            category,
            parse_cron_period(expression)?.category,
            "{expression}"
        );
    }
    Ok(())
}

#[test]
fn only_first_repeat_is_kept() -> anyhow::Result<()> {
    let period = parse_cron_period("0 */2 * */3 *")?;
    assert_eq!(Category::Hour, period.category);
    assert_eq!(Some(RepeatSpec::new(2, Field::Hour)), period.repeat);
    assert_eq!(FieldValue::Any, period.months);
    assert_eq!("0 */2 * * *", period.to_string());

    let extraction = extract_repeat("0 */2 * */3 *");
    assert_eq!("0 * * * *", extraction.cleaned());
    Ok(())
}

#[test]
fn range_rejection() {
    let error = parse_cron_period("60 * * * *").expect_err("minute max is 59");
    assert_eq!(CronPeriodErrorKind::OutOfRange, error.kind());
    assert_eq!(Some(0), error.field_index());

    let cases = [
        ("0 24 * * *", 1),
        ("0 10 0 * *", 2),
        ("0 10 32 * *", 2),
        ("15 1 1 13 *", 3),
        ("15 1 1 0 *", 3),
        ("0 10 * * 7", 4),
        ("0 10 * * 1,2,9", 4),
        ("0 10 * * 99999999999", 4),
        ("*/0 * * * *", 0),
        ("*/5 */0 * * *", 1),
    ];
    for (expression, index) in cases {
        let error = parse_cron_period(expression).expect_err(expression);
        assert!(
            matches!(error, CronPeriodError::OutOfRange { .. }),
            "{expression}: {error}"
        );
        assert_eq!(Some(index), error.field_index(), "{expression}");
    }
}

#[test]
fn unsupported_combination() {
    for expression in [
        "5 10 15 * 1",
        "* 10 * * *",
        "0 10 * 6 *",
        "0 10 1 1 1",
        "* * * * 1",
        "0 * 1 * *",
    ] {
        assert_eq!(
            Some(CronPeriodErrorKind::UnsupportedCombination),
            parse_cron_period(expression).err().map(|e| e.kind()),
            "{expression}"
        );
    }
}

#[test]
fn malformed_expressions() {
    for expression in ["", "* * * *", "* * * * * *", "@daily"] {
        assert!(
            matches!(
                parse_cron_period(expression),
                Err(CronPeriodError::MalformedExpression(
                    MalformedExpression::FieldCount { .. }
                ))
            ),
            "{expression}"
        );
    }

    for (expression, field) in [
        ("1-5 * * * *", Field::Minute),
        ("0 mon * * *", Field::Hour),
        ("0 10 1,2/2 * *", Field::DayOfMonth),
        ("0 10 1 JAN *", Field::Month),
        ("0 10 * * ?", Field::DayOfWeek),
        ("0 10 * * -1", Field::DayOfWeek),
    ] {
        assert_eq!(
            Err(CronPeriodError::MalformedExpression(
                MalformedExpression::InvalidToken {
                    field,
                    token: expression
                        .split(' ')
                        .nth(usize::from(field.index()))
                        .unwrap_or_default()
                        .to_string(),
                }
            )),
            parse_cron_period(expression),
            "{expression}"
        );
    }
}

#[test]
fn whitespace_is_insignificant() -> anyhow::Result<()> {
    let period = parse_cron_period("  0\t10   * *  6 ")?;
    assert_eq!(Category::Week, period.category);
    assert_eq!("0 10 * * 6", period.to_string());
    Ok(())
}

/// Every expression built from a category pattern parses back into that category
#[test]
fn totality_over_patterns() -> anyhow::Result<()> {
    for (category, pattern) in CATEGORY_PATTERNS {
        for sample in 0..5 {
            let tokens: Vec<String> = Field::ALL
                .into_iter()
                .zip(pattern)
                .map(|(field, shape)| match shape {
                    FieldShape::Wildcard => String::from("*"),
                    FieldShape::Concrete => concrete_samples(field)[sample].clone(),
                })
                .collect();
            let expression = tokens.join(" ");

            let period = parse_cron_period(&expression)?;
            assert_eq!(category, period.category, "{expression}");
            assert_eq!(expression, period.to_string());
        }
    }
    Ok(())
}
