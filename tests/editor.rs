use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cron_period::{
    Block, Category, EditorError, EditorOptions, Field, FieldValue, SaveRequest, Selection,
};
use serde_json::json;

use crate::helpers::enable_logs;

mod helpers;

#[test]
fn load_and_read_back() -> anyhow::Result<()> {
    enable_logs();

    let mut editor = EditorOptions::default().init()?;
    for expression in [
        "* * * * *",
        "*/5 * * * *",
        "12 * * * *",
        "12 */3 * * *",
        "0 10 * * *",
        "0 10 */2 * *",
        "0 10 * * 6",
        "0 10 * * 6/2",
        "0 10 1 * *",
        "0 10 1 */3 *",
        "15 1 1 1 *",
    ] {
        editor.set_value(expression)?;
        assert_eq!(expression, editor.value()?, "{expression}");
    }
    Ok(())
}

#[test]
fn interval_follows_repeat_step() -> anyhow::Result<()> {
    enable_logs();

    let mut editor = EditorOptions::default().initial("0 */6 * * *").init()?;
    assert_eq!(&Selection::Period(Category::Hour), editor.selection());
    assert_eq!(6, *editor.interval());
    assert_eq!(vec![Block::Interval, Block::Mins], editor.visible_blocks());

    editor.set_value("0 6 * * *")?;
    assert_eq!(1, *editor.interval());
    Ok(())
}

#[test]
fn build_value_from_selection() -> anyhow::Result<()> {
    enable_logs();

    let mut editor = EditorOptions::default().init()?;
    editor.select_period(Category::Week);
    editor.set_field_value(Field::Hour, FieldValue::single(18))?;
    editor.set_field_value(Field::Minute, FieldValue::single(30))?;
    editor.set_field_value(Field::DayOfWeek, FieldValue::single(5))?;
    assert_eq!("30 18 * * 5", editor.value()?);

    editor.set_interval(2);
    assert_eq!("30 18 * * 5/2", editor.value()?);

    editor.select_period(Category::Month);
    assert_eq!("30 18 1 */2 *", editor.value()?);

    editor.set_interval(0);
    assert_eq!(1, *editor.interval());
    assert_eq!("30 18 1 * *", editor.value()?);
    Ok(())
}

#[test]
fn interval_ignored_when_disabled() -> anyhow::Result<()> {
    let mut editor = EditorOptions::default()
        .allow_interval_expression(false)
        .init()?;
    editor.set_interval(5);
    assert_eq!("* * * * *", editor.value()?);
    assert!(!editor.visible_blocks().contains(&Block::Interval));
    Ok(())
}

#[test]
fn change_tracking_and_save() -> anyhow::Result<()> {
    enable_logs();

    let mut editor = EditorOptions::default()
        .initial("9 10 * * *")
        .url_set("/set/")
        .init()?;
    assert!(!editor.is_changed());
    assert!(!editor.controls_visible());

    editor.set_field_value(Field::Hour, FieldValue::single(12))?;
    assert!(editor.is_changed());
    assert!(editor.controls_visible());

    let request = editor.save_request()?.expect("a save url is configured");
    assert_eq!(
        SaveRequest {
            url: String::from("/set/"),
            body: json!({ "cron": "9 12 * * *" }),
        },
        request
    );

    editor.mark_saved("9 12 * * *");
    assert!(!editor.is_changed());
    assert!(!editor.controls_visible());

    // reverting by hand is also not a change
    editor.set_field_value(Field::Hour, FieldValue::single(10))?;
    assert!(editor.is_changed());
    editor.set_field_value(Field::Hour, FieldValue::single(12))?;
    assert!(!editor.is_changed());
    Ok(())
}

#[test]
fn controls_hidden_without_save_url() -> anyhow::Result<()> {
    let mut editor = EditorOptions::default().init()?;
    editor.set_value("0 10 * * *")?;
    assert!(editor.is_changed());
    assert!(!editor.controls_visible());
    assert_eq!(None, editor.save_request()?);
    Ok(())
}

#[test]
fn on_change_is_called_for_each_change() -> anyhow::Result<()> {
    enable_logs();

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let mut editor = EditorOptions::default()
        .on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .init()?;
    assert_eq!(0, calls.load(Ordering::SeqCst));

    editor.set_value("0 10 * * *")?;
    editor.select_period(Category::Week);
    editor.set_interval(2);
    editor.set_field_value(Field::DayOfWeek, FieldValue::single(1))?;
    assert_eq!(4, calls.load(Ordering::SeqCst));

    // rejected changes do not notify
    assert!(editor.set_value("61 10 * * *").is_err());
    assert!(editor
        .set_field_value(Field::Minute, FieldValue::single(61))
        .is_err());
    assert_eq!(4, calls.load(Ordering::SeqCst));
    Ok(())
}

#[test]
fn custom_values() -> anyhow::Result<()> {
    let mut editor = EditorOptions::default()
        .custom_value("weekdays", "0 9 * * 1,2,3,4,5")
        .initial("0 9 * * 1")
        .init()?;

    editor.select_custom("weekdays")?;
    assert_eq!(&Selection::Custom(String::from("weekdays")), editor.selection());
    assert_eq!("0 9 * * 1,2,3,4,5", editor.value()?);

    let error = editor.select_custom("weekends").expect_err("not configured");
    assert!(matches!(error, EditorError::UnknownCustomValue(label) if label == "weekends"));
    Ok(())
}

#[test]
fn unassemblable_state_is_an_error() -> anyhow::Result<()> {
    let mut editor = EditorOptions::default().initial("* * * */3 *").init()?;
    assert_eq!("* * * */3 *", editor.value()?);

    // without the interval a month period needs a concrete time and day
    editor.set_interval(1);
    assert!(matches!(editor.value(), Err(EditorError::InvalidValue(_))));
    assert!(editor.is_changed());
    Ok(())
}
