#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

pub fn enable_logs() {
    TRACING.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer().with_test_writer();
        // Editor events are logged at debug level
        let filter_layer = EnvFilter::try_new("debug").unwrap();

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    });
}

/// Sample concrete tokens for a field: bounds, a middle value and a list
pub fn concrete_samples(field: cron_period::Field) -> Vec<String> {
    let (min, max) = field.boundaries();
    let middle = (min + max) / 2;
    vec![
        min.to_string(),
        max.to_string(),
        middle.to_string(),
        format!("{min},{max}"),
        format!("{middle},{min},{max}"),
    ]
}
