use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_CNTR: CounterVec = register_counter_vec!(
        "quiz_questions_total",
        "Number of quiz rounds, by category and whether a question was served",
        &["category", "outcome"]
    )
    .unwrap();
}

/// sqlx logs every statement at info; keep that out of the default output.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Builds the filter from a `LOG_LEVEL` value, falling back to [`DEFAULT_FILTER`]
/// when it is unset or does not parse.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let span_events = std::env::var("INCLUDE_SPAN_EVENTS")
        .is_ok_and(|value| value.eq_ignore_ascii_case("true"));
    let fmt_layer = fmt::layer().with_span_events(if span_events {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    });
    let level = std::env::var("LOG_LEVEL").ok();

    tracing_subscriber::registry()
        .with(log_filter(level.as_deref()))
        .with(fmt_layer)
        .init();
}
