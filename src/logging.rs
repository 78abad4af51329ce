// Logger setup. Defaults to warnings only so log lines do not break up
// the menu; `RUST_LOG` overrides the filter.

pub fn setup_logging() {
    let mut builder = env_logger::Builder::new();

    builder.filter(None, log::LevelFilter::Warn);

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    builder.init();
}
