use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Installs the global subscriber. `RUST_LOG` wins over `log_level`.
///
/// Logs go to stderr so they never interleave with the drill prompts.
pub fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry().with(env_filter).with(stderr_layer).try_init();
}
