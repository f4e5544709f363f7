use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_DIRECTIVES: &str = "warn";

// `HTTPCLIENT_LOG` beats `RUST_LOG`; with neither set only warnings show.
fn log_directives<F: Fn(&str) -> Option<String>>(var: F) -> String {
    var("HTTPCLIENT_LOG")
        .or_else(|| var("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

/// Sends diagnostics to stderr; stdout belongs to response bodies.
pub fn init_logging() {
    let directives = log_directives(|name| std::env::var(name).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
