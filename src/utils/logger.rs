//! `tracing` subscriber setup for the two binaries.
//!
//! `RUST_LOG` always wins; otherwise [`default_directive`] picks the level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人類可讀，寫到 stderr (stdout 留給 JSON 結果)
    Compact,
    /// 一行一個 JSON 物件，給 CloudWatch
    Json,
}

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "lab_mix=debug,info"
    } else {
        "lab_mix=info"
    }
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Installs the global subscriber. A second call is ignored.
pub fn init(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(filter(verbose));
    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let installed = match format {
        LogFormat::Compact => registry
            .with(fmt.with_writer(std::io::stderr).compact())
            .try_init(),
        LogFormat::Json => registry.with(fmt.json()).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

pub fn init_cli_logger(verbose: bool) {
    init(LogFormat::Compact, verbose);
}

pub fn init_lambda_logger() {
    init(LogFormat::Json, false);
}
