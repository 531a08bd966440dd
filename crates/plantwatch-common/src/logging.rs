//! ---
//! pw_section: "03-configuration-logging"
//! pw_subsection: "module"
//! pw_type: "source"
//! pw_scope: "code"
//! pw_description: "Tracing subscriber setup for the dashboard client."
//! pw_version: "v0.1.0-dev"
//! pw_owner: "tbd"
//! ---
use anyhow::Result;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_ENV: &str = "PLANTWATCH_LOG";

/// Initialize the tracing subscriber for the dashboard client.
///
/// * `PLANTWATCH_LOG` overrides the log filter (e.g. `info`, `debug,reqwest=warn`).
///   When unset the standard `RUST_LOG` variable is honoured, finally
///   defaulting to `info`.
/// * Output goes to stderr so it never fights the terminal UI on stdout.
pub fn init_tracing(service_name: &str) -> Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to info logging",
                LOG_ENV, err
            );
            EnvFilter::new("info")
        }),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok();

    info!(service = %service_name, "tracing initialised");
    Ok(())
}
