use std::sync::Once;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "duty_roster=info";

static INIT: Once = Once::new();

/// Installs the global fmt subscriber once. `RUST_LOG` overrides the default
/// filter. Logs go to stderr so CLI output on stdout stays clean.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            eprintln!("logging already initialised elsewhere: {err}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tolerates_an_existing_subscriber() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        init();
        init();
        tracing::info!("logging still works");
    }
}
