use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the dashboard crates log at `info`,
/// or `debug` with `verbose`, and dependencies (reqwest, hyper) only warn.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_env_filter(filter)
        .init();
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    ["dashboard_core", "dashboard_store", "dashboard_auth", "dashboard"]
        .iter()
        .fold(String::from("warn"), |acc, target| format!("{acc},{target}={level}"))
}

pub fn log_startup() {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Catalog dashboard starting");
}

pub fn log_shutdown() {
    tracing::info!("Catalog dashboard shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_quiets_dependencies() {
        let directives = default_directives(false);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("dashboard_auth=info"));
        assert!(!directives.contains("debug"));
    }

    #[test]
    fn verbose_raises_dashboard_crates_only() {
        let directives = default_directives(true);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("dashboard_store=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
