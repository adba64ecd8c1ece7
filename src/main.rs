use anyhow::Context;
use dog_store::{demo, DogStore, StoreConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = StoreConfig::from_env().context("resolving database path")?;
    let store = DogStore::new(config);

    let stdout = std::io::stdout();
    demo::run(&store, &mut stdout.lock())
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(directives.as_deref()))
        .init();
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info() {
        assert_eq!(env_filter(None).to_string(), "info");
    }

    #[test]
    fn rust_log_can_raise_verbosity() {
        assert_eq!(env_filter(Some("debug")).to_string(), "debug");
        assert_eq!(
            env_filter(Some("dog_store=trace")).to_string(),
            "dog_store=trace"
        );
    }

    #[test]
    fn invalid_directives_fall_back_to_info() {
        assert_eq!(env_filter(Some("dog_store=notalevel")).to_string(), "info");
    }
}
