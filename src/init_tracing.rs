// Copyright 2024-2025 Irreducible Inc.

use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::{
    filter::Filtered, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

trait WithEnvFilter<S: Subscriber>: Layer<S> + Sized {
    fn with_env_filter(self) -> Filtered<Self, EnvFilter, S> {
        let env_level_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();

        self.with_filter(env_level_filter)
    }
}

impl<S: Subscriber, T: Layer<S>> WithEnvFilter<S> for T {}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`),
/// so the structured events emitted alongside each assertion report are
/// visible.
///
/// Returns whether the subscriber was installed. If a global subscriber is
/// already set it is kept and events go to it. Assertion reports themselves
/// are written to stderr either way.
pub fn init_tracing() -> bool {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    match tracing_subscriber::registry()
        .with(layer.with_env_filter())
        .try_init()
    {
        Ok(()) => true,
        Err(err) => {
            // Subscriber already initialized, events go to the existing one
            tracing::debug!(%err, "keeping the existing global subscriber");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_fork::rusty_fork_test;

    use super::*;

    // The global subscriber can only be set once per process.
    rusty_fork_test! {
        #[test]
        fn repeated_init_keeps_the_first_subscriber() {
            assert!(init_tracing());
            assert!(!init_tracing());
        }

        #[test]
        fn existing_subscriber_is_kept() {
            tracing::subscriber::set_global_default(tracing_subscriber::registry()).unwrap();
            assert!(!init_tracing());
        }
    }
}
