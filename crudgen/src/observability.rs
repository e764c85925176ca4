//! Logging setup
//!
//! Logs are written to stderr so they never interleave with prompts on
//! stdout. `RUST_LOG` wins over the verbosity flag when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count
#[must_use]
pub const fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug,sqlx=warn",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber
///
/// Pretty output in debug builds, JSON in release builds.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directives() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).starts_with("debug"));
        assert_eq!(default_directive(5), "trace");
    }

    #[test]
    fn test_directives_parse() {
        for verbose in 0..3 {
            assert!(EnvFilter::try_new(default_directive(verbose)).is_ok());
        }
    }
}
