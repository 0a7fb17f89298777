use crate::Result;

/// Initialize tracing for a bot process.
///
/// Without the `subscriber` feature this is a no-op and events go to whatever
/// subscriber the embedding application installed. With it, a `fmt`
/// subscriber is installed that defaults to `info` for the library crates and
/// the given service, `warn` elsewhere; `RUST_LOG` overrides the filter.
pub fn init(service_name: &str) -> Result<()> {
    let _ = service_name;

    #[cfg(feature = "subscriber")]
    {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "warn,tgbot_core=info,tgbot_http=info,{service_name}=info"
            ))
        });

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(true)
            .try_init()
            .map_err(|e| {
                crate::errors::Error::Config(format!("logging already initialized: {e}"))
            })?;
    }

    Ok(())
}
