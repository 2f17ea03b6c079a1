use {
    crate::config::Config,
    std::{io::IsTerminal, sync::Once},
    time::macros::format_description,
    tracing_subscriber::{
        EnvFilter,
        Layer,
        fmt::{time::UtcTime, writer::MakeWriterExt as _},
        prelude::*,
        util::SubscriberInitExt,
    },
};

/// Initializes the tracing setup that is shared between the binaries.
/// The filter in the config has similar syntax to env_logger. It is
/// documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn initialize(config: &Config) {
    set_tracing_subscriber(config);
}

/// Like [`initialize`], but can be called multiple times in a row. Later
/// calls are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(env_filter: &str) {
    // The tracing subscriber below is a global object so initializing it
    // again in the same process by a different thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(&Config::new(env_filter, None));
        crate::panic_hook::install();
    });
}

fn set_tracing_subscriber(config: &Config) {
    let initial_filter = config.env_filter.clone();
    let (env_filter, reload_handle) =
        tracing_subscriber::reload::Layer::new(EnvFilter::new(&initial_filter));

    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));

    // The fmt layer is configured in both branches instead of once because
    // the writer closures produce different types which the registry's
    // generics cannot unify.
    match config.stdout_threshold {
        Some(threshold) => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(
                            std::io::stdout
                                .with_min_level(threshold)
                                .or_else(std::io::stderr),
                        )
                        .with_timer(timer)
                        .with_ansi(std::io::stdout().is_terminal())
                        .with_filter(env_filter),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_timer(timer)
                        .with_ansi(std::io::stderr().is_terminal())
                        .with_filter(env_filter),
                )
                .init();
        }
    }

    #[cfg(unix)]
    crate::tracing_reload_handler::spawn_reload_handler(initial_filter, reload_handle);
    #[cfg(not(unix))]
    drop(reload_handle);
}
