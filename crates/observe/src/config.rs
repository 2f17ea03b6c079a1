use tracing::Level;

#[derive(Debug, Clone)]
pub struct Config {
    /// Filters spans and events based on a set of filter directives
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    pub(crate) env_filter: String,
    /// Minimum level at which events are still written to stdout. Without a
    /// threshold everything goes to stderr, leaving stdout to the binary's
    /// actual output.
    pub(crate) stdout_threshold: Option<Level>,
}

impl Config {
    pub fn new(env_filter: &str, stdout_threshold: Option<Level>) -> Self {
        Self {
            env_filter: env_filter.into(),
            stdout_threshold,
        }
    }

    pub fn with_env_filter(mut self, env_filter: &str) -> Self {
        self.env_filter = env_filter.to_string();
        self
    }

    pub fn with_stdout_threshold(mut self, stdout_threshold: Level) -> Self {
        self.stdout_threshold = Some(stdout_threshold);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_filter: "info".to_string(),
            stdout_threshold: None,
        }
    }
}
