//! Structured logging layer using the tracing crate.
//!
//! Log output always goes to stderr so rendered templates on stdout stay
//! clean.

use super::config::{LogFormat, LogLevel, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Builder for constructing a logging layer.
pub struct LoggingBuilder {
    config: LoggingConfig,
}

impl LoggingBuilder {
    /// Create a new logging builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoggingConfig::default(),
        }
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Set the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Set the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set ANSI colors.
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.config.ansi_colors = enabled;
        self
    }

    /// Include target in logs.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.config.with_target = enabled;
        self
    }

    /// Set filter directive.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.filter = Some(filter.into());
        self
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Build and initialize the logging layer (global subscriber).
    pub fn init(self) -> crate::error::Result<()> {
        let env_filter = self.build_filter();
        let registry = tracing_subscriber::registry().with(env_filter);
        let base = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(self.config.with_target)
            .with_file(self.config.with_file)
            .with_line_number(self.config.with_file);

        let result = match self.config.format {
            LogFormat::Pretty => registry
                .with(base.pretty().with_ansi(self.config.ansi_colors))
                .try_init(),
            LogFormat::Compact => registry
                .with(base.compact().with_ansi(self.config.ansi_colors))
                .try_init(),
            LogFormat::Json => registry.with(base.json()).try_init(),
            LogFormat::Full => registry
                .with(base.with_ansi(self.config.ansi_colors))
                .try_init(),
        };

        result.map_err(|e| crate::error::Error::Config(e.to_string()))
    }

    fn build_filter(&self) -> EnvFilter {
        let default_filter = self.config.level.to_string();

        if let Some(ref filter) = self.config.filter {
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(filter))
                .unwrap_or_else(|_| EnvFilter::new(&default_filter))
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter))
        }
    }
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let builder = LoggingBuilder::new()
            .with_level(LogLevel::Trace)
            .with_format(LogFormat::Json)
            .with_ansi(false)
            .with_target(true)
            .with_filter("filterkit=trace");
        let config = builder.config();
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.ansi_colors);
        assert!(config.with_target);
        assert_eq!(config.filter.as_deref(), Some("filterkit=trace"));
    }

    #[test]
    fn test_from_config() {
        let builder = LoggingBuilder::from_config(LoggingConfig::development());
        assert_eq!(builder.config().format, LogFormat::Pretty);
    }
}
