//! Plugin System for Filterkit
//!
//! This module installs Filterkit's extensions into a `minijinja`
//! environment.
//!
//! # Plugin Categories
//!
//! ## Filter Plugins
//!
//! String, collection, date, debug and mail filters. See the [`filter`]
//! module for available filters.
//!
//! ## Function Plugins
//!
//! Functions that read configuration, environment, session and translation
//! data, plus `template_from_string`. See the [`function`] module.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use filterkit::config::Config;
//! use filterkit::plugins::ExtensionRegistry;
//!
//! let registry = ExtensionRegistry::new(&Config::load(None)?);
//! registry.session().put("user.name", "Jack");
//!
//! let env = registry.environment();
//! let html = env.render_str("{{ session('user.name') | uppercase }}", ())?;
//! ```

pub mod filter;
pub mod function;

use crate::config::{Config, MailtoConfig};
use crate::obfuscate::EmailObfuscator;
use filter::{FilterRegistry, SharedObfuscator};
use function::{FunctionRegistry, Globals, SessionStore};
use minijinja::Environment;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::debug;

/// Everything Filterkit adds to a template environment, with the state the
/// extensions share.
///
/// Every environment the registry sets up draws `mailto` element ids from the
/// same obfuscator, so ids stay unique across all of them.
#[derive(Debug, Clone)]
pub struct ExtensionRegistry {
    mailto: MailtoConfig,
    obfuscator: SharedObfuscator,
    globals: Arc<Globals>,
    session: SessionStore,
}

impl ExtensionRegistry {
    /// Creates a registry from configuration, seeding the obfuscator from
    /// the operating system.
    pub fn new(config: &Config) -> Self {
        let obfuscator =
            EmailObfuscator::with_options(StdRng::from_entropy(), config.mailto.obfuscator_options());
        Self::with_obfuscator(config, obfuscator)
    }

    /// Creates a registry around a caller-supplied obfuscator.
    pub fn with_obfuscator(config: &Config, obfuscator: EmailObfuscator) -> Self {
        Self {
            mailto: config.mailto.clone(),
            obfuscator: Arc::new(Mutex::new(obfuscator)),
            globals: Arc::new(Globals::from_config(config)),
            session: SessionStore::new(),
        }
    }

    /// The session store read by `session()`.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    /// Install every filter and function into `env`.
    pub fn install(&self, env: &mut Environment<'static>) {
        FilterRegistry::register_with(env, &self.mailto, Arc::clone(&self.obfuscator));
        FunctionRegistry::register_all(env, Arc::clone(&self.globals), self.session.clone());
        debug!("installed filterkit extensions");
    }

    /// A new environment with every extension installed.
    pub fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        self.install(&mut env);
        env
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::filter::FilterRegistry;
    pub use super::function::{FunctionRegistry, Globals, SessionStore};
    pub use super::ExtensionRegistry;
}
