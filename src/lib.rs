//! # Filterkit - Template Filters and Spam-Resistant Email Links
//!
//! Filterkit is a set of extensions for the [`minijinja`] template engine:
//! string, collection, date and debug filters, functions that expose
//! configuration, session and translation data, and a `mailto` filter that
//! keeps email addresses out of the reach of address harvesters.
//!
//! ## Core Concepts
//!
//! - **Obfuscation**: addresses are substitution-ciphered with a random key
//!   and decoded in the browser by a small inline script
//! - **Filters**: `{{ value | filter(args) }}` transformations
//! - **Functions**: `{{ config('app.name') }}` style lookups
//! - **Configuration**: a TOML, YAML or JSON file plus `FILTERKIT_*`
//!   environment overrides
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      CLI Interface                       │
//! │               (clap-based command parsing)               │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Extension Registry                     │
//! │          (filters + functions into minijinja)            │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┴──────────────────┐
//!          ▼                                      ▼
//! ┌──────────────────────┐            ┌──────────────────────┐
//! │   Email Obfuscator   │            │  Globals + Session   │
//! │ (cipher, decoder JS) │            │ (config, trans data) │
//! └──────────────────────┘            └──────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use filterkit::prelude::*;
//!
//! let config = Config::load(None)?;
//! let env = ExtensionRegistry::new(&config).environment();
//!
//! let html = env.render_str("{{ 'info@example.com' | mailto(true, true, 'Write us') }}", ())?;
//! ```
//!
//! The obfuscator can also be used without templates:
//!
//! ```rust,ignore
//! use filterkit::obfuscate::{EmailObfuscator, ObfuscationRequest};
//!
//! let mut obfuscator = EmailObfuscator::from_entropy();
//! let html = obfuscator.render(&ObfuscationRequest::new("info@example.com"))?;
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod obfuscate;
pub mod plugins;
pub mod telemetry;

pub use error::{Error, Result};

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types.
    //!
    //! ```rust,ignore
    //! use filterkit::prelude::*;
    //!
    //! let registry = ExtensionRegistry::new(&Config::default());
    //! registry.session().put("user.name", "Jack");
    //! ```

    // Configuration
    pub use crate::config::{Config, MailtoConfig};

    // Error handling
    pub use crate::error::{Error, Result};

    // Obfuscation
    pub use crate::obfuscate::{EmailObfuscator, Key, ObfuscationRequest, RenderMode};

    // Template extensions
    pub use crate::plugins::prelude::*;
}

/// Returns the version of Filterkit.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
