//! Template filters for Filterkit.
//!
//! Filters are organized into categories:
//!
//! - **mail**: `mailto`, plain/linked/script-protected email addresses
//! - **strings**: truncation, wrapping, case, trimming, padding, tags
//! - **collections**: `shuffle`
//! - **time**: `strftime`, `time_diff`
//! - **debug**: `var_dump`
//!
//! # Usage
//!
//! ```rust,ignore
//! use filterkit::config::Config;
//! use filterkit::plugins::filter::FilterRegistry;
//! use minijinja::Environment;
//!
//! let mut env = Environment::new();
//! FilterRegistry::register_all(&mut env, &Config::default().mailto);
//! ```
//!
//! Registering a filter named like a minijinja builtin (`truncate`,
//! `wordwrap`) replaces the builtin.

pub mod collections;
pub mod debug;
pub mod mail;
pub mod strings;
pub mod time;

use crate::config::MailtoConfig;
use crate::obfuscate::EmailObfuscator;
use minijinja::Environment;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub use mail::SharedObfuscator;

/// Registry for managing and registering filter plugins.
pub struct FilterRegistry;

impl FilterRegistry {
    /// Register all available filters with the given environment.
    ///
    /// The `mailto` filter gets a fresh entropy-seeded obfuscator; use
    /// [`FilterRegistry::register_mail`] to share one.
    pub fn register_all(env: &mut Environment<'static>, mailto: &MailtoConfig) {
        let obfuscator = Arc::new(Mutex::new(EmailObfuscator::with_options(
            StdRng::from_entropy(),
            mailto.obfuscator_options(),
        )));
        Self::register_with(env, mailto, obfuscator);
    }

    /// Register all filters, with `mailto` drawing from `obfuscator`.
    pub fn register_with(
        env: &mut Environment<'static>,
        mailto: &MailtoConfig,
        obfuscator: SharedObfuscator,
    ) {
        strings::register_filters(env);
        collections::register_filters(env);
        time::register_filters(env);
        debug::register_filters(env);
        mail::register_filters(env, obfuscator, mailto);
    }

    /// Register only the `mailto` filter.
    pub fn register_mail(
        env: &mut Environment<'static>,
        mailto: &MailtoConfig,
        obfuscator: SharedObfuscator,
    ) {
        mail::register_filters(env, obfuscator, mailto);
    }

    /// Register only string filters.
    pub fn register_strings(env: &mut Environment<'static>) {
        strings::register_filters(env);
    }

    /// Register only collection filters.
    pub fn register_collections(env: &mut Environment<'static>) {
        collections::register_filters(env);
    }

    /// Register only date/time filters.
    pub fn register_time(env: &mut Environment<'static>) {
        time::register_filters(env);
    }

    /// Register only `var_dump`.
    pub fn register_debug(env: &mut Environment<'static>) {
        debug::register_filters(env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::Value;

    fn create_env_with_all_filters() -> Environment<'static> {
        let mut env = Environment::new();
        FilterRegistry::register_all(&mut env, &MailtoConfig::default());
        env
    }

    #[test]
    fn test_register_all_filters() {
        let mut env = create_env_with_all_filters();

        env.add_template("strings", "{{ 'Hello Jack' | uppercase }}")
            .unwrap();
        env.add_template("time", "{{ '2016-03-24' | strftime('%Y') }}")
            .unwrap();
        env.add_template("mail", "{{ 'a@b.com' | mailto(false, false) }}")
            .unwrap();

        let rendered = env.get_template("strings").unwrap().render(Value::UNDEFINED).unwrap();
        assert_eq!(rendered, "HELLO JACK");
        let rendered = env.get_template("time").unwrap().render(Value::UNDEFINED).unwrap();
        assert_eq!(rendered, "2016");
        let rendered = env.get_template("mail").unwrap().render(Value::UNDEFINED).unwrap();
        assert_eq!(rendered, "a@b.com");
    }

    #[test]
    fn test_selective_registration() {
        let mut env = Environment::new();
        FilterRegistry::register_strings(&mut env);

        let result = env.render_str("{{ 'test' | rtl }}", ()).unwrap();
        assert_eq!(result, "tset");

        // mailto was not registered
        assert!(env.render_str("{{ 'a@b.com' | mailto }}", ()).is_err());
    }
}
