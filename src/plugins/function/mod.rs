//! Template functions for Filterkit.
//!
//! - **context**: `config`, `env`, `session`, `trans`
//! - **template**: `template_from_string`
//!
//! `var_dump` is registered with the debug filters.

pub mod context;
pub mod template;

pub use context::{Globals, SessionStore};

use minijinja::Environment;
use std::sync::Arc;

/// Registry for template functions.
pub struct FunctionRegistry;

impl FunctionRegistry {
    /// Register all functions with the given environment.
    pub fn register_all(env: &mut Environment<'static>, globals: Arc<Globals>, session: SessionStore) {
        context::register_functions(env, globals, session);
        template::register_functions(env);
    }
}
