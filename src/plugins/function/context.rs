//! Functions that read application state: `config`, `env`, `session` and
//! `trans`.
//!
//! ```jinja2
//! {{ config('app.name') }}
//! {{ env('APP_ENV', 'production') }}
//! {{ session('cart.items') }}
//! {{ trans('messages.welcome', {'name': user.name}) }}
//! ```

use crate::config::{lookup_dotted, Config};
use crate::plugins::filter::strings::ucfirst;
use minijinja::value::ValueKind;
use minijinja::{Environment, Value};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;

/// Read-only data templates can look up.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    /// Tree answered by `config()`
    pub values: serde_json::Value,
    /// Tree answered by `trans()`
    pub translations: serde_json::Value,
}

impl Globals {
    pub fn from_config(config: &Config) -> Self {
        Self {
            values: config.values.clone(),
            translations: config.translations.clone(),
        }
    }

    /// Looks up a dotted key in `values`.
    pub fn config(&self, key: &str) -> Option<&serde_json::Value> {
        lookup_dotted(&self.values, key)
    }

    /// Translates `key`, replacing `:name` placeholders from `parameters`.
    ///
    /// Unknown keys translate to themselves.
    pub fn translate(&self, key: &str, parameters: &[(String, String)]) -> Value {
        match lookup_dotted(&self.translations, key) {
            Some(serde_json::Value::String(line)) => Value::from(replace_placeholders(line, parameters)),
            Some(other) => Value::from_serialize(other),
            None => Value::from(key),
        }
    }
}

/// Replaces `:name`, `:Name` and `:NAME` with the value as-is, capitalised
/// and uppercased. Longer names are replaced first so `:days` never eats
/// `:days_left`.
fn replace_placeholders(line: &str, parameters: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = parameters.iter().collect();
    sorted.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = line.to_string();
    for (name, value) in sorted {
        out = out
            .replace(&format!(":{}", ucfirst(name.clone())), &ucfirst(value.clone()))
            .replace(&format!(":{}", name.to_uppercase()), &value.to_uppercase())
            .replace(&format!(":{name}"), value);
    }
    out
}

/// Per-visitor key/value store read by `session()`.
///
/// Clones share the same data, so the application can keep a handle and
/// update it between renders.
#[derive(Debug, Clone)]
pub struct SessionStore {
    data: Arc<RwLock<serde_json::Value>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            data: Arc::new(RwLock::new(serde_json::Value::Object(serde_json::Map::new()))),
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under a dotted key, creating nested tables as needed.
    pub fn put(&self, key: &str, value: impl Into<serde_json::Value>) {
        let value = value.into();
        let mut data = self.data.write();
        let mut node = &mut *data;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if !node.is_object() {
                *node = serde_json::Value::Object(serde_json::Map::new());
            }
            let Some(map) = node.as_object_mut() else {
                return;
            };
            if parts.peek().is_none() {
                map.insert(part.to_string(), value);
                return;
            }
            node = map
                .entry(part.to_string())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
        }
    }

    /// Value under a dotted key.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        lookup_dotted(&self.data.read(), key).cloned()
    }

    /// Removes everything.
    pub fn clear(&self) {
        *self.data.write() = serde_json::Value::Object(serde_json::Map::new());
    }

    /// A copy of the whole store.
    pub fn snapshot(&self) -> serde_json::Value {
        self.data.read().clone()
    }
}

/// Register `config`, `env`, `session` and `trans`.
pub fn register_functions(env: &mut Environment<'static>, globals: Arc<Globals>, session: SessionStore) {
    let config_globals = Arc::clone(&globals);
    env.add_function("config", move |key: Option<String>, default: Option<Value>| -> Value {
        match key {
            None => Value::from_serialize(&config_globals.values),
            Some(key) => match config_globals.config(&key) {
                Some(found) => Value::from_serialize(found),
                None => default.unwrap_or(Value::from(())),
            },
        }
    });

    env.add_function("env", |key: String, default: Option<Value>| -> Value {
        match std::env::var(&key) {
            Ok(value) => Value::from(value),
            Err(_) => {
                trace!(key = %key, "environment variable not set");
                default.unwrap_or(Value::from(()))
            }
        }
    });

    env.add_function("session", move |key: Option<String>| -> Value {
        match key {
            None => Value::from_serialize(session.snapshot()),
            Some(key) => session
                .get(&key)
                .map_or(Value::from(()), Value::from_serialize),
        }
    });

    env.add_function(
        "trans",
        move |key: Option<String>, parameters: Option<Value>| -> Result<Value, minijinja::Error> {
            let Some(key) = key else {
                return Ok(Value::from(""));
            };
            let parameters = match parameters {
                Some(map) if map.kind() == ValueKind::Map => map
                    .try_iter()?
                    .map(|name| {
                        let value = map.get_item(&name)?;
                        Ok((name.to_string(), value.to_string()))
                    })
                    .collect::<Result<Vec<_>, minijinja::Error>>()?,
                _ => Vec::new(),
            };
            Ok(globals.translate(&key, &parameters))
        },
    );
}
