//! The `mailto` filter.
//!
//! ```jinja2
//! {{ 'info@example.com' | mailto }}                          {# protected link #}
//! {{ 'info@example.com' | mailto(false, false) }}            {# plain address #}
//! {{ 'info@example.com' | mailto(true, true, 'Write us', 'btn') }}
//! ```
//!
//! Arguments are positional: `link`, `protected`, `text`, `class`. Omitted
//! `link`/`protected` fall back to the `[mailto]` configuration section.
//! The result is marked safe, so auto-escaping does not mangle the markup.

use crate::config::MailtoConfig;
use crate::obfuscate::{EmailObfuscator, ObfuscationRequest};
use minijinja::{Environment, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// An obfuscator shared by every render of an environment.
pub type SharedObfuscator = Arc<Mutex<EmailObfuscator>>;

/// Register the `mailto` filter, drawing randomness from `obfuscator`.
pub fn register_filters(
    env: &mut Environment<'static>,
    obfuscator: SharedObfuscator,
    defaults: &MailtoConfig,
) {
    let default_link = defaults.link;
    let default_protect = defaults.protect;

    env.add_filter(
        "mailto",
        move |email: String,
              link: Option<bool>,
              protected: Option<bool>,
              text: Option<String>,
              class: Option<String>|
              -> Result<Value, minijinja::Error> {
            let mut request = ObfuscationRequest::new(email)
                .link(link.unwrap_or(default_link))
                .protect(protected.unwrap_or(default_protect))
                .class(class.unwrap_or_default());
            request.display_text = text;

            let html = obfuscator.lock().render(&request)?;
            Ok(Value::from_safe_string(html))
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn env_with(defaults: MailtoConfig) -> Environment<'static> {
        let mut env = Environment::new();
        let obfuscator = Arc::new(Mutex::new(EmailObfuscator::new(StdRng::seed_from_u64(9))));
        register_filters(&mut env, obfuscator, &defaults);
        env
    }

    #[test]
    fn test_defaults_from_config() {
        let env = env_with(MailtoConfig {
            protect: false,
            ..MailtoConfig::default()
        });
        let out = env.render_str("{{ 'a@b.com' | mailto }}", ()).unwrap();
        assert_eq!(out, "<a href=\"mailto:a@b.com\">a@b.com</a>");
    }

    #[test]
    fn test_not_escaped_in_html_templates() {
        let mut env = env_with(MailtoConfig::default());
        env.add_template("page.html", "{{ 'a@b.com' | mailto }}").unwrap();
        let out = env.get_template("page.html").unwrap().render(()).unwrap();
        assert!(out.starts_with("<span id=\""));
    }

    #[test]
    fn test_unsupported_characters_fail_render() {
        let env = env_with(MailtoConfig::default());
        let err = env.render_str("{{ 'a b@c.com' | mailto }}", ()).unwrap_err();
        assert_eq!(err.kind(), minijinja::ErrorKind::InvalidOperation);
    }
}
