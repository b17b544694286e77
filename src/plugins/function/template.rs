//! `template_from_string`: render a template held in a variable.
//!
//! ```jinja2
//! {% set name = 'John' %}
//! {{ template_from_string("Hello {{ name }}", {'name': name}) }}
//! ```
//!
//! The inner template sees only the context passed as the second argument.
//! Its output is marked safe, since it was already rendered by the same
//! environment.

use minijinja::{Environment, Error, State, Value};

pub fn register_functions(env: &mut Environment<'static>) {
    env.add_function("template_from_string", template_from_string);
}

fn template_from_string(state: &State, source: String, context: Option<Value>) -> Result<Value, Error> {
    let context = context.unwrap_or(Value::UNDEFINED);
    let rendered = state.env().render_str(&source, context)?;
    Ok(Value::from_safe_string(rendered))
}
