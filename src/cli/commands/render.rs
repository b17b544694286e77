//! Render command
//!
//! This module implements the `render` subcommand: a template file is
//! rendered with every Filterkit extension installed and written to stdout.
//! Templates next to it can be pulled in with `include` and `extends`.

use super::{CommandContext, Runnable};
use anyhow::{Context, Result};
use clap::Parser;
use filterkit::error::Error;
use filterkit::plugins::ExtensionRegistry;
use minijinja::Environment;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for the render command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Path to the template file
    #[arg(required = true)]
    pub template: PathBuf,

    /// Template variables (JSON, YAML or TOML file)
    #[arg(long)]
    pub vars: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let vars = match &self.vars {
            Some(path) => load_vars(path)
                .with_context(|| format!("failed to read variables from '{}'", path.display()))?,
            None => serde_json::Value::Object(serde_json::Map::new()),
        };

        // A missing template is an IO error, not a lookup failure
        std::fs::metadata(&self.template).map_err(Error::from)?;

        let name = self
            .template
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::invalid_argument("render", "template path has no file name"))?;
        let dir = match self.template.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let registry = ExtensionRegistry::new(&ctx.config);
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_loader(minijinja::path_loader(dir));
        registry.install(&mut env);

        info!(template = %self.template.display(), "rendering template");
        let output = env
            .get_template(name)
            .and_then(|template| template.render(&vars))
            .map_err(Error::from)
            .with_context(|| format!("failed to render '{}'", self.template.display()))?;

        debug!(bytes = output.len(), "template rendered");

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(0)
    }
}

impl Runnable for RenderArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx)
    }
}

/// Load template variables, picking the format from the file extension.
///
/// Files without a known extension are read as YAML, which also accepts JSON.
pub fn load_vars(path: &Path) -> filterkit::Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config_load(path, e.to_string()))?;

    let vars: serde_json::Value = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    match vars {
        serde_json::Value::Object(_) => Ok(vars),
        serde_json::Value::Null => Ok(serde_json::Value::Object(serde_json::Map::new())),
        _ => Err(Error::invalid_argument(
            "render",
            format!("variables in '{}' must be a mapping", path.display()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn vars_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_vars_by_extension() {
        let json = vars_file(".json", r#"{"name": "Jack"}"#);
        assert_eq!(load_vars(json.path()).unwrap()["name"], "Jack");

        let toml = vars_file(".toml", "name = \"Jack\"\n");
        assert_eq!(load_vars(toml.path()).unwrap()["name"], "Jack");

        let yaml = vars_file(".yml", "name: Jack\n");
        assert_eq!(load_vars(yaml.path()).unwrap()["name"], "Jack");
    }

    #[test]
    fn test_load_vars_rejects_non_mapping() {
        let file = vars_file(".json", "[1, 2]");
        assert!(load_vars(file.path()).is_err());
    }
}
