//! Mailto command
//!
//! Renders one address exactly as `{{ email | mailto(...) }}` would, which is
//! handy for pasting protected links into static pages.

use super::{CommandContext, Runnable};
use anyhow::Result;
use clap::Parser;
use filterkit::obfuscate::{EmailObfuscator, ObfuscationRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Arguments for the mailto command
#[derive(Parser, Debug, Clone)]
pub struct MailtoArgs {
    /// Email address to render
    pub email: String,

    /// Render the address as text instead of a link
    #[arg(long)]
    pub no_link: bool,

    /// Emit the address as-is, without the decoder script
    #[arg(long)]
    pub unprotected: bool,

    /// Label shown instead of the address
    #[arg(long)]
    pub text: Option<String>,

    /// CSS class of the generated link
    #[arg(long, default_value = "")]
    pub class: String,
}

impl MailtoArgs {
    /// Build the request, letting flags switch off what the configuration enables.
    pub fn request(&self, ctx: &CommandContext) -> ObfuscationRequest {
        let defaults = &ctx.config.mailto;
        let mut request = ObfuscationRequest::new(self.email.as_str())
            .link(defaults.link && !self.no_link)
            .protect(defaults.protect && !self.unprotected)
            .class(self.class.as_str());
        request.display_text = self.text.clone();
        request
    }

    /// Execute the mailto command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let request = self.request(ctx);
        debug!(
            link = request.render_as_link,
            protect = request.protect,
            "rendering email address"
        );

        let mut obfuscator = EmailObfuscator::with_options(
            StdRng::from_entropy(),
            ctx.config.mailto.obfuscator_options(),
        );
        let html = obfuscator.render(&request)?;
        println!("{html}");
        Ok(0)
    }
}

impl Runnable for MailtoArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx)
    }
}
