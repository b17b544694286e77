//! Rendering of email addresses as plain, linked or script-protected HTML.

use super::alphabet::{Alphabet, Key};
use super::escape;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Link scheme, emitted in ciphered form so the word never appears in the page.
const LINK_SCHEME: &str = "mailto";

/// Largest numeric part of a generated element id.
pub const MAX_ELEMENT_ID: u32 = 999_999_999;

/// Number of issued element ids remembered for collision checks.
pub const MAX_TRACKED_IDS: usize = 10_000;

/// Everything needed to render one email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationRequest {
    /// Address to render, treated as an opaque character sequence.
    pub email: String,
    /// Wrap the address in a `mailto:` anchor.
    pub render_as_link: bool,
    /// Hide the address behind a client-side decoder.
    pub protect: bool,
    /// Visible label instead of the address itself.
    pub display_text: Option<String>,
    /// CSS class for the generated anchor.
    #[serde(default)]
    pub css_class: String,
}

impl ObfuscationRequest {
    /// A linked, protected request for `email`.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            render_as_link: true,
            protect: true,
            display_text: None,
            css_class: String::new(),
        }
    }

    pub fn link(mut self, render_as_link: bool) -> Self {
        self.render_as_link = render_as_link;
        self
    }

    pub fn protect(mut self, protect: bool) -> Self {
        self.protect = protect;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.css_class = class.into();
        self
    }
}

/// What the rendered fragment shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// The address as text.
    PlainText,
    /// The address inside an anchor.
    Link,
    /// A custom label as text.
    CustomLabelPlain(String),
    /// A custom label inside an anchor pointing at the address.
    CustomLabelLink(String),
}

impl RenderMode {
    /// Picks the mode for a request.
    pub fn from_request(request: &ObfuscationRequest) -> Self {
        match (&request.display_text, request.render_as_link) {
            (None, false) => Self::PlainText,
            (None, true) => Self::Link,
            (Some(label), false) => Self::CustomLabelPlain(label.clone()),
            (Some(label), true) => Self::CustomLabelLink(label.clone()),
        }
    }

    /// Whether the fragment is an anchor.
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link | Self::CustomLabelLink(_))
    }

    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlainText => "plain",
            Self::Link => "link",
            Self::CustomLabelPlain(_) => "custom_label_plain",
            Self::CustomLabelLink(_) => "custom_label_link",
        }
    }

    /// The custom label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::CustomLabelPlain(label) | Self::CustomLabelLink(label) => Some(label),
            Self::PlainText | Self::Link => None,
        }
    }
}

/// Presentation settings shared by every protected fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscatorOptions {
    /// Text shown until the script replaces it.
    pub placeholder: String,
    /// Prefix of generated element ids.
    pub id_prefix: String,
}

impl Default for ObfuscatorOptions {
    fn default() -> Self {
        Self {
            placeholder: "[email address protected]".to_string(),
            id_prefix: "e".to_string(),
        }
    }
}

/// Renders email addresses, drawing keys and element ids from `R`.
///
/// Element ids handed out by one instance are unique across the last
/// [`MAX_TRACKED_IDS`] renders, so that many protected addresses can share a
/// page. Older ids are forgotten to keep memory flat in long-running hosts.
#[derive(Debug)]
pub struct EmailObfuscator<R = StdRng> {
    rng: R,
    options: ObfuscatorOptions,
    issued: HashSet<u32>,
}

impl EmailObfuscator<StdRng> {
    /// An obfuscator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> EmailObfuscator<R> {
    /// Creates an obfuscator with default options.
    pub fn new(rng: R) -> Self {
        Self::with_options(rng, ObfuscatorOptions::default())
    }

    /// Creates an obfuscator with custom options.
    pub fn with_options(rng: R, options: ObfuscatorOptions) -> Self {
        Self {
            rng,
            options,
            issued: HashSet::new(),
        }
    }

    pub fn options(&self) -> &ObfuscatorOptions {
        &self.options
    }

    /// Renders `request` as an HTML fragment.
    ///
    /// Unprotected output is not escaped. Protected output fails with
    /// [`crate::Error::UnsupportedEmailCharacters`] when the address has
    /// characters outside the alphabet.
    pub fn render(&mut self, request: &ObfuscationRequest) -> Result<String> {
        let mode = RenderMode::from_request(request);

        if !request.protect {
            return Ok(render_unprotected(&request.email, &mode));
        }

        Alphabet::validate(&request.email)?;

        let key = Key::generate(&mut self.rng);
        let cipher = key.encode(&request.email)?;
        let id = self.next_element_id();

        debug!(
            id = %id,
            mode = mode.name(),
            length = request.email.len(),
            "rendering protected email"
        );

        let script = self.decoder_script(&key, &cipher, &id, &mode, &request.css_class)?;
        trace!(bytes = script.len(), "decoder script generated");

        Ok(format!(
            "<span id=\"{}\">{}</span><script type=\"text/javascript\">/*<![CDATA[*/{}/*]]>*/</script>",
            escape::html(&id),
            escape::html(&self.options.placeholder),
            script
        ))
    }

    fn next_element_id(&mut self) -> String {
        if self.issued.len() >= MAX_TRACKED_IDS {
            trace!(tracked = self.issued.len(), "forgetting issued element ids");
            self.issued.clear();
        }
        loop {
            let n = self.rng.gen_range(1..=MAX_ELEMENT_ID);
            if self.issued.insert(n) {
                return format!("{}{}", self.options.id_prefix, n);
            }
        }
    }

    fn decoder_script(
        &self,
        key: &Key,
        cipher: &str,
        id: &str,
        mode: &RenderMode,
        css_class: &str,
    ) -> Result<String> {
        let mut script = format!(
            "(function(){{var a={},b=a.split(\"\").sort().join(\"\"),c={},d=\"\",i;\
             for(i=0;i<c.length;i++)d+=b.charAt(a.indexOf(c.charAt(i)));\
             var t=document.getElementById({});if(!t)return;var y={};",
            escape::script_string(key.as_str()),
            escape::script_string(cipher),
            escape::script_string(id),
            mode.label().map_or_else(|| "d".to_string(), escape::script_string),
        );

        if mode.is_link() {
            script.push_str(&format!(
                "var s={},m=\"\",cl={};\
                 for(i=0;i<s.length;i++)m+=b.charAt(a.indexOf(s.charAt(i)));\
                 var l=document.createElement(\"a\");if(cl)l.className=cl;\
                 l.href=m+\":\"+d;l.appendChild(document.createTextNode(y));",
                escape::script_string(&key.encode(LINK_SCHEME)?),
                escape::script_string(css_class),
            ));
            script.push_str("t.innerHTML=\"\";t.appendChild(l);");
        } else {
            script.push_str("t.innerHTML=\"\";t.appendChild(document.createTextNode(y));");
        }

        script.push_str("})();");
        Ok(script)
    }
}

fn render_unprotected(email: &str, mode: &RenderMode) -> String {
    let label = mode.label().unwrap_or(email);
    if mode.is_link() {
        format!("<a href=\"mailto:{email}\">{label}</a>")
    } else {
        label.to_string()
    }
}
