//! Email address obfuscation.
//!
//! Protected addresses are written into the page as a substitution cipher
//! over a fixed 67-symbol alphabet, together with a randomly permuted key and
//! a small inline script that decodes them in the browser. Scrapers that
//! only read static markup never see the address or the `mailto` scheme.
//!
//! This is a defence against naive harvesting, not encryption.
//!
//! # Example
//!
//! ```rust,ignore
//! use filterkit::obfuscate::{EmailObfuscator, ObfuscationRequest};
//!
//! let mut obfuscator = EmailObfuscator::from_entropy();
//! let html = obfuscator.render(&ObfuscationRequest::new("info@example.com").text("Write us"))?;
//! ```

pub mod alphabet;
pub mod escape;
pub mod render;

pub use alphabet::{Alphabet, Key, ALPHABET, ALPHABET_LEN};
pub use render::{EmailObfuscator, ObfuscationRequest, ObfuscatorOptions, RenderMode};
