//! String filters for templates.
//!
//! All lengths and positions are counted in characters, not bytes.
//!
//! # Available Filters
//!
//! - `truncate`: Cut a string to a length and append a separator
//! - `wordwrap`: Break a string into lines
//! - `uppercase` / `lowercase`: Unicode case conversion
//! - `ucfirst` / `lcfirst`: Change the case of the first character
//! - `ltrim` / `rtrim`: Strip characters from one end
//! - `str_repeat`: Repeat a string
//! - `plural`: English plural of a word
//! - `strpad` / `leftpad` / `rightpad`: Pad to a length
//! - `rtl`: Reverse a string
//! - `str_replace`: Replace every occurrence of a substring
//! - `strip_tags`: Remove HTML tags, optionally keeping some
//!
//! # Examples
//!
//! ```jinja2
//! {{ 'Gordon Freeman' | truncate(5) }}        {# Gordo... #}
//! {{ 'test' | strpad(10) }}                   {# '   test   ' #}
//! {{ 'mail' | plural(count) }}
//! {{ '<p><b>text</b></p>' | strip_tags('<p>') }}
//! ```

use crate::error::Error;
use minijinja::Environment;
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_TRIM_CHARS: &str = " \t\n\r\0\x0B";

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?([A-Za-z][A-Za-z0-9-]*)\b[^>]*>").expect("static regex"));
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("static regex"));
static ALLOWED_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\s*([A-Za-z][A-Za-z0-9-]*)\s*/?>").expect("static regex"));

/// Register all string filters with the given environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("truncate", truncate_filter);
    env.add_filter("wordwrap", wordwrap_filter);
    env.add_filter("uppercase", uppercase);
    env.add_filter("lowercase", lowercase);
    env.add_filter("ucfirst", ucfirst);
    env.add_filter("lcfirst", lcfirst);
    env.add_filter("ltrim", ltrim_filter);
    env.add_filter("rtrim", rtrim_filter);
    env.add_filter("str_repeat", str_repeat_filter);
    env.add_filter("plural", plural_filter);
    env.add_filter("strpad", strpad);
    env.add_filter("leftpad", leftpad);
    env.add_filter("rightpad", rightpad);
    env.add_filter("rtl", rtl);
    env.add_filter("str_replace", str_replace);
    env.add_filter("strip_tags", strip_tags_filter);
}

fn truncate_filter(
    value: String,
    length: Option<usize>,
    preserve: Option<bool>,
    separator: Option<String>,
) -> String {
    truncate(
        &value,
        length.unwrap_or(30),
        preserve.unwrap_or(false),
        separator.as_deref().unwrap_or("..."),
    )
}

/// Shortens `value` to `length` characters and appends `separator`.
///
/// With `preserve`, the cut moves forward to the next whitespace at or after
/// position `length - 1`; a value without such whitespace is returned whole.
pub fn truncate(value: &str, length: usize, preserve: bool, separator: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= length {
        return value.to_string();
    }

    let cut = if preserve {
        let start = length.max(1) - 1;
        match chars[start..].iter().position(|c| matches!(c, ' ' | '\r' | '\n' | '\t')) {
            Some(offset) => start + offset,
            None => return value.to_string(),
        }
    } else {
        length
    };

    let mut out: String = chars[..cut].iter().collect();
    out.push_str(separator);
    out
}

fn wordwrap_filter(
    value: String,
    length: Option<usize>,
    separator: Option<String>,
    preserve: Option<bool>,
) -> Result<String, minijinja::Error> {
    Ok(wordwrap(
        &value,
        length.unwrap_or(80),
        separator.as_deref().unwrap_or("\n"),
        preserve.unwrap_or(false),
    )?)
}

/// Breaks `value` into lines of at most `width` characters.
///
/// Without `preserve` the text is cut into fixed-size chunks regardless of
/// word boundaries. With `preserve` lines break at spaces only, so words
/// longer than `width` stay on a line of their own.
pub fn wordwrap(value: &str, width: usize, separator: &str, preserve: bool) -> crate::Result<String> {
    if width == 0 {
        return Err(Error::invalid_argument("wordwrap", "length must be greater than zero"));
    }

    if !preserve {
        let chars: Vec<char> = value.chars().collect();
        return Ok(chars
            .chunks(width)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(separator));
    }

    let lines: Vec<String> = value
        .split('\n')
        .map(|paragraph| {
            let mut wrapped: Vec<String> = Vec::new();
            let mut current = String::new();
            let mut current_len = 0;
            for (i, word) in paragraph.split(' ').enumerate() {
                let word_len = word.chars().count();
                if i > 0 {
                    if current_len + 1 + word_len > width {
                        wrapped.push(std::mem::take(&mut current));
                        current_len = 0;
                    } else {
                        current.push(' ');
                        current_len += 1;
                    }
                }
                current.push_str(word);
                current_len += word_len;
            }
            wrapped.push(current);
            wrapped.join(separator)
        })
        .collect();

    Ok(lines.join("\n"))
}

fn uppercase(value: String) -> String {
    value.to_uppercase()
}

fn lowercase(value: String) -> String {
    value.to_lowercase()
}

/// Uppercases the first character.
pub fn ucfirst(value: String) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => value,
    }
}

/// Lowercases the first character.
pub fn lcfirst(value: String) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => value,
    }
}

/// Expands a character list where `a..e` stands for the range `a` to `e`.
fn parse_charlist(charlist: &str) -> Vec<char> {
    let chars: Vec<char> = charlist.chars().collect();
    let mut set = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if i + 3 < chars.len() && chars[i + 1] == '.' && chars[i + 2] == '.' && chars[i] <= chars[i + 3] {
            set.extend(chars[i]..=chars[i + 3]);
            i += 4;
        } else {
            set.push(chars[i]);
            i += 1;
        }
    }
    set
}

fn ltrim_filter(value: String, charlist: Option<String>) -> String {
    let set = parse_charlist(charlist.as_deref().unwrap_or(DEFAULT_TRIM_CHARS));
    value.trim_start_matches(|c: char| set.contains(&c)).to_string()
}

fn rtrim_filter(value: String, charlist: Option<String>) -> String {
    let set = parse_charlist(charlist.as_deref().unwrap_or(DEFAULT_TRIM_CHARS));
    value.trim_end_matches(|c: char| set.contains(&c)).to_string()
}

fn str_repeat_filter(value: String, multiplier: Option<usize>) -> Result<String, minijinja::Error> {
    Ok(str_repeat(&value, multiplier.unwrap_or(1))?)
}

/// Repeats `value` `multiplier` times.
///
/// Fails instead of panicking when the result would not fit in memory.
pub fn str_repeat(value: &str, multiplier: usize) -> crate::Result<String> {
    match value.len().checked_mul(multiplier) {
        Some(bytes) if isize::try_from(bytes).is_ok() => Ok(value.repeat(multiplier)),
        _ => Err(Error::invalid_argument(
            "str_repeat",
            format!("repeating {} bytes {multiplier} times overflows", value.len()),
        )),
    }
}

fn plural_filter(value: String, count: Option<i64>) -> String {
    plural(&value, count.unwrap_or(2))
}

const UNCOUNTABLE: &[&str] = &[
    "audio", "equipment", "feedback", "fish", "information", "money", "news", "police", "rice",
    "series", "sheep", "software", "species", "deer",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
];

/// English plural of `word` unless `count` is one.
///
/// The result follows the capitalisation of the input (`Mail` gives `Mails`,
/// `MAIL` gives `MAILS`).
pub fn plural(word: &str, count: i64) -> String {
    if count.unsigned_abs() == 1 || !word.chars().last().is_some_and(char::is_alphanumeric) {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    let plural = pluralize_lower(&lower);
    match_case(&plural, word)
}

fn pluralize_lower(word: &str) -> String {
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }

    let mut chars = word.chars().rev();
    let last = chars.next();
    let before = chars.next();

    match (before, last) {
        (Some(b), Some('y')) if !"aeiou".contains(b) => format!("{}ies", &word[..word.len() - 1]),
        (_, Some('s' | 'x' | 'z')) => format!("{word}es"),
        (Some('c' | 's'), Some('h')) => format!("{word}es"),
        (Some(b), Some('e')) if b == 'f' && !word.ends_with("ffe") => {
            format!("{}ves", &word[..word.len() - 2])
        }
        (Some('l' | 'r'), Some('f')) => format!("{}ves", &word[..word.len() - 1]),
        _ => format!("{word}s"),
    }
}

fn match_case(value: &str, template: &str) -> String {
    let has_letters = template.chars().any(char::is_alphabetic);
    if has_letters && template.chars().all(|c| !c.is_lowercase()) {
        return value.to_uppercase();
    }
    if template.chars().next().is_some_and(char::is_uppercase) {
        return ucfirst(value.to_string());
    }
    value.to_string()
}

#[derive(Clone, Copy)]
enum PadSide {
    Left,
    Right,
    Both,
}

fn pad(value: &str, pad_length: usize, pad_string: &str, side: PadSide) -> crate::Result<String> {
    if pad_string.is_empty() {
        return Err(Error::invalid_argument("strpad", "padding string must not be empty"));
    }

    let len = value.chars().count();
    if pad_length <= len {
        return Ok(value.to_string());
    }

    let total = pad_length - len;
    let (left, right) = match side {
        PadSide::Left => (total, 0),
        PadSide::Right => (0, total),
        PadSide::Both => (total / 2, total - total / 2),
    };
    let fill = |n: usize| pad_string.chars().cycle().take(n).collect::<String>();

    Ok(format!("{}{}{}", fill(left), value, fill(right)))
}

fn strpad(value: String, pad_length: usize, pad_string: Option<String>) -> Result<String, minijinja::Error> {
    Ok(pad(&value, pad_length, pad_string.as_deref().unwrap_or(" "), PadSide::Both)?)
}

fn leftpad(value: String, pad_length: usize, pad_string: Option<String>) -> Result<String, minijinja::Error> {
    Ok(pad(&value, pad_length, pad_string.as_deref().unwrap_or(" "), PadSide::Left)?)
}

fn rightpad(value: String, pad_length: usize, pad_string: Option<String>) -> Result<String, minijinja::Error> {
    Ok(pad(&value, pad_length, pad_string.as_deref().unwrap_or(" "), PadSide::Right)?)
}

fn rtl(value: String) -> String {
    value.chars().rev().collect()
}

fn str_replace(value: String, search: String, replace: String) -> String {
    if search.is_empty() {
        return value;
    }
    value.replace(&search, &replace)
}

fn strip_tags_filter(value: String, allow: Option<String>) -> String {
    strip_tags(&value, allow.as_deref().unwrap_or(""))
}

/// Removes HTML comments and every tag not listed in `allow`.
///
/// `allow` uses the `"<p><b>"` form; bare names separated by commas or
/// spaces are accepted too.
pub fn strip_tags(value: &str, allow: &str) -> String {
    let mut allowed: Vec<String> = ALLOWED_TAG
        .captures_iter(allow)
        .map(|caps| caps[1].to_ascii_lowercase())
        .collect();
    if allowed.is_empty() {
        allowed = allow
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();
    }

    let without_comments = COMMENT.replace_all(value, "");
    TAG.replace_all(&without_comments, |caps: &regex::Captures<'_>| {
        if allowed.contains(&caps[1].to_ascii_lowercase()) {
            caps[0].to_string()
        } else {
            String::new()
        }
    })
    .into_owned()
}
