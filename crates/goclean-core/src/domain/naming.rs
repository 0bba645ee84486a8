//! Identifier case and pluralization transforms.
//!
//! Every generated name (struct, file, route, table, column) flows through
//! these functions, so they must stay pure and deterministic.
//!
//! ## Word splitting
//!
//! 1. **Explicit separators:** `_`, `-`, whitespace → always split
//! 2. **Case transition:** a lowercase letter (or digit) followed by an
//!    uppercase letter → split between them (`UserID` → `User`, `ID`)
//!
//! Acronym runs are not split further: `HTTPServer` stays one word. Go
//! initialisms survive `to_pascal` untouched this way.
//!
//! ## Pluralization
//!
//! An ordered rule list, not a morphology engine:
//!
//! | Rule | Example |
//! |------|---------|
//! | consonant + `y` → `ies` | `Category` → `Categories` |
//! | `s`, `x`, `z`, `ch`, `sh` → `+es` | `Box` → `Boxes` |
//! | otherwise → `+s` | `User` → `Users` |
//!
//! Irregular nouns are not special-cased (`Person` → `Persons`). Route
//! paths and table names only need to agree with each other.
//!
//! None of these functions are idempotent in general; callers must not
//! pluralize an already-plural name.

/// Split an identifier into words.
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in s.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }

        let boundary = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
        if ch.is_uppercase() && boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        current.push(ch);
        prev = Some(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// `UserID` → `user_id`
pub fn to_snake(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `UserName` → `user-name`
pub fn to_kebab(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// `user_name` → `UserName`
///
/// Only the first letter of each word is touched, so `user_id` becomes
/// `UserId` while `UserID` stays `UserID`.
pub fn to_pascal(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// `user_name` → `userName`, `UserID` → `userID`
pub fn to_camel(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Apply the ordered plural rules to the end of `s`.
pub fn to_plural(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let lower = s.to_lowercase();

    if let Some(stem) = s.strip_suffix(['y', 'Y']) {
        if !ends_with_vowel(stem) {
            return format!("{stem}ies");
        }
    }

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{s}es");
    }

    format!("{s}s")
}

/// Inverse of [`to_plural`].
pub fn to_singular(s: &str) -> String {
    let lower = s.to_lowercase();

    if lower.ends_with("ies") && s.len() > 3 {
        return format!("{}y", &s[..s.len() - 3]);
    }

    if ["ses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return s[..s.len() - 2].to_string();
    }

    if lower.ends_with('s') && !lower.ends_with("ss") && s.len() > 1 {
        return s[..s.len() - 1].to_string();
    }

    s.to_string()
}

/// Whether `s` is usable as a Go identifier after [`to_pascal`].
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

fn ends_with_vowel(s: &str) -> bool {
    s.chars()
        .last()
        .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
}
