//! # Field Naming — Model Identifiers to Wire Names
//!
//! Converts identifiers written in PascalCase/camelCase (with embedded
//! acronyms) into the separator-delimited lowercase form the EasyPost JSON
//! API uses for object keys.
//!
//! ## Rules
//!
//! | Input | Output | Why |
//! |-------|--------|-----|
//! | `FirstName` | `first_name` | upper after lower starts a word |
//! | `APIKey` | `api_key` | acronym ends before an upper followed by lower |
//! | `ID` | `id` | trailing upper stays in the acronym |
//! | `from address` | `from_address` | space is a word boundary |
//! | `carrier_account` | `carrier_account` | separators pass through |
//!
//! The conversion is a total function: it never fails and converting an
//! already converted name returns it unchanged.

/// Scanner state while converting one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamingState {
    /// Beginning of the identifier, or just after a separator.
    Start,
    /// Inside a run of non-uppercase characters.
    Lower,
    /// Inside a run of uppercase characters (an acronym or a word's capital).
    Upper,
    /// A space was seen; the next character begins a new word.
    NewWord,
}

/// Default separator for wire names (snake_case).
pub const DEFAULT_SEPARATOR: char = '_';

/// Maps model identifiers to wire names.
///
/// Stateless after construction, so a single instance can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameConverter {
    separator: char,
}

impl Default for NameConverter {
    fn default() -> Self {
        Self::snake_case()
    }
}

impl NameConverter {
    /// Converter producing `snake_case` names.
    pub const fn snake_case() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Converter producing names joined by `separator` (e.g. `'-'` for kebab-case).
    pub const fn with_separator(separator: char) -> Self {
        Self { separator }
    }

    /// The separator inserted between words.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Convert `identifier` to its wire name.
    pub fn convert(&self, identifier: &str) -> String {
        if identifier.is_empty() {
            return String::new();
        }

        let sep = self.separator;
        let mut out = String::with_capacity(identifier.len() + 4);
        let mut state = NamingState::Start;
        let mut chars = identifier.chars().peekable();

        while let Some(c) = chars.next() {
            if c == ' ' {
                if state != NamingState::Start {
                    state = NamingState::NewWord;
                }
            } else if is_cased_upper(c) {
                match state {
                    NamingState::Upper => {
                        // Acronym-to-word boundary: "APIKey" splits before 'K'.
                        if chars.peek().is_some_and(|next| next.is_lowercase()) {
                            out.push(sep);
                        }
                    }
                    NamingState::Lower | NamingState::NewWord => out.push(sep),
                    NamingState::Start => {}
                }
                out.extend(c.to_lowercase());
                state = NamingState::Upper;
            } else if c == sep {
                out.push(sep);
                state = NamingState::Start;
            } else {
                if state == NamingState::NewWord {
                    out.push(sep);
                }
                out.push(c);
                state = NamingState::Lower;
            }
        }

        out
    }
}

/// Uppercase letters that have a lowercase form. Letters such as `𝐀` are
/// uppercase but map to themselves; they are copied like any other character
/// so the output never holds a letter that a second pass would rewrite.
fn is_cased_upper(c: char) -> bool {
    c.is_uppercase() && !c.to_lowercase().eq(std::iter::once(c))
}

/// Convert `identifier` to its `snake_case` wire name.
pub fn to_wire_name(identifier: &str) -> String {
    NameConverter::snake_case().convert(identifier)
}
