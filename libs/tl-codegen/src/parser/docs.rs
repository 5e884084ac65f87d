//! Documentation comments (`//@tag value`)

use std::collections::BTreeMap;

/// Documentation collected from one contiguous comment run
#[derive(Debug, Default)]
pub(super) struct Docs {
    pub description: String,
    /// Set when the run documents a union type (`//@class Name`)
    pub class_name: Option<String>,
    /// Parameter name -> description
    pub params: BTreeMap<String, String>,
}

impl Docs {
    /// Parse the comment lines of one run (without their `//` prefix)
    pub fn parse(lines: &[String]) -> Self {
        let text = lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut docs = Docs::default();
        for (tag, value) in split_tags(&text) {
            match tag {
                // Untagged comments are plain descriptions
                None => {
                    if docs.description.is_empty() {
                        docs.description = value.to_string();
                    }
                }
                Some("description") => docs.description = value.to_string(),
                Some("class") => {
                    docs.class_name = value.split_whitespace().next().map(String::from);
                }
                Some(param) => {
                    docs.params.insert(param.to_string(), value.to_string());
                }
            }
        }
        docs
    }
}

/// Split `@a first @b second` into `[(Some("a"), "first"), (Some("b"), "second")]`.
///
/// A tag is `@` at the start of the text or after whitespace, followed by an
/// identifier and then whitespace or the end of the text.
fn split_tags(text: &str) -> Vec<(Option<&str>, &str)> {
    let bytes = text.as_bytes();
    let mut tags: Vec<(usize, usize)> = Vec::new();

    for (at, c) in text.char_indices() {
        if c != '@' || (at > 0 && !bytes[at - 1].is_ascii_whitespace()) {
            continue;
        }
        let rest = &text[at + 1..];
        let name_len = rest
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
            .unwrap_or(rest.len());
        let followed_by_space = rest[name_len..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        if name_len > 0 && followed_by_space {
            tags.push((at, at + 1 + name_len));
        }
    }

    let mut segments = Vec::with_capacity(tags.len() + 1);
    let leading = text[..tags.first().map_or(text.len(), |t| t.0)].trim();
    if !leading.is_empty() {
        segments.push((None, leading));
    }
    for (i, &(at, name_end)) in tags.iter().enumerate() {
        let end = tags.get(i + 1).map_or(text.len(), |t| t.0);
        segments.push((Some(&text[at + 1..name_end]), text[name_end..end].trim()));
    }
    segments
}
