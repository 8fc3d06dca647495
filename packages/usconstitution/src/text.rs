//! Text normalization for provision fields.
//!
//! Source records carry `content` either as a plain string or as a list of
//! string fragments; both normalize to a single trimmed string.

use serde::{Deserialize, Deserializer};
use textwrap::{fill, Options};

/// Content as it appears in source records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawContent {
    Text(String),
    Fragments(Vec<String>),
}

/// Join fragments with single spaces and trim the result.
///
/// # Examples
/// ```
/// use usconstitution::text::join_fragments;
///
/// let joined = join_fragments([" We the People", "of the United States "]);
/// assert_eq!(joined, "We the People of the United States");
/// ```
pub fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = fragments
        .into_iter()
        .map(|f| f.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    joined.trim().to_string()
}

/// Deserialize `content`: a string or a list of fragments, joined and trimmed.
pub fn deserialize_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawContent>::deserialize(deserializer)? {
        Some(RawContent::Text(text)) => Ok(text.trim().to_string()),
        Some(RawContent::Fragments(fragments)) => Ok(join_fragments(fragments)),
        None => Ok(String::new()),
    }
}

/// Deserialize a display label (`num`, `name`), trimmed. `null` reads as empty.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .unwrap_or_default())
}

/// Wrap provision text at `width`, keeping paragraph breaks.
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = Options::new(width);
    text.split("\n\n")
        .map(|p| fill(p, &options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "deserialize_content")]
        content: String,
        #[serde(default, deserialize_with = "deserialize_trimmed")]
        name: String,
    }

    fn record(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_content_string_is_trimmed() {
        assert_eq!(record(r#"{"content": "  text \n"}"#).content, "text");
    }

    #[test]
    fn test_content_fragments_are_joined() {
        let r = record(r#"{"content": ["All legislative Powers", "herein granted "]}"#);
        assert_eq!(r.content, "All legislative Powers herein granted");
    }

    #[test]
    fn test_content_missing_or_null_is_empty() {
        assert_eq!(record("{}").content, "");
        assert_eq!(record(r#"{"content": null}"#).content, "");
    }

    #[test]
    fn test_content_wrong_type_is_error() {
        assert!(serde_json::from_str::<Record>(r#"{"content": 5}"#).is_err());
    }

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(record(r#"{"name": " The Legislative Branch"}"#).name, "The Legislative Branch");
        assert_eq!(record(r#"{"name": null}"#).name, "");
    }

    #[test]
    fn test_join_fragments_empty() {
        assert_eq!(join_fragments(Vec::<String>::new()), "");
    }

    #[test]
    fn test_wrap_text_keeps_paragraphs() {
        let wrapped = wrap_text("one two three\n\nfour five", 7);
        assert_eq!(wrapped, "one two\nthree\n\nfour\nfive");
    }
}
