//! Compact attribute notation
//!
//!     Headings and fenced containers carry attributes written as a bracketed token list
//!     appended to the line that opens them:
//!
//!         # Title {#intro .lead data-level=2}
//!         :::{#main .note .wide data-section=content}
//!
//!     Token order is fixed by category: the identifier (`#id`) first, then one `.class`
//!     token per space-separated class name in source order, then every remaining attribute
//!     as `key=value` in the order it was declared. An attribute set that yields no tokens
//!     produces no `{}` at all.
//!
//!     [`encode_attributes`] is the single formatting routine for the reverse direction;
//!     both the container rule and the heading rule go through it so the two produce
//!     byte-identical notation for the same attribute set. [`parse_attribute_list`] reads
//!     the notation back in the forward direction.
//!
//!     The container marker ([`CONTAINER_MARKER`]) is the attribute the forward pipeline
//!     stamps on every `<div>` it emits for a fenced block. Its value carries no meaning and
//!     it is never rendered as a token.

use std::borrow::Cow;

/// Attribute stamped on every `<div>` produced from a fenced container.
pub const CONTAINER_MARKER: &str = "data-fence";

/// An ordered list of `(name, value)` attribute pairs.
///
/// Insertion order is preserved. Setting a name that is already present replaces its
/// value in place, so the last write wins without reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from pairs in declaration order; duplicated names keep the last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut attributes = Self::new();
        for (key, value) in pairs {
            attributes.set(key, value);
        }
        attributes
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(existing, _)| existing == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// Encode an ordered attribute list into compact notation tokens.
///
/// Pure and infallible: an empty list (or one holding only the container marker)
/// yields no tokens. Duplicated names resolve last-wins, at the position of their
/// first declaration. An identifier or class list that cannot be written as `#id` /
/// `.class` falls back to a quoted `id=` / `class=` pair; attribute names the notation
/// has no spelling for are skipped.
pub fn encode_attributes(attrs: &[(String, String)]) -> Vec<String> {
    let mut id: Option<&str> = None;
    let mut classes: Option<&str> = None;
    let mut others: Vec<(&str, &str)> = Vec::new();

    for (key, value) in attrs {
        match key.as_str() {
            "id" => id = Some(value.as_str()),
            "class" => classes = Some(value.as_str()),
            CONTAINER_MARKER => {}
            name if !is_attribute_key(name) => {}
            _ => match others.iter_mut().find(|(existing, _)| *existing == key.as_str()) {
                Some(slot) => slot.1 = value.as_str(),
                None => others.push((key.as_str(), value.as_str())),
            },
        }
    }

    let mut tokens = Vec::new();
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        if is_plain_word(id) {
            tokens.push(format!("#{id}"));
        } else {
            tokens.push(format!("id={}", quote_value(id)));
        }
    }
    if let Some(classes) = classes {
        let mut names = classes.split(' ').filter(|class| !class.is_empty()).peekable();
        if names.peek().is_some() && classes.split(' ').all(|c| c.is_empty() || is_plain_word(c)) {
            tokens.extend(names.map(|class| format!(".{class}")));
        } else if names.peek().is_some() {
            tokens.push(format!("class={}", quote_value(classes)));
        }
    }
    tokens.extend(
        others
            .into_iter()
            .map(|(key, value)| format!("{key}={}", quote_value(value))),
    );
    tokens
}

/// Render the bracketed notation, or an empty string when there are no tokens.
pub fn format_attribute_list(attrs: &[(String, String)]) -> String {
    let tokens = encode_attributes(attrs);
    if tokens.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", tokens.join(" "))
    }
}

/// Characters that end a bare word or cannot appear in one.
fn is_reserved(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '{' | '}' | '\\' | '=')
}

/// A word usable bare after `#`, `.` or `key=`.
fn is_plain_word(word: &str) -> bool {
    !word.is_empty() && !word.chars().any(is_reserved)
}

/// Whether `key=value` can be written for this attribute name.
///
/// Names may not start with a digit so that prose such as `{1=2}` stays text.
fn is_attribute_key(key: &str) -> bool {
    is_plain_word(key) && !key.starts_with(|c: char| c.is_ascii_digit())
}

/// Values that the forward parser could not read back bare are double-quoted.
fn quote_value(value: &str) -> Cow<'_, str> {
    if is_plain_word(value) {
        Cow::Borrowed(value)
    } else {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        Cow::Owned(format!("\"{escaped}\""))
    }
}

/// Parse the inside of a `{...}` attribute list.
///
/// Accepts `#id`, `.class`, `key=value`, `key="quoted value"` and `key='quoted'`
/// tokens separated by whitespace. `id=` and `class=` pairs are read like their
/// shorthand. Returns `None` when the text is not a well-formed list, so that ordinary
/// braces in prose are left alone. The result is ordered id, class, then the remaining
/// attributes as declared.
pub fn parse_attribute_list(source: &str) -> Option<Attributes> {
    let mut id: Option<String> = None;
    let mut classes: Vec<String> = Vec::new();
    let mut others = Attributes::new();
    let mut chars = source.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut name = String::new();
        while let Some(c) = chars.next_if(|&c| !c.is_whitespace() && c != '=') {
            name.push(c);
        }

        if chars.next_if_eq(&'=').is_none() {
            // Shorthand token
            let (kind, word) = name.split_at(name.chars().next()?.len_utf8());
            if !matches!(kind, "#" | ".") || !is_plain_word(word) {
                return None;
            }
            if kind == "#" {
                id = Some(word.to_string());
            } else {
                classes.push(word.to_string());
            }
            continue;
        }

        if !is_attribute_key(&name) {
            return None;
        }
        let mut value = String::new();
        if matches!(chars.peek(), Some('"' | '\'')) {
            let quote = chars.next()?;
            loop {
                match chars.next()? {
                    '\\' => value.push(chars.next()?),
                    c if c == quote => break,
                    c => value.push(c),
                }
            }
            if chars.peek().is_some_and(|c| !c.is_whitespace()) {
                return None;
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
            if !is_plain_word(&value) {
                return None;
            }
        }

        match name.as_str() {
            "id" => id = Some(value),
            "class" if !value.is_empty() => classes.push(value),
            "class" => {}
            _ => others.set(name, value),
        }
    }

    let mut attributes = Attributes::new();
    if let Some(id) = id {
        attributes.set("id", id);
    }
    if !classes.is_empty() {
        attributes.set("class", classes.join(" "));
    }
    for (key, value) in others.0 {
        attributes.set(key, value);
    }
    Some(attributes)
}

/// Split a trailing `{...}` attribute list off a line of markup source.
///
/// Returns the text before the list (trailing whitespace removed) and the parsed
/// attributes, or `None` when the text does not end in a well-formed list. Braces
/// escaped with a backslash never delimit a list.
pub fn split_trailing_attribute_list(text: &str) -> Option<(&str, Attributes)> {
    let trimmed = text.trim_end();
    let body = trimmed.strip_suffix('}')?;
    if body.ends_with('\\') {
        return None;
    }
    body.match_indices('{')
        .rev()
        .filter(|(open, _)| !body[..*open].ends_with('\\'))
        .find_map(|(open, _)| {
            let attributes = parse_attribute_list(&body[open + 1..])?;
            Some((trimmed[..open].trim_end(), attributes))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn id_comes_before_classes() {
        let attrs = pairs(&[("class", "a b"), ("id", "foo")]);
        assert_eq!(format_attribute_list(&attrs), "{#foo .a .b}");
    }

    #[test]
    fn other_attributes_keep_declaration_order() {
        let attrs = pairs(&[
            ("data-z", "1"),
            ("id", "main"),
            ("data-a", "2"),
            ("class", "container"),
        ]);
        assert_eq!(
            encode_attributes(&attrs),
            vec!["#main", ".container", "data-z=1", "data-a=2"]
        );
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(encode_attributes(&[]).is_empty());
        assert_eq!(format_attribute_list(&[]), "");
    }

    #[test]
    fn marker_is_never_encoded() {
        let attrs = pairs(&[(CONTAINER_MARKER, "7"), ("class", "note")]);
        assert_eq!(format_attribute_list(&attrs), "{.note}");

        let only_marker = pairs(&[(CONTAINER_MARKER, "anything")]);
        assert_eq!(format_attribute_list(&only_marker), "");
    }

    #[test]
    fn repeated_spaces_in_class_are_skipped() {
        let attrs = pairs(&[("class", "  a   b ")]);
        assert_eq!(encode_attributes(&attrs), vec![".a", ".b"]);
    }

    #[test]
    fn empty_id_is_skipped() {
        let attrs = pairs(&[("id", ""), ("title", "x")]);
        assert_eq!(encode_attributes(&attrs), vec!["title=x"]);
    }

    #[test]
    fn duplicated_names_resolve_last_wins() {
        let attrs = pairs(&[("data-a", "1"), ("data-b", "2"), ("data-a", "3")]);
        assert_eq!(encode_attributes(&attrs), vec!["data-a=3", "data-b=2"]);
    }

    #[test]
    fn awkward_values_are_quoted() {
        let attrs = pairs(&[("title", "two words"), ("alt", ""), ("q", "say \"hi\"")]);
        assert_eq!(
            encode_attributes(&attrs),
            vec![r#"title="two words""#, r#"alt="""#, r#"q="say \"hi\"""#]
        );
    }

    #[test]
    fn parses_all_token_kinds() {
        let attrs = parse_attribute_list(r#"data-x=1 .a #main .b title="two words" k='v'"#)
            .expect("well-formed list");
        assert_eq!(
            attrs.as_slice(),
            pairs(&[
                ("id", "main"),
                ("class", "a b"),
                ("data-x", "1"),
                ("title", "two words"),
                ("k", "v"),
            ])
            .as_slice()
        );
    }

    #[test]
    fn parses_empty_list() {
        assert_eq!(parse_attribute_list(""), Some(Attributes::new()));
        assert_eq!(parse_attribute_list("   "), Some(Attributes::new()));
    }

    #[test]
    fn rejects_prose() {
        assert_eq!(parse_attribute_list("not attributes"), None);
        assert_eq!(parse_attribute_list("#"), None);
        assert_eq!(parse_attribute_list("key=\"unterminated"), None);
        assert_eq!(parse_attribute_list("1=2"), None);
        assert_eq!(parse_attribute_list("=2"), None);
        assert_eq!(parse_attribute_list("a=b=c"), None);
        assert_eq!(parse_attribute_list(r#"k="v"tail"#), None);
    }

    #[test]
    fn event_and_namespaced_keys_round_trip() {
        let attrs = pairs(&[("@click", "go"), ("v-on:click", "go"), (":href", "url")]);
        let notation = format_attribute_list(&attrs);
        assert_eq!(notation, "{@click=go v-on:click=go :href=url}");

        let parsed = parse_attribute_list(&notation[1..notation.len() - 1]).expect("list");
        assert_eq!(parsed.as_slice(), attrs.as_slice());
    }

    #[test]
    fn awkward_ids_and_classes_fall_back_to_quoted_pairs() {
        let attrs = pairs(&[("id", "a b"), ("class", "x {y}")]);
        assert_eq!(
            encode_attributes(&attrs),
            vec![r#"id="a b""#, r#"class="x {y}""#]
        );

        let parsed = parse_attribute_list(r#"id="a b" class="x {y}""#).expect("list");
        assert_eq!(parsed.get("id"), Some("a b"));
        assert_eq!(parsed.get("class"), Some("x {y}"));
    }

    #[test]
    fn unwritable_keys_are_skipped() {
        let attrs = pairs(&[("a b", "1"), ("x=y", "2"), ("9lives", "3"), ("ok", "4")]);
        assert_eq!(encode_attributes(&attrs), vec!["ok=4"]);
    }

    #[test]
    fn backslashes_in_values_are_escaped() {
        let attrs = pairs(&[("path", r"C:\dir")]);
        let notation = format_attribute_list(&attrs);
        assert_eq!(notation, r#"{path="C:\\dir"}"#);
        let parsed = parse_attribute_list(&notation[1..notation.len() - 1]).expect("list");
        assert_eq!(parsed.get("path"), Some(r"C:\dir"));
    }

    #[test]
    fn splits_trailing_list_from_heading_text() {
        let (text, attrs) =
            split_trailing_attribute_list("this is a test content {#header .header}  ")
                .expect("trailing list");
        assert_eq!(text, "this is a test content");
        assert_eq!(attrs.get("id"), Some("header"));
        assert_eq!(attrs.get("class"), Some("header"));
    }

    #[test]
    fn leaves_plain_braces_alone() {
        assert_eq!(split_trailing_attribute_list("set {a, b}"), None);
        assert_eq!(split_trailing_attribute_list("no braces"), None);
    }

    #[test]
    fn escaped_braces_never_delimit_a_list() {
        assert_eq!(split_trailing_attribute_list(r"Set \{#x\}"), None);
        assert_eq!(split_trailing_attribute_list(r"Set \{#x}"), None);
        assert_eq!(split_trailing_attribute_list(r"Title {\#x}"), None);
    }

    #[test]
    fn quoted_braces_stay_inside_the_list() {
        let (text, attrs) =
            split_trailing_attribute_list(r#"Title {title="a {b}"}"#).expect("trailing list");
        assert_eq!(text, "Title");
        assert_eq!(attrs.get("title"), Some("a {b}"));
    }

    #[test]
    fn attributes_set_replaces_in_place() {
        let mut attrs = Attributes::from_pairs([("a", "1"), ("b", "2")]);
        attrs.set("a", "3");
        assert_eq!(attrs.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
        assert_eq!(attrs.remove("a").as_deref(), Some("3"));
        assert_eq!(attrs.len(), 1);
    }

    fn attribute_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
        let pair = prop_oneof![
            ("[a-z0-9 {}=\"]{1,8}").prop_map(|v| ("id".to_string(), v)),
            ("[a-z0-9 {}]{0,12}").prop_map(|v| ("class".to_string(), v)),
            ("[a-z0-9 ]{0,12}").prop_map(|v| (CONTAINER_MARKER.to_string(), v)),
            ("data-[a-z0-9]{1,6}", "[a-z0-9 ]{0,12}"),
            ("[@:a-z][a-z0-9:.@-]{0,6}", "[a-z0-9 '\"\\\\{}=]{0,12}"),
        ];
        prop::collection::vec(pair, 0..8)
    }

    proptest! {
        #[test]
        fn encoding_is_idempotent(attrs in attribute_strategy()) {
            prop_assert_eq!(encode_attributes(&attrs), encode_attributes(&attrs));
        }

        #[test]
        fn marker_never_leaks(attrs in attribute_strategy()) {
            let notation = format_attribute_list(&attrs);
            prop_assert!(!notation.contains(CONTAINER_MARKER));
        }

        #[test]
        fn encoded_list_parses_back(attrs in attribute_strategy()) {
            let notation = format_attribute_list(&attrs);
            if let Some(inner) = notation.strip_prefix('{').and_then(|n| n.strip_suffix('}')) {
                let parsed = parse_attribute_list(inner);
                prop_assert!(parsed.is_some());
                let reencoded = format_attribute_list(parsed.unwrap().as_slice());
                prop_assert_eq!(reencoded, notation);
            }
        }
    }
}
