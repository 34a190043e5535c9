//! Ordered OpenVPN configuration documents.
//!
//! A [`Document`] accumulates typed directives (flags, quoted values,
//! embedded blocks) in insertion order and renders them deterministically.
//! Unique directives are tracked in a companion name set; the entry vector
//! and the set are mutated together under one lock per call.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::error::{Error, Result};

/// One typed directive payload.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    /// Bare directive with no value, e.g. `persist-tun`.
    Flag,
    /// Directive with one or more quoted values, e.g. `verb "5"`.
    Value(Vec<String>),
    /// Directive wrapping an opaque byte block in `<name>`..`</name>` tags.
    Block(Vec<u8>),
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    directive: Directive,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<Entry>,
    names: HashSet<String>,
}

/// An ordered OpenVPN configuration document.
///
/// Mutation methods take `&self`; every call is one critical section, so a
/// shared document can be populated from multiple threads. Rendering takes
/// a consistent snapshot under the same lock.
#[derive(Debug, Default)]
pub struct Document {
    inner: Mutex<Inner>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push_entry(&self, entry: Entry, unique: bool) -> Result<()> {
        let mut inner = self.inner.lock();

        if unique && inner.names.contains(&entry.name) {
            return Err(Error::DuplicateKey(entry.name));
        }

        inner.names.insert(entry.name.clone());
        inner.entries.push(entry);

        Ok(())
    }

    /// Inserts a flag directive.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateKey` if `name` is already present.
    pub fn enable(&self, name: &str) -> Result<()> {
        self.push_entry(
            Entry {
                name: name.into(),
                directive: Directive::Flag,
            },
            true,
        )
    }

    /// Appends a value directive without enforcing uniqueness.
    ///
    /// Intended for repeatable directives such as `push` or `remote`;
    /// duplicates render in call order.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyValue` if `values` is empty.
    pub fn add<V: ToString>(&self, name: &str, values: &[V]) -> Result<()> {
        if values.is_empty() {
            return Err(Error::EmptyValue(name.into()));
        }

        let values = values.iter().map(ToString::to_string).collect();
        self.push_entry(
            Entry {
                name: name.into(),
                directive: Directive::Value(values),
            },
            false,
        )
    }

    /// Replaces the directive named `name`, inserting it at the end.
    ///
    /// Any existing entry is removed first (a missing entry is not an
    /// error); the net effect is exactly one entry per name, last write
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyValue` if `values` is empty.
    pub fn set<V: ToString>(&self, name: &str, values: &[V]) -> Result<()> {
        let _ = self.remove(name);
        self.add(name, values)
    }

    /// Inserts an embedded block directive, trimming surrounding
    /// whitespace from `value`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyValue` if nothing remains after trimming and
    /// `Error::DuplicateKey` if `name` is already present.
    pub fn embed(&self, name: &str, value: &[u8]) -> Result<()> {
        let trimmed = trim_bytes(value);

        if trimmed.is_empty() {
            return Err(Error::EmptyValue(name.into()));
        }

        self.push_entry(
            Entry {
                name: name.into(),
                directive: Directive::Block(trimmed.to_vec()),
            },
            true,
        )
    }

    /// Deletes the directive named `name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if no such directive exists.
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut inner = self.inner.lock();

        if !inner.names.contains(name) {
            return Err(Error::KeyNotFound(name.into()));
        }

        if let Some(pos) = inner.entries.iter().position(|e| e.name == name) {
            inner.entries.remove(pos);
        }
        inner.names.remove(name);

        Ok(())
    }

    /// Like [`enable`](Self::enable), but a failure is a caller bug.
    ///
    /// # Panics
    ///
    /// Panics if the underlying operation fails.
    pub fn must_enable(&self, name: &str) {
        must(self.enable(name));
    }

    /// Like [`add`](Self::add), but a failure is a caller bug.
    ///
    /// # Panics
    ///
    /// Panics if the underlying operation fails.
    pub fn must_add<V: ToString>(&self, name: &str, values: &[V]) {
        must(self.add(name, values));
    }

    /// Like [`set`](Self::set), but a failure is a caller bug.
    ///
    /// # Panics
    ///
    /// Panics if the underlying operation fails.
    pub fn must_set<V: ToString>(&self, name: &str, values: &[V]) {
        must(self.set(name, values));
    }

    /// Like [`embed`](Self::embed), but a failure is a caller bug.
    ///
    /// # Panics
    ///
    /// Panics if the underlying operation fails.
    pub fn must_embed(&self, name: &str, value: &[u8]) {
        must(self.embed(name, value));
    }

    /// Renders the document to OpenVPN directive syntax.
    ///
    /// Pure function of the entry sequence: flags render as bare names,
    /// values as the name followed by each value double-quoted, blocks
    /// wrapped in `<name>`..`</name>` tags. Lines are newline-joined and
    /// the output is trimmed of surrounding whitespace.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let inner = self.inner.lock();
        let mut out = Vec::new();

        for entry in &inner.entries {
            match &entry.directive {
                Directive::Flag => {
                    out.extend_from_slice(entry.name.as_bytes());
                }
                Directive::Value(values) => {
                    out.extend_from_slice(entry.name.as_bytes());
                    for value in values {
                        out.push(b' ');
                        out.extend_from_slice(quote(value).as_bytes());
                    }
                }
                Directive::Block(block) => {
                    out.push(b'<');
                    out.extend_from_slice(entry.name.as_bytes());
                    out.extend_from_slice(b">\n");
                    out.extend_from_slice(block);
                    out.extend_from_slice(b"\n</");
                    out.extend_from_slice(entry.name.as_bytes());
                    out.push(b'>');
                }
            }
            out.push(b'\n');
        }

        trim_bytes(&out).to_vec()
    }
}

/// Panic wrapper for the fatal API tier: the condition is a programming
/// error at the call site, not recoverable input.
#[allow(clippy::panic)]
#[track_caller]
fn must(result: Result<()>) {
    if let Err(err) = result {
        panic!("configuration contract violated: {err}");
    }
}

/// Double-quotes a value, escaping quotes and backslashes.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Strips leading and trailing ASCII whitespace.
fn trim_bytes(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn rendered(doc: &Document) -> String {
        String::from_utf8(doc.render()).expect("rendered output is UTF-8")
    }

    #[test]
    fn set_overwrites_previous_value() {
        let doc = Document::new();

        assert!(matches!(
            doc.set::<&str>("verb", &[]),
            Err(Error::EmptyValue(_))
        ));
        assert!(matches!(doc.remove("verb"), Err(Error::KeyNotFound(_))));

        doc.set("verb", &[6]).unwrap();
        doc.set("verb", &[5]).unwrap();

        doc.remove("verb").unwrap();
        assert!(matches!(doc.remove("verb"), Err(Error::KeyNotFound(_))));

        doc.set("verb", &[7]).unwrap();
        doc.set("verb", &[5]).unwrap();

        assert_eq!(rendered(&doc), r#"verb "5""#);
    }

    #[test]
    fn add_keeps_duplicates_in_call_order() {
        let doc = Document::new();

        doc.add("remote", &["server1.mydomain"]).unwrap();
        doc.add("remote", &["server2.mydomain"]).unwrap();
        doc.add("remote", &["server3.mydomain"]).unwrap();

        assert_eq!(
            rendered(&doc),
            "remote \"server1.mydomain\"\nremote \"server2.mydomain\"\nremote \"server3.mydomain\""
        );
    }

    #[test]
    fn embedded_block_renders_between_tags() {
        let doc = Document::new();

        let value = b"-----BEGIN OpenVPN Static key V1-----\n\
            e5e4d6af39289d53\n\
            171ecc237a8f996a\n\
            -----END OpenVPN Static key V1-----";

        doc.embed("key", value).unwrap();
        doc.add("remote", &["server2.mydomain"]).unwrap();

        let expected = format!(
            "<key>\n{}\n</key>\nremote \"server2.mydomain\"",
            String::from_utf8_lossy(value)
        );
        assert_eq!(rendered(&doc), expected);
    }

    #[test]
    fn embed_trims_boundary_whitespace_only() {
        let doc = Document::new();
        doc.embed("key", b" <payload> \n").unwrap();
        assert_eq!(rendered(&doc), "<key>\n<payload>\n</key>");
    }

    #[test]
    fn embed_rejects_empty_and_whitespace_values() {
        let doc = Document::new();
        assert!(matches!(doc.embed("k", b""), Err(Error::EmptyValue(_))));
        assert!(matches!(
            doc.embed("k", b" \n\t "),
            Err(Error::EmptyValue(_))
        ));
    }

    #[test]
    fn embed_enforces_uniqueness() {
        let doc = Document::new();
        doc.embed("ca", b"cert material").unwrap();
        assert!(matches!(
            doc.embed("ca", b"other material"),
            Err(Error::DuplicateKey(_))
        ));
    }

    #[test]
    fn enable_twice_fails_until_removed() {
        let doc = Document::new();

        doc.enable("client-to-client").unwrap();
        assert!(matches!(
            doc.enable("client-to-client"),
            Err(Error::DuplicateKey(_))
        ));

        doc.remove("client-to-client").unwrap();
        doc.enable("client-to-client").unwrap();
    }

    #[test]
    fn flags_and_values_render_without_trailing_whitespace() {
        let doc = Document::new();
        doc.enable("client-to-client").unwrap();
        doc.add("verb", &["5"]).unwrap();

        assert_eq!(rendered(&doc), "client-to-client\nverb \"5\"");
    }

    #[test]
    fn render_of_empty_document_is_empty() {
        let doc = Document::new();
        assert!(doc.render().is_empty());
    }

    #[test]
    fn must_set_panics_on_empty_values() {
        let doc = Document::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            doc.must_set::<&str>("verb", &[]);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn must_enable_panics_on_duplicate() {
        let doc = Document::new();
        doc.must_enable("nobind");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            doc.must_enable("nobind");
        }));
        assert!(result.is_err());
    }

    #[test]
    fn concurrent_adds_are_all_recorded() {
        let doc = Document::new();

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let doc = &doc;
                scope.spawn(move || {
                    for i in 0..50 {
                        doc.add("push", &[format!("route 10.{worker}.{i}.0")])
                            .unwrap();
                    }
                });
            }
        });

        let output = rendered(&doc);
        assert_eq!(output.lines().count(), 8 * 50);
        assert!(output.lines().all(|line| line.starts_with("push ")));
    }

    #[test]
    fn concurrent_enable_admits_exactly_one() {
        let doc = Document::new();

        let successes: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let doc = &doc;
                    scope.spawn(move || usize::from(doc.enable("fast-io").is_ok()))
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("no panic")).sum()
        });

        assert_eq!(successes, 1);
        assert_eq!(rendered(&doc), "fast-io");
    }

    #[test_case(&["5"], r#"verb "5""#; "single value")]
    #[test_case(&["10", "120"], r#"verb "10" "120""#; "two values")]
    #[test_case(&["say \"hi\""], r#"verb "say \"hi\"""#; "embedded quotes")]
    #[test_case(&["back\\slash"], r#"verb "back\\slash""#; "backslash")]
    fn value_quoting(values: &[&str], expected: &str) {
        let doc = Document::new();
        doc.add("verb", values).unwrap();
        assert_eq!(rendered(&doc), expected);
    }

    proptest! {
        #[test]
        fn render_emits_one_line_per_entry(
            entries in prop::collection::vec(
                (
                    "[a-z][a-z0-9-]{0,11}",
                    prop::collection::vec("[A-Za-z0-9./:_-]{1,12}", 1..4),
                ),
                1..24,
            )
        ) {
            let doc = Document::new();
            for (name, values) in &entries {
                doc.add(name, values).unwrap();
            }

            let output = String::from_utf8(doc.render()).unwrap();
            prop_assert_eq!(output.lines().count(), entries.len());
        }
    }
}
