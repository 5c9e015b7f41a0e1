//! Raw message split into headers and body.

use std::collections::HashMap;

/// Collection of email headers. Names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: HashMap<String, Vec<String>>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_lowercase();
        self.headers.entry(name).or_default().push(value.into());
    }

    /// Gets the first value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|v| v.first().map(String::as_str))
    }

    /// Gets all values for a header.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get(&name.to_lowercase())
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Parses a header block. Folded lines are unfolded with one space.
    ///
    /// Lines that are neither a continuation nor a `Name: value` pair (an
    /// mbox `>From ` line, for instance) are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut headers = Self::new();
        let mut current: Option<(String, String)> = None;

        for line in text.lines() {
            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some((_, value)) = current.as_mut() {
                    value.push(' ');
                    value.push_str(line.trim());
                }
                continue;
            }

            if let Some((name, value)) = current.take() {
                headers.add(name, value.trim());
            }

            if let Some((name, value)) = line.split_once(':') {
                current = Some((name.trim().to_string(), value.trim().to_string()));
            }
        }

        if let Some((name, value)) = current {
            headers.add(name, value.trim());
        }

        headers
    }
}

/// A fetched RFC822 message: original bytes, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    raw: Vec<u8>,
    headers: Headers,
    body_offset: usize,
}

impl ParsedMessage {
    /// Splits raw message bytes at the first empty line.
    ///
    /// A message without an empty line is all headers.
    #[must_use]
    pub fn parse(raw: Vec<u8>) -> Self {
        let (header_end, body_offset) = find_body(&raw);
        let headers = Headers::parse(&String::from_utf8_lossy(&raw[..header_end]));
        Self {
            raw,
            headers,
            body_offset,
        }
    }

    /// Returns the message exactly as fetched.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the parsed headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body bytes (everything after the blank line).
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.raw[self.body_offset..]
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(self.body()).into_owned()
    }
}

/// Returns (end of header block, start of body).
fn find_body(raw: &[u8]) -> (usize, usize) {
    if let Some(pos) = find(raw, b"\r\n\r\n") {
        return (pos, pos + 4);
    }
    if let Some(pos) = find(raw, b"\n\n") {
        return (pos, pos + 2);
    }
    (raw.len(), raw.len())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod headers_tests {
        use super::*;

        #[test]
        fn case_insensitive() {
            let headers = Headers::parse("Subject: Hello\r\nX-Mailer: test");
            assert_eq!(headers.get("subject"), Some("Hello"));
            assert_eq!(headers.get("SUBJECT"), Some("Hello"));
            assert_eq!(headers.get("x-mailer"), Some("test"));
            assert_eq!(headers.len(), 2);
        }

        #[test]
        fn folded_lines() {
            let headers = Headers::parse("Subject: a very\r\n  long subject");
            assert_eq!(headers.get("Subject"), Some("a very long subject"));
        }

        #[test]
        fn repeated_headers() {
            let headers = Headers::parse("Received: from a\nReceived: from b\nSubject: x");
            assert_eq!(headers.get_all("received"), vec!["from a", "from b"]);
            assert_eq!(headers.get("received"), Some("from a"));
        }

        #[test]
        fn stray_lines_are_skipped() {
            let headers = Headers::parse("Subject: ok\n>From the archive\nTo: b@example.com");
            assert_eq!(headers.get("subject"), Some("ok"));
            assert_eq!(headers.get("to"), Some("b@example.com"));
            assert_eq!(headers.len(), 2);
        }

        #[test]
        fn stray_line_ends_a_folded_value() {
            let headers = Headers::parse("Subject: one\n two\nnot a header\n three");
            assert_eq!(headers.get("subject"), Some("one two"));
        }
    }

    mod parsed_message_tests {
        use super::*;

        #[test]
        fn crlf_split() {
            let raw = b"Subject: Hi\r\nFrom: a@example.com\r\n\r\nBody line\r\n".to_vec();
            let message = ParsedMessage::parse(raw.clone());
            assert_eq!(message.headers().get("from"), Some("a@example.com"));
            assert_eq!(message.body(), b"Body line\r\n");
            assert_eq!(message.raw(), raw.as_slice());
        }

        #[test]
        fn lf_split() {
            let message = ParsedMessage::parse(b"Subject: Hi\n\nhello".to_vec());
            assert_eq!(message.body_text(), "hello");
        }

        #[test]
        fn headers_only() {
            let message = ParsedMessage::parse(b"Subject: Hi".to_vec());
            assert_eq!(message.headers().get("subject"), Some("Hi"));
            assert!(message.body().is_empty());
        }

        #[test]
        fn blank_body_line_stays_in_body() {
            let message = ParsedMessage::parse(b"Subject: Hi\r\n\r\nfirst\r\n\r\nsecond".to_vec());
            assert_eq!(message.body_text(), "first\r\n\r\nsecond");
        }
    }
}
