//! Total markup tokenizer
//!
//! Scans HTML-ish text into tags, comments, declarations, and text runs.
//! The scanner never fails: anything that does not form a plausible tag is
//! emitted as text, and an unterminated construct at end of input is
//! emitted with whatever was scanned. `<script>` and `<style>` bodies are
//! consumed as raw text up to their matching close tag, so scripts
//! containing `<`, `&&`, or template literals pass through untouched.

use crate::node::{is_rawtext, Attribute};

/// One scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Raw text between `<!` and `>` (doctype and friends).
    Doctype(String),
    /// Comment body between `<!--` and `-->`.
    Comment(String),
    /// An opening tag.
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    /// A closing tag.
    EndTag { name: String },
    /// A raw text run.
    Text(String),
}

pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    /// Tag name whose raw text body is being consumed.
    rawtext: Option<String>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            rawtext: None,
        }
    }

    pub(crate) fn next_token(&mut self) -> Option<Token> {
        if let Some(tag) = self.rawtext.take() {
            if let Some(tok) = self.scan_rawtext(&tag) {
                return Some(tok);
            }
            // empty raw body: fall through, positioned at the close tag
        }
        if self.pos >= self.input.len() {
            return None;
        }

        let bytes = self.input.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() {
            if bytes[self.pos] == b'<' && self.tag_opens_at(self.pos) {
                break;
            }
            self.pos += 1;
        }
        if self.pos > start {
            return Some(Token::Text(self.input[start..self.pos].to_string()));
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let tok = self.scan_markup();
        if let Token::StartTag {
            name,
            self_closing: false,
            ..
        } = &tok
        {
            if is_rawtext(name) {
                self.rawtext = Some(name.clone());
            }
        }
        Some(tok)
    }

    /// True when the `<` at `at` begins markup rather than literal text.
    /// `<` followed by a letter, `</` followed by a letter, or `<!`.
    fn tag_opens_at(&self, at: usize) -> bool {
        let bytes = self.input.as_bytes();
        match bytes.get(at + 1) {
            Some(b'!') => true,
            Some(b'/') => bytes
                .get(at + 2)
                .is_some_and(|b| b.is_ascii_alphabetic()),
            Some(b) => b.is_ascii_alphabetic(),
            None => false,
        }
    }

    fn scan_markup(&mut self) -> Token {
        let bytes = self.input.as_bytes();
        if self.input[self.pos..].starts_with("<!--") {
            return self.scan_comment();
        }
        match bytes[self.pos + 1] {
            b'!' => self.scan_declaration(),
            b'/' => self.scan_end_tag(),
            _ => self.scan_start_tag(),
        }
    }

    fn scan_comment(&mut self) -> Token {
        self.pos += 4;
        match self.input[self.pos..].find("-->") {
            Some(rel) => {
                let body = self.input[self.pos..self.pos + rel].to_string();
                self.pos += rel + 3;
                Token::Comment(body)
            }
            None => {
                let body = self.input[self.pos..].to_string();
                self.pos = self.input.len();
                Token::Comment(body)
            }
        }
    }

    fn scan_declaration(&mut self) -> Token {
        self.pos += 2;
        match self.input[self.pos..].find('>') {
            Some(rel) => {
                let raw = self.input[self.pos..self.pos + rel].to_string();
                self.pos += rel + 1;
                Token::Doctype(raw)
            }
            None => {
                let raw = self.input[self.pos..].to_string();
                self.pos = self.input.len();
                Token::Doctype(raw)
            }
        }
    }

    fn scan_end_tag(&mut self) -> Token {
        self.pos += 2;
        let name = self.scan_name();
        match self.input[self.pos..].find('>') {
            Some(rel) => self.pos += rel + 1,
            None => self.pos = self.input.len(),
        }
        Token::EndTag { name }
    }

    fn scan_start_tag(&mut self) -> Token {
        self.pos += 1;
        let name = self.scan_name();
        let mut attributes = Vec::new();
        let mut self_closing = false;

        let bytes = self.input.as_bytes();
        loop {
            self.skip_whitespace();
            if self.pos >= bytes.len() {
                break;
            }
            match bytes[self.pos] {
                b'>' => {
                    self.pos += 1;
                    break;
                }
                b'/' => {
                    if bytes.get(self.pos + 1) == Some(&b'>') {
                        self_closing = true;
                        self.pos += 2;
                        break;
                    }
                    // stray slash inside the tag
                    self.pos += 1;
                }
                _ => {
                    if let Some(attr) = self.scan_attribute() {
                        attributes.push(attr);
                    }
                }
            }
        }

        Token::StartTag {
            name,
            attributes,
            self_closing,
        }
    }

    /// Scan one attribute. Returns `None` for a nameless `=value` scrap,
    /// which is dropped.
    fn scan_attribute(&mut self) -> Option<Attribute> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && !is_attr_name_end(bytes[self.pos]) {
            self.pos += 1;
        }
        let name = self.input[start..self.pos].to_ascii_lowercase();

        self.skip_whitespace();
        if self.input.as_bytes().get(self.pos) != Some(&b'=') {
            return if name.is_empty() {
                None
            } else {
                Some(Attribute::bare(name))
            };
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = self.scan_attribute_value();
        if name.is_empty() {
            return None;
        }
        Some(Attribute::new(name, value))
    }

    fn scan_attribute_value(&mut self) -> String {
        let bytes = self.input.as_bytes();
        match bytes.get(self.pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.pos < bytes.len() && bytes[self.pos] != quote {
                    self.pos += 1;
                }
                let value = self.input[start..self.pos].to_string();
                if self.pos < bytes.len() {
                    self.pos += 1; // closing quote
                }
                value
            }
            _ => {
                // unquoted: runs to whitespace or '>' ('/' is a value byte)
                let start = self.pos;
                while self.pos < bytes.len()
                    && !bytes[self.pos].is_ascii_whitespace()
                    && bytes[self.pos] != b'>'
                {
                    self.pos += 1;
                }
                self.input[start..self.pos].to_string()
            }
        }
    }

    fn scan_name(&mut self) -> String {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && is_name_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        self.input[start..self.pos].to_ascii_lowercase()
    }

    /// Consume raw text up to `</tag` (case-insensitive, followed by `>`,
    /// `/`, whitespace, or end of input). Leaves `pos` at the close tag and
    /// returns the body, or `None` when the body is empty.
    fn scan_rawtext(&mut self, tag: &str) -> Option<Token> {
        let bytes = self.input.as_bytes();
        let needle: Vec<u8> = format!("</{tag}").into_bytes();
        let mut i = self.pos;
        while i + needle.len() <= bytes.len() {
            if bytes[i] == b'<' && bytes[i..i + needle.len()].eq_ignore_ascii_case(&needle) {
                let after = bytes.get(i + needle.len());
                let closes = match after {
                    None => true,
                    Some(b) => *b == b'>' || *b == b'/' || b.is_ascii_whitespace(),
                };
                if closes {
                    let text = &self.input[self.pos..i];
                    self.pos = i;
                    if text.is_empty() {
                        return None;
                    }
                    return Some(Token::Text(text.to_string()));
                }
            }
            i += 1;
        }
        // no close tag: the rest of the input is the body
        let text = &self.input[self.pos..];
        self.pos = self.input.len();
        if text.is_empty() {
            None
        } else {
            Some(Token::Text(text.to_string()))
        }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[inline]
fn is_attr_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'=' || b == b'>' || b == b'/'
}
