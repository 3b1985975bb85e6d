//! Parser for the icon map literal embedded in FontAwesome bundles.
//!
//! The literal is JSON, except that object keys may be bare identifiers
//! (`adjust: [...]`) and the whole thing is terminated by `;`.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::error::{Error, LiteralErrorKind, Result};

/// Icon definitions keyed by icon name, in source order.
pub type IconMap = IndexMap<String, Value>;

/// Parses a `{...};` literal into its top-level entries.
///
/// Error offsets are relative to the start of `literal`.
pub fn parse_literal(literal: &str) -> Result<IconMap> {
    Parser::new(literal).literal()
}

/// Maximum nesting of objects and arrays, the top-level object included.
const MAX_DEPTH: usize = 128;

fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-')
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn error_at(&self, offset: usize, kind: LiteralErrorKind) -> Error {
        Error::MalformedLiteral { offset, kind }
    }

    fn error(&self, kind: LiteralErrorKind) -> Error {
        self.error_at(self.pos, kind)
    }

    fn unexpected(&self) -> Error {
        match self.peek() {
            Some(c) => self.error(LiteralErrorKind::UnexpectedChar(c)),
            None => self.error(LiteralErrorKind::UnexpectedEof),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, ch: char, expected: &'static str) -> Result<()> {
        match self.peek() {
            Some(c) if c == ch => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(self.error(LiteralErrorKind::Expected { expected, found })),
            None => Err(self.error(LiteralErrorKind::UnexpectedEof)),
        }
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(LiteralErrorKind::RecursionLimit));
        }
        self.depth += 1;
        let parsed = parse(self);
        self.depth -= 1;
        parsed
    }

    fn literal(mut self) -> Result<IconMap> {
        let mut icons = IconMap::new();
        self.skip_ws();
        self.nested(|parser| {
            parser.object(|name, definition| {
                icons.insert(name, definition);
            })
        })?;
        self.skip_ws();
        self.expect(';', "';'")?;
        self.skip_ws();
        if self.peek().is_some() {
            return Err(self.error(LiteralErrorKind::TrailingContent));
        }
        Ok(icons)
    }

    fn object(&mut self, mut insert: impl FnMut(String, Value)) -> Result<()> {
        self.expect('{', "'{'")?;
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(());
        }
        loop {
            self.skip_ws();
            let key = self.key()?;
            self.skip_ws();
            self.expect(':', "':'")?;
            self.skip_ws();
            let value = self.value()?;
            insert(key, value);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(found) => {
                    return Err(self.error(LiteralErrorKind::Expected {
                        expected: "',' or '}'",
                        found,
                    }));
                }
                None => return Err(self.error(LiteralErrorKind::UnexpectedEof)),
            }
        }
    }

    fn key(&mut self) -> Result<String> {
        match self.peek() {
            Some('"') => self.string(),
            Some(c) if is_bare_key_char(c) => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if is_bare_key_char(c)) {
                    self.pos += 1;
                }
                Ok(self.src[start..self.pos].to_owned())
            }
            _ => Err(self.unexpected()),
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.peek() {
            Some('{') => {
                let mut map = Map::new();
                self.nested(|parser| {
                    parser.object(|key, value| {
                        map.insert(key, value);
                    })
                })?;
                Ok(Value::Object(map))
            }
            Some('[') => self.nested(Self::array),
            Some('"') => self.string().map(Value::String),
            Some('-' | '0'..='9') => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.keyword(),
            _ => Err(self.unexpected()),
        }
    }

    fn array(&mut self) -> Result<Value> {
        self.expect('[', "'['")?;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some(']') {
            self.pos += 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_ws();
            items.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                Some(found) => {
                    return Err(self.error(LiteralErrorKind::Expected {
                        expected: "',' or ']'",
                        found,
                    }));
                }
                None => return Err(self.error(LiteralErrorKind::UnexpectedEof)),
            }
        }
    }

    fn keyword(&mut self) -> Result<Value> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        match &self.src[start..self.pos] {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            _ => {
                self.pos = start;
                Err(self.unexpected())
            }
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        let mut valid = match self.peek() {
            Some('0') => {
                self.pos += 1;
                true
            }
            _ => self.digits() > 0,
        };
        if valid && self.peek() == Some('.') {
            self.pos += 1;
            valid = self.digits() > 0;
        }
        if valid && matches!(self.peek(), Some('e' | 'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            valid = self.digits() > 0;
        }

        let lexeme = &self.src[start..self.pos];
        let invalid = || self.error_at(start, LiteralErrorKind::InvalidNumber(lexeme.to_owned()));
        if !valid {
            return Err(invalid());
        }
        serde_json::from_str::<Number>(lexeme)
            .map(Value::Number)
            .map_err(|_| invalid())
    }

    fn string(&mut self) -> Result<String> {
        self.expect('"', "'\"'")?;
        let mut out = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some('\\') => {
                    self.pos += 1;
                    out.push(self.escape()?);
                }
                Some(c) if c < ' ' => return Err(self.error(LiteralErrorKind::ControlChar)),
                Some(c) => {
                    out.push(c);
                    self.pos += c.len_utf8();
                }
                None => return Err(self.error(LiteralErrorKind::UnexpectedEof)),
            }
        }
    }

    fn escape(&mut self) -> Result<char> {
        let Some(c) = self.peek() else {
            return Err(self.error(LiteralErrorKind::UnexpectedEof));
        };
        self.pos += c.len_utf8();
        Ok(match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.unicode_escape(),
            _ => return Err(self.error(LiteralErrorKind::InvalidEscape)),
        })
    }

    fn unicode_escape(&mut self) -> Result<char> {
        let high = self.hex4()?;
        let code = if (0xD800..0xDC00).contains(&high) {
            if !self.src[self.pos..].starts_with("\\u") {
                return Err(self.error(LiteralErrorKind::InvalidEscape));
            }
            self.pos += 2;
            let low = self.hex4()?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(self.error(LiteralErrorKind::InvalidEscape));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code).ok_or_else(|| self.error(LiteralErrorKind::InvalidEscape))
    }

    fn hex4(&mut self) -> Result<u32> {
        let Some(digits) = self.src.get(self.pos..self.pos + 4) else {
            return Err(self.error(LiteralErrorKind::InvalidEscape));
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.error(LiteralErrorKind::InvalidEscape));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| self.error(LiteralErrorKind::InvalidEscape))?;
        self.pos += 4;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn kind(literal: &str) -> LiteralErrorKind {
        match parse_literal(literal) {
            Err(Error::MalformedLiteral { kind, .. }) => kind,
            other => panic!("expected a literal error, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_and_quoted_keys() {
        let icons = parse_literal(r#"{ "address-book": [], "address-card": [], adjust: []};"#)
            .unwrap();
        assert_eq!(
            icons.keys().collect::<Vec<_>>(),
            ["address-book", "address-card", "adjust"]
        );
        assert_eq!(icons["adjust"], json!([]));
    }

    #[test]
    fn test_fontawesome_definition() {
        let literal = r#"{"500px":[448,512,[],"f26e","M103.3 344.3c-6.5-14.2"],ad:[512,512,[],"f641","M168.82 224h54.36L196"]};"#;
        let icons = parse_literal(literal).unwrap();
        assert_eq!(icons.len(), 2);
        assert_eq!(
            icons["ad"],
            json!([512, 512, [], "f641", "M168.82 224h54.36L196"])
        );
    }

    #[test]
    fn test_nested_values() {
        let literal = r#"{ star: { size: [1.5, -2e3, 0], ligatures: ["a", "b"], solid: true, extra: null } };"#;
        let icons = parse_literal(literal).unwrap();
        assert_eq!(
            icons["star"].to_string(),
            r#"{"size":[1.5,-2e3,0],"ligatures":["a","b"],"solid":true,"extra":null}"#
        );
    }

    #[test]
    fn test_numbers_keep_their_spelling() {
        let icons =
            parse_literal("{a: [123456789012345678901234, -98765432109876543210, 1.0]};")
                .unwrap();
        assert_eq!(
            icons["a"].to_string(),
            "[123456789012345678901234,-98765432109876543210,1.0]"
        );
    }

    #[test]
    fn test_nested_key_order_is_kept() {
        let icons = parse_literal(r#"{a: {z: 1, y: 2, x: 3}};"#).unwrap();
        let keys: Vec<_> = icons["a"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["z", "y", "x"]);
    }

    #[test]
    fn test_string_escapes() {
        let icons = parse_literal(r#"{a: "\"\\\/\n\té😀"};"#).unwrap();
        assert_eq!(icons["a"], json!("\"\\/\n\té😀"));
    }

    #[test]
    fn test_duplicate_key_keeps_last_value_first_position() {
        let icons = parse_literal(r#"{a: 1, b: 2, a: 3};"#).unwrap();
        assert_eq!(icons.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(icons["a"], json!(3));
    }

    #[test]
    fn test_empty_literal() {
        assert!(parse_literal("{};").unwrap().is_empty());
    }

    #[test]
    fn test_missing_semicolon() {
        assert_eq!(kind("{a: 1}"), LiteralErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_trailing_comma_is_rejected() {
        assert_eq!(kind("{a: 1,};"), LiteralErrorKind::UnexpectedChar('}'));
        assert_eq!(kind("{a: [1,]};"), LiteralErrorKind::UnexpectedChar(']'));
    }

    #[test]
    fn test_unknown_keyword() {
        assert_eq!(kind("{a: undefined};"), LiteralErrorKind::UnexpectedChar('u'));
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(kind("{a: 01};"), LiteralErrorKind::Expected {
            expected: "',' or '}'",
            found: '1'
        });
        assert_eq!(kind("{a: 1.};"), LiteralErrorKind::InvalidNumber("1.".into()));
        assert_eq!(kind("{a: -};"), LiteralErrorKind::InvalidNumber("-".into()));
    }

    #[test]
    fn test_bad_escapes() {
        assert_eq!(kind(r#"{a: "\x"};"#), LiteralErrorKind::InvalidEscape);
        assert_eq!(kind(r#"{a: "\u12"};"#), LiteralErrorKind::InvalidEscape);
        assert_eq!(kind(r#"{a: "\ud83d"};"#), LiteralErrorKind::InvalidEscape);
    }

    #[test]
    fn test_nesting_up_to_the_limit() {
        let depth = MAX_DEPTH - 1;
        let literal = format!("{{a: {}{}}};", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(parse_literal(&literal).unwrap().len(), 1);
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        for depth in [MAX_DEPTH, 200_000] {
            let literal = format!("{{a: {}{}}};", "[".repeat(depth), "]".repeat(depth));
            match parse_literal(&literal) {
                Err(Error::MalformedLiteral { offset, kind }) => {
                    assert_eq!(kind, LiteralErrorKind::RecursionLimit);
                    assert_eq!(offset, 4 + MAX_DEPTH - 1);
                }
                other => panic!("expected a literal error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_nested_objects_count_towards_the_limit() {
        let depth = MAX_DEPTH;
        let literal = format!("{{{}1{}}};", "a: {".repeat(depth - 1) + "a: ", "}".repeat(depth - 1));
        assert_eq!(parse_literal(&literal).unwrap().len(), 1);
        let literal = format!("{{{}1{}}};", "a: {".repeat(depth) + "a: ", "}".repeat(depth));
        assert_eq!(kind(&literal), LiteralErrorKind::RecursionLimit);
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(kind("{a: 1}; x"), LiteralErrorKind::TrailingContent);
    }

    #[test]
    fn test_error_offset_points_at_problem() {
        match parse_literal("{a: 1 b: 2};") {
            Err(Error::MalformedLiteral { offset, .. }) => assert_eq!(offset, 6),
            other => panic!("expected a literal error, got {other:?}"),
        }
    }
}
