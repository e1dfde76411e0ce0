//! Selector string parser.

use super::ast::{CompareOp, FilterExpr, JsonPath, Literal, Operand, PathSegment};
use super::error::JsonPathError;

/// Parser for selector strings.
pub struct Parser {
    chars: Vec<char>,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given selector string.
    pub fn new(query: &str) -> Self {
        Self {
            chars: query.chars().collect(),
            position: 0,
        }
    }

    /// Parses the selector string into a JsonPath.
    pub fn parse(query: &str) -> Result<JsonPath, JsonPathError> {
        let mut parser = Parser::new(query);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<JsonPath, JsonPathError> {
        let mut segments = vec![PathSegment::Root];

        self.skip_whitespace();

        // `$` is optional: `a.b` reads the same as `$.a.b`
        if self.peek() == Some('$') {
            self.next();
        } else {
            match self.peek() {
                None | Some('.') | Some('[') => {}
                Some('*') => {
                    self.next();
                    segments.push(PathSegment::Wildcard);
                }
                Some(_) => {
                    let name = self.parse_identifier()?;
                    segments.push(PathSegment::Child(name));
                }
            }
        }

        segments.extend(self.parse_segments()?);

        self.skip_whitespace();
        if let Some(ch) = self.peek() {
            return Err(JsonPathError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: "'.' or '['".to_string(),
            });
        }

        Ok(JsonPath::new(segments))
    }

    /// Parses `.name`, `.*`, `..x` and `[...]` segments until something else
    /// is found.
    fn parse_segments(&mut self) -> Result<Vec<PathSegment>, JsonPathError> {
        let mut segments = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.next();
                    if self.peek() == Some('.') {
                        segments.push(self.parse_recursive_descent()?);
                    } else if self.peek() == Some('*') {
                        self.next();
                        segments.push(PathSegment::Wildcard);
                    } else {
                        let name = self.parse_identifier()?;
                        segments.push(PathSegment::Child(name));
                    }
                }
                Some('[') => {
                    segments.push(self.parse_bracket_expression()?);
                }
                _ => break,
            }
        }
        Ok(segments)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Consumes `token` if the input continues with it.
    fn consume(&mut self, token: &str) -> bool {
        let matches = token
            .chars()
            .enumerate()
            .all(|(offset, ch)| self.peek_at(offset) == Some(ch));
        if matches {
            self.position += token.chars().count();
        }
        matches
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), JsonPathError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(JsonPathError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(JsonPathError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses an identifier (property name).
    fn parse_identifier(&mut self) -> Result<String, JsonPathError> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if !name.is_empty() {
            return Ok(name);
        }
        match self.peek() {
            Some(ch) => Err(JsonPathError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: "identifier".to_string(),
            }),
            None => Err(JsonPathError::UnexpectedEnd {
                expected: "identifier".to_string(),
            }),
        }
    }

    /// Parses recursive descent (..)
    fn parse_recursive_descent(&mut self) -> Result<PathSegment, JsonPathError> {
        self.expect('.')?;
        if self.peek() == Some('[') {
            Ok(PathSegment::DescendantOrSelf)
        } else if self.peek() == Some('*') {
            self.next();
            Ok(PathSegment::RecursiveDescent(None))
        } else {
            let name = self.parse_identifier()?;
            Ok(PathSegment::RecursiveDescent(Some(name)))
        }
    }

    /// Parses bracket expression: [index], [i,j], [start:end:step], ['key'], [*], [?(...)]
    fn parse_bracket_expression(&mut self) -> Result<PathSegment, JsonPathError> {
        self.expect('[')?;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some('*') => {
                self.next();
                self.expect(']')?;
                PathSegment::Wildcard
            }
            Some('\'') | Some('"') => {
                let mut properties = self.parse_bracket_strings()?;
                self.expect(']')?;
                if properties.len() == 1 {
                    PathSegment::Child(properties.remove(0))
                } else {
                    PathSegment::MultiProperty(properties)
                }
            }
            Some('?') => {
                self.next();
                let expr = self.parse_or()?;
                self.expect(']')?;
                PathSegment::Filter(expr)
            }
            Some('-') | Some('0'..='9') | Some(':') => {
                if self.bracket_contains(':') {
                    self.parse_slice()?
                } else {
                    self.parse_indices()?
                }
            }
            Some(ch) => {
                return Err(JsonPathError::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "index, slice, quoted name, '*' or '?'".to_string(),
                })
            }
            None => {
                return Err(JsonPathError::UnexpectedEnd {
                    expected: "bracket expression".to_string(),
                })
            }
        };

        Ok(segment)
    }

    /// Looks ahead (without consuming) for `target` before the closing bracket.
    fn bracket_contains(&self, target: char) -> bool {
        self.chars[self.position..]
            .iter()
            .take_while(|&&ch| ch != ']')
            .any(|&ch| ch == target)
    }

    /// Parses a quoted string, handling backslash escapes.
    fn parse_quoted_string(&mut self) -> Result<String, JsonPathError> {
        let quote = match self.next() {
            Some(ch @ ('\'' | '"')) => ch,
            Some(ch) => {
                return Err(JsonPathError::UnexpectedToken {
                    position: self.position - 1,
                    found: ch.to_string(),
                    expected: "quote".to_string(),
                })
            }
            None => {
                return Err(JsonPathError::UnexpectedEnd {
                    expected: "quote".to_string(),
                })
            }
        };

        let mut value = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => break,
                Some('\\') => match self.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some(_) | None => {
                        return Err(JsonPathError::InvalidSyntax {
                            message: "Invalid escape sequence".to_string(),
                        })
                    }
                },
                Some(ch) => value.push(ch),
                None => {
                    return Err(JsonPathError::UnexpectedEnd {
                        expected: format!("closing quote '{}'", quote),
                    })
                }
            }
        }
        Ok(value)
    }

    /// Parses string(s) inside brackets: ['key'] or ['key1','key2']
    fn parse_bracket_strings(&mut self) -> Result<Vec<String>, JsonPathError> {
        let mut properties = Vec::new();
        loop {
            self.skip_whitespace();
            properties.push(self.parse_quoted_string()?);
            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.next();
            } else {
                break;
            }
        }
        Ok(properties)
    }

    /// Parses `[n]` or `[n,m,...]` after the opening bracket.
    fn parse_indices(&mut self) -> Result<PathSegment, JsonPathError> {
        let mut indices = Vec::new();
        loop {
            self.skip_whitespace();
            indices.push(self.parse_bracket_number()?);
            self.skip_whitespace();
            if self.peek() == Some(',') {
                self.next();
            } else {
                break;
            }
        }
        self.expect(']')?;

        if indices.len() == 1 {
            Ok(PathSegment::Index(indices[0]))
        } else {
            Ok(PathSegment::MultiIndex(indices))
        }
    }

    /// Parses a number inside brackets
    fn parse_bracket_number(&mut self) -> Result<isize, JsonPathError> {
        let num_str = self.parse_number_string()?;
        num_str
            .parse::<isize>()
            .map_err(|_| JsonPathError::InvalidSyntax {
                message: format!("Invalid number: {}", num_str),
            })
    }

    /// Parses an integer as a string
    fn parse_number_string(&mut self) -> Result<String, JsonPathError> {
        let mut num = String::new();
        if self.peek() == Some('-') {
            num.push('-');
            self.next();
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if num.is_empty() || num == "-" {
            Err(JsonPathError::InvalidSyntax {
                message: "Expected number".to_string(),
            })
        } else {
            Ok(num)
        }
    }

    fn parse_optional_bound(&mut self) -> Result<Option<isize>, JsonPathError> {
        self.skip_whitespace();
        match self.peek() {
            Some(':') | Some(']') => Ok(None),
            _ => self.parse_bracket_number().map(Some),
        }
    }

    /// Parses array slice: [start:end], [start:], [:end], [:], [start:end:step]
    fn parse_slice(&mut self) -> Result<PathSegment, JsonPathError> {
        let start = self.parse_optional_bound()?;
        self.expect(':')?;
        let end = self.parse_optional_bound()?;

        self.skip_whitespace();
        let step = if self.peek() == Some(':') {
            self.next();
            self.parse_optional_bound()?
        } else {
            None
        };
        self.expect(']')?;

        if let Some(s) = step {
            if s <= 0 {
                return Err(JsonPathError::InvalidSyntax {
                    message: format!("Invalid slice step: {} (must be positive)", s),
                });
            }
        }

        Ok(PathSegment::Slice { start, end, step })
    }

    // Filter expressions, lowest precedence first: || then && then ! then
    // comparisons and parenthesised groups.

    fn parse_or(&mut self) -> Result<FilterExpr, JsonPathError> {
        let mut left = self.parse_and()?;
        loop {
            self.skip_whitespace();
            if self.consume("||") {
                let right = self.parse_and()?;
                left = FilterExpr::Or(Box::new(left), Box::new(right));
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_and(&mut self) -> Result<FilterExpr, JsonPathError> {
        let mut left = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            if self.consume("&&") {
                let right = self.parse_unary()?;
                left = FilterExpr::And(Box::new(left), Box::new(right));
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<FilterExpr, JsonPathError> {
        self.skip_whitespace();
        if self.peek() == Some('!') && self.peek_at(1) != Some('=') {
            self.next();
            let inner = self.parse_unary()?;
            return Ok(FilterExpr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<FilterExpr, JsonPathError> {
        self.skip_whitespace();
        if self.peek() == Some('(') {
            self.next();
            let expr = self.parse_or()?;
            self.expect(')')?;
            return Ok(expr);
        }

        let start = self.position;
        let left = self.parse_operand()?;
        match self.parse_compare_op() {
            Some(op) => {
                let right = self.parse_operand()?;
                Ok(FilterExpr::Compare { left, op, right })
            }
            None if matches!(left, Operand::Literal(_)) => Err(JsonPathError::InvalidSyntax {
                message: format!("Literal at position {} must be compared to a path", start),
            }),
            None => Ok(FilterExpr::Exists(left)),
        }
    }

    fn parse_compare_op(&mut self) -> Option<CompareOp> {
        self.skip_whitespace();
        let ops = [
            ("==", CompareOp::Eq),
            ("!=", CompareOp::Ne),
            ("<=", CompareOp::Le),
            (">=", CompareOp::Ge),
            ("<", CompareOp::Lt),
            (">", CompareOp::Gt),
        ];
        ops.into_iter()
            .find(|(token, _)| self.consume(token))
            .map(|(_, op)| op)
    }

    fn parse_operand(&mut self) -> Result<Operand, JsonPathError> {
        self.skip_whitespace();
        match self.peek() {
            Some('@') => {
                self.next();
                Ok(Operand::Current(self.parse_segments()?))
            }
            Some('$') => {
                self.next();
                Ok(Operand::Root(self.parse_segments()?))
            }
            Some('\'') | Some('"') => Ok(Operand::Literal(Literal::String(
                self.parse_quoted_string()?,
            ))),
            Some('-') | Some('0'..='9') => Ok(Operand::Literal(Literal::Number(
                self.parse_filter_number()?,
            ))),
            Some(ch) if ch.is_alphabetic() => {
                let pos = self.position;
                let word = self.parse_identifier()?;
                match word.as_str() {
                    "true" => Ok(Operand::Literal(Literal::Bool(true))),
                    "false" => Ok(Operand::Literal(Literal::Bool(false))),
                    "null" => Ok(Operand::Literal(Literal::Null)),
                    _ => Err(JsonPathError::UnexpectedToken {
                        position: pos,
                        found: word,
                        expected: "'@', '$' or a literal".to_string(),
                    }),
                }
            }
            Some(ch) => Err(JsonPathError::UnexpectedToken {
                position: self.position,
                found: ch.to_string(),
                expected: "'@', '$' or a literal".to_string(),
            }),
            None => Err(JsonPathError::UnexpectedEnd {
                expected: "filter operand".to_string(),
            }),
        }
    }

    fn parse_filter_number(&mut self) -> Result<f64, JsonPathError> {
        let mut num = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E') {
                num.push(ch);
                self.next();
            } else {
                break;
            }
        }
        num.parse::<f64>().map_err(|_| JsonPathError::InvalidSyntax {
            message: format!("Invalid number: {}", num),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(name: &str) -> PathSegment {
        PathSegment::Child(name.to_string())
    }

    #[test]
    fn test_parse_root() {
        let path = Parser::parse("$").unwrap();
        assert_eq!(path.segments, vec![PathSegment::Root]);
    }

    #[test]
    fn test_parse_empty_selects_root() {
        let path = Parser::parse("").unwrap();
        assert_eq!(path.segments, vec![PathSegment::Root]);
    }

    #[test]
    fn test_parse_child() {
        let path = Parser::parse("$.store").unwrap();
        assert_eq!(path.segments, vec![PathSegment::Root, child("store")]);
    }

    #[test]
    fn test_parse_without_root_marker() {
        let bare = Parser::parse("store.book").unwrap();
        let rooted = Parser::parse("$.store.book").unwrap();
        assert_eq!(bare, rooted);
        assert_eq!(bare.segments.len(), 3);
    }

    #[test]
    fn test_parse_leading_bracket_without_root_marker() {
        let path = Parser::parse("[0].x").unwrap();
        assert_eq!(
            path.segments,
            vec![PathSegment::Root, PathSegment::Index(0), child("x")]
        );
    }

    #[test]
    fn test_parse_array_index() {
        let path = Parser::parse("a[0].x").unwrap();
        assert_eq!(
            path.segments,
            vec![PathSegment::Root, child("a"), PathSegment::Index(0), child("x")]
        );
    }

    #[test]
    fn test_parse_negative_index() {
        let path = Parser::parse("$.items[-1]").unwrap();
        assert_eq!(path.segments[2], PathSegment::Index(-1));
    }

    #[test]
    fn test_parse_multi_index() {
        let path = Parser::parse("items[0, 2,-1]").unwrap();
        assert_eq!(path.segments[2], PathSegment::MultiIndex(vec![0, 2, -1]));
    }

    #[test]
    fn test_parse_wildcard() {
        assert_eq!(
            Parser::parse("$.items[*]").unwrap().segments[2],
            PathSegment::Wildcard
        );
        assert_eq!(
            Parser::parse("$.items.*").unwrap().segments[2],
            PathSegment::Wildcard
        );
        assert_eq!(
            Parser::parse("*.name").unwrap().segments[1],
            PathSegment::Wildcard
        );
    }

    #[test]
    fn test_parse_recursive_descent() {
        let path = Parser::parse("$..price").unwrap();
        assert_eq!(
            path.segments[1],
            PathSegment::RecursiveDescent(Some("price".to_string()))
        );
        let path = Parser::parse("$..*").unwrap();
        assert_eq!(path.segments[1], PathSegment::RecursiveDescent(None));
    }

    #[test]
    fn test_parse_descendant_bracket() {
        let path = Parser::parse("$..[0]").unwrap();
        assert_eq!(
            path.segments,
            vec![
                PathSegment::Root,
                PathSegment::DescendantOrSelf,
                PathSegment::Index(0)
            ]
        );
    }

    #[test]
    fn test_parse_slices() {
        let slice = |s: &str| Parser::parse(s).unwrap().segments[2].clone();
        assert_eq!(
            slice("$.items[1:3]"),
            PathSegment::Slice {
                start: Some(1),
                end: Some(3),
                step: None
            }
        );
        assert_eq!(
            slice("$.items[2:]"),
            PathSegment::Slice {
                start: Some(2),
                end: None,
                step: None
            }
        );
        assert_eq!(
            slice("$.items[:5]"),
            PathSegment::Slice {
                start: None,
                end: Some(5),
                step: None
            }
        );
        assert_eq!(
            slice("$.items[::2]"),
            PathSegment::Slice {
                start: None,
                end: None,
                step: Some(2)
            }
        );
    }

    #[test]
    fn test_parse_zero_step_fails() {
        assert!(Parser::parse("items[0:4:0]").is_err());
    }

    #[test]
    fn test_parse_multi_property() {
        let path = Parser::parse("$.store['book','music']").unwrap();
        assert_eq!(
            path.segments[2],
            PathSegment::MultiProperty(vec!["book".to_string(), "music".to_string()])
        );
    }

    #[test]
    fn test_parse_bracket_notation_with_specials() {
        let path = Parser::parse(r#"$['a.b']["c d"]['it\'s']"#).unwrap();
        assert_eq!(
            path.segments,
            vec![PathSegment::Root, child("a.b"), child("c d"), child("it's")]
        );
    }

    #[test]
    fn test_parse_whitespace_handling() {
        let path = Parser::parse("$ . store [ 0 ]").unwrap();
        assert_eq!(
            path.segments,
            vec![PathSegment::Root, child("store"), PathSegment::Index(0)]
        );
    }

    #[test]
    fn test_parse_filter_comparison() {
        let path = Parser::parse("books[?(@.price < 10)]").unwrap();
        assert_eq!(
            path.segments[2],
            PathSegment::Filter(FilterExpr::Compare {
                left: Operand::Current(vec![child("price")]),
                op: CompareOp::Lt,
                right: Operand::Literal(Literal::Number(10.0)),
            })
        );
    }

    #[test]
    fn test_parse_filter_logic_and_existence() {
        let path = Parser::parse("items[?(@.a == 'x' || !(@.b) && @.c != null)]").unwrap();
        match &path.segments[2] {
            PathSegment::Filter(FilterExpr::Or(left, right)) => {
                assert!(matches!(**left, FilterExpr::Compare { op: CompareOp::Eq, .. }));
                assert!(matches!(**right, FilterExpr::And(_, _)));
            }
            other => panic!("unexpected segment {:?}", other),
        }
    }

    #[test]
    fn test_parse_filter_without_parens() {
        let path = Parser::parse("items[?@.flag]").unwrap();
        assert_eq!(
            path.segments[2],
            PathSegment::Filter(FilterExpr::Exists(Operand::Current(vec![child("flag")])))
        );
    }

    #[test]
    fn test_parse_filter_bare_literal_fails() {
        assert!(Parser::parse("items[?(1)]").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Parser::parse("$.").is_err());
        assert!(Parser::parse("a[").is_err());
        assert!(Parser::parse("a['x").is_err());
        assert!(Parser::parse("a[abc]").is_err());
        assert!(Parser::parse("a b").is_err());
        assert!(Parser::parse("a[?(@.x ==)]").is_err());
    }

    #[test]
    fn test_parse_error_position() {
        let err = Parser::parse("a b").unwrap_err();
        assert_eq!(err.position(), Some(2));
    }
}
