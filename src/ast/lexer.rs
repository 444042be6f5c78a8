use crate::error::{LexError, LexErrorKind};
use log::trace;
use std::fmt;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Identifier(String),
    Comma,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "{value}"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 0-based character offset of the first character of the token.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// Produces tokens on demand from an input string.
///
/// Positions are counted in characters, not bytes. As an iterator the lexer
/// yields every token up to and including `EndOfInput`, or up to the first
/// error, and then stops.
pub struct Lexer<'a> {
    chars: Chars<'a>,
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            position: 0,
            finished: false,
        }
    }

    /// Returns the next token. Once the input is exhausted this keeps
    /// returning `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::EndOfInput, start));
        };

        let token = match ch {
            '0'..='9' => self.lex_number()?,
            '.' if self.peek_second().is_some_and(|next| next.is_ascii_digit()) => {
                self.lex_number()?
            }
            ch if ch.is_alphabetic() => self.lex_identifier(),
            _ => {
                let kind = match ch {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '^' => TokenKind::Caret,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    ',' => TokenKind::Comma,
                    other => {
                        return Err(LexError::new(
                            LexErrorKind::UnexpectedCharacter(other),
                            start,
                        ))
                    }
                };
                self.bump();
                Token::new(kind, start)
            }
        };

        trace!("token {:?} at {}", token.kind, token.position);
        Ok(token)
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn lex_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let mut text = String::new();
        let mut seen_point = false;

        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => {}
                '.' if !seen_point => seen_point = true,
                '.' => {
                    return Err(LexError::new(
                        LexErrorKind::MalformedNumber(ch),
                        self.position,
                    ))
                }
                _ => break,
            }
            text.push(ch);
            self.bump();
        }

        if let Some(marker @ ('e' | 'E')) = self.peek() {
            text.push(marker);
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            match self.peek() {
                Some(ch) if ch.is_ascii_digit() => {}
                other => {
                    return Err(LexError::new(
                        LexErrorKind::MalformedExponent(other),
                        self.position,
                    ))
                }
            }
            while let Some(digit) = self.peek().filter(char::is_ascii_digit) {
                text.push(digit);
                self.bump();
            }
        }

        let value = text.parse::<f64>().map_err(|_| {
            let first = text.chars().next().unwrap_or('.');
            LexError::new(LexErrorKind::MalformedNumber(first), start)
        })?;
        Ok(Token::new(TokenKind::Number(value), start))
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.position;
        let mut name = String::new();
        while let Some(ch) = self.peek().filter(|ch| ch.is_alphabetic()) {
            name.push(ch);
            self.bump();
        }
        Token::new(TokenKind::Identifier(name), start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if matches!(
            result,
            Err(_)
                | Ok(Token {
                    kind: TokenKind::EndOfInput,
                    ..
                })
        ) {
            self.finished = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .map(|token| token.unwrap().kind)
            .collect()
    }

    fn lex_error(input: &str) -> LexError {
        Lexer::new(input)
            .find_map(Result::err)
            .expect("expected a lex error")
    }

    #[test]
    fn test_operators_and_parentheses() {
        assert_eq!(
            kinds("+-*/^(),"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Caret,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 3.25 .5 7. 1e3 2.5E-2 6e+1"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.25),
                TokenKind::Number(0.5),
                TokenKind::Number(7.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.025),
                TokenKind::Number(60.0),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            kinds("sqrt(x)"),
            vec![
                TokenKind::Identifier("sqrt".to_string()),
                TokenKind::LParen,
                TokenKind::Identifier("x".to_string()),
                TokenKind::RParen,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_positions_skip_whitespace() {
        let positions: Vec<usize> = Lexer::new("  12 +\t(3)")
            .map(|token| token.unwrap().position)
            .collect();
        assert_eq!(positions, vec![2, 5, 7, 8, 9, 10]);
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let error = lex_error("1 + é @");
        assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('@'));
        assert_eq!(error.position, 6);
    }

    #[test]
    fn test_unexpected_character() {
        let error = lex_error("2 # 3");
        assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('#'));
        assert_eq!(error.position, 2);
        assert_eq!(error.character(), Some('#'));
    }

    #[test]
    fn test_lone_decimal_point_is_unexpected() {
        let error = lex_error("1 + .");
        assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('.'));
        assert_eq!(error.position, 4);
    }

    #[test]
    fn test_two_decimal_points() {
        let error = lex_error("1.2.3");
        assert_eq!(error.kind, LexErrorKind::MalformedNumber('.'));
        assert_eq!(error.position, 3);
    }

    #[test]
    fn test_malformed_exponent() {
        let error = lex_error("2e");
        assert_eq!(error.kind, LexErrorKind::MalformedExponent(None));
        assert_eq!(error.position, 2);

        let error = lex_error("2e+x");
        assert_eq!(error.kind, LexErrorKind::MalformedExponent(Some('x')));
        assert_eq!(error.position, 3);
    }

    #[test]
    fn test_iterator_stops_after_end_of_input() {
        let mut lexer = Lexer::new("1");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::EndOfInput,
                ..
            }))
        ));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("$ 1");
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_next_token_repeats_end_of_input() {
        let mut lexer = Lexer::new("   ");
        for _ in 0..3 {
            assert_eq!(
                lexer.next_token().unwrap(),
                Token::new(TokenKind::EndOfInput, 3)
            );
        }
    }
}
