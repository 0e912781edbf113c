//! Lexer/Scanner implementation for MiniLang
//!
//! The lexer converts source text into tokens on demand. It is a single
//! forward scan: the parser pulls one token at a time, and the first illegal
//! character or malformed literal ends the scan with a `LexicalError`.

use tracing::trace;

use crate::error::{Diagnostic, MiniResult, SourceLocation};
use super::token::{Token, TokenType, Keyword, Literal};

/// Lexer for MiniLang source code
pub struct Lexer {
    source: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    start_location: SourceLocation,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_location: SourceLocation::start(),
            finished: false,
        }
    }

    /// Scan the whole input eagerly, up to and including the EOF token
    pub fn tokenize(self) -> MiniResult<Vec<Token>> {
        self.collect()
    }

    /// Scan the next token
    ///
    /// Once the input is exhausted every call returns an EOF token.
    pub fn next_token(&mut self) -> MiniResult<Token> {
        self.skip_trivia()?;

        self.start = self.current;
        self.start_location = self.current_location();

        if self.is_at_end() {
            return Ok(self.make_token(TokenType::Eof));
        }

        let token = self.scan_token()?;
        trace!(
            kind = token.token_type.category(),
            lexeme = %token.lexeme,
            line = token.location.line,
            column = token.location.column,
            "token"
        );
        Ok(token)
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> MiniResult<()> {
        loop {
            if self.is_at_end() {
                return Ok(());
            }

            match self.peek() {
                ' ' | '\r' | '\t' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == '/' => {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                }
                '/' if self.peek_next() == '*' => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Skip a (possibly nested) block comment
    fn skip_block_comment(&mut self) -> MiniResult<()> {
        let opened_at = self.current_location();
        self.advance();
        self.advance();
        let mut depth = 1;

        while depth > 0 && !self.is_at_end() {
            if self.peek() == '/' && self.peek_next() == '*' {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                depth -= 1;
            } else {
                self.advance();
            }
        }

        if depth > 0 {
            return Err(Diagnostic::lexical("unterminated block comment", opened_at));
        }

        Ok(())
    }

    /// Scan a single token
    fn scan_token(&mut self) -> MiniResult<Token> {
        let c = self.advance();

        match c {
            // Single-character tokens
            '(' => Ok(self.make_token(TokenType::LeftParen)),
            ')' => Ok(self.make_token(TokenType::RightParen)),
            ',' => Ok(self.make_token(TokenType::Comma)),
            ';' => Ok(self.make_token(TokenType::Semicolon)),
            '+' => Ok(self.make_token(TokenType::Plus)),
            '-' => Ok(self.make_token(TokenType::Minus)),
            '*' => Ok(self.make_token(TokenType::Star)),
            '/' => Ok(self.make_token(TokenType::Slash)),

            // One- or two-character tokens
            '=' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenType::Equal))
                } else {
                    Ok(self.make_token(TokenType::Assign))
                }
            }

            '!' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenType::NotEqual))
                } else {
                    Err(self.error("illegal character '!'; did you mean '!='?"))
                }
            }

            '<' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenType::LessEqual))
                } else {
                    Ok(self.make_token(TokenType::Less))
                }
            }

            '>' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenType::GreaterEqual))
                } else {
                    Ok(self.make_token(TokenType::Greater))
                }
            }

            // String literals
            '"' => self.scan_string(),

            // Number literals
            c if c.is_ascii_digit() => self.scan_number(),

            // Identifiers and keywords
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.scan_identifier()),

            _ => Err(self.error(&format!("illegal character '{}'", c.escape_debug()))),
        }
    }

    /// Scan a string literal
    fn scan_string(&mut self) -> MiniResult<Token> {
        let mut value = String::new();

        loop {
            if self.is_at_end() || self.peek() == '\n' {
                return Err(self.error("unterminated string literal"));
            }

            let location = self.current_location();
            match self.advance() {
                '"' => break,
                '\\' => {
                    if self.is_at_end() {
                        continue;
                    }
                    let escaped = match self.peek() {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        other => {
                            return Err(Diagnostic::lexical(
                                format!("invalid escape sequence '\\{}'", other.escape_debug()),
                                location,
                            ))
                        }
                    };
                    self.advance();
                    value.push(escaped);
                }
                c => value.push(c),
            }
        }

        Ok(self.make_token(TokenType::Literal(Literal::String(value))))
    }

    /// Scan a number literal (integer or real)
    fn scan_number(&mut self) -> MiniResult<Token> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let mut is_real = false;
        if self.peek() == '.' {
            self.advance();
            if !self.peek().is_ascii_digit() {
                return Err(self.error(&format!(
                    "malformed real literal '{}': expected digits after '.'",
                    self.lexeme()
                )));
            }
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            is_real = true;
        }

        // A literal must not run straight into an identifier or another '.'
        if self.peek().is_ascii_alphanumeric() || self.peek() == '_' || self.peek() == '.' {
            while self.peek().is_ascii_alphanumeric() || self.peek() == '_' || self.peek() == '.' {
                self.advance();
            }
            return Err(self.error(&format!("malformed numeric literal '{}'", self.lexeme())));
        }

        let lexeme = self.lexeme();
        if is_real {
            let value = lexeme
                .parse::<f64>()
                .map_err(|_| self.error(&format!("malformed real literal '{}'", lexeme)))?;
            Ok(self.make_token(TokenType::Literal(Literal::Real(value))))
        } else {
            let value = lexeme.parse::<i64>().map_err(|_| {
                self.error(&format!("integer literal '{}' is out of range", lexeme))
            })?;
            Ok(self.make_token(TokenType::Literal(Literal::Integer(value))))
        }
    }

    /// Scan an identifier or keyword
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let token_type = match Keyword::from_str(&self.lexeme()) {
            Some(keyword) => TokenType::Keyword(keyword),
            None => TokenType::Identifier,
        };

        self.make_token(token_type)
    }

    /// Build a token from the current lexeme
    fn make_token(&self, token_type: TokenType) -> Token {
        Token::new(token_type, self.lexeme(), self.start_location)
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    /// Advance to the next character, tracking line and column
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    /// Check if the next character matches and consume it if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    /// Peek at the next character without consuming it
    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Create an error located at the start of the current token
    fn error(&self, message: &str) -> Diagnostic {
        Diagnostic::lexical(message, self.start_location)
    }
}

impl Iterator for Lexer {
    type Item = MiniResult<Token>;

    /// Yields every token, then a single EOF token (or the first lexical
    /// error), then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if matches!(&result, Err(_) | Ok(Token { token_type: TokenType::Eof, .. })) {
            self.finished = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;

    fn tokenize_source(source: &str) -> MiniResult<Vec<Token>> {
        Lexer::new(source).tokenize()
    }

    fn types(source: &str) -> Vec<TokenType> {
        tokenize_source(source)
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        let tokens = tokenize_source("").unwrap();
        assert_eq!(tokens.len(), 1); // Just EOF
        assert_eq!(tokens[0].token_type, TokenType::Eof);
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(
            types("(),;+-*/<>="),
            vec![
                TokenType::LeftParen,
                TokenType::RightParen,
                TokenType::Comma,
                TokenType::Semicolon,
                TokenType::Plus,
                TokenType::Minus,
                TokenType::Star,
                TokenType::Slash,
                TokenType::Less,
                TokenType::Greater,
                TokenType::Assign,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_match_operators() {
        assert_eq!(
            types("== != <= >= = <"),
            vec![
                TokenType::Equal,
                TokenType::NotEqual,
                TokenType::LessEqual,
                TokenType::GreaterEqual,
                TokenType::Assign,
                TokenType::Less,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        let tokens = tokenize_source("CONST SUBROUTINE DO END IF THEN ELSE WHILE RETURN PRINT").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Keyword(Keyword::Const));
        assert_eq!(tokens[1].token_type, TokenType::Keyword(Keyword::Subroutine));
        assert_eq!(tokens[2].token_type, TokenType::Keyword(Keyword::Do));
        assert_eq!(tokens[3].token_type, TokenType::Keyword(Keyword::End));
        assert_eq!(tokens[4].token_type, TokenType::Keyword(Keyword::If));
        assert_eq!(tokens[5].token_type, TokenType::Keyword(Keyword::Then));
        assert_eq!(tokens[6].token_type, TokenType::Keyword(Keyword::Else));
        assert_eq!(tokens[7].token_type, TokenType::Keyword(Keyword::While));
        assert_eq!(tokens[8].token_type, TokenType::Keyword(Keyword::Return));
        assert_eq!(tokens[9].token_type, TokenType::Keyword(Keyword::Print));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = tokenize_source("END ENDING INTx main Main").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Keyword(Keyword::End));
        assert_eq!(tokens[1].token_type, TokenType::Identifier);
        assert_eq!(tokens[1].lexeme, "ENDING");
        assert_eq!(tokens[2].token_type, TokenType::Identifier);
        assert_eq!(tokens[3].token_type, TokenType::Identifier);
        assert_eq!(tokens[3].lexeme, "main");
        assert_eq!(tokens[4].lexeme, "Main");
    }

    #[test]
    fn test_identifiers() {
        let tokens = tokenize_source("foo bar_baz _private myVar123").unwrap();
        assert_eq!(tokens[0].lexeme, "foo");
        assert_eq!(tokens[1].lexeme, "bar_baz");
        assert_eq!(tokens[2].lexeme, "_private");
        assert_eq!(tokens[3].lexeme, "myVar123");
        assert!(tokens[..4].iter().all(|t| t.token_type == TokenType::Identifier));
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            types("0 42 3.14 10.0"),
            vec![
                TokenType::Literal(Literal::Integer(0)),
                TokenType::Literal(Literal::Integer(42)),
                TokenType::Literal(Literal::Real(3.14)),
                TokenType::Literal(Literal::Real(10.0)),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        let tokens = tokenize_source(r#""hello" "tab\there" "quote\"test" """#).unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Literal(Literal::String("hello".to_string())));
        assert_eq!(tokens[1].token_type, TokenType::Literal(Literal::String("tab\there".to_string())));
        assert_eq!(tokens[2].token_type, TokenType::Literal(Literal::String("quote\"test".to_string())));
        assert_eq!(tokens[3].token_type, TokenType::Literal(Literal::String(String::new())));
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "INT x; // trailing\n/* block /* nested */ still */ INT y;";
        assert_eq!(
            types(source),
            vec![
                TokenType::Keyword(Keyword::Int),
                TokenType::Identifier,
                TokenType::Semicolon,
                TokenType::Keyword(Keyword::Int),
                TokenType::Identifier,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_source_location() {
        let tokens = tokenize_source("INT x;\n  x = 1;").unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 7));
    }

    #[test]
    fn test_illegal_character() {
        let err = tokenize_source("INT x = @;").unwrap_err();
        assert_eq!(err.code, ErrorCode::LexicalError);
        assert!(err.message.contains("illegal character '@'"));
        assert_eq!(err.location, SourceLocation::new(1, 9));
    }

    #[test]
    fn test_lone_bang() {
        let err = tokenize_source("x ! y").unwrap_err();
        assert!(err.message.contains("'!='"));
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize_source("STRING s = \"open\nPRINT(s);").unwrap_err();
        assert!(err.message.contains("unterminated string"));
        assert_eq!(err.location, SourceLocation::new(1, 12));
    }

    #[test]
    fn test_invalid_escape() {
        let err = tokenize_source(r#""bad \q""#).unwrap_err();
        assert!(err.message.contains("invalid escape"));
        assert_eq!(err.location, SourceLocation::new(1, 6));
    }

    #[test]
    fn test_malformed_literals() {
        for source in ["12abc", "3.", "1.2.3", "7_x"] {
            let err = tokenize_source(source).unwrap_err();
            assert_eq!(err.code, ErrorCode::LexicalError, "source: {}", source);
            assert!(err.message.contains("malformed"), "source: {}", source);
        }
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = tokenize_source("99999999999999999999").unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize_source("INT x; /* never closed").unwrap_err();
        assert!(err.message.contains("unterminated block comment"));
        assert_eq!(err.location, SourceLocation::new(1, 8));
    }

    #[test]
    fn test_iterator_stops_after_first_error() {
        let items: Vec<MiniResult<Token>> = Lexer::new("INT @ $").collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }

    #[test]
    fn test_iterator_yields_single_eof() {
        let items: Vec<MiniResult<Token>> = Lexer::new("x").collect();
        assert_eq!(items.len(), 2);

        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().unwrap().token_type, TokenType::Eof);
        assert_eq!(lexer.next_token().unwrap().token_type, TokenType::Eof);
    }
}
