//! SQL Tokenizer implementation.

use super::{Keyword, LexError, LexErrorKind, NumberBase, QuoteType, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input.
///
/// The lexer is a single forward scan. As an iterator it yields every token,
/// then one [`TokenKind::Eof`] token, and then stops. After a [`LexError`] it
/// yields nothing further.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Set once `Eof` or an error has been produced.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            finished: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.start)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- line comment
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* block comment */
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.start = self.pos;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(self.error(LexErrorKind::UnterminatedComment)),
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token whose text is the raw lexeme.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, &self.input[self.start..self.pos], self.make_span())
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Ident),
        }
    }

    /// Reads the body of a quoted lexeme up to the closing `quote`, decoding
    /// doubled quotes and backslash escapes. The opening quote is consumed.
    fn scan_quoted(&mut self, quote: char, unterminated: LexErrorKind) -> Result<String, LexError> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Ok(value);
                    }
                }
                Some('\\') => match self.advance() {
                    Some(escaped) => value.push(unescape(escaped)),
                    None => return Err(self.error(LexErrorKind::InvalidEscape)),
                },
                Some(c) => value.push(c),
                None => return Err(self.error(unterminated)),
            }
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<Token, LexError> {
        let quote_type = if quote == '`' {
            QuoteType::BackTick
        } else {
            QuoteType::DoubleQuote
        };
        let name = self.scan_quoted(quote, LexErrorKind::UnterminatedIdentifier)?;
        Ok(Token::new(
            TokenKind::QuotedIdent(quote_type),
            name,
            self.make_span(),
        ))
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        let value = self.scan_quoted('\'', LexErrorKind::UnterminatedString)?;
        Ok(Token::new(TokenKind::String, value, self.make_span()))
    }

    fn consume_digits(&mut self, radix: u32) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(|c| c.is_digit(radix)) {
            self.advance();
            count += 1;
        }
        count
    }

    /// Scans a number, recording its base.
    fn scan_number(&mut self) -> Token {
        let first = self.peek();

        if first == Some('0') && matches!(self.peek_next(), Some('x' | 'X')) {
            let rest = &self.input[self.pos + 2..];
            if rest.chars().next().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
                self.advance();
                self.consume_digits(16);
                return self.make_token(TokenKind::Number(NumberBase::Hex));
            }
        }

        let digits = self.consume_digits(10);
        let mut is_float = false;

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.consume_digits(10);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let rest = &self.input[self.pos + 1..];
            let mut chars = rest.chars();
            let valid = match chars.next() {
                Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if valid {
                is_float = true;
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                self.consume_digits(10);
            }
        }

        let text = &self.input[self.start..self.pos];
        let base = if !is_float
            && digits > 1
            && first == Some('0')
            && text.chars().all(|c| c.is_digit(8))
        {
            NumberBase::Octal
        } else {
            NumberBase::Decimal
        };
        self.make_token(TokenKind::Number(base))
    }

    /// Picks a one- or two-character operator token.
    fn scan_operator(&mut self, c: char) -> Result<Token, LexError> {
        let next = self.peek();
        let (kind, wide) = match (c, next) {
            (':', Some(':')) => (TokenKind::DoubleColon, true),
            ('-', Some('>')) => (TokenKind::Arrow, true),
            ('!', Some('=')) | ('<', Some('>')) => (TokenKind::NotEq, true),
            ('<', Some('=')) => (TokenKind::LtEq, true),
            ('>', Some('=')) => (TokenKind::GtEq, true),
            ('=', Some('=')) => (TokenKind::DoubleEq, true),
            ('|', Some('|')) => (TokenKind::Concat, true),
            ('(', _) => (TokenKind::LeftParen, false),
            (')', _) => (TokenKind::RightParen, false),
            ('[', _) => (TokenKind::LeftBracket, false),
            (']', _) => (TokenKind::RightBracket, false),
            ('{', _) => (TokenKind::LeftBrace, false),
            ('}', _) => (TokenKind::RightBrace, false),
            (',', _) => (TokenKind::Comma, false),
            (';', _) => (TokenKind::Semicolon, false),
            ('+', _) => (TokenKind::Plus, false),
            ('-', _) => (TokenKind::Minus, false),
            ('*', _) => (TokenKind::Star, false),
            ('/', _) => (TokenKind::Slash, false),
            ('%', _) => (TokenKind::Percent, false),
            ('?', _) => (TokenKind::Question, false),
            ('@', _) => (TokenKind::At, false),
            ('.', _) => (TokenKind::Dot, false),
            (':', _) => (TokenKind::Colon, false),
            ('=', _) => (TokenKind::Eq, false),
            ('<', _) => (TokenKind::Lt, false),
            ('>', _) => (TokenKind::Gt, false),
            (other, _) => return Err(self.error(LexErrorKind::UnexpectedCharacter(other))),
        };
        if wide {
            self.advance();
        }
        Ok(self.make_token(kind))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for unterminated literals, identifiers or
    /// comments and for characters that start no token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        match c {
            '`' | '"' => self.scan_quoted_identifier(c),
            '\'' => self.scan_string(),
            c if c.is_ascii_digit() => Ok(self.scan_number()),
            c if c.is_alphabetic() || c == '_' => Ok(self.scan_identifier()),
            c => {
                self.advance();
                self.scan_operator(c)
            }
        }
    }

    /// Tokenizes the entire input, ending with an `Eof` token.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if result.as_ref().map_or(true, Token::is_eof) {
            self.finished = true;
        }
        Some(result)
    }
}

/// Decodes the character following a backslash.
const fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'a' => '\u{7}',
        'v' => '\u{b}',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    fn lex_error(input: &str) -> LexError {
        Lexer::new(input).tokenize().unwrap_err()
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            kinds("SELECT a FROM t"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Ident,
                TokenKind::Keyword(Keyword::From),
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_keeps_spelling() {
        let toks = tokens("select Limit");
        assert_eq!(toks[0].text, "select");
        assert_eq!(toks[1].as_keyword(), Some(Keyword::Limit));
        assert_eq!(toks[1].text, "Limit");
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let toks = tokens("selection from_date");
        assert_eq!(toks[0].kind, TokenKind::Ident);
        assert_eq!(toks[1].kind, TokenKind::Ident);
        assert_eq!(toks[1].text, "from_date");
    }

    #[test]
    fn test_spans() {
        let toks = tokens("SELECT  abc");
        assert_eq!(toks[0].span, Span::new(0, 6));
        assert_eq!(toks[1].span, Span::new(8, 11));
        assert_eq!(toks[2].span, Span::new(11, 11));
    }

    #[test]
    fn test_quoted_identifiers() {
        let toks = tokens("`my col` \"other\"\"x\"");
        assert_eq!(toks[0].kind, TokenKind::QuotedIdent(QuoteType::BackTick));
        assert_eq!(toks[0].text, "my col");
        assert_eq!(toks[0].span, Span::new(0, 8));
        assert_eq!(toks[1].kind, TokenKind::QuotedIdent(QuoteType::DoubleQuote));
        assert_eq!(toks[1].text, "other\"x");
    }

    #[test]
    fn test_numbers() {
        let toks = tokens("42 3.14 1e10 2.5E-3 0x1F 0755 0 09");
        let got: Vec<_> = toks.iter().map(|t| (t.kind, t.text.as_str())).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::Number(NumberBase::Decimal), "42"),
                (TokenKind::Number(NumberBase::Decimal), "3.14"),
                (TokenKind::Number(NumberBase::Decimal), "1e10"),
                (TokenKind::Number(NumberBase::Decimal), "2.5E-3"),
                (TokenKind::Number(NumberBase::Hex), "0x1F"),
                (TokenKind::Number(NumberBase::Octal), "0755"),
                (TokenKind::Number(NumberBase::Decimal), "0"),
                (TokenKind::Number(NumberBase::Decimal), "09"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_tuple_access_is_not_float() {
        assert_eq!(
            kinds("t.1"),
            vec![
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Number(NumberBase::Decimal),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        let toks = tokens(r"'it''s' 'a\nb' 'q\'x' 'back\\slash'");
        assert_eq!(toks[0].text, "it's");
        assert_eq!(toks[1].text, "a\nb");
        assert_eq!(toks[2].text, "q'x");
        assert_eq!(toks[3].text, "back\\slash");
        assert_eq!(toks[0].span, Span::new(0, 7));
    }

    #[test]
    fn test_operators_are_greedy() {
        assert_eq!(
            kinds(":: -> != <> <= >= == || = < > : -"),
            vec![
                TokenKind::DoubleColon,
                TokenKind::Arrow,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::DoubleEq,
                TokenKind::Concat,
                TokenKind::Eq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Colon,
                TokenKind::Minus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            kinds("? {id:UInt32}"),
            vec![
                TokenKind::Question,
                TokenKind::LeftBrace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("SELECT -- trailing\n 1 /* block */ + 2"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Number(NumberBase::Decimal),
                TokenKind::Plus,
                TokenKind::Number(NumberBase::Decimal),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_identifier() {
        let err = lex_error("SELECT `a\"");
        assert_eq!(err.kind, LexErrorKind::UnterminatedIdentifier);
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex_error("SELECT 'abc");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = lex_error("SELECT 1 /* never closed");
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.offset, 9);
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex_error("SELECT 1 & 2");
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('&'));
        assert_eq!(err.offset, 9);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("a");
        assert!(matches!(lexer.next(), Some(Ok(t)) if t.kind == TokenKind::Ident));
        assert!(matches!(lexer.next(), Some(Ok(t)) if t.is_eof()));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("a & b");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }
}
