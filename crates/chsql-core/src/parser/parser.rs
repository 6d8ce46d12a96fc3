//! SQL Parser implementation.

use tracing::{debug, trace};

use super::error::{ParseError, ParseOutcome};
use crate::ast::{
    Expr, Ident, NestedIdentifier, NumberLiteral, OnClusterClause, Statement, StringLiteral,
    TableIdentifier, Uuid,
};
use crate::lexer::{Keyword, LexError, Lexer, Span, Token, TokenKind};

/// Parses a script of `;`-separated statements.
///
/// Parsing stops at the first statement that fails; the statements before
/// it are returned alongside the error.
#[must_use]
pub fn parse(input: &str) -> ParseOutcome {
    Parser::new(input).parse_statements()
}

/// SQL Parser.
///
/// The input is tokenized up front. A lexer failure truncates the token
/// stream with an end-of-input token and is reported by whichever
/// statement runs into it.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the last consumed token.
    prev_end: usize,
    lex_error: Option<LexError>,
}

impl Parser {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut tokens = Vec::new();
        let mut lex_error = None;
        for result in Lexer::new(input) {
            match result {
                Ok(token) => tokens.push(token),
                Err(error) => {
                    let at = Span::new(error.offset, error.offset);
                    tokens.push(Token::new(TokenKind::Eof, "", at));
                    lex_error = Some(error);
                }
            }
        }
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = Span::new(input.len(), input.len());
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Self {
            tokens,
            pos: 0,
            prev_end: 0,
            lex_error,
        }
    }

    /// Parses every statement in the input.
    #[must_use]
    pub fn parse_statements(mut self) -> ParseOutcome {
        let mut statements = Vec::new();
        loop {
            while self.consume(&TokenKind::Semicolon) {}
            let start = self.start();
            if self.current().is_eof() && self.lex_error.is_none() {
                break;
            }
            match self.parse_statement_with_end() {
                Ok(statement) => {
                    trace!(kind = statement.kind(), offset = start, "parsed statement");
                    statements.push(statement);
                }
                Err(error) => {
                    let error = error.in_statement(start);
                    debug!(
                        offset = error.offset,
                        expected = %error.expected,
                        found = %error.found,
                        "statement failed"
                    );
                    debug!(statements = statements.len(), "parsed script");
                    return ParseOutcome {
                        statements,
                        error: Some(error),
                    };
                }
            }
        }
        debug!(statements = statements.len(), "parsed script");
        ParseOutcome {
            statements,
            error: None,
        }
    }

    fn parse_statement_with_end(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_statement()?;
        if self.check(&TokenKind::Semicolon) || (self.current().is_eof() && self.lex_error.is_none())
        {
            Ok(statement)
        } else {
            Err(self.unexpected("';' or end of input"))
        }
    }

    /// Parses a single statement, leaving the terminating `;` in place.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current().kind {
            TokenKind::Keyword(Keyword::Select | Keyword::With) => {
                Ok(Statement::Select(self.parse_select_query()?))
            }
            TokenKind::Keyword(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert()?)),
            TokenKind::Keyword(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete()?)),
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop(),
            TokenKind::Keyword(Keyword::Grant) => Ok(Statement::Grant(self.parse_grant()?)),
            TokenKind::Keyword(Keyword::Rename) => Ok(Statement::Rename(self.parse_rename()?)),
            TokenKind::Keyword(Keyword::Truncate) => {
                Ok(Statement::Truncate(self.parse_truncate()?))
            }
            TokenKind::Keyword(Keyword::Optimize) => {
                Ok(Statement::Optimize(self.parse_optimize()?))
            }
            TokenKind::Keyword(Keyword::System) => Ok(Statement::System(self.parse_system()?)),
            TokenKind::Keyword(Keyword::Show) => Ok(Statement::Show(self.parse_show()?)),
            TokenKind::Keyword(Keyword::Describe | Keyword::Desc) => {
                Ok(Statement::Describe(self.parse_describe()?))
            }
            TokenKind::Keyword(Keyword::Explain) => Ok(Statement::Explain(self.parse_explain()?)),
            TokenKind::Keyword(Keyword::Set) => Ok(Statement::Set(self.parse_set()?)),
            TokenKind::Keyword(Keyword::Use) => Ok(Statement::Use(self.parse_use()?)),
            TokenKind::Keyword(Keyword::Check) => Ok(Statement::Check(self.parse_check()?)),
            _ => Err(self.unexpected("statement")),
        }
    }

    // Token cursor

    pub(super) fn current(&self) -> &Token {
        self.peek_nth(0)
    }

    pub(super) fn peek(&self) -> &Token {
        self.peek_nth(1)
    }

    /// The token `n` positions ahead, clamped to the final end-of-input token.
    pub(super) fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Start offset of the current token.
    pub(super) fn start(&self) -> usize {
        self.current().span.start
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) const fn span_from(&self, start: usize) -> Span {
        let end = if self.prev_end < start { start } else { self.prev_end };
        Span::new(start, end)
    }

    /// Consumes the current token and returns it.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
            self.prev_end = token.span.end;
        }
        token
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Checks if the current token is a bare word spelled `word`.
    pub(super) fn check_word(&self, word: &str) -> bool {
        self.current().is_word(word)
    }

    pub(super) fn peek_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.peek_nth(n).as_keyword() == Some(keyword)
    }

    pub(super) fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn consume_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a keyword sequence only when every keyword matches.
    pub(super) fn consume_keywords(&mut self, keywords: &[Keyword]) -> bool {
        let matches = keywords
            .iter()
            .enumerate()
            .all(|(i, keyword)| self.peek_keyword(i, *keyword));
        if matches {
            for _ in keywords {
                self.advance();
            }
        }
        matches
    }

    /// Consumes a word sequence only when every word matches.
    pub(super) fn consume_words(&mut self, words: &[&str]) -> bool {
        let matches = words
            .iter()
            .enumerate()
            .all(|(i, word)| self.peek_nth(i).is_word(word));
        if matches {
            for _ in words {
                self.advance();
            }
        }
        matches
    }

    /// Builds an error for the current token.
    pub(super) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        if token.is_eof() {
            if let Some(error) = &self.lex_error {
                return ParseError::lex(error.clone());
            }
        }
        ParseError::unexpected(expected, token)
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects a bare word, matched case-insensitively.
    pub(super) fn expect_word(&mut self, word: &str) -> Result<Token, ParseError> {
        if self.check_word(word) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(word.to_ascii_uppercase()))
        }
    }

    // Shared grammar pieces

    /// True when the current token can be read as a name.
    pub(super) fn at_name(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Ident | TokenKind::QuotedIdent(_) | TokenKind::Keyword(_)
        )
    }

    /// Expects and returns an identifier. Keywords are accepted as names.
    pub(super) fn expect_identifier(&mut self) -> Result<Ident, ParseError> {
        match self.current().kind {
            TokenKind::Ident | TokenKind::Keyword(_) => {
                let token = self.advance();
                Ok(Ident::new(token.text, token.span))
            }
            TokenKind::QuotedIdent(quote_type) => {
                let token = self.advance();
                Ok(Ident::quoted(token.text, quote_type, token.span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// `name` or `name.name`.
    pub(super) fn parse_nested_identifier(&mut self) -> Result<NestedIdentifier, ParseError> {
        let start = self.start();
        let ident = self.expect_identifier()?;
        let dot_ident = if self.consume(&TokenKind::Dot) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        Ok(NestedIdentifier {
            ident,
            dot_ident,
            span: self.span_from(start),
        })
    }

    /// `[database.]table`
    pub(super) fn parse_table_identifier(&mut self) -> Result<TableIdentifier, ParseError> {
        let start = self.start();
        let first = self.expect_identifier()?;
        let (database, table) = if self.consume(&TokenKind::Dot) {
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };
        Ok(TableIdentifier {
            database,
            table,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_string_literal(&mut self) -> Result<StringLiteral, ParseError> {
        let token = self.expect(&TokenKind::String)?;
        Ok(StringLiteral {
            literal: token.text,
            span: token.span,
        })
    }

    pub(super) fn parse_number_literal(&mut self) -> Result<NumberLiteral, ParseError> {
        match self.current().kind {
            TokenKind::Number(base) => {
                let token = self.advance();
                Ok(NumberLiteral {
                    literal: token.text,
                    base,
                    span: token.span,
                })
            }
            _ => Err(self.unexpected("number")),
        }
    }

    /// A name or a string literal, as accepted for cluster and role names.
    pub(super) fn parse_name_or_string(&mut self) -> Result<Expr, ParseError> {
        if self.check(&TokenKind::String) {
            Ok(Expr::String(self.parse_string_literal()?))
        } else {
            Ok(Expr::Ident(self.expect_identifier()?))
        }
    }

    pub(super) fn parse_if_not_exists(&mut self) -> bool {
        self.consume_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists])
    }

    pub(super) fn parse_if_exists(&mut self) -> bool {
        self.consume_keywords(&[Keyword::If, Keyword::Exists])
    }

    /// `ON CLUSTER name`
    pub(super) fn parse_on_cluster(&mut self) -> Result<Option<OnClusterClause>, ParseError> {
        if !(self.check_keyword(Keyword::On) && self.peek_keyword(1, Keyword::Cluster)) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        self.advance();
        let cluster = self.parse_name_or_string()?;
        Ok(Some(OnClusterClause {
            cluster,
            span: self.span_from(start),
        }))
    }

    /// `UUID 'value'`
    pub(super) fn parse_uuid(&mut self) -> Result<Option<Uuid>, ParseError> {
        if !self.check_keyword(Keyword::Uuid) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        let value = self.parse_string_literal()?;
        Ok(Some(Uuid {
            value,
            span: self.span_from(start),
        }))
    }

    /// `COMMENT 'text'`
    pub(super) fn parse_comment(&mut self) -> Result<Option<StringLiteral>, ParseError> {
        if self.consume_keyword(Keyword::Comment) {
            Ok(Some(self.parse_string_literal()?))
        } else {
            Ok(None)
        }
    }

    /// Parses `item (, item)*`.
    pub(super) fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.consume(&TokenKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Parses a comma list inside an `ALTER TABLE` clause. A comma followed
    /// by the start of another clause ends the list.
    pub(super) fn parse_clause_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.check(&TokenKind::Comma) && !self.peek_starts_alter_clause() {
            self.advance();
            items.push(item(self)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_splits_on_semicolons() {
        let outcome = parse("SELECT 1;; SELECT 2;");
        assert!(outcome.is_ok());
        assert_eq!(outcome.statements.len(), 2);
    }

    #[test]
    fn test_empty_script() {
        let outcome = parse("  -- nothing\n");
        assert!(outcome.is_ok());
        assert!(outcome.statements.is_empty());
    }

    #[test]
    fn test_failure_keeps_earlier_statements() {
        let outcome = parse("SELECT 1; SELECT FROM; SELECT 3");
        assert_eq!(outcome.statements.len(), 1);
        let error = outcome.error.unwrap();
        assert_eq!(error.offset, 17);
        assert_eq!(error.statement_offset, 7);
        assert_eq!(error.expected, "expression");
    }

    #[test]
    fn test_lex_error_fails_its_statement() {
        let outcome = parse("SELECT 1; SELECT 2 `x");
        assert_eq!(outcome.statements.len(), 1);
        let error = outcome.error.unwrap();
        assert_eq!(error.offset, 19);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_lex_error_between_statements() {
        let outcome = parse("SELECT 1; 'open");
        assert_eq!(outcome.statements.len(), 1);
        assert_eq!(outcome.error.unwrap().offset, 10);
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        let error = parse("USE db extra").into_result().unwrap_err();
        assert_eq!(error.expected, "';' or end of input");
        assert_eq!(error.found, "identifier 'extra'");
    }

    #[test]
    fn test_unknown_statement() {
        let error = parse("FROB t").into_result().unwrap_err();
        assert_eq!(error.expected, "statement");
        assert_eq!(error.offset, 0);
    }
}
