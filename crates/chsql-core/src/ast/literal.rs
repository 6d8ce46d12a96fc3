//! Identifiers and literals.

use super::{ColumnType, Expr, Node};
use crate::format::Formatter;
use crate::lexer::{NumberBase, QuoteType, Span};
use crate::visitor::{self, accept_all, Visitor};

/// An identifier with the quoting it was written with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ident {
    /// Identifier text with quotes and escapes removed.
    pub name: String,
    /// Quote style the identifier was written with.
    pub quote_type: QuoteType,
    /// Source span.
    pub span: Span,
}

impl Ident {
    /// Creates an unquoted identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            quote_type: QuoteType::Unquoted,
            span,
        }
    }

    /// Creates an identifier with the given quoting.
    #[must_use]
    pub fn quoted(name: impl Into<String>, quote_type: QuoteType, span: Span) -> Self {
        Self {
            name: name.into(),
            quote_type,
            span,
        }
    }

    /// Returns true for the `*` wildcard.
    #[must_use]
    pub fn is_star(&self) -> bool {
        self.quote_type == QuoteType::Unquoted && self.name == "*"
    }
}

impl Node for Ident {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        match self.quote_type.quote_char() {
            None => f.write_str(&self.name),
            Some(quote) => write_quoted(f, &self.name, quote),
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_ident(self)
    }
}

/// Writes `text` between `quote` characters, escaping the quote and
/// backslashes so the lexer decodes it back to `text`.
pub(crate) fn write_quoted(f: &mut Formatter, text: &str, quote: char) {
    f.write_char(quote);
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\"),
            '\n' => f.write_str("\\n"),
            '\t' => f.write_str("\\t"),
            '\r' => f.write_str("\\r"),
            '\0' => f.write_str("\\0"),
            c if c == quote => {
                f.write_char('\\');
                f.write_char(c);
            }
            c => f.write_char(c),
        }
    }
    f.write_char(quote);
}

/// `a` or `a.b`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NestedIdentifier {
    /// First part.
    pub ident: Ident,
    /// Part after the dot.
    pub dot_ident: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl NestedIdentifier {
    /// Wraps a single identifier.
    #[must_use]
    pub fn single(ident: Ident) -> Self {
        let span = ident.span;
        Self {
            ident,
            dot_ident: None,
            span,
        }
    }
}

impl Node for NestedIdentifier {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.ident);
        if let Some(dot_ident) = &self.dot_ident {
            f.write_char('.');
            f.write_node(dot_ident);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.ident.accept(&mut *scope)?;
        visitor::accept_opt(self.dot_ident.as_ref(), &mut *scope)?;
        scope.visit_nested_identifier(self)
    }
}

/// A dotted name with three or more parts, `a.b.c`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    /// Dot-separated parts.
    pub fields: Vec<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for Path {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_separated(&self.fields, ".");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.fields, &mut *scope)?;
        scope.visit_path(self)
    }
}

/// `[database.]table`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableIdentifier {
    /// Database qualifier.
    pub database: Option<Ident>,
    /// Table name.
    pub table: Ident,
    /// Source span.
    pub span: Span,
}

impl Node for TableIdentifier {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        if let Some(database) = &self.database {
            f.write_node(database);
            f.write_char('.');
        }
        f.write_node(&self.table);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.database.as_ref(), &mut *scope)?;
        self.table.accept(&mut *scope)?;
        scope.visit_table_identifier(self)
    }
}

/// A numeric literal kept as written.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NumberLiteral {
    /// Digits as written.
    pub literal: String,
    /// Numeric base of the literal.
    pub base: NumberBase,
    /// Source span.
    pub span: Span,
}

impl Node for NumberLiteral {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str(&self.literal);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_number_literal(self)
    }
}

/// A string literal; `literal` holds the decoded value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StringLiteral {
    /// Decoded string value.
    pub literal: String,
    /// Source span.
    pub span: Span,
}

impl Node for StringLiteral {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        write_quoted(f, &self.literal, '\'');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_string_literal(self)
    }
}

/// `TRUE` or `FALSE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoolLiteral {
    /// The value.
    pub value: bool,
    /// Source span.
    pub span: Span,
}

impl Node for BoolLiteral {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str(if self.value { "TRUE" } else { "FALSE" });
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_bool_literal(self)
    }
}

/// `NULL`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NullLiteral {
    /// Source span.
    pub span: Span,
}

impl Node for NullLiteral {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("NULL");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_null_literal(self)
    }
}

/// The `NOT NULL` marker of a column definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NotNullLiteral {
    /// Source span.
    pub span: Span,
}

impl Node for NotNullLiteral {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("NOT NULL");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_not_null_literal(self)
    }
}

/// Positional parameter `?`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlaceHolder {
    /// Source span.
    pub span: Span,
}

impl Node for PlaceHolder {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('?');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_place_holder(self)
    }
}

/// Query parameter in expression position, `{name: Type}`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryParam {
    /// Parameter name.
    pub name: Ident,
    /// Declared type.
    pub param_type: ColumnType,
    /// Source span.
    pub span: Span,
}

impl Node for QueryParam {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('{');
        f.write_node(&self.name);
        f.write_str(": ");
        f.write_node(&self.param_type);
        f.write_char('}');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.param_type.accept(&mut *scope)?;
        scope.visit_query_param(self)
    }
}

/// Query parameter standing in for a table, `{name:Identifier}`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypedPlaceholder {
    /// Placeholder name.
    pub name: Ident,
    /// Declared type.
    pub param_type: ColumnType,
    /// Source span.
    pub span: Span,
}

impl Node for TypedPlaceholder {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('{');
        f.write_node(&self.name);
        f.write_char(':');
        f.write_node(&self.param_type);
        f.write_char('}');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.param_type.accept(&mut *scope)?;
        scope.visit_typed_placeholder(self)
    }
}

/// `UUID 'value'`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Uuid {
    /// UUID string.
    pub value: StringLiteral,
    /// Source span.
    pub span: Span,
}

impl Node for Uuid {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("UUID ");
        f.write_node(&self.value);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.value.accept(&mut *scope)?;
        scope.visit_uuid(self)
    }
}

/// `{'key': value, ...}`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapLiteral {
    /// Entries in source order.
    pub entries: Vec<KeyValue>,
    /// Source span.
    pub span: Span,
}

impl Node for MapLiteral {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('{');
        f.write_separated(&self.entries, ", ");
        f.write_char('}');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.entries, &mut *scope)?;
        scope.visit_map_literal(self)
    }
}

/// `key: value` inside a map literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyValue {
    /// Key.
    pub key: Expr,
    /// Value.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for KeyValue {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.key);
        f.write_str(": ");
        f.write_node(&self.value);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.key.accept(&mut *scope)?;
        self.value.accept(&mut *scope)?;
        scope.visit_key_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_compact;

    #[test]
    fn test_ident_quoting() {
        let span = Span::new(0, 0);
        assert_eq!(format_compact(&Ident::new("a", span)), "a");
        assert_eq!(
            format_compact(&Ident::quoted("my col", QuoteType::BackTick, span)),
            "`my col`"
        );
        assert_eq!(
            format_compact(&Ident::quoted("x", QuoteType::DoubleQuote, span)),
            "\"x\""
        );
        assert_eq!(
            format_compact(&Ident::quoted("a`b", QuoteType::BackTick, span)),
            "`a\\`b`"
        );
    }

    #[test]
    fn test_string_literal_escaping() {
        let literal = StringLiteral {
            literal: "it's\na \\ test".to_string(),
            span: Span::new(0, 0),
        };
        assert_eq!(format_compact(&literal), r"'it\'s\na \\ test'");
    }
}
