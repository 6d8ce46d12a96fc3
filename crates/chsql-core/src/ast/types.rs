//! Column types and column definitions.

use super::{
    Expr, Ident, NestedIdentifier, Node, NotNullLiteral, NullLiteral, StringLiteral, TtlClause,
};
use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

/// A column type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnType {
    /// `UInt64`, `String`, ...
    Scalar(ScalarType),
    /// `Decimal(10, 2)`, `FixedString(16)`, `DateTime64(3, 'UTC')`
    WithParams(TypeWithParams),
    /// `Array(T)`, `Map(K, V)`, `Nullable(T)`, `LowCardinality(T)`, ...
    Complex(ComplexType),
    /// `Nested(a T, ...)` and named tuples.
    Nested(NestedType),
    /// `Enum8('a' = 1, ...)`
    Enum(EnumType),
    /// `JSON(options)`
    Json(JsonType),
}

forward_node!(ColumnType {
    Scalar,
    WithParams,
    Complex,
    Nested,
    Enum,
    Json,
});

impl ColumnType {
    /// The type's name as written, without parameters.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name.name,
            Self::WithParams(t) => &t.name.name,
            Self::Complex(t) => &t.name.name,
            Self::Nested(t) => &t.name.name,
            Self::Enum(t) => &t.name.name,
            Self::Json(t) => &t.name.name,
        }
    }
}

/// A type without parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScalarType {
    /// Type name.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

impl Node for ScalarType {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        scope.visit_scalar_type(self)
    }
}

/// A type taking literal parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeWithParams {
    /// Type name.
    pub name: Ident,
    /// Literal parameters.
    pub params: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for TypeWithParams {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_char('(');
        f.write_separated(&self.params, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        accept_all(&self.params, &mut *scope)?;
        scope.visit_type_with_params(self)
    }
}

/// A type taking other types as parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComplexType {
    /// Type name.
    pub name: Ident,
    /// Nested types.
    pub params: Vec<ColumnType>,
    /// Source span.
    pub span: Span,
}

impl Node for ComplexType {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_char('(');
        f.write_separated(&self.params, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        accept_all(&self.params, &mut *scope)?;
        scope.visit_complex_type(self)
    }
}

/// A type whose parameters are named columns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NestedType {
    /// `Nested` or `Tuple`.
    pub name: Ident,
    /// Named fields.
    pub columns: Vec<ColumnDef>,
    /// Source span.
    pub span: Span,
}

impl Node for NestedType {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_char('(');
        f.write_separated(&self.columns, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        accept_all(&self.columns, &mut *scope)?;
        scope.visit_nested_type(self)
    }
}

/// `Enum8('a' = 1, ...)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumType {
    /// `Enum`, `Enum8` or `Enum16`.
    pub name: Ident,
    /// Enum entries.
    pub values: Vec<EnumValue>,
    /// Source span.
    pub span: Span,
}

impl Node for EnumType {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_char('(');
        f.write_separated(&self.values, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        accept_all(&self.values, &mut *scope)?;
        scope.visit_enum_type(self)
    }
}

/// `'name' [= value]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumValue {
    /// Entry name.
    pub name: StringLiteral,
    /// Explicit number after `=`.
    pub value: Option<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for EnumValue {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        if let Some(value) = &self.value {
            f.write_str(" = ");
            f.write_node(value);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.value.as_ref(), &mut *scope)?;
        scope.visit_enum_value(self)
    }
}

/// `JSON` with an optional parenthesized option list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JsonType {
    /// Type name.
    pub name: Ident,
    /// Options in parentheses.
    pub options: Vec<JsonOption>,
    /// Source span.
    pub span: Span,
}

impl Node for JsonType {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        if !self.options.is_empty() {
            f.write_char('(');
            f.write_separated(&self.options, ", ");
            f.write_char(')');
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        accept_all(&self.options, &mut *scope)?;
        scope.visit_json_type(self)
    }
}

/// The forms a JSON type option can take.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JsonOptionKind {
    /// `max_dynamic_paths = 10`, `max_dynamic_types = 3`
    Setting { name: Ident, value: Expr },
    /// `SKIP a.b`
    SkipPath(Expr),
    /// `SKIP REGEXP 'pattern'`
    SkipRegexp(StringLiteral),
    /// `a.b UInt64`
    TypeHint { path: Expr, column_type: ColumnType },
}

/// One option inside `JSON(...)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JsonOption {
    /// The option.
    pub kind: JsonOptionKind,
    /// Source span.
    pub span: Span,
}

impl Node for JsonOption {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        match &self.kind {
            JsonOptionKind::Setting { name, value } => {
                f.write_node(name);
                f.write_str(" = ");
                f.write_node(value);
            }
            JsonOptionKind::SkipPath(path) => {
                f.write_str("SKIP ");
                f.write_node(path);
            }
            JsonOptionKind::SkipRegexp(pattern) => {
                f.write_str("SKIP REGEXP ");
                f.write_node(pattern);
            }
            JsonOptionKind::TypeHint { path, column_type } => {
                f.write_node(path);
                f.write_char(' ');
                f.write_node(column_type);
            }
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        match &self.kind {
            JsonOptionKind::Setting { name, value } => {
                name.accept(&mut *scope)?;
                value.accept(&mut *scope)?;
            }
            JsonOptionKind::SkipPath(path) => path.accept(&mut *scope)?,
            JsonOptionKind::SkipRegexp(pattern) => pattern.accept(&mut *scope)?,
            JsonOptionKind::TypeHint { path, column_type } => {
                path.accept(&mut *scope)?;
                column_type.accept(&mut *scope)?;
            }
        }
        scope.visit_json_option(self)
    }
}

/// A column property named by `ALTER TABLE ... MODIFY COLUMN c REMOVE <property>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyType {
    /// Property name, e.g. `DEFAULT` or `TTL`.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

impl PropertyType {
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.name.name
    }
}

impl Node for PropertyType {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        scope.visit_property_type(self)
    }
}

/// The value-producing clause of a column definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnDefault {
    Default(Expr),
    Materialized(Expr),
    Alias(Expr),
}

impl ColumnDefault {
    /// The keyword introducing the value.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Default(_) => "DEFAULT",
            Self::Materialized(_) => "MATERIALIZED",
            Self::Alias(_) => "ALIAS",
        }
    }

    /// The value expression.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        match self {
            Self::Default(expr) | Self::Materialized(expr) | Self::Alias(expr) => expr,
        }
    }
}

/// `name [type] [NOT NULL|NULL] [DEFAULT|MATERIALIZED|ALIAS expr] [CODEC(...)]
/// [TTL expr] [COMMENT 'text']`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDef {
    /// Column name.
    pub name: NestedIdentifier,
    /// Declared type.
    pub column_type: Option<ColumnType>,
    /// `NOT NULL` marker.
    pub not_null: Option<NotNullLiteral>,
    /// `NULL` marker.
    pub nullable: Option<NullLiteral>,
    /// `DEFAULT`, `MATERIALIZED` or `ALIAS` value.
    pub default: Option<ColumnDefault>,
    /// `CODEC(...)`.
    pub codec: Option<CompressionCodec>,
    /// Column TTL.
    pub ttl: Option<TtlClause>,
    /// `COMMENT` text.
    pub comment: Option<StringLiteral>,
    /// Source span.
    pub span: Span,
}

impl Node for ColumnDef {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        if let Some(column_type) = &self.column_type {
            f.write_char(' ');
            f.write_node(column_type);
        }
        if let Some(not_null) = &self.not_null {
            f.write_char(' ');
            f.write_node(not_null);
        } else if let Some(nullable) = &self.nullable {
            f.write_char(' ');
            f.write_node(nullable);
        }
        if let Some(default) = &self.default {
            f.write_char(' ');
            f.write_str(default.keyword());
            f.write_char(' ');
            f.write_node(default.expr());
        }
        if let Some(codec) = &self.codec {
            f.write_char(' ');
            f.write_node(codec);
        }
        if let Some(ttl) = &self.ttl {
            f.write_char(' ');
            f.write_node(ttl);
        }
        if let Some(comment) = &self.comment {
            f.write_str(" COMMENT ");
            f.write_node(comment);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.column_type.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.not_null.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.nullable.as_ref(), &mut *scope)?;
        if let Some(default) = &self.default {
            default.expr().accept(&mut *scope)?;
        }
        visitor::accept_opt(self.codec.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.ttl.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.comment.as_ref(), &mut *scope)?;
        scope.visit_column_def(self)
    }
}

/// `CODEC(Delta, ZSTD(3))`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompressionCodec {
    /// Codec calls in source order.
    pub codecs: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for CompressionCodec {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CODEC(");
        f.write_separated(&self.codecs, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.codecs, &mut *scope)?;
        scope.visit_compression_codec(self)
    }
}
