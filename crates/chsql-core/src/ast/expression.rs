//! Expressions.

use std::fmt;

use super::{
    BoolLiteral, ColumnType, FunctionExpr, Ident, MapLiteral, NestedIdentifier, Node,
    NullLiteral, NumberLiteral, Path, PlaceHolder, QueryParam, SelectQuery, StringLiteral,
    WindowFunctionExpr,
};
use crate::format::{format_compact, Formatter};
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

/// Any expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expr {
    /// `a`
    Ident(Ident),
    /// `a.b`
    NestedIdentifier(NestedIdentifier),
    /// `a.b.c`
    Path(Path),
    /// Numeric literal.
    Number(NumberLiteral),
    /// String literal.
    String(StringLiteral),
    /// `TRUE` or `FALSE`.
    Bool(BoolLiteral),
    /// `NULL`
    Null(NullLiteral),
    /// `?`
    PlaceHolder(PlaceHolder),
    /// `{name:Type}`
    QueryParam(QueryParam),
    /// `{'k': v}`
    Map(MapLiteral),
    /// `[a, b]`
    Array(ArrayParamList),
    /// `(a, b)` or `(a)`.
    Tuple(ParamExprList),
    /// `x[i]`
    ObjectParams(ObjectParams),
    /// `t.1`
    Index(IndexOperation),
    /// `a op b`
    Binary(BinaryOperation),
    /// `+x` or `EXISTS (SELECT ...)`
    Unary(UnaryExpr),
    /// `-x`
    Negate(NegateExpr),
    /// `NOT x`
    Not(NotExpr),
    /// `c ? a : b`
    Ternary(TernaryOperation),
    /// `CASE ... END`
    Case(CaseExpr),
    /// `CAST(...)` and `x::T`
    Cast(CastExpr),
    /// `x [NOT] BETWEEN a AND b`
    Between(BetweenClause),
    /// `x IS NULL`
    IsNull(IsNullExpr),
    /// `x IS NOT NULL`
    IsNotNull(IsNotNullExpr),
    /// `INTERVAL n unit`
    Interval(IntervalExpr),
    /// `EXTRACT(unit FROM x)`
    Extract(ExtractExpr),
    /// Function call.
    Function(FunctionExpr),
    /// `f(...) OVER ...`
    WindowFunction(WindowFunctionExpr),
    /// `expr AS name`
    Alias(AliasExpr),
    /// Subquery.
    SubQuery(SubQuery),
    /// `name = value` table function argument.
    NamedParameter(NamedParameter),
}

forward_node!(Expr {
    Ident,
    NestedIdentifier,
    Path,
    Number,
    String,
    Bool,
    Null,
    PlaceHolder,
    QueryParam,
    Map,
    Array,
    Tuple,
    ObjectParams,
    Index,
    Binary,
    Unary,
    Negate,
    Not,
    Ternary,
    Case,
    Cast,
    Between,
    IsNull,
    IsNotNull,
    Interval,
    Extract,
    Function,
    WindowFunction,
    Alias,
    SubQuery,
    NamedParameter,
});

impl Expr {
    /// Returns true for a logical-family binary operation.
    #[must_use]
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::Binary(binary) if binary.is_logical())
    }

    /// The identifier when the expression is a bare name.
    #[must_use]
    pub const fn as_ident(&self) -> Option<&Ident> {
        match self {
            Self::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_compact(self))
    }
}

/// A comma-separated expression list, optionally prefixed with `DISTINCT`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnExprList {
    /// Expressions in source order.
    pub items: Vec<Expr>,
    /// Preceded by `DISTINCT`.
    pub has_distinct: bool,
    /// Source span.
    pub span: Span,
}

impl Node for ColumnExprList {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        if self.has_distinct {
            f.write_str("DISTINCT ");
        }
        f.write_separated(&self.items, ", ");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.items, &mut *scope)?;
        scope.visit_column_expr_list(self)
    }
}

/// The second argument list of a parametric function call, `f(p)(args)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnArgList {
    /// Preceded by `DISTINCT`.
    pub distinct: bool,
    /// Arguments in source order.
    pub items: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for ColumnArgList {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('(');
        if self.distinct {
            f.write_str("DISTINCT ");
        }
        f.write_separated(&self.items, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.items, &mut *scope)?;
        scope.visit_column_arg_list(self)
    }
}

/// A parenthesized list: a tuple, a parenthesized expression, or the
/// arguments of a function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParamExprList {
    /// Arguments, or the parameters of a parametric call.
    pub items: ColumnExprList,
    /// Arguments of a parametric call.
    pub column_arg_list: Option<ColumnArgList>,
    /// Source span.
    pub span: Span,
}

impl Node for ParamExprList {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('(');
        f.write_node(&self.items);
        f.write_char(')');
        if let Some(args) = &self.column_arg_list {
            f.write_node(args);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.items.accept(&mut *scope)?;
        visitor::accept_opt(self.column_arg_list.as_ref(), &mut *scope)?;
        scope.visit_param_expr_list(self)
    }
}

/// `[a, b, ...]`, an array literal or a subscript.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrayParamList {
    /// Elements in source order.
    pub items: ColumnExprList,
    /// Source span.
    pub span: Span,
}

impl Node for ArrayParamList {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('[');
        f.write_node(&self.items);
        f.write_char(']');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.items.accept(&mut *scope)?;
        scope.visit_array_param_list(self)
    }
}

/// Subscript access, `object[index]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectParams {
    /// Expression being accessed.
    pub object: Box<Expr>,
    /// Subscript in brackets.
    pub params: ArrayParamList,
    /// Source span.
    pub span: Span,
}

impl Node for ObjectParams {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.object);
        f.write_node(&self.params);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.object.accept(&mut *scope)?;
        self.params.accept(&mut *scope)?;
        scope.visit_object_params(self)
    }
}

/// Tuple element access, `object.1` or `object.name` after a non-name
/// expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexOperation {
    /// Tuple expression.
    pub object: Box<Expr>,
    /// Element number or name.
    pub index: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for IndexOperation {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.object);
        f.write_char('.');
        f.write_node(&self.index);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.object.accept(&mut *scope)?;
        self.index.accept(&mut *scope)?;
        scope.visit_index_operation(self)
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    DoubleEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat,
    Like,
    ILike,
    In,
    And,
    Or,
    Arrow,
}

impl BinaryOperator {
    /// Returns the operator as written in SQL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::DoubleEq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::In => "IN",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Arrow => "->",
        }
    }

    /// Returns true for `AND` and `OR`.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// `left [GLOBAL] [NOT] op right`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BinaryOperation {
    /// Left operand.
    pub left: Box<Expr>,
    /// Operator between the operands.
    pub operator: BinaryOperator,
    /// Right operand.
    pub right: Box<Expr>,
    /// Written with `GLOBAL`.
    pub has_global: bool,
    /// Written with `NOT`.
    pub has_not: bool,
    /// Source span.
    pub span: Span,
}

impl BinaryOperation {
    /// `AND`/`OR`, or any operator carrying a `GLOBAL` or `NOT` modifier.
    /// These get the nested multi-line layout in beautify mode.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        self.operator.is_logical() || self.has_global || self.has_not
    }

    fn write_operator(&self, f: &mut Formatter) {
        if self.has_global {
            f.write_str("GLOBAL ");
        }
        if self.has_not {
            f.write_str("NOT ");
        }
        f.write_str(self.operator.as_str());
    }

    fn write_logical_operand(f: &mut Formatter, operand: &Expr) {
        if operand.is_logical() {
            f.write_node(operand);
        } else {
            f.indent();
            f.write_node(operand);
            f.dedent();
        }
    }
}

impl Node for BinaryOperation {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        if f.is_beautify() && self.is_logical() {
            Self::write_logical_operand(f, &self.left);
            f.new_line();
            self.write_operator(f);
            f.new_line();
            Self::write_logical_operand(f, &self.right);
            return;
        }
        f.write_node(&self.left);
        if self.operator == BinaryOperator::Sub && !self.has_global && !self.has_not {
            f.write_char('-');
            // `a--b` would start a comment
            if matches!(*self.right, Expr::Negate(_)) {
                f.write_char(' ');
            }
        } else {
            f.write_char(' ');
            self.write_operator(f);
            f.write_char(' ');
        }
        f.write_node(&self.right);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.left.accept(&mut *scope)?;
        self.right.accept(&mut *scope)?;
        scope.visit_binary_operation(self)
    }
}

/// Prefix operators other than `-` and `NOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `EXISTS (SELECT ...)`
    Exists,
}

impl UnaryOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Exists => "EXISTS",
        }
    }
}

/// A prefix operator applied to an operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnaryExpr {
    /// Prefix operator.
    pub operator: UnaryOperator,
    /// Operand.
    pub expr: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for UnaryExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str(self.operator.as_str());
        f.write_char(' ');
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_unary_expr(self)
    }
}

/// `-expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NegateExpr {
    /// Operand.
    pub expr: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for NegateExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('-');
        if matches!(*self.expr, Expr::Negate(_)) {
            f.write_char(' ');
        }
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_negate_expr(self)
    }
}

/// `NOT expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NotExpr {
    /// Operand.
    pub expr: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for NotExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("NOT ");
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_not_expr(self)
    }
}

/// `condition ? true_expr : false_expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TernaryOperation {
    /// Condition before `?`.
    pub condition: Box<Expr>,
    /// Value when the condition holds.
    pub true_expr: Box<Expr>,
    /// Value after `:`.
    pub false_expr: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for TernaryOperation {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.condition);
        f.write_str(" ? ");
        f.write_node(&self.true_expr);
        f.write_str(" : ");
        f.write_node(&self.false_expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.condition.accept(&mut *scope)?;
        self.true_expr.accept(&mut *scope)?;
        self.false_expr.accept(&mut *scope)?;
        scope.visit_ternary_operation(self)
    }
}

/// `CASE [expr] WHEN ... THEN ... [ELSE ...] END`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CaseExpr {
    /// Operand of the simple `CASE x WHEN ...` form.
    pub expr: Option<Box<Expr>>,
    /// `WHEN ... THEN ...` branches.
    pub whens: Vec<WhenClause>,
    /// `ELSE` value.
    pub else_expr: Option<Box<Expr>>,
    /// Source span.
    pub span: Span,
}

impl Node for CaseExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CASE");
        if let Some(expr) = &self.expr {
            f.write_char(' ');
            f.write_node(expr);
        }
        f.indent();
        for when in &self.whens {
            f.line_break();
            f.write_node(when);
        }
        if let Some(else_expr) = &self.else_expr {
            f.line_break();
            f.write_str("ELSE ");
            f.write_node(else_expr);
        }
        f.dedent();
        f.line_break();
        f.write_str("END");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.expr.as_ref(), &mut *scope)?;
        accept_all(&self.whens, &mut *scope)?;
        visitor::accept_opt(self.else_expr.as_ref(), &mut *scope)?;
        scope.visit_case_expr(self)
    }
}

/// `WHEN cond THEN value`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WhenClause {
    /// Condition or compared value.
    pub when: Expr,
    /// Result of the branch.
    pub then: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for WhenClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("WHEN ");
        f.write_node(&self.when);
        f.write_str(" THEN ");
        f.write_node(&self.then);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.when.accept(&mut *scope)?;
        self.then.accept(&mut *scope)?;
        scope.visit_when_clause(self)
    }
}

/// How a cast was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CastSyntax {
    /// `CAST(x AS T)`
    As,
    /// `CAST(x, 'T')`
    Comma,
    /// `x::T`
    DoubleColon,
}

/// The target of a cast: a type, or the type-name string of `CAST(x, 'T')`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CastTarget {
    Type(ColumnType),
    Expr(Box<Expr>),
}

forward_node!(CastTarget { Type, Expr });

/// A type conversion in any of its spellings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CastExpr {
    /// Value being converted.
    pub expr: Box<Expr>,
    /// Target type or type string.
    pub target: CastTarget,
    /// Which spelling was used.
    pub syntax: CastSyntax,
    /// Source span.
    pub span: Span,
}

impl Node for CastExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        match self.syntax {
            CastSyntax::DoubleColon => {
                f.write_node(&self.expr);
                f.write_str("::");
                f.write_node(&self.target);
            }
            CastSyntax::As | CastSyntax::Comma => {
                f.write_str("CAST(");
                f.write_node(&self.expr);
                f.write_str(if self.syntax == CastSyntax::As {
                    " AS "
                } else {
                    ", "
                });
                f.write_node(&self.target);
                f.write_char(')');
            }
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        self.target.accept(&mut *scope)?;
        scope.visit_cast_expr(self)
    }
}

/// `expr [NOT] BETWEEN low AND high`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BetweenClause {
    /// Tested value.
    pub expr: Box<Expr>,
    /// Written with `NOT`.
    pub has_not: bool,
    /// Lower bound.
    pub between: Box<Expr>,
    /// Upper bound.
    pub and: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for BetweenClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        f.write_str(if self.has_not {
            " NOT BETWEEN "
        } else {
            " BETWEEN "
        });
        f.write_node(&self.between);
        f.write_str(" AND ");
        f.write_node(&self.and);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        self.between.accept(&mut *scope)?;
        self.and.accept(&mut *scope)?;
        scope.visit_between_clause(self)
    }
}

/// `expr IS NULL`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IsNullExpr {
    /// Tested value.
    pub expr: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for IsNullExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        f.write_str(" IS NULL");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_is_null_expr(self)
    }
}

/// `expr IS NOT NULL`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IsNotNullExpr {
    /// Tested value.
    pub expr: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for IsNotNullExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        f.write_str(" IS NOT NULL");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_is_not_null_expr(self)
    }
}

/// `INTERVAL expr [unit]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntervalExpr {
    /// Interval amount.
    pub expr: Box<Expr>,
    /// Interval unit; absent when the amount is a string.
    pub unit: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for IntervalExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("INTERVAL ");
        f.write_node(&self.expr);
        if let Some(unit) = &self.unit {
            f.write_char(' ');
            f.write_node(unit);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        visitor::accept_opt(self.unit.as_ref(), &mut *scope)?;
        scope.visit_interval_expr(self)
    }
}

/// `EXTRACT(unit FROM expr)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtractExpr {
    /// Date part to extract.
    pub unit: Ident,
    /// Source value.
    pub from: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for ExtractExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("EXTRACT(");
        f.write_node(&self.unit);
        f.write_str(" FROM ");
        f.write_node(&self.from);
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.unit.accept(&mut *scope)?;
        self.from.accept(&mut *scope)?;
        scope.visit_extract_expr(self)
    }
}

/// `expr AS alias` inside an expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AliasExpr {
    /// Aliased expression.
    pub expr: Box<Expr>,
    /// Alias after `AS`.
    pub alias: Ident,
    /// Source span.
    pub span: Span,
}

impl Node for AliasExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        f.write_str(" AS ");
        f.write_node(&self.alias);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        self.alias.accept(&mut *scope)?;
        scope.visit_alias_expr(self)
    }
}

/// An expression with an optional alias, as used by skipping-index
/// definitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnExpr {
    /// Expression.
    pub expr: Box<Expr>,
    /// Alias after `AS`.
    pub alias: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for ColumnExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        if let Some(alias) = &self.alias {
            f.write_str(" AS ");
            f.write_node(alias);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        visitor::accept_opt(self.alias.as_ref(), &mut *scope)?;
        scope.visit_column_expr(self)
    }
}

/// A query used as an expression or table source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubQuery {
    /// Written in parentheses.
    pub has_paren: bool,
    /// The query.
    pub select: Box<SelectQuery>,
    /// Source span.
    pub span: Span,
}

impl Node for SubQuery {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        if self.has_paren {
            f.write_char('(');
            f.write_node(&self.select);
            f.write_char(')');
        } else {
            f.write_node(&self.select);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.select.accept(&mut *scope)?;
        scope.visit_sub_query(self)
    }
}

/// `name = value` inside table-function arguments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamedParameter {
    /// Parameter name.
    pub name: Ident,
    /// Parameter value.
    pub value: Box<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for NamedParameter {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_str(" = ");
        f.write_node(&self.value);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.value.accept(&mut *scope)?;
        scope.visit_named_parameter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_beautify;

    fn ident(name: &str) -> Expr {
        Expr::Ident(Ident::new(name, Span::default()))
    }

    fn number(literal: &str) -> Expr {
        Expr::Number(NumberLiteral {
            literal: literal.to_string(),
            base: crate::lexer::NumberBase::Decimal,
            span: Span::default(),
        })
    }

    fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
        Expr::Binary(BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            has_global: false,
            has_not: false,
            span: Span::default(),
        })
    }

    #[test]
    fn test_minus_is_compact() {
        let expr = binary(ident("a"), BinaryOperator::Sub, number("1"));
        assert_eq!(expr.to_string(), "a-1");
    }

    #[test]
    fn test_minus_before_negation_keeps_space() {
        let negated = Expr::Negate(NegateExpr {
            expr: Box::new(ident("b")),
            span: Span::default(),
        });
        let expr = binary(ident("a"), BinaryOperator::Sub, negated);
        assert_eq!(expr.to_string(), "a- -b");
    }

    #[test]
    fn test_global_not_in() {
        let mut expr = binary(ident("a"), BinaryOperator::In, ident("t"));
        if let Expr::Binary(binary) = &mut expr {
            binary.has_global = true;
            binary.has_not = true;
        }
        assert_eq!(expr.to_string(), "a GLOBAL NOT IN t");
    }

    #[test]
    fn test_logical_chain_beautify() {
        let left = binary(ident("a"), BinaryOperator::Gt, number("1"));
        let right = binary(ident("b"), BinaryOperator::Lt, number("2"));
        let or = binary(
            binary(left, BinaryOperator::And, right),
            BinaryOperator::Or,
            ident("c"),
        );
        assert_eq!(
            format_beautify(&or, "  "),
            "  a > 1\nAND\n  b < 2\nOR\n  c"
        );
        assert_eq!(or.to_string(), "a > 1 AND b < 2 OR c");
    }
}
