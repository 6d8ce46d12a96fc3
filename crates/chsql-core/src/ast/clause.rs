//! `SELECT` clauses and table expressions.

use super::{
    ColumnExprList, Expr, FunctionExpr, Ident, Node, NumberLiteral, SubQuery, TableIdentifier,
    TypedPlaceholder, WindowExpr,
};
use crate::format::Formatter;
use crate::lexer::{Keyword, Span};
use crate::visitor::{self, accept_all, Visitor};

/// `WITH cte, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WithClause {
    /// Common table expressions in source order.
    pub ctes: Vec<CteStmt>,
    /// Source span.
    pub span: Span,
}

impl Node for WithClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("WITH");
        f.indent();
        f.line_break();
        f.write_broken(&self.ctes);
        f.dedent();
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.ctes, &mut *scope)?;
        scope.visit_with_clause(self)
    }
}

/// `expr AS name` or `name AS (subquery)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CteStmt {
    /// Left of `AS`: the bound expression, or the name of a subquery.
    pub expr: Expr,
    /// Right of `AS`: the name, or the subquery.
    pub alias: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for CteStmt {
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
        scope.visit_cte_stmt(self)
    }
}

/// A projection: expression, `EXCEPT`/`REPLACE`/`APPLY` modifiers and alias.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectItem {
    /// Selected expression.
    pub expr: Expr,
    /// `EXCEPT`, `REPLACE` and `APPLY` modifiers.
    pub modifiers: Vec<FunctionExpr>,
    /// Alias, with or without `AS`.
    pub alias: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for SelectItem {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        for modifier in &self.modifiers {
            f.write_char(' ');
            f.write_node(modifier);
        }
        if let Some(alias) = &self.alias {
            f.write_str(" AS ");
            f.write_node(alias);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        accept_all(&self.modifiers, &mut *scope)?;
        visitor::accept_opt(self.alias.as_ref(), &mut *scope)?;
        scope.visit_select_item(self)
    }
}

/// `TOP n [WITH TIES]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TopClause {
    /// Row count.
    pub number: NumberLiteral,
    /// `WITH TIES` was given.
    pub with_ties: bool,
    /// Source span.
    pub span: Span,
}

impl Node for TopClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("TOP ");
        f.write_node(&self.number);
        if self.with_ties {
            f.write_str(" WITH TIES");
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.number.accept(&mut *scope)?;
        scope.visit_top_clause(self)
    }
}

/// `ON (a, b)` after `SELECT DISTINCT`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistinctOn {
    /// Expressions rows are deduplicated on.
    pub exprs: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for DistinctOn {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ON (");
        f.write_separated(&self.exprs, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.exprs, &mut *scope)?;
        scope.visit_distinct_on(self)
    }
}

/// `FROM source`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FromClause {
    /// Table or join tree.
    pub expr: JoinItem,
    /// Source span.
    pub span: Span,
}

impl Node for FromClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("FROM");
        f.indent();
        f.line_break();
        f.write_node(&self.expr);
        f.dedent();
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_from_clause(self)
    }
}

/// Either side of a join: a single table or a join tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinItem {
    /// A single table.
    Table(JoinTableExpr),
    /// Two sides joined together.
    Join(Box<JoinExpr>),
}

forward_node!(JoinItem { Table, Join });

/// A join, left-deep: `left [modifiers] JOIN right [ON|USING ...]`. A join
/// without modifiers is a comma join.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinExpr {
    /// Left side.
    pub left: JoinItem,
    /// Join keywords before `JOIN`, in source order.
    pub modifiers: Vec<Keyword>,
    /// Right side.
    pub right: JoinTableExpr,
    /// `ON` or `USING` constraint.
    pub constraint: Option<JoinConstraintClause>,
    /// Source span.
    pub span: Span,
}

impl JoinExpr {
    /// Returns true for `a, b`.
    #[must_use]
    pub fn is_comma(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl Node for JoinExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.left);
        if self.is_comma() {
            f.write_char(',');
            f.line_break();
            f.write_node(&self.right);
            return;
        }
        f.line_break();
        for (i, modifier) in self.modifiers.iter().enumerate() {
            if i > 0 {
                f.write_char(' ');
            }
            f.write_str(modifier.as_str());
        }
        f.indent();
        f.line_break();
        f.write_node(&self.right);
        if let Some(constraint) = &self.constraint {
            f.write_char(' ');
            f.write_node(constraint);
        }
        f.dedent();
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.left.accept(&mut *scope)?;
        self.right.accept(&mut *scope)?;
        visitor::accept_opt(self.constraint.as_ref(), &mut *scope)?;
        scope.visit_join_expr(self)
    }
}

/// A table expression with its `FINAL` and `SAMPLE` modifiers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinTableExpr {
    /// Table being read.
    pub table: TableExpr,
    /// `FINAL` was given.
    pub has_final: bool,
    /// `SAMPLE` clause.
    pub sample: Option<SampleClause>,
    /// Source span.
    pub span: Span,
}

impl Node for JoinTableExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.table);
        if self.has_final {
            f.write_str(" FINAL");
        }
        if let Some(sample) = &self.sample {
            f.write_char(' ');
            f.write_node(sample);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        visitor::accept_opt(self.sample.as_ref(), &mut *scope)?;
        scope.visit_join_table_expr(self)
    }
}

/// What a table expression reads from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableSource {
    /// `[db.]table`
    Table(TableIdentifier),
    /// `name(args)`
    Function(TableFunctionExpr),
    /// `(SELECT ...)`
    SubQuery(SubQuery),
    /// `{name:Type}`
    Placeholder(TypedPlaceholder),
    /// The array operand of `ARRAY JOIN`.
    Expr(Expr),
}

forward_node!(TableSource {
    Table,
    Function,
    SubQuery,
    Placeholder,
    Expr,
});

/// `source [AS alias]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableExpr {
    /// Table, table function, subquery or placeholder.
    pub expr: TableSource,
    /// Alias, with or without `AS`.
    pub alias: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for TableExpr {
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
        scope.visit_table_expr(self)
    }
}

/// `numbers(10)`, `remote('host', db.t)`, `s3(url, format = 'CSV')`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableFunctionExpr {
    /// Function name.
    pub name: Ident,
    /// Arguments in parentheses.
    pub args: TableArgListExpr,
    /// Source span.
    pub span: Span,
}

impl Node for TableFunctionExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_node(&self.args);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.args.accept(&mut *scope)?;
        scope.visit_table_function_expr(self)
    }
}

/// Parenthesized arguments of a table function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableArgListExpr {
    /// Positional and `name = value` arguments.
    pub args: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for TableArgListExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('(');
        f.write_separated(&self.args, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.args, &mut *scope)?;
        scope.visit_table_arg_list_expr(self)
    }
}

/// The condition attached to a join.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinConstraint {
    /// `ON expr`
    On(Expr),
    /// `USING (columns)`
    Using {
        columns: ColumnExprList,
        has_paren: bool,
    },
}

/// `ON expr` or `USING cols`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinConstraintClause {
    /// `ON` expression or `USING` columns.
    pub constraint: JoinConstraint,
    /// Source span.
    pub span: Span,
}

impl Node for JoinConstraintClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        match &self.constraint {
            JoinConstraint::On(expr) => {
                f.write_str("ON ");
                f.write_node(expr);
            }
            JoinConstraint::Using { columns, has_paren } => {
                f.write_str("USING ");
                if *has_paren {
                    f.write_char('(');
                    f.write_node(columns);
                    f.write_char(')');
                } else {
                    f.write_node(columns);
                }
            }
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        match &self.constraint {
            JoinConstraint::On(expr) => expr.accept(&mut *scope)?,
            JoinConstraint::Using { columns, .. } => columns.accept(&mut *scope)?,
        }
        scope.visit_join_constraint_clause(self)
    }
}

/// `SAMPLE ratio [OFFSET ratio]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SampleClause {
    /// Sampling ratio.
    pub ratio: RatioExpr,
    /// Ratio after `OFFSET`.
    pub offset: Option<RatioExpr>,
    /// Source span.
    pub span: Span,
}

impl Node for SampleClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SAMPLE ");
        f.write_node(&self.ratio);
        if let Some(offset) = &self.offset {
            f.write_str(" OFFSET ");
            f.write_node(offset);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.ratio.accept(&mut *scope)?;
        visitor::accept_opt(self.offset.as_ref(), &mut *scope)?;
        scope.visit_sample_clause(self)
    }
}

/// `n` or `n/d`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RatioExpr {
    /// Numerator, or the whole ratio.
    pub numerator: NumberLiteral,
    /// Denominator after `/`.
    pub denominator: Option<NumberLiteral>,
    /// Source span.
    pub span: Span,
}

impl Node for RatioExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.numerator);
        if let Some(denominator) = &self.denominator {
            f.write_char('/');
            f.write_node(denominator);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.numerator.accept(&mut *scope)?;
        visitor::accept_opt(self.denominator.as_ref(), &mut *scope)?;
        scope.visit_ratio_expr(self)
    }
}

/// `WHERE expr`. A logical chain supplies its own indentation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WhereClause {
    /// Filter condition.
    pub expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for WhereClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("WHERE");
        if self.expr.is_logical() {
            f.line_break();
            f.write_node(&self.expr);
        } else {
            f.indent();
            f.line_break();
            f.write_node(&self.expr);
            f.dedent();
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_where_clause(self)
    }
}

/// `PREWHERE expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrewhereClause {
    /// Filter condition.
    pub expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for PrewhereClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("PREWHERE ");
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_prewhere_clause(self)
    }
}

/// The grouping function wrapped around a `GROUP BY` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GroupByAggregate {
    /// `ROLLUP(...)`
    Rollup,
    /// `CUBE(...)`
    Cube,
    /// `GROUPING SETS(...)`
    GroupingSets,
}

impl GroupByAggregate {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rollup => "ROLLUP",
            Self::Cube => "CUBE",
            Self::GroupingSets => "GROUPING SETS",
        }
    }
}

/// `GROUP BY [ROLLUP|CUBE|GROUPING SETS] items [WITH CUBE|ROLLUP] [WITH TOTALS]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupByClause {
    /// `ROLLUP`, `CUBE` or `GROUPING SETS` form.
    pub aggregate: Option<GroupByAggregate>,
    /// Grouping expressions.
    pub items: ColumnExprList,
    /// `WITH CUBE` was given.
    pub with_cube: bool,
    /// `WITH ROLLUP` was given.
    pub with_rollup: bool,
    /// `WITH TOTALS` was given.
    pub with_totals: bool,
    /// Source span.
    pub span: Span,
}

impl Node for GroupByClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("GROUP BY");
        f.indent();
        f.line_break();
        if let Some(aggregate) = self.aggregate {
            f.write_str(aggregate.as_str());
            f.write_char('(');
            f.write_node(&self.items);
            f.write_char(')');
        } else {
            f.write_node(&self.items);
        }
        if self.with_cube {
            f.line_break();
            f.write_str("WITH CUBE");
        }
        if self.with_rollup {
            f.line_break();
            f.write_str("WITH ROLLUP");
        }
        if self.with_totals {
            f.line_break();
            f.write_str("WITH TOTALS");
        }
        f.dedent();
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.items.accept(&mut *scope)?;
        scope.visit_group_by_clause(self)
    }
}

/// `HAVING expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HavingClause {
    /// Filter condition.
    pub expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for HavingClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("HAVING ");
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_having_clause(self)
    }
}

/// `ORDER BY items [INTERPOLATE ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderByClause {
    /// Ordering terms in source order.
    pub items: Vec<OrderExpr>,
    /// `INTERPOLATE` clause.
    pub interpolate: Option<InterpolateClause>,
    /// Source span.
    pub span: Span,
}

impl Node for OrderByClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ORDER BY");
        f.indent();
        f.line_break();
        f.write_broken(&self.items);
        if let Some(interpolate) = &self.interpolate {
            f.line_break();
            f.write_node(interpolate);
        }
        f.dedent();
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.items, &mut *scope)?;
        visitor::accept_opt(self.interpolate.as_ref(), &mut *scope)?;
        scope.visit_order_by_clause(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// `expr [ASC|DESC] [NULLS FIRST|LAST] [WITH FILL ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderExpr {
    /// Expression to order by.
    pub expr: Expr,
    /// `ASC` or `DESC`.
    pub direction: Option<OrderDirection>,
    /// `NULLS FIRST` or `NULLS LAST`.
    pub nulls: Option<NullsOrder>,
    /// `WITH FILL` options.
    pub fill: Option<Fill>,
    /// Source span.
    pub span: Span,
}

impl Node for OrderExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        if let Some(direction) = self.direction {
            f.write_char(' ');
            f.write_str(direction.as_str());
        }
        if let Some(nulls) = self.nulls {
            f.write_char(' ');
            f.write_str(nulls.as_str());
        }
        if let Some(fill) = &self.fill {
            f.write_char(' ');
            f.write_node(fill);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        visitor::accept_opt(self.fill.as_ref(), &mut *scope)?;
        scope.visit_order_expr(self)
    }
}

/// `WITH FILL [FROM e] [TO e] [STEP e] [STALENESS e]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fill {
    /// Value after `FROM`.
    pub from: Option<Expr>,
    /// Value after `TO`.
    pub to: Option<Expr>,
    /// Value after `STEP`.
    pub step: Option<Expr>,
    /// Value after `STALENESS`.
    pub staleness: Option<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for Fill {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("WITH FILL");
        for (keyword, value) in [
            (" FROM ", &self.from),
            (" TO ", &self.to),
            (" STEP ", &self.step),
            (" STALENESS ", &self.staleness),
        ] {
            if let Some(value) = value {
                f.write_str(keyword);
                f.write_node(value);
            }
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.from.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.to.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.step.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.staleness.as_ref(), &mut *scope)?;
        scope.visit_fill(self)
    }
}

/// `INTERPOLATE [(col [AS expr], ...)]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InterpolateClause {
    /// Columns to interpolate.
    pub items: Vec<InterpolateItem>,
    /// Source span.
    pub span: Span,
}

impl Node for InterpolateClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("INTERPOLATE");
        if !self.items.is_empty() {
            f.write_str(" (");
            f.write_separated(&self.items, ", ");
            f.write_char(')');
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.items, &mut *scope)?;
        scope.visit_interpolate_clause(self)
    }
}

/// `column [AS expr]` inside `INTERPOLATE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InterpolateItem {
    /// Column name.
    pub column: Ident,
    /// Expression after `AS`.
    pub expr: Option<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for InterpolateItem {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.column);
        if let Some(expr) = &self.expr {
            f.write_str(" AS ");
            f.write_node(expr);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.column.accept(&mut *scope)?;
        visitor::accept_opt(self.expr.as_ref(), &mut *scope)?;
        scope.visit_interpolate_item(self)
    }
}

/// `LIMIT n [OFFSET m] [WITH TIES]`; `LIMIT m, n` is stored in this form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LimitClause {
    /// Row count.
    pub limit: Expr,
    /// Rows skipped.
    pub offset: Option<Expr>,
    /// `WITH TIES` was given.
    pub with_ties: bool,
    /// Source span.
    pub span: Span,
}

impl Node for LimitClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("LIMIT ");
        f.write_node(&self.limit);
        if let Some(offset) = &self.offset {
            f.write_str(" OFFSET ");
            f.write_node(offset);
        }
        if self.with_ties {
            f.write_str(" WITH TIES");
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.limit.accept(&mut *scope)?;
        visitor::accept_opt(self.offset.as_ref(), &mut *scope)?;
        scope.visit_limit_clause(self)
    }
}

/// `LIMIT n [OFFSET m] BY cols`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LimitByClause {
    /// Rows kept per group.
    pub limit: LimitClause,
    /// Grouping expressions after `BY`.
    pub by: ColumnExprList,
    /// Source span.
    pub span: Span,
}

impl Node for LimitByClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.limit);
        f.write_str(" BY ");
        f.write_node(&self.by);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.limit.accept(&mut *scope)?;
        self.by.accept(&mut *scope)?;
        scope.visit_limit_by_clause(self)
    }
}

/// `SETTINGS name = value, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SettingsClause {
    /// Settings in source order.
    pub items: Vec<SettingExpr>,
    /// Source span.
    pub span: Span,
}

impl Node for SettingsClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SETTINGS");
        f.indent();
        f.line_break();
        f.write_broken(&self.items);
        f.dedent();
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.items, &mut *scope)?;
        scope.visit_settings_clause(self)
    }
}

/// `name = value`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SettingExpr {
    /// Setting name.
    pub name: Ident,
    /// Setting value.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for SettingExpr {
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
        scope.visit_setting_expr(self)
    }
}

/// `FORMAT name`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormatClause {
    /// Output format name.
    pub format: Ident,
    /// Source span.
    pub span: Span,
}

impl Node for FormatClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("FORMAT ");
        f.write_node(&self.format);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.format.accept(&mut *scope)?;
        scope.visit_format_clause(self)
    }
}

/// `WINDOW name AS (...), ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowClause {
    /// Named windows in source order.
    pub windows: Vec<WindowDefinition>,
    /// Source span.
    pub span: Span,
}

impl Node for WindowClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("WINDOW ");
        f.write_separated(&self.windows, ", ");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.windows, &mut *scope)?;
        scope.visit_window_clause(self)
    }
}

/// `name AS (window)` inside `WINDOW`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowDefinition {
    /// Window name.
    pub name: Ident,
    /// Window specification.
    pub window: WindowExpr,
    /// Source span.
    pub span: Span,
}

impl Node for WindowDefinition {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_str(" AS ");
        f.write_node(&self.window);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.window.accept(&mut *scope)?;
        scope.visit_window_definition(self)
    }
}
