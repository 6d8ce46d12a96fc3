//! Queries and data manipulation statements.

use super::{
    DistinctOn, Expr, FormatClause, FromClause, GroupByClause, HavingClause, LimitByClause,
    LimitClause, NestedIdentifier, Node, OnClusterClause, OrderByClause, PrewhereClause,
    SelectItem, SettingsClause, TableIdentifier, TableSource, TopClause, WhereClause,
    WindowClause, WithClause,
};
use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

/// Set operators chaining `SELECT`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetOperator {
    Union,
    UnionAll,
    UnionDistinct,
    Except,
    Intersect,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::UnionDistinct => "UNION DISTINCT",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        }
    }
}

/// The set operator and the query following a `SELECT`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectUnion {
    /// Set operator joining the queries.
    pub operator: SetOperator,
    /// Right-hand query.
    pub query: Box<SelectQuery>,
}

/// A `SELECT` query, possibly chained to further queries by a set operator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectQuery {
    /// `WITH` clause.
    pub with: Option<WithClause>,
    /// `DISTINCT` was given.
    pub has_distinct: bool,
    /// `DISTINCT ON (...)` expressions.
    pub distinct_on: Option<DistinctOn>,
    /// `TOP n` clause.
    pub top: Option<TopClause>,
    /// Projection list.
    pub select_items: Vec<SelectItem>,
    /// `FROM` clause.
    pub from: Option<FromClause>,
    /// `PREWHERE` clause.
    pub prewhere: Option<PrewhereClause>,
    /// `WHERE` clause.
    pub where_clause: Option<WhereClause>,
    /// `GROUP BY` clause.
    pub group_by: Option<GroupByClause>,
    /// `HAVING` clause.
    pub having: Option<HavingClause>,
    /// `WINDOW` clause.
    pub window: Option<WindowClause>,
    /// `ORDER BY` clause.
    pub order_by: Option<OrderByClause>,
    /// `LIMIT n BY ...` clause.
    pub limit_by: Option<LimitByClause>,
    /// `LIMIT` clause.
    pub limit: Option<LimitClause>,
    /// `SETTINGS` clause.
    pub settings: Option<SettingsClause>,
    /// `FORMAT` clause.
    pub format: Option<FormatClause>,
    /// Following set operation.
    pub union: Option<SelectUnion>,
    /// Source span.
    pub span: Span,
}

impl SelectQuery {
    /// An empty query spanning `span`, to be filled in clause by clause.
    #[must_use]
    pub const fn empty(span: Span) -> Self {
        Self {
            with: None,
            has_distinct: false,
            distinct_on: None,
            top: None,
            select_items: Vec::new(),
            from: None,
            prewhere: None,
            where_clause: None,
            group_by: None,
            having: None,
            window: None,
            order_by: None,
            limit_by: None,
            limit: None,
            settings: None,
            format: None,
            union: None,
            span,
        }
    }
}

fn write_clause<N: Node>(f: &mut Formatter, clause: Option<&N>) {
    if let Some(clause) = clause {
        f.line_break();
        f.write_node(clause);
    }
}

impl Node for SelectQuery {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        if let Some(with) = &self.with {
            f.write_node(with);
            f.line_break();
        }
        f.write_str("SELECT");
        if self.has_distinct {
            f.write_str(" DISTINCT");
            if let Some(distinct_on) = &self.distinct_on {
                f.write_char(' ');
                f.write_node(distinct_on);
            }
        }
        if let Some(top) = &self.top {
            f.write_char(' ');
            f.write_node(top);
        }
        f.indent();
        f.line_break();
        f.write_broken(&self.select_items);
        f.dedent();
        write_clause(f, self.from.as_ref());
        write_clause(f, self.prewhere.as_ref());
        write_clause(f, self.where_clause.as_ref());
        write_clause(f, self.group_by.as_ref());
        write_clause(f, self.having.as_ref());
        write_clause(f, self.window.as_ref());
        write_clause(f, self.order_by.as_ref());
        write_clause(f, self.limit_by.as_ref());
        write_clause(f, self.limit.as_ref());
        write_clause(f, self.settings.as_ref());
        write_clause(f, self.format.as_ref());
        if let Some(union) = &self.union {
            f.line_break();
            f.write_str(union.operator.as_str());
            f.line_break();
            f.write_node(&union.query);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.with.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.distinct_on.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.top.as_ref(), &mut *scope)?;
        accept_all(&self.select_items, &mut *scope)?;
        visitor::accept_opt(self.from.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.prewhere.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.where_clause.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.group_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.having.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.window.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.order_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.limit_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.limit.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.settings.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.format.as_ref(), &mut *scope)?;
        if let Some(union) = &self.union {
            union.query.accept(&mut *scope)?;
        }
        scope.visit_select_query(self)
    }
}

/// The rows an `INSERT` writes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InsertSource {
    /// `VALUES (...), ...`
    Values(Vec<AssignmentValues>),
    /// `SELECT ...`
    Select(Box<SelectQuery>),
}

/// `INSERT INTO [TABLE|FUNCTION] target [(cols)] [FORMAT f] [VALUES ... | SELECT ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertStmt {
    /// Written as `INSERT INTO TABLE`.
    pub has_table_keyword: bool,
    /// Written as `INSERT INTO FUNCTION`.
    pub has_function_keyword: bool,
    /// Target table or table function.
    pub table: TableSource,
    /// Explicit column list.
    pub column_names: Option<ColumnNamesExpr>,
    /// `FORMAT` of inline data.
    pub format: Option<FormatClause>,
    /// `VALUES` rows or `SELECT` query.
    pub source: Option<InsertSource>,
    /// Source span.
    pub span: Span,
}

impl Node for InsertStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("INSERT INTO ");
        if self.has_table_keyword {
            f.write_str("TABLE ");
        } else if self.has_function_keyword {
            f.write_str("FUNCTION ");
        }
        f.write_node(&self.table);
        if let Some(column_names) = &self.column_names {
            f.indent();
            f.line_break();
            f.write_node(column_names);
            f.dedent();
        }
        if let Some(format) = &self.format {
            f.write_char(' ');
            f.write_node(format);
        }
        match &self.source {
            Some(InsertSource::Select(select)) => {
                f.line_break();
                f.write_node(select);
            }
            Some(InsertSource::Values(values)) => {
                f.line_break();
                f.write_str("VALUES");
                f.indent();
                f.line_break();
                f.write_broken(values);
                f.dedent();
            }
            None => {}
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        visitor::accept_opt(self.column_names.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.format.as_ref(), &mut *scope)?;
        match &self.source {
            Some(InsertSource::Values(values)) => accept_all(values, &mut *scope)?,
            Some(InsertSource::Select(select)) => select.accept(&mut *scope)?,
            None => {}
        }
        scope.visit_insert_stmt(self)
    }
}

/// `(a, b, ...)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnNamesExpr {
    /// Columns in source order.
    pub column_names: Vec<NestedIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for ColumnNamesExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('(');
        f.write_separated(&self.column_names, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.column_names, &mut *scope)?;
        scope.visit_column_names_expr(self)
    }
}

/// One row of `VALUES`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AssignmentValues {
    /// Values of one row.
    pub values: Vec<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for AssignmentValues {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('(');
        f.write_separated(&self.values, ", ");
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.values, &mut *scope)?;
        scope.visit_assignment_values(self)
    }
}

/// Lightweight delete: `DELETE FROM t [ON CLUSTER c] [WHERE expr]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteClause {
    /// Target table.
    pub table: TableIdentifier,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Rows to delete.
    pub where_expr: Option<Expr>,
    /// Source span.
    pub span: Span,
}

impl Node for DeleteClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DELETE FROM ");
        f.write_node(&self.table);
        if let Some(on_cluster) = &self.on_cluster {
            f.write_char(' ');
            f.write_node(on_cluster);
        }
        if let Some(where_expr) = &self.where_expr {
            f.write_str(" WHERE ");
            f.write_node(where_expr);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.where_expr.as_ref(), &mut *scope)?;
        scope.visit_delete_clause(self)
    }
}
