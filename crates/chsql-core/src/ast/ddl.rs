//! Clauses shared by the table-level DDL statements.

use super::{
    ColumnDef, ColumnExpr, ColumnExprList, ColumnType, CompressionCodec, Expr, GroupByClause,
    Ident, Node, NumberLiteral, OrderByClause, ParamExprList, SettingsClause, StringLiteral,
    TableFunctionExpr, TableIdentifier, WithClause,
};
use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

/// `ON CLUSTER name`; the cluster is an identifier or a string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OnClusterClause {
    /// Cluster name.
    pub cluster: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for OnClusterClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ON CLUSTER ");
        f.write_node(&self.cluster);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.cluster.accept(&mut *scope)?;
        scope.visit_on_cluster_clause(self)
    }
}

/// What a `PARTITION` clause selects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionTarget {
    /// `PARTITION ID 'id'`
    Id(StringLiteral),
    /// `PARTITION ALL`
    All,
    /// `PARTITION expr`
    Expr(Expr),
}

/// `PARTITION target`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionClause {
    /// Partition expression, `ID` or `ALL`.
    pub target: PartitionTarget,
    /// Source span.
    pub span: Span,
}

impl Node for PartitionClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("PARTITION ");
        match &self.target {
            PartitionTarget::Id(id) => {
                f.write_str("ID ");
                f.write_node(id);
            }
            PartitionTarget::All => f.write_str("ALL"),
            PartitionTarget::Expr(expr) => f.write_node(expr),
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        match &self.target {
            PartitionTarget::Id(id) => id.accept(&mut *scope)?,
            PartitionTarget::All => {}
            PartitionTarget::Expr(expr) => expr.accept(&mut *scope)?,
        }
        scope.visit_partition_clause(self)
    }
}

/// `PARTITION BY items`, in engines and window specifications.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionByClause {
    /// Partitioning expressions.
    pub items: ColumnExprList,
    /// Source span.
    pub span: Span,
}

impl Node for PartitionByClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("PARTITION BY ");
        f.write_node(&self.items);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.items.accept(&mut *scope)?;
        scope.visit_partition_by_clause(self)
    }
}

/// `PRIMARY KEY expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrimaryKeyClause {
    /// Key expression.
    pub expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for PrimaryKeyClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("PRIMARY KEY ");
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_primary_key_clause(self)
    }
}

/// `SAMPLE BY expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SampleByClause {
    /// Sampling expression.
    pub expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for SampleByClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SAMPLE BY ");
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        scope.visit_sample_by_clause(self)
    }
}

/// `TTL item, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TtlClause {
    /// TTL rules in source order.
    pub items: Vec<TtlExpr>,
    /// Source span.
    pub span: Span,
}

impl Node for TtlClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("TTL ");
        f.write_separated(&self.items, ", ");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.items, &mut *scope)?;
        scope.visit_ttl_clause(self)
    }
}

/// One TTL item: the expiry expression and what happens when it passes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TtlExpr {
    /// Expiry expression.
    pub expr: Expr,
    /// Action taken on expiry.
    pub policy: Option<TtlPolicy>,
    /// Source span.
    pub span: Span,
}

impl Node for TtlExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.expr);
        if let Some(policy) = &self.policy {
            f.write_char(' ');
            f.write_node(policy);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.expr.accept(&mut *scope)?;
        visitor::accept_opt(self.policy.as_ref(), &mut *scope)?;
        scope.visit_ttl_expr(self)
    }
}

/// `[rule] [WHERE expr] [GROUP BY ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TtlPolicy {
    /// `DELETE`, `TO DISK`, `TO VOLUME` or `RECOMPRESS` rule.
    pub rule: Option<TtlPolicyRule>,
    /// `WHERE` condition.
    pub where_expr: Option<Expr>,
    /// `GROUP BY` rollup.
    pub group_by: Option<GroupByClause>,
    /// Source span.
    pub span: Span,
}

impl Node for TtlPolicy {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        let mut needs_space = false;
        if let Some(rule) = &self.rule {
            f.write_node(rule);
            needs_space = true;
        }
        if let Some(where_expr) = &self.where_expr {
            if needs_space {
                f.write_char(' ');
            }
            f.write_str("WHERE ");
            f.write_node(where_expr);
            needs_space = true;
        }
        if let Some(group_by) = &self.group_by {
            if needs_space {
                f.write_char(' ');
            }
            f.write_node(group_by);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.rule.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.where_expr.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.group_by.as_ref(), &mut *scope)?;
        scope.visit_ttl_policy(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TtlAction {
    /// `DELETE`
    Delete,
    /// `TO DISK 'name'`
    ToDisk(StringLiteral),
    /// `TO VOLUME 'name'`
    ToVolume(StringLiteral),
    /// `RECOMPRESS CODEC(...)`
    Recompress(CompressionCodec),
}

/// The action part of a TTL rule.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TtlPolicyRule {
    /// What happens to expired rows.
    pub action: TtlAction,
    /// Source span.
    pub span: Span,
}

impl Node for TtlPolicyRule {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        match &self.action {
            TtlAction::Delete => f.write_str("DELETE"),
            TtlAction::ToDisk(disk) => {
                f.write_str("TO DISK ");
                f.write_node(disk);
            }
            TtlAction::ToVolume(volume) => {
                f.write_str("TO VOLUME ");
                f.write_node(volume);
            }
            TtlAction::Recompress(codec) => {
                f.write_str("RECOMPRESS ");
                f.write_node(codec);
            }
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        match &self.action {
            TtlAction::Delete => {}
            TtlAction::ToDisk(name) | TtlAction::ToVolume(name) => name.accept(&mut *scope)?,
            TtlAction::Recompress(codec) => codec.accept(&mut *scope)?,
        }
        scope.visit_ttl_policy_rule(self)
    }
}

/// `ENGINE = Name(params)` and the storage clauses that follow it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineExpr {
    /// Engine name.
    pub name: Ident,
    /// Engine arguments.
    pub params: Option<ParamExprList>,
    /// `ORDER BY` key.
    pub order_by: Option<OrderByClause>,
    /// `PARTITION BY` key.
    pub partition_by: Option<PartitionByClause>,
    /// `PRIMARY KEY`.
    pub primary_key: Option<PrimaryKeyClause>,
    /// `SAMPLE BY` key.
    pub sample_by: Option<SampleByClause>,
    /// Table TTL.
    pub ttl: Option<TtlClause>,
    /// Engine `SETTINGS`.
    pub settings: Option<SettingsClause>,
    /// Source span.
    pub span: Span,
}

fn write_engine_clause<N: Node>(f: &mut Formatter, clause: Option<&N>) {
    if let Some(clause) = clause {
        f.line_break();
        f.write_node(clause);
    }
}

impl Node for EngineExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ENGINE = ");
        f.write_node(&self.name);
        if let Some(params) = &self.params {
            f.write_node(params);
        }
        write_engine_clause(f, self.order_by.as_ref());
        write_engine_clause(f, self.partition_by.as_ref());
        write_engine_clause(f, self.primary_key.as_ref());
        write_engine_clause(f, self.sample_by.as_ref());
        write_engine_clause(f, self.ttl.as_ref());
        write_engine_clause(f, self.settings.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.params.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.order_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.partition_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.primary_key.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.sample_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.ttl.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.settings.as_ref(), &mut *scope)?;
        scope.visit_engine_expr(self)
    }
}

/// `TO table`, the target of a materialized or live view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DestinationClause {
    /// Target table.
    pub table: TableIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for DestinationClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("TO ");
        f.write_node(&self.table);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        scope.visit_destination_clause(self)
    }
}

/// An entry of a parenthesized table schema.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableElement {
    /// Column definition.
    Column(ColumnDef),
    /// `INDEX name expr TYPE t`
    Index(TableIndex),
    /// `PROJECTION name (SELECT ...)`
    Projection(TableProjection),
    /// `CONSTRAINT name CHECK|ASSUME expr`
    Constraint(ConstraintClause),
    /// `PRIMARY KEY expr`
    PrimaryKey(PrimaryKeyClause),
}

forward_node!(TableElement {
    Column,
    Index,
    Projection,
    Constraint,
    PrimaryKey,
});

/// The shape of a new table: `(elements)`, `AS other_table` or
/// `AS table_function(...)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableSchemaClause {
    /// Columns, indexes, projections and constraints.
    pub elements: Vec<TableElement>,
    /// Table after `AS`.
    pub alias_table: Option<TableIdentifier>,
    /// Table function after `AS`.
    pub table_function: Option<TableFunctionExpr>,
    /// Source span.
    pub span: Span,
}

impl TableSchemaClause {
    /// The column definitions, skipping indexes, projections and constraints.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.elements.iter().filter_map(|element| match element {
            TableElement::Column(column) => Some(column),
            _ => None,
        })
    }
}

impl Node for TableSchemaClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        if !self.elements.is_empty() {
            f.write_char('(');
            f.indent();
            f.new_line();
            f.write_broken(&self.elements);
            f.dedent();
            f.new_line();
            f.write_char(')');
        } else if let Some(alias_table) = &self.alias_table {
            f.write_str("AS ");
            f.write_node(alias_table);
        } else if let Some(table_function) = &self.table_function {
            f.write_str("AS ");
            f.write_node(table_function);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.elements, &mut *scope)?;
        visitor::accept_opt(self.alias_table.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.table_function.as_ref(), &mut *scope)?;
        scope.visit_table_schema_clause(self)
    }
}

/// `INDEX name expr TYPE type [GRANULARITY n]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableIndex {
    /// Index name.
    pub name: Ident,
    /// Indexed expression.
    pub column_expr: ColumnExpr,
    /// Index type after `TYPE`.
    pub index_type: ColumnType,
    /// `GRANULARITY` value.
    pub granularity: Option<NumberLiteral>,
    /// Source span.
    pub span: Span,
}

impl TableIndex {
    /// Writes everything after the `INDEX` keyword.
    pub(crate) fn write_definition(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_char(' ');
        f.write_node(&self.column_expr);
        f.write_str(" TYPE ");
        f.write_node(&self.index_type);
        if let Some(granularity) = &self.granularity {
            f.write_str(" GRANULARITY ");
            f.write_node(granularity);
        }
    }
}

impl Node for TableIndex {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("INDEX ");
        self.write_definition(f);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.column_expr.accept(&mut *scope)?;
        self.index_type.accept(&mut *scope)?;
        visitor::accept_opt(self.granularity.as_ref(), &mut *scope)?;
        scope.visit_table_index(self)
    }
}

/// `PROJECTION name (SELECT ...)`. Inside `ALTER TABLE ... ADD PROJECTION`
/// the keyword belongs to the alter clause and is not repeated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableProjection {
    /// Written with the `PROJECTION` keyword.
    pub include_keyword: bool,
    /// Projection name.
    pub name: Ident,
    /// Projection query.
    pub select: ProjectionSelectStmt,
    /// Source span.
    pub span: Span,
}

impl Node for TableProjection {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        if self.include_keyword {
            f.write_str("PROJECTION ");
        }
        f.write_node(&self.name);
        f.write_char(' ');
        f.write_node(&self.select);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.select.accept(&mut *scope)?;
        scope.visit_table_projection(self)
    }
}

/// `([WITH ...] SELECT items [GROUP BY ...] [ORDER BY items])`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProjectionSelectStmt {
    /// `WITH` clause.
    pub with: Option<WithClause>,
    /// Selected expressions.
    pub items: ColumnExprList,
    /// `GROUP BY` clause.
    pub group_by: Option<GroupByClause>,
    /// `ORDER BY` expressions.
    pub order_by: Option<ColumnExprList>,
    /// Source span.
    pub span: Span,
}

impl Node for ProjectionSelectStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_char('(');
        if let Some(with) = &self.with {
            f.write_node(with);
            f.write_char(' ');
        }
        f.write_str("SELECT ");
        f.write_node(&self.items);
        if let Some(group_by) = &self.group_by {
            f.write_char(' ');
            f.write_node(group_by);
        }
        if let Some(order_by) = &self.order_by {
            f.write_str(" ORDER BY ");
            f.write_node(order_by);
        }
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.with.as_ref(), &mut *scope)?;
        self.items.accept(&mut *scope)?;
        visitor::accept_opt(self.group_by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.order_by.as_ref(), &mut *scope)?;
        scope.visit_projection_select_stmt(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConstraintKind {
    Check,
    Assume,
}

impl ConstraintKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Check => "CHECK",
            Self::Assume => "ASSUME",
        }
    }
}

/// `CONSTRAINT name CHECK|ASSUME expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintClause {
    /// Constraint name.
    pub name: Ident,
    /// `CHECK` or `ASSUME`.
    pub kind: ConstraintKind,
    /// Constraint condition.
    pub expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for ConstraintClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CONSTRAINT ");
        f.write_node(&self.name);
        f.write_char(' ');
        f.write_str(self.kind.as_str());
        f.write_char(' ');
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.expr.accept(&mut *scope)?;
        scope.visit_constraint_clause(self)
    }
}

/// `WITH TIMEOUT [seconds]` on a live view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WithTimeoutClause {
    /// Timeout in seconds.
    pub seconds: Option<NumberLiteral>,
    /// Source span.
    pub span: Span,
}

impl Node for WithTimeoutClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("WITH TIMEOUT");
        if let Some(seconds) = &self.seconds {
            f.write_char(' ');
            f.write_node(seconds);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.seconds.as_ref(), &mut *scope)?;
        scope.visit_with_timeout_clause(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RefreshFrequency {
    Every,
    After,
}

impl RefreshFrequency {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Every => "EVERY",
            Self::After => "AFTER",
        }
    }
}

/// An interval written without the `INTERVAL` keyword: `1 HOUR`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RefreshInterval {
    /// Interval amount.
    pub value: Expr,
    /// Interval unit.
    pub unit: Ident,
}

/// `REFRESH EVERY|AFTER n UNIT [OFFSET n UNIT]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RefreshExpr {
    /// `EVERY` or `AFTER`.
    pub frequency: RefreshFrequency,
    /// Refresh interval.
    pub interval: RefreshInterval,
    /// Interval after `OFFSET`.
    pub offset: Option<RefreshInterval>,
    /// Source span.
    pub span: Span,
}

impl Node for RefreshExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("REFRESH ");
        f.write_str(self.frequency.as_str());
        f.write_char(' ');
        f.write_node(&self.interval.value);
        f.write_char(' ');
        f.write_node(&self.interval.unit);
        if let Some(offset) = &self.offset {
            f.write_str(" OFFSET ");
            f.write_node(&offset.value);
            f.write_char(' ');
            f.write_node(&offset.unit);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.interval.value.accept(&mut *scope)?;
        self.interval.unit.accept(&mut *scope)?;
        if let Some(offset) = &self.offset {
            offset.value.accept(&mut *scope)?;
            offset.unit.accept(&mut *scope)?;
        }
        scope.visit_refresh_expr(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{format_beautify, format_compact};

    fn ident(name: &str, start: usize) -> Ident {
        Ident::new(name, Span::new(start, start + name.len()))
    }

    #[test]
    fn test_partition_targets() {
        let all = PartitionClause {
            target: PartitionTarget::All,
            span: Span::new(0, 13),
        };
        assert_eq!(format_compact(&all), "PARTITION ALL");

        let id = PartitionClause {
            target: PartitionTarget::Id(StringLiteral {
                literal: "2024".to_string(),
                span: Span::new(13, 19),
            }),
            span: Span::new(0, 19),
        };
        assert_eq!(format_compact(&id), "PARTITION ID '2024'");
    }

    #[test]
    fn test_engine_clauses_break_in_beautify() {
        let engine = EngineExpr {
            name: ident("MergeTree", 9),
            params: None,
            order_by: None,
            partition_by: None,
            primary_key: Some(PrimaryKeyClause {
                expr: Expr::Ident(ident("id", 31)),
                span: Span::new(19, 33),
            }),
            sample_by: Some(SampleByClause {
                expr: Expr::Ident(ident("id", 44)),
                span: Span::new(34, 46),
            }),
            ttl: None,
            settings: None,
            span: Span::new(0, 46),
        };
        assert_eq!(
            format_compact(&engine),
            "ENGINE = MergeTree PRIMARY KEY id SAMPLE BY id"
        );
        assert_eq!(
            format_beautify(&engine, "  "),
            "ENGINE = MergeTree\nPRIMARY KEY id\nSAMPLE BY id"
        );
    }

    #[test]
    fn test_ttl_rules() {
        let rule = TtlPolicyRule {
            action: TtlAction::ToVolume(StringLiteral {
                literal: "cold".to_string(),
                span: Span::new(10, 16),
            }),
            span: Span::new(0, 16),
        };
        assert_eq!(format_compact(&rule), "TO VOLUME 'cold'");
    }
}
