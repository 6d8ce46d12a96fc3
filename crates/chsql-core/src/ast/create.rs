//! `CREATE` statements for tables, views, dictionaries, functions and named
//! collections.

use super::{
    ColumnType, DestinationClause, EngineExpr, Expr, Ident, Node, NumberLiteral, OnClusterClause,
    ParamExprList, PrimaryKeyClause, RefreshExpr, RefreshInterval, SettingsClause, StringLiteral,
    SubQuery, TableIdentifier, TableSchemaClause, Uuid, WithTimeoutClause,
};
use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

fn write_if_not_exists(f: &mut Formatter, if_not_exists: bool) {
    if if_not_exists {
        f.write_str("IF NOT EXISTS ");
    }
}

fn write_spaced<N: Node>(f: &mut Formatter, node: Option<&N>) {
    if let Some(node) = node {
        f.write_char(' ');
        f.write_node(node);
    }
}

fn write_broken<N: Node>(f: &mut Formatter, node: Option<&N>) {
    if let Some(node) = node {
        f.line_break();
        f.write_node(node);
    }
}

fn write_comment(f: &mut Formatter, comment: Option<&StringLiteral>) {
    if let Some(comment) = comment {
        f.line_break();
        f.write_str("COMMENT ");
        f.write_node(comment);
    }
}

/// `CREATE DATABASE [IF NOT EXISTS] name [ON CLUSTER c] [ENGINE = ...]
/// [COMMENT '...']`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateDatabase {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Database name.
    pub name: Ident,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// `ENGINE = ...`.
    pub engine: Option<EngineExpr>,
    /// `COMMENT` text.
    pub comment: Option<StringLiteral>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateDatabase {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE DATABASE ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_spaced(f, self.on_cluster.as_ref());
        write_broken(f, self.engine.as_ref());
        write_comment(f, self.comment.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.engine.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.comment.as_ref(), &mut *scope)?;
        scope.visit_create_database(self)
    }
}

/// `CREATE [OR REPLACE] [TEMPORARY] TABLE [IF NOT EXISTS] name ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTable {
    /// `OR REPLACE` was given.
    pub or_replace: bool,
    /// `TEMPORARY` was given.
    pub temporary: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Table name.
    pub name: TableIdentifier,
    /// `UUID` of the object.
    pub uuid: Option<Uuid>,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Column list or `AS` source.
    pub table_schema: Option<TableSchemaClause>,
    /// `ENGINE` and its sub-clauses.
    pub engine: Option<EngineExpr>,
    /// `AS SELECT ...` query.
    pub subquery: Option<SubQuery>,
    /// `COMMENT` text.
    pub comment: Option<StringLiteral>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateTable {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE");
        if self.or_replace {
            f.write_str(" OR REPLACE");
        }
        if self.temporary {
            f.write_str(" TEMPORARY");
        }
        f.write_str(" TABLE ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_spaced(f, self.uuid.as_ref());
        write_spaced(f, self.on_cluster.as_ref());
        write_broken(f, self.table_schema.as_ref());
        write_broken(f, self.engine.as_ref());
        if let Some(subquery) = &self.subquery {
            f.line_break();
            f.write_str("AS ");
            f.write_node(subquery);
        }
        write_comment(f, self.comment.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.uuid.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.table_schema.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.engine.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.subquery.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.comment.as_ref(), &mut *scope)?;
        scope.visit_create_table(self)
    }
}

/// `CREATE [OR REPLACE] VIEW [IF NOT EXISTS] name [(columns)] AS SELECT ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateView {
    /// `OR REPLACE` was given.
    pub or_replace: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// View name.
    pub name: TableIdentifier,
    /// `UUID` of the object.
    pub uuid: Option<Uuid>,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Explicit column list.
    pub table_schema: Option<TableSchemaClause>,
    /// View query.
    pub subquery: Option<SubQuery>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateView {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE");
        if self.or_replace {
            f.write_str(" OR REPLACE");
        }
        f.write_str(" VIEW ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_spaced(f, self.uuid.as_ref());
        write_spaced(f, self.on_cluster.as_ref());
        write_spaced(f, self.table_schema.as_ref());
        if let Some(subquery) = &self.subquery {
            f.write_str(" AS ");
            f.write_node(subquery);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.uuid.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.table_schema.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.subquery.as_ref(), &mut *scope)?;
        scope.visit_create_view(self)
    }
}

/// `SQL SECURITY DEFINER|INVOKER|NONE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SqlSecurity {
    Definer,
    Invoker,
    None,
}

impl SqlSecurity {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Definer => "DEFINER",
            Self::Invoker => "INVOKER",
            Self::None => "NONE",
        }
    }
}

/// `CREATE MATERIALIZED VIEW`, including refreshable views.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateMaterializedView {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// View name.
    pub name: TableIdentifier,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// `REFRESH EVERY|AFTER ...`.
    pub refresh: Option<RefreshExpr>,
    /// `RANDOMIZE FOR` interval.
    pub randomize_for: Option<RefreshInterval>,
    /// Tables after `DEPENDS ON`.
    pub depends_on: Vec<TableIdentifier>,
    /// Refresh `SETTINGS`.
    pub settings: Option<SettingsClause>,
    /// `APPEND` was given.
    pub has_append: bool,
    /// Engine of the inner table.
    pub engine: Option<EngineExpr>,
    /// Target table after `TO`.
    pub destination: Option<DestinationClause>,
    /// Column list of the target.
    pub destination_schema: Option<TableSchemaClause>,
    /// `EMPTY` was given.
    pub has_empty: bool,
    /// User after `DEFINER =`.
    pub definer: Option<Ident>,
    /// `SQL SECURITY` mode.
    pub sql_security: Option<SqlSecurity>,
    /// `POPULATE` was given.
    pub populate: bool,
    /// View query.
    pub subquery: Option<SubQuery>,
    /// `COMMENT` text.
    pub comment: Option<StringLiteral>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateMaterializedView {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE MATERIALIZED VIEW ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_broken(f, self.on_cluster.as_ref());
        write_broken(f, self.refresh.as_ref());
        if let Some(randomize_for) = &self.randomize_for {
            f.line_break();
            f.write_str("RANDOMIZE FOR ");
            f.write_node(&randomize_for.value);
            f.write_char(' ');
            f.write_node(&randomize_for.unit);
        }
        if !self.depends_on.is_empty() {
            f.line_break();
            f.write_str("DEPENDS ON ");
            f.write_separated(&self.depends_on, ", ");
        }
        write_broken(f, self.settings.as_ref());
        if self.has_append {
            f.line_break();
            f.write_str("APPEND");
        }
        write_broken(f, self.engine.as_ref());
        write_broken(f, self.destination.as_ref());
        write_broken(f, self.destination_schema.as_ref());
        if self.has_empty {
            f.line_break();
            f.write_str("EMPTY");
        }
        if let Some(definer) = &self.definer {
            f.line_break();
            f.write_str("DEFINER = ");
            f.write_node(definer);
        }
        if let Some(sql_security) = self.sql_security {
            f.line_break();
            f.write_str("SQL SECURITY ");
            f.write_str(sql_security.as_str());
        }
        if self.populate {
            f.line_break();
            f.write_str("POPULATE");
        }
        if let Some(subquery) = &self.subquery {
            f.line_break();
            f.write_str("AS");
            f.indent();
            f.line_break();
            f.write_node(subquery);
            f.dedent();
        }
        write_comment(f, self.comment.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.refresh.as_ref(), &mut *scope)?;
        if let Some(randomize_for) = &self.randomize_for {
            randomize_for.value.accept(&mut *scope)?;
            randomize_for.unit.accept(&mut *scope)?;
        }
        accept_all(&self.depends_on, &mut *scope)?;
        visitor::accept_opt(self.settings.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.engine.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.destination.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.destination_schema.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.definer.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.subquery.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.comment.as_ref(), &mut *scope)?;
        scope.visit_create_materialized_view(self)
    }
}

/// `CREATE LIVE VIEW [IF NOT EXISTS] name [WITH TIMEOUT n] [TO t] AS SELECT ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateLiveView {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// View name.
    pub name: TableIdentifier,
    /// `UUID` of the object.
    pub uuid: Option<Uuid>,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// `WITH TIMEOUT` clause.
    pub with_timeout: Option<WithTimeoutClause>,
    /// Target table after `TO`.
    pub destination: Option<DestinationClause>,
    /// Explicit column list.
    pub table_schema: Option<TableSchemaClause>,
    /// View query.
    pub subquery: Option<SubQuery>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateLiveView {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE LIVE VIEW ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_spaced(f, self.uuid.as_ref());
        write_spaced(f, self.on_cluster.as_ref());
        write_spaced(f, self.with_timeout.as_ref());
        write_spaced(f, self.destination.as_ref());
        write_spaced(f, self.table_schema.as_ref());
        if let Some(subquery) = &self.subquery {
            f.write_str(" AS ");
            f.write_node(subquery);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.uuid.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.with_timeout.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.destination.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.table_schema.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.subquery.as_ref(), &mut *scope)?;
        scope.visit_create_live_view(self)
    }
}

/// `CREATE [OR REPLACE] DICTIONARY [IF NOT EXISTS] name (attributes) engine`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateDictionary {
    /// `OR REPLACE` was given.
    pub or_replace: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Dictionary name.
    pub name: TableIdentifier,
    /// `UUID` of the object.
    pub uuid: Option<Uuid>,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Attribute definitions in source order.
    pub attributes: Vec<DictionaryAttribute>,
    /// `PRIMARY KEY`, `SOURCE`, `LIFETIME`, `LAYOUT`, `RANGE` and `SETTINGS`.
    pub engine: Option<DictionaryEngineClause>,
    /// `COMMENT` text.
    pub comment: Option<StringLiteral>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateDictionary {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE ");
        if self.or_replace {
            f.write_str("OR REPLACE ");
        }
        f.write_str("DICTIONARY ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_broken(f, self.uuid.as_ref());
        write_broken(f, self.on_cluster.as_ref());
        if !self.attributes.is_empty() {
            f.line_break();
            f.write_char('(');
            f.indent();
            f.new_line();
            f.write_broken(&self.attributes);
            f.dedent();
            f.new_line();
            f.write_char(')');
        }
        write_broken(f, self.engine.as_ref());
        write_comment(f, self.comment.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.uuid.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        accept_all(&self.attributes, &mut *scope)?;
        visitor::accept_opt(self.engine.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.comment.as_ref(), &mut *scope)?;
        scope.visit_create_dictionary(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DictionaryAttributeFlag {
    Hierarchical,
    Injective,
    IsObjectId,
}

impl DictionaryAttributeFlag {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hierarchical => "HIERARCHICAL",
            Self::Injective => "INJECTIVE",
            Self::IsObjectId => "IS_OBJECT_ID",
        }
    }
}

/// `name Type [DEFAULT v] [EXPRESSION e] [HIERARCHICAL] [INJECTIVE] [IS_OBJECT_ID]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DictionaryAttribute {
    /// Attribute name.
    pub name: Ident,
    /// Attribute type.
    pub attribute_type: ColumnType,
    /// `DEFAULT` value.
    pub default: Option<Expr>,
    /// `EXPRESSION` value.
    pub expression: Option<Expr>,
    /// `HIERARCHICAL`, `INJECTIVE` and `IS_OBJECT_ID` flags.
    pub flags: Vec<DictionaryAttributeFlag>,
    /// Source span.
    pub span: Span,
}

impl Node for DictionaryAttribute {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_char(' ');
        f.write_node(&self.attribute_type);
        if let Some(default) = &self.default {
            f.write_str(" DEFAULT ");
            f.write_node(default);
        }
        if let Some(expression) = &self.expression {
            f.write_str(" EXPRESSION ");
            f.write_node(expression);
        }
        for flag in &self.flags {
            f.write_char(' ');
            f.write_str(flag.as_str());
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.attribute_type.accept(&mut *scope)?;
        visitor::accept_opt(self.default.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.expression.as_ref(), &mut *scope)?;
        scope.visit_dictionary_attribute(self)
    }
}

fn write_engine_part<N: Node>(f: &mut Formatter, started: &mut bool, part: Option<&N>) {
    if let Some(part) = part {
        if *started {
            f.line_break();
        }
        f.write_node(part);
        *started = true;
    }
}

/// The clauses after a dictionary's attribute list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DictionaryEngineClause {
    /// `PRIMARY KEY` columns.
    pub primary_key: Option<PrimaryKeyClause>,
    /// `SOURCE(...)`.
    pub source: Option<DictionarySourceClause>,
    /// `LIFETIME(...)`.
    pub lifetime: Option<DictionaryLifetimeClause>,
    /// `LAYOUT(...)`.
    pub layout: Option<DictionaryLayoutClause>,
    /// `RANGE(MIN a MAX b)`.
    pub range: Option<DictionaryRangeClause>,
    /// `SETTINGS(...)`.
    pub settings: Option<SettingsClause>,
    /// Source span.
    pub span: Span,
}

impl Node for DictionaryEngineClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        let mut started = false;
        write_engine_part(f, &mut started, self.primary_key.as_ref());
        write_engine_part(f, &mut started, self.source.as_ref());
        write_engine_part(f, &mut started, self.lifetime.as_ref());
        write_engine_part(f, &mut started, self.layout.as_ref());
        write_engine_part(f, &mut started, self.range.as_ref());
        if let Some(settings) = &self.settings {
            if started {
                f.line_break();
            }
            f.write_str("SETTINGS(");
            f.write_separated(&settings.items, ", ");
            f.write_char(')');
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.primary_key.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.source.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.lifetime.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.layout.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.range.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.settings.as_ref(), &mut *scope)?;
        scope.visit_dictionary_engine_clause(self)
    }
}

/// `SOURCE(KIND(arg value ...))`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DictionarySourceClause {
    /// Source kind, e.g. `CLICKHOUSE`.
    pub source: Ident,
    /// `name value` arguments.
    pub args: Vec<DictionaryArgExpr>,
    /// Source span.
    pub span: Span,
}

impl Node for DictionarySourceClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SOURCE(");
        f.write_node(&self.source);
        f.write_char('(');
        f.write_separated(&self.args, " ");
        f.write_str("))");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.source.accept(&mut *scope)?;
        accept_all(&self.args, &mut *scope)?;
        scope.visit_dictionary_source_clause(self)
    }
}

/// A `name value` pair inside `SOURCE(...)` or `LAYOUT(...)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DictionaryArgExpr {
    /// Argument name.
    pub name: Ident,
    /// Argument value.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for DictionaryArgExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_char(' ');
        f.write_node(&self.value);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.value.accept(&mut *scope)?;
        scope.visit_dictionary_arg_expr(self)
    }
}

/// Seconds between dictionary reloads.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DictionaryLifetime {
    /// `LIFETIME(n)`
    Fixed(NumberLiteral),
    /// `LIFETIME(MIN a MAX b)`
    Range { min: NumberLiteral, max: NumberLiteral },
}

/// `LIFETIME(...)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DictionaryLifetimeClause {
    /// Fixed value or `MIN`/`MAX` range.
    pub lifetime: DictionaryLifetime,
    /// Source span.
    pub span: Span,
}

impl Node for DictionaryLifetimeClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("LIFETIME(");
        match &self.lifetime {
            DictionaryLifetime::Fixed(value) => f.write_node(value),
            DictionaryLifetime::Range { min, max } => {
                f.write_str("MIN ");
                f.write_node(min);
                f.write_str(" MAX ");
                f.write_node(max);
            }
        }
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        match &self.lifetime {
            DictionaryLifetime::Fixed(value) => value.accept(&mut *scope)?,
            DictionaryLifetime::Range { min, max } => {
                min.accept(&mut *scope)?;
                max.accept(&mut *scope)?;
            }
        }
        scope.visit_dictionary_lifetime_clause(self)
    }
}

/// `LAYOUT(KIND(arg value ...))`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DictionaryLayoutClause {
    /// Layout kind, e.g. `HASHED`.
    pub layout: Ident,
    /// `name value` arguments.
    pub args: Vec<DictionaryArgExpr>,
    /// Source span.
    pub span: Span,
}

impl Node for DictionaryLayoutClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("LAYOUT(");
        f.write_node(&self.layout);
        f.write_char('(');
        f.write_separated(&self.args, " ");
        f.write_str("))");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.layout.accept(&mut *scope)?;
        accept_all(&self.args, &mut *scope)?;
        scope.visit_dictionary_layout_clause(self)
    }
}

/// `RANGE(MIN start_column MAX end_column)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DictionaryRangeClause {
    /// Column after `MIN`.
    pub min: Ident,
    /// Column after `MAX`.
    pub max: Ident,
    /// Source span.
    pub span: Span,
}

impl Node for DictionaryRangeClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("RANGE(MIN ");
        f.write_node(&self.min);
        f.write_str(" MAX ");
        f.write_node(&self.max);
        f.write_char(')');
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.min.accept(&mut *scope)?;
        self.max.accept(&mut *scope)?;
        scope.visit_dictionary_range_clause(self)
    }
}

/// `CREATE [OR REPLACE] FUNCTION name AS (params) -> body`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateFunction {
    /// `OR REPLACE` was given.
    pub or_replace: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Function name.
    pub name: Ident,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Lambda parameters.
    pub params: ParamExprList,
    /// Lambda body.
    pub body: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for CreateFunction {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE");
        if self.or_replace {
            f.write_str(" OR REPLACE");
        }
        f.write_str(" FUNCTION ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_spaced(f, self.on_cluster.as_ref());
        f.write_str(" AS ");
        f.write_node(&self.params);
        f.write_str(" -> ");
        f.write_node(&self.body);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        self.params.accept(&mut *scope)?;
        self.body.accept(&mut *scope)?;
        scope.visit_create_function(self)
    }
}

/// `CREATE NAMED COLLECTION [IF NOT EXISTS] name AS key = value, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateNamedCollection {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Collection name.
    pub name: Ident,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// `key = value` entries.
    pub params: Vec<NamedCollectionParam>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateNamedCollection {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE NAMED COLLECTION ");
        write_if_not_exists(f, self.if_not_exists);
        f.write_node(&self.name);
        write_spaced(f, self.on_cluster.as_ref());
        f.write_str(" AS ");
        f.write_separated(&self.params, ", ");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        accept_all(&self.params, &mut *scope)?;
        scope.visit_create_named_collection(self)
    }
}

/// `key = value [[NOT] OVERRIDABLE]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamedCollectionParam {
    /// Key.
    pub name: Ident,
    /// Value.
    pub value: Expr,
    /// `Some(true)` for `OVERRIDABLE`, `Some(false)` for `NOT OVERRIDABLE`.
    pub overridable: Option<bool>,
    /// Source span.
    pub span: Span,
}

impl Node for NamedCollectionParam {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        f.write_str(" = ");
        f.write_node(&self.value);
        match self.overridable {
            Some(true) => f.write_str(" OVERRIDABLE"),
            Some(false) => f.write_str(" NOT OVERRIDABLE"),
            None => {}
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        self.value.accept(&mut *scope)?;
        scope.visit_named_collection_param(self)
    }
}
