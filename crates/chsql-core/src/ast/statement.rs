//! Top-level statements and the smaller administrative statements.

use std::fmt;

use super::{
    AlterRole, AlterTable, ColumnExprList, CreateDatabase, CreateDictionary, CreateFunction,
    CreateLiveView, CreateMaterializedView, CreateNamedCollection, CreateRole, CreateTable,
    CreateUser, CreateView, DeleteClause, DropUserOrRole, Expr, GrantPrivilegeStmt, Ident,
    InsertStmt, Node, OnClusterClause, PartitionClause, SelectQuery, SettingExpr, StringLiteral,
    TableIdentifier,
};
use crate::format::{format_compact, Formatter};
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

/// Any complete statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    /// `SELECT`
    Select(SelectQuery),
    /// `INSERT`
    Insert(InsertStmt),
    /// `DELETE FROM`
    Delete(DeleteClause),
    /// `CREATE DATABASE`
    CreateDatabase(CreateDatabase),
    /// `CREATE TABLE`
    CreateTable(CreateTable),
    /// `CREATE VIEW`
    CreateView(CreateView),
    /// `CREATE MATERIALIZED VIEW`
    CreateMaterializedView(CreateMaterializedView),
    /// `CREATE LIVE VIEW`
    CreateLiveView(CreateLiveView),
    /// `CREATE DICTIONARY`
    CreateDictionary(CreateDictionary),
    /// `CREATE FUNCTION`
    CreateFunction(CreateFunction),
    /// `CREATE NAMED COLLECTION`
    CreateNamedCollection(CreateNamedCollection),
    /// `CREATE ROLE`
    CreateRole(CreateRole),
    /// `CREATE USER`
    CreateUser(CreateUser),
    /// `ALTER TABLE`
    AlterTable(AlterTable),
    /// `ALTER ROLE`
    AlterRole(AlterRole),
    /// `GRANT`
    Grant(GrantPrivilegeStmt),
    /// `DROP USER|ROLE|QUOTA|...`
    DropUserOrRole(DropUserOrRole),
    /// `DROP DATABASE`
    DropDatabase(DropDatabase),
    /// `DROP TABLE|VIEW|DICTIONARY|FUNCTION`
    Drop(DropStmt),
    /// `RENAME`
    Rename(RenameStmt),
    /// `TRUNCATE`
    Truncate(TruncateTable),
    /// `OPTIMIZE TABLE`
    Optimize(OptimizeStmt),
    /// `SYSTEM`
    System(SystemStmt),
    /// `SHOW`
    Show(ShowStmt),
    /// `DESCRIBE`
    Describe(DescribeStmt),
    /// `EXPLAIN`
    Explain(ExplainStmt),
    /// `SET`
    Set(SetStmt),
    /// `USE`
    Use(UseStmt),
    /// `CHECK TABLE`
    Check(CheckStmt),
}

forward_node!(Statement {
    Select,
    Insert,
    Delete,
    CreateDatabase,
    CreateTable,
    CreateView,
    CreateMaterializedView,
    CreateLiveView,
    CreateDictionary,
    CreateFunction,
    CreateNamedCollection,
    CreateRole,
    CreateUser,
    AlterTable,
    AlterRole,
    Grant,
    DropUserOrRole,
    DropDatabase,
    Drop,
    Rename,
    Truncate,
    Optimize,
    System,
    Show,
    Describe,
    Explain,
    Set,
    Use,
    Check,
});

impl Statement {
    /// The statement kind, e.g. `"CreateTable"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "Select",
            Self::Insert(_) => "Insert",
            Self::Delete(_) => "Delete",
            Self::CreateDatabase(_) => "CreateDatabase",
            Self::CreateTable(_) => "CreateTable",
            Self::CreateView(_) => "CreateView",
            Self::CreateMaterializedView(_) => "CreateMaterializedView",
            Self::CreateLiveView(_) => "CreateLiveView",
            Self::CreateDictionary(_) => "CreateDictionary",
            Self::CreateFunction(_) => "CreateFunction",
            Self::CreateNamedCollection(_) => "CreateNamedCollection",
            Self::CreateRole(_) => "CreateRole",
            Self::CreateUser(_) => "CreateUser",
            Self::AlterTable(_) => "AlterTable",
            Self::AlterRole(_) => "AlterRole",
            Self::Grant(_) => "Grant",
            Self::DropUserOrRole(_) => "DropUserOrRole",
            Self::DropDatabase(_) => "DropDatabase",
            Self::Drop(_) => "Drop",
            Self::Rename(_) => "Rename",
            Self::Truncate(_) => "Truncate",
            Self::Optimize(_) => "Optimize",
            Self::System(_) => "System",
            Self::Show(_) => "Show",
            Self::Describe(_) => "Describe",
            Self::Explain(_) => "Explain",
            Self::Set(_) => "Set",
            Self::Use(_) => "Use",
            Self::Check(_) => "Check",
        }
    }

    /// The query when the statement is a `SELECT`.
    #[must_use]
    pub const fn as_select(&self) -> Option<&SelectQuery> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_compact(self))
    }
}

fn write_on_cluster(f: &mut Formatter, on_cluster: Option<&OnClusterClause>) {
    if let Some(on_cluster) = on_cluster {
        f.write_char(' ');
        f.write_node(on_cluster);
    }
}

/// `DROP DATABASE [IF EXISTS] name [ON CLUSTER c]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropDatabase {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Database name.
    pub name: Ident,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Source span.
    pub span: Span,
}

impl Node for DropDatabase {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP DATABASE ");
        if self.if_exists {
            f.write_str("IF EXISTS ");
        }
        f.write_node(&self.name);
        write_on_cluster(f, self.on_cluster.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        scope.visit_drop_database(self)
    }
}

/// The object kind a `DROP` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DropTarget {
    Table,
    View,
    Dictionary,
    Function,
}

impl DropTarget {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Dictionary => "DICTIONARY",
            Self::Function => "FUNCTION",
        }
    }
}

/// Trailing `SYNC` / `NO DELAY` of a `DROP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DropModifier {
    Sync,
    NoDelay,
}

impl DropModifier {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "SYNC",
            Self::NoDelay => "NO DELAY",
        }
    }
}

/// `DROP [TEMPORARY] TABLE|VIEW|DICTIONARY|FUNCTION [IF EXISTS] name [ON CLUSTER c] [SYNC]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropStmt {
    /// Kind of object being dropped.
    pub target: DropTarget,
    /// `TEMPORARY` was given.
    pub temporary: bool,
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Object name.
    pub name: TableIdentifier,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// `SYNC` or `NO DELAY`.
    pub modifier: Option<DropModifier>,
    /// Source span.
    pub span: Span,
}

impl Node for DropStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP ");
        if self.temporary {
            f.write_str("TEMPORARY ");
        }
        f.write_str(self.target.as_str());
        f.write_char(' ');
        if self.if_exists {
            f.write_str("IF EXISTS ");
        }
        f.write_node(&self.name);
        write_on_cluster(f, self.on_cluster.as_ref());
        if let Some(modifier) = self.modifier {
            f.write_char(' ');
            f.write_str(modifier.as_str());
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        scope.visit_drop_stmt(self)
    }
}

/// The object kind a `RENAME` moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RenameTarget {
    Table,
    Dictionary,
    Database,
}

impl RenameTarget {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Dictionary => "DICTIONARY",
            Self::Database => "DATABASE",
        }
    }
}

/// `RENAME TABLE a TO b, c TO d [ON CLUSTER x]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenameStmt {
    /// Kind of object being renamed.
    pub target: RenameTarget,
    /// `old TO new` pairs.
    pub pairs: Vec<TargetPair>,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Source span.
    pub span: Span,
}

impl Node for RenameStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("RENAME ");
        f.write_str(self.target.as_str());
        f.write_char(' ');
        f.write_separated(&self.pairs, ", ");
        write_on_cluster(f, self.on_cluster.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.pairs, &mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        scope.visit_rename_stmt(self)
    }
}

/// `old TO new`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TargetPair {
    /// Current name.
    pub old: TableIdentifier,
    /// Name after `TO`.
    pub new: TableIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for TargetPair {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.old);
        f.write_str(" TO ");
        f.write_node(&self.new);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.old.accept(&mut *scope)?;
        self.new.accept(&mut *scope)?;
        scope.visit_target_pair(self)
    }
}

/// `TRUNCATE [TEMPORARY] TABLE [IF EXISTS] name [ON CLUSTER c]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TruncateTable {
    /// `TEMPORARY` was given.
    pub temporary: bool,
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Table name.
    pub name: TableIdentifier,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Source span.
    pub span: Span,
}

impl Node for TruncateTable {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("TRUNCATE ");
        if self.temporary {
            f.write_str("TEMPORARY ");
        }
        f.write_str("TABLE ");
        if self.if_exists {
            f.write_str("IF EXISTS ");
        }
        f.write_node(&self.name);
        write_on_cluster(f, self.on_cluster.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        scope.visit_truncate_table(self)
    }
}

/// `OPTIMIZE TABLE t [ON CLUSTER c] [PARTITION p] [FINAL] [DEDUPLICATE ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptimizeStmt {
    /// Table to optimize.
    pub table: TableIdentifier,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// `PARTITION` clause.
    pub partition: Option<PartitionClause>,
    /// `FINAL` was given.
    pub has_final: bool,
    /// `DEDUPLICATE` clause.
    pub deduplicate: Option<DeduplicateClause>,
    /// Source span.
    pub span: Span,
}

impl Node for OptimizeStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("OPTIMIZE TABLE ");
        f.write_node(&self.table);
        write_on_cluster(f, self.on_cluster.as_ref());
        if let Some(partition) = &self.partition {
            f.write_char(' ');
            f.write_node(partition);
        }
        if self.has_final {
            f.write_str(" FINAL");
        }
        if let Some(deduplicate) = &self.deduplicate {
            f.write_char(' ');
            f.write_node(deduplicate);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.deduplicate.as_ref(), &mut *scope)?;
        scope.visit_optimize_stmt(self)
    }
}

/// `DEDUPLICATE [BY cols] [EXCEPT cols]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeduplicateClause {
    /// Columns after `BY`.
    pub by: Option<ColumnExprList>,
    /// Columns after `EXCEPT`.
    pub except: Option<ColumnExprList>,
    /// Source span.
    pub span: Span,
}

impl Node for DeduplicateClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DEDUPLICATE");
        if let Some(by) = &self.by {
            f.write_str(" BY ");
            f.write_node(by);
        }
        if let Some(except) = &self.except {
            f.write_str(" EXCEPT ");
            f.write_node(except);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.by.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.except.as_ref(), &mut *scope)?;
        scope.visit_deduplicate_clause(self)
    }
}

/// `SYSTEM command`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemStmt {
    /// The `SYSTEM` command.
    pub command: SystemCommand,
    /// Source span.
    pub span: Span,
}

impl Node for SystemStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SYSTEM ");
        f.write_node(&self.command);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.command.accept(&mut *scope)?;
        scope.visit_system_stmt(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SystemCommand {
    /// `FLUSH LOGS` or `FLUSH DISTRIBUTED t`
    Flush(SystemFlushExpr),
    /// `RELOAD ...`
    Reload(SystemReloadExpr),
    /// `SYNC REPLICA t`
    Sync(SystemSyncExpr),
    /// `START|STOP ...`
    Ctrl(SystemCtrlExpr),
    /// `DROP ... CACHE`
    Drop(SystemDropExpr),
}

forward_node!(SystemCommand {
    Flush,
    Reload,
    Sync,
    Ctrl,
    Drop,
});

/// `FLUSH LOGS` or `FLUSH DISTRIBUTED t`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemFlushExpr {
    /// `None` flushes the logs.
    pub distributed: Option<TableIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for SystemFlushExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        match &self.distributed {
            Some(table) => {
                f.write_str("FLUSH DISTRIBUTED ");
                f.write_node(table);
            }
            None => f.write_str("FLUSH LOGS"),
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.distributed.as_ref(), &mut *scope)?;
        scope.visit_system_flush_expr(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SystemReloadKind {
    Dictionaries,
    Dictionary,
    EmbeddedDictionaries,
    Config,
    Functions,
}

impl SystemReloadKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dictionaries => "DICTIONARIES",
            Self::Dictionary => "DICTIONARY",
            Self::EmbeddedDictionaries => "EMBEDDED DICTIONARIES",
            Self::Config => "CONFIG",
            Self::Functions => "FUNCTIONS",
        }
    }
}

/// `RELOAD kind [dictionary]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemReloadExpr {
    /// What is reloaded.
    pub kind: SystemReloadKind,
    /// Set only for `RELOAD DICTIONARY name`.
    pub dictionary: Option<TableIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for SystemReloadExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("RELOAD ");
        f.write_str(self.kind.as_str());
        if let Some(dictionary) = &self.dictionary {
            f.write_char(' ');
            f.write_node(dictionary);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.dictionary.as_ref(), &mut *scope)?;
        scope.visit_system_reload_expr(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SyncReplicaMode {
    Strict,
    Lightweight,
    Pull,
}

impl SyncReplicaMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "STRICT",
            Self::Lightweight => "LIGHTWEIGHT",
            Self::Pull => "PULL",
        }
    }
}

/// `SYNC REPLICA t [STRICT|LIGHTWEIGHT|PULL]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemSyncExpr {
    /// Replicated table.
    pub table: TableIdentifier,
    /// `STRICT`, `LIGHTWEIGHT` or `PULL`.
    pub mode: Option<SyncReplicaMode>,
    /// Source span.
    pub span: Span,
}

impl Node for SystemSyncExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SYNC REPLICA ");
        f.write_node(&self.table);
        if let Some(mode) = self.mode {
            f.write_char(' ');
            f.write_str(mode.as_str());
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        scope.visit_system_sync_expr(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SystemCtrlCommand {
    Start,
    Stop,
}

impl SystemCtrlCommand {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Stop => "STOP",
        }
    }
}

/// The background activity a `START`/`STOP` toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SystemCtrlKind {
    Merges,
    TtlMerges,
    Moves,
    Fetches,
    Sends,
    DistributedSends,
    ReplicatedSends,
    ReplicationQueues,
}

impl SystemCtrlKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merges => "MERGES",
            Self::TtlMerges => "TTL MERGES",
            Self::Moves => "MOVES",
            Self::Fetches => "FETCHES",
            Self::Sends => "SENDS",
            Self::DistributedSends => "DISTRIBUTED SENDS",
            Self::ReplicatedSends => "REPLICATED SENDS",
            Self::ReplicationQueues => "REPLICATION QUEUES",
        }
    }
}

/// `START|STOP kind [table]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemCtrlExpr {
    /// `START` or `STOP`.
    pub command: SystemCtrlCommand,
    /// Background activity being controlled.
    pub kind: SystemCtrlKind,
    /// Table the command is limited to.
    pub table: Option<TableIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for SystemCtrlExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str(self.command.as_str());
        f.write_char(' ');
        f.write_str(self.kind.as_str());
        if let Some(table) = &self.table {
            f.write_char(' ');
            f.write_node(table);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.table.as_ref(), &mut *scope)?;
        scope.visit_system_ctrl_expr(self)
    }
}

/// The cache a `SYSTEM DROP` clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SystemDropKind {
    DnsCache,
    MarkCache,
    UncompressedCache,
    CompiledExpressionCache,
    QueryCache,
    FilesystemCache,
}

impl SystemDropKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DnsCache => "DNS CACHE",
            Self::MarkCache => "MARK CACHE",
            Self::UncompressedCache => "UNCOMPRESSED CACHE",
            Self::CompiledExpressionCache => "COMPILED EXPRESSION CACHE",
            Self::QueryCache => "QUERY CACHE",
            Self::FilesystemCache => "FILESYSTEM CACHE",
        }
    }
}

/// `SYSTEM DROP ... CACHE`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SystemDropExpr {
    /// Cache being dropped.
    pub kind: SystemDropKind,
    /// Source span.
    pub span: Span,
}

impl Node for SystemDropExpr {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP ");
        f.write_str(self.kind.as_str());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_system_drop_expr(self)
    }
}

/// What a `SHOW` lists or prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ShowKind {
    /// `SHOW CREATE [TEMPORARY] TABLE`
    CreateTable,
    /// `SHOW CREATE VIEW`
    CreateView,
    /// `SHOW CREATE DICTIONARY`
    CreateDictionary,
    /// `SHOW CREATE DATABASE`
    CreateDatabase,
    /// `SHOW DATABASES`
    Databases,
    /// `SHOW TABLES`
    Tables,
    /// `SHOW DICTIONARIES`
    Dictionaries,
}

impl ShowKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTable => "CREATE TABLE",
            Self::CreateView => "CREATE VIEW",
            Self::CreateDictionary => "CREATE DICTIONARY",
            Self::CreateDatabase => "CREATE DATABASE",
            Self::Databases => "DATABASES",
            Self::Tables => "TABLES",
            Self::Dictionaries => "DICTIONARIES",
        }
    }

    /// Returns true for the `SHOW CREATE ...` forms, which name one object.
    #[must_use]
    pub const fn is_create(self) -> bool {
        matches!(
            self,
            Self::CreateTable | Self::CreateView | Self::CreateDictionary | Self::CreateDatabase
        )
    }
}

/// `[NOT] LIKE|ILIKE 'pattern'` filter of a listing `SHOW`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShowPattern {
    /// Written with `NOT`.
    pub negated: bool,
    /// `ILIKE` rather than `LIKE`.
    pub case_insensitive: bool,
    /// Pattern to match.
    pub pattern: Expr,
}

/// `SHOW kind [target] [FROM db] [[NOT] LIKE p] [LIMIT n] [INTO OUTFILE 'f'] [FORMAT f]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShowStmt {
    /// What is shown.
    pub kind: ShowKind,
    /// Object for `SHOW CREATE`.
    pub target: Option<TableIdentifier>,
    /// Database after `FROM`.
    pub from: Option<Ident>,
    /// `[NOT] LIKE` filter.
    pub like: Option<ShowPattern>,
    /// `LIMIT` value.
    pub limit: Option<Expr>,
    /// File after `INTO OUTFILE`.
    pub out_file: Option<StringLiteral>,
    /// `FORMAT` name.
    pub format: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for ShowStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SHOW ");
        f.write_str(self.kind.as_str());
        if let Some(target) = &self.target {
            f.write_char(' ');
            f.write_node(target);
        }
        if let Some(from) = &self.from {
            f.write_str(" FROM ");
            f.write_node(from);
        }
        if let Some(like) = &self.like {
            f.write_char(' ');
            if like.negated {
                f.write_str("NOT ");
            }
            f.write_str(if like.case_insensitive { "ILIKE " } else { "LIKE " });
            f.write_node(&like.pattern);
        }
        if let Some(limit) = &self.limit {
            f.write_str(" LIMIT ");
            f.write_node(limit);
        }
        if let Some(out_file) = &self.out_file {
            f.write_str(" INTO OUTFILE ");
            f.write_node(out_file);
        }
        if let Some(format) = &self.format {
            f.write_str(" FORMAT ");
            f.write_node(format);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.target.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.from.as_ref(), &mut *scope)?;
        if let Some(like) = &self.like {
            like.pattern.accept(&mut *scope)?;
        }
        visitor::accept_opt(self.limit.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.out_file.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.format.as_ref(), &mut *scope)?;
        scope.visit_show_stmt(self)
    }
}

/// `DESCRIBE [TABLE] target`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DescribeStmt {
    /// Written with `TABLE`.
    pub has_table_keyword: bool,
    /// Table being described.
    pub target: TableIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for DescribeStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DESCRIBE ");
        if self.has_table_keyword {
            f.write_str("TABLE ");
        }
        f.write_node(&self.target);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.target.accept(&mut *scope)?;
        scope.visit_describe_stmt(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExplainKind {
    Ast,
    Syntax,
    QueryTree,
    Plan,
    Pipeline,
    Estimate,
    TableOverride,
}

impl ExplainKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ast => "AST",
            Self::Syntax => "SYNTAX",
            Self::QueryTree => "QUERY TREE",
            Self::Plan => "PLAN",
            Self::Pipeline => "PIPELINE",
            Self::Estimate => "ESTIMATE",
            Self::TableOverride => "TABLE OVERRIDE",
        }
    }
}

/// `EXPLAIN [kind] statement`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExplainStmt {
    /// `AST`, `SYNTAX`, `PLAN`, ... variant.
    pub kind: Option<ExplainKind>,
    /// Explained statement.
    pub statement: Box<Statement>,
    /// Source span.
    pub span: Span,
}

impl Node for ExplainStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("EXPLAIN");
        if let Some(kind) = self.kind {
            f.write_char(' ');
            f.write_str(kind.as_str());
        }
        f.line_break();
        f.write_node(&self.statement);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.statement.accept(&mut *scope)?;
        scope.visit_explain_stmt(self)
    }
}

/// `SET name = value, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetStmt {
    /// Settings being assigned.
    pub settings: Vec<SettingExpr>,
    /// Source span.
    pub span: Span,
}

impl Node for SetStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("SET ");
        f.write_separated(&self.settings, ", ");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.settings, &mut *scope)?;
        scope.visit_set_stmt(self)
    }
}

/// `USE database`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UseStmt {
    /// Database to switch to.
    pub database: Ident,
    /// Source span.
    pub span: Span,
}

impl Node for UseStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("USE ");
        f.write_node(&self.database);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.database.accept(&mut *scope)?;
        scope.visit_use_stmt(self)
    }
}

/// `CHECK TABLE t [PARTITION p]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckStmt {
    /// Table to check.
    pub table: TableIdentifier,
    /// `PARTITION` clause.
    pub partition: Option<PartitionClause>,
    /// Source span.
    pub span: Span,
}

impl Node for CheckStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CHECK TABLE ");
        f.write_node(&self.table);
        if let Some(partition) = &self.partition {
            f.write_char(' ');
            f.write_node(partition);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        scope.visit_check_stmt(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_beautify;

    fn table(name: &str, start: usize) -> TableIdentifier {
        let span = Span::new(start, start + name.len());
        TableIdentifier {
            database: None,
            table: Ident::new(name, span),
            span,
        }
    }

    #[test]
    fn test_drop_renders_modifiers_in_order() {
        let drop = DropStmt {
            target: DropTarget::Table,
            temporary: true,
            if_exists: true,
            name: table("t", 31),
            on_cluster: None,
            modifier: Some(DropModifier::Sync),
            span: Span::new(0, 37),
        };
        assert_eq!(format_compact(&drop), "DROP TEMPORARY TABLE IF EXISTS t SYNC");
    }

    #[test]
    fn test_system_commands() {
        let stop = SystemStmt {
            command: SystemCommand::Ctrl(SystemCtrlExpr {
                command: SystemCtrlCommand::Stop,
                kind: SystemCtrlKind::TtlMerges,
                table: Some(table("t", 23)),
                span: Span::new(7, 24),
            }),
            span: Span::new(0, 24),
        };
        assert_eq!(format_compact(&stop), "SYSTEM STOP TTL MERGES t");

        let flush = SystemStmt {
            command: SystemCommand::Flush(SystemFlushExpr {
                distributed: None,
                span: Span::new(7, 17),
            }),
            span: Span::new(0, 17),
        };
        assert_eq!(format_compact(&flush), "SYSTEM FLUSH LOGS");
    }

    #[test]
    fn test_explain_breaks_before_statement() {
        let explain = ExplainStmt {
            kind: Some(ExplainKind::Ast),
            statement: Box::new(Statement::Use(UseStmt {
                database: Ident::new("db", Span::new(16, 18)),
                span: Span::new(12, 18),
            })),
            span: Span::new(0, 18),
        };
        assert_eq!(explain.statement.to_string(), "USE db");
        assert_eq!(format_compact(&explain), "EXPLAIN AST USE db");
        assert_eq!(format_beautify(&explain, "  "), "EXPLAIN AST\nUSE db");
    }

    #[test]
    fn test_statement_kind() {
        let statement = Statement::Use(UseStmt {
            database: Ident::new("db", Span::new(4, 6)),
            span: Span::new(0, 6),
        });
        assert_eq!(statement.kind(), "Use");
        assert!(statement.as_select().is_none());
    }
}
