//! `ALTER TABLE` and its clauses.

use super::{
    ColumnDef, Expr, Ident, NestedIdentifier, Node, OnClusterClause, PartitionClause,
    PropertyType, SelectQuery, SettingExpr, SettingsClause, TableIdentifier, TableIndex,
    TableProjection, TtlClause,
};
use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

/// `ALTER TABLE name [ON CLUSTER c] clause, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTable {
    /// Table being altered.
    pub table: TableIdentifier,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Sub-clauses in source order.
    pub clauses: Vec<AlterTableClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTable {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ALTER TABLE ");
        f.write_node(&self.table);
        if let Some(on_cluster) = &self.on_cluster {
            f.line_break();
            f.write_node(on_cluster);
        }
        f.line_break();
        f.write_broken(&self.clauses);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.table.accept(&mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        accept_all(&self.clauses, &mut *scope)?;
        scope.visit_alter_table(self)
    }
}

/// One comma-separated action of an `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AlterTableClause {
    /// `ADD COLUMN`
    AddColumn(AlterTableAddColumn),
    /// `ADD INDEX`
    AddIndex(AlterTableAddIndex),
    /// `ADD PROJECTION`
    AddProjection(AlterTableAddProjection),
    /// `DROP COLUMN`
    DropColumn(AlterTableDropColumn),
    /// `DROP INDEX`
    DropIndex(AlterTableDropIndex),
    /// `DROP PROJECTION`
    DropProjection(AlterTableDropProjection),
    /// `DROP [DETACHED] PARTITION`
    DropPartition(AlterTableDropPartition),
    /// `CLEAR COLUMN`
    ClearColumn(AlterTableClearColumn),
    /// `CLEAR INDEX`
    ClearIndex(AlterTableClearIndex),
    /// `CLEAR PROJECTION`
    ClearProjection(AlterTableClearProjection),
    /// `MODIFY COLUMN`
    ModifyColumn(AlterTableModifyColumn),
    /// `MODIFY QUERY`
    ModifyQuery(AlterTableModifyQuery),
    /// `MODIFY SETTING`
    ModifySetting(AlterTableModifySetting),
    /// `MODIFY TTL`
    ModifyTtl(AlterTableModifyTtl),
    /// `RENAME COLUMN`
    RenameColumn(AlterTableRenameColumn),
    /// `RESET SETTING`
    ResetSetting(AlterTableResetSetting),
    /// `ATTACH PARTITION`
    AttachPartition(AlterTableAttachPartition),
    /// `DETACH PARTITION`
    DetachPartition(AlterTableDetachPartition),
    /// `REPLACE PARTITION`
    ReplacePartition(AlterTableReplacePartition),
    /// `FREEZE [PARTITION]`
    FreezePartition(AlterTableFreezePartition),
    /// `MATERIALIZE INDEX`
    MaterializeIndex(AlterTableMaterializeIndex),
    /// `MATERIALIZE PROJECTION`
    MaterializeProjection(AlterTableMaterializeProjection),
    /// `REMOVE TTL`
    RemoveTtl(AlterTableRemoveTtl),
    /// `DELETE WHERE`
    Delete(AlterTableDelete),
    /// `UPDATE ... WHERE`
    Update(AlterTableUpdate),
}

forward_node!(AlterTableClause {
    AddColumn,
    AddIndex,
    AddProjection,
    DropColumn,
    DropIndex,
    DropProjection,
    DropPartition,
    ClearColumn,
    ClearIndex,
    ClearProjection,
    ModifyColumn,
    ModifyQuery,
    ModifySetting,
    ModifyTtl,
    RenameColumn,
    ResetSetting,
    AttachPartition,
    DetachPartition,
    ReplacePartition,
    FreezePartition,
    MaterializeIndex,
    MaterializeProjection,
    RemoveTtl,
    Delete,
    Update,
});

impl AlterTableClause {
    /// The action's leading keywords, e.g. `"ADD COLUMN"`.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::AddColumn(_) => "ADD COLUMN",
            Self::AddIndex(_) => "ADD INDEX",
            Self::AddProjection(_) => "ADD PROJECTION",
            Self::DropColumn(_) => "DROP COLUMN",
            Self::DropIndex(_) => "DROP INDEX",
            Self::DropProjection(_) => "DROP PROJECTION",
            Self::DropPartition(_) => "DROP PARTITION",
            Self::ClearColumn(_) => "CLEAR COLUMN",
            Self::ClearIndex(_) => "CLEAR INDEX",
            Self::ClearProjection(_) => "CLEAR PROJECTION",
            Self::ModifyColumn(_) => "MODIFY COLUMN",
            Self::ModifyQuery(_) => "MODIFY QUERY",
            Self::ModifySetting(_) => "MODIFY SETTING",
            Self::ModifyTtl(_) => "MODIFY TTL",
            Self::RenameColumn(_) => "RENAME COLUMN",
            Self::ResetSetting(_) => "RESET SETTING",
            Self::AttachPartition(_) => "ATTACH PARTITION",
            Self::DetachPartition(_) => "DETACH PARTITION",
            Self::ReplacePartition(_) => "REPLACE PARTITION",
            Self::FreezePartition(_) => "FREEZE",
            Self::MaterializeIndex(_) => "MATERIALIZE INDEX",
            Self::MaterializeProjection(_) => "MATERIALIZE PROJECTION",
            Self::RemoveTtl(_) => "REMOVE TTL",
            Self::Delete(_) => "DELETE",
            Self::Update(_) => "UPDATE",
        }
    }
}

fn write_if_exists(f: &mut Formatter, if_exists: bool) {
    if if_exists {
        f.write_str("IF EXISTS ");
    }
}

fn write_in_partition(f: &mut Formatter, partition: Option<&PartitionClause>) {
    if let Some(partition) = partition {
        f.write_str(" IN ");
        f.write_node(partition);
    }
}

/// `ADD COLUMN [IF NOT EXISTS] def [FIRST | AFTER col]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableAddColumn {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// New column definition.
    pub column: ColumnDef,
    /// `FIRST` was given.
    pub first: bool,
    /// Column after `AFTER`.
    pub after: Option<NestedIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableAddColumn {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ADD COLUMN ");
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ");
        }
        f.write_node(&self.column);
        if self.first {
            f.write_str(" FIRST");
        } else if let Some(after) = &self.after {
            f.write_str(" AFTER ");
            f.write_node(after);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.column.accept(&mut *scope)?;
        visitor::accept_opt(self.after.as_ref(), &mut *scope)?;
        scope.visit_alter_table_add_column(self)
    }
}

/// `ADD INDEX [IF NOT EXISTS] name expr TYPE t [GRANULARITY n] [AFTER name]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableAddIndex {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// New index definition.
    pub index: TableIndex,
    /// Index after `AFTER`.
    pub after: Option<NestedIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableAddIndex {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ADD INDEX ");
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ");
        }
        self.index.write_definition(f);
        if let Some(after) = &self.after {
            f.write_str(" AFTER ");
            f.write_node(after);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.index.accept(&mut *scope)?;
        visitor::accept_opt(self.after.as_ref(), &mut *scope)?;
        scope.visit_alter_table_add_index(self)
    }
}

/// `ADD PROJECTION [IF NOT EXISTS] name (SELECT ...) [AFTER name]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableAddProjection {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// New projection definition.
    pub projection: TableProjection,
    /// Projection after `AFTER`.
    pub after: Option<NestedIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableAddProjection {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ADD PROJECTION ");
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ");
        }
        f.write_node(&self.projection);
        if let Some(after) = &self.after {
            f.write_str(" AFTER ");
            f.write_node(after);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.projection.accept(&mut *scope)?;
        visitor::accept_opt(self.after.as_ref(), &mut *scope)?;
        scope.visit_alter_table_add_projection(self)
    }
}

/// `DROP COLUMN [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableDropColumn {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Column to drop.
    pub column: NestedIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableDropColumn {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP COLUMN ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.column);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.column.accept(&mut *scope)?;
        scope.visit_alter_table_drop_column(self)
    }
}

/// `DROP INDEX [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableDropIndex {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Index to drop.
    pub index: NestedIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableDropIndex {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP INDEX ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.index);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.index.accept(&mut *scope)?;
        scope.visit_alter_table_drop_index(self)
    }
}

/// `DROP PROJECTION [IF EXISTS] name`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableDropProjection {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Projection to drop.
    pub projection: NestedIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableDropProjection {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP PROJECTION ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.projection);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.projection.accept(&mut *scope)?;
        scope.visit_alter_table_drop_projection(self)
    }
}

/// `DROP [DETACHED] PARTITION p [SETTINGS ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableDropPartition {
    /// `DROP DETACHED PARTITION`.
    pub detached: bool,
    /// Partition to drop.
    pub partition: PartitionClause,
    /// Trailing `SETTINGS`.
    pub settings: Option<SettingsClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableDropPartition {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP ");
        if self.detached {
            f.write_str("DETACHED ");
        }
        f.write_node(&self.partition);
        if let Some(settings) = &self.settings {
            f.line_break();
            f.write_node(settings);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.partition.accept(&mut *scope)?;
        visitor::accept_opt(self.settings.as_ref(), &mut *scope)?;
        scope.visit_alter_table_drop_partition(self)
    }
}

/// `CLEAR COLUMN [IF EXISTS] c [IN PARTITION p]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableClearColumn {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Column to clear.
    pub column: NestedIdentifier,
    /// Partition after `IN`.
    pub partition: Option<PartitionClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableClearColumn {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CLEAR COLUMN ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.column);
        write_in_partition(f, self.partition.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.column.accept(&mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        scope.visit_alter_table_clear_column(self)
    }
}

/// `CLEAR INDEX [IF EXISTS] name [IN partition]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableClearIndex {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Index to clear.
    pub index: NestedIdentifier,
    /// Partition after `IN`.
    pub partition: Option<PartitionClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableClearIndex {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CLEAR INDEX ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.index);
        write_in_partition(f, self.partition.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.index.accept(&mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        scope.visit_alter_table_clear_index(self)
    }
}

/// `CLEAR PROJECTION [IF EXISTS] name [IN partition]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableClearProjection {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Projection to clear.
    pub projection: NestedIdentifier,
    /// Partition after `IN`.
    pub partition: Option<PartitionClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableClearProjection {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CLEAR PROJECTION ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.projection);
        write_in_partition(f, self.partition.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.projection.accept(&mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        scope.visit_alter_table_clear_projection(self)
    }
}

/// `MODIFY COLUMN [IF EXISTS] def [REMOVE property]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableModifyColumn {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Replacement column definition.
    pub column: ColumnDef,
    /// `REMOVE property` form.
    pub remove: Option<RemovePropertyType>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableModifyColumn {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("MODIFY COLUMN ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.column);
        if let Some(remove) = &self.remove {
            f.write_char(' ');
            f.write_node(remove);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.column.accept(&mut *scope)?;
        visitor::accept_opt(self.remove.as_ref(), &mut *scope)?;
        scope.visit_alter_table_modify_column(self)
    }
}

/// `REMOVE DEFAULT|MATERIALIZED|ALIAS|CODEC|COMMENT|TTL`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RemovePropertyType {
    /// Property being removed.
    pub property: PropertyType,
    /// Source span.
    pub span: Span,
}

impl Node for RemovePropertyType {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("REMOVE ");
        f.write_node(&self.property);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.property.accept(&mut *scope)?;
        scope.visit_remove_property_type(self)
    }
}

/// `MODIFY QUERY SELECT ...` on a materialized view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableModifyQuery {
    /// New view query.
    pub select: Box<SelectQuery>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableModifyQuery {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("MODIFY QUERY ");
        f.write_node(&self.select);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.select.accept(&mut *scope)?;
        scope.visit_alter_table_modify_query(self)
    }
}

/// `MODIFY SETTING name = value, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableModifySetting {
    /// Settings being changed.
    pub settings: Vec<SettingExpr>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableModifySetting {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("MODIFY SETTING ");
        f.write_separated(&self.settings, ", ");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.settings, &mut *scope)?;
        scope.visit_alter_table_modify_setting(self)
    }
}

/// `MODIFY TTL ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableModifyTtl {
    /// New table TTL.
    pub ttl: TtlClause,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableModifyTtl {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("MODIFY ");
        f.write_node(&self.ttl);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.ttl.accept(&mut *scope)?;
        scope.visit_alter_table_modify_ttl(self)
    }
}

/// `RENAME COLUMN [IF EXISTS] old TO new`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableRenameColumn {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Current column name.
    pub old_name: NestedIdentifier,
    /// Name after `TO`.
    pub new_name: NestedIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableRenameColumn {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("RENAME COLUMN ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.old_name);
        f.write_str(" TO ");
        f.write_node(&self.new_name);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.old_name.accept(&mut *scope)?;
        self.new_name.accept(&mut *scope)?;
        scope.visit_alter_table_rename_column(self)
    }
}

/// `RESET SETTING name, ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableResetSetting {
    /// Settings reset to their defaults.
    pub settings: Vec<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableResetSetting {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("RESET SETTING ");
        f.write_separated(&self.settings, ", ");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.settings, &mut *scope)?;
        scope.visit_alter_table_reset_setting(self)
    }
}

/// `ATTACH PARTITION p [FROM table]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableAttachPartition {
    /// Partition to attach.
    pub partition: PartitionClause,
    /// Source table after `FROM`.
    pub from: Option<TableIdentifier>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableAttachPartition {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ATTACH ");
        f.write_node(&self.partition);
        if let Some(from) = &self.from {
            f.write_str(" FROM ");
            f.write_node(from);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.partition.accept(&mut *scope)?;
        visitor::accept_opt(self.from.as_ref(), &mut *scope)?;
        scope.visit_alter_table_attach_partition(self)
    }
}

/// `DETACH PARTITION ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableDetachPartition {
    /// Partition to detach.
    pub partition: PartitionClause,
    /// Trailing `SETTINGS`.
    pub settings: Option<SettingsClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableDetachPartition {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DETACH ");
        f.write_node(&self.partition);
        if let Some(settings) = &self.settings {
            f.line_break();
            f.write_node(settings);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.partition.accept(&mut *scope)?;
        visitor::accept_opt(self.settings.as_ref(), &mut *scope)?;
        scope.visit_alter_table_detach_partition(self)
    }
}

/// `REPLACE PARTITION p FROM table`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableReplacePartition {
    /// Partition to replace.
    pub partition: PartitionClause,
    /// Source table after `FROM`.
    pub from: TableIdentifier,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableReplacePartition {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("REPLACE ");
        f.write_node(&self.partition);
        f.write_str(" FROM ");
        f.write_node(&self.from);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.partition.accept(&mut *scope)?;
        self.from.accept(&mut *scope)?;
        scope.visit_alter_table_replace_partition(self)
    }
}

/// `FREEZE [PARTITION p]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableFreezePartition {
    /// Partition to freeze; the whole table when absent.
    pub partition: Option<PartitionClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableFreezePartition {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("FREEZE");
        if let Some(partition) = &self.partition {
            f.write_char(' ');
            f.write_node(partition);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        scope.visit_alter_table_freeze_partition(self)
    }
}

/// `MATERIALIZE INDEX [IF EXISTS] name [IN PARTITION p]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableMaterializeIndex {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Index to rebuild.
    pub index: NestedIdentifier,
    /// Partition after `IN`.
    pub partition: Option<PartitionClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableMaterializeIndex {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("MATERIALIZE INDEX ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.index);
        write_in_partition(f, self.partition.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.index.accept(&mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        scope.visit_alter_table_materialize_index(self)
    }
}

/// `MATERIALIZE PROJECTION [IF EXISTS] name [IN partition]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableMaterializeProjection {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Projection to rebuild.
    pub projection: NestedIdentifier,
    /// Partition after `IN`.
    pub partition: Option<PartitionClause>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableMaterializeProjection {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("MATERIALIZE PROJECTION ");
        write_if_exists(f, self.if_exists);
        f.write_node(&self.projection);
        write_in_partition(f, self.partition.as_ref());
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.projection.accept(&mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        scope.visit_alter_table_materialize_projection(self)
    }
}

/// `REMOVE TTL`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableRemoveTtl {
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableRemoveTtl {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("REMOVE TTL");
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        scope.visit_alter_table_remove_ttl(self)
    }
}

/// Mutation: `DELETE [IN PARTITION p] WHERE expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableDelete {
    /// Partition after `IN`.
    pub partition: Option<PartitionClause>,
    /// Rows to delete.
    pub where_expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableDelete {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DELETE");
        write_in_partition(f, self.partition.as_ref());
        f.write_str(" WHERE ");
        f.write_node(&self.where_expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        self.where_expr.accept(&mut *scope)?;
        scope.visit_alter_table_delete(self)
    }
}

/// Mutation: `UPDATE col = expr, ... [IN PARTITION p] WHERE expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableUpdate {
    /// `column = expr` assignments.
    pub assignments: Vec<UpdateAssignment>,
    /// Partition after `IN`.
    pub partition: Option<PartitionClause>,
    /// Rows to update.
    pub where_expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for AlterTableUpdate {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("UPDATE ");
        f.write_separated(&self.assignments, ", ");
        write_in_partition(f, self.partition.as_ref());
        f.write_str(" WHERE ");
        f.write_node(&self.where_expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.assignments, &mut *scope)?;
        visitor::accept_opt(self.partition.as_ref(), &mut *scope)?;
        self.where_expr.accept(&mut *scope)?;
        scope.visit_alter_table_update(self)
    }
}

/// `column = expr` inside `UPDATE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateAssignment {
    /// Column being assigned.
    pub column: NestedIdentifier,
    /// New value.
    pub expr: Expr,
    /// Source span.
    pub span: Span,
}

impl Node for UpdateAssignment {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.column);
        f.write_str(" = ");
        f.write_node(&self.expr);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.column.accept(&mut *scope)?;
        self.expr.accept(&mut *scope)?;
        scope.visit_update_assignment(self)
    }
}
