//! Syntax tree for ClickHouse SQL.
//!
//! Every concrete node kind implements [`Node`]: it knows its source span,
//! renders itself through a [`Formatter`], and walks a [`Visitor`]. Families of
//! nodes that can stand in the same position ([`Expr`], [`Statement`],
//! [`ColumnType`], [`AlterTableClause`], ...) are closed enums that forward the
//! three capabilities to their variants.

macro_rules! forward_node {
    ($family:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::ast::Node for $family {
            fn span(&self) -> $crate::lexer::Span {
                match self {
                    $(Self::$variant(node) => node.span(),)*
                }
            }

            fn format_sql(&self, f: &mut $crate::format::Formatter) {
                match self {
                    $(Self::$variant(node) => node.format_sql(f),)*
                }
            }

            fn accept<V: $crate::visitor::Visitor + ?Sized>(
                &self,
                visitor: &mut V,
            ) -> Result<(), V::Error> {
                match self {
                    $(Self::$variant(node) => node.accept(visitor),)*
                }
            }
        }
    };
}

mod access;
mod alter;
mod clause;
mod create;
mod ddl;
mod expression;
mod function;
mod literal;
mod query;
mod statement;
mod types;

pub use access::{
    AccessEntity, AlterRole, AuthenticationClause, AuthenticationMethod, CreateRole, CreateUser,
    DefaultDatabase, DefaultRoleClause, DropUserOrRole, GrantOption, GrantPrivilegeStmt,
    GranteeList, GranteesClause, HostClause, HostEntry, HostKind, PrivilegeClause, RoleName,
    RoleRenamePair, RoleSetting, SettingPair,
};
pub use alter::{
    AlterTable, AlterTableAddColumn, AlterTableAddIndex, AlterTableAddProjection,
    AlterTableAttachPartition, AlterTableClause, AlterTableClearColumn, AlterTableClearIndex,
    AlterTableClearProjection, AlterTableDelete, AlterTableDetachPartition, AlterTableDropColumn,
    AlterTableDropIndex, AlterTableDropPartition, AlterTableDropProjection,
    AlterTableFreezePartition, AlterTableMaterializeIndex, AlterTableMaterializeProjection,
    AlterTableModifyColumn, AlterTableModifyQuery, AlterTableModifySetting, AlterTableModifyTtl,
    AlterTableRemoveTtl, AlterTableRenameColumn, AlterTableReplacePartition,
    AlterTableResetSetting, AlterTableUpdate, RemovePropertyType, UpdateAssignment,
};
pub use clause::{
    CteStmt, DistinctOn, Fill, FormatClause, FromClause, GroupByAggregate, GroupByClause,
    HavingClause, InterpolateClause, InterpolateItem, JoinConstraint, JoinConstraintClause,
    JoinExpr, JoinItem, JoinTableExpr, LimitByClause, LimitClause, NullsOrder, OrderByClause,
    OrderDirection, OrderExpr, PrewhereClause, RatioExpr, SampleClause, SelectItem, SettingExpr,
    SettingsClause, TableArgListExpr, TableExpr, TableFunctionExpr, TableSource, TopClause,
    WhereClause, WindowClause, WindowDefinition, WithClause,
};
pub use create::{
    CreateDatabase, CreateDictionary, CreateFunction, CreateLiveView, CreateMaterializedView,
    CreateNamedCollection, CreateTable, CreateView, DictionaryArgExpr, DictionaryAttribute,
    DictionaryAttributeFlag, DictionaryEngineClause, DictionaryLayoutClause, DictionaryLifetime,
    DictionaryLifetimeClause, DictionaryRangeClause, DictionarySourceClause, NamedCollectionParam,
    SqlSecurity,
};
pub use ddl::{
    ConstraintClause, ConstraintKind, DestinationClause, EngineExpr, OnClusterClause,
    PartitionByClause, PartitionClause, PartitionTarget, PrimaryKeyClause, ProjectionSelectStmt,
    RefreshExpr, RefreshFrequency, RefreshInterval, SampleByClause, TableElement, TableIndex,
    TableProjection, TableSchemaClause, TtlAction, TtlClause, TtlExpr, TtlPolicy, TtlPolicyRule,
    WithTimeoutClause,
};
pub use expression::{
    AliasExpr, ArrayParamList, BetweenClause, BinaryOperation, BinaryOperator, CaseExpr,
    CastExpr, CastSyntax, CastTarget, ColumnArgList, ColumnExpr, ColumnExprList, Expr,
    ExtractExpr, IndexOperation, IntervalExpr, IsNotNullExpr, IsNullExpr, NamedParameter,
    NegateExpr, NotExpr, ObjectParams, ParamExprList, SubQuery, TernaryOperation, UnaryExpr,
    UnaryOperator, WhenClause,
};
pub use function::{
    FrameDirection, FrameType, FunctionExpr, WindowExpr, WindowFrameBetween, WindowFrameBound,
    WindowFrameClause, WindowFrameCurrentRow, WindowFrameExtend, WindowFrameNumber,
    WindowFrameUnbounded, WindowFunctionExpr, WindowOver,
};
pub use literal::{
    BoolLiteral, Ident, KeyValue, MapLiteral, NestedIdentifier, NotNullLiteral, NullLiteral,
    NumberLiteral, Path, PlaceHolder, QueryParam, StringLiteral, TableIdentifier,
    TypedPlaceholder, Uuid,
};
pub use query::{
    AssignmentValues, ColumnNamesExpr, DeleteClause, InsertSource, InsertStmt, SelectQuery,
    SelectUnion, SetOperator,
};
pub use statement::{
    CheckStmt, DeduplicateClause, DescribeStmt, DropDatabase, DropModifier, DropStmt, DropTarget,
    ExplainKind, ExplainStmt, OptimizeStmt, RenameStmt, RenameTarget, SetStmt, ShowKind,
    ShowPattern, ShowStmt, Statement, SyncReplicaMode, SystemCommand, SystemCtrlCommand,
    SystemCtrlExpr, SystemCtrlKind, SystemDropExpr, SystemDropKind, SystemFlushExpr,
    SystemReloadExpr, SystemReloadKind, SystemStmt, SystemSyncExpr, TargetPair, TruncateTable,
    UseStmt,
};
pub use types::{
    ColumnDef, ColumnDefault, ColumnType, ComplexType, CompressionCodec, EnumType, EnumValue,
    JsonOption, JsonOptionKind, JsonType, NestedType, PropertyType, ScalarType, TypeWithParams,
};

use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::Visitor;

/// The capability set shared by every syntax node.
pub trait Node {
    /// The `[start, end)` byte range of the node in the parsed text.
    fn span(&self) -> Span;

    /// Writes the node as SQL.
    fn format_sql(&self, f: &mut Formatter);

    /// Walks the node: `enter`, children in source order, the kind's visit
    /// method, then `leave`. `leave` runs on every exit path once `enter` ran.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the visitor; the rest of the
    /// subtree is skipped.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error>;

    /// Start offset.
    fn pos(&self) -> usize {
        self.span().start
    }

    /// End offset.
    fn end(&self) -> usize {
        self.span().end
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn span(&self) -> Span {
        (**self).span()
    }

    fn format_sql(&self, f: &mut Formatter) {
        (**self).format_sql(f);
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        (**self).accept(visitor)
    }
}
