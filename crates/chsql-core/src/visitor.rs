//! Tree traversal.
//!
//! [`Node::accept`] drives a [`Visitor`] through a tree. For every concrete
//! node it calls [`Visitor::enter`], accepts the children in source order,
//! calls the node's `visit_*` method, and finally [`Visitor::leave`].
//!
//! `leave` is issued by the [`Scope`] guard returned from [`enter`], so it
//! fires once for every entered node no matter how the walk ends: a child
//! error, an error from the node's own `visit_*` method, or a panic. Nodes
//! that were never entered see neither call.
//!
//! ```
//! use chsql_core::ast::{Ident, Node};
//! use chsql_core::visitor::Visitor;
//!
//! #[derive(Default)]
//! struct Columns(Vec<String>);
//!
//! impl Visitor for Columns {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_ident(&mut self, ident: &Ident) -> Result<(), Self::Error> {
//!         self.0.push(ident.name.clone());
//!         Ok(())
//!     }
//! }
//!
//! let statements = chsql_core::parse("SELECT a, b FROM t").into_result().unwrap();
//! let mut columns = Columns::default();
//! statements[0].accept(&mut columns).unwrap();
//! assert_eq!(columns.0, ["a", "b", "t"]);
//! ```

use std::ops::{Deref, DerefMut};

use crate::ast::{
    AliasExpr, AlterRole, AlterTable, AlterTableAddColumn, AlterTableAddIndex,
    AlterTableAddProjection, AlterTableAttachPartition, AlterTableClearColumn,
    AlterTableClearIndex, AlterTableClearProjection, AlterTableDelete, AlterTableDetachPartition,
    AlterTableDropColumn, AlterTableDropIndex, AlterTableDropPartition, AlterTableDropProjection,
    AlterTableFreezePartition, AlterTableMaterializeIndex, AlterTableMaterializeProjection,
    AlterTableModifyColumn, AlterTableModifyQuery, AlterTableModifySetting, AlterTableModifyTtl,
    AlterTableRemoveTtl, AlterTableRenameColumn, AlterTableReplacePartition,
    AlterTableResetSetting, AlterTableUpdate, ArrayParamList, AssignmentValues,
    AuthenticationClause, BetweenClause, BinaryOperation, BoolLiteral, CaseExpr, CastExpr,
    CheckStmt, ColumnArgList, ColumnDef, ColumnExpr, ColumnExprList, ColumnNamesExpr, ComplexType,
    CompressionCodec, ConstraintClause, CreateDatabase, CreateDictionary, CreateFunction,
    CreateLiveView, CreateMaterializedView, CreateNamedCollection, CreateRole, CreateTable,
    CreateUser, CreateView, CteStmt, DeduplicateClause, DefaultRoleClause, DeleteClause,
    DescribeStmt, DestinationClause, DictionaryArgExpr, DictionaryAttribute,
    DictionaryEngineClause, DictionaryLayoutClause, DictionaryLifetimeClause,
    DictionaryRangeClause, DictionarySourceClause, DistinctOn, DropDatabase, DropStmt,
    DropUserOrRole, EngineExpr, EnumType, EnumValue, ExplainStmt, ExtractExpr, Fill, FormatClause,
    FromClause, FunctionExpr, GrantPrivilegeStmt, GranteesClause, GroupByClause, HavingClause,
    HostClause, Ident, IndexOperation, InsertStmt, InterpolateClause, InterpolateItem,
    IntervalExpr, IsNotNullExpr, IsNullExpr, JoinConstraintClause, JoinExpr, JoinTableExpr,
    JsonOption, JsonType, KeyValue, LimitByClause, LimitClause, MapLiteral, NamedCollectionParam,
    NamedParameter, NegateExpr, NestedIdentifier, NestedType, Node, NotExpr, NotNullLiteral,
    NullLiteral, NumberLiteral, ObjectParams, OnClusterClause, OptimizeStmt, OrderByClause,
    OrderExpr, ParamExprList, PartitionByClause, PartitionClause, Path, PlaceHolder,
    PrewhereClause, PrimaryKeyClause, PrivilegeClause, ProjectionSelectStmt, PropertyType,
    QueryParam, RatioExpr, RefreshExpr, RemovePropertyType, RenameStmt, RoleName, RoleRenamePair,
    RoleSetting, SampleByClause, SampleClause, ScalarType, SelectItem, SelectQuery, SetStmt,
    SettingExpr, SettingPair, SettingsClause, ShowStmt, StringLiteral, SubQuery, SystemCtrlExpr,
    SystemDropExpr, SystemFlushExpr, SystemReloadExpr, SystemStmt, SystemSyncExpr,
    TableArgListExpr, TableExpr, TableFunctionExpr, TableIdentifier, TableIndex, TableProjection,
    TableSchemaClause, TargetPair, TernaryOperation, TopClause, TruncateTable, TtlClause, TtlExpr,
    TtlPolicy, TtlPolicyRule, TypeWithParams, TypedPlaceholder, UnaryExpr, UpdateAssignment,
    UseStmt, Uuid, WhenClause, WhereClause, WindowClause, WindowDefinition, WindowExpr,
    WindowFrameBetween, WindowFrameClause, WindowFrameCurrentRow, WindowFrameNumber,
    WindowFrameUnbounded, WindowFunctionExpr, WithClause, WithTimeoutClause,
};
use crate::lexer::Span;

macro_rules! define_visitor {
    ($($node:ident => $visit:ident,)*) => {
        /// A borrowed reference to any concrete node, passed to
        /// [`Visitor::enter`] and [`Visitor::leave`].
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $(
                #[allow(missing_docs)]
                $node(&'a $node),
            )*
        }

        impl NodeRef<'_> {
            /// The node kind's type name, e.g. `"SelectQuery"`.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    $(Self::$node(_) => stringify!($node),)*
                }
            }

            /// The node's span.
            #[must_use]
            pub fn span(&self) -> Span {
                match self {
                    $(Self::$node(node) => node.span(),)*
                }
            }
        }

        $(
            impl<'a> From<&'a $node> for NodeRef<'a> {
                fn from(node: &'a $node) -> Self {
                    Self::$node(node)
                }
            }
        )*

        /// Receives traversal notifications. Every method defaults to a no-op.
        pub trait Visitor {
            /// The caller-chosen failure type.
            type Error;

            /// Called before a node's children are accepted.
            fn enter(&mut self, _node: NodeRef<'_>) {}

            /// Called once for every entered node, after its visit method or
            /// after the failure that cut its traversal short.
            fn leave(&mut self, _node: NodeRef<'_>) {}

            $(
                #[doc = concat!("Called for a [`", stringify!($node), "`] after its children.")]
                ///
                /// # Errors
                ///
                /// An error aborts the traversal.
                fn $visit(&mut self, _node: &$node) -> Result<(), Self::Error> {
                    Ok(())
                }
            )*
        }
    };
}

define_visitor! {
    Ident => visit_ident,
    NestedIdentifier => visit_nested_identifier,
    Path => visit_path,
    TableIdentifier => visit_table_identifier,
    NumberLiteral => visit_number_literal,
    StringLiteral => visit_string_literal,
    BoolLiteral => visit_bool_literal,
    NullLiteral => visit_null_literal,
    NotNullLiteral => visit_not_null_literal,
    PlaceHolder => visit_place_holder,
    QueryParam => visit_query_param,
    TypedPlaceholder => visit_typed_placeholder,
    Uuid => visit_uuid,
    MapLiteral => visit_map_literal,
    KeyValue => visit_key_value,
    ColumnExprList => visit_column_expr_list,
    ColumnArgList => visit_column_arg_list,
    ParamExprList => visit_param_expr_list,
    ArrayParamList => visit_array_param_list,
    ObjectParams => visit_object_params,
    IndexOperation => visit_index_operation,
    BinaryOperation => visit_binary_operation,
    UnaryExpr => visit_unary_expr,
    NegateExpr => visit_negate_expr,
    NotExpr => visit_not_expr,
    TernaryOperation => visit_ternary_operation,
    CaseExpr => visit_case_expr,
    WhenClause => visit_when_clause,
    CastExpr => visit_cast_expr,
    BetweenClause => visit_between_clause,
    IsNullExpr => visit_is_null_expr,
    IsNotNullExpr => visit_is_not_null_expr,
    IntervalExpr => visit_interval_expr,
    ExtractExpr => visit_extract_expr,
    AliasExpr => visit_alias_expr,
    ColumnExpr => visit_column_expr,
    SubQuery => visit_sub_query,
    NamedParameter => visit_named_parameter,
    FunctionExpr => visit_function_expr,
    WindowFunctionExpr => visit_window_function_expr,
    WindowExpr => visit_window_expr,
    WindowFrameClause => visit_window_frame_clause,
    WindowFrameBetween => visit_window_frame_between,
    WindowFrameCurrentRow => visit_window_frame_current_row,
    WindowFrameUnbounded => visit_window_frame_unbounded,
    WindowFrameNumber => visit_window_frame_number,
    ScalarType => visit_scalar_type,
    TypeWithParams => visit_type_with_params,
    ComplexType => visit_complex_type,
    NestedType => visit_nested_type,
    EnumType => visit_enum_type,
    EnumValue => visit_enum_value,
    JsonType => visit_json_type,
    JsonOption => visit_json_option,
    PropertyType => visit_property_type,
    ColumnDef => visit_column_def,
    CompressionCodec => visit_compression_codec,
    WithClause => visit_with_clause,
    CteStmt => visit_cte_stmt,
    SelectItem => visit_select_item,
    TopClause => visit_top_clause,
    DistinctOn => visit_distinct_on,
    FromClause => visit_from_clause,
    JoinExpr => visit_join_expr,
    JoinTableExpr => visit_join_table_expr,
    TableExpr => visit_table_expr,
    TableFunctionExpr => visit_table_function_expr,
    TableArgListExpr => visit_table_arg_list_expr,
    JoinConstraintClause => visit_join_constraint_clause,
    SampleClause => visit_sample_clause,
    RatioExpr => visit_ratio_expr,
    WhereClause => visit_where_clause,
    PrewhereClause => visit_prewhere_clause,
    GroupByClause => visit_group_by_clause,
    HavingClause => visit_having_clause,
    OrderByClause => visit_order_by_clause,
    OrderExpr => visit_order_expr,
    Fill => visit_fill,
    InterpolateClause => visit_interpolate_clause,
    InterpolateItem => visit_interpolate_item,
    LimitClause => visit_limit_clause,
    LimitByClause => visit_limit_by_clause,
    SettingsClause => visit_settings_clause,
    SettingExpr => visit_setting_expr,
    FormatClause => visit_format_clause,
    WindowClause => visit_window_clause,
    WindowDefinition => visit_window_definition,
    SelectQuery => visit_select_query,
    InsertStmt => visit_insert_stmt,
    ColumnNamesExpr => visit_column_names_expr,
    AssignmentValues => visit_assignment_values,
    DeleteClause => visit_delete_clause,
    OnClusterClause => visit_on_cluster_clause,
    PartitionClause => visit_partition_clause,
    PartitionByClause => visit_partition_by_clause,
    PrimaryKeyClause => visit_primary_key_clause,
    SampleByClause => visit_sample_by_clause,
    TtlClause => visit_ttl_clause,
    TtlExpr => visit_ttl_expr,
    TtlPolicy => visit_ttl_policy,
    TtlPolicyRule => visit_ttl_policy_rule,
    EngineExpr => visit_engine_expr,
    DestinationClause => visit_destination_clause,
    TableSchemaClause => visit_table_schema_clause,
    TableIndex => visit_table_index,
    TableProjection => visit_table_projection,
    ProjectionSelectStmt => visit_projection_select_stmt,
    ConstraintClause => visit_constraint_clause,
    WithTimeoutClause => visit_with_timeout_clause,
    RefreshExpr => visit_refresh_expr,
    CreateDatabase => visit_create_database,
    CreateTable => visit_create_table,
    CreateView => visit_create_view,
    CreateMaterializedView => visit_create_materialized_view,
    CreateLiveView => visit_create_live_view,
    CreateDictionary => visit_create_dictionary,
    DictionaryAttribute => visit_dictionary_attribute,
    DictionaryEngineClause => visit_dictionary_engine_clause,
    DictionarySourceClause => visit_dictionary_source_clause,
    DictionaryArgExpr => visit_dictionary_arg_expr,
    DictionaryLifetimeClause => visit_dictionary_lifetime_clause,
    DictionaryLayoutClause => visit_dictionary_layout_clause,
    DictionaryRangeClause => visit_dictionary_range_clause,
    CreateFunction => visit_create_function,
    CreateNamedCollection => visit_create_named_collection,
    NamedCollectionParam => visit_named_collection_param,
    CreateRole => visit_create_role,
    RoleName => visit_role_name,
    RoleSetting => visit_role_setting,
    SettingPair => visit_setting_pair,
    CreateUser => visit_create_user,
    AuthenticationClause => visit_authentication_clause,
    HostClause => visit_host_clause,
    DefaultRoleClause => visit_default_role_clause,
    GranteesClause => visit_grantees_clause,
    AlterRole => visit_alter_role,
    RoleRenamePair => visit_role_rename_pair,
    GrantPrivilegeStmt => visit_grant_privilege_stmt,
    PrivilegeClause => visit_privilege_clause,
    DropUserOrRole => visit_drop_user_or_role,
    AlterTable => visit_alter_table,
    AlterTableAddColumn => visit_alter_table_add_column,
    AlterTableAddIndex => visit_alter_table_add_index,
    AlterTableAddProjection => visit_alter_table_add_projection,
    AlterTableDropColumn => visit_alter_table_drop_column,
    AlterTableDropIndex => visit_alter_table_drop_index,
    AlterTableDropProjection => visit_alter_table_drop_projection,
    AlterTableDropPartition => visit_alter_table_drop_partition,
    AlterTableClearColumn => visit_alter_table_clear_column,
    AlterTableClearIndex => visit_alter_table_clear_index,
    AlterTableClearProjection => visit_alter_table_clear_projection,
    AlterTableModifyColumn => visit_alter_table_modify_column,
    RemovePropertyType => visit_remove_property_type,
    AlterTableModifyQuery => visit_alter_table_modify_query,
    AlterTableModifySetting => visit_alter_table_modify_setting,
    AlterTableModifyTtl => visit_alter_table_modify_ttl,
    AlterTableRenameColumn => visit_alter_table_rename_column,
    AlterTableResetSetting => visit_alter_table_reset_setting,
    AlterTableAttachPartition => visit_alter_table_attach_partition,
    AlterTableDetachPartition => visit_alter_table_detach_partition,
    AlterTableReplacePartition => visit_alter_table_replace_partition,
    AlterTableFreezePartition => visit_alter_table_freeze_partition,
    AlterTableMaterializeIndex => visit_alter_table_materialize_index,
    AlterTableMaterializeProjection => visit_alter_table_materialize_projection,
    AlterTableRemoveTtl => visit_alter_table_remove_ttl,
    AlterTableDelete => visit_alter_table_delete,
    AlterTableUpdate => visit_alter_table_update,
    UpdateAssignment => visit_update_assignment,
    DropDatabase => visit_drop_database,
    DropStmt => visit_drop_stmt,
    RenameStmt => visit_rename_stmt,
    TargetPair => visit_target_pair,
    TruncateTable => visit_truncate_table,
    OptimizeStmt => visit_optimize_stmt,
    DeduplicateClause => visit_deduplicate_clause,
    SystemStmt => visit_system_stmt,
    SystemFlushExpr => visit_system_flush_expr,
    SystemReloadExpr => visit_system_reload_expr,
    SystemSyncExpr => visit_system_sync_expr,
    SystemCtrlExpr => visit_system_ctrl_expr,
    SystemDropExpr => visit_system_drop_expr,
    ShowStmt => visit_show_stmt,
    DescribeStmt => visit_describe_stmt,
    ExplainStmt => visit_explain_stmt,
    SetStmt => visit_set_stmt,
    UseStmt => visit_use_stmt,
    CheckStmt => visit_check_stmt,
}

/// Drop guard that calls [`Visitor::leave`] for the node it was created for.
///
/// Dereferences to the visitor, so children are accepted through the guard.
pub struct Scope<'v, 'n, V: Visitor + ?Sized> {
    visitor: &'v mut V,
    node: NodeRef<'n>,
}

impl<V: Visitor + ?Sized> Deref for Scope<'_, '_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.visitor
    }
}

impl<V: Visitor + ?Sized> DerefMut for Scope<'_, '_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.visitor
    }
}

impl<V: Visitor + ?Sized> Drop for Scope<'_, '_, V> {
    fn drop(&mut self) {
        self.visitor.leave(self.node);
    }
}

/// Notifies `visitor` that `node` is entered and returns the guard that will
/// notify it of the leave.
pub fn enter<'v, 'n, V: Visitor + ?Sized>(
    visitor: &'v mut V,
    node: impl Into<NodeRef<'n>>,
) -> Scope<'v, 'n, V> {
    let node = node.into();
    visitor.enter(node);
    Scope { visitor, node }
}

/// Accepts an optional child.
pub(crate) fn accept_opt<N: Node, V: Visitor + ?Sized>(
    node: Option<&N>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match node {
        Some(node) => node.accept(visitor),
        None => Ok(()),
    }
}

/// Accepts children in order, stopping at the first failure.
pub(crate) fn accept_all<N: Node, V: Visitor + ?Sized>(
    nodes: &[N],
    visitor: &mut V,
) -> Result<(), V::Error> {
    for node in nodes {
        node.accept(visitor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl Visitor for Recorder {
        type Error = String;

        fn enter(&mut self, node: NodeRef<'_>) {
            self.events.push(format!("enter {}", node.kind()));
        }

        fn leave(&mut self, node: NodeRef<'_>) {
            self.events.push(format!("leave {}", node.kind()));
        }

        fn visit_ident(&mut self, node: &Ident) -> Result<(), String> {
            if self.fail_on == Some(node.name.as_str()) {
                return Err(format!("failed on {}", node.name));
            }
            Ok(())
        }
    }

    #[test]
    fn test_scope_leaves_on_drop() {
        let ident = Ident::new("a", Span::new(0, 1));
        let mut recorder = Recorder::default();
        {
            let _scope = enter(&mut recorder, &ident);
        }
        assert_eq!(recorder.events, ["enter Ident", "leave Ident"]);
    }

    #[test]
    fn test_leave_fires_after_failure() {
        let ident = Ident::new("bad", Span::new(0, 3));
        let mut recorder = Recorder {
            fail_on: Some("bad"),
            ..Recorder::default()
        };
        let result = ident.accept(&mut recorder);
        assert_eq!(result, Err("failed on bad".to_string()));
        assert_eq!(recorder.events, ["enter Ident", "leave Ident"]);
    }

    #[test]
    fn test_accept_all_stops_at_first_failure() {
        let idents = vec![
            Ident::new("a", Span::new(0, 1)),
            Ident::new("bad", Span::new(2, 5)),
            Ident::new("c", Span::new(6, 7)),
        ];
        let mut recorder = Recorder {
            fail_on: Some("bad"),
            ..Recorder::default()
        };
        assert!(accept_all(&idents, &mut recorder).is_err());
        assert_eq!(
            recorder.events,
            ["enter Ident", "leave Ident", "enter Ident", "leave Ident"]
        );
    }

    #[test]
    fn test_node_ref_kind() {
        let ident = Ident::new("a", Span::new(3, 4));
        let node = NodeRef::from(&ident);
        assert_eq!(node.kind(), "Ident");
        assert_eq!(node.span(), Span::new(3, 4));
    }
}
