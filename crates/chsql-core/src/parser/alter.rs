//! `ALTER TABLE` and `ALTER ROLE`.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    AlterRole, AlterTable, AlterTableAddColumn, AlterTableAddIndex, AlterTableAddProjection,
    AlterTableAttachPartition, AlterTableClause, AlterTableClearColumn, AlterTableClearIndex,
    AlterTableClearProjection, AlterTableDelete, AlterTableDetachPartition,
    AlterTableDropColumn, AlterTableDropIndex, AlterTableDropPartition,
    AlterTableDropProjection, AlterTableFreezePartition, AlterTableMaterializeIndex,
    AlterTableMaterializeProjection, AlterTableModifyColumn, AlterTableModifyQuery,
    AlterTableModifySetting, AlterTableModifyTtl, AlterTableRemoveTtl, AlterTableRenameColumn,
    AlterTableReplacePartition, AlterTableResetSetting, AlterTableUpdate, NestedIdentifier,
    PartitionClause, PartitionTarget, PropertyType, RemovePropertyType, RoleRenamePair,
    Statement, UpdateAssignment,
};
use crate::lexer::{Keyword, TokenKind};

/// Keywords that open an `ALTER TABLE` clause.
const CLAUSE_KEYWORDS: &[Keyword] = &[
    Keyword::Add,
    Keyword::Drop,
    Keyword::Clear,
    Keyword::Modify,
    Keyword::Rename,
    Keyword::Reset,
    Keyword::Attach,
    Keyword::Detach,
    Keyword::Replace,
    Keyword::Freeze,
    Keyword::Materialize,
    Keyword::Remove,
    Keyword::Delete,
    Keyword::Update,
];

impl Parser {
    pub(super) fn parse_alter(&mut self) -> Result<Statement, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Alter)?;
        if self.consume_keyword(Keyword::Role) {
            return Ok(Statement::AlterRole(self.parse_alter_role(start)?));
        }
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_table_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        let clauses = self.parse_comma_separated(Self::parse_alter_clause)?;
        Ok(Statement::AlterTable(AlterTable {
            table,
            on_cluster,
            clauses,
            span: self.span_from(start),
        }))
    }

    /// True when the token after the current comma opens another
    /// `ALTER TABLE` clause.
    pub(super) fn peek_starts_alter_clause(&self) -> bool {
        self.peek()
            .as_keyword()
            .is_some_and(|keyword| CLAUSE_KEYWORDS.contains(&keyword))
    }

    fn parse_alter_clause(&mut self) -> Result<AlterTableClause, ParseError> {
        let start = self.start();
        let Some(keyword) = self.current().as_keyword() else {
            return Err(self.unexpected("ALTER TABLE clause"));
        };
        let clause = match keyword {
            Keyword::Add => {
                self.advance();
                self.parse_alter_add(start)?
            }
            Keyword::Drop => {
                self.advance();
                self.parse_alter_drop(start)?
            }
            Keyword::Clear => {
                self.advance();
                self.parse_alter_clear(start)?
            }
            Keyword::Modify => {
                self.advance();
                self.parse_alter_modify(start)?
            }
            Keyword::Rename => {
                self.advance();
                self.expect_keyword(Keyword::Column)?;
                let if_exists = self.parse_if_exists();
                let old_name = self.parse_nested_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let new_name = self.parse_nested_identifier()?;
                AlterTableClause::RenameColumn(AlterTableRenameColumn {
                    if_exists,
                    old_name,
                    new_name,
                    span: self.span_from(start),
                })
            }
            Keyword::Reset => {
                self.advance();
                self.expect_keyword(Keyword::Setting)?;
                let settings = self.parse_clause_list(Self::expect_identifier)?;
                AlterTableClause::ResetSetting(AlterTableResetSetting {
                    settings,
                    span: self.span_from(start),
                })
            }
            Keyword::Attach => {
                self.advance();
                let partition = self.parse_partition_clause()?;
                let from = if self.consume_keyword(Keyword::From) {
                    Some(self.parse_table_identifier()?)
                } else {
                    None
                };
                AlterTableClause::AttachPartition(AlterTableAttachPartition {
                    partition,
                    from,
                    span: self.span_from(start),
                })
            }
            Keyword::Detach => {
                self.advance();
                let partition = self.parse_partition_clause()?;
                let settings = self.parse_settings()?;
                AlterTableClause::DetachPartition(AlterTableDetachPartition {
                    partition,
                    settings,
                    span: self.span_from(start),
                })
            }
            Keyword::Replace => {
                self.advance();
                let partition = self.parse_partition_clause()?;
                self.expect_keyword(Keyword::From)?;
                let from = self.parse_table_identifier()?;
                AlterTableClause::ReplacePartition(AlterTableReplacePartition {
                    partition,
                    from,
                    span: self.span_from(start),
                })
            }
            Keyword::Freeze => {
                self.advance();
                let partition = if self.check_keyword(Keyword::Partition) {
                    Some(self.parse_partition_clause()?)
                } else {
                    None
                };
                AlterTableClause::FreezePartition(AlterTableFreezePartition {
                    partition,
                    span: self.span_from(start),
                })
            }
            Keyword::Materialize => {
                self.advance();
                self.parse_alter_materialize(start)?
            }
            Keyword::Remove => {
                self.advance();
                self.expect_keyword(Keyword::Ttl)?;
                AlterTableClause::RemoveTtl(AlterTableRemoveTtl {
                    span: self.span_from(start),
                })
            }
            Keyword::Delete => {
                self.advance();
                let partition = self.parse_in_partition()?;
                self.expect_keyword(Keyword::Where)?;
                let where_expr = self.parse_expr()?;
                AlterTableClause::Delete(AlterTableDelete {
                    partition,
                    where_expr,
                    span: self.span_from(start),
                })
            }
            Keyword::Update => {
                self.advance();
                let assignments = self.parse_clause_list(Self::parse_update_assignment)?;
                let partition = self.parse_in_partition()?;
                self.expect_keyword(Keyword::Where)?;
                let where_expr = self.parse_expr()?;
                AlterTableClause::Update(AlterTableUpdate {
                    assignments,
                    partition,
                    where_expr,
                    span: self.span_from(start),
                })
            }
            _ => return Err(self.unexpected("ALTER TABLE clause")),
        };
        Ok(clause)
    }

    fn parse_alter_add(&mut self, start: usize) -> Result<AlterTableClause, ParseError> {
        if self.consume_keyword(Keyword::Column) {
            let if_not_exists = self.parse_if_not_exists();
            let column = self.parse_column_def()?;
            let first = self.consume_keyword(Keyword::First);
            let after = self.parse_after()?;
            return Ok(AlterTableClause::AddColumn(AlterTableAddColumn {
                if_not_exists,
                column,
                first,
                after,
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Index) {
            let if_not_exists = self.parse_if_not_exists();
            let index = self.parse_index_definition(self.start())?;
            let after = self.parse_after()?;
            return Ok(AlterTableClause::AddIndex(AlterTableAddIndex {
                if_not_exists,
                index,
                after,
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Projection) {
            let if_not_exists = self.parse_if_not_exists();
            let projection = self.parse_projection_definition(self.start(), false)?;
            let after = self.parse_after()?;
            return Ok(AlterTableClause::AddProjection(AlterTableAddProjection {
                if_not_exists,
                projection,
                after,
                span: self.span_from(start),
            }));
        }
        Err(self.unexpected("COLUMN, INDEX or PROJECTION"))
    }

    fn parse_alter_drop(&mut self, start: usize) -> Result<AlterTableClause, ParseError> {
        if self.consume_keyword(Keyword::Column) {
            let if_exists = self.parse_if_exists();
            let column = self.parse_nested_identifier()?;
            return Ok(AlterTableClause::DropColumn(AlterTableDropColumn {
                if_exists,
                column,
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Index) {
            let if_exists = self.parse_if_exists();
            let index = self.parse_nested_identifier()?;
            return Ok(AlterTableClause::DropIndex(AlterTableDropIndex {
                if_exists,
                index,
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Projection) {
            let if_exists = self.parse_if_exists();
            let projection = self.parse_nested_identifier()?;
            return Ok(AlterTableClause::DropProjection(AlterTableDropProjection {
                if_exists,
                projection,
                span: self.span_from(start),
            }));
        }
        let detached = self.consume_keyword(Keyword::Detached);
        if self.check_keyword(Keyword::Partition) {
            let partition = self.parse_partition_clause()?;
            let settings = self.parse_settings()?;
            return Ok(AlterTableClause::DropPartition(AlterTableDropPartition {
                detached,
                partition,
                settings,
                span: self.span_from(start),
            }));
        }
        Err(self.unexpected("COLUMN, INDEX, PROJECTION or PARTITION"))
    }

    fn parse_alter_clear(&mut self, start: usize) -> Result<AlterTableClause, ParseError> {
        let target = self.current().as_keyword();
        if !matches!(
            target,
            Some(Keyword::Column | Keyword::Index | Keyword::Projection)
        ) {
            return Err(self.unexpected("COLUMN, INDEX or PROJECTION"));
        }
        self.advance();
        let if_exists = self.parse_if_exists();
        let name = self.parse_nested_identifier()?;
        let partition = self.parse_in_partition()?;
        let span = self.span_from(start);
        Ok(match target {
            Some(Keyword::Column) => AlterTableClause::ClearColumn(AlterTableClearColumn {
                if_exists,
                column: name,
                partition,
                span,
            }),
            Some(Keyword::Index) => AlterTableClause::ClearIndex(AlterTableClearIndex {
                if_exists,
                index: name,
                partition,
                span,
            }),
            _ => AlterTableClause::ClearProjection(AlterTableClearProjection {
                if_exists,
                projection: name,
                partition,
                span,
            }),
        })
    }

    fn parse_alter_modify(&mut self, start: usize) -> Result<AlterTableClause, ParseError> {
        if self.consume_keyword(Keyword::Column) {
            let if_exists = self.parse_if_exists();
            let column = self.parse_column_def()?;
            let remove = if self.check_keyword(Keyword::Remove) {
                let remove_start = self.start();
                self.advance();
                let name = self.expect_identifier()?;
                let property = PropertyType {
                    span: name.span,
                    name,
                };
                Some(RemovePropertyType {
                    property,
                    span: self.span_from(remove_start),
                })
            } else {
                None
            };
            return Ok(AlterTableClause::ModifyColumn(AlterTableModifyColumn {
                if_exists,
                column,
                remove,
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Query) {
            let select = self.parse_select_query()?;
            return Ok(AlterTableClause::ModifyQuery(AlterTableModifyQuery {
                select: Box::new(select),
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Setting) {
            let settings = self.parse_clause_list(Self::parse_setting_expr)?;
            return Ok(AlterTableClause::ModifySetting(AlterTableModifySetting {
                settings,
                span: self.span_from(start),
            }));
        }
        if self.check_keyword(Keyword::Ttl) {
            let ttl = self.parse_ttl_clause()?;
            return Ok(AlterTableClause::ModifyTtl(AlterTableModifyTtl {
                ttl,
                span: self.span_from(start),
            }));
        }
        Err(self.unexpected("COLUMN, QUERY, SETTING or TTL"))
    }

    fn parse_alter_materialize(&mut self, start: usize) -> Result<AlterTableClause, ParseError> {
        if self.consume_keyword(Keyword::Index) {
            let if_exists = self.parse_if_exists();
            let index = self.parse_nested_identifier()?;
            let partition = self.parse_in_partition()?;
            return Ok(AlterTableClause::MaterializeIndex(AlterTableMaterializeIndex {
                if_exists,
                index,
                partition,
                span: self.span_from(start),
            }));
        }
        if self.consume_keyword(Keyword::Projection) {
            let if_exists = self.parse_if_exists();
            let projection = self.parse_nested_identifier()?;
            let partition = self.parse_in_partition()?;
            return Ok(AlterTableClause::MaterializeProjection(
                AlterTableMaterializeProjection {
                    if_exists,
                    projection,
                    partition,
                    span: self.span_from(start),
                },
            ));
        }
        Err(self.unexpected("INDEX or PROJECTION"))
    }

    fn parse_after(&mut self) -> Result<Option<NestedIdentifier>, ParseError> {
        if self.consume_keyword(Keyword::After) {
            Ok(Some(self.parse_nested_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn parse_update_assignment(&mut self) -> Result<UpdateAssignment, ParseError> {
        let start = self.start();
        let column = self.parse_nested_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let expr = self.parse_expr()?;
        Ok(UpdateAssignment {
            column,
            expr,
            span: self.span_from(start),
        })
    }

    /// `PARTITION ID 'id' | PARTITION ALL | PARTITION expr`
    pub(super) fn parse_partition_clause(&mut self) -> Result<PartitionClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Partition)?;
        let target = if self.check_word("ID") && self.peek().kind == TokenKind::String {
            self.advance();
            PartitionTarget::Id(self.parse_string_literal()?)
        } else if self.consume_keyword(Keyword::All) {
            PartitionTarget::All
        } else {
            PartitionTarget::Expr(self.parse_expr()?)
        };
        Ok(PartitionClause {
            target,
            span: self.span_from(start),
        })
    }

    /// `IN PARTITION ...`
    fn parse_in_partition(&mut self) -> Result<Option<PartitionClause>, ParseError> {
        if self.check_keyword(Keyword::In) && self.peek_keyword(1, Keyword::Partition) {
            self.advance();
            Ok(Some(self.parse_partition_clause()?))
        } else {
            Ok(None)
        }
    }

    /// `[IF EXISTS] role [RENAME TO name], ... [SETTINGS ...]` after
    /// `ALTER ROLE`.
    fn parse_alter_role(&mut self, start: usize) -> Result<AlterRole, ParseError> {
        let if_exists = self.parse_if_exists();
        let pairs = self.parse_comma_separated(|parser| {
            let pair_start = parser.start();
            let role = parser.parse_role_name()?;
            let new_name = if parser.consume_keywords(&[Keyword::Rename, Keyword::To]) {
                Some(parser.expect_identifier()?)
            } else {
                None
            };
            Ok(RoleRenamePair {
                role,
                new_name,
                span: parser.span_from(pair_start),
            })
        })?;
        let settings = if self.consume_keyword(Keyword::Settings) {
            self.parse_role_settings()?
        } else {
            Vec::new()
        };
        Ok(AlterRole {
            if_exists,
            pairs,
            settings,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::ast::{AlterTableClause, Node, PartitionTarget, Statement};
    use crate::format::format_compact;

    fn parse_alter(sql: &str) -> Vec<AlterTableClause> {
        let mut statements = parse(sql).into_result().unwrap();
        let Statement::AlterTable(alter) = statements.remove(0) else {
            panic!("Expected ALTER TABLE");
        };
        alter.clauses
    }

    #[test]
    fn test_add_and_drop_column() {
        let clauses = parse_alter("ALTER TABLE t ADD COLUMN x UInt8 AFTER y, DROP COLUMN z");
        assert_eq!(clauses.len(), 2);
        let AlterTableClause::AddColumn(add) = &clauses[0] else {
            panic!("Expected ADD COLUMN");
        };
        assert_eq!(add.column.name.ident.name, "x");
        assert_eq!(add.after.as_ref().unwrap().ident.name, "y");
        let AlterTableClause::DropColumn(drop) = &clauses[1] else {
            panic!("Expected DROP COLUMN");
        };
        assert_eq!(drop.column.ident.name, "z");
        assert_eq!(drop.span().end, 55);
    }

    #[test]
    fn test_index_and_projection() {
        let clauses = parse_alter(
            "ALTER TABLE t ADD INDEX IF NOT EXISTS idx a TYPE minmax GRANULARITY 4, \
             ADD PROJECTION p (SELECT a, count() GROUP BY a), MATERIALIZE INDEX idx IN PARTITION 1",
        );
        assert_eq!(clauses.len(), 3);
        let AlterTableClause::AddIndex(index) = &clauses[0] else {
            panic!("Expected ADD INDEX");
        };
        assert!(index.if_not_exists);
        assert!(index.index.granularity.is_some());
        assert!(matches!(clauses[1], AlterTableClause::AddProjection(_)));
        let AlterTableClause::MaterializeIndex(materialize) = &clauses[2] else {
            panic!("Expected MATERIALIZE INDEX");
        };
        assert!(materialize.partition.is_some());
    }

    #[test]
    fn test_partitions() {
        let clauses = parse_alter(
            "ALTER TABLE t DROP PARTITION ID '2024', DETACH PARTITION ALL, \
             ATTACH PARTITION 202401 FROM other, REPLACE PARTITION tuple() FROM src, FREEZE",
        );
        assert_eq!(clauses.len(), 5);
        let AlterTableClause::DropPartition(drop) = &clauses[0] else {
            panic!("Expected DROP PARTITION");
        };
        assert!(matches!(drop.partition.target, PartitionTarget::Id(_)));
        let AlterTableClause::DetachPartition(detach) = &clauses[1] else {
            panic!("Expected DETACH PARTITION");
        };
        assert!(matches!(detach.partition.target, PartitionTarget::All));
        assert!(matches!(clauses[4], AlterTableClause::FreezePartition(_)));
    }

    #[test]
    fn test_settings_list_stops_at_next_clause() {
        let clauses =
            parse_alter("ALTER TABLE t MODIFY SETTING a = 1, b = 2, RESET SETTING c, d");
        assert_eq!(clauses.len(), 2);
        let AlterTableClause::ModifySetting(modify) = &clauses[0] else {
            panic!("Expected MODIFY SETTING");
        };
        assert_eq!(modify.settings.len(), 2);
        let AlterTableClause::ResetSetting(reset) = &clauses[1] else {
            panic!("Expected RESET SETTING");
        };
        assert_eq!(reset.settings.len(), 2);
    }

    #[test]
    fn test_modify_column_and_ttl() {
        let clauses = parse_alter(
            "ALTER TABLE t MODIFY COLUMN x REMOVE TTL, MODIFY TTL d + INTERVAL 1 DAY DELETE, REMOVE TTL",
        );
        assert_eq!(clauses.len(), 3);
        let AlterTableClause::ModifyColumn(modify) = &clauses[0] else {
            panic!("Expected MODIFY COLUMN");
        };
        assert!(modify.column.column_type.is_none());
        assert_eq!(modify.remove.as_ref().unwrap().property.type_name(), "TTL");
        let AlterTableClause::ModifyTtl(ttl) = &clauses[1] else {
            panic!("Expected MODIFY TTL");
        };
        assert!(ttl.ttl.items[0].policy.is_some());
        assert!(matches!(clauses[2], AlterTableClause::RemoveTtl(_)));
    }

    #[test]
    fn test_mutations() {
        let clauses = parse_alter(
            "ALTER TABLE t UPDATE a = 1, b = b + 1 IN PARTITION 2 WHERE c > 0, DELETE WHERE a = 0",
        );
        assert_eq!(clauses.len(), 2);
        let AlterTableClause::Update(update) = &clauses[0] else {
            panic!("Expected UPDATE");
        };
        assert_eq!(update.assignments.len(), 2);
        assert!(update.partition.is_some());
        assert!(matches!(clauses[1], AlterTableClause::Delete(_)));
    }

    #[test]
    fn test_rename_and_clear() {
        let clauses = parse_alter(
            "ALTER TABLE db.t ON CLUSTER c RENAME COLUMN IF EXISTS a TO b, CLEAR INDEX idx IN PARTITION ALL",
        );
        assert!(matches!(clauses[0], AlterTableClause::RenameColumn(_)));
        assert!(matches!(clauses[1], AlterTableClause::ClearIndex(_)));
    }

    #[test]
    fn test_alter_round_trip() {
        let sql = "ALTER TABLE t ON CLUSTER c ADD COLUMN x UInt8 FIRST, DROP INDEX IF EXISTS i";
        let statements = parse(sql).into_result().unwrap();
        assert_eq!(format_compact(&statements[0]), sql);
    }

    #[test]
    fn test_alter_role() {
        let statements = parse("ALTER ROLE IF EXISTS r1 RENAME TO r2, r3 SETTINGS readonly = 1")
            .into_result()
            .unwrap();
        let Statement::AlterRole(alter) = &statements[0] else {
            panic!("Expected ALTER ROLE");
        };
        assert!(alter.if_exists);
        assert_eq!(alter.pairs.len(), 2);
        assert_eq!(alter.pairs[0].new_name.as_ref().unwrap().name, "r2");
        assert_eq!(alter.settings.len(), 1);
    }
}
