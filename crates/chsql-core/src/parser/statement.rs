//! Administrative statements: `DROP`, `RENAME`, `TRUNCATE`, `OPTIMIZE`,
//! `SYSTEM`, `SHOW`, `DESCRIBE`, `EXPLAIN`, `SET`, `USE` and `CHECK`.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    AccessEntity, CheckStmt, DeduplicateClause, DescribeStmt, DropDatabase, DropModifier,
    DropStmt, DropTarget, ExplainKind, ExplainStmt, OptimizeStmt, RenameStmt, RenameTarget,
    SetStmt, ShowKind, ShowPattern, ShowStmt, Statement, SyncReplicaMode, SystemCommand,
    SystemCtrlCommand, SystemCtrlExpr, SystemCtrlKind, SystemDropExpr, SystemDropKind,
    SystemFlushExpr, SystemReloadExpr, SystemReloadKind, SystemStmt, SystemSyncExpr,
    TargetPair, TruncateTable, UseStmt,
};
use crate::lexer::Keyword;

const ACCESS_ENTITIES: &[(&[&str], AccessEntity)] = &[
    (&["USER"], AccessEntity::User),
    (&["ROLE"], AccessEntity::Role),
    (&["QUOTA"], AccessEntity::Quota),
    (&["PROFILE"], AccessEntity::Profile),
    (&["SETTINGS", "PROFILE"], AccessEntity::SettingsProfile),
    (&["ROW", "POLICY"], AccessEntity::RowPolicy),
];

const RELOAD_KINDS: &[(&[&str], SystemReloadKind)] = &[
    (&["DICTIONARIES"], SystemReloadKind::Dictionaries),
    (&["DICTIONARY"], SystemReloadKind::Dictionary),
    (&["EMBEDDED", "DICTIONARIES"], SystemReloadKind::EmbeddedDictionaries),
    (&["CONFIG"], SystemReloadKind::Config),
    (&["FUNCTIONS"], SystemReloadKind::Functions),
];

const CTRL_KINDS: &[(&[&str], SystemCtrlKind)] = &[
    (&["MERGES"], SystemCtrlKind::Merges),
    (&["TTL", "MERGES"], SystemCtrlKind::TtlMerges),
    (&["MOVES"], SystemCtrlKind::Moves),
    (&["FETCHES"], SystemCtrlKind::Fetches),
    (&["SENDS"], SystemCtrlKind::Sends),
    (&["DISTRIBUTED", "SENDS"], SystemCtrlKind::DistributedSends),
    (&["REPLICATED", "SENDS"], SystemCtrlKind::ReplicatedSends),
    (&["REPLICATION", "QUEUES"], SystemCtrlKind::ReplicationQueues),
];

const DROP_CACHE_KINDS: &[(&[&str], SystemDropKind)] = &[
    (&["DNS", "CACHE"], SystemDropKind::DnsCache),
    (&["MARK", "CACHE"], SystemDropKind::MarkCache),
    (&["UNCOMPRESSED", "CACHE"], SystemDropKind::UncompressedCache),
    (&["COMPILED", "EXPRESSION", "CACHE"], SystemDropKind::CompiledExpressionCache),
    (&["QUERY", "CACHE"], SystemDropKind::QueryCache),
    (&["FILESYSTEM", "CACHE"], SystemDropKind::FilesystemCache),
];

const EXPLAIN_KINDS: &[(&[&str], ExplainKind)] = &[
    (&["AST"], ExplainKind::Ast),
    (&["SYNTAX"], ExplainKind::Syntax),
    (&["QUERY", "TREE"], ExplainKind::QueryTree),
    (&["PLAN"], ExplainKind::Plan),
    (&["PIPELINE"], ExplainKind::Pipeline),
    (&["ESTIMATE"], ExplainKind::Estimate),
    (&["TABLE", "OVERRIDE"], ExplainKind::TableOverride),
];

impl Parser {
    /// Consumes the first word sequence in `table` that matches.
    fn consume_word_table<T: Copy>(&mut self, table: &[(&[&str], T)]) -> Option<T> {
        table
            .iter()
            .find(|(words, _)| self.consume_words(words))
            .map(|(_, value)| *value)
    }

    pub(super) fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Drop)?;

        if self.consume_keyword(Keyword::Database) {
            let if_exists = self.parse_if_exists();
            let name = self.expect_identifier()?;
            let on_cluster = self.parse_on_cluster()?;
            return Ok(Statement::DropDatabase(DropDatabase {
                if_exists,
                name,
                on_cluster,
                span: self.span_from(start),
            }));
        }

        if let Some(entity) = self.consume_word_table(ACCESS_ENTITIES) {
            return Ok(Statement::DropUserOrRole(
                self.parse_drop_access(start, entity)?,
            ));
        }

        let temporary = self.consume_keyword(Keyword::Temporary);
        let target = match self.current().as_keyword() {
            Some(Keyword::Table) => DropTarget::Table,
            Some(Keyword::View) => DropTarget::View,
            Some(Keyword::Dictionary) => DropTarget::Dictionary,
            Some(Keyword::Function) => DropTarget::Function,
            _ => return Err(self.unexpected("TABLE, VIEW, DICTIONARY, FUNCTION or DATABASE")),
        };
        self.advance();
        let if_exists = self.parse_if_exists();
        let name = self.parse_table_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        let modifier = if self.consume_keyword(Keyword::Sync) {
            Some(DropModifier::Sync)
        } else if self.consume_words(&["NO", "DELAY"]) {
            Some(DropModifier::NoDelay)
        } else {
            None
        };
        Ok(Statement::Drop(DropStmt {
            target,
            temporary,
            if_exists,
            name,
            on_cluster,
            modifier,
            span: self.span_from(start),
        }))
    }

    /// `RENAME TABLE|DICTIONARY|DATABASE a TO b, ... [ON CLUSTER c]`
    pub(super) fn parse_rename(&mut self) -> Result<RenameStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Rename)?;
        let target = match self.current().as_keyword() {
            Some(Keyword::Table) => RenameTarget::Table,
            Some(Keyword::Dictionary) => RenameTarget::Dictionary,
            Some(Keyword::Database) => RenameTarget::Database,
            _ => return Err(self.unexpected("TABLE, DICTIONARY or DATABASE")),
        };
        self.advance();
        let pairs = self.parse_comma_separated(|parser| {
            let pair_start = parser.start();
            let old = parser.parse_table_identifier()?;
            parser.expect_keyword(Keyword::To)?;
            let new = parser.parse_table_identifier()?;
            Ok(TargetPair {
                old,
                new,
                span: parser.span_from(pair_start),
            })
        })?;
        let on_cluster = self.parse_on_cluster()?;
        Ok(RenameStmt {
            target,
            pairs,
            on_cluster,
            span: self.span_from(start),
        })
    }

    /// `TRUNCATE [TEMPORARY] [TABLE] [IF EXISTS] name [ON CLUSTER c]`
    pub(super) fn parse_truncate(&mut self) -> Result<TruncateTable, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Truncate)?;
        let temporary = self.consume_keyword(Keyword::Temporary);
        self.consume_keyword(Keyword::Table);
        let if_exists = self.parse_if_exists();
        let name = self.parse_table_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        Ok(TruncateTable {
            temporary,
            if_exists,
            name,
            on_cluster,
            span: self.span_from(start),
        })
    }

    /// `OPTIMIZE TABLE name [ON CLUSTER c] [PARTITION p] [FINAL]
    /// [DEDUPLICATE [BY cols] [EXCEPT cols]]`
    pub(super) fn parse_optimize(&mut self) -> Result<OptimizeStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Optimize)?;
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_table_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        let partition = if self.check_keyword(Keyword::Partition) {
            Some(self.parse_partition_clause()?)
        } else {
            None
        };
        let has_final = self.consume_keyword(Keyword::Final);
        let deduplicate = if self.check_keyword(Keyword::Deduplicate) {
            let dedup_start = self.start();
            self.advance();
            let by = if self.consume_keyword(Keyword::By) {
                Some(self.parse_expr_list()?)
            } else {
                None
            };
            let except = if self.consume_keyword(Keyword::Except) {
                Some(self.parse_expr_list()?)
            } else {
                None
            };
            Some(DeduplicateClause {
                by,
                except,
                span: self.span_from(dedup_start),
            })
        } else {
            None
        };
        Ok(OptimizeStmt {
            table,
            on_cluster,
            partition,
            has_final,
            deduplicate,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_system(&mut self) -> Result<SystemStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::System)?;
        let command_start = self.start();

        let command = if self.consume_word("FLUSH") {
            let distributed = if self.consume_word("LOGS") {
                None
            } else if self.consume_word("DISTRIBUTED") {
                Some(self.parse_table_identifier()?)
            } else {
                return Err(self.unexpected("LOGS or DISTRIBUTED"));
            };
            SystemCommand::Flush(SystemFlushExpr {
                distributed,
                span: self.span_from(command_start),
            })
        } else if self.consume_word("RELOAD") {
            let Some(kind) = self.consume_word_table(RELOAD_KINDS) else {
                return Err(self.unexpected("reload target"));
            };
            let dictionary = if kind == SystemReloadKind::Dictionary {
                Some(self.parse_table_identifier()?)
            } else {
                None
            };
            SystemCommand::Reload(SystemReloadExpr {
                kind,
                dictionary,
                span: self.span_from(command_start),
            })
        } else if self.consume_keyword(Keyword::Sync) {
            self.expect_word("REPLICA")?;
            let table = self.parse_table_identifier()?;
            let mode = if self.consume_word("STRICT") {
                Some(SyncReplicaMode::Strict)
            } else if self.consume_word("LIGHTWEIGHT") {
                Some(SyncReplicaMode::Lightweight)
            } else if self.consume_word("PULL") {
                Some(SyncReplicaMode::Pull)
            } else {
                None
            };
            SystemCommand::Sync(SystemSyncExpr {
                table,
                mode,
                span: self.span_from(command_start),
            })
        } else if self.check_word("START") || self.check_word("STOP") {
            let command = if self.consume_word("START") {
                SystemCtrlCommand::Start
            } else {
                self.advance();
                SystemCtrlCommand::Stop
            };
            let Some(kind) = self.consume_word_table(CTRL_KINDS) else {
                return Err(self.unexpected("MERGES, MOVES, FETCHES, SENDS or QUEUES"));
            };
            let table = if self.at_name() {
                Some(self.parse_table_identifier()?)
            } else {
                None
            };
            SystemCommand::Ctrl(SystemCtrlExpr {
                command,
                kind,
                table,
                span: self.span_from(command_start),
            })
        } else if self.consume_keyword(Keyword::Drop) {
            let Some(kind) = self.consume_word_table(DROP_CACHE_KINDS) else {
                return Err(self.unexpected("cache name"));
            };
            SystemCommand::Drop(SystemDropExpr {
                kind,
                span: self.span_from(command_start),
            })
        } else {
            return Err(self.unexpected("FLUSH, RELOAD, SYNC, START, STOP or DROP"));
        };

        Ok(SystemStmt {
            command,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_show(&mut self) -> Result<ShowStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Show)?;

        if self.consume_keyword(Keyword::Create) {
            let kind = match self.current().as_keyword() {
                Some(Keyword::Table) => Some(ShowKind::CreateTable),
                Some(Keyword::View) => Some(ShowKind::CreateView),
                Some(Keyword::Dictionary) => Some(ShowKind::CreateDictionary),
                Some(Keyword::Database) => Some(ShowKind::CreateDatabase),
                _ => None,
            };
            if kind.is_some() {
                self.advance();
            }
            let target = self.parse_table_identifier()?;
            return Ok(ShowStmt {
                kind: kind.unwrap_or(ShowKind::CreateTable),
                target: Some(target),
                from: None,
                like: None,
                limit: None,
                out_file: None,
                format: self.parse_format()?.map(|clause| clause.format),
                span: self.span_from(start),
            });
        }

        let kind = if self.consume_keyword(Keyword::Databases) {
            ShowKind::Databases
        } else if self.consume_keyword(Keyword::Tables) {
            ShowKind::Tables
        } else if self.consume_word("DICTIONARIES") {
            ShowKind::Dictionaries
        } else {
            return Err(self.unexpected("CREATE, DATABASES, TABLES or DICTIONARIES"));
        };
        let from = if self.consume_keyword(Keyword::From) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let negated = self.check_keyword(Keyword::Not)
            && matches!(
                self.peek().as_keyword(),
                Some(Keyword::Like | Keyword::Ilike)
            );
        if negated {
            self.advance();
        }
        let like = match self.current().as_keyword() {
            Some(keyword @ (Keyword::Like | Keyword::Ilike)) => {
                self.advance();
                Some(ShowPattern {
                    negated,
                    case_insensitive: keyword == Keyword::Ilike,
                    pattern: self.parse_expr()?,
                })
            }
            _ => None,
        };
        let limit = if self.consume_keyword(Keyword::Limit) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let out_file = if self.check_keyword(Keyword::Into) && self.peek().is_word("OUTFILE") {
            self.advance();
            self.advance();
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        let format = self.parse_format()?.map(|clause| clause.format);
        Ok(ShowStmt {
            kind,
            target: None,
            from,
            like,
            limit,
            out_file,
            format,
            span: self.span_from(start),
        })
    }

    /// `DESCRIBE|DESC [TABLE] name`
    pub(super) fn parse_describe(&mut self) -> Result<DescribeStmt, ParseError> {
        let start = self.start();
        if !self.consume_keyword(Keyword::Describe) {
            self.expect_keyword(Keyword::Desc)?;
        }
        let has_table_keyword = self.consume_keyword(Keyword::Table);
        let target = self.parse_table_identifier()?;
        Ok(DescribeStmt {
            has_table_keyword,
            target,
            span: self.span_from(start),
        })
    }

    /// `EXPLAIN [kind] statement`
    pub(super) fn parse_explain(&mut self) -> Result<ExplainStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Explain)?;
        let kind = self.consume_word_table(EXPLAIN_KINDS);
        let statement = self.parse_statement()?;
        Ok(ExplainStmt {
            kind,
            statement: Box::new(statement),
            span: self.span_from(start),
        })
    }

    /// `SET name = value, ...`
    pub(super) fn parse_set(&mut self) -> Result<SetStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Set)?;
        let settings = self.parse_comma_separated(Self::parse_setting_expr)?;
        Ok(SetStmt {
            settings,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_use(&mut self) -> Result<UseStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Use)?;
        let database = self.expect_identifier()?;
        Ok(UseStmt {
            database,
            span: self.span_from(start),
        })
    }

    /// `CHECK TABLE name [PARTITION p]`
    pub(super) fn parse_check(&mut self) -> Result<CheckStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Check)?;
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_table_identifier()?;
        let partition = if self.check_keyword(Keyword::Partition) {
            Some(self.parse_partition_clause()?)
        } else {
            None
        };
        Ok(CheckStmt {
            table,
            partition,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::ast::{
        AccessEntity, DropModifier, DropTarget, ExplainKind, ShowKind, Statement, SystemCommand,
        SystemCtrlKind, SystemReloadKind,
    };
    use crate::format::format_compact;

    fn parse_one(sql: &str) -> Statement {
        parse(sql).into_result().unwrap().remove(0)
    }

    #[test]
    fn test_drop_variants() {
        let Statement::Drop(drop) = parse_one("DROP TEMPORARY TABLE IF EXISTS db.t ON CLUSTER c SYNC")
        else {
            panic!("Expected DROP TABLE");
        };
        assert_eq!(drop.target, DropTarget::Table);
        assert!(drop.temporary && drop.if_exists);
        assert!(drop.on_cluster.is_some());
        assert_eq!(drop.modifier, Some(DropModifier::Sync));

        let Statement::Drop(drop) = parse_one("DROP DICTIONARY d NO DELAY") else {
            panic!("Expected DROP DICTIONARY");
        };
        assert_eq!(drop.modifier, Some(DropModifier::NoDelay));

        assert!(matches!(
            parse_one("DROP DATABASE IF EXISTS db"),
            Statement::DropDatabase(_)
        ));

        let Statement::DropUserOrRole(drop) = parse_one("DROP QUOTA q") else {
            panic!("Expected DROP QUOTA");
        };
        assert_eq!(drop.entity, AccessEntity::Quota);
    }

    #[test]
    fn test_rename_truncate_optimize() {
        let Statement::Rename(rename) = parse_one("RENAME TABLE a TO b, db.c TO db.d ON CLUSTER x")
        else {
            panic!("Expected RENAME");
        };
        assert_eq!(rename.pairs.len(), 2);
        assert!(rename.on_cluster.is_some());

        let statement = parse_one("TRUNCATE t");
        assert_eq!(format_compact(&statement), "TRUNCATE TABLE t");

        let Statement::Optimize(optimize) =
            parse_one("OPTIMIZE TABLE t PARTITION 202401 FINAL DEDUPLICATE BY a, b EXCEPT c")
        else {
            panic!("Expected OPTIMIZE");
        };
        assert!(optimize.partition.is_some());
        assert!(optimize.has_final);
        let deduplicate = optimize.deduplicate.unwrap();
        assert_eq!(deduplicate.by.unwrap().items.len(), 2);
        assert!(deduplicate.except.is_some());
    }

    #[test]
    fn test_system_commands() {
        let Statement::System(system) = parse_one("SYSTEM STOP TTL MERGES db.t") else {
            panic!("Expected SYSTEM");
        };
        let SystemCommand::Ctrl(ctrl) = &system.command else {
            panic!("Expected START/STOP");
        };
        assert_eq!(ctrl.kind, SystemCtrlKind::TtlMerges);
        assert!(ctrl.table.is_some());

        let Statement::System(system) = parse_one("SYSTEM RELOAD DICTIONARY d") else {
            panic!("Expected SYSTEM");
        };
        let SystemCommand::Reload(reload) = &system.command else {
            panic!("Expected RELOAD");
        };
        assert_eq!(reload.kind, SystemReloadKind::Dictionary);
        assert!(reload.dictionary.is_some());

        for sql in [
            "SYSTEM FLUSH LOGS",
            "SYSTEM FLUSH DISTRIBUTED t",
            "SYSTEM SYNC REPLICA t STRICT",
            "SYSTEM START MERGES",
            "SYSTEM DROP COMPILED EXPRESSION CACHE",
        ] {
            assert_eq!(format_compact(&parse_one(sql)), sql);
        }
    }

    #[test]
    fn test_show() {
        let Statement::Show(show) = parse_one("SHOW CREATE DICTIONARY db.d") else {
            panic!("Expected SHOW");
        };
        assert_eq!(show.kind, ShowKind::CreateDictionary);

        let sql = "SHOW TABLES FROM db NOT ILIKE '%tmp%' LIMIT 10 INTO OUTFILE 'out.tsv' FORMAT TSV";
        let statement = parse_one(sql);
        let Statement::Show(show) = &statement else {
            panic!("Expected SHOW");
        };
        let like = show.like.as_ref().unwrap();
        assert!(like.negated && like.case_insensitive);
        assert_eq!(format_compact(&statement), sql);
    }

    #[test]
    fn test_describe_explain_set_use_check() {
        let Statement::Describe(describe) = parse_one("DESC TABLE t") else {
            panic!("Expected DESCRIBE");
        };
        assert!(describe.has_table_keyword);

        let Statement::Explain(explain) = parse_one("EXPLAIN QUERY TREE SELECT 1") else {
            panic!("Expected EXPLAIN");
        };
        assert_eq!(explain.kind, Some(ExplainKind::QueryTree));
        assert!(matches!(*explain.statement, Statement::Select(_)));

        let Statement::Set(set) = parse_one("SET max_threads = 8, readonly = 1") else {
            panic!("Expected SET");
        };
        assert_eq!(set.settings.len(), 2);

        assert_eq!(format_compact(&parse_one("USE db")), "USE db");
        assert_eq!(
            format_compact(&parse_one("CHECK TABLE t PARTITION ID '1'")),
            "CHECK TABLE t PARTITION ID '1'"
        );
    }
}
