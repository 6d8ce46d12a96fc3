//! `CREATE` statements and the DDL pieces they share with `ALTER TABLE`.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::UNARY_BP;
use crate::ast::{
    ColumnExpr, ConstraintClause, ConstraintKind, CreateDatabase, CreateDictionary,
    CreateFunction, CreateLiveView, CreateMaterializedView, CreateNamedCollection, CreateTable,
    CreateView, DestinationClause, DictionaryArgExpr, DictionaryAttribute,
    DictionaryAttributeFlag, DictionaryEngineClause, DictionaryLayoutClause, DictionaryLifetime,
    DictionaryLifetimeClause, DictionaryRangeClause, DictionarySourceClause, EngineExpr, Expr,
    NamedCollectionParam, Node, PartitionByClause, PrimaryKeyClause, ProjectionSelectStmt,
    RefreshExpr, RefreshFrequency, RefreshInterval, SampleByClause, SettingsClause, SqlSecurity,
    Statement, SubQuery, TableElement, TableIndex, TableProjection, TableSchemaClause, TtlAction,
    TtlClause, TtlExpr, TtlPolicy, TtlPolicyRule, WithTimeoutClause,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    pub(super) fn parse_create(&mut self) -> Result<Statement, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Create)?;
        let or_replace = self.consume_keywords(&[Keyword::Or, Keyword::Replace]);
        match self.current().as_keyword() {
            Some(Keyword::Table | Keyword::Temporary) => Ok(Statement::CreateTable(
                self.parse_create_table(start, or_replace)?,
            )),
            Some(Keyword::View) => Ok(Statement::CreateView(
                self.parse_create_view(start, or_replace)?,
            )),
            Some(Keyword::Materialized) => Ok(Statement::CreateMaterializedView(
                self.parse_create_materialized_view(start)?,
            )),
            Some(Keyword::Live) => Ok(Statement::CreateLiveView(
                self.parse_create_live_view(start)?,
            )),
            Some(Keyword::Dictionary) => Ok(Statement::CreateDictionary(
                self.parse_create_dictionary(start, or_replace)?,
            )),
            Some(Keyword::Database) => Ok(Statement::CreateDatabase(
                self.parse_create_database(start)?,
            )),
            Some(Keyword::Function) => Ok(Statement::CreateFunction(
                self.parse_create_function(start, or_replace)?,
            )),
            Some(Keyword::Named) => Ok(Statement::CreateNamedCollection(
                self.parse_create_named_collection(start)?,
            )),
            Some(Keyword::Role) => Ok(Statement::CreateRole(
                self.parse_create_role(start, or_replace)?,
            )),
            Some(Keyword::User) => Ok(Statement::CreateUser(
                self.parse_create_user(start, or_replace)?,
            )),
            _ => Err(self.unexpected(
                "TABLE, VIEW, DICTIONARY, DATABASE, FUNCTION, NAMED COLLECTION, ROLE or USER",
            )),
        }
    }

    fn parse_create_database(&mut self, start: usize) -> Result<CreateDatabase, ParseError> {
        self.expect_keyword(Keyword::Database)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.expect_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        let engine = self.parse_engine()?;
        let comment = self.parse_comment()?;
        Ok(CreateDatabase {
            if_not_exists,
            name,
            on_cluster,
            engine,
            comment,
            span: self.span_from(start),
        })
    }

    fn parse_create_table(
        &mut self,
        start: usize,
        or_replace: bool,
    ) -> Result<CreateTable, ParseError> {
        let temporary = self.consume_keyword(Keyword::Temporary);
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_table_identifier()?;
        let uuid = self.parse_uuid()?;
        let on_cluster = self.parse_on_cluster()?;
        let table_schema = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_table_schema()?)
        } else if self.check_keyword(Keyword::As) && !self.peek_starts_subquery() {
            Some(self.parse_schema_alias()?)
        } else {
            None
        };
        let engine = self.parse_engine()?;
        let mut comment = self.parse_comment()?;
        let subquery = if self.check_keyword(Keyword::As) {
            Some(self.parse_as_subquery()?)
        } else {
            None
        };
        if comment.is_none() {
            comment = self.parse_comment()?;
        }
        Ok(CreateTable {
            or_replace,
            temporary,
            if_not_exists,
            name,
            uuid,
            on_cluster,
            table_schema,
            engine,
            subquery,
            comment,
            span: self.span_from(start),
        })
    }

    fn parse_create_view(&mut self, start: usize, or_replace: bool) -> Result<CreateView, ParseError> {
        self.expect_keyword(Keyword::View)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_table_identifier()?;
        let uuid = self.parse_uuid()?;
        let on_cluster = self.parse_on_cluster()?;
        let table_schema = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_table_schema()?)
        } else {
            None
        };
        let subquery = Some(self.parse_as_subquery()?);
        Ok(CreateView {
            or_replace,
            if_not_exists,
            name,
            uuid,
            on_cluster,
            table_schema,
            subquery,
            span: self.span_from(start),
        })
    }

    /// `MATERIALIZED VIEW [IF NOT EXISTS] name` followed by its options in
    /// any order and `AS SELECT ...`.
    fn parse_create_materialized_view(
        &mut self,
        start: usize,
    ) -> Result<CreateMaterializedView, ParseError> {
        self.expect_keyword(Keyword::Materialized)?;
        self.expect_keyword(Keyword::View)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_table_identifier()?;
        let mut view = CreateMaterializedView {
            if_not_exists,
            name,
            on_cluster: None,
            refresh: None,
            randomize_for: None,
            depends_on: Vec::new(),
            settings: None,
            has_append: false,
            engine: None,
            destination: None,
            destination_schema: None,
            has_empty: false,
            definer: None,
            sql_security: None,
            populate: false,
            subquery: None,
            comment: None,
            span: self.span_from(start),
        };

        loop {
            match self.current().as_keyword() {
                Some(Keyword::On) if self.peek_keyword(1, Keyword::Cluster) => {
                    view.on_cluster = self.parse_on_cluster()?;
                }
                Some(Keyword::Refresh) => view.refresh = Some(self.parse_refresh()?),
                Some(Keyword::Randomize) => {
                    self.advance();
                    self.expect_word("FOR")?;
                    view.randomize_for = Some(self.parse_refresh_interval()?);
                }
                Some(Keyword::Depends) => {
                    self.advance();
                    self.expect_keyword(Keyword::On)?;
                    view.depends_on = self.parse_comma_separated(Self::parse_table_identifier)?;
                }
                Some(Keyword::Settings) => view.settings = self.parse_settings()?,
                Some(Keyword::Append) => {
                    self.advance();
                    view.has_append = true;
                }
                Some(Keyword::Engine) => view.engine = self.parse_engine()?,
                Some(Keyword::To) => view.destination = Some(self.parse_destination()?),
                Some(Keyword::Empty) => {
                    self.advance();
                    view.has_empty = true;
                }
                Some(Keyword::Definer) => {
                    self.advance();
                    self.expect(&TokenKind::Eq)?;
                    view.definer = Some(self.expect_identifier()?);
                }
                Some(Keyword::Sql) => {
                    self.advance();
                    self.expect_keyword(Keyword::Security)?;
                    view.sql_security = Some(self.parse_sql_security()?);
                }
                Some(Keyword::Populate) => {
                    self.advance();
                    view.populate = true;
                }
                Some(Keyword::Comment) => view.comment = self.parse_comment()?,
                _ if self.check(&TokenKind::LeftParen) => {
                    view.destination_schema = Some(self.parse_table_schema()?);
                }
                _ => break,
            }
        }

        view.subquery = Some(self.parse_as_subquery()?);
        if view.comment.is_none() {
            view.comment = self.parse_comment()?;
        }
        view.span = self.span_from(start);
        Ok(view)
    }

    fn parse_sql_security(&mut self) -> Result<SqlSecurity, ParseError> {
        if self.consume_keyword(Keyword::Definer) {
            Ok(SqlSecurity::Definer)
        } else if self.consume_word("INVOKER") {
            Ok(SqlSecurity::Invoker)
        } else if self.consume_word("NONE") {
            Ok(SqlSecurity::None)
        } else {
            Err(self.unexpected("DEFINER, INVOKER or NONE"))
        }
    }

    /// `REFRESH EVERY|AFTER interval [OFFSET interval]`
    fn parse_refresh(&mut self) -> Result<RefreshExpr, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Refresh)?;
        let frequency = if self.consume_word("EVERY") {
            RefreshFrequency::Every
        } else if self.consume_keyword(Keyword::After) {
            RefreshFrequency::After
        } else {
            return Err(self.unexpected("EVERY or AFTER"));
        };
        let interval = self.parse_refresh_interval()?;
        let offset = if self.consume_keyword(Keyword::Offset) {
            Some(self.parse_refresh_interval()?)
        } else {
            None
        };
        Ok(RefreshExpr {
            frequency,
            interval,
            offset,
            span: self.span_from(start),
        })
    }

    fn parse_refresh_interval(&mut self) -> Result<RefreshInterval, ParseError> {
        let value = self.parse_expression(UNARY_BP)?;
        let unit = self.expect_identifier()?;
        Ok(RefreshInterval { value, unit })
    }

    fn parse_create_live_view(&mut self, start: usize) -> Result<CreateLiveView, ParseError> {
        self.expect_keyword(Keyword::Live)?;
        self.expect_keyword(Keyword::View)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_table_identifier()?;
        let uuid = self.parse_uuid()?;
        let on_cluster = self.parse_on_cluster()?;
        let with_timeout = if self.check_keyword(Keyword::With) && self.peek().is_word("TIMEOUT") {
            let timeout_start = self.start();
            self.advance();
            self.advance();
            let seconds = if matches!(self.current().kind, TokenKind::Number(_)) {
                Some(self.parse_number_literal()?)
            } else {
                None
            };
            Some(WithTimeoutClause {
                seconds,
                span: self.span_from(timeout_start),
            })
        } else {
            None
        };
        let destination = if self.check_keyword(Keyword::To) {
            Some(self.parse_destination()?)
        } else {
            None
        };
        let table_schema = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_table_schema()?)
        } else {
            None
        };
        let subquery = Some(self.parse_as_subquery()?);
        Ok(CreateLiveView {
            if_not_exists,
            name,
            uuid,
            on_cluster,
            with_timeout,
            destination,
            table_schema,
            subquery,
            span: self.span_from(start),
        })
    }

    fn parse_destination(&mut self) -> Result<DestinationClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::To)?;
        let table = self.parse_table_identifier()?;
        Ok(DestinationClause {
            table,
            span: self.span_from(start),
        })
    }

    /// True when `AS` is followed by a query rather than a table name.
    fn peek_starts_subquery(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(Keyword::Select | Keyword::With) | TokenKind::LeftParen
        )
    }

    /// `AS SELECT ...` or `AS (SELECT ...)`
    fn parse_as_subquery(&mut self) -> Result<SubQuery, ParseError> {
        self.expect_keyword(Keyword::As)?;
        if self.check(&TokenKind::LeftParen) {
            return self.parse_paren_subquery();
        }
        let start = self.start();
        let select = self.parse_select_query()?;
        Ok(SubQuery {
            has_paren: false,
            select: Box::new(select),
            span: self.span_from(start),
        })
    }

    // Table schema

    /// `(element, ...)`
    fn parse_table_schema(&mut self) -> Result<TableSchemaClause, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let elements = self.parse_comma_separated(Self::parse_table_element)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(TableSchemaClause {
            elements,
            alias_table: None,
            table_function: None,
            span: self.span_from(start),
        })
    }

    /// `AS other_table` or `AS table_function(...)`
    fn parse_schema_alias(&mut self) -> Result<TableSchemaClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::As)?;
        let (alias_table, table_function) = if self.peek().kind == TokenKind::LeftParen {
            (None, Some(self.parse_table_function()?))
        } else {
            (Some(self.parse_table_identifier()?), None)
        };
        Ok(TableSchemaClause {
            elements: Vec::new(),
            alias_table,
            table_function,
            span: self.span_from(start),
        })
    }

    fn parse_table_element(&mut self) -> Result<TableElement, ParseError> {
        let start = self.start();
        match self.current().as_keyword() {
            Some(Keyword::Index) => {
                self.advance();
                Ok(TableElement::Index(self.parse_index_definition(start)?))
            }
            Some(Keyword::Projection) => {
                self.advance();
                Ok(TableElement::Projection(
                    self.parse_projection_definition(start, true)?,
                ))
            }
            Some(Keyword::Constraint) => {
                self.advance();
                let name = self.expect_identifier()?;
                let kind = if self.consume_keyword(Keyword::Check) {
                    ConstraintKind::Check
                } else if self.consume_keyword(Keyword::Assume) {
                    ConstraintKind::Assume
                } else {
                    return Err(self.unexpected("CHECK or ASSUME"));
                };
                let expr = self.parse_expr()?;
                Ok(TableElement::Constraint(ConstraintClause {
                    name,
                    kind,
                    expr,
                    span: self.span_from(start),
                }))
            }
            Some(Keyword::Primary) if self.peek_keyword(1, Keyword::Key) => {
                Ok(TableElement::PrimaryKey(self.parse_primary_key()?))
            }
            _ => Ok(TableElement::Column(self.parse_column_def()?)),
        }
    }

    /// `name expr TYPE type [GRANULARITY n]`, after `INDEX`.
    pub(super) fn parse_index_definition(&mut self, start: usize) -> Result<TableIndex, ParseError> {
        let name = self.expect_identifier()?;
        let expr = self.parse_expr()?;
        let column_expr = ColumnExpr {
            span: expr.span(),
            expr: Box::new(expr),
            alias: None,
        };
        self.expect_word("TYPE")?;
        let index_type = self.parse_column_type()?;
        let granularity = if self.consume_keyword(Keyword::Granularity) {
            Some(self.parse_number_literal()?)
        } else {
            None
        };
        Ok(TableIndex {
            name,
            column_expr,
            index_type,
            granularity,
            span: self.span_from(start),
        })
    }

    /// `name ([WITH ...] SELECT ... [GROUP BY ...] [ORDER BY ...])`, after
    /// `PROJECTION`.
    pub(super) fn parse_projection_definition(
        &mut self,
        start: usize,
        include_keyword: bool,
    ) -> Result<TableProjection, ParseError> {
        let name = self.expect_identifier()?;
        let select_start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let with = self.parse_with_clause()?;
        self.expect_keyword(Keyword::Select)?;
        let items = self.parse_column_expr_list(&TokenKind::RightParen)?;
        let group_by = if self.check_keyword(Keyword::Group) {
            Some(self.parse_group_by()?)
        } else {
            None
        };
        let order_by = if self.consume_keywords(&[Keyword::Order, Keyword::By]) {
            Some(self.parse_expr_list()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        let select = ProjectionSelectStmt {
            with,
            items,
            group_by,
            order_by,
            span: self.span_from(select_start),
        };
        Ok(TableProjection {
            include_keyword,
            name,
            select,
            span: self.span_from(start),
        })
    }

    fn parse_primary_key(&mut self) -> Result<PrimaryKeyClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Primary)?;
        self.expect_keyword(Keyword::Key)?;
        let expr = self.parse_expr()?;
        Ok(PrimaryKeyClause {
            expr,
            span: self.span_from(start),
        })
    }

    // Engine

    /// `ENGINE [=] Name[(params)]` followed by its clauses in any order.
    fn parse_engine(&mut self) -> Result<Option<EngineExpr>, ParseError> {
        if !self.check_keyword(Keyword::Engine) {
            return Ok(None);
        }
        let start = self.start();
        self.advance();
        self.consume(&TokenKind::Eq);
        let name = self.expect_identifier()?;
        let params = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_param_expr_list()?)
        } else {
            None
        };
        let mut engine = EngineExpr {
            name,
            params,
            order_by: None,
            partition_by: None,
            primary_key: None,
            sample_by: None,
            ttl: None,
            settings: None,
            span: self.span_from(start),
        };

        loop {
            let clause_start = self.start();
            match self.current().as_keyword() {
                Some(Keyword::Order) if self.peek_keyword(1, Keyword::By) => {
                    engine.order_by = Some(self.parse_order_by()?);
                }
                Some(Keyword::Partition) if self.peek_keyword(1, Keyword::By) => {
                    self.advance();
                    self.advance();
                    let items = self.parse_expr_list()?;
                    engine.partition_by = Some(PartitionByClause {
                        items,
                        span: self.span_from(clause_start),
                    });
                }
                Some(Keyword::Primary) if self.peek_keyword(1, Keyword::Key) => {
                    engine.primary_key = Some(self.parse_primary_key()?);
                }
                Some(Keyword::Sample) if self.peek_keyword(1, Keyword::By) => {
                    self.advance();
                    self.advance();
                    let expr = self.parse_expr()?;
                    engine.sample_by = Some(SampleByClause {
                        expr,
                        span: self.span_from(clause_start),
                    });
                }
                Some(Keyword::Ttl) => engine.ttl = Some(self.parse_ttl_clause()?),
                Some(Keyword::Settings) => engine.settings = self.parse_settings()?,
                _ => break,
            }
        }

        engine.span = self.span_from(start);
        Ok(Some(engine))
    }

    // TTL

    /// `TTL item, ...`
    pub(super) fn parse_ttl_clause(&mut self) -> Result<TtlClause, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Ttl)?;
        let items = self.parse_clause_list(Self::parse_ttl_expr)?;
        Ok(TtlClause {
            items,
            span: self.span_from(start),
        })
    }

    /// `expr [DELETE | TO DISK 'd' | TO VOLUME 'v' | RECOMPRESS CODEC(...)]
    /// [WHERE expr] [GROUP BY ...]`
    pub(super) fn parse_ttl_expr(&mut self) -> Result<TtlExpr, ParseError> {
        let start = self.start();
        let expr = self.parse_expr()?;
        let policy = self.parse_ttl_policy()?;
        Ok(TtlExpr {
            expr,
            policy,
            span: self.span_from(start),
        })
    }

    fn parse_ttl_policy(&mut self) -> Result<Option<TtlPolicy>, ParseError> {
        let start = self.start();
        let action = if self.consume_keyword(Keyword::Delete) {
            Some(TtlAction::Delete)
        } else if self.check_keyword(Keyword::To) && self.peek().is_word("DISK") {
            self.advance();
            self.advance();
            Some(TtlAction::ToDisk(self.parse_string_literal()?))
        } else if self.check_keyword(Keyword::To) && self.peek().is_word("VOLUME") {
            self.advance();
            self.advance();
            Some(TtlAction::ToVolume(self.parse_string_literal()?))
        } else if self.consume_word("RECOMPRESS") {
            Some(TtlAction::Recompress(self.parse_codec()?))
        } else {
            None
        };
        let rule = action.map(|action| TtlPolicyRule {
            action,
            span: self.span_from(start),
        });
        let where_expr = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let group_by = if self.check_keyword(Keyword::Group) {
            Some(self.parse_group_by()?)
        } else {
            None
        };
        if rule.is_none() && where_expr.is_none() && group_by.is_none() {
            return Ok(None);
        }
        Ok(Some(TtlPolicy {
            rule,
            where_expr,
            group_by,
            span: self.span_from(start),
        }))
    }

    // Dictionaries

    fn parse_create_dictionary(
        &mut self,
        start: usize,
        or_replace: bool,
    ) -> Result<CreateDictionary, ParseError> {
        self.expect_keyword(Keyword::Dictionary)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_table_identifier()?;
        let uuid = self.parse_uuid()?;
        let on_cluster = self.parse_on_cluster()?;
        self.expect(&TokenKind::LeftParen)?;
        let attributes = self.parse_comma_separated(Self::parse_dictionary_attribute)?;
        self.expect(&TokenKind::RightParen)?;
        let engine = self.parse_dictionary_engine()?;
        let comment = self.parse_comment()?;
        Ok(CreateDictionary {
            or_replace,
            if_not_exists,
            name,
            uuid,
            on_cluster,
            attributes,
            engine,
            comment,
            span: self.span_from(start),
        })
    }

    fn parse_dictionary_attribute(&mut self) -> Result<DictionaryAttribute, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        let attribute_type = self.parse_column_type()?;
        let mut default = None;
        let mut expression = None;
        let mut flags = Vec::new();
        loop {
            if self.consume_keyword(Keyword::Default) {
                default = Some(self.parse_expr()?);
            } else if self.consume_word("EXPRESSION") {
                expression = Some(self.parse_expr()?);
            } else if self.consume_word("HIERARCHICAL") {
                flags.push(DictionaryAttributeFlag::Hierarchical);
            } else if self.consume_word("INJECTIVE") {
                flags.push(DictionaryAttributeFlag::Injective);
            } else if self.consume_word("IS_OBJECT_ID") {
                flags.push(DictionaryAttributeFlag::IsObjectId);
            } else {
                break;
            }
        }
        Ok(DictionaryAttribute {
            name,
            attribute_type,
            default,
            expression,
            flags,
            span: self.span_from(start),
        })
    }

    /// `PRIMARY KEY`, `SOURCE`, `LIFETIME`, `LAYOUT`, `RANGE` and `SETTINGS`
    /// parts in any order.
    fn parse_dictionary_engine(&mut self) -> Result<Option<DictionaryEngineClause>, ParseError> {
        let start = self.start();
        let mut engine = DictionaryEngineClause {
            primary_key: None,
            source: None,
            lifetime: None,
            layout: None,
            range: None,
            settings: None,
            span: self.span_from(start),
        };
        let mut found = false;
        loop {
            let part_start = self.start();
            if self.check_keyword(Keyword::Primary) && self.peek_keyword(1, Keyword::Key) {
                engine.primary_key = Some(self.parse_primary_key()?);
            } else if self.consume_word("SOURCE") {
                self.expect(&TokenKind::LeftParen)?;
                let source = self.expect_identifier()?;
                let args = self.parse_dictionary_args()?;
                self.expect(&TokenKind::RightParen)?;
                engine.source = Some(DictionarySourceClause {
                    source,
                    args,
                    span: self.span_from(part_start),
                });
            } else if self.consume_word("LIFETIME") {
                self.expect(&TokenKind::LeftParen)?;
                let lifetime = if self.consume_word("MIN") {
                    let min = self.parse_number_literal()?;
                    self.expect_word("MAX")?;
                    let max = self.parse_number_literal()?;
                    DictionaryLifetime::Range { min, max }
                } else {
                    DictionaryLifetime::Fixed(self.parse_number_literal()?)
                };
                self.expect(&TokenKind::RightParen)?;
                engine.lifetime = Some(DictionaryLifetimeClause {
                    lifetime,
                    span: self.span_from(part_start),
                });
            } else if self.consume_word("LAYOUT") {
                self.expect(&TokenKind::LeftParen)?;
                let layout = self.expect_identifier()?;
                let args = self.parse_dictionary_args()?;
                self.expect(&TokenKind::RightParen)?;
                engine.layout = Some(DictionaryLayoutClause {
                    layout,
                    args,
                    span: self.span_from(part_start),
                });
            } else if self.check_keyword(Keyword::Range) && self.peek().kind == TokenKind::LeftParen
            {
                self.advance();
                self.advance();
                self.expect_word("MIN")?;
                let min = self.expect_identifier()?;
                self.expect_word("MAX")?;
                let max = self.expect_identifier()?;
                self.expect(&TokenKind::RightParen)?;
                engine.range = Some(DictionaryRangeClause {
                    min,
                    max,
                    span: self.span_from(part_start),
                });
            } else if self.check_keyword(Keyword::Settings)
                && self.peek().kind == TokenKind::LeftParen
            {
                self.advance();
                self.advance();
                let items = self.parse_comma_separated(Self::parse_setting_expr)?;
                self.expect(&TokenKind::RightParen)?;
                engine.settings = Some(SettingsClause {
                    items,
                    span: self.span_from(part_start),
                });
            } else {
                break;
            }
            found = true;
        }
        if !found {
            return Ok(None);
        }
        engine.span = self.span_from(start);
        Ok(Some(engine))
    }

    /// `(name value ...)`, the argument list of a dictionary source or
    /// layout.
    fn parse_dictionary_args(&mut self) -> Result<Vec<DictionaryArgExpr>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut args = Vec::new();
        while !self.check(&TokenKind::RightParen) {
            let start = self.start();
            let name = self.expect_identifier()?;
            let value = if self.at_name() && self.peek().kind != TokenKind::LeftParen {
                Expr::Ident(self.expect_identifier()?)
            } else {
                self.parse_expr()?
            };
            args.push(DictionaryArgExpr {
                name,
                value,
                span: self.span_from(start),
            });
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(args)
    }

    // Functions and named collections

    /// `FUNCTION [IF NOT EXISTS] name [ON CLUSTER c] AS (params) -> body`
    fn parse_create_function(
        &mut self,
        start: usize,
        or_replace: bool,
    ) -> Result<CreateFunction, ParseError> {
        self.expect_keyword(Keyword::Function)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.expect_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        self.expect_keyword(Keyword::As)?;
        let params = self.parse_param_expr_list()?;
        self.expect(&TokenKind::Arrow)?;
        let body = self.parse_expr()?;
        Ok(CreateFunction {
            or_replace,
            if_not_exists,
            name,
            on_cluster,
            params,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_create_named_collection(
        &mut self,
        start: usize,
    ) -> Result<CreateNamedCollection, ParseError> {
        self.expect_keyword(Keyword::Named)?;
        self.expect_keyword(Keyword::Collection)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.expect_identifier()?;
        let on_cluster = self.parse_on_cluster()?;
        self.expect_keyword(Keyword::As)?;
        let params = self.parse_comma_separated(Self::parse_named_collection_param)?;
        Ok(CreateNamedCollection {
            if_not_exists,
            name,
            on_cluster,
            params,
            span: self.span_from(start),
        })
    }

    fn parse_named_collection_param(&mut self) -> Result<NamedCollectionParam, ParseError> {
        let start = self.start();
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let overridable = if self.consume_word("OVERRIDABLE") {
            Some(true)
        } else if self.check_keyword(Keyword::Not) && self.peek().is_word("OVERRIDABLE") {
            self.advance();
            self.advance();
            Some(false)
        } else {
            None
        };
        Ok(NamedCollectionParam {
            name,
            value,
            overridable,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::ast::{DictionaryLifetime, SqlSecurity, Statement, TableElement, TtlAction};
    use crate::format::format_compact;

    fn parse_one(sql: &str) -> Statement {
        parse(sql).into_result().unwrap().remove(0)
    }

    #[test]
    fn test_create_table_with_engine() {
        let statement =
            parse_one("CREATE TABLE t (id UInt64, name String) ENGINE = MergeTree() ORDER BY id");
        let Statement::CreateTable(create) = &statement else {
            panic!("Expected CREATE TABLE");
        };
        let schema = create.table_schema.as_ref().unwrap();
        assert_eq!(schema.columns().count(), 2);
        let engine = create.engine.as_ref().unwrap();
        assert_eq!(engine.name.name, "MergeTree");
        assert!(engine.order_by.is_some());
    }

    #[test]
    fn test_create_table_elements() {
        let statement = parse_one(
            "CREATE TABLE IF NOT EXISTS db.t ON CLUSTER c (\
             id UInt64 CODEC(Delta, ZSTD) COMMENT 'key', \
             d Date DEFAULT today() TTL d + INTERVAL 1 MONTH, \
             INDEX idx id TYPE minmax GRANULARITY 1, \
             PROJECTION p (SELECT id ORDER BY d), \
             CONSTRAINT positive CHECK id > 0, \
             PRIMARY KEY id\
             ) ENGINE = ReplacingMergeTree(d) PARTITION BY toYYYYMM(d) SAMPLE BY id \
             TTL d + INTERVAL 1 YEAR TO VOLUME 'cold', d + INTERVAL 2 YEAR DELETE \
             SETTINGS index_granularity = 8192 COMMENT 'events'",
        );
        let Statement::CreateTable(create) = &statement else {
            panic!("Expected CREATE TABLE");
        };
        assert!(create.if_not_exists);
        let elements = &create.table_schema.as_ref().unwrap().elements;
        assert_eq!(elements.len(), 6);
        assert!(matches!(elements[2], TableElement::Index(_)));
        assert!(matches!(elements[3], TableElement::Projection(_)));
        assert!(matches!(elements[4], TableElement::Constraint(_)));
        assert!(matches!(elements[5], TableElement::PrimaryKey(_)));
        let engine = create.engine.as_ref().unwrap();
        assert!(engine.partition_by.is_some());
        assert!(engine.sample_by.is_some());
        let ttl = engine.ttl.as_ref().unwrap();
        assert_eq!(ttl.items.len(), 2);
        let rule = ttl.items[0].policy.as_ref().unwrap().rule.as_ref().unwrap();
        assert!(matches!(rule.action, TtlAction::ToVolume(_)));
        assert_eq!(engine.settings.as_ref().unwrap().items.len(), 1);
        assert!(create.comment.is_some());
    }

    #[test]
    fn test_create_table_as() {
        let statement = parse_one("CREATE TABLE t2 AS t1 ENGINE = Memory");
        let Statement::CreateTable(create) = &statement else {
            panic!("Expected CREATE TABLE");
        };
        assert!(create.table_schema.as_ref().unwrap().alias_table.is_some());
        assert!(create.engine.as_ref().unwrap().params.is_none());

        let statement = parse_one("CREATE TABLE t ENGINE = Log AS SELECT 1");
        let Statement::CreateTable(create) = &statement else {
            panic!("Expected CREATE TABLE");
        };
        assert!(!create.subquery.as_ref().unwrap().has_paren);
        assert_eq!(
            format_compact(&statement),
            "CREATE TABLE t ENGINE = Log AS SELECT 1"
        );
    }

    #[test]
    fn test_create_views() {
        let statement = parse_one("CREATE OR REPLACE VIEW v AS SELECT a FROM t");
        let Statement::CreateView(view) = &statement else {
            panic!("Expected CREATE VIEW");
        };
        assert!(view.or_replace);

        let statement = parse_one(
            "CREATE MATERIALIZED VIEW mv REFRESH EVERY 1 HOUR OFFSET 5 MINUTE \
             RANDOMIZE FOR 10 MINUTE DEPENDS ON a, b APPEND TO dest (x UInt8) \
             DEFINER = alice SQL SECURITY DEFINER AS SELECT x FROM src",
        );
        let Statement::CreateMaterializedView(view) = &statement else {
            panic!("Expected CREATE MATERIALIZED VIEW");
        };
        assert!(view.refresh.as_ref().unwrap().offset.is_some());
        assert!(view.randomize_for.is_some());
        assert_eq!(view.depends_on.len(), 2);
        assert!(view.has_append);
        assert!(view.destination.is_some());
        assert!(view.destination_schema.is_some());
        assert_eq!(view.sql_security, Some(SqlSecurity::Definer));

        let statement = parse_one("CREATE LIVE VIEW lv WITH TIMEOUT 15 AS SELECT 1");
        let Statement::CreateLiveView(view) = &statement else {
            panic!("Expected CREATE LIVE VIEW");
        };
        assert!(view.with_timeout.as_ref().unwrap().seconds.is_some());
    }

    #[test]
    fn test_create_dictionary() {
        let statement = parse_one(
            "CREATE DICTIONARY d (id UInt64, parent UInt64 DEFAULT 0 HIERARCHICAL, name String EXPRESSION upper(raw)) \
             PRIMARY KEY id SOURCE(CLICKHOUSE(host 'localhost' port 9000 db default table src)) \
             LIFETIME(MIN 0 MAX 300) LAYOUT(HASHED()) SETTINGS(max_threads = 2)",
        );
        let Statement::CreateDictionary(dictionary) = &statement else {
            panic!("Expected CREATE DICTIONARY");
        };
        assert_eq!(dictionary.attributes.len(), 3);
        assert_eq!(dictionary.attributes[1].flags.len(), 1);
        let engine = dictionary.engine.as_ref().unwrap();
        assert_eq!(engine.source.as_ref().unwrap().args.len(), 4);
        assert!(matches!(
            engine.lifetime.as_ref().unwrap().lifetime,
            DictionaryLifetime::Range { .. }
        ));
        assert!(engine.layout.as_ref().unwrap().args.is_empty());
        assert!(engine.settings.is_some());
    }

    #[test]
    fn test_create_function_and_collection() {
        let statement = parse_one("CREATE FUNCTION linear AS (x, k, b) -> k * x + b");
        let Statement::CreateFunction(function) = &statement else {
            panic!("Expected CREATE FUNCTION");
        };
        assert_eq!(function.params.items.items.len(), 3);
        assert_eq!(
            format_compact(&statement),
            "CREATE FUNCTION linear AS (x, k, b) -> k * x + b"
        );

        let statement = parse_one(
            "CREATE NAMED COLLECTION conn AS host = 'h' OVERRIDABLE, port = 9000 NOT OVERRIDABLE",
        );
        let Statement::CreateNamedCollection(collection) = &statement else {
            panic!("Expected CREATE NAMED COLLECTION");
        };
        assert_eq!(collection.params[0].overridable, Some(true));
        assert_eq!(collection.params[1].overridable, Some(false));
    }

    #[test]
    fn test_create_database() {
        let statement = parse_one("CREATE DATABASE IF NOT EXISTS db ENGINE = Atomic COMMENT 'x'");
        let Statement::CreateDatabase(database) = &statement else {
            panic!("Expected CREATE DATABASE");
        };
        assert!(database.if_not_exists);
        assert!(database.engine.is_some());
        assert!(database.comment.is_some());
    }
}
