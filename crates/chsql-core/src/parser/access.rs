//! Users, roles, grants and dropping access entities.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    AccessEntity, AuthenticationClause, AuthenticationMethod, CreateRole, CreateUser,
    DefaultDatabase, DefaultRoleClause, DropUserOrRole, GrantOption, GrantPrivilegeStmt,
    GranteeList, GranteesClause, HostClause, HostEntry, HostKind, Ident, PrivilegeClause,
    RoleName, RoleSetting, SettingPair, TableIdentifier,
};
use crate::lexer::{Keyword, TokenKind};

/// Words that close a role setting entry.
const SETTING_MODIFIERS: &[&str] = &["READONLY", "WRITABLE", "CONST", "CHANGEABLE_IN_READONLY"];

const HOST_KINDS: &[HostKind] = &[
    HostKind::Local,
    HostKind::Name,
    HostKind::Regexp,
    HostKind::Ip,
    HostKind::Like,
    HostKind::Any,
    HostKind::None,
];

impl Parser {
    /// `name[@'host'] [ON CLUSTER c]`
    pub(super) fn parse_role_name(&mut self) -> Result<RoleName, ParseError> {
        let start = self.start();
        let name = self.parse_name_or_string()?;
        let scope = if self.consume(&TokenKind::At) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        let on_cluster = self.parse_on_cluster()?;
        Ok(RoleName {
            name,
            scope,
            on_cluster,
            span: self.span_from(start),
        })
    }

    /// The comma-separated entries after a role or user `SETTINGS`.
    pub(super) fn parse_role_settings(&mut self) -> Result<Vec<RoleSetting>, ParseError> {
        self.parse_comma_separated(Self::parse_role_setting)
    }

    fn parse_role_setting(&mut self) -> Result<RoleSetting, ParseError> {
        let start = self.start();
        let mut pairs = Vec::new();
        let mut modifier = None;
        loop {
            if SETTING_MODIFIERS.iter().any(|word| self.check_word(word))
                && !Self::starts_setting_value(&self.peek().kind)
            {
                modifier = Some(self.expect_identifier()?);
                break;
            }
            let is_name = match self.current().kind {
                TokenKind::Ident | TokenKind::QuotedIdent(_) => true,
                TokenKind::Keyword(_) => self.peek().kind == TokenKind::Eq,
                _ => false,
            };
            if !is_name {
                break;
            }
            let pair_start = self.start();
            let name = self.expect_identifier()?;
            let has_eq = self.consume(&TokenKind::Eq);
            let takes_value = has_eq || Self::starts_setting_value(&self.current().kind);
            let value = if takes_value {
                Some(self.parse_expr()?)
            } else {
                None
            };
            pairs.push(SettingPair {
                name,
                value,
                has_eq,
                span: self.span_from(pair_start),
            });
        }
        if pairs.is_empty() && modifier.is_none() {
            return Err(self.unexpected("setting"));
        }
        Ok(RoleSetting {
            pairs,
            modifier,
            span: self.span_from(start),
        })
    }

    /// A token that continues a setting entry instead of ending it.
    const fn starts_setting_value(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Eq | TokenKind::Number(_) | TokenKind::String | TokenKind::Minus
        )
    }

    /// `ROLE [IF NOT EXISTS] name, ... [IN storage] [SETTINGS ...]`, after
    /// `CREATE [OR REPLACE]`.
    pub(super) fn parse_create_role(
        &mut self,
        start: usize,
        or_replace: bool,
    ) -> Result<CreateRole, ParseError> {
        self.expect_keyword(Keyword::Role)?;
        let if_not_exists = self.parse_if_not_exists();
        let names = self.parse_comma_separated(Self::parse_role_name)?;
        let access_storage = if self.consume_keyword(Keyword::In) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let settings = if self.consume_keyword(Keyword::Settings) {
            self.parse_role_settings()?
        } else {
            Vec::new()
        };
        Ok(CreateRole {
            if_not_exists,
            or_replace,
            names,
            access_storage,
            settings,
            span: self.span_from(start),
        })
    }

    /// `USER [IF NOT EXISTS] name, ...` followed by its options in any
    /// order, after `CREATE [OR REPLACE]`.
    pub(super) fn parse_create_user(
        &mut self,
        start: usize,
        or_replace: bool,
    ) -> Result<CreateUser, ParseError> {
        self.expect_keyword(Keyword::User)?;
        let if_not_exists = self.parse_if_not_exists();
        let names = self.parse_comma_separated(Self::parse_role_name)?;
        let mut user = CreateUser {
            if_not_exists,
            or_replace,
            names,
            authentication: None,
            host: None,
            default_role: None,
            default_database: None,
            grantees: None,
            settings: Vec::new(),
            span: self.span_from(start),
        };

        loop {
            if (self.check_keyword(Keyword::Not) && self.peek_keyword(1, Keyword::Identified))
                || self.check_keyword(Keyword::Identified)
            {
                user.authentication = Some(self.parse_authentication()?);
            } else if self.check_word("HOST") {
                user.host = Some(self.parse_host_clause()?);
            } else if self.check_keyword(Keyword::Default) && self.peek_keyword(1, Keyword::Role) {
                let clause_start = self.start();
                self.advance();
                self.advance();
                let roles = if self.consume_word("NONE") {
                    Vec::new()
                } else {
                    self.parse_comma_separated(Self::parse_role_name)?
                };
                user.default_role = Some(DefaultRoleClause {
                    roles,
                    span: self.span_from(clause_start),
                });
            } else if self.check_keyword(Keyword::Default)
                && self.peek_keyword(1, Keyword::Database)
            {
                self.advance();
                self.advance();
                user.default_database = Some(if self.consume_word("NONE") {
                    DefaultDatabase::None
                } else {
                    DefaultDatabase::Name(self.expect_identifier()?)
                });
            } else if self.check_word("GRANTEES") {
                user.grantees = Some(self.parse_grantees()?);
            } else if self.consume_keyword(Keyword::Settings) {
                user.settings = self.parse_role_settings()?;
            } else {
                break;
            }
        }

        user.span = self.span_from(start);
        Ok(user)
    }

    fn parse_authentication(&mut self) -> Result<AuthenticationClause, ParseError> {
        let start = self.start();
        if self.consume_keyword(Keyword::Not) {
            self.expect_keyword(Keyword::Identified)?;
            return Ok(AuthenticationClause {
                method: AuthenticationMethod::NotIdentified,
                span: self.span_from(start),
            });
        }
        self.expect_keyword(Keyword::Identified)?;
        let auth_type = if self.consume_keyword(Keyword::With) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let method = match auth_type {
            Some(kind) if kind.name.eq_ignore_ascii_case("ldap") => {
                self.expect_word("SERVER")?;
                AuthenticationMethod::Ldap {
                    server: self.parse_string_literal()?,
                }
            }
            Some(kind) if kind.name.eq_ignore_ascii_case("kerberos") => {
                let realm = if self.consume_word("REALM") {
                    Some(self.parse_string_literal()?)
                } else {
                    None
                };
                AuthenticationMethod::Kerberos { realm }
            }
            auth_type => {
                let value = if self.consume_keyword(Keyword::By) {
                    Some(self.parse_string_literal()?)
                } else {
                    None
                };
                AuthenticationMethod::Identified { auth_type, value }
            }
        };
        Ok(AuthenticationClause {
            method,
            span: self.span_from(start),
        })
    }

    fn parse_host_clause(&mut self) -> Result<HostClause, ParseError> {
        let start = self.start();
        self.expect_word("HOST")?;
        let entries = self.parse_comma_separated(|parser| {
            let Some(kind) = HOST_KINDS
                .iter()
                .copied()
                .find(|kind| parser.check_word(kind.as_str()))
            else {
                return Err(parser.unexpected("host kind"));
            };
            parser.advance();
            let value = if kind.takes_value() {
                Some(parser.parse_string_literal()?)
            } else {
                None
            };
            Ok(HostEntry { kind, value })
        })?;
        Ok(HostClause {
            entries,
            span: self.span_from(start),
        })
    }

    fn parse_grantees(&mut self) -> Result<GranteesClause, ParseError> {
        let start = self.start();
        self.expect_word("GRANTEES")?;
        let grantees = if self.consume_keyword(Keyword::Any) {
            GranteeList::Any
        } else if self.consume_word("NONE") {
            GranteeList::None
        } else {
            GranteeList::Roles(self.parse_comma_separated(Self::parse_role_name)?)
        };
        let except = if self.consume_keyword(Keyword::Except) {
            self.parse_comma_separated(Self::parse_role_name)?
        } else {
            Vec::new()
        };
        Ok(GranteesClause {
            grantees,
            except,
            span: self.span_from(start),
        })
    }

    /// `GRANT [ON CLUSTER c] privilege, ... [ON target] TO role, ...
    /// [WITH GRANT|ADMIN|REPLACE OPTION]`
    pub(super) fn parse_grant(&mut self) -> Result<GrantPrivilegeStmt, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Grant)?;
        let on_cluster = self.parse_on_cluster()?;
        let privileges = self.parse_comma_separated(Self::parse_privilege)?;
        let on = if self.consume_keyword(Keyword::On) {
            Some(self.parse_grant_target()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::To)?;
        let to = self.parse_comma_separated(Self::parse_role_name)?;
        let mut options = Vec::new();
        while self.check_keyword(Keyword::With) {
            let option = match self.peek().as_keyword() {
                Some(Keyword::Grant) => GrantOption::Grant,
                Some(Keyword::Replace) => GrantOption::Replace,
                _ if self.peek().is_word("ADMIN") => GrantOption::Admin,
                _ => break,
            };
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::Option)?;
            options.push(option);
        }
        Ok(GrantPrivilegeStmt {
            on_cluster,
            privileges,
            on,
            to,
            options,
            span: self.span_from(start),
        })
    }

    fn parse_privilege(&mut self) -> Result<PrivilegeClause, ParseError> {
        let start = self.start();
        let mut words = Vec::new();
        loop {
            let token = self.current();
            let is_word = matches!(token.kind, TokenKind::Ident | TokenKind::Keyword(_))
                && !matches!(token.as_keyword(), Some(Keyword::On | Keyword::To));
            if !is_word {
                break;
            }
            words.push(self.advance().text);
        }
        if words.is_empty() {
            return Err(self.unexpected("privilege"));
        }
        let columns = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_param_expr_list()?)
        } else {
            None
        };
        Ok(PrivilegeClause {
            words,
            columns,
            span: self.span_from(start),
        })
    }

    /// `db.table`, `db.*`, `*.*` or `table`
    fn parse_grant_target(&mut self) -> Result<TableIdentifier, ParseError> {
        let start = self.start();
        let first = self.parse_name_or_star()?;
        let (database, table) = if self.consume(&TokenKind::Dot) {
            (Some(first), self.parse_name_or_star()?)
        } else {
            (None, first)
        };
        Ok(TableIdentifier {
            database,
            table,
            span: self.span_from(start),
        })
    }

    fn parse_name_or_star(&mut self) -> Result<Ident, ParseError> {
        if self.check(&TokenKind::Star) {
            let token = self.advance();
            return Ok(Ident::new("*", token.span));
        }
        self.expect_identifier()
    }

    /// `[IF EXISTS] name, ... [ON table] [FROM storage]` after
    /// `DROP USER|ROLE|QUOTA|PROFILE|ROW POLICY`.
    pub(super) fn parse_drop_access(
        &mut self,
        start: usize,
        entity: AccessEntity,
    ) -> Result<DropUserOrRole, ParseError> {
        let if_exists = self.parse_if_exists();
        let names = self.parse_comma_separated(Self::parse_role_name)?;
        let on = if self.consume_keyword(Keyword::On) {
            Some(self.parse_table_identifier()?)
        } else {
            None
        };
        let from = if self.consume_keyword(Keyword::From) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        Ok(DropUserOrRole {
            entity,
            if_exists,
            names,
            on,
            from,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use crate::ast::{AccessEntity, AuthenticationMethod, GranteeList, GrantOption, Statement};
    use crate::format::format_compact;

    fn parse_one(sql: &str) -> Statement {
        parse(sql).into_result().unwrap().remove(0)
    }

    #[test]
    fn test_create_role_with_settings() {
        let statement = parse_one(
            "CREATE ROLE IF NOT EXISTS analyst SETTINGS max_memory_usage = 100 MIN 10 MAX 200 READONLY, PROFILE 'default'",
        );
        let Statement::CreateRole(role) = &statement else {
            panic!("Expected CREATE ROLE");
        };
        assert!(role.if_not_exists);
        assert_eq!(role.settings.len(), 2);
        assert_eq!(role.settings[0].pairs.len(), 3);
        assert!(role.settings[0].modifier.is_some());
        assert!(!role.settings[1].pairs[0].has_eq);
    }

    #[test]
    fn test_modifier_word_as_setting_name() {
        let statement = parse_one("CREATE ROLE r SETTINGS readonly = 1");
        let Statement::CreateRole(role) = &statement else {
            panic!("Expected CREATE ROLE");
        };
        assert_eq!(role.settings[0].pairs[0].name.name, "readonly");
        assert!(role.settings[0].modifier.is_none());
        assert_eq!(format_compact(&statement), "CREATE ROLE r SETTINGS readonly = 1");

        let statement = parse_one("CREATE ROLE r SETTINGS x = 1 READONLY");
        let Statement::CreateRole(role) = &statement else {
            panic!("Expected CREATE ROLE");
        };
        assert_eq!(role.settings[0].pairs.len(), 1);
        assert_eq!(
            role.settings[0].modifier.as_ref().map(|m| m.name.as_str()),
            Some("READONLY")
        );
    }

    #[test]
    fn test_keyword_setting_name() {
        let statement = parse_one("CREATE ROLE r SETTINGS format = 'JSON'");
        let Statement::CreateRole(role) = &statement else {
            panic!("Expected CREATE ROLE");
        };
        assert_eq!(role.settings[0].pairs[0].name.name, "format");
        assert_eq!(format_compact(&statement), "CREATE ROLE r SETTINGS format = 'JSON'");
    }

    #[test]
    fn test_create_or_replace_role() {
        let statement = parse_one("CREATE OR REPLACE ROLE r ON CLUSTER c");
        assert_eq!(format_compact(&statement), "CREATE OR REPLACE ROLE r ON CLUSTER c");
    }

    #[test]
    fn test_create_user_options() {
        let statement = parse_one(
            "CREATE USER u@'%' IDENTIFIED WITH sha256_password BY 'secret' HOST IP '10.0.0.0/8', LOCAL DEFAULT ROLE r1 DEFAULT DATABASE db GRANTEES ANY EXCEPT r2",
        );
        let Statement::CreateUser(user) = &statement else {
            panic!("Expected CREATE USER");
        };
        assert!(user.names[0].scope.is_some());
        assert!(matches!(
            user.authentication.as_ref().unwrap().method,
            AuthenticationMethod::Identified { .. }
        ));
        assert_eq!(user.host.as_ref().unwrap().entries.len(), 2);
        assert_eq!(user.default_role.as_ref().unwrap().roles.len(), 1);
        let grantees = user.grantees.as_ref().unwrap();
        assert!(matches!(grantees.grantees, GranteeList::Any));
        assert_eq!(grantees.except.len(), 1);
    }

    #[test]
    fn test_create_user_ldap() {
        let statement = parse_one("CREATE USER u IDENTIFIED WITH ldap SERVER 'main'");
        let Statement::CreateUser(user) = &statement else {
            panic!("Expected CREATE USER");
        };
        assert!(matches!(
            user.authentication.as_ref().unwrap().method,
            AuthenticationMethod::Ldap { .. }
        ));
    }

    #[test]
    fn test_grant() {
        let statement = parse_one(
            "GRANT SELECT(a, b), ALTER UPDATE ON db.* TO r1, r2 WITH GRANT OPTION",
        );
        let Statement::Grant(grant) = &statement else {
            panic!("Expected GRANT");
        };
        assert_eq!(grant.privileges.len(), 2);
        assert!(grant.privileges[0].columns.is_some());
        assert_eq!(grant.privileges[1].words, vec!["ALTER", "UPDATE"]);
        assert_eq!(grant.on.as_ref().unwrap().table.name, "*");
        assert_eq!(grant.options, vec![GrantOption::Grant]);
    }

    #[test]
    fn test_grant_role() {
        let statement = parse_one("GRANT admin TO alice");
        assert_eq!(format_compact(&statement), "GRANT admin TO alice");
    }

    #[test]
    fn test_drop_access_entities() {
        let statement = parse_one("DROP ROW POLICY IF EXISTS p ON db.t FROM local_directory");
        let Statement::DropUserOrRole(drop) = &statement else {
            panic!("Expected DROP ROW POLICY");
        };
        assert_eq!(drop.entity, AccessEntity::RowPolicy);
        assert!(drop.if_exists);
        assert!(drop.on.is_some());
        assert!(drop.from.is_some());

        let statement = parse_one("DROP SETTINGS PROFILE p1, p2");
        let Statement::DropUserOrRole(drop) = &statement else {
            panic!("Expected DROP SETTINGS PROFILE");
        };
        assert_eq!(drop.entity, AccessEntity::SettingsProfile);
        assert_eq!(drop.names.len(), 2);
    }
}
