//! Access control: users, roles and grants.

use super::{Expr, Ident, Node, OnClusterClause, ParamExprList, StringLiteral, TableIdentifier};
use crate::format::Formatter;
use crate::lexer::Span;
use crate::visitor::{self, accept_all, Visitor};

/// `name[@'host'] [ON CLUSTER c]`; the name is an identifier or a string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoleName {
    /// User or role name, bare or quoted as a string.
    pub name: Expr,
    /// Host part after `@`.
    pub scope: Option<StringLiteral>,
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Source span.
    pub span: Span,
}

impl Node for RoleName {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        if let Some(scope) = &self.scope {
            f.write_char('@');
            f.write_node(scope);
        }
        if let Some(on_cluster) = &self.on_cluster {
            f.write_char(' ');
            f.write_node(on_cluster);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.scope.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        scope.visit_role_name(self)
    }
}

/// `name = value`, or a bare `name value` such as `MIN 1` or `PROFILE 'p'`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SettingPair {
    /// Setting name, or `MIN`/`MAX`/`PROFILE`.
    pub name: Ident,
    /// Value, if one was given.
    pub value: Option<Expr>,
    /// The value was introduced by `=`.
    pub has_eq: bool,
    /// Source span.
    pub span: Span,
}

impl Node for SettingPair {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.name);
        if let Some(value) = &self.value {
            f.write_str(if self.has_eq { " = " } else { " " });
            f.write_node(value);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.name.accept(&mut *scope)?;
        visitor::accept_opt(self.value.as_ref(), &mut *scope)?;
        scope.visit_setting_pair(self)
    }
}

/// One comma-separated entry of a role or user `SETTINGS` list:
/// `max_memory_usage = 100 MIN 10 MAX 200 READONLY`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoleSetting {
    /// Name/value pairs in source order.
    pub pairs: Vec<SettingPair>,
    /// Trailing `READONLY`, `WRITABLE`, `CONST` or `CHANGEABLE_IN_READONLY`.
    pub modifier: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for RoleSetting {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_separated(&self.pairs, " ");
        if let Some(modifier) = &self.modifier {
            if !self.pairs.is_empty() {
                f.write_char(' ');
            }
            f.write_node(modifier);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.pairs, &mut *scope)?;
        visitor::accept_opt(self.modifier.as_ref(), &mut *scope)?;
        scope.visit_role_setting(self)
    }
}

/// `CREATE [OR REPLACE] ROLE [IF NOT EXISTS] name, ... [IN storage] [SETTINGS ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateRole {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// `OR REPLACE` was given.
    pub or_replace: bool,
    /// Roles being created.
    pub names: Vec<RoleName>,
    /// Storage after `IN`.
    pub access_storage: Option<Ident>,
    /// `SETTINGS` entries.
    pub settings: Vec<RoleSetting>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateRole {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE ");
        if self.or_replace {
            f.write_str("OR REPLACE ");
        }
        f.write_str("ROLE ");
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ");
        }
        f.write_separated(&self.names, ", ");
        if let Some(access_storage) = &self.access_storage {
            f.write_str(" IN ");
            f.write_node(access_storage);
        }
        if !self.settings.is_empty() {
            f.write_str(" SETTINGS ");
            f.write_separated(&self.settings, ", ");
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.names, &mut *scope)?;
        visitor::accept_opt(self.access_storage.as_ref(), &mut *scope)?;
        accept_all(&self.settings, &mut *scope)?;
        scope.visit_create_role(self)
    }
}

/// How a user authenticates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AuthenticationMethod {
    /// `NOT IDENTIFIED`
    NotIdentified,
    /// `IDENTIFIED [WITH type] [BY 'secret']`
    Identified {
        auth_type: Option<Ident>,
        value: Option<StringLiteral>,
    },
    /// `IDENTIFIED WITH ldap SERVER 'server'`
    Ldap { server: StringLiteral },
    /// `IDENTIFIED WITH kerberos [REALM 'realm']`
    Kerberos { realm: Option<StringLiteral> },
}

/// `IDENTIFIED ...` or `NOT IDENTIFIED` on a user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuthenticationClause {
    /// How the user authenticates.
    pub method: AuthenticationMethod,
    /// Source span.
    pub span: Span,
}

impl Node for AuthenticationClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        match &self.method {
            AuthenticationMethod::NotIdentified => f.write_str("NOT IDENTIFIED"),
            AuthenticationMethod::Identified { auth_type, value } => {
                f.write_str("IDENTIFIED");
                if let Some(auth_type) = auth_type {
                    f.write_str(" WITH ");
                    f.write_node(auth_type);
                }
                if let Some(value) = value {
                    f.write_str(" BY ");
                    f.write_node(value);
                }
            }
            AuthenticationMethod::Ldap { server } => {
                f.write_str("IDENTIFIED WITH ldap SERVER ");
                f.write_node(server);
            }
            AuthenticationMethod::Kerberos { realm } => {
                f.write_str("IDENTIFIED WITH kerberos");
                if let Some(realm) = realm {
                    f.write_str(" REALM ");
                    f.write_node(realm);
                }
            }
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        match &self.method {
            AuthenticationMethod::NotIdentified => {}
            AuthenticationMethod::Identified { auth_type, value } => {
                visitor::accept_opt(auth_type.as_ref(), &mut *scope)?;
                visitor::accept_opt(value.as_ref(), &mut *scope)?;
            }
            AuthenticationMethod::Ldap { server } => server.accept(&mut *scope)?,
            AuthenticationMethod::Kerberos { realm } => {
                visitor::accept_opt(realm.as_ref(), &mut *scope)?;
            }
        }
        scope.visit_authentication_clause(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HostKind {
    /// `LOCAL`
    Local,
    /// `NAME 'host'`
    Name,
    /// `REGEXP 'pattern'`
    Regexp,
    /// `IP 'subnet'`
    Ip,
    /// `LIKE 'pattern'`
    Like,
    /// `ANY`
    Any,
    /// `NONE`
    None,
}

impl HostKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Name => "NAME",
            Self::Regexp => "REGEXP",
            Self::Ip => "IP",
            Self::Like => "LIKE",
            Self::Any => "ANY",
            Self::None => "NONE",
        }
    }

    /// Whether the kind is followed by a string value.
    #[must_use]
    pub const fn takes_value(&self) -> bool {
        matches!(self, Self::Name | Self::Regexp | Self::Ip | Self::Like)
    }
}

/// One rule of a `HOST` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HostEntry {
    /// Host matching rule.
    pub kind: HostKind,
    /// Pattern or address the rule matches against.
    pub value: Option<StringLiteral>,
}

/// `HOST IP '10.0.0.0/8', NAME 'example.com'`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HostClause {
    /// Host rules in source order.
    pub entries: Vec<HostEntry>,
    /// Source span.
    pub span: Span,
}

impl Node for HostClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("HOST ");
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ");
            }
            f.write_str(entry.kind.as_str());
            if let Some(value) = &entry.value {
                f.write_char(' ');
                f.write_node(value);
            }
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        for entry in &self.entries {
            visitor::accept_opt(entry.value.as_ref(), &mut *scope)?;
        }
        scope.visit_host_clause(self)
    }
}

/// `DEFAULT ROLE r1, r2` or `DEFAULT ROLE NONE`; an empty role list is `NONE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DefaultRoleClause {
    /// Roles granted by default.
    pub roles: Vec<RoleName>,
    /// Source span.
    pub span: Span,
}

impl Node for DefaultRoleClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DEFAULT ROLE ");
        if self.roles.is_empty() {
            f.write_str("NONE");
        } else {
            f.write_separated(&self.roles, ", ");
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.roles, &mut *scope)?;
        scope.visit_default_role_clause(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GranteeList {
    /// `ANY`
    Any,
    /// `NONE`
    None,
    /// Explicit users and roles.
    Roles(Vec<RoleName>),
}

/// `GRANTEES ANY|NONE|r1, ... [EXCEPT r2, ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GranteesClause {
    /// Who may receive grants from this user.
    pub grantees: GranteeList,
    /// Names after `EXCEPT`.
    pub except: Vec<RoleName>,
    /// Source span.
    pub span: Span,
}

impl Node for GranteesClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("GRANTEES ");
        match &self.grantees {
            GranteeList::Any => f.write_str("ANY"),
            GranteeList::None => f.write_str("NONE"),
            GranteeList::Roles(roles) => f.write_separated(roles, ", "),
        }
        if !self.except.is_empty() {
            f.line_break();
            f.write_str("EXCEPT ");
            f.write_separated(&self.except, ", ");
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        if let GranteeList::Roles(roles) = &self.grantees {
            accept_all(roles, &mut *scope)?;
        }
        accept_all(&self.except, &mut *scope)?;
        scope.visit_grantees_clause(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DefaultDatabase {
    /// A named database.
    Name(Ident),
    /// `NONE`
    None,
}

/// `CREATE [OR REPLACE] USER [IF NOT EXISTS] name, ...` and its options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateUser {
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// `OR REPLACE` was given.
    pub or_replace: bool,
    /// Users being created.
    pub names: Vec<RoleName>,
    /// `IDENTIFIED ...` or `NOT IDENTIFIED`.
    pub authentication: Option<AuthenticationClause>,
    /// `HOST ...` restrictions.
    pub host: Option<HostClause>,
    /// `DEFAULT ROLE ...`.
    pub default_role: Option<DefaultRoleClause>,
    /// `DEFAULT DATABASE ...`.
    pub default_database: Option<DefaultDatabase>,
    /// `GRANTEES ...`.
    pub grantees: Option<GranteesClause>,
    /// `SETTINGS` entries.
    pub settings: Vec<RoleSetting>,
    /// Source span.
    pub span: Span,
}

impl Node for CreateUser {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("CREATE ");
        if self.or_replace {
            f.write_str("OR REPLACE ");
        }
        f.write_str("USER ");
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ");
        }
        f.write_separated(&self.names, ", ");
        if let Some(authentication) = &self.authentication {
            f.line_break();
            f.write_node(authentication);
        }
        if let Some(host) = &self.host {
            f.line_break();
            f.write_node(host);
        }
        if let Some(default_role) = &self.default_role {
            f.line_break();
            f.write_node(default_role);
        }
        match &self.default_database {
            Some(DefaultDatabase::Name(name)) => {
                f.line_break();
                f.write_str("DEFAULT DATABASE ");
                f.write_node(name);
            }
            Some(DefaultDatabase::None) => {
                f.line_break();
                f.write_str("DEFAULT DATABASE NONE");
            }
            None => {}
        }
        if let Some(grantees) = &self.grantees {
            f.line_break();
            f.write_node(grantees);
        }
        if !self.settings.is_empty() {
            f.line_break();
            f.write_str("SETTINGS");
            f.indent();
            f.line_break();
            f.write_broken(&self.settings);
            f.dedent();
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.names, &mut *scope)?;
        visitor::accept_opt(self.authentication.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.host.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.default_role.as_ref(), &mut *scope)?;
        if let Some(DefaultDatabase::Name(name)) = &self.default_database {
            name.accept(&mut *scope)?;
        }
        visitor::accept_opt(self.grantees.as_ref(), &mut *scope)?;
        accept_all(&self.settings, &mut *scope)?;
        scope.visit_create_user(self)
    }
}

/// `ALTER ROLE [IF EXISTS] role [RENAME TO new], ... [SETTINGS ...]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterRole {
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Roles being altered, each with an optional new name.
    pub pairs: Vec<RoleRenamePair>,
    /// `SETTINGS` entries.
    pub settings: Vec<RoleSetting>,
    /// Source span.
    pub span: Span,
}

impl Node for AlterRole {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("ALTER ROLE ");
        if self.if_exists {
            f.write_str("IF EXISTS ");
        }
        f.write_separated(&self.pairs, ", ");
        if !self.settings.is_empty() {
            f.write_str(" SETTINGS ");
            f.write_separated(&self.settings, ", ");
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.pairs, &mut *scope)?;
        accept_all(&self.settings, &mut *scope)?;
        scope.visit_alter_role(self)
    }
}

/// `role [RENAME TO new_name]` inside `ALTER ROLE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoleRenamePair {
    /// Role being altered.
    pub role: RoleName,
    /// Name after `RENAME TO`.
    pub new_name: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for RoleRenamePair {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_node(&self.role);
        if let Some(new_name) = &self.new_name {
            f.write_str(" RENAME TO ");
            f.write_node(new_name);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        self.role.accept(&mut *scope)?;
        visitor::accept_opt(self.new_name.as_ref(), &mut *scope)?;
        scope.visit_role_rename_pair(self)
    }
}

/// The access-control object kinds a `DROP` can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AccessEntity {
    /// `USER`
    User,
    /// `ROLE`
    Role,
    /// `QUOTA`
    Quota,
    /// `PROFILE`
    Profile,
    /// `SETTINGS PROFILE`
    SettingsProfile,
    /// `ROW POLICY`
    RowPolicy,
}

impl AccessEntity {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Role => "ROLE",
            Self::Quota => "QUOTA",
            Self::Profile => "PROFILE",
            Self::SettingsProfile => "SETTINGS PROFILE",
            Self::RowPolicy => "ROW POLICY",
        }
    }
}

/// `DROP USER|ROLE|QUOTA|[SETTINGS] PROFILE|ROW POLICY [IF EXISTS] name, ...
/// [ON table] [FROM storage]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropUserOrRole {
    /// Kind of access entity being dropped.
    pub entity: AccessEntity,
    /// `IF EXISTS` was given.
    pub if_exists: bool,
    /// Entities being dropped.
    pub names: Vec<RoleName>,
    /// The table a row policy belongs to.
    pub on: Option<TableIdentifier>,
    /// Access storage after `FROM`.
    pub from: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl Node for DropUserOrRole {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("DROP ");
        f.write_str(self.entity.as_str());
        f.write_char(' ');
        if self.if_exists {
            f.write_str("IF EXISTS ");
        }
        f.write_separated(&self.names, ", ");
        if let Some(on) = &self.on {
            f.write_str(" ON ");
            f.write_node(on);
        }
        if let Some(from) = &self.from {
            f.write_str(" FROM ");
            f.write_node(from);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        accept_all(&self.names, &mut *scope)?;
        visitor::accept_opt(self.on.as_ref(), &mut *scope)?;
        visitor::accept_opt(self.from.as_ref(), &mut *scope)?;
        scope.visit_drop_user_or_role(self)
    }
}

/// A privilege such as `SELECT(a, b)`, `ALTER UPDATE` or a role name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrivilegeClause {
    /// Privilege keywords, e.g. `ALTER UPDATE`.
    pub words: Vec<String>,
    /// Column list the privilege is limited to.
    pub columns: Option<ParamExprList>,
    /// Source span.
    pub span: Span,
}

impl Node for PrivilegeClause {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_char(' ');
            }
            f.write_str(word);
        }
        if let Some(columns) = &self.columns {
            f.write_node(columns);
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.columns.as_ref(), &mut *scope)?;
        scope.visit_privilege_clause(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GrantOption {
    /// `WITH GRANT OPTION`
    Grant,
    /// `WITH ADMIN OPTION`
    Admin,
    /// `WITH REPLACE OPTION`
    Replace,
}

impl GrantOption {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grant => "GRANT",
            Self::Admin => "ADMIN",
            Self::Replace => "REPLACE",
        }
    }
}

/// `GRANT [ON CLUSTER c] privilege, ... [ON db.table] TO role, ...
/// [WITH GRANT|ADMIN|REPLACE OPTION]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GrantPrivilegeStmt {
    /// `ON CLUSTER` target.
    pub on_cluster: Option<OnClusterClause>,
    /// Privileges or roles being granted.
    pub privileges: Vec<PrivilegeClause>,
    /// Object after `ON`; absent when granting roles.
    pub on: Option<TableIdentifier>,
    /// Grantees after `TO`.
    pub to: Vec<RoleName>,
    /// Trailing `WITH ... OPTION` clauses.
    pub options: Vec<GrantOption>,
    /// Source span.
    pub span: Span,
}

impl Node for GrantPrivilegeStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn format_sql(&self, f: &mut Formatter) {
        f.write_str("GRANT ");
        if let Some(on_cluster) = &self.on_cluster {
            f.write_node(on_cluster);
            f.write_char(' ');
        }
        f.write_separated(&self.privileges, ", ");
        if let Some(on) = &self.on {
            f.write_str(" ON ");
            f.write_node(on);
        }
        f.write_str(" TO ");
        f.write_separated(&self.to, ", ");
        for option in &self.options {
            f.write_str(" WITH ");
            f.write_str(option.as_str());
            f.write_str(" OPTION");
        }
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        let mut scope = visitor::enter(visitor, self);
        visitor::accept_opt(self.on_cluster.as_ref(), &mut *scope)?;
        accept_all(&self.privileges, &mut *scope)?;
        visitor::accept_opt(self.on.as_ref(), &mut *scope)?;
        accept_all(&self.to, &mut *scope)?;
        scope.visit_grant_privilege_stmt(self)
    }
}
