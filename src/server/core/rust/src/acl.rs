/* src/server/core/rust/src/acl.rs */

use serde::{Deserialize, Serialize};

use crate::guard::GuardMode;
use crate::session::{SessionState, User};

/// Permission that unlocks every ability.
pub const PERMISSION_ADMIN: &str = "ADMIN.GRANTED";

/// Action/subject pair a page requires, e.g. `manage` on `all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclSpec {
  pub action: String,
  pub subject: String,
}

impl Default for AclSpec {
  fn default() -> Self {
    Self { action: "manage".to_string(), subject: "all".to_string() }
  }
}

/// Set of (action, subject) rules granted to a user.
/// `manage` matches every action and `all` every subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ability {
  rules: Vec<(String, String)>,
}

impl Ability {
  pub fn allow(mut self, action: impl Into<String>, subject: impl Into<String>) -> Self {
    self.rules.push((action.into(), subject.into()));
    self
  }

  pub fn can(&self, action: &str, subject: &str) -> bool {
    self.rules.iter().any(|(a, s)| (a == "manage" || a == action) && (s == "all" || s == subject))
  }
}

/// Build the ability a user has on a page requiring `page_permission`.
pub fn build_ability_for(user_permission: &[String], page_permission: &[String]) -> Ability {
  let is_admin = user_permission.iter().any(|p| p == PERMISSION_ADMIN);
  let holds_any = page_permission.is_empty()
    || page_permission.iter().any(|required| user_permission.contains(required));
  if is_admin || holds_any { Ability::default().allow("manage", "all") } else { Ability::default() }
}

/// Second authorization gate, evaluated after the guard let the page through.
pub trait AbilityCheck: Send + Sync {
  fn can(&self, user: &User, permission: &[String], acl: &AclSpec) -> bool;
}

/// Default check: role permissions against the page's permission list.
pub struct PermissionAbility;

impl AbilityCheck for PermissionAbility {
  fn can(&self, user: &User, permission: &[String], acl: &AclSpec) -> bool {
    build_ability_for(user.permissions(), permission).can(&acl.action, &acl.subject)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclDecision {
  Allow,
  /// Render the not-authorized presentation. Never a redirect.
  Deny,
}

/// Run the ability gate for a page whose guard decided to render.
///
/// Guest-only and unguarded pages have no user requirement and pass.
pub fn check_access(
  mode: GuardMode,
  session: &SessionState,
  permission: &[String],
  acl: &AclSpec,
  checker: &dyn AbilityCheck,
) -> AclDecision {
  match mode {
    GuardMode::GuestOnly | GuardMode::NoGuard => AclDecision::Allow,
    GuardMode::AuthOnly => match session.user() {
      Some(user) if checker.can(user, permission, acl) => AclDecision::Allow,
      _ => AclDecision::Deny,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::session::Role;

  fn user_with(perms: &[&str]) -> User {
    User {
      id: "u1".into(),
      email: "u@example.com".into(),
      role: Some(Role {
        name: "Staff".into(),
        permission: perms.iter().map(|p| (*p).to_string()).collect(),
      }),
      ..Default::default()
    }
  }

  fn perms(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| (*p).to_string()).collect()
  }

  #[test]
  fn manage_all_matches_everything() {
    let ability = Ability::default().allow("manage", "all");
    assert!(ability.can("read", "Product"));
    assert!(ability.can("manage", "all"));
  }

  #[test]
  fn empty_ability_denies() {
    assert!(!Ability::default().can("manage", "all"));
  }

  #[test]
  fn specific_rule_matches_only_its_pair() {
    let ability = Ability::default().allow("read", "Product");
    assert!(ability.can("read", "Product"));
    assert!(!ability.can("read", "Order"));
    assert!(!ability.can("delete", "Product"));
  }

  #[test]
  fn admin_permission_grants_everything() {
    let user = user_with(&[PERMISSION_ADMIN]);
    assert!(PermissionAbility.can(&user, &perms(&["SYSTEM.ROLE.VIEW"]), &AclSpec::default()));
  }

  #[test]
  fn empty_page_permission_grants() {
    let user = user_with(&[]);
    assert!(PermissionAbility.can(&user, &[], &AclSpec::default()));
  }

  #[test]
  fn any_held_permission_grants() {
    let user = user_with(&["SYSTEM.DASHBOARD.VIEW"]);
    let page = perms(&[PERMISSION_ADMIN, "SYSTEM.DASHBOARD.VIEW"]);
    assert!(PermissionAbility.can(&user, &page, &AclSpec::default()));
  }

  #[test]
  fn missing_permission_denies() {
    let user = user_with(&["MANAGE_ORDER.ORDER.VIEW"]);
    assert!(!PermissionAbility.can(&user, &perms(&["SYSTEM.DASHBOARD.VIEW"]), &AclSpec::default()));
  }

  #[test]
  fn open_modes_skip_the_ability_gate() {
    let page = perms(&["SYSTEM.DASHBOARD.VIEW"]);
    for mode in [GuardMode::GuestOnly, GuardMode::NoGuard] {
      let decision =
        check_access(mode, &SessionState::Anonymous, &page, &AclSpec::default(), &PermissionAbility);
      assert_eq!(decision, AclDecision::Allow);
    }
  }

  #[test]
  fn auth_only_checks_user() {
    let page = perms(&["SYSTEM.DASHBOARD.VIEW"]);
    let allowed = SessionState::Authenticated(user_with(&["SYSTEM.DASHBOARD.VIEW"]));
    let denied = SessionState::Authenticated(user_with(&[]));
    let acl = AclSpec::default();
    assert_eq!(
      check_access(GuardMode::AuthOnly, &allowed, &page, &acl, &PermissionAbility),
      AclDecision::Allow
    );
    assert_eq!(
      check_access(GuardMode::AuthOnly, &denied, &page, &acl, &PermissionAbility),
      AclDecision::Deny
    );
  }

  #[test]
  fn permission_list_reaches_checker_unchanged() {
    struct Recording(Vec<String>, AclSpec);
    impl AbilityCheck for Recording {
      fn can(&self, _user: &User, permission: &[String], acl: &AclSpec) -> bool {
        permission == self.0.as_slice() && acl == &self.1
      }
    }
    let page = perms(&["B", "A", "B"]);
    let acl = AclSpec { action: "read".into(), subject: "Order".into() };
    let checker = Recording(page.clone(), acl.clone());
    let session = SessionState::Authenticated(user_with(&[]));
    assert_eq!(
      check_access(GuardMode::AuthOnly, &session, &page, &acl, &checker),
      AclDecision::Allow
    );
  }
}
