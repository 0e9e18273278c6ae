//! Role-based gating of navigation links and actions
//!
//! Pure predicates over a [`SessionSnapshot`]. Callers decide what to render;
//! nothing here keeps state between calls.

use std::collections::{HashMap, HashSet};

use crate::{models::RoleClaim, session::SessionSnapshot};

/// Which required roles each held role satisfies.
///
/// The default policy is exact match: an admin does not pass a member check.
/// Any hierarchy has to be spelled out with [`RolePolicy::with_grants`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePolicy {
    grants: HashMap<RoleClaim, HashSet<RoleClaim>>,
}

impl RolePolicy {
    pub fn exact() -> Self {
        Self::default()
    }

    /// Let `held` also satisfy every role in `satisfies`.
    pub fn with_grants(mut self, held: RoleClaim, satisfies: &[RoleClaim]) -> Self {
        self.grants
            .entry(held)
            .or_default()
            .extend(satisfies.iter().copied());
        self
    }

    pub fn satisfies(&self, held: RoleClaim, required: RoleClaim) -> bool {
        held == required
            || self
                .grants
                .get(&held)
                .map_or(false, |granted| granted.contains(&required))
    }
}

/// Navigation links shown in the top bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavLink {
    Home,
    SearchBooks,
    Shelf,
    Admin,
}

impl NavLink {
    pub fn label(&self) -> &'static str {
        match self {
            NavLink::Home => "Home",
            NavLink::SearchBooks => "Search Books",
            NavLink::Shelf => "Shelf",
            NavLink::Admin => "Admin",
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            NavLink::Home => "/home",
            NavLink::SearchBooks => "/search",
            NavLink::Shelf => "/shelf",
            NavLink::Admin => "/admin",
        }
    }
}

/// Session button offered in the top bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    SignIn,
    SignOut,
}

/// Buttons and views that depend on who is signed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    Checkout,
    LeaveReview,
    AskQuestion,
    ManageLibrary,
    AnswerMessages,
    AddBook,
}

#[derive(Debug, Clone, Default)]
pub struct RoleGate {
    policy: RolePolicy,
}

impl RoleGate {
    pub fn new(policy: RolePolicy) -> Self {
        Self { policy }
    }

    pub fn is_authenticated(&self, session: &SessionSnapshot) -> bool {
        session.is_authenticated
    }

    /// True only for an authenticated session whose role satisfies `required`.
    pub fn has_role(&self, session: &SessionSnapshot, required: RoleClaim) -> bool {
        self.is_authenticated(session) && self.policy.satisfies(session.role, required)
    }

    pub fn can(&self, session: &SessionSnapshot, affordance: Affordance) -> bool {
        match affordance {
            Affordance::Checkout | Affordance::LeaveReview | Affordance::AskQuestion => {
                self.is_authenticated(session)
            }
            Affordance::ManageLibrary | Affordance::AnswerMessages | Affordance::AddBook => {
                self.has_role(session, RoleClaim::Admin)
            }
        }
    }

    pub fn visible_links(&self, session: &SessionSnapshot) -> Vec<NavLink> {
        let mut links = vec![NavLink::Home, NavLink::SearchBooks];
        if self.is_authenticated(session) {
            links.push(NavLink::Shelf);
        }
        if self.can(session, Affordance::ManageLibrary) {
            links.push(NavLink::Admin);
        }
        links
    }

    pub fn session_action(&self, session: &SessionSnapshot) -> SessionAction {
        if self.is_authenticated(session) {
            SessionAction::SignOut
        } else {
            SessionAction::SignIn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Credential;

    fn session(role: RoleClaim) -> SessionSnapshot {
        SessionSnapshot::authenticated(Credential::new("token", None), role)
    }

    #[test]
    fn test_has_role_exact_match() {
        let gate = RoleGate::default();
        assert!(!gate.has_role(&session(RoleClaim::Member), RoleClaim::Admin));
        assert!(gate.has_role(&session(RoleClaim::Admin), RoleClaim::Admin));
        assert!(!gate.has_role(&session(RoleClaim::Admin), RoleClaim::Member));
    }

    #[test]
    fn test_has_role_requires_authentication() {
        let gate = RoleGate::default();
        let mut claimed_admin = SessionSnapshot::anonymous();
        claimed_admin.role = RoleClaim::Admin;
        assert!(!gate.has_role(&claimed_admin, RoleClaim::Admin));
        assert!(!gate.has_role(&SessionSnapshot::anonymous(), RoleClaim::Anonymous));
    }

    #[test]
    fn test_explicit_hierarchy() {
        let gate = RoleGate::new(RolePolicy::exact().with_grants(RoleClaim::Admin, &[RoleClaim::Member]));
        assert!(gate.has_role(&session(RoleClaim::Admin), RoleClaim::Member));
        assert!(!gate.has_role(&session(RoleClaim::Member), RoleClaim::Admin));
    }

    #[test]
    fn test_visible_links() {
        let gate = RoleGate::default();
        assert_eq!(
            gate.visible_links(&SessionSnapshot::anonymous()),
            vec![NavLink::Home, NavLink::SearchBooks]
        );
        assert_eq!(
            gate.visible_links(&session(RoleClaim::Member)),
            vec![NavLink::Home, NavLink::SearchBooks, NavLink::Shelf]
        );
        assert_eq!(
            gate.visible_links(&session(RoleClaim::Admin)),
            vec![NavLink::Home, NavLink::SearchBooks, NavLink::Shelf, NavLink::Admin]
        );
    }

    #[test]
    fn test_affordances() {
        let gate = RoleGate::default();
        let member = session(RoleClaim::Member);
        let anonymous = SessionSnapshot::anonymous();

        assert!(gate.can(&member, Affordance::Checkout));
        assert!(!gate.can(&member, Affordance::AnswerMessages));
        assert!(!gate.can(&anonymous, Affordance::LeaveReview));
        assert!(gate.can(&session(RoleClaim::Admin), Affordance::AddBook));
        assert_eq!(gate.session_action(&anonymous), SessionAction::SignIn);
        assert_eq!(gate.session_action(&member), SessionAction::SignOut);
    }
}
