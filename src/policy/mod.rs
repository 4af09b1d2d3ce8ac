//! Access policy engine.
//!
//! Every request resolves its JWT claims into an explicit [`Actor`] before any
//! record is touched. Read paths ask the actor for a [`Scope`] and merge it
//! into the store query; write paths go through the rules in [`write`], which
//! reject denied operations and force-set ownership fields before anything
//! reaches the store.

pub mod scope;
pub mod write;

pub use scope::Scope;
pub use write::{
    authorize_organization_update, authorize_profile_create, authorize_profile_update,
    enforce_child_ownership, locked_profile_fields, resolve_child_owner, OwnedChild,
    PROFILE_LOCKED_FIELDS,
};

use serde_json::json;
use uuid::Uuid;

use crate::auth::Claims;

/// The identity performing an operation, resolved once at authentication time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Superuser,
    OrgAdmin {
        user_id: Uuid,
        organization_id: Uuid,
    },
    Athlete {
        user_id: Uuid,
        profile_id: Uuid,
    },
    /// Authenticated, but the role is not one we recognize. Reads degrade to
    /// empty result sets; writes are denied.
    Unknown,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("not allowed to create {0} records")]
    CreateDenied(&'static str),

    #[error("field '{0}' is locked for this account")]
    LockedField(&'static str),

    #[error("not allowed to modify {0} records")]
    WriteDenied(&'static str),
}

impl Actor {
    /// Resolve claims into a typed actor. Role strings that are missing their
    /// required companion ids (an org admin without an organization, an
    /// athlete without a profile) fall back to [`Actor::Unknown`].
    pub fn from_claims(claims: &Claims) -> Self {
        match claims.role.as_str() {
            "superuser" => Actor::Superuser,
            "org_admin" => match claims.organization_id {
                Some(organization_id) => Actor::OrgAdmin {
                    user_id: claims.sub,
                    organization_id,
                },
                None => Actor::Unknown,
            },
            "athlete" => match claims.profile_id {
                Some(profile_id) => Actor::Athlete {
                    user_id: claims.sub,
                    profile_id,
                },
                None => Actor::Unknown,
            },
            _ => Actor::Unknown,
        }
    }

    pub fn is_superuser(&self) -> bool {
        matches!(self, Actor::Superuser)
    }

    /// Visibility of profile records for this actor.
    pub fn profile_scope(&self) -> Scope {
        match self {
            Actor::Superuser => Scope::All,
            Actor::OrgAdmin {
                organization_id, ..
            } => Scope::Where(json!({ "organization_id": organization_id })),
            Actor::Athlete { user_id, .. } => Scope::Where(json!({ "user_id": user_id })),
            Actor::Unknown => Scope::Nothing,
        }
    }

    /// Visibility of organization records for this actor. Athletes manage
    /// their own profile, not their school, so they see none.
    pub fn organization_scope(&self) -> Scope {
        match self {
            Actor::Superuser => Scope::All,
            Actor::OrgAdmin {
                organization_id, ..
            } => Scope::Where(json!({ "id": organization_id })),
            Actor::Athlete { .. } | Actor::Unknown => Scope::Nothing,
        }
    }

    /// Athletes cannot create new profiles; they are provisioned for them.
    pub fn can_create_profile(&self) -> bool {
        matches!(self, Actor::Superuser | Actor::OrgAdmin { .. })
    }

    pub fn can_create_organization(&self) -> bool {
        self.is_superuser()
    }

    pub fn can_delete_profile(&self) -> bool {
        matches!(self, Actor::Superuser | Actor::OrgAdmin { .. })
    }

    pub fn can_delete_organization(&self) -> bool {
        self.is_superuser()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str, org: Option<Uuid>, profile: Option<Uuid>) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            role: role.to_string(),
            organization_id: org,
            profile_id: profile,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn superuser_claims_resolve() {
        let actor = Actor::from_claims(&claims("superuser", None, None));
        assert_eq!(actor, Actor::Superuser);
        assert_eq!(actor.profile_scope(), Scope::All);
    }

    #[test]
    fn org_admin_scopes_to_own_organization() {
        let org = Uuid::new_v4();
        let actor = Actor::from_claims(&claims("org_admin", Some(org), None));
        match actor.profile_scope() {
            Scope::Where(clause) => {
                assert_eq!(clause["organization_id"], json!(org));
            }
            other => panic!("expected Where scope, got {:?}", other),
        }
    }

    #[test]
    fn athlete_scopes_to_own_user() {
        let profile = Uuid::new_v4();
        let c = claims("athlete", None, Some(profile));
        let actor = Actor::from_claims(&c);
        match actor.profile_scope() {
            Scope::Where(clause) => {
                assert_eq!(clause["user_id"], json!(c.sub));
            }
            other => panic!("expected Where scope, got {:?}", other),
        }
    }

    #[test]
    fn unrecognized_role_sees_nothing() {
        let actor = Actor::from_claims(&claims("coach", None, None));
        assert_eq!(actor, Actor::Unknown);
        assert_eq!(actor.profile_scope(), Scope::Nothing);
        assert_eq!(actor.organization_scope(), Scope::Nothing);
    }

    #[test]
    fn org_admin_without_org_id_is_unknown() {
        let actor = Actor::from_claims(&claims("org_admin", None, None));
        assert_eq!(actor, Actor::Unknown);
    }

    #[test]
    fn athlete_cannot_create_profiles() {
        let actor = Actor::Athlete {
            user_id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
        };
        assert!(!actor.can_create_profile());
        assert!(!actor.can_create_organization());
    }

    #[test]
    fn athletes_see_no_organizations() {
        let actor = Actor::Athlete {
            user_id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
        };
        assert_eq!(actor.organization_scope(), Scope::Nothing);
    }
}
