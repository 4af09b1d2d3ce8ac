use uuid::Uuid;

use super::{Actor, PolicyError};
use crate::dto::organization::UpdateOrganizationRequest;
use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};

/// Fields an athlete may view on their own profile but never change.
pub const PROFILE_LOCKED_FIELDS: &[&str] = &["organization_id", "sport", "user_id"];

/// Locked profile fields for the given actor. Only athletes carry locks.
pub fn locked_profile_fields(actor: &Actor) -> &'static [&'static str] {
    match actor {
        Actor::Athlete { .. } => PROFILE_LOCKED_FIELDS,
        _ => &[],
    }
}

/// Gate profile creation and pin ownership before the store is reached.
///
/// Org admins always create profiles into their own organization; whatever
/// organization the payload carried is discarded.
pub fn authorize_profile_create(
    actor: &Actor,
    req: &mut CreateProfileRequest,
) -> Result<(), PolicyError> {
    match actor {
        Actor::Superuser => Ok(()),
        Actor::OrgAdmin {
            organization_id, ..
        } => {
            req.organization_id = Some(*organization_id);
            Ok(())
        }
        Actor::Athlete { .. } | Actor::Unknown => Err(PolicyError::CreateDenied("profile")),
    }
}

/// Gate a profile update: athletes may not touch locked fields, org admins
/// have the organization pinned to their own.
pub fn authorize_profile_update(
    actor: &Actor,
    req: &mut UpdateProfileRequest,
) -> Result<(), PolicyError> {
    match actor {
        Actor::Superuser => Ok(()),
        Actor::OrgAdmin {
            organization_id, ..
        } => {
            req.organization_id = Some(*organization_id);
            Ok(())
        }
        Actor::Athlete { .. } => {
            if req.organization_id.is_some() {
                return Err(PolicyError::LockedField("organization_id"));
            }
            if req.sport.is_some() {
                return Err(PolicyError::LockedField("sport"));
            }
            if req.user_id.is_some() {
                return Err(PolicyError::LockedField("user_id"));
            }
            Ok(())
        }
        Actor::Unknown => Err(PolicyError::WriteDenied("profile")),
    }
}

/// Organizations are edited by superusers and their own admin only. Visibility
/// scoping already hides foreign organizations; this rejects the roles that
/// have no business writing them at all.
pub fn authorize_organization_update(
    actor: &Actor,
    _req: &mut UpdateOrganizationRequest,
) -> Result<(), PolicyError> {
    match actor {
        Actor::Superuser | Actor::OrgAdmin { .. } => Ok(()),
        Actor::Athlete { .. } | Actor::Unknown => Err(PolicyError::WriteDenied("organization")),
    }
}

/// Child records (achievements, stats, videos) carry a profile reference that
/// is never taken from client input.
pub trait OwnedChild {
    fn set_profile_id(&mut self, profile_id: Uuid);
}

/// The profile a batch of child records must land on: athletes always write to
/// their own profile, everyone else to the profile being edited.
pub fn resolve_child_owner(actor: &Actor, parent_profile_id: Uuid) -> Uuid {
    match actor {
        Actor::Athlete { profile_id, .. } => *profile_id,
        _ => parent_profile_id,
    }
}

/// Force every child record in a batch onto the resolved owner profile,
/// ignoring any submitted profile reference.
pub fn enforce_child_ownership<C: OwnedChild>(
    actor: &Actor,
    parent_profile_id: Uuid,
    items: &mut [C],
) -> Result<(), PolicyError> {
    if matches!(actor, Actor::Unknown) {
        return Err(PolicyError::WriteDenied("profile"));
    }
    let owner = resolve_child_owner(actor, parent_profile_id);
    for item in items.iter_mut() {
        item.set_profile_id(owner);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::children::AchievementInput;

    fn org_admin(org: Uuid) -> Actor {
        Actor::OrgAdmin {
            user_id: Uuid::new_v4(),
            organization_id: org,
        }
    }

    fn athlete(profile: Uuid) -> Actor {
        Actor::Athlete {
            user_id: Uuid::new_v4(),
            profile_id: profile,
        }
    }

    #[test]
    fn athlete_profile_creation_is_denied() {
        let mut req = CreateProfileRequest::default();
        let err = authorize_profile_create(&athlete(Uuid::new_v4()), &mut req).unwrap_err();
        assert_eq!(err, PolicyError::CreateDenied("profile"));
    }

    #[test]
    fn org_admin_create_pins_organization() {
        let org = Uuid::new_v4();
        let mut req = CreateProfileRequest {
            organization_id: Some(Uuid::new_v4()), // submitted value is ignored
            ..Default::default()
        };
        authorize_profile_create(&org_admin(org), &mut req).unwrap();
        assert_eq!(req.organization_id, Some(org));
    }

    #[test]
    fn superuser_create_keeps_submitted_organization() {
        let submitted = Uuid::new_v4();
        let mut req = CreateProfileRequest {
            organization_id: Some(submitted),
            ..Default::default()
        };
        authorize_profile_create(&Actor::Superuser, &mut req).unwrap();
        assert_eq!(req.organization_id, Some(submitted));
    }

    #[test]
    fn athlete_locked_fields_are_rejected() {
        let actor = athlete(Uuid::new_v4());

        let mut req = UpdateProfileRequest {
            sport: Some("hockey".to_string()),
            ..Default::default()
        };
        assert_eq!(
            authorize_profile_update(&actor, &mut req),
            Err(PolicyError::LockedField("sport"))
        );

        let mut req = UpdateProfileRequest {
            organization_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert_eq!(
            authorize_profile_update(&actor, &mut req),
            Err(PolicyError::LockedField("organization_id"))
        );

        let mut req = UpdateProfileRequest {
            user_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert_eq!(
            authorize_profile_update(&actor, &mut req),
            Err(PolicyError::LockedField("user_id"))
        );
    }

    #[test]
    fn athlete_may_edit_unlocked_fields() {
        let mut req = UpdateProfileRequest {
            bio: Some("new bio".to_string()),
            instagram: Some("https://instagram.com/me".to_string()),
            ..Default::default()
        };
        authorize_profile_update(&athlete(Uuid::new_v4()), &mut req).unwrap();
    }

    #[test]
    fn org_admin_update_pins_organization() {
        let org = Uuid::new_v4();
        let mut req = UpdateProfileRequest {
            organization_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        authorize_profile_update(&org_admin(org), &mut req).unwrap();
        assert_eq!(req.organization_id, Some(org));
    }

    #[test]
    fn child_batch_is_forced_onto_athlete_profile() {
        let own_profile = Uuid::new_v4();
        let foreign_profile = Uuid::new_v4();
        let mut items = vec![
            AchievementInput {
                id: None,
                profile_id: Some(foreign_profile),
                emoji: "🏆".to_string(),
                achievement: Some("State champion".to_string()),
            },
            AchievementInput {
                id: None,
                profile_id: None,
                emoji: "🥇".to_string(),
                achievement: None,
            },
        ];

        enforce_child_ownership(&athlete(own_profile), foreign_profile, &mut items).unwrap();
        for item in &items {
            assert_eq!(item.profile_id, Some(own_profile));
        }
    }

    #[test]
    fn child_batch_pins_to_edited_profile_for_admins() {
        let parent = Uuid::new_v4();
        let mut items = vec![AchievementInput {
            id: None,
            profile_id: Some(Uuid::new_v4()),
            emoji: "🎯".to_string(),
            achievement: None,
        }];
        enforce_child_ownership(&org_admin(Uuid::new_v4()), parent, &mut items).unwrap();
        assert_eq!(items[0].profile_id, Some(parent));
    }

    #[test]
    fn unknown_actor_cannot_write_children() {
        let mut items: Vec<AchievementInput> = vec![];
        let err = enforce_child_ownership(&Actor::Unknown, Uuid::new_v4(), &mut items).unwrap_err();
        assert_eq!(err, PolicyError::WriteDenied("profile"));
    }

    #[test]
    fn only_athletes_carry_field_locks() {
        assert!(locked_profile_fields(&Actor::Superuser).is_empty());
        assert!(locked_profile_fields(&org_admin(Uuid::new_v4())).is_empty());
        assert_eq!(
            locked_profile_fields(&athlete(Uuid::new_v4())),
            PROFILE_LOCKED_FIELDS
        );
    }
}
