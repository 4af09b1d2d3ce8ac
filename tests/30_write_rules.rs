//! Write-path rules as they apply across the token -> actor -> policy chain.

use uuid::Uuid;

use rosterhub::auth::{generate_jwt, validate_jwt, Claims};
use rosterhub::dto::children::VideoInput;
use rosterhub::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use rosterhub::policy::{self, Actor, PolicyError};

fn actor_from_token(role: &str, org: Option<Uuid>, profile: Option<Uuid>) -> Actor {
    let claims = Claims::new(Uuid::new_v4(), role.to_string(), org, profile);
    let token = generate_jwt(claims).unwrap();
    let decoded = validate_jwt(&token).unwrap();
    Actor::from_claims(&decoded)
}

#[test]
fn token_roundtrip_resolves_each_role() {
    assert_eq!(actor_from_token("superuser", None, None), Actor::Superuser);

    let org = Uuid::new_v4();
    assert!(matches!(
        actor_from_token("org_admin", Some(org), None),
        Actor::OrgAdmin { organization_id, .. } if organization_id == org
    ));

    let profile = Uuid::new_v4();
    assert!(matches!(
        actor_from_token("athlete", None, Some(profile)),
        Actor::Athlete { profile_id, .. } if profile_id == profile
    ));

    assert_eq!(actor_from_token("coach", None, None), Actor::Unknown);
}

#[test]
fn tampered_tokens_are_rejected() {
    let claims = Claims::new(Uuid::new_v4(), "superuser".to_string(), None, None);
    let token = generate_jwt(claims).unwrap();

    let mut tampered = token.clone();
    tampered.pop();
    tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
    assert!(validate_jwt(&tampered).is_err());
}

#[test]
fn athlete_cannot_create_profiles_even_with_valid_token() {
    let actor = actor_from_token("athlete", None, Some(Uuid::new_v4()));
    let mut req = CreateProfileRequest::default();
    assert_eq!(
        policy::authorize_profile_create(&actor, &mut req),
        Err(PolicyError::CreateDenied("profile"))
    );
}

#[test]
fn org_admin_cannot_move_a_profile_to_another_organization() {
    let own_org = Uuid::new_v4();
    let actor = actor_from_token("org_admin", Some(own_org), None);

    let mut req = UpdateProfileRequest {
        organization_id: Some(Uuid::new_v4()),
        ..Default::default()
    };
    policy::authorize_profile_update(&actor, &mut req).unwrap();
    assert_eq!(req.organization_id, Some(own_org));
}

#[test]
fn athlete_touching_a_locked_field_is_rejected() {
    let actor = actor_from_token("athlete", None, Some(Uuid::new_v4()));

    let mut req = UpdateProfileRequest {
        sport: Some("tennis".to_string()),
        ..Default::default()
    };
    assert_eq!(
        policy::authorize_profile_update(&actor, &mut req),
        Err(PolicyError::LockedField("sport"))
    );
}

#[test]
fn athlete_child_batch_lands_on_their_own_profile() {
    let own_profile = Uuid::new_v4();
    let actor = actor_from_token("athlete", None, Some(own_profile));

    // The athlete claims every row belongs to someone else's profile
    let foreign = Uuid::new_v4();
    let mut items = vec![VideoInput {
        id: None,
        profile_id: Some(foreign),
        url: "https://youtube.com/watch?v=abc".to_string(),
    }];

    policy::enforce_child_ownership(&actor, foreign, &mut items).unwrap();
    assert_eq!(items[0].profile_id, Some(own_profile));
    assert_eq!(policy::resolve_child_owner(&actor, foreign), own_profile);
}

#[test]
fn foreign_child_ids_cannot_be_captured() {
    // A batch row may carry any id; ownership enforcement pins the profile,
    // and the store only matches updates where id and owner profile agree.
    // A foreign id therefore resolves as not-found rather than reassigning
    // someone else's record.
    let own_profile = Uuid::new_v4();
    let actor = actor_from_token("athlete", None, Some(own_profile));

    let foreign_row = Uuid::new_v4();
    let mut items = vec![VideoInput {
        id: Some(foreign_row),
        profile_id: Some(Uuid::new_v4()),
        url: "https://youtube.com/watch?v=abc".to_string(),
    }];

    policy::enforce_child_ownership(&actor, Uuid::new_v4(), &mut items).unwrap();
    assert_eq!(items[0].id, Some(foreign_row));
    assert_eq!(items[0].profile_id, Some(own_profile));
}

#[test]
fn unknown_role_is_denied_every_write() {
    let actor = actor_from_token("scout", None, None);

    let mut create = CreateProfileRequest::default();
    assert!(policy::authorize_profile_create(&actor, &mut create).is_err());

    let mut update = UpdateProfileRequest::default();
    assert!(policy::authorize_profile_update(&actor, &mut update).is_err());

    let mut items: Vec<VideoInput> = vec![];
    assert!(policy::enforce_child_ownership(&actor, Uuid::new_v4(), &mut items).is_err());

    assert!(!actor.can_create_profile());
    assert!(!actor.can_create_organization());
    assert!(!actor.can_delete_profile());
    assert!(!actor.can_delete_organization());
}

#[test]
fn only_superusers_manage_organization_lifecycle() {
    let superuser = actor_from_token("superuser", None, None);
    let admin = actor_from_token("org_admin", Some(Uuid::new_v4()), None);

    assert!(superuser.can_create_organization());
    assert!(superuser.can_delete_organization());
    assert!(!admin.can_create_organization());
    assert!(!admin.can_delete_organization());
}
