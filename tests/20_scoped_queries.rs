//! End-to-end checks that an actor's scope compiles into the SQL the store
//! would actually run. No database involved: the pipeline is pure up to the
//! generated query string and params.

use serde_json::json;
use uuid::Uuid;

use rosterhub::filter::{Filter, FilterData};
use rosterhub::policy::{Actor, Scope};

fn compile(table: &str, data: FilterData) -> (String, Vec<serde_json::Value>) {
    let mut filter = Filter::new(table).unwrap();
    filter.assign(data).unwrap();
    let sql = filter.to_sql().unwrap();
    (sql.query, sql.params)
}

#[test]
fn superuser_profile_list_has_no_where_clause() {
    let filter = Actor::Superuser
        .profile_scope()
        .into_filter(FilterData::default())
        .unwrap();
    let (query, params) = compile("profiles", filter);
    assert_eq!(query, "SELECT * FROM \"profiles\"");
    assert!(params.is_empty());
}

#[test]
fn org_admin_profile_list_is_scoped_to_their_organization() {
    let org = Uuid::new_v4();
    let actor = Actor::OrgAdmin {
        user_id: Uuid::new_v4(),
        organization_id: org,
    };

    let filter = actor
        .profile_scope()
        .into_filter(FilterData::default())
        .unwrap();
    let (query, params) = compile("profiles", filter);
    assert_eq!(
        query,
        "SELECT * FROM \"profiles\" WHERE \"organization_id\" = $1"
    );
    assert_eq!(params, vec![json!(org)]);
}

#[test]
fn athlete_profile_list_is_scoped_to_their_user() {
    let user = Uuid::new_v4();
    let actor = Actor::Athlete {
        user_id: user,
        profile_id: Uuid::new_v4(),
    };

    let filter = actor
        .profile_scope()
        .into_filter(FilterData::default())
        .unwrap();
    let (query, params) = compile("profiles", filter);
    assert_eq!(query, "SELECT * FROM \"profiles\" WHERE \"user_id\" = $1");
    assert_eq!(params, vec![json!(user)]);
}

#[test]
fn scoped_get_by_id_ands_scope_before_the_id() {
    let org = Uuid::new_v4();
    let record = Uuid::new_v4();
    let actor = Actor::OrgAdmin {
        user_id: Uuid::new_v4(),
        organization_id: org,
    };

    let filter = actor
        .profile_scope()
        .and(json!({ "id": record }))
        .into_filter(FilterData::default())
        .unwrap();
    let (query, params) = compile("profiles", filter);
    assert_eq!(
        query,
        "SELECT * FROM \"profiles\" WHERE ((\"organization_id\" = $1) AND (\"id\" = $2))"
    );
    assert_eq!(params, vec![json!(org), json!(record)]);
}

#[test]
fn unknown_actor_suppresses_the_query_entirely() {
    assert!(Actor::Unknown
        .profile_scope()
        .into_filter(FilterData::default())
        .is_none());
    assert!(Actor::Unknown
        .profile_scope()
        .and(json!({ "id": Uuid::new_v4() }))
        .into_filter(FilterData::default())
        .is_none());
}

#[test]
fn athletes_see_no_organizations_at_all() {
    let actor = Actor::Athlete {
        user_id: Uuid::new_v4(),
        profile_id: Uuid::new_v4(),
    };
    assert_eq!(actor.organization_scope(), Scope::Nothing);
    assert!(actor
        .organization_scope()
        .into_filter(FilterData::default())
        .is_none());
}

#[test]
fn org_admin_organization_list_sees_only_their_own() {
    let org = Uuid::new_v4();
    let actor = Actor::OrgAdmin {
        user_id: Uuid::new_v4(),
        organization_id: org,
    };

    let filter = actor
        .organization_scope()
        .into_filter(FilterData::default())
        .unwrap();
    let (query, params) = compile("organizations", filter);
    assert_eq!(query, "SELECT * FROM \"organizations\" WHERE \"id\" = $1");
    assert_eq!(params, vec![json!(org)]);
}

#[test]
fn scope_composes_with_caller_pagination_and_order() {
    let org = Uuid::new_v4();
    let actor = Actor::OrgAdmin {
        user_id: Uuid::new_v4(),
        organization_id: org,
    };

    let data = FilterData {
        order: Some(json!("last_name asc")),
        limit: Some(25),
        offset: Some(50),
        ..Default::default()
    };
    let filter = actor.profile_scope().into_filter(data).unwrap();
    let (query, _) = compile("profiles", filter);
    assert_eq!(
        query,
        "SELECT * FROM \"profiles\" WHERE \"organization_id\" = $1 ORDER BY \"last_name\" ASC LIMIT 25 OFFSET 50"
    );
}

#[test]
fn caller_where_clause_cannot_escape_the_scope() {
    // A caller-supplied clause widens nothing: the scope is ANDed around it
    let org = Uuid::new_v4();
    let actor = Actor::OrgAdmin {
        user_id: Uuid::new_v4(),
        organization_id: org,
    };

    let data = FilterData {
        where_clause: Some(json!({ "organization_id": { "$ne": org } })),
        ..Default::default()
    };
    let filter = actor.profile_scope().into_filter(data).unwrap();
    let (query, params) = compile("profiles", filter);
    assert_eq!(
        query,
        "SELECT * FROM \"profiles\" WHERE ((\"organization_id\" = $1) AND (\"organization_id\" <> $2))"
    );
    assert_eq!(params[0], json!(org));
}
