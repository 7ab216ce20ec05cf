use learnhub::middleware::auth::AuthUser;
use learnhub::middleware::role::{check_any_role, check_role, parse_role_from_string};
use learnhub::modules::auth::model::Claims;
use learnhub::modules::users::model::UserRole;

fn create_test_auth_user(role: &str) -> AuthUser {
    let claims = Claims {
        sub: "00000000-0000-0000-0000-000000000000".to_string(),
        email: "test@example.com".to_string(),
        role: role.to_string(),
        exp: 9999999999,
        iat: 1234567890,
    };
    AuthUser(claims)
}

#[test]
fn test_check_role_exact_match() {
    let auth_user = create_test_auth_user("admin");
    assert!(check_role(&auth_user, UserRole::Admin).is_ok());

    let auth_user = create_test_auth_user("instructor");
    assert!(check_role(&auth_user, UserRole::Instructor).is_ok());

    let auth_user = create_test_auth_user("user");
    assert!(check_role(&auth_user, UserRole::User).is_ok());
}

#[test]
fn test_check_role_no_match() {
    let auth_user = create_test_auth_user("user");
    assert!(check_role(&auth_user, UserRole::Admin).is_err());

    let auth_user = create_test_auth_user("instructor");
    assert!(check_role(&auth_user, UserRole::Admin).is_err());
}

#[test]
fn test_check_any_role_match() {
    let allowed = vec![UserRole::Admin, UserRole::Instructor];

    let auth_user = create_test_auth_user("admin");
    assert!(check_any_role(&auth_user, &allowed).is_ok());

    let auth_user = create_test_auth_user("instructor");
    assert!(check_any_role(&auth_user, &allowed).is_ok());
}

#[test]
fn test_check_any_role_no_match() {
    let allowed = vec![UserRole::Admin, UserRole::Instructor];
    let auth_user = create_test_auth_user("user");
    assert!(check_any_role(&auth_user, &allowed).is_err());
}

#[test]
fn test_check_any_role_empty_list() {
    let allowed = vec![];
    let auth_user = create_test_auth_user("admin");
    assert!(check_any_role(&auth_user, &allowed).is_err());
}

#[test]
fn test_parse_role_from_string() {
    assert!(matches!(parse_role_from_string("admin"), Ok(UserRole::Admin)));
    assert!(matches!(
        parse_role_from_string("instructor"),
        Ok(UserRole::Instructor)
    ));
    assert!(matches!(parse_role_from_string("user"), Ok(UserRole::User)));
    assert!(parse_role_from_string("invalid").is_err());
}
