use axum::http::StatusCode;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use learnhub::config::jwt::JwtConfig;
use learnhub::modules::auth::model::Claims;
use learnhub::modules::users::model::UserRole;
use learnhub::utils::jwt::{create_token, verify_token};

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 86400,
    }
}

#[test]
fn test_create_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_token(user_id, "test@example.com", &UserRole::User, &jwt_config);

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_verify_token_round_trip() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let email = "test@example.com";

    let token = create_token(user_id, email, &UserRole::User, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, email);
    assert_eq!(claims.role, "user");
}

#[test]
fn test_token_contains_correct_role() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    for (role, expected) in [
        (UserRole::Admin, "admin"),
        (UserRole::Instructor, "instructor"),
        (UserRole::User, "user"),
    ] {
        let token = create_token(user_id, "test@example.com", &role, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.role, expected);
    }
}

#[test]
fn test_token_expiry_is_set() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_token(user_id, "test@example.com", &UserRole::User, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert!(claims.exp > claims.iat);
    assert_eq!(claims.exp - claims.iat, jwt_config.token_expiry as usize);
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_token(user_id, "test@example.com", &UserRole::User, &jwt_config).unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        token_expiry: 86400,
    };

    let err = verify_token(&token, &wrong_jwt_config).unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.error.to_string(), "Invalid token");
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "",
        "not.enough",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        let err = verify_token(token, &jwt_config).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}

#[test]
fn test_verify_token_expired_is_distinct() {
    let jwt_config = get_test_jwt_config();

    // Hand-craft a token that expired long ago, past any leeway.
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: "test@example.com".to_string(),
        role: "user".to_string(),
        iat: 1_000_000,
        exp: 1_000_001,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .unwrap();

    let err = verify_token(&token, &jwt_config).unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.error.to_string(), "Token has expired");
}

#[test]
fn test_create_token_different_users_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let user_id1 = Uuid::new_v4();
    let user_id2 = Uuid::new_v4();

    let token1 = create_token(user_id1, "user1@example.com", &UserRole::User, &jwt_config).unwrap();
    let token2 = create_token(user_id2, "user2@example.com", &UserRole::User, &jwt_config).unwrap();

    assert_ne!(token1, token2);

    let claims1 = verify_token(&token1, &jwt_config).unwrap();
    let claims2 = verify_token(&token2, &jwt_config).unwrap();

    assert_eq!(claims1.sub, user_id1.to_string());
    assert_eq!(claims2.sub, user_id2.to_string());
}
