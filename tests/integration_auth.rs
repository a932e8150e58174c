mod common;

use axum::http::{Method, StatusCode};
use common::{admin_token, send, token_for};
use registrar_auth::create_access_token;
use registrar_config::JwtConfig;
use registrar_core::permissions;
use registrar_models::ids::UserId;
use sqlx::PgPool;

const CURRENT_SEMESTER: &str = "/api/academic-semesters/current";

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_authorization_header(pool: PgPool) {
    let (status, body) = send(&pool, Method::GET, CURRENT_SEMESTER, None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_token_is_unauthorized(pool: PgPool) {
    let (status, body) = send(
        &pool,
        Method::GET,
        CURRENT_SEMESTER,
        Some("not-a-jwt"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_signed_with_other_secret(pool: PgPool) {
    let config = JwtConfig {
        secret: "some-other-secret".to_string(),
        access_token_expiry: 3600,
    };
    let token = create_access_token(
        UserId::new().into_inner(),
        "admin@university.edu",
        "admin",
        vec![permissions::ACADEMIC_SEMESTERS_READ.to_string()],
        &config,
    )
    .unwrap();

    let (status, _) = send(&pool, Method::GET, CURRENT_SEMESTER, Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_permission_is_forbidden(pool: PgPool) {
    let token = token_for(UserId::new(), "student", &[permissions::ENROLLMENTS_SELF]);

    let (status, body) = send(&pool, Method::GET, CURRENT_SEMESTER, Some(&token), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Access denied. Missing required permission: academic_semesters:read"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_start_new_semester(pool: PgPool) {
    let token = token_for(UserId::new(), "student", &[permissions::ENROLLMENTS_SELF]);
    let uri = format!(
        "/api/semester-registrations/{}/start-new-semester",
        UserId::new()
    );

    let (status, _) = send(&pool, Method::POST, &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_current_semester_is_null_before_first_rollover(pool: PgPool) {
    let token = admin_token();

    let (status, body) = send(&pool, Method::GET, CURRENT_SEMESTER, Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}
