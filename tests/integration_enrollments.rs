mod common;

use axum::http::{Method, StatusCode};
use common::{
    TestOffering, create_offering, create_registration, create_semester, create_student, send,
    student_token,
};
use registrar_models::SemesterRegistrationStatus;
use serde_json::{Value, json};
use sqlx::PgPool;

const BASE: &str = "/api/semester-registrations";

fn course_body(offering: &TestOffering) -> Value {
    json!({
        "offered_course_id": offering.offered_course_id,
        "offered_course_section_id": offering.section_id,
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_enrollment_flow(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let semester_id = create_semester(&mut tx, false).await;
    let registration_id =
        create_registration(&mut tx, semester_id, SemesterRegistrationStatus::Ongoing, 3, 6).await;
    let offering = create_offering(&mut tx, registration_id, 3, 1).await;
    let student = create_student(&mut tx).await;
    let rival = create_student(&mut tx).await;
    tx.commit().await.unwrap();

    let token = student_token(&student);
    let rival_token = student_token(&rival);

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/start-registration"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_credits_taken"], 0);
    assert_eq!(body["is_confirmed"], false);

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/enroll-into-course"),
        Some(&token),
        Some(course_body(&offering)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["student_id"], json!(student.id));

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/enroll-into-course"),
        Some(&token),
        Some(course_body(&offering)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Student is already enrolled in this course");

    send(
        &pool,
        Method::POST,
        &format!("{BASE}/start-registration"),
        Some(&rival_token),
        None,
    )
    .await;
    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/enroll-into-course"),
        Some(&rival_token),
        Some(course_body(&offering)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Maximum capacity exceeded");

    let (status, body) = send(
        &pool,
        Method::GET,
        &format!("{BASE}/my-registration-courses"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["credits"], 3);

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/confirm-my-registration"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_confirmed"], true);
    assert_eq!(body["total_credits_taken"], 3);

    let (status, body) = send(
        &pool,
        Method::GET,
        &format!("{BASE}/my-registration"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student_semester_registration"]["is_confirmed"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_withdraw_releases_seat(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let semester_id = create_semester(&mut tx, false).await;
    let registration_id =
        create_registration(&mut tx, semester_id, SemesterRegistrationStatus::Ongoing, 3, 6).await;
    let offering = create_offering(&mut tx, registration_id, 3, 1).await;
    let student = create_student(&mut tx).await;
    tx.commit().await.unwrap();

    let token = student_token(&student);
    send(
        &pool,
        Method::POST,
        &format!("{BASE}/start-registration"),
        Some(&token),
        None,
    )
    .await;
    send(
        &pool,
        Method::POST,
        &format!("{BASE}/enroll-into-course"),
        Some(&token),
        Some(course_body(&offering)),
    )
    .await;

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/withdraw-from-course"),
        Some(&token),
        Some(course_body(&offering)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully withdrawn from course");

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/withdraw-from-course"),
        Some(&token),
        Some(course_body(&offering)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student is not enrolled in this course");

    let seats: i32 = sqlx::query_scalar(
        "SELECT currently_enrolled_student FROM offered_course_sections WHERE id = $1",
    )
    .bind(offering.section_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(seats, 0);

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/confirm-my-registration"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You are not enrolled in any course");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_without_ongoing_registration(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let semester_id = create_semester(&mut tx, false).await;
    let registration_id =
        create_registration(&mut tx, semester_id, SemesterRegistrationStatus::Upcoming, 3, 6).await;
    let offering = create_offering(&mut tx, registration_id, 3, 5).await;
    let student = create_student(&mut tx).await;
    tx.commit().await.unwrap();
    let token = student_token(&student);

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/start-registration"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Registration is not started yet");

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/enroll-into-course"),
        Some(&token),
        Some(course_body(&offering)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "There is no ongoing semester registration");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_requires_offered_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let student = create_student(&mut tx).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        &pool,
        Method::POST,
        &format!("{BASE}/enroll-into-course"),
        Some(&student_token(&student)),
        Some(json!({ "offered_course_section_id": uuid::Uuid::new_v4() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "offered_course_id is required");
}
