#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

use registrar::router::init_router;
use registrar::state::AppState;
use registrar_auth::create_access_token;
use registrar_config::JwtConfig;
use registrar_core::permissions;
use registrar_models::SemesterRegistrationStatus;
use registrar_models::ids::{
    AcademicSemesterId, CourseId, FacultyId, OfferedCourseId, OfferedCourseSectionId, RoomId,
    SemesterRegistrationId, StudentId, UserId,
};

pub struct TestStudent {
    pub user_id: UserId,
    pub id: StudentId,
}

pub struct TestOffering {
    pub course_id: CourseId,
    pub offered_course_id: OfferedCourseId,
    pub section_id: OfferedCourseSectionId,
}

pub fn unique_code() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_string()
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    init_router(AppState::with_pool(pool))
}

/// Signs a token for `user_id` holding exactly `granted`.
pub fn token_for(user_id: UserId, role: &str, granted: &[&str]) -> String {
    create_access_token(
        user_id.into_inner(),
        &format!("{}@university.edu", unique_code()),
        role,
        granted.iter().map(|p| p.to_string()).collect(),
        &JwtConfig::from_env(),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    token_for(UserId::new(), "admin", permissions::ALL)
}

pub fn student_token(student: &TestStudent) -> String {
    token_for(student.user_id, "student", &[permissions::ENROLLMENTS_SELF])
}

/// Sends one request through a fresh router and returns the status and the
/// JSON body (`Value::Null` for empty bodies).
pub async fn send(
    pool: &PgPool,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let app = setup_test_app(pool.clone()).await;
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub async fn create_semester(
    tx: &mut Transaction<'_, Postgres>,
    is_current: bool,
) -> AcademicSemesterId {
    sqlx::query_scalar(
        "INSERT INTO academic_semesters (title, year, code, is_current) VALUES ('Autumn', 2031, $1, $2) RETURNING id",
    )
    .bind(unique_code())
    .bind(is_current)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_registration(
    tx: &mut Transaction<'_, Postgres>,
    semester_id: AcademicSemesterId,
    status: SemesterRegistrationStatus,
    min_credit: i32,
    max_credit: i32,
) -> SemesterRegistrationId {
    sqlx::query_scalar(
        r#"INSERT INTO semester_registrations
               (academic_semester_id, status, min_credit, max_credit, start_date, end_date)
           VALUES ($1, $2, $3, $4, NOW(), NOW() + INTERVAL '14 days')
           RETURNING id"#,
    )
    .bind(semester_id)
    .bind(status)
    .bind(min_credit)
    .bind(max_credit)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_student(tx: &mut Transaction<'_, Postgres>) -> TestStudent {
    let user_id = UserId::new();
    let id = sqlx::query_scalar(
        "INSERT INTO students (user_id, student_code, first_name, last_name) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(unique_code())
    .bind(FirstName().fake::<String>())
    .bind(LastName().fake::<String>())
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestStudent { user_id, id }
}

pub async fn create_offering(
    tx: &mut Transaction<'_, Postgres>,
    registration_id: SemesterRegistrationId,
    credits: i32,
    capacity: i32,
) -> TestOffering {
    let code = unique_code();
    let course_id: CourseId = sqlx::query_scalar(
        "INSERT INTO courses (title, code, credits) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(format!("Course {code}"))
    .bind(&code)
    .bind(credits)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    let department_id: Uuid =
        sqlx::query_scalar("INSERT INTO academic_departments (title) VALUES ($1) RETURNING id")
            .bind(format!("Department {code}"))
            .fetch_one(&mut **tx)
            .await
            .unwrap();

    let offered_course_id: OfferedCourseId = sqlx::query_scalar(
        r#"INSERT INTO offered_courses (course_id, academic_department_id, semester_registration_id)
           VALUES ($1, $2, $3) RETURNING id"#,
    )
    .bind(course_id)
    .bind(department_id)
    .bind(registration_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    let section_id: OfferedCourseSectionId = sqlx::query_scalar(
        r#"INSERT INTO offered_course_sections (title, offered_course_id, max_capacity)
           VALUES ('A', $1, $2) RETURNING id"#,
    )
    .bind(offered_course_id)
    .bind(capacity)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestOffering {
        course_id,
        offered_course_id,
        section_id,
    }
}

pub async fn create_room(tx: &mut Transaction<'_, Postgres>) -> RoomId {
    let code = unique_code();
    let building_id: Uuid =
        sqlx::query_scalar("INSERT INTO buildings (title) VALUES ($1) RETURNING id")
            .bind(format!("Building {code}"))
            .fetch_one(&mut **tx)
            .await
            .unwrap();

    sqlx::query_scalar(
        "INSERT INTO rooms (room_number, floor, building_id) VALUES ($1, '2', $2) RETURNING id",
    )
    .bind(code)
    .bind(building_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_faculty(tx: &mut Transaction<'_, Postgres>) -> FacultyId {
    sqlx::query_scalar(
        "INSERT INTO faculties (user_id, first_name, last_name) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(FirstName().fake::<String>())
    .bind(LastName().fake::<String>())
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}
