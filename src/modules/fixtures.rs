//! Row builders shared by the inline `#[sqlx::test]` service tests.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use sqlx::PgPool;
use uuid::Uuid;

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

fn unique_code() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_string()
}

pub async fn create_semester(pool: &PgPool, is_current: bool) -> AcademicSemesterId {
    sqlx::query_scalar(
        "INSERT INTO academic_semesters (title, year, code, is_current) VALUES ('Autumn', 2030, $1, $2) RETURNING id",
    )
    .bind(unique_code())
    .bind(is_current)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_registration(
    pool: &PgPool,
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
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn set_registration_status(
    pool: &PgPool,
    id: SemesterRegistrationId,
    status: SemesterRegistrationStatus,
) {
    sqlx::query("UPDATE semester_registrations SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_student(pool: &PgPool) -> TestStudent {
    let user_id = UserId::new();
    let id = sqlx::query_scalar(
        "INSERT INTO students (user_id, student_code, first_name, last_name) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(unique_code())
    .bind(FirstName().fake::<String>())
    .bind(LastName().fake::<String>())
    .fetch_one(pool)
    .await
    .unwrap();

    TestStudent { user_id, id }
}

/// Creates a catalog course, offers it in `registration_id` and opens one
/// section with `capacity` seats.
pub async fn create_offering(
    pool: &PgPool,
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
    .fetch_one(pool)
    .await
    .unwrap();

    let department_id: Uuid =
        sqlx::query_scalar("INSERT INTO academic_departments (title) VALUES ($1) RETURNING id")
            .bind(format!("Department {code}"))
            .fetch_one(pool)
            .await
            .unwrap();

    let offered_course_id: OfferedCourseId = sqlx::query_scalar(
        r#"INSERT INTO offered_courses (course_id, academic_department_id, semester_registration_id)
           VALUES ($1, $2, $3) RETURNING id"#,
    )
    .bind(course_id)
    .bind(department_id)
    .bind(registration_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let section_id = add_section(pool, offered_course_id, capacity).await;

    TestOffering {
        course_id,
        offered_course_id,
        section_id,
    }
}

pub async fn add_section(
    pool: &PgPool,
    offered_course_id: OfferedCourseId,
    capacity: i32,
) -> OfferedCourseSectionId {
    sqlx::query_scalar(
        r#"INSERT INTO offered_course_sections (title, offered_course_id, max_capacity)
           VALUES ('A', $1, $2) RETURNING id"#,
    )
    .bind(offered_course_id)
    .bind(capacity)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn section_count(pool: &PgPool, section_id: OfferedCourseSectionId) -> i32 {
    sqlx::query_scalar(
        "SELECT currently_enrolled_student FROM offered_course_sections WHERE id = $1",
    )
    .bind(section_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn credits_taken(
    pool: &PgPool,
    student_id: StudentId,
    registration_id: SemesterRegistrationId,
) -> i32 {
    sqlx::query_scalar(
        r#"SELECT total_credits_taken FROM student_semester_registrations
           WHERE student_id = $1 AND semester_registration_id = $2"#,
    )
    .bind(student_id)
    .bind(registration_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_room(pool: &PgPool) -> RoomId {
    let code = unique_code();
    let building_id: Uuid =
        sqlx::query_scalar("INSERT INTO buildings (title) VALUES ($1) RETURNING id")
            .bind(format!("Building {code}"))
            .fetch_one(pool)
            .await
            .unwrap();

    sqlx::query_scalar(
        "INSERT INTO rooms (room_number, floor, building_id) VALUES ($1, '1', $2) RETURNING id",
    )
    .bind(code)
    .bind(building_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_faculty(pool: &PgPool) -> FacultyId {
    sqlx::query_scalar(
        "INSERT INTO faculties (user_id, first_name, last_name) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(FirstName().fake::<String>())
    .bind(LastName().fake::<String>())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn is_confirmed(
    pool: &PgPool,
    student_id: StudentId,
    registration_id: SemesterRegistrationId,
) -> bool {
    sqlx::query_scalar(
        r#"SELECT is_confirmed FROM student_semester_registrations
           WHERE student_id = $1 AND semester_registration_id = $2"#,
    )
    .bind(student_id)
    .bind(registration_id)
    .fetch_one(pool)
    .await
    .unwrap()
}
