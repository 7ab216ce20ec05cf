use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::CourseWithStats;
use crate::modules::instructors::model::{Instructor, InstructorDetailResponse};
use crate::utils::errors::AppError;

pub struct InstructorService;

impl InstructorService {
    #[instrument(skip(db))]
    pub async fn get_all_instructors(db: &PgPool) -> Result<Vec<Instructor>, AppError> {
        let instructors = sqlx::query_as::<_, Instructor>(
            "SELECT u.id, u.name, u.email, u.avatar, u.bio, u.title,
                    COUNT(DISTINCT c.id) AS courses_count,
                    COUNT(DISTINCT e.user_id) AS students_count,
                    COALESCE(AVG(r.rating), 0) AS average_rating
             FROM users u
             LEFT JOIN courses c ON c.instructor_id = u.id
             LEFT JOIN enrollments e ON e.course_id = c.id
             LEFT JOIN reviews r ON r.course_id = c.id
             WHERE u.role = 'instructor'
             GROUP BY u.id
             ORDER BY courses_count DESC, students_count DESC",
        )
        .fetch_all(db)
        .await?;

        Ok(instructors)
    }

    #[instrument(skip(db))]
    pub async fn get_instructor(
        db: &PgPool,
        instructor_id: Uuid,
    ) -> Result<InstructorDetailResponse, AppError> {
        let instructor = sqlx::query_as::<_, Instructor>(
            "SELECT u.id, u.name, u.email, u.avatar, u.bio, u.title,
                    COUNT(DISTINCT c.id) AS courses_count,
                    COUNT(DISTINCT e.user_id) AS students_count,
                    COALESCE(AVG(r.rating), 0) AS average_rating
             FROM users u
             LEFT JOIN courses c ON c.instructor_id = u.id
             LEFT JOIN enrollments e ON e.course_id = c.id
             LEFT JOIN reviews r ON r.course_id = c.id
             WHERE u.id = $1 AND u.role = 'instructor'
             GROUP BY u.id",
        )
        .bind(instructor_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Instructor not found")))?;

        let courses = sqlx::query_as::<_, CourseWithStats>(
            "SELECT c.id, c.title, c.description, c.price, c.category_id, c.instructor_id,
                    c.duration, c.level, c.image_url, c.created_at,
                    cat.name AS category_name,
                    COUNT(DISTINCT e.id) AS enrolled_students,
                    AVG(r.rating) AS average_rating,
                    COUNT(DISTINCT r.id) AS review_count
             FROM courses c
             LEFT JOIN categories cat ON cat.id = c.category_id
             LEFT JOIN enrollments e ON e.course_id = c.id
             LEFT JOIN reviews r ON r.course_id = c.id
             WHERE c.instructor_id = $1
             GROUP BY c.id, cat.name
             ORDER BY c.created_at DESC",
        )
        .bind(instructor_id)
        .fetch_all(db)
        .await?;

        Ok(InstructorDetailResponse {
            instructor,
            courses,
        })
    }
}
