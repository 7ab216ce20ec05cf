use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::modules::courses::model::{
    ActivityType, CourseDetailResponse, CourseReview, CourseWithStats,
};
use crate::utils::errors::AppError;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn get_all_courses(db: &PgPool) -> Result<Vec<CourseWithStats>, AppError> {
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
             GROUP BY c.id, cat.name
             ORDER BY c.created_at DESC",
        )
        .fetch_all(db)
        .await?;

        debug!(count = courses.len(), "Fetched course catalog");

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, course_id: Uuid) -> Result<CourseDetailResponse, AppError> {
        let course = sqlx::query_as::<_, CourseWithStats>(
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
             WHERE c.id = $1
             GROUP BY c.id, cat.name",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        let reviews = sqlx::query_as::<_, CourseReview>(
            "SELECT r.id, r.user_id, r.rating, r.created_at,
                    u.name AS user_name, u.avatar AS user_avatar
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.course_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(CourseDetailResponse { course, reviews })
    }

    /// Enroll a user in a course.
    ///
    /// The enrollment, the zero-progress row and the audit entry are one
    /// transaction; a concurrent duplicate is caught either by the
    /// in-transaction check or by the partial unique index, and both map
    /// to Conflict.
    #[instrument(skip(db), fields(user.id = %user_id, course.id = %course_id))]
    pub async fn enroll(db: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let course_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(course_id)
                .fetch_one(&mut *tx)
                .await?;

        if !course_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let already_enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM enrollments
                 WHERE user_id = $1 AND course_id = $2 AND status = 'active'
             )",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_enrolled {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Already enrolled in this course"
            )));
        }

        sqlx::query("INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(course_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow::anyhow!(
                        "Already enrolled in this course"
                    ));
                }
                AppError::from(e)
            })?;

        // Re-enrollment after an unsubscribe keeps the old progress row.
        sqlx::query(
            "INSERT INTO user_progress (user_id, course_id) VALUES ($1, $2)
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO user_activity (user_id, course_id, activity_type, description)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(ActivityType::Enrollment)
        .bind("Enrolled in the course")
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user.id = %user_id, course.id = %course_id, "User enrolled");

        Ok(())
    }

    #[instrument(skip(db), fields(user.id = %user_id, course.id = %course_id))]
    pub async fn unsubscribe(db: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let enrollment_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM enrollments
             WHERE user_id = $1 AND course_id = $2 AND status = 'active'",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Active enrollment not found")))?;

        sqlx::query("UPDATE enrollments SET status = 'unsubscribed' WHERE id = $1")
            .bind(enrollment_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO user_activity (user_id, course_id, activity_type, description)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(ActivityType::Unsubscribe)
        .bind("Unsubscribed from course")
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user.id = %user_id, course.id = %course_id, "User unsubscribed");

        Ok(())
    }

    /// Upsert the user's progress; hitting 100% logs a completion entry.
    #[instrument(skip(db), fields(user.id = %user_id, course.id = %course_id))]
    pub async fn update_progress(
        db: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
        progress_percentage: i32,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            "INSERT INTO user_progress (user_id, course_id, progress_percentage)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, course_id)
             DO UPDATE SET progress_percentage = EXCLUDED.progress_percentage,
                           last_accessed = NOW()",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(progress_percentage)
        .execute(&mut *tx)
        .await?;

        if progress_percentage == 100 {
            sqlx::query(
                "INSERT INTO user_activity (user_id, course_id, activity_type, description)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(course_id)
            .bind(ActivityType::Completion)
            .bind("Completed course")
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
