use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::modules::users::model::{
    CourseEnrollment, EnrolledCourse, UpdateProfileDto, User,
};
use crate::utils::errors::AppError;

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, status, bio, avatar, title, created_at
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// Every enrollment (active or not) for the profile page, most recent
    /// first.
    #[instrument(skip(db))]
    pub async fn get_enrollments(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<CourseEnrollment>, AppError> {
        let enrollments = sqlx::query_as::<_, CourseEnrollment>(
            "SELECT c.id, c.title, c.description, c.price, c.category_id, c.instructor_id,
                    c.duration, c.level, c.image_url, c.created_at,
                    e.enrolled_at, e.status
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             WHERE e.user_id = $1
             ORDER BY e.enrolled_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }

    #[instrument(skip(db, dto), fields(user.id = %user_id))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET name = $1, email = $2, bio = $3
             WHERE id = $4
             RETURNING id, name, email, role, status, bio, avatar, title, created_at",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.bio)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(user.id = %user_id, "Profile update collided with an existing email");
                return AppError::bad_request(anyhow::anyhow!("Email already in use"));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        info!(user.id = %user.id, "Profile updated");

        Ok(user)
    }

    #[instrument(skip(db, avatar), fields(user.id = %user_id))]
    pub async fn update_avatar(
        db: &PgPool,
        user_id: Uuid,
        avatar: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET avatar = $1 WHERE id = $2")
            .bind(avatar)
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    /// Active enrollments with progress and review aggregates.
    ///
    /// The rating aggregates come from a second grouped query and are
    /// merged in; a course with no reviews keeps the defaults.
    #[instrument(skip(db))]
    pub async fn get_enrolled_courses(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, AppError> {
        let mut courses = sqlx::query_as::<_, EnrolledCourse>(
            "SELECT c.id, c.title, c.description, c.price, c.category_id, c.instructor_id,
                    c.duration, c.level, c.image_url, c.created_at,
                    cat.name AS category_name,
                    e.enrolled_at,
                    e.status AS enrollment_status,
                    COALESCE(up.progress_percentage, 0) AS progress,
                    COALESCE(up.last_accessed, e.enrolled_at) AS last_accessed
             FROM enrollments e
             JOIN courses c ON c.id = e.course_id
             LEFT JOIN categories cat ON cat.id = c.category_id
             LEFT JOIN user_progress up ON up.course_id = c.id AND up.user_id = e.user_id
             WHERE e.user_id = $1 AND e.status = 'active'
             ORDER BY e.enrolled_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        if courses.is_empty() {
            return Ok(courses);
        }

        let course_ids: Vec<Uuid> = courses.iter().map(|c| c.id).collect();
        let ratings: Vec<(Uuid, f64, i64)> = sqlx::query_as(
            "SELECT course_id, AVG(rating), COUNT(id)
             FROM reviews
             WHERE course_id = ANY($1)
             GROUP BY course_id",
        )
        .bind(&course_ids)
        .fetch_all(db)
        .await?;

        let by_course: HashMap<Uuid, (f64, i64)> = ratings
            .into_iter()
            .map(|(id, avg, count)| (id, (avg, count)))
            .collect();

        for course in &mut courses {
            if let Some((avg, count)) = by_course.get(&course.id) {
                course.average_rating = Some(*avg);
                course.review_count = *count;
            }
        }

        debug!(user.id = %user_id, count = courses.len(), "Fetched enrolled courses");

        Ok(courses)
    }
}
