use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::admin::model::{
    AdminCourseRow, AdminLoginResponse, AdminUserRow, CreateCourseDto, DashboardStats,
    MonthlyEnrollments, PaginatedCoursesResponse, PaginatedUsersResponse, UpdateCourseDto,
};
use crate::modules::auth::model::LoginRequest;
use crate::modules::users::model::{User, UserRole, UserStatus};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::utils::pagination::{PaginationMeta, SearchParams};
use crate::utils::password::verify_password;

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AdminLoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct AdminWithPassword {
            id: Uuid,
            email: String,
            password: String,
        }

        // Non-admin accounts take the same rejection as unknown emails.
        let admin = sqlx::query_as::<_, AdminWithPassword>(
            "SELECT id, email, password FROM users WHERE email = $1 AND role = 'admin'",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid credentials")))?;

        let is_valid = verify_password(&dto.password, &admin.password)?;

        if !is_valid {
            warn!(user.id = %admin.id, "Admin login failed: wrong password");
            return Err(AppError::unauthorized(anyhow::anyhow!("Invalid credentials")));
        }

        let token = create_token(admin.id, &admin.email, &UserRole::Admin, jwt_config)?;
        let user = Self::get_admin_profile(db, admin.id).await?;

        info!(user.id = %user.id, "Admin logged in");

        Ok(AdminLoginResponse { token, user })
    }

    #[instrument(skip(db))]
    pub async fn get_admin_profile(db: &PgPool, admin_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, status, bio, avatar, title, created_at
             FROM users WHERE id = $1 AND role = 'admin'",
        )
        .bind(admin_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Admin not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_dashboard_stats(db: &PgPool) -> Result<DashboardStats, AppError> {
        let courses_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(db)
            .await?;

        let users_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;

        let categories_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(db)
            .await?;

        let average_rating =
            sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(rating) FROM reviews")
                .fetch_one(db)
                .await?
                .unwrap_or(0.0);

        let enrollment_stats = sqlx::query_as::<_, MonthlyEnrollments>(
            "SELECT to_char(enrolled_at, 'YYYY-MM') AS month,
                    COUNT(*) AS enrollments
             FROM enrollments
             WHERE enrolled_at >= NOW() - INTERVAL '6 months'
             GROUP BY to_char(enrolled_at, 'YYYY-MM')
             ORDER BY month ASC",
        )
        .fetch_all(db)
        .await?;

        Ok(DashboardStats {
            courses_count,
            users_count,
            categories_count,
            average_rating,
            enrollment_stats,
        })
    }

    /// Paginated user listing with substring search over name, email and
    /// role. `total` counts every match regardless of the requested page.
    #[instrument(skip(db, params))]
    pub async fn get_users(
        db: &PgPool,
        params: SearchParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let page = params.page();
        let limit = params.limit();
        let offset = params.offset();

        debug!(page, limit, search = ?params.search(), "Fetching users with pagination");

        let mut count_query = String::from("SELECT COUNT(*) FROM admin_users_view WHERE 1=1");
        let mut where_clause = String::new();
        let mut bind_params = Vec::new();

        if let Some(term) = params.search() {
            bind_params.push(format!("%{}%", term));
            where_clause.push_str(&format!(
                " AND (name ILIKE ${n} OR email ILIKE ${n} OR role::text ILIKE ${n})",
                n = bind_params.len()
            ));
        }

        count_query.push_str(&where_clause);

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &bind_params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let mut data_query = String::from(
            "SELECT id, name, email, role, status, bio, avatar, created_at,
                    enrolled_courses, last_enrollment, reviews_count, last_review
             FROM admin_users_view WHERE 1=1",
        );
        data_query.push_str(&where_clause);
        data_query.push_str(" ORDER BY created_at DESC");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

        let mut data_sql = sqlx::query_as::<_, AdminUserRow>(&data_query);
        for param in bind_params {
            data_sql = data_sql.bind(param);
        }
        let users = data_sql.fetch_all(db).await?;

        debug!(total, returned = users.len(), "Users fetched");

        Ok(PaginatedUsersResponse {
            users,
            pagination: PaginationMeta::new(page, limit, total),
        })
    }

    /// Flip a non-admin user between active and blocked.
    #[instrument(skip(db), fields(user.id = %user_id))]
    pub async fn update_user_status(
        db: &PgPool,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let role = sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if role == UserRole::Admin {
            warn!(user.id = %user_id, "Refused status change on admin account");
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Cannot update admin user status"
            )));
        }

        sqlx::query("UPDATE users SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(user.id = %user_id, status = ?status, "User status updated");

        Ok(())
    }

    /// Paginated course listing with substring search over title,
    /// description, category name and instructor name.
    #[instrument(skip(db, params))]
    pub async fn get_courses(
        db: &PgPool,
        params: SearchParams,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let page = params.page();
        let limit = params.limit();
        let offset = params.offset();

        debug!(page, limit, search = ?params.search(), "Fetching courses with pagination");

        let mut count_query = String::from("SELECT COUNT(*) FROM admin_courses_view WHERE 1=1");
        let mut where_clause = String::new();
        let mut bind_params = Vec::new();

        if let Some(term) = params.search() {
            bind_params.push(format!("%{}%", term));
            where_clause.push_str(&format!(
                " AND (title ILIKE ${n} OR description ILIKE ${n} \
                 OR category_name ILIKE ${n} OR instructor_name ILIKE ${n})",
                n = bind_params.len()
            ));
        }

        count_query.push_str(&where_clause);

        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &bind_params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let mut data_query = String::from(
            "SELECT id, title, description, price, category_id, instructor_id,
                    duration, level, image_url, created_at,
                    category_name, instructor_name,
                    enrolled_students, average_rating, review_count
             FROM admin_courses_view WHERE 1=1",
        );
        data_query.push_str(&where_clause);
        data_query.push_str(" ORDER BY created_at DESC");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));

        let mut data_sql = sqlx::query_as::<_, AdminCourseRow>(&data_query);
        for param in bind_params {
            data_sql = data_sql.bind(param);
        }
        let courses = data_sql.fetch_all(db).await?;

        debug!(total, returned = courses.len(), "Courses fetched");

        Ok(PaginatedCoursesResponse {
            courses,
            pagination: PaginationMeta::new(page, limit, total),
        })
    }

    #[instrument(skip(db, dto), fields(course.title = %dto.title))]
    pub async fn create_course(
        db: &PgPool,
        dto: CreateCourseDto,
    ) -> Result<AdminCourseRow, AppError> {
        let mut tx = db.begin().await?;

        Self::check_course_references(&mut tx, dto.category_id, dto.instructor_id).await?;

        let course_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO courses (title, description, price, category_id, instructor_id,
                                  duration, level, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.category_id)
        .bind(dto.instructor_id)
        .bind(&dto.duration)
        .bind(dto.level)
        .bind(&dto.image_url)
        .fetch_one(&mut *tx)
        .await?;

        let course = Self::fetch_admin_course(&mut tx, course_id).await?;

        tx.commit().await?;

        info!(course.id = %course_id, "Course created");

        Ok(course)
    }

    #[instrument(skip(db, dto), fields(course.id = %course_id))]
    pub async fn update_course(
        db: &PgPool,
        course_id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<AdminCourseRow, AppError> {
        let mut tx = db.begin().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(course_id)
                .fetch_one(&mut *tx)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        Self::check_course_references(&mut tx, dto.category_id, dto.instructor_id).await?;

        sqlx::query(
            "UPDATE courses SET title = $1, description = $2, price = $3, category_id = $4,
                                instructor_id = $5, duration = $6, level = $7, image_url = $8
             WHERE id = $9",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.category_id)
        .bind(dto.instructor_id)
        .bind(&dto.duration)
        .bind(dto.level)
        .bind(&dto.image_url)
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        let course = Self::fetch_admin_course(&mut tx, course_id).await?;

        tx.commit().await?;

        info!(course.id = %course_id, "Course updated");

        Ok(course)
    }

    /// Delete a course. Refused while it has active enrollments; the
    /// check and the delete share one transaction. Unsubscribed
    /// enrollments, progress rows and reviews go with the course.
    #[instrument(skip(db), fields(course.id = %course_id))]
    pub async fn delete_course(db: &PgPool, course_id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(course_id)
                .fetch_one(&mut *tx)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let active_enrollments = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE course_id = $1 AND status = 'active'",
        )
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;

        if active_enrollments > 0 {
            warn!(
                course.id = %course_id,
                active_enrollments,
                "Refused to delete course with active enrollments"
            );
            return Err(AppError::conflict(anyhow::anyhow!(
                "Cannot delete course with active enrollments"
            )));
        }

        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(course.id = %course_id, "Course deleted");

        Ok(())
    }

    async fn check_course_references(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        category_id: Uuid,
        instructor_id: Uuid,
    ) -> Result<(), AppError> {
        let category_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&mut **tx)
                .await?;

        if !category_exists {
            return Err(AppError::bad_request(anyhow::anyhow!("Invalid category_id")));
        }

        let instructor_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM users WHERE id = $1 AND role IN ('admin', 'instructor')
             )",
        )
        .bind(instructor_id)
        .fetch_one(&mut **tx)
        .await?;

        if !instructor_exists {
            return Err(AppError::bad_request(anyhow::anyhow!("Invalid instructor_id")));
        }

        Ok(())
    }

    async fn fetch_admin_course(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        course_id: Uuid,
    ) -> Result<AdminCourseRow, AppError> {
        sqlx::query_as::<_, AdminCourseRow>(
            "SELECT id, title, description, price, category_id, instructor_id,
                    duration, level, image_url, created_at,
                    category_name, instructor_name,
                    enrolled_students, average_rating, review_count
             FROM admin_courses_view WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }
}
