use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::modules::categories::model::{
    Category, CategoryDetailResponse, CategoryWithCounts, CreateCategoryDto, UpdateCategoryDto,
};
use crate::modules::courses::model::CourseWithStats;
use crate::utils::errors::AppError;

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db))]
    pub async fn get_all_categories(db: &PgPool) -> Result<Vec<CategoryWithCounts>, AppError> {
        let categories = sqlx::query_as::<_, CategoryWithCounts>(
            "SELECT c.id, c.name, c.description, c.created_at,
                    COUNT(DISTINCT co.id) AS course_count,
                    COUNT(DISTINCT e.id) AS student_count
             FROM categories c
             LEFT JOIN courses co ON co.category_id = c.id
             LEFT JOIN enrollments e ON e.course_id = co.id
             GROUP BY c.id
             ORDER BY c.created_at DESC",
        )
        .fetch_all(db)
        .await?;

        Ok(categories)
    }

    #[instrument(skip(db))]
    pub async fn get_category(
        db: &PgPool,
        category_id: Uuid,
    ) -> Result<CategoryDetailResponse, AppError> {
        let category = sqlx::query_as::<_, CategoryWithCounts>(
            "SELECT c.id, c.name, c.description, c.created_at,
                    COUNT(DISTINCT co.id) AS course_count,
                    COUNT(DISTINCT e.id) AS student_count
             FROM categories c
             LEFT JOIN courses co ON co.category_id = c.id
             LEFT JOIN enrollments e ON e.course_id = co.id
             WHERE c.id = $1
             GROUP BY c.id",
        )
        .bind(category_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))?;

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
             WHERE c.category_id = $1
             GROUP BY c.id, cat.name
             ORDER BY c.created_at DESC",
        )
        .bind(category_id)
        .fetch_all(db)
        .await?;

        Ok(CategoryDetailResponse { category, courses })
    }

    #[instrument(skip(db, dto), fields(category.name = %dto.name))]
    pub async fn create_category(
        db: &PgPool,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2)
             RETURNING id, name, description, created_at",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(category.name = %dto.name, "Attempted to create duplicate category");
                return AppError::bad_request(anyhow::anyhow!("Category name already exists"));
            }
            AppError::from(e)
        })?;

        info!(category.id = %category.id, "Category created");

        Ok(category)
    }

    #[instrument(skip(db, dto), fields(category.id = %category_id))]
    pub async fn update_category(
        db: &PgPool,
        category_id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1, description = $2
             WHERE id = $3
             RETURNING id, name, description, created_at",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(category_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Category name already exists"));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))?;

        Ok(category)
    }

    /// Delete a category. Refused while any course still references it;
    /// the check and the delete share one transaction.
    #[instrument(skip(db), fields(category.id = %category_id))]
    pub async fn delete_category(db: &PgPool, category_id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let course_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(&mut *tx)
                .await?;

        if course_count > 0 {
            warn!(
                category.id = %category_id,
                course_count,
                "Refused to delete category with courses"
            );
            return Err(AppError::conflict(anyhow::anyhow!(
                "Cannot delete category with courses"
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }

        tx.commit().await?;

        info!(category.id = %category_id, "Category deleted");

        Ok(())
    }
}
