use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admin::model::{
    AdminCourseRow, AdminLoginResponse, AdminUserRow, CreateCourseDto, DashboardStats,
    MonthlyEnrollments, PaginatedCoursesResponse, PaginatedUsersResponse, UpdateCourseDto,
    UpdateUserStatusDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, MessageResponse, RegisterRequest, TokenResponse, VerifiedUser, VerifyResponse,
};
use crate::modules::categories::model::{
    Category, CategoryDetailResponse, CategoryWithCounts, CreateCategoryDto, UpdateCategoryDto,
};
use crate::modules::courses::model::{
    Course, CourseDetailResponse, CourseLevel, CourseReview, CourseWithStats, EnrollmentStatus,
    UpdateProgressDto,
};
use crate::modules::instructors::model::{Instructor, InstructorDetailResponse};
use crate::modules::users::model::{
    AvatarResponse, CourseEnrollment, EnrolledCourse, ProfileResponse, UpdateAvatarDto,
    UpdateProfileDto, User, UserResponse, UserRole, UserStatus,
};
use crate::utils::pagination::{PaginationMeta, SearchParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_token,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::update_avatar,
        crate::modules::users::controller::get_enrolled_courses,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::enroll,
        crate::modules::courses::controller::unsubscribe,
        crate::modules::courses::controller::update_progress,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::instructors::controller::get_instructors,
        crate::modules::instructors::controller::get_instructor,
        crate::modules::admin::controller::admin_login,
        crate::modules::admin::controller::get_admin_profile,
        crate::modules::admin::controller::get_dashboard_stats,
        crate::modules::admin::controller::get_users,
        crate::modules::admin::controller::update_user_status,
        crate::modules::admin::controller::get_courses,
        crate::modules::admin::controller::create_course,
        crate::modules::admin::controller::update_course,
        crate::modules::admin::controller::delete_course,
    ),
    components(
        schemas(
            User,
            UserRole,
            UserStatus,
            UpdateProfileDto,
            UpdateAvatarDto,
            ProfileResponse,
            UserResponse,
            AvatarResponse,
            CourseEnrollment,
            EnrolledCourse,
            Course,
            CourseLevel,
            EnrollmentStatus,
            CourseWithStats,
            CourseReview,
            CourseDetailResponse,
            UpdateProgressDto,
            Category,
            CategoryWithCounts,
            CategoryDetailResponse,
            CreateCategoryDto,
            UpdateCategoryDto,
            Instructor,
            InstructorDetailResponse,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            VerifiedUser,
            VerifyResponse,
            MessageResponse,
            ErrorResponse,
            AdminLoginResponse,
            MonthlyEnrollments,
            DashboardStats,
            AdminUserRow,
            PaginatedUsersResponse,
            AdminCourseRow,
            PaginatedCoursesResponse,
            UpdateUserStatusDto,
            CreateCourseDto,
            UpdateCourseDto,
            SearchParams,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token verification"),
        (name = "Users", description = "Profile and enrollment endpoints"),
        (name = "Courses", description = "Public catalog and enrollment actions"),
        (name = "Categories", description = "Course categories"),
        (name = "Instructors", description = "Instructor profiles"),
        (name = "Admin", description = "Admin dashboard endpoints")
    ),
    info(
        title = "LearnHub API",
        version = "0.1.0",
        description = "REST backend for the LearnHub learning platform: course catalog, enrollments, progress tracking and an admin dashboard.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
