use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry: i64,
}

impl JwtConfig {
    /// Load the JWT configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is unset. A missing secret is a server
    /// misconfiguration and must abort startup rather than surface later
    /// as a per-request failure.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 24 hours
        }
    }
}
