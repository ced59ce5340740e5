use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Academic, financial and preference snapshot of a student.
/// Owned by the profile store; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StudentProfile {
    /// 0.0 – 4.0
    pub gpa: f64,
    pub budget: f64,
    pub preferred_country: Option<String>,
    pub preferred_major: Option<String>,
    pub career_goal: Option<String>,
}
