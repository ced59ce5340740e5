//! Shared fixtures for advisor tests.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::catalog::{Difficulty, MajorCatalogEntry, UniversityCatalogEntry};
use crate::models::profile::StudentProfile;
use crate::store::memory::MemoryStore;

pub const STUDENT: Uuid = Uuid::from_u128(0x5747_0001);

pub fn student_profile() -> StudentProfile {
    StudentProfile {
        gpa: 3.6,
        budget: 30000.0,
        preferred_country: Some("USA".to_string()),
        preferred_major: Some("Computer Science".to_string()),
        career_goal: Some("Machine learning engineer".to_string()),
    }
}

fn major(name: &str, category: &str, difficulty: Difficulty, cost: f64) -> MajorCatalogEntry {
    MajorCatalogEntry {
        name: name.to_string(),
        category: category.to_string(),
        difficulty,
        career_paths: format!("{name} careers"),
        average_cost: cost,
    }
}

fn university(
    id: i64,
    country: &str,
    tuition_fee: f64,
    min_gpa: f64,
    scholarship_available: bool,
    success_weight: f64,
    majors: &[&str],
) -> UniversityCatalogEntry {
    UniversityCatalogEntry {
        id,
        name: format!("University {id}"),
        country: country.to_string(),
        tuition_fee,
        min_gpa,
        scholarship_available,
        success_weight,
        acceptance_rate: None,
        is_active: true,
        majors: majors.iter().map(|m| m.to_string()).collect(),
    }
}

/// Store with one student, three majors and five universities:
/// 1 and 2 are eligible, 3 needs a 3.9 GPA, 4 is inactive, 5 has no CS major.
pub fn seeded_store() -> MemoryStore {
    let mut inactive = university(4, "USA", 1000.0, 2.0, true, 1.5, &["Computer Science"]);
    inactive.is_active = false;

    MemoryStore {
        profiles: HashMap::from([(STUDENT, student_profile())]),
        majors: vec![
            major("History", "Humanities", Difficulty::Easy, 12000.0),
            major("Computer Science", "Technology", Difficulty::Medium, 22000.0),
            major("Biology", "Science", Difficulty::Hard, 20000.0),
        ],
        universities: vec![
            university(1, "USA", 25000.0, 3.0, true, 1.2, &["Computer Science"]),
            university(
                2,
                "Canada",
                40000.0,
                2.5,
                true,
                1.0,
                &["Computer Science", "Mathematics"],
            ),
            university(3, "USA", 10000.0, 3.9, false, 1.3, &["Computer Science"]),
            inactive,
            university(5, "USA", 10000.0, 2.0, false, 1.0, &["Medicine"]),
        ],
        ..Default::default()
    }
}
