use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Case-insensitive parse of a stored difficulty label.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// A row of the read-only majors catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorCatalogEntry {
    pub name: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub career_paths: String,
    pub average_cost: f64,
}

/// A row of the read-only universities catalog, together with the names of
/// the majors it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityCatalogEntry {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub tuition_fee: f64,
    pub min_gpa: f64,
    pub scholarship_available: bool,
    /// 1.0 is neutral; above means past students did better than average.
    pub success_weight: f64,
    pub acceptance_rate: Option<f64>,
    pub is_active: bool,
    pub majors: Vec<String>,
}

impl UniversityCatalogEntry {
    /// True when any offered major name contains `major` (case-insensitive).
    pub fn offers_major(&self, major: &str) -> bool {
        let needle = major.to_lowercase();
        self.majors
            .iter()
            .any(|m| m.to_lowercase().contains(&needle))
    }
}
