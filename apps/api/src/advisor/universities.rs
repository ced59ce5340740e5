//! University Recommender — transparent weighted scoring of candidate universities.
//!
//! Purely deterministic; there is no model path. Every contribution to the score
//! also records a human-readable reason, pro or con so the ranking can be audited.
//!
//! Weights (nominal sum 1.0):
//!   GPA fit 0.30 · budget fit 0.25 · scholarship 0.20 · country 0.10 · success 0.15
//!
//! When tuition exceeds the budget but scholarships exist, a flat 0.15 budget credit
//! is granted on top of the 0.20 scholarship weight. The two stack, so totals can
//! leave [0, 1]; `recommendation_score` is a relative ranking signal only.

use crate::advisor::score_model::{budget_fit, gpa_fit};
use crate::models::catalog::UniversityCatalogEntry;
use crate::models::profile::StudentProfile;
use crate::models::recommendation::UniversityRecommendation;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Candidates must score strictly above this to be recommended.
const ACCEPTANCE_THRESHOLD: f64 = 0.3;
/// GPA margin above the minimum that earns a "strong academic match" note.
const GPA_MARGIN_HIGHLIGHT: f64 = 0.3;
/// Success weight above which past-student success is highlighted.
const SUCCESS_HIGHLIGHT: f64 = 1.1;

#[derive(Debug, Clone)]
pub struct UniversityWeights {
    pub gpa: f64,
    pub budget: f64,
    /// Flat credit when over budget but scholarships are available.
    pub over_budget_scholarship: f64,
    pub scholarship: f64,
    pub country: f64,
    pub success: f64,
}

impl Default for UniversityWeights {
    fn default() -> Self {
        Self {
            gpa: 0.30,
            budget: 0.25,
            over_budget_scholarship: 0.15,
            scholarship: 0.20,
            country: 0.10,
            success: 0.15,
        }
    }
}

/// Active universities offering a major whose name contains `preferred_major`
/// (case-insensitive), ordered by `success_weight` descending. Ties keep
/// catalog order.
pub fn candidate_universe<'a>(
    catalog: &'a [UniversityCatalogEntry],
    preferred_major: &str,
) -> Vec<&'a UniversityCatalogEntry> {
    let mut candidates: Vec<_> = catalog
        .iter()
        .filter(|u| u.is_active && u.offers_major(preferred_major))
        .collect();
    candidates.sort_by(|a, b| b.success_weight.total_cmp(&a.success_weight));
    candidates
}

/// Scores one university for a student. Returns `None` when the student's GPA
/// is below the university minimum: ineligible candidates are dropped, not demoted.
pub fn score_university(
    profile: &StudentProfile,
    university: &UniversityCatalogEntry,
    weights: &UniversityWeights,
) -> Option<UniversityRecommendation> {
    if profile.gpa < university.min_gpa {
        return None;
    }
    let gpa_score = gpa_fit(profile.gpa, university.min_gpa)?;

    let mut score = 0.0;
    let mut reasons = Vec::new();
    let mut pros = Vec::new();
    let mut cons = Vec::new();

    // GPA
    score += gpa_score * weights.gpa;
    if profile.gpa >= university.min_gpa + GPA_MARGIN_HIGHLIGHT {
        pros.push(format!(
            "Your GPA ({}) exceeds requirements ({})",
            profile.gpa, university.min_gpa
        ));
        reasons.push("Strong academic match based on GPA".to_string());
    }

    // Budget
    match budget_fit(university.tuition_fee, profile.budget) {
        Some(fit) => {
            score += fit * weights.budget;
            pros.push(format!(
                "Tuition (${:.0}) is within your budget (${:.0})",
                university.tuition_fee, profile.budget
            ));
            reasons.push("Affordable tuition within budget".to_string());
        }
        None if university.scholarship_available => {
            score += weights.over_budget_scholarship;
            pros.push("Scholarship opportunities available".to_string());
            cons.push(format!(
                "Tuition (${:.0}) exceeds budget, but scholarships may help",
                university.tuition_fee
            ));
        }
        None => {
            cons.push(format!(
                "Tuition (${:.0}) exceeds budget (${:.0})",
                university.tuition_fee, profile.budget
            ));
        }
    }

    // Scholarship, stacks with the over-budget credit above
    if university.scholarship_available {
        score += weights.scholarship;
        reasons.push("Scholarship opportunities available".to_string());
    }

    // Country
    let country_match = profile
        .preferred_country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .is_some_and(|c| c.to_lowercase() == university.country.to_lowercase());
    if country_match {
        score += weights.country;
        reasons.push(format!(
            "Located in your preferred country ({})",
            university.country
        ));
        pros.push(format!("Located in {} as preferred", university.country));
    }

    // Success history, negative below the neutral 1.0
    score += (university.success_weight - 1.0) * weights.success;
    if university.success_weight > SUCCESS_HIGHLIGHT {
        reasons.push("Strong success history with past students".to_string());
        pros.push("High success rate with previous applicants".to_string());
    }

    if score <= ACCEPTANCE_THRESHOLD {
        return None;
    }

    Some(UniversityRecommendation {
        id: university.id,
        name: university.name.clone(),
        country: university.country.clone(),
        tuition_fee: university.tuition_fee,
        min_gpa: university.min_gpa,
        scholarship_available: university.scholarship_available,
        recommendation_score: round_score(score),
        reasons,
        pros,
        cons,
    })
}

/// Ranks universities for a student and a target major.
///
/// Output is sorted by `recommendation_score` descending and holds at most
/// `max_results` entries. An empty list is a valid answer (e.g. the GPA is
/// below every candidate's minimum).
pub fn recommend_universities(
    profile: &StudentProfile,
    preferred_major: &str,
    catalog: &[UniversityCatalogEntry],
    max_results: usize,
) -> Vec<UniversityRecommendation> {
    let weights = UniversityWeights::default();

    let mut recommendations: Vec<_> = candidate_universe(catalog, preferred_major)
        .into_iter()
        .filter_map(|u| score_university(profile, u, &weights))
        .collect();

    recommendations.sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));
    recommendations.truncate(max_results);
    recommendations
}

fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(gpa: f64, budget: f64, country: Option<&str>) -> StudentProfile {
        StudentProfile {
            gpa,
            budget,
            preferred_country: country.map(str::to_string),
            preferred_major: Some("Computer Science".to_string()),
            career_goal: None,
        }
    }

    fn university(id: i64, min_gpa: f64, tuition: f64) -> UniversityCatalogEntry {
        UniversityCatalogEntry {
            id,
            name: format!("University {id}"),
            country: "USA".to_string(),
            tuition_fee: tuition,
            min_gpa,
            scholarship_available: false,
            success_weight: 1.0,
            acceptance_rate: Some(0.4),
            is_active: true,
            majors: vec!["Computer Science".to_string()],
        }
    }

    #[test]
    fn test_gpa_below_minimum_is_excluded() {
        let mut candidate = university(1, 3.5, 1000.0);
        candidate.scholarship_available = true;
        candidate.success_weight = 2.0;
        let recs = recommend_universities(
            &profile(3.0, 100000.0, Some("USA")),
            "Computer Science",
            &[candidate],
            DEFAULT_MAX_RESULTS,
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn test_reference_scenario_scores_and_explains() {
        let mut candidate = university(7, 3.0, 25000.0);
        candidate.scholarship_available = true;
        candidate.success_weight = 1.2;
        let p = profile(3.8, 30000.0, Some("USA"));

        let rec = score_university(&p, &candidate, &UniversityWeights::default()).unwrap();

        let expected = 0.3 * 0.8 + 0.25 * (1.0 - 25000.0 / 30000.0 * 0.5) + 0.20 + 0.10 + 0.15 * 0.2;
        assert!(
            (rec.recommendation_score - round_score(expected)).abs() < 1e-9,
            "Score was {}",
            rec.recommendation_score
        );
        assert!(rec.recommendation_score > 0.3);
        assert!(rec.pros.iter().any(|p| p.contains("budget")));
        assert!(rec.pros.iter().any(|p| p.contains("USA")));
        assert!(rec.pros.iter().any(|p| p.contains("GPA")));
        assert!(rec.reasons.iter().any(|r| r.contains("success history")));
        assert!(rec.cons.is_empty());
    }

    #[test]
    fn test_over_budget_with_scholarship_stacks_credits() {
        let mut candidate = university(1, 3.0, 50000.0);
        candidate.scholarship_available = true;
        let rec = score_university(
            &profile(3.0, 20000.0, None),
            &candidate,
            &UniversityWeights::default(),
        )
        .unwrap();
        // gpa fit 0 + 0.15 over-budget credit + 0.20 scholarship
        assert!((rec.recommendation_score - 0.35).abs() < 1e-9);
        assert!(rec.pros.iter().any(|p| p.contains("Scholarship")));
        assert!(rec.cons.iter().any(|c| c.contains("scholarships may help")));
    }

    #[test]
    fn test_over_budget_without_scholarship_only_records_con() {
        let candidate = university(1, 2.0, 50000.0);
        let weights = UniversityWeights::default();
        // gpa fit (4.0 - 2.0) / 2.0 = 1.0 → 0.30, no other credit
        let p = profile(4.0, 20000.0, None);
        assert!(score_university(&p, &candidate, &weights).is_none());

        let mut loved = candidate.clone();
        loved.success_weight = 1.5;
        let rec = score_university(&p, &loved, &weights).unwrap();
        assert!(rec.cons.iter().any(|c| c.contains("exceeds budget ($20000)")));
        assert!(rec.pros.iter().all(|p| !p.contains("budget")));
    }

    #[test]
    fn test_low_success_weight_reduces_score() {
        let p = profile(3.6, 40000.0, Some("usa"));
        let weights = UniversityWeights::default();
        let neutral = score_university(&p, &university(1, 3.0, 10000.0), &weights).unwrap();
        let mut weak = university(2, 3.0, 10000.0);
        weak.success_weight = 0.8;
        let weak = score_university(&p, &weak, &weights).unwrap();
        assert!(weak.recommendation_score < neutral.recommendation_score);
    }

    #[test]
    fn test_country_match_is_case_insensitive() {
        let weights = UniversityWeights::default();
        let candidate = university(1, 3.0, 10000.0);
        let with = score_university(&profile(3.6, 40000.0, Some("usa")), &candidate, &weights)
            .unwrap();
        let without =
            score_university(&profile(3.6, 40000.0, None), &candidate, &weights).unwrap();
        assert!((with.recommendation_score - without.recommendation_score - 0.10).abs() < 1e-9);
        assert!(with.reasons.iter().any(|r| r.contains("preferred country")));
    }

    #[test]
    fn test_candidate_universe_filters_and_orders() {
        let mut inactive = university(1, 2.0, 1000.0);
        inactive.is_active = false;
        let mut other_major = university(2, 2.0, 1000.0);
        other_major.majors = vec!["Medicine".to_string()];
        let mut strong = university(3, 2.0, 1000.0);
        strong.success_weight = 1.3;
        let first_neutral = university(4, 2.0, 1000.0);
        let second_neutral = university(5, 2.0, 1000.0);

        let catalog = vec![inactive, other_major, first_neutral, strong, second_neutral];
        let ids: Vec<_> = candidate_universe(&catalog, "computer")
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_output_sorted_and_truncated() {
        let catalog: Vec<_> = (1..=15)
            .map(|i| {
                let mut u = university(i, 2.0, 1000.0 * i as f64);
                u.success_weight = 1.0 + i as f64 / 100.0;
                u
            })
            .collect();
        let recs =
            recommend_universities(&profile(3.6, 40000.0, Some("USA")), "Computer", &catalog, 5);
        assert_eq!(recs.len(), 5);
        assert!(recs
            .windows(2)
            .all(|w| w[0].recommendation_score >= w[1].recommendation_score));
    }

    #[test]
    fn test_ineligible_everywhere_yields_empty() {
        let catalog = vec![university(1, 3.5, 1000.0), university(2, 3.9, 1000.0)];
        let recs =
            recommend_universities(&profile(2.5, 40000.0, None), "Computer", &catalog, 10);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_recommendation_is_idempotent() {
        let catalog: Vec<_> = (1..=6).map(|i| university(i, 2.5, 5000.0 * i as f64)).collect();
        let p = profile(3.7, 20000.0, Some("USA"));
        let a = recommend_universities(&p, "Computer", &catalog, 10);
        let b = recommend_universities(&p, "Computer", &catalog, 10);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
