//! Pure scoring primitives shared by the recommenders.

/// Upper bound of the GPA scale.
pub const GPA_CEILING: f64 = 4.0;

/// How far above the minimum GPA a student sits, on a 0.0 – 1.0 scale.
///
/// Returns `None` when `gpa < min_gpa`: the candidate must be rejected, not scored.
/// A minimum at (or above) the ceiling leaves no range to measure, so any eligible
/// GPA is a full fit.
pub fn gpa_fit(gpa: f64, min_gpa: f64) -> Option<f64> {
    if min_gpa >= GPA_CEILING {
        return Some(1.0);
    }
    if gpa < min_gpa {
        return None;
    }
    Some(((gpa - min_gpa) / (GPA_CEILING - min_gpa)).min(1.0))
}

/// Affordability of a tuition fee within a budget, on a 0.5 – 1.0 scale.
///
/// Returns `None` when tuition exceeds the budget; callers decide whether a
/// scholarship earns partial credit instead.
pub fn budget_fit(tuition: f64, budget: f64) -> Option<f64> {
    if tuition > budget {
        return None;
    }
    if budget <= 0.0 {
        // free tuition on a zero budget
        return Some(1.0);
    }
    Some(1.0 - (tuition / budget) * 0.5)
}
