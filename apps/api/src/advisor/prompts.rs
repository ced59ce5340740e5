// All LLM prompt constants for the advisor module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for assessment evaluation. Append `JSON_ONLY_INSTRUCTION`.
pub const EVALUATION_SYSTEM: &str = "You are an expert educational mentor.";

/// Assessment evaluation prompt. Replace `{test_type}` and `{answers_json}`.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are evaluating a student's {test_type} assessment.

The student answered the following questions:
{answers_json}

Based on their responses, provide:
1. Personality type (e.g. Analytical, Creative, Practical, Social)
2. Top 3 strengths
3. Top 3 areas for improvement
4. Scores (0-100) for each category below

Return a JSON object with this EXACT schema:
{
  "personality_type": "...",
  "strengths": ["...", "...", "..."],
  "weaknesses": ["...", "...", "..."],
  "scores": {
    "analytical_thinking": 0,
    "creativity": 0,
    "problem_solving": 0,
    "communication": 0
  },
  "insights": "Brief paragraph of insights"
}"#;

/// System prompt for major recommendation. Append `JSON_ONLY_INSTRUCTION`.
pub const MAJOR_SYSTEM: &str = "You are an expert academic and career advisor.";

/// Major recommendation prompt.
/// Replace: {gpa}, {budget}, {preferred_country}, {preferred_major}, {career_goal},
///          {personality_type}, {strengths}, {catalog_json}
pub const MAJOR_PROMPT_TEMPLATE: &str = r#"Recommend 3-7 university majors for this student.

STUDENT PROFILE:
- GPA: {gpa}
- Budget: ${budget}
- Preferred country: {preferred_country}
- Preferred major: {preferred_major}
- Career goal: {career_goal}
- Personality type: {personality_type}
- Strengths: {strengths}

AVAILABLE MAJORS (recommend ONLY from this list):
{catalog_json}

For each recommendation give a match score (0-1), why it fits, its difficulty, career
opportunities, estimated cost, study duration and a study roadmap of 5-7 key steps.

Return a JSON object with this EXACT schema:
{
  "recommendations": [
    {
      "major_name": "...",
      "match_score": 0.85,
      "explanation": "...",
      "difficulty_level": "Easy | Medium | Hard",
      "career_paths": "...",
      "estimated_cost": 15000,
      "study_duration": "3-4 years",
      "roadmap": ["Step 1", "Step 2"]
    }
  ]
}"#;
