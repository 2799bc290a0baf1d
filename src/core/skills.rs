use std::collections::HashSet;

/// Canonical form used for skill comparison
#[inline]
fn canonical(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Canonicalize and dedupe a skill list, keeping first-appearance order
fn canonical_skills(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| canonical(s))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Fraction (0-1) of a posting's required skills the candidate has
///
/// Comparison is case-insensitive and duplicates on either side count once.
/// A posting with no required skills is fully matched.
pub fn skill_match_fraction(candidate_skills: &[String], required_skills: &[String]) -> f64 {
    let required = canonical_skills(required_skills);
    if required.is_empty() {
        return 1.0;
    }

    let candidate: HashSet<String> = canonical_skills(candidate_skills).into_iter().collect();
    let matched = required.iter().filter(|s| candidate.contains(*s)).count();

    matched as f64 / required.len() as f64
}

/// Required skills (canonical form) that the candidate has
pub fn matched_skills(candidate_skills: &[String], required_skills: &[String]) -> Vec<String> {
    let candidate: HashSet<String> = canonical_skills(candidate_skills).into_iter().collect();

    canonical_skills(required_skills)
        .into_iter()
        .filter(|s| candidate.contains(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_required_is_full_match() {
        assert_eq!(skill_match_fraction(&skills(&["Python"]), &[]), 1.0);
        assert_eq!(skill_match_fraction(&[], &[]), 1.0);
    }

    #[test]
    fn test_case_insensitive_match() {
        let fraction = skill_match_fraction(
            &skills(&["python", "REACT"]),
            &skills(&["Python", "React"]),
        );
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn test_partial_match() {
        let fraction = skill_match_fraction(
            &skills(&["Python"]),
            &skills(&["Python", "React", "SQL", "Docker"]),
        );
        assert_eq!(fraction, 0.25);
    }

    #[test]
    fn test_duplicates_not_double_counted() {
        // "Python" twice in the requirements is still one requirement
        let fraction = skill_match_fraction(
            &skills(&["python", "Python"]),
            &skills(&["Python", "python", "React"]),
        );
        assert_eq!(fraction, 0.5);
    }

    #[test]
    fn test_no_candidate_skills() {
        assert_eq!(skill_match_fraction(&[], &skills(&["Marketing"])), 0.0);
    }

    #[test]
    fn test_matched_skills_order() {
        let matched = matched_skills(
            &skills(&["sql", "Python"]),
            &skills(&["Python", "React", "SQL"]),
        );
        assert_eq!(matched, vec!["python", "sql"]);
    }
}
