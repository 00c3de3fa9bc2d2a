//! Best-effort extraction of trip parameters from free text.
//!
//! This is a classifier, not a grammar: unrecognized input falls back to
//! `DEFAULT_LOCATION` and `SkillLevel::Intermediate` instead of failing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Location used when no matcher recognizes one
pub const DEFAULT_LOCATION: &str = "general area";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trip parameters extracted from a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub location: String,
    pub skill_level: SkillLevel,
}

// =============================================================================
// Location Matchers
// =============================================================================
// Tried in order; the first one that yields a non-empty location wins.

/// "location: Niseko, Japan" / "destination = Verbier"
static TAGGED_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:location|destination)\s*[:=]\s*([^.;!?\n]+)").expect("valid regex")
});

/// "to Aspen", "in Lake Tahoe", "near Park City, Utah"
static CAPITALIZED_PLACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:to|in|at|near|around|visit|visiting)\s+([A-Z][\w'.-]*(?:(?:\s+|,\s*)[A-Z][\w'.-]*)*)",
    )
    .expect("valid regex")
});

/// "ski trip to whistler", "skiing in vail"
static LOWERCASE_PLACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:ski|skiing|snowboard|snowboarding)\s+(?:(?:trip|holiday|vacation|weekend)\s+)?(?:to|in|at)\s+([a-z][a-z' -]*)",
    )
    .expect("valid regex")
});

/// Words that end a location phrase ("Aspen for beginners")
static TRAILING_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:for|with|on|this|next|during|and|in)\b.*$").expect("valid regex")
});

static LOCATION_MATCHERS: [&LazyLock<Regex>; 3] =
    [&TAGGED_LOCATION, &CAPITALIZED_PLACE, &LOWERCASE_PLACE];

/// Extract location and skill level from a free-text prompt.
pub fn parse(text: &str) -> TripRequest {
    TripRequest {
        location: extract_location(text).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        skill_level: classify_skill(text),
    }
}

/// Run the location matchers in order and return the first hit.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_MATCHERS.iter().find_map(|matcher| {
        let captured = matcher.captures(text)?.get(1)?.as_str();
        let location = clean_location(captured);
        (!location.is_empty()).then_some(location)
    })
}

fn clean_location(raw: &str) -> String {
    let without_clause = TRAILING_CLAUSE.replace(raw, "");
    without_clause
        .trim_matches(|c: char| c.is_whitespace() || ",.;:!?".contains(c))
        .to_string()
}

/// Classify skill level by keyword; beginner keywords take precedence.
pub fn classify_skill(text: &str) -> SkillLevel {
    let lower = text.to_lowercase();
    if ["beginner", "new", "first time"].iter().any(|k| lower.contains(k)) {
        SkillLevel::Beginner
    } else if ["expert", "advanced", "professional"].iter().any(|k| lower.contains(k)) {
        SkillLevel::Expert
    } else {
        SkillLevel::Intermediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capitalized_destination() {
        let request = parse("Plan a ski trip to Aspen for beginners");

        assert_eq!(request.location, "Aspen");
        assert_eq!(request.skill_level, SkillLevel::Beginner);
    }

    #[test]
    fn test_parse_multi_word_destination() {
        assert_eq!(parse("Going skiing in Lake Tahoe next week").location, "Lake Tahoe");
        assert_eq!(
            parse("Expert trip near Park City, Utah please").location,
            "Park City, Utah"
        );
    }

    #[test]
    fn test_tagged_location_wins() {
        let request = parse("location: Niseko, Japan. Heading to Sapporo after.");
        assert_eq!(request.location, "Niseko, Japan");
    }

    #[test]
    fn test_lowercase_destination() {
        assert_eq!(parse("ski trip to whistler with friends").location, "whistler");
    }

    #[test]
    fn test_unrecognized_location_defaults() {
        let request = parse("I want to go skiing");

        assert_eq!(request.location, DEFAULT_LOCATION);
        assert_eq!(request.skill_level, SkillLevel::Intermediate);
    }

    #[test]
    fn test_empty_prompt_defaults() {
        let request = parse("");

        assert_eq!(request.location, DEFAULT_LOCATION);
        assert_eq!(request.skill_level, SkillLevel::Intermediate);
    }

    #[test]
    fn test_skill_keywords() {
        assert_eq!(classify_skill("my first time on skis"), SkillLevel::Beginner);
        assert_eq!(classify_skill("I'm NEW to this"), SkillLevel::Beginner);
        assert_eq!(classify_skill("advanced off-piste"), SkillLevel::Expert);
        assert_eq!(classify_skill("a Professional racer"), SkillLevel::Expert);
        assert_eq!(classify_skill("a relaxed weekend"), SkillLevel::Intermediate);
    }

    #[test]
    fn test_beginner_takes_precedence() {
        assert_eq!(classify_skill("beginner moving to advanced runs"), SkillLevel::Beginner);
    }

    #[test]
    fn test_skill_level_display() {
        assert_eq!(SkillLevel::Expert.to_string(), "expert");
        assert_eq!(SkillLevel::Beginner.as_str(), "beginner");
    }
}
