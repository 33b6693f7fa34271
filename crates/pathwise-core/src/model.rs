//! Core data model types for pathwise.
//!
//! Learning components are the nodes of the prerequisite graph; relationships
//! are its directed edges. Both are created once at load time and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A granular skill or concept, finer-grained than a curriculum standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningComponent {
    /// Stable opaque identifier.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// What the learner can do once the component is mastered.
    #[serde(default)]
    pub description: String,
    pub subject: Subject,
    /// Grade-level tags ("K", "1", ... "12"). Duplicates are removed at parse time.
    #[serde(default)]
    pub grades: Vec<String>,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub cluster: String,
    pub skill_type: SkillType,
    /// Identifiers of components that must be learned first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Curriculum standard identifiers this component contributes to.
    #[serde(default)]
    pub standards: Vec<String>,
}

impl LearningComponent {
    /// Returns `true` if this component is tagged with the given grade.
    ///
    /// Tags are compared on their parsed grade when both sides parse, so
    /// `"Grade 3"` matches a component tagged `"3"`.
    pub fn has_grade(&self, grade: &str) -> bool {
        let wanted = parse_grade_level(grade);
        self.grades.iter().any(|g| match (wanted, parse_grade_level(g)) {
            (Some(a), Some(b)) => a == b,
            _ => g.eq_ignore_ascii_case(grade.trim()),
        })
    }

    /// Lower-cased text the skill mapper matches keywords against.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.label, self.description, self.domain, self.cluster
        )
        .to_lowercase()
    }
}

/// Academic subject of a learning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Ela,
    Science,
    SocialStudies,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Math => write!(f, "math"),
            Subject::Ela => write!(f, "ela"),
            Subject::Science => write!(f, "science"),
            Subject::SocialStudies => write!(f, "social_studies"),
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "math" | "mathematics" => Ok(Subject::Math),
            "ela" | "reading" | "literacy" | "english" => Ok(Subject::Ela),
            "science" => Ok(Subject::Science),
            "social_studies" | "social-studies" | "social studies" | "socialstudies" => {
                Ok(Subject::SocialStudies)
            }
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// What kind of knowledge a component represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Conceptual,
    Procedural,
    Application,
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillType::Conceptual => write!(f, "conceptual"),
            SkillType::Procedural => write!(f, "procedural"),
            SkillType::Application => write!(f, "application"),
        }
    }
}

impl FromStr for SkillType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conceptual" => Ok(SkillType::Conceptual),
            "procedural" => Ok(SkillType::Procedural),
            "application" | "applied" => Ok(SkillType::Application),
            other => Err(format!("unknown skill type: {other}")),
        }
    }
}

/// A directed edge between two learning components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
}

impl Relationship {
    /// The edge derived from a prerequisite entry: prerequisite → component.
    pub fn precedes(prerequisite: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            source: prerequisite.into(),
            target: component.into(),
            kind: RelationshipKind::Precedes,
        }
    }
}

/// The kind of relationship between two components.
///
/// Only `Precedes` is walked by traversal; the others are stored for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Source must be learned before target.
    Precedes,
    /// Source reinforces target without being required.
    Supports,
    /// Loose topical association.
    RelatedTo,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Precedes => write!(f, "precedes"),
            RelationshipKind::Supports => write!(f, "supports"),
            RelationshipKind::RelatedTo => write!(f, "related_to"),
        }
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "precedes" => Ok(RelationshipKind::Precedes),
            "supports" => Ok(RelationshipKind::Supports),
            "related_to" | "related-to" | "related" => Ok(RelationshipKind::RelatedTo),
            other => Err(format!("unknown relationship kind: {other}")),
        }
    }
}

/// An ordered learning pathway anchored at one component.
///
/// `pathway[i] == components[i].id` for every `i`, and no id appears twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningProgression {
    pub components: Vec<LearningComponent>,
    /// Component ids, earliest-learned first.
    pub pathway: Vec<String>,
    /// Union of the grade tags of every included component, in grade order.
    pub grade_span: Vec<String>,
}

impl LearningProgression {
    pub fn len(&self) -> usize {
        self.pathway.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathway.is_empty()
    }

    /// Position of a component in the pathway.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.pathway.iter().position(|p| p == id)
    }
}

/// Parse a grade label into a number, with kindergarten as 0.
///
/// Accepts `"K"`, `"kindergarten"`, `"3"`, `"grade 3"`, `"3rd"` and `"Grade3"`.
pub fn parse_grade_level(label: &str) -> Option<u32> {
    let lower = label.trim().to_lowercase();
    if lower == "k" || lower == "kindergarten" || lower == "grade k" {
        return Some(0);
    }
    let rest = lower.strip_prefix("grade").unwrap_or(&lower).trim_start();
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Sort grade tags K, 1, 2, ... 12, then unrecognised tags alphabetically.
pub fn sort_grade_tags(tags: &mut [String]) {
    tags.sort_by(|a, b| match (parse_grade_level(a), parse_grade_level(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(grades: &[&str]) -> LearningComponent {
        LearningComponent {
            id: "c".into(),
            label: "Compare Fractions".into(),
            description: "Compare two fractions with unlike denominators".into(),
            subject: Subject::Math,
            grades: grades.iter().map(|g| g.to_string()).collect(),
            domain: "Number and Operations".into(),
            cluster: "Fraction equivalence".into(),
            skill_type: SkillType::Conceptual,
            prerequisites: vec![],
            standards: vec![],
        }
    }

    #[test]
    fn subject_display_and_parse() {
        assert_eq!(Subject::SocialStudies.to_string(), "social_studies");
        assert_eq!("Mathematics".parse::<Subject>().unwrap(), Subject::Math);
        assert_eq!("reading".parse::<Subject>().unwrap(), Subject::Ela);
        assert_eq!(
            "social-studies".parse::<Subject>().unwrap(),
            Subject::SocialStudies
        );
        assert!("art".parse::<Subject>().is_err());
    }

    #[test]
    fn skill_type_and_relationship_kind_parse() {
        assert_eq!("applied".parse::<SkillType>().unwrap(), SkillType::Application);
        assert_eq!(
            "related-to".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::RelatedTo
        );
        assert!("blocks".parse::<RelationshipKind>().is_err());
    }

    #[test]
    fn grade_parsing() {
        assert_eq!(parse_grade_level("K"), Some(0));
        assert_eq!(parse_grade_level("Kindergarten"), Some(0));
        assert_eq!(parse_grade_level("3"), Some(3));
        assert_eq!(parse_grade_level("Grade 4"), Some(4));
        assert_eq!(parse_grade_level("grade5"), Some(5));
        assert_eq!(parse_grade_level("3rd"), Some(3));
        assert_eq!(parse_grade_level("12"), Some(12));
        assert_eq!(parse_grade_level("middle school"), None);
        assert_eq!(parse_grade_level(""), None);
    }

    #[test]
    fn grade_tags_sort_numerically() {
        let mut tags: Vec<String> = ["10", "2", "HS", "K", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_grade_tags(&mut tags);
        assert_eq!(tags, vec!["K", "1", "2", "10", "HS"]);
    }

    #[test]
    fn has_grade_matches_parsed_labels() {
        let c = component(&["3", "4"]);
        assert!(c.has_grade("3"));
        assert!(c.has_grade("Grade 4"));
        assert!(!c.has_grade("5"));

        let hs = component(&["HS"]);
        assert!(hs.has_grade("hs"));
    }

    #[test]
    fn search_text_is_lowercased_concatenation() {
        let text = component(&["3"]).search_text();
        assert!(text.contains("compare fractions"));
        assert!(text.contains("unlike denominators"));
        assert!(text.contains("number and operations"));
        assert!(text.contains("fraction equivalence"));
    }

    #[test]
    fn component_serde_roundtrip() {
        let c = component(&["3"]);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"skill_type\":\"conceptual\""));
        let back: LearningComponent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
