use crate::model::RequirementOutcome;
use regex::Regex;
use std::sync::LazyLock;

static VISA_REQUIRED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)visa\s+required").unwrap());
static VISA_NOT_REQUIRED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)visa\s+not\s+required").unwrap());

/// Maps requirement-cell text to a [`RequirementOutcome`]
///
/// Priority: empty text is `Unknown`, then the "visa required" pattern, then
/// "visa not required"; anything else is kept verbatim as `Descriptive`.
#[derive(Debug, Clone)]
pub struct RequirementClassifier {
    required: Regex,
    not_required: Regex,
}

impl Default for RequirementClassifier {
    fn default() -> Self {
        Self {
            required: VISA_REQUIRED_RE.clone(),
            not_required: VISA_NOT_REQUIRED_RE.clone(),
        }
    }
}

impl RequirementClassifier {
    pub fn with_patterns(required: &str, not_required: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            required: Regex::new(required)?,
            not_required: Regex::new(not_required)?,
        })
    }

    pub fn classify(&self, text: &str) -> RequirementOutcome {
        let text = text.trim();

        if text.is_empty() {
            RequirementOutcome::Unknown
        } else if self.required.is_match(text) {
            RequirementOutcome::Required
        } else if self.not_required.is_match(text) {
            RequirementOutcome::NotRequired
        } else {
            RequirementOutcome::Descriptive(text.to_string())
        }
    }
}
