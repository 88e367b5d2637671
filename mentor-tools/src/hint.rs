//! Socratic hints, chosen from the surface form of a problem.
//!
//! Hints never contain an answer. The rules below are checked in order and the first one that
//! matches decides the hints; a student's last attempt can add one correction on top.

use crate::result::ToolResult;

/// The problem text, along with a lowercase copy for keyword matching.
struct Problem<'a> {
    text: &'a str,
    lower: String,
}

impl Problem<'_> {
    fn contains_any(&self, chars: &[char]) -> bool {
        self.text.contains(chars)
    }

    fn mentions(&self, words: &[&str]) -> bool {
        words.iter().any(|word| self.lower.contains(word))
    }
}

/// A category of problem and the hints for it.
struct HintRule {
    /// Returns true if the problem belongs to this category.
    matches: fn(&Problem) -> bool,

    /// The hints for this category, most relevant first.
    hints: &'static [&'static str],

    /// Whether to echo the student's attempt back to them.
    echo_attempt: bool,
}

/// The hint rules, in order of priority.
static HINT_RULES: [HintRule; 7] = [
    HintRule {
        matches: |p| p.contains_any(&['=']) && p.contains_any(&['x', 'y', 'z']),
        hints: &[
            "What's the goal when solving an equation?",
            "Try to isolate the variable on one side.",
        ],
        echo_attempt: true,
    },
    HintRule {
        matches: |p| p.contains_any(&['=']),
        hints: &["What are you trying to solve for?"],
        echo_attempt: false,
    },
    HintRule {
        matches: |p| p.contains_any(&['*', '×', '/', '÷']),
        hints: &[
            "Remember the order of operations (PEMDAS).",
            "Which operation should you do first?",
        ],
        echo_attempt: false,
    },
    HintRule {
        matches: |p| p.contains_any(&['+', '-']),
        hints: &["Try combining like terms first."],
        echo_attempt: false,
    },
    HintRule {
        matches: |p| p.mentions(&["simplify", "factor"]),
        hints: &[
            "Look for common patterns or formulas.",
            "What do you notice about the terms?",
        ],
        echo_attempt: false,
    },
    HintRule {
        matches: |p| p.mentions(&["graph", "plot"]),
        hints: &[
            "What would the graph look like?",
            "Think about key points: intercepts, vertex, etc.",
        ],
        echo_attempt: false,
    },
    HintRule {
        matches: |_| true,
        hints: &[
            "What information do you know?",
            "What are you trying to find?",
            "What's the first step you might take?",
        ],
        echo_attempt: false,
    },
];

/// The hint used if no rule produces one.
const DEFAULT_HINT: &str = "What do you think the first step might be?";

/// Returns a correction for a common mistake in the student's attempt, if there is one.
fn attempt_correction(problem: &Problem, attempt: &str) -> Option<&'static str> {
    if attempt.contains('=') && !problem.contains_any(&['=']) {
        Some("Make sure you're setting up the equation correctly.")
    } else if attempt.to_lowercase().contains("guess") {
        Some("Instead of guessing, let's work through it step by step.")
    } else {
        None
    }
}

/// Returns every hint that applies to the problem, most relevant first.
pub fn hints_for(problem: &str, last_attempt: Option<&str>) -> Vec<String> {
    let problem = Problem { text: problem, lower: problem.to_lowercase() };
    let attempt = last_attempt.filter(|attempt| !attempt.is_empty());

    let mut hints = Vec::new();
    if let Some(rule) = HINT_RULES.iter().find(|rule| (rule.matches)(&problem)) {
        hints.extend(rule.hints.iter().map(ToString::to_string));
        if let (true, Some(attempt)) = (rule.echo_attempt, attempt) {
            hints.push(format!("Your attempt: {}. Check each step carefully.", attempt));
        }
    }

    if let Some(correction) = attempt.and_then(|attempt| attempt_correction(&problem, attempt)) {
        hints.push(correction.to_string());
    }
    hints
}

/// Returns a Socratic hint for the problem. The result is the most relevant hint, and every
/// applicable hint is listed in `all_hints`.
pub fn hint(problem: &str, last_attempt: Option<&str>) -> ToolResult {
    let hints = hints_for(problem, last_attempt);
    let first = hints.first().map_or(DEFAULT_HINT, String::as_str).to_string();
    ToolResult::success(first, "Socratic hint provided").with_hints(hints)
}

/// Teaching hints for a topic, used by the tutor to plan its next question.
const TOPIC_HINTS: [(&str, &str); 5] = [
    ("algebra", "Ask: 'What's the unknown?' 'What represents what?' Encourage using variables for unknowns."),
    ("geometry", "Ask: 'Can you draw this?' 'What shapes do you see?' Visual thinking helps."),
    ("fractions", "Ask: 'What does the denominator tell us?' 'What about the numerator?' Use visual models."),
    ("word-problems", "Ask: 'What's the story here?' 'What are we actually trying to find?' Identify the question first."),
    ("equations", "Ask: 'What's the goal?' 'How can we isolate the variable?' Think about inverse operations."),
];

/// The teaching hint for a topic that isn't listed.
const GENERIC_TOPIC_HINT: &str = "Ask: 'What do you understand about this problem?' Start from what they know.";

/// Returns the teaching hint for a topic, such as `algebra` or `Fractions`.
pub fn topic_hint(topic: &str) -> &'static str {
    let topic = topic.trim().to_lowercase();
    TOPIC_HINTS.iter()
        .find(|(name, _)| *name == topic)
        .map_or(GENERIC_TOPIC_HINT, |(_, hint)| *hint)
}
