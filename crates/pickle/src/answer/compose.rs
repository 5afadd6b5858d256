//! Response composition for the local answer engine
//!
//! Turns ranked memory text into a reply addressed to the user: first-person
//! phrasing becomes second-person, the result is wrapped in one of a handful
//! of upbeat templates, and a topical aside is appended when the memory
//! mentions something we have a line for.

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::sync::LazyLock;

use crate::answer::intent::wants_multiple;
use crate::answer::ranker::ScoredCandidate;
use crate::answer::UNKNOWN;

/// Placeholder replaced with the answer body in every template
pub const BODY_PLACEHOLDER: &str = "{body}";

/// Marker placed before each item of a multi-item answer
pub const BULLET: &str = "• ";

/// Reply templates. Each embeds the body verbatim and ends with a
/// motivational clause and an emoji.
pub const TEMPLATES: &[&str] = &[
    "Here's what you told me: {body}. You've got this! 💪",
    "From your memories: {body}. Keep smashing it! 🚀",
    "Don't forget, {body}. You're on top of things! ✅",
    "Quick reminder: {body}. One step at a time! 🌟",
    "You mentioned that {body}. Nice work staying organised! 📝",
    "Remember, {body}. You've totally got this! 🙌",
];

pub const BIRTHDAY_SUFFIX: &str = " Maybe pick up a card or a little gift! 🎂";
pub const INTERVIEW_SUFFIX: &str = " Good luck, you're going to smash it! 🍀";
pub const SPORTS_SUFFIX: &str = " Enjoy the match! ⚽";

/// Keyword classes checked in priority order; the first hit wins
const DOMAIN_SUFFIXES: &[(&[&str], &str)] = &[
    (&["birthday"], BIRTHDAY_SUFFIX),
    (&["interview"], INTERVIEW_SUFFIX),
    (&["football", "game"], SPORTS_SUFFIX),
];

/// Whole-word rewrites, most specific first. A bare `I` or `our` must not
/// run before the contractions and longer forms that contain them.
static SECOND_PERSON_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bI['’]m\b", "you're"),
        (r"\bI['’]ve\b", "you've"),
        (r"\bI['’]d\b", "you'd"),
        (r"\bI['’]ll\b", "you'll"),
        (r"\bwe['’]re\b", "you're"),
        (r"\bwe['’]ve\b", "you've"),
        (r"\bwe['’]ll\b", "you'll"),
        (r"\bmyself\b", "yourself"),
        (r"\bourselves\b", "yourselves"),
        (r"\bours\b", "yours"),
        (r"\bour\b", "your"),
        (r"\bmy\b", "your"),
        (r"\bme\b", "you"),
        (r"\bI\b", "you"),
        (r"\bwe\b", "you"),
        (r"\bus\b", "you"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("rewrite pattern is valid");
        (regex, replacement)
    })
    .collect()
});

/// Rewrite first-person phrasing into second person.
///
/// Surrounding whitespace and trailing periods are removed so the text can
/// be dropped into a template that supplies its own punctuation.
pub fn to_second_person(text: &str) -> String {
    let mut rewritten = text.to_string();
    for (pattern, replacement) in SECOND_PERSON_RULES.iter() {
        rewritten = pattern.replace_all(&rewritten, *replacement).into_owned();
    }
    rewritten.trim().trim_end_matches('.').trim_end().to_string()
}

/// Topical aside for a memory's original text, if any keyword matches
pub fn domain_suffix(source_text: &str) -> Option<&'static str> {
    let lowered = source_text.to_lowercase();
    DOMAIN_SUFFIXES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, suffix)| *suffix)
}

/// Fill a template with the answer body
pub fn render_template(template: &str, body: &str) -> String {
    template.replace(BODY_PLACEHOLDER, body)
}

/// Every reply `wrap` can produce for this body and source text.
pub fn possible_replies(body: &str, source_text: &str) -> Vec<String> {
    let suffix = domain_suffix(source_text).unwrap_or("");
    TEMPLATES
        .iter()
        .map(|template| format!("{}{}", render_template(template, body), suffix))
        .collect()
}

/// Wrap a body in a randomly chosen template and append the domain aside
/// for `source_text`.
pub fn wrap<R: Rng + ?Sized>(body: &str, source_text: &str, rng: &mut R) -> String {
    let template = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
    let mut reply = render_template(template, body);
    if let Some(suffix) = domain_suffix(source_text) {
        reply.push_str(suffix);
    }
    reply
}

/// Bullet list body built from the top `max_items` candidates
pub fn bullet_body(ranked: &[ScoredCandidate<'_>], max_items: usize) -> String {
    ranked
        .iter()
        .take(max_items)
        .map(|candidate| format!("{BULLET}{}", to_second_person(candidate.text)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compose the reply for a question from its ranked candidates.
///
/// An empty ranking yields [`UNKNOWN`]. Aggregate questions list up to
/// `max_items` memories; everything else answers with the best match.
pub fn compose<R: Rng + ?Sized>(
    question: &str,
    ranked: &[ScoredCandidate<'_>],
    max_items: usize,
    rng: &mut R,
) -> String {
    let Some(best) = ranked.first() else {
        return UNKNOWN.to_string();
    };

    if wants_multiple(question) && max_items > 0 {
        let body = bullet_body(ranked, max_items);
        wrap(&body, best.text, rng)
    } else {
        wrap(&to_second_person(best.text), best.text, rng)
    }
}
