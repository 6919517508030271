//! Parenthetical annotation extraction
//!
//! Hand-typed genealogical notes hang almost everything off parentheses:
//! dates `(1936-2006)`, nicknames `(Peggy)`, marital notes `(divorced)`,
//! free commentary. This module pulls the dates out, keeps nicknames inline,
//! and strips the rest, leaving a clean display name.
//!
//! Nothing here fails: unbalanced parentheses are treated as plain text.

use regex::Regex;

/// Result of annotating one text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    /// Fragment with non-nickname parenthetical groups removed and
    /// whitespace collapsed.
    pub cleaned_name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// Parenthetical group words that look like nicknames but are markers.
///
/// `(Divorced)` passes the capitalized-short-word shape test, so nickname
/// detection has to know the marker vocabulary explicitly.
const MARKER_WORDS: &[&str] = &[
    "divorced",
    "div",
    "separated",
    "married",
    "widowed",
    "widow",
    "widower",
    "deceased",
    "stillborn",
    "adopted",
    "adoptive",
    "step",
    "stepchild",
    "stepson",
    "stepdaughter",
    "step-child",
    "step-son",
    "step-daughter",
    "partner",
    "twin",
    "twins",
    "unmarried",
    "single",
];

/// Extracts dates and nicknames from parenthetical groups.
///
/// Holds its compiled patterns; build one and reuse it across segments.
#[derive(Debug)]
pub struct AnnotationExtractor {
    lifespan: Regex,
    birth_only: Regex,
    bare_year: Regex,
    stillborn: Regex,
    nickname_shape: Regex,
}

impl AnnotationExtractor {
    pub fn new() -> Self {
        Self {
            // (1936-2006), (1936 - ?), en-dash tolerated
            lifespan: Regex::new(r"\(\s*(\d{3,4})\s*[-\u{2013}]\s*(\d{3,4}|\?)\s*\)")
                .expect("static lifespan pattern"),
            // (b. 1936), (b 1936)
            birth_only: Regex::new(r"(?i)\(\s*b\.?\s*(\d{3,4})\s*\)").expect("static b. pattern"),
            // (1936) alone is read as a birth year
            bare_year: Regex::new(r"\(\s*(\d{3,4})\s*\)").expect("static year pattern"),
            stillborn: Regex::new(r"(?i)\bstillborn\b").expect("static stillborn pattern"),
            // Capitalized one or two words, apostrophes/hyphens allowed
            nickname_shape: Regex::new(
                r"^[A-Z][A-Za-z'\u{2019}.\-]*(?:\s+[A-Z][A-Za-z'\u{2019}.\-]*)?$",
            )
            .expect("static nickname pattern"),
        }
    }

    /// Annotate one fragment: dates come from the original text, the cleaned
    /// name keeps only nickname groups.
    pub fn extract(&self, fragment: &str) -> Annotated {
        let (birth_year, death_year) = self.scan_years(fragment);
        let cleaned_name = self.clean(fragment);
        Annotated {
            cleaned_name,
            birth_year,
            death_year,
        }
    }

    /// Date scan over the raw fragment, in priority order: lifespan, then
    /// `b. YYYY`, then a standalone year. A stillborn marker equates the
    /// death year to the birth year when one was found.
    fn scan_years(&self, fragment: &str) -> (Option<i32>, Option<i32>) {
        let mut birth = None;
        let mut death = None;

        if let Some(caps) = self.lifespan.captures(fragment) {
            birth = caps[1].parse().ok();
            let d = &caps[2];
            if d != "?" {
                death = d.parse().ok();
            }
        } else if let Some(caps) = self.birth_only.captures(fragment) {
            birth = caps[1].parse().ok();
        } else if let Some(caps) = self.bare_year.captures(fragment) {
            birth = caps[1].parse().ok();
        }

        if death.is_none() && self.stillborn.is_match(fragment) {
            death = birth;
        }

        (birth, death)
    }

    /// Rebuild the fragment keeping text outside parentheses plus nickname
    /// groups. Top-level groups only; nested parens stay inside their group.
    fn clean(&self, fragment: &str) -> String {
        let mut out = String::with_capacity(fragment.len());
        let mut depth = 0usize;
        let mut group = String::new();

        for ch in fragment.chars() {
            match ch {
                '(' => {
                    if depth == 0 {
                        group.clear();
                    } else {
                        group.push(ch);
                    }
                    depth += 1;
                }
                ')' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        if self.is_nickname(group.trim()) {
                            out.push_str(" (");
                            out.push_str(group.trim());
                            out.push_str(") ");
                        }
                    } else {
                        group.push(ch);
                    }
                }
                _ => {
                    if depth == 0 {
                        out.push(ch);
                    } else {
                        group.push(ch);
                    }
                }
            }
        }

        // Unbalanced open group: degrade to plain text, parenthesis and all.
        if depth > 0 {
            out.push('(');
            out.push_str(&group);
        }

        collapse_whitespace(&out)
    }

    /// A nickname is a short Capitalized one-or-two-word group that is not a
    /// known marker word.
    fn is_nickname(&self, group: &str) -> bool {
        if group.is_empty() || group.len() >= 20 {
            return false;
        }
        if !self.nickname_shape.is_match(group) {
            return false;
        }
        let lowered = group.to_lowercase();
        !lowered
            .split_whitespace()
            .any(|w| MARKER_WORDS.contains(&w.trim_end_matches('.')))
    }
}

impl Default for AnnotationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim and collapse runs of whitespace to single spaces.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
