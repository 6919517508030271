//! Single-line parsing: primary individual plus unions
//!
//! One line of the notation describes either a lone individual or a union
//! chain: `Primary & Spouse1 & Spouse2 ...`, or the single-marriage
//! shorthand `Primary - Spouse`. Separators only count at parenthesis depth
//! zero so notes like `(divorced - remarried)` never split a name.

use lineage_model::EdgeKind;
use regex::Regex;

use crate::annotation::AnnotationExtractor;

/// One name segment after annotation extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSegment {
    pub display_name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    /// Original text of the segment, markers and all.
    pub raw: String,
}

/// A spouse segment plus the union classification derived from its markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnion {
    pub segment: ParsedSegment,
    /// One of the spousal kinds.
    pub kind: EdgeKind,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// One successfully parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub primary: ParsedSegment,
    /// Parental edge kind linking this line's primary to its co-parents,
    /// chosen by adoption/step markers on the primary segment.
    pub child_link: EdgeKind,
    pub unions: Vec<ParsedUnion>,
}

/// Outcome of parsing one line. Unparseable lines are skipped with a
/// warning, never a hard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Person(Box<ParsedLine>),
    Unparseable { reason: String },
}

pub struct LineParser {
    annotations: AnnotationExtractor,
    divorce_word: Regex,
    marriage_year: Regex,
    divorce_year: Regex,
    partner_word: Regex,
    adopted_word: Regex,
    step_word: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            annotations: AnnotationExtractor::new(),
            divorce_word: Regex::new(r"(?i)\b(?:divorced|div\.?|separated)\b")
                .expect("static divorce pattern"),
            // (m. 1936), (married 1936)
            marriage_year: Regex::new(r"(?i)\bm(?:arried)?\.?\s*(\d{3,4})\b")
                .expect("static marriage-year pattern"),
            // (div. 1950), (divorced 1950)
            divorce_year: Regex::new(r"(?i)\bdiv(?:orced)?\.?\s*(\d{3,4})\b")
                .expect("static divorce-year pattern"),
            partner_word: Regex::new(r"(?i)\bpartner\b").expect("static partner pattern"),
            adopted_word: Regex::new(r"(?i)\badopt(?:ed|ive)\b").expect("static adopted pattern"),
            step_word: Regex::new(r"(?i)\bstep(?:-?(?:son|daughter|child))?\b")
                .expect("static step pattern"),
        }
    }

    /// Parse one line (indentation already stripped).
    pub fn parse(&self, content: &str) -> LineOutcome {
        let amp_segments = split_top_level(content, " & ");
        if amp_segments.len() > 1 {
            return self.parse_union_chain(&amp_segments);
        }

        let dash_segments = split_top_level(content, " - ");
        if dash_segments.len() > 1 {
            return self.parse_dash_shorthand(content, &dash_segments);
        }

        let primary = match self.segment(content) {
            Some(seg) => seg,
            None => {
                return LineOutcome::Unparseable {
                    reason: format!("no primary individual in {content:?}"),
                }
            }
        };
        LineOutcome::Person(Box::new(ParsedLine {
            child_link: self.child_link(&primary.raw),
            primary,
            unions: Vec::new(),
        }))
    }

    /// `A & B & C`: every spouse but the last-listed one is superseded and
    /// defaults to ex-spouse unless its own markers say otherwise.
    fn parse_union_chain(&self, segments: &[&str]) -> LineOutcome {
        let primary = match self.segment(segments[0]) {
            Some(seg) => seg,
            None => {
                return LineOutcome::Unparseable {
                    reason: format!("no primary individual in {:?}", segments[0]),
                }
            }
        };

        let spouse_count = segments.len() - 1;
        let mut unions = Vec::with_capacity(spouse_count);
        for (i, raw) in segments[1..].iter().enumerate() {
            let Some(segment) = self.segment(raw) else {
                continue;
            };
            let is_last = i + 1 == spouse_count;
            let kind = if self.partner_word.is_match(raw) {
                EdgeKind::Partner
            } else if self.divorce_word.is_match(raw) || !is_last {
                EdgeKind::ExSpouse
            } else {
                EdgeKind::Spouse
            };
            unions.push(ParsedUnion {
                segment,
                kind,
                start_year: self.capture_year(&self.marriage_year, raw),
                end_year: self.capture_year(&self.divorce_year, raw),
            });
        }

        LineOutcome::Person(Box::new(ParsedLine {
            child_link: self.child_link(&primary.raw),
            primary,
            unions,
        }))
    }

    /// `A - B`: single marriage shorthand. Divorce markers may hang off
    /// either side, so the keyword scan covers the whole line.
    fn parse_dash_shorthand(&self, line: &str, segments: &[&str]) -> LineOutcome {
        let primary = match self.segment(segments[0]) {
            Some(seg) => seg,
            None => {
                return LineOutcome::Unparseable {
                    reason: format!("no primary individual in {:?}", segments[0]),
                }
            }
        };

        // Only the first top-level separator splits; any later ` - ` stays
        // in the spouse segment text.
        let spouse_raw = segments[1..].join(" - ");
        let mut unions = Vec::new();
        if let Some(segment) = self.segment(&spouse_raw) {
            let kind = if self.partner_word.is_match(line) {
                EdgeKind::Partner
            } else if self.divorce_word.is_match(line) {
                EdgeKind::ExSpouse
            } else {
                EdgeKind::Spouse
            };
            unions.push(ParsedUnion {
                segment,
                kind,
                start_year: self.capture_year(&self.marriage_year, line),
                end_year: self.capture_year(&self.divorce_year, line),
            });
        }

        LineOutcome::Person(Box::new(ParsedLine {
            child_link: self.child_link(&primary.raw),
            primary,
            unions,
        }))
    }

    /// Run one segment through annotation extraction; `None` when the result
    /// is empty or a placeholder glyph.
    fn segment(&self, raw: &str) -> Option<ParsedSegment> {
        let raw = raw.trim();
        let annotated = self.annotations.extract(raw);
        if is_placeholder(&annotated.cleaned_name) {
            return None;
        }
        Some(ParsedSegment {
            display_name: annotated.cleaned_name,
            birth_year: annotated.birth_year,
            death_year: annotated.death_year,
            raw: raw.to_string(),
        })
    }

    fn child_link(&self, primary_raw: &str) -> EdgeKind {
        if self.adopted_word.is_match(primary_raw) {
            EdgeKind::AdoptiveParent
        } else if self.step_word.is_match(primary_raw) {
            EdgeKind::StepParent
        } else {
            EdgeKind::BiologicalParent
        }
    }

    fn capture_year(&self, pattern: &Regex, text: &str) -> Option<i32> {
        pattern.captures(text).and_then(|c| c[1].parse().ok())
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty, or pure punctuation (`?`, `-`, `...`, `*`, `_`), or anything with
/// no alphanumeric content at all.
fn is_placeholder(name: &str) -> bool {
    !name.chars().any(|c| c.is_alphanumeric())
}

/// Split on a separator, counting only occurrences at parenthesis depth 0.
fn split_top_level<'a>(text: &'a str, sep: &str) -> Vec<&'a str> {
    let bytes = text.as_bytes();
    let sep_bytes = sep.as_bytes();
    let mut depth = 0usize;
    let mut pieces = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && bytes[i..].starts_with(sep_bytes) {
            pieces.push(text[start..i].trim());
            i += sep_bytes.len();
            start = i;
            continue;
        }
        i += 1;
    }
    pieces.push(text[start..].trim());
    pieces
}
