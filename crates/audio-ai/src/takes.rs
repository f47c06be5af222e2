//! Bad-take detection over a transcript.
//!
//! Each transcript segment is one take. Three heuristics mark a take bad;
//! they are checked in this order and the last match wins:
//!
//! 1. **Fillers:** the text contains at least `max_fillers` distinct filler
//!    words or phrases.
//! 2. **Repeat:** more than `repeat_overlap` of its distinct words also occur
//!    in the previous segment, and it has more than `repeat_min_words` words.
//! 3. **Fragment:** fewer than `fragment_max_words` words and shorter than
//!    `fragment_max_secs`.
//!
//! Words are lowercased and stripped of surrounding punctuation, and fillers
//! only match whole words, so "um" does not match inside "umbrella".

use std::collections::HashSet;
use std::fmt;

use jumpcut_common::config::TakeDefaults;
use jumpcut_common::error::JumpcutResult;
use serde::Serialize;

use crate::transcription::TranscriptionSegment;

/// Heuristic thresholds, built from [`TakeDefaults`].
#[derive(Debug, Clone)]
pub struct TakeRules {
    fillers: Vec<Vec<String>>,
    max_fillers: usize,
    repeat_overlap: f64,
    repeat_min_words: usize,
    fragment_max_words: usize,
    fragment_max_secs: f64,
}

impl TakeRules {
    /// Validate the configuration and tokenize the filler list.
    pub fn new(config: &TakeDefaults) -> JumpcutResult<Self> {
        config.validate()?;
        Ok(Self {
            fillers: config.filler_words.iter().map(|f| words(f)).collect(),
            max_fillers: config.max_fillers,
            repeat_overlap: config.repeat_overlap,
            repeat_min_words: config.repeat_min_words,
            fragment_max_words: config.fragment_max_words,
            fragment_max_secs: config.fragment_max_secs,
        })
    }

    /// Distinct fillers present in `text_words`.
    fn filler_count(&self, text_words: &[String]) -> usize {
        self.fillers
            .iter()
            .filter(|phrase| {
                !phrase.is_empty()
                    && text_words
                        .windows(phrase.len())
                        .any(|window| window == phrase.as_slice())
            })
            .count()
    }
}

/// Why a take was marked bad.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TakeIssue {
    Fillers { count: usize },
    Repeat { overlap: f64 },
    Fragment,
}

impl TakeIssue {
    /// How sure the heuristic is that the take is usable.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Fillers { .. } => 0.3,
            Self::Repeat { .. } => 0.2,
            Self::Fragment => 0.4,
        }
    }
}

impl fmt::Display for TakeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fillers { count } => write!(f, "{count} filler words"),
            Self::Repeat { overlap } => {
                write!(f, "repeats the previous segment ({:.0}% overlap)", overlap * 100.0)
            }
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// One transcript segment with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Take {
    pub start_secs: f64,
    pub end_secs: f64,
    pub text: String,
    pub issue: Option<TakeIssue>,
}

impl Take {
    pub fn is_good(&self) -> bool {
        self.issue.is_none()
    }

    pub fn confidence(&self) -> f64 {
        self.issue.as_ref().map_or(1.0, TakeIssue::confidence)
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end_secs - self.start_secs).max(0.0)
    }
}

/// Counts and durations over a set of takes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeSummary {
    pub total: usize,
    pub good: usize,
    pub bad: usize,
    pub good_secs: f64,
    pub bad_secs: f64,
}

impl TakeSummary {
    pub fn from_takes(takes: &[Take]) -> Self {
        let (good, bad): (Vec<&Take>, Vec<&Take>) = takes.iter().partition(|t| t.is_good());
        Self {
            total: takes.len(),
            good: good.len(),
            bad: bad.len(),
            good_secs: good.iter().map(|t| t.duration_secs()).sum(),
            bad_secs: bad.iter().map(|t| t.duration_secs()).sum(),
        }
    }
}

/// Judge every segment of a transcript.
pub fn analyze_takes(segments: &[TranscriptionSegment], rules: &TakeRules) -> Vec<Take> {
    let mut takes = Vec::with_capacity(segments.len());
    let mut previous: Option<Vec<String>> = None;

    for segment in segments {
        let current = words(&segment.text);
        let mut issue = None;

        let fillers = rules.filler_count(&current);
        if fillers >= rules.max_fillers && rules.max_fillers > 0 {
            issue = Some(TakeIssue::Fillers { count: fillers });
        }

        if let Some(prev) = &previous {
            let overlap = word_overlap(prev, &current);
            if overlap > rules.repeat_overlap && current.len() > rules.repeat_min_words {
                issue = Some(TakeIssue::Repeat { overlap });
            }
        }

        let duration = segment.end_secs - segment.start_secs;
        if current.len() < rules.fragment_max_words && duration < rules.fragment_max_secs {
            issue = Some(TakeIssue::Fragment);
        }

        if let Some(issue) = &issue {
            tracing::debug!(
                start_secs = segment.start_secs,
                end_secs = segment.end_secs,
                reason = %issue,
                "Bad take"
            );
        }

        takes.push(Take {
            start_secs: segment.start_secs,
            end_secs: segment.end_secs,
            text: segment.text.trim().to_string(),
            issue,
        });
        previous = Some(current);
    }

    takes
}

/// Lowercased words with surrounding punctuation removed.
fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Share of the distinct words of `current` that also occur in `previous`.
fn word_overlap(previous: &[String], current: &[String]) -> f64 {
    let previous: HashSet<&str> = previous.iter().map(String::as_str).collect();
    let current: HashSet<&str> = current.iter().map(String::as_str).collect();
    let shared = current.intersection(&previous).count();
    shared as f64 / current.len().max(1) as f64
}
