//! Weighted score, letter grade and recommendation list.

use crate::checks::{SectionName, Sections, Status};
use crate::config::SectionWeights;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Letter grade derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// `>=90 A`, `>=75 B`, `>=60 C`, `>=40 D`, otherwise `F`.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Grade::A,
            75..=89 => Grade::B,
            60..=74 => Grade::C,
            40..=59 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

fn weight_of(weights: &SectionWeights, name: SectionName) -> f64 {
    match name {
        SectionName::Crawlability => weights.crawlability,
        SectionName::OnPage => weights.on_page,
        SectionName::AiLlm => weights.ai_llm,
        SectionName::Security => weights.security,
    }
}

/// Sum over non-empty sections of `weight * mean(points)`, rounded.
///
/// An empty section adds nothing and its weight is not redistributed.
pub fn score(sections: &Sections, weights: &SectionWeights) -> u8 {
    let total: f64 = sections
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| {
            let sum: f64 = s.iter().map(|(_, c)| c.status.points()).sum();
            weight_of(weights, s.name) * sum / s.len() as f64
        })
        .sum();

    total.round().clamp(0.0, 100.0) as u8
}

/// `"<label>: <fix>"` for every non-passing check with a fix, in section
/// then check order, first occurrence kept, at most `max` entries.
pub fn recommendations(sections: &Sections, max: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    sections
        .iter()
        .flat_map(|s| s.iter())
        .filter(|(_, c)| c.status != Status::Pass)
        .filter_map(|(_, c)| {
            c.fix
                .as_deref()
                .filter(|f| !f.is_empty())
                .map(|f| format!("{}: {f}", c.label))
        })
        .filter(|tip| seen.insert(tip.clone()))
        .take(max)
        .collect()
}
