use crate::core::{ClassificationResult, EmotionLabel};
use serde::Serialize;
use std::collections::BTreeMap;

/// Emotion counts over a batch of results, as shown in analysis reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmotionDistribution {
    counts: BTreeMap<EmotionLabel, usize>,
    total: usize,
}

impl EmotionDistribution {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ClassificationResult>) -> Self {
        let mut distribution = Self::default();
        for result in results {
            *distribution.counts.entry(result.emotion).or_insert(0) += 1;
            distribution.total += 1;
        }
        distribution
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, emotion: EmotionLabel) -> usize {
        self.counts.get(&emotion).copied().unwrap_or(0)
    }

    /// Share of results with `emotion`, in percent. Zero for an empty batch.
    pub fn percentage(&self, emotion: EmotionLabel) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(emotion) as f32 * 100.0 / self.total as f32
    }

    /// Every palette emotion with its count, in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (EmotionLabel, usize)> + '_ {
        EmotionLabel::PALETTE
            .into_iter()
            .map(move |emotion| (emotion, self.count(emotion)))
    }

    /// The most frequent emotion; ties go to palette order.
    pub fn dominant(&self) -> Option<EmotionLabel> {
        self.iter()
            .filter(|(_, count)| *count > 0)
            .fold(None, |best: Option<(EmotionLabel, usize)>, candidate| match best {
                Some((_, top)) if top >= candidate.1 => best,
                _ => Some(candidate),
            })
            .map(|(emotion, _)| emotion)
    }
}
