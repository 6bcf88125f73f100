//! Whole-word keyword matching against per-emotion keyword lists.

use super::strategy::{Attempt, EmotionStrategy, Verdict};
use crate::core::{ClassificationError, EmotionLabel, Method};
use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeMap;

const JOY: &[&str] = &[
    "happy", "joy", "joyful", "love", "loved", "lovely", "wonderful", "great", "glad",
    "delighted", "awesome", "fantastic", "beautiful", "pleased", "cheerful", "grateful",
    "smile", "smiling", "laugh", "laughing",
];

const SADNESS: &[&str] = &[
    "sad", "unhappy", "heartbroken", "depressed", "miserable", "cry", "crying", "cried",
    "tears", "lonely", "grief", "sorrow", "gloomy", "hopeless", "disappointed", "miss",
];

const ANGER: &[&str] = &[
    "angry", "mad", "hate", "furious", "rage", "annoyed", "irritated", "stupid", "outraged",
    "livid", "frustrated", "pissed", "disgusting", "sick of",
];

const FEAR: &[&str] = &[
    "scared", "afraid", "fear", "terrified", "frightened", "anxious", "nervous", "worried",
    "panic", "horror", "dread", "scary", "creepy",
];

const ENERGY: &[&str] = &[
    "excited", "exciting", "thrilled", "energetic", "pumped", "hyped", "wow", "incredible",
    "unstoppable", "adrenaline", "electric", "amazing", "can't wait", "let's go",
];

/// The built-in keyword table.
pub fn default_keywords() -> BTreeMap<EmotionLabel, Vec<String>> {
    [
        (EmotionLabel::Joy, JOY),
        (EmotionLabel::Sadness, SADNESS),
        (EmotionLabel::Anger, ANGER),
        (EmotionLabel::Fear, FEAR),
        (EmotionLabel::Energy, ENERGY),
    ]
    .into_iter()
    .map(|(label, words)| (label, words.iter().map(|w| w.to_string()).collect()))
    .collect()
}

/// A keyword hit for one emotion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordMatch {
    pub emotion: EmotionLabel,
    /// Whole-word keyword occurrences for the winning emotion.
    pub count: usize,
    /// `0.8 + 0.1 * min(count, 2)`.
    pub score: f32,
}

/// Scores text against per-emotion keyword lists.
///
/// The emotion with the most whole-word keyword occurrences wins. Equal counts
/// go to the emotion that comes first in palette order.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    // Palette order.
    patterns: Vec<(EmotionLabel, Regex)>,
}

impl KeywordMatcher {
    pub fn new(table: &BTreeMap<EmotionLabel, Vec<String>>) -> anyhow::Result<Self> {
        let mut patterns = Vec::new();

        for (&emotion, words) in table {
            let mut words: Vec<String> = words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                continue;
            }
            // Longest first so multi-word keywords win over their prefixes.
            words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            words.dedup();

            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            // Half boundaries also hold next to keywords edged with punctuation.
            let regex = Regex::new(&format!(r"\b{{start-half}}(?:{alternation})\b{{end-half}}"))
                .map_err(|e| anyhow::anyhow!("invalid keyword pattern for {emotion}: {e}"))?;
            patterns.push((emotion, regex));
        }

        Ok(Self { patterns })
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::new(&default_keywords())
    }

    /// Emotions that have at least one keyword, in palette order.
    pub fn emotions(&self) -> impl Iterator<Item = EmotionLabel> + '_ {
        self.patterns.iter().map(|(emotion, _)| *emotion)
    }

    pub fn match_text(&self, text: &str) -> Option<KeywordMatch> {
        let lowered = text.to_lowercase();

        let mut best: Option<(EmotionLabel, usize)> = None;
        for (emotion, regex) in &self.patterns {
            let count = regex.find_iter(&lowered).count();
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((*emotion, count));
            }
        }

        best.map(|(emotion, count)| KeywordMatch {
            emotion,
            count,
            score: (0.8 + 0.1 * count.min(2) as f32).min(1.0),
        })
    }
}

#[async_trait]
impl EmotionStrategy for KeywordMatcher {
    fn method(&self) -> Method {
        Method::Keyword
    }

    async fn attempt(&self, text: &str) -> Result<Attempt, ClassificationError> {
        Ok(match self.match_text(text) {
            Some(hit) => Attempt::Produced(Verdict::new(hit.emotion, hit.score)),
            None => Attempt::unavailable("no keyword matched"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::builtin().unwrap()
    }

    #[test]
    fn finds_single_emotion() {
        let hit = matcher().match_text("I am so scared of the dark.").unwrap();
        assert_eq!(hit.emotion, EmotionLabel::Fear);
        assert_eq!(hit.count, 1);
        assert!((hit.score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn score_saturates_after_two_hits() {
        let two = matcher().match_text("sad, so sad").unwrap();
        assert_eq!(two.count, 2);
        assert!((two.score - 1.0).abs() < 1e-6);

        let many = matcher().match_text("sad sad sad sad").unwrap();
        assert_eq!(many.count, 4);
        assert!((many.score - 1.0).abs() < 1e-6);
        assert!(many.score <= 1.0);
    }

    #[test]
    fn ignores_keywords_inside_longer_words() {
        assert_eq!(matcher().match_text("I made a sandwich"), None);
        assert_eq!(matcher().match_text("The madness of crowds"), None);
    }

    #[test]
    fn is_case_insensitive() {
        let hit = matcher().match_text("This makes me so MAD!").unwrap();
        assert_eq!(hit.emotion, EmotionLabel::Anger);
    }

    #[test]
    fn highest_count_wins() {
        let hit = matcher()
            .match_text("I hate this, I am furious, but also a little happy")
            .unwrap();
        assert_eq!(hit.emotion, EmotionLabel::Anger);
        assert_eq!(hit.count, 2);
    }

    #[test]
    fn ties_go_to_palette_order() {
        // One joy keyword, one fear keyword: joy is declared first.
        let hit = matcher().match_text("happy but worried").unwrap();
        assert_eq!(hit.emotion, EmotionLabel::Joy);

        let hit = matcher().match_text("worried but happy").unwrap();
        assert_eq!(hit.emotion, EmotionLabel::Joy);
    }

    #[test]
    fn matches_multi_word_keywords() {
        let hit = matcher().match_text("I can't wait for the show").unwrap();
        assert_eq!(hit.emotion, EmotionLabel::Energy);
    }

    #[test]
    fn custom_tables_replace_builtin() {
        let mut table = BTreeMap::new();
        table.insert(EmotionLabel::Fear, vec!["Spooky".to_string(), "  ".to_string()]);
        table.insert(EmotionLabel::Joy, Vec::new());
        let matcher = KeywordMatcher::new(&table).unwrap();

        assert_eq!(matcher.emotions().collect::<Vec<_>>(), vec![EmotionLabel::Fear]);
        assert_eq!(
            matcher.match_text("a spooky night").map(|m| m.emotion),
            Some(EmotionLabel::Fear)
        );
        assert_eq!(matcher.match_text("so happy"), None);
    }

    #[test]
    fn keywords_are_regex_escaped() {
        let mut table = BTreeMap::new();
        table.insert(EmotionLabel::Energy, vec!["c++".to_string(), "wow".to_string()]);
        let matcher = KeywordMatcher::new(&table).unwrap();
        assert_eq!(matcher.match_text("ccc"), None);
        assert!(matcher.match_text("wow").is_some());
    }

    #[test]
    fn matches_keywords_edged_with_punctuation() {
        let mut table = BTreeMap::new();
        table.insert(
            EmotionLabel::Joy,
            vec!["c++".to_string(), ":)".to_string(), "let's go!".to_string()],
        );
        let matcher = KeywordMatcher::new(&table).unwrap();

        assert_eq!(matcher.match_text("i love c++").map(|m| m.count), Some(1));
        assert_eq!(matcher.match_text("hi :) there").map(|m| m.count), Some(1));
        assert_eq!(matcher.match_text("ok let's go! now").map(|m| m.count), Some(1));
        // Still whole words on the letter side.
        assert_eq!(matcher.match_text("abc++ and xlet's go!"), None);
    }

    #[tokio::test]
    async fn declines_without_hits() {
        let attempt = matcher().attempt("The meeting is at noon.").await.unwrap();
        assert!(matches!(attempt, Attempt::Unavailable(_)));
    }
}
