use super::Mood;

/// Keyword lists checked in order; the first mood with a matching keyword wins.
const MOOD_KEYWORDS: [(Mood, &[&str]); 7] = [
    (
        Mood::Happy,
        &[
            "happy", "joy", "excited", "great", "awesome", "wonderful", "amazing",
        ],
    ),
    (
        Mood::Sad,
        &[
            "sad", "down", "depressed", "upset", "disappointed", "blue",
        ],
    ),
    (
        Mood::Excited,
        &[
            "excited", "thrilled", "pumped", "energetic", "enthusiastic",
        ],
    ),
    (
        Mood::Calm,
        &["calm", "peaceful", "relaxed", "serene", "tranquil", "zen"],
    ),
    (
        Mood::Stressed,
        &[
            "stressed", "anxious", "worried", "overwhelmed", "pressure",
        ],
    ),
    (
        Mood::Motivated,
        &[
            "motivated", "determined", "focused", "driven", "ambitious",
        ],
    ),
    (
        Mood::Tired,
        &["tired", "exhausted", "sleepy", "drained", "weary"],
    ),
];

/// Classify free text into a mood by substring keyword match.
///
/// Matching is case-insensitive and substring-based, so "breakdown" matches
/// "down". Text with no keyword is `Calm`.
pub fn classify_mood(text: &str) -> Mood {
    let lower = text.to_lowercase();

    MOOD_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(mood, _)| *mood)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_simple_keywords() {
        assert_eq!(classify_mood("What a wonderful morning"), Mood::Happy);
        assert_eq!(classify_mood("Feeling a bit down today"), Mood::Sad);
        assert_eq!(classify_mood("so much PRESSURE at work"), Mood::Stressed);
        assert_eq!(classify_mood("I am driven to finish this"), Mood::Motivated);
        assert_eq!(classify_mood("completely exhausted"), Mood::Tired);
        assert_eq!(classify_mood("serene evening"), Mood::Calm);
        assert_eq!(classify_mood("thrilled about the trip"), Mood::Excited);
    }

    #[test]
    fn test_earlier_mood_wins_on_shared_keyword() {
        // "excited" is listed under both happy and excited; happy is checked first.
        assert_eq!(classify_mood("I'm so excited"), Mood::Happy);
        // "anxious" only maps through the stressed list.
        assert_eq!(classify_mood("anxious about tomorrow"), Mood::Stressed);
    }

    #[test]
    fn test_unknown_text_defaults_to_calm() {
        assert_eq!(classify_mood("bored"), Mood::Calm);
        assert_eq!(classify_mood(""), Mood::Calm);
    }
}
