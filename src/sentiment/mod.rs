//! Lexicon-based sentiment scoring.
//!
//! Each token found in the lexicon contributes its valence, adjusted by up to
//! three preceding modifiers: boosters and dampeners ("very", "slightly")
//! shift it without flipping its sign, a negator ("not", "isn't") flips and
//! damps it. ALL-CAPS words and exclamation marks add emphasis. The summed
//! valence is squashed into [-1, 1] with `s / sqrt(s^2 + ALPHA)`.

mod lexicon;

use serde::Serialize;

const ALPHA: f64 = 15.0;
const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const LOOKBACK: usize = 3;
const LOOKBACK_DAMPING: [f64; LOOKBACK] = [1.0, 0.95, 0.9];

/// Polarity breakdown of a text.
///
/// `positive`, `negative` and `neutral` are proportions summing to 1 (or all
/// zero for text with no tokens). `compound` is the normalized overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

/// Compound polarity of `text` in [-1.0, 1.0]; 0.0 for empty text.
pub fn score(text: &str) -> f64 {
    polarity_scores(text).compound
}

/// Full polarity breakdown of `text`.
pub fn polarity_scores(text: &str) -> SentimentScores {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return SentimentScores::default();
    }

    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let valences: Vec<f64> = (0..tokens.len())
        .map(|i| token_valence(&tokens, &lowered, i))
        .collect();

    let raw: f64 = valences.iter().sum();
    let emphasis = exclamation_emphasis(text);
    let sum = if raw > 0.0 {
        raw + emphasis
    } else if raw < 0.0 {
        raw - emphasis
    } else {
        raw
    };
    let compound = round4(normalize(sum));

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neutral = 0usize;
    for v in &valences {
        if *v > 0.0 {
            pos_sum += v + 1.0;
        } else if *v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neutral += 1;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neutral as f64;
    SentimentScores {
        positive: round4(pos_sum / total),
        negative: round4(neg_sum.abs() / total),
        neutral: round4(neutral as f64 / total),
        compound,
    }
}

/// Valence of token `i` in context. Depends only on the token and the
/// `LOOKBACK` tokens before it.
fn token_valence(tokens: &[&str], lowered: &[String], i: usize) -> f64 {
    let word = lowered[i].as_str();
    if lexicon::booster(word).is_some() {
        return 0.0;
    }
    let Some(mut valence) = lexicon::valence(word) else {
        return 0.0;
    };

    if is_shouting(tokens[i]) {
        valence += CAPS_INCR.copysign(valence);
    }
    let polarity = valence.signum();

    let mut negated = false;
    for (back, damping) in LOOKBACK_DAMPING.iter().enumerate() {
        let Some(j) = i.checked_sub(back + 1) else {
            break;
        };
        let prior = lowered[j].as_str();
        if let Some(mut scalar) = lexicon::booster(prior) {
            if valence < 0.0 {
                scalar = -scalar;
            }
            if is_shouting(tokens[j]) {
                scalar += CAPS_INCR.copysign(valence);
            }
            valence += scalar * damping;
        }
        if lexicon::is_negator(prior) {
            negated = true;
        }
    }
    // A dampener can shrink a weak word to zero but not past it.
    if valence.signum() != polarity {
        valence = 0.0;
    }
    if negated {
        valence *= NEGATION_SCALAR;
    }
    valence
}

fn is_shouting(token: &str) -> bool {
    token.chars().filter(|c| c.is_alphabetic()).count() > 1
        && token.chars().all(|c| !c.is_lowercase())
}

fn exclamation_emphasis(text: &str) -> f64 {
    text.matches('!').count().min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_INCR
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
