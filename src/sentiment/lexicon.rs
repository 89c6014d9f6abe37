//! Embedded polarity lexicon.
//!
//! Valences are on the usual -4..=4 scale: mean human rating of how negative
//! or positive a word reads in isolation.

use std::collections::HashMap;
use std::sync::OnceLock;

pub(crate) const BOOSTER_INCR: f64 = 0.293;
pub(crate) const BOOSTER_DECR: f64 = -0.293;

const WORDS: &[(&str, f64)] = &[
    ("abandon", -1.9),
    ("abandoned", -2.0),
    ("abuse", -3.2),
    ("abusive", -3.2),
    ("accept", 1.6),
    ("accepted", 1.1),
    ("accomplish", 1.8),
    ("accomplished", 1.9),
    ("admire", 2.1),
    ("adorable", 2.2),
    ("advantage", 1.0),
    ("afraid", -2.2),
    ("aggressive", -0.6),
    ("agree", 1.5),
    ("alarm", -1.4),
    ("alone", -1.0),
    ("amazing", 2.8),
    ("angry", -2.3),
    ("annoy", -1.9),
    ("annoyed", -1.6),
    ("annoying", -1.8),
    ("anxious", -1.0),
    ("appreciate", 1.7),
    ("approve", 1.9),
    ("attack", -2.1),
    ("awesome", 3.1),
    ("awful", -2.0),
    ("awkward", -0.6),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("benefit", 2.0),
    ("best", 3.2),
    ("better", 1.9),
    ("bitter", -1.8),
    ("blame", -1.4),
    ("bless", 1.8),
    ("boring", -1.3),
    ("brave", 2.4),
    ("brilliant", 2.8),
    ("broken", -2.1),
    ("calm", 1.3),
    ("care", 2.2),
    ("careful", 0.6),
    ("celebrate", 2.7),
    ("charming", 2.8),
    ("cheer", 2.3),
    ("cheerful", 2.5),
    ("clean", 1.7),
    ("clever", 2.0),
    ("comfort", 1.5),
    ("comfortable", 2.3),
    ("confident", 2.2),
    ("confused", -1.3),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("cool", 1.3),
    ("corrupt", -3.0),
    ("crap", -1.6),
    ("crash", -1.7),
    ("crazy", -1.4),
    ("crime", -2.5),
    ("crisis", -3.1),
    ("cruel", -2.8),
    ("cry", -2.1),
    ("damage", -2.2),
    ("damn", -1.7),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("dead", -3.3),
    ("death", -2.9),
    ("delight", 2.9),
    ("delighted", 3.1),
    ("depressed", -2.3),
    ("despair", -2.9),
    ("destroy", -2.5),
    ("destroyed", -2.6),
    ("difficult", -1.5),
    ("dirty", -1.9),
    ("disappoint", -1.7),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("doubt", -1.5),
    ("dumb", -2.3),
    ("eager", 1.5),
    ("easy", 1.9),
    ("effective", 2.1),
    ("elegant", 2.1),
    ("embarrassed", -1.5),
    ("encourage", 2.3),
    ("enemy", -2.5),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("enthusiastic", 2.2),
    ("error", -1.7),
    ("evil", -3.4),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fair", 1.3),
    ("fake", -2.1),
    ("fantastic", 2.6),
    ("fault", -1.7),
    ("favorite", 2.0),
    ("fear", -2.2),
    ("fine", 0.8),
    ("foolish", -1.1),
    ("fraud", -2.8),
    ("free", 2.3),
    ("friend", 2.2),
    ("friendly", 2.2),
    ("frustrated", -2.4),
    ("fun", 2.3),
    ("funny", 1.9),
    ("generous", 2.3),
    ("gentle", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("greed", -1.7),
    ("grief", -2.2),
    ("guilty", -1.8),
    ("happy", 2.7),
    ("harm", -2.5),
    ("hate", -2.7),
    ("hated", -3.2),
    ("healthy", 1.7),
    ("helpful", 1.8),
    ("hero", 2.6),
    ("honest", 2.3),
    ("hope", 1.9),
    ("hopeless", -2.0),
    ("horrible", -2.5),
    ("hostile", -2.2),
    ("hurt", -2.4),
    ("ideal", 2.4),
    ("idiot", -2.3),
    ("ill", -1.8),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("incredible", 2.6),
    ("inferior", -1.7),
    ("injury", -2.2),
    ("innovative", 1.9),
    ("insult", -2.3),
    ("interesting", 1.7),
    ("joy", 2.8),
    ("kill", -3.7),
    ("kind", 2.4),
    ("lame", -1.8),
    ("laugh", 2.6),
    ("lazy", -1.5),
    ("liar", -2.5),
    ("like", 2.0),
    ("lonely", -1.5),
    ("lose", -1.6),
    ("loss", -1.3),
    ("lost", -1.3),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("luck", 2.0),
    ("lucky", 1.8),
    ("mad", -2.2),
    ("masterpiece", 3.1),
    ("mess", -1.5),
    ("miserable", -2.2),
    ("miss", -0.6),
    ("mistake", -1.4),
    ("nasty", -2.6),
    ("neat", 2.0),
    ("negative", -1.6),
    ("nice", 1.8),
    ("outstanding", 3.0),
    ("pain", -2.3),
    ("painful", -2.4),
    ("panic", -2.3),
    ("pathetic", -2.5),
    ("peace", 2.5),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("please", 1.3),
    ("pleased", 1.9),
    ("poor", -2.1),
    ("popular", 1.8),
    ("positive", 2.6),
    ("powerful", 1.8),
    ("praise", 2.6),
    ("pretty", 2.2),
    ("problem", -1.7),
    ("progress", 1.8),
    ("protect", 1.3),
    ("proud", 2.1),
    ("rage", -2.6),
    ("recommend", 1.5),
    ("reject", -1.7),
    ("rejected", -2.3),
    ("reliable", 1.8),
    ("relief", 2.1),
    ("remarkable", 2.4),
    ("rich", 2.6),
    ("risk", -1.1),
    ("rude", -2.0),
    ("ruin", -2.8),
    ("sad", -2.1),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("scam", -2.7),
    ("scared", -1.9),
    ("selfish", -2.1),
    ("shame", -2.1),
    ("shock", -1.6),
    ("sick", -2.3),
    ("silly", 0.1),
    ("smart", 1.7),
    ("smile", 1.5),
    ("sorry", -0.3),
    ("splendid", 2.8),
    ("strong", 2.3),
    ("stupid", -2.4),
    ("success", 2.7),
    ("successful", 2.8),
    ("suffer", -2.5),
    ("super", 2.9),
    ("superb", 3.1),
    ("support", 1.7),
    ("sweet", 2.0),
    ("terrible", -2.1),
    ("terrific", 2.1),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("threat", -2.4),
    ("tragedy", -3.4),
    ("tragic", -3.3),
    ("trouble", -1.7),
    ("trust", 2.3),
    ("ugly", -2.3),
    ("unfair", -2.1),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useful", 1.9),
    ("useless", -1.8),
    ("valuable", 2.1),
    ("victory", 2.8),
    ("violent", -2.9),
    ("war", -2.9),
    ("warm", 0.9),
    ("waste", -1.8),
    ("weak", -1.9),
    ("welcome", 2.0),
    ("win", 2.8),
    ("winner", 2.8),
    ("wise", 1.8),
    ("wonderful", 2.7),
    ("worried", -1.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worthless", -1.9),
    ("wow", 2.8),
    ("wrong", -2.1),
    ("yay", 2.4),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCR),
    ("amazingly", BOOSTER_INCR),
    ("completely", BOOSTER_INCR),
    ("considerably", BOOSTER_INCR),
    ("deeply", BOOSTER_INCR),
    ("enormously", BOOSTER_INCR),
    ("entirely", BOOSTER_INCR),
    ("especially", BOOSTER_INCR),
    ("exceptionally", BOOSTER_INCR),
    ("extremely", BOOSTER_INCR),
    ("greatly", BOOSTER_INCR),
    ("highly", BOOSTER_INCR),
    ("hugely", BOOSTER_INCR),
    ("incredibly", BOOSTER_INCR),
    ("particularly", BOOSTER_INCR),
    ("purely", BOOSTER_INCR),
    ("quite", BOOSTER_INCR),
    ("really", BOOSTER_INCR),
    ("remarkably", BOOSTER_INCR),
    ("so", BOOSTER_INCR),
    ("substantially", BOOSTER_INCR),
    ("thoroughly", BOOSTER_INCR),
    ("totally", BOOSTER_INCR),
    ("tremendously", BOOSTER_INCR),
    ("truly", BOOSTER_INCR),
    ("unbelievably", BOOSTER_INCR),
    ("utterly", BOOSTER_INCR),
    ("very", BOOSTER_INCR),
    ("almost", BOOSTER_DECR),
    ("barely", BOOSTER_DECR),
    ("hardly", BOOSTER_DECR),
    ("kinda", BOOSTER_DECR),
    ("less", BOOSTER_DECR),
    ("little", BOOSTER_DECR),
    ("marginally", BOOSTER_DECR),
    ("occasionally", BOOSTER_DECR),
    ("partly", BOOSTER_DECR),
    ("scarcely", BOOSTER_DECR),
    ("slightly", BOOSTER_DECR),
    ("somewhat", BOOSTER_DECR),
];

const NEGATORS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no", "nobody", "none",
    "nope", "nor", "not", "nothing", "nowhere", "shouldnt", "wasnt", "werent", "without",
    "wont", "wouldnt",
];

fn table(entries: &'static [(&'static str, f64)]) -> HashMap<&'static str, f64> {
    entries.iter().copied().collect()
}

/// Valence of a lowercase word, if it carries one.
pub(crate) fn valence(word: &str) -> Option<f64> {
    static LEXICON: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    LEXICON.get_or_init(|| table(WORDS)).get(word).copied()
}

/// Scalar a lowercase intensity modifier applies to the next sentiment word.
pub(crate) fn booster(word: &str) -> Option<f64> {
    static BOOST: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    BOOST.get_or_init(|| table(BOOSTERS)).get(word).copied()
}

/// Whether a lowercase word negates what follows it.
pub(crate) fn is_negator(word: &str) -> bool {
    if word.ends_with("n't") {
        return true;
    }
    let bare: String = word.chars().filter(|c| *c != '\'').collect();
    NEGATORS.binary_search(&bare.as_str()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted_and_distinct() {
        assert!(WORDS.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(NEGATORS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn valences_stay_on_scale() {
        assert!(WORDS.iter().all(|(_, v)| (-4.0..=4.0).contains(v)));
    }

    #[test]
    fn negator_forms() {
        assert!(is_negator("not"));
        assert!(is_negator("don't"));
        assert!(is_negator("isn't"));
        assert!(!is_negator("note"));
    }
}
