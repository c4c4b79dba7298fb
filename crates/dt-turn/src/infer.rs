//! Die type inference from narrator text.
//!
//! Rules are applied in three passes over one ordered table:
//!
//! 1. **Exclusions** describe dice as part of the scene ("a dice game in the
//!    corner"). Any match means the whole text is flavor, not a request.
//! 2. **Explicit** requests name a die ("roll a d20", "d6 check"). The earliest
//!    one in the text wins. Dice outside the canonical set are ignored.
//! 3. **Generic** challenges ("try to", "test your") ask for a roll without
//!    naming a die and fall back to the d20.
//!
//! This is a heuristic: misses and false positives are expected, and the UI
//! can always force a turn open.

use std::sync::LazyLock;

use regex::Regex;

use dt_dice::DieType;

use crate::turn::DiceRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    Exclusion,
    Explicit,
    Generic,
}

struct Rule {
    kind: RuleKind,
    name: &'static str,
    pattern: Regex,
}

// (kind, name, pattern). Explicit patterns capture the die's side count in group 1.
const RULE_TABLE: &[(RuleKind, &str, &str)] = &[
    (
        RuleKind::Exclusion,
        "dice on a table",
        r"\bdice\s+(?:\w+\s+)?(?:on|upon|across)\s+(?:a|the)\s+table\b",
    ),
    (RuleKind::Exclusion, "dice game", r"\bdice[\s-]+games?\b"),
    (
        RuleKind::Exclusion,
        "gambling with dice",
        r"\bgambl(?:e|es|ed|ing|ers?)\b[^.!?]*\bdice\b",
    ),
    (
        RuleKind::Exclusion,
        "previously rolled",
        r"\b(?:previously|already)\s+rolled\b|\brolled\s+earlier\b",
    ),
    (
        RuleKind::Exclusion,
        "think about rolling",
        r"\b(?:think|thinks|thinking|thought|dream|dreaming)\s+(?:about|of)\s+rolling\b",
    ),
    (
        RuleKind::Exclusion,
        "dice as objects",
        r"\b(?:pair|set|bag|cup|handful)\s+of\s+(?:\w+\s+)?dice\b",
    ),
    (
        RuleKind::Explicit,
        "roll a dN",
        r"\broll\s+(?:a|an|one|your)?\s*d(\d+)\b",
    ),
    (
        RuleKind::Explicit,
        "make a dN roll",
        r"\bmake\s+(?:a|an)\s+d(\d+)\s+(?:roll|check)\b",
    ),
    (
        RuleKind::Explicit,
        "dN check",
        r"\bd(\d+)\s+(?:check|roll|test)\b",
    ),
    (
        RuleKind::Explicit,
        "dN saving throw",
        r"\bd(\d+)\s+sav(?:ing\s+throw|e)\b",
    ),
    (
        RuleKind::Explicit,
        "time to roll a dN",
        r"\btime\s+to\s+roll\s+(?:a|an)?\s*d(\d+)\b",
    ),
    (
        RuleKind::Explicit,
        "attempt a dN roll",
        r"\battempt\s+(?:a|an)\s+d(\d+)\s+roll\b",
    ),
    (RuleKind::Generic, "roll for", r"\broll\s+for\b"),
    (RuleKind::Generic, "challenge", r"\bchalleng(?:e|es|ed|ing)\b"),
    (RuleKind::Generic, "test your", r"\btest\s+your\b"),
    (RuleKind::Generic, "attempt to", r"\battempts?\s+to\b"),
    (RuleKind::Generic, "try to", r"\btry\s+to\b"),
    (RuleKind::Generic, "check if", r"\bcheck\s+(?:if|whether)\b"),
    (
        RuleKind::Generic,
        "make a check",
        r"\bmake\s+(?:a|an)\s+(?:\w+\s+)?(?:check|saving\s+throw)\b",
    ),
];

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(kind, name, source)| Rule {
            kind,
            name,
            pattern: Regex::new(&format!("(?i){source}")).expect("valid inference pattern"),
        })
        .collect()
});

/// What the inferer found in a piece of text, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    /// The inferred die, if a roll is being asked for.
    pub die: Option<DieType>,
    /// Name of the rule that decided the result.
    pub rule: Option<&'static str>,
    /// Whether the deciding rule was an exclusion.
    pub excluded: bool,
}

impl Inference {
    fn none() -> Self {
        Self {
            die: None,
            rule: None,
            excluded: false,
        }
    }

    /// Analyze `text` and report the deciding rule along with the die.
    pub fn analyze(text: &str) -> Self {
        if let Some(rule) = rules(RuleKind::Exclusion).find(|r| r.pattern.is_match(text)) {
            tracing::debug!(rule = rule.name, "narration excluded from dice inference");
            return Self {
                die: None,
                rule: Some(rule.name),
                excluded: true,
            };
        }

        let mut earliest: Option<(usize, DieType, &'static str)> = None;
        for rule in rules(RuleKind::Explicit) {
            for caps in rule.pattern.captures_iter(text) {
                let (Some(whole), Some(sides)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let die = sides.as_str().parse().ok().and_then(DieType::from_sides);
                let Some(die) = die else {
                    tracing::debug!(die = sides.as_str(), "ignoring non-standard die");
                    continue;
                };
                if earliest.is_none_or(|(start, _, _)| whole.start() < start) {
                    earliest = Some((whole.start(), die, rule.name));
                }
            }
        }
        if let Some((_, die, name)) = earliest {
            tracing::debug!(rule = name, %die, "explicit roll request");
            return Self {
                die: Some(die),
                rule: Some(name),
                excluded: false,
            };
        }

        if let Some(rule) = rules(RuleKind::Generic).find(|r| r.pattern.is_match(text)) {
            tracing::debug!(rule = rule.name, "generic challenge, defaulting to d20");
            return Self {
                die: Some(DieType::D20),
                rule: Some(rule.name),
                excluded: false,
            };
        }

        Self::none()
    }
}

fn rules(kind: RuleKind) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |r| r.kind == kind)
}

/// Infer the die a piece of narrator text asks the player to roll.
pub fn infer(text: &str) -> Option<DieType> {
    Inference::analyze(text).die
}

/// Infer a [`DiceRequest`] from narrator text.
pub fn infer_request(text: &str) -> Option<DiceRequest> {
    infer(text).map(|die| DiceRequest::inferred(die, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_d20() {
        assert_eq!(
            infer("Roll a d20 to see if you notice the trap."),
            Some(DieType::D20)
        );
    }

    #[test]
    fn dice_game_is_flavor() {
        assert_eq!(
            infer("You see an old dice game being played in the tavern corner."),
            None
        );
    }

    #[test]
    fn challenge_defaults_to_d20() {
        assert_eq!(
            infer("The wizard challenges you to prove your worth."),
            Some(DieType::D20)
        );
    }

    #[test]
    fn plain_narration() {
        assert_eq!(infer("Nothing interesting happens here."), None);
        assert_eq!(infer(""), None);
    }

    #[test]
    fn explicit_phrasings() {
        assert_eq!(infer("Make a d12 roll to hold on."), Some(DieType::D12));
        assert_eq!(infer("This calls for a d8 check."), Some(DieType::D8));
        assert_eq!(infer("Give me a d20 saving throw!"), Some(DieType::D20));
        assert_eq!(infer("Time to roll a d100."), Some(DieType::D100));
        assert_eq!(infer("Attempt a d10 roll."), Some(DieType::D10));
        assert_eq!(infer("ROLL D4 NOW"), Some(DieType::D4));
        assert_eq!(infer("Roll your d6."), Some(DieType::D6));
    }

    #[test]
    fn earliest_die_wins() {
        assert_eq!(
            infer("Make a d6 check for the rope, then roll a d20 to land."),
            Some(DieType::D6)
        );
        assert_eq!(
            infer("Roll a d20 to jump; on a miss, a d6 check for damage."),
            Some(DieType::D20)
        );
    }

    #[test]
    fn explicit_beats_generic() {
        assert_eq!(
            infer("Try to climb the wall. Roll a d8."),
            Some(DieType::D8)
        );
    }

    #[test]
    fn nonstandard_dice_are_ignored() {
        // d7 is not a game die; the generic "try to" still asks for a roll.
        assert_eq!(infer("Roll a d7 as you try to leap."), Some(DieType::D20));
        assert_eq!(infer("Roll a d7."), None);
    }

    #[test]
    fn exclusion_wins_over_explicit_request() {
        assert_eq!(
            infer("Dice on the table clatter. Roll a d20 to notice the cheat."),
            None
        );
        let analysis = Inference::analyze("You already rolled for this. Roll a d20.");
        assert!(analysis.excluded);
        assert_eq!(analysis.rule, Some("previously rolled"));
    }

    #[test]
    fn other_exclusions() {
        assert_eq!(infer("Gamblers toss bone dice by the fire."), None);
        assert_eq!(
            infer("You think about rolling the barrel down the hill."),
            None
        );
        assert_eq!(
            infer("A pair of ivory dice rests in your pocket. Try to relax."),
            None
        );
    }

    #[test]
    fn generic_phrasings() {
        for text in [
            "Roll for initiative!",
            "Test your resolve against the storm.",
            "You attempt to pick the lock.",
            "Check if the bridge holds.",
            "Make a perception check.",
        ] {
            assert_eq!(infer(text), Some(DieType::D20), "{text}");
        }
    }

    #[test]
    fn word_boundaries() {
        // "challenger" and "retry to" should not trip the generic rules.
        assert_eq!(infer("The challenger bows."), None);
        assert_eq!(infer("Entry to the hall is free."), None);
    }

    #[test]
    fn analysis_names_the_rule() {
        let a = Inference::analyze("Roll a d20 to persuade him.");
        assert_eq!(a.die, Some(DieType::D20));
        assert_eq!(a.rule, Some("roll a dN"));
        assert!(!a.excluded);

        assert_eq!(Inference::analyze("Quiet."), Inference::none());
    }

    #[test]
    fn infer_request_keeps_source() {
        let text = "The guard blocks your path. Roll a d20 to persuade him.";
        let req = infer_request(text).unwrap();
        assert_eq!(req.die, DieType::D20);
        assert_eq!(req.source_text, text);
        assert!(infer_request("Calm waters.").is_none());
    }
}
