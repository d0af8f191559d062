//! Pure scoring of a completed answer set.
//!
//! Objective questions feed their category bucket with 100 or 0. Subjective
//! questions feed one accumulator per trait, each normalized by its own
//! count of contributing questions. Dimensions nobody contributed to are
//! left out of the results instead of reported as zero.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::model::{
    AbilityInsight, Achievement, Answer, CognitiveProfile, Complexity, DimensionScore,
    MiniGameResult, MiniGameSummary, MiniGameType, PersonalityInsight, Question, Rarity,
    ResultsModel, ScoreLevel, ThinkingPattern, ThinkingStyle, TraitName, TraitReading,
};

const FULL_MARKS: f64 = 100.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("answer references question {index} but only {count} questions were asked")]
    AnswerOutOfRange { index: usize, count: usize },

    #[error("question {index} was answered more than once")]
    DuplicateAnswer { index: usize },

    #[error("answer to question {question_index} selects option {option} of {count}")]
    OptionOutOfRange {
        question_index: usize,
        option: usize,
        count: usize,
    },
}

/// Running sum and contributor count of one dimension.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    total: f64,
    count: u32,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    fn finish(self) -> Option<DimensionScore> {
        if self.count == 0 {
            return None;
        }
        Some(DimensionScore::new(
            self.total / f64::from(self.count),
            self.count,
        ))
    }
}

/// Score `answers` against the `questions` they were given for.
///
/// The same inputs always produce the same `ResultsModel`.
///
/// # Errors
///
/// Returns `ScoringError` when an answer points at a question or option that
/// does not exist, or when a question is answered twice.
pub fn score(
    questions: &[Question],
    answers: &[Answer],
    mini_games: &BTreeMap<MiniGameType, MiniGameResult>,
) -> Result<ResultsModel, ScoringError> {
    let mut categories: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut traits: BTreeMap<TraitName, Accumulator> = BTreeMap::new();
    let mut seen = BTreeSet::new();
    let mut answered = 0;
    let mut timed_out = 0;

    for answer in answers {
        let index = answer.question_index;
        let question = questions.get(index).ok_or(ScoringError::AnswerOutOfRange {
            index,
            count: questions.len(),
        })?;
        if !seen.insert(index) {
            return Err(ScoringError::DuplicateAnswer { index });
        }
        if let Some(option) = answer.selected
            && option >= question.option_count()
        {
            return Err(ScoringError::OptionOutOfRange {
                question_index: index,
                option,
                count: question.option_count(),
            });
        }

        if answer.timed_out {
            timed_out += 1;
        } else {
            answered += 1;
        }

        if let Some(correct) = question.correct_index() {
            let hit = answer.selected == Some(correct);
            let value = if hit { FULL_MARKS } else { 0.0 };
            categories
                .entry(question.category().as_str().to_string())
                .or_default()
                .add(value);
            continue;
        }

        let Some(selected) = answer.selected else {
            continue;
        };
        for (name, value) in trait_contributions(question, selected) {
            traits.entry(name).or_default().add(value);
        }
    }

    let categories: BTreeMap<_, _> = categories
        .into_iter()
        .filter_map(|(name, acc)| acc.finish().map(|dim| (name, dim)))
        .collect();
    let traits: BTreeMap<_, _> = traits
        .into_iter()
        .filter_map(|(name, acc)| acc.finish().map(|dim| (name, dim)))
        .collect();

    let mut results = ResultsModel {
        categories,
        traits,
        mini_games: mini_games.clone(),
        mini_game_summary: summarize_mini_games(mini_games),
        profile: None,
        intelligence_insight: None,
        creativity_insight: None,
        personality_insight: None,
        achievements: Vec::new(),
        answered,
        timed_out,
    };
    results.profile = cognitive_profile(&results);
    results.intelligence_insight = results.intelligence().map(intelligence_insight);
    results.creativity_insight = results.creativity().map(creativity_insight);
    results.personality_insight = personality_insight(&results);
    results.achievements = achievements(&results);
    Ok(results)
}

/// Per-trait contribution of choosing `selected` on a subjective question.
///
/// Weighted options place the chosen value between the lowest and highest
/// value any option of the question offers for that trait.
///
/// Plain options on a question with trait weights are read as an ordinal
/// scale: the first option is the strongest agreement and the last the
/// weakest, so option `i` of `n` carries `(n - 1 - i) / (n - 1)` of each
/// positively weighted trait, itself relative to the heaviest weight.
fn trait_contributions(question: &Question, selected: usize) -> Vec<(TraitName, f64)> {
    let Some(chosen) = question.option(selected) else {
        return Vec::new();
    };

    if let Some(impact) = chosen.impact() {
        let names: BTreeSet<&TraitName> = question
            .options()
            .iter()
            .filter_map(|option| option.impact())
            .flat_map(|impact| impact.keys())
            .collect();

        return names
            .into_iter()
            .filter_map(|name| {
                let values = question
                    .options()
                    .iter()
                    .map(|option| {
                        option
                            .impact()
                            .and_then(|impact| impact.get(name))
                            .copied()
                            .unwrap_or(0)
                    });
                let min = values.clone().min()?;
                let max = values.max()?;
                if max == min {
                    return None;
                }
                let value = impact.get(name).copied().unwrap_or(0);
                let pct = f64::from(value - min) / f64::from(max - min) * FULL_MARKS;
                Some((name.clone(), pct))
            })
            .collect();
    }

    let weight = question.weight();
    let Some(heaviest) = weight.values().copied().filter(|w| *w > 0).max() else {
        return Vec::new();
    };
    let strength = ordinal_strength(selected, question.option_count());
    weight
        .iter()
        .filter(|(_, w)| **w > 0)
        .map(|(name, w)| {
            let share = f64::from(*w) / f64::from(heaviest);
            (name.clone(), share * strength * FULL_MARKS)
        })
        .collect()
}

/// Position of `selected` on a scale from 1.0 (first option) to 0.0 (last).
fn ordinal_strength(selected: usize, count: usize) -> f64 {
    if count <= 1 {
        return 1.0;
    }
    let steps = (count - 1) as f64;
    (steps - selected.min(count - 1) as f64) / steps
}

fn summarize_mini_games(
    mini_games: &BTreeMap<MiniGameType, MiniGameResult>,
) -> Option<MiniGameSummary> {
    let mut iter = mini_games.values();
    let first = iter.next()?;
    let mut best = first;
    let mut total = first.score;
    for result in iter {
        total += result.score;
        if result.score > best.score {
            best = result;
        }
    }
    let played = u32::try_from(mini_games.len()).unwrap_or(u32::MAX);
    Some(MiniGameSummary {
        played,
        average_score: total / f64::from(played),
        best_game: best.game_type,
        best_score: best.score,
    })
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

const STRENGTH_THRESHOLD: f64 = 70.0;
const DOMINANT_THRESHOLD: f64 = 65.0;
const STYLE_GAP: f64 = 15.0;

fn cognitive_profile(results: &ResultsModel) -> Option<CognitiveProfile> {
    let intelligence = results.intelligence().map(|d| d.score);
    let creativity = results.creativity().map(|d| d.score);

    let present: Vec<f64> = [intelligence, creativity].into_iter().flatten().collect();
    if present.is_empty() {
        return None;
    }
    let complexity_score = present.iter().sum::<f64>() / present.len() as f64;
    let complexity = if complexity_score >= 75.0 {
        Complexity::High
    } else if complexity_score >= 50.0 {
        Complexity::Medium
    } else {
        Complexity::Low
    };

    let i = intelligence.unwrap_or(0.0);
    let c = creativity.unwrap_or(0.0);
    let (primary, secondary) = if i > c {
        (ThinkingPattern::Analytical, ThinkingPattern::Creative)
    } else {
        (ThinkingPattern::Creative, ThinkingPattern::Analytical)
    };
    let style = if i > STRENGTH_THRESHOLD && c > STRENGTH_THRESHOLD {
        ThinkingStyle::Integrated
    } else if i - c >= STYLE_GAP {
        ThinkingStyle::Analytical
    } else if c - i >= STYLE_GAP {
        ThinkingStyle::Creative
    } else {
        ThinkingStyle::Balanced
    };

    let above = |score: Option<f64>| score.is_some_and(|s| s > STRENGTH_THRESHOLD);
    let trait_score = |name: &str| results.trait_score(name).map(|d| d.score);
    let mut strengths = Vec::new();
    if above(intelligence) {
        strengths.push("logical analysis".to_string());
    }
    if above(creativity) {
        strengths.push("innovative thinking".to_string());
    }
    if above(trait_score("openness")) {
        strengths.push("conceptual exploration".to_string());
    }
    if above(trait_score("conscientiousness")) {
        strengths.push("systematic processing".to_string());
    }
    if strengths.is_empty() {
        strengths.push("practical thinking".to_string());
    }

    let dominant_traits = results
        .personality()
        .filter(|(_, dim)| dim.score > DOMINANT_THRESHOLD)
        .map(|(name, _)| name.clone())
        .collect();

    Some(CognitiveProfile {
        complexity_score,
        complexity,
        primary,
        secondary,
        style,
        strengths,
        dominant_traits,
    })
}

//
// ─── INSIGHTS ──────────────────────────────────────────────────────────────────
//

const TRAIT_HIGH_LINE: f64 = 50.0;
const BALANCED_OVERVIEW: &str =
    "You show a balanced personality profile with no strongly dominant traits.";
const UNIQUE_COMBINATION: &str = "a unique combination of personality aspects";
const SOCIAL_CREATIVE_SUGGESTION: &str =
    "Consider roles that combine social interaction with creative tasks";
const PERFECTIONISM_SUGGESTION: &str =
    "Practice mindfulness to balance perfectionism with well-being";

/// `(trait, high, low)` descriptions of the personality traits.
const TRAIT_DESCRIPTIONS: [(&str, &str, &str); 5] = [
    (
        "extraversion",
        "You are outgoing and energized by social interaction",
        "You prefer solitary activities and inner reflection",
    ),
    (
        "agreeableness",
        "You are compassionate and cooperative with others",
        "You are analytical and prioritize objective thinking",
    ),
    (
        "conscientiousness",
        "You are organized and goal-directed",
        "You are flexible and spontaneous",
    ),
    (
        "openness",
        "You are creative and open to new experiences",
        "You are practical and prefer routine",
    ),
    (
        "neuroticism",
        "You are sensitive to emotional experiences",
        "You are emotionally stable and resilient",
    ),
];

/// Insights for pairs of dominant traits, keyed in alphabetical order.
const TRAIT_COMBINATIONS: [(&str, &str, &str); 2] = [
    (
        "extraversion",
        "openness",
        "you are likely to be creative in social situations",
    ),
    (
        "conscientiousness",
        "neuroticism",
        "you may be detail-oriented but sometimes overthink",
    ),
];

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

fn ability_insight(
    dim: &DimensionScore,
    strengths: &[&str],
    suggestions: &[&str],
) -> AbilityInsight {
    AbilityInsight {
        score: dim.score,
        level: dim.level,
        strengths: owned(strengths),
        suggestions: owned(suggestions),
    }
}

fn intelligence_insight(dim: &DimensionScore) -> AbilityInsight {
    match dim.level {
        ScoreLevel::Advanced => ability_insight(
            dim,
            &["Exceptional logical reasoning", "Strong pattern recognition"],
            &["Challenge yourself with advanced puzzles"],
        ),
        ScoreLevel::Intermediate => ability_insight(
            dim,
            &["Good analytical skills", "Solid problem-solving ability"],
            &["Practice complex problem-solving"],
        ),
        ScoreLevel::Developing => ability_insight(
            dim,
            &["Basic logical understanding"],
            &[
                "Focus on foundational logic exercises",
                "Practice pattern recognition daily",
            ],
        ),
    }
}

fn creativity_insight(dim: &DimensionScore) -> AbilityInsight {
    match dim.level {
        ScoreLevel::Advanced => ability_insight(
            dim,
            &["Highly innovative thinking", "Excellent divergent thinking"],
            &["Explore combining different creative domains"],
        ),
        ScoreLevel::Intermediate => ability_insight(
            dim,
            &["Good creative problem-solving", "Flexible thinking patterns"],
            &["Practice brainstorming techniques"],
        ),
        ScoreLevel::Developing => ability_insight(
            dim,
            &["Basic creative potential"],
            &[
                "Try new approaches to familiar tasks",
                "Engage in creative exercises daily",
            ],
        ),
    }
}

fn personality_insight(results: &ResultsModel) -> Option<PersonalityInsight> {
    let traits: BTreeMap<TraitName, TraitReading> = results
        .personality()
        .filter_map(|(name, dim)| {
            let (_, high, low) = TRAIT_DESCRIPTIONS
                .iter()
                .find(|(key, _, _)| *key == name.as_str())?;
            let description = if dim.score > TRAIT_HIGH_LINE { high } else { low };
            let reading = TraitReading {
                score: dim.score,
                description: (*description).to_string(),
            };
            Some((name.clone(), reading))
        })
        .collect();
    if traits.is_empty() {
        return None;
    }

    let mut dominant: Vec<&str> = results
        .personality()
        .filter(|(_, dim)| dim.score > DOMINANT_THRESHOLD)
        .map(|(name, _)| name.as_str())
        .collect();
    dominant.sort_unstable();

    let (overview, combination) = if dominant.is_empty() {
        (BALANCED_OVERVIEW.to_string(), None)
    } else {
        let insight = match dominant.as_slice() {
            [first, second] => TRAIT_COMBINATIONS
                .iter()
                .find(|(a, b, _)| a == first && b == second)
                .map(|(_, _, insight)| *insight),
            _ => None,
        }
        .unwrap_or(UNIQUE_COMBINATION);
        (
            format!(
                "Your personality profile shows strong {}, suggesting {insight}",
                dominant.join(", ")
            ),
            Some(insight.to_string()),
        )
    };

    let score = |name: &str| results.trait_score(name).map(|d| d.score);
    let over = |name: &str, bar: f64| score(name).is_some_and(|s| s > bar);
    let mut suggestions = Vec::new();
    if over("extraversion", 70.0) && over("openness", 70.0) {
        suggestions.push(SOCIAL_CREATIVE_SUGGESTION.to_string());
    }
    if over("conscientiousness", 70.0) && over("neuroticism", 60.0) {
        suggestions.push(PERFECTIONISM_SUGGESTION.to_string());
    }

    Some(PersonalityInsight {
        traits,
        overview,
        combination,
        suggestions,
    })
}

//
// ─── ACHIEVEMENTS ──────────────────────────────────────────────────────────────
//

fn achievements(results: &ResultsModel) -> Vec<Achievement> {
    let intelligence = results.intelligence().map(|d| d.score);
    let creativity = results.creativity().map(|d| d.score);
    let openness = results.trait_score("openness").map(|d| d.score);
    let neuroticism = results.trait_score("neuroticism").map(|d| d.score);

    let over = |score: Option<f64>, bar: f64| score.is_some_and(|s| s > bar);
    let both = intelligence.zip(creativity);

    let badge = |title, description, rarity, unlocked| Achievement {
        title,
        description,
        rarity,
        unlocked,
    };

    vec![
        badge(
            "Mind Explorer",
            "Completed a cognitive assessment",
            Rarity::Common,
            true,
        ),
        badge(
            "Pattern Master",
            "Achieved high scores in pattern recognition",
            Rarity::Rare,
            over(intelligence, 75.0),
        ),
        badge(
            "Creative Genius",
            "Demonstrated exceptional creative thinking",
            Rarity::Epic,
            over(creativity, 80.0),
        ),
        badge(
            "Emotional Sage",
            "Mastered emotional intelligence",
            Rarity::Legendary,
            neuroticism.is_some_and(|s| s < 30.0),
        ),
        badge(
            "Quantum Thinker",
            "Held multiple perspectives simultaneously",
            Rarity::Legendary,
            both.is_some_and(|(i, c)| i > 85.0 && c > 85.0),
        ),
        badge(
            "Neural Architect",
            "Built complex mental models and frameworks",
            Rarity::Mythic,
            over(intelligence, 90.0),
        ),
        badge(
            "Consciousness Pioneer",
            "Explored the depths of self-awareness",
            Rarity::Legendary,
            over(openness, 85.0),
        ),
        badge(
            "Synergy Master",
            "Balanced logic and creativity",
            Rarity::Mythic,
            both.is_some_and(|(i, c)| (i - c).abs() < 5.0),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, Category, QuestionDraft, TraitImpact};

    fn impact(pairs: &[(&str, i32)]) -> TraitImpact {
        pairs
            .iter()
            .map(|(name, value)| (TraitName::new(*name).unwrap(), *value))
            .collect()
    }

    fn sequence_question() -> Question {
        QuestionDraft::new(
            "seq",
            "What comes next: 2, 3, 5, 8, ...?",
            vec![
                AnswerOption::plain("13"),
                AnswerOption::plain("11"),
                AnswerOption::plain("15"),
                AnswerOption::plain("21"),
            ],
        )
        .with_category(Category::Intelligence)
        .with_correct("13")
        .with_time_limit(30)
        .validate()
        .unwrap()
    }

    fn party_question() -> Question {
        QuestionDraft::new(
            "party",
            "At a party you...",
            vec![
                AnswerOption::weighted("talk to everyone", impact(&[("extraversion", 3)])),
                AnswerOption::weighted(
                    "find one friend",
                    impact(&[("extraversion", 1), ("agreeableness", 2)]),
                ),
                AnswerOption::weighted("watch", impact(&[("extraversion", -1)])),
            ],
        )
        .validate()
        .unwrap()
    }

    fn weighted_plain_question() -> Question {
        QuestionDraft::new(
            "approach",
            "How do you approach a problem?",
            vec![AnswerOption::plain("split it"), AnswerOption::plain("guess")],
        )
        .with_category(Category::Cognitive)
        .with_weight(impact(&[("analytical", 2), ("systematic", 4), ("chaos", 0)]))
        .validate()
        .unwrap()
    }

    fn no_games() -> BTreeMap<MiniGameType, MiniGameResult> {
        BTreeMap::new()
    }

    #[test]
    fn objective_correct_answer_scores_full_marks() {
        let questions = [sequence_question()];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        let dim = results.intelligence().unwrap();
        assert_eq!(dim.score, 100.0);
        assert_eq!(dim.contributing, 1);
    }

    #[test]
    fn objective_wrong_answer_scores_zero() {
        let questions = [sequence_question()];
        let results = score(&questions, &[Answer::chosen(0, 1)], &no_games()).unwrap();
        assert_eq!(results.intelligence().unwrap().score, 0.0);
    }

    #[test]
    fn timed_out_objective_scores_its_resolved_default() {
        let questions = [sequence_question()];
        let answers = [Answer::expired(0, Some(0))];
        let results = score(&questions, &answers, &no_games()).unwrap();
        assert_eq!(results.intelligence().unwrap().score, 100.0);
        assert_eq!(results.timed_out, 1);
        assert_eq!(results.answered, 0);

        let answers = [Answer::expired(0, Some(3))];
        let results = score(&questions, &answers, &no_games()).unwrap();
        assert_eq!(results.intelligence().unwrap().score, 0.0);
    }

    #[test]
    fn timed_out_objective_without_option_still_counts() {
        let questions = [sequence_question()];
        let answers = [Answer::expired(0, None)];
        let results = score(&questions, &answers, &no_games()).unwrap();
        assert_eq!(results.intelligence().unwrap().score, 0.0);
    }

    #[test]
    fn timed_out_subjective_without_option_contributes_nothing() {
        let questions = [party_question()];
        let answers = [Answer::expired(0, None)];
        let results = score(&questions, &answers, &no_games()).unwrap();
        assert!(results.traits.is_empty());
        assert!(results.categories.is_empty());
    }

    #[test]
    fn weighted_options_scale_between_option_extremes() {
        let questions = [party_question()];
        let results = score(&questions, &[Answer::chosen(0, 1)], &no_games()).unwrap();

        // extraversion spans -1..=3, so 1 sits halfway
        let extraversion = results.trait_score("extraversion").unwrap();
        assert_eq!(extraversion.score, 50.0);
        // agreeableness spans 0..=2 across options
        assert_eq!(results.trait_score("agreeableness").unwrap().score, 100.0);
    }

    #[test]
    fn trait_missing_from_chosen_option_counts_as_zero() {
        let questions = [party_question()];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        assert_eq!(results.trait_score("extraversion").unwrap().score, 100.0);
        assert_eq!(results.trait_score("agreeableness").unwrap().score, 0.0);
    }

    #[test]
    fn question_weights_credit_positive_traits_relative_to_heaviest() {
        let questions = [weighted_plain_question()];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        assert_eq!(results.trait_score("systematic").unwrap().score, 100.0);
        assert_eq!(results.trait_score("analytical").unwrap().score, 50.0);
        assert!(results.trait_score("chaos").is_none());
    }

    #[test]
    fn plain_options_on_weighted_question_depend_on_choice() {
        let question = QuestionDraft::new(
            "scale",
            "I enjoy planning ahead.",
            vec![
                AnswerOption::plain("always"),
                AnswerOption::plain("often"),
                AnswerOption::plain("sometimes"),
                AnswerOption::plain("never"),
            ],
        )
        .with_category(Category::Cognitive)
        .with_weight(impact(&[("analytical", 3), ("systematic", 4)]))
        .validate()
        .unwrap();
        let questions = [question];
        let systematic = |option| {
            let results = score(&questions, &[Answer::chosen(0, option)], &no_games()).unwrap();
            results.trait_score("systematic").unwrap().score
        };

        assert_eq!(systematic(0), 100.0);
        assert!((systematic(1) - 200.0 / 3.0).abs() < 1e-9);
        assert_ne!(systematic(0), systematic(2));
        assert_eq!(systematic(3), 0.0);

        let first = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        assert_eq!(first.trait_score("analytical").unwrap().score, 75.0);
    }

    #[test]
    fn each_trait_is_normalized_by_its_own_count() {
        let questions = [party_question(), party_question()];
        let answers = [Answer::chosen(0, 0), Answer::chosen(1, 2)];
        let results = score(&questions, &answers, &no_games()).unwrap();
        let extraversion = results.trait_score("extraversion").unwrap();
        assert_eq!(extraversion.contributing, 2);
        assert_eq!(extraversion.score, 50.0);
    }

    #[test]
    fn zero_contribution_dimensions_are_absent() {
        let questions = [party_question()];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        assert!(results.intelligence().is_none());
        assert!(results.trait_score("openness").is_none());
        assert!(results.profile.is_none());
    }

    #[test]
    fn scoring_is_deterministic() {
        let questions = [sequence_question(), party_question(), weighted_plain_question()];
        let answers = [
            Answer::chosen(0, 0),
            Answer::chosen(1, 1),
            Answer::expired(2, Some(1)),
        ];
        let games: BTreeMap<_, _> = [
            MiniGameResult::new(MiniGameType::PatternMemory, 75.0),
            MiniGameResult::new(MiniGameType::ReactionTime, 60.0),
        ]
        .into_iter()
        .map(|r| (r.game_type, r))
        .collect();

        let first = score(&questions, &answers, &games).unwrap();
        let second = score(&questions, &answers, &games).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_answer_is_configuration_error() {
        let questions = [sequence_question()];
        let err = score(&questions, &[Answer::chosen(3, 0)], &no_games()).unwrap_err();
        assert_eq!(err, ScoringError::AnswerOutOfRange { index: 3, count: 1 });
    }

    #[test]
    fn out_of_range_option_is_configuration_error() {
        let questions = [sequence_question()];
        let err = score(&questions, &[Answer::chosen(0, 7)], &no_games()).unwrap_err();
        assert_eq!(
            err,
            ScoringError::OptionOutOfRange {
                question_index: 0,
                option: 7,
                count: 4
            }
        );
    }

    #[test]
    fn duplicate_answer_is_configuration_error() {
        let questions = [sequence_question()];
        let answers = [Answer::chosen(0, 0), Answer::chosen(0, 1)];
        let err = score(&questions, &answers, &no_games()).unwrap_err();
        assert_eq!(err, ScoringError::DuplicateAnswer { index: 0 });
    }

    #[test]
    fn mini_games_are_attached_and_summarized() {
        let games: BTreeMap<_, _> = [
            MiniGameResult::new(MiniGameType::ReactionTime, 40.0)
                .with_metric("best_time_ms", 270.0),
            MiniGameResult::new(MiniGameType::SpatialPuzzle, 100.0),
        ]
        .into_iter()
        .map(|r| (r.game_type, r))
        .collect();

        let results = score(&[], &[], &games).unwrap();
        assert_eq!(results.mini_games, games);
        let summary = results.mini_game_summary.unwrap();
        assert_eq!(summary.played, 2);
        assert_eq!(summary.average_score, 70.0);
        assert_eq!(summary.best_game, MiniGameType::SpatialPuzzle);
    }

    #[test]
    fn profile_and_badges_follow_intelligence() {
        let questions = [sequence_question()];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();

        let profile = results.profile.as_ref().unwrap();
        assert_eq!(profile.complexity, Complexity::High);
        assert_eq!(profile.primary, ThinkingPattern::Analytical);
        assert_eq!(profile.style, ThinkingStyle::Analytical);
        assert_eq!(profile.strengths, vec!["logical analysis".to_string()]);

        let unlocked: Vec<_> = results
            .unlocked_achievements()
            .iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(unlocked, vec!["Mind Explorer", "Pattern Master", "Neural Architect"]);
    }

    /// Two options: the first scores every listed trait at 100, the second at 0.
    fn trait_question(id: &str, traits: &[&str]) -> Question {
        let all = |value| {
            traits
                .iter()
                .map(|name| (TraitName::new(*name).unwrap(), value))
                .collect::<TraitImpact>()
        };
        QuestionDraft::new(
            id,
            "Pick one",
            vec![
                AnswerOption::weighted("yes", all(1)),
                AnswerOption::weighted("no", all(0)),
            ],
        )
        .with_category(Category::Personality)
        .validate()
        .unwrap()
    }

    #[test]
    fn ability_insights_follow_the_level() {
        let questions = [sequence_question()];
        let right = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        let insight = right.intelligence_insight.unwrap();
        assert_eq!(insight.level, ScoreLevel::Advanced);
        assert_eq!(
            insight.strengths,
            vec!["Exceptional logical reasoning", "Strong pattern recognition"]
        );
        assert_eq!(insight.suggestions, vec!["Challenge yourself with advanced puzzles"]);
        assert!(right.creativity_insight.is_none());

        let wrong = score(&questions, &[Answer::chosen(0, 1)], &no_games()).unwrap();
        let insight = wrong.intelligence_insight.unwrap();
        assert_eq!(insight.level, ScoreLevel::Developing);
        assert_eq!(insight.strengths, vec!["Basic logical understanding"]);
        assert_eq!(insight.suggestions.len(), 2);
    }

    #[test]
    fn creativity_insight_reads_the_creativity_trait() {
        let questions = [trait_question("idea", &["creativity"])];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        let insight = results.creativity_insight.unwrap();
        assert_eq!(insight.score, 100.0);
        assert_eq!(insight.strengths[0], "Highly innovative thinking");
        // creativity is not one of the five personality traits
        assert!(results.personality_insight.is_none());
    }

    #[test]
    fn high_traits_get_high_descriptions_and_pair_insight() {
        let questions = [trait_question("social", &["extraversion", "openness"])];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        let insight = results.personality_insight.unwrap();

        let openness = TraitName::new("openness").unwrap();
        assert_eq!(
            insight.traits[&openness].description,
            "You are creative and open to new experiences"
        );
        assert_eq!(
            insight.combination.as_deref(),
            Some("you are likely to be creative in social situations")
        );
        assert_eq!(
            insight.overview,
            "Your personality profile shows strong extraversion, openness, \
             suggesting you are likely to be creative in social situations"
        );
        assert_eq!(
            insight.suggestions,
            vec!["Consider roles that combine social interaction with creative tasks"]
        );
    }

    #[test]
    fn low_traits_read_as_balanced() {
        let questions = [trait_question("social", &["extraversion", "openness"])];
        let results = score(&questions, &[Answer::chosen(0, 1)], &no_games()).unwrap();
        let insight = results.personality_insight.unwrap();

        let extraversion = TraitName::new("extraversion").unwrap();
        assert_eq!(
            insight.traits[&extraversion].description,
            "You prefer solitary activities and inner reflection"
        );
        assert!(insight.overview.starts_with("You show a balanced personality profile"));
        assert!(insight.combination.is_none());
        assert!(insight.suggestions.is_empty());
    }

    #[test]
    fn unlisted_trait_combinations_are_unique() {
        let questions = [trait_question(
            "mix",
            &["openness", "extraversion", "agreeableness"],
        )];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        let insight = results.personality_insight.unwrap();
        assert_eq!(
            insight.combination.as_deref(),
            Some("a unique combination of personality aspects")
        );
        assert!(insight.overview.contains("agreeableness, extraversion, openness"));
    }

    #[test]
    fn anxious_planner_gets_mindfulness_suggestion() {
        let questions = [trait_question("plan", &["neuroticism", "conscientiousness"])];
        let results = score(&questions, &[Answer::chosen(0, 0)], &no_games()).unwrap();
        let insight = results.personality_insight.unwrap();
        assert_eq!(
            insight.combination.as_deref(),
            Some("you may be detail-oriented but sometimes overthink")
        );
        assert_eq!(
            insight.suggestions,
            vec!["Practice mindfulness to balance perfectionism with well-being"]
        );
    }

    #[test]
    fn empty_input_still_unlocks_first_badge() {
        let results = score(&[], &[], &no_games()).unwrap();
        assert_eq!(results.unlocked_achievements().len(), 1);
        assert!(results.mini_game_summary.is_none());
    }
}
