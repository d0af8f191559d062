use mind_core::model::{Question, ResultsModel};

pub fn question(index: usize, total: usize, question: &Question) {
    println!();
    println!("[{}/{}] {}", index + 1, total, question.text());
    for (i, option) in question.options().iter().enumerate() {
        println!("  {}) {}", i + 1, option.text());
    }
    if let Some(seconds) = question.time_limit() {
        println!("  (timed: {seconds}s)");
    }
    println!("answer with a number, `b` to go back, `q` to quit");
}

pub fn countdown(remaining: u32) {
    if remaining > 0 && (remaining % 10 == 0 || remaining <= 5) {
        println!("  ... {remaining}s left");
    }
}

pub fn results(results: &ResultsModel) {
    println!();
    println!("=== results ===");
    println!(
        "answered {} question(s), {} timed out",
        results.answered, results.timed_out
    );

    if !results.categories.is_empty() {
        println!();
        println!("categories:");
        for (name, dim) in &results.categories {
            println!("  {name:<16} {:>5.1}  {}", dim.score, dim.level);
        }
    }

    if !results.traits.is_empty() {
        println!();
        println!("traits:");
        for (name, dim) in &results.traits {
            println!("  {:<16} {:>5.1}  {}", name.as_str(), dim.score, dim.level);
        }
    }

    if let Some(summary) = &results.mini_game_summary {
        println!();
        println!(
            "mini-games: {} played, average {:.1}, best {} ({:.1})",
            summary.played, summary.average_score, summary.best_game, summary.best_score
        );
    }

    for (label, insight) in [
        ("intelligence", &results.intelligence_insight),
        ("creativity", &results.creativity_insight),
    ] {
        if let Some(insight) = insight {
            println!();
            println!("{label} ({}): {}", insight.level, insight.strengths.join(", "));
            for suggestion in &insight.suggestions {
                println!("  - {suggestion}");
            }
        }
    }

    if let Some(personality) = &results.personality_insight {
        println!();
        println!("personality: {}", personality.overview);
        for (name, reading) in &personality.traits {
            println!("  {:<16} {}", name.as_str(), reading.description);
        }
        for suggestion in &personality.suggestions {
            println!("  - {suggestion}");
        }
    }

    if let Some(profile) = &results.profile {
        println!();
        println!(
            "profile: {:?} complexity ({:.1}), {:?} style, primary {:?}",
            profile.complexity, profile.complexity_score, profile.style, profile.primary
        );
        println!("strengths: {}", profile.strengths.join(", "));
    }

    let unlocked = results.unlocked_achievements();
    if !unlocked.is_empty() {
        println!();
        println!("achievements:");
        for badge in unlocked {
            println!("  {} [{:?}] {}", badge.title, badge.rarity, badge.description);
        }
    }
}
