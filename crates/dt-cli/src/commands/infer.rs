use colored::Colorize;

use dt_turn::Inference;

pub fn run(text: &str, explain: bool) -> Result<(), String> {
    let analysis = Inference::analyze(text);

    match analysis.die {
        Some(die) => println!("{die}"),
        None => println!("none"),
    }

    if explain {
        match (analysis.rule, analysis.excluded) {
            (Some(rule), true) => println!("  {} excluded by '{rule}'", "flavor:".dimmed()),
            (Some(rule), false) => println!("  {} matched '{rule}'", "request:".dimmed()),
            (None, _) => println!("  {} no rule matched", "quiet:".dimmed()),
        }
    }

    Ok(())
}
