use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dt_dice::{DiceRoller, DieType, RandomSource};

pub fn run(die: DieType, count: u32, seed: Option<u64>) -> Result<(), String> {
    if count == 0 {
        return Err("count must be at least 1".into());
    }

    let mut roller = DiceRoller::with_optional_seed(seed);
    let mut faces = vec![0u32; die.sides() as usize];
    for _ in 0..count {
        let value = roller.roll(die.sides()).map_err(|e| e.to_string())?;
        faces[(value - 1) as usize] += 1;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Face", "Count", "Share"]);
    for (i, n) in faces.iter().enumerate() {
        let share = f64::from(*n) / f64::from(count) * 100.0;
        table.add_row(vec![
            (i + 1).to_string(),
            n.to_string(),
            format!("{share:.2}%"),
        ]);
    }

    println!("  {} {count} x {die}", "Rolled".bold());
    println!("{table}");
    println!();
    println!("  expected {:.2}% per face", 100.0 / f64::from(die.sides()));
    Ok(())
}
