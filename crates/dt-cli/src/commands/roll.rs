use dt_dice::{DiceRoller, DieType, RandomSource, classify_outcome};

pub fn run(die: DieType, seed: Option<u64>) -> Result<(), String> {
    let mut roller = DiceRoller::with_optional_seed(seed);
    let outcome = roller.roll_die(die).map_err(|e| e.to_string())?;
    let tier = classify_outcome(&outcome);

    println!("{die}: {} ({})", outcome.result(), super::paint_tier(tier));
    Ok(())
}
