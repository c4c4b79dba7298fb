use dt_dice::{DiceError, classify};

pub fn run(result: u32, sides: u32, critical: bool, fumble: bool) -> Result<(), String> {
    if sides < 2 {
        return Err(DiceError::InvalidArgument { sides }.to_string());
    }
    if result == 0 || result > sides {
        return Err(DiceError::OutOfRange { result, sides }.to_string());
    }

    let tier = classify(result, sides, critical, fumble);
    println!("{} ({})", super::paint_tier(tier), tier.as_str());
    Ok(())
}
