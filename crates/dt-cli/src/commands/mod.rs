pub mod classify;
pub mod infer;
pub mod play;
pub mod roll;
pub mod stats;

use colored::{ColoredString, Colorize};
use dt_dice::SeverityTier;

/// Color a tier name by how well it went.
fn paint_tier(tier: SeverityTier) -> ColoredString {
    let label = tier.to_string();
    match tier {
        SeverityTier::CriticalSuccess => label.green().bold(),
        SeverityTier::Success => label.green(),
        SeverityTier::Partial => label.yellow(),
        SeverityTier::Failure => label.red(),
        SeverityTier::CriticalFailure => label.red().bold(),
    }
}
