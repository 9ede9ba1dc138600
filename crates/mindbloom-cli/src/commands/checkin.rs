use clap::Args;
use mindbloom_core::{CheckInOutcome, Config, MoodLevel, Result, WellnessFactor};

#[derive(Args)]
pub struct CheckinArgs {
    /// Mood from 1 (very low) to 5 (very high)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    mood: Option<u8>,
    /// Wellness factor tag; repeat for several
    /// (sleep, exercise, social, nutrition, nature, gratitude, learning)
    #[arg(long = "factor")]
    factors: Vec<WellnessFactor>,
    /// Free-text note
    #[arg(long, default_value = "")]
    note: String,
}

pub fn run(args: CheckinArgs) -> Result<()> {
    let config = Config::load()?;
    let mut garden = super::open_garden(&config)?;

    let mood = args.mood.map(MoodLevel::try_from).transpose()?;
    match garden.check_in(mood, args.factors, args.note) {
        CheckInOutcome::Recorded(entry) => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
            eprintln!("{} recorded. Streak: {}", entry.mood, garden.streak_label());
        }
        CheckInOutcome::Rejected(reason) => {
            println!("{}", serde_json::json!({ "rejected": reason }));
        }
    }
    Ok(())
}
