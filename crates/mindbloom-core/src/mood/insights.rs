use chrono::{Datelike, NaiveDate};

const AFFIRMATIONS: [&str; 8] = [
    "You are enough, just as you are.",
    "Every small step forward matters.",
    "Your feelings are valid and real.",
    "You have the strength to bloom.",
    "Today is a fresh beginning.",
    "Be kind and patient with yourself.",
    "You are growing every single day.",
    "Breathe deeply. You've got this.",
];

/// Greeting for the given local hour (0..=23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        17..=20 => "Good Evening",
        _ => "Good Night",
    }
}

/// Affirmation of the day; rotates with the day of the month.
pub fn daily_affirmation(date: NaiveDate) -> &'static str {
    AFFIRMATIONS[date.day() as usize % AFFIRMATIONS.len()]
}
