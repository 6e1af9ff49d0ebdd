use chrono::Timelike;

use crate::clock::Clock;

pub const DEFAULT_NAME: &str = "Friend";

pub fn greeting_for_hour(hour: u32, name: &str) -> String {
    let (salutation, icon) = match hour {
        0..=11 => ("Good morning", "☀️"),
        12..=16 => ("Good afternoon", "🌤️"),
        17..=20 => ("Good evening", "🌅"),
        _ => ("Good night", "🌙"),
    };
    format!("{}, {}! {}", salutation, name, icon)
}

pub fn time_based_greeting(clock: &dyn Clock, name: &str) -> String {
    greeting_for_hour(clock.now().hour(), name)
}
