//! Mock content shown on the dashboard: weather, quotes, greetings and the
//! daily focus suggestion.

pub mod focus;
pub mod greeting;
pub mod quotes;
pub mod weather;

pub use focus::daily_focus;
pub use greeting::{greeting_for_hour, time_based_greeting};
pub use quotes::{QuoteCategory, QuoteData, QuoteSelection};
pub use weather::{WeatherData, WeatherPatch};
