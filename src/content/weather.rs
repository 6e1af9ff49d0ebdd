use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATION: &str = "Your City";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    /// Degrees Fahrenheit
    pub temperature: i32,
    pub condition: String,
    pub location: String,
    /// Percent
    pub humidity: u32,
    /// Miles per hour
    pub wind_speed: u32,
    pub icon: String,
    pub feels_like: i32,
    pub description: String,
    pub background_gradient: String,
}

/// Partial weather update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherPatch {
    pub temperature: Option<i32>,
    pub condition: Option<String>,
    pub location: Option<String>,
    pub humidity: Option<u32>,
    pub wind_speed: Option<u32>,
    pub icon: Option<String>,
    pub feels_like: Option<i32>,
    pub description: Option<String>,
    pub background_gradient: Option<String>,
}

impl WeatherData {
    pub fn merge(&mut self, patch: WeatherPatch) {
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(condition) = patch.condition {
            self.condition = condition;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(humidity) = patch.humidity {
            self.humidity = humidity;
        }
        if let Some(wind_speed) = patch.wind_speed {
            self.wind_speed = wind_speed;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(feels_like) = patch.feels_like {
            self.feels_like = feels_like;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(background_gradient) = patch.background_gradient {
            self.background_gradient = background_gradient;
        }
    }
}

struct Condition {
    name: &'static str,
    icon: &'static str,
    temperature: i32,
    description: &'static str,
    background_gradient: &'static str,
}

const CONDITIONS: [Condition; 6] = [
    Condition {
        name: "Sunny",
        icon: "☀️",
        temperature: 75,
        description: "Clear skies with bright sunshine",
        background_gradient: "from-yellow-400 via-orange-400 to-red-400",
    },
    Condition {
        name: "Partly Cloudy",
        icon: "⛅",
        temperature: 68,
        description: "Mix of sun and clouds",
        background_gradient: "from-blue-400 via-blue-300 to-yellow-300",
    },
    Condition {
        name: "Cloudy",
        icon: "☁️",
        temperature: 62,
        description: "Overcast with gray clouds",
        background_gradient: "from-gray-400 via-gray-300 to-blue-300",
    },
    Condition {
        name: "Rainy",
        icon: "🌧️",
        temperature: 58,
        description: "Light rain showers",
        background_gradient: "from-blue-600 via-blue-500 to-gray-500",
    },
    Condition {
        name: "Snowy",
        icon: "❄️",
        temperature: 32,
        description: "Light snow falling",
        background_gradient: "from-blue-200 via-white to-gray-300",
    },
    Condition {
        name: "Thunderstorm",
        icon: "⛈️",
        temperature: 65,
        description: "Thunder and lightning",
        background_gradient: "from-gray-800 via-purple-600 to-blue-600",
    },
];

/// Produce a plausible random weather snapshot for `location`.
pub fn mock_weather<R: Rng + ?Sized>(rng: &mut R, location: &str) -> WeatherData {
    let condition = &CONDITIONS[rng.gen_range(0..CONDITIONS.len())];

    WeatherData {
        temperature: condition.temperature,
        condition: condition.name.to_string(),
        location: location.to_string(),
        humidity: rng.gen_range(40..80),
        wind_speed: rng.gen_range(5..20),
        icon: condition.icon.to_string(),
        feels_like: condition.temperature + rng.gen_range(-5..5),
        description: condition.description.to_string(),
        background_gradient: condition.background_gradient.to_string(),
    }
}
