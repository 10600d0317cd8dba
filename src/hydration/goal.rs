use crate::models::{ActivityLevel, GoalFactors, HydrationGoal, LocationSnapshot, WeatherSnapshot};

pub const BASE_GOAL: u32 = 8;
pub const MIN_GOAL: u32 = 6;

/// Conditions that add a glass on top of the temperature adjustment.
pub const HOT_CONDITIONS: &[&str] = &["clear", "sunny"];

pub fn temperature_factor(temperature: f64) -> i32 {
    if temperature > 30.0 {
        2
    } else if temperature > 25.0 {
        1
    } else if temperature < 10.0 {
        -1
    } else {
        0
    }
}

/// Very humid and very dry air both get the same +1.
pub fn humidity_factor(humidity: f64) -> i32 {
    if humidity > 80.0 || humidity < 30.0 { 1 } else { 0 }
}

pub fn climate_factor(condition: &str) -> i32 {
    let condition = condition.to_lowercase();
    if HOT_CONDITIONS.contains(&condition.as_str()) {
        1
    } else {
        0
    }
}

pub fn activity_factor(activity: ActivityLevel) -> i32 {
    match activity {
        ActivityLevel::High => 2,
        ActivityLevel::Moderate => 1,
        ActivityLevel::Low => 0,
    }
}

/// Compute the day's glass target for the given conditions.
pub fn compute_goal(
    weather: &WeatherSnapshot,
    location: &LocationSnapshot,
    activity: ActivityLevel,
) -> HydrationGoal {
    let factors = GoalFactors {
        temperature: temperature_factor(weather.temperature),
        humidity: humidity_factor(weather.humidity),
        climate: climate_factor(&weather.condition),
        activity: activity_factor(activity),
    };

    let adjusted = (BASE_GOAL as i32 + factors.total()).max(MIN_GOAL as i32) as u32;

    HydrationGoal {
        base_goal: BASE_GOAL,
        adjusted_goal: adjusted,
        factors,
        recommendation: recommendation(weather.temperature, &location.city),
    }
}

fn recommendation(temperature: f64, city: &str) -> String {
    let advice = if temperature > 30.0 {
        "and hot weather conditions, increase your water intake significantly."
    } else if temperature > 25.0 {
        "and warm weather, stay well hydrated throughout the day."
    } else if temperature < 10.0 {
        "and cool weather, maintain regular hydration even if you feel less thirsty."
    } else {
        "and moderate climate, maintain steady hydration levels."
    };
    format!("Based on your location ({}) {}", city, advice)
}
