use risk_rush_core::GameConfig;
use risk_rush_system_weather::{Weather, WeatherKind, MAX_SNOW_LEVEL, RAIN_CAPACITY};

const FRAME: f32 = 1.0 / 60.0;

fn settled_sequence(weather: &mut Weather, frames: usize) -> Vec<WeatherKind> {
    let mut visited = vec![weather.current()];
    for _ in 0..frames {
        weather.update(FRAME);
        if visited.last() != Some(&weather.current()) {
            visited.push(weather.current());
        }
    }
    visited
}

#[test]
fn cycle_visits_every_weather_in_order() {
    let mut weather = Weather::new(&GameConfig::default(), 3);
    // Longest cycle is 59 s of dwell plus five 2 s blends.
    let visited = settled_sequence(&mut weather, 60 * 80);

    let expected = [
        WeatherKind::Clear,
        WeatherKind::Sunset,
        WeatherKind::Night,
        WeatherKind::Snowy,
        WeatherKind::Sunrise,
        WeatherKind::Clear,
    ];
    assert!(visited.len() >= expected.len(), "{visited:?}");
    assert_eq!(&visited[..expected.len()], &expected);
}

#[test]
fn snow_builds_during_snowfall_and_melts_at_sunrise() {
    let mut weather = Weather::new(&GameConfig::default(), 11);
    let mut peak = 0;
    let mut level_during_sunrise = None;
    for _ in 0..60 * 80 {
        weather.update(FRAME);
        peak = peak.max(weather.snow_level());
        if weather.current() == WeatherKind::Sunrise && level_during_sunrise.is_none() {
            level_during_sunrise = Some(weather.snow_level());
        }
        if weather.current() == WeatherKind::Clear && level_during_sunrise.is_some() {
            break;
        }
    }

    assert_eq!(peak, MAX_SNOW_LEVEL);
    assert_eq!(level_during_sunrise, Some(MAX_SNOW_LEVEL));
    assert!(weather.snow_level() < MAX_SNOW_LEVEL);
}

#[test]
fn snow_caps_regenerate_only_on_level_changes() {
    let mut weather = Weather::new(&GameConfig::default(), 5);
    let mut changes = 1;
    let mut last = weather.snow_level();
    weather.update(FRAME);
    for _ in 0..60 * 70 {
        weather.update(FRAME);
        if weather.snow_level() != last {
            changes += 1;
            last = weather.snow_level();
        }
        assert_eq!(weather.snow_caps().is_some(), weather.snow_level() > 0);
    }
    assert_eq!(weather.snow_cap_generations(), changes);
}

#[test]
fn rain_never_exceeds_the_night_target() {
    let mut weather = Weather::new(&GameConfig::default(), 21);
    for _ in 0..60 * 70 {
        weather.update(FRAME);
        assert!(weather.rain().drops().len() <= RAIN_CAPACITY * 3 / 10);
    }
}

#[test]
fn same_seed_replays_the_same_sky() {
    let mut first = Weather::new(&GameConfig::default(), 42);
    let mut second = Weather::new(&GameConfig::default(), 42);
    for _ in 0..60 * 30 {
        first.update(FRAME);
        second.update(FRAME);
        assert_eq!(first.current(), second.current());
        assert_eq!(first.sky_colors(), second.sky_colors());
        assert_eq!(first.rain().drops(), second.rain().drops());
    }
}
