/*
 *  glyph.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Forecast phrase to weather glyph classification
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weather glyphs available in the icon font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Glyph {
    Sunrise,
    Sunny,
    Clear,
    Windy,
    PartlySunny,
    PartlyClear,
    Mist,
    Cloudy,
    Thunderstorm,
    LightRain,
    Rain,
    Snow,
    Sunset,
}

impl Glyph {
    /// Code point of the glyph in the stock meteocons font
    pub fn default_code(self) -> char {
        match self {
            Glyph::Sunrise => 'A',
            Glyph::Sunny => 'B',
            Glyph::Clear => 'C',
            Glyph::Windy => 'F',
            Glyph::PartlySunny => 'H',
            Glyph::PartlyClear => 'I',
            Glyph::Mist => 'M',
            Glyph::Cloudy => 'N',
            Glyph::Thunderstorm => 'O',
            Glyph::LightRain => 'Q',
            Glyph::Rain => 'R',
            Glyph::Snow => 'W',
            Glyph::Sunset => 'J',
        }
    }
}

/// A single classification rule: if the phrase contains `needle`
/// the period maps to `day` or `night` depending on the day flag.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub needle: &'static str,
    pub day: Glyph,
    pub night: Glyph,
}

const fn rule(needle: &'static str, day: Glyph, night: Glyph) -> Rule {
    Rule { needle, day, night }
}

const fn both(needle: &'static str, glyph: Glyph) -> Rule {
    Rule { needle, day: glyph, night: glyph }
}

/// Ranked rules, highest priority first. The first rule whose needle is a
/// case-sensitive substring of the phrase decides the glyph.
///
/// | rank | needle                 | day          | night        |
/// |------|------------------------|--------------|--------------|
/// | 1    | `Clear`                | Sunny        | Clear        |
/// | 2    | `Slight Chance Rain`   | Clear        | Clear        |
/// | 3    | `Light Rain`           | LightRain    | LightRain    |
/// | 4    | `Rain`                 | Rain         | Rain         |
/// | 5    | `Thunderstorm`         | Thunderstorm | Thunderstorm |
/// | 6    | `Lightning`            | Thunderstorm | Thunderstorm |
/// | 7    | `Storm`                | Thunderstorm | Thunderstorm |
/// | 8    | `Partly Cloudy`        | PartlySunny  | PartlyClear  |
/// | 9    | `Cloudy`               | Cloudy       | Cloudy       |
/// | 10   | `Snow`                 | Snow         | Snow         |
/// | -    | (no match)             | Sunny        | Clear        |
pub const RULES: [Rule; 10] = [
    rule("Clear", Glyph::Sunny, Glyph::Clear),
    both("Slight Chance Rain", Glyph::Clear),
    both("Light Rain", Glyph::LightRain),
    both("Rain", Glyph::Rain),
    both("Thunderstorm", Glyph::Thunderstorm),
    both("Lightning", Glyph::Thunderstorm),
    both("Storm", Glyph::Thunderstorm),
    rule("Partly Cloudy", Glyph::PartlySunny, Glyph::PartlyClear),
    both("Cloudy", Glyph::Cloudy),
    both("Snow", Glyph::Snow),
];

/// Classify a short forecast phrase into a weather glyph.
pub fn classify(phrase: &str, is_daytime: bool) -> Glyph {
    let pick = |r: &Rule| if is_daytime { r.day } else { r.night };
    RULES
        .iter()
        .find(|r| phrase.contains(r.needle))
        .map(pick)
        .unwrap_or(if is_daytime { Glyph::Sunny } else { Glyph::Clear })
}

/// Glyph to icon-font code mapping. Entries present in the configuration
/// override the stock meteocons code points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconMap(BTreeMap<Glyph, char>);

impl IconMap {
    pub fn code(&self, glyph: Glyph) -> char {
        self.0.get(&glyph).copied().unwrap_or_else(|| glyph.default_code())
    }

    pub fn set(&mut self, glyph: Glyph, code: char) {
        self.0.insert(glyph, code);
    }

    /// Code for a forecast phrase, the combined classify + lookup step
    pub fn code_for(&self, phrase: &str, is_daytime: bool) -> char {
        self.code(classify(phrase, is_daytime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_by_day_flag() {
        assert_eq!(classify("Sunny", true), Glyph::Sunny);
        assert_eq!(classify("Sunny", false), Glyph::Clear);
        assert_eq!(classify("", false), Glyph::Clear);
        assert_eq!(classify("Patchy Fog", true), Glyph::Sunny);
    }

    #[test]
    fn test_simple_keywords() {
        assert_eq!(classify("Chance Snow Showers", true), Glyph::Snow);
        assert_eq!(classify("Mostly Cloudy", true), Glyph::Cloudy);
        assert_eq!(classify("Partly Cloudy", true), Glyph::PartlySunny);
        assert_eq!(classify("Partly Cloudy", false), Glyph::PartlyClear);
        assert_eq!(classify("Chance Light Rain", false), Glyph::LightRain);
        assert_eq!(classify("Rain Showers Likely", true), Glyph::Rain);
    }

    #[test]
    fn test_storm_family() {
        assert_eq!(classify("Storm", true), Glyph::Thunderstorm);
        assert_eq!(classify("Lightning", false), Glyph::Thunderstorm);
        assert_eq!(classify("Isolated Thunderstorms", true), Glyph::Thunderstorm);
    }

    #[test]
    fn test_rain_and_clear_pair() {
        // clear outranks any rain wording
        assert_eq!(classify("Rain then Clear", true), Glyph::Sunny);
        assert_eq!(classify("Rain then Clear", false), Glyph::Clear);
        assert_eq!(classify("Light Rain then Mostly Clear", true), Glyph::Sunny);
        assert_eq!(classify("Slight Chance Rain Showers then Clear", false), Glyph::Clear);
    }

    #[test]
    fn test_keyword_pairs_follow_rank() {
        assert_eq!(classify("Rain And Snow", true), Glyph::Rain);
        assert_eq!(classify("Showers And Thunderstorms then Rain", true), Glyph::Rain);
        assert_eq!(classify("Light Rain And Thunderstorms", true), Glyph::LightRain);
        assert_eq!(classify("Thunderstorms then Partly Cloudy", true), Glyph::Thunderstorm);
        assert_eq!(classify("Cloudy then Snow", true), Glyph::Cloudy);
        assert_eq!(classify("Partly Cloudy then Snow", false), Glyph::PartlyClear);
    }

    #[test]
    fn test_slight_chance_rain_is_clear_day_and_night() {
        assert_eq!(classify("Slight Chance Rain", true), Glyph::Clear);
        assert_eq!(classify("Slight Chance Rain Showers", true), Glyph::Clear);
        assert_eq!(classify("Slight Chance Rain Showers", false), Glyph::Clear);
    }

    #[test]
    fn test_icon_map_overrides() {
        let mut map = IconMap::default();
        assert_eq!(map.code(Glyph::Rain), 'R');
        assert_eq!(map.code_for("Heavy Rain", true), 'R');
        map.set(Glyph::Rain, 'X');
        assert_eq!(map.code(Glyph::Rain), 'X');
        assert_eq!(map.code(Glyph::Snow), 'W');
    }

    #[test]
    fn test_icon_map_from_yaml() {
        let map: IconMap = serde_yaml::from_str("Sunny: 'Z'\nSunset: 'K'\n").unwrap();
        assert_eq!(map.code(Glyph::Sunny), 'Z');
        assert_eq!(map.code(Glyph::Sunset), 'K');
        assert_eq!(map.code(Glyph::Clear), 'C');
    }
}
