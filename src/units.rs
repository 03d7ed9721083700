/*
 *  units.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
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

pub const MS_TO_KNOTS: f64 = 1.944;
pub const MS_TO_FT_PER_MIN: f64 = 196.85;
pub const M_TO_FT: f64 = 3.28084;

/// Fahrenheit to whole Celsius, `round((F-32)*5/9)`
#[inline]
pub fn fahrenheit_to_celsius(f: i32) -> i32 {
    ((f as f64 - 32.0) * 5.0 / 9.0).round() as i32
}

#[inline]
pub fn knots(ms: f64) -> i64 { (ms * MS_TO_KNOTS).round() as i64 }

#[inline]
pub fn feet_per_minute(ms: f64) -> i64 { (ms * MS_TO_FT_PER_MIN).round() as i64 }

#[inline]
pub fn feet(m: f64) -> i64 { (m * M_TO_FT).round() as i64 }

/// "72 F (22 C)" as used by the compact strips
pub fn dual_temperature(f: i32) -> String {
    format!("{} F ({} C)", f, fahrenheit_to_celsius(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_to_celsius() {
        assert_eq!(fahrenheit_to_celsius(32), 0);
        assert_eq!(fahrenheit_to_celsius(98), 37);
        assert_eq!(fahrenheit_to_celsius(60), 16);
        assert_eq!(fahrenheit_to_celsius(61), 16);
        assert_eq!(fahrenheit_to_celsius(212), 100);
        assert_eq!(fahrenheit_to_celsius(-40), -40);
        assert_eq!(fahrenheit_to_celsius(0), -18);
    }

    #[test]
    fn test_aircraft_units() {
        assert_eq!(knots(100.0), 194);
        assert_eq!(feet_per_minute(-5.2), -1024);
        assert_eq!(feet_per_minute(0.0), 0);
        assert_eq!(feet(1000.0), 3281);
    }

    #[test]
    fn test_dual_temperature() {
        assert_eq!(dual_temperature(72), "72 F (22 C)");
        assert_eq!(dual_temperature(20), "20 F (-7 C)");
    }
}
