// Data model: one movie entry as it is stored in the catalog file and
// shown on screen. Numeric fields are parsed leniently from user or API
// text; anything that does not look like a number becomes `None`, which
// is written to disk as `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single catalog entry. Field names on disk use camelCase
/// (`releaseYear`) to stay compatible with existing catalog files.
/// Keys the catalog does not know about are kept in `extra` and written
/// back untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieRecord {
    pub name: String,
    #[serde(deserialize_with = "lenient_year")]
    pub release_year: Option<i64>,
    pub director: String,
    #[serde(deserialize_with = "lenient_rating")]
    pub rating: Option<f64>,
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A numeric field as it may appear in a hand-edited catalog file.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_year<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<LooseNumber>::deserialize(d)? {
        Some(LooseNumber::Int(n)) => Some(n),
        Some(LooseNumber::Float(f)) if f.is_finite() => Some(f.trunc() as i64),
        Some(LooseNumber::Text(s)) => parse_leading_int(&s),
        _ => None,
    })
}

fn lenient_rating<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<LooseNumber>::deserialize(d)? {
        Some(LooseNumber::Int(n)) => Some(n as f64),
        Some(LooseNumber::Float(f)) => Some(f),
        Some(LooseNumber::Text(s)) => parse_leading_float(&s),
        None => None,
    })
}

impl MovieRecord {
    /// Build a record from raw text fields, exactly as typed at the
    /// prompt. Year and rating are parsed leniently, genres are split on
    /// commas and trimmed.
    pub fn from_text(name: &str, year: &str, director: &str, rating: &str, genres: &str) -> Self {
        MovieRecord {
            name: name.to_string(),
            release_year: parse_leading_int(year),
            director: director.to_string(),
            rating: parse_leading_float(rating),
            genres: split_genres(genres),
            extra: Map::new(),
        }
    }

    /// One-line rendering used in listings and search results.
    pub fn summary_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MovieRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Year: {}, Director: {}, Rating: {}, Genres: {}",
            self.name,
            display_number(self.release_year),
            self.director,
            display_number(self.rating),
            self.genres.join(", ")
        )
    }
}

fn display_number<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "NaN".into())
}

/// Split a comma-separated genre list. Empty tokens are kept.
pub fn split_genres(text: &str) -> Vec<String> {
    text.split(',').map(|g| g.trim().to_string()).collect()
}

/// Parse the integer at the start of `text`, ignoring leading whitespace
/// and any trailing garbage ("2010–2014" gives 2010).
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Parse the longest decimal number at the start of `text`
/// ("8.0/10" gives 8.0, "N/A" gives `None`).
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
            mantissa_digits += 1;
        }
        if mantissa_digits > 0 {
            end = frac;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    // Only take an exponent when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits_start {
            end = exp;
        }
    }
    s[..end].parse().ok()
}

/// Compare a stored number with raw search text the way a loose
/// equality would: blank text counts as zero, anything else must be a
/// whole number literal. A missing value never matches.
pub fn loosely_equals(value: Option<f64>, text: &str) -> bool {
    let Some(value) = value else {
        return false;
    };
    let trimmed = text.trim();
    let wanted = if trimmed.is_empty() {
        0.0
    } else {
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => return false,
        }
    };
    value == wanted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_parses_numbers_and_genres() {
        let movie = MovieRecord::from_text("Dune", "2021", "Denis Villeneuve", "8.0", "Sci-Fi, Drama");
        assert_eq!(movie.release_year, Some(2021));
        assert_eq!(movie.rating, Some(8.0));
        assert_eq!(movie.genres, vec!["Sci-Fi", "Drama"]);
    }

    #[test]
    fn invalid_numbers_become_none() {
        let movie = MovieRecord::from_text("X", "soon", "Y", "N/A", "");
        assert_eq!(movie.release_year, None);
        assert_eq!(movie.rating, None);
        assert_eq!(movie.genres, vec![""]);
    }

    #[test]
    fn leading_int_ignores_trailing_text() {
        assert_eq!(parse_leading_int("  2010–2014"), Some(2010));
        assert_eq!(parse_leading_int("-12abc"), Some(-12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn leading_float_prefixes() {
        assert_eq!(parse_leading_float("7.5/10"), Some(7.5));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("9."), Some(9.0));
        assert_eq!(parse_leading_float("1e2x"), Some(100.0));
        assert_eq!(parse_leading_float("3e"), Some(3.0));
        assert_eq!(parse_leading_float("."), None);
    }

    #[test]
    fn summary_line_matches_listing_format() {
        let movie = MovieRecord::from_text("Dune", "2021", "Denis Villeneuve", "8", "Sci-Fi,Drama");
        assert_eq!(
            movie.summary_line(),
            "Name: Dune, Year: 2021, Director: Denis Villeneuve, Rating: 8, Genres: Sci-Fi, Drama"
        );
        let broken = MovieRecord::from_text("?", "", "", "", "");
        assert!(broken.summary_line().contains("Year: NaN"));
        assert!(broken.summary_line().contains("Rating: NaN"));
    }

    #[test]
    fn loose_equality_against_text() {
        assert!(loosely_equals(Some(1999.0), "1999"));
        assert!(loosely_equals(Some(1999.0), " 1999 "));
        assert!(loosely_equals(Some(8.5), "8.50"));
        assert!(loosely_equals(Some(0.0), ""));
        assert!(!loosely_equals(Some(1999.0), "1999abc"));
        assert!(!loosely_equals(None, "1999"));
    }

    #[test]
    fn missing_fields_deserialize_with_defaults() {
        let movie: MovieRecord = serde_json::from_str(r#"{"name":"Alien","releaseYear":null}"#).unwrap();
        assert_eq!(movie.name, "Alien");
        assert_eq!(movie.release_year, None);
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn text_numbers_in_file_are_accepted() {
        let movie: MovieRecord =
            serde_json::from_str(r#"{"name":"Alien","releaseYear":"1979","rating":"8.5"}"#).unwrap();
        assert_eq!(movie.release_year, Some(1979));
        assert_eq!(movie.rating, Some(8.5));

        let unrated: MovieRecord =
            serde_json::from_str(r#"{"name":"Odd","releaseYear":"tbd","rating":"N/A"}"#).unwrap();
        assert_eq!(unrated.release_year, None);
        assert_eq!(unrated.rating, None);
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let text = r#"{"name":"Alien","releaseYear":1979,"director":"Ridley Scott","rating":8.5,"genres":["Horror"],"watched":true,"notes":{"seen":2}}"#;
        let movie: MovieRecord = serde_json::from_str(text).unwrap();
        assert_eq!(movie.extra.get("watched"), Some(&Value::Bool(true)));

        let back: Value = serde_json::to_value(&movie).unwrap();
        let original: Value = serde_json::from_str(text).unwrap();
        assert_eq!(back, original);
    }
}
