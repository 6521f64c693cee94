//! Time-period classification of free-text date strings.
//!
//! Dataset dates are written by hand: `"1475"`, `"um 1420"`, `"Ende 13. Jh."`,
//! `"vor 1300 (Abschrift 16. Jh.)"`, or nothing at all. [`classify`] maps any
//! of these onto a small set of bucket labels used for faceting.
//!
//! # Rule
//!
//! 1. Absent, empty or whitespace-only input → [`UNBEKANNT`].
//! 2. The first run of 3–4 ASCII digits is taken as the year.
//!    - `year < lower` → `"Vor <lower>"`, `year >= upper` → `"Ab <upper>"`.
//!    - Otherwise `century = ceil(year / 100)` and
//!      `position = year − (century − 1) × 100` (so `1..=100`).
//!      Positions `1..=33` are *Anfang*, `34..=66` *Mitte*, `67..=100` *Ende*.
//! 3. Without a year, an explicit `Anfang|Mitte|Ende <NN>. Jh.` phrase is
//!    accepted in any capitalization and normalized.
//! 4. Anything else → [`UNBEKANNT`].
//!
//! The upper bound of each third is inclusive: 1433 is still *Anfang*,
//! 1466 still *Mitte*, 1467 is *Ende*.

use once_cell::sync::Lazy;
use regex::Regex;

/// Label for dates that cannot be placed.
pub const UNBEKANNT: &str = "unbekannt";

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{3,4}").expect("valid year regex"));

static PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(anfang|mitte|ende)\s*([0-9]{1,2})\.\s*jh").expect("valid phrase regex"));

/// Usable year range. Years outside it collapse into two edge buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeitBounds {
    /// First year that gets a century bucket.
    pub lower: u32,
    /// First year that no longer gets a century bucket.
    pub upper: u32,
}

impl Default for ZeitBounds {
    fn default() -> Self {
        Self {
            lower: 1200,
            upper: 1800,
        }
    }
}

/// Third of a century.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Abschnitt {
    Anfang,
    Mitte,
    Ende,
}

impl Abschnitt {
    /// Third for a position `1..=100` within a century.
    pub fn of_position(position: u32) -> Self {
        match position {
            0..=33 => Abschnitt::Anfang,
            34..=66 => Abschnitt::Mitte,
            _ => Abschnitt::Ende,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Abschnitt::Anfang => "Anfang",
            Abschnitt::Mitte => "Mitte",
            Abschnitt::Ende => "Ende",
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "anfang" => Some(Abschnitt::Anfang),
            "mitte" => Some(Abschnitt::Mitte),
            "ende" => Some(Abschnitt::Ende),
            _ => None,
        }
    }
}

/// Classify with the default [`ZeitBounds`].
pub fn classify(raw: Option<&str>) -> String {
    classify_with(raw, &ZeitBounds::default())
}

/// Classify a raw date string into its bucket label.
///
/// Total over all inputs; never panics.
pub fn classify_with(raw: Option<&str>, bounds: &ZeitBounds) -> String {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return UNBEKANNT.to_string(),
    };

    if let Some(year) = find_year(raw) {
        return classify_year(year, bounds);
    }

    if let Some(caps) = PHRASE_RE.captures(raw) {
        let abschnitt = Abschnitt::parse(&caps[1]);
        let century = caps[2].parse::<u32>().ok();
        if let (Some(abschnitt), Some(century)) = (abschnitt, century) {
            return format!("{} {}. Jh.", abschnitt.label(), century);
        }
    }

    UNBEKANNT.to_string()
}

/// Bucket label for a numeric year.
pub fn classify_year(year: u32, bounds: &ZeitBounds) -> String {
    if year < bounds.lower {
        return format!("Vor {}", bounds.lower);
    }
    if year >= bounds.upper {
        return format!("Ab {}", bounds.upper);
    }

    let century = year.div_ceil(100).max(1);
    let position = year - (century - 1) * 100;
    format!(
        "{} {}. Jh.",
        Abschnitt::of_position(position).label(),
        century
    )
}

/// First 3–4 digit number in the text.
fn find_year(raw: &str) -> Option<u32> {
    YEAR_RE.find(raw).and_then(|m| m.as_str().parse().ok())
}
