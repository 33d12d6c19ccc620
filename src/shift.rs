use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed vocabulary of duty statuses accepted by status edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftCode {
    Work,
    Off,
    Competition,
    Leave,
    Duty,
}

impl ShiftCode {
    pub const ALL: [ShiftCode; 5] = [
        ShiftCode::Work,
        ShiftCode::Off,
        ShiftCode::Competition,
        ShiftCode::Leave,
        ShiftCode::Duty,
    ];

    /// Single-letter code as written in roster sheets.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftCode::Work => "Р",
            ShiftCode::Off => "В",
            ShiftCode::Competition => "К",
            ShiftCode::Leave => "О",
            ShiftCode::Duty => "Д",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShiftCode::Work => "WORK",
            ShiftCode::Off => "OFF",
            ShiftCode::Competition => "COMPETITION",
            ShiftCode::Leave => "LEAVE",
            ShiftCode::Duty => "DUTY",
        }
    }

    pub fn variants() -> impl Iterator<Item = (&'static str, &'static str)> {
        Self::ALL.iter().map(|code| (code.as_str(), code.name()))
    }

    /// Whether a raw value taken from a sheet is this code.
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim() == self.as_str()
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shift code '{0}'")]
pub struct UnknownShiftCode(pub String);

impl FromStr for ShiftCode {
    type Err = UnknownShiftCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == trimmed || code.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownShiftCode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_and_names() {
        assert_eq!("Д".parse::<ShiftCode>().unwrap(), ShiftCode::Duty);
        assert_eq!(" leave ".parse::<ShiftCode>().unwrap(), ShiftCode::Leave);
        assert_eq!("WORK".parse::<ShiftCode>().unwrap(), ShiftCode::Work);
    }

    #[test]
    fn rejects_codes_outside_vocabulary() {
        assert!("X".parse::<ShiftCode>().is_err());
        assert!("".parse::<ShiftCode>().is_err());
        // Latin lookalike of the Cyrillic letter
        assert!("B".parse::<ShiftCode>().is_err());
    }

    #[test]
    fn surface_codes_are_distinct() {
        let mut letters: Vec<_> = ShiftCode::ALL.iter().map(ShiftCode::as_str).collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), ShiftCode::ALL.len());
    }
}
