use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::Accent;

/// What the Ctrl+/ chord toggles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionChord {
    #[default]
    Block,
    Mark,
}

impl FromStr for QuestionChord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "block" => Ok(QuestionChord::Block),
            "mark" => Ok(QuestionChord::Mark),
            other => Err(Error::InvalidChord(other.to_string())),
        }
    }
}

/// A `#rrggbb` color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub question_chord: QuestionChord,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    pub question: Rgb,
    pub question_leaf: Rgb,
    pub code_background: Rgb,
    pub heading: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            question: Rgb(0xf9, 0x00, 0x5e),
            question_leaf: Rgb(0xff, 0x00, 0x00),
            code_background: Rgb(49, 50, 68),
            heading: Rgb(137, 180, 250),
        }
    }
}

impl Palette {
    pub fn accent(&self, accent: Accent) -> Rgb {
        match accent {
            Accent::Question => self.question,
            Accent::QuestionLeaf => self.question_leaf,
            Accent::Heading => self.heading,
        }
    }
}

/// User configuration, read from TOML. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub keymap: KeymapConfig,
    pub palette: Palette,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.keymap.question_chord, QuestionChord::Block);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r##"
            [keymap]
            question_chord = "mark"

            [palette]
            question = "#ff0000"
            "##,
        )
        .unwrap();
        assert_eq!(config.keymap.question_chord, QuestionChord::Mark);
        assert_eq!(config.palette.question, Rgb(255, 0, 0));
        assert_eq!(config.palette.heading, Palette::default().heading);
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(matches!(
            Config::from_toml("[palette]\nquestion = \"red\""),
            Err(Error::Config(_))
        ));
        assert!(matches!("#12345".parse::<Rgb>(), Err(Error::InvalidColor(_))));
        assert!(matches!("chord".parse::<QuestionChord>(), Err(Error::InvalidChord(_))));
    }

    #[test]
    fn test_rgb_string_roundtrip() {
        let color: Rgb = "#F9005e".parse().unwrap();
        assert_eq!(String::from(color), "#f9005e");
    }
}
