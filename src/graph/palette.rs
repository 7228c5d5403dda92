use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

pub const DEFAULT_PALETTE: [&str; 5] = ["#ffffff", "#66CFFF", "#cfff66", "#ffffff", "#33FFF9"];

/// Ordered depth colors. Never empty, so every depth has a color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(bad) = colors.iter().find(|color| !is_hex_color(color)) {
            return Err(ConfigError::InvalidColor(bad.clone()));
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Largest depth the resolver may report; deeper chains clamp here.
    pub fn max_depth(&self) -> u32 {
        u32::try_from(self.colors.len() - 1).unwrap_or(u32::MAX)
    }

    pub fn color(&self, depth: u32) -> &str {
        let index = (depth as usize).min(self.colors.len() - 1);
        &self.colors[index]
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|color| (*color).to_owned()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for Palette {
    type Error = ConfigError;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<String> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Parses `#RRGGBB` into its channels.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    if !is_hex_color(value) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&value[range], 16).ok();
    Some((channel(1..3)?, channel(3..5)?, channel(5..7)?))
}
