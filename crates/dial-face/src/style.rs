use std::fmt;
use std::str::FromStr;

use dial_engine::paint::{Color, ColorParseError};

/// Fixed dimensions of the face, in logical pixels.
///
/// Hand lengths do not scale with the radius: a face smaller than
/// `2 * long_hand_length` lets the long hands reach past the rim.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceMetrics {
    /// Stroke of the minute and second hands; also the rim inset.
    pub hand_stroke: f32,
    pub hour_hand_stroke: f32,
    pub long_hand_length: f32,
    pub short_hand_length: f32,
    pub center_dot_radius: f32,
    pub tick_length: f32,
    pub tick_stroke: f32,
}

impl Default for FaceMetrics {
    fn default() -> Self {
        Self {
            hand_stroke: 8.0,
            hour_hand_stroke: 4.0,
            long_hand_length: 120.0,
            short_hand_length: 80.0,
            center_dot_radius: 20.0,
            tick_length: 30.0,
            tick_stroke: 5.0,
        }
    }
}

/// The recognized color options.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StyleOption {
    HourHandColor,
    /// Also paints the second hand.
    MinuteHandColor,
    TickMarkColor,
    CenterDotColor,
}

impl StyleOption {
    pub const ALL: [StyleOption; 4] = [
        StyleOption::HourHandColor,
        StyleOption::MinuteHandColor,
        StyleOption::TickMarkColor,
        StyleOption::CenterDotColor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleOption::HourHandColor => "hourHandColor",
            StyleOption::MinuteHandColor => "minuteHandColor",
            StyleOption::TickMarkColor => "tickMarkColor",
            StyleOption::CenterDotColor => "centerDotColor",
        }
    }
}

impl FromStr for StyleOption {
    type Err = StyleError;

    /// Accepts the camelCase name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.trim().chars().filter(|c| *c != '_').collect();
        StyleOption::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| StyleError::UnknownOption(s.trim().to_string()))
    }
}

/// Colors and metrics of a face. Purely cosmetic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceStyle {
    pub hour_hand_color: Color,
    pub minute_hand_color: Color,
    pub tick_mark_color: Color,
    pub center_dot_color: Color,
    pub metrics: FaceMetrics,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            hour_hand_color: Color::GRAY,
            minute_hand_color: Color::BLACK,
            tick_mark_color: Color::BLACK,
            center_dot_color: Color::RED,
            metrics: FaceMetrics::default(),
        }
    }
}

impl FaceStyle {
    pub fn color(&self, option: StyleOption) -> Color {
        match option {
            StyleOption::HourHandColor => self.hour_hand_color,
            StyleOption::MinuteHandColor => self.minute_hand_color,
            StyleOption::TickMarkColor => self.tick_mark_color,
            StyleOption::CenterDotColor => self.center_dot_color,
        }
    }

    pub fn set_color(&mut self, option: StyleOption, color: Color) {
        let slot = match option {
            StyleOption::HourHandColor => &mut self.hour_hand_color,
            StyleOption::MinuteHandColor => &mut self.minute_hand_color,
            StyleOption::TickMarkColor => &mut self.tick_mark_color,
            StyleOption::CenterDotColor => &mut self.center_dot_color,
        };
        *slot = color;
    }

    /// Builder form of [`set_color`](Self::set_color).
    pub fn with_color(mut self, option: StyleOption, color: Color) -> Self {
        self.set_color(option, color);
        self
    }

    pub fn with_metrics(mut self, metrics: FaceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Applies overrides of the form `option=#RRGGBB[AA]`, separated by commas
    /// or semicolons, e.g. `"hourHandColor=#333333; center_dot_color=#00ff00"`.
    ///
    /// Either every override applies or none does.
    pub fn apply_overrides(&mut self, overrides: &str) -> Result<(), StyleError> {
        let mut next = *self;

        for entry in overrides.split([',', ';']).map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| StyleError::MissingValue(entry.to_string()))?;
            let option: StyleOption = key.trim().parse()?;
            let color = Color::from_hex(value.trim()).map_err(|e| StyleError::Color(option, e))?;
            next.set_color(option, color);
        }

        *self = next;
        Ok(())
    }
}

/// Error from parsing style overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    UnknownOption(String),
    MissingValue(String),
    Color(StyleOption, ColorParseError),
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::UnknownOption(name) => write!(f, "unknown style option '{name}'"),
            StyleError::MissingValue(entry) => write!(f, "style entry '{entry}' has no '=value'"),
            StyleError::Color(option, err) => write!(f, "{}: {err}", option.name()),
        }
    }
}

impl std::error::Error for StyleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StyleError::Color(_, err) => Some(err),
            _ => None,
        }
    }
}
