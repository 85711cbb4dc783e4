//! Thumbnail focal point
//!
//! Describes which part of a cover image stays visible when it is cropped.
//! Stored as the same text a CSS `object-position` accepts: either a named
//! anchor (`center`, `top left`, ...) or `"X% Y%"`.

use crate::error::AudiobookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named crop anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailAnchor {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ThumbnailAnchor {
    const ALL: [Self; 9] = [
        Self::Center,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// CSS keyword form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "top left",
            Self::TopRight => "top right",
            Self::BottomLeft => "bottom left",
            Self::BottomRight => "bottom right",
        }
    }
}

/// Focal point of an audiobook thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ThumbnailPosition {
    /// Named anchor
    Anchor(ThumbnailAnchor),
    /// Percent offsets from the top-left corner, both within `0.0..=100.0`
    Point { x: f32, y: f32 },
}

impl ThumbnailPosition {
    /// Build a point position, clamping both axes into `0..=100`
    pub fn point(x: f32, y: f32) -> Self {
        Self::Point {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }

    /// Build a point position from fractions of the image size (`0.0..=1.0`)
    pub fn from_fraction(fx: f32, fy: f32) -> Self {
        Self::point(fx * 100.0, fy * 100.0)
    }
}

impl Default for ThumbnailPosition {
    fn default() -> Self {
        Self::Anchor(ThumbnailAnchor::Center)
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        return 50.0;
    }
    value.clamp(0.0, 100.0)
}

impl fmt::Display for ThumbnailPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchor(anchor) => f.write_str(anchor.as_str()),
            Self::Point { x, y } => write!(f, "{x:.1}% {y:.1}%"),
        }
    }
}

impl FromStr for ThumbnailPosition {
    type Err = AudiobookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

        if let Some(anchor) = ThumbnailAnchor::ALL
            .iter()
            .find(|a| a.as_str() == normalized)
        {
            return Ok(Self::Anchor(*anchor));
        }

        let mut parts = normalized.split(' ');
        if let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) {
            if let (Some(x), Some(y)) = (parse_percent(x), parse_percent(y)) {
                return Ok(Self::point(x, y));
            }
        }

        Err(AudiobookError::validation(format!(
            "Invalid thumbnail position: {s:?}"
        )))
    }
}

fn parse_percent(value: &str) -> Option<f32> {
    value.strip_suffix('%')?.parse().ok()
}

impl TryFrom<String> for ThumbnailPosition {
    type Error = AudiobookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThumbnailPosition> for String {
    fn from(position: ThumbnailPosition) -> Self {
        position.to_string()
    }
}
