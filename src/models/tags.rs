use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;

/// The fixed set of tags a snippet can carry.
///
/// Snippets store the tag as its lowercase identifier (`"red"`, `"blue"`, ...)
/// and an empty string for untagged. Values outside this set are kept as-is
/// in storage but render with no background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl TagColor {
    /// All recognized tags in picker order
    pub const ALL: [TagColor; 4] = [
        TagColor::Red,
        TagColor::Blue,
        TagColor::Green,
        TagColor::Yellow,
    ];

    /// Identifier written to storage
    pub fn id(&self) -> &'static str {
        match self {
            TagColor::Red => "red",
            TagColor::Blue => "blue",
            TagColor::Green => "green",
            TagColor::Yellow => "yellow",
        }
    }

    /// Light background used for rows, filter buttons and the tag picker
    pub fn display_color(&self) -> Color {
        match self {
            TagColor::Red => Color::Rgb(0xff, 0x76, 0x76),
            TagColor::Blue => Color::Rgb(0xBD, 0xD9, 0xF2),
            TagColor::Green => Color::Rgb(0x6a, 0xd0, 0x68),
            TagColor::Yellow => Color::Rgb(0xF2, 0xE8, 0xCF),
        }
    }

    /// Parses a stored identifier, `None` for empty or unrecognized values
    pub fn from_id(id: &str) -> Option<Self> {
        id.parse().ok()
    }

    /// Next entry of the tag picker cycle: untagged, red, blue, green, yellow, untagged...
    pub fn cycle(current: Option<TagColor>) -> Option<TagColor> {
        match current {
            None => Some(TagColor::ALL[0]),
            Some(tag) => {
                let idx = TagColor::ALL.iter().position(|t| *t == tag).unwrap_or(0);
                TagColor::ALL.get(idx + 1).copied()
            }
        }
    }

    /// Previous entry of the tag picker cycle
    pub fn cycle_back(current: Option<TagColor>) -> Option<TagColor> {
        match current {
            None => TagColor::ALL.last().copied(),
            Some(tag) => {
                let idx = TagColor::ALL.iter().position(|t| *t == tag).unwrap_or(0);
                idx.checked_sub(1).map(|i| TagColor::ALL[i])
            }
        }
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TagColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(TagColor::Red),
            "blue" => Ok(TagColor::Blue),
            "green" => Ok(TagColor::Green),
            "yellow" => Ok(TagColor::Yellow),
            other => Err(format!("unknown tag: {other:?}")),
        }
    }
}

/// Background for a stored tag identifier. Unrecognized identifiers get none.
pub fn background_for(tag_id: &str) -> Option<Color> {
    TagColor::from_id(tag_id).map(|tag| tag.display_color())
}

/// Distinct non-empty tag identifiers in the order they first appear.
pub fn distinct_tags<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<String> = Vec::new();
    for id in ids {
        if !id.is_empty() && !seen.iter().any(|s| s == id) {
            seen.push(id.to_string());
        }
    }
    seen
}
