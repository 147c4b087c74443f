use std::fmt::{self, Display, Formatter};

/// Media entity referenced by a playback session.
///
/// Every image field is optional; an item without a `jellyfin_id` can never
/// address the image origin and resolves to no artwork at all.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Item {
    pub jellyfin_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub item_type: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub name: String,
    pub series_name: Option<String>,
    pub parent_index_number: Option<i32>,
    pub index_number: Option<i32>,
    pub primary_image_tag: Option<String>,
    pub primary_image_thumb_tag: Option<String>,
    pub backdrop_image_tags: Option<Vec<String>>,
}

/// Discriminator over the item `type` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Movie,
    Episode,
    Other(String),
}

impl ItemKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Movie" => ItemKind::Movie,
            "Episode" => ItemKind::Episode,
            other => ItemKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Movie => "Movie",
            ItemKind::Episode => "Episode",
            ItemKind::Other(raw) => raw,
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Item {
    pub fn kind(&self) -> Option<ItemKind> {
        non_empty(&self.item_type).map(ItemKind::parse)
    }

    /// Identifier usable against the image origin, if any.
    pub fn resolvable_id(&self) -> Option<&str> {
        non_empty(&self.jellyfin_id)
    }

    pub fn primary_tag(&self) -> Option<&str> {
        non_empty(&self.primary_image_tag)
    }

    pub fn thumb_tag(&self) -> Option<&str> {
        non_empty(&self.primary_image_thumb_tag)
    }

    /// First backdrop tag; the server lists the authoritative one first.
    pub fn first_backdrop_tag(&self) -> Option<&str> {
        self.backdrop_image_tags
            .as_ref()
            .and_then(|tags| tags.first())
            .map(String::as_str)
    }

    /// `S{season}:E{episode}` when both numbers are known and non-zero.
    /// Specials (season 0) and unnumbered entries show the series name only.
    pub fn episode_code(&self) -> Option<String> {
        match (self.parent_index_number, self.index_number) {
            (Some(season), Some(episode)) if season != 0 && episode != 0 => {
                Some(format!("S{season}:E{episode}"))
            }
            _ => None,
        }
    }
}
