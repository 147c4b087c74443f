//! Artwork URL resolution.
//!
//! Pure string composition against the Jellyfin image endpoint
//! `{server}/Items/{id}/Images/{variant}?fillHeight=&fillWidth=&quality=&tag=`.
//! Nothing here touches the network.

use serde::{Deserialize, Serialize};
use streamdash_model::{FillSize, ImageVariant, Item, Server};
use url::form_urlencoded;

/// Image sizing knobs handed to the image origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    pub portrait_fill: FillSize,
    pub landscape_fill: FillSize,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            portrait_fill: FillSize::PORTRAIT,
            landscape_fill: FillSize::LANDSCAPE,
            quality: 96,
        }
    }
}

/// Which images resolved for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkLayout {
    /// Portrait shown large, landscape as a smaller secondary image.
    Both,
    PortraitOnly,
    LandscapeOnly,
    NoImage,
}

/// Resolved artwork for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkSet {
    pub portrait: Option<String>,
    pub landscape: Option<String>,
    pub layout: ArtworkLayout,
}

impl ArtworkSet {
    pub const fn empty() -> Self {
        Self {
            portrait: None,
            landscape: None,
            layout: ArtworkLayout::NoImage,
        }
    }

    fn from_parts(portrait: Option<String>, landscape: Option<String>) -> Self {
        let layout = match (&portrait, &landscape) {
            (Some(_), Some(_)) => ArtworkLayout::Both,
            (Some(_), None) => ArtworkLayout::PortraitOnly,
            (None, Some(_)) => ArtworkLayout::LandscapeOnly,
            (None, None) => ArtworkLayout::NoImage,
        };
        Self {
            portrait,
            landscape,
            layout,
        }
    }

    /// Main image: portrait when available, else landscape.
    pub fn primary(&self) -> Option<&str> {
        self.portrait.as_deref().or(self.landscape.as_deref())
    }

    /// Smaller companion image, only shown when both resolved.
    pub fn secondary(&self) -> Option<&str> {
        match self.layout {
            ArtworkLayout::Both => self.landscape.as_deref(),
            _ => None,
        }
    }
}

/// Build one image URL.
pub fn image_url(
    server: &Server,
    item_id: &str,
    variant: ImageVariant,
    fill: FillSize,
    quality: u8,
    tag: &str,
) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("fillHeight", &fill.height.to_string())
        .append_pair("fillWidth", &fill.width.to_string())
        .append_pair("quality", &quality.to_string())
        .append_pair("tag", tag)
        .finish();

    format!(
        "{}/Items/{}/Images/{}?{}",
        server.base_url(),
        item_id,
        variant.as_str(),
        query
    )
}

/// Resolve portrait and landscape artwork for `item`.
///
/// Landscape prefers the first backdrop tag over the thumb tag. Items
/// without a usable `jellyfin_id` always resolve to [`ArtworkLayout::NoImage`].
pub fn resolve_artwork(
    item: &Item,
    server: &Server,
    config: &ArtworkConfig,
) -> ArtworkSet {
    let Some(item_id) = item.resolvable_id() else {
        return ArtworkSet::empty();
    };

    let portrait = item.primary_tag().map(|tag| {
        image_url(
            server,
            item_id,
            ImageVariant::Primary,
            config.portrait_fill,
            config.quality,
            tag,
        )
    });

    let landscape = item
        .first_backdrop_tag()
        .map(|tag| (ImageVariant::Backdrop, tag))
        .or_else(|| item.thumb_tag().map(|tag| (ImageVariant::Thumb, tag)))
        .map(|(variant, tag)| {
            image_url(
                server,
                item_id,
                variant,
                config.landscape_fill,
                config.quality,
                tag,
            )
        });

    ArtworkSet::from_parts(portrait, landscape)
}

#[cfg(test)]
mod tests {
    use streamdash_model::ServerId;

    use super::*;

    fn server() -> Server {
        Server::new(ServerId(1), "https://jf.example.com/")
    }

    fn item() -> Item {
        Item {
            jellyfin_id: Some("abc123".into()),
            primary_image_tag: Some("ptag".into()),
            primary_image_thumb_tag: Some("ttag".into()),
            backdrop_image_tags: Some(vec!["btag".into(), "later".into()]),
            ..Item::default()
        }
    }

    #[test]
    fn both_images_resolve() {
        let art = resolve_artwork(&item(), &server(), &ArtworkConfig::default());
        assert_eq!(art.layout, ArtworkLayout::Both);
        assert_eq!(
            art.portrait.as_deref(),
            Some(
                "https://jf.example.com/Items/abc123/Images/Primary?fillHeight=600&fillWidth=400&quality=96&tag=ptag"
            )
        );
        assert_eq!(
            art.landscape.as_deref(),
            Some(
                "https://jf.example.com/Items/abc123/Images/Backdrop?fillHeight=400&fillWidth=800&quality=96&tag=btag"
            )
        );
        assert_eq!(art.primary(), art.portrait.as_deref());
        assert_eq!(art.secondary(), art.landscape.as_deref());
    }

    #[test]
    fn thumb_used_when_backdrops_empty() {
        let mut item = item();
        item.backdrop_image_tags = Some(Vec::new());
        let art = resolve_artwork(&item, &server(), &ArtworkConfig::default());
        let landscape = art.landscape.unwrap();
        assert!(landscape.contains("/Images/Thumb?"));
        assert!(landscape.ends_with("tag=ttag"));
        assert!(!landscape.contains("btag"));
    }

    #[test]
    fn missing_id_means_no_image() {
        let mut item = item();
        item.jellyfin_id = None;
        let art = resolve_artwork(&item, &server(), &ArtworkConfig::default());
        assert_eq!(art, ArtworkSet::empty());
        assert_eq!(art.layout, ArtworkLayout::NoImage);
        assert!(art.primary().is_none());
    }

    #[test]
    fn single_image_layouts() {
        let mut portrait_only = item();
        portrait_only.backdrop_image_tags = None;
        portrait_only.primary_image_thumb_tag = None;
        let art = resolve_artwork(
            &portrait_only,
            &server(),
            &ArtworkConfig::default(),
        );
        assert_eq!(art.layout, ArtworkLayout::PortraitOnly);
        assert!(art.secondary().is_none());

        let mut landscape_only = item();
        landscape_only.primary_image_tag = None;
        let art = resolve_artwork(
            &landscape_only,
            &server(),
            &ArtworkConfig::default(),
        );
        assert_eq!(art.layout, ArtworkLayout::LandscapeOnly);
        assert_eq!(art.primary(), art.landscape.as_deref());
        assert!(art.secondary().is_none());
    }

    #[test]
    fn no_tags_means_no_image() {
        let bare = Item {
            jellyfin_id: Some("abc123".into()),
            ..Item::default()
        };
        let art = resolve_artwork(&bare, &server(), &ArtworkConfig::default());
        assert_eq!(art.layout, ArtworkLayout::NoImage);
    }

    #[test]
    fn config_controls_sizes_and_tags_are_encoded() {
        let config = ArtworkConfig {
            portrait_fill: FillSize::new(200, 300),
            landscape_fill: FillSize::new(640, 360),
            quality: 80,
        };
        let url = image_url(
            &server(),
            "abc123",
            ImageVariant::Primary,
            config.portrait_fill,
            config.quality,
            "a b&c",
        );
        assert_eq!(
            url,
            "https://jf.example.com/Items/abc123/Images/Primary?fillHeight=300&fillWidth=200&quality=80&tag=a+b%26c"
        );
    }
}
