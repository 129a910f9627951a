use serde::{Deserialize, Serialize};

/// Size renditions the provider serves for each photo.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSrc {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub large2x: String,
    pub large: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub portrait: String,
    #[serde(default)]
    pub landscape: String,
    #[serde(default)]
    pub tiny: String,
}

/// Photo metadata as returned by the search provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub photographer: String,
    #[serde(default)]
    pub avg_color: String,
    pub src: PhotoSrc,
    /// Accessibility description.
    #[serde(default)]
    pub alt: String,
}

/// One page of search results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "landscape" => Some(Self::Landscape),
            "portrait" => Some(Self::Portrait),
            "square" => Some(Self::Square),
            _ => None,
        }
    }
}

/// Minimum photo size: large (24MP), medium (12MP) or small (4MP).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSize {
    Large,
    Medium,
    Small,
}

impl PhotoSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "large" => Some(Self::Large),
            "medium" => Some(Self::Medium),
            "small" => Some(Self::Small),
            _ => None,
        }
    }
}

/// Query parameters for a photo search. Unset filters are left off the request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<PhotoSize>,
    /// Named color (red, blue, ...) or a hex code such as `#ffffff`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            orientation: None,
            size: None,
            color: None,
            locale: None,
            page: None,
            per_page: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PAGE_JSON: &str = r##"{
        "page": 1,
        "per_page": 2,
        "total_results": 1234,
        "photos": [
            {
                "id": 3184405,
                "width": 4000,
                "height": 6000,
                "url": "https://www.pexels.com/photo/3184405/",
                "photographer": "fauxels",
                "avg_color": "#7A6E64",
                "src": {
                    "original": "https://images.pexels.com/photos/3184405/a.jpeg",
                    "large2x": "https://images.pexels.com/photos/3184405/a.jpeg?h=650&dpr=2",
                    "large": "https://images.pexels.com/photos/3184405/a.jpeg?h=650",
                    "medium": "https://images.pexels.com/photos/3184405/a.jpeg?h=350",
                    "small": "https://images.pexels.com/photos/3184405/a.jpeg?h=130",
                    "portrait": "https://images.pexels.com/photos/3184405/a.jpeg?h=1200",
                    "landscape": "https://images.pexels.com/photos/3184405/a.jpeg?h=627",
                    "tiny": "https://images.pexels.com/photos/3184405/a.jpeg?h=200"
                },
                "liked": false,
                "alt": "Smiling Woman In Yellow Top"
            },
            {
                "id": 7,
                "avg_color": "#FFFFFF",
                "src": { "large": "https://images.pexels.com/photos/7/b.jpeg" }
            }
        ],
        "next_page": "https://api.pexels.com/v1/search/?page=2&per_page=2&query=face"
    }"##;

    #[test]
    fn test_search_page_deserializes_provider_payload() {
        let page: SearchPage = serde_json::from_str(PAGE_JSON).unwrap();
        assert_eq!(page.photos.len(), 2);
        assert_eq!(page.total_results, 1234);

        let first = &page.photos[0];
        assert_eq!(first.avg_color, "#7A6E64");
        assert_eq!(first.alt, "Smiling Woman In Yellow Top");
        assert!(first.src.large.ends_with("h=650"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let page: SearchPage = serde_json::from_str(PAGE_JSON).unwrap();
        let second = &page.photos[1];
        assert_eq!(second.alt, "");
        assert_eq!(second.src.medium, "");
    }

    #[test]
    fn test_empty_results_deserialize() {
        let page: SearchPage =
            serde_json::from_str(r#"{"page": 1, "per_page": 80, "total_results": 0, "photos": []}"#)
                .unwrap();
        assert!(page.photos.is_empty());
    }

    #[test]
    fn test_options_skip_unset_filters() {
        let options = SearchOptions::new("test").with_per_page(2);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "query": "test", "per_page": 2 })
        );
    }

    #[test]
    fn test_options_serialize_filters_lowercase() {
        let options = SearchOptions {
            orientation: Some(Orientation::Portrait),
            size: Some(PhotoSize::Medium),
            ..SearchOptions::new("q")
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["orientation"], "portrait");
        assert_eq!(json["size"], "medium");
    }

    #[rstest]
    #[case("landscape", Some(Orientation::Landscape))]
    #[case("Portrait", Some(Orientation::Portrait))]
    #[case("square", Some(Orientation::Square))]
    #[case("round", None)]
    fn test_orientation_parse(#[case] input: &str, #[case] expected: Option<Orientation>) {
        assert_eq!(Orientation::parse(input), expected);
    }

    #[rstest]
    #[case("large", Some(PhotoSize::Large))]
    #[case("MEDIUM", Some(PhotoSize::Medium))]
    #[case("small", Some(PhotoSize::Small))]
    #[case("huge", None)]
    fn test_photo_size_parse(#[case] input: &str, #[case] expected: Option<PhotoSize>) {
        assert_eq!(PhotoSize::parse(input), expected);
    }
}
