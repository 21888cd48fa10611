use serde::Deserialize;

/// Every Plex JSON response wraps its payload in a `MediaContainer` object.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub container: T,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MetadataContainer {
    #[serde(default, rename = "Metadata")]
    pub metadata: Vec<MediaItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SectionsContainer {
    #[serde(default, rename = "Directory")]
    pub directories: Vec<LibrarySection>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PostersContainer {
    #[serde(default, rename = "Metadata")]
    pub posters: Vec<PosterCandidate>,
}

/// A movie or episode entry in a Plex library.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,

    #[serde(default)]
    pub title: String,

    /// Metadata fields the server has flagged, including per-field locks.
    #[serde(default, rename = "Field")]
    pub fields: Vec<MetadataField>,
}

impl MediaItem {
    /// True when the poster (`thumb`) field is locked against automated edits.
    pub fn poster_locked(&self) -> bool {
        self.fields.iter().any(|f| f.name == "thumb" && f.locked)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataField {
    pub name: String,

    #[serde(default)]
    pub locked: bool,
}

/// A library section directory entry.
#[derive(Debug, Clone, Deserialize)]
pub struct LibrarySection {
    pub key: String,
    pub title: String,
}

/// One available poster image for an item.
#[derive(Debug, Clone, Deserialize)]
pub struct PosterCandidate {
    /// Candidate key, passed back verbatim to the select endpoint.
    #[serde(rename = "ratingKey")]
    pub rating_key: String,

    /// Source provider label, e.g. "tmdb" or "gracenote". Absent for
    /// locally uploaded artwork.
    #[serde(default)]
    pub provider: Option<String>,

    /// Whether this candidate is the poster currently in effect.
    #[serde(default)]
    pub selected: bool,
}

impl PosterCandidate {
    pub fn provider_label(&self) -> &str {
        self.provider.as_deref().unwrap_or("unknown")
    }
}
