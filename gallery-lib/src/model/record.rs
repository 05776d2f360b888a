//! Browsable record

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Placeholder shown for display fields the source did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Stable unique identifier of a [`Record`].
///
/// Identity is the only key used for selection membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Returns the raw identifier value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single record returned by a page source.
///
/// The display fields are all optional; a missing field renders as
/// [`NOT_AVAILABLE`] rather than being omitted.
///
/// The serde names follow the wire format of the artworks API
/// (`artist_display`, `place_of_origin`); unknown fields are ignored.
///
/// # Example
///
/// ```
/// use gallery_lib::model::Record;
///
/// let record = Record::new(7).with_title("Nighthawks");
///
/// assert_eq!(record.id().get(), 7);
/// assert_eq!(record.title_or_placeholder(), "Nighthawks");
/// assert_eq!(record.origin_or_placeholder(), "N/A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub(crate) id: RecordId,

    #[serde(default)]
    pub(crate) title: Option<String>,

    #[serde(default, rename = "artist_display")]
    pub(crate) attribution: Option<String>,

    #[serde(default, rename = "place_of_origin")]
    pub(crate) origin: Option<String>,
}

impl Record {
    /// Creates a record with the given id and no display fields.
    pub fn new(id: u64) -> Self {
        Self {
            id: RecordId(id),
            title: None,
            attribution: None,
            origin: None,
        }
    }

    /// Sets the title (builder pattern).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the attribution (builder pattern).
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// Sets the origin (builder pattern).
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Returns the record id.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the title, if present.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the attribution (artist display line), if present.
    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    /// Returns the place of origin, if present.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns the title or [`NOT_AVAILABLE`].
    pub fn title_or_placeholder(&self) -> &str {
        self.title().unwrap_or(NOT_AVAILABLE)
    }

    /// Returns the attribution or [`NOT_AVAILABLE`].
    pub fn attribution_or_placeholder(&self) -> &str {
        self.attribution().unwrap_or(NOT_AVAILABLE)
    }

    /// Returns the origin or [`NOT_AVAILABLE`].
    pub fn origin_or_placeholder(&self) -> &str {
        self.origin().unwrap_or(NOT_AVAILABLE)
    }
}
