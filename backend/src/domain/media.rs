//! Media attachments on posts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{MediaId, PostId};

/// Maximum length of a media URL (`VARCHAR(255)`).
pub const MEDIA_URL_MAX: usize = 255;

/// Validation errors for media values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaValidationError {
    UnknownType { value: String },
    EmptyUrl,
    UrlTooLong { max: usize },
}

impl fmt::Display for MediaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { value } => write!(
                f,
                "media type must be one of image, video, or audio (got {value:?})"
            ),
            Self::EmptyUrl => write!(f, "media url must not be empty"),
            Self::UrlTooLong { max } => write!(f, "media url must be at most {max} characters"),
        }
    }
}

impl std::error::Error for MediaValidationError {}

/// Closed set of media kinds, persisted as the literal strings
/// `"image"`, `"video"`, and `"audio"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
}

impl MediaType {
    /// Every representable kind.
    pub const ALL: [Self; 3] = [Self::Image, Self::Video, Self::Audio];

    /// The persisted literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = MediaValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            other => Err(MediaValidationError::UnknownType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Location of the media payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaUrl(String);

impl MediaUrl {
    /// Validate and construct a [`MediaUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, MediaValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(MediaValidationError::EmptyUrl);
        }
        if value.chars().count() > MEDIA_URL_MAX {
            return Err(MediaValidationError::UrlTooLong { max: MEDIA_URL_MAX });
        }
        Ok(Self(value))
    }

    /// Borrow the URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MediaUrl> for String {
    fn from(value: MediaUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for MediaUrl {
    type Error = MediaValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A media item that exists only as part of one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    #[serde(rename = "type")]
    pub kind: MediaType,
    pub url: MediaUrl,
    pub post_id: PostId,
}

/// Values required to insert a media row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub kind: MediaType,
    pub url: MediaUrl,
    pub post_id: PostId,
}

impl NewMedia {
    /// Draft a media item for `post_id`.
    #[must_use]
    pub fn new(post_id: PostId, kind: MediaType, url: MediaUrl) -> Self {
        Self { kind, url, post_id }
    }
}

impl Media {
    /// Combine an assigned identifier with the inserted values.
    #[must_use]
    pub fn from_new(id: MediaId, new_media: NewMedia) -> Self {
        Self {
            id,
            kind: new_media.kind,
            url: new_media.url,
            post_id: new_media.post_id,
        }
    }
}
