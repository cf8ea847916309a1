/// Application name
pub const APP_NAME: &str = "Vine";

/// Clip length in seconds. Stored on every video, never assumed by readers.
pub const CLIP_DURATION_SECS: u32 = 6;

/// Title given to a published video whose draft left it blank
pub const DEFAULT_VIDEO_TITLE: &str = "Untitled Video";

/// Thumbnail used when the upload did not provide one
pub const DEFAULT_THUMBNAIL_URL: &str =
    "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400&h=600&fit=crop";

/// Avatar assigned at registration
pub const DEFAULT_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=150&h=150&fit=crop&crop=face";

/// Bio assigned at registration
pub const DEFAULT_BIO: &str = "New to Vine! 🌱";

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// MIME prefix an upload must carry to be accepted as a clip
pub const VIDEO_MIME_PREFIX: &str = "video/";

/// Default viewport height used by the scroll resolver, in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;
