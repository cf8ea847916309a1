//! Demo working set loaded at startup when seeding is enabled.
//!
//! The like and follower counters here pre-date their membership sets, the
//! way imported data would: Sarah has 12.5K followers but nobody in the
//! session follows her yet.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vine_shared::constants::CLIP_DURATION_SECS;
use vine_shared::{CommentId, UserId, VideoId};

use crate::models::{Comment, User, Video};

pub const SARAH: UserId = UserId(Uuid::from_u128(0x01));
pub const MIKE: UserId = UserId(Uuid::from_u128(0x02));
pub const ALEX: UserId = UserId(Uuid::from_u128(0x03));

pub const CLOSURES_VIDEO: VideoId = VideoId(Uuid::from_u128(0x1_0001));
pub const PASTA_VIDEO: VideoId = VideoId(Uuid::from_u128(0x1_0002));
pub const DRAWING_VIDEO: VideoId = VideoId(Uuid::from_u128(0x1_0003));
pub const CAT_VIDEO: VideoId = VideoId(Uuid::from_u128(0x1_0004));

const SAMPLE_1MB: &str = "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_1mb.mp4";
const SAMPLE_2MB: &str = "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_2mb.mp4";
const SAMPLE_5MB: &str = "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_5mb.mp4";

pub fn demo_users() -> Vec<User> {
    vec![
        user(
            SARAH,
            "sarah_vines",
            "Sarah Johnson",
            "sarah@example.com",
            "photo-1494790108755-2616b96cf6f4",
            "Creating 6-second magic ✨ | Comedy & Lifestyle",
            12_500,
            true,
        ),
        user(
            MIKE,
            "mike_comedy",
            "Mike Chen",
            "mike@example.com",
            "photo-1507003211169-0a1dd7228f2d",
            "Professional goofball 🤪 | Daily laughs",
            8_200,
            false,
        ),
        user(
            ALEX,
            "alex_art",
            "Alex Rivera",
            "alex@example.com",
            "photo-1472099645785-5658abf4ff4e",
            "Artist & Creator | Time-lapse magic",
            15_600,
            true,
        ),
    ]
}

pub fn demo_videos() -> Vec<Video> {
    vec![
        Video {
            id: CLOSURES_VIDEO,
            author_id: SARAH,
            title: "When you finally understand JavaScript closures".into(),
            description: "That moment when it all clicks! 🤯".into(),
            media_url: SAMPLE_1MB.into(),
            thumbnail_url: thumbnail("photo-1517180102446-f3ece451e9d8"),
            duration_secs: CLIP_DURATION_SECS,
            tags: tags(&["coding", "javascript", "learning"]),
            likes: 1_245,
            liked_by: BTreeSet::from([MIKE, ALEX]),
            comments: vec![
                comment(1, MIKE, "This is so relatable! 😂", "2024-01-15T10:30:00Z"),
                comment(2, ALEX, "Finally someone explained it right!", "2024-01-15T11:15:00Z"),
            ],
            created_at: at("2024-01-15T09:00:00Z"),
        },
        Video {
            id: PASTA_VIDEO,
            author_id: MIKE,
            title: "Cooking hack that changed my life".into(),
            description: "You will never cook pasta the same way again! 🍝".into(),
            media_url: SAMPLE_2MB.into(),
            thumbnail_url: thumbnail("photo-1565299624946-b28f40a0ca4b"),
            duration_secs: CLIP_DURATION_SECS,
            tags: tags(&["cooking", "lifehack", "food"]),
            likes: 892,
            liked_by: BTreeSet::from([SARAH]),
            comments: vec![comment(
                3,
                SARAH,
                "Mind blown! Trying this tonight 🤩",
                "2024-01-14T14:20:00Z",
            )],
            created_at: at("2024-01-14T13:45:00Z"),
        },
        Video {
            id: DRAWING_VIDEO,
            author_id: ALEX,
            title: "Drawing a masterpiece in 6 seconds".into(),
            description: "Speed art challenge - realistic eye drawing ✏️".into(),
            media_url: SAMPLE_5MB.into(),
            thumbnail_url: thumbnail("photo-1541961017774-22349e4a1262"),
            duration_secs: CLIP_DURATION_SECS,
            tags: tags(&["art", "drawing", "timelapse"]),
            likes: 2_134,
            liked_by: BTreeSet::from([SARAH, MIKE]),
            comments: vec![
                comment(4, MIKE, "How is this even possible?! 😱", "2024-01-13T16:10:00Z"),
                comment(5, SARAH, "Talent level: Universe 🌟", "2024-01-13T16:45:00Z"),
            ],
            created_at: at("2024-01-13T15:30:00Z"),
        },
        Video {
            id: CAT_VIDEO,
            author_id: SARAH,
            title: "My cat thinks hes a dog".into(),
            description: "Plot twist: he might actually be one 🐱🐕".into(),
            media_url: SAMPLE_1MB.into(),
            thumbnail_url: thumbnail("photo-1514888286974-6c03e2ca1dba"),
            duration_secs: CLIP_DURATION_SECS,
            tags: tags(&["pets", "funny", "cats"]),
            likes: 3_456,
            liked_by: BTreeSet::from([MIKE, ALEX]),
            comments: vec![comment(
                6,
                ALEX,
                "That tail wag though! 😄",
                "2024-01-12T12:00:00Z",
            )],
            created_at: at("2024-01-12T11:20:00Z"),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: UserId,
    handle: &str,
    display_name: &str,
    email: &str,
    photo: &str,
    bio: &str,
    followers: u64,
    verified: bool,
) -> User {
    User {
        id,
        handle: handle.into(),
        display_name: display_name.into(),
        email: email.into(),
        avatar_url: format!(
            "https://images.unsplash.com/{photo}?w=150&h=150&fit=crop&crop=face"
        ),
        verified,
        followers,
        following: BTreeSet::new(),
        bio: bio.into(),
    }
}

fn comment(n: u128, author_id: UserId, text: &str, ts: &str) -> Comment {
    Comment {
        id: CommentId(Uuid::from_u128(0x2_0000 + n)),
        author_id,
        text: text.into(),
        created_at: at(ts),
    }
}

fn thumbnail(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=400&h=600&fit=crop")
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

// Literals below are all well-formed; the epoch fallback never triggers.
fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
