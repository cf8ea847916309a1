use std::sync::Mutex;

use serde::Serialize;
use vine_shared::format::format_count;
use vine_shared::UserId;
use vine_store::{FeedError, User};

use super::feed::VideoCardDto;
use super::lock;
use crate::error::CommandError;
use crate::events::{emit_event, FollowChangedPayload, EVENT_FOLLOW_CHANGED};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub avatar_url: String,
    pub bio: String,
    pub verified: bool,
    pub followers: u64,
    pub followers_label: String,
    pub following_count: usize,
}

impl From<&User> for UserDto {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            handle: u.handle.clone(),
            display_name: u.display_name.clone(),
            avatar_url: u.avatar_url.clone(),
            bio: u.bio.clone(),
            verified: u.verified,
            followers: u.followers,
            followers_label: format_count(u.followers),
            following_count: u.following.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub user: UserDto,
    pub videos: Vec<VideoCardDto>,
    /// Only present on the viewer's own profile.
    pub liked_videos: Option<Vec<VideoCardDto>>,
    pub is_following: bool,
    pub is_own_profile: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowDto {
    pub following: bool,
    pub followers: u64,
    pub followers_label: String,
}

pub fn get_profile(state: &Mutex<AppState>, user_id: UserId) -> Result<ProfileDto, CommandError> {
    let guard = lock(state)?;
    let viewer = guard.require_user()?;
    let engine = &guard.engine;
    let store = engine.store();

    let user = store
        .find_user(user_id)
        .ok_or(FeedError::UserNotFound(user_id))?;
    let cards = |videos: Vec<vine_store::Video>| -> Vec<VideoCardDto> {
        videos
            .iter()
            .map(|v| VideoCardDto::build(v, store, Some(viewer)))
            .collect()
    };

    let is_own_profile = viewer == user_id;
    Ok(ProfileDto {
        user: UserDto::from(user),
        videos: cards(engine.videos_by_user(user_id)),
        liked_videos: is_own_profile.then(|| cards(engine.liked_videos_by_user(user_id))),
        is_following: engine.is_following(viewer, user_id),
        is_own_profile,
    })
}

pub fn follow_user(state: &Mutex<AppState>, target_id: UserId) -> Result<FollowDto, CommandError> {
    let mut guard = lock(state)?;
    let viewer = guard.require_user()?;

    let outcome = guard.engine.follow_toggle(viewer, target_id)?;

    emit_event(
        guard.events.as_ref(),
        EVENT_FOLLOW_CHANGED,
        FollowChangedPayload {
            follower_id: viewer.to_string(),
            target_id: target_id.to_string(),
            following: outcome.following,
            followers: outcome.target_followers,
        },
    );
    Ok(FollowDto {
        following: outcome.following,
        followers: outcome.target_followers,
        followers_label: format_count(outcome.target_followers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::seeded_state;
    use vine_store::seed::{ALEX, MIKE, SARAH};

    fn signed_in_as(user: UserId) -> Mutex<AppState> {
        let (mut state, _) = seeded_state();
        state.sign_in(user).unwrap();
        Mutex::new(state)
    }

    #[test]
    fn own_profile_includes_liked_tab() {
        let state = signed_in_as(MIKE);
        let profile = get_profile(&state, MIKE).unwrap();
        assert!(profile.is_own_profile);
        assert_eq!(profile.videos.len(), 1);
        assert_eq!(profile.liked_videos.map(|v| v.len()), Some(3));
    }

    #[test]
    fn other_profile_hides_liked_tab() {
        let state = signed_in_as(MIKE);
        let profile = get_profile(&state, SARAH).unwrap();
        assert!(!profile.is_own_profile);
        assert!(profile.liked_videos.is_none());
        assert_eq!(profile.user.followers_label, "12.5K");
        assert_eq!(profile.videos.len(), 2);
    }

    #[test]
    fn follow_is_visible_in_profile() {
        let state = signed_in_as(MIKE);
        let dto = follow_user(&state, ALEX).unwrap();
        assert!(dto.following);
        assert_eq!(dto.followers, 15_601);

        let profile = get_profile(&state, ALEX).unwrap();
        assert!(profile.is_following);
        assert_eq!(profile.user.followers, 15_601);
    }

    #[test]
    fn self_follow_is_a_validation_error() {
        let state = signed_in_as(MIKE);
        assert_eq!(follow_user(&state, MIKE).unwrap_err().kind(), "validation");
    }

    #[test]
    fn unknown_profile_is_not_found() {
        let state = signed_in_as(MIKE);
        assert_eq!(
            get_profile(&state, UserId::new()).unwrap_err().kind(),
            "notFound"
        );
    }
}
