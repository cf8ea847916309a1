use tracing::info;
use vine_shared::{UserId, VideoId};

use super::FeedEngine;
use crate::error::Result;
use crate::models::Video;

impl FeedEngine {
    /// Flip `user_id`'s like on `video_id` and return the updated video.
    ///
    /// The counter moves with the set in the same write. It never goes
    /// below zero: if seed data left it at zero while a like is being
    /// removed, only the membership changes.
    pub fn like_toggle(&mut self, video_id: VideoId, user_id: UserId) -> Result<Video> {
        let idx = self.require_video(video_id)?;
        self.require_user(user_id)?;

        let video = &mut self.store.videos_mut()[idx];
        let liked = if video.liked_by.remove(&user_id) {
            video.likes = video.likes.saturating_sub(1);
            false
        } else {
            video.liked_by.insert(user_id);
            video.likes += 1;
            true
        };

        info!(video = %video_id, user = %user_id, liked, likes = video.likes, "like toggled");
        Ok(video.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::seeded_engine;
    use crate::seed::{ALEX, CAT_VIDEO, CLOSURES_VIDEO, SARAH};
    use crate::FeedError;
    use vine_shared::{UserId, VideoId};

    #[test]
    fn like_then_unlike_restores_state() {
        let mut engine = seeded_engine();
        let before = engine.store().find_video(CLOSURES_VIDEO).unwrap().clone();

        let liked = engine.like_toggle(CLOSURES_VIDEO, SARAH).unwrap();
        assert!(liked.is_liked_by(SARAH));
        assert_eq!(liked.likes, before.likes + 1);

        let unliked = engine.like_toggle(CLOSURES_VIDEO, SARAH).unwrap();
        assert_eq!(unliked.likes, before.likes);
        assert_eq!(unliked.liked_by, before.liked_by);
    }

    #[test]
    fn even_number_of_toggles_is_identity() {
        let mut engine = seeded_engine();
        let before = engine.store().find_video(CAT_VIDEO).unwrap().clone();
        for _ in 0..6 {
            engine.like_toggle(CAT_VIDEO, ALEX).unwrap();
        }
        assert_eq!(engine.store().find_video(CAT_VIDEO).unwrap(), &before);
    }

    #[test]
    fn unlike_at_zero_floors_counter() {
        let mut engine = seeded_engine();
        engine.store.videos_mut()[0].likes = 0;

        // ALEX is in liked_by for the first seed video but the count says 0.
        let video = engine.like_toggle(CLOSURES_VIDEO, ALEX).unwrap();
        assert_eq!(video.likes, 0);
        assert!(!video.is_liked_by(ALEX));

        let video = engine.like_toggle(CLOSURES_VIDEO, ALEX).unwrap();
        assert_eq!(video.likes, 1);
        assert!(video.is_liked_by(ALEX));
    }

    #[test]
    fn unknown_ids_are_not_found_and_change_nothing() {
        let mut engine = seeded_engine();
        let before = engine.store().videos();

        let ghost_video = VideoId::new();
        assert_eq!(
            engine.like_toggle(ghost_video, SARAH).unwrap_err(),
            FeedError::VideoNotFound(ghost_video)
        );
        let ghost_user = UserId::new();
        assert_eq!(
            engine.like_toggle(CLOSURES_VIDEO, ghost_user).unwrap_err(),
            FeedError::UserNotFound(ghost_user)
        );
        assert_eq!(*engine.store().videos(), *before);
    }
}
