use tracing::info;
use vine_shared::{UserId, ValidationError};

use super::FeedEngine;
use crate::error::Result;
use crate::models::FollowOutcome;

impl FeedEngine {
    /// Flip whether `follower_id` follows `target_id`.
    ///
    /// The follower's `following` set and the target's `followers` counter
    /// change in the same write. The counter floors at zero.
    pub fn follow_toggle(
        &mut self,
        follower_id: UserId,
        target_id: UserId,
    ) -> Result<FollowOutcome> {
        if follower_id == target_id {
            return Err(ValidationError::SelfFollow.into());
        }
        let follower_idx = self.require_user(follower_id)?;
        let target_idx = self.require_user(target_id)?;

        let users = self.store.users_mut();

        let follower = &mut users[follower_idx];
        let following = if follower.following.remove(&target_id) {
            false
        } else {
            follower.following.insert(target_id);
            true
        };

        let target = &mut users[target_idx];
        if following {
            target.followers += 1;
        } else {
            target.followers = target.followers.saturating_sub(1);
        }

        let outcome = FollowOutcome {
            following,
            target_followers: target.followers,
        };
        info!(
            follower = %follower_id,
            target = %target_id,
            following,
            followers = outcome.target_followers,
            "follow toggled"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::seeded_engine;
    use crate::seed::{ALEX, MIKE, SARAH};
    use crate::FeedError;
    use vine_shared::{UserId, ValidationError};

    fn followers(engine: &crate::FeedEngine, id: UserId) -> u64 {
        engine.store().find_user(id).unwrap().followers
    }

    #[test]
    fn follow_updates_both_sides() {
        let mut engine = seeded_engine();
        let before = followers(&engine, ALEX);

        let outcome = engine.follow_toggle(MIKE, ALEX).unwrap();
        assert!(outcome.following);
        assert_eq!(outcome.target_followers, before + 1);
        assert_eq!(followers(&engine, ALEX), before + 1);
        assert!(engine.is_following(MIKE, ALEX));
        assert!(!engine.is_following(ALEX, MIKE));
    }

    #[test]
    fn unfollow_reverses_both_sides() {
        let mut engine = seeded_engine();
        let before = followers(&engine, SARAH);

        engine.follow_toggle(ALEX, SARAH).unwrap();
        let outcome = engine.follow_toggle(ALEX, SARAH).unwrap();
        assert!(!outcome.following);
        assert_eq!(outcome.target_followers, before);
        assert!(!engine.is_following(ALEX, SARAH));
    }

    #[test]
    fn unfollow_floors_at_zero() {
        let mut engine = seeded_engine();
        engine.follow_toggle(MIKE, SARAH).unwrap();
        let idx = engine.store.user_index(SARAH).unwrap();
        engine.store.users_mut()[idx].followers = 0;

        let outcome = engine.follow_toggle(MIKE, SARAH).unwrap();
        assert!(!outcome.following);
        assert_eq!(outcome.target_followers, 0);
    }

    #[test]
    fn self_follow_is_rejected_without_change() {
        let mut engine = seeded_engine();
        let before = engine.store().users();

        assert_eq!(
            engine.follow_toggle(SARAH, SARAH).unwrap_err(),
            FeedError::Validation(ValidationError::SelfFollow)
        );
        assert_eq!(*engine.store().users(), *before);
    }

    #[test]
    fn unknown_target_is_not_found_without_change() {
        let mut engine = seeded_engine();
        let before = engine.store().users();
        let ghost = UserId::new();

        assert_eq!(
            engine.follow_toggle(SARAH, ghost).unwrap_err(),
            FeedError::UserNotFound(ghost)
        );
        assert_eq!(*engine.store().users(), *before);
        assert!(!engine.is_following(SARAH, ghost));
    }
}
