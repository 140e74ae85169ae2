//! Vote-transition rules for the rating ledger.
//!
//! Deciding what a like/dislike/remove request does to the stored vote and
//! to the game's counters is pure logic; the route applies the resulting
//! plan inside one transaction so counters and votes cannot drift.

use crate::error::ApiError;

/// A stored vote value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingValue {
    Like,
    Dislike,
}

impl RatingValue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(Self::Like),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// A requested vote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingAction {
    Like,
    Dislike,
    Remove,
}

impl RatingAction {
    pub fn parse(action: &str) -> Result<Self, ApiError> {
        match action {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            "remove" => Ok(Self::Remove),
            _ => Err(ApiError::Validation(
                "Action must be one of like, dislike, remove".to_string(),
            )),
        }
    }
}

/// Ledger write the plan calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteWrite {
    /// Nothing changes (repeat vote or removing a vote that isn't there).
    Keep,
    /// Insert or flip the stored vote to this value.
    Upsert(RatingValue),
    /// Delete the stored vote.
    Delete,
}

/// The ledger write plus the counter adjustments that keep
/// likes/dislikes equal to the vote counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotePlan {
    pub write: VoteWrite,
    pub likes_delta: i32,
    pub dislikes_delta: i32,
}

impl VotePlan {
    pub fn is_noop(&self) -> bool {
        self.write == VoteWrite::Keep
    }

    /// The caller's vote once the plan is applied.
    pub fn resulting_vote(&self, existing: Option<RatingValue>) -> Option<RatingValue> {
        match self.write {
            VoteWrite::Upsert(value) => Some(value),
            VoteWrite::Delete => None,
            VoteWrite::Keep => existing,
        }
    }
}

/// Decide what `action` does given the caller's existing vote.
///
/// Repeating the same vote is an idempotent no-op rather than a toggle.
pub fn plan_vote(existing: Option<RatingValue>, action: RatingAction) -> VotePlan {
    match (existing, action) {
        (Some(RatingValue::Like), RatingAction::Remove) => VotePlan {
            write: VoteWrite::Delete,
            likes_delta: -1,
            dislikes_delta: 0,
        },
        (Some(RatingValue::Dislike), RatingAction::Remove) => VotePlan {
            write: VoteWrite::Delete,
            likes_delta: 0,
            dislikes_delta: -1,
        },
        (None, RatingAction::Remove) => VotePlan {
            write: VoteWrite::Keep,
            likes_delta: 0,
            dislikes_delta: 0,
        },
        (Some(RatingValue::Like), RatingAction::Like)
        | (Some(RatingValue::Dislike), RatingAction::Dislike) => VotePlan {
            write: VoteWrite::Keep,
            likes_delta: 0,
            dislikes_delta: 0,
        },
        (Some(RatingValue::Dislike), RatingAction::Like) => VotePlan {
            write: VoteWrite::Upsert(RatingValue::Like),
            likes_delta: 1,
            dislikes_delta: -1,
        },
        (Some(RatingValue::Like), RatingAction::Dislike) => VotePlan {
            write: VoteWrite::Upsert(RatingValue::Dislike),
            likes_delta: -1,
            dislikes_delta: 1,
        },
        (None, RatingAction::Like) => VotePlan {
            write: VoteWrite::Upsert(RatingValue::Like),
            likes_delta: 1,
            dislikes_delta: 0,
        },
        (None, RatingAction::Dislike) => VotePlan {
            write: VoteWrite::Upsert(RatingValue::Dislike),
            likes_delta: 0,
            dislikes_delta: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(RatingAction::parse("like").unwrap(), RatingAction::Like);
        assert_eq!(
            RatingAction::parse("dislike").unwrap(),
            RatingAction::Dislike
        );
        assert_eq!(RatingAction::parse("remove").unwrap(), RatingAction::Remove);
        assert!(RatingAction::parse("love").is_err());
        assert!(RatingAction::parse("").is_err());
        assert!(RatingAction::parse("Like").is_err());
    }

    #[test]
    fn test_first_vote_increments_one_counter() {
        let plan = plan_vote(None, RatingAction::Like);
        assert_eq!(plan.write, VoteWrite::Upsert(RatingValue::Like));
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (1, 0));
        assert_eq!(plan.resulting_vote(None), Some(RatingValue::Like));

        let plan = plan_vote(None, RatingAction::Dislike);
        assert_eq!(plan.write, VoteWrite::Upsert(RatingValue::Dislike));
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (0, 1));
    }

    #[test]
    fn test_repeat_vote_is_idempotent() {
        let plan = plan_vote(Some(RatingValue::Like), RatingAction::Like);
        assert!(plan.is_noop());
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (0, 0));
        assert_eq!(
            plan.resulting_vote(Some(RatingValue::Like)),
            Some(RatingValue::Like)
        );

        let plan = plan_vote(Some(RatingValue::Dislike), RatingAction::Dislike);
        assert!(plan.is_noop());
    }

    #[test]
    fn test_changed_vote_moves_one_count_across() {
        // like -> dislike: likes-1, dislikes+1, one vote remains
        let plan = plan_vote(Some(RatingValue::Like), RatingAction::Dislike);
        assert_eq!(plan.write, VoteWrite::Upsert(RatingValue::Dislike));
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (-1, 1));
        assert_eq!(
            plan.resulting_vote(Some(RatingValue::Like)),
            Some(RatingValue::Dislike)
        );

        let plan = plan_vote(Some(RatingValue::Dislike), RatingAction::Like);
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (1, -1));
    }

    #[test]
    fn test_remove_deletes_and_decrements() {
        let plan = plan_vote(Some(RatingValue::Like), RatingAction::Remove);
        assert_eq!(plan.write, VoteWrite::Delete);
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (-1, 0));
        assert_eq!(plan.resulting_vote(Some(RatingValue::Like)), None);

        let plan = plan_vote(Some(RatingValue::Dislike), RatingAction::Remove);
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (0, -1));
    }

    #[test]
    fn test_remove_without_vote_is_noop() {
        let plan = plan_vote(None, RatingAction::Remove);
        assert!(plan.is_noop());
        assert_eq!((plan.likes_delta, plan.dislikes_delta), (0, 0));
        assert_eq!(plan.resulting_vote(None), None);
    }

    #[test]
    fn test_like_then_remove_round_trips() {
        // Counters return to the pre-vote value and no vote remains
        let first = plan_vote(None, RatingAction::Like);
        let vote = first.resulting_vote(None);
        let second = plan_vote(vote, RatingAction::Remove);

        assert_eq!(first.likes_delta + second.likes_delta, 0);
        assert_eq!(first.dislikes_delta + second.dislikes_delta, 0);
        assert_eq!(second.resulting_vote(vote), None);
    }
}
