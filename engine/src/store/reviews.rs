use six_cities_types::Review;

use super::action::{Action, ReviewsAction};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewsState {
    pub reviews: Vec<Review>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_posting: bool,
    pub post_error: Option<String>,
}

pub fn reduce(state: ReviewsState, action: &Action) -> ReviewsState {
    let Action::Reviews(action) = action else {
        return state;
    };

    match action {
        ReviewsAction::LoadReviewsStart => ReviewsState {
            is_loading: true,
            ..state
        },
        ReviewsAction::LoadReviewsSuccess { reviews, .. } => ReviewsState {
            reviews: reviews.clone(),
            is_loading: false,
            error: None,
            ..state
        },
        ReviewsAction::LoadReviewsFailure(message) => ReviewsState {
            reviews: Vec::new(),
            is_loading: false,
            error: Some(message.clone()),
            ..state
        },
        ReviewsAction::PostReviewStart => ReviewsState {
            is_posting: true,
            post_error: None,
            ..state
        },
        ReviewsAction::PostReviewSuccess(review) => {
            let mut reviews = state.reviews;
            reviews.push(review.clone());
            ReviewsState {
                reviews,
                is_posting: false,
                post_error: None,
                ..state
            }
        }
        ReviewsAction::PostReviewFailure(message) => ReviewsState {
            is_posting: false,
            post_error: Some(message.clone()),
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::action::AuthAction;
    use crate::store::fixtures::review;

    fn initial_state() -> ReviewsState {
        ReviewsState {
            reviews: vec![],
            is_loading: false,
            error: None,
            is_posting: false,
            post_error: None,
        }
    }

    #[test]
    fn default_matches_initial_state() {
        assert_eq!(ReviewsState::default(), initial_state());
    }

    #[test]
    fn returns_initial_state_for_unrelated_action() {
        let action = Action::Auth(AuthAction::SetUserEmail(None));
        assert_eq!(reduce(ReviewsState::default(), &action), initial_state());
    }

    #[test]
    fn load_reviews_start_sets_loading() {
        let action = Action::Reviews(ReviewsAction::LoadReviewsStart);

        let state = reduce(initial_state(), &action);

        assert_eq!(
            state,
            ReviewsState {
                reviews: vec![],
                is_loading: true,
                error: None,
                ..initial_state()
            }
        );
    }

    #[test]
    fn load_reviews_start_keeps_existing_reviews_and_error() {
        let before = ReviewsState {
            reviews: vec![review("1", "2024-01-01T10:00:00.000Z")],
            error: Some("old".to_string()),
            ..initial_state()
        };

        let state = reduce(before.clone(), &Action::Reviews(ReviewsAction::LoadReviewsStart));

        assert!(state.is_loading);
        assert_eq!(state.reviews, before.reviews);
        assert_eq!(state.error, before.error);
    }

    #[test]
    fn load_reviews_success_replaces_reviews() {
        let mock_reviews = vec![
            review("1", "2024-01-01T10:00:00.000Z"),
            review("2", "2024-01-01T10:00:00.000Z"),
        ];
        let action = Action::Reviews(ReviewsAction::LoadReviewsSuccess {
            offer_id: "1".into(),
            reviews: mock_reviews.clone(),
        });

        let state = reduce(
            ReviewsState {
                is_loading: true,
                ..initial_state()
            },
            &action,
        );

        assert_eq!(
            state,
            ReviewsState {
                reviews: mock_reviews,
                is_loading: false,
                error: None,
                ..initial_state()
            }
        );
    }

    #[test]
    fn load_reviews_failure_clears_reviews_and_records_error() {
        let action = Action::Reviews(ReviewsAction::LoadReviewsFailure(
            "Error happened".to_string(),
        ));

        let state = reduce(
            ReviewsState {
                is_loading: true,
                reviews: vec![review("1", "2024-01-01T10:00:00.000Z")],
                ..initial_state()
            },
            &action,
        );

        assert_eq!(
            state,
            ReviewsState {
                reviews: vec![],
                is_loading: false,
                error: Some("Error happened".to_string()),
                ..initial_state()
            }
        );
    }

    #[test]
    fn post_review_cycle() {
        let posting = reduce(initial_state(), &Action::Reviews(ReviewsAction::PostReviewStart));
        assert!(posting.is_posting);

        let failed = reduce(
            posting.clone(),
            &Action::Reviews(ReviewsAction::PostReviewFailure("400".to_string())),
        );
        assert!(!failed.is_posting);
        assert_eq!(failed.post_error.as_deref(), Some("400"));
        assert!(failed.reviews.is_empty());

        let retry = reduce(failed, &Action::Reviews(ReviewsAction::PostReviewStart));
        assert_eq!(retry.post_error, None);

        let new_review = review("9", "2024-02-02T10:00:00.000Z");
        let done = reduce(
            retry,
            &Action::Reviews(ReviewsAction::PostReviewSuccess(new_review.clone())),
        );
        assert!(!done.is_posting);
        assert_eq!(done.reviews, vec![new_review]);
    }
}
