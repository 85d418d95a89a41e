use std::sync::Arc;

use chrono::Duration;

use magicbank_visits::domain::repository::AccessCodeStore;
use magicbank_visits::error::VisitServiceError;
use magicbank_visits::usecase::visit::{RedeemVisitInput, RedeemVisitUseCase};

use crate::helpers::{TEST_FEEDBACK_URL, manual_store, test_settings};

fn redeem(code: &str) -> RedeemVisitInput {
    RedeemVisitInput {
        code: code.to_owned(),
    }
}

#[test]
fn should_return_remaining_time_and_feedback_target() {
    let (store, clock) = manual_store();
    let code = store.issue("Ana", "ana@example.com", Duration::minutes(5));
    let uc = RedeemVisitUseCase {
        codes: Arc::clone(&store),
        settings: test_settings(5),
    };

    clock.advance(Duration::minutes(2));
    let visit = uc.execute(redeem(&code)).unwrap();
    assert_eq!(visit.remaining, Duration::minutes(3));
    assert_eq!(visit.feedback_url, TEST_FEEDBACK_URL);
}

#[test]
fn should_reject_unknown_code() {
    let (store, _clock) = manual_store();
    let uc = RedeemVisitUseCase {
        codes: store,
        settings: test_settings(5),
    };

    let result = uc.execute(redeem("NONEXISTENT"));
    assert!(
        matches!(result, Err(VisitServiceError::InvalidCode)),
        "expected InvalidCode, got {result:?}"
    );
}

#[test]
fn should_follow_the_five_minute_scenario() {
    let (store, clock) = manual_store();
    let code = store.issue("Ana", "ana@example.com", Duration::minutes(5));
    let uc = RedeemVisitUseCase {
        codes: Arc::clone(&store),
        settings: test_settings(5),
    };

    clock.advance(Duration::minutes(2));
    assert_eq!(uc.execute(redeem(&code)).unwrap().remaining, Duration::minutes(3));

    clock.advance(Duration::minutes(4));
    assert!(matches!(
        uc.execute(redeem(&code)),
        Err(VisitServiceError::InvalidCode)
    ));
    assert!(!store.contains(&code), "expired code should be removed");

    clock.advance(Duration::minutes(1));
    assert!(matches!(
        uc.execute(redeem(&code)),
        Err(VisitServiceError::InvalidCode)
    ));
}

#[test]
fn should_reject_just_after_expiry_and_keep_rejecting() {
    let (store, clock) = manual_store();
    let code = store.issue("Ana", "ana@example.com", Duration::minutes(5));
    let uc = RedeemVisitUseCase {
        codes: Arc::clone(&store),
        settings: test_settings(5),
    };

    clock.advance(Duration::minutes(5) + Duration::milliseconds(1));
    assert!(matches!(
        uc.execute(redeem(&code)),
        Err(VisitServiceError::InvalidCode)
    ));
    assert!(matches!(
        uc.execute(redeem(&code)),
        Err(VisitServiceError::InvalidCode)
    ));
}

#[test]
fn should_count_down_without_consuming_the_code() {
    let (store, clock) = manual_store();
    let code = store.issue("Ana", "ana@example.com", Duration::minutes(5));
    let uc = RedeemVisitUseCase {
        codes: Arc::clone(&store),
        settings: test_settings(5),
    };

    let mut last = Duration::minutes(5);
    for _ in 0..10 {
        let remaining = uc.execute(redeem(&code)).unwrap().remaining;
        assert!(remaining <= last, "remaining time must not increase");
        last = remaining;
        clock.advance(Duration::seconds(20));
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn should_match_code_exactly() {
    let (store, _clock) = manual_store();
    let code = store.issue("Ana", "ana@example.com", Duration::minutes(5));
    let uc = RedeemVisitUseCase {
        codes: store,
        settings: test_settings(5),
    };

    let result = uc.execute(redeem(&code.to_lowercase()));
    // Only digits would survive lowercasing unchanged.
    if code.chars().any(|c| c.is_ascii_alphabetic()) {
        assert!(matches!(result, Err(VisitServiceError::InvalidCode)));
    }
    assert!(uc.execute(redeem(&format!(" {code}"))).is_err());
}
