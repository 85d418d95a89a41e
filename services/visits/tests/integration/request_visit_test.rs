use std::sync::Arc;

use chrono::Duration;

use magicbank_visits::domain::types::ACCESS_CODE_LEN;
use magicbank_visits::error::VisitServiceError;
use magicbank_visits::usecase::visit::{
    RedeemVisitInput, RedeemVisitUseCase, RequestVisitInput, RequestVisitUseCase,
};

use crate::helpers::{RecordingNotifier, TEST_ACCESS_URL, manual_store, test_settings};

fn input(name: &str, email: &str) -> RequestVisitInput {
    RequestVisitInput {
        name: name.to_owned(),
        email: email.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_code_and_notify_visitor() {
    let (store, _clock) = manual_store();
    let notifier = RecordingNotifier::ok();
    let sent = notifier.sent_handle();

    let uc = RequestVisitUseCase {
        codes: Arc::clone(&store),
        notifier,
        settings: test_settings(5),
    };
    uc.execute(input("Ana", "ana@example.com")).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1, "expected exactly one notification");
    let (recipient, notification) = &sent[0];
    assert_eq!(recipient, "ana@example.com");
    assert_eq!(notification.name, "Ana");
    assert_eq!(notification.access_url, TEST_ACCESS_URL);
    assert_eq!(notification.duration_minutes, 5);
    assert_eq!(notification.code.len(), ACCESS_CODE_LEN);
    assert!(
        notification
            .code
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()),
        "code should be uppercase hex, got {}",
        notification.code
    );
    assert!(store.contains(&notification.code));
}

#[tokio::test]
async fn should_make_issued_code_immediately_redeemable() {
    let (store, _clock) = manual_store();
    let notifier = RecordingNotifier::ok();
    let sent = notifier.sent_handle();

    RequestVisitUseCase {
        codes: Arc::clone(&store),
        notifier,
        settings: test_settings(5),
    }
    .execute(input("Ana", "ana@example.com"))
    .await
    .unwrap();

    let code = sent.lock().unwrap()[0].1.code.clone();
    let visit = RedeemVisitUseCase {
        codes: Arc::clone(&store),
        settings: test_settings(5),
    }
    .execute(RedeemVisitInput { code })
    .unwrap();
    assert_eq!(visit.remaining, Duration::minutes(5));
}

#[tokio::test]
async fn should_trim_name_and_email() {
    let (store, _clock) = manual_store();
    let notifier = RecordingNotifier::ok();
    let sent = notifier.sent_handle();

    RequestVisitUseCase {
        codes: store,
        notifier,
        settings: test_settings(5),
    }
    .execute(input("  Ana ", " ana@example.com\n"))
    .await
    .unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent[0].0, "ana@example.com");
    assert_eq!(sent[0].1.name, "Ana");
}

#[tokio::test]
async fn should_reject_missing_name_or_email_without_issuing() {
    for (name, email) in [("", "a@b.com"), ("Name", ""), ("   ", "a@b.com"), ("Name", "not-an-email")] {
        let (store, _clock) = manual_store();
        let notifier = RecordingNotifier::ok();
        let sent = notifier.sent_handle();

        let result = RequestVisitUseCase {
            codes: Arc::clone(&store),
            notifier,
            settings: test_settings(5),
        }
        .execute(input(name, email))
        .await;

        assert!(
            matches!(result, Err(VisitServiceError::InvalidInput)),
            "expected InvalidInput for ({name:?}, {email:?}), got {result:?}"
        );
        assert!(store.is_empty(), "no code should be created");
        assert!(sent.lock().unwrap().is_empty(), "no email should be sent");
    }
}

#[tokio::test]
async fn should_keep_code_redeemable_when_notification_fails() {
    let (store, _clock) = manual_store();
    let notifier = RecordingNotifier::failing();
    let sent = notifier.sent_handle();

    let result = RequestVisitUseCase {
        codes: Arc::clone(&store),
        notifier,
        settings: test_settings(5),
    }
    .execute(input("Ana", "ana@example.com"))
    .await;

    assert!(
        matches!(result, Err(VisitServiceError::NotificationFailed(_))),
        "expected NotificationFailed, got {result:?}"
    );

    let code = sent.lock().unwrap()[0].1.code.clone();
    assert_eq!(store.len(), 1);
    let visit = RedeemVisitUseCase {
        codes: Arc::clone(&store),
        settings: test_settings(5),
    }
    .execute(RedeemVisitInput { code })
    .unwrap();
    assert_eq!(visit.remaining, Duration::minutes(5));
}

#[tokio::test]
async fn should_issue_distinct_records_per_request() {
    let (store, _clock) = manual_store();
    let notifier = RecordingNotifier::ok();
    let sent = notifier.sent_handle();
    let uc = RequestVisitUseCase {
        codes: Arc::clone(&store),
        notifier,
        settings: test_settings(5),
    };

    uc.execute(input("Ana", "ana@example.com")).await.unwrap();
    uc.execute(input("Luis", "luis@example.com")).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    for (_, n) in sent.iter() {
        assert!(store.contains(&n.code));
    }
}
