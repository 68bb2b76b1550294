mod common;

use common::{backup_files, doc_content, doc_path, raw_suggestion, setup};

use redline::domain::models::SuggestionStatus;
use redline::DomainError;

async fn submit_and_approve(h: &common::TestHarness) -> String {
    let raw = vec![raw_suggestion(
        "Run `make install` to build the project.",
        "Run `cargo install` to build the project.",
        0.9,
    )];
    let outcome = h
        .review
        .submit("use cargo", "tester", &h.sections, raw)
        .await
        .unwrap()
        .unwrap();
    let suggestion_id = format!("{}_0", outcome.batch_id);
    h.review
        .approve(&outcome.batch_id, &[suggestion_id.clone()])
        .await
        .unwrap();
    suggestion_id
}

#[tokio::test]
async fn apply_then_revert_restores_file_byte_for_byte() {
    let h = setup();
    let suggestion_id = submit_and_approve(&h).await;

    // Precondition: the file was changed.
    assert_ne!(std::fs::read_to_string(doc_path(&h)).unwrap(), doc_content());

    let outcome = h.revert.revert_one(&suggestion_id).await.unwrap();
    assert_eq!(outcome.status, "reverted");

    // Byte-for-byte restore, backup consumed.
    assert_eq!(std::fs::read_to_string(doc_path(&h)).unwrap(), doc_content());
    assert!(backup_files(h.dir.path()).is_empty());

    // revert_one keeps the record as an audit trail, marked reverted.
    let applied = h.review.list_applied().await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].suggestions[0].status, SuggestionStatus::Reverted);
    assert!(applied[0].suggestions[0].reverted_at.is_some());
}

#[tokio::test]
async fn double_revert_fails_without_touching_the_file() {
    let h = setup();
    let suggestion_id = submit_and_approve(&h).await;

    h.revert.revert_one(&suggestion_id).await.unwrap();
    let restored = std::fs::read_to_string(doc_path(&h)).unwrap();

    let err = h.revert.revert_one(&suggestion_id).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
    assert_eq!(std::fs::read_to_string(doc_path(&h)).unwrap(), restored);
}

#[tokio::test]
async fn revert_unknown_suggestion_fails() {
    let h = setup();
    let err = h.revert.revert_one("batch_x_0").await.unwrap_err();
    assert!(matches!(err, DomainError::SuggestionNotFound(_)));
}

#[tokio::test]
async fn revert_all_restores_file_and_empties_applied_store() {
    let h = setup();
    submit_and_approve(&h).await;

    let outcome = h.revert.revert_all().await.unwrap();
    assert_eq!(outcome.reverted_and_removed_count, 1);
    assert_eq!(outcome.failed_to_revert_count, 0);
    assert_eq!(outcome.details.len(), 1);
    assert_eq!(outcome.details[0].status, "reverted_and_removed");

    assert_eq!(std::fs::read_to_string(doc_path(&h)).unwrap(), doc_content());

    // Unlike revert_one, revert_all drops the records; the emptied batch
    // is removed from the store.
    assert!(h.review.list_applied().await.unwrap().is_empty());
}

#[tokio::test]
async fn revert_all_restores_file_with_stacked_edits_to_original() {
    let h = setup();

    // Two edits to the same file in one batch. The second suggestion's
    // backup is taken after the first patch landed, so its backup still
    // contains the first edit.
    let raw = vec![
        raw_suggestion("Run `make install` to build the project.", "AAA", 0.9),
        raw_suggestion("The default prefix is /usr/local.", "BBB", 0.9),
    ];
    let outcome = h
        .review
        .submit("q", "tester", &h.sections, raw)
        .await
        .unwrap()
        .unwrap();
    let ids = vec![
        format!("{}_0", outcome.batch_id),
        format!("{}_1", outcome.batch_id),
    ];
    let approval = h.review.approve(&outcome.batch_id, &ids).await.unwrap();
    assert_eq!(approval.approved_count, 2);

    let patched = std::fs::read_to_string(doc_path(&h)).unwrap();
    assert!(patched.contains("AAA") && patched.contains("BBB"));

    let outcome = h.revert.revert_all().await.unwrap();
    assert_eq!(outcome.reverted_and_removed_count, 2);
    assert_eq!(outcome.failed_to_revert_count, 0);

    // Unwinding newest-first lands the oldest backup last: the file is
    // byte-for-byte the pre-everything content, not post-first-edit.
    assert_eq!(std::fs::read_to_string(doc_path(&h)).unwrap(), doc_content());
    assert!(backup_files(h.dir.path()).is_empty());
    assert!(h.review.list_applied().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_write_does_not_leave_an_orphaned_backup() {
    let h = setup();

    let raw = vec![raw_suggestion(
        "Run `make install` to build the project.",
        "Run `cargo build`.",
        0.9,
    )];
    let outcome = h
        .review
        .submit("q", "tester", &h.sections, raw)
        .await
        .unwrap()
        .unwrap();

    // Block the atomic rewrite: its temp sibling path is occupied by a
    // directory, so the write fails after the backup was taken.
    std::fs::create_dir(h.dir.path().join("install.md.tmp")).unwrap();

    let approval = h
        .review
        .approve(&outcome.batch_id, &[format!("{}_0", outcome.batch_id)])
        .await
        .unwrap();
    assert_eq!(approval.approved_count, 0);
    assert_eq!(approval.failed_count, 1);

    // The file was never changed and the useless backup was cleaned up.
    assert_eq!(std::fs::read_to_string(doc_path(&h)).unwrap(), doc_content());
    assert!(backup_files(h.dir.path()).is_empty());
}

#[tokio::test]
async fn revert_all_reports_missing_backup_as_per_item_failure() {
    let h = setup();
    submit_and_approve(&h).await;

    // Sabotage: delete the backup out from under the store.
    for backup in backup_files(h.dir.path()) {
        std::fs::remove_file(backup).unwrap();
    }

    let outcome = h.revert.revert_all().await.unwrap();
    assert_eq!(outcome.reverted_and_removed_count, 0);
    assert_eq!(outcome.failed_to_revert_count, 1);
    assert_eq!(outcome.details[0].status, "failed");
    assert!(outcome.details[0].reason.is_some());

    // The record survives for a later retry or inspection.
    let applied = h.review.list_applied().await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(
        applied[0].suggestions[0].status,
        SuggestionStatus::SuccessfullyApplied
    );
}

#[tokio::test]
async fn failed_patch_is_captured_per_suggestion() {
    let h = setup();

    // Two suggestions: one targets a file that will vanish before approval.
    let raw = vec![
        raw_suggestion("Run `make install` to build the project.", "a", 0.9),
        raw_suggestion("The default prefix is /usr/local.", "b", 0.9),
    ];
    let outcome = h
        .review
        .submit("q", "tester", &h.sections, raw)
        .await
        .unwrap()
        .unwrap();

    std::fs::remove_file(doc_path(&h)).unwrap();

    let ids = vec![
        format!("{}_0", outcome.batch_id),
        format!("{}_1", outcome.batch_id),
    ];
    let approval = h.review.approve(&outcome.batch_id, &ids).await.unwrap();

    // Both fail (same missing file), neither blocks the other, and the
    // batch leaves the pending store because every suggestion reached a
    // terminal outcome.
    assert_eq!(approval.approved_count, 0);
    assert_eq!(approval.failed_count, 2);
    assert!(approval.changes.iter().all(|c| c.status == "failed"));
    assert!(h.review.list_pending(None).await.unwrap().is_empty());
    assert!(h.review.list_applied().await.unwrap().is_empty());
}
