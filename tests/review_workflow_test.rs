mod common;

use common::{backup_files, doc_content, doc_path, raw_suggestion, setup};

use redline::domain::models::SuggestionStatus;
use redline::DomainError;

#[tokio::test]
async fn submit_drops_suggestions_with_no_document_match() {
    let h = setup();

    let raw = vec![
        raw_suggestion("Run `make install` to build the project.", "Run `cargo build`.", 0.9),
        raw_suggestion("text that exists nowhere in any section", "irrelevant", 0.9),
    ];
    let outcome = h
        .review
        .submit("switch to cargo", "tester", &h.sections, raw)
        .await
        .unwrap()
        .expect("batch created");

    assert_eq!(outcome.suggestion_count, 1);
    assert_eq!(outcome.dropped_count, 1);

    let pending = h.review.list_pending(None).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].suggestions.len(), 1);
    assert_eq!(pending[0].suggestions[0].status, SuggestionStatus::Pending);
    assert_eq!(pending[0].suggestions[0].suggestion_id, format!("{}_0", outcome.batch_id));
}

#[tokio::test]
async fn submit_with_only_unmatched_suggestions_persists_nothing() {
    let h = setup();

    let raw = vec![raw_suggestion("completely invented citation text", "x", 0.9)];
    let outcome = h
        .review
        .submit("q", "tester", &h.sections, raw)
        .await
        .unwrap();

    assert!(outcome.is_none());
    assert!(h.review.list_pending(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn fuzzy_matched_suggestion_is_confidence_capped_and_corrected() {
    let h = setup();

    // One word drifted from the document text; the generator is very sure.
    let raw = vec![raw_suggestion(
        "Run `make install` to build the program.",
        "Run `cargo build`.",
        0.95,
    )];
    let outcome = h
        .review
        .submit("q", "tester", &h.sections, raw)
        .await
        .unwrap()
        .expect("batch created");
    assert_eq!(outcome.suggestion_count, 1);

    let pending = h.review.list_pending(None).await.unwrap();
    let suggestion = &pending[0].suggestions[0];
    assert!(suggestion.confidence_score <= 0.6);
    // Original content was corrected to the document-side substring.
    assert!(h.sections[0].content.contains(&suggestion.original_content));
}

#[tokio::test]
async fn approve_applies_patch_and_moves_suggestion_to_applied_store() {
    let h = setup();

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

    let approval = h
        .review
        .approve(&outcome.batch_id, &[suggestion_id.clone()])
        .await
        .unwrap();
    assert_eq!(approval.approved_count, 1);
    assert_eq!(approval.failed_count, 0);
    assert_eq!(approval.changes[0].status, "applied");

    // File was patched in place.
    let patched = std::fs::read_to_string(doc_path(&h)).unwrap();
    assert!(patched.contains("Run `cargo install` to build the project."));
    assert!(!patched.contains("Run `make install` to build the project."));

    // Backup holds the pre-change content.
    let backups = backup_files(h.dir.path());
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), doc_content());

    // Approving the last pending suggestion removed the batch entirely.
    assert!(h.review.list_pending(None).await.unwrap().is_empty());

    // The suggestion lives in the applied store now.
    let applied = h.review.list_applied().await.unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].suggestions.len(), 1);
    assert_eq!(applied[0].suggestions[0].status, SuggestionStatus::SuccessfullyApplied);
    assert!(applied[0].suggestions[0].backup_path.is_some());
}

#[tokio::test]
async fn normalized_match_falls_back_to_append_as_addition() {
    let h = setup();

    // Whitespace drift: matches the normalized tier, is kept verbatim, and
    // therefore misses the file's exact text at apply time.
    let raw = vec![raw_suggestion(
        "run   make install to build the project.",
        "Use cargo instead.",
        0.9,
    )];
    let outcome = h
        .review
        .submit("q", "tester", &h.sections, raw)
        .await
        .unwrap()
        .unwrap();

    let approval = h
        .review
        .approve(&outcome.batch_id, &[format!("{}_0", outcome.batch_id)])
        .await
        .unwrap();
    assert_eq!(approval.approved_count, 1);
    assert_eq!(approval.changes[0].status, "applied_as_addition");

    let patched = std::fs::read_to_string(doc_path(&h)).unwrap();
    assert!(patched.contains("<!-- UPDATED: Use cargo instead. -->"));
    // Original text untouched.
    assert!(patched.contains("Run `make install` to build the project."));
}

#[tokio::test]
async fn reject_removes_suggestions_and_empty_batches() {
    let h = setup();

    let raw = vec![raw_suggestion(
        "Run `make install` to build the project.",
        "x",
        0.9,
    )];
    let outcome = h
        .review
        .submit("q", "tester", &h.sections, raw)
        .await
        .unwrap()
        .unwrap();

    let rejection = h
        .review
        .reject(&outcome.batch_id, &[format!("{}_0", outcome.batch_id)])
        .await
        .unwrap();
    assert_eq!(rejection.rejected_count, 1);

    assert!(h.review.list_pending(None).await.unwrap().is_empty());
    // Rejected suggestions never reach the applied store.
    assert!(h.review.list_applied().await.unwrap().is_empty());
}

#[tokio::test]
async fn approve_on_unknown_batch_is_an_error() {
    let h = setup();
    let err = h
        .review
        .approve("batch_19700101_000000_deadbeef", &["x".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BatchNotFound(_)));
}

#[tokio::test]
async fn statistics_aggregate_both_stores() {
    let h = setup();

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
    assert_eq!(outcome.suggestion_count, 2);

    // Apply one of the two.
    h.review
        .approve(&outcome.batch_id, &[format!("{}_0", outcome.batch_id)])
        .await
        .unwrap();

    let stats = h.review.statistics().await.unwrap();
    assert_eq!(stats.pending_batches, 1);
    assert_eq!(stats.pending_suggestions, 1);
    assert_eq!(stats.applied_batches, 1);
    assert_eq!(stats.applied_suggestions, 1);
    assert_eq!(stats.total_suggestions, 2);
}

#[tokio::test]
async fn pending_filter_by_batch_id() {
    let h = setup();

    let first = h
        .review
        .submit(
            "q1",
            "tester",
            &h.sections,
            vec![raw_suggestion("Run `make install` to build the project.", "a", 0.9)],
        )
        .await
        .unwrap()
        .unwrap();
    let second = h
        .review
        .submit(
            "q2",
            "tester",
            &h.sections,
            vec![raw_suggestion("The default prefix is /usr/local.", "b", 0.9)],
        )
        .await
        .unwrap()
        .unwrap();
    assert_ne!(first.batch_id, second.batch_id);

    let all = h.review.list_pending(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_second = h.review.list_pending(Some(&second.batch_id)).await.unwrap();
    assert_eq!(only_second.len(), 1);
    assert_eq!(only_second[0].batch_id, second.batch_id);
}
