mod common;

use checkout_flow::application::clipboard::{COPY_FAILED_MESSAGE, ClipboardCopier, CopyPath};
use checkout_flow::domain::events::Severity;
use checkout_flow::domain::ports::ScratchSurface;
use checkout_flow::infrastructure::in_memory::{InMemoryClipboard, InMemoryDocument};
use common::HarnessBuilder;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_copy_without_clipboard_api_uses_fallback() {
    let document = Arc::new(InMemoryDocument::new());
    let copier = ClipboardCopier::new(None, document.clone());

    let path = copier.copy("ACC-12345").await.unwrap();

    assert_eq!(path, CopyPath::Fallback);
    assert_eq!(document.copied().as_deref(), Some("ACC-12345"));
    assert_eq!(document.attached_count(), 0);
}

#[tokio::test]
async fn test_fallback_element_removed_on_every_path() {
    for document in [
        InMemoryDocument::new(),
        InMemoryDocument::failing_copy(),
        InMemoryDocument::failing_attach(),
    ] {
        let document = Arc::new(document);
        let copier = ClipboardCopier::new(
            Some(Arc::new(InMemoryClipboard::rejecting())),
            document.clone(),
        );

        let _ = copier.copy("REF-84922").await;

        assert_eq!(document.attached_count(), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn test_modal_detail_copy_uses_secure_clipboard() {
    let clipboard = Arc::new(InMemoryClipboard::new());
    let h = HarnessBuilder::new().clipboard(clipboard.clone()).build();
    h.checkout.start().await.unwrap();
    h.checkout.select("bank_transfer".into()).await.unwrap();
    h.checkout.confirm().await.unwrap();

    let path = h.checkout.copy_detail("account").await.unwrap();

    assert_eq!(path, CopyPath::Secure);
    assert_eq!(clipboard.contents().as_deref(), Some("ACC-12345"));
    assert!(h.view.copy_feedback("account"));

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!h.view.copy_feedback("account"));
}

#[tokio::test]
async fn test_modal_detail_copy_failure_notifies() {
    let h = HarnessBuilder::new()
        .clipboard(Arc::new(InMemoryClipboard::rejecting()))
        .document(InMemoryDocument::failing_copy())
        .build();
    h.checkout.start().await.unwrap();
    h.checkout.select("mobile_wallet".into()).await.unwrap();

    assert!(h.checkout.copy_detail("reference").await.is_err());

    assert_eq!(
        h.notifier.messages(),
        vec![(COPY_FAILED_MESSAGE.to_string(), Severity::Error)]
    );
    assert_eq!(h.document.attached_count(), 0);
    assert!(!h.checkout.state().await.is_processing);
}
