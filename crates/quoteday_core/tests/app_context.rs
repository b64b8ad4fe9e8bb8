use quoteday_core::db::{open_db, share};
use quoteday_core::{
    AppContext, Catalog, Category, InMemoryNotificationPlatform, PlatformCall, ScheduleOutcome,
    UnsupportedPlatform, DAILY_NOTIFICATIONS, SPEECH_ENABLED,
};
use std::sync::Arc;

fn context_with(platform: Arc<InMemoryNotificationPlatform>) -> AppContext {
    AppContext::new(Arc::new(Catalog::builtin()), platform)
}

#[test]
fn next_quote_never_repeats_current() {
    let context = context_with(Arc::new(InMemoryNotificationPlatform::granted()));
    let mut current = context.next_quote(None).text.clone();
    for _ in 0..200 {
        let next = context.next_quote(Some(current.as_str()));
        assert_ne!(next.text, current);
        current = next.text.clone();
    }
}

#[test]
fn toggle_favorite_resolves_catalog_ids() {
    let mut context = context_with(Arc::new(InMemoryNotificationPlatform::granted()));

    assert_eq!(context.toggle_favorite("4"), Some(true));
    assert!(context.favorites().is_favorite("4"));
    assert_eq!(context.favorites().list()[0].category, Category::Success);

    assert_eq!(context.toggle_favorite("4"), Some(false));
    assert!(context.favorites().is_empty());

    assert_eq!(context.toggle_favorite("404"), None);
}

#[test]
fn speech_text_follows_setting() {
    let mut context = context_with(Arc::new(InMemoryNotificationPlatform::granted()));
    let quote = context.catalog().get("10").unwrap().clone();

    assert_eq!(
        context.speech_text(&quote).as_deref(),
        Some("The journey of a thousand miles begins with one step. by Lao Tzu")
    );
    context.settings_mut().toggle(SPEECH_ENABLED).unwrap();
    assert_eq!(context.speech_text(&quote), None);
    assert_eq!(
        context.share_text(&quote),
        "\"The journey of a thousand miles begins with one step.\" - Lao Tzu"
    );
}

#[test]
fn quotes_in_category_matches_catalog_counts() {
    let context = context_with(Arc::new(InMemoryNotificationPlatform::granted()));
    for category in Category::ALL {
        assert_eq!(
            context.quotes_in_category(category).len(),
            context.catalog().count_in(category)
        );
    }
}

#[tokio::test]
async fn foreground_schedules_or_cancels_by_setting() {
    let platform = Arc::new(InMemoryNotificationPlatform::granted());
    let mut context = context_with(platform.clone());

    assert!(matches!(
        context.on_foreground().await,
        ScheduleOutcome::Scheduled { .. }
    ));
    assert!(matches!(
        context.on_foreground().await,
        ScheduleOutcome::Scheduled { .. }
    ));
    assert_eq!(platform.scheduled().len(), 1);

    context.settings_mut().toggle(DAILY_NOTIFICATIONS).unwrap();
    assert_eq!(context.on_foreground().await, ScheduleOutcome::Disabled);
    assert!(platform.scheduled().is_empty());
    assert_eq!(platform.history().last(), Some(&PlatformCall::CancelAll));
}

#[tokio::test]
async fn foreground_on_unsupported_platform_is_noop() {
    let mut context =
        AppContext::new(Arc::new(Catalog::builtin()), Arc::new(UnsupportedPlatform));
    assert_eq!(context.on_foreground().await, ScheduleOutcome::Unsupported);
}

#[test]
fn storage_backed_context_restores_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quoteday.db");
    let catalog = Arc::new(Catalog::builtin());
    let platform = Arc::new(InMemoryNotificationPlatform::granted());

    {
        let conn = share(open_db(&path).unwrap());
        let mut context = AppContext::with_storage(catalog.clone(), platform.clone(), conn);
        context.toggle_favorite("3");
        context.toggle_favorite("18");
        context.settings_mut().toggle(SPEECH_ENABLED).unwrap();
    }

    let context = AppContext::with_storage(catalog, platform, share(open_db(&path).unwrap()));
    let ids = context
        .favorites()
        .list()
        .iter()
        .map(|quote| quote.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["3", "18"]);
    assert!(!context.settings().should_speak());
}
