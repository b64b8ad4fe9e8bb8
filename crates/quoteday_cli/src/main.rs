//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quoteday_core` linkage.
//! - Exercise one reminder run against the in-memory notification platform.

use quoteday_core::{AppContext, Catalog, InMemoryNotificationPlatform, ScheduleOutcome};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("quoteday_core ping={}", quoteday_core::ping());
    println!("quoteday_core version={}", quoteday_core::core_version());

    let platform = Arc::new(InMemoryNotificationPlatform::granted());
    let mut context = AppContext::new(Arc::new(Catalog::builtin()), platform.clone());

    let quote = context.next_quote(None);
    println!("quote id={} category={}", quote.id, quote.category);
    println!("{}", context.share_text(quote));

    match context.on_foreground().await {
        ScheduleOutcome::Scheduled {
            notification_id,
            quote_id,
        } => println!("reminder scheduled id={notification_id} quote_id={quote_id}"),
        other => println!("reminder outcome={other:?}"),
    }
    println!("pending reminders={}", platform.scheduled().len());
}
