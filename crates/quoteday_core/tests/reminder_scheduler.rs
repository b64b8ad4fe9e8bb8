use quoteday_core::{
    Catalog, Category, DailyTrigger, InMemoryNotificationPlatform, ListenerKind,
    NotificationContent, NotificationPlatform, PermissionStatus, PlatformCall, PlatformError,
    PlatformResult, Quote, ReminderSchedule, ReminderScheduler, ScheduleOutcome, SchedulerState,
    UnsupportedPlatform, DEFAULT_ACTION_ID,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn count_calls(history: &[PlatformCall], wanted: fn(&PlatformCall) -> bool) -> usize {
    history.iter().filter(|call| wanted(call)).count()
}

#[tokio::test]
async fn granted_run_cancels_then_registers_nine_am_reminder() {
    let platform = Arc::new(InMemoryNotificationPlatform::granted());
    let mut scheduler = ReminderScheduler::new(platform.clone());
    let catalog = Catalog::builtin();

    let outcome = scheduler.run(&catalog).await;
    let ScheduleOutcome::Scheduled {
        notification_id,
        quote_id,
    } = outcome
    else {
        panic!("expected a scheduled reminder, got {outcome:?}");
    };
    assert_eq!(scheduler.state(), SchedulerState::Scheduled);

    let history = platform.history();
    assert_eq!(
        history,
        vec![
            PlatformCall::PermissionStatus,
            PlatformCall::CancelAll,
            PlatformCall::Schedule {
                notification_id: notification_id.clone()
            },
        ]
    );

    let scheduled = platform.scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(
        scheduled[0].trigger,
        DailyTrigger {
            hour: 9,
            minute: 0,
            repeats: true
        }
    );
    let quote = catalog.get(&quote_id).expect("scheduled quote comes from catalog");
    assert_eq!(scheduled[0].content.title, "Daily Quote");
    assert_eq!(
        scheduled[0].content.body,
        format!("\"{}\" - {}", quote.text, quote.author)
    );
}

#[tokio::test]
async fn repeated_launches_leave_exactly_one_reminder() {
    let platform = Arc::new(InMemoryNotificationPlatform::granted());
    let catalog = Catalog::builtin();
    let mut rng = StdRng::seed_from_u64(9);

    for _ in 0..3 {
        let mut scheduler = ReminderScheduler::new(platform.clone());
        let outcome = scheduler.run_with_rng(&catalog, &mut rng).await;
        assert!(matches!(outcome, ScheduleOutcome::Scheduled { .. }));
        assert_eq!(platform.scheduled().len(), 1);
    }

    let history = platform.history();
    assert_eq!(
        count_calls(&history, |call| matches!(call, PlatformCall::Schedule { .. })),
        3
    );
    for (index, call) in history.iter().enumerate() {
        if matches!(call, PlatformCall::Schedule { .. }) {
            assert_eq!(history[index - 1], PlatformCall::CancelAll);
        }
    }
}

#[tokio::test]
async fn undetermined_permission_is_requested_before_scheduling() {
    let platform = Arc::new(InMemoryNotificationPlatform::new(
        PermissionStatus::Undetermined,
        true,
    ));
    let mut scheduler = ReminderScheduler::new(platform.clone());

    let outcome = scheduler.run(&Catalog::builtin()).await;
    assert!(matches!(outcome, ScheduleOutcome::Scheduled { .. }));
    assert_eq!(platform.permission(), PermissionStatus::Granted);
    assert_eq!(
        &platform.history()[..3],
        &[
            PlatformCall::PermissionStatus,
            PlatformCall::RequestPermission,
            PlatformCall::CancelAll,
        ]
    );
}

#[tokio::test]
async fn denied_permission_schedules_nothing() {
    let platform = Arc::new(InMemoryNotificationPlatform::new(
        PermissionStatus::Denied,
        false,
    ));
    let mut scheduler = ReminderScheduler::new(platform.clone());

    let outcome = scheduler.run(&Catalog::builtin()).await;
    assert_eq!(outcome, ScheduleOutcome::PermissionDenied);
    assert_eq!(scheduler.state(), SchedulerState::PermissionDenied);
    assert!(platform.scheduled().is_empty());
    assert_eq!(
        platform.history(),
        vec![PlatformCall::PermissionStatus, PlatformCall::RequestPermission]
    );
}

#[tokio::test]
async fn unsupported_platform_is_a_silent_noop() {
    let mut scheduler = ReminderScheduler::new(Arc::new(UnsupportedPlatform));

    assert_eq!(
        scheduler.run(&Catalog::builtin()).await,
        ScheduleOutcome::Unsupported
    );
    assert_eq!(scheduler.disable().await, ScheduleOutcome::Unsupported);
    assert_eq!(scheduler.state(), SchedulerState::Unsupported);
    assert!(scheduler.attach_session().is_none());
}

struct FailingPlatform {
    cancel_succeeds: bool,
    schedule_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl NotificationPlatform for FailingPlatform {
    async fn permission_status(&self) -> PlatformResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn request_permission(&self) -> PlatformResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn cancel_all_scheduled(&self) -> PlatformResult<()> {
        if self.cancel_succeeds {
            Ok(())
        } else {
            Err(PlatformError::Backend("cancel rejected".to_string()))
        }
    }

    async fn schedule(
        &self,
        _content: &NotificationContent,
        _trigger: &DailyTrigger,
    ) -> PlatformResult<String> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        Err(PlatformError::Backend("schedule rejected".to_string()))
    }
}

#[tokio::test]
async fn failed_cancel_never_registers() {
    let platform = Arc::new(FailingPlatform {
        cancel_succeeds: false,
        schedule_calls: AtomicUsize::new(0),
    });
    let mut scheduler = ReminderScheduler::new(platform.clone());

    assert_eq!(scheduler.run(&Catalog::builtin()).await, ScheduleOutcome::Failed);
    assert_eq!(scheduler.state(), SchedulerState::Unregistered);
    assert_eq!(platform.schedule_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_register_degrades_without_error() {
    let platform = Arc::new(FailingPlatform {
        cancel_succeeds: true,
        schedule_calls: AtomicUsize::new(0),
    });
    let mut scheduler = ReminderScheduler::new(platform.clone());

    assert_eq!(scheduler.run(&Catalog::builtin()).await, ScheduleOutcome::Failed);
    assert_eq!(platform.schedule_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn disable_removes_active_reminder() {
    let platform = Arc::new(InMemoryNotificationPlatform::granted());
    let mut scheduler = ReminderScheduler::new(platform.clone());

    scheduler.run(&Catalog::builtin()).await;
    assert_eq!(platform.scheduled().len(), 1);

    assert_eq!(scheduler.disable().await, ScheduleOutcome::Disabled);
    assert!(platform.scheduled().is_empty());
    assert_eq!(scheduler.state(), SchedulerState::Unregistered);
}

#[tokio::test]
async fn custom_schedule_and_single_quote_catalog() {
    let platform = Arc::new(InMemoryNotificationPlatform::granted());
    let schedule = ReminderSchedule::new(21, 45, "Evening Quote").unwrap();
    let mut scheduler = ReminderScheduler::with_schedule(platform.clone(), schedule);
    let catalog = Catalog::new(vec![Quote::new("1", "A", "X", Category::Life).unwrap()]).unwrap();

    let outcome = scheduler.run(&catalog).await;
    assert!(matches!(
        outcome,
        ScheduleOutcome::Scheduled { ref quote_id, .. } if quote_id == "1"
    ));

    let scheduled = platform.scheduled();
    assert_eq!(scheduled[0].trigger.hour, 21);
    assert_eq!(scheduled[0].trigger.minute, 45);
    assert_eq!(scheduled[0].content.title, "Evening Quote");
    assert_eq!(scheduled[0].content.body, "\"A\" - X");
}

#[tokio::test]
async fn session_listeners_are_released_on_teardown() {
    let platform = Arc::new(InMemoryNotificationPlatform::granted());
    let mut scheduler = ReminderScheduler::new(platform.clone());
    let outcome = scheduler.run(&Catalog::builtin()).await;
    let ScheduleOutcome::Scheduled {
        notification_id, ..
    } = outcome
    else {
        panic!("expected a scheduled reminder");
    };

    let session = scheduler.attach_session().expect("in-memory platform has listeners");
    let registry = platform.registry();
    assert_eq!(registry.listener_count(ListenerKind::Received), 1);
    assert_eq!(registry.listener_count(ListenerKind::Response), 1);

    let taps = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&taps);
    let extra = registry.subscribe_response(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(platform.deliver(&notification_id));
    assert!(platform.respond(&notification_id, DEFAULT_ACTION_ID));
    assert!(!platform.deliver("unknown"));
    assert_eq!(taps.load(Ordering::SeqCst), 1);

    session.teardown();
    extra.unsubscribe();
    assert_eq!(registry.listener_count(ListenerKind::Received), 0);
    assert_eq!(registry.listener_count(ListenerKind::Response), 0);

    assert!(platform.respond(&notification_id, DEFAULT_ACTION_ID));
    assert_eq!(taps.load(Ordering::SeqCst), 1);
}
