//! Engines driven by real tokio timers

use crate::{NotificationCenter, Severity, ToastCenter, TokioScheduler};
use crate::storage::MemoryStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::LocalSet;

#[tokio::test(start_paused = true)]
async fn success_toast_disappears_after_three_seconds() {
    LocalSet::new()
        .run_until(async {
            let toasts = ToastCenter::new(TokioScheduler);
            let id = toasts.show("Сохранено", Severity::Success, None);

            tokio::time::sleep(Duration::from_millis(2_999)).await;
            assert!(toasts.contains(&id));

            tokio::time::sleep(Duration::from_millis(2)).await;
            assert!(!toasts.contains(&id));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn dismissed_toast_timer_is_aborted() {
    LocalSet::new()
        .run_until(async {
            let toasts = ToastCenter::new(TokioScheduler);
            let first = toasts.error("Ошибка");
            toasts.remove(&first);
            let second = toasts.info("Готово");

            tokio::time::sleep(Duration::from_secs(10)).await;
            assert!(!toasts.contains(&first));
            assert!(!toasts.contains(&second));
            assert!(toasts.toasts().is_empty());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn info_notification_expires_but_warning_stays() {
    LocalSet::new()
        .run_until(async {
            let store = Arc::new(MemoryStore::new());
            let center = NotificationCenter::new(store, TokioScheduler);
            let info = center.info("Новое сообщение", None);
            let warning = center.warning("Сессия скоро начнётся", None);

            tokio::time::sleep(Duration::from_millis(10_001)).await;
            assert!(center.get(&info).is_none());
            assert!(center.get(&warning).is_some());
        })
        .await;
}
