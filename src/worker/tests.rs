// Worker lifecycle tests. Time is paused; sleeps advance the clock instantly.

use super::*;
use crate::error_handling::InfoType;
use crate::events::{event_channel, Event};
use crate::query::QueryStatus;
use crate::test_helpers::*;
use tokio::sync::mpsc::UnboundedReceiver;

struct Setup {
    worker: Worker,
    fetcher: Arc<ScriptedFetcher>,
    stats: Arc<ProcessingStats>,
    rx: UnboundedReceiver<Event>,
}

fn setup(fetcher: ScriptedFetcher, settings: WorkerSettings) -> Setup {
    let fetcher = Arc::new(fetcher);
    let (sink, rx) = event_channel();
    let stats = Arc::new(ProcessingStats::new());
    let resources = WorkerResources {
        scope: Arc::new(Scope::new(["example.com"]).unwrap()),
        endpoints: test_endpoints(),
        fetcher: fetcher.clone(),
        sink: Arc::new(sink),
        stats: Arc::clone(&stats),
    };
    Setup {
        worker: Worker::new(settings, resources),
        fetcher,
        stats,
        rx,
    }
}

fn five_addresses() -> ScriptedFetcher {
    let forward = (1..=5)
        .map(|i| a_record("a.example.com", &format!("10.0.0.{}", i)))
        .collect::<Vec<_>>()
        .join("\n");
    let mut fetcher = ScriptedFetcher::new().page(forward_url("example.com"), forward);
    for i in 1..=5 {
        let address = format!("10.0.0.{}", i);
        fetcher = fetcher.page(
            reverse_url(&address),
            a_record(&format!("host{}.example.com", i), &address),
        );
    }
    fetcher
}

async fn wait_for_state(worker: &Worker, state: WorkerState) {
    for _ in 0..100 {
        if worker.state() == state {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("worker never reached {}, still {}", state, worker.state());
}

#[tokio::test(start_paused = true)]
async fn test_start_returns_immediately() {
    let fetcher = five_addresses().delay(Duration::from_secs(3600));
    let s = setup(fetcher, WorkerSettings::default());

    s.worker.start();

    assert_eq!(s.worker.state(), WorkerState::Running);
    assert!(s.fetcher.calls().is_empty());
    s.worker.stop();
}

#[tokio::test(start_paused = true)]
async fn test_second_start_is_ignored() {
    let s = setup(ScriptedFetcher::new(), WorkerSettings::default());

    s.worker.start();
    s.worker.start();
    s.worker.wait_for_queries().await;

    assert_eq!(s.fetcher.calls(), vec![forward_url("example.com")]);
    s.worker.stop();
    s.worker.wait_for_signals().await;
    assert_eq!(s.worker.state(), WorkerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_full_run_reports_every_domain() {
    let mut s = setup(five_addresses(), WorkerSettings::default());

    s.worker.start();
    let reports = s.worker.wait_for_queries().await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].status, QueryStatus::Completed);
    assert_eq!(reports[0].reverse_fetches, 5);
    let events = drain(&mut s.rx);
    assert_eq!(events.len(), 10);
    // Queries finishing does not stop the worker
    assert_eq!(s.worker.state(), WorkerState::Running);
    s.worker.stop();
}

#[tokio::test(start_paused = true)]
async fn test_work_notification_marks_active() {
    // Forward lookup fails, so only the notification can mark the worker active
    let s = setup(ScriptedFetcher::new(), WorkerSettings::default());
    s.worker.start();
    s.worker.wait_for_queries().await;
    assert!(!s.worker.is_active());

    s.worker
        .requests()
        .send(WorkRequest {
            name: "www.example.com".into(),
            domain: "example.com".into(),
        })
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(s.worker.is_active());
    assert_eq!(s.stats.get_info_count(InfoType::WorkNotification), 1);
    s.worker.stop();
}

#[tokio::test(start_paused = true)]
async fn test_activity_expires_after_window() {
    let settings = WorkerSettings {
        activity_window: Duration::from_secs(10),
        ..WorkerSettings::default()
    };
    let s = setup(ScriptedFetcher::new(), settings);

    s.worker.set_active();
    s.worker.set_active();
    assert!(s.worker.is_active());

    tokio::time::advance(Duration::from_secs(11)).await;
    assert!(!s.worker.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_pause_then_resume() {
    let s = setup(ScriptedFetcher::new(), WorkerSettings::default());
    s.worker.start();

    s.worker.pause();
    wait_for_state(&s.worker, WorkerState::Paused).await;

    s.worker.resume();
    wait_for_state(&s.worker, WorkerState::Running).await;

    s.worker.stop();
    s.worker.wait_for_signals().await;
    assert_eq!(s.worker.state(), WorkerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_paused_waits_for_resume() {
    let s = setup(ScriptedFetcher::new(), WorkerSettings::default());
    s.worker.start();
    s.worker.pause();
    wait_for_state(&s.worker, WorkerState::Paused).await;

    s.worker.stop();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(s.worker.state(), WorkerState::Paused);
    assert!(!s.worker.signals_finished());
    // The cancellation token fires regardless
    assert!(s.worker.cancellation_token().is_cancelled());

    s.worker.resume();
    s.worker.wait_for_signals().await;
    assert_eq!(s.worker.state(), WorkerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_stop_preempts_pause() {
    let settings = WorkerSettings {
        pause_policy: PausePolicy::StopPreempts,
        ..WorkerSettings::default()
    };
    let s = setup(ScriptedFetcher::new(), settings);
    s.worker.start();
    s.worker.pause();
    wait_for_state(&s.worker, WorkerState::Paused).await;

    s.worker.stop();
    s.worker.wait_for_signals().await;

    assert_eq!(s.worker.state(), WorkerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_notifications_ignored_while_paused() {
    let s = setup(ScriptedFetcher::new(), WorkerSettings::default());
    s.worker.start();
    s.worker.wait_for_queries().await;
    s.worker.pause();
    wait_for_state(&s.worker, WorkerState::Paused).await;

    s.worker.requests().send(WorkRequest::default()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(s.stats.get_info_count(InfoType::WorkNotification), 0);

    s.worker.resume();
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(s.stats.get_info_count(InfoType::WorkNotification), 1);
    s.worker.stop();
}

#[tokio::test(start_paused = true)]
async fn test_stop_aborts_reverse_pacing() {
    let mut s = setup(five_addresses(), WorkerSettings::default());
    s.worker.start();

    tokio::time::sleep(Duration::from_millis(1200)).await;
    s.worker.stop();
    let reports = s.worker.wait_for_queries().await;

    assert_eq!(reports[0].status, QueryStatus::Cancelled);
    assert_eq!(s.fetcher.reverse_calls(), 2);
    let events = drain(&mut s.rx);
    let names = events
        .iter()
        .filter(|e| matches!(e, Event::Name(_)))
        .count();
    assert_eq!(names, 2);
    s.worker.wait_for_signals().await;
    assert_eq!(s.worker.state(), WorkerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_start() {
    let s = setup(five_addresses(), WorkerSettings::default());

    s.worker.stop();
    assert_eq!(s.worker.state(), WorkerState::Stopped);

    s.worker.start();
    assert_eq!(s.worker.state(), WorkerState::Stopped);
    assert!(s.worker.wait_for_queries().await.is_empty());
    assert!(s.fetcher.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_stopped_worker_still_runs_forward_phase_of_pending_domains() {
    let settings = WorkerSettings {
        domain_concurrency: 1,
        ..WorkerSettings::default()
    };
    let fetcher = Arc::new(
        five_addresses()
            .page(forward_url("example.org"), a_record("x.example.org", "5.6.7.8"))
            .page(reverse_url("5.6.7.8"), a_record("www.example.org", "5.6.7.8")),
    );
    let (sink, mut rx) = event_channel();
    let worker = Worker::new(
        settings,
        WorkerResources {
            scope: Arc::new(Scope::new(["example.com", "example.org"]).unwrap()),
            endpoints: test_endpoints(),
            fetcher: fetcher.clone(),
            sink: Arc::new(sink),
            stats: Arc::new(ProcessingStats::new()),
        },
    );

    worker.start();
    tokio::time::sleep(Duration::from_millis(700)).await;
    worker.stop();
    let mut reports = worker.wait_for_queries().await;
    reports.sort_by(|a, b| a.domain.cmp(&b.domain));

    assert_eq!(reports[0].domain, "example.com");
    assert_eq!(reports[0].status, QueryStatus::Cancelled);
    // The second domain starts after the stop: forward runs, reverse does not
    assert_eq!(reports[1].domain, "example.org");
    assert_eq!(reports[1].status, QueryStatus::Cancelled);
    assert_eq!(reports[1].addresses, 1);
    assert_eq!(reports[1].reverse_fetches, 0);
    let calls = fetcher.calls();
    assert!(calls.contains(&forward_url("example.org")));
    assert!(!calls.contains(&reverse_url("5.6.7.8")));
    let org_addresses = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            Event::Address(a) if a.domain == "example.org" => Some(a.address),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(org_addresses, vec!["5.6.7.8".to_string()]);
}
