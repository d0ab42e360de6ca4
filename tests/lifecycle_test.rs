// Tests for the campaign run lifecycle

use voxflow::campaign::{RunLifecycle, Script};
use voxflow::core::{ConsoleError, ConsoleService, Resource};
use voxflow::store::models::{CampaignStatus, LogCategory, Role, RunStatus};
use voxflow::store::Store;

async fn service_with_campaign() -> (ConsoleService, String) {
    let store = Store::seeded();
    let service = ConsoleService::with_defaults(store);
    let campaign_id = service.list_campaigns().await[0].id.clone();
    (service, campaign_id)
}

#[tokio::test]
async fn test_start_unknown_campaign() {
    let store = Store::seeded();
    let service = ConsoleService::with_defaults(store.clone());
    let logs_before = service.list_logs().await.len();

    let err = service.start_campaign("nonexistent-id").await.unwrap_err();
    assert_eq!(err, ConsoleError::not_found(Resource::Campaign, "nonexistent-id"));

    assert!(store.lock().await.runs.is_empty());
    assert_eq!(service.list_logs().await.len(), logs_before);
}

#[tokio::test]
async fn test_start_campaign_creates_running_run() {
    let (service, campaign_id) = service_with_campaign().await;

    let run = service.start_campaign(&campaign_id).await.unwrap();

    assert_eq!(run.status, RunStatus::Running);
    assert!(run.transcript.is_empty());
    assert!(run.completed_at.is_none());
    assert_eq!(run.campaign_id, campaign_id);
    assert_eq!(run.agent_name, "Customer Support Assistant");

    let campaigns = service.list_campaigns().await;
    assert_eq!(campaigns[0].status, CampaignStatus::Running);

    let logs = service.list_logs().await;
    assert_eq!(logs[0].category, LogCategory::Campaign);
    assert_eq!(logs[0].title, "Campaign Started");
    assert_eq!(logs[0].description, "Q1 Customer Outreach demo started");
}

#[tokio::test]
async fn test_status_reads_append_two_messages_in_order() {
    let (service, campaign_id) = service_with_campaign().await;
    let run = service.start_campaign(&campaign_id).await.unwrap();
    let script = Script::demo();

    let first = service.run_status(&run.id).await.unwrap();
    assert_eq!(first.transcript.len(), 2);

    let second = service.run_status(&run.id).await.unwrap();
    assert_eq!(second.transcript.len(), 4);
    assert_eq!(second.status, RunStatus::Running);

    // Earlier messages are untouched by later reads
    assert_eq!(second.transcript[..2], first.transcript[..]);

    for (msg, line) in second.transcript.iter().zip(script.lines()) {
        assert_eq!(msg.role, line.role);
        assert_eq!(msg.content, line.content);
    }
    assert_eq!(second.transcript[0].role, Role::Bot);
    assert_eq!(second.transcript[1].role, Role::User);
}

#[tokio::test]
async fn test_run_completes_after_script_exhausted() {
    let (service, campaign_id) = service_with_campaign().await;
    let run = service.start_campaign(&campaign_id).await.unwrap();

    for read in 1..7 {
        let snapshot = service.run_status(&run.id).await.unwrap();
        assert_eq!(snapshot.status, RunStatus::Running, "read {}", read);
        assert_eq!(snapshot.transcript.len(), read * 2);
    }
    let last = service.run_status(&run.id).await.unwrap();

    assert_eq!(last.transcript.len(), 13);
    assert_eq!(last.status, RunStatus::Completed);
    assert!(last.completed_at.is_some());
    assert_eq!(service.list_campaigns().await[0].status, CampaignStatus::Completed);

    let logs = service.list_logs().await;
    assert_eq!(logs[0].title, "Campaign Completed");
    assert_eq!(logs[0].description, "Demo completed with 13 messages");

    // One more read changes nothing
    let logs_before = logs.len();
    let after = service.run_status(&run.id).await.unwrap();
    assert_eq!(after, last);
    assert_eq!(service.list_logs().await.len(), logs_before);
}

#[tokio::test]
async fn test_pause_keeps_transcript() {
    let (service, campaign_id) = service_with_campaign().await;
    let run = service.start_campaign(&campaign_id).await.unwrap();
    service.run_status(&run.id).await.unwrap();

    let paused = service.pause_run(&run.id).await.unwrap();
    assert_eq!(paused.status, RunStatus::Paused);
    assert_eq!(paused.transcript.len(), 2);
    assert!(paused.completed_at.is_none());

    // Campaign is left as it was
    assert_eq!(service.list_campaigns().await[0].status, CampaignStatus::Running);

    // Paused runs do not advance and do not resume on read
    let read = service.run_status(&run.id).await.unwrap();
    assert_eq!(read, paused);
}

#[tokio::test]
async fn test_pause_unknown_run() {
    let (service, _) = service_with_campaign().await;
    let err = service.pause_run("missing").await.unwrap_err();
    assert_eq!(err, ConsoleError::not_found(Resource::Run, "missing"));
}

#[tokio::test]
async fn test_pause_is_unconditional() {
    let (service, campaign_id) = service_with_campaign().await;
    let run = service.start_campaign(&campaign_id).await.unwrap();
    service.stop_run(&run.id).await.unwrap();

    let paused = service.pause_run(&run.id).await.unwrap();
    assert_eq!(paused.status, RunStatus::Paused);
}

#[tokio::test]
async fn test_stop_from_any_status() {
    let (service, campaign_id) = service_with_campaign().await;

    let running = service.start_campaign(&campaign_id).await.unwrap();
    let logs_before = service.list_logs().await.len();
    let stopped = service.stop_run(&running.id).await.unwrap();
    assert_eq!(stopped.status, RunStatus::Completed);
    assert!(stopped.completed_at.is_some());
    assert_eq!(service.list_campaigns().await[0].status, CampaignStatus::Completed);
    // Manual stop is not logged
    assert_eq!(service.list_logs().await.len(), logs_before);

    let paused = service.start_campaign(&campaign_id).await.unwrap();
    service.pause_run(&paused.id).await.unwrap();
    let stopped = service.stop_run(&paused.id).await.unwrap();
    assert_eq!(stopped.status, RunStatus::Completed);
    assert!(stopped.completed_at.is_some());

    // Stopped runs never advance again
    let read = service.run_status(&paused.id).await.unwrap();
    assert!(read.transcript.is_empty());

    assert!(service.stop_run("missing").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_multiple_runs_per_campaign() {
    let (service, campaign_id) = service_with_campaign().await;

    let a = service.start_campaign(&campaign_id).await.unwrap();
    let b = service.start_campaign(&campaign_id).await.unwrap();
    assert_ne!(a.id, b.id);

    service.run_status(&a.id).await.unwrap();
    let b = service.run_status(&b.id).await.unwrap();
    let a = service.run_status(&a.id).await.unwrap();
    assert_eq!(a.transcript.len(), 4);
    assert_eq!(b.transcript.len(), 2);
}

#[tokio::test]
async fn test_concurrent_reads_do_not_duplicate() {
    let (service, campaign_id) = service_with_campaign().await;
    let service = std::sync::Arc::new(service);
    let run = service.start_campaign(&campaign_id).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let service = service.clone();
        let run_id = run.id.clone();
        handles.push(tokio::spawn(async move {
            service.run_status(&run_id).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let run = service.lifecycle().get(&run.id).await.unwrap();
    assert_eq!(run.transcript.len(), 13);
    assert_eq!(run.status, RunStatus::Completed);
    for (msg, line) in run.transcript.iter().zip(Script::demo().lines()) {
        assert_eq!(msg.content, line.content);
    }

    let completions = service
        .list_logs()
        .await
        .iter()
        .filter(|log| log.title == "Campaign Completed")
        .count();
    assert_eq!(completions, 1);
}

#[tokio::test]
async fn test_advance_all_skips_settled_runs() {
    let store = Store::seeded();
    let lifecycle = RunLifecycle::new(store.clone(), Script::demo(), 3);
    let campaign_id = store.lock().await.campaigns[0].id.clone();

    let running = lifecycle.start(&campaign_id).await.unwrap();
    let paused = lifecycle.start(&campaign_id).await.unwrap();
    lifecycle.pause(&paused.id).await.unwrap();

    assert_eq!(lifecycle.advance_all().await, 1);

    assert_eq!(lifecycle.get(&running.id).await.unwrap().transcript.len(), 3);
    assert!(lifecycle.get(&paused.id).await.unwrap().transcript.is_empty());
}

#[tokio::test]
async fn test_zero_per_advance_still_progresses() {
    let store = Store::seeded();
    let lifecycle = RunLifecycle::new(store.clone(), Script::demo(), 0);
    let campaign_id = store.lock().await.campaigns[0].id.clone();

    let run = lifecycle.start(&campaign_id).await.unwrap();
    let run = lifecycle.advance(&run.id).await.unwrap();
    assert_eq!(run.transcript.len(), 1);
}
