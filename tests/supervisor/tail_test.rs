use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use poe_trade_notifier::notifier::{ChannelError, Dispatcher, NotificationChannel};
use poe_trade_notifier::supervisor::{TailContext, TailSupervisor};
use poe_trade_notifier::watcher::WatchTarget;
use tempfile::TempDir;

const POLL: Duration = Duration::from_millis(10);

/// Channel that records deliveries and stalls on messages containing "Slow".
struct RecordingChannel {
    delivered: Arc<Mutex<Vec<String>>>,
    stall: Duration,
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn send(&self, message: &str) -> Result<(), ChannelError> {
        if message.contains("Slow") {
            tokio::time::sleep(self.stall).await;
        }
        self.delivered.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

fn append(path: &Path, data: &str) {
    let mut f = OpenOptions::new().append(true).open(path).unwrap();
    f.write_all(data.as_bytes()).unwrap();
    f.flush().unwrap();
}

fn offer_line(sender: &str, item: &str, price: &str) -> String {
    format!("2026/10/17 20:00:00 1 [INFO Client 1] @From {sender}: Hi, I would like to buy your {item} listed for {price} in Standard\n")
}

async fn wait_until(deadline: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

fn start(
    targets: Vec<WatchTarget>,
    stall: Duration,
) -> (Arc<Mutex<Vec<String>>>, tokio::task::JoinHandle<()>) {
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let channel = RecordingChannel {
        delivered: Arc::clone(&delivered),
        stall,
    };
    let dispatcher = Arc::new(Dispatcher::new(vec![Box::new(channel)]));
    let supervisor = TailSupervisor::new(targets, TailContext::new(dispatcher, POLL));
    let handle = tokio::spawn(async move {
        supervisor.run().await;
    });
    (delivered, handle)
}

#[tokio::test]
async fn test_offers_delivered_once_in_order() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("Client.txt");
    std::fs::write(&log, offer_line("Old", "Replayed", "1 chaos")).unwrap();

    let (delivered, handle) = start(vec![WatchTarget::new(&log, "PoE")], Duration::ZERO);
    tokio::time::sleep(Duration::from_millis(200)).await;

    append(&log, &offer_line("A", "First", "1 chaos"));
    append(&log, "2026/10/17 20:00:01 1 [INFO Client 1] : You have entered Hideout.\n");
    append(&log, &offer_line("B", "Second", "2 divine"));
    // Partial write: must not be delivered until the newline arrives.
    let third = offer_line("C", "Third", "3 exalted");
    let (head, tail) = third.split_at(40);
    append(&log, head);

    let got_two = wait_until(Duration::from_secs(5), || delivered.lock().unwrap().len() >= 2).await;
    assert!(got_two);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(delivered.lock().unwrap().len(), 2);

    append(&log, tail);
    let got_three =
        wait_until(Duration::from_secs(5), || delivered.lock().unwrap().len() >= 3).await;
    assert!(got_three);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(
        *delivered.lock().unwrap(),
        vec![
            "🪙 *1 chaos* First".to_string(),
            "💎 *2 divine* Second".to_string(),
            "✨ *3 exalted* Third".to_string(),
        ]
    );
    handle.abort();
}

#[tokio::test]
async fn test_slow_dispatch_does_not_block_other_file() {
    let temp = TempDir::new().unwrap();
    let log_a = temp.path().join("a.txt");
    let log_b = temp.path().join("b.txt");
    std::fs::write(&log_a, "").unwrap();
    std::fs::write(&log_b, "").unwrap();

    let (delivered, handle) = start(
        vec![
            WatchTarget::new(&log_a, "A"),
            WatchTarget::new(&log_b, "B"),
        ],
        Duration::from_secs(30),
    );
    tokio::time::sleep(Duration::from_millis(200)).await;

    append(&log_a, &offer_line("X", "Slow Item", "1 chaos"));
    tokio::time::sleep(Duration::from_millis(100)).await;
    append(&log_b, &offer_line("Y", "Fast Item", "2 divine"));

    let fast_arrived = wait_until(Duration::from_secs(5), || {
        delivered
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains("Fast Item"))
    })
    .await;

    assert!(fast_arrived, "file B must not wait for file A's dispatch");
    assert!(!delivered
        .lock()
        .unwrap()
        .iter()
        .any(|m| m.contains("Slow Item")));
    handle.abort();
}

#[tokio::test]
async fn test_missing_file_does_not_stop_sibling() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("Client.txt");
    std::fs::write(&log, "").unwrap();

    let (delivered, handle) = start(
        vec![
            WatchTarget::new(temp.path().join("missing.txt"), "Missing"),
            WatchTarget::new(&log, "PoE"),
        ],
        Duration::ZERO,
    );
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished());

    append(&log, &offer_line("A", "Still Works", "5 chaos"));
    let arrived =
        wait_until(Duration::from_secs(5), || !delivered.lock().unwrap().is_empty()).await;
    assert!(arrived);
    handle.abort();
}
