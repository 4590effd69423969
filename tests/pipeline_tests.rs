//! End-to-end tests of the reading pipeline against mock hardware.

use luxstream::{
    device::mock::MockAdaptor,
    web::{run_chart_pipeline, ChartPayload},
    Bot, Mode, PinLevel, Reading,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// With an active consumer, every changed sensor value arrives, in
/// timestamp order.
#[tokio::test(start_paused = true)]
async fn test_active_consumer_sees_every_reading() {
    let adaptor = MockAdaptor::with_values([10.0, 20.0, 30.0]);
    let mut bot = Bot::with_adaptor(Mode::Sensor, Box::new(adaptor)).unwrap();
    let mut data = bot.take_data().unwrap();
    bot.start().unwrap();

    let mut readings = Vec::new();
    for _ in 0..3 {
        readings.push(data.recv().await.unwrap());
    }

    let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![10.0, 20.0, 30.0]);
    assert!(readings.windows(2).all(|w| w[0].time <= w[1].time));

    bot.stop().unwrap();
}

/// Without an active consumer, at most one reading is buffered; the rest
/// are dropped, not queued.
#[tokio::test(start_paused = true)]
async fn test_idle_consumer_drops_readings() {
    let adaptor = MockAdaptor::with_values([10.0, 20.0, 30.0]);
    let mut bot = Bot::with_adaptor(Mode::Sensor, Box::new(adaptor)).unwrap();
    bot.start().unwrap();

    // let the sensor burn through all three values with nobody receiving
    tokio::time::sleep(Duration::from_secs(3)).await;

    let mut data = bot.take_data().unwrap();
    let first = data.recv().await.unwrap();
    assert_eq!(first.value, 10.0);

    // 20.0 and 30.0 were offered while the slot was full: gone for good
    let second = timeout(Duration::from_secs(5), data.recv()).await;
    assert!(second.is_err(), "dropped readings must not reappear");

    bot.stop().unwrap();
}

/// Raw channel semantics: a capacity-1 queue with non-blocking enqueue
/// that discards on failure.
#[tokio::test]
async fn test_single_slot_channel_discards_on_full() {
    let (tx, mut rx) = mpsc::channel(1);

    assert!(tx.try_send(Reading::now(1.0)).is_ok());
    assert!(tx.try_send(Reading::now(2.0)).is_err());
    assert!(tx.try_send(Reading::now(3.0)).is_err());

    assert_eq!(rx.recv().await.unwrap().value, 1.0);
    assert!(rx.try_recv().is_err());
}

/// The LED heartbeat runs in sensor mode too, alternating levels.
#[tokio::test(start_paused = true)]
async fn test_led_heartbeat_toggles() {
    let adaptor = MockAdaptor::with_values([1.0]);
    let mut bot = Bot::with_adaptor(Mode::Sensor, Box::new(adaptor.clone())).unwrap();
    let _data = bot.take_data().unwrap();
    bot.start().unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;
    bot.stop().unwrap();

    let writes = adaptor.digital_writes();
    assert!(writes.len() >= 3);
    assert!(writes.iter().all(|&(pin, _)| pin == 13));
    assert_eq!(writes[0].1, PinLevel::High);
    assert_eq!(writes[1].1, PinLevel::Low);
    assert_eq!(writes[2].1, PinLevel::High);
}

/// End-to-end: a mock sensor emitting [10, 20, 30] produces exactly three
/// chart payloads, each at least as long as the previous (the window only
/// grows).
#[tokio::test(start_paused = true)]
async fn test_chart_pipeline_end_to_end() {
    let adaptor = MockAdaptor::with_values([10.0, 20.0, 30.0]);
    let mut bot = Bot::with_adaptor(Mode::Sensor, Box::new(adaptor)).unwrap();
    let data = bot.take_data().unwrap();
    bot.start().unwrap();

    let (chart_tx, mut chart_rx) = mpsc::channel::<ChartPayload>(1);
    tokio::spawn(run_chart_pipeline(data, chart_tx));

    let mut payloads = Vec::new();
    for _ in 0..3 {
        payloads.push(chart_rx.recv().await.unwrap());
    }

    for payload in &payloads {
        assert!(payload.plot.contains("<svg"));
        let json = serde_json::to_string(payload).unwrap();
        assert!(json.starts_with(r#"{"plot":"#));
    }
    assert!(payloads
        .windows(2)
        .all(|w| w[0].plot.len() <= w[1].plot.len()));

    // only three readings, so no fourth chart
    let fourth = timeout(Duration::from_secs(5), chart_rx.recv()).await;
    assert!(fourth.is_err());

    bot.stop().unwrap();
}
