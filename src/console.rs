//! Console consumer: print each reading to stdout.

use crate::reading::Reading;
use tokio::sync::mpsc;

/// Drain the reading channel, printing each value at fixed width with its
/// timestamp. Returns when the channel closes.
pub async fn run(mut readings: mpsc::Receiver<Reading>) {
    while let Some(reading) = readings.recv().await {
        println!("raw={:8.3} {}", reading.value, reading.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_run_ends_when_channel_closes() {
        let (tx, rx) = mpsc::channel(1);
        tx.send(Reading {
            time: Utc::now(),
            value: 42.0,
        })
        .await
        .unwrap();
        drop(tx);
        // terminates once the sender is gone
        run(rx).await;
    }

    #[test]
    fn test_fixed_width_format() {
        let line = format!("raw={:8.3}", 7.5_f64);
        assert_eq!(line, "raw=   7.500");
    }
}
