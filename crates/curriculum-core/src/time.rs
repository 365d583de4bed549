//! Time and duration utilities.

use chrono::{Duration, Utc};

/// Format a duration in human-readable form.
pub fn pretty_duration(duration: Duration) -> String {
    let millis = duration.num_milliseconds();
    let secs = duration.num_seconds();

    if millis < 1000 {
        format!("{}ms", millis.max(0))
    } else if secs < 60 {
        format!("{}.{:02}s", secs, (millis % 1000) / 10)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

/// Measure execution time of a future.
pub async fn measure<F, R>(f: F) -> (R, Duration)
where
    F: std::future::Future<Output = R>,
{
    let start = Utc::now();
    let result = f.await;
    let duration = Utc::now().signed_duration_since(start);
    (result, duration)
}
