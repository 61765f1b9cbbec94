use std::time::Instant;

/// Formats the time elapsed since `start`, e.g. `"350ms"`, `"12.408s"` or `"2min 3.501s"`.
pub fn get_formatted_elapsed_time(start: Instant) -> String {
    let elapsed = start.elapsed();
    let millis = elapsed.as_millis();
    if millis < 1000 {
        return format!("{}ms", millis);
    }
    let secs = elapsed.as_secs_f64();
    let mins = (secs / 60.0).floor() as u64;
    if mins == 0 {
        format!("{:.3}s", secs)
    } else {
        format!("{}min {:.3}s", mins, secs - (mins * 60) as f64)
    }
}
