use std::time::Duration;

pub fn hashrate(hashes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        hashes as f64 / secs
    } else {
        0.0
    }
}

#[macro_export]
macro_rules! format_duration {
    ($d: expr) => {
        format_args!("{:.1}s", $d.as_secs_f64())
    };
}
