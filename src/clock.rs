use chrono::Local;

pub const TS_FMT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DAILY_FMT: &str = "%Y-%m-%d";

pub fn now_iso() -> String {
    Local::now().format(TS_FMT).to_string()
}

pub fn today() -> String {
    Local::now().format(DAILY_FMT).to_string()
}

pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
