pub mod catalog;
pub mod completions;
pub mod config;
pub mod plan;
pub mod run;
pub mod stats;

/// m:ss rendering shared by the session and stats views.
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
