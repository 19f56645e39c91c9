/// Stable card identifier: the card's position in the dealt deck.
pub type CardId = usize;

/// Formats a duration in whole seconds as `m:ss` for the stats display.
pub fn format_time(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
