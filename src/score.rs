/// Virality score: how far a video's reach exceeded its owning channel's
/// baseline audience.
///
/// The ratio is undefined when the channel has no visible subscribers; a
/// video that still has measurable views is treated as baseline-viral (1.0),
/// and a video with neither views nor subscribers scores 0.0.
pub fn compute_viral_score(view_count: u64, subscriber_count: u64) -> f64 {
    if subscriber_count > 0 {
        view_count as f64 / subscriber_count as f64
    } else if view_count > 0 {
        1.0
    } else {
        0.0
    }
}
