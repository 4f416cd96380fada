use crate::format::{format_large_number, format_ratio};
use crate::types::{Note, Stats, StatsDisplay};

/// Count, average likes and video share of `view`. An empty view yields all
/// zeros.
pub fn compute_stats<'a, I>(view: I) -> Stats
where
    I: IntoIterator<Item = &'a Note>,
{
    let (total, likes, videos) = view
        .into_iter()
        .fold((0usize, 0u64, 0usize), |(total, likes, videos), note| {
            (
                total + 1,
                likes.saturating_add(note.likes),
                videos + usize::from(note.note_type.is_video()),
            )
        });

    if total == 0 {
        return Stats::default();
    }
    Stats {
        total_count: total,
        avg_likes: likes as f64 / total as f64,
        video_ratio: (videos as f64 / total as f64 * 100.0).round() as u32,
    }
}

impl Stats {
    /// Text for the three display slots.
    pub fn display(&self) -> StatsDisplay {
        StatsDisplay {
            total_count: self.total_count.to_string(),
            avg_likes: format_large_number(self.avg_likes),
            video_ratio: format_ratio(self.video_ratio),
        }
    }
}
