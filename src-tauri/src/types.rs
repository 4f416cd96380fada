use serde::{Deserialize, Serialize};

/// One post from the dataset, with counters already coerced to integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// `None` when the source had no (or an empty) title.
    pub title: Option<String>,
    pub user_nickname: Option<String>,
    pub likes: u64,
    pub comments: u64,
    // Parsed but not displayed or aggregated anywhere yet.
    pub collects: u64,
    pub shares: u64,
    pub note_type: NoteType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Video,
    /// Everything that is not a video, including a missing type.
    ImageText,
}

impl NoteType {
    /// Map the raw `note_type` string. The source dataset spells video as "视频".
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("video") || t == "视频" => Self::Video,
            _ => Self::ImageText,
        }
    }

    pub fn is_video(self) -> bool {
        self == Self::Video
    }
}

/// Top-level shape of the static dataset document.
///
/// Items stay as raw JSON values so a single malformed entry falls back to
/// defaults without rejecting the whole payload.
#[derive(Debug, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<PayloadData>,
}

#[derive(Debug, Deserialize)]
pub struct PayloadData {
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

/// Aggregates over the current working view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_count: usize,
    pub avg_likes: f64,
    /// Whole percent in 0..=100.
    pub video_ratio: u32,
}

/// The three display slots, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDisplay {
    pub total_count: String,
    pub avg_likes: String,
    pub video_ratio: String,
}

/// Everything the frontend needs to repaint after a load or a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub stats: Stats,
    pub display: StatsDisplay,
    /// Markup for the list region: rows, the "no data" placeholder, or the
    /// load error message.
    pub list_html: String,
    pub error: Option<String>,
}
