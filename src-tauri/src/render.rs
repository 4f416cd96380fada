use std::borrow::Cow;

use crate::error::LoadError;
use crate::format::format_large_number;
use crate::types::{Note, NoteType};

/// Titles longer than this many characters are cut in the list.
pub const TITLE_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";
const NO_TITLE: &str = "no title";
const UNKNOWN_USER: &str = "unknown user";
const NO_DATA: &str = "No data";

impl NoteType {
    /// Badge class and fixed label for the type column.
    fn badge(self) -> (&'static str, &'static str) {
        match self {
            Self::Video => ("video-badge", "video"),
            Self::ImageText => ("text-badge", "image/text"),
        }
    }
}

/// Render the list region: a header row plus one row per note, or the
/// "no data" placeholder when `view` is empty.
pub fn render_list<'a, I>(view: I) -> String
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut rows = String::new();
    for note in view {
        rows.push_str(&render_row(note));
    }

    if rows.is_empty() {
        return format!(r#"<div class="loading">{NO_DATA}</div>"#);
    }

    format!(
        r#"<div class="note-item note-header">
    <div>Title</div><div>Author</div><div>Likes</div><div>Comments</div><div>Type</div>
</div>{rows}"#
    )
}

fn render_row(note: &Note) -> String {
    let full_title = note.title.as_deref().unwrap_or_default();
    let short_title = match note.title.as_deref() {
        Some(title) => truncate_title(title),
        None => Cow::Borrowed(NO_TITLE),
    };
    let author = note.user_nickname.as_deref().unwrap_or(UNKNOWN_USER);
    let (badge_class, badge_label) = note.note_type.badge();

    format!(
        r#"
<div class="note-item">
    <div title="{}">{}</div>
    <div>{}</div>
    <div>{}</div>
    <div>{}</div>
    <div><span class="{}">{}</span></div>
</div>"#,
        html_escape(full_title),
        html_escape(&short_title),
        html_escape(author),
        format_large_number(note.likes as f64),
        note.comments,
        badge_class,
        badge_label,
    )
}

/// The message shown in the list region when loading failed.
pub fn render_error(err: &LoadError) -> String {
    format!(
        r#"<div class="error">❌ Failed to load data: {}</div>"#,
        html_escape(&err.to_string())
    )
}

/// Cut `title` to [`TITLE_MAX_CHARS`] characters plus an ellipsis.
pub fn truncate_title(title: &str) -> Cow<'_, str> {
    match title.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &title[..cut])),
        None => Cow::Borrowed(title),
    }
}

/// Escape text for use in element content and double- or single-quoted
/// attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
