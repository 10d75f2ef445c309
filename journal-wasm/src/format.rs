//! Форматирование для карточек и таблиц.

use chrono::{DateTime, Utc};

/// Длина анонса статьи в карточке, символов.
pub(crate) const EXCERPT_CHARS: usize = 100;

/// `April 13, 2025`.
pub(crate) fn long_date(value: &DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// `April 13, 2025 10:55:12`, для таблиц админки.
pub(crate) fn date_time(value: &DateTime<Utc>) -> String {
    value.format("%B %-d, %Y %H:%M:%S").to_string()
}

/// Первые `max_chars` символов; обрезанный текст заканчивается на `...`.
pub(crate) fn excerpt(content: &str, max_chars: usize) -> String {
    let content = content.trim();
    if content.chars().count() <= max_chars {
        return content.to_string();
    }

    let cut: String = content.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// `Showing 9 of 31 articles`.
pub(crate) fn showing(shown: usize, total: u64, noun: &str) -> String {
    format!("Showing {shown} of {total} {noun}")
}

/// Корень ленты читателя: `/user/articles` для пользовательских путей,
/// иначе `/articles`.
pub(crate) fn reader_base(path: &str) -> &'static str {
    if path.starts_with("/user/") {
        "/user/articles"
    } else {
        "/articles"
    }
}

/// Ссылка на статью внутри той же ленты.
pub(crate) fn article_href(base: &str, id: &str) -> String {
    format!("{}/{id}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(timestamp: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(timestamp, 0).expect("valid timestamp")
    }

    #[test]
    fn long_date_has_no_zero_padding() {
        assert_eq!(long_date(&at(1_744_541_712)), "April 13, 2025");
        assert_eq!(long_date(&at(1_735_776_000)), "January 2, 2025");
    }

    #[test]
    fn date_time_includes_clock() {
        assert_eq!(date_time(&at(1_744_541_712)), "April 13, 2025 10:55:12");
    }

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("  short  ", 10), "short");
    }

    #[test]
    fn excerpt_cuts_on_char_boundary() {
        assert_eq!(excerpt("привет мир", 6), "привет...");
        assert_eq!(excerpt("hello world", 6), "hello...");
    }

    #[test]
    fn showing_reads_naturally() {
        assert_eq!(showing(9, 31, "articles"), "Showing 9 of 31 articles");
    }

    #[test]
    fn reader_links_stay_within_current_feed() {
        assert_eq!(reader_base("/user/articles"), "/user/articles");
        assert_eq!(reader_base("/user/articles/a1"), "/user/articles");
        assert_eq!(reader_base("/articles/a1"), "/articles");
        assert_eq!(reader_base("/admin/articles"), "/articles");

        assert_eq!(article_href(reader_base("/user/articles"), "a1"), "/user/articles/a1");
        assert_eq!(article_href("/articles/", "a1"), "/articles/a1");
    }
}
