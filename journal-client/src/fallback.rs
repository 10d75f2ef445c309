//! Заглушки, которые показываются вместо списков, если API недоступен.
//!
//! Набор фиксированный: экраны подставляют его как есть, без фильтрации
//! и пагинации.

use chrono::{DateTime, Utc};

use crate::models::{Article, Category, CategoryRef};

fn at(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

fn category_ref(id: &str, name: &str) -> CategoryRef {
    CategoryRef {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Категории-заглушки.
pub fn fallback_categories() -> Vec<Category> {
    [
        ("fallback-technology", "Technology"),
        ("fallback-design", "Design"),
        ("fallback-interviews", "Interviews"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
        created_at: Some(at(1_736_931_600)),
        article_count: None,
    })
    .collect()
}

/// Статьи-заглушки.
pub fn fallback_articles() -> Vec<Article> {
    vec![
        Article {
            id: "1".to_string(),
            title: "Cybersecurity Essentials Every Developer Should Know".to_string(),
            content: "Protect your apps and users with these practical security habits: \
                      validate input, keep dependencies current and never store secrets in code."
                .to_string(),
            image_url: Some("/assets/cybersecurity-thumb.svg".to_string()),
            category_id: None,
            category: Some(category_ref("fallback-technology", "Technology")),
            created_at: at(1_744_541_712),
            updated_at: None,
        },
        Article {
            id: "2".to_string(),
            title: "Designing for Readability".to_string(),
            content: "Type scale, line length and contrast decide whether people finish \
                      reading. A short guide to layouts that respect attention."
                .to_string(),
            image_url: Some("/assets/readability-thumb.svg".to_string()),
            category_id: None,
            category: Some(category_ref("fallback-design", "Design")),
            created_at: at(1_744_273_800),
            updated_at: None,
        },
        Article {
            id: "3".to_string(),
            title: "A Conversation with an Indie Type Designer".to_string(),
            content: "How a small studio ships font families used by millions, and what it \
                      learned about tooling along the way."
                .to_string(),
            image_url: Some("/assets/interview-thumb.svg".to_string()),
            category_id: None,
            category: Some(category_ref("fallback-interviews", "Interviews")),
            created_at: at(1_744_121_565),
            updated_at: None,
        },
        Article {
            id: "4".to_string(),
            title: "What Changed in Web Performance This Year".to_string(),
            content: "New browser APIs, smarter image formats and the metrics that matter \
                      for real users on slow networks."
                .to_string(),
            image_url: Some("/assets/performance-thumb.svg".to_string()),
            category_id: None,
            category: Some(category_ref("fallback-technology", "Technology")),
            created_at: at(1_743_584_400),
            updated_at: None,
        },
    ]
}
