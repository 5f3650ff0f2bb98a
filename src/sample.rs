//! Bundled sample dataset.
//!
//! Shown when the cache hydrates empty on first run and used as the last
//! tier of the repository's fallback chain, so the main feed is never blank.
//! Sample IDs live in the reserved `sample-` namespace; real API article IDs
//! are bare opaque strings, so the two can never collide in the cache's
//! ID-keyed merge.

use crate::model::Article;

struct SampleSpec {
    id: &'static str,
    title: &'static str,
    link: &'static str,
    description: &'static str,
    content: &'static str,
    published_at: &'static str,
    image_url: &'static str,
    source_id: &'static str,
    source_priority: i64,
    source_name: &'static str,
    source_url: &'static str,
    countries: &'static [&'static str],
    categories: &'static [&'static str],
    keywords: &'static [&'static str],
    creator: &'static str,
    ai_tag: &'static str,
}

const SAMPLES: &[SampleSpec] = &[
    SampleSpec {
        id: "sample-001",
        title: "Breaking: Major Technology Breakthrough Announced",
        link: "https://example.com/tech-breakthrough",
        description: "Scientists have made a groundbreaking discovery that could revolutionize the tech industry. This development promises to change how we interact with technology.",
        content: "In a major breakthrough that could reshape the technology landscape, researchers have announced a revolutionary discovery. The innovation promises to enhance user experience and improve efficiency across multiple platforms. Industry experts are calling this one of the most significant developments of the year.",
        published_at: "2025-09-24 12:00:00",
        image_url: "https://picsum.photos/400/300?random=1",
        source_id: "tech_news",
        source_priority: 1,
        source_name: "Tech News Daily",
        source_url: "https://technews.com",
        countries: &["us"],
        categories: &["technology"],
        keywords: &["technology", "breakthrough", "innovation", "science"],
        creator: "John Doe",
        ai_tag: "Technology",
    },
    SampleSpec {
        id: "sample-002",
        title: "Global Markets Show Strong Performance",
        link: "https://example.com/markets",
        description: "Stock markets worldwide are experiencing unprecedented growth as investors show confidence in emerging technologies and sustainable development initiatives.",
        content: "Financial markets around the globe are witnessing remarkable performance as investors increasingly favor companies focused on innovation and sustainability. This trend reflects a broader shift in investment strategies toward future-oriented businesses.",
        published_at: "2025-09-24 11:30:00",
        image_url: "https://picsum.photos/400/300?random=2",
        source_id: "business_today",
        source_priority: 2,
        source_name: "Business Today",
        source_url: "https://businesstoday.com",
        countries: &["us", "gb"],
        categories: &["business"],
        keywords: &["markets", "stocks", "finance", "growth"],
        creator: "Jane Smith",
        ai_tag: "Business",
    },
    SampleSpec {
        id: "sample-003",
        title: "Climate Change Summit Reaches Historic Agreement",
        link: "https://example.com/climate-summit",
        description: "World leaders have reached a landmark agreement on climate action, setting ambitious targets for reducing carbon emissions and promoting renewable energy.",
        content: "In a historic moment for environmental policy, world leaders from over 190 countries have unanimously agreed to accelerate climate action. The comprehensive agreement includes binding commitments to reduce greenhouse gas emissions by 50% within the next decade.",
        published_at: "2025-09-24 10:45:00",
        image_url: "https://picsum.photos/400/300?random=3",
        source_id: "world_news",
        source_priority: 1,
        source_name: "World News Network",
        source_url: "https://worldnews.com",
        countries: &["us", "gb", "ca"],
        categories: &["environment", "politics"],
        keywords: &["climate", "environment", "summit", "agreement"],
        creator: "Sarah Johnson",
        ai_tag: "Environment",
    },
    SampleSpec {
        id: "sample-004",
        title: "Sports: Championship Finals Draw Record Audience",
        link: "https://example.com/sports-finals",
        description: "The championship finals attracted millions of viewers worldwide, breaking previous viewership records and showcasing exceptional athletic performance.",
        content: "Last night's championship finals captivated audiences around the world, with viewership numbers reaching an all-time high. The thrilling match showcased incredible skill and determination from both teams, making it one of the most memorable sporting events of the year.",
        published_at: "2025-09-24 09:15:00",
        image_url: "https://picsum.photos/400/300?random=4",
        source_id: "sports_central",
        source_priority: 3,
        source_name: "Sports Central",
        source_url: "https://sportscentral.com",
        countries: &["us"],
        categories: &["sports"],
        keywords: &["sports", "championship", "finals", "record"],
        creator: "Mike Wilson",
        ai_tag: "Sports",
    },
    SampleSpec {
        id: "sample-005",
        title: "Health: New Research Shows Promise for Disease Treatment",
        link: "https://example.com/health-research",
        description: "Medical researchers have published groundbreaking findings that could lead to more effective treatments for a variety of diseases.",
        content: "A team of international researchers has published findings that represent a significant step forward in medical science. The research focuses on innovative treatment approaches that could benefit millions of patients worldwide.",
        published_at: "2025-09-24 08:30:00",
        image_url: "https://picsum.photos/400/300?random=5",
        source_id: "health_today",
        source_priority: 2,
        source_name: "Health Today",
        source_url: "https://healthtoday.com",
        countries: &["us", "gb"],
        categories: &["health"],
        keywords: &["health", "research", "medical", "treatment"],
        creator: "Dr. Emily Chen",
        ai_tag: "Health",
    },
    SampleSpec {
        id: "sample-006",
        title: "Entertainment: Film Festival Celebrates Independent Cinema",
        link: "https://example.com/film-festival",
        description: "The annual film festival showcases the best of independent cinema, featuring diverse stories from emerging filmmakers around the world.",
        content: "This year's film festival has been particularly noteworthy for its emphasis on diverse storytelling and innovative cinematography. Independent filmmakers from around the globe have presented compelling narratives that challenge conventional thinking.",
        published_at: "2025-09-24 07:45:00",
        image_url: "https://picsum.photos/400/300?random=6",
        source_id: "entertainment_weekly",
        source_priority: 4,
        source_name: "Entertainment Weekly",
        source_url: "https://ew.com",
        countries: &["us"],
        categories: &["entertainment"],
        keywords: &["film", "festival", "cinema", "entertainment"],
        creator: "Alex Rodriguez",
        ai_tag: "Entertainment",
    },
];

fn build(spec: &SampleSpec) -> Article {
    Article {
        id: spec.id.to_string(),
        title: spec.title.to_string(),
        link: spec.link.to_string(),
        description: Some(spec.description.to_string()),
        content: Some(spec.content.to_string()),
        published_at: spec.published_at.to_string(),
        image_url: Some(spec.image_url.to_string()),
        source_id: spec.source_id.to_string(),
        source_priority: spec.source_priority,
        source_name: spec.source_name.to_string(),
        source_url: spec.source_url.to_string(),
        source_icon: Some(format!("{}/icon.png", spec.source_url)),
        language: "en".to_string(),
        countries: spec.countries.iter().map(|s| s.to_string()).collect(),
        categories: spec.categories.iter().map(|s| s.to_string()).collect(),
        keywords: Some(spec.keywords.iter().map(|s| s.to_string()).collect()),
        creators: Some(vec![spec.creator.to_string()]),
        ai_tag: Some(spec.ai_tag.to_string()),
        sentiment: Some("positive".to_string()),
        duplicate: None,
    }
}

/// The full bundled dataset, most-recent-first.
pub fn articles() -> Vec<Article> {
    SAMPLES.iter().map(build).collect()
}

/// Samples tagged with the given category (case-insensitive).
pub fn category_articles(category: &str) -> Vec<Article> {
    articles()
        .into_iter()
        .filter(|a| a.categories.iter().any(|c| c.eq_ignore_ascii_case(category)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_six_articles_with_reserved_ids() {
        let samples = articles();
        assert_eq!(samples.len(), 6);

        let ids: HashSet<_> = samples.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
        assert!(samples.iter().all(|a| a.id.starts_with("sample-")));
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let business = category_articles("Business");
        assert_eq!(business.len(), 1);
        assert_eq!(business[0].id, "sample-002");

        assert!(category_articles("food").is_empty());
    }
}
