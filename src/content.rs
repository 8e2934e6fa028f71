//! Content tables served by the public API.

/// Closed set of localizable content tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    News,
    Region,
    Staff,
    Document,
    GalleryItem,
    Slide,
    HistoryEvent,
    SiteStat,
    Partner,
}

impl ContentKind {
    pub const ALL: [ContentKind; 9] = [
        ContentKind::News,
        ContentKind::Region,
        ContentKind::Staff,
        ContentKind::Document,
        ContentKind::GalleryItem,
        ContentKind::Slide,
        ContentKind::HistoryEvent,
        ContentKind::SiteStat,
        ContentKind::Partner,
    ];

    /// URL path segment, e.g. `/api/content/gallery`.
    pub fn slug(&self) -> &'static str {
        match self {
            ContentKind::News => "news",
            ContentKind::Region => "regions",
            ContentKind::Staff => "staff",
            ContentKind::Document => "documents",
            ContentKind::GalleryItem => "gallery",
            ContentKind::Slide => "slides",
            ContentKind::HistoryEvent => "history",
            ContentKind::SiteStat => "stats",
            ContentKind::Partner => "partners",
        }
    }

    pub fn from_slug(slug: &str) -> Option<ContentKind> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Quoted table name. Only ever interpolated from this static table.
    pub fn table(&self) -> &'static str {
        match self {
            ContentKind::News => "\"News\"",
            ContentKind::Region => "\"Region\"",
            ContentKind::Staff => "\"Staff\"",
            ContentKind::Document => "\"Document\"",
            ContentKind::GalleryItem => "\"GalleryItem\"",
            ContentKind::Slide => "\"Slide\"",
            ContentKind::HistoryEvent => "\"HistoryEvent\"",
            ContentKind::SiteStat => "\"SiteStat\"",
            ContentKind::Partner => "\"Partner\"",
        }
    }

    /// Base names of the columns that carry `Kk`/`En` variants.
    pub fn localized_fields(&self) -> &'static [&'static str] {
        match self {
            ContentKind::News => &["title", "excerpt", "content"],
            ContentKind::Region => &["name", "description"],
            ContentKind::Staff => &["name", "position", "bio"],
            ContentKind::Document => &["title", "description"],
            ContentKind::GalleryItem => &["title", "description"],
            ContentKind::Slide => &["title", "subtitle", "buttonText"],
            ContentKind::HistoryEvent => &["title", "description"],
            ContentKind::SiteStat => &["label"],
            ContentKind::Partner => &["name", "description"],
        }
    }

    /// ORDER BY clause for list queries.
    pub fn order_by(&self) -> &'static str {
        match self {
            ContentKind::News => "\"publishedAt\" DESC, id DESC",
            ContentKind::HistoryEvent => "\"year\" ASC, id ASC",
            _ => "\"order\" ASC, id ASC",
        }
    }
}
