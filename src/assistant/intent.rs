//! Keyword intent classification.

/// Category a free-text query resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Average ROI across managed clients.
    Roi,
    /// The most recent activities.
    Activity,
    /// Active client count and top ROI.
    Clients,
    /// Assessment completion counts.
    Tests,
    /// Nothing matched; generic help.
    Help,
}

/// Keyword groups in priority order. The first group with a keyword
/// contained in the lower-cased query wins.
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Roi, &["roi", "return on investment"]),
    (Intent::Activity, &["activity", "recent"]),
    (Intent::Clients, &["client", "customer"]),
    (Intent::Tests, &["test", "assessment"]),
];

impl Intent {
    /// Classifies a query by case-insensitive substring match.
    #[must_use]
    pub fn classify(query: &str) -> Self {
        let lowered = query.to_lowercase();
        INTENT_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map_or(Self::Help, |(intent, _)| *intent)
    }

    /// Returns the template name and log label for the intent.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Roi => "roi",
            Self::Activity => "activity",
            Self::Clients => "clients",
            Self::Tests => "tests",
            Self::Help => "help",
        }
    }
}
