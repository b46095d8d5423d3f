use serde::{Deserialize, Serialize};

/// Weight contributed by each scoring signal when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub min_content_length_met: f64,
    pub has_about_section: f64,
    pub has_about_link: f64,
    pub phrase_match: f64,
    pub keyword_match: f64,
    /// Negative: subtracted when the text looks like a careers/pricing/legal page
    pub irrelevant_keyword_penalty: f64,
    pub url_contains_about: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            min_content_length_met: 1.5,
            has_about_section: 1.5,
            has_about_link: 0.5,
            phrase_match: 0.7,
            keyword_match: 0.3,
            irrelevant_keyword_penalty: -0.5,
            url_contains_about: 0.7,
        }
    }
}

/// Configuration for the scrape-quality classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub weights: ScoreWeights,

    /// Score at or above which text is considered a good about-page scrape (default: 2.0)
    pub threshold: f64,

    /// Character floor for the minimum-length signal (default: 50)
    pub min_content_length: usize,

    /// Canonical "about us" phrases, matched as lowercase substrings
    pub phrases: Vec<String>,

    /// Single-word stems, weaker evidence than phrases
    pub keywords: Vec<String>,

    /// Whole words that mark a page as careers/pricing/legal/etc.
    pub irrelevant_keywords: Vec<String>,

    /// Whole words in a URL that suggest an about page
    pub about_url_keywords: Vec<String>,

    /// Heading prefixes that mark an about section in markup
    pub about_headings: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            threshold: 2.0,
            min_content_length: 50,
            phrases: to_strings(DEFAULT_PHRASES),
            keywords: to_strings(DEFAULT_KEYWORDS),
            irrelevant_keywords: to_strings(DEFAULT_IRRELEVANT_KEYWORDS),
            about_url_keywords: to_strings(DEFAULT_ABOUT_URL_KEYWORDS),
            about_headings: to_strings(DEFAULT_ABOUT_HEADINGS),
        }
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub const DEFAULT_PHRASES: &[&str] = &[
    "about us", "who we are", "our mission", "our vision", "our values", "company profile",
    "about our company", "about the company", "our story", "company history", "our history",
    "our background", "vision and mission", "purpose and values", "what we do", "why choose us",
    "meet the team", "leadership team", "management team", "our leadership", "our team",
    "corporate overview", "company overview", "our company", "founders", "from the founder",
    "corporate mission", "corporate vision", "our purpose", "our core values", "our culture",
    "what drives us", "our commitment", "quality and innovation",
    "sustainability and responsibility", "employee spotlight", "who we serve",
    "customers and partners", "community engagement", "corporate responsibility",
    "board of directors", "executive team", "brand story", "our approach", "our goals",
    "company milestones", "our achievements", "industry expertise", "what we're doing",
    "our work", "our services", "our solutions", "how we help", "our firm",
    "our company info", "company information", "firm overview", "our heritage",
];

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "about", "mission", "vision", "values", "history", "team", "leadership", "story",
    "company", "corporate", "overview", "profile", "purpose", "culture", "commitment",
    "quality", "innovation", "sustainability", "responsibility", "employees", "customers",
    "partners", "community", "expertise", "approach", "goals", "milestones", "achievements",
];

pub const DEFAULT_IRRELEVANT_KEYWORDS: &[&str] = &[
    "careers", "jobs", "news", "blog", "investors", "press", "media", "contact", "support",
    "faq", "products", "services", "solutions", "partners", "customers", "client", "privacy",
    "terms", "legal", "cookies", "sitemap", "login", "signin", "register", "cart", "shop",
    "store", "ecommerce", "price", "pricing", "subscribe", "forum", "community", "event",
    "events", "webinar", "webinars", "download", "downloads", "brochure", "whitepaper",
    "case study", "testimonials", "feedback",
];

pub const DEFAULT_ABOUT_URL_KEYWORDS: &[&str] = &[
    "about", "who-we-are", "our-story", "mission", "vision", "values", "company-profile",
    "corporate", "history", "team", "leadership", "overview", "philosophy", "purpose",
    "culture", "approach", "goals", "milestones", "achievements",
];

pub const DEFAULT_ABOUT_HEADINGS: &[&str] = &[
    "About", "Who We Are", "Our Story", "Our Mission", "Our Vision", "Our Values",
    "Company Profile",
];
