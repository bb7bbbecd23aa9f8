//! The category pages: one template, configured per category.

use serde::Serialize;

/// Static description of a category page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub slug: &'static str,
    /// Also the `category` value sent to the search API.
    pub display_name: &'static str,
    pub tagline: &'static str,
    pub theme_color: &'static str,
    pub icon: &'static str,
    pub subcategories: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Categories {
    GraphicsDesign,
    ProgrammingTech,
    DigitalMarketing,
    WritingTranslation,
    VideoAnimation,
    MusicAudio,
    Business,
    Data,
    Photography,
    AiServices,
}

impl Categories {
    pub const ALL: [Categories; 10] = [
        Categories::GraphicsDesign,
        Categories::ProgrammingTech,
        Categories::DigitalMarketing,
        Categories::WritingTranslation,
        Categories::VideoAnimation,
        Categories::MusicAudio,
        Categories::Business,
        Categories::Data,
        Categories::Photography,
        Categories::AiServices,
    ];

    pub fn config(self) -> &'static CategoryConfig {
        match self {
            Categories::GraphicsDesign => &GRAPHICS_DESIGN,
            Categories::ProgrammingTech => &PROGRAMMING_TECH,
            Categories::DigitalMarketing => &DIGITAL_MARKETING,
            Categories::WritingTranslation => &WRITING_TRANSLATION,
            Categories::VideoAnimation => &VIDEO_ANIMATION,
            Categories::MusicAudio => &MUSIC_AUDIO,
            Categories::Business => &BUSINESS,
            Categories::Data => &DATA,
            Categories::Photography => &PHOTOGRAPHY,
            Categories::AiServices => &AI_SERVICES,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.config().slug == slug)
    }

    pub fn href(self) -> String {
        format!("/categories/{}", self.config().slug)
    }
}

static GRAPHICS_DESIGN: CategoryConfig = CategoryConfig {
    slug: "graphics-design",
    display_name: "Graphics & Design",
    tagline: "Designs to make you stand out",
    theme_color: "#ec4899",
    icon: "palette",
    subcategories: &[
        "Logo Design",
        "Brand Style Guides",
        "Illustration",
        "Web & App Design",
        "Packaging Design",
        "Social Media Design",
    ],
};

static PROGRAMMING_TECH: CategoryConfig = CategoryConfig {
    slug: "programming-tech",
    display_name: "Programming & Tech",
    tagline: "You think it. A programmer develops it",
    theme_color: "#3b82f6",
    icon: "code",
    subcategories: &[
        "Website Development",
        "Mobile Apps",
        "Desktop Applications",
        "Chatbots",
        "Cybersecurity",
        "DevOps & Cloud",
    ],
};

static DIGITAL_MARKETING: CategoryConfig = CategoryConfig {
    slug: "digital-marketing",
    display_name: "Digital Marketing",
    tagline: "Build your brand. Grow your business",
    theme_color: "#f97316",
    icon: "megaphone",
    subcategories: &[
        "Search Engine Optimization",
        "Social Media Marketing",
        "Content Marketing",
        "Email Marketing",
        "Video Marketing",
    ],
};

static WRITING_TRANSLATION: CategoryConfig = CategoryConfig {
    slug: "writing-translation",
    display_name: "Writing & Translation",
    tagline: "Get your words across in any language",
    theme_color: "#10b981",
    icon: "pen",
    subcategories: &[
        "Articles & Blog Posts",
        "Translation",
        "Proofreading & Editing",
        "Website Content",
        "Resume Writing",
    ],
};

static VIDEO_ANIMATION: CategoryConfig = CategoryConfig {
    slug: "video-animation",
    display_name: "Video & Animation",
    tagline: "Bring your story to life with creative videos",
    theme_color: "#8b5cf6",
    icon: "film",
    subcategories: &[
        "Video Editing",
        "Animated Explainers",
        "Logo Animation",
        "Short Video Ads",
        "3D Product Animation",
    ],
};

static MUSIC_AUDIO: CategoryConfig = CategoryConfig {
    slug: "music-audio",
    display_name: "Music & Audio",
    tagline: "Don't miss a beat. Get the sound you need",
    theme_color: "#ef4444",
    icon: "music",
    subcategories: &[
        "Voice Over",
        "Mixing & Mastering",
        "Producers & Composers",
        "Podcast Editing",
        "Sound Design",
    ],
};

static BUSINESS: CategoryConfig = CategoryConfig {
    slug: "business",
    display_name: "Business",
    tagline: "Business to business. Expert to expert",
    theme_color: "#0ea5e9",
    icon: "briefcase",
    subcategories: &[
        "Virtual Assistant",
        "Market Research",
        "Business Plans",
        "Financial Consulting",
        "Legal Consulting",
    ],
};

static DATA: CategoryConfig = CategoryConfig {
    slug: "data",
    display_name: "Data",
    tagline: "Turn your data into decisions",
    theme_color: "#14b8a6",
    icon: "database",
    subcategories: &[
        "Data Entry",
        "Data Analytics",
        "Data Visualization",
        "Data Science",
        "Databases",
    ],
};

static PHOTOGRAPHY: CategoryConfig = CategoryConfig {
    slug: "photography",
    display_name: "Photography",
    tagline: "Picture-perfect shots for every need",
    theme_color: "#eab308",
    icon: "camera",
    subcategories: &[
        "Product Photography",
        "Photo Editing",
        "Portrait Photography",
        "Real Estate Photography",
    ],
};

static AI_SERVICES: CategoryConfig = CategoryConfig {
    slug: "ai-services",
    display_name: "AI Services",
    tagline: "Put artificial intelligence to work",
    theme_color: "#6366f1",
    icon: "sparkles",
    subcategories: &[
        "AI Applications",
        "AI Chatbot Development",
        "AI Art & Prompting",
        "AI Consulting",
        "Data Labeling",
    ],
};
