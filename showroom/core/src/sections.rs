//! Page Sections
//!
//! The showroom is one long page split into sections. Surfaces navigate
//! between them ("scroll to section") and render the static copy below.

/// Brand name
pub const BRAND: &str = "MiRRA";
/// Brand tagline under the hero title
pub const TAGLINE: &str = "style in sight";

/// Static page copy
pub mod copy {
    /// Hero call to action
    pub const DISCOVER_MORE: &str = "Discover More";

    /// Overview heading
    pub const OVERVIEW_HEADING: &str = "Redefining Fashion Experience";
    /// Overview body
    pub const OVERVIEW_BODY: &str = "MiRRA combines cutting-edge technology with fashion expertise to create a personalized shopping experience. Our platform offers virtual try-on capabilities and AI-powered styling recommendations to help you discover your perfect look without leaving your home.";
    /// Feature highlights: (title, blurb)
    pub const FEATURES: [(&str, &str); 2] = [
        ("Virtual Try-On", "See how clothes look on you before buying"),
        ("Smart Stylist", "AI-powered fashion advice tailored to you"),
    ];
    /// Overview call to action
    pub const TRY_IT_NOW: &str = "Try It Now";

    /// Upload panel heading
    pub const UPLOAD_HEADING: &str = "Upload Your Photo";
    /// Upload panel body
    pub const UPLOAD_BODY: &str = "See how our clothes look on you by uploading your photo or using your camera. Our AI will fit the garments to your body shape and size.";
    /// Drop area text while something is dragged over it
    pub const DROP_ACTIVE: &str = "Drop your photo here";
    /// Drop area text otherwise
    pub const DROP_IDLE: &str = "Drag and drop your photo here or use the buttons above";
    /// Results panel heading
    pub const RESULTS_HEADING: &str = "Try-On Results";
    /// Results panel text before any upload
    pub const RESULTS_EMPTY: &str = "Upload a photo to see virtual try-on results";

    /// Chat panel heading
    pub const CHAT_HEADING: &str = "Chat with Your Personal Stylist";
    /// Chat input placeholder
    pub const CHAT_PLACEHOLDER: &str = "Ask about style recommendations...";
    /// Recommendations panel heading
    pub const RECOMMENDED_HEADING: &str = "Recommended for You";

    /// Product card action
    pub const ADD_TO_CART: &str = "Add to Cart";

    /// Contact panel heading
    pub const CONTACT_HEADING: &str = "Get in Touch";
    /// Contact panel body
    pub const CONTACT_BODY: &str = "Have questions about our products or services? We'd love to hear from you. Fill out the form and our team will get back to you as soon as possible.";
    /// Contact form button (does nothing)
    pub const SEND_MESSAGE: &str = "Send Message";
}

/// A section of the page, in page order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    /// Brand title, tagline and sparkles
    #[default]
    Hero,
    /// "Welcome to MiRRA"
    Overview,
    /// Photo upload and preview
    TryOn,
    /// Chat and recommendations
    Stylist,
    /// Product carousel
    Shop,
    /// Contact details and form
    Contact,
}

impl Section {
    /// All sections, top to bottom
    pub const ALL: [Section; 6] = [
        Self::Hero,
        Self::Overview,
        Self::TryOn,
        Self::Stylist,
        Self::Shop,
        Self::Contact,
    ];

    /// Heading shown at the top of the section
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Hero => BRAND,
            Self::Overview => "Welcome to MiRRA",
            Self::TryOn => "Virtual Try-On",
            Self::Stylist => "Smart Stylist",
            Self::Shop => "Our Shop",
            Self::Contact => "Contact Us",
        }
    }

    /// Short label for navigation tabs
    #[must_use]
    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::Overview => "Overview",
            Self::TryOn => "Try-On",
            Self::Stylist => "Stylist",
            Self::Shop => "Shop",
            Self::Contact => "Contact",
        }
    }

    /// Position on the page
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Hero => 0,
            Self::Overview => 1,
            Self::TryOn => 2,
            Self::Stylist => 3,
            Self::Shop => 4,
            Self::Contact => 5,
        }
    }

    /// Section at `index`, if any
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The section below, wrapping to the top
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The section above, wrapping to the bottom
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Where the hero and overview buttons lead
    #[must_use]
    pub fn call_to_action(&self) -> Option<(&'static str, Section)> {
        match self {
            Self::Hero => Some((copy::DISCOVER_MORE, Self::Overview)),
            Self::Overview => Some((copy::TRY_IT_NOW, Self::TryOn)),
            _ => None,
        }
    }
}
