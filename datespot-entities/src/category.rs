use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// The fixed set of spot categories.
#[rustfmt::skip]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumCount, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Outdoor,
    Indoor,
    Food,
    Culture,
    Adventure,
    Romantic,
    Water,
    View,
    Entertainment,
}

impl Category {
    pub const fn default() -> Self {
        Self::Romantic
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Romantic => "💕 Romantic",
            Self::Food => "🍽️ Food & Drinks",
            Self::Outdoor => "🌳 Outdoor",
            Self::Indoor => "🏠 Indoor",
            Self::Culture => "🎭 Arts & Culture",
            Self::Adventure => "🎯 Adventure",
            Self::Water => "🌊 Water Activities",
            Self::View => "🌆 Viewpoints",
            Self::Entertainment => "🎪 Entertainment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_categories() {
        assert_eq!(Category::COUNT, 9);
        assert_eq!(Category::all().count(), 9);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("water".parse::<Category>(), Ok(Category::Water));
        assert_eq!("Entertainment".parse::<Category>(), Ok(Category::Entertainment));
        assert!("nightlife".parse::<Category>().is_err());
        assert_eq!(Category::View.to_string(), "view");
        assert_eq!(Category::Food.as_ref(), "food");
    }
}
