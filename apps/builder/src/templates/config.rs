use serde::{Deserialize, Serialize};

/// Whether an entry styles the exported resume or the editor chrome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Document,
    Theme,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tier {
    Free,
    Premium { price_cents: u32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Modern,
    Classic,
    Minimalist,
    Creative,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeaderAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    Compact,
    Standard,
    Spacious,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

/// Hex colours. `surface` and `text_secondary` are only set on themes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionVisibility {
    pub personal_info: bool,
    pub summary: bool,
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub projects: bool,
    pub certifications: bool,
}

impl SectionVisibility {
    pub const ALL: SectionVisibility = SectionVisibility {
        personal_info: true,
        summary: true,
        experience: true,
        education: true,
        skills: true,
        projects: true,
        certifications: true,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeEffects {
    pub blur: bool,
    pub glow: bool,
    pub shadow: bool,
    pub glassmorphism: bool,
    /// CSS gradient for the primary surface.
    pub gradient: String,
}

/// One presentation configuration, fully resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: TemplateKind,
    pub tier: Tier,
    pub colors: Palette,
    pub fonts: Fonts,
    pub layout: LayoutKind,
    pub header: HeaderAlign,
    pub spacing: Spacing,
    pub font_size: FontSize,
    pub sections: SectionVisibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<ThemeEffects>,
}

impl TemplateConfig {
    pub fn is_premium(&self) -> bool {
        matches!(self.tier, Tier::Premium { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_serializes_flat_under_kind_tag() {
        let premium = serde_json::to_value(Tier::Premium { price_cents: 999 }).unwrap();
        assert_eq!(premium, json!({ "kind": "premium", "price_cents": 999 }));
        let free = serde_json::to_value(Tier::Free).unwrap();
        assert_eq!(free, json!({ "kind": "free" }));
    }

    #[test]
    fn test_tier_reads_back_from_kind_tag() {
        let tier: Tier = serde_json::from_value(json!({ "kind": "premium", "price_cents": 599 })).unwrap();
        assert_eq!(tier, Tier::Premium { price_cents: 599 });
    }
}
