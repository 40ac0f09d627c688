use once_cell::sync::Lazy;

use crate::templates::config::{
    FontSize, Fonts, HeaderAlign, LayoutKind, Palette, SectionVisibility, Spacing,
    TemplateConfig, TemplateKind, ThemeEffects, Tier,
};

pub const DEFAULT_TEMPLATE_ID: &str = "modern";
pub const DEFAULT_THEME_ID: &str = "free-modern";

static BUILTIN: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::builtin);

/// Read-only catalog of document templates and editor themes.
///
/// Lookups never fail: unknown or missing ids resolve to the first template
/// (`modern`) or the free theme respectively.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<TemplateConfig>,
    themes: Vec<TemplateConfig>,
}

impl TemplateRegistry {
    /// The process-wide built-in catalog, built on first use.
    pub fn global() -> &'static TemplateRegistry {
        &BUILTIN
    }

    pub fn builtin() -> Self {
        TemplateRegistry {
            templates: builtin_templates(),
            themes: builtin_themes(),
        }
    }

    pub fn get_template(&self, id: Option<&str>) -> &TemplateConfig {
        id.and_then(|id| self.templates.iter().find(|t| t.id == id))
            .unwrap_or(&self.templates[0])
    }

    pub fn get_theme(&self, id: Option<&str>) -> &TemplateConfig {
        id.and_then(|id| self.themes.iter().find(|t| t.id == id))
            .or_else(|| self.themes.iter().find(|t| t.id == DEFAULT_THEME_ID))
            .unwrap_or(&self.themes[0])
    }

    pub fn contains_template(&self, id: &str) -> bool {
        self.templates.iter().any(|t| t.id == id)
    }

    pub fn templates(&self) -> &[TemplateConfig] {
        &self.templates
    }

    pub fn themes(&self) -> &[TemplateConfig] {
        &self.themes
    }

    pub fn free_themes(&self) -> impl Iterator<Item = &TemplateConfig> {
        self.themes.iter().filter(|t| !t.is_premium())
    }

    pub fn premium_themes(&self) -> impl Iterator<Item = &TemplateConfig> {
        self.themes.iter().filter(|t| t.is_premium())
    }
}

/// Resolves a template id against the built-in catalog.
pub fn get_template(id: Option<&str>) -> &'static TemplateConfig {
    TemplateRegistry::global().get_template(id)
}

pub fn get_theme(id: Option<&str>) -> &'static TemplateConfig {
    TemplateRegistry::global().get_theme(id)
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in catalog
// ────────────────────────────────────────────────────────────────────────────

struct DocumentDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    colors: [&'static str; 5],
    layout: LayoutKind,
    header: HeaderAlign,
    spacing: Spacing,
    font: &'static str,
    font_size: FontSize,
}

fn document(def: DocumentDef) -> TemplateConfig {
    let [primary, secondary, accent, text, background] = def.colors;
    TemplateConfig {
        id: def.id.to_string(),
        name: def.name.to_string(),
        description: def.description.to_string(),
        kind: TemplateKind::Document,
        tier: Tier::Free,
        colors: Palette {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            text: text.to_string(),
            background: background.to_string(),
            surface: None,
            text_secondary: None,
        },
        fonts: Fonts {
            heading: def.font.to_string(),
            body: def.font.to_string(),
        },
        layout: def.layout,
        header: def.header,
        spacing: def.spacing,
        font_size: def.font_size,
        sections: SectionVisibility::ALL,
        effects: None,
    }
}

fn builtin_templates() -> Vec<TemplateConfig> {
    vec![
        document(DocumentDef {
            id: "modern",
            name: "Modern",
            description: "Clean and contemporary design perfect for tech professionals",
            colors: ["#3b82f6", "#6b7280", "#8b5cf6", "#1f2937", "#ffffff"],
            layout: LayoutKind::Modern,
            header: HeaderAlign::Left,
            spacing: Spacing::Standard,
            font: "Inter",
            font_size: FontSize::Medium,
        }),
        document(DocumentDef {
            id: "executive",
            name: "Executive",
            description: "Bold and authoritative layout for senior positions",
            colors: ["#1f2937", "#6b7280", "#dc2626", "#111827", "#ffffff"],
            layout: LayoutKind::Classic,
            header: HeaderAlign::Center,
            spacing: Spacing::Spacious,
            font: "Georgia",
            font_size: FontSize::Large,
        }),
        document(DocumentDef {
            id: "creative",
            name: "Creative",
            description: "Colorful and artistic design for creative professionals",
            colors: ["#ec4899", "#6b7280", "#f59e0b", "#1f2937", "#ffffff"],
            layout: LayoutKind::Creative,
            header: HeaderAlign::Center,
            spacing: Spacing::Standard,
            font: "Poppins",
            font_size: FontSize::Medium,
        }),
        document(DocumentDef {
            id: "minimal",
            name: "Minimal",
            description: "Simple and elegant layout with focus on content",
            colors: ["#374151", "#9ca3af", "#6366f1", "#111827", "#ffffff"],
            layout: LayoutKind::Minimalist,
            header: HeaderAlign::Left,
            spacing: Spacing::Compact,
            font: "Helvetica",
            font_size: FontSize::Small,
        }),
    ]
}

struct ThemeDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: Option<u32>,
    /// primary, secondary, accent, background, surface, text, text_secondary
    colors: [&'static str; 7],
    gradient: &'static str,
    effects: [bool; 4],
}

fn theme(def: ThemeDef) -> TemplateConfig {
    let [primary, secondary, accent, background, surface, text, text_secondary] = def.colors;
    let [blur, glow, shadow, glassmorphism] = def.effects;
    TemplateConfig {
        id: def.id.to_string(),
        name: def.name.to_string(),
        description: def.description.to_string(),
        kind: TemplateKind::Theme,
        tier: match def.price_cents {
            Some(price_cents) => Tier::Premium { price_cents },
            None => Tier::Free,
        },
        colors: Palette {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            text: text.to_string(),
            background: background.to_string(),
            surface: Some(surface.to_string()),
            text_secondary: Some(text_secondary.to_string()),
        },
        fonts: Fonts {
            heading: "Inter".to_string(),
            body: "Inter".to_string(),
        },
        layout: LayoutKind::Modern,
        header: HeaderAlign::Left,
        spacing: Spacing::Standard,
        font_size: FontSize::Medium,
        sections: SectionVisibility::ALL,
        effects: Some(ThemeEffects {
            blur,
            glow,
            shadow,
            glassmorphism,
            gradient: def.gradient.to_string(),
        }),
    }
}

fn builtin_themes() -> Vec<TemplateConfig> {
    vec![
        theme(ThemeDef {
            id: "cyberpunk",
            name: "Cyberpunk Neon",
            description: "Futuristic neon aesthetic with electric gradients",
            price_cents: Some(999),
            colors: [
                "#00ff88", "#ff0080", "#00d4ff", "#0a0a0a", "#1a1a1a", "#ffffff", "#a0a0a0",
            ],
            gradient: "linear-gradient(135deg, #00ff88 0%, #00d4ff 100%)",
            effects: [true, true, true, true],
        }),
        theme(ThemeDef {
            id: "aurora",
            name: "Aurora Borealis",
            description: "Northern lights inspired with flowing gradients",
            price_cents: Some(799),
            colors: [
                "#00f5ff", "#ff00ff", "#00ff00", "#000428", "#004e92", "#ffffff", "#b8d4f0",
            ],
            gradient: "linear-gradient(135deg, #00f5ff 0%, #ff00ff 50%, #00ff00 100%)",
            effects: [true, true, true, false],
        }),
        theme(ThemeDef {
            id: "sunset",
            name: "Sunset Vibes",
            description: "Warm sunset colors with smooth transitions",
            price_cents: Some(599),
            colors: [
                "#ff6b35", "#f7931e", "#ffd23f", "#ff9a9e", "#fecfef", "#2c3e50", "#7f8c8d",
            ],
            gradient: "linear-gradient(135deg, #ff6b35 0%, #f7931e 100%)",
            effects: [false, true, true, false],
        }),
        theme(ThemeDef {
            id: "ocean",
            name: "Ocean Depths",
            description: "Deep ocean blues with wave-like animations",
            price_cents: Some(699),
            colors: [
                "#00b4db", "#0083b0", "#00d4aa", "#0f0f23", "#1a1a2e", "#ffffff", "#a8dadc",
            ],
            gradient: "linear-gradient(135deg, #00b4db 0%, #0083b0 100%)",
            effects: [true, true, true, true],
        }),
        theme(ThemeDef {
            id: DEFAULT_THEME_ID,
            name: "Modern Free",
            description: "Clean modern design - Free tier",
            price_cents: None,
            colors: [
                "#3b82f6", "#64748b", "#06b6d4", "#ffffff", "#f8fafc", "#1e293b", "#64748b",
            ],
            gradient: "linear-gradient(135deg, #3b82f6 0%, #1d4ed8 100%)",
            effects: [false, false, true, false],
        }),
    ]
}
