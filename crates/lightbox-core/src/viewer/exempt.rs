use serde::{Deserialize, Serialize};

use crate::page::PageImage;

/// Why an image never opens the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exemption {
    Logo,
    VisitorCounter,
}

impl std::fmt::Display for Exemption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logo => write!(f, "Site logo"),
            Self::VisitorCounter => write!(f, "Visitor counter"),
        }
    }
}

/// Images matching any of these rules are never clickable. Matching is
/// case-insensitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExemptionRules {
    /// Classes on the image or an ancestor that mark the site logo.
    pub logo_classes: Vec<String>,
    /// Classes on the image or an ancestor that mark a visitor counter.
    pub counter_classes: Vec<String>,
    /// Source URL substrings of visitor counter badges.
    pub counter_src_substrings: Vec<String>,
    /// Alt-text substrings of visitor counter badges.
    pub counter_alt_substrings: Vec<String>,
}

impl Default for ExemptionRules {
    fn default() -> Self {
        Self {
            logo_classes: vec!["logo".into(), "nav-logo".into()],
            counter_classes: vec!["visitor-counter".into()],
            counter_src_substrings: vec![
                "visitor-badge".into(),
                "hits.".into(),
                "counter".into(),
            ],
            counter_alt_substrings: vec!["visitor".into(), "counter".into()],
        }
    }
}

impl ExemptionRules {
    /// No exemptions at all.
    pub fn none() -> Self {
        Self {
            logo_classes: Vec::new(),
            counter_classes: Vec::new(),
            counter_src_substrings: Vec::new(),
            counter_alt_substrings: Vec::new(),
        }
    }

    pub fn exemption(&self, image: &PageImage) -> Option<Exemption> {
        if self.logo_classes.iter().any(|c| image.has_class(c)) {
            return Some(Exemption::Logo);
        }
        let by_class = self.counter_classes.iter().any(|c| image.has_class(c));
        let by_src = contains_any(&image.src, &self.counter_src_substrings);
        let by_alt = contains_any(&image.alt, &self.counter_alt_substrings);
        (by_class || by_src || by_alt).then_some(Exemption::VisitorCounter)
    }

    pub fn is_exempt(&self, image: &PageImage) -> bool {
        self.exemption(image).is_some()
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .filter(|n| !n.is_empty())
        .any(|n| haystack.contains(&n.to_lowercase()))
}
