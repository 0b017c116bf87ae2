//! Compiled-in resource library shown in the Resources windows.

use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Documentation,
    Protocols,
    Glossary,
}

impl ResourceKind {
    pub const ALL: [Self; 3] = [Self::Documentation, Self::Protocols, Self::Glossary];

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "documentation" | "docs" => Ok(Self::Documentation),
            "protocols" | "protocol" => Ok(Self::Protocols),
            "glossary" => Ok(Self::Glossary),
            other => Err(format!(
                "Unsupported resource kind '{other}' (expected documentation|protocols|glossary)"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::Protocols => "protocols",
            Self::Glossary => "glossary",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSection {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceArticle {
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub sections: Vec<ResourceSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResourceLibrary {
    schema: String,
    reference: String,
    #[serde(default)]
    articles: Vec<ResourceArticle>,
}

static LIBRARY: OnceLock<Result<ResourceLibrary, String>> = OnceLock::new();

fn parse_library(raw: &str) -> Result<ResourceLibrary, String> {
    serde_json::from_str::<ResourceLibrary>(raw)
        .map_err(|e| format!("Could not parse docs/resource_library.json: {e}"))
}

fn library() -> Result<&'static ResourceLibrary, String> {
    match LIBRARY.get_or_init(|| {
        let raw = include_str!("../docs/resource_library.json");
        parse_library(raw)
    }) {
        Ok(library) => Ok(library),
        Err(err) => Err(err.clone()),
    }
}

pub fn library_schema() -> Result<&'static str, String> {
    Ok(&library()?.schema)
}

/// Citation line shown under every article.
pub fn reference() -> Result<&'static str, String> {
    Ok(&library()?.reference)
}

pub fn article(kind: ResourceKind) -> Result<&'static ResourceArticle, String> {
    library()?
        .articles
        .iter()
        .find(|article| article.kind == kind.as_str())
        .ok_or_else(|| format!("Resource library has no '{}' article", kind.as_str()))
}

pub fn article_text(kind: ResourceKind) -> Result<String, String> {
    let article = article(kind)?;
    let mut out = String::new();
    out.push_str(&article.title);
    out.push('\n');
    out.push_str(&article.subtitle);
    out.push_str("\n\n");
    for section in &article.sections {
        out.push_str(&section.heading);
        out.push('\n');
        out.push_str("  ");
        out.push_str(&section.body);
        out.push('\n');
    }
    out.push_str(reference()?);
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_sections() {
        for kind in ResourceKind::ALL {
            let article = article(kind).expect("article present");
            assert_eq!(article.kind, kind.as_str());
            assert!(!article.title.is_empty());
            assert!(!article.sections.is_empty(), "{}", kind.as_str());
        }
        assert_eq!(article(ResourceKind::Documentation).unwrap().sections.len(), 5);
        assert_eq!(article(ResourceKind::Protocols).unwrap().sections.len(), 3);
        assert_eq!(article(ResourceKind::Glossary).unwrap().sections.len(), 6);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(
            ResourceKind::parse("Protocols").unwrap(),
            ResourceKind::Protocols
        );
        assert_eq!(
            ResourceKind::parse("docs").unwrap(),
            ResourceKind::Documentation
        );
        let err = ResourceKind::parse("wiki").unwrap_err();
        assert!(err.contains("Unsupported resource kind"), "{err}");
    }

    #[test]
    fn test_article_text_rendering() {
        let text = article_text(ResourceKind::Documentation).expect("render documentation");
        assert!(text.starts_with("System Documentation\n"));
        assert!(text.contains("MADS-box: Morphogenetic Architects"));
        assert!(text.trim_end().ends_with("Ref: FG-Atlas-v1.7.0"));
    }

    #[test]
    fn test_library_metadata() {
        assert_eq!(library_schema().unwrap(), "mycoatlas.resource_library.v1");
        assert_eq!(reference().unwrap(), "Ref: FG-Atlas-v1.7.0");
    }
}
