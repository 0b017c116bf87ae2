//! Species catalog records and the built-in reference data.

use anyhow::{anyhow, Result};
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CATALOG_SCHEMA: &str = "mycoatlas.species_catalog.v1";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationalLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl EducationalLevel {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let norm = text.trim().to_ascii_lowercase();
        match norm.as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChromosomeFunction {
    Reproduction,
    Metabolism,
    Architecture,
    Defense,
    Maintenance,
    #[default]
    Unknown,
}

impl ChromosomeFunction {
    pub const ALL: [Self; 6] = [
        Self::Reproduction,
        Self::Metabolism,
        Self::Architecture,
        Self::Defense,
        Self::Maintenance,
        Self::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reproduction => "reproduction",
            Self::Metabolism => "metabolism",
            Self::Architecture => "architecture",
            Self::Defense => "defense",
            Self::Maintenance => "maintenance",
            Self::Unknown => "unknown",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Reproduction => "Reproduction",
            Self::Metabolism => "Metabolism",
            Self::Architecture => "Architecture",
            Self::Defense => "Defense",
            Self::Maintenance => "Maintenance",
            Self::Unknown => "Unknown",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let norm = text.trim().to_ascii_lowercase();
        match norm.as_str() {
            "reproduction" => Some(Self::Reproduction),
            "metabolism" => Some(Self::Metabolism),
            "architecture" => Some(Self::Architecture),
            "defense" => Some(Self::Defense),
            "maintenance" => Some(Self::Maintenance),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    // Every variant must map to a color here; adding a variant without a color
    // is a compile error, not a gray fallback.
    pub fn color(self) -> Color32 {
        match self {
            Self::Reproduction => Color32::from_rgb(168, 85, 247),
            Self::Metabolism => Color32::from_rgb(16, 185, 129),
            Self::Architecture => Color32::from_rgb(245, 158, 11),
            Self::Defense => Color32::from_rgb(244, 63, 94),
            Self::Maintenance => Color32::from_rgb(14, 165, 233),
            Self::Unknown => Color32::from_rgb(148, 163, 184),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Gene {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub technical_name: Option<String>,
    pub category: String,
    pub location: String,
    pub description: String,
    pub technical_description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Chromosome {
    pub id: u32,
    pub primary_function: ChromosomeFunction,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub beginner_label: String,
    #[serde(default)]
    pub intermediate_label: String,
    #[serde(default)]
    pub advanced_label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_highlight: bool,
    #[serde(default)]
    pub genes: Vec<Gene>,
}

impl Chromosome {
    pub fn label_for_level(&self, level: EducationalLevel) -> &str {
        match level {
            EducationalLevel::Beginner => &self.beginner_label,
            EducationalLevel::Intermediate => &self.intermediate_label,
            EducationalLevel::Advanced => &self.advanced_label,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TechnicalSynopsis {
    pub base_pairs: String,
    pub gene_count: String,
    pub strain_ref: String,
    pub gc_content: String,
    pub repeat_content: String,
    pub assembly_note: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    pub scientific_name: String,
    pub common_name: String,
    pub chromosome_count: u32,
    pub genome_size: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub difficulty: u8,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technical_synopsis: Option<TechnicalSynopsis>,
    // A catalog without this key reads as zero chromosomes, which the
    // integrity audit reports instead of failing to parse.
    #[serde(default)]
    pub chromosomes: Vec<Chromosome>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    schema: String,
    species: Vec<Species>,
}

impl SpeciesCatalog {
    pub fn from_species(species: Vec<Species>) -> Self {
        Self {
            schema: CATALOG_SCHEMA.to_string(),
            species,
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| anyhow!("Could not parse species catalog: {e}"))
    }

    pub fn from_json_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow!("Could not read species catalog '{path}': {e}"))?;
        serde_json::from_str(&text)
            .map_err(|e| anyhow!("Could not parse species catalog '{path}': {e}"))
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn get(&self, id: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        default_species_catalog()
    }
}

pub fn default_species_catalog() -> SpeciesCatalog {
    SpeciesCatalog::from_json_str(include_str!("../assets/species.json"))
        .expect("Invalid built-in species catalog")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog() {
        let catalog = default_species_catalog();
        assert_eq!(catalog.schema(), CATALOG_SCHEMA);
        assert_eq!(catalog.len(), 3);
        let ids: Vec<&str> = catalog.species().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["s-commune", "c-cinerea", "a-bisporus"]);

        let split_gill = catalog.get("s-commune").unwrap();
        assert_eq!(split_gill.chromosome_count, 14);
        assert_eq!(split_gill.chromosomes.len(), 14);
        assert_eq!(split_gill.chromosomes[0].genes.len(), 2);
        assert!(split_gill.chromosomes[0].is_highlight);
        assert!(split_gill.technical_synopsis.is_some());

        let inky_cap = catalog.get("c-cinerea").unwrap();
        let chr10 = &inky_cap.chromosomes[9];
        assert_eq!(chr10.id, 10);
        assert_eq!(chr10.primary_function, ChromosomeFunction::Defense);
        assert_eq!(chr10.genes[0].technical_name.as_deref(), Some("CHI-18"));

        assert!(catalog.get("x-unknown").is_none());
    }

    #[test]
    fn test_label_for_level() {
        let catalog = default_species_catalog();
        let chr1 = &catalog.get("s-commune").unwrap().chromosomes[0];
        assert_eq!(
            chr1.label_for_level(EducationalLevel::Beginner),
            "Identity (A-Locus)"
        );
        assert_eq!(
            chr1.label_for_level(EducationalLevel::Intermediate),
            "MAT-A Complex"
        );
        assert_eq!(
            chr1.label_for_level(EducationalLevel::Advanced),
            "Homeodomain HD1/HD2"
        );
    }

    #[test]
    fn test_function_parse_and_tokens() {
        assert_eq!(
            ChromosomeFunction::parse("Defense"),
            Some(ChromosomeFunction::Defense)
        );
        assert_eq!(
            ChromosomeFunction::parse(" UNKNOWN "),
            Some(ChromosomeFunction::Unknown)
        );
        assert_eq!(ChromosomeFunction::parse("mystery"), None);
        assert_eq!(ChromosomeFunction::Metabolism.as_str(), "metabolism");
        assert_eq!(
            ChromosomeFunction::Reproduction.color(),
            Color32::from_rgb(168, 85, 247)
        );
        assert_ne!(
            ChromosomeFunction::Unknown.color(),
            ChromosomeFunction::Metabolism.color()
        );
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(
            EducationalLevel::parse("ADVANCED"),
            Some(EducationalLevel::Advanced)
        );
        assert_eq!(EducationalLevel::parse("phd"), None);
        assert_eq!(EducationalLevel::default(), EducationalLevel::Beginner);
    }

    #[test]
    fn test_from_json_file_with_missing_chromosome_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"{
  "schema": "mycoatlas.species_catalog.v1",
  "species": [
    {
      "id": "x-test",
      "scientific_name": "Examplea testii",
      "common_name": "Test Cap",
      "chromosome_count": 4,
      "genome_size": "12 Mb"
    }
  ]
}"#;
        file.write_all(json.as_bytes()).unwrap();
        let catalog =
            SpeciesCatalog::from_json_file(&file.path().to_string_lossy()).unwrap();
        assert_eq!(catalog.len(), 1);
        let species = catalog.get("x-test").unwrap();
        assert_eq!(species.chromosome_count, 4);
        assert!(species.chromosomes.is_empty());
        assert!(species.technical_synopsis.is_none());
    }

    #[test]
    fn test_from_json_file_missing_path() {
        let err = SpeciesCatalog::from_json_file("no/such/catalog.json").unwrap_err();
        assert!(err.to_string().contains("Could not read species catalog"));
    }
}
