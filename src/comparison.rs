//! Cross-species helpers behind the comparative genomics view.

use crate::species::{ChromosomeFunction, Species, SpeciesCatalog};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_NUMBER: Regex = Regex::new(r"^([0-9]+(?:\.[0-9]+)?)").unwrap();
}

/// Extracts the numeric megabase scale from a display string such as
/// "38.5 Mb" or "30 Mb+".
pub fn genome_size_mb(display: &str) -> Result<f64, String> {
    let trimmed = display.trim();
    let captures = LEADING_NUMBER
        .captures(trimmed)
        .ok_or_else(|| format!("Could not parse genome size '{display}': no leading number"))?;
    captures[1]
        .parse::<f64>()
        .map_err(|e| format!("Could not parse genome size '{display}': {e}"))
}

/// Fraction of the catalog's largest genome, for the physical-mass bar.
/// Unparseable sizes weigh zero rather than failing the whole view.
pub fn genome_mass_fraction(species: &Species, catalog: &SpeciesCatalog) -> f32 {
    let own = genome_size_mb(&species.genome_size).unwrap_or(0.0);
    let max = catalog
        .species()
        .iter()
        .filter_map(|s| genome_size_mb(&s.genome_size).ok())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        0.0
    } else {
        (own / max) as f32
    }
}

/// Chromosome counts per primary function, in enumeration order, omitting
/// functions the species does not use.
pub fn function_distribution(species: &Species) -> Vec<(ChromosomeFunction, usize)> {
    let counts = species
        .chromosomes
        .iter()
        .counts_by(|chromosome| chromosome.primary_function);
    ChromosomeFunction::ALL
        .iter()
        .copied()
        .filter_map(|function| counts.get(&function).map(|n| (function, *n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Chromosome;

    fn species_with(genome_size: &str, functions: &[ChromosomeFunction]) -> Species {
        Species {
            id: "x-test".to_string(),
            scientific_name: "Examplea testii".to_string(),
            chromosome_count: functions.len() as u32,
            genome_size: genome_size.to_string(),
            chromosomes: functions
                .iter()
                .enumerate()
                .map(|(index, function)| Chromosome {
                    id: index as u32 + 1,
                    primary_function: *function,
                    beginner_label: "b".to_string(),
                    intermediate_label: "i".to_string(),
                    advanced_label: "a".to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_genome_size_parsing() {
        assert_eq!(genome_size_mb("38.5 Mb").unwrap(), 38.5);
        assert_eq!(genome_size_mb("30 Mb+").unwrap(), 30.0);
        assert_eq!(genome_size_mb(" 41.0 Mb ").unwrap(), 41.0);
        let err = genome_size_mb("approx. large").unwrap_err();
        assert!(err.contains("no leading number"), "{err}");
    }

    #[test]
    fn test_mass_fraction_relative_to_catalog_maximum() {
        let catalog = SpeciesCatalog::from_species(vec![
            species_with("40 Mb", &[ChromosomeFunction::Metabolism]),
            species_with("30 Mb+", &[ChromosomeFunction::Defense]),
            species_with("10 Mb", &[ChromosomeFunction::Unknown]),
        ]);
        let fractions: Vec<f32> = catalog
            .species()
            .iter()
            .map(|s| genome_mass_fraction(s, &catalog))
            .collect();
        assert_eq!(fractions, [1.0, 0.75, 0.25]);
    }

    #[test]
    fn test_mass_fraction_tolerates_bad_sizes() {
        let catalog = SpeciesCatalog::from_species(vec![
            species_with("unknown", &[ChromosomeFunction::Metabolism]),
            species_with("20 Mb", &[ChromosomeFunction::Defense]),
        ]);
        let species = catalog.species();
        assert_eq!(genome_mass_fraction(&species[0], &catalog), 0.0);
        assert_eq!(genome_mass_fraction(&species[1], &catalog), 1.0);
    }

    #[test]
    fn test_function_distribution_follows_enumeration_order() {
        let species = species_with(
            "12 Mb",
            &[
                ChromosomeFunction::Metabolism,
                ChromosomeFunction::Reproduction,
                ChromosomeFunction::Metabolism,
                ChromosomeFunction::Defense,
            ],
        );
        assert_eq!(
            function_distribution(&species),
            [
                (ChromosomeFunction::Reproduction, 1),
                (ChromosomeFunction::Metabolism, 2),
                (ChromosomeFunction::Defense, 1),
            ]
        );
    }
}
