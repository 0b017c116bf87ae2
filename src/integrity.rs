//! Integrity audit over the species catalog.

use crate::diagnostics::{DiagnosticBus, LogLevel};
use crate::species::SpeciesCatalog;
use std::panic::{self, AssertUnwindSafe};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum IntegrityStatus {
    #[default]
    Idle,
    Pass,
    Fail,
}

impl IntegrityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Observation {
    pub level: LogLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct IntegrityReport {
    pub status: IntegrityStatus,
    pub observations: Vec<Observation>,
}

impl IntegrityReport {
    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }
}

/// Validates every species record and narrates the findings onto the bus.
///
/// The walk itself is pure and never mutates the catalog. A fault inside the
/// walk is caught here and reported as a single critical observation instead
/// of unwinding into the caller.
pub fn run_audit(catalog: &SpeciesCatalog, bus: &DiagnosticBus) -> IntegrityReport {
    bus.info("Starting data integrity audit...");

    let observations = match panic::catch_unwind(AssertUnwindSafe(|| {
        collect_observations(catalog)
    })) {
        Ok(observations) => observations,
        Err(_) => vec![Observation {
            level: LogLevel::Error,
            message: "Critical: integrity audit aborted by internal fault".to_string(),
        }],
    };

    for observation in &observations {
        bus.publish(observation.level, &observation.message);
    }

    let status = if observations.is_empty() {
        bus.success("All genomic constants validated (GM ready)");
        IntegrityStatus::Pass
    } else {
        bus.warn(&format!(
            "Audit complete with {} observation(s).",
            observations.len()
        ));
        IntegrityStatus::Fail
    };

    IntegrityReport {
        status,
        observations,
    }
}

// Observation order is part of the contract: species in catalog order, the
// count check first, then that species' label gaps in chromosome order.
fn collect_observations(catalog: &SpeciesCatalog) -> Vec<Observation> {
    let mut observations = Vec::new();
    for species in catalog.species() {
        let actual = species.chromosomes.len();
        let declared = species.chromosome_count as usize;
        if actual != declared {
            observations.push(Observation {
                level: LogLevel::Error,
                message: format!(
                    "Integrity fail: {} count mismatch ({actual} vs {declared})",
                    species.scientific_name
                ),
            });
        }
        for chromosome in &species.chromosomes {
            let missing = chromosome.beginner_label.trim().is_empty()
                || chromosome.intermediate_label.trim().is_empty()
                || chromosome.advanced_label.trim().is_empty();
            if missing {
                observations.push(Observation {
                    level: LogLevel::Warn,
                    message: format!(
                        "Data gap: CHR {} in {} missing labels",
                        chromosome.id, species.id
                    ),
                });
            }
        }
    }
    observations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticLog;
    use crate::species::{default_species_catalog, Chromosome, ChromosomeFunction, Species};
    use std::sync::{Arc, Mutex};

    fn test_species(id: &str, scientific: &str, declared: u32, supplied: u32) -> Species {
        Species {
            id: id.to_string(),
            scientific_name: scientific.to_string(),
            common_name: format!("{id} (common)"),
            chromosome_count: declared,
            genome_size: "10 Mb".to_string(),
            chromosomes: (1..=supplied)
                .map(|id| Chromosome {
                    id,
                    primary_function: ChromosomeFunction::Metabolism,
                    beginner_label: format!("Unit {id}"),
                    intermediate_label: format!("Region {id}"),
                    advanced_label: format!("Locus {id}"),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn recording_bus() -> (DiagnosticBus, Arc<Mutex<Vec<(LogLevel, String)>>>) {
        let bus = DiagnosticBus::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        bus.subscribe(move |level, message| {
            sink.lock().unwrap().push((level, message.to_string()));
        });
        (bus, events)
    }

    #[test]
    fn test_well_formed_catalog_passes() {
        let catalog = SpeciesCatalog::from_species(vec![
            test_species("x-alpha", "Examplea alpha", 3, 3),
            test_species("x-beta", "Examplea beta", 5, 5),
        ]);
        let (bus, events) = recording_bus();
        let report = run_audit(&catalog, &bus);

        assert_eq!(report.status, IntegrityStatus::Pass);
        assert_eq!(report.observation_count(), 0);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            (LogLevel::Info, "Starting data integrity audit...".to_string())
        );
        assert_eq!(
            events[1],
            (
                LogLevel::Success,
                "All genomic constants validated (GM ready)".to_string()
            )
        );
    }

    #[test]
    fn test_count_mismatch_is_one_error() {
        let catalog = SpeciesCatalog::from_species(vec![test_species(
            "x-gill",
            "Examplea lamellata",
            14,
            13,
        )]);
        let (bus, _events) = recording_bus();
        let report = run_audit(&catalog, &bus);

        assert_eq!(report.status, IntegrityStatus::Fail);
        assert_eq!(report.observation_count(), 1);
        let observation = &report.observations[0];
        assert_eq!(observation.level, LogLevel::Error);
        assert_eq!(
            observation.message,
            "Integrity fail: Examplea lamellata count mismatch (13 vs 14)"
        );
    }

    #[test]
    fn test_missing_label_is_one_warn() {
        let mut species = test_species("x-cap", "Examplea pilea", 4, 4);
        species.chromosomes[2].intermediate_label.clear();
        let catalog = SpeciesCatalog::from_species(vec![species]);
        let (bus, _events) = recording_bus();
        let report = run_audit(&catalog, &bus);

        assert_eq!(report.status, IntegrityStatus::Fail);
        assert_eq!(report.observation_count(), 1);
        let observation = &report.observations[0];
        assert_eq!(observation.level, LogLevel::Warn);
        assert_eq!(observation.message, "Data gap: CHR 3 in x-cap missing labels");
    }

    #[test]
    fn test_absent_chromosome_list_reads_as_zero() {
        let mut species = test_species("x-bare", "Examplea nuda", 2, 0);
        species.chromosomes.clear();
        let catalog = SpeciesCatalog::from_species(vec![species]);
        let (bus, _events) = recording_bus();
        let report = run_audit(&catalog, &bus);

        assert_eq!(report.status, IntegrityStatus::Fail);
        assert_eq!(
            report.observations[0].message,
            "Integrity fail: Examplea nuda count mismatch (0 vs 2)"
        );
    }

    #[test]
    fn test_observation_order_follows_catalog_order() {
        let mut first = test_species("x-one", "Examplea una", 3, 2);
        first.chromosomes[0].advanced_label.clear();
        let second = test_species("x-two", "Examplea bina", 4, 5);
        let catalog = SpeciesCatalog::from_species(vec![first, second]);
        let (bus, _events) = recording_bus();
        let report = run_audit(&catalog, &bus);

        assert_eq!(report.status, IntegrityStatus::Fail);
        assert_eq!(report.observation_count(), 3);
        assert!(report.observations[0].message.contains("Examplea una"));
        assert_eq!(
            report.observations[1].message,
            "Data gap: CHR 1 in x-one missing labels"
        );
        assert!(report.observations[2].message.contains("Examplea bina"));
    }

    #[test]
    fn test_audit_is_idempotent() {
        let catalog = SpeciesCatalog::from_species(vec![test_species(
            "x-gill",
            "Examplea lamellata",
            14,
            13,
        )]);
        let (bus, events) = recording_bus();

        let first = run_audit(&catalog, &bus);
        let first_events: Vec<_> = events.lock().unwrap().clone();
        events.lock().unwrap().clear();
        let second = run_audit(&catalog, &bus);
        let second_events: Vec<_> = events.lock().unwrap().clone();

        assert_eq!(first.status, second.status);
        assert_eq!(first.observation_count(), second.observation_count());
        assert_eq!(first_events, second_events);
    }

    #[test]
    fn test_end_to_end_mismatch_through_sink() {
        let mut species = default_species_catalog().species().to_vec();
        assert_eq!(species[1].id, "c-cinerea");
        species[1].chromosomes.pop();
        let catalog = SpeciesCatalog::from_species(species);

        let bus = DiagnosticBus::new();
        let mut log = DiagnosticLog::new();
        log.activate(&bus);
        let report = run_audit(&catalog, &bus);

        assert_eq!(report.status, IntegrityStatus::Fail);
        assert_eq!(report.observation_count(), 1);

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "Audit complete with 1 observation(s).");
        assert_eq!(entries[1].level, LogLevel::Error);
        assert!(entries[1].message.contains("Coprinopsis cinerea"));
        assert!(entries[1].message.contains("(12 vs 13)"));
        assert_eq!(entries[2].level, LogLevel::Info);
        assert_eq!(entries[2].message, "Starting data integrity audit...");
    }

    #[test]
    fn test_built_in_catalog_passes() {
        let catalog = default_species_catalog();
        let bus = DiagnosticBus::new();
        let report = run_audit(&catalog, &bus);
        assert_eq!(report.status, IntegrityStatus::Pass);
        assert_eq!(report.observation_count(), 0);
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(IntegrityStatus::default(), IntegrityStatus::Idle);
        assert_eq!(IntegrityStatus::Idle.as_str(), "IDLE");
        assert_eq!(IntegrityStatus::Pass.as_str(), "PASS");
        assert_eq!(IntegrityStatus::Fail.as_str(), "FAIL");
    }
}
