use mycoatlas::about;
use mycoatlas::diagnostics::DiagnosticBus;
use mycoatlas::integrity::{self, IntegrityStatus};
use mycoatlas::resources::{self, ResourceKind};
use mycoatlas::species::SpeciesCatalog;
use serde::Serialize;
use std::env;

#[derive(Serialize)]
struct SpeciesSummary {
    id: String,
    scientific_name: String,
    common_name: String,
    chromosome_count: u32,
    genome_size: String,
}

#[derive(Serialize)]
struct AuditObservation {
    level: String,
    message: String,
}

#[derive(Serialize)]
struct AuditSummary {
    status: String,
    observation_count: usize,
    observations: Vec<AuditObservation>,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  mycoatlas_cli --version\n  \
  mycoatlas_cli audit [--catalog PATH] [--json]\n  \
  mycoatlas_cli species [--json]\n  \
  mycoatlas_cli show ID [--json]\n  \
  mycoatlas_cli resources documentation|protocols|glossary\n  \
  mycoatlas_cli version\n  \
  mycoatlas_cli help"
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Could not serialize JSON output: {e}"))?;
    println!("{text}");
    Ok(())
}

fn load_catalog(args: &[String]) -> Result<SpeciesCatalog, String> {
    if let Some(pos) = args.iter().position(|a| a == "--catalog") {
        let path = args
            .get(pos + 1)
            .ok_or_else(|| "Missing path for --catalog".to_string())?;
        SpeciesCatalog::from_json_file(path).map_err(|e| e.to_string())
    } else {
        Ok(SpeciesCatalog::default())
    }
}

fn summarize(catalog: &SpeciesCatalog) -> Vec<SpeciesSummary> {
    catalog
        .species()
        .iter()
        .map(|species| SpeciesSummary {
            id: species.id.clone(),
            scientific_name: species.scientific_name.clone(),
            common_name: species.common_name.clone(),
            chromosome_count: species.chromosome_count,
            genome_size: species.genome_size.clone(),
        })
        .collect()
}

fn run_audit_command(rest: &[String], json: bool) -> Result<(), String> {
    let catalog = load_catalog(rest)?;
    let bus = DiagnosticBus::new();
    if !json {
        bus.subscribe(|level, message| {
            println!("{:<7} {message}", level.as_str());
        });
    }
    let report = integrity::run_audit(&catalog, &bus);
    if json {
        let observations = report
            .observations
            .iter()
            .map(|observation| AuditObservation {
                level: observation.level.as_str().to_string(),
                message: observation.message.clone(),
            })
            .collect();
        print_json(&AuditSummary {
            status: report.status.as_str().to_string(),
            observation_count: report.observation_count(),
            observations,
        })?;
    }
    if report.status == IntegrityStatus::Fail {
        std::process::exit(1);
    }
    Ok(())
}

fn run_show_command(rest: &[String], json: bool) -> Result<(), String> {
    let Some(id) = rest.iter().find(|a| !a.starts_with("--")) else {
        usage();
        return Err("Missing species ID for show".to_string());
    };
    let catalog = SpeciesCatalog::default();
    let species = catalog
        .get(id)
        .ok_or_else(|| format!("Species '{id}' not found in catalog"))?;
    if json {
        return print_json(species);
    }

    println!("{} ({})", species.scientific_name, species.common_name);
    println!("Focus: {}", species.focus);
    println!(
        "Genome: {} | CHR {} | Difficulty {}/5",
        species.genome_size, species.chromosome_count, species.difficulty
    );
    if let Some(synopsis) = &species.technical_synopsis {
        println!(
            "Assembly: {} | Genes: {} | GC: {} | Strain: {}",
            synopsis.base_pairs, synopsis.gene_count, synopsis.gc_content, synopsis.strain_ref
        );
        println!("Note: {}", synopsis.assembly_note);
    }
    println!();
    for chromosome in &species.chromosomes {
        println!(
            "CHR {:>2}  {} / {} / {}  [{}]",
            chromosome.id,
            chromosome.beginner_label,
            chromosome.intermediate_label,
            chromosome.advanced_label,
            chromosome.primary_function.as_str()
        );
        for gene in &chromosome.genes {
            println!("        - {} ({})", gene.name, gene.location);
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        return Err("Missing command".to_string());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let command = &args[1];
    let rest = &args[2..];
    let json = rest.iter().any(|a| a == "--json");

    match command.as_str() {
        "audit" => run_audit_command(rest, json),
        "species" => {
            let catalog = SpeciesCatalog::default();
            if json {
                print_json(&summarize(&catalog))
            } else {
                for species in catalog.species() {
                    println!(
                        "{:<12} {} ({})  CHR {:>2}  {}",
                        species.id,
                        species.scientific_name,
                        species.common_name,
                        species.chromosome_count,
                        species.genome_size
                    );
                }
                Ok(())
            }
        }
        "show" => run_show_command(rest, json),
        "resources" => {
            let Some(raw) = rest.first() else {
                usage();
                return Err("Missing resource kind".to_string());
            };
            let kind = ResourceKind::parse(raw)?;
            println!("{}", resources::article_text(kind)?);
            Ok(())
        }
        "version" => {
            println!("{}", about::version_cli_text());
            Ok(())
        }
        "help" => {
            usage();
            Ok(())
        }
        _ => {
            usage();
            Err(format!("Unknown command '{command}'"))
        }
    }
}
