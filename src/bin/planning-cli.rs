#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use planning::{
    engine, io,
    model::PersonKey,
    notification::{prepare_notice, TextNotice},
    report,
    storage::{JsonStorage, PlanStore, Storage},
    AssignOptions,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning mensuel (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du jeu de données (personnes + dispos)
    #[arg(long, global = true, default_value = "planning.json")]
    data: String,

    /// Répertoire des plans verrouillés
    #[arg(long, global = true, default_value = "plans")]
    plans_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des personnes depuis un CSV
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Importer des disponibilités depuis un CSV
    ImportAvailability {
        #[arg(long)]
        csv: String,
    },

    /// Générer un planning (aperçu, sans verrouillage)
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value_t = 7)]
        day_cap: u32,
        #[arg(long)]
        hour_cap: Option<u32>,
        /// Interdit les deux blocs d'une même semaine à la même personne
        #[arg(long)]
        forbid_same_week: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_ics: Option<String>,
    },

    /// Générer puis verrouiller le planning du mois
    Lock {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value_t = 7)]
        day_cap: u32,
        #[arg(long)]
        hour_cap: Option<u32>,
        #[arg(long)]
        forbid_same_week: bool,
        /// Re-verrouille par-dessus un plan existant
        #[arg(long)]
        force: bool,
    },

    /// Afficher un plan verrouillé
    Show {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },

    /// Générer la notification texte d'une personne (plan verrouillé)
    Notify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let mut dataset = storage.load().unwrap_or_default();
    let plans = PlanStore::new(&cli.plans_dir);

    let code = match cli.cmd {
        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(csv)?;
            for person in people {
                dataset.upsert_person(person);
            }
            storage.save(&dataset)?;
            0
        }
        Commands::ImportAvailability { csv } => {
            let imported = io::import_availability_csv(csv)?;
            for (key, avail) in imported {
                let slot = dataset.availability.entry(key).or_default();
                for (day, flag) in avail.iter() {
                    slot.set(*day, *flag);
                }
            }
            storage.save(&dataset)?;
            0
        }
        Commands::Generate {
            year,
            month,
            day_cap,
            hour_cap,
            forbid_same_week,
            out_json,
            out_csv,
            out_ics,
        } => {
            let opts = AssignOptions {
                monthly_day_cap: day_cap,
                monthly_hour_cap: hour_cap,
                forbid_same_week,
            };
            let plan = generate_preview(&dataset, year, month, opts)?;

            if plans.is_locked(year, month) {
                eprintln!("Note : le plan {month:02}/{year} est déjà verrouillé, ceci est un aperçu.");
            }

            println!("{}", report::monthly_table(&plan, &dataset.people)?);
            println!("=== Récapitulatif par personne ===");
            print!("{}", report::person_recap(&plan, &dataset.people));

            if let Some(path) = out_json {
                io::export_plan_json(path, &plan)?;
            }
            if let Some(path) = out_csv {
                io::export_plan_csv(path, &plan)?;
            }
            if let Some(path) = out_ics {
                io::export_plan_ical(path, &plan)?;
            }

            if plan.warnings.is_empty() {
                println!("OK: tous les blocs sont couverts");
                0
            } else {
                eprintln!("=== Alertes RH ({}) ===", plan.warnings.len());
                for warning in &plan.warnings {
                    eprintln!("- {warning}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Lock {
            year,
            month,
            day_cap,
            hour_cap,
            forbid_same_week,
            force,
        } => {
            if plans.is_locked(year, month) && !force {
                bail!("le plan {month:02}/{year} est déjà verrouillé (utiliser --force)");
            }
            let opts = AssignOptions {
                monthly_day_cap: day_cap,
                monthly_hour_cap: hour_cap,
                forbid_same_week,
            };
            let plan = generate_preview(&dataset, year, month, opts)?;
            let locked = plans.lock(&plan)?;
            println!(
                "Plan {month:02}/{year} verrouillé le {} ({} bloc(s), {} alerte(s))",
                locked.locked_at.to_rfc3339(),
                locked.plan.blocks.len(),
                locked.plan.warnings.len()
            );
            0
        }
        Commands::Show { year, month } => {
            let Some(locked) = plans.load(year, month)? else {
                bail!("aucun plan verrouillé pour {month:02}/{year}");
            };
            println!("Verrouillé le {}", locked.locked_at.to_rfc3339());
            println!("{}", report::monthly_table(&locked.plan, &dataset.people)?);
            print!("{}", report::person_recap(&locked.plan, &dataset.people));
            for warning in &locked.plan.warnings {
                eprintln!("- {warning}");
            }
            0
        }
        Commands::Notify {
            email,
            year,
            month,
            out,
        } => {
            let Some(locked) = plans.load(year, month)? else {
                bail!("aucun plan verrouillé pour {month:02}/{year}");
            };
            let renderer = TextNotice;
            let key = PersonKey::new(&email);
            let notice = prepare_notice(&locked.plan, &dataset.people, &key, &renderer)?;
            std::fs::write(&out, &notice.content)?;
            println!("Notification générée pour {}", notice.person_key);
            0
        }
    };

    std::process::exit(code);
}

fn generate_preview(
    dataset: &planning::Dataset,
    year: i32,
    month: u32,
    opts: AssignOptions,
) -> Result<planning::PlanResult> {
    let declared: usize = dataset
        .availability
        .values()
        .flat_map(|avail| avail.iter())
        .filter(|(day, flag)| day.year() == year && day.month() == month && **flag)
        .count();
    if declared == 0 {
        bail!("aucune disponibilité renseignée pour {month:02}/{year}, génération impossible");
    }

    // Synthèse des dispos déclarées, comme l'écran admin
    println!("=== Disponibilités {month:02}/{year} ===");
    for person in &dataset.people {
        let days = dataset
            .availability_of(&person.key)
            .map_or(0, |avail| {
                avail
                    .iter()
                    .filter(|(day, flag)| day.year() == year && day.month() == month && **flag)
                    .count()
            });
        println!("- {} : {} jour(s) disponible(s)", person.display_name, days);
    }

    let plan = engine::generate_plan(year, month, &dataset.people, &dataset.availability, opts)?;
    Ok(plan)
}
