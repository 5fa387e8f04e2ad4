use crate::engine::AvailabilityMap;
use crate::model::{Availability, BlockKind, BlockStatus, Person, PersonStats, PlanResult};
use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Import de personnes depuis CSV: header `email,display_name[,contract_hours]`
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let email = rec.get(0).context("missing email")?.trim();
        let display = rec.get(1).context("missing display_name")?.trim();
        if email.is_empty() || display.is_empty() {
            bail!("invalid people row (empty)");
        }
        let mut person = Person::new(email, display.to_string());
        if let Some(hours) = rec.get(2) {
            let hours = hours.trim();
            if !hours.is_empty() {
                person.contract_hours = hours
                    .parse()
                    .with_context(|| format!("invalid contract_hours for {email}"))?;
            }
        }
        out.push(person);
    }
    Ok(out)
}

/// Import de disponibilités: header `email,date,available`
/// (une ligne par jour renseigné ; les jours absents restent "inconnus")
pub fn import_availability_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<AvailabilityMap> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out: AvailabilityMap = BTreeMap::new();
    for rec in rdr.records() {
        let rec = rec?;
        let email = rec.get(0).context("missing email")?.trim();
        let date_raw = rec.get(1).context("missing date")?.trim();
        let flag_raw = rec.get(2).context("missing available flag")?.trim();
        if email.is_empty() {
            bail!("invalid availability row (empty email)");
        }
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {date_raw}"))?;
        let flag = parse_bool(flag_raw)
            .with_context(|| format!("invalid available value for {email} on {date_raw}"))?;
        out.entry(crate::model::PersonKey::new(email))
            .or_insert_with(Availability::new)
            .set(date, flag);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Forme sérialisée d'un bloc (contrat d'interface vers l'extérieur).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours: u32,
    pub assigned_to: Option<String>,
    pub status: BlockStatus,
}

/// Forme sérialisée complète d'un résultat de génération.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    pub year: i32,
    pub month: u32,
    pub blocks: Vec<BlockRecord>,
    pub stats: BTreeMap<String, PersonStats>,
    pub warnings: Vec<String>,
}

pub fn plan_record(plan: &PlanResult) -> PlanRecord {
    PlanRecord {
        year: plan.year,
        month: plan.month,
        blocks: plan
            .blocks
            .iter()
            .map(|b| BlockRecord {
                index: b.index,
                kind: b.kind,
                start_date: b.start(),
                end_date: b.end(),
                hours: b.hours,
                assigned_to: b.assigned.as_ref().map(|k| k.as_str().to_string()),
                status: b.status,
            })
            .collect(),
        stats: plan
            .stats
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), *v))
            .collect(),
        warnings: plan.warnings.iter().map(|w| w.to_string()).collect(),
    }
}

/// Export JSON du plan (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &PlanResult) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(&plan_record(plan))?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV jour par jour: header `date,jour,personne,bloc`
pub fn export_plan_csv<P: AsRef<Path>>(path: P, plan: &PlanResult) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "jour", "personne", "bloc"])?;
    for block in &plan.blocks {
        for day in &block.days {
            let person = block.assigned.as_ref().map(|k| k.as_str()).unwrap_or("");
            let marker = match block.kind {
                BlockKind::Weekday => "B1",
                BlockKind::Weekend => "B2",
            };
            w.write_record([
                day.format("%Y-%m-%d").to_string().as_str(),
                french_weekday(day.weekday()),
                person,
                marker,
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Export iCal: un VEVENT par jour affecté, démarrage 09:00, 10 h.
pub fn export_plan_ical<P: AsRef<Path>>(path: P, plan: &PlanResult) -> anyhow::Result<()> {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Planning RH//FR".to_string(),
    ];

    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let start_time = NaiveTime::from_hms_opt(9, 0, 0).context("invalid event start time")?;

    for block in &plan.blocks {
        let Some(person) = block.assigned.as_ref() else {
            continue;
        };
        for day in &block.days {
            let start_dt = day.and_time(start_time);
            let end_dt = start_dt + chrono::Duration::hours(10);
            lines.extend([
                "BEGIN:VEVENT".to_string(),
                format!("UID:{}", Uuid::new_v4()),
                format!("DTSTAMP:{stamp}"),
                format!("DTSTART:{}", start_dt.format("%Y%m%dT%H%M%S")),
                format!("DTEND:{}", end_dt.format("%Y%m%dT%H%M%S")),
                format!("SUMMARY:{} – {}", person, block.kind),
                "END:VEVENT".to_string(),
            ]);
        }
    }

    lines.push("END:VCALENDAR".to_string());
    fs::write(path, lines.join("\r\n"))?;
    Ok(())
}

fn french_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lundi",
        Weekday::Tue => "mardi",
        Weekday::Wed => "mercredi",
        Weekday::Thu => "jeudi",
        Weekday::Fri => "vendredi",
        Weekday::Sat => "samedi",
        Weekday::Sun => "dimanche",
    }
}
