use crate::calendar;
use crate::model::{BlockKind, Person, PlanResult};
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

const CELL_WIDTH: usize = 5;

/// Tableau mensuel Lundi→Dimanche : une ligne par semaine, cellule
/// "AliB1" (3 lettres + marqueur de bloc), "--" pour un jour non
/// couvert, vide hors du mois.
pub fn monthly_table(plan: &PlanResult, people: &[Person]) -> Result<String> {
    let first = calendar::first_day(plan.year, plan.month)?;
    let last = calendar::last_day(plan.year, plan.month)?;

    let labels = day_labels(plan, people);

    let mut out = String::new();
    out.push_str("Jour | Lun   | Mar   | Mer   | Jeu   | Ven   | Sam   | Dim\n");
    out.push_str(&"-".repeat(60));
    out.push('\n');

    let mut monday = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let mut day_num = itoa::Buffer::new();

    while monday <= last {
        let row_day = (0..7)
            .map(|i| monday + Duration::days(i))
            .find(|d| *d >= first && *d <= last)
            .unwrap_or(monday);
        out.push_str(&format!("{:>4}", day_num.format(row_day.day())));

        for offset in 0..7 {
            let current = monday + Duration::days(offset);
            out.push_str(" | ");
            if current < first || current > last {
                out.push_str(&" ".repeat(CELL_WIDTH));
            } else {
                let cell = labels.get(&current).map(String::as_str).unwrap_or("--");
                let width = CELL_WIDTH;
                out.push_str(&format!("{cell:<width$}"));
            }
        }
        out.push('\n');
        monday += Duration::days(7);
    }

    Ok(out)
}

/// Récapitulatif par personne : jours travaillés, part week-end, heures.
pub fn person_recap(plan: &PlanResult, people: &[Person]) -> String {
    let mut out = String::new();
    for person in people {
        let stats = plan.stats.get(&person.key).copied().unwrap_or_default();
        out.push_str(&format!(
            "{:<12} – jours : {:2} (week-end : {}) – heures : {}\n",
            person.display_name, stats.days, stats.weekend_days, stats.hours
        ));
    }
    out
}

fn day_labels(plan: &PlanResult, people: &[Person]) -> BTreeMap<NaiveDate, String> {
    let mut labels = BTreeMap::new();
    for block in &plan.blocks {
        let Some(key) = block.assigned.as_ref() else {
            continue;
        };
        let name = people
            .iter()
            .find(|p| &p.key == key)
            .map(|p| p.display_name.as_str())
            .unwrap_or_else(|| key.as_str());
        let marker = match block.kind {
            BlockKind::Weekday => "B1",
            BlockKind::Weekend => "B2",
        };
        let short: String = name.chars().take(3).collect();
        for day in &block.days {
            labels.insert(*day, format!("{short}{marker}"));
        }
    }
    labels
}
