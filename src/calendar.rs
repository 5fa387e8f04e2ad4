use crate::engine::PlanError;
use crate::model::{Block, BlockKind, BlockStatus};
use chrono::{Datelike, Duration, NaiveDate};

/// Chaque jour planifié est normalisé à 10 heures.
pub const HOURS_PER_DAY: u32 = 10;

/// Découpe un mois en blocs semaine (Lun→Jeu) et week-end (Ven→Dim),
/// semaines démarrant le lundi, bornés aux jours du mois cible.
///
/// Les index sont strictement croissants et chaque jour du mois
/// appartient à exactement un bloc.
pub fn partition(year: i32, month: u32) -> Result<Vec<Block>, PlanError> {
    let first = first_day(year, month)?;
    let last = last_day(year, month)?;

    let mut blocks = Vec::new();
    let mut index = 0usize;
    let mut week = 0u32;

    // Lundi de la semaine contenant le 1er du mois
    let mut monday = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));

    while monday <= last {
        week += 1;

        // positions 0..=3 : Lundi→Jeudi
        let weekday_days = clip_to_month(monday, 0..=3, month);
        if !weekday_days.is_empty() {
            blocks.push(make_block(index, week, BlockKind::Weekday, weekday_days));
            index += 1;
        }

        // positions 4..=6 : Vendredi→Dimanche
        let weekend_days = clip_to_month(monday, 4..=6, month);
        if !weekend_days.is_empty() {
            blocks.push(make_block(index, week, BlockKind::Weekend, weekend_days));
            index += 1;
        }

        monday += Duration::days(7);
    }

    Ok(blocks)
}

/// Tous les jours calendaires du mois, en ordre croissant.
pub fn month_days(year: i32, month: u32) -> Result<Vec<NaiveDate>, PlanError> {
    let first = first_day(year, month)?;
    let last = last_day(year, month)?;
    let mut days = Vec::with_capacity(31);
    let mut current = first;
    while current <= last {
        days.push(current);
        current += Duration::days(1);
    }
    Ok(days)
}

pub fn first_day(year: i32, month: u32) -> Result<NaiveDate, PlanError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PlanError::InvalidMonth { year, month })
}

pub fn last_day(year: i32, month: u32) -> Result<NaiveDate, PlanError> {
    let (next_y, next_m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_first =
        NaiveDate::from_ymd_opt(next_y, next_m, 1).ok_or(PlanError::InvalidMonth { year, month })?;
    Ok(next_first - Duration::days(1))
}

fn clip_to_month(
    monday: NaiveDate,
    positions: std::ops::RangeInclusive<i64>,
    month: u32,
) -> Vec<NaiveDate> {
    positions
        .map(|offset| monday + Duration::days(offset))
        .filter(|d| d.month() == month)
        .collect()
}

fn make_block(index: usize, week: u32, kind: BlockKind, days: Vec<NaiveDate>) -> Block {
    let hours = HOURS_PER_DAY * days.len() as u32;
    Block {
        index,
        week,
        kind,
        days,
        hours,
        assigned: None,
        status: BlockStatus::Unassigned,
    }
}
