use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifiant fort pour Person (clé stable, typiquement un email)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonKey(String);

impl PersonKey {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collaborateur planifiable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub key: PersonKey,
    pub display_name: String,
    /// Heures contractuelles mensuelles (0 = pas de suivi de dépassement)
    #[serde(default)]
    pub contract_hours: u32,
}

impl Person {
    pub fn new<K: AsRef<str>, D: Into<String>>(key: K, display_name: D) -> Self {
        Self {
            key: PersonKey::new(key),
            display_name: display_name.into(),
            contract_hours: 0,
        }
    }

    pub fn with_contract_hours(mut self, hours: u32) -> Self {
        self.contract_hours = hours;
        self
    }
}

/// Disponibilités d'une personne : jour → dispo (true) / indispo (false).
/// L'absence d'entrée vaut "inconnu" et ne satisfait jamais un bloc.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(BTreeMap<NaiveDate, bool>);

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, day: NaiveDate, available: bool) {
        self.0.insert(day, available);
    }

    /// Tri-état : Some(true) dispo, Some(false) indispo, None inconnu.
    pub fn get(&self, day: NaiveDate) -> Option<bool> {
        self.0.get(&day).copied()
    }

    pub fn is_available_on(&self, day: NaiveDate) -> bool {
        self.get(day) == Some(true)
    }

    /// True ssi TOUS les jours sont explicitement marqués disponibles.
    pub fn covers_all<'a, I: IntoIterator<Item = &'a NaiveDate>>(&self, days: I) -> bool {
        days.into_iter().all(|d| self.is_available_on(*d))
    }

    pub fn available_day_count(&self) -> usize {
        self.0.values().filter(|v| **v).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &bool)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Jeu de données de travail persisté (personnes + disponibilités)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub people: Vec<Person>,
    #[serde(default)]
    pub availability: BTreeMap<PersonKey, Availability>,
}

impl Dataset {
    pub fn find_person<'a>(&'a self, key: &PersonKey) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.key == key)
    }

    pub fn availability_of(&self, key: &PersonKey) -> Option<&Availability> {
        self.availability.get(key)
    }

    /// Insère ou remplace une personne (clé = identité).
    pub fn upsert_person(&mut self, person: Person) {
        match self.people.iter_mut().find(|p| p.key == person.key) {
            Some(slot) => *slot = person,
            None => self.people.push(person),
        }
    }
}

/// Type de bloc : Lundi→Jeudi ou Vendredi→Dimanche
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Weekday,
    Weekend,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Weekday => f.write_str("semaine"),
            BlockKind::Weekend => f.write_str("week-end"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Unassigned,
    Assigned,
    Uncovered,
}

/// Bloc planifiable : l'unité d'affectation (une personne au plus).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position chronologique dans le mois, à partir de 0.
    pub index: usize,
    /// Numéro de semaine dans le mois, à partir de 1.
    pub week: u32,
    pub kind: BlockKind,
    /// Jours du bloc, ordonnés, tous dans le mois cible. Jamais vide.
    pub days: Vec<NaiveDate>,
    /// 10 h par jour normalisé, quel que soit le type de bloc.
    pub hours: u32,
    pub assigned: Option<PersonKey>,
    pub status: BlockStatus,
}

impl Block {
    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}

/// Totaux par personne, repliés sur la liste finale des blocs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStats {
    pub days: u32,
    pub hours: u32,
    pub weekend_days: u32,
}

/// Résultat d'une génération : blocs finalisés + totaux + alertes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    pub year: i32,
    pub month: u32,
    pub blocks: Vec<Block>,
    pub stats: BTreeMap<PersonKey, PersonStats>,
    pub warnings: Vec<crate::engine::Warning>,
}

impl PlanResult {
    /// Personne affectée un jour donné, avec le type de bloc.
    pub fn assignment_on(&self, day: NaiveDate) -> Option<(&PersonKey, BlockKind)> {
        self.blocks.iter().find_map(|b| {
            if b.days.contains(&day) {
                b.assigned.as_ref().map(|k| (k, b.kind))
            } else {
                None
            }
        })
    }

    pub fn uncovered_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.status == BlockStatus::Uncovered)
            .count()
    }
}
