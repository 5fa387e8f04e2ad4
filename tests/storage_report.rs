#![forbid(unsafe_code)]
use chrono::NaiveDate;
use planning::{
    calendar, generate_plan, io, monthly_table, person_recap, prepare_notice, AssignOptions,
    Availability, AvailabilityMap, Dataset, JsonStorage, Person, PersonKey, PlanStore, Storage,
    TextNotice,
};
use tempfile::tempdir;

fn sample_plan() -> (Vec<Person>, AvailabilityMap, planning::PlanResult) {
    let people = vec![Person::new("alice@example.com", "Alice").with_contract_hours(40)];
    let mut avail = Availability::new();
    for day in calendar::month_days(2026, 3).unwrap() {
        avail.set(day, true);
    }
    let mut availability = AvailabilityMap::new();
    availability.insert(people[0].key.clone(), avail);
    let plan = generate_plan(2026, 3, &people, &availability, AssignOptions::default()).unwrap();
    (people, availability, plan)
}

#[test]
fn dataset_roundtrip_through_json_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("planning.json");
    let storage = JsonStorage::open(&path).unwrap();

    let mut dataset = Dataset::default();
    dataset.upsert_person(Person::new("alice@example.com", "Alice").with_contract_hours(35));
    let mut avail = Availability::new();
    avail.set(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), true);
    avail.set(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(), false);
    dataset
        .availability
        .insert(PersonKey::new("alice@example.com"), avail);

    storage.save(&dataset).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded.people.len(), 1);
    assert_eq!(loaded.people[0].contract_hours, 35);
    let avail = loaded
        .availability_of(&PersonKey::new("alice@example.com"))
        .unwrap();
    assert_eq!(avail.get(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()), Some(true));
    assert_eq!(avail.get(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()), Some(false));
    // jour non renseigné = inconnu
    assert_eq!(avail.get(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()), None);
}

#[test]
fn plan_store_lock_and_reload() {
    let dir = tempdir().unwrap();
    let store = PlanStore::new(dir.path().join("plans"));
    let (_, _, plan) = sample_plan();

    assert!(!store.is_locked(2026, 3));
    assert!(store.load(2026, 3).unwrap().is_none());

    store.lock(&plan).unwrap();
    assert!(store.is_locked(2026, 3));

    let locked = store.load(2026, 3).unwrap().unwrap();
    assert_eq!(locked.plan, plan);

    // Re-verrouiller le même mois écrase le fichier, même clé
    store.lock(&plan).unwrap();
    assert_eq!(store.load(2026, 3).unwrap().unwrap().plan, plan);
}

#[test]
fn monthly_table_shows_assignments_and_gaps() {
    let (people, _, plan) = sample_plan();
    let table = monthly_table(&plan, &people).unwrap();

    assert!(table.starts_with("Jour | Lun"));
    // Alice couvre les blocs week-end affectés
    assert!(table.contains("AliB2"), "{table}");
    // Les jours des blocs non couverts sont marqués --
    assert!(table.contains("--"), "{table}");
    // 6 semaines + en-tête + séparateur
    assert_eq!(table.lines().count(), 8);
}

#[test]
fn person_recap_lists_totals() {
    let (people, _, plan) = sample_plan();
    let recap = person_recap(&plan, &people);
    assert!(recap.contains("Alice"), "{recap}");
    assert!(recap.contains("heures : 70"), "{recap}");
    assert!(recap.contains("week-end : 7"), "{recap}");
}

#[test]
fn notice_renders_assigned_blocks() {
    let (people, _, plan) = sample_plan();
    let notice = prepare_notice(&plan, &people, &people[0].key, &TextNotice).unwrap();
    assert!(notice.content.contains("Bonjour Alice"));
    assert!(notice.content.contains("Bloc week-end du 2026-03-01 au 2026-03-01"));

    let unknown = PersonKey::new("nobody@example.com");
    assert!(prepare_notice(&plan, &people, &unknown, &TextNotice).is_err());
}

#[test]
fn csv_imports_and_json_export() {
    let dir = tempdir().unwrap();

    let people_csv = dir.path().join("people.csv");
    std::fs::write(
        &people_csv,
        "email,display_name,contract_hours\nalice@example.com,Alice,40\nbob@example.com,Bob,\n",
    )
    .unwrap();
    let people = io::import_people_csv(&people_csv).unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].contract_hours, 40);
    assert_eq!(people[1].contract_hours, 0);

    let avail_csv = dir.path().join("avail.csv");
    std::fs::write(
        &avail_csv,
        "email,date,available\nalice@example.com,2026-03-01,oui\nalice@example.com,2026-03-02,non\n",
    )
    .unwrap();
    let availability = io::import_availability_csv(&avail_csv).unwrap();
    let alice = availability.get(&PersonKey::new("alice@example.com")).unwrap();
    assert_eq!(alice.get(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), Some(true));
    assert_eq!(alice.get(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()), Some(false));

    let bad_csv = dir.path().join("bad.csv");
    std::fs::write(&bad_csv, "email,date,available\nalice@example.com,pas-une-date,oui\n").unwrap();
    assert!(io::import_availability_csv(&bad_csv).is_err());

    let (_, _, plan) = sample_plan();
    let json_path = dir.path().join("plan.json");
    io::export_plan_json(&json_path, &plan).unwrap();
    let raw = std::fs::read_to_string(&json_path).unwrap();
    let record: io::PlanRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(record.blocks.len(), plan.blocks.len());
    assert_eq!(record.warnings.len(), plan.warnings.len());
    assert_eq!(record.blocks[0].assigned_to.as_deref(), Some("alice@example.com"));

    let csv_path = dir.path().join("plan.csv");
    io::export_plan_csv(&csv_path, &plan).unwrap();
    let raw = std::fs::read_to_string(&csv_path).unwrap();
    assert!(raw.starts_with("date,jour,personne,bloc"));
    assert!(raw.contains("2026-03-01,dimanche,alice@example.com,B2"));

    let ics_path = dir.path().join("plan.ics");
    io::export_plan_ical(&ics_path, &plan).unwrap();
    let raw = std::fs::read_to_string(&ics_path).unwrap();
    assert!(raw.starts_with("BEGIN:VCALENDAR"));
    // un VEVENT par jour affecté (7 jours pour Alice)
    assert_eq!(raw.matches("BEGIN:VEVENT").count(), 7);
}
