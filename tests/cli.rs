#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("planning-cli").unwrap()
}

#[test]
fn import_generate_and_lock_flow() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("planning.json");
    let plans = dir.path().join("plans");

    let people_csv = dir.path().join("people.csv");
    std::fs::write(
        &people_csv,
        "email,display_name,contract_hours\nalice@example.com,Alice,40\n",
    )
    .unwrap();

    let mut avail_rows = String::from("email,date,available\n");
    for day in 1..=31 {
        avail_rows.push_str(&format!("alice@example.com,2026-03-{day:02},oui\n"));
    }
    let avail_csv = dir.path().join("avail.csv");
    std::fs::write(&avail_csv, avail_rows).unwrap();

    cli()
        .args(["--data", data.to_str().unwrap(), "import-people", "--csv"])
        .arg(&people_csv)
        .assert()
        .success();

    cli()
        .args(["--data", data.to_str().unwrap(), "import-availability", "--csv"])
        .arg(&avail_csv)
        .assert()
        .success();

    // Une seule personne : blocs non couverts attendus, code 2
    cli()
        .args([
            "--data",
            data.to_str().unwrap(),
            "--plans-dir",
            plans.to_str().unwrap(),
            "generate",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Récapitulatif par personne"))
        .stderr(predicate::str::contains("non couvert"));

    cli()
        .args([
            "--data",
            data.to_str().unwrap(),
            "--plans-dir",
            plans.to_str().unwrap(),
            "lock",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("verrouillé"));

    // Re-verrouillage refusé sans --force
    cli()
        .args([
            "--data",
            data.to_str().unwrap(),
            "--plans-dir",
            plans.to_str().unwrap(),
            "lock",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cli()
        .args([
            "--data",
            data.to_str().unwrap(),
            "--plans-dir",
            plans.to_str().unwrap(),
            "show",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jour | Lun"));

    let notice = dir.path().join("notice.txt");
    cli()
        .args([
            "--data",
            data.to_str().unwrap(),
            "--plans-dir",
            plans.to_str().unwrap(),
            "notify",
            "--email",
            "alice@example.com",
            "--year",
            "2026",
            "--month",
            "3",
            "--out",
        ])
        .arg(&notice)
        .assert()
        .success();
    let content = std::fs::read_to_string(&notice).unwrap();
    assert!(content.contains("Bonjour Alice"));
}

#[test]
fn generate_without_availability_fails() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("planning.json");

    let people_csv = dir.path().join("people.csv");
    std::fs::write(&people_csv, "email,display_name\nalice@example.com,Alice\n").unwrap();

    cli()
        .args(["--data", data.to_str().unwrap(), "import-people", "--csv"])
        .arg(&people_csv)
        .assert()
        .success();

    cli()
        .args([
            "--data",
            data.to_str().unwrap(),
            "generate",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("aucune disponibilité"));
}
