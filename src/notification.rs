use crate::model::{Block, Person, PersonKey, PlanResult};
use anyhow::{bail, Context, Result};

/// Message de notification préparé pour une personne.
/// L'envoi effectif (mail, SMS) reste hors de la bibliothèque.
#[derive(Debug, Clone)]
pub struct Notice {
    pub person_key: PersonKey,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, HTML, etc.).
pub trait NoticeRenderer {
    fn render(&self, person: &Person, plan: &PlanResult, blocks: &[&Block]) -> String;
}

/// Gabarit texte simple destiné à un futur mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(&self, person: &Person, plan: &PlanResult, blocks: &[&Block]) -> String {
        let mut body = format!(
            "Bonjour {name},\n\nVoici tes affectations pour {month:02}/{year} :\n",
            name = person.display_name,
            month = plan.month,
            year = plan.year,
        );
        for block in blocks {
            body.push_str(&format!(
                "- Bloc {kind} du {start} au {end} ({hours} h)\n",
                kind = block.kind,
                start = block.start(),
                end = block.end(),
                hours = block.hours,
            ));
        }
        body.push_str("\nMerci de vérifier tes disponibilités avant le verrouillage.\n");
        body
    }
}

/// Prépare la notification d'une personne pour un plan généré.
pub fn prepare_notice(
    plan: &PlanResult,
    people: &[Person],
    key: &PersonKey,
    renderer: &dyn NoticeRenderer,
) -> Result<Notice> {
    let person = people
        .iter()
        .find(|p| &p.key == key)
        .with_context(|| format!("unknown person key: {key}"))?;

    let blocks: Vec<&Block> = plan
        .blocks
        .iter()
        .filter(|b| b.assigned.as_ref() == Some(key))
        .collect();

    if blocks.is_empty() {
        bail!("no assigned block for {key} in {:02}/{}", plan.month, plan.year);
    }

    let content = renderer.render(person, plan, &blocks);
    Ok(Notice {
        person_key: person.key.clone(),
        content,
    })
}
