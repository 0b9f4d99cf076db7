//! Reply drafting — fixed French templates filled from the applicant
//! profile. No generative step; the text is ready to edit and send.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::classifier::ResponseCategory;
use crate::config::ApplicantProfile;

/// Everything the templates interpolate. Empty fields render as empty
/// strings, never errors.
#[derive(Debug, Clone)]
pub struct ReplyContext {
    pub job_title: String,
    pub company: String,
    /// Recruiter name for the salutation, empty for a plain "Bonjour".
    pub sender_name: String,
    pub profile: ApplicantProfile,
    /// Drafting date, drives the proposed interview slots.
    pub today: NaiveDate,
}

const FRENCH_DAYS: [&str; 7] = [
    "lundi",
    "mardi",
    "mercredi",
    "jeudi",
    "vendredi",
    "samedi",
    "dimanche",
];

/// Mid-week days proposed for interview availability.
const SLOT_WEEKDAYS: [Weekday; 3] = [Weekday::Tue, Weekday::Wed, Weekday::Thu];

const SLOT_HOURS: [&str; 2] = ["entre 9h et 12h", "entre 14h et 17h"];

/// Suggested follow-up actions for the applicant, per category.
pub fn next_steps(category: ResponseCategory) -> Vec<String> {
    let steps: &[&str] = match category {
        ResponseCategory::InterviewRequest => &[
            "Confirm availability for interview",
            "Prepare questions about the role and company",
            "Research the interviewers (if provided)",
        ],
        ResponseCategory::FollowUp => &[
            "Send a thank you email",
            "Follow up on next steps",
            "Prepare additional information about your experience",
        ],
        ResponseCategory::Rejection => &[
            "Send a polite thank you email",
            "Ask for feedback on your application",
            "Request to be considered for future opportunities",
        ],
        ResponseCategory::InformationRequest => &[
            "Prepare detailed information about the requested topics",
            "Update your resume or portfolio if needed",
            "Follow up after sending the information",
        ],
        ResponseCategory::Unknown => &[
            "Review the email carefully",
            "Consider forwarding to a human for review",
            "Prepare a polite request for clarification",
        ],
    };
    steps.iter().map(|step| step.to_string()).collect()
}

/// Renders the reply template for a category.
pub fn render_reply(category: ResponseCategory, ctx: &ReplyContext) -> String {
    match category {
        ResponseCategory::InterviewRequest => interview_reply(ctx),
        ResponseCategory::FollowUp => follow_up_reply(ctx),
        ResponseCategory::Rejection => rejection_reply(ctx),
        ResponseCategory::InformationRequest => information_reply(ctx),
        ResponseCategory::Unknown => generic_reply(ctx),
    }
}

/// The next two mid-week dates strictly after `today`. Any two-week
/// horizon contains them unless date arithmetic overflows, in which
/// case fewer labels come back and the template fills blanks.
fn proposed_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=14)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .filter(|date| SLOT_WEEKDAYS.contains(&date.weekday()))
        .take(2)
        .collect()
}

fn slot_label(date: NaiveDate, hours: &str) -> String {
    format!(
        "{} {} {}",
        FRENCH_DAYS[date.weekday().num_days_from_monday() as usize],
        date.format("%d/%m"),
        hours
    )
}

fn salutation(sender_name: &str) -> String {
    if sender_name.is_empty() {
        "Bonjour,\n\n".to_string()
    } else {
        format!("Bonjour {},\n\n", sender_name)
    }
}

fn interview_reply(ctx: &ReplyContext) -> String {
    let mut slots = proposed_dates(ctx.today)
        .into_iter()
        .zip(SLOT_HOURS)
        .map(|(date, hours)| slot_label(date, hours));
    let slot_1 = slots.next().unwrap_or_default();
    let slot_2 = slots.next().unwrap_or_default();

    format!(
        "{salutation}Je vous remercie pour votre retour concernant ma candidature pour le poste de {job_title}.

Je suis disponible pour un entretien aux créneaux suivants :
- {slot_1}
- {slot_2}

N'hésitez pas à me proposer d'autres créneaux si ceux-ci ne vous conviennent pas.

Je reste à votre disposition pour tout complément d'information.

Cordialement,
{first_name} {last_name}
{phone}
{email}
",
        salutation = salutation(&ctx.sender_name),
        job_title = ctx.job_title,
        slot_1 = slot_1,
        slot_2 = slot_2,
        first_name = ctx.profile.first_name,
        last_name = ctx.profile.last_name,
        phone = ctx.profile.phone,
        email = ctx.profile.email,
    )
}

fn follow_up_reply(ctx: &ReplyContext) -> String {
    format!(
        "{salutation}Je vous remercie pour votre retour concernant ma candidature pour le poste de {job_title}.

Je me tiens à votre disposition pour toute information complémentaire concernant mon profil ou mon expérience.

Dans l'attente de votre retour, je vous prie d'agréer, Madame, Monsieur, mes salutations distinguées.

{first_name} {last_name}
{phone}
{email}
",
        salutation = salutation(&ctx.sender_name),
        job_title = ctx.job_title,
        first_name = ctx.profile.first_name,
        last_name = ctx.profile.last_name,
        phone = ctx.profile.phone,
        email = ctx.profile.email,
    )
}

fn rejection_reply(ctx: &ReplyContext) -> String {
    let company = if ctx.company.is_empty() {
        "votre entreprise"
    } else {
        ctx.company.as_str()
    };

    format!(
        "{salutation}Je vous remercie d'avoir pris le temps d'examiner ma candidature pour le poste de {job_title}.

Bien que déçu de ne pas être retenu pour ce poste, je reste intéressé par les opportunités futures au sein de {company}. Je vous serais reconnaissant de bien vouloir me faire part des raisons de cette décision, afin que je puisse améliorer ma candidature pour de futures opportunités.

Je vous remercie par avance pour votre retour et vous prie d'agréer, Madame, Monsieur, mes salutations distinguées.

{first_name} {last_name}
{email}
",
        salutation = salutation(&ctx.sender_name),
        job_title = ctx.job_title,
        company = company,
        first_name = ctx.profile.first_name,
        last_name = ctx.profile.last_name,
        email = ctx.profile.email,
    )
}

fn information_reply(ctx: &ReplyContext) -> String {
    format!(
        "{salutation}Je vous remercie pour votre intérêt pour ma candidature au poste de {job_title}.

Je me permets de vous transmettre les informations complémentaires suivantes concernant mon profil :

- [Détails sur l'expérience pertinente]
- [Informations sur les compétences demandées]
- [Disponibilités]
- [Prétentions salariales si demandées]

Je reste à votre disposition pour toute information complémentaire ou pour échanger plus en détail sur cette opportunité.

Cordialement,
{first_name} {last_name}
{phone}
{email}
",
        salutation = salutation(&ctx.sender_name),
        job_title = ctx.job_title,
        first_name = ctx.profile.first_name,
        last_name = ctx.profile.last_name,
        phone = ctx.profile.phone,
        email = ctx.profile.email,
    )
}

fn generic_reply(ctx: &ReplyContext) -> String {
    format!(
        "{salutation}Je vous remercie pour votre message concernant ma candidature pour le poste de {job_title}.

Je vous prie de bien vouloir m'excuser, mais je souhaiterais obtenir des précisions sur votre demande afin de pouvoir y répondre de la manière la plus appropriée.

Je reste à votre disposition pour tout complément d'information.

Cordialement,
{first_name} {last_name}
{phone}
{email}
",
        salutation = salutation(&ctx.sender_name),
        job_title = ctx.job_title,
        first_name = ctx.profile.first_name,
        last_name = ctx.profile.last_name,
        phone = ctx.profile.phone,
        email = ctx.profile.email,
    )
}
