use crate::models::{CreditSet, Person, TmdbCredits};

/// Crew jobs that count as a screenwriting credit
pub const SCREENWRITER_JOBS: [&str; 3] = ["Screenplay", "Writer", "Story"];

const DIRECTOR_JOB: &str = "Director";

/// Derives the creative team from a credits sub-resource
///
/// The lead actor is simply the first-billed cast entry; TMDB has no explicit
/// "lead" flag.
pub fn extract_credits(credits: &TmdbCredits) -> CreditSet {
    CreditSet {
        director: find_director(credits),
        lead_actor: credits.cast.first().map(Person::from),
        screenwriter: find_screenwriter(credits),
    }
}

fn find_director(credits: &TmdbCredits) -> Option<Person> {
    credits
        .crew
        .iter()
        .find(|member| member.job == DIRECTOR_JOB)
        .map(Person::from)
}

// First crew entry holding any writing credit, in crew order
fn find_screenwriter(credits: &TmdbCredits) -> Option<Person> {
    credits
        .crew
        .iter()
        .find(|member| SCREENWRITER_JOBS.contains(&member.job.as_str()))
        .map(Person::from)
}
