use serde::Serialize;

use super::bookmarks::BookmarkStore;
use super::catalog::{Job, JobId};
use super::storage::KeyValueStore;

/// Display descriptor for one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub bookmarked: bool,
}

impl JobCard {
    pub fn from_job(job: &Job, bookmarked: bool) -> Self {
        Self {
            job_id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary: job.salary.clone(),
            description: job.description.clone(),
            bookmarked,
        }
    }

    /// Card markup with the apply and bookmark actions bound to the job id.
    pub fn to_html(&self) -> String {
        let active = if self.bookmarked { " active" } else { "" };
        format!(
            concat!(
                "<div class=\"job-card\">",
                "<h3>{title}</h3>",
                "<p class=\"company\">{company}</p>",
                "<div class=\"details\"><span>{location}</span><span>{salary}</span></div>",
                "<p>{description}</p>",
                "<div class=\"actions\">",
                "<button class=\"apply-btn\" data-job-id=\"{id}\">Apply Now</button>",
                "<button class=\"bookmark-btn\" data-job-id=\"{id}\">",
                "<i class=\"fas fa-bookmark{active}\"></i>",
                "</button>",
                "</div>",
                "</div>"
            ),
            title = escape_html(&self.title),
            company = escape_html(&self.company),
            location = escape_html(&self.location),
            salary = escape_html(&self.salary),
            description = escape_html(&self.description),
            id = self.job_id,
            active = active,
        )
    }
}

/// Display target that accepts a full replacement of its cards.
pub trait RenderSurface {
    fn replace_all(&mut self, cards: Vec<JobCard>);
}

/// In-memory surface holding whatever was rendered last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardBuffer {
    cards: Vec<JobCard>,
    renders: u64,
}

impl CardBuffer {
    pub fn cards(&self) -> &[JobCard] {
        &self.cards
    }

    pub fn job_ids(&self) -> Vec<JobId> {
        self.cards.iter().map(|card| card.job_id).collect()
    }

    /// Number of replace operations received so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn to_html(&self) -> String {
        self.cards.iter().map(JobCard::to_html).collect()
    }
}

impl RenderSurface for CardBuffer {
    fn replace_all(&mut self, cards: Vec<JobCard>) {
        self.cards = cards;
        self.renders += 1;
    }
}

/// Clear `surface` and repopulate it with one card per job, in order.
pub fn render<'a, S, I>(surface: &mut dyn RenderSurface, jobs: I, bookmarks: &BookmarkStore<S>)
where
    S: KeyValueStore,
    I: IntoIterator<Item = &'a Job>,
{
    let cards = jobs
        .into_iter()
        .map(|job| JobCard::from_job(job, bookmarks.contains(job.id)))
        .collect();
    surface.replace_all(cards);
}

/// Catalog entries currently bookmarked, in catalog order.
pub fn bookmarked<'a, S>(jobs: &'a [Job], bookmarks: &BookmarkStore<S>) -> Vec<&'a Job>
where
    S: KeyValueStore,
{
    jobs.iter().filter(|job| bookmarks.contains(job.id)).collect()
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
