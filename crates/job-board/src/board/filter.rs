use serde::{Deserialize, Serialize};

use super::catalog::Job;

/// Current search inputs. Empty category or location means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl FilterCriteria {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }

    /// True when all three predicates hold for `job`.
    pub fn matches(&self, job: &Job) -> bool {
        self.matches_search(job) && self.matches_category(job) && self.matches_location(job)
    }

    // Literal substring match: the term is neither trimmed nor tokenized.
    fn matches_search(&self, job: &Job) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        [&job.title, &job.company, &job.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, job: &Job) -> bool {
        match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => job.category.as_str() == category,
        }
    }

    fn matches_location(&self, job: &Job) -> bool {
        match self.location.as_deref() {
            None | Some("") => true,
            Some(location) => job.location.to_lowercase() == location.to_lowercase(),
        }
    }
}

/// Jobs from `jobs` matching `criteria`, in input order.
pub fn filter<'a>(jobs: &'a [Job], criteria: &FilterCriteria) -> Vec<&'a Job> {
    jobs.iter().filter(|job| criteria.matches(job)).collect()
}
