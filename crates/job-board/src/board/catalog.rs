use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Posting category. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobCategory {
    Technology,
    Marketing,
    Design,
    Sales,
    Other(String),
}

impl JobCategory {
    pub fn as_str(&self) -> &str {
        match self {
            JobCategory::Technology => "technology",
            JobCategory::Marketing => "marketing",
            JobCategory::Design => "design",
            JobCategory::Sales => "sales",
            JobCategory::Other(label) => label,
        }
    }
}

impl From<String> for JobCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "technology" => JobCategory::Technology,
            "marketing" => JobCategory::Marketing,
            "design" => JobCategory::Design,
            "sales" => JobCategory::Sales,
            _ => JobCategory::Other(value),
        }
    }
}

impl From<JobCategory> for String {
    fn from(value: JobCategory) -> Self {
        match value {
            JobCategory::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single posting. Never mutated after the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: JobCategory,
    /// Display string such as `$90k - $110k`.
    pub salary: String,
    pub description: String,
    pub posted: NaiveDate,
}

/// Error raised while building a catalog from external data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate job identifier {0}")]
    DuplicateId(JobId),
}

/// Read-only list of postings in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCatalog {
    jobs: Vec<Job>,
}

impl JobCatalog {
    pub fn new(jobs: Vec<Job>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for job in &jobs {
            if !seen.insert(job.id) {
                return Err(CatalogError::DuplicateId(job.id));
            }
        }
        Ok(Self { jobs })
    }

    /// The four postings the board ships with.
    pub fn seed() -> Self {
        let jobs = vec![
            seed_job(
                1,
                "Senior Frontend Developer",
                "TechCorp",
                "Remote",
                JobCategory::Technology,
                "$120k - $150k",
                "We are looking for an experienced Frontend Developer to join our team...",
                (2024, 3, 15),
            ),
            seed_job(
                2,
                "Marketing Manager",
                "GrowthLabs",
                "New York",
                JobCategory::Marketing,
                "$90k - $110k",
                "Join our marketing team to drive growth and brand awareness...",
                (2024, 3, 14),
            ),
            seed_job(
                3,
                "UI/UX Designer",
                "DesignHub",
                "London",
                JobCategory::Design,
                "$80k - $100k",
                "Create beautiful and intuitive user interfaces...",
                (2024, 3, 13),
            ),
            seed_job(
                4,
                "Sales Representative",
                "SalesForce",
                "Tokyo",
                JobCategory::Sales,
                "$70k - $90k",
                "Drive sales and build relationships with clients...",
                (2024, 3, 12),
            ),
        ];
        Self { jobs }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse `id,title,company,location,category,salary,description,posted` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut jobs = Vec::new();

        for record in csv_reader.deserialize::<Job>() {
            jobs.push(record?);
        }

        Self::new(jobs)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_job(
    id: u32,
    title: &str,
    company: &str,
    location: &str,
    category: JobCategory,
    salary: &str,
    description: &str,
    (year, month, day): (i32, u32, u32),
) -> Job {
    Job {
        id: JobId(id),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        category,
        salary: salary.to_string(),
        description: description.to_string(),
        posted: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}
