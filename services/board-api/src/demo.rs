use crate::infra::build_board;
use clap::Args;
use job_board::board::{
    ApplicationError, ApplicationForm, ApplicationSink, BoardEvent, EventOutcome, FilterCriteria,
    JobBoard, JobCard, JobCatalog, JobId, KeyValueStore, LogSink, MemoryStore,
};
use job_board::config::AppConfig;
use job_board::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct JobsArgs {
    /// Case-insensitive text matched against title, company and description
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact category label (technology, marketing, design, sales, ...)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Location, matched case-insensitively against the whole value
    #[arg(long)]
    pub(crate) location: Option<String>,
}

impl From<JobsArgs> for FilterCriteria {
    fn from(args: JobsArgs) -> Self {
        FilterCriteria {
            search_term: args.search.unwrap_or_default(),
            category: args.category,
            location: args.location,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BookmarkArgs {
    /// Posting identifier
    pub(crate) job_id: u32,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// Posting identifier
    pub(crate) job_id: u32,
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    /// Resume file name or link
    #[arg(long, default_value = "")]
    pub(crate) resume: String,
    #[arg(long, default_value = "")]
    pub(crate) message: String,
}

pub(crate) fn run_jobs(config: &AppConfig, args: JobsArgs) -> Result<(), AppError> {
    let mut board = build_board(config)?;
    let criteria = FilterCriteria::from(args);
    board.handle(BoardEvent::CriteriaChanged(criteria));

    println!("Job listings");
    print_cards(board.listing().cards());
    Ok(())
}

pub(crate) fn run_toggle_bookmark(config: &AppConfig, args: BookmarkArgs) -> Result<(), AppError> {
    let mut board = build_board(config)?;
    let job_id = JobId(args.job_id);

    match board.handle(BoardEvent::BookmarkClicked(job_id)) {
        EventOutcome::BookmarkToggled {
            bookmarked: true, ..
        } => println!("Bookmarked job {job_id}"),
        EventOutcome::BookmarkToggled { .. } => println!("Removed bookmark for job {job_id}"),
        _ => println!("No job with id {job_id}; nothing changed"),
    }
    Ok(())
}

pub(crate) fn run_bookmarks(config: &AppConfig) -> Result<(), AppError> {
    let board = build_board(config)?;

    println!("Bookmarked jobs");
    print_cards(board.saved().cards());
    Ok(())
}

pub(crate) fn run_apply(config: &AppConfig, args: ApplyArgs) -> Result<(), AppError> {
    let mut board = build_board(config)?;
    let form = ApplicationForm {
        name: args.name,
        email: args.email,
        resume: args.resume,
        message: args.message,
    };
    submit_application(&mut board, JobId(args.job_id), form);
    Ok(())
}

/// Scripted session against a throwaway in-memory board.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let mut board = JobBoard::new(JobCatalog::seed(), MemoryStore::default(), LogSink);

    println!("Job board demo");
    println!("Catalog: {} postings", board.catalog().len());
    print_cards(board.listing().cards());

    let steps = [
        ("Search \"designer\"", BoardEvent::SearchInput("designer".to_string())),
        ("Clear search", BoardEvent::SearchInput(String::new())),
        (
            "Category \"marketing\"",
            BoardEvent::CategoryChanged(Some("marketing".to_string())),
        ),
        ("Any category", BoardEvent::CategoryChanged(None)),
        (
            "Location \"remote\"",
            BoardEvent::LocationChanged(Some("remote".to_string())),
        ),
        ("Any location", BoardEvent::LocationChanged(None)),
    ];
    for (label, event) in steps {
        board.handle(event);
        println!("\n{label}");
        print_cards(board.listing().cards());
    }

    println!("\nToggle bookmarks on 2, 4, 2");
    for id in [2, 4, 2] {
        board.handle(BoardEvent::BookmarkClicked(JobId(id)));
    }
    print_cards(board.saved().cards());

    println!("\nApply to unknown job 999");
    board.handle(BoardEvent::ApplyClicked(JobId(999)));
    println!(
        "  Modal: {}",
        if board.flow().is_open() { "open" } else { "closed" }
    );

    println!("\nApply to job 3");
    submit_application(
        &mut board,
        JobId(3),
        ApplicationForm {
            name: "Demo Applicant".to_string(),
            email: "applicant@example.com".to_string(),
            resume: "resume.pdf".to_string(),
            message: "Looking forward to hearing from you.".to_string(),
        },
    );

    Ok(())
}

fn submit_application<S, K>(board: &mut JobBoard<S, K>, job_id: JobId, form: ApplicationForm)
where
    S: KeyValueStore,
    K: ApplicationSink,
{
    match board.handle(BoardEvent::ApplyClicked(job_id)) {
        EventOutcome::ModalOpened { job_title, .. } => {
            println!("  Applying to {job_title}");
        }
        _ => {
            println!("  No job with id {job_id}; application not started");
            return;
        }
    }

    match board.submit(form) {
        Ok(record) => {
            println!(
                "  Application submitted successfully at {}",
                record.submitted_at_iso()
            );
        }
        Err(ApplicationError::MissingField(field)) => {
            println!("  Application rejected: {} is required", field.label());
        }
        Err(err) => println!("  Application not submitted: {err}"),
    }
}

fn print_cards(cards: &[JobCard]) {
    if cards.is_empty() {
        println!("  (none)");
        return;
    }
    for card in cards {
        let marker = if card.bookmarked { "*" } else { " " };
        println!(
            "{marker} [{}] {} | {} | {} | {}",
            card.job_id, card.title, card.company, card.location, card.salary
        );
    }
}
