use indicatif::{ProgressBar, ProgressStyle};
use photomap_core::ingest::{DropKind, IngestReport};
use photomap_core::models::PhotoSource;
use photomap_core::IngestPipeline;
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar for determinate progress
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg}\n[{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb.set_message(message.to_string());
    pb
}

/// Finish a progress bar with success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Run an ingest batch behind a progress bar
///
/// The bar advances once per appended record (via the collection revision)
/// and once per dropped file (via the drop observer).
pub async fn ingest_with_progress(
    pipeline: IngestPipeline,
    sources: Vec<PhotoSource>,
    show: bool,
) -> IngestReport {
    let pb = if show {
        create_progress_bar(sources.len() as u64, "Locating photos")
    } else {
        ProgressBar::hidden()
    };

    let on_drop = pb.clone();
    let pipeline = pipeline.with_observer(move |_: &str, _: DropKind| on_drop.inc(1));

    let mut revisions = pipeline.collection().subscribe();
    let on_append = pb.clone();
    let watcher = tokio::spawn(async move {
        let mut seen = *revisions.borrow_and_update();
        while revisions.changed().await.is_ok() {
            let current = *revisions.borrow_and_update();
            on_append.inc(current.saturating_sub(seen));
            seen = current;
        }
    });

    let report = pipeline.ingest(sources).await;
    watcher.abort();

    pb.set_position(report.submitted as u64);
    finish_success(
        &pb,
        &format!("Located {} of {} photos", report.appended, report.submitted),
    );
    report
}
