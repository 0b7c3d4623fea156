use anyhow::{Context, bail};
use chrono::{Datelike, Local};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

use trainer_scheduler::domain::availability::{DEFAULT_HORIZON_DAYS, DEFAULT_SLOT_COUNT};
use trainer_scheduler::domain::id::TrainerId;
use trainer_scheduler::domain::manager::ScheduleView;
use trainer_scheduler::domain::store::prefs::JsonPreferenceStore;
use trainer_scheduler::domain::store::{PreferenceStore, TrainerStore};
use trainer_scheduler::{engine_from_snapshot, export, logger};

const MONTH_PREF_KEY: &str = "schedule.month";

/// Trainer booking & scheduling report over a JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "trainer_scheduler")]
struct Args {
    /// Path to the snapshot JSON (trainers, bookings, batches, rows).
    snapshot: PathBuf,

    /// Month to report on, as YYYY-MM. Defaults to the last-used month,
    /// then to the current one.
    #[arg(long)]
    month: Option<String>,

    /// Write the annotated booking list of the month as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also look up the next free slots for this trainer id.
    #[arg(long, value_name = "TRAINER_ID")]
    free_slots: Option<String>,

    /// Number of free slots to look for.
    #[arg(long, default_value_t = DEFAULT_SLOT_COUNT)]
    count: usize,

    /// Search horizon in days for the free-slot lookup.
    #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
    horizon: u64,

    /// Location of the preference file.
    #[arg(long, default_value = ".scheduler-prefs.json")]
    prefs: PathBuf,
}

fn parse_month(raw: &str) -> anyhow::Result<(i32, u32)> {
    let (year, month) = raw.split_once('-').context("month must be YYYY-MM")?;
    let year: i32 = year.parse().context("month must be YYYY-MM")?;
    let month: u32 = month.parse().context("month must be YYYY-MM")?;
    if !(1..=12).contains(&month) {
        bail!("month out of range: {}", raw);
    }
    Ok((year, month))
}

fn report_view(view: &ScheduleView) {
    log::info!("--- Schedule {}-{:02} ---", view.year, view.month);
    log::info!("{} booking(s) in window", view.bookings.len());

    for entry in &view.bookings {
        let marker = if entry.conflict { " [CONFLICT]" } else { "" };
        log::info!(
            "  {} {} {} ({}){}",
            entry.booking.date,
            entry.booking.span,
            entry.booking.trainer,
            entry.booking.college_name,
            marker
        );
    }

    let mut utilization: Vec<_> = view.utilization.iter().collect();
    utilization.sort_by(|a, b| a.0.cmp(b.0));
    for (trainer, percent) in utilization {
        log::info!("  Utilization {}: {}%", trainer, percent);
    }

    let mut budgets: Vec<_> = view.budgets.values().collect();
    budgets.sort_by(|a, b| a.batch.cmp(&b.batch));
    for budget in budgets {
        if budget.is_over_allocated() {
            log::warn!(
                "  Batch {}: {}/{}h scheduled, OVER BUDGET by {}h",
                budget.batch,
                budget.scheduled_hours,
                budget.assigned_hours,
                -budget.remaining
            );
        } else {
            log::info!(
                "  Batch {}: {}/{}h scheduled, {}h remaining",
                budget.batch,
                budget.scheduled_hours,
                budget.assigned_hours,
                budget.displayed_remaining
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();
    let prefs = JsonPreferenceStore::open(&args.prefs);

    let month_raw = match args.month {
        Some(month) => month,
        None => match prefs.load(MONTH_PREF_KEY).await? {
            Some(last) => {
                log::info!("No --month given, reusing last filter '{}'", last);
                last
            }
            None => {
                let today = Local::now().date_naive();
                format!("{}-{:02}", today.year(), today.month())
            }
        },
    };
    let (year, month) = parse_month(&month_raw)?;

    let (manager, stores) = engine_from_snapshot(&args.snapshot)?;

    let trainers = stores.trainers.list_trainers().await?;
    log::info!("{} trainer(s) in directory", trainers.len());

    let view = manager.month_view(year, month).await?;
    report_view(&view);
    prefs.store(MONTH_PREF_KEY, &month_raw).await?;

    if let Some(trainer) = args.free_slots {
        let trainer = TrainerId::new(trainer);
        let today = Local::now().date_naive();
        let slots = manager.free_slots(&trainer, today, args.count, args.horizon).await?;

        log::info!("Next {} free slot(s) for {}:", slots.len(), trainer);
        for slot in &slots {
            log::info!("  {} {}", slot.date, slot.slot);
        }
    }

    if let Some(csv_path) = args.csv {
        let records = export::booking_records(&view);
        let file = File::create(&csv_path)?;
        export::write_csv(file, &records)?;
        log::info!("Wrote {} record(s) to '{}'", records.len(), csv_path.display());
    }

    Ok(())
}
