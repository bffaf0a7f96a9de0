//! center — command-line driver for the radiotherapy center simulator.
//!
//! ```text
//! center [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! Without a config file the default center (4 LINACs, 40 patients/week,
//! 52 weeks) is simulated.  Missing fields in the JSON take their default
//! values.  Daily metrics and the run summary are written as CSV to
//! `OUTPUT_DIR` (default `output/center`), plus `run_summary.json`.
//!
//! Set `RUST_LOG=info` for overtime and disruption events, `debug` for
//! per-patient admissions and completions.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use rtc_core::{CenterConfig, Day};
use rtc_disruption::DayDisruptions;
use rtc_output::{CsvWriter, OutputWriter, SimOutputObserver};
use rtc_sim::{MetricsSnapshot, OvertimeChange, RunSummary, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_OUTPUT_DIR: &str = "output/center";

// ── Observer wrapper that prints weekly progress ─────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:            SimOutputObserver<W>,
    disrupted_days:   usize,
    overtime_changes: usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, disrupted_days: 0, overtime_changes: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_disruption(&mut self, day: Day, disruptions: &DayDisruptions) {
        self.disrupted_days += 1;
        self.inner.on_disruption(day, disruptions);
    }

    fn on_overtime_change(&mut self, day: Day, change: OvertimeChange) {
        self.overtime_changes += 1;
        self.inner.on_overtime_change(day, change);
    }

    fn on_day_end(&mut self, snapshot: &MetricsSnapshot) {
        if snapshot.day.weekday() == 4 && snapshot.day.week() % 4 == 3 {
            println!(
                "  week {:>3}: backlog {:>4}  in treatment {:>4}  completed {:>5}  overtime LINACs {}",
                snapshot.day.week() + 1,
                snapshot.backlog,
                snapshot.in_treatment,
                snapshot.completed,
                snapshot.overtime_linacs,
            );
        }
        self.inner.on_day_end(snapshot);
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        self.inner.on_sim_end(summary);
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<CenterConfig> {
    let Some(path) = path else {
        return Ok(CenterConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn print_summary(summary: &RunSummary) {
    println!("{:<34} {:>10}", "Metric", "Value");
    println!("{}", "-".repeat(45));
    let rows: [(&str, String); 15] = [
        ("patients generated",            summary.patients_generated.to_string()),
        ("patients treated",              summary.patients_treated.to_string()),
        ("still waiting",                 summary.remaining_waiting.to_string()),
        ("still in treatment",            summary.remaining_in_treatment.to_string()),
        ("mean wait (days)",              format!("{:.2}", summary.wait.mean)),
        ("median wait (days)",            format!("{:.1}", summary.wait.median)),
        ("max wait (days)",               summary.wait.max.to_string()),
        ("mean wait to admission",        format!("{:.2}", summary.admission_wait.mean)),
        ("max backlog",                   summary.max_backlog.to_string()),
        ("overtime LINAC-days",           summary.overtime_linac_days.to_string()),
        ("patients treated in overtime",  summary.overtime_patients.to_string()),
        ("sessions deferred (no slot)",   summary.deferred_sessions.to_string()),
        ("breakdowns",                    summary.breakdown_count.to_string()),
        ("slot-units lost to breakdown",  summary.breakdown_slots_lost.to_string()),
        ("closure days",                  summary.closure_days.to_string()),
    ];
    for (name, value) in rows {
        println!("{name:<34} {value:>10}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let mut args = std::env::args_os().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    // 1. Config.
    let config = load_config(config_path.as_deref())?;
    println!("=== center — radiotherapy patient flow ===");
    println!(
        "LINACs: {}  |  Patients/week: {}  |  Weeks: {}  |  Seed: {}",
        config.linac_count, config.weekly_new_patients, config.sim_weeks, config.seed,
    );
    println!();

    // 2. Build sim (validates the config before any day runs).
    let mut sim = SimBuilder::new(config)
        .build()
        .context("invalid center configuration")?;

    // 3. Set up output.
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer));

    // 4. Run.
    let t0 = Instant::now();
    let summary = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        log::error!("output error: {e}");
    }

    let json_path = output_dir.join("run_summary.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("writing {}", json_path.display()))?;

    // 5. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  {} disrupted days, {} overtime changes, output in {}",
        obs.disrupted_days,
        obs.overtime_changes,
        output_dir.display(),
    );
    println!();
    print_summary(&summary);

    Ok(())
}
