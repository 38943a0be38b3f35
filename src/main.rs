use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use sampledu::{
    report_root, user_roots, EstimateOptions, Estimator, HostFileSystem, RandomSampler,
    DEFAULT_BASES, DEFAULT_BLACKLIST,
};
use std::env;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[clap(
    name = "sampledu",
    about = "Approximate disk usage of user directories by sampling deep subtrees"
)]
struct Parameters {
    #[clap(
        long = "level-true-cutoff",
        default_value_t = 5,
        help = "Compute directories at this depth or shallower exactly"
    )]
    level_true_cutoff: usize,

    #[clap(
        long = "level-max",
        default_value_t = 60,
        help = "Give up on paths deeper than this"
    )]
    level_max: usize,

    #[clap(
        long = "rand-prop",
        default_value_t = 0.1,
        help = "Fraction of children skipped in sampled directories"
    )]
    rand_prop: f64,

    #[clap(long = "user", help = "Only scan this user's directories")]
    user: Option<String>,

    #[clap(long = "seed", default_value_t = 0, help = "Seed for child sampling")]
    seed: u64,

    #[clap(
        long = "base",
        default_values = DEFAULT_BASES.iter().copied(),
        help = "Directory holding one directory per user (repeatable)"
    )]
    bases: Vec<PathBuf>,

    #[clap(
        long = "blacklist",
        default_values = DEFAULT_BLACKLIST.iter().copied(),
        help = "Skip paths containing this substring (repeatable)"
    )]
    blacklist: Vec<String>,

    #[clap(long = "no-progress", help = "Do not show progress bars")]
    no_progress: bool,

    #[clap(
        long = "log-level",
        help = "Set the log level (e.g., info, debug, trace)"
    )]
    log_level: Option<String>,
}

fn new_progress_bar(show_progress: bool) -> ProgressBar {
    let progress_bar = ProgressBar::new(0);
    if show_progress {
        if let Ok(style) = ProgressStyle::with_template("{msg} {wide_bar}") {
            progress_bar.set_style(style);
        }
    } else {
        progress_bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    progress_bar
}

fn main() {
    let arguments = Parameters::parse();

    // Set log level based on command-line argument or environment variable
    if let Some(log_level) = &arguments.log_level {
        env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    let options = EstimateOptions {
        true_cutoff_depth: arguments.level_true_cutoff,
        max_depth: arguments.level_max,
        sample_fraction: arguments.rand_prop,
        blacklist: arguments.blacklist,
    };
    if let Err(err) = options.validate() {
        eprintln!("{}", err);
        process::exit(1);
    }

    info!("Starting sampledu");
    let fs = HostFileSystem;
    let roots = match user_roots(&fs, &arguments.bases, arguments.user.as_deref()) {
        Ok(roots) => roots,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let mut estimator = Estimator::new(fs, RandomSampler::seeded(arguments.seed), options);
    let progress_bar = new_progress_bar(!arguments.no_progress);
    for root in &roots {
        if let Some(report) = report_root(root, &mut estimator, &progress_bar) {
            progress_bar.suspend(|| println!("{}", report));
        }
    }
}
