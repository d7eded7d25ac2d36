use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} [{elapsed_precise}] {pos} resolved";

pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            spinner_position: AtomicUsize::new(0),
            current_bar: None,
        }
    }

    /// Create a reporter only when stderr is attached to a terminal
    pub fn for_terminal() -> Option<Self> {
        if Term::stderr().is_term() {
            Some(Self::new())
        } else {
            None
        }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(&["🎡 ", "🎡⊙", "🎡◐", "🎡◓", "🎡◑", "🎡◒", "🎡○", "🎡●", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_wheel_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_resolution(&mut self, root: &str) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Resolving dependencies of {}...",
            style("🔍").cyan(),
            style(root).green().bold()
        );
        let spinner = self.create_spinner("Fetching dependency lists...");
        self.current_bar = Some(spinner);
    }

    pub fn resolving_package(&self, package: &str) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Resolving: {package}..."));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Resolving: {}... ",
                style(self.next_wheel_frame()).cyan(),
                style(package).dim()
            );
        }
    }

    pub fn package_resolved(&self) {
        if let Some(ref pb) = self.current_bar {
            pb.inc(1);
        }
    }

    pub fn finish_resolution(&mut self, packages: usize, cycles: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        eprintln!(
            "\r{} Resolution complete: {} {}, {} {}",
            style("✓").green(),
            style(packages).yellow().bold(),
            pluralize("package", packages),
            style(cycles).yellow().bold(),
            pluralize("cycle", cycles)
        );
    }
}
