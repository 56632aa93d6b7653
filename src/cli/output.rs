//! Output formatting module for ecs-remedy
//!
//! Provides colored per-step status lines, section headers, and the
//! console observer the runner reports progress through.

use colored::Colorize;

use ecs_remedy::provider::LogEvent;
use ecs_remedy::runner::{SecretProbe, StepKind, StepObserver, StepOutcome, StepStatus};

/// Get the colored string representation of a step status.
fn colored_status(status: StepStatus) -> String {
    match status {
        StepStatus::Ok => "ok".green().to_string(),
        StepStatus::Changed => "changed".yellow().to_string(),
        StepStatus::WouldChange => "would change".cyan().to_string(),
        StepStatus::Warning => "warning".yellow().bold().to_string(),
        StepStatus::Failed => "failed".red().bold().to_string(),
        StepStatus::Skipped => "skipped".cyan().to_string(),
    }
}

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// JSON output mode (suppresses all decoration)
    json_mode: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, json_mode: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            json_mode,
            verbosity,
        }
    }

    /// Print a banner/header
    pub fn banner(&self, title: &str) {
        if self.json_mode {
            return;
        }

        let line = "=".repeat(title.len() + 4);
        if self.use_color {
            println!("\n{}", line.bright_blue());
            println!("{}", format!("  {}  ", title).bright_blue().bold());
            println!("{}\n", line.bright_blue());
        } else {
            println!("\n{}", line);
            println!("  {}  ", title);
            println!("{}\n", line);
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.json_mode {
            return;
        }

        if self.use_color {
            println!("\n{}", title.cyan().bold());
            println!("{}", "-".repeat(title.len()).cyan());
        } else {
            println!("\n{}", title);
            println!("{}", "-".repeat(title.len()));
        }
    }

    /// Print a step header
    pub fn step_header(&self, step: StepKind) {
        if self.json_mode {
            return;
        }

        let header = format!("STEP [{}]", step.title());
        let stars = "*".repeat(72_usize.saturating_sub(header.len()));

        if self.use_color {
            println!("\n{} {}", header.bright_white().bold(), stars.bright_black());
        } else {
            println!("\n{} {}", header, stars);
        }
    }

    /// Print a step result line
    pub fn step_result(&self, outcome: &StepOutcome) {
        if self.json_mode {
            return;
        }

        let status = if self.use_color {
            colored_status(outcome.status)
        } else {
            outcome.status.as_str().to_string()
        };

        println!(
            "{}: {} ({:.1}s)",
            status,
            outcome.detail,
            outcome.duration.as_secs_f64()
        );
    }

    /// Print a per-secret verification result
    pub fn probe_result(&self, probe: &SecretProbe) {
        if self.json_mode {
            return;
        }

        let state = if probe.accessible {
            if self.use_color {
                "accessible".green().to_string()
            } else {
                "accessible".to_string()
            }
        } else if self.use_color {
            "inaccessible".red().bold().to_string()
        } else {
            "inaccessible".to_string()
        };

        println!("  secret '{}': {} ({})", probe.secret_id, state, probe.detail);
    }

    /// Print a fetched log event
    pub fn log_line(&self, event: &LogEvent) {
        if self.json_mode {
            return;
        }

        let stamp = event
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        if self.use_color {
            println!("  {} {}", stamp.bright_black(), event.message);
        } else {
            println!("  {} {}", stamp, event.message);
        }
    }

    /// Print the operator next-step instructions.
    ///
    /// Printed at the end of every run regardless of step outcomes.
    pub fn next_steps(&self, steps: &[String]) {
        if self.json_mode || steps.is_empty() {
            return;
        }

        self.section("Next steps");
        for step in steps {
            println!("  - {}", step);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.json_mode {
            return;
        }
        println!("{}", message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.json_mode {
            return;
        }
        if self.use_color {
            eprintln!("{} {}", "[WARNING]:".yellow().bold(), message);
        } else {
            eprintln!("[WARNING]: {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "[ERROR]:".red().bold(), message);
        } else {
            eprintln!("[ERROR]: {}", message);
        }
    }

    /// Print a debug message (verbosity >= 2)
    pub fn debug(&self, message: &str) {
        if self.json_mode || self.verbosity < 2 {
            return;
        }
        if self.use_color {
            eprintln!("{} {}", "[DEBUG]:".bright_black(), message);
        } else {
            eprintln!("[DEBUG]: {}", message);
        }
    }
}

/// Observer that renders runner progress through an [`OutputFormatter`].
pub struct ConsoleObserver<'a> {
    output: &'a OutputFormatter,
}

impl<'a> ConsoleObserver<'a> {
    /// Create an observer over a formatter.
    pub fn new(output: &'a OutputFormatter) -> Self {
        Self { output }
    }
}

impl StepObserver for ConsoleObserver<'_> {
    fn step_started(&self, step: StepKind) {
        self.output.step_header(step);
    }

    fn step_finished(&self, outcome: &StepOutcome) {
        self.output.step_result(outcome);
    }

    fn probe_finished(&self, probe: &SecretProbe) {
        self.output.probe_result(probe);
    }

    fn log_line(&self, event: &LogEvent) {
        self.output.log_line(event);
    }

    fn note(&self, message: &str) {
        self.output.info(&format!("  {}", message));
    }
}
