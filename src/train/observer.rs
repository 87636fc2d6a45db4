use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives training progress and answers the save question.
///
/// The training loop depends only on this trait, so any front end (terminal,
/// GUI, test harness) can drive it.
pub trait TrainingObserver {
    /// Called every `eval_interval` steps with the probe accuracy in [0, 1].
    fn on_progress(&mut self, _step: usize, _accuracy: f64) {}

    /// Called once with the accuracy over the whole held-out split.
    fn on_complete(&mut self, _final_accuracy: f64) {}

    /// Blocks until the user decides whether to save the trained network.
    fn confirm_save(&mut self) -> bool;

    /// Checked before every training step. Returning `true` ends the loop.
    fn should_stop(&self) -> bool {
        false
    }
}

/// Terminal observer: reports through `log` and asks on stdin.
pub struct LogObserver {
    /// Skip the prompt and always save.
    pub assume_yes: bool,
    /// Optional flag another thread can set to stop after the current step.
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl LogObserver {
    pub fn new(assume_yes: bool) -> Self {
        LogObserver { assume_yes, stop_flag: None }
    }
}

impl TrainingObserver for LogObserver {
    fn on_progress(&mut self, step: usize, accuracy: f64) {
        log::info!("step {step}: probe accuracy {:.2}%", accuracy * 100.0);
    }

    fn on_complete(&mut self, final_accuracy: f64) {
        log::info!("test accuracy {:.2}%", final_accuracy * 100.0);
    }

    fn confirm_save(&mut self) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("Save the trained parameters? [Y/n] ");
        if let Err(e) = io::stdout().flush() {
            log::warn!("cannot flush prompt: {e}");
        }

        read_answer(&mut io::stdin().lock())
    }

    fn should_stop(&self) -> bool {
        self.stop_flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

/// Reads one answer line. A closed stream is a no; a blank line is a yes.
fn read_answer<R: BufRead>(reader: &mut R) -> bool {
    let mut answer = String::new();
    match reader.read_line(&mut answer) {
        Ok(0) => {
            log::warn!("no answer on stdin, not saving");
            false
        }
        Ok(_) => parse_answer(&answer),
        Err(e) => {
            log::warn!("cannot read answer, not saving: {e}");
            false
        }
    }
}

/// Empty input takes the default answer, yes.
fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "" | "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn answers_default_to_yes() {
        assert!(parse_answer("\n"));
        assert!(parse_answer("Y\n"));
        assert!(parse_answer(" yes "));
        assert!(!parse_answer("n"));
        assert!(!parse_answer("nope"));
    }

    #[test]
    fn closed_stdin_declines_the_save() {
        assert!(!read_answer(&mut Cursor::new("")));
        assert!(read_answer(&mut Cursor::new("\n")));
        assert!(!read_answer(&mut Cursor::new("n\n")));
    }

    #[test]
    fn assume_yes_skips_the_prompt() {
        assert!(LogObserver::new(true).confirm_save());
    }

    #[test]
    fn stop_flag_is_honoured() {
        let flag = Arc::new(AtomicBool::new(false));
        let observer = LogObserver { assume_yes: true, stop_flag: Some(flag.clone()) };
        assert!(!observer.should_stop());
        flag.store(true, Ordering::Relaxed);
        assert!(observer.should_stop());
    }
}
