use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

///
/// A pending read never holds up process exit.
pub struct StdinLines {
    rx: mpsc::UnboundedReceiver<String>,
}

impl StdinLines {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    #[cfg(test)]
    pub fn from_lines(lines: &[&str]) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            let _ = tx.send(line.to_string());
        }
        Self { rx }
    }

    /// Prints `prompt` without a newline and waits for the next line. `None` on EOF.
    pub async fn prompt(&mut self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        let _ = io::stdout().flush();
        self.rx.recv().await
    }
}
