use std::io;
use std::process::{Command, ExitStatus};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Moves the user to a result's page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

#[derive(Debug, Default, Clone)]
enum Opener {
    #[default]
    None,
    System,
    Program(String),
}

/// Prints the target and, when asked to, hands it to an URL opener.
#[derive(Debug, Default, Clone)]
pub struct TerminalNavigator {
    opener: Opener,
}

impl TerminalNavigator {
    pub fn new(open_externally: bool) -> Self {
        let opener = if open_externally {
            Opener::System
        } else {
            Opener::None
        };
        Self { opener }
    }

    /// Open URLs with `program <url>` instead of the system handler.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            opener: Opener::Program(program.into()),
        }
    }

    fn command(&self, url: &str) -> Option<Command> {
        match &self.opener {
            Opener::None => None,
            Opener::System => Some(system_opener(url)),
            Opener::Program(program) => {
                let mut cmd = Command::new(program);
                cmd.arg(url);
                Some(cmd)
            }
        }
    }

    /// Run the opener for `url` on the blocking pool and wait for it to exit,
    /// so no child is left unreaped.
    pub fn launch(&self, url: &str) -> Option<JoinHandle<io::Result<ExitStatus>>> {
        let mut cmd = self.command(url)?;
        match Handle::try_current() {
            Ok(runtime) => Some(runtime.spawn_blocking(move || cmd.status())),
            Err(_) => {
                if let Err(e) = cmd.status() {
                    log::error!("could not open {url}, error: {e}");
                }
                None
            }
        }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) {
        println!("-> {url}");
        let Some(task) = self.launch(url) else {
            return;
        };
        let url = url.to_string();
        tokio::spawn(async move {
            match task.await {
                Ok(Ok(status)) => log::info!("opened {url}: {status}"),
                Ok(Err(e)) => log::error!("could not open {url}, error: {e}"),
                Err(e) => log::error!("opener for {url} did not finish, error: {e}"),
            }
        });
    }
}

#[cfg(target_os = "windows")]
fn system_opener(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn system_opener(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn system_opener(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
