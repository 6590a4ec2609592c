use crate::app_config::AppConfig;
use crate::domain::permission::{PermissionError, PermissionKind, PermissionResult, PermissionSystem};
use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use tokio::task;
use tracing::{info, instrument};

/// Asks for permission on the terminal. Nothing is remembered between runs, a grant only lasts for the session.
#[derive(Debug)]
pub struct ConsolePermissions {
    runtime_model: bool,
    preapproved: bool,
}

impl ConsolePermissions {
    pub fn new(config: &AppConfig) -> Self {
        ConsolePermissions {
            runtime_model: config.permission().runtime_model(),
            preapproved: config.permission().preapproved(),
        }
    }
}

#[async_trait]
impl PermissionSystem for ConsolePermissions {
    fn has_runtime_model(&self) -> bool {
        self.runtime_model
    }

    fn check_permission(&self, _kind: PermissionKind) -> bool {
        self.preapproved
    }

    #[instrument(skip(self))]
    async fn request_permission(&self, kind: PermissionKind) -> Result<PermissionResult, PermissionError> {
        let result = task::spawn_blocking(move || prompt(kind, io::stdin().lock(), io::stdout().lock())).await??;
        info!(?kind, "🔐 Permission prompt answered: {:?}", result);
        Ok(result)
    }
}

fn prompt(kind: PermissionKind, mut input: impl BufRead, mut output: impl Write) -> io::Result<PermissionResult> {
    let subject = match kind {
        PermissionKind::FineLocation => "this device's precise location",
    };
    write!(output, "Allow access to {}? [y/N] ", subject)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(parse_answer(&answer))
}

fn parse_answer(answer: &str) -> PermissionResult {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => PermissionResult::Granted,
        _ => PermissionResult::Denied,
    }
}
