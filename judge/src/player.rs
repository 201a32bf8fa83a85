use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::trace;
use yahtzee::Request;

use crate::recording::Recorder;

/// How to start a bot, as read from a JSON file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// The name the bot plays under.
    pub nick: String,
    /// The path to the bot's executable.
    pub cmd: String,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

pub struct Player {
    pub name: String,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn new(name: &str, executable_path: &str) -> anyhow::Result<Self> {
        let child_proc = Command::new(executable_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let Some(stdin) = child_proc.stdin else {
            anyhow::bail!("Could not access stdin of '{}'", executable_path);
        };
        let Some(stdout) = child_proc.stdout else {
            anyhow::bail!("Could not access stdout of '{}'", executable_path);
        };
        Ok(Self {
            name: String::from(name),
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        Self::new(&config.nick, &config.cmd)
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Player '{}' closed its stdout", self.name);
        }
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response)?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, req_json.trim_end(), serialized_response)?;
        }
        self.buf.clear();
        Ok(response)
    }

    /// Tells the bot to shut down. No response is expected.
    pub fn say_goodbye(&mut self) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(&Request::Bye)?;
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }
}
