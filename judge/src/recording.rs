use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use yahtzee::GameSnapshot;

/// Writes every game's bot communication and final scorecard to a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    /// `request` and `response` must be JSON. They are stored as JSON values
    /// rather than strings, so that the recording stays readable.
    pub fn store_request(
        &mut self,
        player: &str,
        request: &str,
        response: &str,
    ) -> anyhow::Result<()> {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: serde_json::from_str(request)?,
            response: serde_json::from_str(response)?,
        });
        Ok(())
    }

    /// Writes `game_NNNNNN.json` with the requests since the last call, and
    /// `game_NNNNNN.txt` with the final scorecard.
    pub fn write_game_recording(&mut self, snapshot: &GameSnapshot) -> anyhow::Result<()> {
        let requests = std::mem::take(&mut self.requests);
        let json_path = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(json_path)?);
        serde_json::to_writer_pretty(&mut writer, &requests)?;
        writeln!(writer)?;
        writer.flush()?;

        let txt_path = self.directory.join(format!("game_{:0>6}.txt", self.num));
        std::fs::write(txt_path, snapshot.to_string())?;

        self.num += 1;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    player: String,
    request: serde_json::Value,
    response: serde_json::Value,
}
