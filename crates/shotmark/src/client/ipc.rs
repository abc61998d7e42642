// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;
use std::time::Duration;

use eventline::error;
use shotmark_ipc::IpcClient;

/// Portal grabs can take a while (permission dialogs).
const CALL_TIMEOUT: Duration = Duration::from_secs(60);

pub fn connect(socket: &Path) -> Result<IpcClient, String> {
    let client = IpcClient::connect(socket).map_err(|e| {
        error!("failed to connect to daemon: {e}");

        format!(
            "shotmark: cannot connect to shotmarkd at {}\n\
             → {}\n\
             Hint: start the daemon with `shotmarkd`.",
            socket.display(),
            e
        )
    })?;

    client
        .set_timeout(Some(CALL_TIMEOUT))
        .map_err(|e| format!("shotmark: {e}"))?;
    Ok(client)
}
