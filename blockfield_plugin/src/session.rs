// Plugin session: the state machine behind the panel.
//
// `PluginSession` owns the scene host, the layout config and a closed flag.
// The panel drives it with `PluginMessage`s; every message yields the
// `HostEvent`s the panel should see, in order:
//
//   message | outcome                 | events
//   --------+-------------------------+-----------------------------------
//   cancel  | -                       | Closed
//   import  | ok, frame found         | ImportCompleted { layouts }, Closed
//   import  | ok, frame missing       | FrameNotFound { frame_name }, Closed
//   import  | malformed block/marker  | ImportFailed { reason }
//
// A failed import leaves the session open so the user can fix the frame and
// press Import again. Once closed, the session ignores every message.
//
// Each import seeds a fresh id counter from the message's offset, so
// re-importing the same frame yields the same ids.
//
// `run` is the stream driver used by the binary and the integration tests:
// it reads framed messages until the session closes or input ends and writes
// either the bare layout arrays or every event, depending on `OutputMode`.

use std::io::{BufRead, Write};

use blockfield_core::{ImportReport, LayoutConfig, LayoutIds, SceneHost, run_import};
use blockfield_protocol::{HostEvent, PluginMessage, read_message, write_message};
use tracing::{debug, error, info, warn};

use crate::error::PluginError;

/// What `PluginSession::run` writes to its output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Only the layout array of each completed import, one per line.
    #[default]
    Layouts,
    /// Every `HostEvent`, one per line.
    Events,
}

/// Counters from one `run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub messages: u32,
    pub imports: u32,
    pub failures: u32,
    pub closed: bool,
}

/// Plugin state for one open panel.
pub struct PluginSession<H: SceneHost> {
    host: H,
    config: LayoutConfig,
    closed: bool,
}

impl<H: SceneHost> PluginSession<H> {
    pub fn new(host: H, config: LayoutConfig) -> Self {
        Self {
            host,
            config,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Run one import without touching session state.
    pub fn import(&self, frame_name: &str, id_offset: u32) -> Result<ImportReport, PluginError> {
        let ids = LayoutIds::for_artboard(id_offset, &self.config);
        Ok(run_import(&self.host, frame_name, ids, &self.config)?)
    }

    /// Apply one panel message and return the resulting events.
    pub fn handle(&mut self, msg: PluginMessage) -> Result<Vec<HostEvent>, PluginError> {
        if self.closed {
            debug!(?msg, "session closed, ignoring message");
            return Ok(Vec::new());
        }

        match msg {
            PluginMessage::Cancel => {
                info!("import cancelled");
                self.closed = true;
                Ok(vec![HostEvent::Closed])
            }
            PluginMessage::Import {
                frame_name,
                id_offset,
            } => match self.import(&frame_name, id_offset) {
                Ok(report) if !report.frame_found => {
                    self.closed = true;
                    Ok(vec![HostEvent::FrameNotFound { frame_name }, HostEvent::Closed])
                }
                Ok(report) => {
                    let layouts = report
                        .layouts
                        .iter()
                        .map(serde_json::to_value)
                        .collect::<Result<Vec<_>, _>>()?;
                    self.closed = true;
                    Ok(vec![HostEvent::ImportCompleted { layouts }, HostEvent::Closed])
                }
                Err(PluginError::Import(e)) => {
                    error!(frame = %frame_name, error = %e, "import aborted");
                    Ok(vec![HostEvent::ImportFailed {
                        reason: e.to_string(),
                    }])
                }
                Err(e) => Err(e),
            },
        }
    }

    /// Read messages from `input` until the session closes or input ends.
    ///
    /// Lines that are not a valid `PluginMessage` are logged and skipped.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        mode: OutputMode,
    ) -> Result<RunSummary, PluginError> {
        let mut summary = RunSummary::default();

        while !self.closed {
            let Some(line) = read_message(input)? else {
                break;
            };
            summary.messages += 1;

            let msg: PluginMessage = match serde_json::from_slice(&line) {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable message");
                    continue;
                }
            };
            if matches!(msg, PluginMessage::Import { .. }) {
                summary.imports += 1;
            }

            for event in self.handle(msg)? {
                if matches!(event, HostEvent::ImportFailed { .. }) {
                    summary.failures += 1;
                }
                emit(output, &event, mode)?;
            }
        }

        summary.closed = self.closed;
        Ok(summary)
    }
}

fn emit<W: Write>(output: &mut W, event: &HostEvent, mode: OutputMode) -> Result<(), PluginError> {
    let bytes = match (mode, event) {
        (OutputMode::Events, event) => serde_json::to_vec(event)?,
        (OutputMode::Layouts, HostEvent::ImportCompleted { layouts }) => {
            serde_json::to_vec(layouts)?
        }
        (OutputMode::Layouts, _) => return Ok(()),
    };
    write_message(output, &bytes)?;
    Ok(())
}
