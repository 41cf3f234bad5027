// Import orchestrator.
//
// One import run scans a single named container (the artboard holding a
// field), picks the children whose names start with `T:` or `S:`, and for
// each one parses the block, detects its sectors and expands the eight
// variants. Layouts are appended in child order and numbered from a run-scoped
// counter.
//
// ## Layout ids
//
// Ids must not collide between artboards imported separately, so each
// artboard gets its own range: the counter starts at
// `id_offset * artboard_id_count` (480 with the stock config: ten blocks per
// row, six rows, eight variants each). `LayoutIds` is plain state passed in
// and handed back in the `ImportReport`. There is no global counter.
//
// ## Failure policy
//
// - Container not found: not an error. The run returns an empty report with
//   `frame_found = false` and the caller decides what to tell the user.
// - Any `ImportError` from parsing or sector detection aborts the whole run;
//   layouts from blocks already processed are discarded with it.

use crate::config::LayoutConfig;
use crate::error::ImportError;
use crate::parse::{detect_sectors, parse_block_name};
use crate::scene::{SceneHost, SceneNode};
use crate::types::{Layout, LayoutId};
use crate::variants::expand;
use tracing::{debug, info, warn};

/// Name prefixes of block nodes inside a container.
pub const BLOCK_NAME_PREFIXES: [&str; 2] = ["T:", "S:"];

/// Whether a container child is a block the import should register.
pub fn is_block_node(name: &str) -> bool {
    BLOCK_NAME_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Monotonic layout id allocator for one import run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutIds {
    next: u64,
}

impl LayoutIds {
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Counter for the artboard at `id_offset`.
    pub fn for_artboard(id_offset: u32, config: &LayoutConfig) -> Self {
        Self::starting_at(u64::from(id_offset) * config.artboard_id_count())
    }

    /// The id the next allocation will return.
    pub fn peek(&self) -> LayoutId {
        LayoutId(self.next)
    }

    pub fn allocate(&mut self) -> LayoutId {
        let id = LayoutId(self.next);
        self.next += 1;
        id
    }
}

/// Result of one import run.
#[derive(Clone, Debug)]
pub struct ImportReport {
    /// False if no container with the requested name exists.
    pub frame_found: bool,
    pub layouts: Vec<Layout>,
    /// The counter after the run; continue from here to keep ids unique.
    pub ids: LayoutIds,
}

/// Parse one block node and emit its eight layouts with fresh ids.
pub fn register_block<N: SceneNode>(
    node: &N,
    ids: &mut LayoutIds,
    config: &LayoutConfig,
) -> Result<Vec<Layout>, ImportError> {
    let block = parse_block_name(node.name())?;
    let sectors = detect_sectors(&block, node, config)?;
    debug!(
        name = node.name(),
        shape = ?block.shape,
        block_type = block.block_type.abbreviation(),
        density = %block.density,
        position = block.position,
        sectors = sectors.len(),
        "registering block"
    );

    let mut layouts = expand(&block, sectors, config);
    for layout in &mut layouts {
        layout.id = Some(ids.allocate());
    }
    Ok(layouts)
}

/// Import every block of the container named `frame_name`.
pub fn run_import<H: SceneHost>(
    host: &H,
    frame_name: &str,
    mut ids: LayoutIds,
    config: &LayoutConfig,
) -> Result<ImportReport, ImportError> {
    let Some(frame) = host.find_container_by_name(frame_name) else {
        warn!(frame = frame_name, "container not found, nothing imported");
        return Ok(ImportReport {
            frame_found: false,
            layouts: Vec::new(),
            ids,
        });
    };

    let first_id = ids.peek();
    let mut layouts = Vec::new();
    let mut blocks = 0usize;
    for child in frame.children().filter(|c| is_block_node(c.name())) {
        layouts.extend(register_block(child, &mut ids, config)?);
        blocks += 1;
    }

    info!(
        frame = frame_name,
        blocks,
        layouts = layouts.len(),
        first_id = first_id.0,
        "import finished"
    );
    Ok(ImportReport {
        frame_found: true,
        layouts,
        ids,
    })
}
