// Integration test for a full plugin session.
//
// Loads a scene document from JSON, feeds framed panel messages through
// `PluginSession::run` over in-memory buffers, and checks the emitted JSON
// the way a downstream importer would read it: ids, postfixes, shapes and
// slot coordinates of every variant.
//
// No canvas host involved. The scene is a plain `SceneDocument`.

use std::io::Cursor;

use blockfield_core::{LayoutConfig, SceneDocument};
use blockfield_plugin::{OutputMode, PluginSession};
use blockfield_protocol::{HostEvent, PluginMessage, read_message, write_message};
use serde_json::Value;

/// Block 23 sits at (1400, 950) in the stock field. Its single 2x1 sector is
/// anchored 10 units in from the block's corner.
const SCENE: &str = r#"{
    "name": "Page 1",
    "children": [
        {"name": "Notes"},
        {"name": "Field A", "children": [
            {"name": "Caption"},
            {"name": "S:Res_Low_023", "x": 1400, "y": 950, "children": [
                {"name": "Background", "x": 1400, "y": 950},
                {"name": "Slot 2x1", "x": 1410.3, "y": 959.5, "rotation": 0}
            ]},
            {"name": "T:Par_High_024", "x": 1850, "y": 950, "children": [
                {"name": "Slot 1x1", "x": 2000, "y": 1100, "rotation": 45}
            ]}
        ]},
        {"name": "Field B", "children": [
            {"name": "S:Res_Low_000", "children": [
                {"name": "Slot 1x1", "x": 60, "y": 60, "rotation": 30}
            ]}
        ]}
    ]
}"#;

fn session() -> PluginSession<SceneDocument> {
    let doc = SceneDocument::from_json_str(SCENE).unwrap();
    PluginSession::new(doc, LayoutConfig::default())
}

/// Frame a sequence of messages the way the panel bridge would.
fn wire(messages: &[PluginMessage]) -> Cursor<Vec<u8>> {
    let mut buf = Vec::new();
    for msg in messages {
        write_message(&mut buf, &serde_json::to_vec(msg).unwrap()).unwrap();
    }
    Cursor::new(buf)
}

/// Read every framed JSON value from an output buffer.
fn lines(output: Vec<u8>) -> Vec<Value> {
    let mut cursor = Cursor::new(output);
    let mut values = Vec::new();
    while let Some(line) = read_message(&mut cursor).unwrap() {
        values.push(serde_json::from_slice(&line).unwrap());
    }
    values
}

fn centers(layout: &Value) -> Vec<(i64, i64)> {
    layout["sectors"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|s| s["slots"].as_array().unwrap())
        .map(|slot| {
            let p = &slot["absolutePosition"];
            (p["x"].as_i64().unwrap(), p["y"].as_i64().unwrap())
        })
        .collect()
}

#[test]
fn import_emits_sixteen_layouts_with_seeded_ids() {
    let mut session = session();
    let mut input = wire(&[PluginMessage::Import {
        frame_name: "Field A".into(),
        id_offset: 2,
    }]);
    let mut output = Vec::new();
    let summary = session
        .run(&mut input, &mut output, OutputMode::Layouts)
        .unwrap();
    assert!(summary.closed);
    assert_eq!(summary.failures, 0);

    let values = lines(output);
    assert_eq!(values.len(), 1);
    let layouts = values[0].as_array().unwrap();
    assert_eq!(layouts.len(), 16);

    let ids: Vec<u64> = layouts.iter().map(|l| l["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, (960..976).collect::<Vec<u64>>());

    let postfixes: Vec<&str> = layouts[..8]
        .iter()
        .map(|l| l["block"]["postfix"].as_str().unwrap())
        .collect();
    assert_eq!(
        postfixes,
        ["a", "a_mirror", "b", "b_mirror", "c", "c_mirror", "d", "d_mirror"]
    );

    // Block metadata as integer codes: Residential = 1, Park = 5.
    assert_eq!(layouts[0]["block"]["type"], 1);
    assert_eq!(layouts[0]["block"]["density"], "Low");
    assert_eq!(layouts[0]["block"]["position"], 23);
    assert_eq!(layouts[8]["block"]["type"], 5);

    // Triangle shapes: 5, 5, 4, 4, 2, 2, 3, 3.
    let shapes: Vec<u64> = layouts[8..]
        .iter()
        .map(|l| l["block"]["shape"].as_u64().unwrap())
        .collect();
    assert_eq!(shapes, [5, 5, 4, 4, 2, 2, 3, 3]);
}

#[test]
fn variant_coordinates_follow_block_center_transforms() {
    let mut session = session();
    let mut input = wire(&[PluginMessage::Import {
        frame_name: "Field A".into(),
        id_offset: 0,
    }]);
    let mut output = Vec::new();
    session
        .run(&mut input, &mut output, OutputMode::Layouts)
        .unwrap();
    let values = lines(output);
    let layouts = values[0].as_array().unwrap();

    // Anchor (1410.3, 959.5) - (1400, 950) rounds to (10, 10).
    assert_eq!(centers(&layouts[0]), [(24, 24), (52, 24)]);
    assert_eq!(centers(&layouts[1]), [(24, 24), (24, 52)]);
    assert_eq!(centers(&layouts[2]), [(376, 24), (376, 52)]);
    assert_eq!(centers(&layouts[3]), [(376, 24), (348, 24)]);
    assert_eq!(centers(&layouts[4]), [(376, 376), (348, 376)]);
    assert_eq!(centers(&layouts[5]), [(376, 376), (376, 348)]);
    assert_eq!(centers(&layouts[6]), [(24, 376), (24, 348)]);
    assert_eq!(centers(&layouts[7]), [(24, 376), (52, 376)]);

    let slot = &layouts[0]["sectors"][0]["slots"][1];
    assert_eq!(slot["id"], 1);
    assert_eq!(slot["relativePosition"], serde_json::json!({"x": 1, "y": 0}));
    assert_eq!(slot["topLeftPosition"], serde_json::json!({"x": 38, "y": 10}));
    assert_eq!(slot["rotation"], 0);
    assert_eq!(layouts[0]["sectors"][0]["size"], "2x1");

    // Diagonal slot of the triangle: anchor (150, 150), center x + 20.
    assert_eq!(centers(&layouts[8]), [(170, 150)]);
    assert_eq!(layouts[8]["sectors"][0]["slots"][0]["rotation"], 45);
}

#[test]
fn failed_import_reports_and_allows_retry() {
    let mut session = session();
    let mut input = wire(&[
        PluginMessage::Import {
            frame_name: "Field B".into(),
            id_offset: 0,
        },
        PluginMessage::Import {
            frame_name: "Field A".into(),
            id_offset: 1,
        },
    ]);
    let mut output = Vec::new();
    let summary = session
        .run(&mut input, &mut output, OutputMode::Events)
        .unwrap();
    assert_eq!(summary.imports, 2);
    assert_eq!(summary.failures, 1);
    assert!(summary.closed);

    let events: Vec<HostEvent> = lines(output)
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();
    assert_eq!(events.len(), 3);
    match &events[0] {
        HostEvent::ImportFailed { reason } => assert!(reason.contains("30"), "{reason}"),
        other => panic!("expected ImportFailed, got {other:?}"),
    }
    match &events[1] {
        HostEvent::ImportCompleted { layouts } => {
            assert_eq!(layouts.len(), 16);
            assert_eq!(layouts[0]["id"], 480);
        }
        other => panic!("expected ImportCompleted, got {other:?}"),
    }
    assert_eq!(events[2], HostEvent::Closed);
}

#[test]
fn missing_frame_writes_nothing_in_layout_mode() {
    let mut session = session();
    let mut input = wire(&[PluginMessage::Import {
        frame_name: "Field Z".into(),
        id_offset: 0,
    }]);
    let mut output = Vec::new();
    let summary = session
        .run(&mut input, &mut output, OutputMode::Layouts)
        .unwrap();
    assert!(summary.closed);
    assert!(output.is_empty());
}

#[test]
fn panel_text_field_offset_is_accepted() {
    let mut session = session();
    let mut input =
        Cursor::new(b"{\"type\":\"import\",\"frameName\":\"Field A\",\"idDiff\":\"3\"}\n".to_vec());
    let mut output = Vec::new();
    session
        .run(&mut input, &mut output, OutputMode::Layouts)
        .unwrap();
    let values = lines(output);
    assert_eq!(values[0][0]["id"], 1440);
}

#[test]
fn input_ending_early_leaves_session_open() {
    let mut session = session();
    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();
    let summary = session
        .run(&mut input, &mut output, OutputMode::Events)
        .unwrap();
    assert_eq!(summary.messages, 0);
    assert!(!summary.closed);
    assert!(!session.is_closed());
}
