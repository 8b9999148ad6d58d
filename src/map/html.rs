//! Leaflet document rendering

use super::{BattleMap, MarkerKind, POPUP_MAX_WIDTH, TILE_ATTRIBUTION, TILE_URL};
use std::fmt::Write;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const MAP_ID: &str = "battle_map";

/// Encode text as a JavaScript string literal that is safe inside `<script>`.
///
/// Every `<` and `>` is written as a unicode escape, so no data can open a
/// comment or close the script block.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

pub(super) fn render_document(map: &BattleMap) -> String {
    let view = map.view();
    let mut doc = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        doc,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Interactive Battle Map</title>
<link rel="stylesheet" href="{LEAFLET_CSS}">
<script src="{LEAFLET_JS}"></script>
<style>
html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
#{MAP_ID} {{ position: absolute; top: 0; bottom: 0; left: 0; right: 0; }}
.battle-label {{ background: none; border: none; white-space: nowrap; }}
</style>
</head>
<body>
<div id="{MAP_ID}"></div>
<script>
var {MAP_ID} = L.map("{MAP_ID}", {{ center: [{lat}, {lon}], zoom: {zoom} }});
L.tileLayer({tiles}, {{ maxZoom: 19, attribution: {attribution} }}).addTo({MAP_ID});
"#,
        lat = view.center.0,
        lon = view.center.1,
        zoom = view.zoom,
        tiles = js_string(TILE_URL),
        attribution = js_string(TILE_ATTRIBUTION),
    );

    for (index, marker) in map.markers().iter().enumerate() {
        let (lat, lon) = marker.position;
        match &marker.kind {
            MarkerKind::Popup {
                popup_html,
                tooltip,
            } => {
                let _ = writeln!(
                    doc,
                    "var marker_{index} = L.marker([{lat}, {lon}], {{}}).addTo({MAP_ID});"
                );
                let _ = writeln!(
                    doc,
                    "marker_{index}.bindPopup(L.popup({{ maxWidth: {POPUP_MAX_WIDTH} }}).setContent({}));",
                    js_string(popup_html)
                );
                let _ = writeln!(
                    doc,
                    "marker_{index}.bindTooltip({}, {{ sticky: true }});",
                    js_string(tooltip)
                );
            }
            MarkerKind::Label { html } => {
                let _ = writeln!(
                    doc,
                    "var marker_{index} = L.marker([{lat}, {lon}], {{ icon: L.divIcon({{ className: \"battle-label\", html: {} }}) }}).addTo({MAP_ID});",
                    js_string(html)
                );
            }
        }
    }

    doc.push_str("</script>\n</body>\n</html>\n");
    doc
}
