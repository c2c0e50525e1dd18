//! The built-in documentation tree.
//!
//! A fixed data source: folder and file names mapping to their served
//! paths. It goes through the same classification and outline rendering
//! as the live status document.

use jet_tree::TreeModel;
use serde_json::json;

/// The static documentation catalog shown on the Documentation panel.
pub fn documentation_tree() -> TreeModel {
    TreeModel::classify(json!({
        "Appjet Documentation": {
            "Subfolder 1": {
                "File 1.a": "/file1.a",
                "File 1.b": "/file1.b",
            },
            "Subfolder 2": {
                "File 2.a": "/file2.a",
                "File 2.b": "/file2.b",
            },
            "Subfolder 3": {
                "File 3.a": "/file3.a",
                "File 3.b": "/file3.b",
            },
        }
    }))
}
