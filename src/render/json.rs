//! JSON renderer — structured dump for tooling integration.
//!
//! Writes the key-ordered mapping of every module as one JSON array.

use crate::model::{MapOptions, ModuleDoc};
use crate::render::{Layout, RenderOptions, Renderer};
use serde_json::Value;

pub struct JsonRenderer {
    map_opts: MapOptions,
}

impl JsonRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            map_opts: MapOptions {
                include_empty: opts.include_empty,
            },
        }
    }

    fn to_value(&self, module: &ModuleDoc) -> Value {
        Value::Object(module.to_map(&self.map_opts))
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, module: &ModuleDoc) -> String {
        pretty(&self.to_value(module))
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn layout(&self) -> Layout {
        Layout::Combined
    }

    fn render_all(&self, modules: &[ModuleDoc]) -> String {
        let all = modules.iter().map(|m| self.to_value(m)).collect();
        pretty(&Value::Array(all))
    }
}

fn pretty(value: &Value) -> String {
    // Serializing a `Value` cannot fail: its map keys are always strings.
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}
