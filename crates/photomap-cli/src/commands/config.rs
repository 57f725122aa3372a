//! Config command implementation

use crate::config_loader::{self, config_path};
use crate::output::OutputWriter;
use crate::output_types::{ConfigOutput, ConfigValue};
use anyhow::Result;
use std::path::Path;
use tabled::Tabled;

pub fn execute(explicit: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let layered_config = config_loader::load_config(explicit)?;
    let inspection_map = layered_config.to_inspection_map();

    if output.is_json() {
        let values = inspection_map
            .into_iter()
            .map(|(key, (value, source))| {
                (
                    key,
                    ConfigValue {
                        value,
                        source: format!("{:?}", source),
                    },
                )
            })
            .collect();

        output.result(ConfigOutput { values })?;
    } else {
        output.section("Configuration Values");

        #[derive(Tabled)]
        struct ConfigRow {
            #[tabled(rename = "Key")]
            key: String,
            #[tabled(rename = "Value")]
            value: String,
            #[tabled(rename = "Source")]
            source: String,
        }

        let mut rows: Vec<ConfigRow> = inspection_map
            .into_iter()
            .map(|(key, (value, source))| ConfigRow {
                key,
                value,
                source: format!("{:?}", source),
            })
            .collect();

        // Sort by key for consistent output
        rows.sort_by(|a, b| a.key.cmp(&b.key));

        output.table(rows);

        if let Some(path) = config_path(explicit) {
            output.kv("Config file", path.display());
        }

        output.section("Configuration Precedence");
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}
