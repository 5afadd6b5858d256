use std::path::Path;

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use pickle_server::config::Config;

use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct ConfigCommand {
    #[clap(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    #[clap(about = "Show current configuration")]
    Show,
}

impl ConfigCommand {
    pub fn execute(
        &self,
        config: &Config,
        config_path: Option<&Path>,
        format: OutputFormat,
    ) -> CliResult<()> {
        match &self.command {
            ConfigSubcommand::Show => Self::show(config, config_path, format),
        }
    }

    fn show(config: &Config, config_path: Option<&Path>, format: OutputFormat) -> CliResult<()> {
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(config)?);
            }
            OutputFormat::Table => {
                match config_path {
                    Some(path) => println!("Configuration from: {}", path.display()),
                    None => println!("Configuration: (default search path)"),
                }
                println!("==============================\n");

                print_section(
                    "Storage",
                    &[("data_dir", config.storage.data_dir.display().to_string())],
                );
                print_section(
                    "Server",
                    &[
                        ("listen_addr", config.server.listen_addr.clone()),
                        ("timeout_secs", config.server.timeout_secs.to_string()),
                    ],
                );
                print_section(
                    "Answer",
                    &[("max_list_items", config.answer.max_list_items.to_string())],
                );
                print_section(
                    "Remote",
                    &[
                        ("enabled", config.remote.enabled.to_string()),
                        ("api_url", config.remote.api_url.clone()),
                        ("api_key_env", config.remote.api_key_env.clone()),
                        ("model", config.remote.model.clone()),
                        ("temperature", config.remote.temperature.to_string()),
                        ("max_tokens", config.remote.max_tokens.to_string()),
                        ("timeout_secs", config.remote.timeout_secs.to_string()),
                    ],
                );
            }
        }

        Ok(())
    }
}

fn print_section(name: &str, rows: &[(&str, String)]) {
    println!("[{name}]");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Setting", "Value"]);

    for (key, value) in rows {
        table.add_row([*key, value.as_str()]);
    }

    println!("{table}\n");
}
