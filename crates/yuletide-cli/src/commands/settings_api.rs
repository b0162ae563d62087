use clap::Subcommand;
use yuletide_core::settings_api::UpdateSettingsRequest;
use yuletide_core::{SettingsEndpoint, SystemClock};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsApiAction {
    /// Fetch the server-side defaults
    Get,
    /// Send a settings update (acknowledged, never stored)
    Update {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        snow_intensity: Option<u8>,
        #[arg(long)]
        music_volume: Option<u8>,
    },
}

pub fn run(action: SettingsApiAction) -> CliResult {
    let endpoint = SettingsEndpoint::new(SystemClock);
    match action {
        SettingsApiAction::Get => print_json(&endpoint.get()),
        SettingsApiAction::Update {
            year,
            theme,
            snow_intensity,
            music_volume,
        } => {
            let request = UpdateSettingsRequest {
                year,
                theme,
                snow_intensity,
                music_volume,
            };
            print_json(&endpoint.update(&request))
        }
    }
}
