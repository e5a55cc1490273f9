// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use clap::Args;
use trisweep_sdk::{BenchmarkConfig, SweepPreset};

#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Only print this preset (baseline, advanced, extreme)
    pub name: Option<SweepPreset>,
}

pub fn execute(args: PresetsArgs) -> Result<()> {
    let presets: Vec<SweepPreset> = match args.name {
        Some(preset) => vec![preset],
        None => SweepPreset::ALL.to_vec(),
    };
    print!("{}", render(&presets)?);
    Ok(())
}

/// Renders each preset as a commented TOML document.
fn render(presets: &[SweepPreset]) -> Result<String> {
    let mut out = String::new();
    for (i, preset) in presets.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("# preset: {preset}\n"));
        out.push_str(&BenchmarkConfig::preset(*preset).to_toml_string()?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_presets_load_back() {
        let text = render(&[SweepPreset::Extreme]).expect("render");
        assert!(text.starts_with("# preset: extreme"));
        let config = BenchmarkConfig::from_toml_str(&text).expect("reload");
        assert_eq!(config, BenchmarkConfig::preset(SweepPreset::Extreme));
    }
}
