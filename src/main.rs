use clap::Parser;
use mtags::application::{AnalyzeLogService, AnalyzeOptions};
use mtags::cli::{format_log, Cli, Commands};
use mtags::domain::codec::{self, RawTag};
use mtags::domain::time;
use mtags::error::MtagsError;
use mtags::infrastructure::Profile;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), MtagsError> {
    match cli.command {
        Commands::Analyze {
            input,
            defs,
            profile,
            ticks_per_second,
            unit,
            precision,
            no_color,
        } => {
            // Profile supplies defaults; explicit flags win
            let profile = match &profile {
                Some(path) => Some((Profile::load(path)?, path.clone())),
                None => None,
            };

            let definitions: Option<PathBuf> = defs.or_else(|| {
                profile
                    .as_ref()
                    .and_then(|(p, path)| p.definitions_path(path))
            });

            let to_time = match ticks_per_second {
                Some(rate) => time::from_rate(rate, &unit, precision),
                None => match profile.as_ref().and_then(|(p, _)| p.time.as_ref()) {
                    Some(scale) => scale.converter(),
                    None => time::ticks(),
                },
            };

            let had_definitions = definitions.is_some();
            let report = AnalyzeLogService::execute(AnalyzeOptions {
                input,
                definitions,
                to_time,
            })?;

            if had_definitions {
                println!("Imported {} definition(s).", report.imported_definitions);
            }
            println!("Imported {} microtag(s).", report.imported_tags);
            if !report.log.is_empty() {
                println!("{}", format_log(&report.log, report.max_alias_len, !no_color));
            }
            Ok(())
        }
        Commands::Decode { code } => {
            let tag = codec::decode(&code)?;
            println!("id: 0x{:04X}  data: 0x{:08X} ({})", tag.id, tag.data, tag.data);
            Ok(())
        }
        Commands::Encode { id, data } => {
            println!("{}", codec::encode(RawTag { id, data }));
            Ok(())
        }
    }
}
