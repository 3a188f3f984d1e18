//! Config subcommand handlers.

use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Paths {
    config: String,
    store: String,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);

    match args.command {
        ConfigCommand::Init { force } => {
            let color = output::should_color(config::color_mode(global, &Config::default()));
            if path.exists() && !force {
                return Err(CliError::FileExists {
                    path: path.display().to_string(),
                });
            }
            config::save_config_to(&Config::default(), &path)?;
            output::status(
                &format!("Wrote default config to {}", path.display()),
                color,
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            // Parse errors are reported here, not defaulted.
            let cfg = config::load_config_from(&path)?;
            let rendered = toml::to_string_pretty(&cfg)?;
            let out = output::render_single(
                config::output_format(global, &cfg),
                &cfg,
                |_| rendered.trim_end().to_owned(),
                |_| rendered.trim_end().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let cfg = config::load(global);
            let color = output::should_color(config::color_mode(global, &cfg));
            let paths = Paths {
                config: path.display().to_string(),
                store: config::store_path(global, &cfg).display().to_string(),
            };
            let out = output::render_single(
                config::output_format(global, &cfg),
                &paths,
                |p| {
                    [
                        output::detail_line("Config", &p.config, color),
                        output::detail_line("Store", &p.store, color),
                    ]
                    .join("\n")
                },
                |p| format!("{}\n{}", p.config, p.store),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
