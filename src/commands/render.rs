use crate::cli::Cli;
use indicatif::{ProgressBar, ProgressStyle};
use mcrender::{render, CommandSource, Config, Error, RenderJob, Stage, StageObserver, Tools};
use std::error::Error as _;
use std::path::Path;
use std::time::Duration;

/// Tool commands from the arguments, falling back to the config file.
pub fn resolve_tools(cli: &Cli, config_path: Option<&Path>) -> Tools {
    let config = config_path.map(Config::load).unwrap_or_default();
    Tools::new(cli.tool_commands(), config).verbose(cli.is_verbose())
}

pub fn execute_render(cli: &Cli, tools: &Tools) -> Result<(), Error> {
    let region = cli.region()?;

    let job = RenderJob {
        world_path: cli.world_path.clone(),
        output_path: cli.output_path.clone(),
        region,
        options: cli.render_options(),
    };

    let mut progress = StageProgress::new(tools.is_verbose());
    let result = render(&job, tools, &mut progress);
    progress.finish();

    if let Err(err) = &result {
        log::debug!("render failed: {err:?}");
    } else if tools.is_verbose() {
        eprintln!("Created {}", job.output_path.display());
    }
    result
}

/// Prints one line per stage in verbose mode (the tools' own output is interleaved),
/// a spinner otherwise.
struct StageProgress {
    spinner: Option<ProgressBar>,
}

impl StageProgress {
    fn new(verbose: bool) -> Self {
        let spinner = (!verbose).then(|| {
            let style = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            let spinner = ProgressBar::new_spinner().with_style(style);
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        });
        Self { spinner }
    }

    fn finish(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl StageObserver for StageProgress {
    fn on_stage(&mut self, stage: Stage) {
        match (&self.spinner, stage) {
            (_, Stage::Validating | Stage::ConfigResolving | Stage::Done) => {}
            (Some(spinner), _) => spinner.set_message(format!("{stage}...")),
            (None, _) => eprintln!("{stage}..."),
        }
    }
}

/// The message printed for a failed run, with a hint on how to fix it where there is one.
pub fn describe_error(err: &Error, tools: &Tools, config_location: &str) -> String {
    match err {
        Error::CommandNotSet(tool) => format!(
            "You must either set {}, or set {} in\n'{config_location}'.",
            tool.flag(),
            tool.config_key()
        ),
        Error::Launch { tool, source } => {
            let origin = match tools.command_source(*tool) {
                Some((CommandSource::Argument, cmd)) => format!("specified command ({cmd:?})"),
                Some((CommandSource::Config, _)) | None => {
                    format!("configured {} (in '{config_location}')", tool.config_key())
                }
            };
            format!(
                "{tool} could not be launched.\n    {source}\n\n\
                 Make sure that you have downloaded {tool} and that your {origin} runs it."
            )
        }
        Error::BadWorld { world } => format!(
            "Mineways could not load the specified world\n{world:?}.\n\n\
             If Mineways runs through a compatibility layer, a Mineways window may still be \
             open; close it manually."
        ),
        other => with_causes(other),
    }
}

fn with_causes(err: &Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n    {cause}"));
        source = cause.source();
    }
    message
}
