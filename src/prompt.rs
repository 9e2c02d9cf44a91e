use anyhow::{bail, Context, Result};
use configuration::{Config, RunConfig};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const FOLDER_PROMPT: &str = "Enter the file path: ";
const TOP_N_PROMPT: &str = "Enter the no of entries: ";

/// Builds the run configuration, asking the operator for whatever the config
/// file, environment and flags left unset: first the folder, then N.
pub fn resolve_run_config<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<RunConfig> {
    let folder = match &config.input.folder {
        Some(folder) => folder.clone(),
        None => PathBuf::from(ask(input, output, FOLDER_PROMPT)?),
    };

    let top_n = match config.report.top_n {
        Some(n) => n,
        None => {
            let answer = ask(input, output, TOP_N_PROMPT)?;
            answer
                .parse::<i64>()
                .with_context(|| format!("'{answer}' is not a whole number of entries"))?
        }
    };

    Ok(RunConfig::new(config, folder, top_n))
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no answer given to '{}'", question.trim_end_matches([':', ' ']));
    }
    Ok(line.trim().to_string())
}
