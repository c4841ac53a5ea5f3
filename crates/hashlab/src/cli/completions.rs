use std::io::Write;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use crate::cli::Status;
use crate::cli::app::App;

#[derive(Args, Clone, Debug)]
pub struct CompletionsArg {
    #[arg(value_enum, help = "Shell to generate completions for")]
    shell: Shell,
}

pub fn run(arg: &CompletionsArg, out: &mut dyn Write) -> Result<Status> {
    let mut cmd = App::command();
    generate(arg.shell, &mut cmd, "hashlab", out);
    Ok(Status::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut out = Vec::new();
        run(&CompletionsArg { shell: Shell::Bash }, &mut out).unwrap();
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("hashlab"));
        assert!(script.contains("hmac"));
    }
}
