use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reminders", version, about = "Terminal reminders with a silly mode")]
pub struct Cli {
    /// Read settings from this file instead of the platform config dir
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive TUI (default)
    Tui(TuiArgs),
    /// Print the effective settings and where they were read from
    Config,
}

#[derive(Args, Debug, Default)]
pub struct TuiArgs {
    /// Start on the silly-mode screen
    #[arg(long)]
    pub silly: bool,
    /// Start the home screen in night mode
    #[arg(long)]
    pub night: bool,
    /// Never play sounds
    #[arg(long)]
    pub mute: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["reminders"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn tui_flags_parse() {
        let cli = Cli::parse_from(["reminders", "tui", "--silly", "--mute", "--config", "x.yml"]);
        match cli.command {
            Some(Command::Tui(args)) => {
                assert!(args.silly);
                assert!(args.mute);
                assert!(!args.night);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.config, Some(PathBuf::from("x.yml")));
    }
}
