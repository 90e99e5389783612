use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::platform::LogDestination;

#[derive(Parser)]
#[command(name = "scriptreel")]
#[command(about = "Turn a script into a rendered video", long_about = None, version)]
pub struct Cli {
    /// RON config file (defaults to ./scriptreel.ron)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL; overrides the config file and SCRIPTREEL_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for synthesized audio
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Where log lines go
    #[arg(long, global = true, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a config file with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the bullet points extracted from a script
    Bullets {
        /// Script file; reads stdin when omitted
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Synthesize narration for a script and print the saved path
    Audio {
        #[arg(short, long)]
        script: PathBuf,
    },

    /// Render a video from a script
    Generate {
        #[arg(short, long)]
        script: PathBuf,

        /// Skip narration and use the quick render path
        #[arg(long, conflicts_with = "audio")]
        quick: bool,

        /// Reuse previously synthesized narration
        #[arg(short, long)]
        audio: Option<PathBuf>,
    },

    /// Fetch the status of a render job once
    Status { job_id: String },

    /// Manage videos on the hosting provider
    Vimeo {
        #[command(subcommand)]
        action: VimeoAction,
    },
}

#[derive(Subcommand)]
pub enum VimeoAction {
    /// Upload a rendered video file
    Upload { file: PathBuf },
    /// Transcoding status of an uploaded video
    Status { id: String },
    /// Video metadata
    Get { id: String },
    /// Patch video metadata with a JSON object
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    /// Delete a video
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn quick_and_audio_conflict() {
        let parsed = Cli::try_parse_from([
            "scriptreel",
            "generate",
            "--script",
            "s.txt",
            "--quick",
            "--audio",
            "a.mp3",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "scriptreel",
            "status",
            "job-1",
            "--api-url",
            "http://render:9000",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://render:9000"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Status { ref job_id } if job_id == "job-1"));
    }
}
