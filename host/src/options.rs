//! Command-line options.
//! `solve <FILES>...` or `generate --rows N --cols N --seed S`

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use wallfollow_core::{DEFAULT_MAZE_COLS, DEFAULT_MAZE_ROWS, DEFAULT_SEED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    pub files: Vec<PathBuf>,
    pub json: bool,
    pub animate: bool,
    pub delay_ms: u64,
    pub render: bool,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub rows: usize,
    pub cols: usize,
    pub seed: u32,
    pub loops: usize,
    pub format: MazeFormat,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Options {
    Solve(SolveOptions),
    Generate(GenerateOptions),
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write the result to FILE instead of stdout")
}

fn make_options_parser() -> Command {
    let solve = Command::new("solve")
        .about("Solve one or more maze files (.json or text)")
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit solution reports as JSON"),
        )
        .arg(
            Arg::new("animate")
                .short('a')
                .long("animate")
                .action(ArgAction::SetTrue)
                .help("Draw the maze after every step of the walker"),
        )
        .arg(
            Arg::new("delay")
                .long("delay")
                .value_name("MS")
                .default_value("0")
                .value_parser(value_parser!(u64))
                .help("Pause between animation frames"),
        )
        .arg(
            Arg::new("render")
                .short('r')
                .long("render")
                .action(ArgAction::SetTrue)
                .help("Draw each solved maze with its path"),
        )
        .arg(output_arg());

    let generate = Command::new("generate")
        .about("Generate a maze with a seeded recursive backtracker")
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_parser(value_parser!(usize))
                .help("Maze rows, in cells [default: 20]"),
        )
        .arg(
            Arg::new("cols")
                .long("cols")
                .value_parser(value_parser!(usize))
                .help("Maze columns, in cells [default: 20]"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_parser(value_parser!(u32))
                .help("Generator seed [default: 2918957128]"),
        )
        .arg(
            Arg::new("loops")
                .long("loops")
                .default_value("0")
                .value_parser(value_parser!(usize))
                .help("Extra walls to knock out after carving"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Output format"),
        )
        .arg(output_arg());

    Command::new("wallfollow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Wall-following maze solver")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(solve)
        .subcommand(generate)
}

impl Options {
    /// Parse a full argument list, program name first.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = make_options_parser().try_get_matches_from(args)?;
        match matches.subcommand() {
            Some(("solve", sub)) => Ok(Options::Solve(Self::solve_options(sub))),
            Some(("generate", sub)) => Ok(Options::Generate(Self::generate_options(sub))),
            _ => Err(make_options_parser().error(
                clap::error::ErrorKind::MissingSubcommand,
                "expected `solve` or `generate`",
            )),
        }
    }

    fn solve_options(matches: &ArgMatches) -> SolveOptions {
        SolveOptions {
            files: matches
                .get_many::<PathBuf>("files")
                .map(|files| files.cloned().collect())
                .unwrap_or_default(),
            json: matches.get_flag("json"),
            animate: matches.get_flag("animate"),
            delay_ms: matches.get_one::<u64>("delay").copied().unwrap_or(0),
            render: matches.get_flag("render"),
            output: matches.get_one::<PathBuf>("output").cloned(),
        }
    }

    fn generate_options(matches: &ArgMatches) -> GenerateOptions {
        // clap only lets `text` and `json` through.
        let format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => MazeFormat::Json,
            _ => MazeFormat::Text,
        };

        GenerateOptions {
            rows: matches.get_one::<usize>("rows").copied().unwrap_or(DEFAULT_MAZE_ROWS),
            cols: matches.get_one::<usize>("cols").copied().unwrap_or(DEFAULT_MAZE_COLS),
            seed: matches.get_one::<u32>("seed").copied().unwrap_or(DEFAULT_SEED),
            loops: matches.get_one::<usize>("loops").copied().unwrap_or(0),
            format,
            output: matches.get_one::<PathBuf>("output").cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve() {
        let options =
            Options::parse_from_args(["wallfollow", "solve", "a.txt", "b.json", "--json", "-r"])
                .unwrap();
        assert_eq!(
            options,
            Options::Solve(SolveOptions {
                files: vec![PathBuf::from("a.txt"), PathBuf::from("b.json")],
                json: true,
                animate: false,
                delay_ms: 0,
                render: true,
                output: None,
            })
        );
    }

    #[test]
    fn test_parse_generate_defaults() {
        let options = Options::parse_from_args(["wallfollow", "generate"]).unwrap();
        let Options::Generate(generate) = options else {
            panic!("expected generate options");
        };
        assert_eq!(generate.rows, DEFAULT_MAZE_ROWS);
        assert_eq!(generate.cols, DEFAULT_MAZE_COLS);
        assert_eq!(generate.seed, DEFAULT_SEED);
        assert_eq!(generate.format, MazeFormat::Text);
    }

    #[test]
    fn test_parse_generate() {
        let options = Options::parse_from_args([
            "wallfollow", "generate", "--rows", "5", "--cols", "8", "--seed", "7", "--loops", "3",
            "-f", "json", "-o", "maze.json",
        ])
        .unwrap();
        assert_eq!(
            options,
            Options::Generate(GenerateOptions {
                rows: 5,
                cols: 8,
                seed: 7,
                loops: 3,
                format: MazeFormat::Json,
                output: Some(PathBuf::from("maze.json")),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Options::parse_from_args(["wallfollow", "solve"]).is_err());
        assert!(Options::parse_from_args(["wallfollow", "generate", "--format", "png"]).is_err());
        assert!(Options::parse_from_args(["wallfollow", "generate", "--format", "txt"]).is_err());
        assert!(Options::parse_from_args(["wallfollow", "generate", "--seed", "-1"]).is_err());
        assert!(Options::parse_from_args(["wallfollow", "explore"]).is_err());
    }
}
