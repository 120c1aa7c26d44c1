use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use wallfollow::{
    generate_maze, load_maze, render_solution, solve_maze, FrameRecorder, GenerateOptions,
    MazeFormat, Options, SolutionReport, SolveOptions,
};
use wallfollow_core::NoopObserver;

type BoxError = Box<dyn std::error::Error>;

fn main() {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let options = Options::parse_from_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let ok = match options {
        Options::Solve(solve) => solve_command(&solve),
        Options::Generate(generate) => generate_command(&generate),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn solve_command(options: &SolveOptions) -> bool {
    // JSON on stdout must stay parseable.
    let chatty = !options.json || options.output.is_some();

    if chatty {
        println!("🧭 Wall-Following Maze Solver");
        println!("{}", "=".repeat(70));
        println!();
    }

    let mut reports = Vec::with_capacity(options.files.len());

    for path in &options.files {
        let maze = match load_maze(path) {
            Ok(maze) => maze,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                let name = path.display().to_string();
                reports.push(SolutionReport::failed(&name, e.to_string(), 0.0));
                continue;
            }
        };

        if chatty {
            println!("📦 Loaded {} ({}x{} grid)", maze.name, maze.grid.cols(), maze.grid.rows());
        }

        let report = if options.animate {
            let recorder = FrameRecorder::new(io::stdout(), &maze.grid, maze.start, maze.end)
                .with_delay(Duration::from_millis(options.delay_ms));
            animate(&maze, recorder)
        } else {
            solve_maze(&maze, &mut NoopObserver)
        };

        if chatty {
            print_report(&report);
        }

        if options.render && report.solved {
            match render_solution(&maze, &report) {
                Ok(picture) => println!("{}", picture),
                Err(e) => tracing::error!("Solution for {} does not replay: {}", maze.name, e),
            }
        }

        reports.push(report);
    }

    let all_solved = reports.iter().all(|report| report.solved);

    let written = if options.json {
        serde_json::to_string_pretty(&reports)
            .map_err(BoxError::from)
            .and_then(|json| emit(&json, options.output.as_deref()))
    } else if let Some(output) = &options.output {
        emit(&summary_lines(&reports), Some(output.as_path()))
    } else {
        Ok(())
    };

    if let Err(e) = written {
        eprintln!("❌ Error writing results: {}", e);
        return false;
    }

    if chatty {
        if let Some(output) = &options.output {
            println!("💾 Results saved to: {}", output.display());
        }
        let solved = reports.iter().filter(|report| report.solved).count();
        println!("{}", "=".repeat(70));
        println!("{} of {} mazes solved", solved, reports.len());
    }

    all_solved
}

fn animate(
    maze: &wallfollow::Maze,
    mut recorder: FrameRecorder<'_, io::Stdout>,
) -> SolutionReport {
    let report = solve_maze(maze, &mut recorder);
    let frames = recorder.frames();
    match recorder.finish() {
        Ok(_) => tracing::debug!("Drew {} frames for {}", frames, maze.name),
        Err(e) => tracing::warn!("Animation for {} was cut short: {}", maze.name, e),
    }
    report
}

fn print_report(report: &SolutionReport) {
    if report.solved {
        println!("✅ Maze solved in {} steps: {}", report.step_count, report.step_string());
        println!("  Roadblocks: {}", report.roadblocks.len());
        println!("  Moves walked: {}", report.moves_walked);
        println!("  Backtracks: {}", report.backtracks);
        println!("  Time: {:.3}ms", report.elapsed_ms);
    } else {
        let error = report.error.as_deref().unwrap_or("unknown error");
        println!("❌ Could not solve {}: {}", report.name, error);
    }
    println!();
}

fn summary_lines(reports: &[SolutionReport]) -> String {
    reports
        .iter()
        .map(|report| match &report.error {
            None => format!("{}\t{}\n", report.name, report.step_string()),
            Some(error) => format!("{}\terror: {}\n", report.name, error),
        })
        .collect()
}

fn generate_command(options: &GenerateOptions) -> bool {
    let maze = match generate_maze(options) {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("❌ Error generating maze: {}", e);
            return false;
        }
    };

    let contents = match options.format {
        MazeFormat::Text => maze.to_text().map_err(BoxError::from),
        MazeFormat::Json => maze.to_json().map_err(BoxError::from),
    };

    let written = contents.and_then(|contents| emit(&contents, options.output.as_deref()));

    match written {
        Ok(()) => {
            if let Some(output) = &options.output {
                println!("✅ Maze generated successfully!");
                println!("  Seed: {}", options.seed);
                println!("  Grid size: {}x{} cells", maze.grid.cols(), maze.grid.rows());
                println!("💾 Maze saved to: {}", output.display());
            }
            true
        }
        Err(e) => {
            eprintln!("❌ Error saving maze: {}", e);
            false
        }
    }
}

/// Write to `output`, or stdout when none is given.
fn emit(contents: &str, output: Option<&Path>) -> Result<(), BoxError> {
    match output {
        Some(path) => fs::write(path, contents)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            if !contents.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
