use std::fs;
use std::path::PathBuf;

use wallfollow::{
    generate_maze, load_maze, render_solution, solve_maze, GenerateOptions, LoadError, MazeFormat,
    SolutionReport,
};
use wallfollow_core::{
    seal_dead_ends, verify_solution, walk, Coord, NoopObserver, Solver, Terrain,
};

/// 3x3 cells with two routes to the end and a dead-end spur along the bottom
const TEXT_MAZE: &str = "\
3 3
#*#####
# #   #
# # # #
#   # #
### # #
#    O#
#######
";

/// Same layout with the end walled off
const SEALED_END: &str = "\
3 3
#*#####
# #   #
# # # #
#   # #
### ###
#   #O#
#######
";

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("wallfollow-{}-{}", std::process::id(), name));
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn generate(rows: usize, cols: usize, seed: u32, loops: usize) -> wallfollow::Maze {
    generate_maze(&GenerateOptions {
        rows,
        cols,
        seed,
        loops,
        format: MazeFormat::Text,
        output: None,
    })
    .expect("Maze generation failed")
}

#[test]
fn test_text_maze_file() {
    println!("🧪 Testing text maze file...");

    let path = write_fixture("text-maze.txt", TEXT_MAZE);
    let maze = load_maze(&path).expect("Failed to load maze");
    fs::remove_file(&path).ok();

    assert_eq!(maze.start, Coord::new(1, 0));
    assert_eq!(maze.end, Coord::new(5, 5));

    let report = solve_maze(&maze, &mut NoopObserver);
    assert!(report.solved, "Maze should be solvable: {:?}", report.error);
    assert!(
        report.roadblocks.contains(&Coord::new(2, 5)),
        "Bottom spur should be sealed, got {:?}",
        report.roadblocks
    );

    let waypoints = verify_solution(&maze.grid, maze.start, maze.end, &report.steps)
        .expect("Solution should replay");
    for roadblock in &report.roadblocks {
        assert!(!waypoints.contains(roadblock), "Path crosses roadblock {}", roadblock);
    }

    println!("✅ Text maze file test passed!");
}

#[test]
fn test_json_maze_file() {
    println!("🧪 Testing JSON maze file...");

    let maze = generate(6, 6, 2918957128, 2);
    let path = write_fixture("generated.json", &maze.to_json().expect("Failed to encode maze"));
    let loaded = load_maze(&path).expect("Failed to load maze");
    fs::remove_file(&path).ok();

    assert_eq!(loaded.name, "seed-2918957128");
    assert_eq!(loaded.grid, maze.grid);

    let report = solve_maze(&loaded, &mut NoopObserver);
    assert!(report.solved);

    println!("✅ JSON maze file test passed!");
}

#[test]
fn test_missing_file() {
    println!("🧪 Testing missing maze file (should fail to load)...");

    let result = load_maze("/nonexistent/wallfollow/maze.txt");
    assert!(matches!(result, Err(LoadError::Io(_))));

    println!("✅ Missing file test passed!");
}

#[test]
fn test_generated_mazes_are_solved() {
    println!("🧪 Testing generated mazes over many seeds...");

    for seed in 1..=60u32 {
        for loops in [0, 6] {
            let maze = generate(7, 9, seed * 7919, loops);
            let solution = Solver::new(&maze.grid, maze.start, maze.end)
                .and_then(|solver| solver.run())
                .unwrap_or_else(|e| panic!("Seed {} with {} loops: {}", seed, loops, e));

            // Replay with the roadblocks in place: the path must avoid them.
            let mut terrain = Terrain::new(&maze.grid);
            for &roadblock in &solution.roadblocks {
                terrain.add_roadblock(roadblock);
            }
            walk(&terrain, maze.start, maze.end, &solution.steps)
                .unwrap_or_else(|e| panic!("Seed {} with {} loops: {}", seed, loops, e));
        }
    }

    println!("✅ Generated mazes test passed!");
}

#[test]
fn test_sealing_is_idempotent() {
    println!("🧪 Testing repeated sealing on generated mazes...");

    for seed in [3u32, 1234, 99999, 2918957128] {
        let maze = generate(10, 10, seed, 4);
        let mut terrain = Terrain::new(&maze.grid);

        let first = seal_dead_ends(&mut terrain, maze.start, maze.end, &mut NoopObserver);
        let second = seal_dead_ends(&mut terrain, maze.start, maze.end, &mut NoopObserver);

        assert!(!first.is_empty(), "Seed {} should have dead ends", seed);
        assert!(second.is_empty(), "Seed {} sealed again: {:?}", seed, second);
    }

    println!("✅ Sealing idempotence test passed!");
}

#[test]
fn test_unsolvable_maze() {
    println!("🧪 Testing walled-off end (should be unsolvable)...");

    let path = write_fixture("sealed-end.txt", SEALED_END);
    let maze = load_maze(&path).expect("Failed to load maze");
    fs::remove_file(&path).ok();

    let report = solve_maze(&maze, &mut NoopObserver);
    assert!(!report.solved);
    assert!(report.steps.is_empty());
    assert!(report.error.is_some());

    println!("✅ Unsolvable maze test passed!");
}

#[test]
fn test_report_json_round_trip() {
    println!("🧪 Testing solution report JSON...");

    let maze = generate(5, 5, 42, 0);
    let report = solve_maze(&maze, &mut NoopObserver);
    let json = serde_json::to_string(&report).expect("Failed to encode report");
    let decoded: SolutionReport = serde_json::from_str(&json).expect("Failed to decode report");

    assert_eq!(decoded.steps, report.steps);
    assert_eq!(decoded.roadblocks, report.roadblocks);
    assert_eq!(decoded.step_count, report.steps.len());

    println!("✅ Report JSON test passed!");
}

#[test]
fn test_render_solution() {
    println!("🧪 Testing solution rendering...");

    let maze = wallfollow::Maze::parse_text("render", TEXT_MAZE).expect("Failed to parse maze");
    let report = solve_maze(&maze, &mut NoopObserver);
    let picture = render_solution(&maze, &report).expect("Solution should replay");

    let lines: Vec<&str> = picture.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "XSXXXXX");
    assert!(lines[5].contains('E'));
    assert!(lines[5].contains('R'));
    assert!(picture.contains('.'));

    println!("✅ Render test passed!");
}
