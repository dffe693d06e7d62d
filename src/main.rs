use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use matetree::board::Position;
use matetree::problems;
use matetree::search::{solve_position, SearchParams};
use matetree::tree::{extract_annotated_lines, line_positions, to_display_tree, DisplayNode, RevealState};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algo {
    Minimax,
    AlphaBeta,
    Enhanced,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Find a forced mate in N and print the search tree", long_about = None)]
struct Args {
    /// Problem position as FEN (defaults to the first built-in problem)
    #[arg(long)]
    fen: Option<String>,

    /// Index of a built-in mate-in-2 problem
    #[arg(long, conflicts_with = "fen")]
    problem: Option<usize>,

    /// Mate within this many moves
    #[arg(long, short = 'n')]
    moves: Option<u32>,

    #[arg(long, value_enum, default_value_t = Algo::Enhanced)]
    algo: Algo,

    /// Worker threads for the root split
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Reveal the whole tree instead of the root and its children
    #[arg(long)]
    expand_all: bool,

    /// Print the annotated lines of the solution depth
    #[arg(long)]
    arrows: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

fn print_display(node: &DisplayNode, indent: usize) {
    let next = node.next_move.as_deref().unwrap_or("None");
    println!("{:indent$}{} [{}] score={} next={}", "", node.name, node.id, node.score, next, indent = indent);
    for c in &node.children { print_display(c, indent + 2); }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (fen, default_moves) = match (&args.fen, args.problem) {
        (Some(f), _) => (f.clone(), 2),
        (None, Some(i)) => {
            let p = problems::problem(i).with_context(|| format!("no built-in problem {}", i))?;
            (p.fen.to_string(), p.moves)
        }
        (None, None) => {
            let p = problems::default_problem();
            (p.fen.to_string(), p.moves)
        }
    };
    let moves = args.moves.unwrap_or(default_moves);

    let mut params = match args.algo {
        Algo::Minimax => SearchParams::minimax(moves),
        Algo::AlphaBeta => SearchParams::alpha_beta(moves),
        Algo::Enhanced => SearchParams::enhanced(moves),
    };
    params.threads = args.threads.max(1);

    let pos = Position::from_fen(&fen)?;
    let solution = solve_position(&pos, params)?;
    let line_len = solution.line.as_ref().map_or(0, |l| l.len());

    let mut reveal = RevealState::new(solution.tree.clone());
    if args.expand_all { reveal.expand_all(); }
    let display = to_display_tree(reveal.tree());
    let annotated = if args.arrows && solution.found {
        extract_annotated_lines(reveal.tree(), line_len)?
    } else {
        Vec::new()
    };

    if args.json {
        let out = serde_json::json!({
            "found": solution.found,
            "line": solution.line,
            "score": solution.score,
            "stats": solution.stats,
            "tree": display,
            "lines": annotated,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", fen);
    match &solution.line {
        Some(line) => {
            println!("mate in {} found: {}", moves, line.join(" "));
            for (i, f) in line_positions(&pos, line)?.iter().enumerate().skip(1) {
                println!("  {:>2}. {}", i, f);
            }
        }
        None => println!("no mate in {}", moves),
    }
    println!("score={} nodes={} cache_hits={} tree_nodes={}",
        solution.score, solution.stats.nodes, solution.stats.cache_hits, solution.tree.node_count());
    if let Some(d) = &display { print_display(d, 0); }
    for (i, l) in annotated.iter().enumerate() {
        let arrows: Vec<String> = l.arrows.iter().map(|a| format!("{}{}", a.from, a.to)).collect();
        println!("line {:>3}: {} -> {}", i, arrows.join(" "), l.position);
    }
    Ok(())
}
