// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This example shows how to use the dominating set solver from the command
//! line. It either solves the queen graph of an `n x n` board or a graph read
//! from a DIMACS-like file (`p edge <n> <m>` followed by `e <u> <v>` lines,
//! vertices numbered from 1).

use std::{fs::File, io::{BufRead, BufReader}, num::ParseIntError, path::Path, time::{Duration, Instant}};

use clap::{Parser, ValueEnum};
use regex::Regex;
use tracing_subscriber::EnvFilter;

use domset::*;


// #### ONLY USEFUL FOR THE EXAMPLE #######################################################
#[derive(Debug, thiserror::Error)]
enum Errors {
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    #[error("parse int {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("invalid graph {0}")]
    Graph(#[from] domset::Error),
    #[error("ill formed instance")]
    Format,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Bound {
    Incremental,
    Recompute,
}
impl From<Bound> for BoundKind {
    fn from(b: Bound) -> Self {
        match b {
            Bound::Incremental => BoundKind::Incremental,
            Bound::Recompute => BoundKind::Recompute,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Finds a minimum dominating set of a queen graph (or of any graph read
/// from a file) with branch and bound
struct Args {
    /// The size of the board whose queen graph must be dominated
    #[clap(short, long, conflicts_with = "fname", required_unless_present = "fname")]
    board: Option<usize>,
    /// The path to an instance file
    #[clap(short, long)]
    fname: Option<String>,
    /// Stop at the first dominating set of at most that many vertices
    #[clap(short, long)]
    gamma: Option<usize>,
    /// The lower bound used to prune the search
    #[clap(long, value_enum, default_value = "incremental")]
    bound: Bound,
    /// Branch on the undominated vertex with the fewest candidates around it
    #[clap(long)]
    fewest: bool,
    /// Enables the row/column refinement (queen boards only, recompute bound)
    #[clap(long)]
    lines: bool,
    /// Compares the accountants with a full recomputation after each change
    #[clap(long)]
    check: bool,
    /// The maximum amount of time (in seconds) you would like this solver to run
    #[clap(short, long, default_value = "30")]
    duration: u64,
    /// Increases the verbosity (repeat for more)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_instance<P: AsRef<Path>>(fname: P) -> Result<Graph, Errors> {
    let f = File::open(fname)?;
    let f = BufReader::new(f);

    let comment   = Regex::new(r"^c(\s.*)?$").unwrap();
    let pb_decl   = Regex::new(r"^p\s+(edge|col)\s+(?P<vars>\d+)\s+(?P<edges>\d+)$").unwrap();
    let edge_decl = Regex::new(r"^e\s+(?P<src>\d+)\s+(?P<dst>\d+)").unwrap();

    let mut nb_vertices = None;
    let mut edges = vec![];
    for line in f.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || comment.is_match(line) {
            continue;
        }
        if let Some(caps) = pb_decl.captures(line) {
            nb_vertices = Some(caps["vars"].parse::<usize>()?);
            continue;
        }
        if let Some(caps) = edge_decl.captures(line) {
            let src = caps["src"].parse::<usize>()?;
            let dst = caps["dst"].parse::<usize>()?;
            if src == 0 || dst == 0 {
                return Err(Errors::Format);
            }
            edges.push((src - 1, dst - 1));
            continue;
        }
        return Err(Errors::Format);
    }

    let n = nb_vertices.ok_or(Errors::Format)?;
    Ok(Graph::from_edges(n, &edges)?)
}

fn config(args: &Args) -> Result<SearchConfig, domset::Error> {
    let mut builder = SearchConfigBuilder::default();
    builder
        .bound(args.bound.into())
        .check_invariants(args.check);
    if args.fewest {
        builder.branching(Branching::FewestCandidates);
    }
    if let Some(gamma) = args.gamma {
        builder.gamma(gamma);
    }
    if let (true, Some(board)) = (args.lines, args.board) {
        builder.queen_board(board);
    }
    Ok(builder.build()?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let graph = match (&args.fname, args.board) {
        (Some(fname), _) => read_instance(fname)?,
        (None, Some(board)) => Graph::queens(board),
        (None, None) => anyhow::bail!("either a board size or an instance file is needed"),
    };
    let cutoff = TimeBudget::new(Duration::from_secs(args.duration));
    let mut solver = BranchAndBound::new(&graph, config(&args)?).with_cutoff(&cutoff);

    let start = Instant::now();
    let Completion { is_exact, best_value } = solver.minimize()?;
    let duration = start.elapsed();
    let stats = solver.statistics();
    let best_solution = solver.best_solution().unwrap_or_default();

    println!("Duration:   {:.3} seconds \nFound:      {}\nObjective:  {}\nCalls:      {}\nPrunes:     {} ({:.3})\nAborted:    {}\nSolution:   {:?}",
            duration.as_secs_f32(),
            best_value.is_some(),
            best_value.map_or(-1, |v| v as isize),
            stats.calls,
            stats.prunes,
            stats.prune_ratio(),
            !is_exact,
            best_solution);
    if let (Some(board), Some(_)) = (args.board, best_value) {
        print!("{}", render_board(board, &best_solution));
    }
    Ok(())
}
