use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colony::{
    find_coin_change, find_mst, find_stable_matching, Category, CoinChange, Endpoint, Located,
    Population, SolverConfig, Supply,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SupplyArg {
    Unbounded,
    Bounded,
}

impl From<SupplyArg> for Supply {
    fn from(arg: SupplyArg) -> Supply {
        match arg {
            SupplyArg::Unbounded => Supply::Unbounded,
            SupplyArg::Bounded => Supply::Bounded,
        }
    }
}

/// Spanning tree, stable matching and coin change for a population of
/// proposers and receivers.
#[derive(Debug, Parser)]
#[clap(name = "ant-colony")]
struct Args {
    /// Population file, one `0 x y capacity` or `1 x y w1 .. wk` record per line
    #[clap(long, short)]
    input: PathBuf,

    /// Write a random population of this many entities per category to the input path first
    #[clap(long)]
    generate: Option<usize>,

    /// Seed for --generate
    #[clap(long)]
    seed: Option<u64>,

    #[clap(long, value_enum, default_value_t = SupplyArg::Unbounded)]
    supply: SupplyArg,

    /// Proposer whose capacity is decomposed
    #[clap(long, default_value_t = 0)]
    proposer: u32,

    /// Receiver whose weights are used
    #[clap(long, default_value_t = 0)]
    receiver: u32,

    #[clap(long)]
    skip_mst: bool,

    #[clap(long)]
    skip_matching: bool,

    #[clap(long)]
    skip_coin_change: bool,
}

fn label(e: Endpoint) -> String {
    match e.category {
        Category::Proposer => format!("P{}", e.id),
        Category::Receiver => format!("R{}", e.id),
    }
}

fn generate(args: &Args, n: usize) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let population = Population::random(&mut rng, n);
    let file = File::create(&args.input)
        .with_context(|| format!("cannot create {}", args.input.display()))?;
    population.write_to(BufWriter::new(file))?;
    info!(n, path = %args.input.display(), "random population written");
    Ok(())
}

fn run(args: &Args, population: &Population, out: &mut impl Write) -> Result<()> {
    if !args.skip_mst {
        let tree = find_mst(population)?;
        writeln!(
            out,
            "Minimum spanning tree ({} edges, total weight {:.6}):",
            tree.len(),
            tree.total_weight()
        )?;
        for (a, b, weight) in tree.links() {
            writeln!(out, "{} - {} {:.6}", label(a), label(b), weight)?;
        }
    }

    if !args.skip_matching {
        let matching = find_stable_matching(population)?;
        writeln!(out, "Stable matching:")?;
        for (p, r) in matching.pairs() {
            let d = population.proposers()[p as usize]
                .distance_to(&population.receivers()[r as usize]);
            writeln!(out, "P{p} - R{r} {d:.6}")?;
        }
    }

    if !args.skip_coin_change {
        let config = SolverConfig {
            supply: args.supply.into(),
            pair: (args.proposer, args.receiver),
        };
        let result = find_coin_change(population, &config)?;
        let capacity = population.proposer(args.proposer)?.capacity;
        writeln!(
            out,
            "Coin change (P{} capacity {}, R{} weights, {}):",
            args.proposer, capacity, args.receiver, config.supply
        )?;
        let change = result.change();
        for (w, c) in change.weights().iter().zip(change.counts()) {
            writeln!(out, "{w}: {c}")?;
        }
        if let CoinChange::Unreachable { remainder, .. } = result {
            warn!(capacity, remainder, "capacity has no exact decomposition");
            writeln!(out, "unreachable: {remainder} left uncovered")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Some(n) = args.generate {
        generate(&args, n)?;
    }

    let file = File::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;
    let parsed = Population::read(BufReader::new(file))
        .with_context(|| format!("cannot read population from {}", args.input.display()))?;
    if !parsed.skipped_lines.is_empty() {
        warn!(lines = ?parsed.skipped_lines, "records with unknown tags were skipped");
    }
    info!(
        proposers = parsed.population.proposers().len(),
        receivers = parsed.population.receivers().len(),
        "population loaded"
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&args, &parsed.population, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Population {
        Population::parse("0 0 0 16\n1 0 1 10 1 5\n0 1 1 3\n1 1 0 5 10\n")
            .unwrap()
            .population
    }

    fn render(argv: &[&str]) -> String {
        let args = Args::parse_from(argv.iter().copied());
        let mut out = vec![];
        run(&args, &square(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_all_three_results() {
        let text = render(&["main", "-i", "unused"]);
        assert!(text.starts_with("Minimum spanning tree (3 edges, total weight 3.000000):\n"));
        assert!(text.contains("P0 - R0 1.000000\nP0 - R1 1.000000\nP1 - R0 1.000000\n"));
        assert!(text.contains("Stable matching:\nP0 - R0 1.000000\nP1 - R1 1.000000\n"));
        assert!(text.contains("Coin change (P0 capacity 16, R0 weights, unbounded):\n1: 1\n5: 1\n10: 1\n"));
        assert!(!text.contains("unreachable"));
    }

    #[test]
    fn reports_unreachable_pair() {
        let text = render(&[
            "main",
            "--input",
            "unused",
            "--proposer",
            "1",
            "--receiver",
            "1",
            "--supply",
            "bounded",
            "--skip-mst",
            "--skip-matching",
        ]);
        assert_eq!(
            text,
            "Coin change (P1 capacity 3, R1 weights, bounded):\n5: 0\n10: 0\nunreachable: 3 left uncovered\n"
        );
    }
}
