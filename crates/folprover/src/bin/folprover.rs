//! Interactive front end: read axioms and a hypothesis, search for a proof

use clap::Parser;
use folprover::json::ProofResultJson;
use folprover::{
    parse_formula, FolError, Formula, Problem, Proof, ProofResult, ProverConfig, StoragePolicy,
    UnifierKind,
};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Resolution refutation prover for first-order logic
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Unification algorithm (asked interactively when missing)
    #[arg(short, long, value_enum)]
    unifier: Option<UnifierKind>,

    /// Clause storage policy (asked interactively when missing)
    #[arg(short, long, value_enum)]
    storage: Option<StoragePolicy>,

    /// Stop after this many given clauses, 0 for no limit
    #[arg(long, default_value_t = 10_000)]
    max_iterations: usize,

    /// Give up when the passive store grows beyond this, 0 for no limit
    #[arg(long, default_value_t = 0)]
    max_passive: usize,

    /// Wall-clock limit in seconds, 0 for no limit
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// No prompts or menus, and only warnings in the log
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> ProverConfig {
        ProverConfig {
            max_iterations: self.max_iterations,
            max_passive: self.max_passive,
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

/// Line-based questions on a reader, prompts on a writer
struct Prompter<R, W> {
    input: R,
    output: W,
    quiet: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn say(&mut self, text: &str) -> io::Result<()> {
        if !self.quiet {
            write!(self.output, "{}", text)?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Next non-blank line; end of input is an error
    fn line(&mut self) -> io::Result<String> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input ended"));
            }
            let line = line.trim();
            if !line.is_empty() {
                return Ok(line.to_string());
            }
        }
    }

    fn number(&mut self, prompt: &str) -> io::Result<usize> {
        loop {
            self.say(prompt)?;
            let line = self.line()?;
            match line.parse() {
                Ok(n) => return Ok(n),
                Err(_) => eprintln!("Error: '{}' is not a number", line),
            }
        }
    }

    fn menu<T: Copy>(&mut self, title: &str, entries: &[T], label: impl Fn(T) -> String) -> io::Result<T> {
        let mut text = format!("{}\n", title);
        for (i, entry) in entries.iter().enumerate() {
            text.push_str(&format!("[{}] {}\n", i + 1, label(*entry)));
        }
        self.say(&text)?;

        loop {
            let choice = self.number("")?;
            match choice.checked_sub(1).and_then(|i| entries.get(i)) {
                Some(entry) => return Ok(*entry),
                None => eprintln!("Error: choose a number from 1 to {}", entries.len()),
            }
        }
    }

    /// Read formulas until one parses
    fn formula(&mut self, prompt: &str) -> io::Result<Formula> {
        loop {
            self.say(prompt)?;
            let line = self.line()?;
            match parse_formula(&line) {
                Ok(formula) => return Ok(formula),
                Err(e) => eprintln!("Error in '{}': {}", line, e),
            }
        }
    }
}

fn run(args: Args) -> Result<(), FolError> {
    let stdin = io::stdin();
    let mut prompter = Prompter {
        input: stdin.lock(),
        output: io::stdout(),
        quiet: args.quiet,
    };

    let unifier = match args.unifier {
        Some(kind) => kind,
        None => prompter.menu("Choose unification algorithm:", &UnifierKind::ALL, |kind| {
            format!("{} unification", kind)
        })?,
    };
    let storage = match args.storage {
        Some(policy) => policy,
        None => prompter.menu("Choose clause choosing policy:", &StoragePolicy::ALL, |policy| {
            format!("{} policy", policy)
        })?,
    };

    let simplifier = unifier.build();
    let mut problem = Problem::new();

    let count = prompter.number("Enter axioms' number: ")?;
    let mut axioms = Vec::with_capacity(count);
    for i in 0..count {
        axioms.push(prompter.formula(&format!("Axiom {}: ", i + 1))?);
    }
    let hypothesis = prompter.formula("Enter hypothesis: ")?;

    for formula in axioms.iter().chain(Some(&hypothesis)) {
        problem.reserve(formula);
    }

    for axiom in axioms {
        println!("Axiom: {}", axiom);
        let normalized = problem.add_axiom(axiom, simplifier.as_ref())?;
        println!("Normalized and skolemized formula: {}", normalized);
    }

    println!("Hypothesis: {}", hypothesis);
    let normalized = problem.add_hypothesis(hypothesis, simplifier.as_ref())?;
    println!("Normalized and skolemized formula: {}", normalized);

    for clause in problem.clauses() {
        println!("[{}] {}", clause.id, clause);
    }

    let mut prover = problem.into_prover(storage, unifier, args.config());
    let start = Instant::now();
    let result = prover.run();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if args.json {
        let json = ProofResultJson::from_result(&result, &prover.stats(), elapsed_ms);
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    match result {
        ProofResult::Proof(empty) => println!("{}", Proof::from_refutation(&empty)),
        ProofResult::Saturated => println!("No proof"),
        ProofResult::ResourceLimit(limit) => println!("No proof ({} reached)", limit),
    }
    println!("Elapsed time: {:.3}ms", elapsed_ms);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter {
            input: Cursor::new(input.as_bytes().to_vec()),
            output: Vec::new(),
            quiet: false,
        }
    }

    #[test]
    fn test_menu_reprompts_until_valid() {
        let mut p = prompter("7\nx\n\n2\n");
        let choice = p.menu("Pick:", &UnifierKind::ALL, |k| k.to_string()).unwrap();
        assert_eq!(choice, UnifierKind::Here);

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.starts_with("Pick:\n[1] Robinson\n[2] Here\n[3] Martelli-Montanari\n"));
    }

    #[test]
    fn test_formula_reprompts_on_parse_error() {
        let mut p = prompter("pA and\n@ vx pP(vx)\npHuman(cSocrates)\n");
        let formula = p.formula("> ").unwrap();
        assert_eq!(formula.to_string(), "pHuman(cSocrates)");
        assert_eq!(String::from_utf8(p.output).unwrap(), "> > > ");
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut p = prompter("\n");
        let err = p.number("n: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let mut p = prompter("3\n");
        p.quiet = true;
        assert_eq!(p.number("n: ").unwrap(), 3);
        assert!(p.output.is_empty());
    }

    #[test]
    fn test_config_from_flags() {
        let args = Args::parse_from([
            "folprover",
            "--timeout-secs",
            "0",
            "--max-iterations",
            "5",
            "--max-passive",
            "100",
        ]);
        let config = args.config();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.max_passive, 100);
        assert_eq!(config.timeout, None);

        let defaults = Args::parse_from(["folprover"]).config();
        assert_eq!(defaults, ProverConfig::default());
    }
}
