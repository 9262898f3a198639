// vim: set ai et ts=4 sts=4 sw=4:
use std::io;
use std::process;
use std::time::Duration;
use std::convert::TryFrom;
use clap::{App, Arg, ArgMatches, value_t};
use log::{debug, error, info, LevelFilter};

use thermo::{Budget, Puzzle, SolutionView, SolverConfig, TieBreak};
use thermo::util::is_a_tty;

pub struct Args {
    pub path: String,
    pub force_yaml: bool,
    pub tie_break: TieBreak,
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
    pub count_only: bool,
    pub emit_color: bool,
    pub log_level: LevelFilter,
}

impl Args {
    fn from_matches(matches: &ArgMatches) -> Self {
        let tie_break = TieBreak::try_from(matches.value_of("tie-break").unwrap_or("minimal"))
                                 .unwrap_or(TieBreak::Minimal);
        let max_nodes = match matches.is_present("max-nodes") {
            true  => Some(value_t!(matches, "max-nodes", u64).unwrap_or_else(|e| e.exit())),
            false => None,
        };
        let time_limit = match matches.is_present("time-limit") {
            true  => {
                let secs = value_t!(matches, "time-limit", f64).unwrap_or_else(|e| e.exit());
                if !secs.is_finite() || secs < 0.0 {
                    eprintln!("error: --time-limit must be a non-negative number of seconds");
                    process::exit(1);
                }
                Some(Duration::from_secs_f64(secs))
            },
            false => None,
        };
        let log_level = match (matches.is_present("quiet"), matches.occurrences_of("verbose")) {
            (true, _) => LevelFilter::Error,
            (_, 0)    => LevelFilter::Warn,
            (_, 1)    => LevelFilter::Info,
            (_, 2)    => LevelFilter::Debug,
            _         => LevelFilter::Trace,
        };
        Args {
            path:       matches.value_of("PUZZLE").unwrap_or_default().to_string(),
            force_yaml: matches.is_present("yaml"),
            tie_break,
            max_nodes,
            time_limit,
            count_only: matches.is_present("count"),
            emit_color: !matches.is_present("no-color") && is_a_tty(io::stdout()),
            log_level,
        }
    }

    fn parse() -> Self {
        let matches = App::new("thermo")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Solves thermometer puzzles")
            .arg(Arg::with_name("PUZZLE")
                     .help("Puzzle file (plain text, or YAML when ending in .yaml/.yml)")
                     .required(true)
                     .index(1))
            .arg(Arg::with_name("yaml")
                     .long("yaml")
                     .help("Read the puzzle file as YAML regardless of its extension"))
            .arg(Arg::with_name("tie-break")
                     .long("tie-break")
                     .takes_value(true)
                     .possible_values(&["unique", "minimal"])
                     .default_value("minimal")
                     .help("How to handle puzzles with more than one solution"))
            .arg(Arg::with_name("max-nodes")
                     .long("max-nodes")
                     .takes_value(true)
                     .value_name("N")
                     .help("Give up after exploring N search nodes"))
            .arg(Arg::with_name("time-limit")
                     .long("time-limit")
                     .takes_value(true)
                     .value_name("SECS")
                     .help("Give up after SECS seconds of searching"))
            .arg(Arg::with_name("count")
                     .long("count")
                     .help("Print the number of solutions (up to 2) instead of solving"))
            .arg(Arg::with_name("no-color")
                     .long("no-color")
                     .help("Never emit ANSI colors"))
            .arg(Arg::with_name("verbose")
                     .short("v")
                     .multiple(true)
                     .help("Increase log verbosity (-v, -vv, -vvv)"))
            .arg(Arg::with_name("quiet")
                     .short("q")
                     .long("quiet")
                     .help("Only log errors"))
            .get_matches();
        Self::from_matches(&matches)
    }
}

fn setup_logging(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn run(args: &Args) -> i32 {
    let puzzle = match Puzzle::load(&args.path, args.force_yaml) {
        Ok(p)  => p,
        Err(e) => {
            error!("{}: {}", args.path, e);
            return 1;
        }
    };
    info!("loaded {}x{} puzzle with {} thermometers", puzzle.dimension(), puzzle.dimension(), puzzle.thermometers().len());
    debug!("\n{}", puzzle);

    let mut budget = Budget::unlimited();
    if let Some(nodes) = args.max_nodes {
        budget = budget.with_max_nodes(nodes);
    }
    if let Some(limit) = args.time_limit {
        budget = budget.with_time_limit(limit);
    }
    let mut solver = puzzle.solver(SolverConfig { tie_break: args.tie_break, budget });

    if args.count_only {
        return match solver.count_solutions(2) {
            Ok(n)  => { println!("{}", n); 0 },
            Err(e) => { error!("{}", e); 2 },
        };
    }

    let result = solver.solve();
    debug!("{}", solver.stats());
    match result {
        Ok(solution) => {
            let view = SolutionView::new(&puzzle, solution);
            print!("{}", view.render(args.emit_color));
            for t in puzzle.thermometers() {
                println!("{}: {}/{}", t, view.fill_level(t.id), t.length());
            }
            0
        },
        Err(e) => {
            error!("{}", e);
            2
        },
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = setup_logging(args.log_level) {
        eprintln!("failed to set up logging: {}", e);
    }
    process::exit(run(&args));
}
