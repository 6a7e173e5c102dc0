use std::{env, ffi::OsString, path::PathBuf, process::ExitCode};

use log::{LevelFilter, Log, Metadata, Record};
use sched_sim::{
    Error, JobSpec, Policy, Sim, SimConfig, Ticks,
    sim::{
        input::read_jobs_file,
        policy::parse_quantum,
        trace::event_lines,
        workload::random_jobs,
    },
};

const LOG_ENV: &str = "SCHED_SIM_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

enum JobSource {
    File(PathBuf),
    Random {
        count: usize,
        seed: u64,
        min_burst: Ticks,
        max_burst: Ticks,
    },
}

struct CliArgs {
    policy_tag: String,
    quantum: Option<String>,
    max_jobs: Option<usize>,
    trace: bool,
    source: JobSource,
}

enum Parsed {
    Run(CliArgs),
    Help,
}

fn main() -> ExitCode {
    init_logging();

    let mut args = env::args_os();
    let exe = args
        .next()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sched_sim".into());

    let cli = match parse_args(args) {
        Ok(Parsed::Run(cli)) => cli,
        Ok(Parsed::Help) => {
            print_usage(&exe);
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            print_usage(&exe);
            return ExitCode::from(2);
        }
    };

    match simulate(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn simulate(cli: CliArgs) -> Result<(), Error> {
    let quantum = cli.quantum.as_deref().map(parse_quantum).transpose()?;
    let policy = Policy::from_tag(&cli.policy_tag, quantum)?;

    let jobs: Vec<JobSpec> = match cli.source {
        JobSource::File(path) => read_jobs_file(&path)?,
        JobSource::Random {
            count,
            seed,
            min_burst,
            max_burst,
        } => random_jobs(count, min_burst..=max_burst, seed)?,
    };

    let mut config = SimConfig::new(policy);
    if let Some(limit) = cli.max_jobs {
        config = config.with_max_jobs(limit);
    }
    let sim = Sim::new(config, jobs)?;

    println!("{policy}");
    let outcome = if cli.trace {
        let preemptive = policy.is_preemptive();
        // Lines go out as each step finishes; the trace is never held in memory
        sim.run_with(|event, jobs| {
            for line in event_lines(preemptive, event, jobs) {
                println!("{line}");
            }
        })?
    } else {
        sim.run()?
    };
    println!();
    print!("{}", outcome.report);

    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

fn parse_args(args: impl Iterator<Item = OsString>) -> Result<Parsed, String> {
    let args: Vec<String> = args.map(|a| a.to_string_lossy().into_owned()).collect();
    if args.is_empty() {
        return Err("insufficient arguments".into());
    }

    let mut policy_tag: Option<String> = None;
    let mut quantum: Option<String> = None;
    let mut max_jobs: Option<usize> = None;
    let mut trace = true;
    let mut path: Option<PathBuf> = None;
    let mut random_count: Option<usize> = None;
    let mut seed: u64 = 0;
    let mut min_burst: Ticks = 1;
    let mut max_burst: Ticks = 10;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Parsed::Help),
            "-f" | "-s" => policy_tag = Some(arg),
            "-r" => {
                quantum = Some(iter.next().ok_or("-r requires a time quantum")?);
                policy_tag = Some(arg);
            }
            "--no-trace" => trace = false,
            flag if flag.starts_with("--") => {
                let (name, value) = flag
                    .split_once('=')
                    .ok_or_else(|| format!("flag {flag} needs a value (use {flag}=VALUE)"))?;
                match name {
                    "--policy" => policy_tag = Some(value.to_string()),
                    "--quantum" => quantum = Some(value.to_string()),
                    "--max-jobs" => max_jobs = Some(parse_number(value, name)?),
                    "--random" => random_count = Some(parse_number(value, name)?),
                    "--seed" => seed = parse_number(value, name)?,
                    "--min-burst" => min_burst = parse_number(value, name)?,
                    "--max-burst" => max_burst = parse_number(value, name)?,
                    _ => return Err(format!("unknown flag {name}")),
                }
            }
            // The last positional argument names the job file
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    let policy_tag = policy_tag.ok_or("no scheduling policy given")?;
    let source = match (random_count, path) {
        (Some(_), Some(_)) => return Err("give either a job file or --random, not both".into()),
        (Some(count), None) => JobSource::Random {
            count,
            seed,
            min_burst,
            max_burst,
        },
        (None, Some(path)) => JobSource::File(path),
        (None, None) => return Err("missing job file".into()),
    };

    Ok(Parsed::Run(CliArgs {
        policy_tag,
        quantum,
        max_jobs,
        trace,
        source,
    }))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {flag} value: {value}"))
}

// ---------------------------------------------------------------------------
// Usage text
// ---------------------------------------------------------------------------

fn print_usage(exe: &str) {
    eprintln!(
        "\
Usage:
  {exe} -f <jobs-file>                 First Come First Served
  {exe} -s <jobs-file>                 Shortest Job First
  {exe} -r <quantum> <jobs-file>       Round Robin

  {exe} --policy=<FCFS|SJF|RR> [OPTIONS] (<jobs-file> | --random=N)

Options:
  --quantum=N        Round Robin time quantum (required for RR)
  --max-jobs=N       Reject job lists longer than N
  --no-trace         Only print the per-job summary
  --random=N         Generate N jobs instead of reading a file
  --seed=S           Seed for --random (default 0)
  --min-burst=A      Smallest generated burst (default 1)
  --max-burst=B      Largest generated burst (default 10)

Job file: one `name,burst` record per line.
Logging: set {LOG_ENV}=error|warn|info|debug|trace."
    );
}
