//! sascomp CLI - generate and compare small-angle scattering models.
//!
//! A single model runs on one engine; pairs of engines (or models, or
//! parameter values) are compared point-by-point with error statistics,
//! the way the development workflow checks a kernel against its
//! double-precision reference before release.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sas_compare::compare::{parlist, run_models, DataSpec};
use sas_compare::engine::{DirectModel, Precision, DEFAULT_CUTOFF};
use sas_compare::htmldoc::write_docs;
use sas_compare::modeltest::run_checks;
use sas_compare::random::{randomize_pars, suppress_pd};
use sas_compare::report::{BatchReport, BatchRow};
use sas_models::info::ModelDef;
use sas_models::registry::{list_models, lookup};
use sas_types::config::JobConfig;
use sas_types::params::ParameterSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sascomp")]
#[command(version)]
#[command(about = "Generate and compare small-angle scattering models")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available models
    List,

    /// Compare calculation engines on a model (or a model pair)
    Compare {
        /// Model name, or model1,model2 to compare two models
        model: String,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        calc: CalcArgs,

        /// Print the parameter set before running
        #[arg(long)]
        pars: bool,

        /// Number of random parameter sets to run (forces randomization)
        #[arg(long, default_value_t = 1)]
        sets: usize,

        /// Parameter overrides; value1,value2 splits across the engines
        #[arg(value_name = "KEY=VALUE")]
        values: Vec<String>,
    },

    /// Batch-compare random parameter sets and write a CSV report
    Batch {
        /// Model name (omit when --config is given)
        model: Option<String>,

        /// JSON job description; flags below override nothing when set
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        calc: CalcArgs,

        /// Number of random parameter sets
        #[arg(long, default_value_t = 10)]
        sets: usize,

        /// CSV output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the reference checks of a model (all models with --all)
    Check {
        model: Option<String>,

        #[arg(long)]
        all: bool,

        /// Also run the checks at single precision
        #[arg(long)]
        single: bool,
    },

    /// Build the HTML documentation tree
    Doc {
        /// Limit to one model; the full catalogue otherwise
        model: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "html")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Number of q points
    #[arg(long, default_value_t = 128)]
    nq: usize,

    /// q up to 0.05 (default)
    #[arg(long)]
    lowq: bool,
    /// q up to 0.2
    #[arg(long)]
    midq: bool,
    /// q up to 1.0
    #[arg(long)]
    highq: bool,
    /// q up to 10.0
    #[arg(long)]
    exq: bool,

    /// Include the q = 0 point
    #[arg(long)]
    zero: bool,

    /// Linear q spacing instead of log
    #[arg(long)]
    linear: bool,

    /// Square detector grid instead of 1-D
    #[arg(long = "2d")]
    two_d: bool,

    /// Resolution width dq/q
    #[arg(long, default_value_t = 0.0)]
    res: f64,
}

impl DataArgs {
    fn spec(&self) -> DataSpec {
        let qmax = if self.exq {
            10.0
        } else if self.highq {
            1.0
        } else if self.midq {
            0.2
        } else {
            0.05
        };
        DataSpec {
            qmax,
            nq: self.nq,
            log_q: !self.linear,
            zero: self.zero,
            res: self.res,
            two_d: self.two_d,
        }
    }
}

#[derive(Args)]
struct CalcArgs {
    /// Engine or engine pair: single, double, or single,double
    #[arg(long, default_value = "single,double")]
    engine: String,

    /// Polydispersity weight cutoff
    #[arg(long, default_value_t = DEFAULT_CUTOFF)]
    cutoff: f64,

    /// Evaluations per timing estimate, per engine: N or N1,N2
    #[arg(long, default_value = "1")]
    neval: String,

    /// Randomize parameters, optionally with a fixed seed (--random=SEED)
    #[arg(long, value_name = "SEED", num_args = 0..=1, require_equals = true)]
    random: Option<Option<u64>>,

    /// Suppress polydispersity (default)
    #[arg(long)]
    mono: bool,

    /// Force at least one polydisperse parameter
    #[arg(long, conflicts_with = "mono")]
    poly: bool,
}

/// Split "a,b" into a pair; a single value serves both slots.
fn split_pair(s: &str) -> (String, Option<String>) {
    match s.split_once(',') {
        Some((a, b)) => (a.trim().to_string(), Some(b.trim().to_string())),
        None => (s.trim().to_string(), None),
    }
}

/// Parse a key=value override, splitting paired values.
fn parse_override(arg: &str) -> Result<(String, f64, Option<f64>)> {
    let (key, value) = arg
        .split_once('=')
        .with_context(|| format!("expected key=value, got {arg:?}"))?;
    let (v1, v2) = split_pair(value);
    let first: f64 = v1
        .parse()
        .with_context(|| format!("{key}: not a number: {v1:?}"))?;
    let second = v2
        .map(|v| {
            v.parse::<f64>()
                .with_context(|| format!("{key}: not a number: {v:?}"))
        })
        .transpose()?;
    Ok((key.to_string(), first, second))
}

fn parse_neval(s: &str) -> Result<(usize, usize)> {
    let (a, b) = split_pair(s);
    let first: usize = a.parse().with_context(|| format!("bad neval {a:?}"))?;
    let second = match b {
        Some(b) => b.parse().with_context(|| format!("bad neval {b:?}"))?,
        None => first,
    };
    Ok((first, second))
}

fn parse_engines(s: &str) -> Result<(Precision, Option<Precision>)> {
    let (a, b) = split_pair(s);
    let first: Precision = a.parse()?;
    let second = b.map(|b| b.parse::<Precision>()).transpose()?;
    Ok((first, second))
}

/// Seed handling: absent → no randomization, bare flag → entropy seed.
fn resolve_seed(random: &Option<Option<u64>>) -> Option<u64> {
    match random {
        None => None,
        Some(Some(seed)) => Some(*seed),
        Some(None) => Some(rand::thread_rng().gen()),
    }
}

fn model_pair(name: &str) -> Result<(ModelDef, Option<ModelDef>)> {
    let (first, second) = split_pair(name);
    let base = lookup(&first)?;
    let comp = second.map(|n| lookup(&n)).transpose()?;
    Ok((base, comp))
}

/// Build the two parameter sets for one comparison run.
fn build_pars(
    base: &ModelDef,
    comp: Option<&ModelDef>,
    rng: Option<&mut StdRng>,
    mono: bool,
    overrides: &[(String, f64, Option<f64>)],
) -> Result<(ParameterSet, ParameterSet)> {
    let mut pars = base.info.defaults();
    let mut pars2 = comp.map(|m| m.info.defaults()).unwrap_or_else(|| pars.clone());

    if let Some(rng) = rng {
        randomize_pars(base, &mut pars, rng);
        match comp {
            Some(comp) if comp.id() != base.id() => {
                randomize_pars(comp, &mut pars2, rng);
                // share values for parameters with the same name
                let shared: Vec<(String, f64)> = pars
                    .iter()
                    .filter(|(k, _)| pars2.contains(k))
                    .map(|(k, &v)| (k.clone(), v))
                    .collect();
                for (k, v) in shared {
                    pars2.set(k, v);
                }
            }
            _ => pars2 = pars.clone(),
        }
    }

    suppress_pd(&mut pars, mono);
    suppress_pd(&mut pars2, mono);

    for (key, v1, v2) in overrides {
        let in_base = base.info.validate_name(key).is_ok();
        let in_comp = comp
            .map(|m| m.info.validate_name(key).is_ok())
            .unwrap_or(in_base);
        if !in_base && !in_comp {
            // surface the richer of the two errors
            base.info.validate_name(key)?;
        }
        if in_base {
            pars.set(key.clone(), *v1);
        }
        if in_comp {
            pars2.set(key.clone(), v2.unwrap_or(*v1));
        }
        // a pd width given on the command line defaults its point count
        if key.ends_with("_pd") {
            let n_key = format!("{key}_n");
            if pars.value_or(&n_key, 0.0) == 0.0 {
                pars.set(n_key.clone(), 35.0);
                pars2.set(n_key, 35.0);
            }
        }
    }
    Ok((pars, pars2))
}

fn cmd_list() {
    for id in list_models() {
        println!("{id}");
    }
}

fn cmd_compare(
    model: &str,
    data: &DataArgs,
    calc: &CalcArgs,
    show_pars: bool,
    sets: usize,
    values: &[String],
) -> Result<()> {
    let (base_model, comp_model) = model_pair(model)?;
    let (engine1, engine2) = parse_engines(&calc.engine)?;
    let neval = parse_neval(&calc.neval)?;
    let overrides = values
        .iter()
        .map(|v| parse_override(v))
        .collect::<Result<Vec<_>>>()?;

    // any paired input switches the comparison on
    let comparison = comp_model.is_some()
        || engine2.is_some()
        || overrides.iter().any(|(_, _, v2)| v2.is_some());

    let mut seed = resolve_seed(&calc.random);
    if sets > 1 && seed.is_none() {
        seed = Some(rand::thread_rng().gen());
    }
    if let Some(seed) = seed {
        info!("randomize using --random {seed}");
    }
    let mut rng = seed.map(StdRng::seed_from_u64);

    let mono = !calc.poly;
    let dataset = data.spec().build();

    let base_engine = DirectModel::new(&base_model, engine1, calc.cutoff);
    let comp_ref = comp_model.as_ref().unwrap_or(&base_model);
    // a lone engine serves both sides when the comparison comes from a
    // model pair or split parameter values
    let comp_engine = comparison
        .then(|| DirectModel::new(comp_ref, engine2.unwrap_or(engine1), calc.cutoff));

    for set in 0..sets.max(1) {
        let (pars, pars2) = build_pars(
            &base_model,
            comp_model.as_ref(),
            rng.as_mut(),
            mono,
            &overrides,
        )?;
        if show_pars {
            println!("{}", parlist(&base_model.info, &pars));
            if comp_model.is_some() {
                println!("{}", parlist(&comp_ref.info, &pars2));
            }
        }

        let result = run_models(
            &base_engine,
            &pars,
            comp_engine.as_ref().map(|e| (e, &pars2)),
            &dataset,
            neval,
        )?;
        if sets > 1 {
            println!("-- set {set} --");
        }
        for line in result.summary() {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_batch(
    model: Option<&str>,
    config: Option<&PathBuf>,
    data: &DataArgs,
    calc: &CalcArgs,
    sets: usize,
    output: Option<&PathBuf>,
) -> Result<()> {
    // a config file describes the whole job; flags describe it otherwise
    let job = match config {
        Some(path) => JobConfig::from_file(&path.to_string_lossy())
            .with_context(|| format!("loading {path:?}"))?,
        None => {
            let model = model.context("model name required without --config")?;
            let spec = data.spec();
            JobConfig {
                model: model.to_string(),
                nq: spec.nq,
                qmax: spec.qmax,
                zero: spec.zero,
                sets,
                seed: resolve_seed(&calc.random),
                engine: calc.engine.clone(),
                cutoff: calc.cutoff,
                mono: !calc.poly,
                pars: ParameterSet::new(),
                output: output.map(|p| p.to_string_lossy().into_owned()),
            }
        }
    };

    let model = lookup(&job.model)?;
    let (engine1, engine2) = parse_engines(&job.engine)?;
    let base_engine = DirectModel::new(&model, engine1, job.cutoff);
    let comp_engine =
        DirectModel::new(&model, engine2.unwrap_or(Precision::Double), job.cutoff);

    let seed = job.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    info!(
        "batch {}: {} sets, seed {seed}, engines {},{}",
        model.id(),
        job.sets,
        base_engine.label(),
        comp_engine.label()
    );

    let dataset = DataSpec {
        qmax: job.qmax,
        nq: job.nq,
        log_q: true,
        zero: job.zero,
        res: 0.0,
        two_d: false,
    }
    .build();

    let mut report = BatchReport::default();
    for set in 0..job.sets {
        let mut pars = model.info.defaults();
        randomize_pars(&model, &mut pars, &mut rng);
        suppress_pd(&mut pars, job.mono);
        for (key, &value) in job.pars.iter() {
            model.info.validate_name(key)?;
            pars.set(key.clone(), value);
        }

        let result = run_models(
            &base_engine,
            &pars,
            Some((&comp_engine, &pars)),
            &dataset,
            (1, 1),
        )?;
        match (result.resid_stats(), result.relerr_stats()) {
            (Some(resid), Some(relerr)) => {
                report.push(BatchRow::new(
                    set,
                    seed,
                    result.base_ms,
                    result.comp_ms.unwrap_or(0.0),
                    &resid,
                    &relerr,
                    engine1,
                ));
            }
            _ => log::warn!("set {set}: no valid points, row skipped"),
        }
    }

    match &job.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("creating {path:?}"))?;
            report.write_csv(&mut file)?;
            info!("wrote {path}");
        }
        None => report.write_csv(&mut std::io::stdout())?,
    }
    println!(
        "{} of {} sets within {:.0e}",
        report.passed(),
        report.rows.len(),
        sas_compare::report::tolerance(engine1)
    );
    Ok(())
}

fn cmd_check(model: Option<&str>, all: bool, single: bool) -> Result<()> {
    let ids: Vec<&str> = if all {
        list_models()
    } else {
        vec![model.context("model name required without --all")?]
    };

    let mut failures = 0usize;
    for id in ids {
        let model = lookup(id)?;
        let report = run_checks(&model, single)?;
        if report.ok() {
            println!("{id}: {} checks passed", report.passed);
        } else {
            failures += report.failures.len();
            println!("{id}: FAILED");
            for failure in &report.failures {
                println!("  {failure}");
            }
        }
    }
    if failures > 0 {
        bail!("{failures} model check(s) failed");
    }
    Ok(())
}

fn cmd_doc(model: Option<&str>, output: &PathBuf) -> Result<()> {
    let models: Vec<ModelDef> = match model {
        Some(id) => vec![lookup(id)?],
        None => list_models()
            .into_iter()
            .map(lookup)
            .collect::<Result<_, _>>()?,
    };
    let written = write_docs(output, &models)?;
    println!(
        "wrote {} pages under {}; open {}",
        written.len(),
        output.display(),
        written[0].display()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::List => {
            cmd_list();
            Ok(())
        }
        Commands::Compare {
            model,
            data,
            calc,
            pars,
            sets,
            values,
        } => cmd_compare(model, data, calc, *pars, *sets, values),
        Commands::Batch {
            model,
            config,
            data,
            calc,
            sets,
            output,
        } => cmd_batch(
            model.as_deref(),
            config.as_ref(),
            data,
            calc,
            *sets,
            output.as_ref(),
        ),
        Commands::Check { model, all, single } => cmd_check(model.as_deref(), *all, *single),
        Commands::Doc { model, output } => cmd_doc(model.as_deref(), output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("single"), ("single".to_string(), None));
        assert_eq!(
            split_pair("single,double"),
            ("single".to_string(), Some("double".to_string()))
        );
    }

    #[test]
    fn test_parse_override() {
        let (k, v1, v2) = parse_override("radius=42").unwrap();
        assert_eq!((k.as_str(), v1, v2), ("radius", 42.0, None));
        let (k, v1, v2) = parse_override("rg=50,75").unwrap();
        assert_eq!((k.as_str(), v1, v2), ("rg", 50.0, Some(75.0)));
        assert!(parse_override("radius").is_err());
        assert!(parse_override("radius=abc").is_err());
    }

    #[test]
    fn test_parse_engines() {
        let (a, b) = parse_engines("single,double").unwrap();
        assert_eq!(a, Precision::Single);
        assert_eq!(b, Some(Precision::Double));
        let (a, b) = parse_engines("double").unwrap();
        assert_eq!(a, Precision::Double);
        assert!(b.is_none());
    }

    #[test]
    fn test_build_pars_shares_and_overrides() {
        let base = lookup("sphere").unwrap();
        let mut rng = StdRng::seed_from_u64(27);
        let overrides = vec![("radius".to_string(), 42.0, Some(43.0))];
        let (pars, pars2) =
            build_pars(&base, None, Some(&mut rng), true, &overrides).unwrap();
        assert_eq!(pars.get("radius"), Some(42.0));
        assert_eq!(pars2.get("radius"), Some(43.0));
        // mono run: polydispersity suppressed before overrides
        assert_eq!(pars.get("radius_pd_n"), Some(0.0));
    }

    #[test]
    fn test_build_pars_pd_override_enables_points() {
        let base = lookup("sphere").unwrap();
        let overrides = vec![("radius_pd".to_string(), 0.2, None)];
        let (pars, _) = build_pars(&base, None, None, true, &overrides).unwrap();
        assert_eq!(pars.get("radius_pd"), Some(0.2));
        assert_eq!(pars.get("radius_pd_n"), Some(35.0));
    }

    #[test]
    fn test_unknown_override_rejected() {
        let base = lookup("sphere").unwrap();
        let overrides = vec![("radius_polar".to_string(), 1.0, None)];
        assert!(build_pars(&base, None, None, true, &overrides).is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
