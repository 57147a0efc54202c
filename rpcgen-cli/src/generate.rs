//! The `generate` command.

use anyhow::{Context, bail};
use clap::Args;
use rpcgen_codegen::{CodegenError, GenerateOptions, Generator, SqlDialect, find_generator};
use rpcgen_schema::{Schema, load_schema_file};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

/// Generate command arguments
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema document
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Generator to run; repeat for several (see `rpcgen list`)
    #[arg(short, long = "target", required = true)]
    pub targets: Vec<String>,

    /// Package name for Go and Kotlin output
    #[arg(long, default_value = rpcgen_codegen::generator::DEFAULT_PACKAGE)]
    pub package: String,

    /// Name of the generated client or service
    #[arg(long, default_value = rpcgen_codegen::generator::DEFAULT_CLIENT_NAME)]
    pub client_name: String,

    /// Emit validation code where the backend supports it
    #[arg(long)]
    pub validate: bool,

    /// Import path of the Go types package used by go-server
    #[arg(long)]
    pub types_package: Option<String>,

    /// SQL dialect: sqlite or postgres
    #[arg(long, default_value_t = SqlDialect::Postgres)]
    pub dialect: SqlDialect,

    /// Directory for `<target>.<ext>` files (stdout for a single target if omitted)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

impl GenerateArgs {
    fn options(&self) -> GenerateOptions {
        let options = GenerateOptions::new()
            .with_package(&self.package)
            .with_client_name(&self.client_name)
            .with_validate(self.validate)
            .with_dialect(self.dialect);
        match &self.types_package {
            Some(path) => options.with_types_package(path),
            None => options,
        }
    }
}

/// Runs the command.
///
/// # Errors
/// Returns an error if the schema cannot be loaded, a target is unknown, or
/// the output directory cannot be created. Generator failures are reported
/// per target and turn into a failing exit code.
pub fn run(args: &GenerateArgs) -> anyhow::Result<ExitCode> {
    let schema = load_schema_file(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;
    let generators = args
        .targets
        .iter()
        .map(|target| find_generator(target))
        .collect::<Result<Vec<_>, _>>()?;
    let options = args.options();

    let Some(out_dir) = &args.out_dir else {
        let [generator] = generators.as_slice() else {
            bail!("--out-dir is required with more than one target");
        };
        let mut stdout = std::io::stdout().lock();
        generator.generate(&mut stdout, &schema, &options)?;
        stdout.flush()?;
        return Ok(ExitCode::SUCCESS);
    };

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let failures = write_all(&generators, &schema, &options, out_dir);
    if failures == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!(failures, "generation failed");
        Ok(ExitCode::FAILURE)
    }
}

/// Runs each generator on its own scoped thread against the shared schema
/// and returns the number of failed targets.
fn write_all(
    generators: &[&'static dyn Generator],
    schema: &Schema,
    options: &GenerateOptions,
    out_dir: &Path,
) -> usize {
    thread::scope(|scope| {
        let handles: Vec<_> = generators
            .iter()
            .map(|&generator| {
                let handle = scope.spawn(move || write_one(generator, schema, options, out_dir));
                (generator.name(), handle)
            })
            .collect();

        let mut failures = 0;
        for (name, handle) in handles {
            match handle.join() {
                Ok(Ok(path)) => {
                    tracing::info!(generator = name, path = %path.display(), "written");
                }
                Ok(Err(e)) => {
                    eprintln!("error: {name}: {e}");
                    failures += 1;
                }
                Err(_) => {
                    eprintln!("error: {name}: generator panicked");
                    failures += 1;
                }
            }
        }
        failures
    })
}

fn write_one(
    generator: &dyn Generator,
    schema: &Schema,
    options: &GenerateOptions,
    out_dir: &Path,
) -> Result<PathBuf, CodegenError> {
    let code = generator.generate_string(schema, options)?;
    let path = out_dir.join(format!("{}.{}", generator.name(), generator.extension()));
    std::fs::write(&path, code)?;
    Ok(path)
}
