use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "laminate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite every output group described by a job file.
    Compile(CompileArgs),
    /// Resolve a job's slots and report what would be composited.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Job description JSON.
    #[arg(long)]
    job: PathBuf,

    /// Composite output groups in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Job description JSON.
    #[arg(long)]
    job: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let job = laminate::CompileJob::from_path(&args.job)
        .with_context(|| format!("load job '{}'", args.job.display()))?;

    let options = laminate::CompileOptions {
        parallel: args.parallel,
        threads: args.threads,
    };
    let written = laminate::compile_with_options(&job, &options)?;

    for path in &written {
        println!("{}", path.display());
    }
    eprintln!("wrote {} file(s)", written.len());
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let job = laminate::CompileJob::from_path(&args.job)
        .with_context(|| format!("load job '{}'", args.job.display()))?;
    job.validate()?;

    let mut group_count = 0usize;
    for (i, slot) in job.slots.iter().enumerate() {
        let resolved = laminate::resolve_slot(slot)?;
        println!(
            "slot {i} ({}): {} image(s)",
            slot.directory.display(),
            resolved.images.len()
        );
        for path in &resolved.images {
            println!("  {}", path.display());
        }
        group_count = group_count.max(resolved.images.len());
    }

    eprintln!("{group_count} output group(s) would be composited");
    Ok(())
}
