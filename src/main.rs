use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use dsp_codegen::{EmitOptions, generate};

/// Compiles the DSP instruction-set spec into a Rust decoder.
#[derive(Parser, Debug)]
#[command(name = "dsp-codegen", version, about)]
struct Args {
    /// Where to write the generated decoder source
    output: PathBuf,

    /// Spec file to compile
    #[arg(long, env = "DSP_CODEGEN_SPEC", default_value = "defs/dsp/spec")]
    spec: PathBuf,

    /// `log` target used by the generated unknown-opcode warnings
    #[arg(long, default_value = "dsp")]
    log_target: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = EmitOptions {
        log_target: args.log_target,
        source_label: args.spec.display().to_string(),
        source_digest: None,
    };

    let summary = generate(&args.spec, &args.output, &options).with_context(|| {
        format!(
            "failed to generate {} from {}",
            args.output.display(),
            args.spec.display()
        )
    })?;

    if summary.extension_conflicts > 0 {
        warn!(
            "{} extension byte(s) matched more than one extension; the first in spec order was kept",
            summary.extension_conflicts
        );
    }
    if summary.ambiguous_nodes > 0 {
        warn!(
            "{} decision-table node(s) could not be split and decode as unknown",
            summary.ambiguous_nodes
        );
    }
    Ok(())
}
