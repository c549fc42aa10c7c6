//! Disassembles a raw DSP memory image with the reference decoder.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dsp_codegen::SpecHandle;
use dsp_codegen::soc::device::Endianness;

#[derive(Parser, Debug)]
#[command(name = "dsp-disasm", version, about = "Disassembles a raw DSP memory image")]
struct Args {
    /// Raw image of 16-bit instruction words
    image: PathBuf,

    /// Spec file describing the instruction set
    #[arg(long, env = "DSP_CODEGEN_SPEC", default_value = "defs/dsp/spec")]
    spec: PathBuf,

    /// Byte order of the words in the image
    #[arg(long, default_value_t = Endianness::Big)]
    endianness: Endianness,

    /// Word address of the first word, in hex
    #[arg(long, default_value = "0", value_parser = parse_hex)]
    base: u64,
}

fn parse_hex(raw: &str) -> Result<u64, std::num::ParseIntError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u64::from_str_radix(digits, 16)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let handle = SpecHandle::from_file(&args.spec)
        .with_context(|| format!("failed to load spec {}", args.spec.display()))?;
    let image = fs::read(&args.image)
        .with_context(|| format!("failed to read image {}", args.image.display()))?;

    let listing = handle.disassemble(&image, args.endianness, args.base)?;
    for line in &listing {
        println!("{line}");
    }
    let unknown = listing.iter().filter(|line| line.fallback).count();
    info!(
        "{} instruction(s), {} unknown, {} byte(s) read",
        listing.len(),
        unknown,
        image.len()
    );
    Ok(())
}
