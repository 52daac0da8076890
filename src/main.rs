use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dicom::object::open_file;
use dicom_rtstruct::make_rtstruct;
use tracing::{info, level_filters::LevelFilter, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Generate a minimal RT-STRUCT DICOM object from reference images.
///
/// Identifying patient/study metadata is copied from the first reference
/// file; fresh series, frame-of-reference and SOP instance UIDs are stamped
/// into the output.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
	/// Reference DICOM image files
	#[arg(required = true)]
	reference: Vec<PathBuf>,

	/// Output path for the generated RT-STRUCT file
	#[arg(short, long, default_value = "rtstruct.dcm")]
	output: PathBuf,

	/// Enable verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn init_logger(level: Level) {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::fmt::layer()
				.compact()
				.with_ansi(true)
				.with_file(false)
				.with_line_number(false)
				.with_target(false),
		)
		.with(
			EnvFilter::builder()
				.with_default_directive(LevelFilter::from_level(level).into())
				.from_env_lossy(),
		)
		.init();
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	init_logger(if args.verbose {
		Level::TRACE
	} else {
		Level::INFO
	});

	let mut references = Vec::with_capacity(args.reference.len());
	for path in &args.reference {
		let object = open_file(path)
			.with_context(|| format!("Failed to read reference DICOM file {}", path.display()))?;
		references.push(object.into_inner());
	}

	let rtstruct = make_rtstruct(&references).context("Failed to assemble RT-STRUCT dataset")?;

	let file = File::create(&args.output)
		.with_context(|| format!("Failed to create output file {}", args.output.display()))?;
	let mut writer = BufWriter::new(file);
	rtstruct
		.write_all(&mut writer)
		.context("Failed to encode RT-STRUCT dataset")?;
	writer
		.flush()
		.context("Failed to flush output file")?;

	info!(
		path = %args.output.display(),
		sop_instance_uid = rtstruct.meta().media_storage_sop_instance_uid(),
		"Wrote RT-STRUCT file"
	);
	Ok(())
}
