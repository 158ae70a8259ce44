use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use creator2x::assets::{AssetIndex, AssetIndexError};
use creator2x::{translate, TranslateError, TranslateOptions, Translation};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	#[arg(required = true, help = "Cocos Creator scene files (.fire)")]
	scenes: Vec<PathBuf>,
	#[arg(short = 'p', long = "assetpath", default_value = "", help = "Prefix for asset paths in the generated code")]
	asset_path: String,
	#[arg(short, long, default_value = "cpp", help = "Directory the generated files are written to")]
	output: PathBuf,
	#[arg(long, help = "Project library directory holding uuid-to-mtime.json [default: <scene dir>/../library]")]
	library: Option<PathBuf>,
	#[arg(long = "meta-dir", help = "Directory scanned for .meta files, repeatable [default: the scene's directory]")]
	meta_dirs: Vec<PathBuf>,
	#[arg(short, long, help = "Log type resolution and the scene graph")]
	verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
	#[error("{}: {source}", path.display())]
	Io { path: PathBuf, source: io::Error },
	#[error("{}: invalid JSON\n  - {source}", path.display())]
	Json { path: PathBuf, source: json::Error },
	#[error("{}: {source}", path.display())]
	AssetIndex { path: PathBuf, source: AssetIndexError },
	#[error("{}: {source}", path.display())]
	Translate { path: PathBuf, source: TranslateError },
}

const UUID_TABLE: &str = "uuid-to-mtime.json";

fn read_json(path: &Path) -> Result<json::JsonValue, CliError> {
	let text = fs::read_to_string(path).map_err(|source| CliError::Io {
		path: path.to_owned(),
		source,
	})?;
	json::parse(&text).map_err(|source| CliError::Json {
		path: path.to_owned(),
		source,
	})
}

fn meta_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
	let io_error = |source| CliError::Io {
		path: dir.to_owned(),
		source,
	};

	let mut metas = Vec::new();
	for entry in fs::read_dir(dir).map_err(io_error)? {
		let path = entry.map_err(io_error)?.path();
		if path.is_file() && path.extension().map_or(false, |ext| ext == "meta") {
			metas.push(path);
		}
	}
	metas.sort();
	Ok(metas)
}

fn load_asset_index(cli: &Cli, scene_dir: &Path) -> Result<AssetIndex, CliError> {
	let library = cli.library.clone().unwrap_or_else(|| scene_dir.join("..").join("library"));
	let meta_dirs = if cli.meta_dirs.is_empty() {
		vec![scene_dir.to_owned()]
	} else {
		cli.meta_dirs.clone()
	};

	let mut builder = AssetIndex::builder();

	let uuid_path = library.join(UUID_TABLE);
	builder
		.uuid_table(&read_json(&uuid_path)?)
		.map_err(|source| CliError::AssetIndex { path: uuid_path, source })?;

	for dir in &meta_dirs {
		for meta_path in meta_files(dir)? {
			let meta = read_json(&meta_path)?;
			builder
				.meta(&meta)
				.map_err(|source| CliError::AssetIndex { path: meta_path, source })?;
		}
	}

	Ok(builder.build())
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
	fs::write(path, contents).map_err(|source| CliError::Io {
		path: path.to_owned(),
		source,
	})
}

/// Writes every output of a scene under a temporary name first, so a failed
/// write leaves none of them behind.
fn write_translation(output: &Path, scene_name: &str, translation: &Translation) -> Result<(), CliError> {
	fs::create_dir_all(output).map_err(|source| CliError::Io {
		path: output.to_owned(),
		source,
	})?;

	let mut resources = String::new();
	for resource in &translation.resources {
		resources.push_str(resource);
		resources.push('\n');
	}

	let files = [
		(format!("{scene_name}.cpp"), translation.source.as_str()),
		(format!("{scene_name}.h"), translation.header.as_str()),
		(format!("{scene_name}.resources"), resources.as_str()),
	];

	let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
	for (file_name, contents) in &files {
		let temp = output.join(format!(".{file_name}.tmp"));
		if let Err(e) = write_file(&temp, contents) {
			remove_all(staged.iter().map(|(temp, _)| temp));
			return Err(e);
		}
		staged.push((temp, output.join(file_name)));
	}

	for (index, (temp, path)) in staged.iter().enumerate() {
		if let Err(source) = fs::rename(temp, path) {
			remove_all(staged[..index].iter().map(|(_, path)| path));
			remove_all(staged[index..].iter().map(|(temp, _)| temp));
			return Err(CliError::Io {
				path: path.clone(),
				source,
			});
		}
	}
	Ok(())
}

fn remove_all<'p>(paths: impl Iterator<Item = &'p PathBuf>) {
	for path in paths {
		if let Err(e) = fs::remove_file(path) {
			warn!("Could not remove {}: {e}", path.display());
		}
	}
}

fn process_scene(cli: &Cli, scene_path: &Path) -> Result<(), CliError> {
	info!("Translating {}", scene_path.display());

	let scene_dir = match scene_path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir,
		_ => Path::new("."),
	};
	let assets = load_asset_index(cli, scene_dir)?;

	let stem = scene_path
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_default();
	let options = TranslateOptions::new(&stem).with_asset_path(&cli.asset_path);

	let scene = fs::read_to_string(scene_path).map_err(|source| CliError::Io {
		path: scene_path.to_owned(),
		source,
	})?;
	let translation = translate(&scene, &assets, &options).map_err(|source| CliError::Translate {
		path: scene_path.to_owned(),
		source,
	})?;

	write_translation(&cli.output, &options.scene_name, &translation)?;
	debug!(
		"Wrote {}.cpp, {}.h and {} resources",
		options.scene_name,
		options.scene_name,
		translation.resources.len()
	);
	Ok(())
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
	tracing_subscriber::registry().with(fmt::layer()).with(level).init();

	let failures = cli
		.scenes
		.par_iter()
		.filter_map(|scene| match process_scene(&cli, scene) {
			Ok(()) => None,
			Err(e) => {
				error!("{e}");
				Some(scene)
			}
		})
		.count();

	if failures == 0 {
		info!("Translated {} scene(s)", cli.scenes.len());
		ExitCode::SUCCESS
	} else {
		error!("{failures} of {} scene(s) failed", cli.scenes.len());
		ExitCode::FAILURE
	}
}
