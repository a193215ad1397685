use anyhow::{Context, Result, anyhow};
use chordsheet::export::paginate_positioned;
use chordsheet::file::read_song_file;
use chordsheet::transforms::{TransformDescriptor, apply_transforms};
use chordsheet::{Config, LayoutMode, Song, SongLibrary, ViewerSession, render_song};
use clap::{Arg, ArgMatches, Command};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "chordsheet=debug"
    } else {
        "chordsheet=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn song_arg() -> Arg {
    Arg::new("song")
        .help("Song file (.json), or a filename inside --library")
        .required(true)
        .value_name("SONG")
        .index(1)
}

fn library_arg() -> Arg {
    Arg::new("library")
        .help("Song library directory (holds songs.json and songs/)")
        .long("library")
        .short('l')
        .value_name("DIR")
}

fn transpose_arg() -> Arg {
    Arg::new("transpose")
        .help("Transpose by semitones (e.g. +2, -3)")
        .long("transpose")
        .short('t')
        .allow_hyphen_values(true)
        .value_name("SEMITONES")
        .value_parser(clap::value_parser!(i32))
}

fn config_arg() -> Arg {
    Arg::new("config")
        .help("JSON configuration file")
        .long("config")
        .short('c')
        .value_name("FILE")
}

fn cli() -> Command {
    Command::new("chordsheet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Chord sheet viewer, transposer and exporter")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .help("Enable verbose output")
                .short('v')
                .long("verbose")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("list")
                .about("List the songs of a library")
                .arg(
                    Arg::new("library")
                        .help("Song library directory")
                        .required(true)
                        .value_name("DIR")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("view")
                .about("Print a song as a chord sheet")
                .arg(song_arg())
                .arg(library_arg())
                .arg(transpose_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("layout")
                        .help("Chord placement: slots or columns")
                        .long("layout")
                        .value_name("MODE")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    Arg::new("commands")
                        .help("Print draw commands with chords placed by column")
                        .long("commands")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write a paginated document for a song")
                .arg(song_arg())
                .arg(library_arg())
                .arg(transpose_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("out-dir")
                        .help("Directory for the exported document")
                        .long("out-dir")
                        .short('o')
                        .value_name("DIR"),
                )
                .arg(
                    Arg::new("page-height")
                        .help("Page break threshold in document units")
                        .long("page-height")
                        .value_name("UNITS")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("commands")
                        .help("Print the draw commands instead of writing a file")
                        .long("commands")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("transpose")
                .about("Write a transposed copy of a song as JSON")
                .arg(song_arg())
                .arg(library_arg())
                .arg(
                    Arg::new("by")
                        .help("Semitones to shift")
                        .long("by")
                        .required(true)
                        .allow_hyphen_values(true)
                        .value_name("SEMITONES")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    Arg::new("output")
                        .help("Output file (defaults to stdout)")
                        .long("output")
                        .short('o')
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            Command::new("chord")
                .about("Transpose chord symbols")
                .arg(
                    Arg::new("chords")
                        .help("Chord symbols, e.g. Bb7 F#m C/G")
                        .required(true)
                        .num_args(1..)
                        .value_name("CHORD")
                        .index(1),
                )
                .arg(
                    Arg::new("by")
                        .help("Semitones to shift")
                        .long("by")
                        .required(true)
                        .allow_hyphen_values(true)
                        .value_name("SEMITONES")
                        .value_parser(clap::value_parser!(i32)),
                ),
        )
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| anyhow!("Missing argument: {}", name))
}

fn load_song(matches: &ArgMatches) -> Result<Song> {
    let name = required(matches, "song")?;
    match matches.get_one::<String>("library") {
        Some(root) => SongLibrary::new(root)
            .load(name)
            .with_context(|| format!("Failed to load {} from library {}", name, root)),
        None => read_song_file(name).with_context(|| format!("Failed to load song: {}", name)),
    }
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn run_list(matches: &ArgMatches) -> Result<()> {
    let root = required(matches, "library")?;
    let library = SongLibrary::new(root);
    let index = library
        .index()
        .with_context(|| format!("Unable to load {}", library.index_path().display()))?;

    for entry in index {
        println!("{}\t{}", entry.title, entry.filename);
    }
    Ok(())
}

fn run_view(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let song = load_song(matches)?;
    let steps = matches.get_one::<i32>("transpose").copied().unwrap_or(0);
    let mode = match matches.get_one::<String>("layout") {
        Some(mode) => mode.parse::<LayoutMode>()?,
        None => config.layout_mode,
    };

    if matches.get_flag("commands") {
        let commands = paginate_positioned(&song, steps, &config.layout, &config.export);
        for command in &commands {
            println!("{}", command);
        }
        return Ok(());
    }

    tracing::info!(title = %song.title, steps, %mode, "rendering song");
    print!("{}", render_song(&song, steps, mode));
    Ok(())
}

fn run_export(matches: &ArgMatches) -> Result<()> {
    let mut config = load_config(matches)?;
    if let Some(page_height) = matches.get_one::<f64>("page-height") {
        config.export.page_height = *page_height;
    }
    let song = load_song(matches)?;

    let steps = matches.get_one::<i32>("transpose").copied().unwrap_or(0);
    let session = ViewerSession::open(song, config.layout_mode).with_offset(steps.into());
    let document = session.on_export(&config.export);

    if matches.get_flag("commands") {
        for command in &document.commands {
            println!("{}", command);
        }
        return Ok(());
    }

    let out_dir = matches
        .get_one::<String>("out-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let output_file = out_dir.join(&document.filename);
    std::fs::write(&output_file, document.to_text())
        .with_context(|| format!("Failed to write document: {}", output_file.display()))?;

    tracing::info!(
        pages = document.page_count(),
        path = %output_file.display(),
        "exported song"
    );
    println!("{}", output_file.display());
    Ok(())
}

fn run_transpose(matches: &ArgMatches) -> Result<()> {
    let song = load_song(matches)?;
    let transforms = TransformDescriptor {
        normalize: true,
        transpose_amount: matches.get_one::<i32>("by").copied().unwrap_or(0),
    };
    let transposed = apply_transforms(&song, &transforms);
    let content = serde_json::to_string_pretty(&transposed).context("Failed to encode song")?;

    match matches.get_one::<String>("output") {
        Some(output_file) => {
            tracing::info!(path = %output_file, "writing transposed song");
            std::fs::write(Path::new(output_file), content + "\n")
                .with_context(|| format!("Failed to write output file: {}", output_file))?;
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn run_chord(matches: &ArgMatches) -> Result<()> {
    let steps = matches.get_one::<i32>("by").copied().unwrap_or(0);
    let chords: Vec<String> = matches
        .get_many::<String>("chords")
        .unwrap_or_default()
        .map(|chord| chordsheet::transpose_chord(chord, steps))
        .collect();
    println!("{}", chords.join(" "));
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("list", sub)) => run_list(sub),
        Some(("view", sub)) => run_view(sub),
        Some(("export", sub)) => run_export(sub),
        Some(("transpose", sub)) => run_transpose(sub),
        Some(("chord", sub)) => run_chord(sub),
        _ => Err(anyhow!("Unknown command")),
    }
}
