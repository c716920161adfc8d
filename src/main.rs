//! vicky - highlight, search and replace from the command line

use std::env;
use std::fs;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use log::{error, info};

use vicky::config::{Settings, Snapshot, DEFAULT_SETTINGS_PATH};
use vicky::render::Renderer;
use vicky::search::{FindOptions, Search};
use vicky::syntax::{Registry, Session};
use vicky::{logger, Error, Result};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    silent: bool,
    verbose: bool,
    list: bool,
    config: Option<PathBuf>,
    theme: Option<PathBuf>,
    highlighter: Option<String>,
    find: Option<String>,
    replace: Option<String>,
    find_options: FindOptions,
    log: Option<PathBuf>,
    files: Vec<PathBuf>,
}

enum Command {
    Run(Options),
    Help,
    Version,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = match parse_args(env::args().skip(1))? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Run(options) => options,
    };

    logger::init(options.silent, options.verbose, options.log.as_deref())?;

    let registry = Registry::with_builtins();
    if options.list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = options
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let (mut settings, settings_warnings) = Settings::load(&config);
    if let Some(theme) = &options.theme {
        settings = settings.with_theme(theme);
    }
    if let Some(name) = &options.highlighter {
        settings = settings.with_highlighter(name);
    }
    let (snapshot, warnings) = Snapshot::from_settings(settings, &registry);
    for warning in settings_warnings.into_iter().map(Error::from).chain(warnings) {
        eprintln!("warning: {}", warning);
    }

    let mut search = match &options.find {
        Some(query) if !query.is_empty() => Some(Search::new(query, options.find_options)?),
        _ => None,
    };

    if let Some(replacement) = &options.replace {
        let Some(search) = search.as_mut() else {
            return Err(Error::Message("--replace needs a non-empty --find".to_string()));
        };
        if options.files.is_empty() {
            return Err(Error::Message("--replace needs at least one FILE".to_string()));
        }
        return for_each_file(&options.files, |path| {
            replace_in_file(path, search, replacement)
        });
    }

    let stdout = io::stdout();
    let width = if stdout.is_terminal() {
        crossterm::terminal::size().ok().map(|(cols, _)| cols as usize)
    } else {
        None
    };
    let mut out = BufWriter::new(stdout.lock());

    if options.files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        let lines: Vec<&str> = text.lines().collect();
        let session = snapshot.attach(&lines);
        render(&mut out, &snapshot, &session, &lines, search.as_ref(), width)?;
    } else {
        let highlighter_forced = options.highlighter.is_some();
        for_each_file(&options.files, |path| {
            let text = fs::read_to_string(path)?;
            let lines: Vec<&str> = text.lines().collect();
            let session = match registry.detect(path).filter(|_| !highlighter_forced) {
                Some(profile) => {
                    let (session, err) = snapshot.attach_with(profile, &lines);
                    if let Some(err) = err {
                        eprintln!("warning: {}", err);
                    }
                    session
                }
                None => snapshot.attach(&lines),
            };
            info!("Rendering {} with {}", path.display(), session.profile().name);
            render(&mut out, &snapshot, &session, &lines, search.as_ref(), width)
        })?;
    }

    out.flush()?;
    Ok(())
}

/// Run `f` on every file, reporting failures and carrying on
fn for_each_file<F>(files: &[PathBuf], mut f: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    let mut failed = 0;
    for path in files {
        if let Err(e) = f(path) {
            error!("{}: {}", path.display(), e);
            eprintln!("{}: {}", path.display(), e);
            failed += 1;
        }
    }
    if failed > 0 {
        return Err(Error::Message(format!("{} file(s) could not be processed", failed)));
    }
    Ok(())
}

fn replace_in_file(path: &Path, search: &mut Search, replacement: &str) -> Result<()> {
    let mut text = fs::read_to_string(path)?;
    let count = search.replace_all(&mut text, replacement);
    if count > 0 {
        fs::write(path, &text)?;
    }
    info!("Replaced {} occurrence(s) in {}", count, path.display());
    println!("{}: {} replacement(s)", path.display(), count);
    Ok(())
}

fn render<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    session: &Session,
    lines: &[&str],
    search: Option<&Search>,
    width: Option<usize>,
) -> Result<()> {
    let editor = &snapshot.settings.editor;
    let mut renderer = Renderer::new(session.palette(), editor.show_line_numbers, editor.spaces_per_tab);
    if let Some(cols) = width {
        renderer = renderer.with_width(cols);
    }
    renderer.set_line_count(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let mut spans = session.spans(index).to_vec();
        if let Some(search) = search {
            renderer.overlay_matches(&mut spans, &search.matches(line));
        }
        renderer.render_line(out, index, line, &spans)?;
    }
    Ok(())
}

fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--silent" | "-s" => options.silent = true,
            "--verbose" | "-v" => options.verbose = true,
            "--list" => options.list = true,
            "--regex" => options.find_options.regex = true,
            "--case-sensitive" => options.find_options.case_sensitive = true,
            "--whole-words" => options.find_options.whole_words = true,
            "--config" | "-c" => options.config = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--theme" | "-t" => options.theme = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--highlighter" => options.highlighter = Some(value(&mut args, &arg)?),
            "--find" | "-f" => options.find = Some(value(&mut args, &arg)?),
            "--replace" | "-r" => options.replace = Some(value(&mut args, &arg)?),
            "--log" => options.log = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--" => {
                options.files.extend(args.by_ref().map(PathBuf::from));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(Error::Message(format!("unknown option: {}", other)));
            }
            file => options.files.push(PathBuf::from(file)),
        }
    }

    Ok(Command::Run(options))
}

fn value<I: Iterator<Item = String>>(args: &mut I, name: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| Error::Message(format!("{} needs a value", name)))
}

fn print_usage() {
    println!("vicky {} - syntax highlighter and search tool", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: vicky [OPTIONS] [FILE]...");
    println!();
    println!("Highlights each FILE (or standard input) to the terminal.");
    println!();
    println!("Options:");
    println!("  -h, --help               Show this help message");
    println!("  -V, --version            Show version information");
    println!("  -s, --silent             Only log errors");
    println!("  -v, --verbose            Log debug output");
    println!("  -c, --config PATH        Settings file (default: {})", DEFAULT_SETTINGS_PATH);
    println!("  -t, --theme PATH         Theme file overriding the settings");
    println!("      --highlighter NAME   Highlighter overriding the settings");
    println!("  -f, --find PATTERN       Mark matches while rendering");
    println!("  -r, --replace TEXT       Replace all matches of --find in each FILE");
    println!("      --regex              Treat PATTERN as a regular expression");
    println!("      --case-sensitive     Match case");
    println!("      --whole-words        Match whole words");
    println!("      --log PATH           Write the log to PATH instead of stderr");
    println!("      --list               List registered highlighters");
}

fn print_version() {
    println!("vicky {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_options() {
        let Ok(Command::Run(options)) = parse(&[
            "-v", "-c", "my.ini", "--find", "fo.o", "--whole-words", "a.py", "--", "-b.py",
        ]) else {
            panic!("expected options");
        };
        assert!(options.verbose);
        assert_eq!(options.config, Some(PathBuf::from("my.ini")));
        assert_eq!(options.find.as_deref(), Some("fo.o"));
        assert!(options.find_options.whole_words);
        assert_eq!(options.files, vec![PathBuf::from("a.py"), PathBuf::from("-b.py")]);
    }

    #[test]
    fn test_parse_help_and_errors() {
        assert!(matches!(parse(&["x.py", "--help"]), Ok(Command::Help)));
        assert!(matches!(parse(&["-V"]), Ok(Command::Version)));
        assert!(parse(&["--theme"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }
}
