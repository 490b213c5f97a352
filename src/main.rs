//! codepad - a small terminal code editor
//!
//! A text area with regex syntax highlighting, a file explorer panel and
//! the usual file operations, driven by Emacs-style key bindings.

mod buffer;
mod command;
mod config;
mod display;
mod editor;
mod error;
mod explorer;
mod fileops;
mod input;
mod line;
mod logging;
mod syntax;
mod terminal;
mod window;

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use buffer::Buffer;
use command::{CommandRegistry, KeyTable};
use config::Config;
use editor::EditorState;
use error::{EditorError, Result};
use fileops::{DiskFs, FileOps};
use syntax::SyntaxManager;
use terminal::Terminal;

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Args {
    help: bool,
    version: bool,
    print: Option<PathBuf>,
    config: Option<PathBuf>,
    path: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;

    if args.help {
        print_usage();
        return Ok(());
    }
    if args.version {
        print_version();
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    if let Some(log_file) = &config.log_file {
        logging::init(log_file, config.log_level)?;
    }

    let mut syntax = SyntaxManager::new(&config.theme)?;
    syntax.enabled = config.syntax_highlighting;

    if let Some(path) = &args.print {
        return print_file(&syntax, path, config.tab_width);
    }

    let fs = DiskFs::new();
    let cwd = env::current_dir()?;
    let (root, file) = explorer_root(&fs, &cwd, args.path);
    log::info!("starting in {}", root.display());

    let mut terminal = Terminal::new()?;
    let mut editor = EditorState::new(config, syntax, Box::new(fs), root);

    if let Some(path) = file {
        if editor.fs.exists(&path) {
            editor.open_path(&path);
        } else {
            editor.buffer.set_filename(Some(path.clone()));
            editor.buffer.set_language(editor.syntax.detect_language(&path).map(str::to_string));
            editor.display.set_message(format!("(New file) {}", path.display()));
        }
    }

    editor.run(&mut terminal)
}

/// Split the PATH argument into the explorer root and the file to open.
/// Both come back absolute, matching the paths the explorer lists.
fn explorer_root(fs: &dyn FileOps, cwd: &Path, path: Option<PathBuf>) -> (PathBuf, Option<PathBuf>) {
    let Some(path) = path else {
        return (cwd.to_path_buf(), None);
    };
    let path = cwd.join(path);
    if fs.is_dir(&path) {
        return (path, None);
    }
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
    (root, Some(path))
}

fn parse_args<I: Iterator<Item = String>>(mut iter: I) -> Result<Args> {
    let mut args = Args::default();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => args.help = true,
            "-V" | "--version" => args.version = true,
            "-p" | "--print" => args.print = Some(required_value(&arg, iter.next())?),
            "-c" | "--config" => args.config = Some(required_value(&arg, iter.next())?),
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(EditorError::Message(format!("unknown option `{}`", s)));
            }
            _ => {
                if args.path.is_some() {
                    return Err(EditorError::Message("only one path may be given".to_string()));
                }
                args.path = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(args)
}

fn required_value(flag: &str, value: Option<String>) -> Result<PathBuf> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| EditorError::Message(format!("`{}` needs a file argument", flag)))
}

/// Write `path` to stdout with highlighting and exit
fn print_file(syntax: &SyntaxManager, path: &Path, tab_width: usize) -> Result<()> {
    let text = DiskFs::new().read_to_string(path)?;
    let buffer = Buffer::from_text(&text);
    let language = syntax.detect_language(path);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in buffer.lines() {
        let spans = syntax.highlight_line(language, line.text());
        display::print_highlighted(&mut out, line.text(), &spans, tab_width)?;
    }
    out.flush()?;
    Ok(())
}

fn print_usage() {
    println!("codepad {} - a small terminal code editor", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: codepad [OPTIONS] [PATH]");
    println!();
    println!("PATH may be a file to open or a directory to browse.");
    println!();
    println!("Options:");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!("  -p, --print FILE     Print FILE highlighted and exit");
    println!("  -c, --config FILE    Read settings from FILE");
    println!();
    println!("Commands (run any with M-x):");
    let commands = CommandRegistry::with_defaults();
    let keys = KeyTable::with_defaults();
    let bindings = keys.all_bindings();
    for name in commands.names() {
        let bound: Vec<String> = bindings
            .iter()
            .filter(|(_, command)| *command == name)
            .map(|(key, _)| key.display_name())
            .collect();
        println!("  {:<28} {:<22} {}", name, bound.join(", "), commands.help(name).unwrap_or(""));
    }

    if let Ok(syntax) = SyntaxManager::new(&syntax::Theme::default()) {
        println!();
        println!("Highlighted languages: {}", syntax.list_languages().join(", "));
    }
}

fn print_version() {
    println!("codepad {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_path_and_flags() {
        let args = parse(&["-c", "my.toml", "src"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert_eq!(args.path, Some(PathBuf::from("src")));
        assert!(!args.help);

        assert!(parse(&["--version"]).unwrap().version);
        assert_eq!(parse(&["--print", "a.py"]).unwrap().print, Some(PathBuf::from("a.py")));
    }

    #[test]
    fn test_file_argument_matches_explorer_paths() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path();
        std::fs::create_dir(cwd.join("web")).unwrap();
        std::fs::write(cwd.join("page.html"), "").unwrap();
        let fs = DiskFs::new();

        let (root, file) = explorer_root(&fs, cwd, Some(PathBuf::from("page.html")));
        assert_eq!(root, cwd);
        assert_eq!(file, Some(cwd.join("page.html")));

        let mut explorer = explorer::Explorer::new(root, true, 20);
        explorer.refresh(&fs).unwrap();
        assert!(explorer.select_path(&cwd.join("page.html")));

        assert_eq!(explorer_root(&fs, cwd, Some(PathBuf::from("web"))), (cwd.join("web"), None));
        assert_eq!(explorer_root(&fs, cwd, None), (cwd.to_path_buf(), None));

        // Absolute arguments are kept as given
        let absolute = cwd.join("web").join("new.py");
        assert_eq!(explorer_root(&fs, cwd, Some(absolute.clone())), (cwd.join("web"), Some(absolute)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--print"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["a", "b"]).is_err());
    }
}
