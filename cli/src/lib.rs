//! fontord CLI (made by FontLab https://www.fontlab.com/)

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::info;

use fontord_core::family::{
    assemble_families, AssembleOptions, FontFamily, FontNameSource, FontStyle, PathFontNames,
    StaticFontNames,
};
use fontord_core::order::sort_font_names;
use fontord_core::output::{write_json_pretty, write_ndjson};
use fontord_core::query::{compile_patterns, FamilyQuery};

pub mod server;

/// Environment variable listing font roots, separated by `:` or `;`.
pub const FONT_DIRS_ENV: &str = "FONTORD_FONT_DIRS";

/// CLI entrypoint for fontord.
#[derive(Debug, Parser)]
#[command(
    name = "fontord",
    about = "Font style names and typographic ordering (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the style name derived from each raw font name
    Style(NamesArgs),
    /// Print raw font names in typographic order
    Sort(NamesArgs),
    /// Group fonts into families with ordered, labelled styles
    Families(FamiliesArgs),
    /// Serve naming and ordering over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct NamesArgs {
    /// Raw font names (`-` reads newline-delimited names from STDIN)
    #[arg(required_unless_present = "stdin")]
    names: Vec<String>,

    /// Read newline-delimited names from STDIN
    #[arg(long = "stdin", action = ArgAction::SetTrue)]
    stdin: bool,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Args)]
struct FamiliesArgs {
    /// Directories whose font file names are grouped into families
    #[arg(value_hint = ValueHint::DirPath, conflicts_with = "stdin_names")]
    paths: Vec<PathBuf>,

    /// Read newline-delimited raw font names from STDIN instead of walking paths
    #[arg(long = "stdin-names", action = ArgAction::SetTrue)]
    stdin_names: bool,

    /// Include the synthesized system UI families
    #[arg(long = "system", action = ArgAction::SetTrue)]
    system: bool,

    /// Regex patterns that must match the family name
    #[arg(short = 'F', long = "family", value_hint = ValueHint::Other)]
    family_patterns: Vec<String>,

    /// Regex patterns that must match the style name
    #[arg(short = 'S', long = "style", value_hint = ValueHint::Other)]
    style_patterns: Vec<String>,

    /// Only keep italic and oblique styles
    #[arg(short = 'i', long = "italic", action = ArgAction::SetTrue)]
    italic: bool,

    /// Follow symlinks while walking paths
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Number of worker threads used to sort families
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long = "bind", default_value = "127.0.0.1:8765")]
    bind: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Style(args) => run_style(args),
        Command::Sort(args) => run_sort(args),
        Command::Families(args) => run_families(args),
        Command::Serve(args) => run_serve(args),
    }
}

fn run_style(args: NamesArgs) -> Result<()> {
    let stdin = io::stdin();
    let names = gather_names(&args.names, args.stdin, stdin.lock())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_styles(&names, &mut handle, args.json)
}

fn run_sort(args: NamesArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut names = gather_names(&args.names, args.stdin, stdin.lock())?;
    sort_font_names(&mut names);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.json {
        let json = serde_json::to_string_pretty(&names)?;
        writeln!(handle, "{json}")?;
    } else {
        for name in &names {
            writeln!(handle, "{name}")?;
        }
    }
    Ok(())
}

fn run_families(args: FamiliesArgs) -> Result<()> {
    let stdin = io::stdin();
    let source = build_source(&args, stdin.lock())?;
    let query = build_query_from_parts(&args.family_patterns, &args.style_patterns, args.italic)?;
    let opts = AssembleOptions {
        include_system: args.system,
        jobs: args.jobs,
    };

    let families = assemble_families(source.as_ref(), &query, &opts)?;
    info!("assembled {} families", families.len());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let use_color = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => handle.is_terminal(),
    };

    if args.ndjson {
        write_ndjson(&families, &mut handle)?;
    } else if args.json {
        write_json_pretty(&families, &mut handle)?;
    } else if args.columns {
        write_columns(&families, &mut handle, use_color)?;
    } else {
        write_plain(&families, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    info!("serving on {}", args.bind);
    runtime.block_on(server::serve(&args.bind))
}

/// Build the family filter shared by the CLI and the HTTP server.
pub(crate) fn build_query_from_parts(
    family_patterns: &[String],
    style_patterns: &[String],
    italic_only: bool,
) -> Result<FamilyQuery> {
    Ok(FamilyQuery::new()
        .with_family_patterns(compile_patterns(family_patterns)?)
        .with_style_patterns(compile_patterns(style_patterns)?)
        .italic_only(italic_only))
}

fn build_source(args: &FamiliesArgs, mut stdin: impl BufRead) -> Result<Box<dyn FontNameSource>> {
    if args.stdin_names {
        let names = read_lines_from(&mut stdin)?;
        if names.is_empty() && !args.system {
            return Err(anyhow!("no font names provided on STDIN"));
        }
        return Ok(Box::new(StaticFontNames::from_font_names(names)));
    }

    let roots = if args.paths.is_empty() {
        font_roots_from_env()?
    } else {
        args.paths.clone()
    };

    if roots.is_empty() {
        if args.system {
            return Ok(Box::new(StaticFontNames::new()));
        }
        return Err(anyhow!(
            "no font sources provided (pass paths, --stdin-names, --system or set {FONT_DIRS_ENV})"
        ));
    }

    Ok(Box::new(
        PathFontNames::new(roots).follow_symlinks(args.follow_symlinks),
    ))
}

fn gather_names(raw: &[String], read_stdin: bool, mut stdin: impl BufRead) -> Result<Vec<String>> {
    let mut names = Vec::new();

    if read_stdin {
        names.extend(read_lines_from(&mut stdin)?);
    }

    for name in raw {
        if name == "-" {
            names.extend(read_lines_from(&mut stdin)?);
        } else {
            names.push(name.clone());
        }
    }

    if names.is_empty() {
        return Err(anyhow!("no font names provided"));
    }

    Ok(names)
}

fn read_lines_from(reader: &mut impl BufRead) -> Result<Vec<String>> {
    let mut buf = String::new();
    let mut lines = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }

        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    Ok(lines)
}

/// Font roots named by `FONTORD_FONT_DIRS`; empty when the variable is unset.
fn font_roots_from_env() -> Result<Vec<PathBuf>> {
    let raw = match env::var(FONT_DIRS_ENV) {
        Ok(raw) => raw,
        Err(_) => return Ok(Vec::new()),
    };

    let mut roots: Vec<PathBuf> = raw
        .split([':', ';'])
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect();

    roots.sort();
    roots.dedup();

    if roots.is_empty() {
        return Err(anyhow!("{FONT_DIRS_ENV} is set but no paths exist"));
    }
    Ok(roots)
}

fn write_styles(names: &[String], mut w: impl Write, json: bool) -> Result<()> {
    if json {
        let styles: Vec<FontStyle> = names.iter().map(FontStyle::from_font_name).collect();
        let rendered = serde_json::to_string_pretty(&styles)?;
        writeln!(w, "{rendered}")?;
        return Ok(());
    }

    for name in names {
        let style = FontStyle::from_font_name(name.as_str());
        writeln!(w, "{}\t{}", style.font_name, style.style_name)?;
    }
    Ok(())
}

fn write_plain(families: &[FontFamily], mut w: impl Write, color: bool) -> Result<()> {
    for family in families {
        writeln!(w, "{}", apply_color(&family.family_name, color, AnsiColor::Cyan))?;
        for style in &family.styles {
            let name = apply_color(&style.style_name, color, AnsiColor::Yellow);
            writeln!(w, "  {name}  {}", style.font_name)?;
        }
    }
    Ok(())
}

fn write_columns(families: &[FontFamily], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(&str, &str, &str)> = families
        .iter()
        .flat_map(|f| {
            f.styles
                .iter()
                .map(move |s| (f.family_name.as_str(), s.style_name.as_str(), s.font_name.as_str()))
        })
        .collect();

    let family_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 80);
    let style_width = rows
        .iter()
        .map(|r| r.1.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 40);

    for (family, style, font) in rows {
        let padded_family = format!("{:<family_width$}", family);
        let padded_style = format!("{:<style_width$}", style);
        let rendered_family = apply_color(&padded_family, color, AnsiColor::Cyan);
        let rendered_style = apply_color(&padded_style, color, AnsiColor::Yellow);
        let rendered_font = apply_color(font, color, AnsiColor::Green);

        writeln!(w, "{rendered_family}  {rendered_style}  {rendered_font}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}

#[cfg(test)]
mod tests;
