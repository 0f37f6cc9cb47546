use super::*;
use clap::CommandFactory;
use std::io::Cursor;
use tempfile::tempdir;

fn families_args(paths: Vec<PathBuf>) -> FamiliesArgs {
    FamiliesArgs {
        paths,
        stdin_names: false,
        system: false,
        family_patterns: Vec::new(),
        style_patterns: Vec::new(),
        italic: false,
        follow_symlinks: false,
        jobs: None,
        json: false,
        ndjson: false,
        columns: false,
        color: ColorChoice::Auto,
    }
}

fn sample_families() -> Vec<FontFamily> {
    vec![
        FontFamily::from_font_names(
            "Avenir",
            vec!["Avenir-Heavy".into(), "Avenir-Book".into()],
        ),
        FontFamily::from_font_names("Menlo", vec!["Menlo-Regular".into()]),
    ]
}

#[test]
fn parses_families_args_into_query() {
    let cli = Cli::try_parse_from([
        "fontord", "families", "-F", "^Av", "-S", "Oblique", "--italic", "--json", "/fonts",
    ])
    .expect("parse cli");

    let Command::Families(args) = cli.command else {
        panic!("expected families command");
    };

    let query = build_query_from_parts(&args.family_patterns, &args.style_patterns, args.italic)
        .expect("build query");
    assert!(args.json);
    assert!(query.matches_family("Avenir"));
    assert!(!query.matches_family("Menlo"));
    assert!(query.matches_style(&FontStyle::from_font_name("Avenir-BookOblique")));
    assert!(!query.matches_style(&FontStyle::from_font_name("Avenir-Book")));
}

#[test]
fn json_and_ndjson_conflict() {
    let parse = Cli::try_parse_from(["fontord", "families", "--json", "--ndjson", "/fonts"]);
    assert!(parse.is_err());
}

#[test]
fn stdin_names_conflict_with_paths() {
    let parse = Cli::try_parse_from(["fontord", "families", "--stdin-names", "/fonts"]);
    assert!(parse.is_err());
}

#[test]
fn invalid_regex_returns_error() {
    let built = build_query_from_parts(&["(".to_string()], &[], false);
    assert!(built.is_err());
}

#[test]
fn gathers_names_from_stdin_when_flagged() {
    let mut stdin = Cursor::new(b"Helvetica-Bold\n\nHelvetica\n".to_vec());
    let names = gather_names(&[], true, &mut stdin).expect("names");

    assert_eq!(names, vec!["Helvetica-Bold", "Helvetica"]);
}

#[test]
fn dash_placeholder_reads_stdin_and_merges_other_names() {
    let mut stdin = Cursor::new(b"Menlo-Bold\n".to_vec());
    let names = gather_names(
        &["-".to_string(), "Menlo-Regular".to_string()],
        false,
        &mut stdin,
    )
    .expect("names");

    assert_eq!(names, vec!["Menlo-Bold", "Menlo-Regular"]);
}

#[test]
fn empty_name_list_is_an_error() {
    let stdin = Cursor::new(Vec::new());
    assert!(gather_names(&[], true, stdin).is_err());
}

#[test]
fn writes_tab_separated_styles() {
    let names = vec!["Helvetica-Bold".to_string(), "Damascus".to_string()];
    let mut buf = Cursor::new(Vec::new());
    write_styles(&names, &mut buf, false).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    assert_eq!(output, "Helvetica-Bold\tBold\nDamascus\tRegular\n");
}

#[test]
fn writes_styles_as_json() {
    let names = vec!["DamascusBold".to_string()];
    let mut buf = Cursor::new(Vec::new());
    write_styles(&names, &mut buf, true).expect("write");

    let parsed: Vec<FontStyle> = serde_json::from_slice(&buf.into_inner()).expect("json");
    assert_eq!(parsed[0].style_name, "Bold");
}

#[test]
fn stdin_names_are_grouped_into_families() {
    let mut args = families_args(Vec::new());
    args.stdin_names = true;
    let stdin = Cursor::new(b"Avenir-Heavy\nAvenir-Book\nMenlo-Regular\n".to_vec());

    let source = build_source(&args, stdin).expect("source");
    let families = source.families().expect("families");

    assert_eq!(families.len(), 2);
    assert_eq!(families[0].family_name, "Avenir");
}

#[test]
fn system_only_needs_no_other_source() {
    let mut args = families_args(Vec::new());
    args.system = true;

    assert!(build_source(&args, Cursor::new(Vec::new())).is_ok());
}

#[test]
fn font_roots_use_override_env() {
    let tmp = tempdir().expect("tempdir");
    let font_dir = tmp.path().join("fonts");
    std::fs::create_dir_all(&font_dir).expect("mkdir");

    env::set_var(FONT_DIRS_ENV, font_dir.display().to_string());
    let roots = font_roots_from_env().expect("roots");
    env::remove_var(FONT_DIRS_ENV);

    assert_eq!(roots, vec![font_dir]);
}

#[test]
fn plain_output_lists_styles_under_family() {
    let mut buf = Cursor::new(Vec::new());
    write_plain(&sample_families(), &mut buf, false).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "Avenir",
            "  Book  Avenir-Book",
            "  Heavy  Avenir-Heavy",
            "Menlo",
            "  Regular  Menlo-Regular",
        ]
    );
}

#[test]
fn columns_align_style_names() {
    let mut buf = Cursor::new(Vec::new());
    write_columns(&sample_families(), &mut buf, false).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    let book_pos = lines[0].find("Book").expect("book");
    let regular_pos = lines[2].find("Regular").expect("regular");
    assert_eq!(book_pos, regular_pos);
}

#[test]
fn color_choice_is_applied() {
    let mut buf = Cursor::new(Vec::new());
    write_plain(&sample_families(), &mut buf, true).expect("write");

    let output = String::from_utf8(buf.into_inner()).expect("utf8");
    assert!(output.contains("\u{1b}["));
}

#[test]
fn help_output_includes_filter_flags() {
    let mut root = Cli::command();
    let families = root
        .find_subcommand_mut("families")
        .expect("families command present");
    let help = families.render_long_help().to_string();
    assert!(help.contains("--italic"));
    assert!(help.contains("--color <COLOR>"));
}
